/// `GetClipboardSequenceNumber`; zero means the caller has no clipboard access.
pub fn change_count() -> Option<u64> {
    clipboard_win::raw::seq_num().map(|seq| u64::from(seq.get()))
}
