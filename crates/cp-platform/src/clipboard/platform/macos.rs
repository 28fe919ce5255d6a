use cocoa::appkit::NSPasteboard;
use cocoa::base::nil;
use objc::runtime::Object;
use objc::{msg_send, sel, sel_impl};

/// `NSPasteboard.generalPasteboard.changeCount`.
pub fn change_count() -> Option<u64> {
    // SAFETY: generalPasteboard returns a shared autoreleased instance and
    // changeCount is a plain NSInteger getter.
    let count: i64 = unsafe {
        let pasteboard: *mut Object = NSPasteboard::generalPasteboard(nil);
        if pasteboard.is_null() {
            return None;
        }
        msg_send![pasteboard, changeCount]
    };
    u64::try_from(count).ok()
}
