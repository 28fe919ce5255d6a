mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Globally unique identity of a clipboard item.
///
/// Assigned once at capture time and never changed afterwards; it also names
/// the item's image files on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl_id!(ItemId);
