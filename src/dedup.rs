//! Exact-duplicate removal across all processed images.
//!
//! Entries are keyed by `(username, comment)`. The output keeps the position
//! at which a key first appeared, and the entry stored there is the one seen
//! *last* for that key, so a later image's `source_image` replaces an
//! earlier one.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::comments::CommentEntry;

/// Collapses exact `(username, comment)` duplicates.
///
/// Output order is first-appearance order of each key. Running this on its
/// own output returns the same list.
pub fn deduplicate(entries: Vec<CommentEntry>) -> Vec<CommentEntry> {
    let mut slots: HashMap<(String, String), usize> = HashMap::new();
    let mut unique: Vec<CommentEntry> = Vec::new();

    for entry in entries {
        match slots.entry((entry.username.clone(), entry.comment.clone())) {
            Entry::Occupied(slot) => unique[*slot.get()] = entry,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}
