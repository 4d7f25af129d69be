//! Tree assembly: flat feed order → ordered parent/child forest.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::item::{Item, ItemStatus, ItemType};

/// Assemble a flat item sequence into an ordered forest.
///
/// The feed interleaves parents and children in no particular order, so the
/// input is first ordered parentless-first (children by descending number),
/// which guarantees every parent is registered before any of its children.
/// A child whose parent never appeared in the feed is attached to a stand-in
/// node synthesized from the embedded parent metadata rather than dropped.
///
/// Returned nodes are newly constructed: no input record is mutated, no node
/// in the forest carries a parent reference, and nesting is exactly one
/// level deep. Top-level order is descending by the number of a node's first
/// child when it has children, else its own number, so a parent sorts near
/// its most recent child rather than by its own, possibly much older,
/// number.
#[must_use]
pub fn build_forest(items: &[Item]) -> Vec<Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by_key(|item| (item.parent.is_some(), Reverse(item.number)));

    let mut forest: Vec<Item> = Vec::new();
    let mut slots: HashMap<u64, usize> = HashMap::new();

    for item in ordered {
        let Some(parent_ref) = &item.parent else {
            slots.insert(item.number, forest.len());
            forest.push(item.clone());
            continue;
        };

        let mut child = item.clone();
        child.parent = None;

        if let Some(&slot) = slots.get(&parent_ref.number) {
            forest[slot].children.push(child);
        } else {
            // Parent filtered out upstream: keep the child visible under a
            // synthesized stand-in. Missing metadata falls back to the
            // child's status so the pair still lands in a printable bucket.
            let mut placeholder = Item::new(
                parent_ref.number,
                parent_ref.item_type.unwrap_or(ItemType::Unknown),
                parent_ref.status.unwrap_or(child.status),
                parent_ref.title.clone().unwrap_or_default(),
            );
            placeholder.children.push(child);
            slots.insert(parent_ref.number, forest.len());
            forest.push(placeholder);
        }
    }

    forest.sort_by_key(|item| {
        Reverse(item.children.first().map_or(item.number, |child| child.number))
    });
    forest
}
