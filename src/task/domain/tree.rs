//! Pure operations over a task's subtask tree.
//!
//! Every editing function takes the current tree by reference and returns a
//! new tree; the input is never modified. Operations referencing an id that
//! is not in the tree return an unchanged copy instead of failing.
//!
//! Trees are at most two levels deep: root subtasks live at depth 0 and may
//! own depth-1 children, which must be leaves. [`add_nested`] and
//! [`add_root`] enforce the ceiling; the remaining functions accept trees of
//! any depth.

use super::{Subtask, SubtaskId, SubtaskPatch, TaskDomainError};

/// Deepest depth a subtask may occupy.
pub const MAX_DEPTH: usize = 1;

/// Counts every node in the tree, nested children included.
#[must_use]
pub fn count_all(nodes: &[Subtask]) -> usize {
    nodes.iter().map(|node| 1 + count_all(node.children())).sum()
}

/// Counts completed nodes in the tree, nested children included.
#[must_use]
pub fn count_completed(nodes: &[Subtask]) -> usize {
    nodes
        .iter()
        .map(|node| usize::from(node.is_completed()) + count_completed(node.children()))
        .sum()
}

/// Sets the completion of `id` and forces the same flag onto all of its
/// descendants.
#[must_use]
pub fn toggle_with_cascade(nodes: &[Subtask], id: &SubtaskId, completed: bool) -> Vec<Subtask> {
    let mut updated = nodes.to_vec();
    if let Some(node) = find_mut(&mut updated, id) {
        node.cascade_completed(completed);
    }
    updated
}

/// Returns `true` when every direct child is completed; vacuously `true`
/// for a leaf.
#[must_use]
pub fn are_all_children_completed(node: &Subtask) -> bool {
    node.children().iter().all(Subtask::is_completed)
}

/// Returns `true` when at least one direct child is completed; `false` for a
/// leaf.
#[must_use]
pub fn are_any_children_completed(node: &Subtask) -> bool {
    node.children().iter().any(Subtask::is_completed)
}

/// A node yielded by [`flatten`] together with its position in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatSubtask<'a> {
    /// The visited node.
    pub node: &'a Subtask,
    /// Zero-based depth of the node.
    pub depth: usize,
    /// Identifier of the parent subtask; `None` for root subtasks.
    pub parent_id: Option<&'a SubtaskId>,
}

/// Pre-order depth-first iterator over a subtask tree.
///
/// Cloning a partially consumed iterator gives an independent cursor at the
/// same position; call [`flatten`] again to start over.
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<FlatSubtask<'a>>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatSubtask<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.stack.pop()?;
        let child_depth = entry.depth + 1;
        self.stack
            .extend(entry.node.children().iter().rev().map(|child| FlatSubtask {
                node: child,
                depth: child_depth,
                parent_id: Some(entry.node.id()),
            }));
        Some(entry)
    }
}

/// Walks the tree in pre-order, starting at depth 0.
#[must_use]
pub fn flatten(nodes: &[Subtask]) -> Flatten<'_> {
    Flatten {
        stack: nodes
            .iter()
            .rev()
            .map(|node| FlatSubtask {
                node,
                depth: 0,
                parent_id: None,
            })
            .collect(),
    }
}

/// Finds the first node with `id` in depth-first order.
#[must_use]
pub fn find_by_id<'a>(nodes: &'a [Subtask], id: &SubtaskId) -> Option<&'a Subtask> {
    flatten(nodes)
        .find(|entry| entry.node.id() == id)
        .map(|entry| entry.node)
}

/// Returns the depth of the first node with `id`.
#[must_use]
pub fn depth_of(nodes: &[Subtask], id: &SubtaskId) -> Option<usize> {
    flatten(nodes)
        .find(|entry| entry.node.id() == id)
        .map(|entry| entry.depth)
}

/// Removes every node with `id` together with its descendants.
#[must_use]
pub fn delete_by_id(nodes: &[Subtask], id: &SubtaskId) -> Vec<Subtask> {
    let mut updated = nodes.to_vec();
    remove_recursive(&mut updated, id);
    updated
}

/// Shallow-merges `patch` into the first node with `id`.
#[must_use]
pub fn update_by_id(nodes: &[Subtask], id: &SubtaskId, patch: &SubtaskPatch) -> Vec<Subtask> {
    let mut updated = nodes.to_vec();
    if let Some(node) = find_mut(&mut updated, id) {
        patch.apply_to(node);
    }
    updated
}

/// Appends `new_node` to the children of `parent_id`.
///
/// Returns an unchanged copy when the parent does not exist.
///
/// # Errors
///
/// Returns [`TaskDomainError::NestingTooDeep`] when the inserted node, or
/// any of its own children, would land deeper than [`MAX_DEPTH`].
pub fn add_nested(
    nodes: &[Subtask],
    parent_id: &SubtaskId,
    new_node: Subtask,
) -> Result<Vec<Subtask>, TaskDomainError> {
    let Some(parent_depth) = depth_of(nodes, parent_id) else {
        return Ok(nodes.to_vec());
    };
    let deepest = parent_depth + 1 + new_node.height();
    if deepest > MAX_DEPTH {
        return Err(TaskDomainError::NestingTooDeep {
            parent: parent_id.clone(),
            depth: deepest,
        });
    }

    let mut updated = nodes.to_vec();
    if let Some(parent) = find_mut(&mut updated, parent_id) {
        parent.children_mut().push(new_node);
    }
    Ok(updated)
}

/// Appends `new_node` as a root subtask.
///
/// # Errors
///
/// Returns [`TaskDomainError::TreeTooDeep`] when `new_node` owns
/// grandchildren.
pub fn add_root(nodes: &[Subtask], new_node: Subtask) -> Result<Vec<Subtask>, TaskDomainError> {
    if new_node.height() > MAX_DEPTH {
        return Err(TaskDomainError::TreeTooDeep(new_node.id().clone()));
    }
    let mut updated = nodes.to_vec();
    updated.push(new_node);
    Ok(updated)
}

/// Checks that no root subtask owns nodes deeper than [`MAX_DEPTH`].
///
/// # Errors
///
/// Returns [`TaskDomainError::TreeTooDeep`] naming the first offending root.
pub fn validate_depth(nodes: &[Subtask]) -> Result<(), TaskDomainError> {
    match nodes.iter().find(|node| node.height() > MAX_DEPTH) {
        Some(node) => Err(TaskDomainError::TreeTooDeep(node.id().clone())),
        None => Ok(()),
    }
}

/// `round(100 * completed / total)`, or `0` for an empty tree.
#[must_use]
pub fn completion_percentage(nodes: &[Subtask]) -> u8 {
    let total = count_all(nodes);
    let completed = count_completed(nodes);
    // Round half up without floating point: (200c + t) / 2t.
    let rounded = (200 * completed + total)
        .checked_div(2 * total)
        .unwrap_or(0);
    u8::try_from(rounded).unwrap_or(100)
}

/// Case-insensitive title search over the flattened tree.
#[must_use]
pub fn search_titles<'a>(nodes: &'a [Subtask], query: &str) -> Vec<FlatSubtask<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    flatten(nodes)
        .filter(|entry| entry.node.title().to_lowercase().contains(&needle))
        .collect()
}

fn find_mut<'a>(nodes: &'a mut [Subtask], id: &SubtaskId) -> Option<&'a mut Subtask> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_mut(node.children_mut(), id) {
            return Some(found);
        }
    }
    None
}

fn remove_recursive(nodes: &mut Vec<Subtask>, id: &SubtaskId) {
    nodes.retain(|node| node.id() != id);
    for node in nodes.iter_mut() {
        remove_recursive(node.children_mut(), id);
    }
}
