// ============================================================================
// Menu Core - Menu Tree
// File: crates/menu-core/src/domain/tree.rs
// Description: Rebuilds the menu hierarchy from a flat, ordered item list
// ============================================================================

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use menu_shared::MenuItemId;

use super::menu_item::MenuItem;

/// A menu item together with its ordered children. View-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemTreeNode {
    #[serde(flatten)]
    pub item: MenuItem,
    pub children: Vec<MenuItemTreeNode>,
}

impl MenuItemTreeNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Ids in pre-order.
    pub fn ids(&self) -> Vec<MenuItemId> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            ids.push(node.item.id);
            stack.extend(node.children.iter().rev());
        }
        ids
    }

    /// Longest root-to-leaf chain, counting `self` as depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }
}

// Unlinks descendants one level at a time so dropping a deep chain stays flat.
impl Drop for MenuItemTreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Menu items form a parent cycle: {ids:?}")]
    Cycle { ids: Vec<MenuItemId> },

    #[error("Menu item {0} appears more than once")]
    DuplicateId(MenuItemId),
}

const UNVISITED: u8 = 0;
const ON_PATH: u8 = 1;
const DONE: u8 = 2;

/// Nests `items` under their parents.
///
/// Items whose parent is missing from `items` become roots. Siblings keep
/// their relative input order, so callers hand in items already sorted by
/// position.
pub fn build_tree(items: Vec<MenuItem>) -> Result<Vec<MenuItemTreeNode>, TreeError> {
    let mut index: HashMap<MenuItemId, usize> = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if index.insert(item.id, i).is_some() {
            return Err(TreeError::DuplicateId(item.id));
        }
    }

    let parents: Vec<Option<usize>> = items
        .iter()
        .map(|item| item.parent_id.and_then(|pid| index.get(&pid).copied()))
        .collect();

    detect_cycle(&items, &parents)?;

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }

    // Post-order walk: a node is assembled once all its children are.
    let mut slots: Vec<Option<MenuItem>> = items.into_iter().map(Some).collect();
    let mut built: Vec<Option<MenuItemTreeNode>> = (0..slots.len()).map(|_| None).collect();
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&i| (i, false)).collect();

    while let Some((i, expanded)) = stack.pop() {
        if !expanded {
            stack.push((i, true));
            stack.extend(children[i].iter().rev().map(|&c| (c, false)));
            continue;
        }
        let Some(item) = slots[i].take() else {
            continue;
        };
        let kids = children[i].iter().filter_map(|&c| built[c].take()).collect();
        built[i] = Some(MenuItemTreeNode { item, children: kids });
    }

    Ok(roots.into_iter().filter_map(|i| built[i].take()).collect())
}

/// Walks each parent chain once; a chain that re-enters its own path is a cycle.
fn detect_cycle(items: &[MenuItem], parents: &[Option<usize>]) -> Result<(), TreeError> {
    let mut state = vec![UNVISITED; items.len()];

    for start in 0..items.len() {
        if state[start] != UNVISITED {
            continue;
        }

        let mut path: Vec<usize> = Vec::new();
        let mut current = Some(start);
        while let Some(i) = current {
            match state[i] {
                DONE => break,
                ON_PATH => {
                    let from = path.iter().position(|&p| p == i).unwrap_or(0);
                    let ids = path[from..].iter().map(|&p| items[p].id).collect();
                    return Err(TreeError::Cycle { ids });
                }
                _ => {
                    state[i] = ON_PATH;
                    path.push(i);
                    current = parents[i];
                }
            }
        }

        for i in path {
            state[i] = DONE;
        }
    }

    Ok(())
}

fn keeps(node: &MenuItemTreeNode, locale: &str) -> bool {
    node.item.is_root || node.item.is_published_in(locale)
}

/// Drops nodes without a published `locale` translation, along with their
/// subtrees. Menu root sentinels are always kept.
pub fn prune_unpublished(mut nodes: Vec<MenuItemTreeNode>, locale: &str) -> Vec<MenuItemTreeNode> {
    nodes.retain(|node| keeps(node, locale));

    let mut stack: Vec<&mut MenuItemTreeNode> = nodes.iter_mut().collect();
    while let Some(node) = stack.pop() {
        node.children.retain(|child| keeps(child, locale));
        stack.extend(node.children.iter_mut());
    }
    nodes
}
