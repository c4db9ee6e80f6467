//! A small keyed reconciler for driving the host hooks in tests and demos.
//!
//! It keeps the last committed tree as fibers and, on every commit, walks the
//! new virtual tree against them the way a real reconciliation algorithm
//! would:
//!
//! 1. children are matched by `id` attribute, or by position when unkeyed;
//!    a match with a different tag counts as a replacement
//! 2. unmatched old children are removed first
//! 3. matched children get `commit_update` when their attributes differ and
//!    are reconciled recursively; new children are created with their whole
//!    subtree assembled through `append_initial_child`
//! 4. children whose old position is behind the last placed one are moved,
//!    new ones are placed, each before the next sibling that stays put (or
//!    appended when there is none)
//!
//! Committing an empty top-level tree clears the container in one call.

use std::collections::HashMap;

use tracing::trace;

use crate::dom::node::InstanceId;
use crate::error::Result;
use crate::host::Host;
use crate::root::Reconciler;
use crate::vnode::{Attributes, VirtualNode};

// ---------------------------------------------------------------------------
// Fiber
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Key {
    Id(String),
    Index(usize),
}

impl Key {
    fn of(node: &VirtualNode, index: usize) -> Self {
        match node.key() {
            Some(id) => Key::Id(id.to_owned()),
            None => Key::Index(index),
        }
    }
}

/// The committed counterpart of a virtual node.
#[derive(Debug)]
struct Fiber {
    key: Key,
    tag: String,
    attributes: Attributes,
    instance: InstanceId,
    children: Vec<Fiber>,
}

// ---------------------------------------------------------------------------
// KeyedReconciler
// ---------------------------------------------------------------------------

/// Reference [`Reconciler`] with keyed child matching and move detection.
#[derive(Debug, Default)]
pub struct KeyedReconciler {
    fibers: Vec<Fiber>,
}

impl KeyedReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances of the committed top-level nodes, in order.
    pub fn top_level(&self) -> Vec<InstanceId> {
        self.fibers.iter().map(|f| f.instance).collect()
    }
}

impl Reconciler for KeyedReconciler {
    fn update_container(&mut self, host: &mut Host, tree: &[VirtualNode]) -> Result<()> {
        host.prepare_for_commit();
        let old = std::mem::take(&mut self.fibers);

        if tree.is_empty() {
            if !old.is_empty() {
                host.clear_container();
            }
        } else {
            self.fibers = reconcile_children(host, None, old, tree)?;
        }

        host.reset_after_commit();
        Ok(())
    }

    fn reset(&mut self) {
        self.fibers.clear();
    }
}

// ---------------------------------------------------------------------------
// Diffing
// ---------------------------------------------------------------------------

/// Reconcile the children of `parent` (`None` is the root container).
fn reconcile_children(
    host: &mut Host,
    parent: Option<InstanceId>,
    old: Vec<Fiber>,
    new: &[VirtualNode],
) -> Result<Vec<Fiber>> {
    let mut existing: HashMap<Key, (usize, Fiber)> = HashMap::with_capacity(old.len());
    let mut deletions = Vec::new();
    for (index, fiber) in old.into_iter().enumerate() {
        if let Some(duplicate) = existing.insert(fiber.key.clone(), (index, fiber)) {
            deletions.push(duplicate);
        }
    }

    // Match.
    let mut matched: Vec<Option<(usize, Fiber)>> = Vec::with_capacity(new.len());
    for (index, node) in new.iter().enumerate() {
        let key = Key::of(node, index);
        let reuse = existing
            .get(&key)
            .is_some_and(|(_, fiber)| fiber.tag == node.tag);
        matched.push(if reuse { existing.remove(&key) } else { None });
    }

    // Deletions first, in old order.
    deletions.extend(existing.into_values());
    deletions.sort_by_key(|(index, _)| *index);
    for (_, fiber) in deletions {
        trace!(key = ?fiber.key, "deleting");
        remove(host, parent, fiber.instance)?;
    }

    // Update or create.
    let mut fibers = Vec::with_capacity(new.len());
    let mut previous_index = Vec::with_capacity(new.len());
    for (index, (node, slot)) in new.iter().zip(matched).enumerate() {
        match slot {
            Some((old_index, mut fiber)) => {
                if fiber.attributes != node.attributes {
                    host.commit_update(fiber.instance, &node.tag, &fiber.attributes, &node.attributes)?;
                    fiber.attributes = node.attributes.clone();
                }
                let children = std::mem::take(&mut fiber.children);
                fiber.children =
                    reconcile_children(host, Some(fiber.instance), children, &node.children)?;
                fibers.push(fiber);
                previous_index.push(Some(old_index));
            }
            None => {
                fibers.push(mount_fresh(host, node, Key::of(node, index))?);
                previous_index.push(None);
            }
        }
    }

    // Placement.
    let mut last_placed = 0;
    let stays: Vec<bool> = previous_index
        .iter()
        .map(|previous| match *previous {
            Some(old_index) if old_index >= last_placed => {
                last_placed = old_index;
                true
            }
            _ => false,
        })
        .collect();

    for index in 0..fibers.len() {
        if stays[index] {
            continue;
        }
        let anchor = (index + 1..fibers.len())
            .find(|&next| stays[next])
            .map(|next| fibers[next].instance);
        let child = fibers[index].instance;
        match anchor {
            Some(before) => insert_before(host, parent, child, before)?,
            None => append(host, parent, child)?,
        }
    }

    Ok(fibers)
}

/// Create `node` and its whole subtree, attached bottom-up.
fn mount_fresh(host: &mut Host, node: &VirtualNode, key: Key) -> Result<Fiber> {
    let instance = host.create_instance(&node.tag, &node.attributes)?;
    let mut children = Vec::with_capacity(node.children.len());
    for (index, child) in node.children.iter().enumerate() {
        let fiber = mount_fresh(host, child, Key::of(child, index))?;
        host.append_initial_child(instance, fiber.instance)?;
        children.push(fiber);
    }
    Ok(Fiber {
        key,
        tag: node.tag.clone(),
        attributes: node.attributes.clone(),
        instance,
        children,
    })
}

fn append(host: &mut Host, parent: Option<InstanceId>, child: InstanceId) -> Result<()> {
    match parent {
        Some(parent) => host.append_child(parent, child),
        None => host.append_child_to_container(child),
    }
}

fn insert_before(
    host: &mut Host,
    parent: Option<InstanceId>,
    child: InstanceId,
    before: InstanceId,
) -> Result<()> {
    match parent {
        Some(parent) => host.insert_before(parent, child, before),
        None => host.insert_in_container_before(child, before),
    }
}

fn remove(host: &mut Host, parent: Option<InstanceId>, child: InstanceId) -> Result<()> {
    match parent {
        Some(parent) => host.remove_child(parent, child),
        None => host.remove_child_from_container(child),
    }
}
