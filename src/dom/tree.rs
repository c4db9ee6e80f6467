//! The scene arena: attach, insert, remove, teardown, walk.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};
use tracing::{trace, warn};

use super::input::CursorMotion;
use super::lifecycle::{LifecycleEvent, LifecycleTracker};
use super::node::{CommonProps, InputProps, Instance, InstanceId, InstanceKind};
use crate::error::{HostError, Result};
use crate::event::Channel;
use crate::host::events;

/// Empty slice constant for returning when an instance has no children.
const EMPTY_CHILDREN: &[InstanceId] = &[];

/// Identity of the root container.
pub const ROOT_IDENTITY: &str = "root";

/// The retained scene graph, backed by a slotmap arena.
///
/// Every instance lives in a single `SlotMap`. Parent/child relationships are
/// stored in secondary maps so that teardown is O(subtree size) and lookup is
/// O(1). The root container is a group created with the scene and never
/// removed; everything the reconciler mounts hangs beneath it.
///
/// An instance is "attached" when it has a parent. Freshly created instances
/// are detached until the first `append`/`insert_before`.
#[derive(Debug)]
pub struct Scene {
    nodes: SlotMap<InstanceId, Instance>,
    children: SecondaryMap<InstanceId, Vec<InstanceId>>,
    parent: SecondaryMap<InstanceId, InstanceId>,
    root: InstanceId,
    lifecycle: LifecycleTracker,
}

impl Scene {
    /// A scene holding only the root container.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Instance::new(
            ROOT_IDENTITY,
            InstanceKind::Group,
            CommonProps::relative(),
        ));
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            root,
            lifecycle: LifecycleTracker::new(),
        }
    }

    /// The root container.
    pub fn root(&self) -> InstanceId {
        self.root
    }

    /// Put a new, detached instance into the arena.
    pub(crate) fn allocate(&mut self, instance: Instance) -> InstanceId {
        let id = self.nodes.insert(instance);
        self.children.insert(id, Vec::new());
        self.lifecycle.on_created(id);
        id
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Make `child` the last child of `parent`.
    ///
    /// A child already under `parent` is moved to the end. A child under a
    /// different parent is rejected; remove it first.
    pub fn append(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        let fresh = self.check_attach(parent, child)?;
        self.unlink_from_siblings(parent, child);
        self.siblings_mut(parent)?.push(child);
        self.parent.insert(child, parent);
        if fresh {
            self.lifecycle.on_attached(child, parent);
        }
        trace!(?parent, ?child, "appended");
        Ok(())
    }

    /// Insert `child` into `parent`'s children immediately before `before`.
    ///
    /// When `before` is not a child of `parent` the child is appended instead
    /// and a warning is logged. Inserting an instance before itself is a no-op.
    pub fn insert_before(
        &mut self,
        parent: InstanceId,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        if child == before {
            self.check_live(parent)?;
            self.check_live(child)?;
            trace!(?child, "insert before itself ignored");
            return Ok(());
        }
        let fresh = self.check_attach(parent, child)?;
        self.unlink_from_siblings(parent, child);

        let siblings = self.siblings_mut(parent)?;
        match siblings.iter().position(|&s| s == before) {
            Some(index) => siblings.insert(index, child),
            None => {
                siblings.push(child);
                warn!(
                    ?parent,
                    ?child,
                    ?before,
                    "insertion anchor is not a child of the parent; appended instead"
                );
            }
        }
        self.parent.insert(child, parent);
        if fresh {
            self.lifecycle.on_attached(child, parent);
        }
        trace!(?parent, ?child, ?before, "inserted");
        Ok(())
    }

    /// Detach `child` from `parent` and tear down its whole subtree.
    ///
    /// Returns the number of instances destroyed. Removing an instance that
    /// was already torn down fails with [`HostError::StaleInstance`].
    pub fn remove(&mut self, parent: InstanceId, child: InstanceId) -> Result<usize> {
        self.check_live(child)?;
        self.check_live(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(HostError::NotAChild { parent, child });
        }
        self.unlink_from_siblings(parent, child);
        self.parent.remove(child);
        self.lifecycle.on_detached(child);
        let destroyed = self.teardown(child);
        trace!(?parent, ?child, destroyed, "removed");
        Ok(destroyed)
    }

    /// Tear down every child of the root container.
    ///
    /// Returns the number of instances destroyed.
    pub fn clear_all(&mut self) -> usize {
        let top: Vec<InstanceId> = self.children(self.root).to_vec();
        let mut destroyed = 0;
        for child in top {
            self.parent.remove(child);
            self.lifecycle.on_detached(child);
            destroyed += self.teardown(child);
        }
        if let Some(siblings) = self.children.get_mut(self.root) {
            siblings.clear();
        }
        destroyed
    }

    /// Tear down instances that were created but never attached.
    ///
    /// Returns the number of instances destroyed, descendants included.
    pub fn discard_detached(&mut self) -> usize {
        let orphans: Vec<InstanceId> = self
            .nodes
            .keys()
            .filter(|&id| id != self.root && !self.parent.contains_key(id))
            .collect();
        orphans.into_iter().map(|id| self.teardown(id)).sum()
    }

    /// Return the scene to just the root container.
    pub fn reset(&mut self) -> usize {
        self.clear_all() + self.discard_detached()
    }

    /// Release `id` and all of its descendants (BFS), unbinding each
    /// instance's subscriptions before its slot is freed.
    fn teardown(&mut self, id: InstanceId) -> usize {
        let mut queue = VecDeque::new();
        queue.push_back(id);
        let mut destroyed = 0;

        while let Some(current) = queue.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                queue.extend(kids);
            }
            self.parent.remove(current);
            if let Some(mut instance) = self.nodes.remove(current) {
                let unbound = events::unbind_all(&mut instance);
                self.lifecycle.on_destroyed(current);
                trace!(instance = %instance.identity(), unbound, "destroyed");
                destroyed += 1;
            }
        }
        destroyed
    }

    /// Validate an attach of `child` under `parent`. Returns `true` when the
    /// child is not yet attached anywhere.
    fn check_attach(&self, parent: InstanceId, child: InstanceId) -> Result<bool> {
        self.check_live(parent)?;
        self.check_live(child)?;
        if child == self.root || child == parent || self.ancestors(parent).contains(&child) {
            return Err(HostError::WouldCycle { parent, child });
        }
        match self.parent(child) {
            None => Ok(true),
            Some(current) if current == parent => Ok(false),
            Some(current) => Err(HostError::AlreadyAttached {
                parent: current,
                child,
            }),
        }
    }

    fn check_live(&self, id: InstanceId) -> Result<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(HostError::StaleInstance(id))
        }
    }

    fn unlink_from_siblings(&mut self, parent: InstanceId, child: InstanceId) {
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.retain(|&s| s != child);
        }
    }

    fn siblings_mut(&mut self, parent: InstanceId) -> Result<&mut Vec<InstanceId>> {
        self.children
            .entry(parent)
            .map(|entry| entry.or_default())
            .ok_or(HostError::StaleInstance(parent))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Get the parent of an instance, if it is attached.
    pub fn parent(&self, id: InstanceId) -> Option<InstanceId> {
        self.parent.get(id).copied()
    }

    /// Children of an instance in order. Empty for leaves and stale ids.
    pub fn children(&self, id: InstanceId) -> &[InstanceId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the topmost ancestor, not including `id`.
    pub fn ancestors(&self, id: InstanceId) -> Vec<InstanceId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `id` is reachable from the root container.
    pub fn is_attached(&self, id: InstanceId) -> bool {
        id == self.root || self.ancestors(id).last() == Some(&self.root)
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.nodes.get_mut(id)
    }

    /// Whether the scene still holds `id`.
    pub fn contains(&self, id: InstanceId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live instances, the root container included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root container is left.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: InstanceId) -> Vec<InstanceId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// First attached instance (pre-order) whose identity equals `identity`.
    pub fn find_by_identity(&self, identity: &str) -> Option<InstanceId> {
        self.walk_depth_first(self.root)
            .into_iter()
            .find(|&id| self.nodes.get(id).is_some_and(|n| n.identity() == identity))
    }

    /// Total active subscriptions across every live instance.
    pub fn subscription_count(&self) -> usize {
        self.nodes.values().map(Instance::subscription_count).sum()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    /// Drain lifecycle events recorded since the last drain.
    pub fn drain_lifecycle(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    /// Forget events from earlier commits so only the next commit's remain.
    pub(crate) fn begin_commit(&mut self) {
        let dropped = self.lifecycle.discard_pending();
        if dropped > 0 {
            trace!(dropped, "discarded undrained lifecycle events");
        }
    }

    pub(crate) fn record_update(&mut self, id: InstanceId) {
        self.lifecycle.on_updated(id);
    }

    // -----------------------------------------------------------------------
    // Input events
    // -----------------------------------------------------------------------

    /// Fire `channel` on `id` with `value`. Returns whether a handler ran.
    pub fn emit(&self, id: InstanceId, channel: Channel, value: &str) -> Result<bool> {
        let instance = self.nodes.get(id).ok_or(HostError::StaleInstance(id))?;
        let handler = instance
            .as_input()
            .and_then(|input| input.subscriptions().get(channel).cloned());
        match handler {
            Some(handler) => {
                trace!(instance = %instance.identity(), %channel, value, "emit");
                handler.call(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Type one character into an input. Fires `input` when the value changed.
    pub fn type_char(&mut self, id: InstanceId, ch: char) -> Result<bool> {
        let editor = &mut self.input_mut(id)?.editor;
        if !editor.insert_char(ch) {
            return Ok(false);
        }
        let value = editor.value().to_owned();
        self.emit(id, Channel::Input, &value)?;
        Ok(true)
    }

    /// Delete the character before the cursor. Fires `input` when the value
    /// changed.
    pub fn backspace(&mut self, id: InstanceId) -> Result<bool> {
        let editor = &mut self.input_mut(id)?.editor;
        if !editor.delete_char() {
            return Ok(false);
        }
        let value = editor.value().to_owned();
        self.emit(id, Channel::Input, &value)?;
        Ok(true)
    }

    /// Delete the character after the cursor. Fires `input` when the value
    /// changed.
    pub fn delete_forward(&mut self, id: InstanceId) -> Result<bool> {
        let editor = &mut self.input_mut(id)?.editor;
        if !editor.delete_forward() {
            return Ok(false);
        }
        let value = editor.value().to_owned();
        self.emit(id, Channel::Input, &value)?;
        Ok(true)
    }

    /// Move an input's cursor. Fires nothing.
    pub fn move_cursor(&mut self, id: InstanceId, motion: CursorMotion) -> Result<bool> {
        Ok(self.input_mut(id)?.editor.move_cursor(motion))
    }

    /// Submit an input: fires `enter` with the value, then `change` if the
    /// value moved since the last commit.
    pub fn submit(&mut self, id: InstanceId) -> Result<()> {
        let input = self.input_mut(id)?;
        let value = input.editor.value().to_owned();
        let changed = input.editor.take_change();
        self.emit(id, Channel::Enter, &value)?;
        if let Some(changed) = changed {
            self.emit(id, Channel::Change, &changed)?;
        }
        Ok(())
    }

    /// Give an input focus, blurring whichever input held it before.
    pub fn focus(&mut self, id: InstanceId) -> Result<()> {
        self.input_mut(id)?;
        if let Some(previous) = self.focused().filter(|&f| f != id) {
            self.blur(previous)?;
        }
        self.input_mut(id)?.focused = true;
        Ok(())
    }

    /// Take focus away from an input. Fires `change` if the value moved since
    /// the last commit.
    pub fn blur(&mut self, id: InstanceId) -> Result<()> {
        let input = self.input_mut(id)?;
        input.focused = false;
        if let Some(changed) = input.editor.take_change() {
            self.emit(id, Channel::Change, &changed)?;
        }
        Ok(())
    }

    /// The focused input, if any.
    pub fn focused(&self) -> Option<InstanceId> {
        self.nodes
            .iter()
            .find(|(_, instance)| instance.as_input().is_some_and(|i| i.focused))
            .map(|(id, _)| id)
    }

    fn input_mut(&mut self, id: InstanceId) -> Result<&mut InputProps> {
        let instance = self.nodes.get_mut(id).ok_or(HostError::StaleInstance(id))?;
        let found = instance.tag();
        instance.as_input_mut().ok_or(HostError::KindMismatch {
            expected: crate::vnode::Tag::Input,
            found,
        })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
