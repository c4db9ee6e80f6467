//! Host hooks: the surface a reconciliation algorithm drives.
//!
//! [`Host`] owns the [`Scene`] and translates each hook call into a factory,
//! applier, binder or tree-mutator operation. It never starts work on its own;
//! every change happens inside a hook, in the order the hooks are called.

pub mod apply;
pub mod events;
pub mod factory;

use tracing::{trace, warn};

use crate::config::HostOptions;
use crate::dom::node::{Instance, InstanceId};
use crate::dom::tree::Scene;
use crate::error::{HostError, Result};
use crate::vnode::attrs::Attributes;
use crate::vnode::tag::Tag;

/// The adapter between a reconciler and the retained scene.
#[derive(Debug, Default)]
pub struct Host {
    scene: Scene,
    options: HostOptions,
    commits: u64,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: HostOptions) -> Self {
        Self {
            scene: Scene::new(),
            options,
            commits: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn options(&self) -> &HostOptions {
        &self.options
    }

    /// The root container every top-level instance is attached to.
    pub fn container(&self) -> InstanceId {
        self.scene.root()
    }

    /// Number of commits completed so far.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Build a detached instance for `tag` with its initial attributes.
    pub fn create_instance(&mut self, tag: &str, attrs: &Attributes) -> Result<InstanceId> {
        let instance = factory::create(tag, attrs, &self.options)?;
        Ok(self.scene.allocate(instance))
    }

    /// Raw text nodes are not supported; text goes through a `text` element's
    /// `content` attribute. Always returns `None`.
    pub fn create_text_instance(&mut self, text: &str) -> Option<InstanceId> {
        warn!(
            text,
            "raw text nodes are not supported; use a `text` element with `content`"
        );
        None
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Attach a child while its parent is still being built.
    pub fn append_initial_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        self.scene.append(parent, child)
    }

    pub fn append_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        self.scene.append(parent, child)
    }

    pub fn append_child_to_container(&mut self, child: InstanceId) -> Result<()> {
        self.scene.append(self.scene.root(), child)
    }

    pub fn insert_before(
        &mut self,
        parent: InstanceId,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        self.scene.insert_before(parent, child, before)
    }

    pub fn insert_in_container_before(
        &mut self,
        child: InstanceId,
        before: InstanceId,
    ) -> Result<()> {
        self.scene.insert_before(self.scene.root(), child, before)
    }

    /// Detach `child` and tear its subtree down.
    pub fn remove_child(&mut self, parent: InstanceId, child: InstanceId) -> Result<()> {
        self.scene.remove(parent, child).map(drop)
    }

    pub fn remove_child_from_container(&mut self, child: InstanceId) -> Result<()> {
        self.scene.remove(self.scene.root(), child).map(drop)
    }

    /// Tear down every top-level instance.
    pub fn clear_container(&mut self) {
        let destroyed = self.scene.clear_all();
        trace!(destroyed, "cleared container");
    }

    // -----------------------------------------------------------------------
    // Updates
    // -----------------------------------------------------------------------

    /// Apply `next` to an existing instance and move its subscriptions from
    /// `prev` to `next`.
    ///
    /// `tag` must name the instance's kind. Identity never changes after
    /// creation, so an `id` in `next` is ignored.
    pub fn commit_update(
        &mut self,
        id: InstanceId,
        tag: &str,
        prev: &Attributes,
        next: &Attributes,
    ) -> Result<()> {
        let instance = self
            .scene
            .get_mut(id)
            .ok_or(HostError::StaleInstance(id))?;
        let expected: Tag = tag.parse()?;
        let found = instance.tag();
        if expected != found {
            return Err(HostError::KindMismatch { expected, found });
        }
        if prev == next {
            trace!(instance = instance.identity(), "no effective change");
            return Ok(());
        }

        apply::apply(instance, next);
        events::rebind(instance, prev, next);
        trace!(instance = instance.identity(), %expected, "updated");
        self.scene.record_update(id);
        Ok(())
    }

    pub fn hide_instance(&mut self, id: InstanceId) -> Result<()> {
        self.set_visible(id, false)
    }

    pub fn unhide_instance(&mut self, id: InstanceId) -> Result<()> {
        self.set_visible(id, true)
    }

    fn set_visible(&mut self, id: InstanceId, visible: bool) -> Result<()> {
        let instance = self
            .scene
            .get_mut(id)
            .ok_or(HostError::StaleInstance(id))?;
        instance.common.visible = visible;
        trace!(instance = instance.identity(), visible, "visibility");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Commit bracketing
    // -----------------------------------------------------------------------

    pub fn prepare_for_commit(&mut self) {
        trace!(commit = self.commits + 1, "prepare for commit");
    }

    pub fn reset_after_commit(&mut self) {
        self.commits += 1;
        trace!(commit = self.commits, "commit finished");
    }

    /// The handle application code sees for an instance: the instance itself.
    pub fn get_public_instance(&self, id: InstanceId) -> Option<&Instance> {
        self.scene.get(id)
    }

    /// Drop everything, including instances created but never attached.
    pub(crate) fn reset(&mut self) -> usize {
        self.scene.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Channel, Handler};
    use crate::vnode::attrs::Dimension;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, Handler) {
        let calls = Rc::new(Cell::new(0));
        let sink = calls.clone();
        (calls, Handler::new(move |_| sink.set(sink.get() + 1)))
    }

    // ── creation ────────────────────────────────────────────────────

    #[test]
    fn create_allocates_detached_instance() {
        let mut host = Host::new();
        let id = host.create_instance("group", &Attributes::new()).unwrap();
        assert_eq!(host.scene().parent(id), None);
        assert_eq!(host.scene().len(), 2);
    }

    #[test]
    fn unknown_tag_allocates_nothing() {
        let mut host = Host::new();
        assert!(host.create_instance("div", &Attributes::new()).is_err());
        assert_eq!(host.scene().len(), 1);
    }

    #[test]
    fn text_instances_are_rejected() {
        let mut host = Host::new();
        assert_eq!(host.create_text_instance("hello"), None);
        assert_eq!(host.scene().len(), 1);
    }

    // ── structure ───────────────────────────────────────────────────

    #[test]
    fn container_hooks() {
        let mut host = Host::new();
        let a = host.create_instance("group", &Attributes::new().id("a")).unwrap();
        let b = host.create_instance("group", &Attributes::new().id("b")).unwrap();
        host.append_child_to_container(b).unwrap();
        host.insert_in_container_before(a, b).unwrap();
        assert_eq!(host.scene().children(host.container()), &[a, b]);

        host.remove_child_from_container(a).unwrap();
        assert_eq!(host.scene().children(host.container()), &[b]);
        assert_eq!(
            host.remove_child_from_container(a),
            Err(HostError::StaleInstance(a))
        );

        host.clear_container();
        assert!(host.scene().is_empty());
    }

    // ── updates ─────────────────────────────────────────────────────

    #[test]
    fn omitted_dimension_survives_update() {
        let mut host = Host::new();
        let prev = Attributes::new().width(20u16).height(4u16);
        let id = host.create_instance("box", &prev).unwrap();
        let next = Attributes::new().height(6u16);
        host.commit_update(id, "box", &prev, &next).unwrap();
        let common = &host.scene().get(id).unwrap().common;
        assert_eq!(common.width, Dimension::Cells(20));
        assert_eq!(common.height, Dimension::Cells(6));
    }

    #[test]
    fn update_with_wrong_tag_fails() {
        let mut host = Host::new();
        let id = host.create_instance("text", &Attributes::new()).unwrap();
        assert_eq!(
            host.commit_update(id, "box", &Attributes::new(), &Attributes::new().x(1)),
            Err(HostError::KindMismatch {
                expected: Tag::Box,
                found: Tag::Text,
            })
        );
    }

    #[test]
    fn handler_swap_keeps_other_channel() {
        let mut host = Host::new();
        let (keystrokes, on_input) = counter();
        let (commits_a, enter_a) = counter();
        let (commits_b, enter_b) = counter();

        let prev = Attributes::new().on_input(on_input.clone()).on_enter(enter_a);
        let id = host.create_instance("input", &prev).unwrap();
        let next = Attributes::new().on_input(on_input).on_enter(enter_b);
        host.commit_update(id, "input", &prev, &next).unwrap();

        let scene = host.scene_mut();
        scene.type_char(id, 'a').unwrap();
        scene.type_char(id, 'b').unwrap();
        scene.emit(id, Channel::Enter, "ab").unwrap();

        assert_eq!(keystrokes.get(), 2);
        assert_eq!(commits_a.get(), 0);
        assert_eq!(commits_b.get(), 1);
        assert_eq!(host.scene().get(id).unwrap().subscription_count(), 2);
    }

    #[test]
    fn equal_bags_record_no_update() {
        let mut host = Host::new();
        let attrs = Attributes::new().x(1);
        let id = host.create_instance("group", &attrs).unwrap();
        host.scene_mut().drain_lifecycle();
        host.commit_update(id, "group", &attrs, &attrs.clone()).unwrap();
        assert!(!host.scene().lifecycle().has_pending());
    }

    #[test]
    fn hide_and_unhide() {
        let mut host = Host::new();
        let id = host.create_instance("box", &Attributes::new()).unwrap();
        host.hide_instance(id).unwrap();
        assert!(!host.scene().get(id).unwrap().common.visible);
        host.unhide_instance(id).unwrap();
        assert!(host.scene().get(id).unwrap().common.visible);
    }

    #[test]
    fn commit_bracketing_counts() {
        let mut host = Host::new();
        host.prepare_for_commit();
        host.reset_after_commit();
        assert_eq!(host.commit_count(), 1);
        let id = host.create_instance("group", &Attributes::new()).unwrap();
        assert_eq!(host.get_public_instance(id).unwrap().identity(), "group");
    }
}
