//! Integration tests for gilt-tui-host.
//!
//! These tests exercise the public API from outside the crate, driving a
//! `Root` through the keyed reference reconciler and a headless surface the
//! way an embedding application would.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gilt_tui_host::dom::{Instance, InstanceId, LifecycleEvent};
use gilt_tui_host::event::{Channel, Handler};
use gilt_tui_host::testing::{scene_to_string, HeadlessSurface, KeyedReconciler};
use gilt_tui_host::vnode::{Dimension, Placement};
use gilt_tui_host::{Attributes, Host, HostError, Root, RootState, VirtualNode};
use pretty_assertions::assert_eq;

type TestRoot = Root<KeyedReconciler, HeadlessSurface>;

fn mounted(tree: &[VirtualNode]) -> TestRoot {
    let mut root = TestRoot::new(KeyedReconciler::new());
    root.mount(tree, HeadlessSurface::new()).unwrap();
    root
}

fn find(root: &TestRoot, identity: &str) -> InstanceId {
    root.scene()
        .find_by_identity(identity)
        .unwrap_or_else(|| panic!("no instance `{identity}`"))
}

fn instance<'a>(root: &'a TestRoot, identity: &str) -> &'a Instance {
    root.scene().get(find(root, identity)).unwrap()
}

fn counting() -> (Rc<Cell<usize>>, Handler) {
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    (calls, Handler::new(move |_| sink.set(sink.get() + 1)))
}

// ---------------------------------------------------------------------------
// Root lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_mount_unmount_remount() {
    let tree = vec![VirtualNode::boxed().child(VirtualNode::text("hello"))];
    let mut root = mounted(&tree);

    let scene = root.scene();
    let top = scene.children(scene.root());
    assert_eq!(top.len(), 1);
    let boxed = scene.get(top[0]).unwrap();
    assert_eq!(boxed.tag().name(), "box");
    let kids = scene.children(top[0]);
    assert_eq!(kids.len(), 1);
    assert_eq!(scene.get(kids[0]).unwrap().as_text().unwrap().content, "hello");

    root.unmount().unwrap();
    assert_eq!(root.scene().children(root.scene().root()).len(), 0);
    assert_eq!(root.state(), RootState::Unmounted);

    root.mount(&tree, HeadlessSurface::new()).unwrap();
    assert!(root.is_mounted());
}

#[test]
fn test_mount_while_mounted_is_fatal() {
    let mut root = mounted(&[VirtualNode::group()]);
    assert_eq!(
        root.mount(&[VirtualNode::group()], HeadlessSurface::new()),
        Err(HostError::AlreadyMounted)
    );
    assert!(root.is_mounted());
}

#[test]
fn test_unmount_twice_is_noop() {
    let mut root = mounted(&[VirtualNode::group()]);
    assert!(root.unmount().unwrap().is_some());
    assert_eq!(root.unmount(), Ok(None));
}

#[test]
fn test_surface_sees_every_commit() {
    let mut root = mounted(&[VirtualNode::text("0")]);
    root.update(&[VirtualNode::text("1")]).unwrap();
    let surface = root.surface().unwrap();
    assert_eq!(surface.frames(), 2);
    assert_eq!(surface.last_frame(), Some("text#text \"1\""));

    let surface = root.unmount().unwrap().unwrap();
    assert!(surface.is_destroyed());
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[test]
fn test_omitted_width_is_preserved() {
    let node = |attrs: Attributes| VirtualNode::boxed().with_attributes(attrs);
    let mut root = mounted(&[node(Attributes::new().id("panel").width(20u16))]);
    root.update(&[node(Attributes::new().id("panel").height(5u16))])
        .unwrap();

    let panel = instance(&root, "panel");
    assert_eq!(panel.common.width, Dimension::Cells(20));
    assert_eq!(panel.common.height, Dimension::Cells(5));
}

#[test]
fn test_construction_defaults() {
    let root = mounted(&[
        VirtualNode::boxed().attrs(|a| a.id("b")),
        VirtualNode::text("t").attrs(|a| a.id("t")),
        VirtualNode::input().attrs(|a| a.id("i")),
    ]);
    assert_eq!(instance(&root, "b").common.position, Placement::Absolute);
    assert_eq!(instance(&root, "b").common.width, Dimension::Cells(20));
    assert_eq!(instance(&root, "t").common.position, Placement::Relative);
    assert_eq!(instance(&root, "t").common.width, Dimension::Auto);
    assert_eq!(instance(&root, "i").common.height, Dimension::Cells(3));
}

#[test]
fn test_unknown_tag_fails_mount() {
    let mut root = TestRoot::new(KeyedReconciler::new());
    let result = root.mount(
        &[VirtualNode::group().child(VirtualNode::new("button"))],
        HeadlessSurface::new(),
    );
    assert_eq!(result, Err(HostError::UnrecognizedTag("button".into())));
    assert_eq!(root.state(), RootState::Unmounted);
    assert!(root.scene().is_empty());
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[test]
fn test_keystroke_handler_fires_per_keystroke() {
    let (calls, on_input) = counting();
    let tree = [VirtualNode::input().attrs(|a| a.id("field").on_input(on_input.clone()))];
    let mut root = mounted(&tree);

    let field = find(&root, "field");
    root.scene_mut().type_char(field, 'a').unwrap();
    root.scene_mut().type_char(field, 'b').unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_swapping_commit_handler_keeps_keystroke_handler() {
    let (keystrokes, on_input) = counting();
    let (first_commits, first_enter) = counting();
    let (second_commits, second_enter) = counting();
    let node = |enter: &Handler| {
        VirtualNode::input().attrs(|a| a.id("field").on_input(on_input.clone()).on_enter(enter.clone()))
    };

    let mut root = mounted(&[node(&first_enter)]);
    root.update(&[node(&second_enter)]).unwrap();

    let field = find(&root, "field");
    let scene = root.scene_mut();
    scene.type_char(field, 'x').unwrap();
    scene.submit(field).unwrap();

    assert_eq!(keystrokes.get(), 1);
    assert_eq!(first_commits.get(), 0);
    assert_eq!(second_commits.get(), 1);
    assert_eq!(root.scene().subscription_count(), 2);
}

#[test]
fn test_rerender_with_same_handlers_does_not_duplicate() {
    let (calls, on_input) = counting();
    let node = |content: &str| {
        VirtualNode::group().with_children([
            VirtualNode::text(content),
            VirtualNode::input().attrs(|a| a.id("field").on_input(on_input.clone())),
        ])
    };
    let mut root = mounted(&[node("a")]);
    root.update(&[node("b")]).unwrap();
    root.update(&[node("c")]).unwrap();

    let field = find(&root, "field");
    root.scene_mut().type_char(field, 'z').unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(root.scene().subscription_count(), 1);
}

#[test]
fn test_change_fires_on_blur() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let on_change = Handler::new(move |v: &str| sink.borrow_mut().push(v.to_owned()));
    let mut root = mounted(&[VirtualNode::input().attrs(|a| a.value("ab").on_change(on_change))]);

    let field = find(&root, "input");
    let scene = root.scene_mut();
    scene.focus(field).unwrap();
    scene.blur(field).unwrap();
    scene.focus(field).unwrap();
    scene.backspace(field).unwrap();
    scene.blur(field).unwrap();
    assert_eq!(*seen.borrow(), vec!["a"]);
    assert_eq!(scene.emit(field, Channel::Change, "manual"), Ok(true));
}

// ---------------------------------------------------------------------------
// Tree mutation through the hooks
// ---------------------------------------------------------------------------

#[test]
fn test_removed_input_has_no_subscriptions() {
    let mut host = Host::new();
    let attrs = Attributes::new()
        .on_input(|_: &str| {})
        .on_enter(|_: &str| {})
        .on_change(|_: &str| {});
    let parent = host.create_instance("group", &Attributes::new()).unwrap();
    let field = host.create_instance("input", &attrs).unwrap();
    host.append_initial_child(parent, field).unwrap();
    host.append_child_to_container(parent).unwrap();
    assert_eq!(host.scene().subscription_count(), 3);

    host.remove_child_from_container(parent).unwrap();
    assert_eq!(host.scene().subscription_count(), 0);
    assert!(!host.scene().contains(field));
}

#[test]
fn test_operations_on_removed_child_are_errors() {
    let mut host = Host::new();
    let parent = host.create_instance("group", &Attributes::new()).unwrap();
    let child = host.create_instance("text", &Attributes::new()).unwrap();
    host.append_child(parent, child).unwrap();

    host.remove_child(parent, child).unwrap();
    let stale = HostError::StaleInstance(child);
    assert_eq!(host.remove_child(parent, child), Err(stale.clone()));
    assert_eq!(
        host.commit_update(child, "text", &Attributes::new(), &Attributes::new().content("x")),
        Err(stale.clone())
    );
    assert_eq!(host.append_child(parent, child), Err(stale.clone()));
    assert_eq!(host.insert_before(parent, child, parent), Err(stale.clone()));
    assert_eq!(host.hide_instance(child), Err(stale.clone()));
    assert_eq!(host.unhide_instance(child), Err(stale.clone()));
    assert_eq!(host.scene().emit(child, Channel::Change, "x"), Err(stale));
    assert!(host.get_public_instance(child).is_none());
    assert_eq!(host.scene().children(parent), &[] as &[InstanceId]);
}

#[test]
fn test_teardown_runs_once_per_instance() {
    let tree = [VirtualNode::boxed().with_children([
        VirtualNode::group().child(VirtualNode::text("a")),
        VirtualNode::input(),
    ])];
    let mut root = mounted(&tree);
    root.scene_mut().drain_lifecycle();
    root.unmount().unwrap();

    let destroyed: Vec<_> = root
        .scene_mut()
        .drain_lifecycle()
        .into_iter()
        .filter(|e| matches!(e, LifecycleEvent::Destroyed { .. }))
        .collect();
    assert_eq!(destroyed.len(), 4);
}

#[test]
fn test_lifecycle_events_do_not_accumulate_across_commits() {
    let mut root = mounted(&[VirtualNode::text("0")]);
    for i in 1..=1_000 {
        root.update(&[VirtualNode::text(i.to_string())]).unwrap();
        assert!(root.scene().lifecycle().pending_len() <= 1);
    }

    let text = find(&root, "text");
    assert_eq!(
        root.scene_mut().drain_lifecycle(),
        vec![LifecycleEvent::Updated { id: text }]
    );
    assert_eq!(root.scene().lifecycle().live_count(), 1);
}

#[test]
fn test_insert_before_missing_anchor_appends() {
    let mut host = Host::new();
    let parent = host.create_instance("group", &Attributes::new()).unwrap();
    let a = host.create_instance("text", &Attributes::new().id("a")).unwrap();
    let stray = host.create_instance("text", &Attributes::new().id("stray")).unwrap();
    let b = host.create_instance("text", &Attributes::new().id("b")).unwrap();
    host.append_child(parent, a).unwrap();
    host.insert_before(parent, b, stray).unwrap();
    assert_eq!(host.scene().children(parent), &[a, b]);
}

#[test]
fn test_reorder_preserves_identity() {
    let row = |id: &str| VirtualNode::text(id).attrs(|a| a.id(id));
    let mut root = mounted(&[VirtualNode::group().with_children(["a", "b", "c"].map(row))]);
    let before: Vec<_> = ["a", "b", "c"].iter().map(|id| find(&root, id)).collect();

    root.update(&[VirtualNode::group().with_children(["c", "a", "b"].map(row))])
        .unwrap();
    let group = root.scene().children(root.scene().root())[0];
    assert_eq!(
        root.scene().children(group),
        &[before[2], before[0], before[1]]
    );
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn test_counter_tree_snapshot() {
    let tree = [VirtualNode::boxed()
        .attrs(|a| a.id("main-box"))
        .with_children([
            VirtualNode::group().attrs(|a| a.id("group1")).with_children([
                VirtualNode::text("Hello").attrs(|a| a.id("t1")),
                VirtualNode::group()
                    .attrs(|a| a.id("counter-group"))
                    .child(VirtualNode::text("0").attrs(|a| a.id("counter"))),
            ]),
            VirtualNode::group()
                .attrs(|a| a.id("instructions-group").visible(false))
                .child(VirtualNode::text("R : Reset").attrs(|a| a.id("instr3"))),
            VirtualNode::input().attrs(|a| a.id("name").value("ada")),
        ])];
    let root = mounted(&tree);

    insta::assert_snapshot!(scene_to_string(root.scene()), @r#"
    box#main-box
      group#group1
        text#t1 "Hello"
        group#counter-group
          text#counter "0"
      group#instructions-group (hidden)
        text#instr3 "R : Reset"
      input#name value="ada"
    "#);
}
