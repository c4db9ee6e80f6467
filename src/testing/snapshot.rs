//! Snapshot rendering helpers.
//!
//! Converts a scene into a plain-text outline suitable for snapshot testing and
//! assertions. One line per instance, indented two spaces per depth level:
//!
//! ```text
//! box#main
//!   text#title "Counter: 0"
//!   input#name value="ab"
//!   group#footer (hidden)
//! ```


use crate::dom::node::{InstanceId, InstanceKind};
use crate::dom::tree::Scene;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Outline every instance attached under the root container.
///
/// The root container itself is not printed. An empty scene yields an empty
/// string. Lines are joined with `'\n'` and the last line has no trailing
/// newline.
pub fn scene_to_string(scene: &Scene) -> String {
    let mut lines = Vec::new();
    for &child in scene.children(scene.root()) {
        outline(scene, child, 0, &mut lines);
    }
    lines.join("\n")
}

/// Outline a single subtree starting at `id`.
pub fn subtree_to_string(scene: &Scene, id: InstanceId) -> String {
    let mut lines = Vec::new();
    outline(scene, id, 0, &mut lines);
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn outline(scene: &Scene, id: InstanceId, depth: usize, lines: &mut Vec<String>) {
    let Some(instance) = scene.get(id) else {
        return;
    };

    let mut line = format!("{:indent$}{}#{}", "", instance.tag(), instance.identity(), indent = depth * 2);
    match &instance.kind {
        InstanceKind::Text(props) => {
            line.push_str(&format!(" {:?}", props.content));
        }
        InstanceKind::Input(props) => {
            line.push_str(&format!(" value={:?}", props.editor.value()));
        }
        InstanceKind::Box(_) | InstanceKind::Group => {}
    }
    if !instance.common.visible {
        line.push_str(" (hidden)");
    }
    lines.push(line);

    for &child in scene.children(id) {
        outline(scene, child, depth + 1, lines);
    }
}
