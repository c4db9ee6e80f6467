//! Proc macros for gilt-tui-host: `view!` RSX composition of virtual trees.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `gilt-tui-host`.

use proc_macro::TokenStream;

mod view_macro;

/// RSX-style virtual tree composition macro.
///
/// Transforms JSX-like syntax into `VirtualNode` builder calls.
///
/// # Syntax
///
/// - `<tag />`: self-closing element (no children)
/// - `<tag attr="val"> ... </tag>`: element with children
/// - `{expr}` as a child: anything implementing `IntoChildren`
///   (a node, a `Vec` of nodes, an `Option`)
///
/// Tags are `box`, `group`, `text` and `input`; anything else is a compile
/// error, as are raw string children (use `<text content="..." />`).
///
/// # Attributes
///
/// - `name="value"`, `name=40`, `name=true`: literal values
/// - `name={expr}`: any Rust expression; required for handlers
/// - `position`, `border_style` and color literals are validated at compile time
///
/// One root element yields a `VirtualNode`; several yield a `Vec<VirtualNode>`.
///
/// # Example
///
/// ```ignore
/// view! {
///     <box id="main" width=40 border_style="rounded">
///         <text content={format!("Count: {count}")} />
///         <input placeholder="Name" on_enter={submit.clone()} />
///     </box>
/// }
/// ```
#[proc_macro]
pub fn view(input: TokenStream) -> TokenStream {
    view_macro::view_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
