//! RSX view! macro: parse JSX-like syntax and generate virtual-node builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, token, Error, Expr, Ident, Lit, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// Value of an attribute: a literal, or a braced Rust expression.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(Lit),
    Expr(Box<Expr>),
}

/// A parsed RSX attribute: `name="value"` or `name={expr}`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Ident,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.value {
            AttrValue::Lit(lit) => quote!(#lit).to_string(),
            AttrValue::Expr(expr) => quote!({ #expr }).to_string(),
        };
        f.debug_struct("Attribute")
            .field("name", &self.name.to_string())
            .field("value", &value)
            .finish()
    }
}

/// A child: a nested element or a braced expression yielding children.
#[derive(Clone)]
pub(crate) enum Child {
    Element(Element),
    Expr(Box<Expr>),
}

/// A parsed RSX element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Child>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children.len())
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level view! input: a sequence of elements.
#[derive(Debug)]
struct ViewInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Element type names.
const TAGS: &[&str] = &["box", "group", "text", "input"];

/// How a literal attribute value is turned into a builder argument.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    /// Passed through as-is (strings, numbers, bools).
    Plain,
    /// `"absolute"` / `"relative"`.
    Placement,
    /// `"none"`, `"single"`, `"double"`, `"rounded"`, `"heavy"`.
    BorderStyle,
    /// `"#rgb"` or `"#rrggbb"`.
    Color,
    /// Only `{expr}` is accepted.
    Handler,
}

/// Attribute names and the builder method each maps to.
const ATTRIBUTES: &[(&str, ValueKind)] = &[
    ("id", ValueKind::Plain),
    ("position", ValueKind::Placement),
    ("x", ValueKind::Plain),
    ("y", ValueKind::Plain),
    ("width", ValueKind::Plain),
    ("height", ValueKind::Plain),
    ("visible", ValueKind::Plain),
    ("border_style", ValueKind::BorderStyle),
    ("background_color", ValueKind::Color),
    ("border_color", ValueKind::Color),
    ("content", ValueKind::Plain),
    ("fg", ValueKind::Color),
    ("bg", ValueKind::Color),
    ("selectable", ValueKind::Plain),
    ("placeholder", ValueKind::Plain),
    ("value", ValueKind::Plain),
    ("max_length", ValueKind::Plain),
    ("text_color", ValueKind::Color),
    ("focused_background_color", ValueKind::Color),
    ("focused_text_color", ValueKind::Color),
    ("on_input", ValueKind::Handler),
    ("on_enter", ValueKind::Handler),
    ("on_change", ValueKind::Handler),
];

fn value_kind(name: &Ident) -> Result<ValueKind> {
    let key = name.unraw().to_string();
    ATTRIBUTES
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| Error::new(name.span(), format!("unknown attribute `{key}`")))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for ViewInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(ViewInput { elements })
    }
}

/// Parse a single RSX element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;

    // `box` is a reserved word, so accept keywords as tag names.
    let tag = Ident::parse_any(input)?;
    if !TAGS.contains(&tag.to_string().as_str()) {
        return Err(Error::new(
            tag.span(),
            format!("unknown element `{tag}`; expected one of {}", TAGS.join(", ")),
        ));
    }

    // Attributes until `/>` or `>`.
    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name = Ident::parse_any(input)?;
        value_kind(&name)?;
        input.parse::<Token![=]>()?;
        let value = if input.peek(token::Brace) {
            let content;
            braced!(content in input);
            AttrValue::Expr(Box::new(content.parse()?))
        } else {
            AttrValue::Lit(input.parse()?)
        };
        attrs.push(Attribute { name, value });
    }

    // Children until `</tag>`.
    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing = Ident::parse_any(input)?;
            if closing != tag {
                return Err(Error::new(
                    closing.span(),
                    format!("mismatched closing tag: expected `</{tag}>`, found `</{closing}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(Child::Element(parse_element(input)?));
        } else if input.peek(token::Brace) {
            let content;
            braced!(content in input);
            children.push(Child::Expr(Box::new(content.parse()?)));
        } else if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            return Err(Error::new(
                lit.span(),
                "text nodes are not supported; use `<text content=\"...\" />`",
            ));
        } else {
            return Err(input.error(
                "expected `<` to start a child element, `{` for an expression, or `</` to close the parent",
            ));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Turn an attribute value into a builder argument, validating literals.
fn generate_value(attr: &Attribute) -> Result<TokenStream> {
    let kind = value_kind(&attr.name)?;
    let lit = match &attr.value {
        AttrValue::Expr(expr) => return Ok(quote! { #expr }),
        AttrValue::Lit(lit) => lit,
    };

    match kind {
        ValueKind::Plain => Ok(quote! { #lit }),
        ValueKind::Handler => Err(Error::new(
            lit.span(),
            "handlers take an expression: `on_input={|value| ...}`",
        )),
        ValueKind::Placement => {
            let s = string_lit(lit)?;
            match s.value().as_str() {
                "absolute" => Ok(quote! { ::gilt_tui_host::vnode::Placement::Absolute }),
                "relative" => Ok(quote! { ::gilt_tui_host::vnode::Placement::Relative }),
                other => Err(Error::new(
                    s.span(),
                    format!("invalid position `{other}`; expected `absolute` or `relative`"),
                )),
            }
        }
        ValueKind::BorderStyle => {
            let s = string_lit(lit)?;
            let variant = match s.value().as_str() {
                "none" => quote! { None },
                "single" => quote! { Single },
                "double" => quote! { Double },
                "rounded" => quote! { Rounded },
                "heavy" => quote! { Heavy },
                other => {
                    return Err(Error::new(
                        s.span(),
                        format!("invalid border style `{other}`"),
                    ))
                }
            };
            Ok(quote! { ::gilt_tui_host::vnode::BorderStyle::#variant })
        }
        ValueKind::Color => {
            let s = string_lit(lit)?;
            let (r, g, b) = parse_hex(&s.value())
                .ok_or_else(|| Error::new(s.span(), "expected a `#rgb` or `#rrggbb` color"))?;
            Ok(quote! { ::gilt_tui_host::color::Color::rgb(#r, #g, #b) })
        }
    }
}

fn string_lit(lit: &Lit) -> Result<LitStr> {
    match lit {
        Lit::Str(s) => Ok(s.clone()),
        other => Err(Error::new(other.span(), "expected a string literal")),
    }
}

/// Parse `#rgb` / `#rrggbb` into components.
fn parse_hex(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

/// Generate code for a single element.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let tag = elem.tag.to_string();

    let mut setters = Vec::with_capacity(elem.attrs.len());
    for attr in &elem.attrs {
        let method = Ident::new(&attr.name.unraw().to_string(), attr.name.span());
        let value = generate_value(attr)?;
        setters.push(quote! { .#method(#value) });
    }

    let mut children = Vec::with_capacity(elem.children.len());
    for child in &elem.children {
        let code = match child {
            Child::Element(e) => generate_element(e)?,
            Child::Expr(expr) => quote! { #expr },
        };
        children.push(quote! { .child(#code) });
    }

    let attributes = if setters.is_empty() {
        quote! {}
    } else {
        quote! {
            .with_attributes(::gilt_tui_host::vnode::Attributes::new() #(#setters)*)
        }
    };

    Ok(quote! {
        ::gilt_tui_host::vnode::VirtualNode::new(#tag) #attributes #(#children)*
    })
}

/// Entry point: generate code for the entire view! macro.
///
/// One root element yields a `VirtualNode`; several yield a
/// `Vec<VirtualNode>`.
pub(crate) fn view_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: ViewInput = syn::parse2(input)?;

    match parsed.elements.as_slice() {
        [] => Err(Error::new(
            Span::call_site(),
            "view! macro requires at least one element",
        )),
        [single] => generate_element(single),
        many => {
            let nodes = many
                .iter()
                .map(generate_element)
                .collect::<Result<Vec<_>>>()?;
            Ok(quote! {
                ::std::vec![#(#nodes),*]
            })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    // Helper: parse a token stream into a ViewInput.
    fn parse_view(tokens: TokenStream) -> Result<ViewInput> {
        syn::parse2(tokens)
    }

    // Helper: parse a single element.
    fn parse_single_element(tokens: TokenStream) -> Result<Element> {
        syn::parse2::<ViewInput>(tokens).map(|v| v.elements.into_iter().next().unwrap())
    }

    fn codegen(tokens: TokenStream) -> String {
        let elem = parse_single_element(tokens).unwrap();
        generate_element(&elem).unwrap().to_string()
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_element() {
        let elem = parse_single_element(quote! { <text content="hello" /> }).unwrap();
        assert_eq!(elem.tag.to_string(), "text");
        assert!(elem.self_closing);
        assert!(elem.children.is_empty());
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.attrs[0].name.to_string(), "content");
    }

    #[test]
    fn parse_box_keyword_tag() {
        let elem = parse_single_element(quote! { <box id="main"></box> }).unwrap();
        assert_eq!(elem.tag.to_string(), "box");
        assert!(!elem.self_closing);
    }

    #[test]
    fn parse_element_with_children() {
        let elem = parse_single_element(quote! {
            <group>
                <text content="a" />
                <input placeholder="b" />
                { extra }
            </group>
        })
        .unwrap();
        assert_eq!(elem.children.len(), 3);
        let tags: Vec<String> = elem
            .children
            .iter()
            .filter_map(|c| match c {
                Child::Element(e) => Some(e.tag.to_string()),
                Child::Expr(_) => None,
            })
            .collect();
        assert_eq!(tags, vec!["text", "input"]);
        assert!(matches!(elem.children[2], Child::Expr(_)));
    }

    #[test]
    fn parse_expression_attribute() {
        let elem = parse_single_element(quote! {
            <input value={state.name.clone()} on_input={handler} />
        })
        .unwrap();
        assert!(matches!(elem.attrs[0].value, AttrValue::Expr(_)));
        assert!(matches!(elem.attrs[1].value, AttrValue::Expr(_)));
    }

    #[test]
    fn parse_multiple_root_elements() {
        let view = parse_view(quote! {
            <group />
            <box />
        })
        .unwrap();
        assert_eq!(view.elements.len(), 2);
    }

    #[test]
    fn parse_error_unknown_tag() {
        let err = parse_single_element(quote! { <div /> }).unwrap_err().to_string();
        assert!(err.contains("unknown element `div`"), "{err}");
    }

    #[test]
    fn parse_error_unknown_attribute() {
        let err = parse_single_element(quote! { <box class="x" /> })
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown attribute `class`"), "{err}");
    }

    #[test]
    fn parse_error_text_child() {
        let err = parse_single_element(quote! { <box>"hello"</box> })
            .unwrap_err()
            .to_string();
        assert!(err.contains("text nodes are not supported"), "{err}");
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let err = parse_single_element(quote! {
            <box>
                <text content="x" />
            </group>
        })
        .unwrap_err()
        .to_string();
        assert!(err.contains("mismatched closing tag"));
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_plain_element() {
        let code = codegen(quote! { <group /> });
        assert!(code.contains("VirtualNode :: new (\"group\")"), "{code}");
        assert!(!code.contains("with_attributes"), "{code}");
    }

    #[test]
    fn codegen_literal_attributes() {
        let code = codegen(quote! { <box id="main" width=40 visible=false /> });
        assert!(code.contains(". id (\"main\")"), "{code}");
        assert!(code.contains(". width (40)"), "{code}");
        assert!(code.contains(". visible (false)"), "{code}");
    }

    #[test]
    fn codegen_enum_and_color_literals() {
        let code = codegen(quote! {
            <box position="relative" border_style="rounded" background_color="#141428" />
        });
        assert!(code.contains("Placement :: Relative"), "{code}");
        assert!(code.contains("BorderStyle :: Rounded"), "{code}");
        assert!(code.contains("Color :: rgb (20u8 , 20u8 , 40u8)"), "{code}");
    }

    #[test]
    fn codegen_short_hex() {
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#1a1a2e"), Some((0x1a, 0x1a, 0x2e)));
        assert_eq!(parse_hex("white"), None);
        assert_eq!(parse_hex("#12"), None);
    }

    #[test]
    fn codegen_invalid_literals_are_errors() {
        for tokens in [
            quote! { <box position="floating" /> },
            quote! { <box border_color="red" /> },
            quote! { <input on_input="nope" /> },
        ] {
            let elem = parse_single_element(tokens).unwrap();
            assert!(generate_element(&elem).is_err());
        }
    }

    #[test]
    fn codegen_children() {
        let code = codegen(quote! {
            <box>
                <text content="Hello" />
                { rows }
            </box>
        });
        assert!(code.contains("new (\"text\")"), "{code}");
        assert!(code.contains(". content (\"Hello\")"), "{code}");
        assert!(code.contains(". child (rows)"), "{code}");
    }

    #[test]
    fn codegen_full_view() {
        let single = view_impl(quote! { <group /> }).unwrap().to_string();
        assert!(!single.contains("vec !"), "{single}");

        let many = view_impl(quote! {
            <group />
            <box />
        })
        .unwrap()
        .to_string();
        assert!(many.contains(":: std :: vec !"), "{many}");
    }

    #[test]
    fn codegen_empty_view_is_error() {
        let result = view_impl(quote! {});
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least one element"));
    }
}
