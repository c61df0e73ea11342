//! Rich Renderer
//!
//! Folds a markup tree into a caller-chosen content type. Text is lifted
//! with [`Content::from_text`]; an element renders its children, joins them
//! with [`Content::concat`], and passes the result through the transform
//! registered under its name. Elements without a transform are transparent.

use crate::format::TagMap;
use crate::markup::Node;
use std::slice;

/// Output of the rich renderer.
pub trait Content: Sized {
    /// Lift a literal string.
    fn from_text(text: &str) -> Self;

    /// Join rendered siblings, in order, into one value.
    fn concat(parts: Vec<Self>) -> Self;
}

impl Content for String {
    fn from_text(text: &str) -> Self {
        text.to_string()
    }

    fn concat(parts: Vec<Self>) -> Self {
        parts.concat()
    }
}

/// An element whose children are still being rendered.
struct Frame<'n, C> {
    /// `None` for the implicit root.
    name: Option<&'n str>,
    children: slice::Iter<'n, Node>,
    parts: Vec<C>,
}

impl<'n, C> Frame<'n, C> {
    fn new(name: Option<&'n str>, children: &'n [Node]) -> Self {
        Frame {
            name,
            children: children.iter(),
            parts: Vec::new(),
        }
    }
}

/// Render `nodes` depth-first, left to right.
///
/// Runs on an explicit stack of open frames, so nesting depth is bounded
/// only by memory.
pub fn render<C: Content>(nodes: &[Node], tags: &TagMap<'_, '_, C>) -> C {
    let mut stack: Vec<Frame<'_, C>> = Vec::new();
    let mut current = Frame::new(None, nodes);

    loop {
        match current.children.next() {
            Some(Node::Text(text)) => current.parts.push(C::from_text(&text.value)),
            Some(Node::Element(element)) => {
                let child = Frame::new(Some(element.name.as_str()), &element.children);
                stack.push(std::mem::replace(&mut current, child));
            }
            None => {
                let Some(parent) = stack.pop() else {
                    return C::concat(current.parts);
                };
                let finished = std::mem::replace(&mut current, parent);
                let inner = C::concat(finished.parts);
                let content = match finished.name.and_then(|name| tags.get(name)) {
                    Some(transform) => transform(inner),
                    None => inner,
                };
                current.parts.push(content);
            }
        }
    }
}
