//! Markup AST
//!
//! Text and element nodes produced by the markup parser. Nodes carry no
//! attributes and no positions. Serialised with a `type` tag of `text` or
//! `el`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "el")]
    Element(Element),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text::new(value))
    }

    pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(name, children))
    }
}

/// Text node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Text {
            value: value.into(),
        }
    }
}

/// Element node; `name` is always lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Element {
            name: name.into(),
            children,
        }
    }
}

// Descendants are released iteratively; nesting depth is unbounded.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_deep_tree() {
        let mut node = Node::text("leaf");
        for _ in 0..200_000 {
            node = Node::element("b", vec![node, Node::text("x")]);
        }
        drop(node);
    }

    #[test]
    fn test_serialized_shape() {
        let node = Node::element("b", vec![Node::text("hi")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "el",
                "name": "b",
                "children": [{ "type": "text", "value": "hi" }]
            })
        );
    }
}
