//! Markup Parser
//!
//! Builds a node tree from the markup token stream. The builder never fails:
//! a closing tag with no matching open element is dropped, a closing tag that
//! matches below the top of the stack implicitly closes everything above it,
//! and elements still open at the end of input are closed there.

use smallvec::SmallVec;
use std::fmt;

use super::ast::{Element, Node, Text};
use super::lexer::tokenize;
use super::tokens::{SourceSpan, TagToken, Token};

/// Recovery performed while building the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeWarningKind {
    /// A closing tag matched no open element and was ignored.
    UnexpectedClosingTag,
    /// An element was closed implicitly, by an outer closing tag or by the
    /// end of input.
    UnclosedElement,
}

/// Non-fatal tree building diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeWarning {
    pub kind: TreeWarningKind,
    pub element_name: String,
    pub span: SourceSpan,
}

impl TreeWarning {
    pub fn create(kind: TreeWarningKind, element_name: &str, span: SourceSpan) -> Self {
        TreeWarning {
            kind,
            element_name: element_name.to_string(),
            span,
        }
    }
}

impl fmt::Display for TreeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TreeWarningKind::UnexpectedClosingTag => write!(
                f,
                "Unexpected closing tag \"{}\" at {}",
                self.element_name, self.span.start
            ),
            TreeWarningKind::UnclosedElement => write!(
                f,
                "Unclosed element \"{}\" at {}",
                self.element_name, self.span.start
            ),
        }
    }
}

/// Parse tree result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub warnings: Vec<TreeWarning>,
}

impl ParseTreeResult {
    pub fn new(root_nodes: Vec<Node>, warnings: Vec<TreeWarning>) -> Self {
        ParseTreeResult {
            root_nodes,
            warnings,
        }
    }
}

/// Parse `input` into the children of an implicit root element.
pub fn parse(input: &str) -> Vec<Node> {
    parse_with_diagnostics(input).root_nodes
}

/// Like [`parse`], also reporting every recovery the builder performed.
pub fn parse_with_diagnostics(input: &str) -> ParseTreeResult {
    let mut builder = TreeBuilder::new();
    builder.build(tokenize(input));
    ParseTreeResult::new(builder.root_nodes, builder.warnings)
}

/// An element whose closing tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    name: String,
    children: Vec<Node>,
    start_span: SourceSpan,
}

/// Internal tree builder
struct TreeBuilder {
    element_stack: SmallVec<[OpenElement; 8]>,
    root_nodes: Vec<Node>,
    warnings: Vec<TreeWarning>,
}

impl TreeBuilder {
    fn new() -> Self {
        TreeBuilder {
            element_stack: SmallVec::new(),
            root_nodes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn build(&mut self, tokens: Vec<Token>) {
        for token in tokens {
            match token {
                Token::Text(text) => self.add_to_parent(Node::Text(Text::new(text.value))),
                Token::TagOpen(tag) => self.push_element(tag),
                Token::TagSelfClose(tag) => {
                    self.add_to_parent(Node::Element(Element::new(tag.name, Vec::new())))
                }
                Token::TagClose(tag) => self.consume_element_end_tag(tag),
            }
        }

        // Flush everything still open, innermost first
        while let Some(open) = self.element_stack.pop() {
            self.report_unclosed(&open);
            self.add_to_parent(Self::complete(open));
        }
    }

    fn push_element(&mut self, tag: TagToken) {
        self.element_stack.push(OpenElement {
            name: tag.name,
            children: Vec::new(),
            start_span: tag.source_span,
        });
    }

    fn consume_element_end_tag(&mut self, tag: TagToken) {
        let match_index = self
            .element_stack
            .iter()
            .rposition(|open| open.name == tag.name);

        let Some(idx) = match_index else {
            tracing::trace!(tag = %tag.name, offset = tag.source_span.start, "ignoring unmatched closing tag");
            self.warnings.push(TreeWarning::create(
                TreeWarningKind::UnexpectedClosingTag,
                &tag.name,
                tag.source_span,
            ));
            return;
        };

        // Pop all elements from stack top down to idx (inclusive)
        while self.element_stack.len() > idx {
            let Some(open) = self.element_stack.pop() else {
                break;
            };
            if self.element_stack.len() > idx {
                self.report_unclosed(&open);
            }
            self.add_to_parent(Self::complete(open));
        }
    }

    fn report_unclosed(&mut self, open: &OpenElement) {
        tracing::trace!(tag = %open.name, offset = open.start_span.start, "implicitly closing element");
        self.warnings.push(TreeWarning::create(
            TreeWarningKind::UnclosedElement,
            &open.name,
            open.start_span,
        ));
    }

    fn complete(open: OpenElement) -> Node {
        Node::Element(Element::new(open.name, open.children))
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.element_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_result_creation() {
        let result = ParseTreeResult::new(vec![], vec![]);
        assert_eq!(result.root_nodes.len(), 0);
        assert_eq!(result.warnings.len(), 0);
    }

    #[test]
    fn test_nested_elements() {
        assert_eq!(
            parse("<b>x<i>y</i></b>"),
            vec![Node::element(
                "b",
                vec![Node::text("x"), Node::element("i", vec![Node::text("y")])]
            )]
        );
    }

    #[test]
    fn test_stray_closing_tag_warns() {
        let result = parse_with_diagnostics("a</i>b");
        assert_eq!(result.root_nodes, vec![Node::text("a"), Node::text("b")]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, TreeWarningKind::UnexpectedClosingTag);
        assert_eq!(result.warnings[0].span, SourceSpan::new(1, 5));
        assert_eq!(result.warnings[0].to_string(), "Unexpected closing tag \"i\" at 1");
    }

    #[test]
    fn test_matched_element_is_not_reported() {
        assert!(parse_with_diagnostics("<b>x</b>").warnings.is_empty());
    }
}
