//! Markdown syntax tree built from pulldown-cmark events
//!
//! pulldown-cmark produces a flat stream of start/end events. The changelog
//! reader needs to look at a heading's or list item's whole subtree at once,
//! so the stream is folded into an owned tree that can be walked with
//! enter/exit callbacks.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use tracing::trace;

/// Kind of a node in the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of the document
    Document,
    /// ATX or setext heading with its level (1-6)
    Heading(u8),
    /// Paragraph
    Paragraph,
    /// Ordered or bullet list
    List,
    /// List item
    Item,
    /// Hyperlink; reference links carry their resolved destination
    Link { destination: String, autolink: bool },
    /// Image
    Image { destination: String },
    /// `_emphasis_`
    Emphasis,
    /// `**strong**`
    Strong,
    /// `~~strikethrough~~`
    Strikethrough,
    /// Inline code span
    Code(String),
    /// Plain text
    Text(String),
    /// Inline or block HTML
    Html(String),
    /// Line break inside a paragraph
    SoftBreak,
    /// Forced line break
    HardBreak,
    /// Any construct the changelog grammar does not care about
    Other,
}

impl NodeKind {
    /// Leaves are visited once; containers on enter and exit
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Self::Code(_) | Self::Text(_) | Self::Html(_) | Self::SoftBreak | Self::HardBreak
        )
    }
}

/// Node of the syntax tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

/// What the walker does after visiting a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Descend into the children and visit the exit event
    Continue,
    /// Skip the children and the exit event
    SkipChildren,
}

/// Callback invoked while walking the tree
pub trait Visitor {
    /// Called on entering (and, for containers, exiting) every node
    fn visit(&mut self, node: &Node, entering: bool) -> WalkStatus;
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Depth-first walk
    pub fn walk<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        if visitor.visit(self, true) == WalkStatus::SkipChildren || self.kind.is_leaf() {
            return;
        }
        for child in &self.children {
            child.walk(visitor);
        }
        visitor.visit(self, false);
    }
}

/// Parse Markdown source into a syntax tree
pub fn parse_document(source: &str) -> Node {
    let mut stack = vec![Node::new(NodeKind::Document)];

    for event in Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(tag) => stack.push(Node::new(kind_for(tag))),
            Event::End(end) => {
                // The document root is never closed by an event
                if stack.len() > 1 {
                    if let Some(node) = stack.pop() {
                        trace!(?end, "closing node");
                        push_child(&mut stack, node);
                    }
                }
            }
            Event::Text(text) => push_child(&mut stack, Node::new(NodeKind::Text(text.into_string()))),
            Event::Code(code) => push_child(&mut stack, Node::new(NodeKind::Code(code.into_string()))),
            Event::Html(html) | Event::InlineHtml(html) => {
                push_child(&mut stack, Node::new(NodeKind::Html(html.into_string())))
            }
            Event::SoftBreak => push_child(&mut stack, Node::new(NodeKind::SoftBreak)),
            Event::HardBreak => push_child(&mut stack, Node::new(NodeKind::HardBreak)),
            _ => {}
        }
    }

    // Unbalanced streams do not happen with pulldown-cmark, but never lose content
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            push_child(&mut stack, node);
        }
    }
    stack.pop().unwrap_or_else(|| Node::new(NodeKind::Document))
}

fn push_child(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn kind_for(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Heading { level, .. } => NodeKind::Heading(level as u8),
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::Item,
        Tag::Link {
            link_type,
            dest_url,
            ..
        } => NodeKind::Link {
            destination: dest_url.into_string(),
            autolink: matches!(link_type, LinkType::Autolink | LinkType::Email),
        },
        Tag::Image { dest_url, .. } => NodeKind::Image {
            destination: dest_url.into_string(),
        },
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Strikethrough,
        _ => NodeKind::Other,
    }
}
