//! Server-side visual tree.
//!
//! Text and attribute values are escaped on output. Raw markup enters the
//! tree only as [`SafeMarkup`].

use crate::application::markdown::SafeMarkup;
use crate::application::style::StyleDeclarations;

const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

#[derive(Debug, Clone, PartialEq)]
pub enum VisualNode {
    Element(Element),
    Text(String),
    Markup(SafeMarkup),
    Fragment(Vec<VisualNode>),
}

impl VisualNode {
    pub fn text(value: impl Into<String>) -> Self {
        VisualNode::Text(value.into())
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            VisualNode::Element(element) => element.write_html(out),
            VisualNode::Text(text) => out.push_str(&escape_text(text)),
            VisualNode::Markup(markup) => out.push_str(markup.as_str()),
            VisualNode::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            VisualNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Depth-first search for elements carrying `class`.
    pub fn find_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        match self {
            VisualNode::Element(element) => {
                if element.has_class(class) {
                    found.push(element);
                }
                for child in &element.children {
                    child.find_by_class(class, found);
                }
            }
            VisualNode::Fragment(children) => {
                for child in children {
                    child.find_by_class(class, found);
                }
            }
            VisualNode::Text(_) | VisualNode::Markup(_) => {}
        }
    }
}

impl From<Element> for VisualNode {
    fn from(element: Element) -> Self {
        VisualNode::Element(element)
    }
}

impl From<SafeMarkup> for VisualNode {
    fn from(markup: SafeMarkup) -> Self {
        VisualNode::Markup(markup)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attributes: Vec<(&'static str, String)>,
    pub style: StyleDeclarations,
    pub children: Vec<VisualNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            style: StyleDeclarations::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    pub fn class_if(self, condition: bool, class: impl Into<String>) -> Self {
        if condition { self.class(class) } else { self }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Adds `declarations` after any style already present.
    pub fn style(mut self, declarations: StyleDeclarations) -> Self {
        self.style.extend(declarations);
        self
    }

    pub fn child(mut self, child: impl Into<VisualNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = VisualNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(VisualNode::Text(text.into()))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);

        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attribute(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attribute(value));
            out.push('"');
        }
        if let Some(css) = self.style.to_safe_css() {
            out.push_str(" style=\"");
            out.push_str(&escape_attribute(&css));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}
