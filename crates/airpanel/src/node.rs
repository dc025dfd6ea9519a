//! In-memory SVG tree and the single primitive every builder goes through.

use crate::fmt::fmt;
use indexmap::IndexMap;

/// One element of the generated document.
///
/// A node with text normally has no children. Curved labels are the exception: a `<text>`
/// wrapper holds a `<textPath>` child that carries the actual string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Node>,
    pub text: Option<String>,
    /// Text is embedded content (script, style) that must reach the output unescaped.
    pub verbatim: bool,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attrs(tag: impl Into<String>, attrs: Attrs) -> Self {
        let mut node = Self::new(tag);
        node.attrs.extend(attrs.0);
        node
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: impl AttrValue) {
        self.attrs.insert(name.to_string(), value.to_attr());
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Pre-order walk over this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.descendants().find(|n| n.id() == Some(id))
    }

    pub fn children_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Conversion of builder inputs into attribute text.
pub trait AttrValue {
    fn to_attr(&self) -> String;
}

impl AttrValue for f64 {
    fn to_attr(&self) -> String {
        fmt(*self)
    }
}

impl AttrValue for str {
    fn to_attr(&self) -> String {
        self.to_string()
    }
}

impl AttrValue for String {
    fn to_attr(&self) -> String {
        self.clone()
    }
}

macro_rules! int_attr_value {
    ($($t:ty),*) => {
        $(impl AttrValue for $t {
            fn to_attr(&self) -> String {
                self.to_string()
            }
        })*
    };
}

int_attr_value!(u8, i32, u32, i64, u64, usize);

impl<T: AttrValue + ?Sized> AttrValue for &T {
    fn to_attr(&self) -> String {
        (**self).to_attr()
    }
}

/// Ordered attribute list; keys keep the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(Vec<(String, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: &(impl AttrValue + ?Sized)) {
        self.0.push((key.to_string(), value.to_attr()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Builds an [`Attrs`] list: `attrs!["cx" => 1.5, "class" => "rotor-disk"]`.
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::node::Attrs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attrs = $crate::node::Attrs::new();
        $(attrs.push($key, &$value);)+
        attrs
    }};
}

/// Appends a child to `parent` and returns it.
///
/// Attribute names and tags are not validated. Empty text is treated as no text.
pub fn emit<'a>(parent: &'a mut Node, tag: &str, attrs: Attrs, text: Option<&str>) -> &'a mut Node {
    let mut node = Node::with_attrs(tag, attrs);
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        node.text = Some(text.to_string());
    }
    let idx = parent.children.len();
    parent.children.push(node);
    &mut parent.children[idx]
}

/// Like [`emit`], but the text is embedded content that the serializer leaves unescaped.
pub fn emit_verbatim<'a>(
    parent: &'a mut Node,
    tag: &str,
    attrs: Attrs,
    text: &str,
) -> &'a mut Node {
    let node = emit(parent, tag, attrs, Some(text));
    node.verbatim = true;
    node
}
