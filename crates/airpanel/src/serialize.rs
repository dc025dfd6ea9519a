//! Tree to text.
//!
//! Layout follows the reference document: two spaces per depth level, `<tag a="v" />` for empty
//! elements, attributes in insertion order, no trailing newline after the root.
//!
//! Text is escaped uniformly. Verbatim nodes (embedded script and style) get the byte range of
//! their escaped text recorded; [`unescape_ranges`] later reverses `&lt;`, `&gt;` and `&amp;`
//! inside those ranges only, so entities elsewhere in the document stay encoded.

use crate::node::Node;
use std::ops::Range;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

const INDENT: &str = "  ";

/// Serialized tree plus the byte ranges holding verbatim text.
#[derive(Debug, Clone, Default)]
pub struct Serialized {
    pub text: String,
    pub verbatim_ranges: Vec<Range<usize>>,
}

pub fn serialize_tree(root: &Node) -> Serialized {
    let mut out = Serialized::default();
    write_node(&mut out, root, 0);
    out
}

/// Serializes `root` with the declaration line and verbatim regions restored.
pub fn to_document_string(root: &Node) -> String {
    let serialized = serialize_tree(root);
    let mut doc = String::with_capacity(XML_DECLARATION.len() + 1 + serialized.text.len());
    doc.push_str(XML_DECLARATION);
    doc.push('\n');
    doc.push_str(&unescape_ranges(&serialized.text, &serialized.verbatim_ranges));
    doc
}

fn push_indent(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_node(out: &mut Serialized, node: &Node, depth: usize) {
    let buf = &mut out.text;
    buf.push('<');
    buf.push_str(&node.tag);
    for (k, v) in &node.attrs {
        buf.push(' ');
        buf.push_str(k);
        buf.push_str("=\"");
        escape_attr_into(buf, v);
        buf.push('"');
    }

    let text = node.text.as_deref().filter(|t| !t.is_empty());
    if text.is_none() && node.children.is_empty() {
        buf.push_str(" />");
        return;
    }
    buf.push('>');

    if let Some(text) = text {
        let start = buf.len();
        escape_text_into(buf, text);
        if node.verbatim {
            let end = buf.len();
            out.verbatim_ranges.push(start..end);
        }
    } else {
        push_indent(&mut out.text, depth + 1);
    }

    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        write_node(out, child, depth + 1);
        if i + 1 < count {
            push_indent(&mut out.text, depth + 1);
        } else {
            push_indent(&mut out.text, depth);
        }
    }

    let buf = &mut out.text;
    buf.push_str("</");
    buf.push_str(&node.tag);
    buf.push('>');
}

pub fn escape_text_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

pub fn escape_attr_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#09;"),
            _ => out.push(ch),
        }
    }
}

/// Exact inverse of [`escape_text_into`] for a single region.
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let (replacement, consumed) = if tail.starts_with("&lt;") {
            ('<', 4)
        } else if tail.starts_with("&gt;") {
            ('>', 4)
        } else if tail.starts_with("&amp;") {
            ('&', 5)
        } else {
            ('&', 1)
        };
        out.push(replacement);
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// Unescapes the given byte ranges of `text`; ranges must be sorted and non-overlapping.
pub fn unescape_ranges(text: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for r in ranges {
        out.push_str(&text[cursor..r.start]);
        out.push_str(&unescape_text(&text[r.clone()]));
        cursor = r.end;
    }
    out.push_str(&text[cursor..]);
    out
}
