//! Reference document to builder calls.
//!
//! Walks a reference SVG and writes Rust source that rebuilds it with `emit`, one call per
//! element, so hand-authored reference parts can be lifted into component builders.

use crate::XtaskError;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

fn attr_list(n: roxmltree::Node<'_, '_>, with_namespaces: bool) -> String {
    let mut parts: Vec<String> = Vec::new();
    if with_namespaces {
        for ns in n.namespaces().filter(|ns| ns.name() != Some("xml")) {
            let key = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            parts.push(format!("{key:?} => {:?}", ns.uri()));
        }
    }
    for a in n.attributes() {
        let key = match a.namespace() {
            Some(XLINK_NS) => format!("xlink:{}", a.name()),
            _ => a.name().to_string(),
        };
        parts.push(format!("{key:?} => {:?}", a.value()));
    }
    format!("attrs![{}]", parts.join(", "))
}

fn own_text(n: roxmltree::Node<'_, '_>) -> Option<String> {
    let text: String = n
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect();
    Some(text).filter(|t| !t.trim().is_empty())
}

fn write_children(out: &mut String, parent: roxmltree::Node<'_, '_>, depth: usize) {
    let indent = "    ".repeat(depth + 1);
    let parent_var = format!("n{depth}");
    for c in parent
        .children()
        .filter(|c| c.is_element() && !c.has_tag_name("script"))
    {
        let text = match own_text(c) {
            Some(t) => format!("Some({t:?})"),
            None => "None".to_string(),
        };
        let call = format!(
            "emit({parent_var}, {:?}, {}, {text})",
            c.tag_name().name(),
            attr_list(c, false)
        );
        if c.children().any(|gc| gc.is_element()) {
            let _ = writeln!(out, "{indent}{{");
            let _ = writeln!(out, "{indent}    let n{} = {call};", depth + 1);
            write_children(out, c, depth + 1);
            let _ = writeln!(out, "{indent}}}");
        } else {
            let _ = writeln!(out, "{indent}{call};");
        }
    }
}

pub(crate) fn blueprint_source(svg: &str) -> Result<String, XtaskError> {
    let doc = roxmltree::Document::parse(svg)
        .map_err(|e| XtaskError::BlueprintMismatch(format!("invalid reference document: {e}")))?;
    let root = doc.root_element();

    let mut out = String::new();
    let _ = writeln!(out, "// Generated by `cargo run -p xtask -- dump-blueprint`.");
    let _ = writeln!(out);
    let _ = writeln!(out, "use airpanel::attrs;");
    let _ = writeln!(out, "use airpanel::node::{{Node, emit}};");
    let _ = writeln!(out);
    let _ = writeln!(out, "pub fn blueprint() -> Node {{");
    let _ = writeln!(
        out,
        "    let mut root = Node::with_attrs({:?}, {});",
        root.tag_name().name(),
        attr_list(root, true)
    );
    let _ = writeln!(out, "    let n0 = &mut root;");
    write_children(&mut out, root, 0);
    let _ = writeln!(out, "    root");
    let _ = writeln!(out, "}}");
    Ok(out)
}

pub(crate) fn dump_blueprint(args: Vec<String>) -> Result<(), XtaskError> {
    let mut positional = args.iter().filter(|a| !a.starts_with('-'));
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Err(XtaskError::Usage);
    }
    let input = PathBuf::from(positional.next().ok_or(XtaskError::Usage)?);
    let output = positional.next().map(PathBuf::from);

    let svg = fs::read_to_string(&input).map_err(|source| XtaskError::ReadFile {
        path: input.display().to_string(),
        source,
    })?;
    let source = blueprint_source(&svg)?;

    match output {
        None => print!("{source}"),
        Some(path) => fs::write(&path, source).map_err(|source| XtaskError::WriteFile {
            path: path.display().to_string(),
            source,
        })?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_open_blocks() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" id="root"><script>x()</script><g id="a"><text x="1">FAN1</text></g><rect/></svg>"#;
        let src = blueprint_source(svg).unwrap();
        assert!(src.contains(
            r#"let mut root = Node::with_attrs("svg", attrs!["xmlns" => "http://www.w3.org/2000/svg", "id" => "root"]);"#
        ));
        assert!(src.contains(r#"        let n1 = emit(n0, "g", attrs!["id" => "a"], None);"#));
        assert!(src.contains(r#"        emit(n1, "text", attrs!["x" => "1"], Some("FAN1"));"#));
        assert!(src.contains(r#"    emit(n0, "rect", attrs![], None);"#));
        assert!(!src.contains("script"));
    }

    #[test]
    fn xlink_attributes_keep_their_prefix() {
        let svg = r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a"/></svg>"##;
        let src = blueprint_source(svg).unwrap();
        assert!(src.contains(r##"attrs!["xlink:href" => "#a"]"##), "{src}");
    }
}
