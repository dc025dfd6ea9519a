use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SvgDomNode {
    pub(crate) name: String,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<SvgDomNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DomMode {
    /// Every attribute and text, numbers rounded to the requested decimals.
    Strict,
    /// Element/attribute shape only: numbers masked, geometry collapsed, order ignored.
    Structure,
    /// Like `Structure`, but path commands and non-geometry numbers must match.
    Parity,
}

impl DomMode {
    pub(crate) fn parse(s: &str) -> Self {
        match s {
            "strict" => Self::Strict,
            "parity" => Self::Parity,
            _ => Self::Structure,
        }
    }
}

fn round_f64(v: f64, decimals: u32) -> f64 {
    let p = 10_f64.powi(decimals as i32);
    (v * p).round() / p
}

fn re_num() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        Regex::new(r"-?(?:\d+\.\d+|\d+\.|\.\d+|\d+)(?:[eE][+-]?\d+)?").expect("numeric token regex")
    })
}

pub(crate) fn normalize_numeric_tokens(s: &str, decimals: u32) -> String {
    re_num()
        .replace_all(s, |caps: &regex::Captures<'_>| {
            let raw = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let Ok(v) = raw.parse::<f64>() else {
                return raw.to_string();
            };
            let r = round_f64(v, decimals);
            // -0.000 and 0 are the same point
            let r = if r == 0.0 { 0.0 } else { r };
            let mut out = format!("{r}");
            if out.contains('.') {
                while out.ends_with('0') {
                    out.pop();
                }
                if out.ends_with('.') {
                    out.pop();
                }
            }
            out
        })
        .to_string()
}

fn mask_numeric_tokens(s: &str) -> String {
    re_num().replace_all(s, "<n>").to_string()
}

fn normalize_class_list(s: &str) -> String {
    let mut parts: Vec<&str> = s.split_whitespace().collect();
    parts.sort_unstable();
    parts.dedup();
    parts.join(" ")
}

fn is_geometry_attr(name: &str) -> bool {
    matches!(
        name,
        "transform"
            | "d"
            | "points"
            | "x"
            | "y"
            | "x1"
            | "y1"
            | "x2"
            | "y2"
            | "cx"
            | "cy"
            | "r"
            | "rx"
            | "ry"
            | "width"
            | "height"
            | "from"
            | "to"
    )
}

/// Attributes drawn from the particle generator; only their presence is stable.
fn is_random_attr(element: &str, key: &str) -> bool {
    matches!(
        (element, key),
        ("animate", "dur" | "begin") | ("line", "stroke-width" | "opacity")
    )
}

fn build_node(n: roxmltree::Node<'_, '_>, mode: DomMode, decimals: u32) -> SvgDomNode {
    let name = n.tag_name().name();
    let mut attrs: BTreeMap<String, String> = BTreeMap::new();
    for a in n.attributes() {
        let key = match a.namespace() {
            Some(ns) if ns == "http://www.w3.org/1999/xlink" => format!("xlink:{}", a.name()),
            _ => a.name().to_string(),
        };
        let raw = a.value();

        let val = if key == "class" {
            normalize_class_list(raw)
        } else if mode == DomMode::Strict {
            normalize_numeric_tokens(raw, decimals)
        } else if key == "style" && name == "circle" {
            // particle timing
            continue;
        } else if is_random_attr(name, &key) {
            "<random>".to_string()
        } else if key == "d" || key == "points" {
            if mode == DomMode::Structure {
                "<geom>".to_string()
            } else {
                // keep command letters, drop the numeric payload
                let v = mask_numeric_tokens(&raw.replace(',', " "));
                v.chars().filter(|c| !c.is_whitespace()).collect()
            }
        } else if is_geometry_attr(&key) {
            mask_numeric_tokens(raw)
        } else if mode == DomMode::Structure {
            mask_numeric_tokens(raw)
        } else {
            normalize_numeric_tokens(raw, decimals)
        };
        attrs.insert(key, val);
    }

    let text = n
        .children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let text = Some(text).filter(|t| !t.is_empty());

    let mut children: Vec<SvgDomNode> = n
        .children()
        .filter(|c| c.is_element() && !c.has_tag_name("script"))
        .map(|c| build_node(c, mode, decimals))
        .collect();

    if mode != DomMode::Strict {
        fn sort_hint(n: &SvgDomNode) -> (&str, &str) {
            let id = n.attrs.get("id").map(String::as_str).unwrap_or("");
            let class = n.attrs.get("class").map(String::as_str).unwrap_or("");
            (id, class)
        }
        children.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| sort_hint(a).cmp(&sort_hint(b))));
    }

    SvgDomNode {
        name: name.to_string(),
        attrs,
        text: if mode == DomMode::Structure { None } else { text },
        children,
    }
}

/// Canonical form of the first `<svg>` element; `<script>` subtrees are skipped.
pub(crate) fn dom_signature(svg: &str, mode: DomMode, decimals: u32) -> Result<SvgDomNode, String> {
    let doc = roxmltree::Document::parse(svg).map_err(|e| e.to_string())?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name("svg"))
        .ok_or_else(|| "missing <svg> root".to_string())?;
    Ok(build_node(root, mode, decimals))
}

pub(crate) fn render_signature(node: &SvgDomNode) -> String {
    fn walk(out: &mut String, n: &SvgDomNode, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&n.name);
        for (k, v) in &n.attrs {
            out.push_str(&format!(" {k}={v:?}"));
        }
        if let Some(t) = &n.text {
            out.push_str(&format!(" #text={t:?}"));
        }
        out.push('\n');
        for c in &n.children {
            walk(out, c, depth + 1);
        }
    }
    let mut out = String::new();
    walk(&mut out, node, 0);
    out
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut out = s
        .chars()
        .take(max_len.saturating_sub(1))
        .collect::<String>();
    out.push('…');
    out
}

pub(crate) fn dom_diff_path(
    reference: &SvgDomNode,
    local: &SvgDomNode,
    path: &mut Vec<String>,
) -> Option<String> {
    if reference.name != local.name {
        return Some(format!(
            "{}: element name mismatch reference={} local={}",
            path.join("/"),
            reference.name,
            local.name
        ));
    }

    if reference.attrs != local.attrs {
        for (k, v_ref) in &reference.attrs {
            match local.attrs.get(k) {
                None => return Some(format!("{}: missing attr `{k}`", path.join("/"))),
                Some(v_lo) if v_lo != v_ref => {
                    return Some(format!(
                        "{}: attr `{k}` mismatch reference=`{}` local=`{}`",
                        path.join("/"),
                        truncate(v_ref, 120),
                        truncate(v_lo, 120)
                    ));
                }
                _ => {}
            }
        }
        for k in local.attrs.keys() {
            if !reference.attrs.contains_key(k) {
                return Some(format!("{}: extra attr `{k}`", path.join("/")));
            }
        }
    }

    if reference.text != local.text {
        return Some(format!(
            "{}: text mismatch reference=`{}` local=`{}`",
            path.join("/"),
            truncate(reference.text.as_deref().unwrap_or(""), 120),
            truncate(local.text.as_deref().unwrap_or(""), 120)
        ));
    }

    let n = reference.children.len().min(local.children.len());
    for i in 0..n {
        let label = match reference.children[i].attrs.get("id") {
            Some(id) => format!("{}#{id}", reference.children[i].name),
            None => format!("{}[{}]", reference.children[i].name, i),
        };
        path.push(label);
        if let Some(d) = dom_diff_path(&reference.children[i], &local.children[i], path) {
            return Some(d);
        }
        path.pop();
    }

    if reference.children.len() != local.children.len() {
        return Some(format!(
            "{}: child count mismatch reference={} local={}",
            path.join("/"),
            reference.children.len(),
            local.children.len()
        ));
    }

    None
}

pub(crate) fn dom_diff(reference: &SvgDomNode, local: &SvgDomNode) -> Option<String> {
    let mut path = vec![reference.name.clone()];
    dom_diff_path(reference, local, &mut path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens_round_and_trim() {
        assert_eq!(normalize_numeric_tokens("M 1.23456 -0.0001 L 15.0", 3), "M 1.235 0 L 15");
    }

    #[test]
    fn strict_sees_number_drift_structure_does_not() {
        let a = r#"<svg><circle cx="1.5" r="2"/></svg>"#;
        let b = r#"<svg><circle cx="1.6" r="2"/></svg>"#;
        let sa = dom_signature(a, DomMode::Strict, 3).unwrap();
        let sb = dom_signature(b, DomMode::Strict, 3).unwrap();
        let diff = dom_diff(&sa, &sb).expect("strict diff");
        assert!(diff.contains("attr `cx`"), "{diff}");

        let sa = dom_signature(a, DomMode::Structure, 3).unwrap();
        let sb = dom_signature(b, DomMode::Structure, 3).unwrap();
        assert_eq!(dom_diff(&sa, &sb), None);
    }

    #[test]
    fn parity_keeps_path_commands() {
        let a = r#"<svg><path d="M 1 2 A 3 3 0 1 1 4 5"/></svg>"#;
        let b = r#"<svg><path d="M 1 2 L 4 5"/></svg>"#;
        let sa = dom_signature(a, DomMode::Parity, 3).unwrap();
        let sb = dom_signature(b, DomMode::Parity, 3).unwrap();
        assert!(dom_diff(&sa, &sb).is_some());
    }

    #[test]
    fn scripts_are_skipped_and_order_ignored_outside_strict() {
        let a = r#"<svg><script>x()</script><g id="b"/><g id="a"/></svg>"#;
        let b = r#"<svg><g id="a"/><g id="b"/></svg>"#;
        let sa = dom_signature(a, DomMode::Parity, 3).unwrap();
        let sb = dom_signature(b, DomMode::Parity, 3).unwrap();
        assert_eq!(dom_diff(&sa, &sb), None);

        let sa = dom_signature(a, DomMode::Strict, 3).unwrap();
        let sb = dom_signature(b, DomMode::Strict, 3).unwrap();
        assert!(dom_diff(&sa, &sb).is_some_and(|d| d.contains("g#b")));
    }

    #[test]
    fn child_count_mismatch_is_reported() {
        let a = r#"<svg><g id="a"><rect/></g></svg>"#;
        let b = r#"<svg><g id="a"/></svg>"#;
        let sa = dom_signature(a, DomMode::Strict, 3).unwrap();
        let sb = dom_signature(b, DomMode::Strict, 3).unwrap();
        assert_eq!(
            dom_diff(&sa, &sb).as_deref(),
            Some("svg/g#a: child count mismatch reference=1 local=0")
        );
    }
}
