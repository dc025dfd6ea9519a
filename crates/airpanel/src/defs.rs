//! Shared `<defs>`: blur filter, optional embedded style, gradients and the arrowhead marker.

use crate::attrs;
use crate::node::{Node, emit, emit_verbatim};

#[derive(Debug, Clone, Copy)]
struct Stop {
    offset: &'static str,
    color: &'static str,
    opacity: &'static str,
}

const fn stop(offset: &'static str, color: &'static str, opacity: &'static str) -> Stop {
    Stop {
        offset,
        color,
        opacity,
    }
}

const RED_STOPS: &[Stop] = &[stop("0%", "#FF0000", "1.0"), stop("100%", "#800000", "1.0")];

const GRADIENTS: &[(&str, &[Stop])] = &[
    (
        "animated-bg-gradient",
        &[
            stop("0%", "#B0E0E6", "1.0"),
            stop("50%", "#87CEEB", "1.0"),
            stop("100%", "#4682B4", "0.9"),
        ],
    ),
    (
        "disk-gradient",
        &[
            stop("0%", "#FFFFFF", "1.0"),
            stop("70%", "#F0F0F0", "1.0"),
            stop("100%", "#DADADA", "1.0"),
        ],
    ),
    ("red-gradient", RED_STOPS),
    ("status-red-gradient", RED_STOPS),
];

pub const BLUR_FILTER_ID: &str = "blur-effect";

/// Appends the `<defs>` block. `style` is embedded verbatim right after the filter.
pub fn build_defs(parent: &mut Node, style: Option<&str>) {
    let defs = emit(parent, "defs", attrs![], None);

    let filter = emit(
        defs,
        "filter",
        attrs![
            "id" => BLUR_FILTER_ID,
            "x" => "-50%",
            "y" => "-50%",
            "width" => "200%",
            "height" => "200%",
        ],
        None,
    );
    emit(
        filter,
        "feGaussianBlur",
        attrs!["in" => "SourceGraphic", "stdDeviation" => 1.5],
        None,
    );

    if let Some(css) = style.filter(|s| !s.is_empty()) {
        emit_verbatim(defs, "style", attrs![], css);
    }

    for (id, stops) in GRADIENTS {
        let gradient = emit(
            defs,
            "radialGradient",
            attrs!["id" => *id, "cx" => "50%", "cy" => "50%", "r" => "50%"],
            None,
        );
        for s in *stops {
            emit(
                gradient,
                "stop",
                attrs![
                    "offset" => s.offset,
                    "style" => format!("stop-color:{};stop-opacity:{}", s.color, s.opacity),
                ],
                None,
            );
        }
    }

    let marker = emit(
        defs,
        "marker",
        attrs![
            "id" => "arrowhead",
            "markerWidth" => 3,
            "markerHeight" => 3,
            "refX" => 1.5,
            "refY" => 1.5,
            "orient" => "auto",
            "markerUnits" => "strokeWidth",
        ],
        None,
    );
    emit(
        marker,
        "polygon",
        attrs!["points" => "0 0, 3 1.5, 0 3", "fill" => "black"],
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_follows_the_filter() {
        let mut root = Node::new("svg");
        build_defs(&mut root, Some(".a { fill: red; }"));
        let tags: Vec<&str> = root.children[0].children.iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(
            tags,
            ["filter", "style", "radialGradient", "radialGradient", "radialGradient", "radialGradient", "marker"]
        );
        assert!(root.children[0].children[1].verbatim);
    }

    #[test]
    fn no_style_node_without_style() {
        let mut root = Node::new("svg");
        build_defs(&mut root, None);
        assert!(root.descendants().all(|n| n.tag != "style"));
        let red = root.find_by_id("status-red-gradient").expect("gradient");
        assert_eq!(
            red.children[1].attr("style"),
            Some("stop-color:#800000;stop-opacity:1.0")
        );
    }
}
