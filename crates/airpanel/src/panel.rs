//! Document assembly: every component at its fixed place in the 0..100 view box.

use crate::attrs;
use crate::config::PanelOptions;
use crate::defs::build_defs;
use crate::error::{Error, Result};
use crate::fan::{FanLabel, FanSpec, PowerState, build_fan};
use crate::gauge::{GaugeKind, GaugeSpec, PRESSURE_MAX, RPM_MAX, build_gauge};
use crate::geom::point;
use crate::node::{Node, emit, emit_verbatim};
use crate::particles::{build_exhaust, build_starfield};
use crate::resources::{load_behavior_script, load_shared_style, wrap_script};
use crate::serialize::to_document_string;
use crate::status::{
    Lamp, LampState, Plate, build_feedback, build_fuse, build_system_indicator, plate,
};
use rand::Rng;
use std::path::Path;

pub const ROOT_ID: &str = "svgAirflowM1";

const NAMESPACES: [(&str, &str); 6] = [
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:cc", "http://creativecommons.org/ns#"),
    ("xmlns:rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("xmlns:svg", "http://www.w3.org/2000/svg"),
    ("xmlns", "http://www.w3.org/2000/svg"),
    ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
];

const EXHAUST_DURATION_S: f64 = 3.0;
/// `(id, cx, cy, particles)`
const EXHAUSTS: [(&str, f64, f64, usize); 3] = [
    ("exhaust-container-1", 15.0, 78.0, 10),
    ("exhaust-container-2", 65.0, 78.0, 10),
    ("exhaust-container-center", 40.0, 78.0, 24),
];
const STAR_COUNT: usize = 75;

const FAN_SIZE: f64 = 10.0;
const FAN_STROKE: f64 = 0.75;

/// Builds the complete panel tree.
///
/// `script` is raw behavior source and `style` raw CSS; both are embedded verbatim when present
/// and non-empty.
pub fn build_panel<R: Rng + ?Sized>(script: Option<&str>, style: Option<&str>, rng: &mut R) -> Node {
    let mut root = Node::new("svg");
    for (k, v) in NAMESPACES {
        root.set_attr(k, v);
    }
    root.set_attr("viewBox", "0 0 100 100");
    root.set_attr("width", "60mm");
    root.set_attr("height", "120mm");
    root.set_attr("version", "1.1");
    root.set_attr("id", ROOT_ID);

    if let Some(js) = script.filter(|s| !s.is_empty()) {
        emit_verbatim(
            &mut root,
            "script",
            attrs!["type" => "text/javascript"],
            &wrap_script(js),
        );
    }
    build_defs(&mut root, style);

    emit(
        &mut root,
        "rect",
        attrs!["x" => 0, "y" => -50, "width" => 80, "height" => 160, "fill" => "#000011"],
        None,
    );

    for (id, cx, cy, count) in EXHAUSTS {
        let container = emit(&mut root, "g", attrs!["id" => id], None);
        build_exhaust(container, point(cx, cy), count, EXHAUST_DURATION_S, rng);
    }
    let stars = emit(&mut root, "g", attrs!["id" => "starfield-container"], None);
    build_starfield(stars, STAR_COUNT, rng);

    build_system_indicator(&mut root, point(40.0, 47.75));

    emit(
        &mut root,
        "rect",
        attrs![
            "id" => "rect-behind-pressure-value",
            "x" => 18,
            "y" => -39,
            "width" => 44,
            "height" => 35,
            "fill" => "url(#disk-gradient)",
        ],
        None,
    );
    emit(
        &mut root,
        "rect",
        attrs![
            "id" => "rect-behind-speed-value",
            "x" => 20,
            "y" => 17,
            "width" => 40,
            "height" => 10,
            "fill" => "url(#disk-gradient)",
        ],
        None,
    );

    let speed = emit(&mut root, "g", attrs!["id" => "fanspeed-container"], None);
    build_gauge(
        speed,
        GaugeKind::Simple,
        &GaugeSpec {
            center: point(40.0, 18.0),
            id: "fanspeed",
            max_value: RPM_MAX,
        },
    );
    let pressure = emit(&mut root, "g", attrs!["id" => "pressure-container"], None);
    build_gauge(
        pressure,
        GaugeKind::Segmented,
        &GaugeSpec {
            center: point(40.0, -13.0),
            id: "pressure",
            max_value: PRESSURE_MAX,
        },
    );

    build_status_groups(&mut root);

    for (id, x, label, state) in [
        ("power-fan1", 10.0, FanLabel::Fan1, PowerState::On),
        ("power-fan2", 60.0, FanLabel::Fan2, PowerState::Off),
    ] {
        let container = emit(&mut root, "g", attrs!["id" => format!("{id}-container")], None);
        build_fan(
            container,
            &FanSpec {
                x,
                y: 50.0,
                size: FAN_SIZE,
                stroke_width: FAN_STROKE,
                id,
                label,
                state,
            },
        );
    }

    root
}

fn fan_plate(x: f64) -> Plate {
    Plate {
        x,
        y: 25.0,
        width: 20.0,
        height: 51.0,
    }
}

/// Fan 1, dryer and fan 2 lamp groups, in the demo state the document ships with.
fn build_status_groups(root: &mut Node) {
    let fan1 = emit(root, "g", attrs!["id" => "status-indicators-fan1"], None);
    build_fuse(
        fan1,
        &Lamp {
            group_id: "fuse-fan1",
            signal: "Fuse_Fan1",
            cx: 10.0,
            state: LampState::Ok,
        },
        Some(fan_plate(5.0)),
    );
    build_feedback(
        fan1,
        &Lamp {
            group_id: "feedback-k1",
            signal: "Feedback_K1",
            cx: 20.0,
            state: LampState::Ok,
        },
    );

    let dryer = emit(root, "g", attrs!["id" => "dryer-indicator"], None);
    plate(
        dryer,
        Plate {
            x: 25.0,
            y: 60.0,
            width: 30.0,
            height: 17.0,
        },
    );
    emit(
        dryer,
        "text",
        attrs!["x" => 34, "y" => 65, "class" => "fan-label"],
        Some("DRYER"),
    );
    build_fuse(
        dryer,
        &Lamp {
            group_id: "fuse-dryer",
            signal: "Fuse_Dryer",
            cx: 35.0,
            state: LampState::Fault,
        },
        None,
    );
    build_feedback(
        dryer,
        &Lamp {
            group_id: "feedback-watchdog",
            signal: "FeedbackPipeWatchdog",
            cx: 45.0,
            state: LampState::Ok,
        },
    );

    let fan2 = emit(root, "g", attrs!["id" => "status-indicators-fan2"], None);
    build_fuse(
        fan2,
        &Lamp {
            group_id: "fuse-fan2",
            signal: "Fuse_Fan2",
            cx: 60.0,
            state: LampState::Unknown,
        },
        Some(fan_plate(55.0)),
    );
    build_feedback(
        fan2,
        &Lamp {
            group_id: "feedback-k2",
            signal: "Feedback_K2",
            cx: 70.0,
            state: LampState::Unknown,
        },
    );
}

/// Loads the configured resources and returns the finished document text.
pub fn render_panel(opts: &PanelOptions) -> Result<String> {
    let script = match &opts.script_path {
        Some(p) => load_behavior_script(p)?,
        None => None,
    };
    let style = match &opts.style_path {
        Some(p) => load_shared_style(p)?,
        None => None,
    };
    let mut rng = opts.rng();
    let root = build_panel(script.as_deref(), style.as_deref(), &mut rng);
    let doc = to_document_string(&root);
    tracing::info!(
        script = script.is_some(),
        style = style.is_some(),
        bytes = doc.len(),
        "assembled panel document"
    );
    Ok(doc)
}

/// Renders the panel and writes it to `path`.
pub fn write_panel(path: impl AsRef<Path>, opts: &PanelOptions) -> Result<()> {
    let path = path.as_ref();
    let doc = render_panel(opts)?;
    std::fs::write(path, doc).map_err(|source| Error::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote panel");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn readout_backings_lead_with_id() {
        let mut rng = StdRng::seed_from_u64(3);
        let root = build_panel(None, None, &mut rng);
        for id in ["rect-behind-pressure-value", "rect-behind-speed-value"] {
            let rect = root.find_by_id(id).expect("backing rect");
            let keys: Vec<&str> = rect.attrs.keys().map(String::as_str).collect();
            assert_eq!(keys, ["id", "x", "y", "width", "height", "fill"], "{id}");
        }
    }

    #[test]
    fn top_level_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let root = build_panel(Some("x()"), Some(".a{}"), &mut rng);
        let head: Vec<String> = root
            .children
            .iter()
            .map(|n| n.id().map_or_else(|| n.tag.clone(), str::to_string))
            .collect();
        assert_eq!(
            head,
            [
                "script",
                "defs",
                "rect",
                "exhaust-container-1",
                "exhaust-container-2",
                "exhaust-container-center",
                "starfield-container",
                "system-indicator",
                "rect-behind-pressure-value",
                "rect-behind-speed-value",
                "fanspeed-container",
                "pressure-container",
                "status-indicators-fan1",
                "dryer-indicator",
                "status-indicators-fan2",
                "power-fan1-container",
                "power-fan2-container",
            ]
        );
    }

    #[test]
    fn root_attributes_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let root = build_panel(None, None, &mut rng);
        let keys: Vec<&str> = root.attrs.keys().map(String::as_str).collect();
        assert_eq!(keys[..6], ["xmlns:dc", "xmlns:cc", "xmlns:rdf", "xmlns:svg", "xmlns", "xmlns:xlink"]);
        assert_eq!(root.attr("id"), Some(ROOT_ID));
        assert_eq!(root.children[0].tag, "defs");
    }

    #[test]
    fn every_id_is_unique() {
        let mut rng = StdRng::seed_from_u64(3);
        let root = build_panel(Some("x()"), None, &mut rng);
        let mut ids: Vec<&str> = root.descendants().filter_map(Node::id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
