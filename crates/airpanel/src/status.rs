//! Status lamps: fuses, feedback loops and the system indicator.
//!
//! Lamps are authored in one of the three states the behavior script also switches between, so
//! the static document already shows a plausible machine state before the first update.

use crate::attrs;
use crate::fmt::fmt_trim3;
use crate::geom::Point;
use crate::node::{Node, emit};

const LAMP_Y: f64 = 71.0;
const LAMP_RIM_RADIUS: f64 = 4.0;
const LAMP_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LampState {
    Ok,
    Fault,
    #[default]
    Unknown,
}

impl LampState {
    pub fn fill(self) -> &'static str {
        match self {
            Self::Ok => "#00FF00",
            Self::Fault => "#FF0000",
            Self::Unknown => "gray",
        }
    }

    /// Only lamps with a known reading pulse.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A single lamp on an indicator plate.
#[derive(Debug, Clone)]
pub struct Lamp<'a> {
    /// Group id, e.g. `fuse-fan1`.
    pub group_id: &'a str,
    /// Signal name the behavior script looks up as `status-<signal>`.
    pub signal: &'a str,
    pub cx: f64,
    pub state: LampState,
}

fn lamp_disc(group: &mut Node, lamp: &Lamp<'_>) {
    emit(
        group,
        "circle",
        attrs!["cx" => lamp.cx, "cy" => LAMP_Y, "r" => LAMP_RIM_RADIUS, "fill" => "black"],
        None,
    );
    let id = format!("status-{}", lamp.signal);
    if lamp.state.is_active() {
        emit(
            group,
            "circle",
            attrs![
                "id" => id,
                "cx" => lamp.cx,
                "cy" => LAMP_Y,
                "r" => LAMP_RADIUS,
                "fill" => lamp.state.fill(),
                "class" => "status-active",
            ],
            None,
        );
    } else {
        emit(
            group,
            "circle",
            attrs![
                "id" => id,
                "cx" => lamp.cx,
                "cy" => LAMP_Y,
                "r" => LAMP_RADIUS,
                "fill" => lamp.state.fill(),
            ],
            None,
        );
    }
}

/// Plate drawn behind a group of lamps.
#[derive(Debug, Clone, Copy)]
pub struct Plate {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub fn plate(parent: &mut Node, p: Plate) {
    emit(
        parent,
        "rect",
        attrs![
            "x" => p.x,
            "y" => p.y,
            "width" => p.width,
            "height" => p.height,
            "rx" => 5,
            "ry" => 5,
            "fill" => "silver",
            "stroke" => "black",
            "stroke-width" => 1,
        ],
        None,
    );
}

/// Fuse lamp: disc with a cartridge symbol across it. An optional plate is drawn first.
pub fn build_fuse(parent: &mut Node, lamp: &Lamp<'_>, backing: Option<Plate>) {
    tracing::debug!(signal = lamp.signal, state = ?lamp.state, "building fuse lamp");
    let group = emit(parent, "g", attrs!["id" => lamp.group_id], None);
    if let Some(p) = backing {
        plate(group, p);
    }
    lamp_disc(group, lamp);
    emit(
        group,
        "rect",
        attrs![
            "x" => lamp.cx - 1.5,
            "y" => LAMP_Y - 1.0,
            "width" => 3,
            "height" => 2,
            "fill" => "transparent",
            "stroke" => "black",
            "stroke-width" => 0.5,
        ],
        None,
    );
    emit(
        group,
        "line",
        attrs![
            "x1" => lamp.cx - 2.5,
            "y1" => LAMP_Y,
            "x2" => lamp.cx + 2.5,
            "y2" => LAMP_Y,
            "stroke" => "black",
            "stroke-width" => 0.5,
        ],
        None,
    );
}

/// Feedback lamp: disc with a circular arrow in its lower right.
pub fn build_feedback(parent: &mut Node, lamp: &Lamp<'_>) {
    tracing::debug!(signal = lamp.signal, state = ?lamp.state, "building feedback lamp");
    let group = emit(parent, "g", attrs!["id" => lamp.group_id], None);
    lamp_disc(group, lamp);

    let tip_x = lamp.cx + 2.0;
    let head = format!(
        "M {} {} L {} {} L {} {} Z",
        fmt_trim3(tip_x),
        fmt_trim3(LAMP_Y - 1.0),
        fmt_trim3(tip_x - 0.5),
        fmt_trim3(LAMP_Y),
        fmt_trim3(tip_x + 0.5),
        fmt_trim3(LAMP_Y)
    );
    emit(group, "path", attrs!["d" => head, "fill" => "black"], None);

    let loop_d = format!(
        "M {} {} A 2 2 0 1 1 {} {}",
        fmt_trim3(tip_x),
        fmt_trim3(LAMP_Y),
        fmt_trim3(lamp.cx + 1.732),
        fmt_trim3(LAMP_Y - 1.0)
    );
    emit(
        group,
        "path",
        attrs![
            "d" => loop_d,
            "stroke" => "black",
            "fill" => "none",
            "stroke-width" => 0.5,
        ],
        None,
    );
}

/// Central "SYSTEM" plate with the no-errors disc and check mark.
pub fn build_system_indicator(parent: &mut Node, disc_center: Point) {
    let group = emit(parent, "g", attrs!["id" => "system-indicator"], None);
    emit(
        group,
        "rect",
        attrs![
            "x" => 15.4,
            "y" => -37.9,
            "width" => 49.5,
            "height" => 100,
            "rx" => 5,
            "ry" => 5,
            "fill" => "silver",
            "stroke" => "silver",
            "stroke-width" => 1,
        ],
        None,
    );
    emit(
        group,
        "text",
        attrs!["x" => 32, "y" => 36, "class" => "fan-label"],
        Some("SYSTEM"),
    );
    emit(
        group,
        "circle",
        attrs![
            "cx" => disc_center.x,
            "cy" => disc_center.y,
            "r" => 8,
            "fill" => "white",
            "stroke" => "black",
            "stroke-width" => 1,
            "id" => "no-errors-bg",
        ],
        None,
    );
    emit(
        group,
        "circle",
        attrs![
            "cx" => disc_center.x,
            "cy" => disc_center.y,
            "r" => 8,
            "fill" => "green",
            "class" => "status-active",
            "id" => "no-errors-disc",
        ],
        None,
    );
    emit(
        group,
        "text",
        attrs![
            "x" => disc_center.x,
            "y" => disc_center.y + 1.0,
            "text-anchor" => "middle",
            "dominant-baseline" => "middle",
            "font-size" => 10,
            "font-weight" => "bold",
            "id" => "no-errors-symbol",
        ],
        Some("\u{2713}"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp(state: LampState) -> Lamp<'static> {
        Lamp {
            group_id: "feedback-k1",
            signal: "Feedback_K1",
            cx: 20.0,
            state,
        }
    }

    #[test]
    fn feedback_glyph_matches_hand_authored_paths() {
        let mut root = Node::new("g");
        build_feedback(&mut root, &lamp(LampState::Ok));
        let g = &root.children[0];
        let paths: Vec<&str> = g.children_by_tag("path").filter_map(|p| p.attr("d")).collect();
        assert_eq!(
            paths,
            ["M 22 70 L 21.5 71 L 22.5 71 Z", "M 22 71 A 2 2 0 1 1 21.732 70"]
        );
    }

    #[test]
    fn unknown_lamp_is_gray_without_class() {
        let mut root = Node::new("g");
        build_feedback(&mut root, &lamp(LampState::Unknown));
        let disc = root.find_by_id("status-Feedback_K1").expect("lamp");
        assert_eq!(disc.attr("fill"), Some("gray"));
        assert_eq!(disc.attr("class"), None);
    }

    #[test]
    fn fault_lamp_is_red_and_active() {
        let mut root = Node::new("g");
        build_fuse(&mut root, &lamp(LampState::Fault), None);
        let disc = root.find_by_id("status-Feedback_K1").expect("lamp");
        assert_eq!(disc.attr("fill"), Some("#FF0000"));
        assert!(disc.has_class("status-active"));
    }
}
