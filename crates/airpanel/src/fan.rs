//! Rotating fan assembly: disks, blades, power indicator and hour counter labels.

use crate::attrs;
use crate::fmt::fmt;
use crate::geom::{Point, arc_path, large_arc_flag, normalize_sweep, point, point_on_circle};
use crate::node::{Node, emit};

const BLADE_COUNT: usize = 5;
const BLADE_HALF_WIDTH: f64 = 0.3;
const BLADE_INNER_RADIUS: f64 = 2.0;
const BLADE_OUTER_RADIUS: f64 = 10.5;

const BG_DISK_RADIUS: f64 = 11.0;
const ANIMATED_DISK_RADIUS: f64 = 10.0;
const INTERMEDIATE_DISK_RADIUS: f64 = 6.0;
const ROTOR_DISK_RADIUS: f64 = 5.0;

const POWER_ARC_FROM_DEG: f64 = -45.0;
const POWER_ARC_TO_DEG: f64 = -135.0;

const LABEL_OFFSET_Y: f64 = 25.0;
const HOURS_PLACEHOLDER: &str = "000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    On,
    #[default]
    Off,
}

/// Which name plate a fan carries; also decides the id of its hour counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanLabel {
    Fan1,
    Fan2,
    #[default]
    Generic,
}

impl FanLabel {
    pub fn text(self) -> &'static str {
        match self {
            Self::Fan1 => "FAN1",
            Self::Fan2 => "FAN2",
            Self::Generic => "FAN",
        }
    }

    pub fn hours_id(self) -> String {
        format!("{}-hours", self.text().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone)]
pub struct FanSpec<'a> {
    /// Top-left corner of the fan's bounding square.
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub stroke_width: f64,
    pub id: &'a str,
    pub label: FanLabel,
    pub state: PowerState,
}

impl FanSpec<'_> {
    pub fn center(&self) -> Point {
        point(self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// Emits the fan group under `parent`, followed by its three sibling labels.
///
/// Sizes are not validated; zero or negative values give degenerate geometry.
pub fn build_fan(parent: &mut Node, spec: &FanSpec<'_>) {
    let c = spec.center();
    tracing::debug!(id = spec.id, state = ?spec.state, "building fan");

    let group = match spec.state {
        PowerState::On => emit(parent, "g", attrs!["id" => spec.id, "class" => "power-on"], None),
        PowerState::Off => emit(parent, "g", attrs!["id" => spec.id], None),
    };

    emit(
        group,
        "circle",
        attrs!["class" => "power-bg-disk", "cx" => c.x, "cy" => c.y, "r" => BG_DISK_RADIUS],
        None,
    );
    emit(
        group,
        "circle",
        attrs!["class" => "bg-animated-disk", "cx" => c.x, "cy" => c.y, "r" => ANIMATED_DISK_RADIUS],
        None,
    );

    let blades = emit(group, "g", attrs!["class" => "fan-blades"], None);
    for i in 0..BLADE_COUNT {
        let angle = (i as f64 * 360.0 / BLADE_COUNT as f64).to_radians();
        let d = blade_path(c, angle);
        emit(blades, "path", attrs!["d" => d, "class" => "fan-blade"], None);
    }

    emit(
        group,
        "circle",
        attrs!["class" => "intermediate-disk", "cx" => c.x, "cy" => c.y, "r" => INTERMEDIATE_DISK_RADIUS],
        None,
    );
    emit(
        group,
        "circle",
        attrs!["class" => "rotor-disk", "cx" => c.x, "cy" => c.y, "r" => ROTOR_DISK_RADIUS],
        None,
    );

    let sw = spec.stroke_width;
    emit(
        group,
        "rect",
        attrs![
            "class" => "power-line",
            "x" => c.x - sw / 2.0,
            "y" => spec.y,
            "width" => sw,
            "height" => spec.size / 2.0,
            "rx" => sw / 2.0,
        ],
        None,
    );

    let from = POWER_ARC_FROM_DEG.to_radians();
    let to = normalize_sweep(from, POWER_ARC_TO_DEG.to_radians());
    let arc_radius = spec.size / 2.0 - sw / 2.0;
    let d = arc_path(c, arc_radius, from, to, large_arc_flag(to - from), 1);
    emit(group, "path", attrs!["class" => "power-arc", "d" => d], None);

    let label_y = c.y - LABEL_OFFSET_Y;
    emit(
        parent,
        "text",
        attrs![
            "x" => c.x,
            "y" => label_y,
            "class" => "fan-label",
            "text-anchor" => "middle",
            "dominant-baseline" => "middle",
        ],
        Some(spec.label.text()),
    );
    emit(
        parent,
        "text",
        attrs![
            "x" => c.x,
            "y" => label_y + 6.0,
            "class" => "fan-units",
            "text-anchor" => "middle",
            "dominant-baseline" => "middle",
        ],
        Some("Hours"),
    );
    emit(
        parent,
        "text",
        attrs![
            "id" => spec.label.hours_id(),
            "x" => c.x,
            "y" => label_y + 10.0,
            "class" => "fan-number",
            "text-anchor" => "middle",
            "dominant-baseline" => "middle",
        ],
        Some(HOURS_PLACEHOLDER),
    );
}

/// Trapezoid between the hub and the rim, `BLADE_HALF_WIDTH` either side of `angle`.
fn blade_path(c: Point, angle: f64) -> String {
    let a0 = angle - BLADE_HALF_WIDTH;
    let a1 = angle + BLADE_HALF_WIDTH;
    let p1 = point_on_circle(c, BLADE_INNER_RADIUS, a0);
    let p2 = point_on_circle(c, BLADE_OUTER_RADIUS, a0);
    let p3 = point_on_circle(c, BLADE_OUTER_RADIUS, a1);
    let p4 = point_on_circle(c, BLADE_INNER_RADIUS, a1);
    format!(
        "M {} {} L {} {} L {} {} L {} {} Z",
        fmt(p1.x),
        fmt(p1.y),
        fmt(p2.x),
        fmt(p2.y),
        fmt(p3.x),
        fmt(p3.y),
        fmt(p4.x),
        fmt(p4.y)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(state: PowerState) -> FanSpec<'static> {
        FanSpec {
            x: 10.0,
            y: 50.0,
            size: 10.0,
            stroke_width: 0.75,
            id: "power-fan1",
            label: FanLabel::Fan1,
            state,
        }
    }

    #[test]
    fn hours_id_is_lowercased_label() {
        assert_eq!(FanLabel::Fan1.hours_id(), "fan1-hours");
        assert_eq!(FanLabel::Fan2.hours_id(), "fan2-hours");
        assert_eq!(FanLabel::Generic.hours_id(), "fan-hours");
    }

    #[test]
    fn power_line_is_sized_to_stroke() {
        let mut root = Node::new("g");
        build_fan(&mut root, &spec(PowerState::Off));
        let line = root
            .descendants()
            .find(|n| n.has_class("power-line"))
            .expect("power line");
        assert_eq!(line.attr("x"), Some("14.625"));
        assert_eq!(line.attr("width"), Some("0.75"));
        assert_eq!(line.attr("height"), Some("5"));
        assert_eq!(line.attr("rx"), Some("0.375"));
    }

    #[test]
    fn power_arc_takes_the_long_way_round() {
        let mut root = Node::new("g");
        build_fan(&mut root, &spec(PowerState::On));
        let arc = root
            .descendants()
            .find(|n| n.has_class("power-arc"))
            .expect("power arc");
        let d = arc.attr("d").unwrap_or_default();
        assert!(d.contains(" A 4.625 4.625 0 1 1 "), "{d}");
    }

    #[test]
    fn off_fan_has_no_class() {
        let mut root = Node::new("g");
        build_fan(&mut root, &spec(PowerState::Off));
        assert_eq!(root.children[0].attr("class"), None);
    }
}
