//! Gauge faces.
//!
//! Two variants share one layout skeleton: backing sector, main arc, an empty value arc that the
//! behavior script fills at runtime, mirrored ticks with tangential labels, an indicator
//! placeholder and the value/unit readout. The segmented variant adds colored bands with curved
//! labels, a set-point label and a hidden low-pressure glyph.

use crate::attrs;
use crate::fmt::fmt;
use crate::geom::{
    Point, arc_path, large_arc_flag, mirrored_point_on_circle, sector_path,
    tangent_rotation_degrees,
};
use crate::node::{Node, emit};
use std::f64::consts::PI;

const GAUGE_RADIUS: f64 = 15.0;
const MAJOR_TICK_INNER: f64 = GAUGE_RADIUS - 4.0;
const MAJOR_TICK_OUTER: f64 = GAUGE_RADIUS - 2.0;
const MINOR_TICK_OUTER: f64 = GAUGE_RADIUS - 3.0;
const TICK_LABEL_RADIUS: f64 = GAUGE_RADIUS + 3.0;

/// Angle both backing sectors start from before they are widened.
const DISK_BASE_DEG: f64 = 22.5;

const BAND_RADIUS: f64 = 30.0;
const BAND_STROKE_WIDTH: &str = "11";
/// Band boundaries are authored against this full-scale value.
const BAND_SCALE: f64 = 500.0;

pub const RPM_MAX: f64 = 4000.0;
pub const PRESSURE_MAX: f64 = 500.0;

/// Start and end angle of a gauge face, in the unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub start: f64,
    pub end: f64,
}

impl Sweep {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Angle of a value given as a fraction of full scale.
    pub fn angle_at(&self, ratio: f64) -> f64 {
        self.start + ratio * self.span()
    }
}

/// Half turn, left to right.
pub fn simple_sweep() -> Sweep {
    Sweep {
        start: 0.0,
        end: PI,
    }
}

/// Half turn widened by 24.5° on each side.
pub fn segmented_sweep() -> Sweep {
    Sweep {
        start: -24.5_f64.to_radians(),
        end: PI + 24.5_f64.to_radians(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaugeKind {
    /// Speed style: half-turn sweep, major ticks only.
    #[default]
    Simple,
    /// Pressure style: wide sweep with colored bands.
    Segmented,
}

#[derive(Debug, Clone)]
pub struct GaugeSpec<'a> {
    pub center: Point,
    pub id: &'a str,
    pub max_value: f64,
}

pub fn build_gauge(parent: &mut Node, kind: GaugeKind, spec: &GaugeSpec<'_>) {
    match kind {
        GaugeKind::Simple => build_simple_gauge(parent, spec),
        GaugeKind::Segmented => build_segmented_gauge(parent, spec),
    }
}

/// A major tick and its label, both already mirrored through the gauge center.
#[derive(Debug, Clone, PartialEq)]
pub struct MajorTick {
    pub inner: Point,
    pub outer: Point,
    pub label_at: Point,
    pub label_rotation: f64,
    pub value: i64,
}

pub fn major_ticks(center: Point, sweep: Sweep, intervals: usize, max_value: f64) -> Vec<MajorTick> {
    (0..=intervals)
        .map(|i| {
            let angle = sweep.start + (i as f64 * sweep.span()) / intervals as f64;
            let label_at = mirrored_point_on_circle(center, TICK_LABEL_RADIUS, angle);
            MajorTick {
                inner: mirrored_point_on_circle(center, MAJOR_TICK_INNER, angle),
                outer: mirrored_point_on_circle(center, MAJOR_TICK_OUTER, angle),
                label_at,
                label_rotation: tangent_rotation_degrees(label_at, center),
                value: ((i as f64 * max_value) / intervals as f64).trunc() as i64,
            }
        })
        .collect()
}

/// Short ticks halfway between the major ones.
pub fn minor_ticks(center: Point, sweep: Sweep, intervals: usize) -> Vec<(Point, Point)> {
    (0..intervals)
        .map(|i| {
            let pos = i as f64 + 0.5;
            let angle = sweep.start + (pos * sweep.span()) / intervals as f64;
            (
                mirrored_point_on_circle(center, MAJOR_TICK_INNER, angle),
                mirrored_point_on_circle(center, MINOR_TICK_OUTER, angle),
            )
        })
        .collect()
}

/// Curved caption riding on an invisible guide arc next to a band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandLabel {
    /// Id fragment shared by the guide path and the label (`low`, `normal`, `high`).
    pub key: &'static str,
    pub caption: &'static str,
    /// Value printed after the caption, as a fraction of full scale.
    pub value_ratio: f64,
    /// Guide arc radius relative to the band radius.
    pub radius_offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    pub start: f64,
    pub end: f64,
    pub radius: f64,
    pub color: &'static str,
    pub id_suffix: &'static str,
    pub label: Option<BandLabel>,
}

impl ArcSegment {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

struct BandDef {
    from: f64,
    to: f64,
    color: &'static str,
    id_suffix: &'static str,
    label: Option<BandLabel>,
}

// Emission order of the reference document, not value order.
const BANDS: [BandDef; 4] = [
    BandDef {
        from: 100.0,
        to: 150.0,
        color: "yellow",
        id_suffix: "yellow-low-arc",
        label: None,
    },
    BandDef {
        from: 0.0,
        to: 100.0,
        color: "red",
        id_suffix: "low-arc",
        label: Some(BandLabel {
            key: "low",
            caption: "LOW",
            value_ratio: 100.0 / BAND_SCALE,
            radius_offset: -2.0,
        }),
    },
    BandDef {
        from: 150.0,
        to: 350.0,
        color: "green",
        id_suffix: "green-arc",
        label: Some(BandLabel {
            key: "normal",
            caption: "NORMAL",
            value_ratio: 250.0 / BAND_SCALE,
            radius_offset: 1.0,
        }),
    },
    BandDef {
        from: 350.0,
        to: 500.0,
        color: "yellow",
        id_suffix: "yellow-high-arc",
        label: Some(BandLabel {
            key: "high",
            caption: "HIGH",
            value_ratio: 350.0 / BAND_SCALE,
            radius_offset: -2.0,
        }),
    },
];

const SET_POINT_FROM: f64 = 200.0;
const SET_POINT_TO: f64 = 300.0;
const SET_POINT_RADIUS_OFFSET: f64 = -4.5;

/// Colored bands of a segmented face, partitioning the whole sweep without gaps.
pub fn colored_bands(sweep: Sweep) -> Vec<ArcSegment> {
    BANDS
        .iter()
        .map(|b| ArcSegment {
            start: sweep.angle_at(b.from / BAND_SCALE),
            end: sweep.angle_at(b.to / BAND_SCALE),
            radius: BAND_RADIUS,
            color: b.color,
            id_suffix: b.id_suffix,
            label: b.label.clone(),
        })
        .collect()
}

pub fn build_simple_gauge(parent: &mut Node, spec: &GaugeSpec<'_>) {
    tracing::debug!(id = spec.id, "building simple gauge");
    let sweep = simple_sweep();
    let c = spec.center;
    let group = gauge_group(parent, "rpm-gauge", spec);

    backing_disk(group, spec, 22.5, 40.0);
    main_arc(group, c, sweep);
    value_arc(group, spec.id);
    emit_major_ticks(group, &major_ticks(c, sweep, 4, spec.max_value));
    indicator(group, spec.id, "rpm-indicator");

    emit(
        group,
        "text",
        readout_attrs(Some(format!("{}-value", spec.id).as_str()), c.x, c.y + 3.75, "rpm-value"),
        Some("0"),
    );
    emit(
        group,
        "text",
        readout_attrs(None, c.x, c.y + 7.5, "rpm-unit"),
        Some("RPM"),
    );
}

pub fn build_segmented_gauge(parent: &mut Node, spec: &GaugeSpec<'_>) {
    tracing::debug!(id = spec.id, "building segmented gauge");
    let sweep = segmented_sweep();
    let c = spec.center;
    let id = spec.id;
    let group = gauge_group(parent, "pressure-gauge", spec);

    backing_disk(group, spec, 36.5, 57.5);
    main_arc(group, c, sweep);
    value_arc(group, id);

    let bands = colored_bands(sweep);
    for band in &bands {
        let (from, to) = (band.start + PI, band.end + PI);
        let large = large_arc_flag(band.span());
        emit(
            group,
            "path",
            attrs![
                "d" => arc_path(c, band.radius, from, to, large, 1),
                "stroke" => band.color,
                "stroke-width" => BAND_STROKE_WIDTH,
                "fill" => "none",
                "stroke-linecap" => "round",
                "id" => format!("{id}-{}", band.id_suffix),
            ],
            None,
        );
        if let Some(label) = &band.label {
            let d = arc_path(c, band.radius + label.radius_offset, from, to, large, 1);
            guide_path(group, id, label.key, d);
        }
    }

    let labelled: Vec<&BandLabel> = bands.iter().filter_map(|b| b.label.as_ref()).collect();
    let set_from = sweep.angle_at(SET_POINT_FROM / BAND_SCALE) + PI;
    let set_to = sweep.angle_at(SET_POINT_TO / BAND_SCALE) + PI;
    let set_guide = arc_path(
        c,
        BAND_RADIUS + SET_POINT_RADIUS_OFFSET,
        set_from,
        set_to,
        large_arc_flag(set_to - set_from),
        1,
    );
    band_captions(group, id, &labelled, set_guide, spec.max_value);

    emit_major_ticks(group, &major_ticks(c, sweep, 5, spec.max_value));
    for (inner, outer) in minor_ticks(c, sweep, 5) {
        tick_line(group, inner, outer);
    }

    indicator(group, id, "pressure-indicator");
    emit(
        group,
        "text",
        readout_attrs(Some(format!("{id}-value").as_str()), c.x, c.y + 5.25, "rpm-value"),
        Some("0"),
    );
    emit(
        group,
        "text",
        readout_attrs(None, c.x, c.y - 0.5, "pressure-unit"),
        Some("Pa"),
    );

    low_pressure_glyph(group, id, c);
}

fn gauge_group<'a>(parent: &'a mut Node, class: &str, spec: &GaugeSpec<'_>) -> &'a mut Node {
    emit(
        parent,
        "g",
        attrs![
            "class" => class,
            "id" => spec.id,
            "data-cx" => spec.center.x,
            "data-cy" => spec.center.y,
        ],
        None,
    )
}

/// Sector behind the face, widened by `expand_deg` past the base angles on each side.
fn backing_disk(group: &mut Node, spec: &GaugeSpec<'_>, radius: f64, expand_deg: f64) {
    let expand = expand_deg.to_radians();
    let start = PI + DISK_BASE_DEG.to_radians() - expand;
    let end = -DISK_BASE_DEG.to_radians() + expand;
    emit(
        group,
        "path",
        attrs![
            "id" => format!("{}-disk-path", spec.id),
            "d" => sector_path(spec.center, radius, start, end),
            "fill" => "url(#disk-gradient)",
            "class" => "gauge-disk",
        ],
        None,
    );
}

fn main_arc(group: &mut Node, c: Point, sweep: Sweep) {
    let d = arc_path(
        c,
        GAUGE_RADIUS,
        sweep.start + PI,
        sweep.end + PI,
        large_arc_flag(sweep.span()),
        1,
    );
    emit(group, "path", attrs!["d" => d, "class" => "gauge-arc"], None);
}

fn value_arc(group: &mut Node, id: &str) {
    emit(
        group,
        "path",
        attrs!["id" => format!("{id}-value-arc"), "class" => "gauge-value-arc"],
        None,
    );
}

fn tick_line(group: &mut Node, inner: Point, outer: Point) {
    emit(
        group,
        "line",
        attrs![
            "x1" => inner.x,
            "y1" => inner.y,
            "x2" => outer.x,
            "y2" => outer.y,
            "class" => "gauge-tick",
        ],
        None,
    );
}

fn emit_major_ticks(group: &mut Node, ticks: &[MajorTick]) {
    for tick in ticks {
        tick_line(group, tick.inner, tick.outer);
        let p = tick.label_at;
        let transform = format!(
            "rotate({}, {}, {})",
            fmt(tick.label_rotation),
            fmt(p.x),
            fmt(p.y)
        );
        emit(
            group,
            "text",
            attrs![
                "x" => p.x,
                "y" => p.y,
                "class" => "gauge-label",
                "text-anchor" => "middle",
                "dominant-baseline" => "middle",
                "transform" => transform,
            ],
            Some(tick.value.to_string().as_str()),
        );
    }
}

fn indicator(group: &mut Node, id: &str, class: &str) {
    let g = emit(group, "g", attrs!["class" => class], None);
    emit(
        g,
        "polygon",
        attrs![
            "id" => format!("{id}-indicator"),
            "points" => "0,0 0,0 0,0",
            "class" => "gauge-indicator",
        ],
        None,
    );
}

fn readout_attrs(id: Option<&str>, x: f64, y: f64, class: &str) -> crate::node::Attrs {
    let mut a = crate::node::Attrs::new();
    if let Some(id) = id {
        a.push("id", id);
    }
    a.push("x", &x);
    a.push("y", &y);
    a.push("class", class);
    a.push("text-anchor", "middle");
    a.push("dominant-baseline", "middle");
    a
}

fn guide_path(group: &mut Node, id: &str, key: &str, d: String) {
    emit(
        group,
        "path",
        attrs![
            "d" => d,
            "id" => format!("{id}-{key}-text-path"),
            "opacity" => "0",
        ],
        None,
    );
}

fn curved_label(group: &mut Node, id: &str, key: &str, caption: &str) {
    let text = emit(
        group,
        "text",
        attrs!["fill" => "black", "font-size" => "4px"],
        None,
    );
    emit(
        text,
        "textPath",
        attrs![
            "href" => format!("#{id}-{key}-text-path"),
            "startOffset" => "50%",
            "text-anchor" => "middle",
            "id" => format!("{id}-{key}-label"),
        ],
        Some(caption),
    );
}

/// Band captions with the set-point caption slotted in before the last band's.
fn band_captions(
    group: &mut Node,
    id: &str,
    labelled: &[&BandLabel],
    set_guide: String,
    max_value: f64,
) {
    let split = labelled.split_last();
    if let Some((_, leading)) = split {
        for label in leading {
            curved_label(group, id, label.key, &band_caption(label, max_value));
        }
    }

    guide_path(group, id, "set", set_guide);
    let set_value = (0.5 * max_value).trunc() as i64;
    curved_label(group, id, "set", &format!("SET {set_value}"));

    if let Some((last, _)) = split {
        curved_label(group, id, last.key, &band_caption(last, max_value));
    }
}

fn band_caption(label: &BandLabel, max_value: f64) -> String {
    let value = (label.value_ratio * max_value).round() as i64;
    format!("{} {value}", label.caption)
}

/// Two wavy arrows against a scale, hidden until the behavior script reveals it.
fn low_pressure_glyph(group: &mut Node, id: &str, c: Point) {
    let g = emit(
        group,
        "g",
        attrs![
            "class" => "low-pressure-indicator",
            "id" => format!("{id}-low-pressure-indicator"),
            "transform" => format!("translate({}, {}) scale(0.5)", fmt(c.x - 3.5), fmt(c.y - 10.5)),
            "opacity" => "0",
        ],
        None,
    );
    for d in [
        "M 4 2 C 3 4, 5 6, 4 8 C 3 10, 5 12, 4 14",
        "M 7 2 C 6 4, 8 6, 7 8 C 6 10, 8 12, 7 14",
    ] {
        emit(
            g,
            "path",
            attrs![
                "d" => d,
                "marker-end" => "url(#arrowhead)",
                "stroke" => "black",
                "stroke-width" => "1",
                "fill" => "none",
            ],
            None,
        );
    }
    emit(
        g,
        "line",
        attrs![
            "x1" => "11.5",
            "y1" => "2",
            "x2" => "11.5",
            "y2" => "14",
            "stroke" => "black",
            "stroke-width" => "1",
        ],
        None,
    );
    for y in [2, 5, 8, 11, 14] {
        emit(
            g,
            "line",
            attrs![
                "x1" => "9.5",
                "y1" => y,
                "x2" => "11.5",
                "y2" => y,
                "stroke" => "black",
                "stroke-width" => "1",
            ],
            None,
        );
    }
}
