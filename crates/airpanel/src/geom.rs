//! Circle and arc math shared by every component builder.
//!
//! Angles are radians, `0` points along `+x` and grow clockwise because the view is y-down.

use crate::fmt::{fmt, fmt_fixed3_into, fmt_into};
use std::f64::consts::{PI, TAU};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    point(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Moves `end` forward by whole turns until it is not behind `start`.
///
/// Closed form, so arbitrarily large gaps cost the same as small ones. Non-finite input is
/// returned unchanged.
pub fn normalize_sweep(start: f64, end: f64) -> f64 {
    if !(start.is_finite() && end.is_finite()) || end >= start {
        return end;
    }
    // rem_euclid is never negative, so the result never lands behind `start`
    start + (end - start).rem_euclid(TAU)
}

/// SVG `large-arc-flag` for an angular span swept in either direction.
pub fn large_arc_flag(span: f64) -> u8 {
    u8::from(span.abs() > PI)
}

/// Reflects `p` through `center`.
pub fn mirror_through(center: Point, p: Point) -> Point {
    point(2.0 * center.x - p.x, 2.0 * center.y - p.y)
}

/// Gauge ticks and their labels sit on the opposite side of the face from the raw angle.
pub fn mirrored_point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    mirror_through(center, point_on_circle(center, radius, angle))
}

/// Degrees that turn a label placed at `label` so it reads along the circle instead of
/// pointing away from `center`.
pub fn tangent_rotation_degrees(label: Point, center: Point) -> f64 {
    radial_angle_degrees(label, center) + 90.0
}

pub fn radial_angle_degrees(p: Point, center: Point) -> f64 {
    let v: Vector = p - center;
    v.y.atan2(v.x).to_degrees()
}

/// `M x0 y0 A r r 0 large sweep x1 y1` between two points of a circle.
pub fn arc_path(
    center: Point,
    radius: f64,
    start: f64,
    end: f64,
    large_arc: u8,
    sweep: u8,
) -> String {
    let mut d = String::from("M ");
    push_arc_tail(&mut d, center, radius, start, end, large_arc, sweep);
    d
}

/// `x0 y0 A r r 0 large sweep x1 y1`, shared by open arcs and closed sectors.
fn push_arc_tail(
    d: &mut String,
    center: Point,
    radius: f64,
    start: f64,
    end: f64,
    large_arc: u8,
    sweep: u8,
) {
    let from = point_on_circle(center, radius, start);
    let to = point_on_circle(center, radius, end);
    fmt_fixed3_into(d, from.x);
    d.push(' ');
    fmt_fixed3_into(d, from.y);
    d.push_str(" A ");
    d.push_str(&fmt(radius));
    d.push(' ');
    d.push_str(&fmt(radius));
    d.push_str(&format!(" 0 {large_arc} {sweep} "));
    fmt_fixed3_into(d, to.x);
    d.push(' ');
    fmt_fixed3_into(d, to.y);
}

/// Closed pie sector from `start` clockwise to `end`, wrapping `end` forward if needed.
pub fn sector_path(center: Point, radius: f64, start: f64, end: f64) -> String {
    let end = normalize_sweep(start, end);
    let large_arc = large_arc_flag(end - start);
    let mut d = String::from("M ");
    fmt_into(&mut d, center.x);
    d.push(' ');
    fmt_into(&mut d, center.y);
    d.push_str(" L ");
    push_arc_tail(&mut d, center, radius, start, end, large_arc, 1);
    d.push_str(" Z");
    d
}
