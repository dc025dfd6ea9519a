//! Exhaust plumes and the starfield.
//!
//! Placement is random, so every builder takes the generator explicitly. Seed it
//! (`StdRng::seed_from_u64`) to get reproducible documents.

use crate::attrs;
use crate::fmt::fmt;
use crate::geom::{Point, point};
use crate::node::{Node, emit};
use rand::Rng;

const PLUME_JITTER_X: f64 = 4.0;
const PLUME_JITTER_Y: f64 = 2.0;
const PLUME_PARTICLE_RADIUS: &str = "2";

const STREAK_FROM_Y: f64 = -50.0;
const STREAK_TO_Y: f64 = 110.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Negative, in `[-duration, 0)`, so particles start mid-animation.
    pub delay: f64,
    pub duration: f64,
}

pub fn exhaust_particles<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    count: usize,
    duration: f64,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let x = center.x + (unit(rng) - 0.5) * PLUME_JITTER_X;
            let y = center.y + (unit(rng) - 0.5) * PLUME_JITTER_Y;
            let delay = -(duration * (1.0 - unit(rng)));
            Particle {
                position: point(x, y),
                delay,
                duration,
            }
        })
        .collect()
}

pub fn build_exhaust<R: Rng + ?Sized>(
    parent: &mut Node,
    center: Point,
    count: usize,
    duration: f64,
    rng: &mut R,
) {
    tracing::debug!(count, duration, "building exhaust plume");
    for p in exhaust_particles(rng, center, count, duration) {
        emit(
            parent,
            "circle",
            attrs![
                "class" => "plume-particle",
                "cx" => p.position.x,
                "cy" => p.position.y,
                "r" => PLUME_PARTICLE_RADIUS,
                "style" => format!(
                    "animation-delay: {}s; animation-duration: {}s;",
                    fmt(p.delay),
                    fmt(p.duration)
                ),
            ],
            None,
        );
    }
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// One falling line of the starfield.
#[derive(Debug, Clone, PartialEq)]
pub struct Streak {
    pub x: f64,
    pub length: f64,
    pub duration: f64,
    pub delay: f64,
    pub thickness: f64,
    pub opacity: f64,
}

pub fn starfield_streaks<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Streak> {
    (0..count)
        .map(|_| Streak {
            x: unit(rng) * 100.0,
            length: unit(rng) * 2.0 + 0.5,
            duration: unit(rng) * 3.0 + 2.0,
            delay: unit(rng) * 5.0,
            thickness: unit(rng) * 0.3 + 0.1,
            opacity: unit(rng) * 0.5 + 0.3,
        })
        .collect()
}

pub fn build_starfield<R: Rng + ?Sized>(parent: &mut Node, count: usize, rng: &mut R) {
    tracing::debug!(count, "building starfield");
    for s in starfield_streaks(rng, count) {
        let line = emit(
            parent,
            "line",
            attrs![
                "x1" => s.x,
                "x2" => s.x,
                "stroke" => "white",
                "stroke-width" => s.thickness,
                "opacity" => s.opacity,
            ],
            None,
        );
        let dur = format!("{}s", fmt(s.duration));
        let begin = format!("{}s", fmt(s.delay));
        for (attr, offset) in [("y1", 0.0), ("y2", s.length)] {
            emit(
                line,
                "animate",
                attrs![
                    "attributeName" => attr,
                    "from" => STREAK_FROM_Y + offset,
                    "to" => STREAK_TO_Y + offset,
                    "dur" => dur,
                    "begin" => begin,
                    "repeatCount" => "indefinite",
                ],
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn exhaust_delays_are_negative_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        for p in exhaust_particles(&mut rng, point(40.0, 78.0), 500, 3.0) {
            assert!(p.delay >= -3.0 && p.delay < 0.0, "{}", p.delay);
            assert!((p.position.x - 40.0).abs() <= 2.0);
            assert!((p.position.y - 78.0).abs() <= 1.0);
        }
    }

    #[test]
    fn streak_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for s in starfield_streaks(&mut rng, 200) {
            assert!((0.0..100.0).contains(&s.x));
            assert!((0.5..2.5).contains(&s.length));
            assert!((2.0..5.0).contains(&s.duration));
            assert!((0.0..5.0).contains(&s.delay));
            assert!((0.1..0.4).contains(&s.thickness));
            assert!((0.3..0.8).contains(&s.opacity));
        }
    }
}
