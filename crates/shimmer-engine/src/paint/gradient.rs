use crate::coords::Vec2;

use super::Color;

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient definition in pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - Stops define premultiplied linear colors and are kept sorted by `t`.
/// - `spread` defines out-of-range behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, mut stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        stops.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self {
            start,
            end,
            stops,
            spread,
        }
    }

    /// Left-to-right ramp spanning `width` pixels with evenly spaced stops.
    pub fn horizontal(width: f32, colors: &[Color]) -> Self {
        let n = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| ColorStop::new(i as f32 / n, *c))
            .collect();
        Self::new(Vec2::zero(), Vec2::new(width, 0.0), stops, SpreadMode::Pad)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }

    /// Color at pixel position `p`, projected onto the gradient axis.
    pub fn color_at(&self, p: Vec2) -> Color {
        let axis = self.end - self.start;
        let len2 = axis.dot(axis);
        if len2 <= f32::EPSILON {
            return self.stops.first().map_or(Color::transparent(), |s| s.color);
        }
        self.sample((p - self.start).dot(axis) / len2)
    }

    /// Color at gradient parameter `t` after applying the spread mode.
    pub fn sample(&self, t: f32) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::transparent();
        };

        let t = match self.spread {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t.rem_euclid(1.0),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        };

        if t <= first.t {
            return first.color;
        }
        if t >= last.t {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.t) / span);
            }
        }
        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color::from_straight(r, g, b, 1.0)
    }

    fn ramp() -> LinearGradient {
        LinearGradient::horizontal(100.0, &[rgb(1.0, 0.0, 0.0), rgb(0.0, 1.0, 0.0), rgb(0.0, 0.0, 1.0)])
    }

    #[test]
    fn three_stop_ramp_hits_each_stop() {
        let g = ramp();
        assert!(g.is_valid());
        assert_eq!(g.color_at(Vec2::new(0.0, 40.0)), rgb(1.0, 0.0, 0.0));
        assert_eq!(g.color_at(Vec2::new(50.0, 0.0)), rgb(0.0, 1.0, 0.0));
        assert_eq!(g.color_at(Vec2::new(100.0, 7.0)), rgb(0.0, 0.0, 1.0));
    }

    #[test]
    fn midpoint_between_stops_blends() {
        let c = ramp().sample(0.25);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.g - 0.5).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn pad_clamps_outside_range() {
        let g = ramp();
        assert_eq!(g.sample(-3.0), g.sample(0.0));
        assert_eq!(g.sample(7.0), g.sample(1.0));
    }

    #[test]
    fn reflect_mirrors() {
        let mut g = ramp();
        g.spread = SpreadMode::Reflect;
        assert_eq!(g.sample(1.25), g.sample(0.75));
    }

    #[test]
    fn unsorted_stops_are_sorted() {
        let g = LinearGradient::new(
            Vec2::zero(),
            Vec2::new(1.0, 0.0),
            vec![ColorStop::new(1.0, rgb(0.0, 0.0, 1.0)), ColorStop::new(0.0, rgb(1.0, 0.0, 0.0))],
            SpreadMode::Pad,
        );
        assert_eq!(g.stops()[0].t, 0.0);
    }
}
