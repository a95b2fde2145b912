use crate::coords::Vec2;

use super::INFLUENCE_RADIUS;

/// Pointer as seen by the simulation, in surface pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerState {
    /// `None` before the pointer enters and after it leaves.
    pub position: Option<Vec2>,
    pub radius: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: None,
            radius: INFLUENCE_RADIUS,
        }
    }
}

impl PointerState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}

/// Repulsion strength at `distance` from the pointer.
///
/// 1 at distance 0, falling linearly to 0 at `radius` and staying 0 beyond it.
#[inline]
pub fn force_at(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    ((radius - distance) / radius).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_is_one_at_zero_and_zero_at_radius() {
        assert_eq!(force_at(0.0, 150.0), 1.0);
        assert_eq!(force_at(150.0, 150.0), 0.0);
        assert_eq!(force_at(500.0, 150.0), 0.0);
    }

    #[test]
    fn force_never_increases_with_distance() {
        let mut prev = force_at(0.0, INFLUENCE_RADIUS);
        for i in 1..=400 {
            let f = force_at(i as f32 * 0.5, INFLUENCE_RADIUS);
            assert!(f <= prev, "force rose at {}", i as f32 * 0.5);
            assert!(f >= 0.0);
            prev = f;
        }
    }

    #[test]
    fn default_has_no_position() {
        let p = PointerState::default();
        assert!(p.position.is_none());
        assert_eq!(p.radius, INFLUENCE_RADIUS);
    }
}
