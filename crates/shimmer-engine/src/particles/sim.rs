use super::{force_at, Particle, PointerState, EASE_DIVISOR};

/// Advances every particle by one frame.
///
/// Inside the pointer's radius a particle is pushed directly away from it by
/// `force × density`; everywhere else it eases a fixed fraction of the way
/// back to its base. The step is frame-count based, not scaled by dt.
pub fn step(particles: &mut [Particle], pointer: &PointerState) {
    for p in particles {
        step_one(p, pointer);
    }
}

fn step_one(p: &mut Particle, pointer: &PointerState) {
    if let Some(at) = pointer.position {
        let d = at - p.pos;
        let dist = d.length();
        if dist < pointer.radius {
            // A coincident pointer has no direction; the particle holds still.
            if dist > 0.0 {
                let dir = d / dist;
                p.pos -= dir * (force_at(dist, pointer.radius) * p.density());
            }
            return;
        }
    }

    let gap = p.pos - p.base();
    p.pos -= gap / EASE_DIVISOR;
}

#[cfg(test)]
mod tests {
    use crate::coords::Vec2;

    use super::*;

    fn particle(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), [255, 255, 255], 10.0)
    }

    // ── rest ──────────────────────────────────────────────────────────────

    #[test]
    fn rest_state_is_a_fixed_point() {
        let mut ps: Vec<Particle> = (0..50).map(|i| particle(i as f32 * 4.0, 8.0)).collect();
        let before = ps.clone();
        step(&mut ps, &PointerState::default());
        assert_eq!(ps, before);
    }

    #[test]
    fn eases_a_tenth_of_the_gap() {
        let mut p = particle(0.0, 0.0);
        p.pos = Vec2::new(10.0, -20.0);
        step_one(&mut p, &PointerState::default());
        assert_eq!(p.pos(), Vec2::new(9.0, -18.0));
    }

    #[test]
    fn base_never_moves() {
        let mut ps = vec![particle(100.0, 100.0), particle(300.0, 40.0)];
        let bases: Vec<Vec2> = ps.iter().map(Particle::base).collect();
        for i in 0..120 {
            let ptr = if i % 3 == 0 {
                PointerState::default()
            } else {
                PointerState::at(Vec2::new(110.0 + i as f32, 90.0))
            };
            step(&mut ps, &ptr);
        }
        let after: Vec<Vec2> = ps.iter().map(Particle::base).collect();
        assert_eq!(bases, after);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pushed_directly_away_from_pointer() {
        let mut p = particle(100.0, 100.0);
        step_one(&mut p, &PointerState::at(Vec2::new(70.0, 100.0)));
        // dist 30 → force 0.8 → 8px along +x
        assert!((p.pos().x - 108.0).abs() < 1e-4);
        assert_eq!(p.pos().y, 100.0);
    }

    #[test]
    fn closer_particles_are_pushed_further() {
        let ptr = PointerState::at(Vec2::new(0.0, 0.0));
        let mut near = particle(20.0, 0.0);
        let mut far = particle(120.0, 0.0);
        step_one(&mut near, &ptr);
        step_one(&mut far, &ptr);
        assert!(near.pos().x - 20.0 > far.pos().x - 120.0);
    }

    #[test]
    fn outside_radius_eases_back() {
        let mut p = particle(0.0, 0.0);
        p.pos = Vec2::new(20.0, 0.0);
        step_one(&mut p, &PointerState::at(Vec2::new(500.0, 0.0)));
        assert_eq!(p.pos(), Vec2::new(18.0, 0.0));
    }

    #[test]
    fn coincident_pointer_leaves_particle_in_place() {
        let mut p = particle(50.0, 50.0);
        step_one(&mut p, &PointerState::at(Vec2::new(50.0, 50.0)));
        assert_eq!(p.pos(), Vec2::new(50.0, 50.0));
        assert!(p.pos().is_finite());
    }
}
