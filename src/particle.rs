// Simple particle struct to keep track of individual position, velocity,
// radius and opacity. Everything but the position is fixed at creation.

use rand::Rng;

use crate::config::FieldConfig;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
        }
    }

    pub fn random<R: Rng>(rng: &mut R, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * config.width;
        let pos_y = rng.gen::<f64>() * config.height;
        let vel_x = sample(rng, config.speed_range);
        let vel_y = sample(rng, config.speed_range);
        let radius = sample(rng, config.size_range);
        let opacity = sample(rng, config.opacity_range);
        Particle::new(
            [wrap(pos_x, config.width), wrap(pos_y, config.height)],
            [vel_x, vel_y],
            radius,
            opacity,
        )
    }

    // Moves by one step of velocity, wrapping around the surface edges
    pub fn advance(&mut self, width: f64, height: f64) {
        self.pos[0] = wrap(self.pos[0] + self.vel[0], width);
        self.pos[1] = wrap(self.pos[1] + self.vel[1], height);
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }
}

fn sample<R: Rng>(rng: &mut R, range: [f64; 2]) -> f64 {
    rng.gen::<f64>() * (range[1] - range[0]) + range[0]
}

// Maps a coordinate into [0, extent). Leaving the far edge lands near 0,
// leaving the near edge lands near the far edge.
pub fn wrap(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    if value >= 0.0 && value < extent {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to exactly `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn far_edge_wraps_to_origin() {
        let mut p = Particle::new([99.9, 50.0], [0.25, 0.0], 1.0, 0.5);
        p.advance(100.0, 100.0);
        assert!(p.pos[0] >= 0.0);
        assert!((p.pos[0] - 0.15).abs() < 1e-9);
        assert_eq!(p.pos[1], 50.0);
    }

    #[test]
    fn near_edge_wraps_to_far_side() {
        let mut p = Particle::new([0.1, 0.0], [-0.25, -0.2], 1.0, 0.5);
        p.advance(100.0, 80.0);
        assert!((p.pos[0] - 99.85).abs() < 1e-9);
        assert!((p.pos[1] - 79.8).abs() < 1e-9);
    }

    #[test]
    fn exactly_at_extent_is_wrapped() {
        assert_eq!(wrap(100.0, 100.0), 0.0);
        assert!(wrap(-1e-20, 100.0) < 100.0);
        assert_eq!(wrap(5.0, 0.0), 0.0);
    }

    #[test]
    fn out_of_bounds_start_wraps_in_one_step() {
        let mut p = Particle::new([450.0, 10.0], [0.1, 0.1], 1.0, 0.5);
        p.advance(300.0, 300.0);
        assert!(p.pos[0] >= 0.0 && p.pos[0] < 300.0);
    }

    #[test]
    fn random_particle_respects_ranges() {
        let config = FieldConfig::default().with_size(320.0, 240.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] < 320.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] < 240.0);
            assert!(p.vel[0] >= -0.25 && p.vel[0] <= 0.25);
            assert!(p.vel[1] >= -0.25 && p.vel[1] <= 0.25);
            assert!(p.radius >= 1.0 && p.radius <= 3.0);
            assert!(p.opacity >= 0.2 && p.opacity <= 0.7);
        }
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Particle::new([0.0, 0.0], [0.0, 0.0], 1.0, 1.0);
        let b = Particle::new([3.0, 4.0], [0.0, 0.0], 1.0, 1.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}
