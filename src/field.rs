// The particle field: a fixed set of drifting particles linked by lines that
// fade out with distance.
//
// Each frame clears the surface, moves and draws every particle, then strokes
// a line between every pair closer than the connection distance. The pair
// search is a plain O(n²) scan, which is fine at the default 80 particles.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Color;
use crate::config::{FieldConfig, ResizePolicy};
use crate::error::FieldError;
use crate::particle::Particle;
use crate::surface::DrawingSurface;

// A link between two particles, by index, with its stroke opacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    color: Color,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    frames: u64,
}

impl ParticleField {
    // Builds a field from `config`, seeded by `config.seed` (or 0 when unset).
    pub fn new(config: FieldConfig) -> Result<ParticleField, FieldError> {
        let seed = config.seed.unwrap_or(0);
        ParticleField::with_seed(config, seed)
    }

    // Builds a field with an explicit seed; the same seed and config always
    // give the same particles.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Result<ParticleField, FieldError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..config.count)
            .map(|_| Particle::random(&mut rng, &config))
            .collect();
        Ok(ParticleField::assemble(config, particles))
    }

    // Builds a field from explicit particles; `config.count` is set to their number.
    pub fn from_particles(
        mut config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Result<ParticleField, FieldError> {
        config.count = particles.len();
        config.validate()?;
        Ok(ParticleField::assemble(config, particles))
    }

    fn assemble(config: FieldConfig, particles: Vec<Particle>) -> ParticleField {
        ParticleField {
            color: Color::from_u32(config.color),
            width: config.width,
            height: config.height,
            config,
            particles,
            frames: 0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    // Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    // Moves every particle by one step.
    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.advance(width, height);
        }
    }

    // Stroke opacity for a link of length `distance`, or `None` when the
    // particles are too far apart to be linked.
    pub fn link_opacity_at(&self, distance: f64) -> Option<f64> {
        link_opacity(distance, self.config.connection_distance, self.config.link_opacity)
    }

    // Every linked pair `(a, b)` with `a < b`.
    pub fn connections(&self) -> Vec<Connection> {
        let mut links = Vec::new();
        for a in 0..self.particles.len() {
            for b in (a + 1)..self.particles.len() {
                let distance = self.particles[a].distance_to(&self.particles[b]);
                if let Some(opacity) = self.link_opacity_at(distance) {
                    links.push(Connection {
                        a,
                        b,
                        distance,
                        opacity,
                    });
                }
            }
        }
        links
    }

    // Draws the current state without moving anything.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        for particle in &self.particles {
            self.draw_particle(surface, particle);
        }
        self.draw_connections(surface);
    }

    // One animation frame: clear, move and draw every particle, then link
    // nearby pairs.
    pub fn frame<S: DrawingSurface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        let (width, height) = (self.width, self.height);
        for i in 0..self.particles.len() {
            self.particles[i].advance(width, height);
            let particle = self.particles[i];
            self.draw_particle(surface, &particle);
        }
        self.draw_connections(surface);
        self.frames += 1;
    }

    fn draw_particle<S: DrawingSurface + ?Sized>(&self, surface: &mut S, particle: &Particle) {
        surface.set_fill_color(&self.color.to_css_with_alpha(particle.opacity));
        surface.fill_circle(particle.pos[0], particle.pos[1], particle.radius);
    }

    fn draw_connections<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        let links = self.connections();
        if links.is_empty() {
            return;
        }
        surface.set_line_width(self.config.line_width);
        for link in links {
            surface.set_stroke_color(&self.color.to_css_with_alpha(link.opacity));
            surface.stroke_line(self.particles[link.a].pos, self.particles[link.b].pos);
        }
    }

    // Updates the surface dimensions and applies the configured resize policy.
    pub fn resize(&mut self, width: f64, height: f64) {
        let (old_width, old_height) = (self.width, self.height);
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.config.width = self.width;
        self.config.height = self.height;

        match self.config.resize_policy {
            ResizePolicy::Keep => {}
            ResizePolicy::Clamp => {
                for p in &mut self.particles {
                    p.pos[0] = clamp_below(p.pos[0], self.width);
                    p.pos[1] = clamp_below(p.pos[1], self.height);
                }
            }
            ResizePolicy::Rescale => {
                let scale_x = if old_width > 0.0 { self.width / old_width } else { 0.0 };
                let scale_y = if old_height > 0.0 { self.height / old_height } else { 0.0 };
                for p in &mut self.particles {
                    p.pos[0] = clamp_below(p.pos[0] * scale_x, self.width);
                    p.pos[1] = clamp_below(p.pos[1] * scale_y, self.height);
                }
            }
        }
    }
}

// Linear falloff: `base` at distance 0, exactly 0 at `threshold`, no link beyond.
pub fn link_opacity(distance: f64, threshold: f64, base: f64) -> Option<f64> {
    if distance < threshold {
        Some(base * (1.0 - distance / threshold))
    } else {
        None
    }
}

// Largest value in [0, extent) not above `value`
fn clamp_below(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    let max = extent - extent * f64::EPSILON;
    value.max(0.0).min(max)
}
