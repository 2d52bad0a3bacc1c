use ember_engine::framebuffer::{Color, Framebuffer};
use ember_engine::random::RandomSource;
use ember_engine::time::Instant;

/// Largest per-axis speed, in pixels per update.
pub const MAX_SPEED: i64 = 2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub velocity_x: i32,
    pub velocity_y: i32,
    pub color: Color,
    pub birth_time: Instant,
}

/// Particles bouncing inside a `width * height` box.
#[derive(Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: i32,
    height: i32,
}

impl ParticleField {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Changes the box. Particles outside it are pulled back in on the next update.
    ///
    /// A zero-area box (minimized window) is ignored; the last real box stays in effect.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = i32::try_from(width).unwrap_or(i32::MAX);
        self.height = i32::try_from(height).unwrap_or(i32::MAX);
    }

    /// Replaces all particles with `count` fresh ones at random positions.
    pub fn spawn<R: RandomSource + ?Sized>(&mut self, count: usize, rng: &mut R, now: Instant) {
        self.particles.clear();
        if self.width <= 0 || self.height <= 0 {
            return;
        }

        let (w, h) = (i64::from(self.width), i64::from(self.height));
        self.particles.extend((0..count).map(|_| Particle {
            x: coord(rng.next_in(0, w - 1)),
            y: coord(rng.next_in(0, h - 1)),
            velocity_x: coord(rng.next_in(-MAX_SPEED, MAX_SPEED)),
            velocity_y: coord(rng.next_in(-MAX_SPEED, MAX_SPEED)),
            color: rng.next_color(),
            birth_time: now,
        }));

        log::debug!("spawned {count} particles in {}x{}", self.width, self.height);
    }

    /// Moves every particle by its velocity, reflecting off the box edges.
    pub fn update(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            (p.x, p.velocity_x) = step_axis(p.x, p.velocity_x, width);
            (p.y, p.velocity_y) = step_axis(p.y, p.velocity_y, height);
        }
    }

    pub fn draw(&self, fb: &mut Framebuffer) {
        for p in &self.particles {
            fb.write_pixel(p.x, p.y, p.color);
        }
    }
}

/// One axis of motion: clamp to `[0, limit)` and flip the velocity on contact.
fn step_axis(pos: i32, velocity: i32, limit: i32) -> (i32, i32) {
    let next = pos.saturating_add(velocity);
    if next < 0 {
        (0, -velocity)
    } else if next >= limit {
        ((limit - 1).max(0), -velocity)
    } else {
        (next, velocity)
    }
}

fn coord(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
