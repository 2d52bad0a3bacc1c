use anyhow::Result;
use ember_engine::driver::{LoopControl, LoopDriver, TickCtx};
use ember_engine::framebuffer::Color;
use ember_engine::input::{Key, WindowInput};
use ember_engine::random::{RandomSource, SeededRandom};
use ember_engine::time::{Clock, TimeUnit};

use crate::particles::ParticleField;

/// Application state shared by all cadences.
pub struct Scene {
    pub field: ParticleField,
    pub rng: SeededRandom,
    pub background: Color,
    pub particle_count: usize,
    respawn: bool,
    pub updates: u64,
    pub renders: u64,
}

impl Scene {
    pub fn new(particle_count: usize, rng: SeededRandom) -> Self {
        Self {
            field: ParticleField::default(),
            rng,
            background: Color::BLACK,
            particle_count,
            respawn: true,
            updates: 0,
            renders: 0,
        }
    }

    fn update(&mut self, ctx: &mut TickCtx<'_>) {
        log::debug!(
            "previous UPDATE was {} ms ago",
            ctx.delta.value(TimeUnit::Milliseconds)
        );

        if self.respawn {
            self.field.spawn(self.particle_count, &mut self.rng, ctx.now);
            self.respawn = false;
        }
        self.field.update();
        self.updates += 1;
    }

    fn render(&mut self, ctx: &mut TickCtx<'_>) {
        log::debug!(
            "previous RENDER was {} ms ago",
            ctx.delta.value(TimeUnit::Milliseconds)
        );

        ctx.framebuffer.fill(self.background);
        self.field.draw(ctx.framebuffer);
        self.renders += 1;
    }

    fn handle_input(&mut self, input: WindowInput) -> LoopControl {
        if input.is_key_press(Key::Escape) {
            return LoopControl::Exit;
        }
        if input.is_key_press(Key::Space) {
            self.respawn = true;
        }
        if input.is_key_press(Key::B) {
            self.background = self.rng.next_color();
            log::info!("background set to {:#08x}", self.background.value());
        }
        LoopControl::Continue
    }

    fn resized(&mut self, width: u32, height: u32) {
        self.field.set_bounds(width, height);
        if self.field.particles().is_empty() {
            self.respawn = true;
        }
    }
}

/// Registers the update and render cadences and the input/resize handlers.
pub fn install<C>(
    driver: &mut LoopDriver<Scene, WindowInput, C>,
    update_rate: u64,
    render_rate: u64,
) -> Result<()>
where
    C: Clock + Clone,
{
    driver.add_cadence("update", update_rate, Scene::update)?;
    driver.add_cadence("render", render_rate, Scene::render)?;
    driver.on_event(Scene::handle_input);
    driver.on_resize(Scene::resized);
    Ok(())
}

#[cfg(test)]
mod tests {
    use ember_engine::driver::{EventQueue, LoopConfig};
    use ember_engine::input::ButtonState;
    use ember_engine::present::HeadlessSurface;
    use ember_engine::time::{Duration, Instant, ManualClock};

    use super::*;

    fn press(key: Key) -> WindowInput {
        WindowInput::Key {
            key,
            state: ButtonState::Pressed,
            repeat: false,
        }
    }

    fn setup() -> (LoopDriver<Scene, WindowInput, ManualClock>, ManualClock, Scene) {
        let clock = ManualClock::starting_at(Instant::of(1, TimeUnit::Seconds));
        let mut driver = LoopDriver::with_clock(LoopConfig::default(), clock.clone()).unwrap();
        install(&mut driver, 30, 30).unwrap();
        (driver, clock, Scene::new(25, SeededRandom::from_seed(11)))
    }

    #[test]
    fn first_iteration_spawns_and_draws() {
        let (mut driver, _clock, mut scene) = setup();
        let mut queue = EventQueue::new();
        let mut surface = HeadlessSurface::new(32, 24);

        driver.run_iteration(&mut scene, &mut queue, &mut surface).unwrap();

        assert_eq!(scene.field.particles().len(), 25);
        assert_eq!(scene.field.bounds(), (32, 24));
        assert_eq!((scene.updates, scene.renders), (1, 1));
        for p in scene.field.particles() {
            let top = scene
                .field
                .particles()
                .iter()
                .rev()
                .find(|q| (q.x, q.y) == (p.x, p.y))
                .unwrap();
            assert_eq!(driver.framebuffer().pixel(p.x, p.y), Some(top.color));
        }
    }

    #[test]
    fn escape_exits_the_loop() {
        let (mut driver, _clock, mut scene) = setup();
        let mut queue = EventQueue::new();
        queue.push_forward(press(Key::Escape));

        driver
            .run(&mut scene, &mut queue, &mut HeadlessSurface::new(4, 4))
            .unwrap();
        assert!(!driver.is_running());
    }

    #[test]
    fn minimized_window_does_not_collapse_particles() {
        let (mut driver, clock, mut scene) = setup();
        let mut queue = EventQueue::new();
        let mut surface = HeadlessSurface::new(200, 150);

        driver.run_iteration(&mut scene, &mut queue, &mut surface).unwrap();
        let before: Vec<_> = scene.field.particles().iter().map(|p| (p.x, p.y)).collect();

        surface.resize(0, 0);
        clock.advance(Duration::of(40, TimeUnit::Milliseconds));
        driver.run_iteration(&mut scene, &mut queue, &mut surface).unwrap();
        assert!(driver.framebuffer().is_empty());
        assert_eq!(scene.field.bounds(), (200, 150));

        surface.resize(200, 150);
        clock.advance(Duration::of(40, TimeUnit::Milliseconds));
        driver.run_iteration(&mut scene, &mut queue, &mut surface).unwrap();

        // Two updates move each particle at most 2px per axis per update.
        for (p, (x, y)) in scene.field.particles().iter().zip(before) {
            assert!((p.x - x).abs() <= 4 && (p.y - y).abs() <= 4, "{p:?}");
        }
        assert_eq!(scene.updates, 3);
    }

    #[test]
    fn space_respawns_on_next_update() {
        let (mut driver, clock, mut scene) = setup();
        let mut queue = EventQueue::new();
        let mut surface = HeadlessSurface::new(64, 64);

        driver.run_iteration(&mut scene, &mut queue, &mut surface).unwrap();
        let first: Vec<_> = scene.field.particles().to_vec();

        queue.push_forward(press(Key::Space));
        clock.advance(Duration::of(40, TimeUnit::Milliseconds));
        driver.run_iteration(&mut scene, &mut queue, &mut surface).unwrap();

        assert_eq!(scene.field.particles().len(), 25);
        assert_ne!(scene.field.particles(), &first[..]);
        assert!(scene
            .field
            .particles()
            .iter()
            .all(|p| p.birth_time == Instant::of(1_040, TimeUnit::Milliseconds)));
    }
}
