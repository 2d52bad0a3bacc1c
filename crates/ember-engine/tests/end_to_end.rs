use ember_engine::driver::{EventQueue, LoopConfig, LoopControl, LoopDriver};
use ember_engine::framebuffer::{Color, Framebuffer};
use ember_engine::present::{HeadlessSurface, PresentSurface, RowOrder};
use ember_engine::time::{Duration, Instant, ManualClock, TickLimiter, TimeUnit};

#[test]
fn fill_red_then_write_blue() {
    let mut fb = Framebuffer::new(10, 10).unwrap();
    fb.fill(Color::from_u32(0x00FF_0000));

    let px = fb.pixel(5, 5).unwrap();
    assert_eq!((px.red(), px.green(), px.blue()), (0xFF, 0x00, 0x00));

    let before = fb.pixels().to_vec();
    fb.write_pixel(5, 5, Color::rgb(0x00, 0x00, 0xFF));

    let changed: Vec<usize> = fb
        .pixels()
        .iter()
        .zip(&before)
        .enumerate()
        .filter(|(_, (now, was))| now != was)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(changed, vec![5 * 10 + 5]);

    let px = fb.pixel(5, 5).unwrap();
    assert_eq!((px.red(), px.green(), px.blue()), (0x00, 0x00, 0xFF));
}

#[test]
fn thirty_hz_limiter_on_simulated_clock() {
    let clock = ManualClock::starting_at(Instant::of(10, TimeUnit::Seconds));
    let mut limiter = TickLimiter::new(30, clock.clone()).unwrap();
    limiter.tick();

    clock.advance(Duration::of(34, TimeUnit::Milliseconds));
    assert!(limiter.should_tick());
    limiter.tick();
    assert!(!limiter.should_tick());

    clock.advance(Duration::of(34, TimeUnit::Milliseconds));
    assert!(limiter.should_tick());
}

#[test]
fn presented_bytes_carry_bgra_lanes() {
    let mut fb = Framebuffer::new(3, 2).unwrap();
    fb.fill(Color::RED);
    fb.write_pixel(2, 1, Color::rgb(0x11, 0x22, 0x33));

    let mut surface = HeadlessSurface::new(3, 2);
    fb.present(&mut surface).unwrap();

    let layout = surface.last_layout().unwrap();
    assert_eq!(layout.orientation, RowOrder::TopDown);
    assert_eq!(layout.row_stride, 12);
    assert_eq!(surface.pixel_bytes(0, 0), Some([0x00, 0x00, 0xFF, 0x00]));
    assert_eq!(surface.pixel_bytes(2, 1), Some([0x33, 0x22, 0x11, 0x00]));
    assert_eq!(surface.drawable_size(), (3, 2));
}

/// Update at 60/s, render at 20/s, over half a simulated second at 5ms steps.
#[test]
fn update_and_render_cadences_share_one_loop() {
    #[derive(Default)]
    struct World {
        x: i32,
        updates: u32,
        renders: u32,
    }

    let clock = ManualClock::starting_at(Instant::of(1, TimeUnit::Seconds));
    let mut driver: LoopDriver<World, u8, ManualClock> =
        LoopDriver::with_clock(LoopConfig::default(), clock.clone()).unwrap();

    driver
        .add_cadence("update", 60, |w: &mut World, _| {
            w.x += 1;
            w.updates += 1;
        })
        .unwrap();
    driver
        .add_cadence("render", 20, |w: &mut World, ctx| {
            ctx.framebuffer.fill(Color::BLACK);
            ctx.framebuffer.write_pixel(w.x, 0, Color::WHITE);
            w.renders += 1;
        })
        .unwrap();
    driver.on_event(|_, key| {
        if key == b'q' { LoopControl::Exit } else { LoopControl::Continue }
    });

    let mut world = World::default();
    let mut queue = EventQueue::new();
    let mut surface = HeadlessSurface::new(64, 1);

    for _ in 0..100 {
        driver.run_iteration(&mut world, &mut queue, &mut surface).unwrap();
        clock.advance(Duration::of(5, TimeUnit::Milliseconds));
    }

    // 60/s -> 16.666ms target -> fires every 4th 5ms step (20ms).
    assert_eq!(world.updates, 25);
    // 20/s -> 50ms target -> every 10th step.
    assert_eq!(world.renders, 10);
    assert_eq!(surface.presented(), 100);

    queue.push_forward(b'q');
    driver.run(&mut world, &mut queue, &mut surface).unwrap();
    assert!(!driver.is_running());
    assert_eq!(surface.presented(), 101);
}
