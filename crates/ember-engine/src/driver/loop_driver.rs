use anyhow::{ensure, Context, Result};

use crate::framebuffer::Framebuffer;
use crate::present::PresentSurface;
use crate::time::{Clock, Duration, Instant, MonotonicClock, Stopwatch, TickLimiter, TimeUnit};

use super::events::{EventSource, LoopEvent};

/// Events handled per iteration before the rest is deferred to the next one.
pub const DEFAULT_MAX_EVENTS_PER_ITERATION: usize = 20;

/// Loop driver configuration.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Upper bound on events pumped per iteration. Must be at least 1.
    ///
    /// A backlog beyond the cap stays in the event source; it is never dropped.
    pub max_events_per_iteration: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_events_per_iteration: DEFAULT_MAX_EVENTS_PER_ITERATION,
        }
    }
}

/// Control directive returned by event handlers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Handle to a registered cadence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CadenceId(usize);

impl CadenceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Context passed to a cadence callback.
pub struct TickCtx<'a> {
    pub cadence: CadenceId,
    pub label: &'static str,
    /// Time since this cadence last ticked.
    pub delta: Duration,
    pub now: Instant,
    pub framebuffer: &'a mut Framebuffer,
}

/// What happened during one `run_iteration`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct IterationReport {
    pub events_processed: usize,
    /// The batch hit the cap; more events may be waiting.
    pub event_cap_reached: bool,
    pub ticks_fired: usize,
    /// Wall time spent in the iteration, presentation included.
    pub elapsed: Duration,
}

type TickFn<S> = Box<dyn FnMut(&mut S, &mut TickCtx<'_>)>;
type EventFn<S, E> = Box<dyn FnMut(&mut S, E) -> LoopControl>;
type ResizeFn<S> = Box<dyn FnMut(&mut S, u32, u32)>;

struct Cadence<S, C: Clock> {
    label: &'static str,
    limiter: TickLimiter<C>,
    callback: TickFn<S>,
}

/// Drives independent cadences over a shared framebuffer.
///
/// `S` is the application state handed to every callback, `E` the forwarded event
/// type and `C` the clock shared by all tick limiters.
///
/// Cadences run in registration order, at most once per iteration each: a cadence
/// that fell behind does not catch up.
pub struct LoopDriver<S, E, C: Clock + Clone = MonotonicClock> {
    config: LoopConfig,
    clock: C,
    framebuffer: Framebuffer,
    cadences: Vec<Cadence<S, C>>,
    event_handler: Option<EventFn<S, E>>,
    resize_handler: Option<ResizeFn<S>>,
    running: bool,
}

impl<S, E> LoopDriver<S, E, MonotonicClock> {
    /// Driver on the process clock.
    pub fn new(config: LoopConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<S, E, C: Clock + Clone> LoopDriver<S, E, C> {
    pub fn with_clock(config: LoopConfig, clock: C) -> Result<Self> {
        ensure!(
            config.max_events_per_iteration > 0,
            "max_events_per_iteration must be at least 1"
        );
        Ok(Self {
            config,
            clock,
            framebuffer: Framebuffer::empty(),
            cadences: Vec::new(),
            event_handler: None,
            resize_handler: None,
            running: true,
        })
    }

    /// Registers a callback limited to `ticks_per_second`.
    pub fn add_cadence<F>(
        &mut self,
        label: &'static str,
        ticks_per_second: u64,
        callback: F,
    ) -> Result<CadenceId>
    where
        F: FnMut(&mut S, &mut TickCtx<'_>) + 'static,
    {
        let limiter = TickLimiter::new(ticks_per_second, self.clock.clone())
            .with_context(|| format!("invalid rate for cadence '{label}'"))?;

        log::debug!(
            "cadence '{label}' registered at {ticks_per_second}/s (every {}us)",
            limiter.target().value(TimeUnit::Microseconds)
        );

        let id = CadenceId(self.cadences.len());
        self.cadences.push(Cadence {
            label,
            limiter,
            callback: Box::new(callback),
        });
        Ok(id)
    }

    /// Sets the handler for forwarded (non-quit) events.
    ///
    /// Without one, forwarded events are discarded.
    pub fn on_event<F>(&mut self, handler: F)
    where
        F: FnMut(&mut S, E) -> LoopControl + 'static,
    {
        self.event_handler = Some(Box::new(handler));
    }

    /// Called after the framebuffer was reallocated for a new drawable size.
    pub fn on_resize<F>(&mut self, handler: F)
    where
        F: FnMut(&mut S, u32, u32) + 'static,
    {
        self.resize_handler = Some(Box::new(handler));
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn limiter(&self, id: CadenceId) -> Option<&TickLimiter<C>> {
        self.cadences.get(id.0).map(|c| &c.limiter)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the run flag; the loop stops before its next iteration.
    pub fn request_exit(&mut self) {
        self.running = false;
    }

    /// Runs one iteration. See the module docs for the steps.
    ///
    /// The iteration always completes, even when a quit event arrives during the
    /// event pump; `is_running` reflects the quit afterwards.
    pub fn run_iteration<Q, P>(
        &mut self,
        state: &mut S,
        events: &mut Q,
        surface: &mut P,
    ) -> Result<IterationReport>
    where
        Q: EventSource<E> + ?Sized,
        P: PresentSurface + ?Sized,
    {
        let watch = Stopwatch::start_with(self.clock.clone());
        let mut report = IterationReport::default();

        self.pump_events(state, events, &mut report);
        self.sync_framebuffer_size(state, surface)?;

        for (index, cadence) in self.cadences.iter_mut().enumerate() {
            if !cadence.limiter.should_tick() {
                continue;
            }

            let mut ctx = TickCtx {
                cadence: CadenceId(index),
                label: cadence.label,
                delta: cadence.limiter.time_from_last_tick(),
                now: self.clock.now(),
                framebuffer: &mut self.framebuffer,
            };
            (cadence.callback)(state, &mut ctx);

            cadence.limiter.tick();
            report.ticks_fired += 1;
        }

        self.framebuffer
            .present(surface)
            .context("failed to present framebuffer")?;

        report.elapsed = watch.split();
        log::trace!(
            "iteration: {} events{}, {} ticks, {}ns",
            report.events_processed,
            if report.event_cap_reached { " (cap reached)" } else { "" },
            report.ticks_fired,
            report.elapsed.nanosecond_value()
        );
        Ok(report)
    }

    /// Runs iterations until the run flag is cleared, then releases the framebuffer.
    pub fn run<Q, P>(&mut self, state: &mut S, events: &mut Q, surface: &mut P) -> Result<()>
    where
        Q: EventSource<E> + ?Sized,
        P: PresentSurface + ?Sized,
    {
        let mut result = Ok(());
        while self.running {
            if let Err(e) = self.run_iteration(state, events, surface) {
                result = Err(e);
                break;
            }
        }

        self.framebuffer.release();
        log::debug!("loop driver stopped");
        result
    }

    fn pump_events<Q>(&mut self, state: &mut S, events: &mut Q, report: &mut IterationReport)
    where
        Q: EventSource<E> + ?Sized,
    {
        let cap = self.config.max_events_per_iteration;

        while report.events_processed < cap {
            let Some(event) = events.poll_event() else {
                break;
            };
            report.events_processed += 1;

            match event {
                LoopEvent::Quit => {
                    log::debug!("quit event received");
                    self.running = false;
                }
                LoopEvent::Forward(ev) => match self.event_handler.as_mut() {
                    Some(handler) => {
                        if handler(state, ev) == LoopControl::Exit {
                            self.running = false;
                        }
                    }
                    None => log::trace!("no event handler; event dropped"),
                },
            }
        }

        report.event_cap_reached = report.events_processed == cap;
    }

    fn sync_framebuffer_size<P>(&mut self, state: &mut S, surface: &P) -> Result<()>
    where
        P: PresentSurface + ?Sized,
    {
        let (width, height) = surface.drawable_size();
        if self.framebuffer.size() == (width, height) {
            return Ok(());
        }

        self.framebuffer.resize(width, height)?;
        if let Some(handler) = self.resize_handler.as_mut() {
            handler(state, width, height);
        }
        Ok(())
    }
}
