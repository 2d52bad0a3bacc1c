use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit};
use crate::driver::{EventQueue, LoopDriver};
use crate::input::platform::translate_window_event;
use crate::input::WindowInput;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
        }
    }
}

/// Entry point for windowed runs.
pub struct Runtime;

impl Runtime {
    /// Opens a window and runs `driver` until it stops.
    ///
    /// Window events are queued as they arrive; one driver iteration runs each time
    /// the platform queue is drained, presenting to the window's GPU surface.
    pub fn run<S>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        driver: LoopDriver<S, WindowInput>,
        state: S,
    ) -> Result<()>
    where
        S: 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut app = RuntimeState {
            config,
            gpu_init,
            driver,
            state,
            queue: EventQueue::new(),
            window: None,
            fatal: None,
        };

        event_loop
            .run_app(&mut app)
            .context("winit event loop terminated with error")?;

        match app.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<S: 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    driver: LoopDriver<S, WindowInput>,
    state: S,
    queue: EventQueue<WindowInput>,
    window: Option<WindowEntry>,
    /// First unrecoverable error; returned from `Runtime::run`.
    fatal: Option<anyhow::Error>,
}

impl<S: 'static> RuntimeState<S> {
    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.driver.request_exit();
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }
}

impl<S: 'static> ApplicationHandler for RuntimeState<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => self.window = Some(entry),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                self.queue.push_quit();
                return;
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            _ => {}
        }

        if let Some(input) = translate_window_event(&event) {
            self.queue.push_forward(input);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.driver.is_running() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        let Self {
            driver,
            state,
            queue,
            window,
            ..
        } = self;
        let Some(entry) = window.as_mut() else {
            return;
        };

        let result = entry.with_gpu_mut(|gpu| driver.run_iteration(state, queue, gpu));
        if let Err(e) = result {
            self.fail(event_loop, e);
            return;
        }

        if !self.driver.is_running() {
            log::info!("shutting down");
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Framebuffer goes before the surface it was shown on.
        self.driver.framebuffer_mut().release();
        self.window = None;
    }
}
