use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::input::{InputEvent, PointerMoveEvent, PointerState};
use crate::render::{GpuContext, GpuInit, RenderContext, RenderOutcome, RenderState};
use crate::scene::Scene;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Request a transparent window so the zero clear alpha shows the desktop.
    pub transparent: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "droplets".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: true,
        }
    }
}

/// Entry point for the windowed driver.
///
/// Owns the winit event loop and drives `RenderState` and `Scene` through
/// construct → init → [resize | update]* → drop.
pub struct Runtime;

impl Runtime {
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut app = AppState::new(config, gpu_init);

        event_loop
            .run_app(&mut app)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

/// Decides when the idle loop may request the next redraw.
///
/// A frame the governor would reject is not worth waking up for, so after
/// each tick the loop sleeps until the scene reports the next slot is open.
#[derive(Debug, Default)]
struct RedrawSchedule {
    deadline: Option<Instant>,
}

impl RedrawSchedule {
    /// Records how long the scene wants to wait after the tick at `now`.
    fn record(&mut self, now: Instant, wait: Duration) {
        self.deadline = (!wait.is_zero()).then(|| now + wait);
    }

    /// Control flow for the idle loop at `now`, and whether to redraw now.
    fn poll(&mut self, now: Instant) -> (ControlFlow, bool) {
        match self.deadline {
            Some(deadline) if now < deadline => (ControlFlow::WaitUntil(deadline), false),
            _ => {
                self.deadline = None;
                (ControlFlow::Wait, true)
            }
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    state: RenderState<'this>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,

    entry: Option<WindowEntry>,
    scene: Option<Scene>,
    pointer: PointerState,
    schedule: RedrawSchedule,

    exit_requested: bool,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit) -> Self {
        Self {
            config,
            gpu_init,
            entry: None,
            scene: None,
            pointer: PointerState::default(),
            schedule: RedrawSchedule::default(),
            exit_requested: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = GpuInit {
            transparent: self.config.transparent,
            ..self.gpu_init
        };
        let mut entry = WindowEntryBuilder {
            window,
            state_builder: |w| attach_render_state(w, gpu_init),
        }
        .build();

        let scene = entry.with_state_mut(|state| {
            let mut scene = Scene::new(state);
            state.init();
            scene.init(state);
            scene
        });

        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        self.scene = Some(scene);
        Ok(())
    }

    fn resize(&mut self, refresh_ratio: bool) {
        let (Some(entry), Some(scene)) = (self.entry.as_mut(), self.scene.as_mut()) else {
            return;
        };
        entry.with_state_mut(|state| {
            if refresh_ratio {
                state.refresh_pixel_ratio();
            }
            state.resize();
            scene.resize(state);
        });
        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self) -> RenderOutcome {
        let (Some(entry), Some(scene)) = (self.entry.as_mut(), self.scene.as_mut()) else {
            return RenderOutcome::Uninitialized;
        };
        let pointer = &self.pointer;
        let outcome = entry.with_state_mut(|state| {
            state.update();
            scene.update(state, pointer)
        });
        self.schedule
            .record(Instant::now(), scene.time_until_next_frame());
        outcome
    }
}

/// Builds the render state for `window`, falling back to headless when the
/// GPU cannot be initialized.
fn attach_render_state(window: &Window, gpu_init: GpuInit) -> RenderState<'_> {
    let context = GpuContext::create(window, gpu_init)
        .map(|ctx| Box::new(ctx) as Box<dyn RenderContext + '_>)
        .inspect_err(|e| log::warn!("GPU initialization failed: {e:#}"))
        .ok();
    RenderState::new(Some(window), context)
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous animation, paced by the scene's frame governor.
        let (flow, redraw_now) = self.schedule.poll(Instant::now());
        event_loop.set_control_flow(flow);
        if redraw_now {
            if let Some(entry) = self.entry.as_ref() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            if let Some(ev) = entry.with_window(|w| translate_input_event(w, &event)) {
                self.pointer.apply_event(&ev);
            }
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.exit_requested = true;
            }

            WindowEvent::Resized(_) => self.resize(false),

            WindowEvent::ScaleFactorChanged { .. } => self.resize(true),

            WindowEvent::RedrawRequested => {
                if self.redraw() == RenderOutcome::Fatal {
                    log::error!("render context failed; shutting down");
                    self.exit_requested = true;
                }
            }

            _ => {}
        }

        if self.exit_requested {
            // Drop GPU objects before the window they borrow.
            self.scene = None;
            self.entry = None;
            event_loop.exit();
        }
    }
}

fn translate_input_event(window: &Window, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }
        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),
        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}
