use std::time::Duration;

use crate::config::{CAMERA_PARAM, MAX_FPS};
use crate::input::PointerSource;
use crate::render::{FrameUniforms, QuadSurface, RenderOutcome, RenderState};
use crate::time::{Clock, FrameGovernor, SystemClock};

use super::camera::PerspectiveCamera;
use super::trail::PointerTrail;

/// The droplets scene: camera, the full-screen quad, its uniforms, the
/// pointer trail and frame-rate governance.
///
/// The scene only reads from [`RenderState`]; the one exception is handing a
/// finished frame to its context.
pub struct Scene {
    camera: PerspectiveCamera,
    surface: Option<QuadSurface>,
    uniforms: FrameUniforms,
    trail: PointerTrail,
    governor: FrameGovernor,
    clock: Box<dyn Clock>,
}

impl Scene {
    /// Builds the scene with a wall clock for frame governance.
    pub fn new(state: &RenderState<'_>) -> Self {
        Self::with_clock(state, Box::new(SystemClock::new()))
    }

    /// Builds the scene with a caller-provided governance clock.
    pub fn with_clock(state: &RenderState<'_>, clock: Box<dyn Clock>) -> Self {
        Self {
            camera: PerspectiveCamera::from_param(&CAMERA_PARAM),
            surface: None,
            uniforms: FrameUniforms::new(state.elapsed_time(), state.viewport()),
            trail: PointerTrail::new(),
            governor: FrameGovernor::new(MAX_FPS),
            clock,
        }
    }

    /// Places the camera and builds the quad surface.
    pub fn init(&mut self, state: &RenderState<'_>) {
        self.camera.aspect = usable_aspect(state.aspect_ratio()).unwrap_or(CAMERA_PARAM.aspect);
        self.camera.position = CAMERA_PARAM.position;
        self.camera.look_at(CAMERA_PARAM.look_at);
        self.camera.update_projection_matrix();

        self.surface = Some(QuadSurface::droplets());
        log::debug!("scene initialized (aspect {})", self.camera.aspect);
    }

    /// Syncs the camera aspect and the resolution uniform with `state`.
    ///
    /// An unusable aspect (zero or non-finite) keeps the camera's current one.
    pub fn resize(&mut self, state: &RenderState<'_>) {
        if let Some(aspect) = usable_aspect(state.aspect_ratio()) {
            self.camera.aspect = aspect;
        }
        self.camera.update_projection_matrix();
        self.uniforms.resolution = state.viewport();
    }

    /// One driver tick: sample the pointer into the trail, then render.
    pub fn update(
        &mut self,
        state: &mut RenderState<'_>,
        pointer: &dyn PointerSource,
    ) -> RenderOutcome {
        self.update_pointer_trail(pointer);
        self.render(state)
    }

    /// Shifts the trail and stores the current pointer coordinate at index 0.
    pub fn update_pointer_trail(&mut self, pointer: &dyn PointerSource) {
        self.trail.push(pointer.current_coordinate());
    }

    fn render(&mut self, state: &mut RenderState<'_>) -> RenderOutcome {
        self.uniforms.time = state.elapsed_time();
        self.uniforms.pointer_trail = *self.trail.samples();

        if !self.governor.try_acquire(self.clock.now()) {
            log::trace!("frame throttled");
            return RenderOutcome::Throttled;
        }

        let Some(surface) = self.surface.as_ref() else {
            return RenderOutcome::Uninitialized;
        };
        state.draw(surface, &self.uniforms)
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn surface(&self) -> Option<&QuadSurface> {
        self.surface.as_ref()
    }

    /// Uniform values as of the last render (or resize).
    pub fn uniforms(&self) -> &FrameUniforms {
        &self.uniforms
    }

    pub fn trail(&self) -> &PointerTrail {
        &self.trail
    }

    pub fn max_fps(&self) -> u32 {
        self.governor.max_fps()
    }

    /// How long until the governor accepts another frame, measured on the
    /// scene clock. Zero when a frame would be accepted right now.
    pub fn time_until_next_frame(&self) -> Duration {
        let Some(next) = self.governor.next_allowed() else {
            return Duration::ZERO;
        };
        next.saturating_sub(self.clock.now())
    }
}

fn usable_aspect(aspect: f32) -> Option<f32> {
    (aspect.is_finite() && aspect > 0.0).then_some(aspect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Viewport};
    use crate::render::test_support::{FakeDisplay, RecordingContext};
    use crate::time::ManualClock;

    struct Fixture<'a> {
        state: RenderState<'a>,
        scene: Scene,
        ctx: RecordingContext,
        render_clock: ManualClock,
        frame_clock: ManualClock,
    }

    fn fixture(display: &FakeDisplay) -> Fixture<'_> {
        let ctx = RecordingContext::default();
        let render_clock = ManualClock::new();
        let frame_clock = ManualClock::new();

        let mut state = RenderState::with_clock(
            Some(display),
            Some(Box::new(ctx.clone())),
            Box::new(render_clock.clone()),
        );
        let mut scene = Scene::with_clock(&state, Box::new(frame_clock.clone()));
        state.init();
        scene.init(&state);
        scene.resize(&state);

        Fixture {
            state,
            scene,
            ctx,
            render_clock,
            frame_clock,
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── construction / init ───────────────────────────────────────────────

    #[test]
    fn construct_copies_state_values() {
        let display = FakeDisplay::new(640, 480, 1.0);
        let state = RenderState::new(Some(&display), None);
        let scene = Scene::new(&state);

        assert_eq!(scene.uniforms().resolution, Viewport::new(640, 480));
        assert_eq!(scene.uniforms().time, 0.0);
        assert!(scene.trail().samples().iter().all(|s| *s == Vec2::zero()));
        assert_eq!(scene.max_fps(), 30);
        assert!(scene.surface().is_none());
    }

    #[test]
    fn init_syncs_camera_with_state() {
        let display = FakeDisplay::new(1920, 1080, 2.0);
        let f = fixture(&display);

        let cam = f.scene.camera();
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(cam.position, CAMERA_PARAM.position);
        assert_eq!(cam.target(), CAMERA_PARAM.look_at);
        assert_eq!(f.scene.surface(), Some(&QuadSurface::droplets()));
    }

    #[test]
    fn init_falls_back_on_unusable_aspect() {
        let display = FakeDisplay::new(0, 600, 1.0);
        let state = RenderState::new(Some(&display), None);
        assert_eq!(state.aspect_ratio(), 0.0);

        let mut scene = Scene::new(&state);
        scene.init(&state);
        assert_eq!(scene.camera().aspect, CAMERA_PARAM.aspect);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_updates_camera_and_resolution() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);
        let before = f.scene.camera().projection_matrix();

        display.set_size(1200, 400);
        f.state.resize();
        f.scene.resize(&f.state);

        assert_eq!(f.scene.camera().aspect, 3.0);
        assert_ne!(f.scene.camera().projection_matrix(), before);
        assert_eq!(f.scene.uniforms().resolution, Viewport::new(1200, 400));
    }

    #[test]
    fn resize_to_zero_height_keeps_aspect() {
        let display = FakeDisplay::new(1000, 500, 1.0);
        let mut f = fixture(&display);

        display.set_size(1000, 0);
        f.state.resize();
        f.scene.resize(&f.state);

        assert_eq!(f.state.aspect_ratio(), 2.0);
        assert_eq!(f.scene.camera().aspect, 2.0);
        assert_eq!(f.scene.uniforms().resolution, Viewport::new(1000, 0));
    }

    // ── update / trail ────────────────────────────────────────────────────

    #[test]
    fn update_feeds_trail_in_recency_order() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);

        let points: Vec<Vec2> = (0..16)
            .map(|i| Vec2::new(i as f32 * 3.0, 100.0 - i as f32))
            .collect();
        for p in &points {
            f.scene.update(&mut f.state, p);
            assert_eq!(f.scene.trail().len(), 15);
        }

        let expected: Vec<Vec2> = points[1..].iter().rev().copied().collect();
        assert_eq!(f.scene.trail().samples().as_slice(), expected.as_slice());
        assert_eq!(f.scene.uniforms().pointer_trail.as_slice(), expected.as_slice());
    }

    #[test]
    fn trail_advances_even_when_throttled() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);

        let first = f.scene.update(&mut f.state, &Vec2::new(1.0, 1.0));
        assert_eq!(first, RenderOutcome::Presented);
        let second = f.scene.update(&mut f.state, &Vec2::new(2.0, 2.0));
        assert_eq!(second, RenderOutcome::Throttled);
        assert_eq!(f.scene.trail().newest(), Vec2::new(2.0, 2.0));
        assert_eq!(f.scene.trail().samples()[1], Vec2::new(1.0, 1.0));
    }

    // ── frame governance ──────────────────────────────────────────────────

    #[test]
    fn first_render_is_never_throttled() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);
        assert_eq!(f.frame_clock.now(), Duration::ZERO);

        let outcome = f.scene.update(&mut f.state, &Vec2::zero());
        assert_eq!(outcome, RenderOutcome::Presented);
        assert_eq!(f.ctx.log.borrow().draws.len(), 1);
    }

    #[test]
    fn renders_are_spaced_by_max_fps() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);
        let pointer = Vec2::new(5.0, 5.0);

        f.frame_clock.set(ms(1000));
        assert_eq!(f.scene.update(&mut f.state, &pointer), RenderOutcome::Presented);

        f.frame_clock.set(ms(1010));
        assert_eq!(f.scene.update(&mut f.state, &pointer), RenderOutcome::Throttled);

        f.frame_clock.set(ms(1040));
        assert_eq!(f.scene.update(&mut f.state, &pointer), RenderOutcome::Presented);

        assert_eq!(f.ctx.log.borrow().draws.len(), 2);
    }

    #[test]
    fn time_until_next_frame_counts_down_on_the_scene_clock() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);
        assert_eq!(f.scene.time_until_next_frame(), Duration::ZERO);

        f.frame_clock.set(ms(1000));
        let outcome = f.scene.update(&mut f.state, &Vec2::zero());
        assert_eq!(outcome, RenderOutcome::Presented);
        let full = f.scene.time_until_next_frame();
        assert!(full > ms(33) && full < ms(34));

        f.frame_clock.set(ms(1010));
        let outcome = f.scene.update(&mut f.state, &Vec2::zero());
        assert_eq!(outcome, RenderOutcome::Throttled);
        assert_eq!(f.scene.time_until_next_frame(), full - ms(10));

        f.frame_clock.set(ms(1040));
        assert_eq!(f.scene.time_until_next_frame(), Duration::ZERO);
    }

    #[test]
    fn render_copies_current_time() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let mut f = fixture(&display);

        f.render_clock.advance(ms(1250));
        f.state.update();
        f.scene.update(&mut f.state, &Vec2::zero());

        let log = f.ctx.log.borrow();
        let drawn = log.draws.last().unwrap();
        assert!((drawn.time - 2.5).abs() < 1e-6);
        assert_eq!(drawn.resolution, Viewport::new(800, 600));
    }

    #[test]
    fn update_before_init_skips_draw() {
        let display = FakeDisplay::new(800, 600, 1.0);
        let ctx = RecordingContext::default();
        let context = Box::new(ctx.clone());
        let mut state = RenderState::new(Some(&display), Some(context));
        let mut scene = Scene::with_clock(&state, Box::new(ManualClock::new()));

        assert_eq!(scene.update(&mut state, &Vec2::zero()), RenderOutcome::Uninitialized);
        assert!(ctx.log.borrow().draws.is_empty());
    }

    // ── headless ──────────────────────────────────────────────────────────

    #[test]
    fn headless_lifecycle_keeps_bookkeeping() {
        let mut state = RenderState::headless();
        let clock = ManualClock::new();
        let mut scene = Scene::with_clock(&state, Box::new(clock.clone()));

        state.init();
        scene.init(&state);
        state.resize();
        scene.resize(&state);

        for i in 0..20 {
            clock.advance(ms(40));
            state.update();
            let outcome = scene.update(&mut state, &Vec2::new(i as f32, 0.0));
            assert_eq!(outcome, RenderOutcome::NoContext);
            assert_eq!(state.elapsed_time(), 0.0);
        }
        assert_eq!(scene.trail().newest(), Vec2::new(19.0, 0.0));
        assert_eq!(scene.camera().aspect, 1.0);
    }
}
