use crate::core::rotation::RotationState;
use crate::core::schedule::FrameScheduler;
use crate::core::store::SharedStore;
use crate::renderer::projector::project_sphere;
use crate::renderer::style::SphereStyle;
use crate::renderer::surface::{paint, Surface};
use crate::renderer::viewport::ViewportGeometry;

/// Counters for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ticks handled while started.
    pub ticks: u64,
    /// Ticks that painted a frame.
    pub painted: u64,
    /// Ticks that had no surface or no usable viewport.
    pub skipped: u64,
}

/// Self-perpetuating render loop for the globe.
///
/// Owns the drawing surface, the single outstanding frame registration and the
/// rotation state. Parameters and transport state are read from the shared
/// store once per tick; the loop never writes parameters.
///
/// Lifecycle: [`start`](Self::start) registers the first frame, the host calls
/// [`tick`](Self::tick) once per fired registration, and [`stop`](Self::stop)
/// (or dropping the loop) cancels whatever is still pending.
pub struct RenderLoop<S: Surface, F: FrameScheduler> {
    surface: Option<S>,
    scheduler: F,
    /// At most one registration is ever outstanding.
    pending: Option<F::Handle>,
    started: bool,
    store: SharedStore,
    rotation: RotationState,
    viewport: Option<ViewportGeometry>,
    style: SphereStyle,
    stats: FrameStats,
}

impl<S: Surface, F: FrameScheduler> RenderLoop<S, F> {
    /// Create a stopped loop with no surface attached.
    pub fn new(store: SharedStore, scheduler: F) -> Self {
        Self {
            surface: None,
            scheduler,
            pending: None,
            started: false,
            store,
            rotation: RotationState::new(),
            viewport: None,
            style: SphereStyle::default(),
            stats: FrameStats::default(),
        }
    }

    /// Create a stopped loop drawing into `surface`.
    pub fn with_surface(store: SharedStore, scheduler: F, surface: S) -> Self {
        let mut render_loop = Self::new(store, scheduler);
        render_loop.attach_surface(surface);
        render_loop
    }

    // -- Lifecycle --

    /// Begin ticking. Does nothing if a frame is already registered.
    pub fn start(&mut self) {
        if self.started && self.pending.is_some() {
            return;
        }
        self.started = true;
        log::info!("globe: render loop started");
        self.schedule_next();
    }

    /// Stop ticking and cancel the pending registration before returning.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.started {
            self.started = false;
            log::info!("globe: render loop stopped after {} ticks", self.stats.ticks);
        }
    }

    /// Run one frame. Call exactly once per fired registration.
    ///
    /// `dt` is the wall-clock time since the previous frame in seconds; it only
    /// feeds the simulation clock. Rotation advances a fixed amount per tick.
    pub fn tick(&mut self, dt: f64) {
        if !self.started {
            return;
        }
        // The registration that brought us here has fired
        self.pending = None;
        self.stats.ticks += 1;

        self.advance(dt);
        self.render_frame();
        self.schedule_next();
    }

    fn advance(&mut self, dt: f64) {
        // A store borrowed elsewhere mid-frame means no advancement this tick
        let inputs = match self.store.try_borrow() {
            Ok(store) => store.snapshot(),
            Err(_) => {
                log::warn!("globe: parameter store busy, holding frame");
                return;
            }
        };
        if !inputs.running {
            return;
        }
        self.rotation.advance(inputs.rotation_speed);
        if let Ok(mut store) = self.store.try_borrow_mut() {
            store.advance_clock(dt);
        }
    }

    fn render_frame(&mut self) {
        let surface = match self.surface.as_mut() {
            Some(s) => s,
            None => {
                self.stats.skipped += 1;
                return;
            }
        };
        let viewport = match self.viewport {
            Some(vp) => vp,
            None => {
                self.stats.skipped += 1;
                return;
            }
        };
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            self.stats.skipped += 1;
            return;
        }

        let commands = project_sphere(&viewport, &self.style, self.rotation.angle());
        paint(surface, &commands);
        self.stats.painted += 1;
    }

    fn schedule_next(&mut self) {
        if !self.started || self.pending.is_some() {
            return;
        }
        match self.scheduler.request_frame() {
            Some(handle) => self.pending = Some(handle),
            None => {
                log::warn!("globe: host refused frame registration; loop halted");
                self.started = false;
            }
        }
    }

    // -- Surface and viewport --

    /// Attach a surface and lay out the globe for its current size.
    pub fn attach_surface(&mut self, surface: S) {
        let (width, height) = surface.size();
        log::info!("globe: attached {} surface {}x{}", surface.backend(), width, height);
        self.viewport = ViewportGeometry::from_size(width, height);
        self.surface = Some(surface);
    }

    /// Detach the surface. Ticks keep firing but paint nothing until a new one arrives.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.viewport = None;
        self.surface.take()
    }

    /// Recompute the layout for a new surface size.
    /// Zero, negative or non-finite sizes leave no viewport (frames are skipped).
    /// Rotation and simulation time are untouched.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = ViewportGeometry::from_dimensions(width, height);
        match &self.viewport {
            Some(vp) => log::debug!("globe: resized to {}x{} (radius {:.1})", vp.width, vp.height, vp.radius),
            None => log::debug!("globe: ignoring degenerate size {}x{}", width, height),
        }
    }

    // -- Accessors --

    pub fn angle(&self) -> f32 {
        self.rotation.angle()
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn viewport(&self) -> Option<&ViewportGeometry> {
        self.viewport.as_ref()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether a frame registration is currently outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<S: Surface, F: FrameScheduler> Drop for RenderLoop<S, F> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f32::consts::TAU;
    use std::rc::Rc;

    use crate::core::rotation::ANGLE_GAIN;
    use crate::core::schedule::ManualScheduler;
    use crate::core::store::ParameterStore;
    use crate::renderer::projector::DrawCommand;
    use crate::renderer::surface::{RecordingSurface, SurfaceCall};

    const DT: f64 = 1.0 / 60.0;

    type TestLoop = RenderLoop<RecordingSurface, ManualScheduler>;

    fn make_loop(width: u32, height: u32) -> (TestLoop, SharedStore) {
        let store = ParameterStore::new().shared();
        let render_loop = RenderLoop::with_surface(
            Rc::clone(&store),
            ManualScheduler::new(),
            RecordingSurface::new(width, height),
        );
        (render_loop, store)
    }

    /// Fire the pending registration and run the tick it triggers.
    fn run_frames(render_loop: &mut TestLoop, n: usize) {
        for _ in 0..n {
            assert!(render_loop.scheduler_mut().fire(), "no frame was pending");
            render_loop.tick(DT);
        }
    }

    fn spoke_directions(calls: &[SurfaceCall]) -> Vec<f32> {
        calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Draw(DrawCommand::StrokeLine { from, to, .. }) => {
                    let d = *to - *from;
                    Some(d.y.atan2(d.x).rem_euclid(TAU))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn angle_after_n_ticks_matches_closed_form() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().set_rotation_speed(1.3);
        store.borrow_mut().play();
        rl.start();

        run_frames(&mut rl, 250);
        let expected = (250.0_f64 * 1.3_f32 as f64 * ANGLE_GAIN as f64)
            .rem_euclid(std::f64::consts::TAU) as f32;
        assert!((rl.angle() - expected).abs() < 1e-3, "{} vs {expected}", rl.angle());
    }

    #[test]
    fn pause_freezes_angle_and_resume_continues() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().set_rotation_speed(1.0);
        store.borrow_mut().play();
        rl.start();

        run_frames(&mut rl, 10);
        let frozen = rl.angle();
        let elapsed = store.borrow().clock().elapsed_seconds();

        store.borrow_mut().pause();
        run_frames(&mut rl, 50);
        assert_eq!(rl.angle(), frozen);
        assert_eq!(store.borrow().clock().elapsed_seconds(), elapsed);

        store.borrow_mut().play();
        run_frames(&mut rl, 1);
        assert!((rl.angle() - (frozen + ANGLE_GAIN)).abs() < 1e-6);
    }

    #[test]
    fn paused_loop_keeps_painting() {
        let (mut rl, _store) = make_loop(800, 600);
        rl.start();
        run_frames(&mut rl, 3);
        assert_eq!(rl.angle(), 0.0);
        assert_eq!(rl.surface().unwrap().frame_count(), 3);
        assert_eq!(rl.stats().painted, 3);
    }

    #[test]
    fn reset_halts_but_keeps_angle() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().set_rotation_speed(2.0);
        store.borrow_mut().play();
        rl.start();

        // 30 ticks at 2.0 * 0.02 = 1.2 rad
        run_frames(&mut rl, 30);
        assert!((rl.angle() - 1.2).abs() < 1e-4);

        store.borrow_mut().reset();
        assert_eq!(store.borrow().clock().elapsed_seconds(), 0.0);
        assert!(!store.borrow().clock().is_running());

        run_frames(&mut rl, 5);
        assert!((rl.angle() - 1.2).abs() < 1e-4);
        assert_eq!(store.borrow().clock().elapsed_seconds(), 0.0);
    }

    #[test]
    fn elapsed_time_accumulates_while_running() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().play();
        rl.start();
        run_frames(&mut rl, 60);
        assert!((store.borrow().clock().elapsed_seconds() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn speed_change_applies_on_next_tick() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().set_rotation_speed(0.5);
        store.borrow_mut().play();
        rl.start();
        run_frames(&mut rl, 1);
        let before = rl.angle();

        store.borrow_mut().set_rotation_speed(2.0);
        run_frames(&mut rl, 1);
        assert!((rl.angle() - before - 2.0 * ANGLE_GAIN).abs() < 1e-6);
        // Parameter edits never register extra frames
        assert_eq!(rl.scheduler().outstanding(), 1);
    }

    #[test]
    fn resize_recenters_without_touching_state() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().play();
        rl.start();
        run_frames(&mut rl, 20);

        assert!((rl.viewport().unwrap().radius - 180.0).abs() < 1e-4);
        let angle = rl.angle();
        let elapsed = store.borrow().clock().elapsed_seconds();

        rl.resize(400.0, 300.0);
        let vp = rl.viewport().unwrap();
        assert!((vp.radius - 90.0).abs() < 1e-4);
        assert_eq!(vp.center, glam::Vec2::new(200.0, 150.0));
        assert_eq!(rl.angle(), angle);
        assert_eq!(store.borrow().clock().elapsed_seconds(), elapsed);
        assert!(rl.has_pending_frame());
    }

    #[test]
    fn frame_clears_whole_surface_after_mismatched_resize() {
        let (mut rl, _store) = make_loop(800, 600);
        rl.start();
        rl.resize(400.0, 300.0);
        run_frames(&mut rl, 1);

        let calls = rl.surface().unwrap().calls();
        assert_eq!(calls[0], SurfaceCall::Clear { width: 800, height: 600 });
        // The globe itself follows the resized layout
        match calls[1] {
            SurfaceCall::Draw(DrawCommand::FillGradientCircle { radius, .. }) => {
                assert!((radius - 90.0).abs() < 1e-4);
            }
            ref other => panic!("expected shaded disc, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_resize_skips_frames_but_keeps_ticking() {
        let (mut rl, _store) = make_loop(800, 600);
        rl.start();
        rl.resize(0.0, 600.0);
        assert!(rl.viewport().is_none());

        run_frames(&mut rl, 4);
        assert_eq!(rl.stats().skipped, 4);
        assert_eq!(rl.surface().unwrap().frame_count(), 0);
        assert!(rl.has_pending_frame());

        rl.resize(-20.0, 100.0);
        assert!(rl.viewport().is_none());
        rl.resize(640.0, 480.0);
        run_frames(&mut rl, 1);
        assert_eq!(rl.stats().painted, 1);
    }

    #[test]
    fn missing_surface_is_a_noop_that_reschedules() {
        let store = ParameterStore::new().shared();
        let mut rl: TestLoop = RenderLoop::new(Rc::clone(&store), ManualScheduler::new());
        store.borrow_mut().play();
        rl.start();

        run_frames(&mut rl, 3);
        assert_eq!(rl.stats().skipped, 3);
        assert_eq!(rl.scheduler().outstanding(), 1);

        rl.attach_surface(RecordingSurface::new(200, 100));
        assert!((rl.viewport().unwrap().radius - 30.0).abs() < 1e-4);
        run_frames(&mut rl, 1);
        assert_eq!(rl.surface().unwrap().frame_count(), 1);
    }

    #[test]
    fn detach_returns_surface_and_stops_painting() {
        let (mut rl, _store) = make_loop(100, 100);
        rl.start();
        run_frames(&mut rl, 1);
        let surface = rl.detach_surface().unwrap();
        assert_eq!(surface.frame_count(), 1);

        run_frames(&mut rl, 2);
        assert_eq!(rl.stats().skipped, 2);
        assert!(rl.viewport().is_none());
    }

    #[test]
    fn zero_sized_surface_is_skipped() {
        let (mut rl, _store) = make_loop(0, 0);
        rl.start();
        run_frames(&mut rl, 2);
        assert_eq!(rl.stats().skipped, 2);

        // Viewport set by a resize event while the surface still reports zero
        rl.resize(300.0, 300.0);
        run_frames(&mut rl, 1);
        assert_eq!(rl.stats().skipped, 3);

        rl.surface_mut().unwrap().set_size(300, 300);
        run_frames(&mut rl, 1);
        assert_eq!(rl.stats().painted, 1);
    }

    #[test]
    fn start_is_idempotent() {
        let (mut rl, _store) = make_loop(800, 600);
        rl.start();
        rl.start();
        rl.start();
        assert_eq!(rl.scheduler().outstanding(), 1);
        assert_eq!(rl.scheduler().requested(), 1);
    }

    #[test]
    fn only_one_registration_outstanding_while_running() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().play();
        rl.start();
        for i in 0..20 {
            store.borrow_mut().set_rotation_speed(i as f32 * 0.1);
            run_frames(&mut rl, 1);
            assert_eq!(rl.scheduler().outstanding(), 1);
        }
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let (mut rl, _store) = make_loop(800, 600);
        rl.start();
        run_frames(&mut rl, 2);
        rl.stop();
        assert!(!rl.has_pending_frame());
        assert_eq!(rl.scheduler().outstanding(), 0);
        assert_eq!(rl.scheduler().cancelled(), 1);

        // A stray tick after stop does nothing and registers nothing
        rl.tick(DT);
        assert_eq!(rl.scheduler().outstanding(), 0);
        assert_eq!(rl.stats().ticks, 2);
    }

    #[test]
    fn restart_after_stop_resumes_from_same_angle() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().play();
        rl.start();
        run_frames(&mut rl, 10);
        let angle = rl.angle();

        rl.stop();
        rl.start();
        assert_eq!(rl.angle(), angle);
        assert_eq!(rl.scheduler().outstanding(), 1);
        run_frames(&mut rl, 1);
        assert!(rl.angle() > angle);
    }

    #[test]
    fn drop_leaves_no_pending_registration() {
        let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
        {
            let store = ParameterStore::new().shared();
            let mut rl: RenderLoop<RecordingSurface, _> = RenderLoop::with_surface(
                store,
                Rc::clone(&scheduler),
                RecordingSurface::new(800, 600),
            );
            rl.start();
            assert_eq!(scheduler.borrow().outstanding(), 1);
        }
        assert_eq!(scheduler.borrow().outstanding(), 0);
        assert_eq!(scheduler.borrow().cancelled(), 1);
    }

    #[test]
    fn refused_registration_halts_loop() {
        let (mut rl, _store) = make_loop(800, 600);
        rl.scheduler_mut().refuse = true;
        rl.start();
        assert!(!rl.is_started());
        assert!(!rl.has_pending_frame());

        rl.scheduler_mut().refuse = false;
        rl.start();
        assert!(rl.has_pending_frame());
    }

    #[test]
    fn non_finite_speed_does_not_corrupt_angle() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().set_rotation_speed(1.0);
        store.borrow_mut().play();
        rl.start();
        run_frames(&mut rl, 5);
        let angle = rl.angle();

        store.borrow_mut().set_rotation_speed(f32::NAN);
        run_frames(&mut rl, 5);
        assert_eq!(rl.angle(), angle);

        store.borrow_mut().set_rotation_speed(1.0);
        run_frames(&mut rl, 1);
        assert!(rl.angle().is_finite() && rl.angle() > angle);
    }

    #[test]
    fn busy_store_holds_the_frame() {
        let (mut rl, store) = make_loop(800, 600);
        store.borrow_mut().play();
        rl.start();
        let guard = store.borrow_mut();
        run_frames(&mut rl, 1);
        drop(guard);
        assert_eq!(rl.angle(), 0.0);
        assert_eq!(rl.stats().painted, 1);
        assert!(rl.has_pending_frame());
    }

    #[test]
    fn painted_spokes_follow_the_angle() {
        let (mut rl, store) = make_loop(400, 400);
        store.borrow_mut().set_rotation_speed(1.0);
        store.borrow_mut().play();
        rl.start();
        run_frames(&mut rl, 1);

        let calls = rl.surface_mut().unwrap().take_calls();
        assert_eq!(calls[0], SurfaceCall::Clear { width: 400, height: 400 });
        let dirs = spoke_directions(&calls);
        assert_eq!(dirs.len(), 8);
        assert!((dirs[0] - ANGLE_GAIN).abs() < 1e-4);
        for (k, d) in dirs.iter().enumerate() {
            let want = (ANGLE_GAIN + k as f32 * TAU / 8.0).rem_euclid(TAU);
            assert!((d - want).abs() < 1e-4, "spoke {k}: {d} vs {want}");
        }
    }
}
