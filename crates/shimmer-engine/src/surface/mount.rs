use crate::coords::Vec2;
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::{ContainerSize, FrameLoop, FrameScheduler, ResizeSource, SurfaceSize};

/// An engine that can be mounted into a host surface.
///
/// `ctx` is `None` when the host has no drawing context; engines must degrade
/// to drawing nothing rather than failing.
pub trait SurfaceEngine {
    /// Builds engine state for a freshly mounted surface.
    fn acquire(&mut self, ctx: Option<&RenderCtx<'_>>, size: SurfaceSize);

    /// Rebuilds size-dependent state.
    fn resize(&mut self, ctx: Option<&RenderCtx<'_>>, size: SurfaceSize);

    /// Pointer position in surface pixels; `None` once it leaves.
    fn pointer(&mut self, position: Option<Vec2>) {
        let _ = position;
    }

    /// Whether another frame could change what is on screen.
    ///
    /// Engines that can never draw (no context, terminal failure) return
    /// `false` and the loop stops rescheduling until something asks again.
    fn wants_frames(&self) -> bool {
        true
    }

    /// Advances and draws one frame.
    fn frame(&mut self, time: &FrameTime, gpu: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>);

    /// Frees every CPU and GPU resource. Must be safe to call twice.
    fn release(&mut self);
}

/// An engine bound to a resize source and a frame loop.
pub struct Mount<E: SurfaceEngine> {
    engine: E,
    resize: Box<dyn ResizeSource>,
    frames: FrameLoop,
    size: SurfaceSize,
    mounted: bool,
}

impl<E: SurfaceEngine> Mount<E> {
    /// Sizes the surface, acquires the engine and starts the frame loop.
    pub fn mount(
        mut engine: E,
        container: ContainerSize,
        resize: Box<dyn ResizeSource>,
        scheduler: Box<dyn FrameScheduler>,
        ctx: Option<&RenderCtx<'_>>,
    ) -> Self {
        let size = SurfaceSize::from_container(container);
        log::debug!("mount: {}x{} surface px (ratio {})", size.width, size.height, size.ratio);
        engine.acquire(ctx, size);

        let mut frames = FrameLoop::new(scheduler);
        frames.start();

        Self {
            engine,
            resize,
            frames,
            size,
            mounted: true,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Forwards a logical-pixel pointer position to the engine in surface pixels.
    pub fn pointer_moved(&mut self, logical: Option<Vec2>) {
        if !self.mounted {
            return;
        }
        let size = self.size;
        self.engine.pointer(logical.map(|p| size.to_surface(p)));
    }

    /// Runs one frame. Returns `false` (doing nothing) once unmounted.
    ///
    /// Pending resizes are applied before the engine's frame.
    pub fn tick(
        &mut self,
        time: &FrameTime,
        gpu: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>,
    ) -> bool {
        if !self.mounted || !self.frames.is_live() {
            return false;
        }

        if let Some(container) = self.resize.poll() {
            let size = SurfaceSize::from_container(container);
            if size != self.size {
                log::debug!("resize: {}x{} surface px", size.width, size.height);
                self.size = size;
                let ctx = gpu.as_ref().map(|(ctx, _)| *ctx);
                self.engine.resize(ctx, size);
            }
        }

        self.engine.frame(time, gpu);
        if self.engine.wants_frames() {
            self.frames.reschedule();
        }
        true
    }

    /// Schedules one more frame, e.g. after the container changed.
    pub fn request_frame(&self) {
        if self.mounted {
            self.frames.reschedule();
        }
    }

    /// Cancels the loop, detaches resize delivery and releases the engine.
    ///
    /// Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.frames.cancel();
        self.resize.detach();
        self.engine.release();
        log::debug!("unmount");
    }
}

impl<E: SurfaceEngine> Drop for Mount<E> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::super::frame_loop::tests::CountingScheduler;
    use super::super::observe;
    use super::*;

    #[derive(Default)]
    struct Log {
        acquired: Vec<SurfaceSize>,
        resized: Vec<SurfaceSize>,
        pointers: Vec<Option<Vec2>>,
        frames: usize,
        released: usize,
        idle: bool,
    }

    struct Recorder(Rc<RefCell<Log>>);

    impl SurfaceEngine for Recorder {
        fn acquire(&mut self, _ctx: Option<&RenderCtx<'_>>, size: SurfaceSize) {
            self.0.borrow_mut().acquired.push(size);
        }
        fn resize(&mut self, _ctx: Option<&RenderCtx<'_>>, size: SurfaceSize) {
            self.0.borrow_mut().resized.push(size);
        }
        fn pointer(&mut self, position: Option<Vec2>) {
            self.0.borrow_mut().pointers.push(position);
        }
        fn frame(&mut self, _t: &FrameTime, _gpu: Option<(&RenderCtx<'_>, &mut RenderTarget<'_>)>) {
            self.0.borrow_mut().frames += 1;
        }
        fn release(&mut self) {
            self.0.borrow_mut().released += 1;
        }
        fn wants_frames(&self) -> bool {
            !self.0.borrow().idle
        }
    }

    fn container(w: f32, h: f32) -> ContainerSize {
        ContainerSize::new(w, h, 2.0)
    }

    fn mount_recorder() -> (Mount<Recorder>, Rc<RefCell<Log>>, CountingScheduler, super::super::ResizeObserver) {
        let log = Rc::new(RefCell::new(Log::default()));
        let sched = CountingScheduler::default();
        let (obs, src) = observe();
        let m = Mount::mount(
            Recorder(Rc::clone(&log)),
            container(400.0, 300.0),
            Box::new(src),
            Box::new(sched.clone()),
            None,
        );
        (m, log, sched, obs)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn mount_acquires_at_capped_size_and_schedules_once() {
        let (m, log, sched, _obs) = mount_recorder();
        assert_eq!(log.borrow().acquired.len(), 1);
        assert_eq!((m.size().width, m.size().height), (800, 600));
        assert_eq!(sched.0.get(), 1);
    }

    #[test]
    fn each_tick_reschedules() {
        let (mut m, log, sched, _obs) = mount_recorder();
        for i in 0..3 {
            assert!(m.tick(&FrameTime::fixed(1.0 / 60.0, i), None));
        }
        assert_eq!(log.borrow().frames, 3);
        assert_eq!(sched.0.get(), 4);
    }

    #[test]
    fn unmount_leaves_no_scheduled_frames() {
        let (mut m, log, sched, obs) = mount_recorder();
        m.tick(&FrameTime::fixed(1.0 / 60.0, 0), None);
        let before = sched.0.get();

        m.unmount();
        m.unmount();
        assert_eq!(log.borrow().released, 1);

        assert!(!m.tick(&FrameTime::fixed(1.0 / 60.0, 1), None));
        assert_eq!(sched.0.get(), before);
        assert_eq!(log.borrow().frames, 1);
        // resize delivery is detached too
        assert!(!obs.notify(container(1.0, 1.0)));
    }

    #[test]
    fn drop_releases_once() {
        let (m, log, _sched, _obs) = mount_recorder();
        drop(m);
        assert_eq!(log.borrow().released, 1);
    }

    #[test]
    fn repeated_cycles_release_every_mount() {
        let log = Rc::new(RefCell::new(Log::default()));
        let count = Rc::new(Cell::new(0));
        for _ in 0..5 {
            let (_obs, src) = observe();
            let mut m = Mount::mount(
                Recorder(Rc::clone(&log)),
                container(10.0, 10.0),
                Box::new(src),
                Box::new(CountingScheduler(Rc::clone(&count))),
                None,
            );
            m.tick(&FrameTime::fixed(0.016, 0), None);
            m.unmount();
        }
        assert_eq!(log.borrow().acquired.len(), 5);
        assert_eq!(log.borrow().released, 5);
        assert_eq!(count.get(), 10);
    }

    // ── idle engines ──────────────────────────────────────────────────────

    #[test]
    fn idle_engine_stops_rescheduling() {
        let (mut m, log, sched, _obs) = mount_recorder();
        log.borrow_mut().idle = true;
        for i in 0..100 {
            assert!(m.tick(&FrameTime::fixed(1.0 / 60.0, i), None));
        }
        assert_eq!(log.borrow().frames, 100);
        assert_eq!(sched.0.get(), 1);

        m.request_frame();
        assert_eq!(sched.0.get(), 2);
        m.unmount();
        m.request_frame();
        assert_eq!(sched.0.get(), 2);
    }

    fn mount_without_context<E: SurfaceEngine>(engine: E) -> (Mount<E>, CountingScheduler) {
        let sched = CountingScheduler::default();
        let (_obs, src) = observe();
        let m = Mount::mount(
            engine,
            container(400.0, 300.0),
            Box::new(src),
            Box::new(sched.clone()),
            None,
        );
        (m, sched)
    }

    #[test]
    fn contextless_particle_field_schedules_only_the_first_frame() {
        let field = crate::particles::ParticleField::new(Default::default()).seeded(7);
        let (mut m, sched) = mount_without_context(field);
        for i in 0..100 {
            m.tick(&FrameTime::fixed(1.0 / 60.0, i), None);
        }
        assert!(!m.engine().has_context());
        assert_eq!(sched.0.get(), 1);
    }

    #[test]
    fn contextless_shader_surface_schedules_only_the_first_frame() {
        let surface = crate::shader::ShaderSurface::new(Default::default());
        let (mut m, sched) = mount_without_context(surface);
        for i in 0..100 {
            m.tick(&FrameTime::fixed(1.0 / 60.0, i), None);
        }
        assert!(m.engine().notice().is_some());
        assert_eq!(sched.0.get(), 1);
    }

    // ── resize & pointer ──────────────────────────────────────────────────

    #[test]
    fn resize_is_applied_before_the_frame() {
        let (mut m, log, _sched, obs) = mount_recorder();
        obs.notify(container(100.0, 50.0));
        obs.notify(container(200.0, 100.0));
        m.tick(&FrameTime::fixed(0.016, 0), None);

        let log = log.borrow();
        assert_eq!(log.resized.len(), 1);
        assert_eq!((log.resized[0].width, log.resized[0].height), (400, 200));
    }

    #[test]
    fn unchanged_size_does_not_resize() {
        let (mut m, log, _sched, obs) = mount_recorder();
        obs.notify(container(400.0, 300.0));
        m.tick(&FrameTime::fixed(0.016, 0), None);
        assert!(log.borrow().resized.is_empty());
    }

    #[test]
    fn pointer_is_forwarded_in_surface_pixels() {
        let (mut m, log, _sched, _obs) = mount_recorder();
        m.pointer_moved(Some(Vec2::new(5.0, 6.0)));
        m.pointer_moved(None);
        assert_eq!(log.borrow().pointers, vec![Some(Vec2::new(10.0, 12.0)), None]);
    }
}
