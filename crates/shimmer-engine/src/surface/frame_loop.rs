use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Asks the host to run one more frame.
pub trait FrameScheduler {
    fn request_frame(&self);
}

/// Shared cancellation flag for a frame loop.
#[derive(Debug, Clone, Default)]
struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Self-rescheduling frame loop.
///
/// Each tick checks the cancellation flag first and requests the following
/// frame only while the loop is live, so no frame is scheduled after `cancel`.
pub struct FrameLoop {
    scheduler: Box<dyn FrameScheduler>,
    cancel: CancelHandle,
    started: bool,
}

impl FrameLoop {
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            cancel: CancelHandle::default(),
            started: false,
        }
    }

    /// Requests the first frame. Repeated calls are no-ops.
    pub fn start(&mut self) {
        if self.started || self.cancel.is_cancelled() {
            return;
        }
        self.started = true;
        self.scheduler.request_frame();
    }

    /// Whether the current tick should run.
    pub fn is_live(&self) -> bool {
        self.started && !self.cancel.is_cancelled()
    }

    /// Schedules the next frame unless cancelled in the meantime.
    pub fn reschedule(&self) {
        if self.is_live() {
            self.scheduler.request_frame();
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Scheduler that only counts requests.
    #[derive(Clone, Default)]
    pub(crate) struct CountingScheduler(pub Rc<Cell<usize>>);

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn start_requests_exactly_one_frame() {
        let s = CountingScheduler::default();
        let mut fl = FrameLoop::new(Box::new(s.clone()));
        fl.start();
        fl.start();
        assert_eq!(s.0.get(), 1);
        assert!(fl.is_live());
    }

    #[test]
    fn cancel_stops_rescheduling() {
        let s = CountingScheduler::default();
        let mut fl = FrameLoop::new(Box::new(s.clone()));
        fl.start();
        fl.reschedule();
        assert_eq!(s.0.get(), 2);

        fl.cancel();
        fl.reschedule();
        assert_eq!(s.0.get(), 2);
        assert!(!fl.is_live());
    }

    #[test]
    fn cancelled_loop_never_starts() {
        let s = CountingScheduler::default();
        let mut fl = FrameLoop::new(Box::new(s.clone()));
        fl.cancel();
        fl.start();
        assert_eq!(s.0.get(), 0);
    }
}
