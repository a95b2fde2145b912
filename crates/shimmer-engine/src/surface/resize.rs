use crossbeam_channel::{Receiver, Sender, TryRecvError};

use super::ContainerSize;

/// Source of container size changes.
pub trait ResizeSource {
    /// Latest size since the previous poll, if it changed.
    fn poll(&mut self) -> Option<ContainerSize>;

    /// Stops observing; later polls return `None`.
    fn detach(&mut self);
}

/// Host side of an observed resize stream.
///
/// `Send + Clone`, so notifications may come from any thread; they are
/// serialized through the channel and applied on the frame thread.
#[derive(Debug, Clone)]
pub struct ResizeObserver {
    tx: Sender<ContainerSize>,
}

impl ResizeObserver {
    /// Publishes a new container size. Returns `false` once the receiving side
    /// has been detached.
    pub fn notify(&self, size: ContainerSize) -> bool {
        self.tx.send(size).is_ok()
    }
}

/// Engine side of an observed resize stream. Coalesces to the latest size.
#[derive(Debug)]
pub struct ObservedResize {
    rx: Option<Receiver<ContainerSize>>,
}

/// Creates a connected observer pair.
pub fn observe() -> (ResizeObserver, ObservedResize) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (ResizeObserver { tx }, ObservedResize { rx: Some(rx) })
}

impl ResizeSource for ObservedResize {
    fn poll(&mut self) -> Option<ContainerSize> {
        let rx = self.rx.as_ref()?;
        let mut latest = None;
        loop {
            match rx.try_recv() {
                Ok(size) => latest = Some(size),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("resize observer dropped");
                    break;
                }
            }
        }
        latest
    }

    fn detach(&mut self) {
        self.rx = None;
    }
}

/// Fallback that asks `read_size` for the current size every poll and reports
/// only changes.
pub struct PolledResize<F> {
    read_size: Option<F>,
    last: Option<ContainerSize>,
}

impl<F> PolledResize<F>
where
    F: FnMut() -> Option<ContainerSize>,
{
    pub fn new(read_size: F) -> Self {
        Self { read_size: Some(read_size), last: None }
    }
}

impl<F> ResizeSource for PolledResize<F>
where
    F: FnMut() -> Option<ContainerSize>,
{
    fn poll(&mut self) -> Option<ContainerSize> {
        let read_size = self.read_size.as_mut()?;
        let now = read_size()?;
        if self.last == Some(now) {
            return None;
        }
        self.last = Some(now);
        Some(now)
    }

    fn detach(&mut self) {
        self.read_size = None;
    }
}

/// Resize delivery chosen at mount time.
pub enum ResizeStrategy {
    Observed(ObservedResize),
    Polled(PolledResize<Box<dyn FnMut() -> Option<ContainerSize>>>),
}

impl ResizeStrategy {
    /// Uses the observer when the host provides one, otherwise degrades to
    /// polling `read_size`.
    pub fn select(
        observed: Option<ObservedResize>,
        read_size: Box<dyn FnMut() -> Option<ContainerSize>>,
    ) -> Self {
        match observed {
            Some(o) => ResizeStrategy::Observed(o),
            None => {
                log::warn!("resize observer unavailable; polling container size");
                ResizeStrategy::Polled(PolledResize::new(read_size))
            }
        }
    }

    pub fn is_polling(&self) -> bool {
        matches!(self, ResizeStrategy::Polled(_))
    }
}

impl ResizeSource for ResizeStrategy {
    fn poll(&mut self) -> Option<ContainerSize> {
        match self {
            ResizeStrategy::Observed(o) => o.poll(),
            ResizeStrategy::Polled(p) => p.poll(),
        }
    }

    fn detach(&mut self) {
        match self {
            ResizeStrategy::Observed(o) => o.detach(),
            ResizeStrategy::Polled(p) => p.detach(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn size(w: f32) -> ContainerSize {
        ContainerSize::new(w, 100.0, 1.0)
    }

    // ── observed ──────────────────────────────────────────────────────────

    #[test]
    fn observed_coalesces_to_latest() {
        let (obs, mut src) = observe();
        assert!(obs.notify(size(10.0)));
        assert!(obs.notify(size(20.0)));
        assert!(obs.notify(size(30.0)));
        assert_eq!(src.poll(), Some(size(30.0)));
        assert_eq!(src.poll(), None);
    }

    #[test]
    fn observed_accepts_notifications_from_other_threads() {
        let (obs, mut src) = observe();
        let handle = std::thread::spawn(move || obs.notify(size(42.0)));
        assert!(handle.join().unwrap_or(false));
        assert_eq!(src.poll(), Some(size(42.0)));
    }

    #[test]
    fn detach_disconnects_observer() {
        let (obs, mut src) = observe();
        src.detach();
        assert!(!obs.notify(size(1.0)));
        assert_eq!(src.poll(), None);
    }

    // ── polled ────────────────────────────────────────────────────────────

    #[test]
    fn polled_reports_changes_only() {
        let width = Rc::new(Cell::new(10.0));
        let w = Rc::clone(&width);
        let mut src = PolledResize::new(move || Some(size(w.get())));

        assert_eq!(src.poll(), Some(size(10.0)));
        assert_eq!(src.poll(), None);
        width.set(20.0);
        assert_eq!(src.poll(), Some(size(20.0)));

        src.detach();
        width.set(30.0);
        assert_eq!(src.poll(), None);
    }

    // ── strategy ──────────────────────────────────────────────────────────

    #[test]
    fn strategy_degrades_to_polling_without_observer() {
        let s = ResizeStrategy::select(None, Box::new(|| Some(size(5.0))));
        assert!(s.is_polling());

        let (_obs, src) = observe();
        let s = ResizeStrategy::select(Some(src), Box::new(|| None));
        assert!(!s.is_polling());
    }
}
