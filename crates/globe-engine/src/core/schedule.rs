use std::cell::RefCell;
use std::rc::Rc;

/// Host-side "call me on the next display refresh" registration.
///
/// The browser host wraps `requestAnimationFrame`; native hosts can wrap a
/// vsync callback or a timer. When a registered frame fires, the host calls
/// [`RenderLoop::tick`](crate::api::render_loop::RenderLoop::tick).
pub trait FrameScheduler {
    /// Opaque token identifying one outstanding registration.
    type Handle;

    /// Register a callback for the next display refresh.
    /// Returns `None` if the host refused the registration.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel a registration that has not fired yet.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Lets a host keep its own handle on a scheduler the loop also drives.
impl<T: FrameScheduler> FrameScheduler for Rc<RefCell<T>> {
    type Handle = T::Handle;

    fn request_frame(&mut self) -> Option<Self::Handle> {
        self.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: Self::Handle) {
        self.borrow_mut().cancel_frame(handle);
    }
}

/// Scheduler that only counts registrations; frames fire when the caller says so.
///
/// Useful for headless hosts and tests. Handles are monotonically increasing ids.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    outstanding: Vec<u64>,
    requested: u64,
    cancelled: u64,
    /// When set, every request is refused.
    pub refuse: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations that are still waiting to fire.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Total registrations ever made.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total registrations cancelled before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Mark the oldest registration as fired. Returns false if nothing was pending.
    /// The caller is expected to run the loop's tick afterwards.
    pub fn fire(&mut self) -> bool {
        if self.outstanding.is_empty() {
            return false;
        }
        self.outstanding.remove(0);
        true
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        if self.refuse {
            return None;
        }
        self.next_handle += 1;
        self.requested += 1;
        self.outstanding.push(self.next_handle);
        Some(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if let Some(idx) = self.outstanding.iter().position(|&h| h == handle) {
            self.outstanding.remove(idx);
            self.cancelled += 1;
        }
    }
}
