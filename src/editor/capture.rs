//! Pointer capture for drags that leave the editor bounds.
//!
//! While a drag is active the host must keep delivering move/up events from
//! a broader region (typically the whole viewport). The capture is held as a
//! guard and released on pointer-up, and on drop if the editor is torn down
//! mid-drag.

use std::fmt;
use std::rc::Rc;

/// Host hook for widening pointer delivery during a drag.
pub trait PointerCapture {
    fn acquire(&self);
    fn release(&self);
}

/// Capture that does nothing; for hosts with implicit pointer capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// An acquired capture; releases when dropped.
pub struct CaptureGuard {
    region: Rc<dyn PointerCapture>,
}

impl CaptureGuard {
    pub fn acquire(region: &Rc<dyn PointerCapture>) -> Self {
        region.acquire();
        CaptureGuard {
            region: Rc::clone(region),
        }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.region.release();
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard").finish_non_exhaustive()
    }
}

/// Holds a guard exactly while a drag is active.
pub struct DragCapture {
    region: Rc<dyn PointerCapture>,
    guard: Option<CaptureGuard>,
}

impl DragCapture {
    pub fn new(region: Rc<dyn PointerCapture>) -> Self {
        DragCapture { region, guard: None }
    }

    /// Acquire or release to match `dragging`.
    pub fn sync(&mut self, dragging: bool) {
        match (dragging, self.guard.is_some()) {
            (true, false) => self.guard = Some(CaptureGuard::acquire(&self.region)),
            (false, true) => self.guard = None,
            _ => {}
        }
    }

    pub fn is_held(&self) -> bool {
        self.guard.is_some()
    }
}

impl Default for DragCapture {
    fn default() -> Self {
        DragCapture::new(Rc::new(NoCapture))
    }
}

impl fmt::Debug for DragCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragCapture")
            .field("held", &self.is_held())
            .finish()
    }
}
