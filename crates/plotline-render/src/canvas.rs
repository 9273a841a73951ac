//! The shared drawing surface.
//!
//! A [`Canvas`] is an RGB pixel buffer the plotting backend draws into. It is
//! shared through [`SharedCanvas`] and only reachable through a
//! [`CanvasGuard`], which holds the lock and clears the surface on drop. The
//! clear runs on every exit path: normal return, early `?` return and panic
//! unwinding alike.

use parking_lot::{Mutex, MutexGuard};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::trace;

/// Bytes per pixel of the RGB buffer.
pub const BYTES_PER_PIXEL: usize = 3;

/// An RGB pixel buffer of fixed size.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    series_drawn: usize,
}

impl Canvas {
    /// Creates a blank canvas.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            pixels: vec![0; len],
            series_drawn: 0,
        }
    }

    /// `(width, height)` in pixels.
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw RGB bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Number of series drawn since the last clear.
    pub const fn series_drawn(&self) -> usize {
        self.series_drawn
    }

    pub(crate) fn record_series(&mut self) {
        self.series_drawn += 1;
    }

    /// True when nothing has been drawn since the last clear.
    pub fn is_blank(&self) -> bool {
        self.series_drawn == 0 && self.pixels.iter().all(|&b| b == 0)
    }

    /// Wipes every pixel and forgets drawn series.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.series_drawn = 0;
    }
}

/// A canvas shared between renderers and threads.
#[derive(Debug, Clone)]
pub struct SharedCanvas {
    inner: Arc<Mutex<Canvas>>,
}

impl SharedCanvas {
    /// Creates a blank shared canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Canvas::new(width, height))),
        }
    }

    /// Blocks until the canvas is free and returns exclusive access to it.
    pub fn acquire(&self) -> CanvasGuard<'_> {
        let canvas = self.inner.lock();
        trace!("canvas acquired");
        CanvasGuard { canvas }
    }

    /// Size of the underlying canvas.
    pub fn size(&self) -> (u32, u32) {
        self.inner.lock().size()
    }

    /// Whether two handles point at the same canvas.
    pub fn same_canvas(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Exclusive access to a shared canvas. Clears the canvas when dropped.
pub struct CanvasGuard<'a> {
    canvas: MutexGuard<'a, Canvas>,
}

impl Deref for CanvasGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        &self.canvas
    }
}

impl DerefMut for CanvasGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}

impl Drop for CanvasGuard<'_> {
    fn drop(&mut self) {
        self.canvas.clear();
        trace!("canvas cleared and released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    fn scribble(canvas: &mut Canvas) {
        canvas.pixels_mut()[..6].copy_from_slice(&[255, 0, 0, 0, 255, 0]);
        canvas.record_series();
    }

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.pixels().len(), 4 * 3 * BYTES_PER_PIXEL);
        assert!(canvas.is_blank());
    }

    #[test]
    fn test_guard_clears_on_drop() {
        let shared = SharedCanvas::new(4, 4);
        {
            let mut guard = shared.acquire();
            scribble(&mut guard);
            assert!(!guard.is_blank());
            assert_eq!(guard.series_drawn(), 1);
        }
        assert!(shared.acquire().is_blank());
    }

    #[test]
    fn test_guard_clears_on_early_return() {
        fn failing_draw(shared: &SharedCanvas) -> Result<(), &'static str> {
            let mut guard = shared.acquire();
            scribble(&mut guard);
            let backend: Result<(), &'static str> = Err("backend failed");
            backend?;
            Ok(())
        }

        let shared = SharedCanvas::new(4, 4);
        assert!(failing_draw(&shared).is_err());
        assert!(shared.acquire().is_blank());
    }

    #[test]
    fn test_guard_clears_on_panic() {
        let shared = SharedCanvas::new(4, 4);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut guard = shared.acquire();
            scribble(&mut guard);
            panic!("draw exploded");
        }));

        assert!(result.is_err());
        let guard = shared.acquire();
        assert!(guard.is_blank());
    }

    #[test]
    fn test_clones_share_the_surface() {
        let a = SharedCanvas::new(2, 2);
        let b = a.clone();
        assert!(a.same_canvas(&b));
        assert!(!a.same_canvas(&SharedCanvas::new(2, 2)));
        assert_eq!(b.size(), (2, 2));
    }
}
