use crate::approx::{Tolerance, approximately_equal};

/// Widest scrollbar we expect to eat into a measurement.
///
/// Windows draws ~14px, macOS overlays (0px). 20px covers both.
pub const SCROLL_TOLERANCE: i32 = 20;

/// Whether two sizes only differ by the room a scrollbar takes.
///
/// Argument order matters: a scrollbar only ever shrinks the available area, so the
/// size measured without it may never exceed the size measured with it.
pub fn is_same_size_allowing_scrollbar(without_scrollbar: i32, with_scrollbar: i32) -> bool {
    ScrollbarComparator::default().same_size(without_scrollbar, with_scrollbar)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarComparator {
    tolerance: i32,
}

impl Default for ScrollbarComparator {
    fn default() -> Self {
        Self::new(SCROLL_TOLERANCE)
    }
}

impl ScrollbarComparator {
    pub fn new(tolerance: i32) -> Self {
        Self {
            tolerance: tolerance.max(0),
        }
    }

    pub fn tolerance(&self) -> i32 {
        self.tolerance
    }

    pub fn same_size(&self, without_scrollbar: i32, with_scrollbar: i32) -> bool {
        without_scrollbar <= with_scrollbar
            && approximately_equal(
                f64::from(without_scrollbar),
                f64::from(with_scrollbar),
                &Tolerance::absolute(f64::from(self.tolerance)),
            )
    }
}
