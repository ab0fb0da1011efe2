use serde::{Serialize, Serializer};

use crate::{
    geometry::{Axis, GeometrySnapshot},
    overflow::overflows,
    scrollbar::ScrollbarComparator,
    services::platform::Platform,
};

/// Width the host renders overflow-menu popups at on Windows.
pub const WINDOWS_OVERFLOW_WIDTH: i32 = 348;
/// Width the host renders overflow-menu popups at everywhere else.
pub const DEFAULT_OVERFLOW_WIDTH: i32 = 425;

pub const TOOLBAR_MAX_WIDTH: i32 = 800;
pub const TOOLBAR_MAX_HEIGHT: i32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceVariant {
    ToolbarPopup,
    OverflowMenuPopup,
    FullPage,
}

/// A popup dimension, or a marker that it is pinned at the host's cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeValue {
    Pixels(i32),
    AtMaximum,
}

impl Serialize for SizeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SizeValue::Pixels(px) => serializer.serialize_i32(*px),
            SizeValue::AtMaximum => serializer.serialize_str("max"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopupSize {
    pub width: SizeValue,
    pub height: SizeValue,
}

/// Size caps per surface variant. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxSize {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl MaxSize {
    fn get(&self, axis: Axis) -> Option<i32> {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }
}

pub struct SurfaceClassifier {
    platform: Option<Platform>,
    scrollbar: ScrollbarComparator,
}

impl SurfaceClassifier {
    /// `platform` is `None` while the host has not told us yet; default thresholds apply.
    pub fn new(platform: Option<Platform>, scrollbar: ScrollbarComparator) -> Self {
        Self {
            platform,
            scrollbar,
        }
    }

    pub fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    fn is_android(&self) -> bool {
        matches!(self.platform, Some(Platform::Android))
    }

    pub fn overflow_width(&self) -> i32 {
        match self.platform {
            Some(Platform::Win) => WINDOWS_OVERFLOW_WIDTH,
            _ => DEFAULT_OVERFLOW_WIDTH,
        }
    }

    /// Overflow-menu popups have a fixed width per platform, so this is an exact match.
    pub fn classify_surface(&self, inner_width: i32) -> SurfaceVariant {
        if self.is_android() {
            return SurfaceVariant::FullPage;
        }

        if inner_width == self.overflow_width() {
            SurfaceVariant::OverflowMenuPopup
        } else {
            SurfaceVariant::ToolbarPopup
        }
    }

    pub fn max_size(&self, variant: SurfaceVariant) -> MaxSize {
        match variant {
            SurfaceVariant::ToolbarPopup => MaxSize {
                width: Some(TOOLBAR_MAX_WIDTH),
                height: Some(TOOLBAR_MAX_HEIGHT),
            },
            SurfaceVariant::OverflowMenuPopup => MaxSize {
                width: Some(self.overflow_width()),
                height: None,
            },
            SurfaceVariant::FullPage => MaxSize {
                width: None,
                height: None,
            },
        }
    }

    /// Popup size, with dimensions pinned at the variant's cap reported as [`SizeValue::AtMaximum`].
    pub fn classify_size(&self, geometry: &GeometrySnapshot) -> PopupSize {
        let variant = self.classify_surface(geometry.inner.width);
        let caps = self.max_size(variant);

        let value = |axis: Axis| {
            let raw = geometry.inner.get(axis);
            if caps.get(axis) == Some(raw) {
                SizeValue::AtMaximum
            } else {
                SizeValue::Pixels(raw)
            }
        };

        PopupSize {
            width: value(Axis::Width),
            height: value(Axis::Height),
        }
    }

    pub fn is_popup_surface(&self, geometry: &GeometrySnapshot) -> bool {
        if self.classify_surface(geometry.inner.width) == SurfaceVariant::OverflowMenuPopup {
            return true;
        }

        if self.is_android() {
            return false;
        }

        Axis::ALL
            .iter()
            .all(|&axis| self.matches_screen(axis, geometry))
    }

    // An overflowing page may force a scrollbar, so allow for it there.
    fn matches_screen(&self, axis: Axis, geometry: &GeometrySnapshot) -> bool {
        let available = geometry.screen_available.get(axis);
        let outer = geometry.outer.get(axis);

        if overflows(Some(axis), geometry) {
            self.scrollbar.same_size(available, outer)
        } else {
            available == outer
        }
    }
}
