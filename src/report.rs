use serde::Serialize;

use crate::{
    geometry::{Axis, Extent, GeometrySnapshot},
    overflow::{overflow_percentage, overflow_pixels, overflows},
    services::platform::Platform,
    surface::{PopupSize, SurfaceClassifier, SurfaceVariant},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisOverflow {
    pub overflows: bool,
    /// Negative when the body underflows the viewport.
    pub pixels: i32,
    pub percentage: f64,
}

impl AxisOverflow {
    fn measure(axis: Axis, geometry: &GeometrySnapshot) -> Self {
        Self {
            overflows: overflows(Some(axis), geometry),
            pixels: overflow_pixels(axis, geometry),
            percentage: overflow_percentage(axis, geometry),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverflowReport {
    pub any: bool,
    pub width: AxisOverflow,
    pub height: AxisOverflow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentReport {
    pub platform: Option<Platform>,
    pub inner_size: Extent,
    pub scroll_size: Extent,
    pub overflow: OverflowReport,
    pub is_popup: bool,
    pub surface: SurfaceVariant,
    pub popup_size: PopupSize,
}

impl EnvironmentReport {
    pub fn new(classifier: &SurfaceClassifier, geometry: &GeometrySnapshot) -> Self {
        Self {
            platform: classifier.platform().cloned(),
            inner_size: geometry.inner,
            scroll_size: geometry.document_scroll,
            overflow: OverflowReport {
                any: overflows(None, geometry),
                width: AxisOverflow::measure(Axis::Width, geometry),
                height: AxisOverflow::measure(Axis::Height, geometry),
            },
            is_popup: classifier.is_popup_surface(geometry),
            surface: classifier.classify_surface(geometry.inner.width),
            popup_size: classifier.classify_size(geometry),
        }
    }
}
