use serde::{Deserialize, Serialize};
use std::{fmt, num::TryFromIntError, str::FromStr};

use crate::error::DetectError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Width, Axis::Height];
}

impl FromStr for Axis {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "width" => Ok(Axis::Width),
            "height" => Ok(Axis::Height),
            _ => Err(DetectError::InvalidAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// A pair of pixel extents as reported by the host.
///
/// Deserialized values must be non-negative and fit in an `i32`, so the difference
/// of any two read extents cannot overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExtent")]
pub struct Extent {
    pub width: i32,
    pub height: i32,
}

#[derive(Deserialize)]
struct RawExtent {
    width: u32,
    height: u32,
}

impl TryFrom<RawExtent> for Extent {
    type Error = TryFromIntError;

    fn try_from(raw: RawExtent) -> Result<Self, Self::Error> {
        Ok(Self {
            width: i32::try_from(raw.width)?,
            height: i32::try_from(raw.height)?,
        })
    }
}

impl Extent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// One read of every geometry signal the classifier looks at.
///
/// Snapshots are taken fresh for each classification and never mutated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GeometrySnapshot {
    /// Window viewport size (`innerWidth`/`innerHeight`).
    pub inner: Extent,
    /// Window frame size (`outerWidth`/`outerHeight`).
    pub outer: Extent,
    /// Screen size minus OS chrome (`availWidth`/`availHeight`).
    pub screen_available: Extent,
    /// Scroll size of the document element.
    pub document_scroll: Extent,
    /// Client size of the document element.
    pub document_client: Extent,
    /// Client size of the body element.
    pub body_client: Extent,
}

/// Where geometry comes from.
///
/// The live inner size is queried separately from the full snapshot because the
/// stabilization wait polls it repeatedly while the surface is still opening.
pub trait GeometrySource {
    fn inner_size(&self) -> Extent;

    fn snapshot(&self) -> GeometrySnapshot;
}

impl GeometrySource for GeometrySnapshot {
    fn inner_size(&self) -> Extent {
        self.inner
    }

    fn snapshot(&self) -> GeometrySnapshot {
        *self
    }
}
