//! Heuristics for telling which kind of surface a browser extension page is
//! rendered in, and whether its content overflows the viewport.
//!
//! Everything here works on a [`geometry::GeometrySnapshot`] read from the host.
//! The only asynchronous parts are the startup wait in [`stabilize`] and the
//! platform lookup in [`services::platform`].

pub mod approx;
pub mod error;
pub mod geometry;
pub mod overflow;
pub mod report;
pub mod scrollbar;
pub mod services;
pub mod stabilize;
pub mod surface;
