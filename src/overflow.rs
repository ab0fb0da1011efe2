use crate::{
    error::DetectError,
    geometry::{Axis, GeometrySnapshot},
};

/// How far the document overflows the viewport on `axis`.
///
/// When the scroll size does not exceed the client size the result is the body's
/// client size minus the document's instead, which is zero or negative (underflow).
/// The fallback is not clamped.
pub fn overflow_pixels(axis: Axis, geometry: &GeometrySnapshot) -> i32 {
    let client = geometry.document_client.get(axis);
    let overflow = geometry.document_scroll.get(axis) - client;

    if overflow > 0 {
        overflow
    } else {
        geometry.body_client.get(axis) - client
    }
}

/// Whether the document overflows on `axis`, or on either axis when `None`.
pub fn overflows(axis: Option<Axis>, geometry: &GeometrySnapshot) -> bool {
    match axis {
        Some(axis) => overflow_pixels(axis, geometry) > 0,
        None => Axis::ALL
            .iter()
            .any(|&axis| overflow_pixels(axis, geometry) > 0),
    }
}

/// Overflow as a percentage of the scroll size.
///
/// Negative values denote underflow. A zero scroll size yields an infinite or NaN
/// result; wait for the surface to stabilize before asking.
pub fn overflow_percentage(axis: Axis, geometry: &GeometrySnapshot) -> f64 {
    f64::from(overflow_pixels(axis, geometry)) / f64::from(geometry.document_scroll.get(axis))
        * 100.0
}

/// [`overflow_percentage`] for an axis given by name.
pub fn overflow_percentage_named(axis: &str, geometry: &GeometrySnapshot) -> Result<f64, DetectError> {
    let axis = axis.parse::<Axis>()?;
    Ok(overflow_percentage(axis, geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;

    fn page(scroll: Extent, client: Extent, body: Extent) -> GeometrySnapshot {
        GeometrySnapshot {
            inner: client,
            document_scroll: scroll,
            document_client: client,
            body_client: body,
            ..GeometrySnapshot::default()
        }
    }

    #[test]
    fn overflow_uses_scroll_minus_client() {
        let geometry = page(
            Extent::new(500, 900),
            Extent::new(400, 600),
            Extent::new(500, 900),
        );

        assert_eq!(overflow_pixels(Axis::Width, &geometry), 100);
        assert_eq!(overflow_pixels(Axis::Height, &geometry), 300);
    }

    #[test]
    fn no_overflow_falls_back_to_body_delta() {
        let geometry = page(
            Extent::new(400, 600),
            Extent::new(400, 600),
            Extent::new(380, 250),
        );

        assert_eq!(overflow_pixels(Axis::Width, &geometry), -20);
        assert_eq!(overflow_pixels(Axis::Height, &geometry), -350);
        assert!(!overflows(None, &geometry));
    }

    #[test]
    fn fallback_can_be_positive() {
        // scroll size lags behind, body already reports the larger size
        let geometry = page(
            Extent::new(400, 600),
            Extent::new(400, 600),
            Extent::new(400, 640),
        );

        assert_eq!(overflow_pixels(Axis::Height, &geometry), 40);
        assert!(overflows(Some(Axis::Height), &geometry));
    }

    #[test]
    fn overflow_pixels_is_idempotent() {
        let geometry = page(
            Extent::new(400, 600),
            Extent::new(400, 600),
            Extent::new(380, 600),
        );

        let first = overflow_pixels(Axis::Width, &geometry);
        let second = overflow_pixels(Axis::Width, &geometry);
        assert_eq!(first, second);
    }

    #[test]
    fn overflows_either_axis_when_none() {
        let geometry = page(
            Extent::new(400, 900),
            Extent::new(400, 600),
            Extent::new(400, 900),
        );

        assert!(!overflows(Some(Axis::Width), &geometry));
        assert!(overflows(Some(Axis::Height), &geometry));
        assert!(overflows(None, &geometry));
    }

    #[test]
    fn percentage_of_scroll_size() {
        let geometry = page(
            Extent::new(500, 800),
            Extent::new(400, 600),
            Extent::new(500, 800),
        );

        assert!((overflow_percentage(Axis::Width, &geometry) - 20.0).abs() < f64::EPSILON);
        assert!((overflow_percentage(Axis::Height, &geometry) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn underflow_percentage_is_negative() {
        let geometry = page(
            Extent::new(400, 600),
            Extent::new(400, 600),
            Extent::new(300, 600),
        );

        assert!((overflow_percentage(Axis::Width, &geometry) + 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_scroll_size_is_not_guarded() {
        let geometry = page(Extent::default(), Extent::default(), Extent::new(10, 0));

        assert!(overflow_percentage(Axis::Width, &geometry).is_infinite());
        assert!(overflow_percentage(Axis::Height, &geometry).is_nan());
    }

    #[test]
    fn named_axis_outside_width_height_is_rejected() {
        let geometry = page(
            Extent::new(500, 800),
            Extent::new(400, 600),
            Extent::new(500, 800),
        );

        assert_eq!(
            overflow_percentage_named("depth", &geometry),
            Err(DetectError::InvalidAxis("depth".to_string()))
        );
        assert!((overflow_percentage_named("width", &geometry).unwrap() - 20.0).abs() < f64::EPSILON);
    }
}
