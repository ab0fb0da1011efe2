/// Which argument of [`approximately_equal`] the relative band is computed from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTo {
    #[default]
    First,
    Second,
}

/// Allowed difference between two readings.
///
/// With neither `absolute` nor `relative` set only exact equality passes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub absolute: Option<f64>,
    /// Fraction in `0.0..=1.0`.
    pub relative: Option<f64>,
    pub relative_to: RelativeTo,
}

impl Tolerance {
    pub fn absolute(absolute: f64) -> Self {
        Self {
            absolute: Some(absolute),
            ..Self::default()
        }
    }

    pub fn relative(relative: f64) -> Self {
        Self {
            relative: Some(relative),
            ..Self::default()
        }
    }

    pub fn relative_to(mut self, relative_to: RelativeTo) -> Self {
        self.relative_to = relative_to;
        self
    }
}

/// Compare two numbers within the given tolerance band.
///
/// Either check passing is enough; exact equality always passes.
pub fn approximately_equal(a: f64, b: f64, tolerance: &Tolerance) -> bool {
    if a == b {
        return true;
    }

    let within_absolute = tolerance
        .absolute
        .is_some_and(|absolute| (a - b).abs() <= absolute);

    let within_relative = tolerance.relative.is_some_and(|relative| {
        let (reference, compared) = match tolerance.relative_to {
            RelativeTo::First => (a, b),
            RelativeTo::Second => (b, a),
        };
        let min = reference * (1.0 - relative);
        let max = reference * (1.0 + relative);

        compared >= min && compared <= max
    });

    within_absolute || within_relative
}
