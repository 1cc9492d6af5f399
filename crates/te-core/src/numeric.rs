use crate::TeError;

/// Absolute and relative tolerance pair.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within either tolerance.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// First non-finite entry of `values` as an error.
pub fn ensure_all_finite(values: &[f64], what: &'static str) -> Result<(), TeError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(TeError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// Check that a host-supplied vector has the expected width.
pub fn ensure_len<T>(values: &[T], expected: usize, what: &'static str) -> Result<(), TeError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(TeError::LengthMismatch {
            what,
            expected,
            got: values.len(),
        })
    }
}

/// Evaluate `a + h*(b + h*(c + h*d))`.
#[inline]
pub fn cubic(a: f64, b: f64, c: f64, d: f64, h: f64) -> f64 {
    a + h * (b + h * (c + h * d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerances_accept_tiny_differences() {
        let tol = Tolerances::default();
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
        assert!(nearly_equal(2705.0, 2705.0 * (1.0 + 1e-10), tol));
    }

    #[test]
    fn reports_first_non_finite_entry() {
        assert!(ensure_all_finite(&[1.0, 2.0], "state").is_ok());
        let err = ensure_all_finite(&[1.0, f64::INFINITY, f64::NAN], "state").unwrap_err();
        assert!(matches!(
            err,
            TeError::NonFinite { what: "state", value } if value == f64::INFINITY
        ));
        assert!(err.to_string().contains("Non-finite"));
    }

    #[test]
    fn ensure_len_reports_widths() {
        assert!(ensure_len(&[1.0, 2.0], 2, "pair").is_ok());
        let err = ensure_len(&[1.0], 2, "pair").unwrap_err();
        assert_eq!(
            err,
            TeError::LengthMismatch {
                what: "pair",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn cubic_matches_expanded_form() {
        let (a, b, c, d, h) = (1.5, -0.25, 3.0, 0.5, 0.7);
        let expanded = a + b * h + c * h * h + d * h * h * h;
        assert!((cubic(a, b, c, d, h) - expanded).abs() < 1e-12);
    }
}
