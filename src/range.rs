// Linear range normalization for controller axes
//
// Maps a bounded input range onto a bounded output range, exact at the
// endpoints. A collapsed range is a configuration error and is rejected
// up front rather than left to divide by zero.

/// Error types for range mapping
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RangeError {
    #[error("input range collapsed at {0}")]
    EmptyInput(f32),

    #[error("output range collapsed at {0}")]
    EmptyOutput(f32),
}

/// Map `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// Linear and monotonic; `old_min` maps to `new_min` and `old_max` to
/// `new_max`. Inverted output ranges are allowed.
pub fn normalize(
    value: f32,
    old_min: f32,
    old_max: f32,
    new_min: f32,
    new_max: f32,
) -> Result<f32, RangeError> {
    if old_min == old_max {
        return Err(RangeError::EmptyInput(old_min));
    }
    if new_min == new_max {
        return Err(RangeError::EmptyOutput(new_min));
    }

    Ok(new_min + (value - old_min) * (new_max - new_min) / (old_max - old_min))
}

/// A range mapping validated at construction, so per-event application
/// cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct RangeMap {
    old_min: f32,
    old_max: f32,
    new_min: f32,
    new_max: f32,
}

impl RangeMap {
    pub fn new(old: (f32, f32), new: (f32, f32)) -> Result<Self, RangeError> {
        // Reject collapsed ranges once, here
        normalize(old.0, old.0, old.1, new.0, new.1)?;

        Ok(Self {
            old_min: old.0,
            old_max: old.1,
            new_min: new.0,
            new_max: new.1,
        })
    }

    pub fn apply(&self, value: f32) -> f32 {
        self.new_min
            + (value - self.old_min) * (self.new_max - self.new_min) / (self.old_max - self.old_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_endpoints_exact() {
        assert_eq!(normalize(0.0, 0.0, 255.0, 0.0, 100.0).unwrap(), 0.0);
        assert_eq!(normalize(255.0, 0.0, 255.0, 0.0, 100.0).unwrap(), 100.0);
        assert_eq!(normalize(-128.0, -128.0, 127.0, -1.0, 1.0).unwrap(), -1.0);
        assert_eq!(normalize(127.0, -128.0, 127.0, -1.0, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_interior_values() {
        assert!(close(normalize(128.0, 0.0, 255.0, 0.0, 100.0).unwrap(), 50.196));
        assert!(close(normalize(5.0, 0.0, 10.0, 10.0, 20.0).unwrap(), 15.0));
        assert!(close(normalize(3.0, 0.0, 6.0, 0.0, 12.0).unwrap(), 6.0));
        // midpoint of an asymmetric signed range is slightly off zero
        let mid = normalize(0.0, -128.0, 127.0, -1.0, 1.0).unwrap();
        assert!(mid.abs() < 0.01);
    }

    #[test]
    fn test_monotonic() {
        let mut prev = f32::NEG_INFINITY;
        for raw in 0..=255 {
            let v = normalize(raw as f32, 0.0, 255.0, -0.5, 0.5).unwrap();
            assert!(v >= prev);
            assert!((-0.5..=0.5).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn test_inverted_output_range() {
        assert_eq!(normalize(0.0, 0.0, 10.0, 1.0, -1.0).unwrap(), 1.0);
        assert_eq!(normalize(10.0, 0.0, 10.0, 1.0, -1.0).unwrap(), -1.0);
    }

    #[test]
    fn test_collapsed_ranges_rejected() {
        assert_eq!(
            normalize(50.0, 50.0, 50.0, 0.0, 100.0),
            Err(RangeError::EmptyInput(50.0))
        );
        assert_eq!(
            normalize(50.0, 0.0, 100.0, 10.0, 10.0),
            Err(RangeError::EmptyOutput(10.0))
        );
        // input collapse wins when both are collapsed
        assert_eq!(
            normalize(50.0, 50.0, 50.0, 10.0, 10.0),
            Err(RangeError::EmptyInput(50.0))
        );
    }

    #[test]
    fn test_range_map_matches_normalize() {
        let map = RangeMap::new((-1.0, 1.0), (-0.5, 0.5)).unwrap();
        assert_eq!(map.apply(-1.0), -0.5);
        assert_eq!(map.apply(1.0), 0.5);
        assert_eq!(map.apply(0.0), 0.0);

        assert!(RangeMap::new((1.0, 1.0), (0.0, 1.0)).is_err());
        assert!(RangeMap::new((0.0, 1.0), (2.0, 2.0)).is_err());
    }
}
