//! Ring calibration: boundary radii as percentages of the outer double ring.

use crate::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Persisted ring calibration (`rings.json`).
///
/// Every `*_pct` value is a percentage (0..=100) of the outer double-ring
/// radius. `angle_offset_degrees` rotates the sector grid clockwise and
/// defaults to 0 when absent; a value of 9 centers the 20 wedge on
/// straight-up.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingCalibration {
    pub inner_bull_pct: f64,
    pub outer_bull_pct: f64,
    pub triple_inner_pct: f64,
    pub triple_outer_pct: f64,
    pub double_inner_pct: f64,
    pub double_outer_pct: f64,
    #[serde(default)]
    pub angle_offset_degrees: f64,
}

impl Default for RingCalibration {
    /// Regulation board: 6.35 / 15.9 / 99 / 107 / 162 / 170 mm.
    fn default() -> Self {
        Self {
            inner_bull_pct: 3.74,
            outer_bull_pct: 9.35,
            triple_inner_pct: 58.24,
            triple_outer_pct: 62.94,
            double_inner_pct: 95.29,
            double_outer_pct: 100.0,
            angle_offset_degrees: 0.0,
        }
    }
}

impl RingCalibration {
    /// Ring percentages from the bull outwards, with their field names.
    pub fn ordered_percentages(&self) -> [(&'static str, f64); 6] {
        [
            ("inner_bull_pct", self.inner_bull_pct),
            ("outer_bull_pct", self.outer_bull_pct),
            ("triple_inner_pct", self.triple_inner_pct),
            ("triple_outer_pct", self.triple_outer_pct),
            ("double_inner_pct", self.double_inner_pct),
            ("double_outer_pct", self.double_outer_pct),
        ]
    }

    /// Check ranges and the bull-to-double ordering.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.angle_offset_degrees.is_finite() {
            return Err(ConfigurationError::NonFiniteAngleOffset(
                self.angle_offset_degrees,
            ));
        }

        let pcts = self.ordered_percentages();
        for &(name, value) in &pcts {
            // NaN fails the range check as well.
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigurationError::PercentOutOfRange { name, value });
            }
        }
        if self.inner_bull_pct <= 0.0 {
            return Err(ConfigurationError::ZeroInnerBull);
        }
        for pair in pcts.windows(2) {
            let (inner, inner_pct) = pair[0];
            let (outer, outer_pct) = pair[1];
            if inner_pct > outer_pct {
                return Err(ConfigurationError::RingOrder {
                    inner,
                    inner_pct,
                    outer,
                    outer_pct,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regulation_geometry_is_valid() {
        assert_eq!(RingCalibration::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_percentage_is_named() {
        let cal = RingCalibration {
            double_outer_pct: 100.5,
            ..RingCalibration::default()
        };
        assert_eq!(
            cal.validate(),
            Err(ConfigurationError::PercentOutOfRange {
                name: "double_outer_pct",
                value: 100.5
            })
        );

        let cal = RingCalibration {
            triple_inner_pct: f64::NAN,
            ..RingCalibration::default()
        };
        assert!(matches!(
            cal.validate(),
            Err(ConfigurationError::PercentOutOfRange {
                name: "triple_inner_pct",
                ..
            })
        ));
    }

    #[test]
    fn negative_percentage_is_out_of_range() {
        let cal = RingCalibration {
            outer_bull_pct: -1.0,
            ..RingCalibration::default()
        };
        assert_eq!(
            cal.validate(),
            Err(ConfigurationError::PercentOutOfRange {
                name: "outer_bull_pct",
                value: -1.0
            })
        );

        let cal = RingCalibration {
            inner_bull_pct: -0.5,
            ..RingCalibration::default()
        };
        assert!(matches!(
            cal.validate(),
            Err(ConfigurationError::PercentOutOfRange {
                name: "inner_bull_pct",
                ..
            })
        ));
    }

    #[test]
    fn zero_inner_bull_is_rejected() {
        let cal = RingCalibration {
            inner_bull_pct: 0.0,
            ..RingCalibration::default()
        };
        assert_eq!(cal.validate(), Err(ConfigurationError::ZeroInnerBull));
    }

    #[test]
    fn equal_neighbouring_rings_are_allowed() {
        let cal = RingCalibration {
            triple_outer_pct: 95.29,
            ..RingCalibration::default()
        };
        assert_eq!(cal.validate(), Ok(()));
    }

    #[test]
    fn missing_angle_offset_defaults_to_zero() {
        let cal: RingCalibration = serde_json::from_str(
            r#"{
                "inner_bull_pct": 3.7, "outer_bull_pct": 9.4,
                "triple_inner_pct": 58.2, "triple_outer_pct": 62.9,
                "double_inner_pct": 95.3, "double_outer_pct": 100
            }"#,
        )
        .expect("parse");
        assert_eq!(cal.angle_offset_degrees, 0.0);
        assert_eq!(cal.validate(), Ok(()));
    }
}
