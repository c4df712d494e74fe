//! Board model in rectified image space and point classification.

use crate::sector::{sector_index, wrap_once, SECTOR_COUNT, SECTOR_NUMBERS, SECTOR_WIDTH};
use crate::{ConfigurationError, InvalidPointError, Ring, RingCalibration, ScoreResult};
use dartcam_core::RectifiedFrame;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Absolute ring boundary radii in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingRadii {
    pub inner_bull: f64,
    pub outer_bull: f64,
    pub triple_inner: f64,
    pub triple_outer: f64,
    pub double_inner: f64,
    pub double_outer: f64,
}

impl RingRadii {
    fn scaled(cal: &RingCalibration, radius: f64) -> Self {
        let px = |pct: f64| pct / 100.0 * radius;
        Self {
            inner_bull: px(cal.inner_bull_pct),
            outer_bull: px(cal.outer_bull_pct),
            triple_inner: px(cal.triple_inner_pct),
            triple_outer: px(cal.triple_outer_pct),
            double_inner: px(cal.double_inner_pct),
            double_outer: px(cal.double_outer_pct),
        }
    }

    /// Radii from the bull outwards.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.inner_bull,
            self.outer_bull,
            self.triple_inner,
            self.triple_outer,
            self.double_inner,
            self.double_outer,
        ]
    }
}

/// Calibrated dartboard in rectified image coordinates (y grows downwards).
///
/// Immutable once built; classification takes `&self` only, so a model can
/// be shared between threads freely.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardModel {
    center: Point2<f64>,
    radius: f64,
    /// Radians in `[0, TAU)`.
    angle_offset: f64,
    radii: RingRadii,
}

impl BoardModel {
    /// Validate the calibration and scale it to `radius` pixels.
    pub fn new(
        center: Point2<f64>,
        radius: f64,
        calibration: &RingCalibration,
    ) -> Result<Self, ConfigurationError> {
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(ConfigurationError::NonFiniteCenter {
                x: center.x,
                y: center.y,
            });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigurationError::InvalidRadius(radius));
        }
        calibration.validate()?;

        let radii = RingRadii::scaled(calibration, radius);
        if radii.inner_bull <= 0.0 {
            return Err(ConfigurationError::ZeroInnerBull);
        }
        if radii.double_outer < radius {
            log::warn!(
                "double ring ends at {:.2}px inside the {:.2}px board radius; \
                 hits in between score as MISS",
                radii.double_outer,
                radius
            );
        }

        // Reduced to one turn so that a single wrap normalizes any angle.
        let angle_offset = calibration
            .angle_offset_degrees
            .rem_euclid(360.0)
            .to_radians();

        log::debug!(
            "board model: center=({:.2}, {:.2}) radius={:.2} offset={:.4}rad radii={:?}",
            center.x,
            center.y,
            radius,
            angle_offset,
            radii.to_array()
        );

        Ok(Self {
            center,
            radius,
            angle_offset,
            radii,
        })
    }

    /// Board filling a rectified frame: the frame's center and radius.
    pub fn for_frame(
        frame: &RectifiedFrame,
        calibration: &RingCalibration,
    ) -> Result<Self, ConfigurationError> {
        Self::new(frame.center, frame.radius, calibration)
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Outer double-ring radius in pixels.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sector rotation in radians, in `[0, TAU)`.
    #[inline]
    pub fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    #[inline]
    pub fn radii(&self) -> &RingRadii {
        &self.radii
    }

    fn check_point(p: Point2<f64>) -> Result<(), InvalidPointError> {
        if p.x.is_finite() && p.y.is_finite() {
            Ok(())
        } else {
            Err(InvalidPointError { x: p.x, y: p.y })
        }
    }

    /// Euclidean distance from the board center.
    pub fn distance_from_center(&self, p: Point2<f64>) -> Result<f64, InvalidPointError> {
        Self::check_point(p)?;
        Ok((p - self.center).norm())
    }

    /// Ring at distance `d` from the center.
    ///
    /// First matching band wins, so shared boundaries belong to the bulls,
    /// the triple and the double. Beyond `radius` is always a miss. The
    /// last arm is the strip between the double ring and `radius`, which is
    /// empty when the double ring reaches the board edge.
    pub fn ring_for_distance(&self, d: f64) -> Ring {
        let r = &self.radii;
        match d {
            d if d <= r.inner_bull => Ring::InnerBull,
            d if d <= r.outer_bull => Ring::OuterBull,
            d if d > self.radius => Ring::Miss,
            d if d < r.triple_inner => Ring::SingleInner,
            d if d <= r.triple_outer => Ring::Triple,
            d if d < r.double_inner => Ring::SingleOuter,
            d if d <= r.double_outer => Ring::Double,
            _ => Ring::Miss,
        }
    }

    pub fn ring_for_point(&self, p: Point2<f64>) -> Result<Ring, InvalidPointError> {
        Ok(self.ring_for_distance(self.distance_from_center(p)?))
    }

    /// Clockwise angle from straight up, offset applied, in `[0, TAU)`.
    ///
    /// The exact center reads as angle 0 before the offset.
    pub fn angle_for_point(&self, p: Point2<f64>) -> Result<f64, InvalidPointError> {
        Self::check_point(p)?;
        let dx = p.x - self.center.x;
        // Image y grows downwards; `up` is +0.0 at the center so atan2 gives 0.
        let up = self.center.y - p.y;
        Ok(wrap_once(dx.atan2(up) + self.angle_offset))
    }

    /// Wedge index (0..20) clockwise from straight up.
    pub fn sector_index_for_point(&self, p: Point2<f64>) -> Result<usize, InvalidPointError> {
        Ok(sector_index(self.angle_for_point(p)?))
    }

    /// Board number of the wedge containing `p`.
    pub fn number_for_point(&self, p: Point2<f64>) -> Result<u8, InvalidPointError> {
        Ok(SECTOR_NUMBERS[self.sector_index_for_point(p)?])
    }

    /// Score a dart at `p`. The sector is looked up only for sector rings.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn score(&self, p: Point2<f64>) -> Result<ScoreResult, InvalidPointError> {
        let ring = self.ring_for_point(p)?;
        let result = if ring.is_fixed() {
            ScoreResult::for_fixed(ring)
        } else {
            ScoreResult::for_sector(ring, self.number_for_point(p)?)
        };
        log::trace!("({:.2}, {:.2}) -> {}", p.x, p.y, result.code);
        Ok(result)
    }

    /// Clockwise angles from straight up (image frame) where wedge `i`
    /// starts, in `[0, TAU)`.
    pub fn wedge_boundaries(&self) -> [f64; SECTOR_COUNT] {
        std::array::from_fn(|i| (i as f64 * SECTOR_WIDTH - self.angle_offset).rem_euclid(TAU))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn board() -> BoardModel {
        BoardModel::new(
            Point2::new(400.0, 400.0),
            400.0,
            &RingCalibration::default(),
        )
        .expect("board")
    }

    #[test]
    fn percentages_scale_to_pixels() {
        let b = board();
        assert_relative_eq!(b.radii().triple_inner, 232.96, epsilon = 1e-9);
        assert_relative_eq!(b.radii().double_outer, 400.0);
    }

    #[test]
    fn bands_walk_outwards_in_order() {
        let b = board();
        let r = *b.radii();
        let probes = [
            (0.0, Ring::InnerBull),
            (r.inner_bull, Ring::InnerBull),
            (r.outer_bull, Ring::OuterBull),
            (r.triple_inner - 1e-6, Ring::SingleInner),
            (r.triple_inner, Ring::Triple),
            (r.triple_outer, Ring::Triple),
            (r.triple_outer + 1e-6, Ring::SingleOuter),
            (r.double_inner, Ring::Double),
            (r.double_outer, Ring::Double),
            (400.0 + 1e-9, Ring::Miss),
        ];
        for (d, expected) in probes {
            assert_eq!(b.ring_for_distance(d), expected, "d = {d}");
        }
    }

    #[test]
    fn strip_outside_a_short_double_ring_is_a_miss() {
        let cal = RingCalibration {
            double_outer_pct: 98.0,
            ..RingCalibration::default()
        };
        let b = BoardModel::new(Point2::new(0.0, 0.0), 100.0, &cal).unwrap();
        assert_eq!(b.ring_for_distance(99.0), Ring::Miss);
        assert_eq!(b.ring_for_distance(97.0), Ring::Double);
    }

    #[test]
    fn offset_is_folded_into_one_turn() {
        let cal = RingCalibration {
            angle_offset_degrees: -342.0,
            ..RingCalibration::default()
        };
        let b = BoardModel::new(Point2::new(0.0, 0.0), 100.0, &cal).unwrap();
        assert_relative_eq!(b.angle_offset(), 18f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn center_reads_as_zero_angle() {
        let b = board();
        assert_eq!(b.angle_for_point(b.center()).unwrap(), 0.0);
        assert_eq!(b.sector_index_for_point(b.center()).unwrap(), 0);
    }

    #[test]
    fn wedge_boundaries_follow_the_offset() {
        let cal = RingCalibration {
            angle_offset_degrees: 9.0,
            ..RingCalibration::default()
        };
        let b = BoardModel::new(Point2::new(0.0, 0.0), 100.0, &cal).unwrap();
        let w = b.wedge_boundaries();
        assert_relative_eq!(w[0], TAU - 9f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(w[1], 9f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let b = board();
        let err = b.score(Point2::new(f64::NAN, 1.0)).unwrap_err();
        assert!(err.x.is_nan());
        assert!(b.ring_for_point(Point2::new(0.0, f64::INFINITY)).is_err());
        assert!(b.number_for_point(Point2::new(f64::NEG_INFINITY, 0.0)).is_err());
    }

    #[test]
    fn bad_construction_inputs_fail() {
        let cal = RingCalibration::default();
        assert_eq!(
            BoardModel::new(Point2::new(0.0, 0.0), 0.0, &cal).unwrap_err(),
            ConfigurationError::InvalidRadius(0.0)
        );
        assert!(matches!(
            BoardModel::new(Point2::new(f64::NAN, 0.0), 10.0, &cal),
            Err(ConfigurationError::NonFiniteCenter { .. })
        ));
        assert!(matches!(
            BoardModel::new(Point2::new(0.0, 0.0), f64::INFINITY, &cal),
            Err(ConfigurationError::InvalidRadius(_))
        ));
    }
}
