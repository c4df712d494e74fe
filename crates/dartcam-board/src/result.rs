use crate::Ring;
use serde::{Deserialize, Serialize};

/// Score of a single dart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub ring: Ring,
    /// Board number (1..=20); `None` for bulls and misses.
    pub number: Option<u8>,
    /// Short label: `IB`, `OB`, `MISS`, `T<n>`, `D<n>` or `S<n>`.
    pub code: String,
    pub points: u32,
}

impl ScoreResult {
    pub fn inner_bull() -> Self {
        Self::fixed(Ring::InnerBull, "IB", 50)
    }

    pub fn outer_bull() -> Self {
        Self::fixed(Ring::OuterBull, "OB", 25)
    }

    pub fn miss() -> Self {
        Self::fixed(Ring::Miss, "MISS", 0)
    }

    fn fixed(ring: Ring, code: &str, points: u32) -> Self {
        Self {
            ring,
            number: None,
            code: code.to_owned(),
            points,
        }
    }

    /// Record for a ring scored without a sector. Sector rings map to a miss.
    pub fn for_fixed(ring: Ring) -> Self {
        match ring {
            Ring::InnerBull => Self::inner_bull(),
            Ring::OuterBull => Self::outer_bull(),
            _ => Self::miss(),
        }
    }

    /// Compose a sector score. Fixed rings ignore `number`.
    pub fn for_sector(ring: Ring, number: u8) -> Self {
        let Some(multiplier) = ring.multiplier() else {
            return Self::for_fixed(ring);
        };
        let prefix = match ring {
            Ring::Triple => 'T',
            Ring::Double => 'D',
            _ => 'S',
        };
        Self {
            ring,
            number: Some(number),
            code: format!("{prefix}{number}"),
            points: multiplier * u32::from(number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sector_codes_and_points() {
        let t = ScoreResult::for_sector(Ring::Triple, 20);
        assert_eq!((t.code.as_str(), t.points, t.number), ("T20", 60, Some(20)));

        let d = ScoreResult::for_sector(Ring::Double, 16);
        assert_eq!((d.code.as_str(), d.points), ("D16", 32));

        let s = ScoreResult::for_sector(Ring::SingleOuter, 5);
        assert_eq!((s.code.as_str(), s.points), ("S5", 5));
    }

    #[test]
    fn fixed_rings_drop_the_number() {
        let r = ScoreResult::for_sector(Ring::Miss, 20);
        assert_eq!(r, ScoreResult::miss());
        assert_eq!(r.number, None);
        assert_eq!(ScoreResult::inner_bull().points, 50);
        assert_eq!(ScoreResult::outer_bull().code, "OB");
    }

    #[test]
    fn points_follow_the_ring_multiplier() {
        for ring in [Ring::SingleInner, Ring::Triple, Ring::SingleOuter, Ring::Double] {
            let r = ScoreResult::for_sector(ring, 7);
            assert!(!ring.is_fixed());
            assert_eq!(Some(r.points), ring.multiplier().map(|m| m * 7));
        }
        for ring in [Ring::InnerBull, Ring::OuterBull, Ring::Miss] {
            assert!(ring.is_fixed());
            assert_eq!(ring.multiplier(), None);
            assert_eq!(ScoreResult::for_sector(ring, 7).ring, ring);
        }
    }

    #[test]
    fn serializes_ring_in_screaming_case() {
        let json = serde_json::to_value(ScoreResult::for_sector(Ring::SingleInner, 1)).unwrap();
        assert_eq!(json["ring"], "SINGLE_INNER");
        assert_eq!(json["code"], "S1");
        assert_eq!(json["points"], 1);
    }
}
