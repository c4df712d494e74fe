use serde::{Deserialize, Serialize};
use std::fmt;

/// Concentric scoring region.
///
/// Variants are listed in the order they appear when walking outwards from
/// the bull on a non-degenerate board, with `Miss` last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ring {
    InnerBull,
    OuterBull,
    SingleInner,
    Triple,
    SingleOuter,
    Double,
    Miss,
}

impl Ring {
    /// Rings scored by a fixed value rather than a sector number.
    #[inline]
    pub fn is_fixed(self) -> bool {
        matches!(self, Ring::InnerBull | Ring::OuterBull | Ring::Miss)
    }

    /// Sector multiplier, or `None` for the fixed rings.
    pub fn multiplier(self) -> Option<u32> {
        match self {
            Ring::Triple => Some(3),
            Ring::Double => Some(2),
            Ring::SingleInner | Ring::SingleOuter => Some(1),
            Ring::InnerBull | Ring::OuterBull | Ring::Miss => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ring::InnerBull => "INNER_BULL",
            Ring::OuterBull => "OUTER_BULL",
            Ring::SingleInner => "SINGLE_INNER",
            Ring::Triple => "TRIPLE",
            Ring::SingleOuter => "SINGLE_OUTER",
            Ring::Double => "DOUBLE",
            Ring::Miss => "MISS",
        }
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
