//! `DartHit` event record sent to scoring front-ends.

use crate::{Ring, ScoreResult};
use serde::{Deserialize, Serialize};

/// Segment value used for both bulls.
pub const BULL_SEGMENT: u8 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitMultiplier {
    InnerBull,
    OuterBull,
    Triple,
    Double,
    SingleInner,
    SingleOuter,
}

/// One dart, as consumed by the scoring UI.
///
/// A miss is reported as segment 0 with the `single_outer` multiplier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DartHit {
    pub segment: u8,
    pub multiplier: HitMultiplier,
    pub source: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl DartHit {
    pub fn from_score(result: &ScoreResult, source: impl Into<String>, timestamp: u64) -> Self {
        let number = result.number.unwrap_or(0);
        let (segment, multiplier) = match result.ring {
            Ring::InnerBull => (BULL_SEGMENT, HitMultiplier::InnerBull),
            Ring::OuterBull => (BULL_SEGMENT, HitMultiplier::OuterBull),
            Ring::Miss => (0, HitMultiplier::SingleOuter),
            Ring::Triple => (number, HitMultiplier::Triple),
            Ring::Double => (number, HitMultiplier::Double),
            Ring::SingleInner => (number, HitMultiplier::SingleInner),
            Ring::SingleOuter => (number, HitMultiplier::SingleOuter),
        };
        Self {
            segment,
            multiplier,
            source: source.into(),
            timestamp,
            confidence: None,
            meta: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_meta(mut self, meta: serde_json::Value) -> Self {
        self.meta = Some(meta);
        self
    }
}
