//! Probe points for eyeballing a calibration.

use crate::BoardModel;
use nalgebra::Point2;

/// Labelled probe point in rectified pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SanityProbe {
    pub label: &'static str,
    pub point: Point2<f64>,
}

/// Eight probes: straight up, right, down and left of the bull, once 5 px
/// inside the triple ring (inner single) and once 5 px outside it (outer
/// single). Coordinates are truncated to whole pixels.
pub fn sanity_points(board: &BoardModel) -> Vec<SanityProbe> {
    let c = board.center();
    let r = board.radii();
    let inner = r.triple_inner - 5.0;
    let outer = r.triple_outer + 5.0;

    let at = |dx: f64, dy: f64| Point2::new((c.x + dx).trunc(), (c.y + dy).trunc());

    vec![
        SanityProbe {
            label: "TOP wedge, INNER single",
            point: at(0.0, -inner),
        },
        SanityProbe {
            label: "RIGHT wedge, INNER single",
            point: at(inner, 0.0),
        },
        SanityProbe {
            label: "BOTTOM wedge, INNER single",
            point: at(0.0, inner),
        },
        SanityProbe {
            label: "LEFT wedge, INNER single",
            point: at(-inner, 0.0),
        },
        SanityProbe {
            label: "TOP wedge, OUTER single",
            point: at(0.0, -outer),
        },
        SanityProbe {
            label: "RIGHT wedge, OUTER single",
            point: at(outer, 0.0),
        },
        SanityProbe {
            label: "BOTTOM wedge, OUTER single",
            point: at(0.0, outer),
        },
        SanityProbe {
            label: "LEFT wedge, OUTER single",
            point: at(-outer, 0.0),
        },
    ]
}
