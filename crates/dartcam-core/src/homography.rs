use crate::{sample_bilinear_u8, GrayImage, GrayImageView};
use nalgebra::{Matrix3, Point2, SMatrix, SVector, Vector3};
use serde::{Deserialize, Serialize};

/// Plane-to-plane projective map, `dst ~ H * src`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Homography {
    pub h: Matrix3<f64>,
}

impl Homography {
    pub fn new(h: Matrix3<f64>) -> Self {
        Self { h }
    }

    pub fn to_array(&self) -> [[f64; 3]; 3] {
        [
            [self.h[(0, 0)], self.h[(0, 1)], self.h[(0, 2)]],
            [self.h[(1, 0)], self.h[(1, 1)], self.h[(1, 2)]],
            [self.h[(2, 0)], self.h[(2, 1)], self.h[(2, 2)]],
        ]
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let v = self.h * Vector3::new(p.x, p.y, 1.0);
        let w = v[2];
        Point2::new(v[0] / w, v[1] / w)
    }

    pub fn inverse(&self) -> Option<Self> {
        self.h.try_inverse().map(Self::new)
    }
}

/// Similarity that moves the centroid to the origin and scales the mean
/// distance to sqrt(2).
fn normalize_points4(pts: &[Point2<f64>; 4]) -> ([Point2<f64>; 4], Matrix3<f64>) {
    let cx = pts.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = pts.iter().map(|p| p.y).sum::<f64>() / 4.0;
    let mean_dist = pts
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / 4.0;

    let s = if mean_dist > 1e-12 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let t = Matrix3::<f64>::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0);

    let out = pts.map(|p| {
        let v = t * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v[0], v[1])
    });
    (out, t)
}

/// Expects Hartley-normalized input, so a fixed tolerance is scale free.
fn has_collinear_triple(pts: &[Point2<f64>; 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.iter().any(|&[i, j, k]| {
        let ab = pts[j] - pts[i];
        let ac = pts[k] - pts[i];
        (ab.x * ac.y - ab.y * ac.x).abs() < 1e-9
    })
}

/// Compute H such that `dst ~ H * src` from exactly four correspondences.
///
/// Point order must be consistent between `src` and `dst`. Returns `None`
/// when the system is singular, e.g. three of the points are collinear.
pub fn homography_from_4pt(src: &[Point2<f64>; 4], dst: &[Point2<f64>; 4]) -> Option<Homography> {
    // Unknowns: [h11 h12 h13 h21 h22 h23 h31 h32], with h33 = 1
    // h11 x + h12 y + h13 - u h31 x - u h32 y = u
    // h21 x + h22 y + h23 - v h31 x - v h32 y = v
    let (src_n, t_src) = normalize_points4(src);
    let (dst_n, t_dst) = normalize_points4(dst);
    if has_collinear_triple(&src_n) || has_collinear_triple(&dst_n) {
        return None;
    }

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for k in 0..4 {
        let (x, y) = (src_n[k].x, src_n[k].y);
        let (u, v) = (dst_n[k].x, dst_n[k].y);

        let r0 = 2 * k;
        a[(r0, 0)] = x;
        a[(r0, 1)] = y;
        a[(r0, 2)] = 1.0;
        a[(r0, 6)] = -u * x;
        a[(r0, 7)] = -u * y;
        b[r0] = u;

        let r1 = 2 * k + 1;
        a[(r1, 3)] = x;
        a[(r1, 4)] = y;
        a[(r1, 5)] = 1.0;
        a[(r1, 6)] = -v * x;
        a[(r1, 7)] = -v * y;
        b[r1] = v;
    }

    let x = a.lu().solve(&b)?;
    if x.iter().any(|c| !c.is_finite()) {
        return None;
    }

    let hn = Matrix3::<f64>::new(
        x[0], x[1], x[2], //
        x[3], x[4], x[5], //
        x[6], x[7], 1.0,
    );

    // H = T_dst^-1 * Hn * T_src, rescaled so that h33 = 1
    let h = t_dst.try_inverse()? * hn * t_src;
    let s = h[(2, 2)];
    if s.abs() < 1e-12 {
        return None;
    }
    let h = h / s;
    if h.determinant().abs() < 1e-12 {
        return None;
    }
    Some(Homography::new(h))
}

/// Warp into a `out_w x out_h` canvas: every destination pixel center is
/// mapped back through `h_src_from_dst` and sampled bilinearly.
pub fn warp_perspective_gray(
    src: &GrayImageView<'_>,
    h_src_from_dst: &Homography,
    out_w: usize,
    out_h: usize,
) -> GrayImage {
    let mut out = vec![0u8; out_w * out_h];

    for (y, row) in out.chunks_mut(out_w.max(1)).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            let p = h_src_from_dst.apply(Point2::new(x as f64 + 0.5, y as f64 + 0.5));
            *px = sample_bilinear_u8(src, p.x as f32, p.y as f32);
        }
    }

    GrayImage {
        width: out_w,
        height: out_h,
        data: out,
    }
}
