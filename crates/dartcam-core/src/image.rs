/// Borrowed 8-bit grayscale image, row-major, `data.len() == width * height`.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

impl GrayImageView<'_> {
    /// Pixel value, or `None` outside the image.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.data.get(y as usize * self.width + x as usize).copied()
    }
}

/// Owned 8-bit grayscale image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Set a pixel; writes outside the image are ignored.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, value: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.data[idx] = value;
    }
}

#[inline]
fn get_gray(src: &GrayImageView<'_>, x: i64, y: i64) -> f32 {
    src.get(x, y).map_or(0.0, f32::from)
}

/// Bilinear sample; pixels outside the image read as black.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (xi, yi) = (x0 as i64, y0 as i64);

    let p00 = get_gray(src, xi, yi);
    let p10 = get_gray(src, xi + 1, yi);
    let p01 = get_gray(src, xi, yi + 1);
    let p11 = get_gray(src, xi + 1, yi + 1);

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilinear_interpolates_between_neighbours() {
        let img = GrayImage {
            width: 2,
            height: 2,
            data: vec![0, 100, 100, 200],
        };
        let v = sample_bilinear(&img.view(), 0.5, 0.5);
        assert!((v - 100.0).abs() < 1e-4);
    }

    #[test]
    fn out_of_bounds_reads_black_and_writes_are_dropped() {
        let mut img = GrayImage::new(3, 2);
        img.put(-1, 0, 255);
        img.put(3, 1, 255);
        img.put(2, 1, 7);
        assert_eq!(img.view().get(2, 1), Some(7));
        assert_eq!(img.view().get(5, 5), None);
        assert_eq!(img.data.iter().filter(|&&v| v != 0).count(), 1);
    }
}
