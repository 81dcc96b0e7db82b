//! Opaque-pixel silhouettes for fine-grained collision tests.
//!
//! A `Mask` is a 1-bit image: a pixel is set when the source alpha is above
//! the opacity threshold. Masks can be mirrored and rotated the same way the
//! sprites they come from are, then tested for overlap at an integer offset.

use serde::{Deserialize, Serialize};

/// Alpha values strictly above this count as opaque.
pub const OPACITY_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Mask with every pixel cleared.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Fully opaque mask, used for solid-colour placeholders.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build from a row-major alpha channel. Returns `None` when the buffer
    /// length does not match the dimensions.
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Option<Self> {
        if alpha.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > OPACITY_THRESHOLD).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at (x, y) is set. Out-of-bounds reads are clear.
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        if x < self.width && y < self.height {
            self.bits[(y * self.width + x) as usize] = value;
        }
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Mirror left to right.
    pub fn flipped_horizontal(&self) -> Self {
        let mut out = Self::empty(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.bits[(y * self.width + x) as usize] =
                    self.bits[(y * self.width + (self.width - 1 - x)) as usize];
            }
        }
        out
    }

    /// Rotate counter-clockwise (as seen on screen) by `angle_deg`.
    ///
    /// The result is enlarged to the bounding box of the rotated image,
    /// with the original centred in it. Sampling is nearest-neighbour.
    pub fn rotated(&self, angle_deg: f64) -> Self {
        let theta = angle_deg.to_radians();
        let (sin, cos) = theta.sin_cos();
        let (w, h) = (self.width as f64, self.height as f64);
        // Trim float noise so exact quarter turns keep their size.
        let new_w = (w * cos.abs() + h * sin.abs() - 1e-9).ceil().max(1.0) as u32;
        let new_h = (w * sin.abs() + h * cos.abs() - 1e-9).ceil().max(1.0) as u32;

        let (src_cx, src_cy) = (w / 2.0, h / 2.0);
        let (dst_cx, dst_cy) = (new_w as f64 / 2.0, new_h as f64 / 2.0);

        let mut out = Self::empty(new_w, new_h);
        for y in 0..new_h {
            for x in 0..new_w {
                let dx = x as f64 + 0.5 - dst_cx;
                let dy = y as f64 + 0.5 - dst_cy;
                // Inverse mapping: rotate the destination pixel back onto the source.
                let sx = dx * cos - dy * sin + src_cx;
                let sy = dx * sin + dy * cos + src_cy;
                if self.get(sx.floor() as i64, sy.floor() as i64) {
                    out.bits[(y * new_w + x) as usize] = true;
                }
            }
        }
        out
    }

    /// First overlapping pixel (in this mask's coordinates) when `other` is
    /// placed with its top-left corner at `offset` relative to this mask.
    pub fn overlap(&self, other: &Mask, offset: (i64, i64)) -> Option<(u32, u32)> {
        let (ox, oy) = offset;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + other.width as i64).min(self.width as i64);
        let y1 = (oy + other.height as i64).min(self.height as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - ox, y - oy) {
                    return Some((x as u32, y as u32));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_alpha_threshold() {
        let mask = Mask::from_alpha(3, 1, &[0, 127, 128]).unwrap();
        assert!(!mask.get(0, 0));
        assert!(!mask.get(1, 0));
        assert!(mask.get(2, 0));
        assert!(Mask::from_alpha(2, 2, &[255; 3]).is_none());
    }

    #[test]
    fn test_flip_mirrors_columns() {
        let mut mask = Mask::empty(4, 2);
        mask.set(0, 1, true);
        let flipped = mask.flipped_horizontal();
        assert!(flipped.get(3, 1));
        assert!(!flipped.get(0, 1));
    }

    #[test]
    fn test_rotate_quarter_turn_swaps_dimensions() {
        let mask = Mask::filled(32, 16);
        let rotated = mask.rotated(90.0);
        assert_eq!(rotated.width(), 16);
        assert_eq!(rotated.height(), 32);
        assert_eq!(rotated.count(), 16 * 32);
    }

    #[test]
    fn test_rotate_expands_bounding_box() {
        let mask = Mask::filled(32, 16);
        let rotated = mask.rotated(45.0);
        assert!(rotated.width() > 32);
        assert!(rotated.height() > 16);
        // Corners of the enlarged box stay clear.
        assert!(!rotated.get(0, 0));
    }

    #[test]
    fn test_overlap_respects_offset() {
        let mut target = Mask::empty(10, 10);
        target.set(5, 5, true);
        let probe = Mask::filled(2, 2);
        assert_eq!(target.overlap(&probe, (4, 4)), Some((5, 5)));
        assert_eq!(target.overlap(&probe, (6, 6)), None);
        assert_eq!(target.overlap(&probe, (-20, 0)), None);
    }
}
