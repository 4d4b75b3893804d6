//! 4×5 affine color transforms.
//!
//! A matrix is 20 numbers in row-major order, one row per output channel
//! (R, G, B, A). Each row holds the weights of the input R, G, B, A channels
//! followed by an offset in 0–255 units:
//!
//! ```text
//! R' = m[0]·R + m[1]·G + m[2]·B + m[3]·A + m[4]
//! ```

use nalgebra::Matrix5;
use serde::{Deserialize, Serialize};

pub const MATRIX_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorMatrix(pub [f64; MATRIX_LEN]);

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f64; MATRIX_LEN]> for ColorMatrix {
    fn from(values: [f64; MATRIX_LEN]) -> Self {
        Self(values)
    }
}

impl From<ColorMatrix> for [f64; MATRIX_LEN] {
    fn from(matrix: ColorMatrix) -> Self {
        matrix.0
    }
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// Matrix from a slice of exactly 20 finite values. Anything else is
    /// logged and replaced by the identity.
    pub fn from_slice(values: &[f64]) -> Self {
        Self::try_from_slice(values).unwrap_or_else(|| {
            log::warn!(
                "color matrix needs {} finite values, got {}; using identity",
                MATRIX_LEN,
                values.len()
            );
            Self::IDENTITY
        })
    }

    pub fn try_from_slice(values: &[f64]) -> Option<Self> {
        let array: [f64; MATRIX_LEN] = values.try_into().ok()?;
        array.iter().all(|v| v.is_finite()).then_some(Self(array))
    }

    pub fn as_array(&self) -> &[f64; MATRIX_LEN] {
        &self.0
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The 4×5 matrix extended to 5×5 with a `[0 0 0 0 1]` row
    fn to_affine(self) -> Matrix5<f64> {
        let mut rows = [0.0; 25];
        rows[..MATRIX_LEN].copy_from_slice(&self.0);
        rows[24] = 1.0;
        Matrix5::from_row_slice(&rows)
    }

    fn from_affine(affine: &Matrix5<f64>) -> Self {
        let mut values = [0.0; MATRIX_LEN];
        for (index, value) in values.iter_mut().enumerate() {
            *value = affine[(index / 5, index % 5)];
        }
        Self(values)
    }

    /// Transform equivalent to applying `first`, then `self`
    pub fn after(&self, first: &ColorMatrix) -> ColorMatrix {
        Self::from_affine(&(self.to_affine() * first.to_affine()))
    }

    /// Algebraic inverse, `None` when the transform is singular
    pub fn inverse(&self) -> Option<ColorMatrix> {
        self.to_affine()
            .try_inverse()
            .map(|inverse| Self::from_affine(&inverse))
    }

    /// Applies the transform to one straight-alpha RGBA pixel
    pub fn apply_to_rgba(&self, pixel: [u8; 4]) -> [u8; 4] {
        let input = pixel.map(f64::from);
        let mut output = [0u8; 4];
        for (channel, row) in self.0.chunks_exact(5).enumerate() {
            let value = row[..4]
                .iter()
                .zip(input.iter())
                .map(|(weight, component)| weight * component)
                .sum::<f64>()
                + row[4];
            output[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        output
    }

    /// Applies the transform to every pixel of `image` in place
    #[cfg(feature = "render")]
    pub fn apply_to_image(&self, image: &mut image::RgbaImage) {
        if self.is_identity() {
            return;
        }
        for pixel in image.pixels_mut() {
            pixel.0 = self.apply_to_rgba(pixel.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE_HALF: ColorMatrix = ColorMatrix([
        0.5, 0.0, 0.0, 0.0, 10.0, //
        0.0, 0.5, 0.0, 0.0, 10.0, //
        0.0, 0.0, 0.5, 0.0, 10.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    #[test]
    fn test_from_slice_rejects_bad_input() {
        assert_eq!(ColorMatrix::from_slice(&[1.0; 19]), ColorMatrix::IDENTITY);
        let mut values = [0.0; 20];
        values[3] = f64::NAN;
        assert_eq!(ColorMatrix::from_slice(&values), ColorMatrix::IDENTITY);
        assert_eq!(ColorMatrix::from_slice(&SCALE_HALF.0), SCALE_HALF);
    }

    #[test]
    fn test_apply_to_rgba() {
        assert_eq!(ColorMatrix::IDENTITY.apply_to_rgba([12, 34, 56, 78]), [12, 34, 56, 78]);
        assert_eq!(SCALE_HALF.apply_to_rgba([200, 100, 0, 255]), [110, 60, 10, 255]);
    }

    #[test]
    fn test_composition_order() {
        let shift = ColorMatrix([
            1.0, 0.0, 0.0, 0.0, 100.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ]);
        // halve then shift: 100 * 0.5 + 10 + 100
        assert_eq!(shift.after(&SCALE_HALF).apply_to_rgba([100, 0, 0, 255])[0], 160);
        // shift then halve: (100 + 100) * 0.5 + 10
        assert_eq!(SCALE_HALF.after(&shift).apply_to_rgba([100, 0, 0, 255])[0], 110);
    }

    #[test]
    fn test_inverse_round_trips() {
        let inverse = SCALE_HALF.inverse().unwrap();
        let round_trip = inverse.after(&SCALE_HALF);
        for (a, b) in round_trip.0.iter().zip(ColorMatrix::IDENTITY.0.iter()) {
            assert!((a - b).abs() < 1e-9);
        }

        let collapse = ColorMatrix([0.0; 20]);
        assert!(collapse.inverse().is_none());
    }

    #[cfg(feature = "render")]
    #[test]
    fn test_apply_to_image() {
        let mut image = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 0, 255]));
        SCALE_HALF.apply_to_image(&mut image);
        assert!(image.pixels().all(|p| p.0 == [110, 60, 10, 255]));
    }
}
