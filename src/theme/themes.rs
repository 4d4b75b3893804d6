use crate::rendering::context::Color;
use crate::theme::matrix::{ColorMatrix, MATRIX_LEN};
use fxhash::FxHashMap;
use once_cell::sync::Lazy;

/// Rec. 709 luma weights used by grayscale and saturation transforms
const LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Named base-map color themes and helpers to build new ones
pub struct MapcnThemes;

impl MapcnThemes {
    pub const IDENTITY: [f64; MATRIX_LEN] = ColorMatrix::IDENTITY.0;

    /// Inverted, slightly blue-shifted map for dark interfaces
    pub const DARK: [f64; MATRIX_LEN] = [
        -0.60, -0.25, -0.10, 0.0, 235.0, //
        -0.20, -0.65, -0.10, 0.0, 235.0, //
        -0.15, -0.20, -0.60, 0.0, 240.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const GRAYSCALE: [f64; MATRIX_LEN] = [
        LUMA[0], LUMA[1], LUMA[2], 0.0, 0.0, //
        LUMA[0], LUMA[1], LUMA[2], 0.0, 0.0, //
        LUMA[0], LUMA[1], LUMA[2], 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const SEPIA: [f64; MATRIX_LEN] = [
        0.393, 0.769, 0.189, 0.0, 0.0, //
        0.349, 0.686, 0.168, 0.0, 0.0, //
        0.272, 0.534, 0.131, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const MIDNIGHT: [f64; MATRIX_LEN] = [
        -0.50, -0.30, -0.10, 0.0, 160.0, //
        -0.20, -0.50, -0.10, 0.0, 170.0, //
        -0.10, -0.20, -0.40, 0.0, 220.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const VINTAGE: [f64; MATRIX_LEN] = [
        0.90, 0.50, 0.10, 0.0, 0.0, //
        0.30, 0.80, 0.10, 0.0, 0.0, //
        0.20, 0.30, 0.50, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const BLUEPRINT: [f64; MATRIX_LEN] = [
        -0.20, -0.60, -0.10, 0.0, 80.0, //
        -0.20, -0.60, -0.10, 0.0, 140.0, //
        -0.10, -0.30, -0.10, 0.0, 230.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    /// Contrast 1.5 around mid-gray
    pub const HIGH_CONTRAST: [f64; MATRIX_LEN] = [
        1.5, 0.0, 0.0, 0.0, -64.0, //
        0.0, 1.5, 0.0, 0.0, -64.0, //
        0.0, 0.0, 1.5, 0.0, -64.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    /// Saturation 0.5
    pub const MUTED: [f64; MATRIX_LEN] = [
        0.6063, 0.3576, 0.0361, 0.0, 0.0, //
        0.1063, 0.8576, 0.0361, 0.0, 0.0, //
        0.1063, 0.3576, 0.5361, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const WARM: [f64; MATRIX_LEN] = [
        1.10, 0.0, 0.0, 0.0, 10.0, //
        0.0, 1.0, 0.0, 0.0, 5.0, //
        0.0, 0.0, 0.85, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    pub const COOL: [f64; MATRIX_LEN] = [
        0.90, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 5.0, //
        0.0, 0.0, 1.10, 0.0, 15.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ];

    /// Registered theme names, in a stable order
    pub fn names() -> &'static [&'static str] {
        &[
            "identity",
            "dark",
            "grayscale",
            "sepia",
            "midnight",
            "vintage",
            "blueprint",
            "high_contrast",
            "muted",
            "warm",
            "cool",
        ]
    }

    /// Looks a theme up by name. Case and `-`/`_`/space separators are
    /// ignored, so `"High Contrast"` finds `HIGH_CONTRAST`.
    pub fn by_name(name: &str) -> Option<[f64; MATRIX_LEN]> {
        let key: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        REGISTRY.get(key.as_str()).copied()
    }

    /// Builds a theme from simple adjustments. Saturation is applied first,
    /// then contrast around mid-gray, then brightness (`-1..=1`, as a
    /// fraction of full scale), then a blend towards `tint` by
    /// `tint_strength`. Neutral values (`0, 1, 1, None`) give the identity.
    pub fn create_custom_theme(
        brightness: f64,
        contrast: f64,
        saturation: f64,
        tint: Option<Color>,
        tint_strength: f64,
    ) -> [f64; MATRIX_LEN] {
        let brightness = finite_or("brightness", brightness, 0.0).clamp(-1.0, 1.0);
        let contrast = finite_or("contrast", contrast, 1.0).max(0.0);
        let saturation = finite_or("saturation", saturation, 1.0).max(0.0);
        let tint_strength = finite_or("tint strength", tint_strength, 0.0).clamp(0.0, 1.0);

        let mut result = saturation_matrix(saturation);
        result = contrast_matrix(contrast).after(&result);
        result = brightness_matrix(brightness).after(&result);
        if let Some(tint) = tint {
            result = tint_matrix(tint, tint_strength).after(&result);
        }
        result.0
    }

    /// Color negation composed over `matrix`: each color row is negated and
    /// its offset becomes `255 - offset`; alpha is unchanged. Applying it
    /// twice gives back the input. Inputs that are not 20 finite values
    /// yield the identity.
    pub fn invert(matrix: &[f64]) -> [f64; MATRIX_LEN] {
        let Some(source) = checked("invert", matrix) else {
            return Self::IDENTITY;
        };
        let mut inverted = source.0;
        for row in inverted.chunks_exact_mut(5).take(3) {
            for weight in &mut row[..4] {
                *weight = -*weight;
            }
            row[4] = 255.0 - row[4];
        }
        inverted
    }

    /// Applies `b`, then `a`. Inputs that are not 20 finite values yield the
    /// identity.
    pub fn combine(a: &[f64], b: &[f64]) -> [f64; MATRIX_LEN] {
        match (checked("combine", a), checked("combine", b)) {
            (Some(a), Some(b)) => a.after(&b).0,
            _ => Self::IDENTITY,
        }
    }
}

static REGISTRY: Lazy<FxHashMap<&'static str, [f64; MATRIX_LEN]>> = Lazy::new(|| {
    let themes = [
        MapcnThemes::IDENTITY,
        MapcnThemes::DARK,
        MapcnThemes::GRAYSCALE,
        MapcnThemes::SEPIA,
        MapcnThemes::MIDNIGHT,
        MapcnThemes::VINTAGE,
        MapcnThemes::BLUEPRINT,
        MapcnThemes::HIGH_CONTRAST,
        MapcnThemes::MUTED,
        MapcnThemes::WARM,
        MapcnThemes::COOL,
    ];
    MapcnThemes::names()
        .iter()
        .copied()
        .zip(themes)
        .collect()
});

fn checked(operation: &str, values: &[f64]) -> Option<ColorMatrix> {
    let matrix = ColorMatrix::try_from_slice(values);
    if matrix.is_none() {
        log::warn!(
            "{} expects {} finite values, got {}; returning identity",
            operation,
            MATRIX_LEN,
            values.len()
        );
    }
    matrix
}

fn finite_or(name: &str, value: f64, neutral: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        log::warn!("custom theme {} {} is not finite, using {}", name, value, neutral);
        neutral
    }
}

fn saturation_matrix(s: f64) -> ColorMatrix {
    let mut values = ColorMatrix::IDENTITY.0;
    for row in 0..3 {
        for col in 0..3 {
            let diagonal = if row == col { s } else { 0.0 };
            values[row * 5 + col] = LUMA[col] * (1.0 - s) + diagonal;
        }
    }
    ColorMatrix(values)
}

fn contrast_matrix(c: f64) -> ColorMatrix {
    let offset = 128.0 * (1.0 - c);
    diagonal_matrix([c, c, c], [offset, offset, offset])
}

fn brightness_matrix(b: f64) -> ColorMatrix {
    let offset = b * 255.0;
    diagonal_matrix([1.0; 3], [offset; 3])
}

fn tint_matrix(tint: Color, strength: f64) -> ColorMatrix {
    let keep = 1.0 - strength;
    diagonal_matrix(
        [keep; 3],
        [
            f64::from(tint.r) * strength,
            f64::from(tint.g) * strength,
            f64::from(tint.b) * strength,
        ],
    )
}

fn diagonal_matrix(scale: [f64; 3], offset: [f64; 3]) -> ColorMatrix {
    let mut values = ColorMatrix::IDENTITY.0;
    for channel in 0..3 {
        values[channel * 6] = scale[channel];
        values[channel * 5 + 4] = offset[channel];
    }
    ColorMatrix(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_is_self_inverse() {
        let once = MapcnThemes::invert(&MapcnThemes::IDENTITY);
        assert_eq!(once[0], -1.0);
        assert_eq!(once[4], 255.0);
        assert_eq!(once[18], 1.0);
        assert_eq!(MapcnThemes::invert(&once), MapcnThemes::IDENTITY);
        assert_eq!(
            MapcnThemes::invert(&MapcnThemes::invert(&MapcnThemes::SEPIA)),
            MapcnThemes::SEPIA
        );
    }

    #[test]
    fn test_neutral_custom_theme_is_identity() {
        assert_eq!(
            MapcnThemes::create_custom_theme(0.0, 1.0, 1.0, None, 0.0),
            MapcnThemes::IDENTITY
        );
        assert_eq!(
            MapcnThemes::create_custom_theme(0.0, 1.0, 1.0, Some(Color::WHITE), 0.0),
            MapcnThemes::IDENTITY
        );
    }

    #[test]
    fn test_custom_theme_adjustments() {
        let gray = ColorMatrix(MapcnThemes::create_custom_theme(0.0, 1.0, 0.0, None, 0.0));
        let [r, g, b, _] = gray.apply_to_rgba([255, 0, 0, 255]);
        assert_eq!((r, g, b), (54, 54, 54));

        let brighter = ColorMatrix(MapcnThemes::create_custom_theme(0.1, 1.0, 1.0, None, 0.0));
        assert_eq!(brighter.apply_to_rgba([100, 100, 100, 255])[0], 126);

        let tinted = ColorMatrix(MapcnThemes::create_custom_theme(
            0.0,
            1.0,
            1.0,
            Some(Color::rgb(255, 0, 0)),
            1.0,
        ));
        assert_eq!(tinted.apply_to_rgba([10, 20, 30, 200]), [255, 0, 0, 200]);
    }

    #[test]
    fn test_invalid_lengths_give_identity() {
        assert_eq!(MapcnThemes::invert(&[1.0, 2.0]), MapcnThemes::IDENTITY);
        assert_eq!(
            MapcnThemes::combine(&MapcnThemes::SEPIA, &[0.0; 21]),
            MapcnThemes::IDENTITY
        );
    }

    #[test]
    fn test_combine_with_identity() {
        assert_eq!(
            MapcnThemes::combine(&MapcnThemes::IDENTITY, &MapcnThemes::WARM),
            MapcnThemes::WARM
        );
        assert_eq!(
            MapcnThemes::combine(&MapcnThemes::COOL, &MapcnThemes::IDENTITY),
            MapcnThemes::COOL
        );
    }

    #[test]
    fn test_by_name() {
        assert_eq!(MapcnThemes::by_name("sepia"), Some(MapcnThemes::SEPIA));
        assert_eq!(
            MapcnThemes::by_name("High Contrast"),
            Some(MapcnThemes::HIGH_CONTRAST)
        );
        assert_eq!(MapcnThemes::by_name("neon"), None);
        assert!(MapcnThemes::names()
            .iter()
            .all(|name| MapcnThemes::by_name(name).is_some()));
    }
}
