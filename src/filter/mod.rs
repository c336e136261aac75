//! Named color-matrix filters and the catalog the filter panel enumerates.

use image::RgbaImage;

pub const NORMAL_FILTER_NAME: &str = "Normal";

/// 4x5 row-major color transform.
///
/// Each output channel is `m[r][0]*R + m[r][1]*G + m[r][2]*B + m[r][3]*A + m[r][4]`
/// with channels in `0..=255` and the last column expressed in the same units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix([f32; 20]);

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    pub const fn new(values: [f32; 20]) -> Self {
        Self(values)
    }

    /// Matrix that scales saturation; `0.0` yields full desaturation.
    pub fn saturation(saturation: f32) -> Self {
        const LUMA_R: f32 = 0.213;
        const LUMA_G: f32 = 0.715;
        const LUMA_B: f32 = 0.072;
        let inverse = 1.0 - saturation;
        let r = LUMA_R * inverse;
        let g = LUMA_G * inverse;
        let b = LUMA_B * inverse;
        Self([
            r + saturation, g, b, 0.0, 0.0, //
            r, g + saturation, b, 0.0, 0.0, //
            r, g, b + saturation, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    pub const fn values(&self) -> &[f32; 20] {
        &self.0
    }

    pub fn row(&self, index: usize) -> [f32; 5] {
        let start = index.min(3) * 5;
        let mut row = [0.0; 5];
        row.copy_from_slice(&self.0[start..start + 5]);
        row
    }

    pub fn apply_rgba(&self, pixel: [u8; 4]) -> [u8; 4] {
        let [r, g, b, a] = pixel.map(f32::from);
        let mut out = [0_u8; 4];
        for (channel, value) in out.iter_mut().enumerate() {
            let [mr, mg, mb, ma, offset] = self.row(channel);
            let mixed = mr * r + mg * g + mb * b + ma * a + offset;
            *value = mixed.round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    name: &'static str,
    matrix: ColorMatrix,
}

impl Filter {
    pub const fn new(name: &'static str, matrix: ColorMatrix) -> Self {
        Self { name, matrix }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn matrix(&self) -> &ColorMatrix {
        &self.matrix
    }

    /// Applies the filter in place; identity filters leave the buffer untouched.
    pub fn apply_to_image(&self, image: &mut RgbaImage) {
        if self.matrix.is_identity() {
            return;
        }
        for pixel in image.pixels_mut() {
            pixel.0 = self.matrix.apply_rgba(pixel.0);
        }
    }
}

const SEPIA: ColorMatrix = ColorMatrix::new([
    0.393, 0.769, 0.189, 0.0, 0.0, //
    0.349, 0.686, 0.168, 0.0, 0.0, //
    0.272, 0.534, 0.131, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

const WARM: ColorMatrix = ColorMatrix::new([
    1.438, -0.062, -0.062, 0.0, 0.0, //
    -0.122, 1.378, -0.122, 0.0, 0.0, //
    -0.016, -0.016, 1.483, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Ordered, immutable filter table. The first entry is the default selection.
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    filters: Vec<Filter>,
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCatalog {
    pub fn new() -> Self {
        Self {
            filters: vec![
                Filter::new(NORMAL_FILTER_NAME, ColorMatrix::IDENTITY),
                Filter::new("B&W", ColorMatrix::saturation(0.0)),
                Filter::new("Sepia", SEPIA),
                Filter::new("Warm", WARM),
            ],
        }
    }

    pub fn list(&self) -> &[Filter] {
        &self.filters
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(Filter::name).collect()
    }

    pub fn default_filter(&self) -> &Filter {
        &self.filters[0]
    }

    pub fn find(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|filter| filter.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Total lookup: unknown names resolve to the identity filter.
    pub fn lookup(&self, name: &str) -> &Filter {
        self.find(name).unwrap_or_else(|| {
            tracing::debug!(name, "unknown filter; falling back to identity");
            self.default_filter()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn catalog_lists_filters_in_stable_order() {
        let catalog = FilterCatalog::new();
        assert_eq!(catalog.names(), vec!["Normal", "B&W", "Sepia", "Warm"]);
        assert_eq!(catalog.names(), FilterCatalog::new().names());
        assert_eq!(catalog.default_filter().name(), NORMAL_FILTER_NAME);
    }

    #[test]
    fn lookup_returns_exact_match() {
        let catalog = FilterCatalog::new();
        let sepia = catalog.lookup("Sepia");
        assert_eq!(sepia.name(), "Sepia");
        assert_eq!(*sepia.matrix(), SEPIA);
    }

    #[test]
    fn lookup_miss_falls_back_to_identity() {
        let catalog = FilterCatalog::new();
        for name in ["", "sepia", "Vintage", "Normal "] {
            let filter = catalog.lookup(name);
            assert_eq!(filter.name(), NORMAL_FILTER_NAME, "{name:?}");
            assert!(filter.matrix().is_identity());
        }
    }

    #[test]
    fn black_and_white_desaturates_to_equal_channels() {
        let catalog = FilterCatalog::new();
        let [r, g, b, a] = catalog.lookup("B&W").matrix().apply_rgba([200, 40, 90, 255]);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn warm_matrix_clamps_saturated_channels() {
        let pixel = WARM.apply_rgba([255, 255, 255, 128]);
        assert_eq!(pixel, [255, 255, 255, 128]);
    }

    #[test]
    fn identity_leaves_pixels_untouched() {
        assert_eq!(ColorMatrix::IDENTITY.apply_rgba([1, 2, 3, 4]), [1, 2, 3, 4]);
        assert!(ColorMatrix::saturation(1.0).apply_rgba([10, 20, 30, 40]) == [10, 20, 30, 40]);
    }

    #[test]
    fn apply_to_image_rewrites_every_pixel() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([100, 150, 200, 255]));
        let catalog = FilterCatalog::new();
        catalog.lookup("Sepia").apply_to_image(&mut image);
        let expected = SEPIA.apply_rgba([100, 150, 200, 255]);
        assert!(image.pixels().all(|pixel| pixel.0 == expected));
        assert_ne!(expected, [100, 150, 200, 255]);
    }
}
