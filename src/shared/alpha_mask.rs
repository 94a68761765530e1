use ndarray::ArrayView2;

use crate::shared::bounds::Bounds;
use crate::shared::opacity_sink::{AlphaViewMut, OpacitySink};
use crate::shared::rgba_buffer::LayoutError;

/// Owned opacity raster: one byte per pixel, tightly packed, row-major,
/// with arbitrary-origin bounds.
///
/// Freshly allocated masks are fully transparent; the mask engine marks
/// classified cells opaque and leaves the rest untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    pix: Vec<u8>,
    bounds: Bounds,
}

impl AlphaMask {
    /// Fully transparent mask covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            pix: vec![0; bounds.area()],
            bounds,
        }
    }

    /// Wraps existing opacity bytes; the data must hold exactly one byte
    /// per pixel of `bounds`.
    pub fn from_raw(pix: Vec<u8>, bounds: Bounds) -> Result<Self, LayoutError> {
        if pix.len() != bounds.area() {
            return Err(LayoutError::DataLength {
                expected: bounds.area(),
                actual: pix.len(),
            });
        }
        Ok(Self { pix, bounds })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn pix(&self) -> &[u8] {
        &self.pix
    }

    pub fn pix_mut(&mut self) -> &mut [u8] {
        &mut self.pix
    }

    pub fn opacity(&self, x: i32, y: i32) -> u8 {
        self.pix[self.cell_offset(x, y)]
    }

    pub fn set_opacity(&mut self, x: i32, y: i32, value: u8) {
        let offset = self.cell_offset(x, y);
        self.pix[offset] = value;
    }

    /// Number of cells with non-zero opacity.
    pub fn coverage_count(&self) -> usize {
        self.pix.iter().filter(|&&v| v != 0).count()
    }

    /// Zero-copy `(height, width)` view of the cells.
    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape(
            (self.bounds.height() as usize, self.bounds.width() as usize),
            &self.pix,
        )
        .expect("mask data length must equal the bounds area")
    }

    fn cell_offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.bounds.contains(x, y),
            "coordinate must lie inside the mask bounds"
        );
        (y - self.bounds.min_y) as usize * self.bounds.width() as usize
            + (x - self.bounds.min_x) as usize
    }
}

impl OpacitySink for AlphaMask {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn opacity(&self, x: i32, y: i32) -> u8 {
        AlphaMask::opacity(self, x, y)
    }

    fn set_opacity(&mut self, x: i32, y: i32, value: u8) {
        AlphaMask::set_opacity(self, x, y, value);
    }

    fn packed_alpha_mut(&mut self) -> Option<AlphaViewMut<'_>> {
        Some(AlphaViewMut::new(&mut self.pix, self.bounds))
    }
}
