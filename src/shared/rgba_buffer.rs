use ndarray::{ArrayView3, ShapeBuilder};
use thiserror::Error;

use crate::shared::bounds::Bounds;
use crate::shared::pixel_source::{widen_channel, PixelSource, RgbaView};

/// Bytes per packed pixel (R, G, B, A).
const PIXEL_BYTES: usize = 4;

/// Layout problems in caller-supplied raster bytes.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("pixel data holds {actual} bytes, layout needs {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("stride of {stride} bytes cannot cover rows of {min} bytes")]
    StrideTooSmall { stride: usize, min: usize },
}

/// Owned packed RGBA raster: interleaved 8-bit samples in row-major order
/// with an explicit row stride and arbitrary-origin bounds.
///
/// The pixel at `bounds.min` sits at byte offset 0; the pixel at `(x, y)`
/// sits at [`pixel_offset`](Self::pixel_offset). Rows may carry padding
/// (`stride > 4 * width`). Format conversion stays at the caller's I/O
/// boundary; this type treats the samples as opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaBuffer {
    pix: Vec<u8>,
    stride: usize,
    bounds: Bounds,
}

impl RgbaBuffer {
    /// Zeroed buffer covering `bounds`, with tight rows.
    pub fn new(bounds: Bounds) -> Self {
        let stride = bounds.width() as usize * PIXEL_BYTES;
        Self {
            pix: vec![0; stride * bounds.height() as usize],
            stride,
            bounds,
        }
    }

    /// Wraps interleaved RGBA bytes with tight rows.
    pub fn from_raw(pix: Vec<u8>, bounds: Bounds) -> Result<Self, LayoutError> {
        let stride = bounds.width() as usize * PIXEL_BYTES;
        Self::from_raw_with_stride(pix, bounds, stride)
    }

    /// Wraps interleaved RGBA bytes whose rows advance by `stride` bytes;
    /// the data must hold exactly `stride * height` bytes.
    pub fn from_raw_with_stride(
        pix: Vec<u8>,
        bounds: Bounds,
        stride: usize,
    ) -> Result<Self, LayoutError> {
        let row_bytes = bounds.width() as usize * PIXEL_BYTES;
        if stride < row_bytes {
            return Err(LayoutError::StrideTooSmall {
                stride,
                min: row_bytes,
            });
        }
        let expected = stride * bounds.height() as usize;
        if pix.len() != expected {
            return Err(LayoutError::DataLength {
                expected,
                actual: pix.len(),
            });
        }
        Ok(Self {
            pix,
            stride,
            bounds,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Distance between row starts, in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pix(&self) -> &[u8] {
        &self.pix
    }

    pub fn pix_mut(&mut self) -> &mut [u8] {
        &mut self.pix
    }

    /// Byte offset of the pixel at `(x, y)`, which must lie inside the
    /// bounds.
    pub fn pixel_offset(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            self.bounds.contains(x, y),
            "coordinate must lie inside the buffer bounds"
        );
        (y - self.bounds.min_y) as usize * self.stride
            + (x - self.bounds.min_x) as usize * PIXEL_BYTES
    }

    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        let offset = self.pixel_offset(x, y);
        [
            self.pix[offset],
            self.pix[offset + 1],
            self.pix[offset + 2],
            self.pix[offset + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        let offset = self.pixel_offset(x, y);
        self.pix[offset..offset + PIXEL_BYTES].copy_from_slice(&rgba);
    }

    /// Borrowed view of `view_bounds` clipped to this buffer's bounds,
    /// sharing this buffer's stride.
    pub fn view(&self, view_bounds: Bounds) -> RgbaView<'_> {
        let clipped = view_bounds.intersect(&self.bounds);
        if clipped.is_empty() {
            return RgbaView::new(&self.pix[..0], self.stride, clipped);
        }
        let start = self.pixel_offset(clipped.min_x, clipped.min_y);
        RgbaView::new(&self.pix[start..], self.stride, clipped)
    }

    /// Zero-copy `(height, width, 4)` view of the samples; row padding is
    /// skipped via the stride.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        let shape = (
            self.bounds.height() as usize,
            self.bounds.width() as usize,
            PIXEL_BYTES,
        )
            .strides((self.stride, PIXEL_BYTES, 1));
        ArrayView3::from_shape(shape, &self.pix)
            .expect("buffer layout was validated at construction")
    }
}

impl PixelSource for RgbaBuffer {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        let [r, g, b, a] = self.pixel(x, y);
        [
            widen_channel(r),
            widen_channel(g),
            widen_channel(b),
            widen_channel(a),
        ]
    }

    fn packed_rgba(&self) -> Option<RgbaView<'_>> {
        Some(RgbaView::new(&self.pix, self.stride, self.bounds))
    }
}
