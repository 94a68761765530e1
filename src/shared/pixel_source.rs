use crate::shared::bounds::Bounds;

/// Read-only color accessor over a bounded 2D pixel grid.
///
/// Channel intensities are presented in the full 16-bit range regardless of
/// the backing storage depth, so 8-bit-backed implementations replicate the
/// byte into both halves (`sample * 257`); `>> 8` then recovers the byte
/// exactly. Callers must only pass coordinates inside `bounds()`.
pub trait PixelSource {
    fn bounds(&self) -> Bounds;

    /// R, G, B, A at `(x, y)`, 16-bit-scaled.
    fn rgba16(&self, x: i32, y: i32) -> [u16; 4];

    /// Borrowed packed view when this source is backed by a contiguous
    /// interleaved 8-bit RGBA buffer; enables the packed analysis walks.
    /// The default has no such backing.
    fn packed_rgba(&self) -> Option<RgbaView<'_>> {
        None
    }
}

/// Replicates an 8-bit sample across the 16-bit channel range.
pub fn widen_channel(sample: u8) -> u16 {
    sample as u16 * 257
}

/// Truncates a 16-bit-scaled channel back to its 8-bit sample.
pub fn narrow_channel(channel: u16) -> u8 {
    (channel >> 8) as u8
}

/// Borrowed view over packed RGBA bytes.
///
/// The pixel at `bounds.min` sits at byte offset 0 and rows advance by
/// `stride` bytes, so sub-rectangle views of a larger buffer keep the
/// parent's stride. A view is itself a [`PixelSource`] and reports its own
/// packing, which lets it participate in packed-walk dispatch.
#[derive(Clone, Copy)]
pub struct RgbaView<'a> {
    pix: &'a [u8],
    stride: usize,
    bounds: Bounds,
}

impl<'a> RgbaView<'a> {
    /// Wraps raw packed bytes. `stride` must cover `4 * width` bytes and
    /// `pix` must reach the last byte of the last row.
    pub fn new(pix: &'a [u8], stride: usize, bounds: Bounds) -> Self {
        debug_assert!(
            stride >= bounds.width() as usize * 4,
            "stride must cover a full row of pixels"
        );
        debug_assert!(
            pix.len() >= Self::required_len(stride, bounds),
            "pixel data must cover every row"
        );
        Self {
            pix,
            stride,
            bounds,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Distance between row starts, in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `y_rel` (relative to `bounds.min_y`) as `width * 4` bytes.
    ///
    /// Zero-width views hold no row bytes at all, so every row is empty.
    pub(crate) fn row(&self, y_rel: usize) -> &[u8] {
        let len = self.bounds.width() as usize * 4;
        if len == 0 {
            return &[];
        }
        let start = y_rel * self.stride;
        &self.pix[start..start + len]
    }

    fn required_len(stride: usize, bounds: Bounds) -> usize {
        let width = bounds.width() as usize;
        let height = bounds.height() as usize;
        if width == 0 || height == 0 {
            0
        } else {
            (height - 1) * stride + width * 4
        }
    }
}

impl PixelSource for RgbaView<'_> {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
        debug_assert!(
            self.bounds.contains(x, y),
            "coordinate must lie inside the view bounds"
        );
        let offset = (y - self.bounds.min_y) as usize * self.stride
            + (x - self.bounds.min_x) as usize * 4;
        let px = &self.pix[offset..offset + 4];
        [
            widen_channel(px[0]),
            widen_channel(px[1]),
            widen_channel(px[2]),
            widen_channel(px[3]),
        ]
    }

    fn packed_rgba(&self) -> Option<RgbaView<'_>> {
        Some(*self)
    }
}
