use crate::shared::bounds::Bounds;

/// Opacity written to a sink cell whose source pixel classified as skin.
pub const OPAQUE: u8 = 255;

/// Mutable per-pixel opacity grid over a bounded 2D region.
///
/// The mask engine only ever writes [`OPAQUE`]; cells it does not classify
/// keep whatever value they held, so callers that rely on a clean slate
/// must supply a freshly zeroed sink. Callers must only pass coordinates
/// inside `bounds()`.
pub trait OpacitySink {
    fn bounds(&self) -> Bounds;

    fn opacity(&self, x: i32, y: i32) -> u8;

    fn set_opacity(&mut self, x: i32, y: i32, value: u8);

    /// Borrowed mutable view when this sink is backed by a tightly packed
    /// one-byte-per-pixel buffer; enables the packed analysis walks.
    /// The default has no such backing.
    fn packed_alpha_mut(&mut self) -> Option<AlphaViewMut<'_>> {
        None
    }
}

/// Mutable view over tightly packed opacity bytes (stride equals width).
///
/// The cell at `bounds.min` sits at byte offset 0.
pub struct AlphaViewMut<'a> {
    pix: &'a mut [u8],
    bounds: Bounds,
}

impl<'a> AlphaViewMut<'a> {
    pub fn new(pix: &'a mut [u8], bounds: Bounds) -> Self {
        debug_assert_eq!(
            pix.len(),
            bounds.area(),
            "opacity data length must equal the bounds area"
        );
        Self { pix, bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Row `y_rel` (relative to `bounds.min_y`) as `width` mutable bytes.
    pub(crate) fn row_mut(&mut self, y_rel: usize) -> &mut [u8] {
        let width = self.bounds.width() as usize;
        let start = y_rel * width;
        &mut self.pix[start..start + width]
    }
}
