use crate::masking::skin_classifier::SkinClassifier;
use crate::shared::alpha_mask::AlphaMask;
use crate::shared::opacity_sink::{AlphaViewMut, OpacitySink, OPAQUE};
use crate::shared::pixel_source::{narrow_channel, PixelSource, RgbaView};

/// Skin mask engine.
///
/// Classifies every pixel of a sink-shaped region against a
/// [`SkinClassifier`] and marks the matches opaque, reporting the fraction
/// that matched. One contract, two observably equivalent walks: a generic
/// walk through the abstract accessor seams, and a packed row walk taken
/// when source and sink both expose bounds-matching packed buffers.
pub struct SkinMasker {
    classifier: SkinClassifier,
}

impl SkinMasker {
    pub fn new(classifier: SkinClassifier) -> Self {
        Self { classifier }
    }

    /// Computes a fresh skin mask covering all of `source`.
    ///
    /// Returns the mask and the coverage ratio — the fraction of the
    /// source's pixels that classified as skin. Drawing the mask over the
    /// source leaves non-zero alpha only on the skin-toned pixels.
    pub fn mask<S>(&self, source: &S) -> (AlphaMask, f64)
    where
        S: PixelSource + ?Sized,
    {
        let mut mask = AlphaMask::new(source.bounds());
        let coverage = self.mask_into(source, &mut mask);
        (mask, coverage)
    }

    /// Classifies the region covered by `sink.bounds()`, marking skin
    /// pixels [`OPAQUE`] in `sink`; all other cells keep their value.
    ///
    /// The sink may cover any sub-rectangle of the source; each sink
    /// coordinate reads the source pixel at the same coordinate, and
    /// coordinates outside the source are skipped. Returns the coverage
    /// ratio over the sink's own area (`0.0` for an empty sink).
    pub fn mask_into<S, M>(&self, source: &S, sink: &mut M) -> f64
    where
        S: PixelSource + ?Sized,
        M: OpacitySink + ?Sized,
    {
        if let Some(src) = source.packed_rgba() {
            if let Some(dst) = sink.packed_alpha_mut() {
                if dst.bounds() == src.bounds() {
                    log::trace!(
                        "skin mask: packed walk over {}x{} pixels",
                        src.bounds().width(),
                        src.bounds().height()
                    );
                    return self.packed_pass(src, dst);
                }
                log::debug!(
                    "skin mask: packed bounds differ (source {:?}, sink {:?}), walking generically",
                    src.bounds(),
                    dst.bounds()
                );
            }
        }
        self.generic_pass(source, sink)
    }

    fn generic_pass<S, M>(&self, source: &S, sink: &mut M) -> f64
    where
        S: PixelSource + ?Sized,
        M: OpacitySink + ?Sized,
    {
        let region = sink.bounds();
        let walk = region.intersect(&source.bounds());
        let mut classified = 0usize;
        for y in walk.min_y..walk.max_y {
            for x in walk.min_x..walk.max_x {
                let [red, green, _, _] = source.rgba16(x, y);
                if self
                    .classifier
                    .is_skin(narrow_channel(red), narrow_channel(green))
                {
                    sink.set_opacity(x, y, OPAQUE);
                    classified += 1;
                }
            }
        }
        ratio(classified, region.area())
    }

    fn packed_pass(&self, src: RgbaView<'_>, mut dst: AlphaViewMut<'_>) -> f64 {
        let width = src.bounds().width() as usize;
        let height = src.bounds().height() as usize;
        let mut classified = 0usize;
        for y in 0..height {
            let row = src.row(y);
            let mask_row = dst.row_mut(y);
            for (px, cell) in row.chunks_exact(4).zip(mask_row.iter_mut()) {
                if self.classifier.is_skin(px[0], px[1]) {
                    *cell = OPAQUE;
                    classified += 1;
                }
            }
        }
        ratio(classified, width * height)
    }
}

impl Default for SkinMasker {
    fn default() -> Self {
        Self::new(SkinClassifier::default())
    }
}

fn ratio(classified: usize, area: usize) -> f64 {
    if area == 0 {
        0.0
    } else {
        classified as f64 / area as f64
    }
}
