use crate::shared::bounds::Bounds;
use crate::shared::pixel_source::{narrow_channel, PixelSource, RgbaView};

/// Minimum pixels a luminance bucket must exceed before it counts toward
/// the content score.
pub const DEFAULT_BUCKET_THRESHOLD: u32 = 64;

const BUCKETS: usize = 256;

/// Content scorer over luminance spread.
///
/// Builds a 256-bucket luminance histogram of a region and counts the
/// buckets whose occupancy exceeds the configured threshold. Flat synthetic
/// fills (posters, solid backdrops, test cards) light up a handful of
/// buckets; camera footage spreads across many. The score saturates at 255.
pub struct ContentAnalyzer {
    bucket_threshold: u32,
}

impl ContentAnalyzer {
    pub fn new(bucket_threshold: u32) -> Self {
        Self { bucket_threshold }
    }

    /// Scores `region` of `source`.
    ///
    /// Pixels outside the source's own bounds are skipped. Takes the packed
    /// row walk when the source exposes a packed buffer covering exactly
    /// `region`, and the accessor walk otherwise; both produce the same
    /// score.
    pub fn score<S>(&self, source: &S, region: Bounds) -> u8
    where
        S: PixelSource + ?Sized,
    {
        if let Some(src) = source.packed_rgba() {
            if src.bounds() == region {
                log::trace!(
                    "content score: packed walk over {}x{} pixels",
                    region.width(),
                    region.height()
                );
                return self.occupied_buckets(&packed_histogram(src));
            }
        }
        self.occupied_buckets(&generic_histogram(source, region))
    }

    fn occupied_buckets(&self, histogram: &[u32; BUCKETS]) -> u8 {
        let occupied = histogram
            .iter()
            .filter(|&&count| count > self.bucket_threshold)
            .count();
        occupied.min(u8::MAX as usize) as u8
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_THRESHOLD)
    }
}

fn generic_histogram<S>(source: &S, region: Bounds) -> [u32; BUCKETS]
where
    S: PixelSource + ?Sized,
{
    let walk = region.intersect(&source.bounds());
    let mut histogram = [0u32; BUCKETS];
    for y in walk.min_y..walk.max_y {
        for x in walk.min_x..walk.max_x {
            let [red, green, blue, _] = source.rgba16(x, y);
            let luma = (narrow_channel(red) as u32
                + narrow_channel(green) as u32
                + narrow_channel(blue) as u32)
                / 3;
            histogram[luma as usize] += 1;
        }
    }
    histogram
}

fn packed_histogram(src: RgbaView<'_>) -> [u32; BUCKETS] {
    let height = src.bounds().height() as usize;
    let mut histogram = [0u32; BUCKETS];
    for y in 0..height {
        for px in src.row(y).chunks_exact(4) {
            let luma = (px[0] as u32 + px[1] as u32 + px[2] as u32) / 3;
            histogram[luma as usize] += 1;
        }
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::rgba_buffer::RgbaBuffer;
    use rstest::rstest;

    /// Wrapper that hides a buffer's packing, forcing the accessor walk.
    struct AccessorOnly<'a>(&'a RgbaBuffer);

    impl PixelSource for AccessorOnly<'_> {
        fn bounds(&self) -> Bounds {
            self.0.bounds()
        }

        fn rgba16(&self, x: i32, y: i32) -> [u16; 4] {
            self.0.rgba16(x, y)
        }
    }

    fn solid(bounds: Bounds, rgba: [u8; 4]) -> RgbaBuffer {
        let mut buf = RgbaBuffer::new(bounds);
        for y in bounds.min_y..bounds.max_y {
            for x in bounds.min_x..bounds.max_x {
                buf.set_pixel(x, y, rgba);
            }
        }
        buf
    }

    /// Column x carries luminance x; `rows` copies of every bucket.
    fn luminance_ramp(rows: u32) -> RgbaBuffer {
        let bounds = Bounds::from_size(256, rows);
        let mut buf = RgbaBuffer::new(bounds);
        for y in 0..rows as i32 {
            for x in 0..256i32 {
                let v = x as u8;
                buf.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        buf
    }

    // ── Bucket occupancy threshold ───────────────────────────────────

    #[rstest]
    #[case::under_threshold(4, 4, 0)]
    #[case::exactly_threshold(8, 8, 0)]
    #[case::just_past_threshold(9, 8, 1)]
    #[case::well_past_threshold(32, 32, 1)]
    fn test_solid_fill_scores_by_occupancy(
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: u8,
    ) {
        let buf = solid(Bounds::from_size(width, height), [120, 120, 120, 255]);
        let score = ContentAnalyzer::default().score(&buf, buf.bounds());
        assert_eq!(score, expected);
    }

    #[test]
    fn test_custom_threshold_zero_counts_any_occupied_bucket() {
        let mut buf = solid(Bounds::from_size(2, 1), [10, 10, 10, 255]);
        buf.set_pixel(1, 0, [200, 200, 200, 255]);
        let score = ContentAnalyzer::new(0).score(&buf, buf.bounds());
        assert_eq!(score, 2);
    }

    // ── Saturation ───────────────────────────────────────────────────

    #[test]
    fn test_score_saturates_at_255_when_all_buckets_pass() {
        // 65 rows put every one of the 256 buckets past the default
        // threshold; the count of 256 must clamp into the u8 score.
        let buf = luminance_ramp(65);
        let score = ContentAnalyzer::default().score(&buf, buf.bounds());
        assert_eq!(score, 255);
    }

    #[test]
    fn test_exact_threshold_occupancy_in_every_bucket_scores_zero() {
        let buf = luminance_ramp(64);
        let score = ContentAnalyzer::default().score(&buf, buf.bounds());
        assert_eq!(score, 0);
    }

    // ── Luminance bucketing ──────────────────────────────────────────

    #[test]
    fn test_luma_buckets_use_integer_division() {
        // (10 + 20 + 31) and (20 + 20 + 21) both sum to 61, so the two
        // pixels land in one bucket and push it past a threshold of 1.
        let mut buf = RgbaBuffer::new(Bounds::from_size(2, 1));
        buf.set_pixel(0, 0, [10, 20, 31, 255]);
        buf.set_pixel(1, 0, [20, 20, 21, 255]);
        assert_eq!(ContentAnalyzer::new(1).score(&buf, buf.bounds()), 1);

        let mut split = RgbaBuffer::new(Bounds::from_size(2, 1));
        split.set_pixel(0, 0, [10, 20, 31, 255]);
        split.set_pixel(1, 0, [90, 90, 90, 255]);
        assert_eq!(ContentAnalyzer::new(1).score(&split, split.bounds()), 0);
    }

    #[test]
    fn test_alpha_does_not_shift_luminance() {
        let opaque = solid(Bounds::from_size(9, 8), [120, 60, 30, 255]);
        let clear = solid(Bounds::from_size(9, 8), [120, 60, 30, 0]);
        let analyzer = ContentAnalyzer::default();
        assert_eq!(
            analyzer.score(&opaque, opaque.bounds()),
            analyzer.score(&clear, clear.bounds())
        );
    }

    // ── Region handling ──────────────────────────────────────────────

    #[test]
    fn test_empty_region_scores_zero() {
        let buf = solid(Bounds::from_size(16, 16), [120, 120, 120, 255]);
        let score = ContentAnalyzer::default().score(&buf, Bounds::new(5, 5, 5, 5));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_region_outside_source_scores_zero() {
        let buf = solid(Bounds::from_size(4, 4), [120, 120, 120, 255]);
        let score = ContentAnalyzer::new(0).score(&buf, Bounds::new(10, 10, 20, 20));
        assert_eq!(score, 0);
    }

    #[test]
    fn test_region_is_clipped_to_the_source() {
        // Only the 2x2 overlap contributes pixels.
        let buf = solid(Bounds::from_size(4, 4), [120, 120, 120, 255]);
        let analyzer = ContentAnalyzer::new(3);
        assert_eq!(analyzer.score(&buf, Bounds::new(2, 2, 8, 8)), 1);
        assert_eq!(ContentAnalyzer::new(4).score(&buf, Bounds::new(2, 2, 8, 8)), 0);
    }

    #[test]
    fn test_subregion_of_packed_buffer_scores_through_the_accessor_walk() {
        let buf = luminance_ramp(65);
        let region = Bounds::new(0, 0, 128, 65);
        let score = ContentAnalyzer::default().score(&buf, region);
        assert_eq!(score, 128);
    }

    // ── Path equivalence ─────────────────────────────────────────────

    #[test]
    fn test_packed_and_accessor_walks_agree() {
        let mut buf = RgbaBuffer::new(Bounds::from_size(31, 9));
        for y in 0..9 {
            for x in 0..31 {
                let v = (x * 23 + y * 11) as u8;
                buf.set_pixel(x, y, [v, v.wrapping_mul(3), v.wrapping_add(40), 255]);
            }
        }
        let analyzer = ContentAnalyzer::new(2);

        let packed = analyzer.score(&buf, buf.bounds());
        let accessor = analyzer.score(&AccessorOnly(&buf), buf.bounds());

        assert_eq!(packed, accessor);
    }

    #[test]
    fn test_view_over_padded_rows_skips_the_padding() {
        // Padding bytes carry a luminance no real pixel has; a walk that
        // ignored the stride would light up a second bucket.
        let bounds = Bounds::from_size(2, 2);
        let stride = 12;
        let mut pix = vec![0u8; 2 * stride];
        for row in 0..2 {
            pix[row * stride + 8..row * stride + 12].copy_from_slice(&[200, 200, 200, 255]);
        }
        let buf = RgbaBuffer::from_raw_with_stride(pix, bounds, stride).unwrap();

        let score = ContentAnalyzer::new(0).score(&buf, bounds);
        assert_eq!(score, 1);
    }

    #[test]
    fn test_zero_width_clip_scores_zero() {
        // Clipping off the right-hand edge leaves zero width but a
        // positive height; the packed walk must treat it as empty.
        let buf = solid(Bounds::from_size(4, 8), [120, 120, 120, 255]);
        let view = buf.view(Bounds::new(4, 2, 9, 8));
        let score = ContentAnalyzer::new(0).score(&view, view.bounds());
        assert_eq!(score, 0);
    }

    #[test]
    fn test_rgba_image_scores_through_the_packed_walk() {
        let img = image::RgbaImage::from_pixel(9, 8, image::Rgba([77, 77, 77, 255]));
        let score = ContentAnalyzer::default().score(&img, Bounds::from_size(9, 8));
        assert_eq!(score, 1);
    }
}
