/// Default thresholds for the red/green skin rule, in 8-bit channel scale.
pub const DEFAULT_MIN_RED: u8 = 75;
pub const DEFAULT_MIN_RED_GREEN_DELTA: i32 = 20;
pub const DEFAULT_MAX_RED_GREEN_DELTA: i32 = 90;
pub const DEFAULT_MAX_RED_GREEN_RATIO: f32 = 2.5;

/// Red/green heuristic for skin-tone pixels.
///
/// A pixel classifies as skin when its red channel is bright enough
/// (dark pixels read as background or shadow), the red-green separation
/// falls inside a band characteristic of skin tones (too little looks
/// gray, too much looks saturated), and red does not dominate green by an
/// extreme ratio (saturated red objects, not skin). Blue and alpha never
/// participate.
///
/// One classifier instance backs every analysis path, so the thresholds
/// have a single source of truth. The rule assumes chromatic input;
/// grayscale images yield poor results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkinClassifier {
    min_red: u8,
    min_red_green_delta: i32,
    max_red_green_delta: i32,
    max_red_green_ratio: f32,
}

impl SkinClassifier {
    pub fn new(
        min_red: u8,
        min_red_green_delta: i32,
        max_red_green_delta: i32,
        max_red_green_ratio: f32,
    ) -> Self {
        Self {
            min_red,
            min_red_green_delta,
            max_red_green_delta,
            max_red_green_ratio,
        }
    }

    /// Classifies one pixel from its 8-bit red and green samples.
    ///
    /// The delta band is evaluated signed, so green above red fails the
    /// lower bound instead of wrapping around. The ratio bound is
    /// evaluated as `red < ratio * green`, which makes a zero green
    /// channel non-skin without dividing.
    pub fn is_skin(&self, red: u8, green: u8) -> bool {
        if red < self.min_red {
            return false;
        }
        let delta = red as i32 - green as i32;
        if delta < self.min_red_green_delta || delta > self.max_red_green_delta {
            return false;
        }
        (red as f32) < self.max_red_green_ratio * green as f32
    }
}

impl Default for SkinClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_MIN_RED,
            DEFAULT_MIN_RED_GREEN_DELTA,
            DEFAULT_MAX_RED_GREEN_DELTA,
            DEFAULT_MAX_RED_GREEN_RATIO,
        )
    }
}
