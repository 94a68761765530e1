/// Integer pixel rectangle, half-open on both axes.
///
/// A coordinate `(x, y)` lies inside when `min_x <= x < max_x` and
/// `min_y <= y < max_y`. Inverted rectangles (`max <= min`) are valid
/// values and behave as empty everywhere — they never error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rectangle of `width` by `height` pixels anchored at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Horizontal extent in pixels; 0 for inverted rectangles.
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x).max(0) as u32
    }

    /// Vertical extent in pixels; 0 for inverted rectangles.
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y).max(0) as u32
    }

    /// Pixel count covered by the rectangle.
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// Largest rectangle covered by both `self` and `other`.
    ///
    /// Disjoint inputs produce an inverted (empty) result.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        )
    }
}
