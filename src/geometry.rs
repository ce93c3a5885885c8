//! Integer rectangles in screen or canvas space.
//!
//! `Rect` is half-open: it covers `x0..x1` × `y0..y1`. Rectangles built from
//! pointer drags may arrive with swapped corners; call `normalize` before
//! measuring them.

/// Axis-aligned rectangle `(x0, y0)`–`(x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Orders the corners so that `x0 <= x1` and `y0 <= y1`.
    pub fn normalize(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Half-open containment test.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Overlap of two rectangles. Disjoint inputs give an empty rectangle.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of every rectangle, or `None` for an empty iterator.
    pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().copied().reduce(|acc, r| acc.union(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_orders_corners() {
        let cases = [
            ((0, 0, 10, 10), (0, 0, 10, 10)),
            ((10, 10, 0, 0), (0, 0, 10, 10)),
            ((-5, 7, -10, 20), (-10, 7, -5, 20)),
            ((3, 9, 3, 2), (3, 2, 3, 9)),
            ((2, 5, 7, 5), (2, 5, 7, 5)),
        ];
        for ((x0, y0, x1, y1), (a, b, c, d)) in cases {
            assert_eq!(
                Rect::normalize(x0, y0, x1, y1),
                Rect::new(a, b, c, d),
                "normalize({x0},{y0},{x1},{y1})"
            );
        }
    }

    #[test]
    fn normalize_preserves_coordinate_sets() {
        let values = [-1000, -7, -1, 0, 1, 2, 99, 4096];
        for &x0 in &values {
            for &x1 in &values {
                let r = Rect::normalize(x0, x1, x1, x0);
                assert!(r.x0 <= r.x1 && r.y0 <= r.y1);
                let mut got = [r.x0, r.x1];
                let mut want = [x0, x1];
                got.sort_unstable();
                want.sort_unstable();
                assert_eq!(got, want);
            }
        }
    }

    #[test]
    fn intersect_clips_to_bounds() {
        let canvas = Rect::from_size(50, 40);
        assert_eq!(
            Rect::new(-10, 30, 20, 60).intersect(&canvas),
            Rect::new(0, 30, 20, 40)
        );
        assert!(Rect::new(60, 60, 70, 70).intersect(&canvas).is_empty());
    }

    #[test]
    fn union_all_spans_negative_offsets() {
        let displays = [
            Rect::new(0, 0, 1920, 1080),
            Rect::new(-1280, -200, 0, 824),
        ];
        let u = Rect::union_all(&displays).unwrap();
        assert_eq!(u, Rect::new(-1280, -200, 1920, 1080));
        assert_eq!((u.width(), u.height()), (3200, 1280));
        assert!(Rect::union_all(&[]).is_none());
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(16, 552, 136, 584);
        assert!(r.contains(16, 552));
        assert!(r.contains(135, 583));
        assert!(!r.contains(136, 560));
        assert!(!r.contains(20, 584));
    }
}
