use serde::{Serialize, Deserialize};

/// An axis-aligned rectangle in bin coordinates.
///
/// `right` and `bottom` are derived on demand, so they always agree with the
/// stored position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Rect {
        Rect { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.width >= width && self.height >= height
    }

    /// Overlap test with exclusive edges: touching rectangles do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        return !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y);
    }

    /// True when `other` lies entirely inside `self`. Equal rectangles
    /// contain each other.
    pub fn contains(&self, other: &Rect) -> bool {
        return self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom();
    }

    /// Grows the rectangle outwards by `padding` on every side, keeping the
    /// position of the top left corner. `None` if the size overflows.
    pub fn inflate(&self, padding: u32) -> Option<Rect> {
        let inset = padding.checked_mul(2)?;
        Some(Rect {
            x: self.x,
            y: self.y,
            width: self.width.checked_add(inset)?,
            height: self.height.checked_add(inset)?,
        })
    }

    /// Strips an inward inset of `padding` from every side. `None` if the
    /// inset does not fit inside the rectangle.
    pub fn unpad(&self, padding: u32) -> Option<Rect> {
        let inset = padding.checked_mul(2)?;
        Some(Rect {
            x: self.x.checked_add(padding)?,
            y: self.y.checked_add(padding)?,
            width: self.width.checked_sub(inset)?,
            height: self.height.checked_sub(inset)?,
        })
    }

    /// The parts of `self` left uncovered by `occupied`, one strip per side
    /// where `occupied` does not reach the edge of `self`. Strips overlap
    /// each other at the corners.
    pub(crate) fn divide(&self, occupied: &Rect) -> Vec<Rect> {
        let mut rects: Vec<Rect> = Vec::with_capacity(4);

        // left
        if occupied.x > self.x {
            rects.push(Rect::new(self.x, self.y, occupied.x - self.x, self.height));
        }

        // right
        if occupied.right() < self.right() {
            rects.push(Rect::new(occupied.right(), self.y, self.right() - occupied.right(), self.height));
        }

        // top
        if occupied.y > self.y {
            rects.push(Rect::new(self.x, self.y, self.width, occupied.y - self.y));
        }

        // bottom
        if occupied.bottom() < self.bottom() {
            rects.push(Rect::new(self.x, occupied.bottom(), self.width, self.bottom() - occupied.bottom()));
        }

        return rects;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
        assert!(a.intersects(&Rect::new(2, 2, 1, 1)));
    }

    #[test]
    fn containment() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Rect::new(2, 3, 8, 7)));
        assert!(!outer.contains(&Rect::new(2, 3, 9, 7)));
        assert!(!Rect::new(2, 3, 8, 7).contains(&outer));
    }

    #[test]
    fn inflate_then_unpad() {
        let rect = Rect::new(4, 6, 10, 20);
        let padded = rect.inflate(3).unwrap();
        assert_eq!(padded, Rect::new(4, 6, 16, 26));
        assert_eq!(padded.unpad(3), Some(Rect::new(7, 9, 10, 20)));
    }

    #[test]
    fn inflate_and_unpad_reject_out_of_range_padding() {
        assert_eq!(Rect::new(0, 0, 1, 1).unpad(1), None);
        assert_eq!(Rect::new(0, 0, 2, 3).unpad(1), Some(Rect::new(1, 1, 0, 1)));
        assert_eq!(Rect::new(0, 0, 1, 1).inflate(1 << 31), None);
        assert_eq!(Rect::new(0, 0, u32::MAX - 1, 1).inflate(1), None);
        assert_eq!(Rect::new(u32::MAX, 0, 4, 4).unpad(1), None);
    }

    #[test]
    fn divide_produces_strips_for_uncovered_sides() {
        let free = Rect::new(0, 0, 100, 100);
        let strips = free.divide(&Rect::new(10, 20, 30, 40));
        assert_eq!(strips, vec![
            Rect::new(0, 0, 10, 100),
            Rect::new(40, 0, 60, 100),
            Rect::new(0, 0, 100, 20),
            Rect::new(0, 60, 100, 40),
        ]);

        // occupied rectangle covering the whole region leaves nothing
        assert!(free.divide(&Rect::new(0, 0, 100, 100)).is_empty());

        // corner placement only leaves the right and bottom strips
        let strips = free.divide(&Rect::new(0, 0, 50, 50));
        assert_eq!(strips, vec![Rect::new(50, 0, 50, 100), Rect::new(0, 50, 100, 50)]);
    }
}
