//! Shared geometric primitives used across editor and gesture modules.
//!
//! All coordinates are signed pixel offsets relative to the centre of the
//! edited image.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn translated(self, delta_x: f32, delta_y: f32) -> Self {
        Self {
            x: self.x + delta_x,
            y: self.y + delta_y,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned square box centred on a sticker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerBounds {
    pub center: Offset,
    pub half_extent: f32,
}

impl StickerBounds {
    pub fn new(center: Offset, side: f32) -> Self {
        Self {
            center,
            half_extent: (side / 2.0).abs(),
        }
    }

    pub fn contains(&self, point: Offset) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translated_accumulates_signed_deltas() {
        let offset = Offset::ORIGIN.translated(12.5, -4.0).translated(-2.5, -6.0);
        assert_eq!(offset, Offset::new(10.0, -10.0));
    }

    #[test]
    fn bounds_contain_edges_and_reject_outside_points() {
        let bounds = StickerBounds::new(Offset::new(10.0, 10.0), 20.0);
        assert!(bounds.contains(Offset::new(0.0, 20.0)));
        assert!(bounds.contains(Offset::new(10.0, 10.0)));
        assert!(!bounds.contains(Offset::new(-0.5, 10.0)));
        assert!(!bounds.contains(Offset::new(10.0, 20.5)));
    }
}
