use std::fmt;

use uuid::Uuid;

use crate::geometry::{Offset, StickerBounds};

pub const STICKER_MIN_SCALE: f32 = 0.5;
pub const STICKER_MAX_SCALE: f32 = 3.0;
pub const STICKER_DEFAULT_SCALE: f32 = 1.0;
/// Rendered side length of a sticker glyph at scale 1.0.
pub const STICKER_BASE_SIZE_PX: f32 = 48.0;

/// Stable identity of a sticker; never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StickerId(Uuid);

impl StickerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) fn clamp_sticker_scale(scale: f32) -> f32 {
    scale.clamp(STICKER_MIN_SCALE, STICKER_MAX_SCALE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StickerLayer {
    id: StickerId,
    glyph: String,
    pub offset_x: f32,
    pub offset_y: f32,
    scale: f32,
}

impl StickerLayer {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            id: StickerId::generate(),
            glyph: glyph.into(),
            offset_x: 0.0,
            offset_y: 0.0,
            scale: STICKER_DEFAULT_SCALE,
        }
    }

    pub const fn id(&self) -> StickerId {
        self.id
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub const fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Offset {
        Offset::new(self.offset_x, self.offset_y)
    }

    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_nan() {
            return;
        }
        self.scale = clamp_sticker_scale(scale);
    }

    pub fn move_to(&mut self, offset: Offset) {
        self.offset_x = offset.x;
        self.offset_y = offset.y;
    }

    pub fn bounds(&self) -> StickerBounds {
        StickerBounds::new(self.offset(), STICKER_BASE_SIZE_PX * self.scale)
    }
}
