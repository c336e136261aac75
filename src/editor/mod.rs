//! Edit state model for a single photo: filter, transforms, caption and stickers.

pub mod sticker;
pub mod tools;

use crate::filter::{Filter, FilterCatalog, NORMAL_FILTER_NAME};
use crate::geometry::Offset;

pub use sticker::{
    StickerId, StickerLayer, STICKER_BASE_SIZE_PX, STICKER_DEFAULT_SCALE, STICKER_MAX_SCALE,
    STICKER_MIN_SCALE,
};
pub use tools::{ActiveTool, ToolPanel};

pub const CAPTION_MAX_CHARS: usize = 20;
pub const CAPTION_PLACEHOLDER: &str = "Tap to add text...";
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 3.0;
pub const ROTATION_STEP_DEGREES: f32 = 90.0;
pub const DEFAULT_STICKER_CAP: usize = 3;
pub const EMOJI_PALETTE: [&str; 12] = [
    "😎", "😍", "🎉", "🔥", "❤️", "⭐", "🍕", "🚀", "🐶", "🐱", "🌈", "🇮🇹",
];

fn clamp_zoom(zoom: f32) -> f32 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// All pending visual edits for one photo.
///
/// Mutators are crate-private; callers go through the session controller, which
/// enforces the lifecycle and the sticker cap. Each mutator reports whether the
/// value actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    filter_name: String,
    caption: String,
    rotation_degrees: f32,
    mirror_x: f32,
    mirror_y: f32,
    zoom: f32,
    stickers: Vec<StickerLayer>,
}

impl Default for EditState {
    fn default() -> Self {
        Self {
            filter_name: NORMAL_FILTER_NAME.to_string(),
            caption: String::new(),
            rotation_degrees: 0.0,
            mirror_x: 1.0,
            mirror_y: 1.0,
            zoom: ZOOM_MIN,
            stickers: Vec::new(),
        }
    }
}

impl EditState {
    pub fn filter_name(&self) -> &str {
        &self.filter_name
    }

    pub fn filter<'a>(&self, catalog: &'a FilterCatalog) -> &'a Filter {
        catalog.lookup(&self.filter_name)
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn caption_len(&self) -> usize {
        self.caption.chars().count()
    }

    pub fn caption_counter(&self) -> String {
        format!("{}/{}", self.caption_len(), CAPTION_MAX_CHARS)
    }

    /// Text shown in the caption area: the caption, or the placeholder when empty.
    pub fn caption_display(&self) -> &str {
        if self.caption.is_empty() {
            CAPTION_PLACEHOLDER
        } else {
            &self.caption
        }
    }

    pub const fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    pub const fn mirror_x(&self) -> f32 {
        self.mirror_x
    }

    pub const fn mirror_y(&self) -> f32 {
        self.mirror_y
    }

    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Effective horizontal and vertical scale factors (mirror times zoom).
    pub fn scale_factors(&self) -> (f32, f32) {
        (self.mirror_x * self.zoom, self.mirror_y * self.zoom)
    }

    pub fn stickers(&self) -> &[StickerLayer] {
        &self.stickers
    }

    pub fn sticker(&self, id: StickerId) -> Option<&StickerLayer> {
        self.stickers.iter().find(|sticker| sticker.id() == id)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn set_filter(&mut self, catalog: &FilterCatalog, name: &str) -> bool {
        let resolved = catalog.lookup(name).name();
        if self.filter_name == resolved {
            return false;
        }
        self.filter_name = resolved.to_string();
        true
    }

    /// Rejects the whole update when it exceeds the caption limit.
    pub(crate) fn set_caption(&mut self, text: &str) -> bool {
        if text.chars().count() > CAPTION_MAX_CHARS || self.caption == text {
            return false;
        }
        self.caption = text.to_string();
        true
    }

    pub(crate) fn rotate_by(&mut self, degrees: f32) {
        self.rotation_degrees += degrees;
    }

    pub(crate) fn flip_horizontal(&mut self) {
        self.mirror_x = -self.mirror_x;
    }

    pub(crate) fn flip_vertical(&mut self) {
        self.mirror_y = -self.mirror_y;
    }

    pub(crate) fn set_zoom(&mut self, zoom: f32) -> bool {
        if zoom.is_nan() {
            return false;
        }
        let zoom = clamp_zoom(zoom);
        if self.zoom == zoom {
            return false;
        }
        self.zoom = zoom;
        true
    }

    pub(crate) fn push_sticker(&mut self, sticker: StickerLayer) {
        self.stickers.push(sticker);
    }

    pub(crate) fn sticker_mut(&mut self, id: StickerId) -> Option<&mut StickerLayer> {
        self.stickers.iter_mut().find(|sticker| sticker.id() == id)
    }

    pub(crate) fn update_sticker(&mut self, id: StickerId, offset: Offset, scale: f32) -> bool {
        let Some(sticker) = self.sticker_mut(id) else {
            return false;
        };
        let before = sticker.clone();
        if offset.is_finite() {
            sticker.move_to(offset);
        }
        sticker.set_scale(scale);
        *sticker != before
    }

    pub(crate) fn remove_sticker(&mut self, id: StickerId) -> Option<StickerLayer> {
        let index = self.stickers.iter().position(|sticker| sticker.id() == id)?;
        Some(self.stickers.remove(index))
    }
}
