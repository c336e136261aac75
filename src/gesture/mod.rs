//! Per-frame gesture translation into session mutations.
//!
//! Every frame is applied immediately; there is no smoothing or debouncing.
//! Sticker frames are relative: pan deltas add to the stored offset and pinch
//! ratios multiply the stored scale, clamped after each frame.

use crate::editor::sticker::clamp_sticker_scale;
use crate::editor::{ActiveTool, EditState, StickerId};
use crate::geometry::Offset;
use crate::session::EditSessionController;
use crate::state::SessionResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Drag frame on a sticker, in storage units.
    StickerPan { id: StickerId, delta: Offset },
    /// Incremental pinch ratio since the previous frame.
    StickerPinch { id: StickerId, zoom_ratio: f32 },
    /// Combined drag and pinch frame, as reported by a transform detector.
    StickerTransform {
        id: StickerId,
        pan: Offset,
        zoom_ratio: f32,
    },
    StickerDoubleTap { id: StickerId },
    /// Double tap at a point relative to the image centre.
    DoubleTapAt { point: Offset },
    /// Transform panel zoom slider position.
    ZoomSlider { value: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Applied,
    Ignored,
}

fn valid_ratio(ratio: f32) -> bool {
    ratio.is_finite() && ratio > 0.0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GestureMutator;

impl GestureMutator {
    pub const fn new() -> Self {
        Self
    }

    /// Top-most sticker (last drawn) whose box contains `point`.
    pub fn sticker_at(state: &EditState, point: Offset) -> Option<StickerId> {
        state
            .stickers()
            .iter()
            .rev()
            .find(|sticker| sticker.bounds().contains(point))
            .map(|sticker| sticker.id())
    }

    pub fn apply(
        &self,
        session: &mut EditSessionController,
        event: GestureEvent,
    ) -> SessionResult<GestureOutcome> {
        session.ensure_editing("gesture")?;
        match event {
            GestureEvent::StickerPan { id, delta } => {
                self.transform_sticker(session, id, delta, 1.0)
            }
            GestureEvent::StickerPinch { id, zoom_ratio } => {
                self.transform_sticker(session, id, Offset::ORIGIN, zoom_ratio)
            }
            GestureEvent::StickerTransform {
                id,
                pan,
                zoom_ratio,
            } => self.transform_sticker(session, id, pan, zoom_ratio),
            GestureEvent::StickerDoubleTap { id } => self.delete_sticker(session, id),
            GestureEvent::DoubleTapAt { point } => {
                match Self::sticker_at(session.edit_state(), point) {
                    Some(id) => self.delete_sticker(session, id),
                    None => {
                        tracing::trace!(x = point.x, y = point.y, "double tap missed stickers");
                        Ok(GestureOutcome::Ignored)
                    }
                }
            }
            GestureEvent::ZoomSlider { value } => {
                if session.active_tool() != ActiveTool::Transform || value.is_nan() {
                    tracing::trace!(value, tool = ?session.active_tool(), "zoom slider ignored");
                    return Ok(GestureOutcome::Ignored);
                }
                session.set_zoom(value)?;
                Ok(GestureOutcome::Applied)
            }
        }
    }

    fn transform_sticker(
        &self,
        session: &mut EditSessionController,
        id: StickerId,
        pan: Offset,
        zoom_ratio: f32,
    ) -> SessionResult<GestureOutcome> {
        if !pan.is_finite() || !valid_ratio(zoom_ratio) {
            tracing::trace!(%id, ?pan, zoom_ratio, "malformed gesture frame dropped");
            return Ok(GestureOutcome::Ignored);
        }
        let Some(sticker) = session.edit_state().sticker(id) else {
            return Ok(GestureOutcome::Ignored);
        };
        let offset = sticker.offset().translated(pan.x, pan.y);
        let scale = clamp_sticker_scale(sticker.scale() * zoom_ratio);
        session.update_sticker(id, offset.x, offset.y, scale)?;
        Ok(GestureOutcome::Applied)
    }

    fn delete_sticker(
        &self,
        session: &mut EditSessionController,
        id: StickerId,
    ) -> SessionResult<GestureOutcome> {
        if session.edit_state().sticker(id).is_none() {
            return Ok(GestureOutcome::Ignored);
        }
        session.delete_sticker(id)?;
        Ok(GestureOutcome::Applied)
    }
}
