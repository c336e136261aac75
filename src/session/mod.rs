//! Edit session controller: owns the edit state, the active tool and the
//! session lifecycle, and hands the finished edit to the order flow.

use std::fmt;

use crate::config::EditorConfig;
use crate::editor::{
    ActiveTool, EditState, StickerId, StickerLayer, ToolPanel, ROTATION_STEP_DEGREES,
};
use crate::filter::FilterCatalog;
use crate::geometry::Offset;
use crate::state::{
    SessionError, SessionEvent, SessionResult, SessionState, SessionStateMachine,
    SessionTransition,
};

/// Opaque reference to the source photo, resolved by the image loader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable result of a committed session.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedEdit {
    pub photo: PhotoRef,
    pub edit: EditState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Edits exist; the caller must ask the user before discarding.
    NeedsConfirmation,
    Discarded,
}

/// One observable change, delivered to subscribers after it is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum EditChange {
    Filter(String),
    Caption(String),
    Rotation(f32),
    Mirror { x: f32, y: f32 },
    Zoom(f32),
    StickerAdded(StickerId),
    StickerUpdated(StickerId),
    StickerRemoved(StickerId),
    Reset,
    ToolSelected(ActiveTool),
    StateChanged(SessionState),
}

type ChangeObserver = Box<dyn FnMut(&EditChange)>;

pub struct EditSessionController {
    photo: PhotoRef,
    config: EditorConfig,
    catalog: FilterCatalog,
    machine: SessionStateMachine,
    edit: EditState,
    active_tool: ActiveTool,
    committed: Option<CommittedEdit>,
    observers: Vec<ChangeObserver>,
}

impl fmt::Debug for EditSessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSessionController")
            .field("photo", &self.photo)
            .field("state", &self.machine.state())
            .field("active_tool", &self.active_tool)
            .field("edit", &self.edit)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl EditSessionController {
    pub fn new(photo: PhotoRef) -> Self {
        Self::with_config(photo, EditorConfig::default())
    }

    pub fn with_config(photo: PhotoRef, config: EditorConfig) -> Self {
        tracing::debug!(%photo, sticker_cap = config.sticker_cap, "open edit session");
        Self {
            photo,
            config,
            catalog: FilterCatalog::new(),
            machine: SessionStateMachine::new(),
            edit: EditState::default(),
            active_tool: ActiveTool::None,
            committed: None,
            observers: Vec::new(),
        }
    }

    pub fn photo(&self) -> &PhotoRef {
        &self.photo
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn session_state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn transitions(&self) -> &[SessionTransition] {
        self.machine.history()
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn active_tool(&self) -> ActiveTool {
        self.active_tool
    }

    pub fn active_panel(&self) -> ToolPanel {
        self.active_tool.panel(&self.edit, &self.catalog, &self.config)
    }

    pub fn is_modified(&self) -> bool {
        !self.edit.is_default()
    }

    pub fn committed(&self) -> Option<&CommittedEdit> {
        self.committed.as_ref()
    }

    pub(crate) fn ensure_editing(&self, operation: &'static str) -> SessionResult<()> {
        self.machine.ensure_editing(operation)
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&EditChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: EditChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    fn fire(
        &mut self,
        event: SessionEvent,
        operation: &'static str,
    ) -> SessionResult<SessionState> {
        let state = self.machine.state();
        if state.is_terminal() {
            tracing::warn!(?state, operation, "lifecycle call on finished session");
            return Err(SessionError::InvalidSessionState { state, operation });
        }
        let next = self.machine.transition(event)?;
        if next != state {
            self.notify(EditChange::StateChanged(next));
        }
        Ok(next)
    }

    pub fn select_tool(&mut self, tool: ActiveTool) -> SessionResult<ActiveTool> {
        self.machine.ensure_editing("select_tool")?;
        self.active_tool = self.active_tool.toggled(tool);
        tracing::debug!(requested = ?tool, active = ?self.active_tool, "select tool");
        self.notify(EditChange::ToolSelected(self.active_tool));
        Ok(self.active_tool)
    }

    pub fn set_filter(&mut self, name: &str) -> SessionResult<&EditState> {
        self.machine.ensure_editing("set_filter")?;
        if self.edit.set_filter(&self.catalog, name) {
            tracing::debug!(requested = name, applied = self.edit.filter_name(), "set filter");
            self.notify(EditChange::Filter(self.edit.filter_name().to_string()));
        }
        Ok(&self.edit)
    }

    pub fn set_caption(&mut self, text: &str) -> SessionResult<&EditState> {
        self.machine.ensure_editing("set_caption")?;
        if self.edit.set_caption(text) {
            tracing::debug!(len = self.edit.caption_len(), "set caption");
            self.notify(EditChange::Caption(self.edit.caption().to_string()));
        } else if self.edit.caption() != text {
            tracing::debug!(len = text.chars().count(), "caption update refused");
        }
        Ok(&self.edit)
    }

    pub fn rotate_left(&mut self) -> SessionResult<&EditState> {
        self.rotate(-ROTATION_STEP_DEGREES, "rotate_left")
    }

    pub fn rotate_right(&mut self) -> SessionResult<&EditState> {
        self.rotate(ROTATION_STEP_DEGREES, "rotate_right")
    }

    fn rotate(&mut self, degrees: f32, operation: &'static str) -> SessionResult<&EditState> {
        self.machine.ensure_editing(operation)?;
        self.edit.rotate_by(degrees);
        tracing::debug!(rotation = self.edit.rotation_degrees(), "rotate");
        self.notify(EditChange::Rotation(self.edit.rotation_degrees()));
        Ok(&self.edit)
    }

    pub fn flip_horizontal(&mut self) -> SessionResult<&EditState> {
        self.machine.ensure_editing("flip_horizontal")?;
        self.edit.flip_horizontal();
        self.notify_mirror();
        Ok(&self.edit)
    }

    /// No-op when vertical flipping is disabled in the config.
    pub fn flip_vertical(&mut self) -> SessionResult<&EditState> {
        self.machine.ensure_editing("flip_vertical")?;
        if !self.config.flip_vertical {
            tracing::debug!("vertical flip disabled");
            return Ok(&self.edit);
        }
        self.edit.flip_vertical();
        self.notify_mirror();
        Ok(&self.edit)
    }

    fn notify_mirror(&mut self) {
        let (x, y) = (self.edit.mirror_x(), self.edit.mirror_y());
        tracing::debug!(mirror_x = x, mirror_y = y, "flip");
        self.notify(EditChange::Mirror { x, y });
    }

    pub fn set_zoom(&mut self, value: f32) -> SessionResult<&EditState> {
        self.machine.ensure_editing("set_zoom")?;
        if self.edit.set_zoom(value) {
            tracing::debug!(requested = value, zoom = self.edit.zoom(), "set zoom");
            self.notify(EditChange::Zoom(self.edit.zoom()));
        }
        Ok(&self.edit)
    }

    pub fn add_sticker(&mut self, glyph: &str) -> SessionResult<&EditState> {
        self.machine.ensure_editing("add_sticker")?;
        if self.edit.stickers().len() >= self.config.sticker_cap {
            tracing::debug!(glyph, cap = self.config.sticker_cap, "sticker cap reached");
            return Ok(&self.edit);
        }
        let sticker = StickerLayer::new(glyph);
        let id = sticker.id();
        self.edit.push_sticker(sticker);
        tracing::debug!(%id, glyph, count = self.edit.stickers().len(), "add sticker");
        self.notify(EditChange::StickerAdded(id));
        Ok(&self.edit)
    }

    pub fn update_sticker(
        &mut self,
        id: StickerId,
        offset_x: f32,
        offset_y: f32,
        scale: f32,
    ) -> SessionResult<&EditState> {
        self.machine.ensure_editing("update_sticker")?;
        if self
            .edit
            .update_sticker(id, Offset::new(offset_x, offset_y), scale)
        {
            tracing::trace!(%id, offset_x, offset_y, scale, "update sticker");
            self.notify(EditChange::StickerUpdated(id));
        }
        Ok(&self.edit)
    }

    pub fn delete_sticker(&mut self, id: StickerId) -> SessionResult<&EditState> {
        self.machine.ensure_editing("delete_sticker")?;
        match self.edit.remove_sticker(id) {
            Some(removed) => {
                tracing::debug!(%id, glyph = removed.glyph(), "delete sticker");
                self.notify(EditChange::StickerRemoved(id));
            }
            None => tracing::debug!(%id, "delete of unknown sticker ignored"),
        }
        Ok(&self.edit)
    }

    /// Restores every edit to its default; the active tool is kept.
    pub fn reset(&mut self) -> SessionResult<&EditState> {
        self.machine.ensure_editing("reset")?;
        if self.is_modified() {
            self.edit = EditState::default();
            tracing::debug!("reset edit state");
            self.notify(EditChange::Reset);
        }
        Ok(&self.edit)
    }

    /// Back/cancel request. Discards immediately when nothing was edited.
    pub fn request_exit(&mut self) -> SessionResult<ExitOutcome> {
        let state = self.fire(SessionEvent::RequestExit, "request_exit")?;
        if self.is_modified() {
            return Ok(ExitOutcome::NeedsConfirmation);
        }
        debug_assert_eq!(state, SessionState::ConfirmingExit);
        self.confirm_discard()?;
        Ok(ExitOutcome::Discarded)
    }

    pub fn confirm_discard(&mut self) -> SessionResult<()> {
        self.fire(SessionEvent::ConfirmDiscard, "confirm_discard")?;
        self.edit = EditState::default();
        self.active_tool = ActiveTool::None;
        tracing::info!(photo = %self.photo, "edit session discarded");
        Ok(())
    }

    pub fn cancel_exit(&mut self) -> SessionResult<()> {
        self.fire(SessionEvent::CancelExit, "cancel_exit")?;
        tracing::debug!("exit cancelled; editing resumed");
        Ok(())
    }

    pub fn commit(&mut self) -> SessionResult<CommittedEdit> {
        if self.machine.state() == SessionState::ConfirmingExit {
            return Err(SessionError::InvalidSessionState {
                state: SessionState::ConfirmingExit,
                operation: "commit",
            });
        }
        self.fire(SessionEvent::Commit, "commit")?;
        let committed = CommittedEdit {
            photo: self.photo.clone(),
            edit: self.edit.clone(),
        };
        tracing::info!(
            photo = %self.photo,
            filter = committed.edit.filter_name(),
            stickers = committed.edit.stickers().len(),
            "edit session committed"
        );
        self.committed = Some(committed.clone());
        Ok(committed)
    }
}
