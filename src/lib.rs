//! Editor core of a photo kiosk: one photo, one session, one committed edit.

pub mod config;
pub mod editor;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod order;
pub mod session;
pub mod state;

pub use config::EditorConfig;
pub use editor::{ActiveTool, EditState, StickerId, StickerLayer, ToolPanel};
pub use error::{AppError, AppResult};
pub use filter::{ColorMatrix, Filter, FilterCatalog};
pub use gesture::{GestureEvent, GestureMutator, GestureOutcome};
pub use order::PrintOrder;
pub use session::{CommittedEdit, EditChange, EditSessionController, ExitOutcome, PhotoRef};
pub use state::{SessionError, SessionState};

/// Opens an edit session for `photo` using the user's `config.json`, if any.
pub fn open_session(photo: PhotoRef) -> EditSessionController {
    let config = config::load_editor_config();
    EditSessionController::with_config(photo, config)
}

/// Opens a session with an explicit config file, reporting read and parse errors.
pub fn open_session_with_config_file(
    photo: PhotoRef,
    path: &std::path::Path,
) -> AppResult<EditSessionController> {
    let config = EditorConfig::read_from(path)?;
    Ok(EditSessionController::with_config(photo, config))
}
