use super::event::SessionEvent;
use super::model::SessionState;
use thiserror::Error;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: SessionState,
        event: SessionEvent,
    },

    #[error("invalid session state: {operation} is not allowed while {state:?}")]
    InvalidSessionState {
        state: SessionState,
        operation: &'static str,
    },
}
