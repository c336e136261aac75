use super::error::{SessionError, SessionResult};
use super::{SessionEvent, SessionState, SessionTransition};

#[derive(Debug)]
pub struct SessionStateMachine {
    state: SessionState,
    transition_history: Vec<SessionTransition>,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn history(&self) -> &[SessionTransition] {
        &self.transition_history
    }

    pub fn can_transition(&self, event: SessionEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: SessionEvent) -> Option<SessionState> {
        use SessionEvent::*;
        match (self.state, event) {
            (SessionState::Editing, RequestExit) => Some(SessionState::ConfirmingExit),
            (SessionState::ConfirmingExit, RequestExit) => Some(SessionState::ConfirmingExit),
            (SessionState::ConfirmingExit, ConfirmDiscard) => Some(SessionState::Discarded),
            (SessionState::ConfirmingExit, CancelExit) => Some(SessionState::Editing),
            (SessionState::Editing, Commit) => Some(SessionState::Committed),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: SessionEvent) -> SessionResult<SessionState> {
        tracing::debug!(from = ?self.state, event = ?event, "request session transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid session transition requested");
            SessionError::InvalidStateTransition { from, event }
        })?;

        let record = SessionTransition::new(self.state, event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }

    /// Fails with `InvalidSessionState` unless the session still accepts edits.
    pub fn ensure_editing(&self, operation: &'static str) -> SessionResult<()> {
        if self.state.accepts_edits() {
            Ok(())
        } else {
            tracing::warn!(state = ?self.state, operation, "edit rejected outside editing state");
            Err(SessionError::InvalidSessionState {
                state: self.state,
                operation,
            })
        }
    }
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = SessionStateMachine::new();
        assert!(machine.can_transition(SessionEvent::RequestExit));
        assert!(machine.can_transition(SessionEvent::Commit));
        assert!(!machine.can_transition(SessionEvent::ConfirmDiscard));
        assert!(!machine.can_transition(SessionEvent::CancelExit));

        let _ = machine
            .transition(SessionEvent::RequestExit)
            .expect("editing -> confirming exit should transition");

        assert!(machine.can_transition(SessionEvent::ConfirmDiscard));
        assert!(machine.can_transition(SessionEvent::CancelExit));
        assert!(!machine.can_transition(SessionEvent::Commit));
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = SessionStateMachine::new();
        let _ = machine
            .transition(SessionEvent::RequestExit)
            .expect("request exit should work");
        let _ = machine
            .transition(SessionEvent::CancelExit)
            .expect("cancel exit should work");
        let _ = machine
            .transition(SessionEvent::Commit)
            .expect("commit should work");

        assert_eq!(machine.state(), SessionState::Committed);
        assert_eq!(
            machine.history(),
            &[
                SessionTransition::new(
                    SessionState::Editing,
                    SessionEvent::RequestExit,
                    SessionState::ConfirmingExit
                ),
                SessionTransition::new(
                    SessionState::ConfirmingExit,
                    SessionEvent::CancelExit,
                    SessionState::Editing
                ),
                SessionTransition::new(
                    SessionState::Editing,
                    SessionEvent::Commit,
                    SessionState::Committed
                ),
            ]
        );
    }

    #[test]
    fn terminal_states_accept_no_events() {
        for path in [
            vec![SessionEvent::Commit],
            vec![SessionEvent::RequestExit, SessionEvent::ConfirmDiscard],
        ] {
            let mut machine = SessionStateMachine::new();
            for event in path {
                machine.transition(event).expect("path should be valid");
            }
            assert!(machine.state().is_terminal());
            for event in [
                SessionEvent::RequestExit,
                SessionEvent::ConfirmDiscard,
                SessionEvent::CancelExit,
                SessionEvent::Commit,
            ] {
                assert!(!machine.can_transition(event), "{event:?}");
            }
        }
    }

    #[test]
    fn invalid_transition_returns_error_without_mutating_history() {
        let mut machine = SessionStateMachine::new();

        let err = machine
            .transition(SessionEvent::ConfirmDiscard)
            .expect_err("editing -> confirm discard should fail");
        assert_eq!(
            err,
            SessionError::InvalidStateTransition {
                from: SessionState::Editing,
                event: SessionEvent::ConfirmDiscard
            }
        );
        assert_eq!(machine.state(), SessionState::Editing);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn ensure_editing_rejects_confirming_exit() {
        let mut machine = SessionStateMachine::new();
        assert!(machine.ensure_editing("set_caption").is_ok());
        machine
            .transition(SessionEvent::RequestExit)
            .expect("request exit should work");
        assert_eq!(
            machine.ensure_editing("set_caption"),
            Err(SessionError::InvalidSessionState {
                state: SessionState::ConfirmingExit,
                operation: "set_caption",
            })
        );
    }
}
