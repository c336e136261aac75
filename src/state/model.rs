/// Lifecycle of one edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Editing,
    ConfirmingExit,
    Committed,
    Discarded,
}

impl SessionState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Discarded)
    }

    pub const fn accepts_edits(self) -> bool {
        matches!(self, Self::Editing)
    }
}
