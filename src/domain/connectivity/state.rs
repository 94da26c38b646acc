use std::fmt;

/// Defines the lifecycle state of a connectivity request.
///
/// The happy path is `Created -> Installing -> Installed -> Withdrawing -> Withdrawn`.
/// `Failed` is reachable from every state except `Withdrawn` and can be left again
/// towards `Installing` or `Withdrawing`, so installation and withdrawal can be retried.
/// `Withdrawn` is a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectivityState {
    /// The request has been accepted but nothing was installed yet.
    Created,

    /// The realizing optical paths are being set up.
    Installing,

    /// Every realizing link is established.
    Installed,

    /// The realizing optical paths are being torn down.
    Withdrawing,

    /// Every realizing link is gone. The request is inert from now on.
    Withdrawn,

    /// Installation or withdrawal failed.
    Failed,
}

impl ConnectivityState {
    pub const ALL: [ConnectivityState; 6] = [
        ConnectivityState::Created,
        ConnectivityState::Installing,
        ConnectivityState::Installed,
        ConnectivityState::Withdrawing,
        ConnectivityState::Withdrawn,
        ConnectivityState::Failed,
    ];

    /// The transition table: all states reachable from `self` in one step.
    pub fn allowed_targets(self) -> &'static [ConnectivityState] {
        use ConnectivityState::*;

        match self {
            Created => &[Installing, Failed],
            Installing => &[Installed, Failed],
            Installed => &[Withdrawing, Failed],
            Withdrawing => &[Withdrawn, Failed],
            Failed => &[Installing, Withdrawing, Failed],
            Withdrawn => &[],
        }
    }

    pub fn can_transition_to(self, target: ConnectivityState) -> bool {
        self.allowed_targets().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectivityState::Created => "CREATED",
            ConnectivityState::Installing => "INSTALLING",
            ConnectivityState::Installed => "INSTALLED",
            ConnectivityState::Withdrawing => "WITHDRAWING",
            ConnectivityState::Withdrawn => "WITHDRAWN",
            ConnectivityState::Failed => "FAILED",
        };

        write!(f, "{}", name)
    }
}
