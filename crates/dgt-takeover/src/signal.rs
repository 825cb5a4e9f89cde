//! Signals, commands and transition phases

/// Lifecycle notification emitted by a takeover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Initialization finished
    Init,
    /// Open transition started
    Opening,
    /// Open transition finished
    Open,
    /// Close transition started
    Closing,
    /// Close transition finished
    Close,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Init,
        Signal::Opening,
        Signal::Open,
        Signal::Closing,
        Signal::Close,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Close => "close",
        }
    }

    /// Document event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Init => "dg_takeover_init",
            Self::Opening => "dg_takeover_opening",
            Self::Open => "dg_takeover_open",
            Self::Closing => "dg_takeover_closing",
            Self::Close => "dg_takeover_close",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Document event other code dispatches to drive a takeover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Toggle,
    ToggleOpen,
    ToggleClose,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Toggle, Command::ToggleOpen, Command::ToggleClose];

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Toggle => "dg_takeover_toggle",
            Self::ToggleOpen => "dg_takeover_toggle_open",
            Self::ToggleClose => "dg_takeover_toggle_close",
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Self::Toggle => Action::Toggle,
            Self::ToggleOpen => Action::ForceOpen,
            Self::ToggleClose => Action::ForceClose,
        }
    }
}

/// Requested transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open if closed, close if open
    Toggle,
    /// Open; no-op when already open
    ForceOpen,
    /// Close; no-op when already closed
    ForceClose,
}

/// Where a takeover is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_share_prefix() {
        for signal in Signal::ALL {
            assert_eq!(signal.event_type(), format!("dg_takeover_{}", signal.name()));
        }
        for command in Command::ALL {
            assert!(command.event_type().starts_with("dg_takeover_toggle"));
        }
    }

    #[test]
    fn test_command_actions() {
        assert_eq!(Command::Toggle.action(), Action::Toggle);
        assert_eq!(Command::ToggleOpen.action(), Action::ForceOpen);
        assert_eq!(Command::ToggleClose.action(), Action::ForceClose);
    }
}
