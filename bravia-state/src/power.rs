//! Connection and power tracking

use std::fmt;

/// What the adapter believes about the television's power
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerState {
    /// No response from the set
    #[default]
    Disconnected,
    /// Reachable, power not yet polled
    ConnectedUnknown,
    /// Reachable and in standby
    ConnectedOff,
    /// Reachable and on
    ConnectedOn,
    /// A power-on was sent and the set is booting
    Starting,
}

impl PowerState {
    /// A request reached the set
    pub fn connected(self) -> Self {
        match self {
            PowerState::Disconnected => PowerState::ConnectedUnknown,
            other => other,
        }
    }

    /// Result of a power poll. A booting set keeps reporting standby for a
    /// while, so only `active` ends [`PowerState::Starting`].
    pub fn power_status(self, active: bool) -> Self {
        match (self, active) {
            (_, true) => PowerState::ConnectedOn,
            (PowerState::Starting, false) => PowerState::Starting,
            (_, false) => PowerState::ConnectedOff,
        }
    }

    pub fn turn_on_requested(self) -> Self {
        match self {
            PowerState::ConnectedOn => PowerState::ConnectedOn,
            _ => PowerState::Starting,
        }
    }

    pub fn turn_off_requested(self) -> Self {
        match self {
            PowerState::Disconnected => PowerState::Disconnected,
            _ => PowerState::ConnectedOff,
        }
    }

    pub fn disconnected(self) -> Self {
        PowerState::Disconnected
    }

    pub fn is_on(self) -> bool {
        self == PowerState::ConnectedOn
    }

    pub fn is_starting(self) -> bool {
        self == PowerState::Starting
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PowerState::Disconnected => "disconnected",
            PowerState::ConnectedUnknown => "connected",
            PowerState::ConnectedOff => "off",
            PowerState::ConnectedOn => "on",
            PowerState::Starting => "starting",
        };
        f.write_str(name)
    }
}

/// [`PowerState`] plus the count of polls a starting set has missed
///
/// While [`PowerState::Starting`], failed polls and standby answers are
/// tolerated up to `max_missed_polls` times before the tracker gives up on
/// the boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerTracker {
    state: PowerState,
    missed_polls: u32,
    max_missed_polls: u32,
}

impl PowerTracker {
    pub fn new(max_missed_polls: u32) -> Self {
        Self {
            state: PowerState::Disconnected,
            missed_polls: 0,
            max_missed_polls,
        }
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn missed_polls(&self) -> u32 {
        self.missed_polls
    }

    /// A power poll answered
    pub fn poll_succeeded(&mut self, active: bool) -> PowerState {
        let mut next = self.state.connected().power_status(active);
        if next.is_starting() {
            self.missed_polls += 1;
            if self.missed_polls > self.max_missed_polls {
                tracing::debug!(missed = self.missed_polls, "set did not finish starting");
                next = PowerState::ConnectedOff;
            }
        }
        self.transition(next)
    }

    /// A power poll got no answer
    pub fn poll_failed(&mut self) -> PowerState {
        if self.state.is_starting() && self.missed_polls < self.max_missed_polls {
            self.missed_polls += 1;
            tracing::debug!(missed = self.missed_polls, "no answer while starting");
            return self.state;
        }
        self.transition(self.state.disconnected())
    }

    pub fn turn_on_requested(&mut self) -> PowerState {
        self.transition(self.state.turn_on_requested())
    }

    pub fn turn_off_requested(&mut self) -> PowerState {
        self.transition(self.state.turn_off_requested())
    }

    pub fn disconnected(&mut self) -> PowerState {
        self.transition(self.state.disconnected())
    }

    fn transition(&mut self, next: PowerState) -> PowerState {
        if next != self.state {
            tracing::info!(from = %self.state, to = %next, "TV power state changed");
        }
        if !next.is_starting() || !self.state.is_starting() {
            self.missed_polls = 0;
        }
        self.state = next;
        next
    }
}
