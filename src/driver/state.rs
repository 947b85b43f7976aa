//! Driver lifecycle state machine.
//!
//! The interrupt path is expressed as a pure transition function so the
//! one-shot termination logic can be tested without hardware: feed an event,
//! get the next state and the side effect the caller must perform.

/// Driver lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No transmission in progress
    Idle,
    /// Continuous transmission; the ring loops until stopped
    Transmitting,
    /// Single-pass transmission; stops at the end-of-frame interrupt
    OneShot,
}

/// Event fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Transmission started
    Start {
        /// Whether the session is one-shot
        one_shot: bool,
    },
    /// The DMA engine finished the EOF descriptor (one ring pass complete)
    EndOfFrame,
    /// Explicit stop request
    Stop,
}

/// Side effect the caller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Nothing to do
    None,
    /// Mask the interrupt source and tear the session down
    DisarmAndStop,
}

/// Compute the next state and required action for an event.
#[must_use]
pub const fn transition(state: State, event: Event) -> (State, Action) {
    match (state, event) {
        (_, Event::Start { one_shot: false }) => (State::Transmitting, Action::None),
        (_, Event::Start { one_shot: true }) => (State::OneShot, Action::None),
        (State::OneShot, Event::EndOfFrame) => (State::Idle, Action::DisarmAndStop),
        // Continuous mode ignores EOF; the ring just wraps. A spurious EOF
        // while idle is ignored too.
        (State::Transmitting | State::Idle, Event::EndOfFrame) => (state, Action::None),
        (_, Event::Stop) => (State::Idle, Action::None),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_eof_disarms_and_stops() {
        let (next, action) = transition(State::OneShot, Event::EndOfFrame);
        assert_eq!(next, State::Idle);
        assert_eq!(action, Action::DisarmAndStop);
    }

    #[test]
    fn continuous_eof_is_a_no_op() {
        let (next, action) = transition(State::Transmitting, Event::EndOfFrame);
        assert_eq!(next, State::Transmitting);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn spurious_eof_while_idle_is_ignored() {
        let (next, action) = transition(State::Idle, Event::EndOfFrame);
        assert_eq!(next, State::Idle);
        assert_eq!(action, Action::None);
    }

    #[test]
    fn start_selects_mode() {
        assert_eq!(
            transition(State::Idle, Event::Start { one_shot: false }),
            (State::Transmitting, Action::None)
        );
        assert_eq!(
            transition(State::Idle, Event::Start { one_shot: true }),
            (State::OneShot, Action::None)
        );
    }

    #[test]
    fn restart_from_any_state() {
        // begin() implies end(), so Start can arrive in any state
        assert_eq!(
            transition(State::Transmitting, Event::Start { one_shot: true }),
            (State::OneShot, Action::None)
        );
        assert_eq!(
            transition(State::OneShot, Event::Start { one_shot: false }),
            (State::Transmitting, Action::None)
        );
    }

    #[test]
    fn stop_always_idles_without_action() {
        for state in [State::Idle, State::Transmitting, State::OneShot] {
            assert_eq!(transition(state, Event::Stop), (State::Idle, Action::None));
        }
    }
}
