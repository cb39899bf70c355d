//! Wait-latch barrier interlocking the interpreter with its peers.
//!
//! Two independent latches gate all interpreter progress. A latch is armed by
//! the matching wait directive and cleared on the first clock edge where the
//! paired event input is observed true; both latches may clear on the same
//! edge. The barrier is evaluated once per cycle before any other state
//! transition and is kept separate from the read-completion machine: waits
//! are only ever issued between transactions, never during one.

use crate::signals::BusInputs;

/// External peer a wait latch is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum HandshakePeer {
    /// The stimulus generator progressing through its own script.
    Generator,
    /// The result checker progressing through its own script.
    Checker,
}

/// The pair of wait latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct WaitLatches {
    generator: bool,
    checker: bool,
}

impl WaitLatches {
    /// Arms the latch paired with `peer`.
    pub fn arm(&mut self, peer: HandshakePeer) {
        match peer {
            HandshakePeer::Generator => self.generator = true,
            HandshakePeer::Checker => self.checker = true,
        }
    }

    /// Returns true while any latch is armed.
    #[must_use]
    pub const fn any_armed(self) -> bool {
        self.generator || self.checker
    }

    /// Returns true while the latch paired with `peer` is armed.
    #[must_use]
    pub const fn is_armed(self, peer: HandshakePeer) -> bool {
        match peer {
            HandshakePeer::Generator => self.generator,
            HandshakePeer::Checker => self.checker,
        }
    }

    /// Clears every armed latch whose event input is observed true.
    pub fn observe(&mut self, inputs: &BusInputs) {
        if self.generator && inputs.generator_event {
            self.generator = false;
        }
        if self.checker && inputs.checker_event {
            self.checker = false;
        }
    }
}
