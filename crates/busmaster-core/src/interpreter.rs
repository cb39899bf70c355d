//! The cycle-by-cycle command interpreter.
//!
//! [`Interpreter::step`] models one rising clock edge: the wait barrier is
//! evaluated first, then the read-completion machine, and only from an idle
//! phase is the next script line fetched, classified, and issued. Strictly
//! one transaction is in flight at a time; a line's effects fully resolve
//! before the next line is fetched.

use crate::classify::{classify_line, Directive, LineClass};
use crate::decode::{decode_transaction, Transaction, TransactionKind};
use crate::fault::{Fault, FaultKind};
use crate::script::ScriptSource;
use crate::signals::{BusInputs, BusOutputs};
use crate::sync::{HandshakePeer, WaitLatches};

/// A verify transaction in flight through the read-completion machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PendingRead {
    /// Address driven on the bus for the duration of the read.
    pub address: u32,
    /// Expected payload from the verify command.
    pub expected: u32,
    /// 1-based script line of the verify command, for fault reporting.
    pub line: usize,
}

/// Read-completion state machine phase.
///
/// The in-flight read rides inside the non-idle variants, so a pending read
/// exists exactly when the machine is not idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Phase {
    /// No read in flight; the next script line may be fetched.
    #[default]
    Idle,
    /// Read issued this cycle; the peer has not begun responding.
    Fetching(PendingRead),
    /// The peer's response must be valid and checked this cycle.
    Reading(PendingRead),
}

/// What one clock edge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// A wait latch is armed; no fetch, no issue, no phase advance.
    Stalled,
    /// A write was driven for this one cycle.
    WriteIssued {
        /// Bus address driven.
        address: u32,
        /// Payload driven on the data output.
        data: u32,
    },
    /// A read pulse was driven; the address is now held.
    ReadIssued {
        /// Bus address driven and held.
        address: u32,
    },
    /// The read advanced to its checking cycle; address still held.
    ReadPending {
        /// Bus address held for the in-flight read.
        address: u32,
    },
    /// The peer's response was sampled and matched the expected payload.
    ReadChecked {
        /// Bus address of the completed read.
        address: u32,
        /// Data sampled from the peer.
        data: u32,
    },
    /// An event directive pulsed the outgoing event line for this cycle.
    EventPulsed,
    /// A wait directive armed a latch; stalling begins next cycle.
    WaitArmed {
        /// Peer whose event input will clear the latch.
        peer: HandshakePeer,
    },
    /// A marker-prefixed line matched no known directive and was discarded.
    DirectiveIgnored,
    /// The script is exhausted; the finished output is latched true.
    Finished,
}

/// Script-driven bus master/checker.
///
/// Owns the bus output signals and a one-shot script cursor. Each call to
/// [`Interpreter::step`] is one rising clock edge; [`Interpreter::reset`]
/// restores phase, latches, and outputs but does not rewind the script.
#[derive(Debug)]
pub struct Interpreter<S> {
    source: S,
    phase: Phase,
    latches: WaitLatches,
    outputs: BusOutputs,
}

impl<S: ScriptSource> Interpreter<S> {
    /// Creates an interpreter over the given script cursor.
    pub fn new(source: S) -> Self {
        Self {
            source,
            phase: Phase::Idle,
            latches: WaitLatches::default(),
            outputs: BusOutputs::default(),
        }
    }

    /// Returns the bus outputs registered by the most recent edge.
    #[must_use]
    pub const fn outputs(&self) -> &BusOutputs {
        &self.outputs
    }

    /// Returns the read-completion machine's current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while the latch paired with `peer` is armed.
    #[must_use]
    pub const fn is_waiting_on(&self, peer: HandshakePeer) -> bool {
        self.latches.is_armed(peer)
    }

    /// Returns true once the script is exhausted.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outputs.finished
    }

    /// Returns the 1-based number of the most recently consumed line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.source.consumed_lines()
    }

    /// Executes one rising clock edge.
    ///
    /// # Errors
    ///
    /// Returns a [`Fault`] on any contract violation: malformed command
    /// record, read not valid on the checking cycle, or data mismatch. A
    /// fault terminates the run; the interpreter must not be stepped again.
    pub fn step(&mut self, inputs: &BusInputs) -> Result<StepOutcome, Fault> {
        // Pulses last exactly one cycle. Address and data are held only
        // while a read is in flight.
        self.outputs.read_enable = false;
        self.outputs.write_enable = false;
        self.outputs.event_out = false;
        if matches!(self.phase, Phase::Idle) {
            self.outputs.address = 0;
            self.outputs.data_out = 0;
        }

        if self.latches.any_armed() {
            self.latches.observe(inputs);
            if self.latches.any_armed() {
                return Ok(StepOutcome::Stalled);
            }
            // Every satisfied latch cleared on this edge; processing
            // resumes in the same cycle.
        }

        match self.phase {
            Phase::Fetching(pending) => {
                self.phase = Phase::Reading(pending);
                return Ok(StepOutcome::ReadPending {
                    address: pending.address,
                });
            }
            Phase::Reading(pending) => {
                self.phase = Phase::Idle;
                if !inputs.read_valid {
                    return Err(Fault::new(
                        pending.line,
                        FaultKind::ReadNotValid {
                            address: pending.address,
                        },
                    ));
                }
                if inputs.data_in != pending.expected {
                    return Err(Fault::new(
                        pending.line,
                        FaultKind::ReadMismatch {
                            address: pending.address,
                            actual: inputs.data_in,
                            expected: pending.expected,
                        },
                    ));
                }
                return Ok(StepOutcome::ReadChecked {
                    address: pending.address,
                    data: inputs.data_in,
                });
            }
            Phase::Idle => {}
        }

        if self.outputs.finished {
            return Ok(StepOutcome::Finished);
        }

        let Some(line) = self.source.next_line() else {
            self.outputs.finished = true;
            return Ok(StepOutcome::Finished);
        };

        match classify_line(&line.text) {
            LineClass::Directive(Directive::Event) => {
                self.outputs.event_out = true;
                Ok(StepOutcome::EventPulsed)
            }
            LineClass::Directive(Directive::WaitForGenerator) => {
                self.latches.arm(HandshakePeer::Generator);
                Ok(StepOutcome::WaitArmed {
                    peer: HandshakePeer::Generator,
                })
            }
            LineClass::Directive(Directive::WaitForChecker) => {
                self.latches.arm(HandshakePeer::Checker);
                Ok(StepOutcome::WaitArmed {
                    peer: HandshakePeer::Checker,
                })
            }
            LineClass::UnknownDirective => Ok(StepOutcome::DirectiveIgnored),
            LineClass::Command => {
                let transaction = decode_transaction(&line.text, line.number)?;
                Ok(self.issue(transaction, line.number))
            }
        }
    }

    /// Restores phase, wait latches, and bus outputs to their initial values.
    ///
    /// The script cursor is left untouched: after reset the interpreter
    /// resumes at the first unconsumed line.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.latches = WaitLatches::default();
        self.outputs = BusOutputs::default();
    }

    fn issue(&mut self, transaction: Transaction, line: usize) -> StepOutcome {
        self.outputs.address = transaction.address;
        match transaction.kind {
            TransactionKind::Write => {
                self.outputs.write_enable = true;
                self.outputs.data_out = transaction.payload;
                StepOutcome::WriteIssued {
                    address: transaction.address,
                    data: transaction.payload,
                }
            }
            TransactionKind::Read => {
                self.outputs.read_enable = true;
                self.phase = Phase::Fetching(PendingRead {
                    address: transaction.address,
                    expected: transaction.payload,
                    line,
                });
                StepOutcome::ReadIssued {
                    address: transaction.address,
                }
            }
        }
    }
}
