//! Script-driven bus master/checker core.
//!
//! Reads a sequence of textual commands and, one rising clock edge at a
//! time, drives a synchronous memory-mapped bus to perform writes and to
//! verify reads against expected values, aborting on any mismatch or
//! malformed input. A lightweight handshake protocol (event pulses and wait
//! latches) interlocks execution with generator and checker peers running
//! their own scripts in the same clock domain.

/// Script line cursor and in-memory script source.
pub mod script;
pub use script::{MemoryScript, ScriptLine, ScriptSource};

/// Raw-line classification into directives and command records.
pub mod classify;
pub use classify::{classify_line, Directive, LineClass, DIRECTIVE_MARKER};

/// Fixed-position transaction decoder.
pub mod decode;
pub use decode::{decode_transaction, Transaction, TransactionKind, HEX_FIELD_DIGITS};

/// Fatal fault taxonomy.
pub mod fault;
pub use fault::{Fault, FaultKind};

/// Per-cycle bus signal bundles.
pub mod signals;
pub use signals::{BusInputs, BusOutputs};

/// Wait-latch barrier for peer handshaking.
pub mod sync;
pub use sync::{HandshakePeer, WaitLatches};

/// The cycle-by-cycle command interpreter.
pub mod interpreter;
pub use interpreter::{Interpreter, PendingRead, Phase, StepOutcome};

/// Bus peer models.
pub mod peer;
pub use peer::{BusPeer, MemoryPeer};

/// Closed-loop run driver.
pub mod runner;
pub use runner::{run, RunConfig, RunReport, RunStatus};

/// Per-cycle trace hooks.
pub mod trace;
pub use trace::{NullTrace, RecordingTrace, TraceRecord, TraceSink};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
