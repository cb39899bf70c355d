//! Closed-loop run driver for a master and a peer.
//!
//! The interpreter itself has no notion of time beyond a single edge and no
//! wait timeout; the runner adds the harness-level loop and an optional
//! cycle limit so an unbounded stall can be bounded by the embedding.

use crate::fault::Fault;
use crate::interpreter::{Interpreter, StepOutcome};
use crate::peer::BusPeer;
use crate::script::ScriptSource;
use crate::signals::BusInputs;
use crate::trace::{TraceRecord, TraceSink};

/// Run-loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunConfig {
    /// Stop after this many cycles; `None` runs until completion or fault.
    pub max_cycles: Option<u64>,
}

/// Terminal status of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The script was consumed to the end with every check passing.
    Completed,
    /// A fatal fault terminated the run.
    Faulted(Fault),
    /// The configured cycle limit was reached before completion.
    CycleLimit,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of clock edges executed.
    pub cycles: u64,
    /// How the run ended.
    pub status: RunStatus,
}

impl RunReport {
    /// Returns true when the run completed without fault or cycle limit.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.status, RunStatus::Completed)
    }
}

/// Clocks the master and peer together until the script completes, a fault
/// is raised, or the configured cycle limit is reached.
///
/// Each cycle the master steps on the inputs the peer registered on the
/// previous edge, then the peer observes the master's freshly registered
/// outputs. Every step is reported to `trace` in execution order.
pub fn run<S, P>(
    master: &mut Interpreter<S>,
    peer: &mut P,
    config: &RunConfig,
    trace: &mut dyn TraceSink,
) -> RunReport
where
    S: ScriptSource,
    P: BusPeer,
{
    let mut inputs = BusInputs::default();
    let mut cycles: u64 = 0;

    loop {
        if config.max_cycles.is_some_and(|limit| cycles >= limit) {
            return RunReport {
                cycles,
                status: RunStatus::CycleLimit,
            };
        }

        let outcome = match master.step(&inputs) {
            Ok(outcome) => outcome,
            Err(fault) => {
                return RunReport {
                    cycles: cycles + 1,
                    status: RunStatus::Faulted(fault),
                }
            }
        };
        cycles += 1;
        trace.on_step(TraceRecord {
            cycle: cycles - 1,
            outcome,
        });

        if outcome == StepOutcome::Finished {
            return RunReport {
                cycles,
                status: RunStatus::Completed,
            };
        }

        inputs = peer.clock(master.outputs());
    }
}
