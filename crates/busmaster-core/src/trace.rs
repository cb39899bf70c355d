//! Deterministic per-cycle trace hooks.

use crate::interpreter::StepOutcome;

/// One clocked step in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Zero-based cycle count since the run started.
    pub cycle: u64,
    /// What the interpreter did on this edge.
    pub outcome: StepOutcome,
}

/// Sink for per-cycle trace records.
pub trait TraceSink {
    /// Records a step in execution order.
    fn on_step(&mut self, record: TraceRecord);
}

/// Sink that discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn on_step(&mut self, _record: TraceRecord) {}
}

/// Sink that collects records for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingTrace {
    /// Records in execution order.
    pub records: Vec<TraceRecord>,
}

impl TraceSink for RecordingTrace {
    fn on_step(&mut self, record: TraceRecord) {
        self.records.push(record);
    }
}
