//! Per-cycle bus signal bundles.
//!
//! The master exclusively drives [`BusOutputs`]; [`BusInputs`] are owned by
//! the peer and only ever sampled. Both bundles are plain value types
//! snapshotted once per clock edge.

/// Signals sampled from the bus peer on each rising clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BusInputs {
    /// Data returned by the peer, meaningful only while `read_valid` is true.
    pub data_in: u32,
    /// True when `data_in` carries the response to an earlier read pulse.
    pub read_valid: bool,
    /// Event line from the generator peer, sampled by the wait barrier.
    pub generator_event: bool,
    /// Event line from the checker peer, sampled by the wait barrier.
    pub checker_event: bool,
}

/// Signals driven by the master, registered at each rising clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BusOutputs {
    /// One-cycle pulse starting a read transaction.
    pub read_enable: bool,
    /// One-cycle pulse committing a write transaction.
    pub write_enable: bool,
    /// Transaction address; held across all cycles of an in-flight read.
    pub address: u32,
    /// Write payload; driven only on the issuing cycle of a write.
    pub data_out: u32,
    /// One-cycle pulse signaling an event directive to the peers.
    pub event_out: bool,
    /// Level output; latches true once the script is exhausted.
    pub finished: bool,
}
