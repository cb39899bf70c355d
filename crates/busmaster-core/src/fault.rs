//! Fatal fault taxonomy for script and bus contract violations.
//!
//! Every fault is terminal: there is no recovery, retry, or continuation past
//! the fault. A fault carries the 1-based script line number of the command
//! that caused it plus the hexadecimal values needed to diagnose it.

use thiserror::Error;

/// Classification of fatal faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultKind {
    /// Command record length matches neither the write nor the verify layout.
    #[error("invalid script line length {length}")]
    InvalidLineLength {
        /// Byte length of the offending line.
        length: usize,
    },
    /// Command keyword matches neither `write ` nor `verify`.
    #[error("invalid command {keyword:?}")]
    InvalidCommand {
        /// The 6-byte keyword field as found in the line.
        keyword: String,
    },
    /// A fixed 8-digit field contained a non-hexadecimal byte.
    #[error("invalid hex field {field:?}")]
    InvalidHexField {
        /// The field text as found in the line.
        field: String,
    },
    /// The peer did not present valid data on the checking cycle.
    #[error("read not valid at address 0x{address:08X}")]
    ReadNotValid {
        /// Address of the in-flight verify transaction.
        address: u32,
    },
    /// The peer's data differed from the verify command's expected payload.
    #[error("read data is 0x{actual:08X} should be 0x{expected:08X}")]
    ReadMismatch {
        /// Address of the in-flight verify transaction.
        address: u32,
        /// Value sampled from the data input.
        actual: u32,
        /// Expected payload embedded in the verify command.
        expected: u32,
    },
}

/// A fatal, unrecoverable fault tied to a script line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("script line {line}: {kind}")]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Fault {
    /// 1-based script line number of the offending command.
    pub line: usize,
    /// What went wrong.
    pub kind: FaultKind,
}

impl Fault {
    /// Creates a fault at the given script line.
    #[must_use]
    pub const fn new(line: usize, kind: FaultKind) -> Self {
        Self { line, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::{Fault, FaultKind};

    #[test]
    fn fault_display_carries_line_number() {
        let fault = Fault::new(7, FaultKind::InvalidLineLength { length: 12 });
        assert_eq!(fault.to_string(), "script line 7: invalid script line length 12");
    }

    #[test]
    fn read_faults_render_values_in_hex() {
        let fault = Fault::new(2, FaultKind::ReadNotValid { address: 0x10 });
        assert_eq!(
            fault.to_string(),
            "script line 2: read not valid at address 0x00000010"
        );

        let fault = Fault::new(
            2,
            FaultKind::ReadMismatch {
                address: 0x10,
                actual: 0xDEAD_BEEF,
                expected: 0xCAFE_BABE,
            },
        );
        assert_eq!(
            fault.to_string(),
            "script line 2: read data is 0xDEADBEEF should be 0xCAFEBABE"
        );
    }

    #[test]
    fn command_faults_quote_the_offending_text() {
        let fault = Fault::new(
            1,
            FaultKind::InvalidCommand {
                keyword: "verfiy".into(),
            },
        );
        assert_eq!(fault.to_string(), "script line 1: invalid command \"verfiy\"");

        let fault = Fault::new(
            3,
            FaultKind::InvalidHexField {
                field: "DEADBEEZ".into(),
            },
        );
        assert_eq!(
            fault.to_string(),
            "script line 3: invalid hex field \"DEADBEEZ\""
        );
    }
}
