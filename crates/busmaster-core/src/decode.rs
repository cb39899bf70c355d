//! Fixed-position transaction decoder for command records.
//!
//! Command records are fixed-width ASCII: a keyword, an 8-digit hexadecimal
//! address, and an 8-digit hexadecimal payload at offsets determined by the
//! record kind. Classification is by total byte length first, then the
//! keyword is checked and the two fields are sliced from the declared
//! offsets. Anything else is a fatal fault.

use crate::fault::{Fault, FaultKind};

/// Direction of a decoded bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TransactionKind {
    /// Read the address and check the returned data against the payload.
    Read,
    /// Store the payload at the address.
    Write,
}

/// A decoded bus command.
///
/// For a [`TransactionKind::Write`] the payload is the value to store; for a
/// [`TransactionKind::Read`] it is the expected value to check against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Transaction {
    /// Read or write.
    pub kind: TransactionKind,
    /// 32-bit bus address.
    pub address: u32,
    /// 32-bit payload (expected value for reads, stored value for writes).
    pub payload: u32,
}

/// Number of hexadecimal digits in an address or payload field.
pub const HEX_FIELD_DIGITS: usize = 8;

/// Fixed field offsets for one record kind.
struct RecordLayout {
    kind: TransactionKind,
    keyword: &'static [u8; KEYWORD_BYTES],
    line_length: usize,
    address_offset: usize,
    payload_offset: usize,
}

/// Byte width of the keyword field. The write keyword is five letters plus
/// its mandatory separating space, compared as one 6-byte literal.
const KEYWORD_BYTES: usize = 6;

/// `write AAAAAAAA DDDDDDDD` — 23 bytes.
const WRITE_LAYOUT: RecordLayout = RecordLayout {
    kind: TransactionKind::Write,
    keyword: b"write ",
    line_length: 23,
    address_offset: 6,
    payload_offset: 15,
};

/// `verify AAAAAAAA DDDDDDDD` — 24 bytes.
const VERIFY_LAYOUT: RecordLayout = RecordLayout {
    kind: TransactionKind::Read,
    keyword: b"verify",
    line_length: 24,
    address_offset: 7,
    payload_offset: 16,
};

/// Decodes a non-directive line into a [`Transaction`].
///
/// # Errors
///
/// Returns a [`Fault`] at `line_number` when the line length matches neither
/// record layout, the keyword field matches neither keyword, or either hex
/// field contains a non-hexadecimal byte.
pub fn decode_transaction(text: &str, line_number: usize) -> Result<Transaction, Fault> {
    let bytes = text.as_bytes();
    let layout = match bytes.len() {
        len if len == WRITE_LAYOUT.line_length => &WRITE_LAYOUT,
        len if len == VERIFY_LAYOUT.line_length => &VERIFY_LAYOUT,
        other => {
            return Err(Fault::new(
                line_number,
                FaultKind::InvalidLineLength { length: other },
            ))
        }
    };

    if &bytes[..KEYWORD_BYTES] != layout.keyword {
        return Err(Fault::new(
            line_number,
            FaultKind::InvalidCommand {
                keyword: String::from_utf8_lossy(&bytes[..KEYWORD_BYTES]).into_owned(),
            },
        ));
    }

    let address = parse_hex_field(bytes, layout.address_offset, line_number)?;
    let payload = parse_hex_field(bytes, layout.payload_offset, line_number)?;

    Ok(Transaction {
        kind: layout.kind,
        address,
        payload,
    })
}

/// Parses the fixed 8-digit hexadecimal field at `offset`.
fn parse_hex_field(bytes: &[u8], offset: usize, line_number: usize) -> Result<u32, Fault> {
    let field = &bytes[offset..offset + HEX_FIELD_DIGITS];
    let bad_field = |field: &[u8]| {
        Fault::new(
            line_number,
            FaultKind::InvalidHexField {
                field: String::from_utf8_lossy(field).into_owned(),
            },
        )
    };

    if !field.iter().all(u8::is_ascii_hexdigit) {
        return Err(bad_field(field));
    }
    let digits = std::str::from_utf8(field).map_err(|_| bad_field(field))?;
    u32::from_str_radix(digits, 16).map_err(|_| bad_field(field))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{decode_transaction, Transaction, TransactionKind};
    use crate::fault::FaultKind;

    #[test]
    fn write_record_decodes_both_fields() {
        let txn = decode_transaction("write 00000010 DEADBEEF", 1).expect("well-formed write");
        assert_eq!(
            txn,
            Transaction {
                kind: TransactionKind::Write,
                address: 0x0000_0010,
                payload: 0xDEAD_BEEF,
            }
        );
    }

    #[test]
    fn verify_record_decodes_both_fields() {
        let txn = decode_transaction("verify FFFF0000 cafebabe", 4).expect("well-formed verify");
        assert_eq!(
            txn,
            Transaction {
                kind: TransactionKind::Read,
                address: 0xFFFF_0000,
                payload: 0xCAFE_BABE,
            }
        );
    }

    #[test]
    fn hex_fields_are_case_insensitive() {
        let upper = decode_transaction("write 0000ABCD 0000EF01", 1).expect("uppercase");
        let lower = decode_transaction("write 0000abcd 0000ef01", 1).expect("lowercase");
        assert_eq!(upper, lower);
    }

    #[rstest]
    #[case("")]
    #[case("write")]
    #[case("verify 00000010 DEADBEEF trailing")]
    #[case("write 0000010 DEADBEEF")]
    fn wrong_length_reports_offending_length(#[case] text: &str) {
        let fault = decode_transaction(text, 9).expect_err("length fault");
        assert_eq!(fault.line, 9);
        assert_eq!(
            fault.kind,
            FaultKind::InvalidLineLength { length: text.len() }
        );
    }

    #[rstest]
    #[case("verfiy 00000010 DEADBEEF", "verfiy")]
    #[case("Write 00000010 DEADBEEF", "Write ")]
    #[case("write 00000010 DEADBEEF ", "write ")]
    fn unknown_keyword_is_invalid_command(#[case] text: &str, #[case] keyword: &str) {
        // The last case is a write record padded to verify length: the
        // length-first classification makes its keyword field mismatch.
        let fault = decode_transaction(text, 1).expect_err("command fault");
        assert_eq!(
            fault.kind,
            FaultKind::InvalidCommand {
                keyword: keyword.into()
            }
        );
    }

    #[rstest]
    #[case("write 0000001G DEADBEEF", "0000001G")]
    #[case("write 00000010 DEADBEEZ", "DEADBEEZ")]
    #[case("write +0000010 DEADBEEF", "+0000010")]
    #[case("verify 00000010 DEADBEE ", "DEADBEE ")]
    fn non_hex_field_is_fatal(#[case] text: &str, #[case] field: &str) {
        let fault = decode_transaction(text, 3).expect_err("hex fault");
        assert_eq!(fault.line, 3);
        assert_eq!(
            fault.kind,
            FaultKind::InvalidHexField {
                field: field.into()
            }
        );
    }

    #[test]
    fn verify_separator_byte_is_not_inspected() {
        // Field extraction is purely positional: the byte between the verify
        // keyword and the address field carries no meaning.
        let txn = decode_transaction("verifyX00000010 DEADBEEF", 1).expect("positional decode");
        assert_eq!(txn.address, 0x10);
    }
}
