//! Sale invoice numbering.

/// Prefix shared by every sale invoice number.
pub const INVOICE_PREFIX: &str = "INV-";

/// Formats a sequence value as an invoice number (`INV-000042`).
///
/// Numbers past six digits keep growing rather than wrapping.
#[must_use]
pub fn format_invoice_number(sequence: i64) -> String {
    format!("{INVOICE_PREFIX}{sequence:06}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "INV-000001")]
    #[case(42, "INV-000042")]
    #[case(999_999, "INV-999999")]
    #[case(1_000_000, "INV-1000000")]
    fn test_format_invoice_number(#[case] seq: i64, #[case] expected: &str) {
        assert_eq!(format_invoice_number(seq), expected);
    }
}
