//! Document-number formatting

use atelier_domain::constants::DOCUMENT_NUMBER_PAD_WIDTH;

/// Render a business-document number from a post-increment counter value.
///
/// The counter stores the *next* value to hand out, so after the atomic
/// increment returns `next_value`, the number that was actually consumed is
/// `next_value - 1`. Numbers already issued to clients embed that convention;
/// do not "fix" it.
///
/// ```
/// use atelier_core::format_document_number;
///
/// assert_eq!(format_document_number("ORD", 2026, 42), "ORD-2026-041");
/// ```
pub fn format_document_number(prefix: &str, year: i32, next_value: i64) -> String {
    format!("{prefix}-{year}-{:0width$}", next_value - 1, width = DOCUMENT_NUMBER_PAD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_value_minus_one() {
        assert_eq!(format_document_number("ORD", 2026, 1), "ORD-2026-000");
        assert_eq!(format_document_number("INV", 2026, 2), "INV-2026-001");
    }

    #[test]
    fn pads_to_three_digits() {
        assert_eq!(format_document_number("PRO", 2026, 8), "PRO-2026-007");
        assert_eq!(format_document_number("PRO", 2026, 100), "PRO-2026-099");
    }

    #[test]
    fn does_not_truncate_wide_values() {
        assert_eq!(format_document_number("INV", 2026, 12001), "INV-2026-12000");
    }
}
