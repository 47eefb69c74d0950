//! Terminal output utilities.

/// Format a value as a quoted, right-aligned field.
///
/// Values longer than `width` are returned quoted but not truncated.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_cidr() {
        assert_eq!(format_field("10.0.0.0/17", 16), "   \"10.0.0.0/17\"");
    }
}
