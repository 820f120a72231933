/// Repeat `unit` once per nesting level, clamped at `maximum` repetitions.
pub fn indent_string(unit: &str, level: usize, maximum: usize) -> String {
    unit.repeat(level.min(maximum))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_grows_with_level() {
        assert_eq!(indent_string("| ", 0, 20), "");
        assert_eq!(indent_string("| ", 1, 20), "| ");
        assert_eq!(indent_string("| ", 3, 20), "| | | ");
    }

    #[test]
    fn test_indent_is_clamped() {
        assert_eq!(indent_string("  ", 50, 2), "    ");
    }
}
