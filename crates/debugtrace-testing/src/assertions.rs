//! Assertions over captured trace lines (timestamps already stripped).

use anyhow::{Context, Result};

/// Assert that every Enter line has a matching Leave line at the same code
/// indentation, in last-in first-out order.
pub fn assert_enter_leave_balanced(payloads: &[String], code_indent: &str) -> Result<()> {
    let mut open: Vec<(usize, String)> = Vec::new();

    for (index, payload) in payloads.iter().enumerate() {
        let (depth, rest) = split_indent(payload, code_indent);

        if let Some(function) = rest.strip_prefix("Enter ") {
            if depth != open.len() {
                anyhow::bail!(
                    "Line {}: Enter at depth {} but {} scopes are open",
                    index,
                    depth,
                    open.len()
                );
            }
            open.push((depth, strip_location(function).to_string()));
        } else if let Some(function) = rest.strip_prefix("Leave ") {
            let (entered_depth, entered) = open
                .pop()
                .with_context(|| format!("Line {}: Leave without a matching Enter", index))?;
            let function = strip_location(function);

            if function != entered || depth != entered_depth {
                anyhow::bail!(
                    "Line {}: Leave {} at depth {} does not match Enter {} at depth {}",
                    index,
                    function,
                    depth,
                    entered,
                    entered_depth
                );
            }
        }
    }

    if let Some((_, function)) = open.last() {
        anyhow::bail!("{} scope(s) never left, innermost {}", open.len(), function);
    }

    Ok(())
}

/// Assert the code nesting depth of a single payload line.
pub fn assert_indent_depth(payload: &str, code_indent: &str, expected: usize) -> Result<()> {
    let (depth, _) = split_indent(payload, code_indent);
    if depth != expected {
        anyhow::bail!("Expected depth {} in {:?}, got {}", expected, payload, depth);
    }
    Ok(())
}

fn split_indent<'a>(payload: &'a str, code_indent: &str) -> (usize, &'a str) {
    let mut depth = 0;
    let mut rest = payload;
    if code_indent.is_empty() {
        return (depth, rest);
    }
    while let Some(stripped) = rest.strip_prefix(code_indent) {
        depth += 1;
        rest = stripped;
    }
    (depth, rest)
}

fn strip_location(function: &str) -> &str {
    match function.rfind(" (") {
        Some(index) if function.ends_with(')') => &function[..index],
        _ => function,
    }
}
