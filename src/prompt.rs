//! Builds the prompt text handed to the text-generation side of the application.

use std::fmt::Write;

/// Concatenates `"{name}: {value}\n"` for each `(name, value)` pair, in order.
/// Pairs whose value is empty after trimming contribute nothing, not even their name.
/// The value itself is written untrimmed.
pub fn format_prompt<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut text = String::new();
    for (name, value) in rows {
        if value.trim().is_empty() {
            continue;
        }
        // Writing to a String cannot fail.
        let _ = writeln!(text, "{name}: {value}");
    }
    text
}
