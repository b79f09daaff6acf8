//! Small string helpers shared by card templates.

/// Collapses rendered-template whitespace: strips each line's leading
/// whitespace, joins the lines with no separator, and trims the result.
///
/// Card templates are indented for readability; the emitted fragment drops
/// that indentation so output stays compact and stable for snapshot-style
/// comparison. HTML rendering is whitespace-insensitive in the positions the
/// templates use, so this has no visual effect. Idempotent.
pub fn dedent(text: &str) -> String {
    text.split('\n')
        .map(str::trim_start)
        .collect::<String>()
        .trim()
        .to_string()
}
