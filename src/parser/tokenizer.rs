//! Line-level CSV tokenizer.
//!
//! A `"` toggles quoted mode and is never emitted. A `,` outside quotes ends
//! the current field, a `,` inside quotes is literal. Each field is trimmed.
//!
//! Doubled quotes (`""`) are not an escape: they toggle twice and emit
//! nothing, so a literal quote character cannot appear in a field. Quoted
//! fields cannot span lines either.

/// Field separator.
pub const SEPARATOR: char = ',';

const QUOTE: char = '"';

/// Split one line of text into trimmed field values.
///
/// Always returns at least one field; an empty line yields `[""]`.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            SEPARATOR if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Split a whole document into lines.
///
/// Leading and trailing whitespace of the document is dropped first, so a
/// trailing newline does not produce an empty final row. Carriage returns
/// are left in place; field trimming removes them.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.trim().split('\n')
}
