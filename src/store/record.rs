//! Line record codec
//!
//! One record per line, fields joined by `|`. Only the last field may carry
//! a `|` of its own, since lines are split with a bounded `splitn`.

/// A record type persisted as one line of a flat file
pub trait LineRecord: Sized {
    /// File name inside the data directory
    const FILE: &'static str;

    /// Maximum number of fields on a line
    const FIELDS: usize;

    fn to_fields(&self) -> Vec<String>;

    /// Parse the already split fields of one line
    fn from_fields(fields: &[&str]) -> Result<Self, String>;
}

/// Split a line into at most `max_fields` fields
pub fn split_line(line: &str, max_fields: usize) -> Vec<&str> {
    line.splitn(max_fields, '|').collect()
}

/// Join fields into a line, or return the index of the first field that
/// cannot be stored
pub fn join_line(fields: &[String]) -> Result<String, usize> {
    let last = fields.len().saturating_sub(1);
    for (i, f) in fields.iter().enumerate() {
        if f.contains(['\n', '\r']) || (i != last && f.contains('|')) {
            return Err(i);
        }
    }
    Ok(fields.join("|"))
}

/// Escape backslashes and line breaks so multiline text fits on one line
pub fn escape_breaks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_breaks`]. Unknown escapes are kept as written.
pub fn unescape_breaks(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parse a numeric field, naming it in the error
pub fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid {} '{}'", name, raw))
}
