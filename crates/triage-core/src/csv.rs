//! Minimal CSV field codec for the history log and corpus files.
//!
//! Quoting follows the usual rules: fields containing a comma, quote or
//! newline are wrapped in double quotes, embedded quotes doubled.

/// Escape a single field for CSV output.
pub fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Undo [`escape_field`] on a single raw field.
pub fn unescape_field(s: &str) -> String {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].replace("\"\"", "\"")
    } else {
        s.to_string()
    }
}

/// Split one CSV line into raw (still escaped) fields, honoring quoted
/// commas. Unterminated quotes swallow the rest of the line.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push_str("\"\"");
                } else {
                    in_quotes = false;
                    current.push('"');
                }
            }
            '"' => {
                in_quotes = true;
                current.push('"');
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("hello"), "hello");
        assert_eq!(escape_field("hello,world"), "\"hello,world\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_unescape_field() {
        assert_eq!(unescape_field("hello"), "hello");
        assert_eq!(unescape_field("\"hello,world\""), "hello,world");
        assert_eq!(unescape_field("\"say \"\"hi\"\"\""), "say \"hi\"");
    }

    #[test]
    fn test_split_plain_line() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        let fields = split_line("a,\"b,c\",d");
        assert_eq!(fields, vec!["a", "\"b,c\"", "d"]);
        assert_eq!(unescape_field(&fields[1]), "b,c");
    }

    #[test]
    fn test_roundtrip() {
        let original = ["disk full, /var", "storage", "say \"ouch\""];
        let line = original
            .iter()
            .map(|f| escape_field(f))
            .collect::<Vec<_>>()
            .join(",");
        let back: Vec<String> = split_line(&line).iter().map(|f| unescape_field(f)).collect();
        assert_eq!(back, original);
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(split_line("a,,c"), vec!["a", "", "c"]);
        assert_eq!(split_line(""), vec![""]);
    }
}
