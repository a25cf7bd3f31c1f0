//! GEDCOM line tokenization.
//!
//! A GEDCOM line is `level + delim + [xref] + tag + [value]` (5.5.1 spec,
//! p. 11). Custom tags start with an underscore and are carried like any
//! other tag so vendor extensions survive.

use genea_core::GeneaError;

/// One parsed GEDCOM line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedLine {
    pub level: u8,
    /// Record id on level-0 record headers, e.g. `@I1@`.
    pub xref: Option<String>,
    pub tag: String,
    /// Everything after the tag, pointers included.
    pub value: Option<String>,
}

impl GedLine {
    /// True when the value is a cross-reference pointer (`@...@`).
    pub fn is_pointer(&self) -> bool {
        self.value
            .as_deref()
            .is_some_and(|v| v.len() > 2 && v.starts_with('@') && v.ends_with('@'))
    }
}

/// Parse one line. Empty lines yield `None`.
///
/// # Errors
///
/// Lines with no parsable level or no tag are structural errors; the caller
/// downgrades them to warnings and continues.
pub fn parse_line(raw: &str) -> Result<Option<GedLine>, GeneaError> {
    // Leading whitespace is tolerated (some producers indent).
    let raw = raw.trim_start_matches([' ', '\t']).trim_end_matches(['\r']);
    if raw.is_empty() {
        return Ok(None);
    }

    let mut rest = raw;

    let level_end = rest
        .find(' ')
        .ok_or_else(|| GeneaError::CodecMalformed(format!("line has no delimiter: {raw}")))?;
    let level: u8 = rest[..level_end]
        .parse()
        .map_err(|_| GeneaError::CodecMalformed(format!("invalid level: {raw}")))?;
    rest = rest[level_end + 1..].trim_start();

    let mut xref = None;
    if rest.starts_with('@') {
        let end = rest[1..]
            .find('@')
            .ok_or_else(|| GeneaError::CodecMalformed(format!("unterminated xref: {raw}")))?;
        xref = Some(rest[..end + 2].to_string());
        rest = rest[end + 2..].trim_start();
    }

    if rest.is_empty() {
        return Err(GeneaError::CodecMalformed(format!("line has no tag: {raw}")));
    }
    let (tag, value) = match rest.find(' ') {
        Some(i) => (&rest[..i], Some(rest[i + 1..].to_string())),
        None => (rest, None),
    };

    Ok(Some(GedLine {
        level,
        xref,
        tag: tag.to_uppercase(),
        value: value.filter(|v| !v.is_empty()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_header() {
        let line = parse_line("0 @I1@ INDI").unwrap().unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.xref.as_deref(), Some("@I1@"));
        assert_eq!(line.tag, "INDI");
        assert_eq!(line.value, None);
    }

    #[test]
    fn test_parse_value_line() {
        let line = parse_line("1 NAME John /Doe/").unwrap().unwrap();
        assert_eq!(line.level, 1);
        assert_eq!(line.xref, None);
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value.as_deref(), Some("John /Doe/"));
    }

    #[test]
    fn test_parse_pointer_value() {
        let line = parse_line("1 HUSB @I3@").unwrap().unwrap();
        assert_eq!(line.value.as_deref(), Some("@I3@"));
        assert!(line.is_pointer());
    }

    #[test]
    fn test_parse_custom_tag() {
        let line = parse_line("2 _APID 1,7602::12345").unwrap().unwrap();
        assert_eq!(line.tag, "_APID");
        assert_eq!(line.value.as_deref(), Some("1,7602::12345"));
    }

    #[test]
    fn test_tag_is_upper_cased() {
        let line = parse_line("1 name X").unwrap().unwrap();
        assert_eq!(line.tag, "NAME");
    }

    #[test]
    fn test_crlf_is_tolerated() {
        let line = parse_line("1 SEX M\r").unwrap().unwrap();
        assert_eq!(line.value.as_deref(), Some("M"));
    }

    #[test]
    fn test_empty_line_is_none() {
        assert!(parse_line("").unwrap().is_none());
        assert!(parse_line("   \r").unwrap().is_none());
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(parse_line("NONSENSE").is_err());
        assert!(parse_line("x NAME Foo").is_err());
    }
}
