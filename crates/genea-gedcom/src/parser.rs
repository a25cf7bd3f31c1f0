//! GEDCOM record assembly: lines → a lazy sequence of record trees.
//!
//! Records are produced one level-0 subtree at a time by [`RecordIter`], so
//! the importer's dispatching loop consumes them as a stream. Structural
//! problems (unparsable lines, level jumps) become diagnostics, never
//! panics; the only fatal condition lives in the decoding layer.

use crate::line::{GedLine, parse_line};

/// One GEDCOM structure: a line and its nested substructures.
#[derive(Debug, Clone)]
pub struct GedRecord {
    pub line: GedLine,
    pub children: Vec<GedRecord>,
}

impl GedRecord {
    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&GedRecord> {
        self.children.iter().find(|c| c.line.tag == tag)
    }

    /// All children with the given tag, in file order.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GedRecord> {
        self.children.iter().filter(move |c| c.line.tag == tag)
    }

    /// Value of the first child with the given tag.
    pub fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.line.value.as_deref())
    }

    /// This record's value with `CONT`/`CONC` continuations folded in.
    pub fn text(&self) -> Option<String> {
        let mut text = self.line.value.clone().unwrap_or_default();
        let mut found = self.line.value.is_some();
        for child in &self.children {
            match child.line.tag.as_str() {
                "CONT" => {
                    found = true;
                    text.push('\n');
                    text.push_str(child.line.value.as_deref().unwrap_or(""));
                }
                "CONC" => {
                    found = true;
                    text.push_str(child.line.value.as_deref().unwrap_or(""));
                }
                _ => {}
            }
        }
        found.then_some(text)
    }
}

/// Lazy iterator over the level-0 records of a GEDCOM text. Structural
/// warnings accumulate in `warnings` as the stream is consumed.
pub struct RecordIter<'a> {
    raw: std::iter::Enumerate<std::str::Lines<'a>>,
    peeked: Option<GedLine>,
    pub warnings: Vec<String>,
}

impl<'a> RecordIter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            raw: text.lines().enumerate(),
            peeked: None,
            warnings: Vec::new(),
        }
    }

    /// Pull the next parsable line, downgrading bad lines to warnings.
    fn pull(&mut self) -> Option<GedLine> {
        for (index, raw) in self.raw.by_ref() {
            match parse_line(raw) {
                Ok(Some(line)) => return Some(line),
                Ok(None) => {}
                Err(e) => self.warnings.push(format!("line {}: {e}", index + 1)),
            }
        }
        None
    }

    fn next_line(&mut self) -> Option<GedLine> {
        self.peeked.take().or_else(|| self.pull())
    }

    fn peek_line(&mut self) -> Option<&GedLine> {
        if self.peeked.is_none() {
            self.peeked = self.pull();
        }
        self.peeked.as_ref()
    }

    fn collect_children(&mut self, parent_level: u8) -> Vec<GedRecord> {
        let mut children = Vec::new();
        while let Some(next) = self.peek_line() {
            if next.level <= parent_level {
                break;
            }
            if next.level > parent_level + 1 {
                let next_level = next.level;
                let next_tag = next.tag.clone();
                self.warnings.push(format!(
                    "level jump from {} to {} at tag {}",
                    parent_level, next_level, next_tag
                ));
            }
            let line = self.next_line().expect("peeked line");
            let level = line.level;
            let grandchildren = self.collect_children(level);
            children.push(GedRecord {
                line,
                children: grandchildren,
            });
        }
        children
    }
}

impl Iterator for RecordIter<'_> {
    type Item = GedRecord;

    fn next(&mut self) -> Option<GedRecord> {
        // Skip to the next level-0 line (tolerates stray deeper lines at
        // the start of the stream).
        let line = loop {
            let line = self.next_line()?;
            if line.level == 0 {
                break line;
            }
            self.warnings
                .push(format!("orphan line outside a record: {}", line.tag));
        };
        let children = self.collect_children(0);
        Some(GedRecord { line, children })
    }
}

/// Assemble all records of a decoded GEDCOM text.
pub fn parse_records(text: &str) -> (Vec<GedRecord>, Vec<String>) {
    let mut iter = RecordIter::new(text);
    let mut records = Vec::new();
    for record in iter.by_ref() {
        records.push(record);
    }
    (records, iter.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
0 HEAD
1 GEDC
2 VERS 5.5.1
1 CHAR UTF-8
0 @I1@ INDI
1 NAME John /Doe/
2 GIVN John
2 SURN Doe
1 SEX M
0 TRLR
";

    #[test]
    fn test_parse_builds_record_trees() {
        let (records, warnings) = parse_records(SAMPLE);
        assert!(warnings.is_empty());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].line.tag, "HEAD");
        assert_eq!(records[1].line.tag, "INDI");
        assert_eq!(records[1].line.xref.as_deref(), Some("@I1@"));
        assert_eq!(records[2].line.tag, "TRLR");

        let indi = &records[1];
        let name = indi.child("NAME").unwrap();
        assert_eq!(name.line.value.as_deref(), Some("John /Doe/"));
        assert_eq!(name.child_value("GIVN"), Some("John"));
        assert_eq!(indi.child_value("SEX"), Some("M"));
    }

    #[test]
    fn test_text_folds_continuations() {
        let input = "\
0 @N1@ NOTE First line
1 CONT Second line
1 CONC  continued
";
        let (records, _) = parse_records(input);
        assert_eq!(
            records[0].text().as_deref(),
            Some("First line\nSecond line continued")
        );
    }

    #[test]
    fn test_level_jump_is_warned_not_fatal() {
        let input = "\
0 @I1@ INDI
2 GIVN Stray
";
        let (records, warnings) = parse_records(input);
        assert_eq!(records.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("level jump"));
    }

    #[test]
    fn test_bad_line_is_warned_and_skipped() {
        let input = "\
0 @I1@ INDI
NONSENSE WITHOUT LEVEL
1 SEX M
";
        let (records, warnings) = parse_records(input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].child_value("SEX"), Some("M"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_records_stream_lazily() {
        let mut iter = RecordIter::new(SAMPLE);
        assert_eq!(iter.next().unwrap().line.tag, "HEAD");
        assert_eq!(iter.next().unwrap().line.tag, "INDI");
        assert_eq!(iter.next().unwrap().line.tag, "TRLR");
        assert!(iter.next().is_none());
    }
}
