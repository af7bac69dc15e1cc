// Primitives for reading lists of participants.

use csv::{ReaderBuilder, StringRecord, Terminator};
use log::{debug, warn};

use winner_draw::{ParsedTable, ParticipantRecord};

/// The separators that are tried on every line, in order of preference.
pub const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Reads the raw content of a participant list.
///
/// Content in another encoding than UTF-8 (Latin-1 exports, for example) is kept: the
/// bytes that are not valid UTF-8 are replaced with U+FFFD.
pub fn parse_upload(content: &[u8]) -> ParsedTable {
    let text = String::from_utf8_lossy(content);
    if let std::borrow::Cow::Owned(_) = text {
        warn!("parse_upload: content is not valid UTF-8, invalid bytes were replaced");
    }
    parse_lines(text.lines())
}

/// Turns lines of text into participant records.
///
/// Blank lines are skipped. The separator is chosen for every line independently.
pub fn parse_lines<'a, I>(lines: I) -> ParsedTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut records: Vec<ParticipantRecord> = Vec::new();
    for (idx, raw) in lines.into_iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let fields = split_best(line);
        debug!("parse_lines: lineno: {:?} fields: {:?}", idx + 1, fields);
        records.push(ParticipantRecord::new(fields));
    }
    ParsedTable { records }
}

/// Splits a line with the separator that yields the most fields.
/// Ties go to the separator listed first in `DELIMITERS`.
pub fn split_best(line: &str) -> Vec<String> {
    let mut best = split_line(line, DELIMITERS[0]);
    for delimiter in DELIMITERS.iter().skip(1) {
        let current = split_line(line, *delimiter);
        if current.len() > best.len() {
            best = current;
        }
    }
    best
}

/// Splits a single line on the given separator, honoring `"` quoting.
pub fn split_line(line: &str, delimiter: u8) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        // Only a line feed ends a line. A stray carriage return stays in the field.
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    match rdr.read_record(&mut record) {
        Ok(true) => record.iter().map(|s| s.to_string()).collect(),
        Ok(false) => vec![line.to_string()],
        Err(e) => {
            warn!(
                "split_line: could not split {:?} on {:?}: {}",
                line, delimiter as char, e
            );
            vec![line.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn most_fields_wins() {
        assert_eq!(split_best("a,b;c;d"), fields(&["a,b", "c", "d"]));
        assert_eq!(split_best("x\ty\tz|w"), fields(&["x", "y", "z|w"]));
        assert_eq!(split_best("1|2|3|4,5"), fields(&["1", "2", "3", "4,5"]));
    }

    #[test]
    fn ties_go_to_the_first_separator() {
        // Every separator yields 2 fields here, comma is listed first.
        assert_eq!(split_best("a,b;c|d"), fields(&["a", "b;c|d"]));
        assert_eq!(split_best("a;b|c"), fields(&["a", "b|c"]));
    }

    #[test]
    fn no_separator_is_a_single_field() {
        assert_eq!(split_best("Anna Schmidt"), fields(&["Anna Schmidt"]));
    }

    #[test]
    fn quoted_fields() {
        assert_eq!(
            split_best(r#""Doe, John";john@example.org"#),
            fields(&["Doe, John", "john@example.org"])
        );
        assert_eq!(
            split_line(r#""say ""hi""",x"#, b','),
            fields(&[r#"say "hi""#, "x"])
        );
        // The quoted comma does not count as a separator.
        assert_eq!(split_best(r#""a,b,c";d"#), fields(&["a,b,c", "d"]));
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(split_best("a,,c"), fields(&["a", "", "c"]));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = parse_lines(vec!["Anna", "", "   ", "\t", "Bob", "  Clara  "]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.records[0].fields, fields(&["Anna"]));
        assert_eq!(table.records[1].fields, fields(&["Bob"]));
        assert_eq!(table.records[2].fields, fields(&["Clara"]));
    }

    #[test]
    fn separator_is_chosen_per_line() {
        let table = parse_lines("a,b,c\nd;e\nf|g|h|i\n".lines());
        assert_eq!(table.len(), 3);
        assert_eq!(table.records[0].fields, fields(&["a", "b", "c"]));
        assert_eq!(table.records[1].fields, fields(&["d", "e"]));
        assert_eq!(table.records[2].fields, fields(&["f", "g", "h", "i"]));
    }

    #[test]
    fn upload_with_windows_line_endings() {
        let table = parse_upload(b"Anna;Berlin\r\n\r\nBob;Hamburg\r\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].fields, fields(&["Bob", "Hamburg"]));
    }

    #[test]
    fn latin1_upload_keeps_every_line() {
        let table = parse_upload(b"M\xfcller;Berlin\nSchmidt;Hamburg\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].fields, fields(&["M\u{fffd}ller", "Berlin"]));
        assert_eq!(table.records[1].fields, fields(&["Schmidt", "Hamburg"]));
    }

    #[test]
    fn stray_carriage_return_does_not_end_the_record() {
        let table = parse_upload(b"Anna;Berlin\rBob;Hamburg\n");
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.records[0].fields,
            fields(&["Anna", "Berlin\rBob", "Hamburg"])
        );
        assert_eq!(split_line("a\rb,c", b','), fields(&["a\rb", "c"]));
    }

    #[test]
    fn blank_upload_is_empty() {
        assert!(parse_upload(b"\n \n\t\n").is_empty());
        assert!(parse_upload(b"").is_empty());
    }
}
