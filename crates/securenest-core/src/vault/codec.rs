//! Store file codec
//!
//! Single shared read/write implementation of the vault file format,
//! used identically by the active and trash stores:
//!
//! ```text
//! Title: <value>
//! Username: <value>
//! Password: <value>
//! Web Address: <value>
//! Note: <value>
//! -----------------------------
//! ```
//!
//! Field lines are recognized by a fixed label prefix and the value is
//! trimmed. Any line starting with `-` terminates the current record.
//! Lines matching neither a label nor the separator are ignored, so
//! unknown fields survive a read but are dropped on the next rewrite.
//! Values are not escaped: a value containing a newline or a line that
//! itself starts with a label or `-` will corrupt parsing.

use super::Record;

/// Separator line written after every record.
pub const SEPARATOR: &str = "-----------------------------";

const LABEL_TITLE: &str = "Title:";
const LABEL_USERNAME: &str = "Username:";
const LABEL_PASSWORD: &str = "Password:";
const LABEL_WEB_ADDRESS: &str = "Web Address:";
const LABEL_NOTE: &str = "Note:";

/// Render a record as a formatted block, separator included.
///
/// Field values are trimmed of leading and trailing whitespace here, at
/// write time; the parser trims as well but the stored bytes are
/// already clean.
pub fn format_record(record: &Record) -> String {
    format!(
        "{LABEL_TITLE} {}\n{LABEL_USERNAME} {}\n{LABEL_PASSWORD} {}\n{LABEL_WEB_ADDRESS} {}\n{LABEL_NOTE} {}\n{SEPARATOR}\n",
        record.title.trim(),
        record.username.trim(),
        record.password.trim(),
        record.web_address.trim(),
        record.note.trim(),
    )
}

/// Parse the full contents of a store file into records.
///
/// Consecutive field lines accumulate into one record; a separator line
/// closes it. A trailing record with no terminating separator is still
/// included. Never fails: malformed lines are skipped.
pub fn parse_records(contents: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current: Option<Record> = None;

    for line in contents.lines() {
        if let Some(value) = line.strip_prefix(LABEL_TITLE) {
            current.get_or_insert_with(Record::default).title = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(LABEL_USERNAME) {
            current.get_or_insert_with(Record::default).username = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(LABEL_PASSWORD) {
            current.get_or_insert_with(Record::default).password = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(LABEL_WEB_ADDRESS) {
            current.get_or_insert_with(Record::default).web_address = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(LABEL_NOTE) {
            current.get_or_insert_with(Record::default).note = value.trim().to_string();
        } else if line.starts_with('-') {
            if let Some(record) = current.take() {
                records.push(record);
            }
        }
        // Anything else (blank lines, unknown labels) is ignored.
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            title: "GitHub".to_string(),
            username: "octocat".to_string(),
            password: "hunter2".to_string(),
            web_address: "https://github.com".to_string(),
            note: "work account".to_string(),
        }
    }

    #[test]
    fn test_round_trip_single_record() {
        let record = sample_record();
        let block = format_record(&record);
        let parsed = parse_records(&block);

        assert_eq!(parsed, vec![record]);
    }

    #[test]
    fn test_format_trims_whitespace() {
        let record = Record {
            title: "  GitHub  ".to_string(),
            username: "octocat\n".to_string(),
            password: " hunter2".to_string(),
            web_address: String::new(),
            note: "\tnote\t".to_string(),
        };

        let block = format_record(&record);
        let parsed = parse_records(&block);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "GitHub");
        assert_eq!(parsed[0].username, "octocat");
        assert_eq!(parsed[0].password, "hunter2");
        assert_eq!(parsed[0].note, "note");
    }

    #[test]
    fn test_trailing_record_without_separator() {
        let contents = "Title: Loose\nUsername: end\nPassword: p";
        let parsed = parse_records(contents);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Loose");
        assert_eq!(parsed[0].username, "end");
    }

    #[test]
    fn test_any_dash_line_is_a_separator() {
        let contents = "Title: A\n--\nTitle: B\n-----------------------------\n";
        let parsed = parse_records(contents);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "A");
        assert_eq!(parsed[1].title, "B");
    }

    #[test]
    fn test_unknown_lines_are_ignored() {
        let contents = "Title: A\nTotp: 123456\n\ngarbage here\nNote: kept\n-----------------------------\n";
        let parsed = parse_records(contents);

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "A");
        assert_eq!(parsed[0].note, "kept");
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_records("").is_empty());
        assert!(parse_records("\n\n").is_empty());
    }

    #[test]
    fn test_separator_without_fields_yields_nothing() {
        let contents = "-----------------------------\n-----------------------------\n";
        assert!(parse_records(contents).is_empty());
    }

    #[test]
    fn test_empty_values_still_form_a_record() {
        let record = Record::new("OnlyTitle");
        let block = format_record(&record);
        let parsed = parse_records(&block);

        assert_eq!(parsed, vec![record]);
    }

    #[test]
    fn test_multiple_blocks() {
        let a = Record::new("A");
        let b = sample_record();
        let contents = format!("{}{}", format_record(&a), format_record(&b));
        let parsed = parse_records(&contents);

        assert_eq!(parsed, vec![a, b]);
    }
}
