//! Human-readable single-line encoding for terminals.

use std::io::Write;

use chrono::SecondsFormat;

use crate::logger::{Level, LogRecord};
use crate::sink::Format;

fn short_level(level: Level) -> &'static str {
    match level {
        Level::Unset => "-----",
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => "INFO ",
        Level::Warning => "WARN ",
        Level::Error => "ERROR",
        Level::Critical => "CRIT ",
    }
}

/// `<timestamp> <LEVEL> <message> {k=v, ...}`.
///
/// Line breaks inside the message or tag values are escaped so that one
/// record always occupies one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumanFormat;

impl Format for HumanFormat {
    fn format(&self, record: &LogRecord, buf: &mut Vec<u8>) {
        let ts = record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        // Writes into a Vec are infallible.
        let _ = write!(buf, "{} {} {}", ts, short_level(record.level), escape_line_breaks(&record.message));
        if !record.tags.is_empty() {
            let _ = write!(buf, " {{");
            for (i, tag) in record.tags.iter().enumerate() {
                if i > 0 {
                    let _ = write!(buf, ", ");
                }
                let _ = write!(buf, "{}={}", tag.key, escape_line_breaks(&tag.value));
            }
            let _ = write!(buf, "}}");
        }
        buf.push(b'\n');
    }
}

fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TagSet;
    use chrono::{TimeZone, Utc};

    fn encode(record: &LogRecord) -> String {
        let mut buf = Vec::new();
        HumanFormat.format(record, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_layout() {
        let ts = Utc.with_ymd_and_hms(2022, 9, 2, 18, 13, 21).unwrap();
        let record = LogRecord::new(Level::Debug, "Starting task: C")
            .with_tags(TagSet::single("trace.id", "abc"))
            .at(ts);
        assert_eq!(encode(&record), "2022-09-02T18:13:21.000Z DEBUG Starting task: C {trace.id=abc}\n");
    }

    #[test]
    fn test_single_line() {
        let record = LogRecord::new(Level::Info, "two\nlines").with_tags(TagSet::single("k", "a\r\nb"));
        let line = encode(&record);
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.contains("two\\nlines"));
        assert!(line.contains("k=a\\r\\nb"));
    }
}
