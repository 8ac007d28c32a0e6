//! Newline-delimited JSON encoding.
//!
//! Field order is fixed: `@timestamp`, `message`, `log.level`, then every
//! tag in record order. Tag values are always strings; an unset level is
//! `null`. Escaping is left to `serde_json`.
//!
//! A tag named like a fixed field is written as `labels.<key>`, unless the
//! record also carries an explicit `labels.<key>` tag, which then wins. No
//! object ever repeats a key.

use std::borrow::Cow;
use std::collections::HashSet;

use chrono::SecondsFormat;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::logger::LogRecord;
use crate::sink::Format;

pub const TIMESTAMP_FIELD: &str = "@timestamp";
pub const MESSAGE_FIELD: &str = "message";
pub const LEVEL_FIELD: &str = "log.level";

/// Prefix applied to tags whose key would shadow a fixed field.
const RESERVED_TAG_PREFIX: &str = "labels.";

fn is_reserved(key: &str) -> bool {
    matches!(key, TIMESTAMP_FIELD | MESSAGE_FIELD | LEVEL_FIELD)
}

struct JsonLine<'a>(&'a LogRecord);

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        // An explicit `labels.<key>` tag wins over a renamed reserved tag.
        let explicit: HashSet<&str> = record
            .tags
            .iter()
            .map(|tag| tag.key.as_str())
            .filter(|key| !is_reserved(key))
            .collect();
        let mut written: HashSet<Cow<'_, str>> = HashSet::with_capacity(record.tags.len());

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(
            TIMESTAMP_FIELD,
            &record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        )?;
        map.serialize_entry(MESSAGE_FIELD, &record.message)?;
        map.serialize_entry(LEVEL_FIELD, &record.level.name())?;
        for tag in record.tags.iter() {
            let key: Cow<'_, str> = if is_reserved(&tag.key) {
                let renamed = format!("{}{}", RESERVED_TAG_PREFIX, tag.key);
                if explicit.contains(renamed.as_str()) {
                    continue;
                }
                Cow::Owned(renamed)
            } else {
                Cow::Borrowed(tag.key.as_str())
            };
            // Exact duplicates only reach here when a sink is fed unmerged
            // tags directly; the first one is kept.
            if written.contains(&key) {
                continue;
            }
            map.serialize_entry(&*key, &tag.value)?;
            written.insert(key);
        }
        map.end()
    }
}

/// Compact JSON object per record, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn format(&self, record: &LogRecord, buf: &mut Vec<u8>) {
        // Writing into a Vec cannot fail and every value is a string or null.
        if let Err(e) = serde_json::to_writer(&mut *buf, &JsonLine(record)) {
            tracing::error!(error = %e, "Failed to encode log record");
            return;
        }
        buf.push(b'\n');
    }
}
