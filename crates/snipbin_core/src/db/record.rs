//! Field-map encoding of persisted snippets.
//!
//! Each record is a `field name -> string value` map holding `name`, `body`,
//! `mode`, `timeCreated`, `timeExpired` and `userId`. The id is the table key
//! and is not repeated inside the record.

use crate::error::StoreError;
use crate::models::snippet::{Mode, Snippet};
use std::collections::BTreeMap;

pub(crate) type SnippetRecord = BTreeMap<String, String>;

const NAME: &str = "name";
const BODY: &str = "body";
const MODE: &str = "mode";
const TIME_CREATED: &str = "timeCreated";
const TIME_EXPIRED: &str = "timeExpired";
const USER_ID: &str = "userId";

pub(crate) fn to_record(snippet: &Snippet) -> SnippetRecord {
    [
        (NAME, snippet.name.clone()),
        (BODY, snippet.body.clone()),
        (MODE, snippet.mode.as_str().to_string()),
        (TIME_CREATED, snippet.time_created.to_string()),
        (TIME_EXPIRED, snippet.time_expired.to_string()),
        (USER_ID, snippet.user_id.clone()),
    ]
    .into_iter()
    .map(|(field, value)| (field.to_string(), value))
    .collect()
}

pub(crate) fn encode(snippet: &Snippet) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(&to_record(snippet))?)
}

pub(crate) fn decode(id: &str, bytes: &[u8]) -> Result<Snippet, StoreError> {
    let record: SnippetRecord = bincode::deserialize(bytes)?;
    from_record(id, record)
}

fn parse_timestamp(
    id: &str,
    record: &SnippetRecord,
    field: &'static str,
) -> Result<i64, StoreError> {
    let raw = record.get(field).map(String::as_str).unwrap_or_default();
    raw.parse::<i64>().map_err(|_| {
        tracing::error!("Malformed {} '{}' stored for snippet {}", field, raw, id);
        StoreError::Malformed {
            id: id.to_string(),
            field,
            value: raw.to_string(),
        }
    })
}

pub(crate) fn from_record(id: &str, mut record: SnippetRecord) -> Result<Snippet, StoreError> {
    let time_created = parse_timestamp(id, &record, TIME_CREATED)?;
    let time_expired = parse_timestamp(id, &record, TIME_EXPIRED)?;
    let raw_mode = record.remove(MODE).unwrap_or_default();
    let mode: Mode = raw_mode.parse().map_err(|_| StoreError::Malformed {
        id: id.to_string(),
        field: MODE,
        value: raw_mode.clone(),
    })?;

    Ok(Snippet {
        id: id.to_string(),
        name: record.remove(NAME).unwrap_or_default(),
        body: record.remove(BODY).unwrap_or_default(),
        mode,
        time_created,
        time_expired,
        user_id: record.remove(USER_ID).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreErrorKind;

    fn sample() -> Snippet {
        Snippet {
            id: "ffffffffffffffffffffffffffffffff".to_string(),
            name: "n".to_string(),
            body: "b".to_string(),
            mode: Mode::Golang,
            time_created: 10,
            time_expired: 20,
            user_id: String::new(),
        }
    }

    #[test]
    fn record_holds_the_persisted_layout_without_the_id() {
        let record = to_record(&sample());
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["body", "mode", "name", "timeCreated", "timeExpired", "userId"]
        );
        assert_eq!(record["mode"], "golang");
        assert_eq!(record["timeCreated"], "10");
        assert!(record.values().all(|value| !value.contains("ffffffff")));
    }

    #[test]
    fn malformed_timestamps_are_store_errors() {
        for field in [TIME_CREATED, TIME_EXPIRED] {
            let mut record = to_record(&sample());
            record.insert(field.to_string(), "yesterday".to_string());
            let err = from_record("abc", record).expect_err("timestamp must parse");
            assert_eq!(err.kind(), StoreErrorKind::MalformedData);
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn missing_timestamp_is_malformed() {
        let mut record = to_record(&sample());
        record.remove(TIME_EXPIRED);
        assert!(matches!(
            from_record("abc", record),
            Err(StoreError::Malformed { field: "timeExpired", .. })
        ));
    }

    #[test]
    fn garbage_bytes_are_malformed_data() {
        let err = decode("abc", &[0xff, 0x01]).expect_err("garbage must not decode");
        assert_eq!(err.kind(), StoreErrorKind::MalformedData);
    }
}
