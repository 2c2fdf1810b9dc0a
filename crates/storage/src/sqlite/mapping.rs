use chrono::{DateTime, Utc};
use prep_core::model::{
    Bookmark, BookmarkId, BookmarkKind, ContentRef, ProgressRecord, QuizResult, QuizResultId,
    QuizScore, SectionId, SettingValue,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_progress_row(row: &SqliteRow) -> Result<ProgressRecord, StorageError> {
    let section_id = SectionId::new(row.try_get::<String, _>("section_id").map_err(ser)?)
        .map_err(ser)?;
    let completed_at: DateTime<Utc> = row.try_get("completed_at").map_err(ser)?;
    Ok(ProgressRecord::new(section_id, completed_at))
}

pub(crate) fn map_quiz_row(row: &SqliteRow) -> Result<QuizResult, StorageError> {
    let id = i64_to_u64("id", row.try_get::<i64, _>("id").map_err(ser)?)?;
    let score = QuizScore::from_raw(
        row.try_get::<i64, _>("score").map_err(ser)?,
        row.try_get::<i64, _>("total_questions").map_err(ser)?,
    )
    .map_err(ser)?;
    let date: DateTime<Utc> = row.try_get("date").map_err(ser)?;
    Ok(QuizResult::from_persisted(QuizResultId::new(id), score, date))
}

/// Splits a content reference into the `(content_key, content_index)` columns.
pub(crate) fn content_columns(
    content: &ContentRef,
) -> Result<(Option<String>, Option<i64>), StorageError> {
    match content {
        ContentRef::Key(key) => Ok((Some(key.clone()), None)),
        ContentRef::Index(index) => Ok((None, Some(u64_to_i64("content_index", *index)?))),
    }
}

pub(crate) fn map_bookmark_row(row: &SqliteRow) -> Result<Bookmark, StorageError> {
    let id = BookmarkId::new(row.try_get::<String, _>("id").map_err(ser)?).map_err(ser)?;
    let kind = BookmarkKind::parse(&row.try_get::<String, _>("kind").map_err(ser)?)
        .map_err(ser)?;
    let key: Option<String> = row.try_get("content_key").map_err(ser)?;
    let index: Option<i64> = row.try_get("content_index").map_err(ser)?;
    let content = match (key, index) {
        (Some(key), None) => ContentRef::Key(key),
        (None, Some(index)) => ContentRef::Index(i64_to_u64("content_index", index)?),
        _ => {
            return Err(StorageError::Serialization(format!(
                "bookmark {id} must reference exactly one content column"
            )));
        }
    };
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(ser)?;
    Ok(Bookmark::new(id, kind, content, created_at))
}

/// Settings are stored as a `(kind, value)` text pair.
pub(crate) fn encode_setting(value: &SettingValue) -> (&'static str, String) {
    match value {
        SettingValue::Text(s) => ("text", s.clone()),
        SettingValue::Number(n) => ("number", n.to_string()),
        SettingValue::Bool(b) => ("bool", b.to_string()),
    }
}

pub(crate) fn decode_setting(kind: &str, value: String) -> Result<SettingValue, StorageError> {
    match kind {
        "text" => Ok(SettingValue::Text(value)),
        "number" => value
            .parse::<f64>()
            .map(SettingValue::Number)
            .map_err(|_| StorageError::Serialization(format!("invalid number setting: {value}"))),
        "bool" => match value.as_str() {
            "true" => Ok(SettingValue::Bool(true)),
            "false" => Ok(SettingValue::Bool(false)),
            _ => Err(StorageError::Serialization(format!(
                "invalid bool setting: {value}"
            ))),
        },
        other => Err(StorageError::Serialization(format!(
            "invalid setting kind: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_encoding_survives_falsy_values() {
        for value in [
            SettingValue::Text(String::new()),
            SettingValue::Number(0.0),
            SettingValue::Number(-2.5),
            SettingValue::Bool(false),
        ] {
            let (kind, raw) = encode_setting(&value);
            assert_eq!(decode_setting(kind, raw).unwrap(), value);
        }
    }

    #[test]
    fn corrupt_setting_rows_are_serialization_errors() {
        assert!(matches!(
            decode_setting("bool", "yes".into()),
            Err(StorageError::Serialization(_))
        ));
        assert!(matches!(
            decode_setting("blob", "x".into()),
            Err(StorageError::Serialization(_))
        ));
    }
}
