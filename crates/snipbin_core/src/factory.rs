//! Snippet construction: validates raw fields and produces a fully
//! populated, immutable [`Snippet`].

use crate::error::{AppError, ValidationError};
use crate::models::snippet::{Mode, Snippet, SnippetFields, BODY_FIELD, MODE_FIELD};
use crate::naming;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;
use uuid::Builder;

/// Stateless snippet builder configured with the advisory retention.
#[derive(Debug, Clone)]
pub struct SnippetFactory {
    retention: Duration,
}

impl SnippetFactory {
    /// Build a factory whose snippets advertise `timeCreated + retention`
    /// as their expiry.
    pub fn new(retention: Duration) -> Self {
        Self { retention }
    }

    /// Validate `fields` and create a snippet stamped with the current time.
    ///
    /// # Errors
    /// - [`AppError::Validation`] when `body` or `mode` is missing, the body
    ///   is empty, or the mode is not supported (checked in that order).
    /// - [`AppError::Generation`] when the id cannot be generated.
    pub fn create(&self, fields: SnippetFields) -> Result<Snippet, AppError> {
        self.create_at(fields, Utc::now())
    }

    /// Same as [`Self::create`] with an explicit creation time.
    pub fn create_at(
        &self,
        fields: SnippetFields,
        created_at: DateTime<Utc>,
    ) -> Result<Snippet, AppError> {
        let SnippetFields { name, body, mode } = fields;
        let body = body.ok_or(ValidationError::MissingField(BODY_FIELD))?;
        let mode = mode.ok_or(ValidationError::MissingField(MODE_FIELD))?;

        // Code points, not bytes.
        if body.chars().next().is_none() {
            return Err(ValidationError::EmptyBody.into());
        }
        let mode: Mode = mode
            .parse()
            .map_err(|_| ValidationError::UnsupportedMode(mode.clone()))?;

        let id = generate_snippet_id()?;
        let time_created = created_at.timestamp();
        let retention_secs = i64::try_from(self.retention.as_secs()).unwrap_or(i64::MAX);

        Ok(Snippet {
            id,
            name: naming::resolve_name(name, created_at),
            body,
            mode,
            time_created,
            time_expired: time_created.saturating_add(retention_secs),
            user_id: String::new(),
        })
    }
}

/// Generate a random v4 uuid rendered as 32 lowercase hex characters.
///
/// # Errors
/// Returns [`AppError::Generation`] when the OS entropy source fails.
pub fn generate_snippet_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes).map_err(|err| {
        tracing::error!("Failed to read entropy for snippet id: {}", err);
        AppError::Generation(err.to_string())
    })?;
    let uuid = Builder::from_random_bytes(bytes).into_uuid();
    Ok(uuid.simple().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snippet::is_valid_snippet_id;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn fields(name: Option<&str>, body: Option<&str>, mode: Option<&str>) -> SnippetFields {
        SnippetFields {
            name: name.map(str::to_string),
            body: body.map(str::to_string),
            mode: mode.map(str::to_string),
        }
    }

    fn factory() -> SnippetFactory {
        SnippetFactory::new(Duration::from_secs(3_600))
    }

    fn validation_error(result: Result<Snippet, AppError>) -> ValidationError {
        match result {
            Err(AppError::Validation(err)) => err,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_populates_every_field() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let snippet = factory()
            .create_at(fields(Some("greeting"), Some("fn main() {}"), Some("rust")), at)
            .expect("valid snippet");

        assert!(is_valid_snippet_id(&snippet.id), "id: {}", snippet.id);
        assert_eq!(snippet.name, "greeting");
        assert_eq!(snippet.body, "fn main() {}");
        assert_eq!(snippet.mode, Mode::Rust);
        assert_eq!(snippet.time_created, at.timestamp());
        assert_eq!(snippet.time_expired, at.timestamp() + 3_600);
        assert!(snippet.user_id.is_empty());
    }

    #[test]
    fn create_generates_distinct_v4_ids() {
        let factory = factory();
        let mut seen = HashSet::new();
        for _ in 0..256 {
            let snippet = factory
                .create(fields(None, Some("x"), Some("text")))
                .expect("valid snippet");
            // Version nibble sits at hex offset 12, variant at offset 16.
            assert_eq!(&snippet.id[12..13], "4");
            assert!(matches!(&snippet.id[16..17], "8" | "9" | "a" | "b"));
            assert!(seen.insert(snippet.id), "duplicate id generated");
        }
    }

    #[test]
    fn create_requires_body_then_mode() {
        let factory = factory();
        assert_eq!(
            validation_error(factory.create(fields(Some("n"), None, None))),
            ValidationError::MissingField("snippetText")
        );
        assert_eq!(
            validation_error(factory.create(fields(Some("n"), Some("x"), None))),
            ValidationError::MissingField("mode")
        );
    }

    #[test]
    fn create_rejects_empty_body_before_checking_mode() {
        assert_eq!(
            validation_error(factory().create(fields(None, Some(""), Some("cobol")))),
            ValidationError::EmptyBody
        );
    }

    #[test]
    fn create_counts_code_points_not_visible_width() {
        // A lone zero-width space is one code point and therefore not empty.
        let snippet = factory()
            .create(fields(None, Some("\u{200B}"), Some("text")))
            .expect("zero-width body is not empty");
        assert_eq!(snippet.body.chars().count(), 1);
    }

    #[test]
    fn create_rejects_unsupported_mode() {
        assert_eq!(
            validation_error(factory().create(fields(
                Some("valid"),
                Some("valid body"),
                Some("unsupported-lang")
            ))),
            ValidationError::UnsupportedMode("unsupported-lang".to_string())
        );
    }

    #[test]
    fn create_synthesizes_name_when_missing_or_empty() {
        let factory = factory();
        for name in [None, Some("")] {
            let snippet = factory
                .create(fields(name, Some("body"), Some("python")))
                .expect("valid snippet");
            assert!(snippet.name.contains("Snippet created at"), "{}", snippet.name);
        }
    }
}
