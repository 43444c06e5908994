//! Snippet HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use snipbin_core::models::snippet::{
    is_valid_snippet_id, SaveSnippetResponse, SnippetFields, SnippetView, BODY_FIELD, MODE_FIELD,
    NAME_FIELD,
};

fn malformed_form(err: MultipartError) -> HttpError {
    tracing::info!("Failed to parse multipart form: {}", err);
    match err.status() {
        StatusCode::PAYLOAD_TOO_LARGE => {
            HttpError::new(StatusCode::PAYLOAD_TOO_LARGE, "Snippet is too large")
        }
        _ => HttpError::new(StatusCode::BAD_REQUEST, "Got malformed form data"),
    }
}

/// Pull `snippetName`, `snippetText` and `mode` out of a multipart form.
///
/// Unknown fields are skipped; the first occurrence of a repeated field wins.
async fn read_snippet_fields(mut multipart: Multipart) -> Result<SnippetFields, HttpError> {
    let mut fields = SnippetFields::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed_form)? {
        let slot = match field.name() {
            Some(NAME_FIELD) => &mut fields.name,
            Some(BODY_FIELD) => &mut fields.body,
            Some(MODE_FIELD) => &mut fields.mode,
            _ => continue,
        };
        let value = field.text().await.map_err(malformed_form)?;
        if slot.is_none() {
            *slot = Some(value);
        }
    }
    Ok(fields)
}

/// Validate and store a new snippet submitted as a multipart form.
///
/// # Returns
/// `{"snippetId": "<id>"}` on success.
///
/// # Errors
/// 400 for malformed forms and validation failures, 500 for id generation
/// and storage failures.
pub async fn save_snippet(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SaveSnippetResponse>, HttpError> {
    let multipart = multipart.map_err(|rejection| {
        tracing::info!("Rejected save request: {}", rejection);
        HttpError::new(StatusCode::BAD_REQUEST, "Got malformed form data")
    })?;
    let fields = read_snippet_fields(multipart).await?;

    let snippet = state.factory.create(fields)?;
    tracing::info!(snippet_id = %snippet.id, "Snippet created");

    state.store.save(&snippet)?;
    tracing::info!(snippet_id = %snippet.id, "Snippet saved to storage");

    Ok(Json(SaveSnippetResponse {
        snippet_id: snippet.id,
    }))
}

/// Fetch a live snippet by id.
///
/// Ids that are not 32 lowercase hex characters are answered with 404
/// without consulting the store.
///
/// # Errors
/// 404 when the id is malformed, unknown or expired; 500 on storage failures.
pub async fn view_snippet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SnippetView>, HttpError> {
    if !is_valid_snippet_id(&id) {
        return Err(HttpError::not_found());
    }
    let snippet = state.store.get(&id)?;
    tracing::debug!(snippet_id = %id, "Retrieved snippet");
    Ok(Json(SnippetView::from(&snippet)))
}
