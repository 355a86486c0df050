use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pantry_ai::SuggestionError;
use pantry_core::ItemId;
use pantry_inventory::MutationError;

pub fn mutation_error_to_response(err: MutationError) -> axum::response::Response {
    match err {
        MutationError::Validation(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        MutationError::Store(e) => json_error(StatusCode::BAD_GATEWAY, "store_error", e.to_string()),
    }
}

pub fn suggestion_error_to_response(err: SuggestionError) -> axum::response::Response {
    (
        StatusCode::BAD_GATEWAY,
        axum::Json(json!({
            "error": "suggestion_error",
            "kind": err.kind,
            "message": err.to_string(),
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_item_id(raw: &str) -> Result<ItemId, axum::response::Response> {
    raw.parse()
        .map_err(|e: pantry_core::ValidationError| json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
