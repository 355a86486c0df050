use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
};

use pantry_inventory::{MutationError, MutationOutcome};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ItemsQuery>,
) -> axum::response::Response {
    let snapshot = services.view.snapshot();
    Json(dto::ItemsResponse::from_snapshot(&snapshot, &query.search)).into_response()
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ItemRequest>,
) -> axum::response::Response {
    let result = services
        .coordinator
        .add(&body.name, &body.quantity_text())
        .await;
    outcome_to_response(result)
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ItemRequest>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = services
        .coordinator
        .update(&id, &body.name, &body.quantity_text())
        .await;
    outcome_to_response(result)
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    outcome_to_response(services.coordinator.delete(&id).await)
}

fn outcome_to_response(result: Result<MutationOutcome, MutationError>) -> axum::response::Response {
    match result {
        Ok(outcome @ MutationOutcome::Created { .. }) => (StatusCode::CREATED, Json(outcome)).into_response(),
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::mutation_error_to_response(e),
    }
}
