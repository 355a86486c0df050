use axum::{
    Router,
    routing::{get, put},
};

pub mod items;
pub mod recipe;
pub mod system;

pub fn router() -> Router {
    Router::new()
        .route("/items", get(items::list_items).post(items::add_item))
        .route("/items/:id", put(items::update_item).delete(items::delete_item))
        .route("/recipe", get(recipe::get_recipe).post(recipe::refresh_recipe))
}
