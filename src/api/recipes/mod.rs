//! Recipe API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/recipe/recipes", get(handler::list).post(handler::create))
        .route(
            "/recipe/recipes/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .patch(handler::patch)
                .delete(handler::delete),
        )
        .route("/recipe/recipes/{id}/upload-image", post(handler::upload_image))
        .route("/recipe/recipes/{id}/get-aggregateData", get(handler::aggregate))
}
