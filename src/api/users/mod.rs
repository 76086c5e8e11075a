//! User API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users/create", post(handler::create))
        .route("/users/token", post(handler::token))
        .route("/users/me", get(handler::me).patch(handler::update_me))
}
