//! The page shown when the server cannot produce the dashboard.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 500 page with a short explanation and a hint for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalServerError {
    pub description: &'static str,
    pub fix: &'static str,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs.",
        }
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let page = error_view("Internal Server Error", "500", self.description, self.fix);

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
