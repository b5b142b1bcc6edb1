pub mod auth;
pub mod booking;
pub mod chat;
pub mod config;
pub mod gateway;
pub mod home;
pub mod jobs;
pub mod meets;
pub mod models;
pub mod profile;
pub mod res;
pub mod reviews;
pub mod session;
pub mod validate;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: config::Config,
    pub gateway: gateway::Gateway,
}

pub type AppResult<T> = Result<T, AppError>;
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("{}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}\n\n{}", self.0, self.0.backtrace()),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
