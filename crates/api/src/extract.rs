//! Request extractors that reject with [`AppError`] instead of axum's
//! plain-text rejections, so every failure carries the JSON error body.

use std::ops::{Deref, DerefMut};

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use sqlx::pool::PoolConnection;
use sqlx::Sqlite;
use taskboard_db::DbConnection;

use crate::error::AppError;
use crate::state::AppState;

/// Message for request bodies that are empty or not valid JSON for the
/// operation.
pub const INVALID_BODY: &str = "Invalid request data";

/// One pooled database connection, held for the lifetime of the request.
///
/// Failure to acquire a connection rejects the request with
/// [`AppError::Unavailable`] (503) before any body parsing happens.
pub struct DbConn(pub PoolConnection<Sqlite>);

impl FromRequestParts<AppState> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .pool
            .acquire()
            .await
            .map(DbConn)
            .map_err(AppError::Unavailable)
    }
}

impl Deref for DbConn {
    type Target = DbConnection;

    fn deref(&self) -> &DbConnection {
        &self.0
    }
}

impl DerefMut for DbConn {
    fn deref_mut(&mut self) -> &mut DbConnection {
        &mut self.0
    }
}

/// A JSON request body.
///
/// Unlike [`axum::Json`] this does not require a `Content-Type` header, and
/// any decode failure maps to a 400 with [`INVALID_BODY`].
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Failed to read request body");
            AppError::BadRequest(INVALID_BODY.to_string())
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|err| {
            tracing::debug!(error = %err, "Rejected request body");
            AppError::BadRequest(INVALID_BODY.to_string())
        })
    }
}

/// Query string parameters, rejected as a JSON 400 when malformed.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::try_from_uri(&parts.uri)
            .map(|Query(params)| QueryParams(params))
            .map_err(|rejection| {
                AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
            })
    }
}
