//! Request extractors that reject with the usual `{ "message" }` body
//!
//! axum's own `Json`, `Path` and `Query` reject with plain text and a 415 or
//! 422 status. These wrappers turn every rejection into a 400 validation
//! error and log the detail.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ServiceError;

/// JSON request body
pub struct JsonBody<T>(pub T);

/// Path parameters
pub struct PathParams<T>(pub T);

/// Query string parameters
pub struct QueryParams<T>(pub T);

fn json_rejected(rejection: JsonRejection) -> ServiceError {
    debug!(detail = %rejection.body_text(), "rejected JSON body");
    let message = match rejection {
        JsonRejection::JsonSyntaxError(_) => "El cuerpo de la solicitud no es JSON válido.",
        JsonRejection::MissingJsonContentType(_) => "Se esperaba un cuerpo JSON.",
        _ => "Los datos de la solicitud no son válidos.",
    };
    ServiceError::validation(message)
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(json_rejected)
    }
}

impl<S, T> FromRequestParts<S> for PathParams<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| Self(value))
            .map_err(|rejection: PathRejection| {
                debug!(detail = %rejection.body_text(), "rejected path");
                ServiceError::validation("Parámetro de ruta no válido.")
            })
    }
}

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection: QueryRejection| {
                debug!(detail = %rejection.body_text(), "rejected query");
                ServiceError::validation("Parámetros de consulta no válidos.")
            })
    }
}
