//! Relay error types with wire and HTTP mappings.
//!
//! [`GameError`] is the central error type. On the WebSocket side a
//! variant becomes an `error` frame sent to the offending connection
//! only; on the REST side it becomes a structured JSON error response.
//! A missing target inside a relay handler is never an error: registry
//! misses are reported as `bool`/`Option` and silently absorbed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PlayerId;
use crate::domain::game_event::{ErrorPayload, ServerEvent};

/// Structured JSON error response body.
///
/// ```json
/// { "error": { "code": 2001, "message": "player not found: ..." } }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                      |
/// |-----------|-----------------|----------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request                  |
/// | 2000–2999 | Session state   | 404 / 409 / 503                  |
/// | 3000–3999 | Server          | 500 Internal Server Error        |
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Inbound frame could not be decoded into a known event.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// No joined player with the given id.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// The connection already has a player record.
    #[error("already joined")]
    AlreadyJoined,

    /// The registry is at capacity.
    #[error("Server is full")]
    CapacityExceeded {
        /// Configured capacity that was hit.
        max_players: usize,
    },

    /// Client exceeded its input rate.
    #[error("rate limit exceeded; retry after {retry_after_ms} ms")]
    RateLimited {
        /// Milliseconds until the client may send again.
        retry_after_ms: u64,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidPayload(_) => 1001,
            Self::PlayerNotFound(_) => 2001,
            Self::AlreadyJoined => 2002,
            Self::CapacityExceeded { .. } => 2003,
            Self::RateLimited { .. } => 429,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyJoined => StatusCode::CONFLICT,
            Self::CapacityExceeded { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the `error` frame sent to a client.
    #[must_use]
    pub fn to_event(&self) -> ServerEvent {
        ServerEvent::Error(ErrorPayload {
            code: self.error_code(),
            message: self.to_string(),
        })
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_matches_client_expectation() {
        let err = GameError::CapacityExceeded { max_players: 50 };
        assert_eq!(err.to_string(), "Server is full");
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn to_event_carries_code_and_message() {
        let err = GameError::AlreadyJoined;
        let ServerEvent::Error(payload) = err.to_event() else {
            panic!("expected an error event");
        };
        assert_eq!(payload.code, 2002);
        assert_eq!(payload.message, "already joined");
    }

    #[test]
    fn player_not_found_maps_to_404() {
        let response = GameError::PlayerNotFound(PlayerId::new()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn codes_are_distinct() {
        let errors = [
            GameError::InvalidPayload(String::new()),
            GameError::PlayerNotFound(PlayerId::new()),
            GameError::AlreadyJoined,
            GameError::CapacityExceeded { max_players: 1 },
            GameError::RateLimited { retry_after_ms: 1 },
            GameError::Internal(String::new()),
        ];
        let mut codes: Vec<u32> = errors.iter().map(GameError::error_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
