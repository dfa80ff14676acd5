//! Map domain errors onto GraphQL errors.
//!
//! Each error carries `extensions.code`, an `extensions.http.status` hint and
//! the active `extensions.traceId`. Internal failures are logged and their
//! messages redacted.

use async_graphql::{Error as GraphqlError, ErrorExtensions, value};
use tracing::error;

use crate::domain::{Error, ErrorCode, IdValidationError, TraceId};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// GraphQL code and HTTP status hint for a domain error code.
#[must_use]
pub fn classify(code: ErrorCode) -> (&'static str, i32) {
    match code {
        ErrorCode::InvalidRequest => ("BAD_USER_INPUT", 400),
        ErrorCode::Unauthorized => ("UNAUTHENTICATED", 401),
        ErrorCode::Forbidden => ("FORBIDDEN", 403),
        ErrorCode::NotFound => ("NOT_FOUND", 404),
        ErrorCode::Conflict => ("CONFLICT", 409),
        ErrorCode::ServiceUnavailable => ("SERVICE_UNAVAILABLE", 503),
        ErrorCode::InternalError => ("INTERNAL_SERVER_ERROR", 500),
    }
}

/// Convert a domain error for the GraphQL response.
///
/// # Examples
/// ```
/// use scribe::domain::Error;
/// use scribe::inbound::graphql::graphql_error;
///
/// let err = graphql_error(Error::forbidden("Not the owner"));
/// assert_eq!(err.message, "Not the owner");
/// ```
#[must_use]
pub fn graphql_error(err: Error) -> GraphqlError {
    let (code, status) = classify(err.code());
    let message = if err.code() == ErrorCode::InternalError {
        error!(detail = err.message(), "internal error while resolving");
        INTERNAL_MESSAGE.to_owned()
    } else {
        err.message().to_owned()
    };
    let trace_id = err
        .trace_id()
        .map(str::to_owned)
        .or_else(|| TraceId::current().map(|id| id.to_string()));

    GraphqlError::new(message).extend_with(|_, extensions| {
        extensions.set("code", code.to_owned());
        extensions.set("http", value!({ "status": status }));
        if let Some(trace_id) = &trace_id {
            extensions.set("traceId", trace_id.clone());
        }
    })
}

/// Reject a client-supplied identifier.
pub(crate) fn invalid_id(err: IdValidationError) -> GraphqlError {
    graphql_error(Error::invalid_request(err.to_string()))
}
