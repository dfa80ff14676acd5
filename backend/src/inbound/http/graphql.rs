//! `/graphql` endpoint: bearer extraction and schema execution.

use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::debug;

use crate::domain::Viewer;
use crate::domain::ports::AccessTokenVerifier;
use crate::inbound::graphql::AppSchema;

const BEARER: &str = "bearer";
const GRAPHQL_PATH: &str = "/graphql";

/// Schema plus the verifier used to derive each request's viewer.
#[derive(Clone)]
pub struct GraphqlState {
    pub schema: AppSchema,
    pub verifier: Arc<dyn AccessTokenVerifier>,
}

impl GraphqlState {
    pub fn new(schema: AppSchema, verifier: Arc<dyn AccessTokenVerifier>) -> Self {
        Self { schema, verifier }
    }
}

/// Derive the viewer from an `Authorization: Bearer <token>` header.
///
/// A missing header is anonymous. A malformed header or a token failing
/// verification is rejected with the reason kept for later reporting.
pub fn viewer_from_headers(headers: &HeaderMap, verifier: &dyn AccessTokenVerifier) -> Viewer {
    let Some(raw) = headers.get(AUTHORIZATION) else {
        return Viewer::Anonymous;
    };
    let token = raw.to_str().ok().and_then(|value| {
        let (scheme, token) = value.trim().split_once(' ')?;
        let token = token.trim();
        (scheme.eq_ignore_ascii_case(BEARER) && !token.is_empty()).then_some(token)
    });
    let Some(token) = token else {
        return Viewer::Rejected {
            reason: "Invalid authorization header".to_owned(),
        };
    };
    match verifier.verify_access_token(token) {
        Ok(user_id) => Viewer::Authenticated(user_id),
        Err(err) => {
            debug!(reason = err.message(), "bearer token rejected");
            Viewer::Rejected {
                reason: err.message().to_owned(),
            }
        }
    }
}

/// Execute a GraphQL operation on behalf of the bearer's viewer.
#[post("/graphql")]
pub async fn graphql_endpoint(
    state: web::Data<GraphqlState>,
    req: HttpRequest,
    body: GraphQLRequest,
) -> GraphQLResponse {
    let viewer = viewer_from_headers(req.headers(), state.verifier.as_ref());
    state
        .schema
        .execute(body.into_inner().data(viewer))
        .await
        .into()
}

/// GraphiQL IDE; only mounted in debug builds.
#[get("/graphql")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}
