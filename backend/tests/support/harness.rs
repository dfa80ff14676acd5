//! Full-stack harness: actix app plus GraphQL schema over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use scribe::Trace;
use scribe::domain::ports::{CredentialHasher, TokenService};
use scribe::domain::{
    ArticleService, AuthService, CommentService, LikeService, TokenVerifier, UsersService,
};
use scribe::inbound::graphql::{GraphqlServices, build_schema};
use scribe::inbound::http::{GraphqlState, graphql_endpoint};
use scribe::outbound::security::JwtTokenService;
use scribe::test_support::{FixedClock, MemoryStore, PlaintextHasher, TEST_JWT_SECRET};

pub const PASSWORD: &str = "correct-horse";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0)
        .single()
        .expect("valid start time")
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
    state: web::Data<GraphqlState>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(start_time()));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(TEST_JWT_SECRET));
        let hasher: Arc<dyn CredentialHasher> = Arc::new(PlaintextHasher);

        let articles = Arc::new(ArticleService::new(
            store.clone(),
            store.clone(),
            shared_clock.clone(),
        ));
        let comments = Arc::new(CommentService::new(
            store.clone(),
            store.clone(),
            shared_clock.clone(),
        ));
        let likes = Arc::new(LikeService::new(
            store.clone(),
            store.clone(),
            shared_clock.clone(),
        ));
        let services = GraphqlServices {
            auth: Arc::new(AuthService::new(
                store.clone(),
                store.clone(),
                hasher,
                tokens.clone(),
                shared_clock.clone(),
            )),
            users: Arc::new(UsersService::new(store.clone())),
            articles: articles.clone(),
            articles_query: articles,
            comments: comments.clone(),
            comments_query: comments,
            likes: likes.clone(),
            likes_query: likes,
            response_delay: None,
        };
        let state = GraphqlState::new(
            build_schema(services),
            Arc::new(TokenVerifier::new(tokens, shared_clock)),
        );

        Self {
            store,
            clock,
            state: web::Data::new(state),
        }
    }

    /// Shared handle on the GraphQL state for [`app`].
    pub fn state(&self) -> web::Data<GraphqlState> {
        self.state.clone()
    }
}

/// Actix app serving `/graphql` over `state`. Owns everything it captures.
pub fn app(
    state: web::Data<GraphqlState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .service(graphql_endpoint)
}

/// Build a `POST /graphql` request.
pub fn graphql_request(query: &str, variables: Value, token: Option<&str>) -> Request {
    let mut req = test::TestRequest::post()
        .uri("/graphql")
        .set_json(json!({ "query": query, "variables": variables }));
    if let Some(token) = token {
        req = req.insert_header((AUTHORIZATION, format!("Bearer {token}")));
    }
    req.to_request()
}

/// Execute an operation and return the JSON response body.
pub async fn execute<S, B>(app: &S, query: &str, variables: Value, token: Option<&str>) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    test::call_and_read_body_json(app, graphql_request(query, variables, token)).await
}

/// `extensions.code` of the first error.
pub fn error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}

/// `message` of the first error.
pub fn error_message(body: &Value) -> Option<&str> {
    body["errors"][0]["message"].as_str()
}

pub struct Session {
    pub user_id: i64,
    pub token: String,
    pub refresh_token: String,
}

const REGISTER: &str = r#"
    mutation Register($email: String!, $password: String!, $name: String!) {
        register(email: $email, password: $password, name: $name) {
            token
            refreshToken
            user { id email name }
        }
    }
"#;

/// Register a user and return its tokens.
pub async fn register<S, B>(app: &S, email: &str, name: &str) -> Session
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = execute(
        app,
        REGISTER,
        json!({ "email": email, "password": PASSWORD, "name": name }),
        None,
    )
    .await;
    assert!(body["errors"].is_null(), "register failed: {body}");
    let payload = &body["data"]["register"];
    Session {
        user_id: payload["user"]["id"].as_i64().expect("user id"),
        token: payload["token"].as_str().expect("access token").to_owned(),
        refresh_token: payload["refreshToken"]
            .as_str()
            .expect("refresh token")
            .to_owned(),
    }
}

const CREATE_ARTICLE: &str = r#"
    mutation Create($title: String!, $content: String!) {
        createArticle(title: $title, content: $content) { id }
    }
"#;

/// Create an article as `token` and return its id.
pub async fn create_article<S, B>(app: &S, token: &str, title: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let body = execute(
        app,
        CREATE_ARTICLE,
        json!({ "title": title, "content": format!("{title} content") }),
        Some(token),
    )
    .await;
    assert!(body["errors"].is_null(), "createArticle failed: {body}");
    body["data"]["createArticle"]["id"]
        .as_i64()
        .expect("article id")
}
