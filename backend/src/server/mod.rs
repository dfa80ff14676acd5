//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_graphql_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use actix_web::{App, HttpServer, web};

use scribe::Trace;
use scribe::domain::TRACE_ID_HEADER;
#[cfg(debug_assertions)]
use scribe::inbound::http::graphiql;
use scribe::inbound::http::{GraphqlState, HealthState, graphql_endpoint, live, ready};

const CORS_MAX_AGE_SECS: usize = 3600;

fn build_cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(["GET", "POST", "OPTIONS"])
        .allowed_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([HeaderName::from_static(TRACE_ID_HEADER)])
        .max_age(CORS_MAX_AGE_SECS);
    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    graphql_state: web::Data<GraphqlState>,
    cors_allowed_origin: Option<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        graphql_state,
        cors_allowed_origin,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(graphql_state)
        .wrap(build_cors(cors_allowed_origin.as_deref()))
        .wrap(Trace)
        .service(graphql_endpoint)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(graphiql);

    app
}

/// Construct the HTTP server and mark the service ready once bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let graphql_state = web::Data::new(build_graphql_state(&config));
    let ServerConfig {
        bind_addr,
        cors_allowed_origin,
        ..
    } = config;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            graphql_state: graphql_state.clone(),
            cors_allowed_origin: cors_allowed_origin.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
