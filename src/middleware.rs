use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Creates the complete middleware stack for the application.
/// `request_timeout` has to leave room for a round trip to the LLM provider.
pub fn create_middleware_stack(
    request_timeout: Duration,
) -> ServiceBuilder<
    tower::layer::util::Stack<
        TimeoutLayer,
        tower::layer::util::Stack<
            CorsLayer,
            tower::layer::util::Stack<
                TraceLayer<
                    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
                    DefaultMakeSpan,
                    DefaultOnRequest,
                    DefaultOnResponse,
                >,
                tower::layer::util::Identity,
            >,
        >,
    >,
> {
    ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(create_cors_layer())
        .layer(TimeoutLayer::new(request_timeout))
}

/// The browser client sends bearer tokens, so `Authorization` must be allowed.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Initialize structured JSON logging, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(true)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!("Structured logging initialized");
    Ok(())
}
