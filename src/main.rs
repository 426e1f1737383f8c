use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use interview_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        // Dashboard feed: drain the push bus so every state transition is
        // visible in the logs even with no realtime client attached.
        let mut events = app_state.notification_service.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        info!(event = %event.event_type, payload = %event.payload, "interview event");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event subscriber lagged");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let interview_api = Router::new()
        .route(
            "/api/interview/start",
            post(routes::interview::start_interview),
        )
        .route(
            "/api/interview/submit-answer",
            post(routes::interview::submit_answer),
        )
        .route(
            "/api/interview/session/:id",
            get(routes::interview::get_session),
        )
        .route(
            "/api/interview/end-session",
            post(routes::interview::end_session),
        )
        .route(
            "/api/candidate/analyze-resume",
            post(routes::candidate_routes::analyze_resume),
        )
        .layer(axum::middleware::from_fn(
            interview_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            interview_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            interview_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(interview_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
