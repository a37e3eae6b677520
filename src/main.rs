use axum::{
    middleware::from_fn,
    routing::{get, post, put},
    Router,
};
use empleo_deportivo_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::{auth::require_bearer_auth, cors::permissive_cors, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let authed_api = Router::new()
        .route(
            "/ofertas",
            get(routes::offers::list_offers).post(routes::offers::create_offer),
        )
        .route("/ofertas/mias", get(routes::offers::list_my_offers))
        .route(
            "/ofertas/:id",
            get(routes::offers::get_offer).delete(routes::offers::delete_offer),
        )
        .route(
            "/solicitudes/ofertas/:id/solicitar",
            post(routes::applications::apply),
        )
        .route("/solicitudes", get(routes::applications::list_applications))
        .route(
            "/solicitudes/:id/responder",
            put(routes::applications::respond),
        )
        .route(
            "/notificaciones",
            get(routes::notifications::list_notifications),
        )
        .route(
            "/notificaciones/:id/leida",
            put(routes::notifications::mark_read),
        )
        .route(
            "/notificaciones/unread-count",
            get(routes::notifications::unread_count),
        )
        .route(
            "/perfil/usuarios/perfil",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .route_layer(from_fn(require_bearer_auth))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.api_rps),
            rate_limit::rps_middleware,
        ));

    let app = public_api
        .merge(authed_api)
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
