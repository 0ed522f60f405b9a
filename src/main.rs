use axum::{middleware::from_fn, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use contact_api::database::manager::DatabaseManager;
use contact_api::{config, handlers, middleware};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Contact API in {:?} mode", config.environment);

    DatabaseManager::migrate()
        .await
        .expect("database migration failed");

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("CONTACT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Contact API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes (token acquisition)
        .merge(user_public_routes())
        // Protected API (token authenticator + access guard)
        .merge(user_routes())
        .merge(contact_routes())
        .merge(address_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn user_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::users;

    Router::new()
        .route("/api/users", post(users::register))
        .route("/api/users/login", post(users::login))
}

fn user_routes() -> Router {
    use handlers::protected::users;

    Router::new()
        .route(
            "/api/users/current",
            get(users::current)
                .patch(users::update)
                .delete(users::logout),
        )
        .layer(from_fn(middleware::authenticate))
}

fn contact_routes() -> Router {
    use axum::routing::post;
    use handlers::protected::contacts;

    Router::new()
        .route(
            "/api/contacts",
            post(contacts::create).get(contacts::search),
        )
        .route(
            "/api/contacts/:contact_id",
            get(contacts::get)
                .put(contacts::update)
                .delete(contacts::remove),
        )
        .layer(from_fn(middleware::authenticate))
}

fn address_routes() -> Router {
    use axum::routing::post;
    use handlers::protected::addresses;

    Router::new()
        .route(
            "/api/contacts/:contact_id/addresses",
            post(addresses::create).get(addresses::list),
        )
        .route(
            "/api/contacts/:contact_id/addresses/:address_id",
            get(addresses::get)
                .put(addresses::update)
                .delete(addresses::remove),
        )
        .layer(from_fn(middleware::authenticate))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "data": {
            "name": "Contact API",
            "version": version,
            "description": "Multi-tenant contact book API with opaque-token authentication",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "register": "POST /api/users (public)",
                "login": "POST /api/users/login (public)",
                "profile": "GET|PATCH|DELETE /api/users/current (protected)",
                "contacts": "/api/contacts[/:id] (protected, owner-scoped)",
                "search": "GET /api/contacts?name&email&phone&page&size (protected)",
                "addresses": "/api/contacts/:id/addresses[/:id] (protected, owner-scoped)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "errors": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
