/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → 依存生成 (store, IdCodec, TokenService) → Router 組み立て
 * - Middleware の適用 (bearer 抽出 / request-id / trace / body limit / CORS)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health, handlers::unknown::unknown_endpoint};
use crate::config::Config;
use crate::middleware;
use crate::repos::{BlogRepo, MemoryStore, PgBlogRepo, PgUserRepo, UserRepo};
use crate::services::{auth::build_token_service, id_codec::IdCodec};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bloglist=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get lost
        // when stderr is hidden by the process launcher.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default behavior, the server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = middleware::cors::apply(build_router(state), &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds process-level services once and injects them into the shared state.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)
        .context("invalid SQIDS configuration")?;
    let tokens = build_token_service(config);

    let (users, blogs): (Arc<dyn UserRepo>, Arc<dyn BlogRepo>) = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await
                .context("failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to run database migrations")?;
            tracing::info!("connected to database");

            let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
            let blogs: Arc<dyn BlogRepo> = Arc::new(PgBlogRepo::new(pool));
            (users, blogs)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            let store = Arc::new(MemoryStore::new());
            let users: Arc<dyn UserRepo> = store.clone();
            let blogs: Arc<dyn BlogRepo> = store;
            (users, blogs)
        }
    };

    Ok(AppState::new(users, blogs, id_codec, tokens))
}

/// Full router minus CORS (which depends on deployment config).
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes(state.clone()))
        .fallback(unknown_endpoint);

    let router = middleware::auth::bearer::apply(router).with_state(state);

    middleware::http::apply(router)
}
