use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tabula_core::{
    application::{
        ports::{
            security::{PasswordHasher, TokenManager},
            session::SessionManager,
            session_revocation::SessionRevocationStore,
            time::Clock,
        },
        resources::definition::{load_definitions, with_builtin_users},
        services::ApplicationServices,
    },
    config::{AppConfig, StorageBackend},
    domain::record::RecordRepository,
    infrastructure::{
        database,
        repositories::{InMemoryRecordRepository, PostgresRecordRepository},
        security::{
            password::Argon2PasswordHasher, redis_session_store::RedisSessionRevocationStore,
            session_manager::TokenSessionManager, session_store::InMemorySessionRevocationStore,
            token::BiscuitTokenManager,
        },
        time::SystemClock,
    },
    presentation::http::{
        routes::{RouterOptions, build_router},
        state::HttpState,
    },
};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let repo: Arc<dyn RecordRepository> = match config.storage_backend() {
        StorageBackend::Postgres => {
            let pool = database::init_pool(config.database_url()).await?;
            database::run_migrations(&pool).await?;
            Arc::new(PostgresRecordRepository::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, records are lost on exit");
            Arc::new(InMemoryRecordRepository::new())
        }
    };

    let revocations: Arc<dyn SessionRevocationStore> = match config.redis_url() {
        Some(url) => Arc::new(RedisSessionRevocationStore::from_url(url)?),
        None => Arc::new(InMemorySessionRevocationStore::new()),
    };
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let session_manager: Arc<dyn SessionManager> = Arc::new(TokenSessionManager::new(
        token_manager,
        revocations,
        config.session_expose().to_vec(),
    ));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let definitions = match config.resources_file() {
        Some(path) => load_definitions(path)
            .with_context(|| format!("loading resources from {}", path.display()))?,
        None => Vec::new(),
    };
    let definitions = with_builtin_users(definitions, config.identity(), config.users_table())?;

    let services = Arc::new(ApplicationServices::from_definitions(
        &definitions,
        repo,
        password_hasher,
        Some(session_manager),
        clock,
        config.identity().clone(),
    )?);
    for service in services.resources() {
        tracing::info!(resource = %service.name(), "mounted /api/v1/{}", service.name());
    }

    let options = RouterOptions {
        cors_mode: config.cors_mode(),
        allowed_origins: config.allowed_origins().to_vec(),
        sign_in_rate_limit: config.sign_in_rate_limit(),
    };
    let app = build_router(HttpState { services }, &options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
