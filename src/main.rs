use anyhow::Result;
use dental_auth::{
    application::{
        ports::{ClockPort, LoggerPort, TokenGeneratorPort, TokenVerifierPort},
        services::ApplicationServices,
    },
    config::{AppConfig, AppEnv},
    domain::token::TokenKind,
    infrastructure::{
        database,
        logging::TracingLogger,
        repositories::{
            InMemoryTokenStore, InMemoryUserStore, PostgresTokenStore, PostgresUserStore,
        },
        security::{
            password::Argon2PasswordHasher,
            token::{BiscuitKeys, BiscuitTokenIssuer, BiscuitTokenVerifier},
        },
        time::SystemClock,
        validation::RegisterParamsSchema,
    },
    presentation::http::{
        routes::{RouterOptions, build_router_with_options},
        state::HttpState,
    },
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.app_env());
    tracing::info!(env = %config.app_env(), "starting dental auth service");

    let services = Arc::new(build_services(&config).await?);
    let state = HttpState { services };

    let app = build_router_with_options(
        state,
        RouterOptions {
            allowed_origins: config.allowed_origins().to_vec(),
            rate_limit: config.rate_limit_enabled(),
        },
    );

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

/// Composition root: picks the storage backend and wires every port.
async fn build_services(config: &AppConfig) -> Result<ApplicationServices> {
    let keys = BiscuitKeys::from_private_hex(config.biscuit_private_key())?;
    let access_tokens: Arc<TokenGeneratorPort> = Arc::new(BiscuitTokenIssuer::new(
        keys.clone(),
        TokenKind::Access,
        config.access_token_ttl(),
    ));
    let refresh_tokens: Arc<TokenGeneratorPort> = Arc::new(BiscuitTokenIssuer::new(
        keys.clone(),
        TokenKind::Refresh,
        config.refresh_token_ttl(),
    ));
    let refresh_verifier: Arc<TokenVerifierPort> =
        Arc::new(BiscuitTokenVerifier::new(keys.public(), TokenKind::Refresh));

    let schema = Arc::new(RegisterParamsSchema);
    let passwords = Arc::new(Argon2PasswordHasher);
    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let logger: Arc<LoggerPort> = Arc::new(TracingLogger);

    let services = match config.database_url() {
        Some(url) => {
            let pool = database::init_pool(url).await?;
            database::run_migrations(&pool).await?;
            tracing::info!("using postgres stores");

            ApplicationServices::new(
                schema,
                Arc::new(PostgresUserStore::new(pool.clone())),
                Arc::new(PostgresTokenStore::new(pool)),
                passwords,
                access_tokens,
                refresh_tokens,
                refresh_verifier,
                clock,
                logger,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");

            ApplicationServices::new(
                schema,
                Arc::new(InMemoryUserStore::new()),
                Arc::new(InMemoryTokenStore::new()),
                passwords,
                access_tokens,
                refresh_tokens,
                refresh_verifier,
                clock,
                logger,
            )
        }
    };

    Ok(services)
}

fn init_tracing(app_env: AppEnv) {
    let default_filter = if app_env.is_production() {
        "info,tower_http=info,sqlx=warn"
    } else {
        "debug,tower_http=debug,sqlx=warn"
    };
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| default_filter.to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_ansi(!app_env.is_production()));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
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
