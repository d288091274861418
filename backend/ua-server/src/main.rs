use ua_server::{AppState, ServerError, ServerResult, build_router, logger};

use ua_auth::{
    CredentialHasher, GoogleIdTokenVerifier, GoogleVerifierConfig, IdentityVerifier, TokenConfig,
    TokenService, system_clock,
};
use ua_config::{Config, ConfigError};
use ua_core::UserDirectory;
use ua_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerResult<()> {
    // A missing .env is normal outside development
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting ua-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = ua_db::connect(&database_path, config.database.max_connections).await?;

    let directory: Arc<dyn UserDirectory> = Arc::new(UserRepository::new(pool.clone()));
    let clock = system_clock();

    let tokens = Arc::new(TokenService::new(clock.clone(), &token_config(&config)?));
    let hasher = CredentialHasher::new(config.password.bcrypt_cost);

    let verifier: Option<Arc<dyn IdentityVerifier>> = match config.oauth.google_client_id {
        Some(ref client_id) if config.oauth.is_enabled() => {
            info!("Google sign-in enabled");
            let verifier_config = GoogleVerifierConfig {
                issuers: config.oauth.issuers.clone(),
                jwks_url: config.oauth.jwks_url.clone(),
                jwks_cache_ttl: Duration::from_secs(config.oauth.jwks_cache_ttl_secs),
                http_timeout: Duration::from_secs(config.oauth.jwks_timeout_secs),
                ..GoogleVerifierConfig::new(client_id.clone())
            };
            Some(Arc::new(GoogleIdTokenVerifier::new(verifier_config, clock)))
        }
        _ => {
            warn!("Google sign-in DISABLED - oauth.google_client_id is not set");
            None
        }
    };

    let app_state = AppState::new(directory, tokens, hasher, verifier)?.with_pool(pool);
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// `validate()` has already checked the secrets; this only unwraps them.
fn token_config(config: &Config) -> ServerResult<TokenConfig> {
    let (Some(access), Some(refresh)) = (&config.auth.access_secret, &config.auth.refresh_secret)
    else {
        return Err(ServerError::Config(ConfigError::auth(
            "access_secret and refresh_secret are required",
        )));
    };

    Ok(TokenConfig::new(
        access.clone(),
        refresh.clone(),
        config.auth.access_token_ttl_secs,
        config.auth.refresh_token_ttl_secs,
    ))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
