use anyhow::Context;
use axum::Router;
use storage::Database;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod config;
mod error;
mod features;
mod middleware;
mod state;

use auth::tokens::TokenIssuer;
use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::user_sign_in,
        features::auth::handlers::admin_sign_in,
        features::users::handlers::get_me,
        features::users::handlers::list_users,
        features::users::handlers::get_user,
        features::users::handlers::create_user,
        features::users::handlers::update_me,
        features::users::handlers::delete_user,
        features::score_history::handlers::list_history,
        features::score_history::handlers::list_my_history,
        features::score_history::handlers::create_history,
        features::score_history::handlers::delete_history,
        features::score_info::handlers::get_ranking,
        features::summary::handlers::all_summary,
    ),
    components(
        schemas(
            storage::dto::auth::UserLoginRequest,
            storage::dto::auth::AdminLoginRequest,
            storage::dto::auth::AuthToken,
            storage::dto::auth::AdminResponse,
            storage::dto::auth::UserSignInResponse,
            storage::dto::auth::AdminSignInResponse,
            storage::dto::common::Meta,
            storage::dto::user::UserCreateRequest,
            storage::dto::user::UserUpdateRequest,
            storage::dto::user::UserDetailResponse,
            storage::dto::score_history::ScoreHistoryCreateRequest,
            storage::dto::score_history::ScoreHistoryDetailResponse,
            storage::dto::score_info::RankingEntry,
            storage::dto::summary::SummaryResponse,
            storage::models::User,
            storage::models::UserScoreInfo,
            storage::models::UserScoreHistory,
        )
    ),
    tags(
        (name = "auth", description = "Member and admin sign-in"),
        (name = "users", description = "Member accounts"),
        (name = "score-history", description = "Exercise submissions"),
        (name = "score-info", description = "Monthly distance ranking"),
        (name = "summary", description = "Roster-wide activity totals"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting fitness tracking API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        seed_admin(&db, username, password)
            .await
            .context("Failed to provision admin account")?;
    }

    let state = AppState {
        db,
        tokens: TokenIssuer::new(&config.jwt_secret),
    };

    let app = Router::new()
        .nest("/auth", features::auth::routes::routes())
        .nest("/user", features::users::routes::routes(state.clone()))
        .nest(
            "/user-score-history",
            features::score_history::routes::routes(state.clone()),
        )
        .nest("/user-score-info", features::score_info::routes::routes())
        .nest("/summary", features::summary::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the configured admin account on first boot. Idempotent: an
/// existing username is left untouched.
async fn seed_admin(db: &Database, username: &str, password: &str) -> anyhow::Result<()> {
    use storage::error::StorageError;
    use storage::repository::admin::AdminRepository;

    let repo = AdminRepository::new(db.pool());
    let username = username.to_lowercase();

    match repo.find_by_username(&username).await {
        Ok(_) => Ok(()),
        Err(StorageError::NotFound) => {
            let hash = auth::password::hash_password(password)
                .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?;
            repo.create(&username, &hash).await?;
            tracing::info!("Provisioned admin account '{}'", username);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
