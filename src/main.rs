use clap::Parser;

use recipe_api::{
    app,
    cli::{Cli, Command},
    config::AppConfig,
    state::AppState,
    user::services::create_superuser,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "recipe_api=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let state = AppState::init(config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let listener = app::bind(&state.config.host, state.config.port).await?;
            app::serve(listener, app::build_app(state)).await?;
        }
        Command::CreateSuperuser { email, password } => {
            let user = create_superuser(state.users.as_ref(), &email, &password)
                .await
                .map_err(|e| anyhow::anyhow!("create superuser: {e}"))?;
            tracing::info!(user_id = %user.id, email = %user.email, "superuser created");
        }
    }

    Ok(())
}
