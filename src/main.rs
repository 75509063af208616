use balachka::cli::{Cli, Commands};
use balachka::logger::Logger;
use balachka::{account, api, auth};
use clap::Parser;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let state = match auth::AuthState::load() {
        Ok(state) => state,
        Err(e) => {
            Logger::warn(format!(
                "Не вдалося прочитати збережену сесію ({}), продовжуємо без неї.",
                e
            ));
            auth::AuthState::default()
        }
    };

    // Flag beats env var beats whatever the last login stored.
    let base_url = cli
        .api_url
        .clone()
        .or_else(|| std::env::var("BALACHKA_API_URL").ok())
        .or_else(|| state.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let mut api = api::ApiClient::new(&base_url)?.with_token(state.token);

    match &cli.command {
        Commands::Register => account::register(&api).await?,
        Commands::Login => account::login(&mut api).await?,
        Commands::Logout => account::logout(&mut api)?,
        Commands::Whoami => account::whoami(&mut api).await?,
        Commands::Profile => account::update_profile(&mut api).await?,
    }

    Ok(())
}
