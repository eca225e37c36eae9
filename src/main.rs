use dotenvy::dotenv;
use restaurant_api::config::Settings;
use restaurant_api::{build_server, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(std::io::Error::other)?;
    let state = AppState::from_settings(&settings).map_err(std::io::Error::other)?;

    log::info!(
        "Starting server at http://{}:{} with {} dishes and {} orders",
        settings.host,
        settings.port,
        state.dishes.len(),
        state.orders.len()
    );

    build_server(state, &settings.host, settings.port)?.await
}
