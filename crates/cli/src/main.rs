use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use server::{Config, Environment};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_env = Environment::from_str(&env::var("APP_ENV").unwrap_or_default());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()?;
    let data_path = env::var("DATA_PATH")
        .unwrap_or_else(|_| app_env.default_data_path().to_string_lossy().to_string());

    let fetch_concurrency: usize = env::var("FETCH_CONCURRENCY")
        .unwrap_or_else(|_| "10".to_string())
        .parse()?;
    if fetch_concurrency == 0 {
        return Err("FETCH_CONCURRENCY must be at least 1".into());
    }

    let fetch_interval_seconds: u64 = env::var("FETCH_INTERVAL_SECONDS")
        .unwrap_or_else(|_| "60".to_string())
        .parse()?;
    if fetch_interval_seconds == 0 {
        return Err("FETCH_INTERVAL_SECONDS must be at least 1".into());
    }

    let config = Config::new(
        app_env,
        &data_path,
        fetch_concurrency,
        Duration::from_secs(fetch_interval_seconds),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    server::run_server(addr, config).await
}
