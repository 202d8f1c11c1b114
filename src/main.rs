use farm_advisor::api;
use farm_advisor::config::AdvisorConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AdvisorConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    eprintln!("🌾 Farm Advisor v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat API: http://0.0.0.0:{}/api/ai/chat", config.port);
    eprintln!("   History API: http://0.0.0.0:{}/api/ai/history/{{session_id}}", config.port);
    eprintln!("   Soil API: http://0.0.0.0:{}/api/ai/soil", config.port);
    eprintln!("   Allowed origin: {}", config.client_origin);
    eprintln!(
        "   Soil grid: {0}x{0}, max upload {1} bytes",
        config.grid_size, config.max_upload_bytes
    );
    eprintln!("   Database: {}\n", config.db_path.display());

    api::serve(&config).await?;
    Ok(())
}
