use clap::Parser;
use rolegate::{
    app_state::AppState, http::setup_http_server, init_telemetry, settings::config::Settings,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rolegate")]
#[command(about = "Posts and accounts behind a three-role authorization model")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Start the rolegate server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config) = cli.command {
        let app_state = AppState::new_for_config_only()?;
        println!("{:#?}", &app_state.settings);
        return Ok(());
    }

    let settings = Settings::new()?;
    init_telemetry::init_telemetry_and_tracing(&settings)?;

    let app_state = AppState::new(settings).await?;
    let handle = setup_http_server(app_state.clone(), &app_state.settings.api.bind_address).await?;

    match handle.await {
        Ok(Ok(())) => info!("All tasks are done"),
        Ok(Err(e)) => {
            error!("HTTP server failed: {:#}", e);
            return Err(e);
        }
        Err(e) => {
            error!("HTTP server task panicked: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
