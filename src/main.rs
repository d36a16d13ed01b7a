use clap::Parser;
use tracing::{error, info};

use eks_demo_dashboard::config::{self, Cli, Command};
use eks_demo_dashboard::server::{self, ServerConfig};
use eks_demo_dashboard::utils;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv::dotenv().ok();
    utils::init_tracing();

    let cli = Cli::parse();
    let Command::Run(args) = cli.command;

    info!("📈 Starting demo dashboard...");
    info!("   page config: {}", args.target.display());
    info!("   cors protection: {}", args.enable_cors);
    info!("   xsrf protection: {}", args.enable_xsrf_protection);
    if let Some(seed) = args.seed {
        info!("   data seed: {}", seed);
    }
    info!("");

    let page = match config::load_page_config(&args.target) {
        Ok(page) => page,
        Err(e) => {
            error!("Failed to load page config: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    if let Err(e) = server::serve(ServerConfig::from_args(&args, page)).await {
        error!("Dashboard error: {}", e);
        return std::process::ExitCode::FAILURE;
    }

    std::process::ExitCode::SUCCESS
}
