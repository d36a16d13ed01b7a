use eks_demo_dashboard::launcher::{self, LaunchConfig, LaunchError};
use eks_demo_dashboard::utils;

fn main() -> Result<(), LaunchError> {
    dotenv::dotenv().ok();
    utils::init_tracing();

    // Only returns when the config is invalid or the hand-off fails
    Err(launcher::launch(LaunchConfig::from_env()))
}
