use anyhow::{Context, Result};
use comfort_sim::config::Config;
use comfort_sim::domain::EnvironmentStore;
use comfort_sim::pipeline::Analysis;
use comfort_sim::telemetry::init_tracing;
use tracing::info;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    let mut env = EnvironmentStore::new();
    for source in &cfg.environment.parameters {
        env.load_parameter(&source.name, &source.path)
            .with_context(|| format!("loading {} from {}", source.name, source.path.display()))?;
    }
    info!(parameters = ?env.list_parameters(), "environment loaded");

    // No comfort model is linked into the binary; predictions come from
    // `comfort.prediction_path`.
    Analysis::new(&cfg)
        .run(&env)
        .with_context(|| format!("analysis into {}", cfg.export.directory.display()))?;
    Ok(())
}
