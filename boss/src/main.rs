//! Boss battle terminal frontend.
//!
//! Answer trivia questions on a topic of your choice before the boss wears
//! you down.
//!
//! ```bash
//! cargo run -p boss -- --topic "Marine Biology" --time-limit 15
//! ```

mod display;
mod headless;

use anyhow::Context;
use boss_core::{Battle, BattleSettings, OracleConfig};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use headless::{run_headless, HeadlessOptions};

#[derive(Parser, Debug)]
#[command(version, about = "Battle an AI boss by answering trivia questions")]
struct Cli {
    /// Subject the boss will quiz you on
    #[arg(short, long, default_value = "Physics")]
    topic: String,

    /// Seconds per question (5-30)
    #[arg(long, default_value_t = 10)]
    time_limit: u64,

    /// Damage you deal on a correct answer (1-50)
    #[arg(long, default_value_t = 10)]
    player_damage: u32,

    /// Damage the boss deals on a miss or timeout (1-50)
    #[arg(long, default_value_t = 15)]
    boss_damage: u32,

    /// Claude model to use (overrides BOSS_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Seconds to wait for the model before falling back (overrides BOSS_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Show boss dialogue without glitch effects
    #[arg(long)]
    no_distortion: bool,
}

impl Cli {
    fn settings(&self) -> BattleSettings {
        BattleSettings::new()
            .with_time_limit_secs(self.time_limit)
            .with_player_damage(self.player_damage)
            .with_boss_damage(self.boss_damage)
    }

    fn oracle_config(&self) -> OracleConfig {
        let mut config = OracleConfig::from_env();
        if let Some(ref model) = self.model {
            config = config.with_model(model);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs.max(1)));
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boss=info,boss_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let battle = Battle::from_env(cli.oracle_config())
        .context("could not create the boss (set ANTHROPIC_API_KEY in a .env file or with: export ANTHROPIC_API_KEY=your_key_here)")?;

    let options = HeadlessOptions {
        topic: cli.topic.clone(),
        settings: cli.settings(),
        distortion: !cli.no_distortion,
    };

    tracing::info!(topic = %options.topic, "starting boss battle");
    run_headless(battle, options).await
}
