//! Shieldrec command-line entrypoint.

use anyhow::Context;
use clap::{Parser, Subcommand};

use shieldrec::config::Config;
use shieldrec::evaluation::DEFAULT_PRECISION_K;
use shieldrec::{Recommender, UserId};

#[derive(Parser)]
#[command(name = "shieldrec")]
#[command(about = "Hybrid recommender for anti-scam training modules")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print ranked recommendations for a user as JSON
    Recommend {
        /// Registered user id
        user_id: UserId,

        /// List length (defaults to SHIELDREC_TOP_N)
        top_n: Option<usize>,
    },

    /// Score the configured predictor against the rating log
    Evaluate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        data_path = %config.data_path.display(),
        predictor = %config.predictor,
        collaborative_weight = config.collaborative_weight,
        "Shieldrec starting"
    );

    let recommender = tokio::task::spawn_blocking(move || Recommender::from_config(&config))
        .await
        .context("startup task panicked")??;

    match cli.command {
        Commands::Recommend { user_id, top_n } => {
            let set = recommender.recommend(user_id, top_n)?;
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
        Commands::Evaluate => {
            let metrics = tokio::task::spawn_blocking(move || {
                recommender.evaluate(Some(DEFAULT_PRECISION_K))
            })
            .await
            .context("evaluation task panicked")??;
            println!("{metrics}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from(["shieldrec", "recommend", "12", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Recommend {
                user_id: 12,
                top_n: Some(3)
            }
        ));

        let cli = Cli::try_parse_from(["shieldrec", "recommend", "12"]).unwrap();
        assert!(matches!(cli.command, Commands::Recommend { top_n: None, .. }));
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::try_parse_from(["shieldrec", "evaluate"]).unwrap();
        assert!(matches!(cli.command, Commands::Evaluate));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Cli::try_parse_from(["shieldrec"]).is_err());
        assert!(Cli::try_parse_from(["shieldrec", "serve"]).is_err());
        assert!(Cli::try_parse_from(["shieldrec", "recommend"]).is_err());
        assert!(Cli::try_parse_from(["shieldrec", "recommend", "abc"]).is_err());
        assert!(Cli::try_parse_from(["shieldrec", "recommend", "1", "-2"]).is_err());
    }
}
