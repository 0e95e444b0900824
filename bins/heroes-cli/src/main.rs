use anyhow::Context;
use clap::{Parser, Subcommand};
use heroes_backend::{
    BackendConfig, CompareHeroesInput, HeroDetailInput, HeroesApp, ListHeroesInput,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Parser)]
#[command(name = "heroes-cli")]
#[command(about = "Browse, inspect and compare superheroes from the public catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,
    },
    Show {
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
    },
    Compare {
        /// Comma separated ids, e.g. `--ids 70,644`. Only the first
        /// occurrence is used when the flag is repeated.
        #[arg(long)]
        ids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = BackendConfig::from_env().context("invalid HEROES_* environment")?;
    let mut app = HeroesApp::from_config(config).context("failed to set up hero catalog")?;
    let cancel = cancel_on_ctrl_c();

    match cli.command {
        Command::List {
            query,
            page,
            page_size,
        } => {
            let output = app
                .list_heroes(
                    ListHeroesInput {
                        query,
                        page,
                        page_size,
                        refresh: false,
                    },
                    Some(&cancel),
                )
                .await
                .context("failed to list heroes")?;
            print_json(&output)
        }
        Command::Show { id } => {
            let output = app
                .hero_detail(HeroDetailInput { id }, Some(&cancel))
                .await
                .with_context(|| format!("failed to load hero {id}"))?;
            print_json(&output)
        }
        Command::Compare { ids } => {
            let output = app
                .compare_heroes(CompareHeroesInput { ids }, Some(&cancel))
                .await
                .context("failed to compare heroes")?;
            print_json(&output)
        }
    }
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    cancel
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_keeps_every_ids_occurrence_in_order() {
        let cli = Cli::try_parse_from(["heroes-cli", "compare", "--ids", "70,644", "--ids", "1"])
            .expect("compare args must parse");

        let Command::Compare { ids } = cli.command else {
            panic!("expected compare command");
        };
        assert_eq!(ids, vec!["70,644".to_string(), "1".to_string()]);
    }

    #[test]
    fn list_accepts_out_of_range_pages_for_clamping() {
        let cli = Cli::try_parse_from(["heroes-cli", "list", "--page", "-3", "--page-size", "24"])
            .expect("list args must parse");

        let Command::List {
            query,
            page,
            page_size,
        } = cli.command
        else {
            panic!("expected list command");
        };
        assert_eq!(query, None);
        assert_eq!(page, Some(-3));
        assert_eq!(page_size, Some(24));
    }
}
