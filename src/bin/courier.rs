//! courier — command runner
//!
//! Runs the bot's commands against the live APIs and prints the results as
//! JSON, one interaction log line per command.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use courier::config::{Config, Secrets};
use courier::telemetry::CommandLog;
use courier::{Courier, CourierError, HeroRole};
use serde::Serialize;
use serde_json::json;

/// Courier command runner
#[derive(Parser)]
#[command(name = "courier")]
#[command(version)]
#[command(about = "Dota 2 stats, match summaries, movie picks and AI answers")]
struct Args {
    /// Config file (default: ~/.courier/config.toml, then /etc/courier/config.toml)
    #[arg(short, long, env = "COURIER_CONFIG")]
    config: Option<PathBuf>,

    /// Name recorded in the interaction log
    #[arg(long, env = "USER", default_value = "cli")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Best heroes by public win rate
    TopHeroes {
        /// Only this role (default: every role)
        #[arg(short, long)]
        role: Option<HeroRole>,
        /// Heroes per role
        #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        count: u8,
    },

    /// Look up a hero by name
    Hero {
        /// Full or partial hero name
        name: String,
    },

    /// Summarize a match
    Match {
        /// Numeric match id
        match_id: String,
    },

    /// Ask a Dota 2 question
    Ask {
        question: String,
    },

    /// Research a question with web search
    Investigate {
        question: String,
    },

    /// Random picks among top-rated movies in theaters
    Movies {
        #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        count: u8,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::TopHeroes { .. } => "topheroes",
            Command::Hero { .. } => "hero",
            Command::Match { .. } => "match",
            Command::Ask { .. } => "ask",
            Command::Investigate { .. } => "investigate",
            Command::Movies { .. } => "movies",
        }
    }
}

/// What a command produced, before printing.
struct Outcome {
    body: serde_json::Value,
    status: u16,
    tokens: u64,
    cost: f64,
}

impl Outcome {
    fn ok(body: impl Serialize) -> Result<Self, CourierError> {
        Ok(Self {
            body: serde_json::to_value(body)?,
            status: 200,
            tokens: 0,
            cost: 0.0,
        })
    }

    fn not_found(message: String) -> Self {
        Self {
            body: json!({ "error": message }),
            status: 404,
            tokens: 0,
            cost: 0.0,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: info so the interaction log shows; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let courier = match build(args.config.as_deref()) {
        Ok(courier) => courier,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let name = args.command.name();
    let started = Instant::now();
    let result = run(&courier, args.command).await;

    let log = CommandLog::new(name, &args.user).duration(started.elapsed());
    match result {
        Ok(outcome) => {
            log.status(outcome.status)
                .usage(outcome.tokens, outcome.cost)
                .emit();
            match serde_json::to_string_pretty(&outcome.body) {
                Ok(body) => println!("{body}"),
                Err(e) => eprintln!("error: {e}"),
            }
            if outcome.status < 400 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log.status(e.status().unwrap_or(500)).emit();
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build(config_path: Option<&std::path::Path>) -> courier::Result<Courier> {
    let config = Config::load(config_path)?;
    let secrets = Secrets::load()?;
    let builder = secrets.apply(config.apply(Courier::builder()));
    builder.build()
}

async fn run(courier: &Courier, command: Command) -> courier::Result<Outcome> {
    match command {
        Command::TopHeroes { role, count } => {
            let count = usize::from(count);
            match role {
                Some(role) => Outcome::ok(courier.top_heroes_by_role(role, count).await?),
                None => {
                    let by_role: serde_json::Map<String, serde_json::Value> = courier
                        .all_roles_top(count)
                        .await?
                        .into_iter()
                        .map(|(role, heroes)| -> courier::Result<(String, serde_json::Value)> {
                            Ok((role.to_string(), serde_json::to_value(heroes)?))
                        })
                        .collect::<courier::Result<_>>()?;
                    Outcome::ok(by_role)
                }
            }
        }
        Command::Hero { name } => match courier.lookup_hero(&name).await? {
            Some(hero) => Outcome::ok(hero),
            None => Ok(Outcome::not_found(format!(
                "No hero found matching {name}. Try a different name."
            ))),
        },
        Command::Match { match_id } => {
            let report = courier.fetch_match_summary(&match_id).await?;
            if report.summary().is_some() {
                Outcome::ok(report)
            } else {
                let mut outcome = Outcome::ok(report)?;
                outcome.status = 404;
                Ok(outcome)
            }
        }
        Command::Ask { question } => {
            let answer = courier.ask(&question).await?;
            let mut outcome = Outcome::ok(&answer)?;
            outcome.tokens = answer.tokens();
            outcome.cost = answer.cost();
            Ok(outcome)
        }
        Command::Investigate { question } => {
            let answer = courier.investigate(&question).await;
            let mut outcome = Outcome::ok(&answer)?;
            outcome.tokens = answer.tokens();
            outcome.cost = answer.cost();
            Ok(outcome)
        }
        Command::Movies { count } => Outcome::ok(courier.random_top_movies(usize::from(count)).await?),
    }
}
