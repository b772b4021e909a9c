#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    io::{stdin, stdout},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use log::error;
use rand::{SeedableRng, rngs::SmallRng};
use rookie::{
    Color, GameState,
    fuzz::cross_check,
    repl::{ReplConfig, repl},
};

#[derive(Debug, Parser)]
#[command(version, about = "Play or fuzz a reduced game of chess")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play from the terminal
    Play {
        /// Position to start from
        #[arg(long)]
        fen: Option<GameState>,
        /// Side played by the bot
        #[arg(long)]
        bot: Option<Color>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Compare move generation against the `chess` crate over random games
    Fuzz {
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// Maximum plies per game
        #[arg(long, default_value_t = 200)]
        plies: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let command = Cli::parse().command.unwrap_or(Command::Play {
        fen: None,
        bot: None,
        seed: None,
    });
    match command {
        Command::Play { fen, bot, seed } => {
            let config = ReplConfig {
                start: fen.unwrap_or_default(),
                bot,
            };
            let result = repl(stdin().lock(), stdout().lock(), &config, &mut rng(seed));
            if let Err(err) = result {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        }
        Command::Fuzz {
            games,
            plies,
            seed,
        } => match cross_check(games, plies, &mut rng(seed)) {
            Ok(summary) => println!("{summary}"),
            Err(mismatch) => {
                println!("{mismatch}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
