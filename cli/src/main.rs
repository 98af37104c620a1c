use std::io;

use clap::{Parser, Subcommand};

mod mines;
mod puzzle;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Play the 15-puzzle or minesweeper in the terminal", long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Print a JSON snapshot after each command instead of the board
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand, Debug)]
enum Game {
    /// Slide tiles into order, type a tile index (0-15) to move it
    Puzzle(GameArgs),
    /// Clear a 9x9 field with 10 mines, `o <row> <col>` opens and `f <row> <col>` flags
    Mines(GameArgs),
}

#[derive(clap::Args, Debug)]
struct GameArgs {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let format = if cli.json {
        session::Format::Json
    } else {
        session::Format::Text
    };

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match cli.game {
        Game::Puzzle(args) => {
            log::debug!("seed: {:?}", args.seed);
            puzzle::run(stdin, &mut stdout, format, session::Seeds::new(args.seed))
        }
        Game::Mines(args) => {
            log::debug!("seed: {:?}", args.seed);
            mines::run(stdin, &mut stdout, format, session::Seeds::new(args.seed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_seed_and_json_after_subcommand() {
        let cli = Cli::try_parse_from(["gridgames", "mines", "--seed", "42", "--json"]).unwrap();

        assert!(cli.json);
        assert!(matches!(cli.game, Game::Mines(GameArgs { seed: Some(42) })));
    }
}
