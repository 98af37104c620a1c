use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use gridgames_core::{MoveOutcome, SlidingPuzzle, TILE_COUNT};

use crate::session::{Format, Seeds, words};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Click(usize),
    NewGame,
    Quit,
}

fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let words = words(line);
    let command = match words.as_slice() {
        [] => return Ok(None),
        [word] if word == "n" => Command::NewGame,
        [word] if word == "q" => Command::Quit,
        [index] => {
            let index = index
                .parse()
                .with_context(|| format!("not a tile index: {index}"))?;
            Command::Click(index)
        }
        _ => bail!("expected a tile index 0-{}, `n` or `q`", TILE_COUNT - 1),
    };
    Ok(Some(command))
}

fn render<W: Write>(out: &mut W, game: &SlidingPuzzle, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => crate::session::write_json(out, &game.snapshot()),
        Format::Text => {
            writeln!(out, "{}", game.tiles())?;
            writeln!(out, "Moves: {}", game.moves())?;
            Ok(())
        }
    }
}

pub(crate) fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    format: Format,
    mut seeds: Seeds,
) -> anyhow::Result<()> {
    let mut game = SlidingPuzzle::new(seeds.next_seed());
    render(out, &game, format)?;

    for line in input.lines() {
        let command = match parse(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{err:#}");
                continue;
            }
        };
        log::trace!("puzzle command: {:?}", command);

        if command == Command::Quit {
            break;
        }
        apply(&mut game, command, out, format, &mut seeds)?;
    }

    Ok(())
}

/// Runs one command against `game` and redraws when it changed.
fn apply<W: Write>(
    game: &mut SlidingPuzzle,
    command: Command,
    out: &mut W,
    format: Format,
    seeds: &mut Seeds,
) -> anyhow::Result<()> {
    match command {
        Command::Quit => return Ok(()),
        Command::NewGame => *game = SlidingPuzzle::new(seeds.next_seed()),
        Command::Click(_) if game.is_solved() => {
            log::debug!("puzzle solved, ignoring click until a new game");
            return Ok(());
        }
        Command::Click(index) => match game.click(index) {
            Ok(MoveOutcome::Rejected) => return Ok(()),
            Ok(MoveOutcome::Moved) => {}
            Ok(MoveOutcome::Solved { moves }) => {
                render(out, game, format)?;
                if format == Format::Text {
                    writeln!(out, "Solved in {moves} moves!")?;
                }
                return Ok(());
            }
            Err(err) => {
                eprintln!("{err}");
                return Ok(());
            }
        },
    }
    render(out, game, format)
}
