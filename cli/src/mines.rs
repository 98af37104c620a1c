use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use gridgames_core::{Coord, Coord2, GameState, Minesweeper};

use crate::session::{Format, Seeds, words};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Open(Coord2),
    Flag(Coord2),
    NewGame,
    Quit,
}

fn parse_coord(word: &str) -> anyhow::Result<Coord> {
    word.parse()
        .with_context(|| format!("not a coordinate: {word}"))
}

fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let words = words(line);
    let command = match words.as_slice() {
        [] => return Ok(None),
        [word] if word == "n" => Command::NewGame,
        [word] if word == "q" => Command::Quit,
        [action, row, col] if action == "o" || action == "f" => {
            let coords = (parse_coord(row)?, parse_coord(col)?);
            if action == "o" {
                Command::Open(coords)
            } else {
                Command::Flag(coords)
            }
        }
        _ => bail!("expected `o <row> <col>`, `f <row> <col>`, `n` or `q`"),
    };
    Ok(Some(command))
}

fn status(state: GameState) -> &'static str {
    match state {
        GameState::Fresh => "Open a cell to start",
        GameState::Active => "Good luck!",
        GameState::Won => "You cleared the field!",
        GameState::Lost => "Boom! You lost.",
    }
}

fn render<W: Write>(out: &mut W, game: &Minesweeper, format: Format) -> anyhow::Result<()> {
    let snapshot = game.snapshot();
    if format == Format::Json {
        return crate::session::write_json(out, &snapshot);
    }

    writeln!(
        out,
        "Mines: {}  Time: {}  {}",
        snapshot.mines_left,
        snapshot.elapsed_secs,
        status(snapshot.state)
    )?;
    write!(out, "  ")?;
    for col in 0..snapshot.cells.ncols() {
        write!(out, "{col}")?;
    }
    writeln!(out)?;
    for (row, cells) in snapshot.cells.rows().into_iter().enumerate() {
        let line: String = cells.iter().map(|view| view.glyph()).collect();
        writeln!(out, "{row} {line}")?;
    }
    Ok(())
}

pub(crate) fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    format: Format,
    mut seeds: Seeds,
) -> anyhow::Result<()> {
    let mut game = Minesweeper::new(seeds.next_seed());
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
        log::trace!("mines command: {:?}", command);

        let changed = match command {
            Command::Quit => break,
            Command::NewGame => {
                game.restart(seeds.next_seed());
                Ok(true)
            }
            Command::Open(coords) => game.left_click(coords).map(|report| report.outcome.has_update()),
            Command::Flag(coords) => game.right_click(coords).map(|report| report.has_update()),
        };

        match changed {
            Ok(true) => render(out, &game, format)?,
            Ok(false) => {}
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(script: &str, format: Format) -> String {
        let mut out = Vec::new();
        run(script.as_bytes(), &mut out, format, Seeds::new(Some(4))).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse("o 1 2").unwrap(), Some(Command::Open((1, 2))));
        assert_eq!(parse("F 8 0").unwrap(), Some(Command::Flag((8, 0))));
        assert_eq!(parse("n").unwrap(), Some(Command::NewGame));
        assert!(parse("o 1").is_err());
        assert!(parse("o a b").is_err());
        assert!(parse("x 1 2").is_err());
    }

    #[test]
    fn fresh_board_is_all_hidden() {
        let output = play("q\n", Format::Text);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("Mines: 10  Time: 0"));
        assert_eq!(lines[1], "  012345678");
        assert_eq!(lines[2], "0 #########");
    }

    #[test]
    fn flag_before_first_open_does_not_rerender() {
        let output = play("f 0 0\nq\n", Format::Text);

        assert_eq!(output.lines().count(), 11);
    }

    #[test]
    fn open_rerenders_with_active_state() {
        let output = play("o 4 4\n", Format::Json);
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""state":"Fresh""#));
        assert!(!lines[1].contains(r#""state":"Fresh""#));
    }

    #[test]
    fn out_of_bounds_is_reported_not_fatal() {
        let output = play("o 9 9\nq\n", Format::Text);

        assert_eq!(output.lines().count(), 11);
    }
}
