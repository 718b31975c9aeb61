//! Terminal host for Color Fill.
//!
//! One command per line on stdin:
//!
//! - `p ROW COL`: paint with the selected color
//! - `w ROW COL COLOR`: paint with palette index COLOR
//! - `c`: cycle the selected color
//! - `r`: reset
//! - `q`: quit
//!
//! The board is printed after every command. A rejected paint prints its
//! reason on stderr. Set `RUST_LOG=debug` to see each engine decision.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use log::info;

use arcade_lab::core::Coord;
use arcade_lab::games::color_fill::{
    ColorFill, ColorFillConfig, ColorFillInput, ColorFillOutcome, ColorFillSnapshot, ColorIndex,
};
use arcade_lab::render::TextRenderer;
use arcade_lab::rules::{Game, InputSource, RenderSink};

enum Command {
    Play(ColorFillInput),
    Quit,
}

fn parse_number<T: std::str::FromStr>(field: Option<&str>, name: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text = field.ok_or_else(|| anyhow!("missing {}", name))?;
    text.parse().with_context(|| format!("bad {} {:?}", name, text))
}

fn parse_command(line: &str) -> Result<Command> {
    let mut fields = line.split_whitespace();
    let verb = fields.next().ok_or_else(|| anyhow!("empty command"))?;

    let command = match verb {
        "p" => {
            let row = parse_number(fields.next(), "row")?;
            let col = parse_number(fields.next(), "column")?;
            Command::Play(ColorFillInput::Paint(Coord::new(row, col)))
        }
        "w" => {
            let row = parse_number(fields.next(), "row")?;
            let col = parse_number(fields.next(), "column")?;
            let color = parse_number(fields.next(), "color")?;
            Command::Play(ColorFillInput::PaintWith(Coord::new(row, col), ColorIndex(color)))
        }
        "c" => Command::Play(ColorFillInput::CycleColor),
        "r" => Command::Play(ColorFillInput::Reset),
        "q" => Command::Quit,
        other => bail!("unknown command {:?}", other),
    };

    if let Some(extra) = fields.next() {
        bail!("unexpected {:?} after {:?}", extra, verb);
    }
    Ok(command)
}

/// Reads commands until `q` or end of input, skipping lines that do not parse.
struct Commands<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> InputSource<ColorFillInput> for Commands<R> {
    fn next_input(&mut self) -> Option<ColorFillInput> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("error: failed to read input: {}", err);
                    return None;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(Command::Play(input)) => return Some(input),
                Ok(Command::Quit) => return None,
                Err(err) => eprintln!("error: {:#}", err),
            }
        }
    }
}

/// Play every command, presenting after each and reporting rejections to `errors`.
fn play_session<I, S, E>(game: &mut ColorFill, commands: &mut I, sink: &mut S, errors: &mut E) -> Vec<ColorFillOutcome>
where
    I: InputSource<ColorFillInput>,
    S: RenderSink<ColorFillSnapshot>,
    E: Write,
{
    let mut outcomes = Vec::new();
    while let Some(input) = commands.next_input() {
        let outcome = game.handle(input);
        if let ColorFillOutcome::Rejected(reason) = outcome {
            let _ = writeln!(errors, "rejected: {}", reason);
        }
        sink.present(&game.snapshot());
        outcomes.push(outcome);
    }
    outcomes
}

fn main() -> Result<()> {
    env_logger::init();

    let mut game = ColorFill::try_new(ColorFillConfig::default()).context("invalid game configuration")?;
    let mut renderer = TextRenderer::new(io::stdout());
    renderer.present(&game.snapshot());

    let stdin = io::stdin();
    let mut commands = Commands {
        lines: stdin.lock().lines(),
    };
    let outcomes = play_session(&mut game, &mut commands, &mut renderer, &mut io::stderr());

    let rejected = outcomes.iter().filter(|o| o.is_rejected()).count();
    let painted = outcomes
        .iter()
        .filter(|o| matches!(o, ColorFillOutcome::Colored { .. }))
        .count();
    info!(
        "session over: {} commands, {} painted, {} rejected, solved: {}",
        outcomes.len(),
        painted,
        rejected,
        game.is_won()
    );
    Ok(())
}
