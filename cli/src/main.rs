use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use minefield_core::{Coord, Field, MineLayout};
use minefield_protocol::SharedField;

#[derive(Parser, Debug)]
#[command(version, about = "Play a minefield over stdin and stdout", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Field width in columns
    #[arg(short = 'x', long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..))]
    width: Coord,

    /// Field height in rows
    #[arg(short = 'y', long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..))]
    height: Coord,

    /// Force a seed instead of random
    #[arg(short, long, conflicts_with = "layout")]
    seed: Option<u64>,

    /// Board file with explicit mines: a `X Y` line, then Y rows of X `0`/`1` cells
    #[arg(short, long, conflicts_with_all = ["width", "height"])]
    layout: Option<PathBuf>,

    /// Keep playing after a detonation and log the uncovered board after every command
    #[arg(short, long)]
    debug: bool,
}

fn build_field(args: &Args) -> anyhow::Result<Field> {
    if let Some(path) = &args.layout {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read layout {}", path.display()))?;
        let layout: MineLayout = text
            .parse()
            .with_context(|| format!("Invalid layout in {}", path.display()))?;
        let mut field = Field::new(layout.size())?;
        field.place_mines(&layout)?;
        log::info!(
            "Loaded {} mines from {}",
            layout.mine_count(),
            path.display()
        );
        return Ok(field);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    let mut field = Field::new((args.width, args.height))?;
    field.place_mines_randomly(seed);
    Ok(field)
}

/// Runs one session against `board`, one command per input line, until the session
/// closes or input runs out.
fn serve(
    board: &SharedField,
    debug: bool,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let session = board.join(debug);
    writeln!(output, "{}", session.greeting())?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        let reply = session.handle_line(&line);
        writeln!(output, "{}", reply)?;
        output.flush()?;

        if session.is_debug() {
            log::debug!("\n{}", board.read(|field| field.debug_view().to_string()));
        }
        if session.should_close(&reply) {
            break;
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let field = build_field(&args)?;
    log::info!("Started a {}x{} field", field.size().0, field.size().1);

    let board = SharedField::new(field);
    serve(&board, args.debug, io::stdin().lock(), io::stdout().lock())
}
