use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};
use clap::Parser;
use sapper_core::{GameService, MemoryStore};
use sapper_protocol::{GameInfoResponse, GameTurnRequest, NewGameRequest};

#[derive(Parser, Debug)]
#[command(version, about = "Play a game of minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    width: i64,

    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    height: i64,

    /// Number of mines to place
    #[arg(short, long, default_value_t = 10)]
    mines: i64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    // bridges `log` records from the library crates
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Parses a `row col` move, tolerating extra whitespace or a comma between the two.
fn parse_move(line: &str) -> anyhow::Result<(i64, i64)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected a move as `row col`, got {line:?}");
    };
    let row = row.parse::<i64>().with_context(|| format!("invalid row {row:?}"))?;
    let col = col.parse::<i64>().with_context(|| format!("invalid column {col:?}"))?;
    Ok((row, col))
}

fn render(info: &GameInfoResponse) -> String {
    let mut out = String::from("   ");
    for col in 0..info.width {
        out.push_str(&format!("{:>2}", col % 100));
    }
    out.push('\n');
    for (row, cells) in info.field.to_rows().iter().enumerate() {
        out.push_str(&format!("{:>2} ", row % 100));
        for cell in cells {
            let token = if cell.is_hidden() { ".".to_owned() } else { cell.to_string() };
            out.push_str(&format!("{token:>2}"));
        }
        out.push('\n');
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let store = MemoryStore::new();
    let mut service = match args.seed {
        Some(seed) => GameService::with_seed(store, seed),
        None => GameService::new(store),
    };
    log::debug!("seed: {:?}", args.seed);

    let request = NewGameRequest {
        width: args.width,
        height: args.height,
        mines_count: args.mines,
    };
    let mut info = sapper_protocol::new_game(&mut service, &request)
        .map_err(|err| anyhow::anyhow!(err.error))
        .context("could not start game")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", render(&info))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (row, col) = match parse_move(&line) {
            Ok(coords) => coords,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        let turn = GameTurnRequest {
            game_id: info.game_id,
            row,
            col,
        };
        match sapper_protocol::make_turn(&mut service, &turn) {
            Ok(next) => info = next,
            Err(err) => {
                writeln!(out, "{}", err.error)?;
                continue;
            }
        }

        writeln!(out, "{}", render(&info))?;
        if info.completed {
            let won = info.field.iter().all(|cell| !cell.is_mine());
            writeln!(out, "{}", if won { "You won!" } else { "Boom, you lost." })?;
            return Ok(());
        }
    }

    log::info!("Input closed before game {} finished", info.game_id);
    Ok(())
}
