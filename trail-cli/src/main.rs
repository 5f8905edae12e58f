mod score_book;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufRead, BufWriter, Write, stdin, stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use score_book::JsonScoreBook;
use trail_game::{Ending, Simulation, SimulationConfig, Trail};

type Game = Simulation<JsonScoreBook>;

#[derive(Debug, Parser)]
#[command(name = "trail-cli", version)]
#[command(about = "Play the trail simulation in a terminal")]
struct Args {
    /// Seed for every random stream in the run
    #[arg(long, default_value_t = 1848)]
    seed: u64,

    /// Tuning table to use instead of the built-in one (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trail description to use instead of the built-in one (JSON)
    #[arg(long)]
    trail: Option<PathBuf>,

    /// Append milestones to this JSON score book
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Read player input from this file, one line per answer, instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop after this many simulation ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Delay between ticks in interactive mode
    #[arg(long, default_value_t = 40)]
    tick_ms: u64,

    /// Write frames to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.no_color || args.output.is_some() {
        colored::control::set_override(false);
    }

    let config = load_config(args.config.as_deref())?;
    let trail = load_trail(args.trail.as_deref())?;
    let scores = match &args.scores {
        Some(path) => JsonScoreBook::open(path, args.seed)
            .with_context(|| format!("failed to open score book {}", path.display()))?,
        None => JsonScoreBook::in_memory(args.seed),
    };
    let mut game = Simulation::with_recorder(config, trail, args.seed, scores)
        .context("failed to start the simulation")?;
    let mut out = OutputTarget::new(args.output.clone())?;

    if let Some(script) = &args.script {
        let text = fs::read_to_string(script)
            .with_context(|| format!("failed to read script {}", script.display()))?;
        run_script(&mut game, text.lines(), args.max_ticks, &mut out)?;
    } else {
        run_interactive(&mut game, &args, &mut out)?;
    }

    write_summary(&game, &mut out)?;
    out.flush_inner()?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default_config());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SimulationConfig::from_json(&json)
        .with_context(|| format!("invalid config {}", path.display()))
}

fn load_trail(path: Option<&Path>) -> Result<Trail> {
    let Some(path) = path else {
        return Ok(Trail::load_from_static());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read trail {}", path.display()))?;
    Trail::from_json(&json).with_context(|| format!("invalid trail {}", path.display()))
}

fn out_of_ticks(game: &Game, max_ticks: Option<u64>) -> bool {
    max_ticks.is_some_and(|max| game.ticks() >= max)
}

fn print_frame(out: &mut OutputTarget, frame: &str) -> Result<()> {
    writeln!(out, "{}", "--------------------------------".cyan())?;
    writeln!(out, "{frame}")?;
    out.flush_inner()?;
    Ok(())
}

/// Tick until the game waits on the player: nothing passes time and no
/// removal is queued.
fn settle(game: &mut Game, max_ticks: Option<u64>, out: &mut OutputTarget) -> Result<()> {
    loop {
        if game.is_destroyed() || out_of_ticks(game, max_ticks) {
            return Ok(());
        }
        if let Some(frame) = game.tick()? {
            print_frame(out, &frame)?;
        }
        let busy = game.modes().passes_time() || game.modes().removal_pending();
        if !busy {
            return Ok(());
        }
    }
}

fn run_script<'a>(
    game: &mut Game,
    lines: impl Iterator<Item = &'a str>,
    max_ticks: Option<u64>,
    out: &mut OutputTarget,
) -> Result<()> {
    settle(game, max_ticks, out)?;
    for line in lines {
        if game.is_destroyed() || out_of_ticks(game, max_ticks) {
            break;
        }
        writeln!(out, "{} {line}", ">".bright_green().bold())?;
        game.send_input_line(line)?;
        settle(game, max_ticks, out)?;
    }
    Ok(())
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in stdin().lock().lines() {
            let Ok(line) = line else { break };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    receiver
}

fn run_interactive(game: &mut Game, args: &Args, out: &mut OutputTarget) -> Result<()> {
    println!("{}", "Trail Simulation".bright_cyan().bold());
    println!("{}", "================".cyan());
    let input = spawn_stdin_reader();
    let delay = Duration::from_millis(args.tick_ms);
    let mut input_closed = false;

    while !game.is_destroyed() && !out_of_ticks(game, args.max_ticks) {
        if let Some(frame) = game.tick()? {
            print_frame(out, &frame)?;
        }
        match input.try_recv() {
            Ok(line) => game.send_input_line(&line)?,
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => input_closed = true,
        }
        if input_closed && !game.modes().passes_time() && !game.modes().removal_pending() {
            log::debug!("input closed while waiting for the player");
            break;
        }
        thread::sleep(delay);
    }
    Ok(())
}

fn write_summary(game: &Game, out: &mut OutputTarget) -> Result<()> {
    let world = game.world();
    if world.vehicle.passengers.is_empty() && !game.is_destroyed() {
        writeln!(out, "{}", "Game abandoned before the party set out.".yellow())?;
        return Ok(());
    }
    let outcome = match world.ending {
        Some(Ending::ReachedDestination) => "reached the end of the trail".green(),
        Some(Ending::LeaderDied) => "lost the party leader".red(),
        None => "still on the trail".yellow(),
    };
    writeln!(out, "{}", "================================".cyan())?;
    writeln!(out, "Outcome: {outcome}")?;
    writeln!(out, "Date: {}", world.date())?;
    writeln!(out, "Miles traveled: {}", world.vehicle.odometer)?;
    writeln!(
        out,
        "Survivors: {} of {}",
        world.vehicle.living_passengers(),
        world.vehicle.passengers.len()
    )?;
    writeln!(out, "Milestones recorded: {}", game.recorder().entries().len())?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if path.is_dir() {
                bail!("output path {} is a directory", path.display());
            }
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
