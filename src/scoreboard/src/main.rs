//! Command-driven ICPC scoreboard.
//!
//! Reads contest commands (`ADDTEAM`, `SUBMIT`, `FREEZE`, `SCROLL`, ...)
//! one per line and prints results either as text or as JSON lines.
mod command;
mod logging;
mod render;
mod session;

use anyhow::Context;
use log::debug;
use ranker::Config;
use render::{JsonRenderer, Renderer, TextRenderer};
use session::Session;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter},
    path::{Path, PathBuf},
};
use structopt::StructOpt;

#[derive(StructOpt)]
struct Args {
    /// File with commands. If not set, commands are read from stdin
    input: Option<PathBuf>,
    /// Path to YAML config
    #[structopt(long, short = "c", env = "SCOREBOARD_CONFIG")]
    config: Option<PathBuf>,
    /// Register unknown teams on their first submission
    #[structopt(long)]
    auto_register: bool,
    /// Print one JSON object per command instead of text
    #[structopt(long)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(p) => p,
        None => return Ok(Config::default()),
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&data).with_context(|| format!("config {} is invalid", path.display()))
}

fn parse_config(data: &str) -> anyhow::Result<Config> {
    Ok(serde_yaml::from_str(data)?)
}

fn run_session(config: Config, input: impl BufRead, renderer: impl Renderer) -> anyhow::Result<()> {
    Session::new(config, renderer).run(input)
}

fn main() -> anyhow::Result<()> {
    logging::setup()?;
    let args = Args::from_args();
    let mut config = load_config(args.config.as_deref())?;
    if args.auto_register {
        config.auto_register = true;
    }
    debug!("config: {:?}", config);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };
    let out = BufWriter::new(io::stdout());
    if args.json {
        run_session(config, input, JsonRenderer::new(out))
    } else {
        run_session(config, input, TextRenderer::new(out))
    }
}
