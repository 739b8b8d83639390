//! Prints the multihash of files (or standard input) in each configured text
//! encoding, or checks them against an encoded multihash.
use affinidi_multihash::{
    Algorithm, Base, Multihash, MultihashError, check_reader, digest_streaming,
};
use clap::Parser;
use config::{Config, parse_log_level};
use errors::CliError;
use std::{
    env,
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{Level, event, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt};

mod config;
mod errors;

/// Multihash digests of files or standard input
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files to digest. Reads standard input when empty or `-`
    files: Vec<PathBuf>,

    /// Hash algorithm (sha1, sha256, sha512, sha3-512, sha3-384, sha3-256, sha3-224, blake2b-512, blake2s-256)
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Truncate the digest to this many bytes
    #[arg(short, long)]
    length: Option<usize>,

    /// Text encoding to print (hex, base58, base64). Repeatable
    #[arg(short, long = "base")]
    bases: Vec<Base>,

    /// Check inputs against this encoded multihash instead of printing digests
    #[arg(long)]
    check: Option<String>,

    /// Path to the configuration file (defaults to conf/multihash.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

/// One input to process
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Stdin => "-".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn open(&self) -> Result<Box<dyn Read>, CliError> {
        match self {
            Input::Stdin => Ok(Box::new(io::stdin().lock())),
            Input::File(path) => File::open(path)
                .map(|f| Box::new(f) as Box<dyn Read>)
                .map_err(CliError::InputError),
        }
    }
}

fn inputs(files: &[PathBuf]) -> Vec<Input> {
    if files.is_empty() {
        return vec![Input::Stdin];
    }

    files
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                Input::Stdin
            } else {
                Input::File(path.clone())
            }
        })
        .collect()
}

fn digest_input(input: &Input, config: &Config) -> Result<Multihash, CliError> {
    let mh = digest_streaming(config.algorithm, input.open()?)?;
    match config.length {
        Some(length) => Ok(mh.truncate(length)?),
        None => Ok(mh),
    }
}

fn print_digest<W: Write>(input: &Input, config: &Config, out: &mut W) -> Result<(), CliError> {
    let mh = digest_input(input, config)?;

    // Render everything first so a failure doesn't leave half an entry
    let mut lines = Vec::with_capacity(config.bases.len());
    for base in &config.bases {
        lines.push(format!("  {base}: {}", mh.encode(*base)?));
    }

    writeln!(out, "{}", input.name())?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn check_input<W: Write>(input: &Input, expected: &str, out: &mut W) -> Result<bool, CliError> {
    let matched = check_reader(expected, input.open()?)?;
    writeln!(
        out,
        "{}: {}",
        input.name(),
        if matched { "OK" } else { "FAILED" }
    )?;
    Ok(matched)
}

/// Processes every input, returning how many failed to read, check or match
fn run<W: Write>(args: &Args, config: &Config, out: &mut W) -> usize {
    let mut failures = 0;

    for input in inputs(&args.files) {
        let result = match &args.check {
            Some(expected) => check_input(&input, expected, out),
            None => print_digest(&input, config, out).map(|_| true),
        };

        match result {
            Ok(true) => {}
            Ok(false) => failures += 1,
            Err(err) => {
                // Report and carry on with the remaining inputs
                eprintln!("{}: {}", input.name(), err);
                failures += 1;
            }
        }
    }

    failures
}

fn main() -> ExitCode {
    let args = Args::parse();

    // setup logging/tracing framework
    let filter = LevelFilter::INFO; // This can be changed in the config file!
    let (filter, reload_handle) = reload::Layer::new(filter);
    let ansi = env::var("LOCAL").is_ok();
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_writer(io::stderr),
        )
        .init();

    let mut config = match config::init(args.config.as_deref(), Some(reload_handle.clone())) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(level) = &args.log_level {
        match parse_log_level(level) {
            Some(level) => {
                if let Err(err) = reload_handle.modify(|filter| *filter = level) {
                    event!(Level::WARN, "Couldn't change log level. {err}");
                }
            }
            None => event!(Level::WARN, "log_level({level}) is unknown, ignored"),
        }
    }

    // Command line wins over the config file
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if args.length.is_some() {
        config.length = args.length;
    }
    if !args.bases.is_empty() {
        if let Some(base) = args.bases.iter().find(|b| !Base::SUPPORTED.contains(*b)) {
            eprintln!("{}", MultihashError::UnsupportedBase(base.to_string()));
            return ExitCode::FAILURE;
        }
        config.bases = args.bases.clone();
    }

    event!(Level::DEBUG, "Running with {config:?}");
    let failures = run(&args, &config, &mut io::stdout().lock());
    if failures > 0 {
        event!(Level::DEBUG, "{failures} input(s) failed");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
