use std::env;
use std::fs;
use std::process;

use log::{Level, LevelFilter, Log, Metadata, Record};
use versechart::{RenderOptions, VerseError};

/// Writes `log` records to stderr
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    }
}

const USAGE: &str = "Usage: versechart [--legend] [--verbose] <input.txt> [options.yaml]";

fn read_options(path: Option<&String>) -> Result<RenderOptions, VerseError> {
    match path {
        Some(path) => RenderOptions::from_yaml(&fs::read_to_string(path)?),
        None => Ok(RenderOptions::default()),
    }
}

/// Command-line flags and paths
#[derive(Debug, PartialEq)]
struct CliArgs {
    legend: bool,
    verbose: bool,
    input_path: String,
    options_path: Option<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut legend = false;
    let mut verbose = false;
    let mut paths = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--legend" => legend = true,
            "--verbose" | "-v" => verbose = true,
            flag if flag.starts_with('-') => return Err(format!("Unknown flag '{}'", flag)),
            _ => paths.push(arg.clone()),
        }
    }

    let mut paths = paths.into_iter();
    match (paths.next(), paths.next(), paths.next()) {
        (Some(input_path), options_path, None) => Ok(CliArgs {
            legend,
            verbose,
            input_path,
            options_path,
        }),
        _ => Err("Expected an input file and at most one options file".to_string()),
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    init_logger(cli.verbose);
    let input_path = &cli.input_path;
    let options_path = cli.options_path.as_ref();

    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let options = match read_options(options_path) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error reading options: {}", e);
            process::exit(1);
        }
    };

    let result = versechart::parse_verse(&source).and_then(|verse| {
        let mut renderer = versechart::ChordsRenderer::new();
        let chart = renderer.render_verse(&verse, &options)?;
        Ok((renderer, chart))
    });

    let (renderer, chart) = match result {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Render error: {}", e);
            process::exit(1);
        }
    };

    // Render warnings reach stderr through the logger's `warn` level
    log::debug!("{} warning(s), {} chord(s) used", chart.warnings.len(), chart.chords_used.len());

    println!("{}", chart.html);
    if cli.legend {
        println!("{}", renderer.render_legend(&chart.chords_used));
    }
}
