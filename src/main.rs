//! CLI entry point for treedraw

use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use treedraw::{
    OUTPUT_FILE_NAME, OutputConfig, TreeDrawer, TreeError, WalkerConfig, print_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => color_from_env(|key| std::env::var_os(key))
                .unwrap_or_else(|| std::io::stdout().is_terminal()),
        }
    }
}

/// Environment override for auto mode, if any. `NO_COLOR` beats
/// `FORCE_COLOR`; `TERM=dumb` turns color off.
fn color_from_env(var: impl Fn(&str) -> Option<OsString>) -> Option<bool> {
    if var("NO_COLOR").is_some() {
        Some(false)
    } else if var("FORCE_COLOR").is_some() {
        Some(true)
    } else if var("TERM").is_some_and(|term| term == "dumb") {
        Some(false)
    } else {
        None
    }
}

#[derive(Parser, Debug)]
#[command(name = "treedraw")]
#[command(about = "Draw a directory as a text tree")]
#[command(version)]
struct Args {
    /// Directory to display
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Include files (default: directories only)
    #[arg(short = 'f', long = "files")]
    files: bool,

    /// Include hidden entries
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// Ignore entries matching name or glob pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Show sizes (directories show the total of everything below them)
    #[arg(short = 's', long = "size")]
    size: bool,

    /// Show last modification times
    #[arg(short = 't', long = "time")]
    time: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level", value_name = "N")]
    level: Option<usize>,

    /// Also save the tree to DIR/tree_structure.txt
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Don't print the tree to stdout
    #[arg(short = 'q', long = "quiet", conflicts_with = "json")]
    quiet: bool,

    /// Output in JSON format
    #[arg(long = "json", conflicts_with = "output")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("treedraw={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::try_parse().unwrap_or_else(|e| {
        if !e.use_stderr() {
            // --help and --version
            let _ = e.print();
            process::exit(0);
        }
        eprintln!("treedraw: argument parsing error: {}", e);
        process::exit(1);
    });

    init_logging(args.verbose);

    let walker_config = WalkerConfig {
        ignore_patterns: args.ignore.clone(),
        show_files: args.files,
        show_hidden: args.all,
        show_size: args.size,
        show_modified_time: args.time,
        max_depth: args.level,
    };

    let drawer = TreeDrawer::new(args.path.clone(), walker_config).with_output(OutputConfig {
        use_color: args.color.enabled(),
    });

    if let Err(e) = run(&drawer, &args) {
        eprintln!("treedraw: {}", e);
        process::exit(1);
    }
}

fn run(drawer: &TreeDrawer, args: &Args) -> Result<(), TreeError> {
    if args.json {
        let tree = drawer.build()?;
        return print_json(&tree);
    }

    // In quiet mode the returned string is simply dropped.
    drawer.draw(args.quiet, args.output.as_deref())?;

    if let Some(dir) = &args.output {
        eprintln!(
            "Tree structure saved to {}",
            dir.join(OUTPUT_FILE_NAME).display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| OsString::from(*v))
        }
    }

    #[test]
    fn test_explicit_modes_ignore_environment() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
    }

    #[test]
    fn test_color_from_env() {
        assert_eq!(color_from_env(env(&[])), None);
        assert_eq!(color_from_env(env(&[("TERM", "xterm")])), None);
        assert_eq!(color_from_env(env(&[("TERM", "dumb")])), Some(false));
        assert_eq!(color_from_env(env(&[("FORCE_COLOR", "1")])), Some(true));
        assert_eq!(
            color_from_env(env(&[("NO_COLOR", ""), ("FORCE_COLOR", "1")])),
            Some(false)
        );
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["treedraw", "src", "-f", "-L", "2", "--color", "never"])
            .unwrap();
        assert_eq!(args.path, PathBuf::from("src"));
        assert!(args.files);
        assert_eq!(args.level, Some(2));
        assert!(!args.color.enabled());
    }
}
