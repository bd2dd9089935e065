//! archsb: checks the switchblock section of FPGA architecture files.
//!
//! `archsb check` builds and validates every switchblock and probes its
//! permutation functions, `archsb eval` evaluates a single formula, and
//! `archsb dump` prints the parsed switchblocks as JSON.

#![warn(missing_docs)]

mod check;
mod dump;
mod eval;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use archsb_config::ArchsbConfig;
use clap::{Parser, Subcommand, ValueEnum};

/// Switchblock loader and formula checker for FPGA architecture files.
#[derive(Parser, Debug)]
#[command(name = "archsb", version, about = "FPGA switchblock checker")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print per-switchblock progress and intermediate formula forms.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to an `archsb.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and validate every switchblock of an architecture file.
    Check(CheckArgs),
    /// Evaluate one permutation formula.
    Eval(EvalArgs),
    /// Print the parsed segments and switchblocks as JSON.
    Dump(DumpArgs),
}

/// Arguments for `archsb check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Architecture file (defaults to `[architecture] file` from the config).
    pub arch: Option<String>,

    /// Channel width at which to probe permutation functions; repeatable.
    #[arg(short = 'w', long = "width")]
    pub widths: Vec<i32>,

    /// Skip evaluating permutation functions.
    #[arg(long)]
    pub no_probe: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Arguments for `archsb eval`.
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Formula text, e.g. `"(t + W/2) * 2"` or `"{0:3} t+1; {4:7} t-1;"`.
    pub formula: String,

    /// Wire index substituted for `t`.
    #[arg(short = 't', long = "wire", default_value_t = 0)]
    pub wire: i32,

    /// Channel width substituted for `W`.
    #[arg(short = 'W', long = "width")]
    pub width: i32,

    /// Output format.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

/// Arguments for `archsb dump`.
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Architecture file (defaults to `[architecture] file` from the config).
    pub arch: Option<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Use the config setting, else detect a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

impl From<archsb_config::ReportFormat> for ReportFormat {
    fn from(format: archsb_config::ReportFormat) -> Self {
        match format {
            archsb_config::ReportFormat::Text => ReportFormat::Text,
            archsb_config::ReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Global settings derived from CLI flags and the configuration file.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Loaded configuration, or defaults when there is none.
    pub config: ArchsbConfig,
    /// Directory that relative paths in the configuration are resolved against.
    pub base_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    let (config, base_dir) = match pipeline::load_project_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let color = resolve_color(cli.color, config.output.color);
    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config,
        base_dir,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
        Command::Eval(ref args) => eval::run(args, &global),
        Command::Dump(ref args) => dump::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The command-line flag wins over the config file; `auto` in both means
/// color only when stderr is a terminal.
fn resolve_color(flag: ColorChoice, configured: archsb_config::ColorMode) -> bool {
    match (flag, configured) {
        (ColorChoice::Always, _) => true,
        (ColorChoice::Never, _) => false,
        (ColorChoice::Auto, archsb_config::ColorMode::Always) => true,
        (ColorChoice::Auto, archsb_config::ColorMode::Never) => false,
        (ColorChoice::Auto, archsb_config::ColorMode::Auto) => std::io::stderr().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["archsb", "check"]);
        match cli.command {
            Command::Check(ref args) => {
                assert!(args.arch.is_none());
                assert!(args.widths.is_empty());
                assert!(!args.no_probe);
                assert!(args.format.is_none());
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_check_with_args() {
        let cli = Cli::parse_from([
            "archsb", "check", "k6.xml", "-w", "20", "--width", "100", "--no-probe", "--format",
            "json",
        ]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.arch.as_deref(), Some("k6.xml"));
                assert_eq!(args.widths, [20, 100]);
                assert!(args.no_probe);
                assert_eq!(args.format, Some(ReportFormat::Json));
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_eval() {
        let cli = Cli::parse_from(["archsb", "eval", "W-t-1", "-t", "3", "-W", "10"]);
        match cli.command {
            Command::Eval(ref args) => {
                assert_eq!(args.formula, "W-t-1");
                assert_eq!(args.wire, 3);
                assert_eq!(args.width, 10);
            }
            _ => panic!("expected Eval command"),
        }
    }

    #[test]
    fn eval_requires_width() {
        assert!(Cli::try_parse_from(["archsb", "eval", "t"]).is_err());
    }

    #[test]
    fn parse_dump() {
        let cli = Cli::parse_from(["archsb", "dump", "arch.xml"]);
        assert!(matches!(cli.command, Command::Dump(ref a) if a.arch.as_deref() == Some("arch.xml")));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["archsb", "--quiet", "--color", "never", "check"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_config_flag() {
        let cli = Cli::parse_from(["archsb", "dump", "--config", "ci/archsb.toml"]);
        assert_eq!(cli.config.as_deref(), Some("ci/archsb.toml"));
    }

    #[test]
    fn color_resolution() {
        use archsb_config::ColorMode;
        assert!(resolve_color(ColorChoice::Always, ColorMode::Never));
        assert!(!resolve_color(ColorChoice::Never, ColorMode::Always));
        assert!(resolve_color(ColorChoice::Auto, ColorMode::Always));
        assert!(!resolve_color(ColorChoice::Auto, ColorMode::Never));
    }

    #[test]
    fn report_format_from_config() {
        assert_eq!(
            ReportFormat::from(archsb_config::ReportFormat::Json),
            ReportFormat::Json
        );
    }
}
