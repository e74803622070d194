use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use snakecheck_core::{Diagnostic, DiagnosticCode, SeverityClass};
use snakecheck_report::{Config, FailPolicy, OutputFormat, Report, ReportEntry};

const DEFAULT_CONFIG: &str = "snakecheck.toml";

/// snakecheck - report diagnostics produced by the Python analysis engine
#[derive(Parser)]
#[command(name = "snakecheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: snakecheck.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON array of diagnostics emitted by the engine
    Report {
        /// Engine output file, or `-` for stdin
        input: PathBuf,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// When to exit non-zero (overrides config)
        #[arg(long, value_enum)]
        fail_on: Option<FailArg>,
    },

    /// List diagnostic codes with their severity and templates
    Codes {
        /// Show a single code
        code: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FailArg {
    Never,
    Error,
    Severe,
    Any,
}

impl From<FailArg> for FailPolicy {
    fn from(arg: FailArg) -> Self {
        match arg {
            FailArg::Never => FailPolicy::Never,
            FailArg::Error => FailPolicy::Error,
            FailArg::Severe => FailPolicy::Severe,
            FailArg::Any => FailPolicy::Any,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = load_config(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Report {
            input,
            format,
            output,
            fail_on,
        } => {
            let format = format.map(OutputFormat::from).unwrap_or(config.format);
            let fail_on = fail_on.map(FailPolicy::from).unwrap_or(config.fail_on);
            report_command(&config, &input, format, output.as_deref(), fail_on)
        }
        Commands::Codes { code } => codes_command(code.as_deref()),
    }
}

/// Explicit path, else snakecheck.toml in the working directory, else defaults
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let default_path = Path::new(DEFAULT_CONFIG);
    if default_path.exists() {
        Ok(Config::from_file(default_path)?)
    } else {
        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }
}

/// Report command - render engine diagnostics and set the exit status
fn report_command(
    config: &Config,
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    fail_on: FailPolicy,
) -> Result<()> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };

    let diagnostics: Vec<Diagnostic> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of diagnostics", input.display()))?;
    tracing::info!(count = diagnostics.len(), "diagnostics loaded");

    let report = Report::from_diagnostics(diagnostics, config);

    match (format, output) {
        (OutputFormat::Json, Some(path)) => report.save_to_file(path)?,
        (OutputFormat::Json, None) => println!("{}", report.to_json()?),
        (OutputFormat::Text, Some(path)) => {
            let mut text = report.render_lines().join("\n");
            text.push('\n');
            std::fs::write(path, text)?;
        }
        (OutputFormat::Text, None) => print_text_report(&report),
    }

    if report.should_fail(fail_on) {
        tracing::debug!(?fail_on, "failing run");
        std::process::exit(1);
    }

    Ok(())
}

fn print_text_report(report: &Report) {
    for entry in &report.entries {
        println!("{}", colorize(entry));
    }

    if report.summary.total == 0 {
        println!("{}", "✓ No problems found".green());
        return;
    }

    println!("\n{}", "Summary".bold());
    println!("  Files:    {}", report.summary.files);
    println!("  Errors:   {}", format!("{}", report.summary.errors).red().bold());
    println!("  Warnings: {}", format!("{}", report.summary.warnings).yellow());
    println!("  Severe:   {}", report.summary.severe);
    if report.summary.ignored > 0 {
        println!("  Ignored:  {}", report.summary.ignored);
    }
}

/// Rendered line with only the level tag colored
fn colorize(entry: &ReportEntry) -> String {
    let tag = entry.severity.tag();
    let suffix = format!("[{}] {}", tag, entry.message);
    let Some(prefix) = entry.rendered.strip_suffix(&suffix) else {
        return entry.rendered.clone();
    };

    let colored_tag = match entry.severity {
        SeverityClass::Error => format!("[{tag}]").red().bold(),
        SeverityClass::Warning => format!("[{tag}]").yellow().bold(),
    };
    format!("{}{} {}", prefix, colored_tag, entry.message)
}

/// Codes command - print the diagnostic catalog
fn codes_command(code: Option<&str>) -> Result<()> {
    let codes: Vec<DiagnosticCode> = match code {
        Some(code) => vec![code.parse()?],
        None => DiagnosticCode::ALL.to_vec(),
    };

    for code in codes {
        let spec = code.spec();
        let class = match spec.class {
            SeverityClass::Error => spec.class.tag().red().bold(),
            SeverityClass::Warning => spec.class.tag().yellow().bold(),
        };
        println!(
            "{} [{}] score={} column={}",
            code.as_str().bold(),
            class,
            spec.score,
            spec.column
        );
        for template in code.templates() {
            println!("    {}", template.escape_default());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snakecheck_core::SourceLocation;

    #[test]
    fn colorize_keeps_plain_text_without_color() {
        colored::control::set_override(false);
        let entry = ReportEntry::from(Diagnostic::undefined_name(
            "a.py",
            SourceLocation::with_column(2, 0),
            "x",
        ));
        assert_eq!(colorize(&entry), "a.py:2(0): [E] undefined name 'x'");
    }

    #[test]
    fn cli_parses_report_overrides() {
        let cli = Cli::parse_from(["snakecheck", "-v", "report", "out.json", "--format", "json", "--fail-on", "never"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Report { input, format, fail_on, .. } => {
                assert_eq!(input, PathBuf::from("out.json"));
                assert_eq!(format.map(OutputFormat::from), Some(OutputFormat::Json));
                assert_eq!(fail_on.map(FailPolicy::from), Some(FailPolicy::Never));
            }
            Commands::Codes { .. } => panic!("expected report command"),
        }
    }
}
