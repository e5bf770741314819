//! `docent`: extract roles and acronyms from a document.

use clap::{ArgGroup, Parser, ValueEnum};
use docent::{AnalysisReport, DocumentAnalyzer, ExtractionConfig, ExtractionMode, Severity};
use is_terminal::IsTerminal;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

/// Role and acronym extraction for technical documents
#[derive(Parser, Debug)]
#[command(name = "docent")]
#[command(
    author,
    version,
    about = "Role and acronym extraction for technical documents",
    long_about = r#"
docent - who does what, and what the acronyms mean

Reads a statement of work, management plan or specification and reports:
  • roles: canonical name, kind, provenance, frequency, mean confidence
  • acronyms: definitions, usages, and consistency findings

EXAMPLES:
  docent --file sow.txt
  docent --text "The Systems Engineer (SE) shall review the plan." --format json
  cat plan.txt | docent --mode strict --roles-only
"#
)]
#[command(group(ArgGroup::new("input").args(["text", "file"])))]
#[command(group(ArgGroup::new("only").args(["roles_only", "acronyms_only"])))]
struct Cli {
    /// Text to analyze
    #[arg(short, long)]
    text: Option<String>,

    /// File to analyze (reads stdin when neither --text nor --file is given)
    #[arg(short, long, value_name = "PATH")]
    file: Option<String>,

    /// Role extraction mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Extra known role (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    roles: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    format: OutputFormat,

    /// Only report roles
    #[arg(long)]
    roles_only: bool,

    /// Only report acronyms and findings
    #[arg(long)]
    acronyms_only: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress logging and the summary line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Discovery,
    Strict,
}

impl From<ModeArg> for ExtractionMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Discovery => ExtractionMode::Discovery,
            ModeArg::Strict => ExtractionMode::Strict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if cli.quiet {
        builder.filter_level(log::LevelFilter::Off);
    }
    builder.format_timestamp(None).init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = build_config(cli)?;
    let text = get_input_text(cli)?;
    log::debug!(
        "analyzing {} chars in {} mode",
        text.chars().count(),
        config.extraction_mode
    );

    let label = cli.file.as_deref();
    let report = DocumentAnalyzer::new(config).analyze(&text, &[], label);

    match cli.format {
        OutputFormat::Json => {
            let value = select(report.to_dict(), cli);
            let rendered = serde_json::to_string_pretty(&value)
                .map_err(|e| format_error("render JSON", &e.to_string()))?;
            println!("{}", rendered);
        }
        OutputFormat::Human => print_human(&report, cli),
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<ExtractionConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ExtractionConfig::from_path(path)
            .map_err(|e| format_error("load config", &e.to_string()))?,
        None => ExtractionConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode.into());
    }
    if !cli.roles.is_empty() {
        config = config.with_custom_roles(cli.roles.iter().cloned());
    }
    Ok(config)
}

fn get_input_text(cli: &Cli) -> Result<String, String> {
    if let Some(t) = &cli.text {
        return Ok(t.clone());
    }
    if let Some(path) = &cli.file {
        return fs::read_to_string(path)
            .map_err(|e| format_error("read file", &format!("{}: {}", path, e)));
    }
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format_error("read stdin", &e.to_string()))?;
        if !buf.is_empty() {
            return Ok(buf);
        }
    }
    Err("No input text provided. Use --text, --file, or pipe via stdin".to_string())
}

/// Drop the half of the report excluded by `--roles-only` / `--acronyms-only`.
fn select(mut value: serde_json::Value, cli: &Cli) -> serde_json::Value {
    if let Some(obj) = value.as_object_mut() {
        if cli.roles_only {
            obj.remove("acronyms");
            obj.remove("issues");
        } else if cli.acronyms_only {
            obj.remove("roles");
        }
    }
    value
}

fn print_human(report: &AnalysisReport, cli: &Cli) {
    if !cli.acronyms_only {
        println!("{}", color("1", &format!("Roles ({})", report.roles.len())));
        for role in report.roles.values() {
            println!(
                "  {:<40} {:<8} {:<10} x{:<3} {:.2}",
                role.canonical_name,
                role.entity_kind.as_label(),
                role.role_source.as_label(),
                role.frequency(),
                role.avg_confidence()
            );
        }
    }

    if !cli.roles_only {
        println!("{}", color("1", &format!("Acronyms ({})", report.acronyms.len())));
        for entry in report.acronyms.values() {
            println!(
                "  {:<12} {:<13} {}",
                entry.acronym,
                entry.status.as_label(),
                entry.expansion.as_deref().unwrap_or("-")
            );
        }
        if !report.issues.is_empty() {
            println!("{}", color("1", &format!("Issues ({})", report.issues.len())));
            for issue in &report.issues {
                let tag = match issue.severity {
                    Severity::Error => color("31", "error"),
                    Severity::Warning => color("33", "warning"),
                    Severity::Info => color("36", "info"),
                };
                println!("  {}: {}", tag, issue.message);
            }
        }
    }

    if !cli.quiet {
        println!(
            "\n{} roles, {} acronyms, {} errors, {} warnings",
            report.roles.len(),
            report.acronyms.len(),
            report.error_count(),
            report.warning_count()
        );
    }
}

fn format_error(action: &str, detail: &str) -> String {
    format!("Failed to {}: {}", action, detail)
}

fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
