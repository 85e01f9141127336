use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use compare_report::{CompareResponse, Config, ProfileData};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "compare-report")]
#[command(about = "Build and render GitHub profile comparison reports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a comparison report
    Render {
        /// Report text file, or a saved comparison response with --response
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pdf)]
        to: Format,

        /// Output file (PDF defaults to input name with .pdf extension, others to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config file
        #[arg(short, long, default_value = "compare-report.toml")]
        config: PathBuf,

        /// Read the report from the `comparison_text` field of a JSON response
        #[arg(long)]
        response: bool,
    },
    /// Build a comparison report from two saved GitHub profiles
    Report {
        /// First profile (JSON with `user` and `repos`)
        first: PathBuf,

        /// Second profile
        second: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the full comparison response as JSON instead of the report text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Pdf,
    Typst,
    Html,
    /// Formatted blocks as JSON
    Json,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))
}

fn write_output(output: Option<&Path>, content: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Error writing {}", path.display()))?;
            println!("Created {}", path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(content)
                .context("Error writing to stdout")?;
        }
    }
    Ok(())
}

fn render(
    input: &Path,
    to: Format,
    output: Option<PathBuf>,
    config: &Path,
    response: bool,
) -> Result<()> {
    let config = Config::load(config);
    let content = read(input)?;
    let text = if response {
        CompareResponse::from_json(&content)
            .with_context(|| format!("Error parsing {}", input.display()))?
            .comparison_text
    } else {
        content
    };
    debug!("Rendering {} as {:?}", input.display(), to);

    match to {
        Format::Pdf => {
            let pdf = compare_report::report_to_pdf_with_config(&text, &config)?;
            let output = output.unwrap_or_else(|| input.with_extension("pdf"));
            write_output(Some(&output), &pdf)
        }
        Format::Typst => {
            let typst = compare_report::report_to_typst_with_config(&text, &config);
            write_output(output.as_deref(), typst.as_bytes())
        }
        Format::Html => {
            let html = compare_report::report_to_html_with_config(&text, &config);
            write_output(output.as_deref(), html.as_bytes())
        }
        Format::Json => {
            let blocks = compare_report::format(&text);
            let json = serde_json::to_string_pretty(&blocks)?;
            write_output(output.as_deref(), json.as_bytes())
        }
    }
}

fn report(first: &Path, second: &Path, output: Option<PathBuf>, json: bool) -> Result<()> {
    let first_data = ProfileData::from_json(&read(first)?)
        .with_context(|| format!("Error parsing {}", first.display()))?;
    let second_data = ProfileData::from_json(&read(second)?)
        .with_context(|| format!("Error parsing {}", second.display()))?;

    let response = compare_report::report::compare(&first_data, &second_data)?;
    info!(
        "Compared {} with {}",
        first_data.user.login, second_data.user.login
    );

    let content = if json {
        serde_json::to_string_pretty(&response)?
    } else {
        response.comparison_text
    };
    write_output(output.as_deref(), content.as_bytes())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "compare_report=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render {
            input,
            to,
            output,
            config,
            response,
        } => render(&input, to, output, &config, response),
        Command::Report {
            first,
            second,
            output,
            json,
        } => report(&first, &second, output, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
