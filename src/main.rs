mod crawl;
mod error;
mod fetch;
mod parser;
mod records;
mod settings;
mod sink;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::crawl::Crawler;
use crate::fetch::HttpSource;
use crate::settings::Settings;
use crate::sink::{ParquetDir, ParquetFile};

#[derive(Parser)]
#[command(name = "justia_grabber", about = "The Justia SCOTUS CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save metadata on the cases in the given year to file
    Cases {
        /// The year the cases were decided
        #[arg(long)]
        year: i32,
        /// The file to write the results to (`-` for stdout)
        #[arg(short = 'o', long = "output_loc")]
        output_loc: PathBuf,
    },
    /// Save metadata on the cases and opinions in the given year to a directory
    Opinions {
        /// The year the opinions were issued
        #[arg(long)]
        year: i32,
        /// The directory in which to save the results
        #[arg(short = 'o', long = "output_dir")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // `-o -` streams Parquet to stdout, so human output moves to stderr.
    let parquet_to_stdout = matches!(
        &cli.command,
        Commands::Cases { output_loc, .. } if output_loc.as_os_str() == "-"
    );
    let say = |line: &str| {
        if parquet_to_stdout {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };
    say("The Justia SCOTUS CLI");

    let settings = Settings::load().context("Failed to load settings")?;
    let source = HttpSource::new(&settings)?;
    let crawler = Crawler::new(&source, &settings);

    match cli.command {
        Commands::Cases { year, output_loc } => {
            let mut sink = ParquetFile::new(&output_loc);
            let cases = crawler
                .run_cases(year, &mut sink)
                .await
                .with_context(|| format!("Failed to grab cases for {}", year))?;
            say(&summary(cases.len(), "cases"));
        }
        Commands::Opinions { year, output_dir } => {
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
            let mut sink = ParquetDir::new(&output_dir, year);
            let (cases, opinions) = crawler
                .run_opinions(year, &mut sink, |cases| say(&summary(cases.len(), "cases")))
                .await
                .with_context(|| format!("Failed to grab opinions for {}", year))?;
            info!("{} opinions across {} cases", opinions.len(), cases.len());
            say(&summary(opinions.len(), "opinions"));
        }
    }

    Ok(())
}

fn summary(count: usize, what: &str) -> String {
    format!(
        "Metadata on {} {} were found and written to disk.",
        group_thousands(count),
        what
    )
}

/// `1234567` -> `"1,234,567"`
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
