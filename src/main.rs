use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;

use serpclust::config::Config;
use serpclust::naming::tfidf::TfIdfNamer;
use serpclust::naming::traits::{ClusterNamer, FirstMemberNamer};
use serpclust::output::export::ExportFormat;
use serpclust::pipeline::cluster::PipelineOptions;

/// serpclust: group keywords by search-results overlap.
///
/// Keywords whose top results share enough URLs are treated as one search
/// intent, named after their most representative keyword, and ranked by
/// combined search volume.
#[derive(Parser)]
#[command(name = "serpclust", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster a keyword ranking export
    Cluster {
        /// CSV file with one row per (keyword, rank position)
        input: PathBuf,

        /// Where to write the clustered keywords
        #[arg(short, long, default_value = "clustered_keywords.csv")]
        output: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Ranked results per keyword (default: 10)
        #[arg(long)]
        top_k: Option<usize>,

        /// Merge keywords sharing more than this many URLs (default: 3)
        #[arg(long)]
        threshold: Option<usize>,

        /// How clusters are named
        #[arg(long, value_enum, default_value_t = Naming::Tfidf)]
        naming: Naming,

        /// Output file format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// How many clusters to show in the terminal summary
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// List the input's columns and how they map to keyword roles
    Columns {
        input: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,
    },
}

/// Column-role overrides. Unset flags fall back to the environment.
#[derive(clap::Args)]
struct ColumnArgs {
    /// Keyword column name
    #[arg(long)]
    keyword_col: Option<String>,

    /// Search volume column name
    #[arg(long)]
    volume_col: Option<String>,

    /// Rank position column name
    #[arg(long)]
    position_col: Option<String>,

    /// Ranking URL column name
    #[arg(long)]
    url_col: Option<String>,

    /// Page title column name
    #[arg(long)]
    title_col: Option<String>,
}

impl ColumnArgs {
    fn apply(self, config: &mut Config) {
        let columns = &mut config.columns;
        let pairs = [
            (self.keyword_col, &mut columns.keyword),
            (self.volume_col, &mut columns.volume),
            (self.position_col, &mut columns.position),
            (self.url_col, &mut columns.url),
            (self.title_col, &mut columns.title),
        ];
        for (flag, slot) in pairs {
            if let Some(value) = flag {
                *slot = value;
            }
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Naming {
    /// Highest average TF-IDF term
    Tfidf,
    /// First keyword of the cluster
    First,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("serpclust=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cluster {
            input,
            output,
            columns,
            top_k,
            threshold,
            naming,
            format,
            top,
        } => {
            let mut config = Config::load()?;
            columns.apply(&mut config);
            if let Some(top_k) = top_k {
                config.top_k = top_k;
            }
            if let Some(threshold) = threshold {
                config.overlap_threshold = threshold;
            }

            println!("Reading {}...", input.display());
            let rows = serpclust::records::loader::load_csv(&input, &config.columns)
                .with_context(|| format!("Failed to load {}", input.display()))?;

            let namer: Box<dyn ClusterNamer> = match naming {
                Naming::Tfidf => Box::new(TfIdfNamer::default()),
                Naming::First => Box::new(FirstMemberNamer),
            };

            info!(
                top_k = config.top_k,
                threshold = config.overlap_threshold,
                "Starting clustering run"
            );

            let mut bar = serpclust::output::terminal::BarProgress::new();
            let report = serpclust::pipeline::cluster::run(
                rows,
                &PipelineOptions::from(&config),
                namer.as_ref(),
                &mut bar,
            )?;

            serpclust::output::terminal::display_report(&report, top);

            let format = match format {
                Format::Csv => ExportFormat::Csv,
                Format::Json => ExportFormat::Json,
            };
            serpclust::output::export::export(&report, &config.columns, format, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!(
                "{}",
                format!("Clustered keywords saved to: {}", output.display()).bold()
            );
        }

        Commands::Columns { input, columns } => {
            let mut config = Config::load()?;
            columns.apply(&mut config);

            let headers = serpclust::records::loader::read_headers(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            serpclust::output::terminal::display_columns(&headers, &config.columns.roles());
        }
    }

    Ok(())
}
