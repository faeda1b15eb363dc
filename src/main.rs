use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vlu_report::cli;
use vlu_report::config::ReportConfig;

#[derive(Parser)]
#[command(name = "vlu-report")]
#[command(about = "VLU 4G site telemetry: data usage, VoLTE and low-traffic views, PDF report.")]
#[command(long_about = "VLU Report - 4G site telemetry views and PDF reports

Reads the per-cell sheet of a telemetry workbook, sums data usage and VoLTE
traffic per location and filters by service area (SDCA).

COMMANDS:
  usage        - Locations by data usage (highest first)
  volte        - Locations by VoLTE traffic (highest first)
  detail       - Per-cell rows of one location
  low-traffic  - Locations under the usage threshold, plus zero-data cells
  locations    - All locations, sorted
  report       - Generate the PDF report
  config       - Print the effective configuration

EXAMPLES:
  vlu-report usage vlu.xlsx
  vlu-report volte vlu.xlsx --area-code Tindivanam
  vlu-report detail vlu.xlsx --location Gingee
  vlu-report low-traffic vlu.xlsx --threshold 5 --json
  vlu-report report vlu.xlsx -o reports/ --html")]
#[command(version)]
struct Cli {
    /// YAML configuration file (sheet names, column mapping, thresholds)
    #[arg(short, long, global = true, env = "VLU_CONFIG")]
    config: Option<PathBuf>,

    /// Show verbose output and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show locations sorted by total data usage
    Usage {
        /// Path to the telemetry workbook (.xlsx)
        file: PathBuf,

        /// Service area to report on (defaults to the configured area)
        #[arg(short, long)]
        area_code: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show locations sorted by VoLTE traffic
    Volte {
        /// Path to the telemetry workbook (.xlsx)
        file: PathBuf,

        /// Service area to report on (defaults to the configured area)
        #[arg(short, long)]
        area_code: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the per-cell rows of one location
    Detail {
        /// Path to the telemetry workbook (.xlsx)
        file: PathBuf,

        /// Location name (case and surrounding spaces are ignored)
        #[arg(short, long)]
        location: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show low-usage locations and zero-data cells
    LowTraffic {
        /// Path to the telemetry workbook (.xlsx)
        file: PathBuf,

        /// Service area to report on (defaults to the configured area)
        #[arg(short, long)]
        area_code: Option<String>,

        /// Usage threshold in GB (defaults to the configured threshold)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List all locations in sorted order
    Locations {
        /// Path to the telemetry workbook (.xlsx)
        file: PathBuf,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    #[command(long_about = "Generate the VLU 4G PDF report.

The report holds the data usage view, the VoLTE view, the detail of one
location and the zero-data cells, all for the configured default area.
The report date comes from the configured cell of the raw sheet (column R,
second data row by default); today's date is used when that cell is empty
or unreadable.

OUTPUT:
  <output-dir>/VLU_4G_Report_<DD-MM-YYYY>.pdf
  <output-dir>/VLU_4G_Report_<DD-MM-YYYY>.html   (with --html)")]
    /// Generate the PDF report
    Report {
        /// Path to the telemetry workbook (.xlsx)
        file: PathBuf,

        /// Location for the detail section (defaults to the first location)
        #[arg(short, long)]
        location: Option<String>,

        /// Directory to write the report into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Also write the rendered HTML
        #[arg(long)]
        html: bool,
    },

    /// Print the effective configuration as YAML
    Config,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "vlu_report=debug"
    } else {
        "vlu_report=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ReportConfig::load(cli.config.as_deref())?;
    let verbose = cli.verbose;

    match cli.command {
        Commands::Usage {
            file,
            area_code,
            json,
        } => cli::usage(file, &config, area_code, json, verbose)?,

        Commands::Volte {
            file,
            area_code,
            json,
        } => cli::volte(file, &config, area_code, json, verbose)?,

        Commands::Detail {
            file,
            location,
            json,
        } => cli::detail(file, &config, location, json, verbose)?,

        Commands::LowTraffic {
            file,
            area_code,
            threshold,
            json,
        } => cli::low_traffic(file, &config, area_code, threshold, json, verbose)?,

        Commands::Locations { file, json } => cli::locations(file, &config, json, verbose)?,

        Commands::Report {
            file,
            location,
            output_dir,
            html,
        } => cli::report(file, &config, location, output_dir, html, verbose)?,

        Commands::Config => cli::show_config(&config)?,
    }

    Ok(())
}
