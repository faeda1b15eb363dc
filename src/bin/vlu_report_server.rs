//! VLU Report API Server binary
//!
//! HTTP REST API for the 4G telemetry views and the PDF report.

use std::path::PathBuf;

use clap::Parser;
use vlu_report::api::{run_api_server, server::DEFAULT_MAX_UPLOAD_MB, ApiConfig};
use vlu_report::config::ReportConfig;

#[derive(Parser, Debug)]
#[command(name = "vlu-report-server")]
#[command(version)]
#[command(about = "VLU Report API Server - 4G telemetry views and PDF reports over HTTP")]
#[command(long_about = r#"
VLU Report API Server

Every endpoint below takes the telemetry workbook (.xlsx) as the raw
request body:
  - POST /api/v1/usage        - Locations by data usage   (?area_code=)
  - POST /api/v1/volte        - Locations by VoLTE traffic (?area_code=)
  - POST /api/v1/detail       - Cells of one location      (?location=)
  - POST /api/v1/low-traffic  - Low-usage locations and zero-data cells
                                (?area_code=&threshold=)
  - POST /api/v1/locations    - Sorted location names
  - POST /api/v1/report       - PDF report                 (?location=)

Additional endpoints:
  - GET  /health              - Health check
  - GET  /version             - Server version info
  - GET  /                    - API documentation

Example usage:
  vlu-report-server                           # Start on localhost:8080
  vlu-report-server --host 0.0.0.0 --port 3000

  curl -X POST 'http://localhost:8080/api/v1/usage?area_code=Villupuram' \
    --data-binary @vlu.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "VLU_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "VLU_PORT")]
    port: u16,

    /// YAML configuration file (sheet names, column mapping, thresholds)
    #[arg(short, long, env = "VLU_CONFIG")]
    config: Option<PathBuf>,

    /// Largest accepted workbook upload, in megabytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_mb: args.max_upload_mb,
        report: ReportConfig::load(args.config.as_deref())?,
    };

    run_api_server(config).await
}
