use clap::{Parser, ValueEnum};
use solsys_catalog::{SourceRecordSet, TapService};

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "sso-query")]
#[command(about = "Fetch solar-system source records from the ssotap catalog")]
#[command(version)]
struct Cli {
    /// Solar-system object identifier
    object_id: i64,

    /// Query only the source table (skip the detection join)
    #[arg(long)]
    no_detections: bool,

    /// Override the TAP service base URL
    #[arg(long)]
    service_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let join_detections = !cli.no_detections;

    let records = match &cli.service_url {
        Some(url) => {
            let service = TapService::with_base_url(url.as_str())?;
            SourceRecordSet::fetch_from(&service, cli.object_id, join_detections)?
        }
        None => SourceRecordSet::fetch_with(cli.object_id, join_detections)?,
    };

    let rows = collect_rows(&records);

    match cli.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_csv(&rows),
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct DetectionRow {
    mid_time: Option<String>,
    heliocentric_dist: Option<f64>,
    topocentric_dist: Option<f64>,
    phase_angle: Option<f64>,
}

/// Gathers the summary quantities per row. Columns absent from the query
/// result (e.g. mid times without the detection join) come back as None.
fn collect_rows(records: &SourceRecordSet) -> Vec<DetectionRow> {
    let times = records.mid_times().ok();
    let rh = records.heliocentric_dist().ok();
    let delta = records.topocentric_dist().ok();
    let alpha = records.phase_angle().ok();

    (0..records.len())
        .map(|i| DetectionRow {
            mid_time: times.as_ref().map(|t| t[i].to_calendar().to_string()),
            heliocentric_dist: rh.as_ref().map(|v| v[i]),
            topocentric_dist: delta.as_ref().map(|v| v[i]),
            phase_angle: alpha.as_ref().map(|v| v[i]),
        })
        .collect()
}

fn print_table(rows: &[DetectionRow]) {
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:4}: {}  rh={} au  delta={} au  alpha={}°",
            i + 1,
            row.mid_time.as_deref().unwrap_or("-"),
            fmt_opt(row.heliocentric_dist, 4),
            fmt_opt(row.topocentric_dist, 4),
            fmt_opt(row.phase_angle, 3),
        );
    }

    if rows.is_empty() {
        println!("No detections found for this object.");
    } else {
        println!("\nTotal detections: {}", rows.len());
    }
}

fn print_json(rows: &[DetectionRow]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

fn print_csv(rows: &[DetectionRow]) {
    println!("mid_time,heliocentric_dist,topocentric_dist,phase_angle");
    for row in rows {
        println!(
            "{},{},{},{}",
            row.mid_time.as_deref().unwrap_or(""),
            row.heliocentric_dist.map(|v| v.to_string()).unwrap_or_default(),
            row.topocentric_dist.map(|v| v.to_string()).unwrap_or_default(),
            row.phase_angle.map(|v| v.to_string()).unwrap_or_default(),
        );
    }
}

fn fmt_opt(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", digits, v),
        None => "-".to_string(),
    }
}
