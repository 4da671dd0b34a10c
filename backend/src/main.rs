//! Tripboard CLI - Parse itinerary CSV exports
//!
//! # Main Commands
//!
//! ```bash
//! tripboard parse trip.csv                  # Parse CSV to JSON records
//! tripboard show trip.csv --day Day2        # Grouped, filtered itinerary
//! tripboard fetch <published-csv-url>       # Download and parse
//! tripboard serve                           # Start HTTP server (port 3000)
//! ```
//!
//! # Inspection Commands
//!
//! ```bash
//! tripboard days trip.csv                   # List itinerary days
//! tripboard types trip.csv                  # List activity types
//! tripboard links trip.csv                  # Map / other links per activity
//! tripboard locate trip.csv                 # Approximate coordinates
//! tripboard validate records.json           # Validate exported JSON
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tripboard::{
    classify_links, fetch_url, ingest_file, ingest_payload, link_label, locate, map_target,
    to_csv, to_json, validate_records, ActivityFilter, CoordinateTable, IngestOptions,
    IngestResult, Selection, Settings,
};

#[derive(Parser)]
#[command(name = "tripboard")]
#[command(about = "Parse itinerary CSV exports into activity records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output records
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the itinerary grouped by day
    Show {
        /// Input CSV file
        input: PathBuf,

        /// Only this day (e.g. Day2)
        #[arg(short, long)]
        day: Option<String>,

        /// Only this activity type (e.g. Food)
        #[arg(short = 't', long = "type")]
        activity_type: Option<String>,
    },

    /// List itinerary days
    Days {
        /// Input CSV file
        input: PathBuf,
    },

    /// List activity types
    Types {
        /// Input CSV file
        input: PathBuf,
    },

    /// Classify each activity's links
    Links {
        /// Input CSV file
        input: PathBuf,
    },

    /// Approximate coordinates for each activity
    Locate {
        /// Input CSV file
        input: PathBuf,

        /// JSON coordinate table (default: built-in or TRIPBOARD_COORDINATES)
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Validate a JSON array of records
    Validate {
        /// Input JSON file
        input: PathBuf,
    },

    /// Download a published CSV and parse it
    Fetch {
        /// CSV export URL
        url: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (default: TRIPBOARD_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    let settings = Settings::from_env();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, format, output } => {
            cmd_parse(&input, format, output.as_deref(), &settings)
        }
        Commands::Show { input, day, activity_type } => {
            cmd_show(&input, day.as_deref(), activity_type.as_deref(), &settings)
        }
        Commands::Days { input } => cmd_days(&input, &settings),
        Commands::Types { input } => cmd_types(&input, &settings),
        Commands::Links { input } => cmd_links(&input, &settings),
        Commands::Locate { input, table } => cmd_locate(&input, table.as_deref(), &settings),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Fetch { url, output } => cmd_fetch(&url, output.as_deref(), &settings).await,
        Commands::Serve { port } => cmd_serve(port, settings).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn options(settings: &Settings, filter: ActivityFilter) -> IngestOptions {
    IngestOptions { filter, max_payload_bytes: settings.max_payload_bytes }
}

fn load(input: &Path, settings: &Settings) -> Result<IngestResult, Box<dyn std::error::Error>> {
    Ok(ingest_file(input, &options(settings, ActivityFilter::default()))?)
}

fn cmd_parse(
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    settings: &Settings,
) -> CmdResult {
    let result = load(input, settings)?;
    eprintln!("✅ Parsed {} activities ({} skipped)", result.records.len(), result.skipped.len());

    let content = match format {
        OutputFormat::Json => to_json(&result.records)?,
        OutputFormat::Csv => to_csv(&result.records),
    };
    write_output(&content, output)
}

fn cmd_show(
    input: &Path,
    day: Option<&str>,
    activity_type: Option<&str>,
    settings: &Settings,
) -> CmdResult {
    let filter = ActivityFilter::new(Selection::from_option(day), Selection::from_option(activity_type));
    let result = ingest_file(input, &options(settings, filter))?;

    if result.groups.is_empty() {
        eprintln!("📭 No activities match.");
        return Ok(());
    }

    for group in &result.groups {
        println!("📅 {} ({} activities)", group.day, group.activities.len());
        for activity in &group.activities {
            let time = if activity.time_frame.is_empty() {
                String::new()
            } else {
                format!("[{}] ", activity.time_frame)
            };
            println!("   • {}{} ({})", time, activity.name, activity.activity_type);
            if !activity.price.is_empty() {
                println!("       💴 {}", activity.price);
            }
            for line in activity.notes.lines().filter(|l| !l.trim().is_empty()) {
                println!("       📝 {}", line.trim());
            }
        }
        println!();
    }
    Ok(())
}

fn cmd_days(input: &Path, settings: &Settings) -> CmdResult {
    let result = load(input, settings)?;
    for group in &result.groups {
        println!("{}\t{}", group.day, group.activities.len());
    }
    Ok(())
}

fn cmd_types(input: &Path, settings: &Settings) -> CmdResult {
    let result = load(input, settings)?;
    for kind in &result.types {
        let count = result.records.iter().filter(|r| &r.activity_type == kind).count();
        println!("{}\t{}", kind, count);
    }
    Ok(())
}

fn cmd_links(input: &Path, settings: &Settings) -> CmdResult {
    let result = load(input, settings)?;

    let rows: Vec<Value> = result
        .records
        .iter()
        .map(|r| {
            let links = classify_links(&r.link);
            let labels: Vec<String> = links.other_links.iter().map(|l| link_label(l)).collect();
            json!({
                "id": r.id,
                "name": r.name,
                "links": links,
                "otherLabels": labels,
                "map": map_target(r),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn cmd_locate(input: &Path, table_path: Option<&Path>, settings: &Settings) -> CmdResult {
    let table = match table_path.or(settings.coordinates_path.as_deref()) {
        Some(path) => {
            eprintln!("🗺️  Coordinate table: {}", path.display());
            CoordinateTable::from_file(path)?
        }
        None => CoordinateTable::builtin(),
    };

    let result = load(input, settings)?;
    let mut located = 0;
    for record in &result.records {
        match locate(record, &table) {
            Some(c) => {
                located += 1;
                println!("{}\t{}\t{:.4}\t{:.4}", record.id, record.name, c.lat, c.lng);
            }
            None => println!("{}\t{}\t-\t-", record.id, record.name),
        }
    }
    eprintln!("📍 Located {}/{} activities", located, result.records.len());
    Ok(())
}

fn cmd_validate(input: &Path) -> CmdResult {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let records: Vec<Value> = serde_json::from_str(&content)?;
    let (valid, invalid, errors) = validate_records(&records);

    for (i, errs) in errors.iter().take(5) {
        eprintln!("\n❌ Record {} invalid:", i);
        for err in errs.iter().take(3) {
            eprintln!("   - {}", err);
        }
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", valid, invalid);

    if invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_fetch(url: &str, output: Option<&Path>, settings: &Settings) -> CmdResult {
    eprintln!("🌐 Fetching: {}", url);
    let payload = fetch_url(url, settings.max_payload_bytes).await?;
    let result = ingest_payload(payload, &options(settings, ActivityFilter::default()));

    write_output(&to_json(&result.records)?, output)
}

async fn cmd_serve(port: Option<u16>, settings: Settings) -> CmdResult {
    let settings = Settings { port: port.unwrap_or(settings.port), ..settings };
    tripboard::server::start_server(settings).await
}

fn write_output(content: &str, path: Option<&Path>) -> CmdResult {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
