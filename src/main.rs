use anyhow::{Context, Result, bail};
use camino::Utf8PathBuf;
use clap::Parser;
use printlayout::Session;
use printlayout::canvas::JsonCanvas;
use printlayout::model::PhysicalSize;
use printlayout::table::{CsvSource, TableSource};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Match a print table against canvas layers and resize them",
    long_about = None
)]
struct Cli {
    /// Design table (.csv, or .xlsx/.xls/.ods with the `xlsx` feature)
    #[arg(value_name = "TABLE")]
    table: Utf8PathBuf,

    /// Canvas document as JSON
    #[arg(value_name = "CANVAS")]
    canvas: Utf8PathBuf,

    /// Only list prints whose article code contains this text (case-insensitive)
    #[arg(short, long)]
    filter: Option<String>,

    /// Select the print at this position of the matched list
    #[arg(short, long)]
    select: Option<usize>,

    /// Target width in mm for the selected print
    #[arg(long, requires_all = ["select", "height"])]
    width: Option<f64>,

    /// Target height in mm for the selected print
    #[arg(long, requires_all = ["select", "width"])]
    height: Option<f64>,

    /// Write the (possibly transformed) canvas document here
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Print the matched records as JSON
    #[arg(long)]
    json: bool,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_table(path: &Utf8PathBuf) -> Result<Box<dyn TableSource>> {
    match path.extension().map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("tsv") => Ok(Box::new(CsvSource::new(path).with_delimiter(b'\t'))),
        #[cfg(feature = "xlsx")]
        Some("xlsx" | "xls" | "xlsm" | "ods") => {
            Ok(Box::new(printlayout::table::XlsxSource::new(path)))
        }
        _ => bail!("Unsupported table format: {}", path),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut session = Session::new();
    let mut source = open_table(&cli.table)?;
    let name = cli.table.file_name().unwrap_or(cli.table.as_str()).to_string();
    session.load_table(&name, source.as_mut())?;

    let mut canvas = JsonCanvas::load(&cli.canvas)?;
    session
        .refresh(&canvas)
        .with_context(|| format!("Reconcile against {}", cli.canvas))?;

    if let Some(index) = cli.select {
        if !session.select(index, &mut canvas) {
            bail!("{}", session.status());
        }
    }

    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        session.apply_size(PhysicalSize::new(width, height), &mut canvas)?;
        let status = session.status().to_string();
        session.refresh(&canvas)?;
        eprintln!("{}", status);
    }

    if let Some(filter) = &cli.filter {
        session.set_filter(filter.clone());
    }

    if let Some(out) = &cli.output {
        canvas.save(out)?;
    }

    let entries = session.visible();
    if cli.json {
        let records: Vec<_> = entries.iter().map(|e| e.record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for e in &entries {
            let r = e.record;
            println!(
                "{} [{}] {:<16} {:<8} {:<20} layer {}",
                if e.selected { '*' } else { ' ' },
                e.view_index,
                r.article_code,
                r.nominal_size,
                r.dimensions_label(),
                r.matched_layer_id()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
    }
    eprintln!("{}", session.status());
    Ok(())
}
