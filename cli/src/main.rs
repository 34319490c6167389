//! untextract CLI - table reconstruction from document-analysis responses

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untextract::parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INDEX};
use untextract::{
    extract_tables_with_options, parse_response_file, BlockCollection, ColumnWidth,
    ExtractOptions, ExtractionResult, ExtractionStats, JsonFormat, RenderOptions, RowPolicy,
    UploadPolicy,
};

#[derive(Parser)]
#[command(name = "untextract")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild tables from document-analysis block responses", long_about = None)]
struct Cli {
    /// Saved analysis response (JSON)
    #[arg(value_name = "RESPONSE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write tables as JSON, Markdown and text into a directory
    Convert {
        /// Saved analysis response (JSON)
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        assembly: AssemblyArgs,
    },

    /// Print tables as JSON
    Json {
        /// Saved analysis response (JSON)
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        assembly: AssemblyArgs,
    },

    /// Print tables as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Saved analysis response (JSON)
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Do not treat the first row as a header
        #[arg(long)]
        no_header: bool,

        /// Prefix each table with a caption
        #[arg(long)]
        captions: bool,

        #[command(flatten)]
        assembly: AssemblyArgs,
    },

    /// Print tables as tab-separated text
    Text {
        /// Saved analysis response (JSON)
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Prefix each table with a caption
        #[arg(long)]
        captions: bool,

        #[command(flatten)]
        assembly: AssemblyArgs,
    },

    /// Show block and table statistics
    Info {
        /// Saved analysis response (JSON)
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        assembly: AssemblyArgs,
    },

    /// Check whether a document would be accepted for analysis
    Check {
        /// Document to check (PNG, JPEG or PDF)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Maximum size in megabytes
        #[arg(long, default_value = "10", env = "UNTEXTRACT_MAX_SIZE_MB")]
        max_size_mb: u64,
    },

    /// Show version information
    Version,
}

/// Table assembly settings shared by the extraction commands.
#[derive(Args, Clone)]
struct AssemblyArgs {
    /// Abort on the first malformed cell instead of skipping it
    #[arg(long, env = "UNTEXTRACT_STRICT")]
    strict: bool,

    /// Maximum depth when resolving cell text
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "UNTEXTRACT_MAX_DEPTH")]
    max_depth: usize,

    /// Largest accepted row or column index
    #[arg(long, default_value_t = DEFAULT_MAX_INDEX, env = "UNTEXTRACT_MAX_INDEX")]
    max_index: u32,

    /// Row width policy
    #[arg(long, value_enum, default_value = "per-row", env = "UNTEXTRACT_COLUMN_WIDTH")]
    column_width: WidthMode,

    /// Which rows to emit
    #[arg(long, value_enum, default_value = "compact", env = "UNTEXTRACT_ROWS")]
    rows: RowMode,
}

impl Default for AssemblyArgs {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_index: DEFAULT_MAX_INDEX,
            column_width: WidthMode::PerRow,
            rows: RowMode::Compact,
        }
    }
}

impl From<&AssemblyArgs> for ExtractOptions {
    fn from(args: &AssemblyArgs) -> Self {
        let options = ExtractOptions::new()
            .with_max_depth(args.max_depth)
            .with_max_index(args.max_index)
            .with_column_width(args.column_width.into())
            .with_row_policy(args.rows.into());
        if args.strict {
            options.strict()
        } else {
            options.lenient()
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum WidthMode {
    /// Each row as wide as its own last cell
    PerRow,
    /// Every row as wide as the widest row
    TableWide,
}

impl From<WidthMode> for ColumnWidth {
    fn from(mode: WidthMode) -> Self {
        match mode {
            WidthMode::PerRow => ColumnWidth::PerRow,
            WidthMode::TableWide => ColumnWidth::TableWide,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RowMode {
    /// Skip missing and blank rows
    Compact,
    /// Keep every row position
    Positional,
}

impl From<RowMode> for RowPolicy {
    fn from(mode: RowMode) -> Self {
        match mode {
            RowMode::Compact => RowPolicy::Compact,
            RowMode::Positional => RowPolicy::Positional,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            assembly,
        }) => cmd_convert(&input, output.as_deref(), &assembly),
        Some(Commands::Json {
            input,
            output,
            compact,
            assembly,
        }) => cmd_json(&input, output.as_deref(), compact, &assembly),
        Some(Commands::Markdown {
            input,
            output,
            no_header,
            captions,
            assembly,
        }) => cmd_markdown(&input, output.as_deref(), !no_header, captions, &assembly),
        Some(Commands::Text {
            input,
            output,
            captions,
            assembly,
        }) => cmd_text(&input, output.as_deref(), captions, &assembly),
        Some(Commands::Info {
            input,
            json,
            assembly,
        }) => cmd_info(&input, json, &assembly),
        Some(Commands::Check { file, max_size_mb }) => cmd_check(&file, max_size_mb),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: JSON to stdout, or a full conversion when an output dir is given
            match (cli.input, cli.output) {
                (Some(input), Some(output)) => {
                    cmd_convert(&input, Some(&output), &AssemblyArgs::default())
                }
                (Some(input), None) => cmd_json(&input, None, false, &AssemblyArgs::default()),
                (None, _) => {
                    println!("{}", "Usage: untextract <RESPONSE> [OUTPUT]".yellow());
                    println!("       untextract --help for more information");
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(
    input: &Path,
    assembly: &AssemblyArgs,
) -> Result<(BlockCollection, ExtractionResult), Box<dyn std::error::Error>> {
    let blocks = parse_response_file(input)?;
    let result = extract_tables_with_options(&blocks, &ExtractOptions::from(assembly))?;
    Ok((blocks, result))
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    PathBuf::from(format!("{}_tables", stem))
}

fn cmd_convert(input: &Path, output: Option<&Path>, assembly: &AssemblyArgs) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(input));

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Assembling tables...");
    let (_, result) = load(input, assembly)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = untextract::render::to_json(&result, JsonFormat::Pretty)?;
    fs::write(output_dir.join("tables.json"), &json)?;
    pb.inc(1);

    pb.set_message("Generating Markdown and text...");
    let render_options = RenderOptions::new().with_captions(true);
    let markdown = untextract::render::to_markdown(&result.tables, &render_options)?;
    fs::write(output_dir.join("tables.md"), &markdown)?;
    let text = untextract::render::to_text(&result.tables, &render_options)?;
    fs::write(output_dir.join("tables.txt"), &text)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} tables)",
        "Output files:".green().bold(),
        output_dir.display(),
        result.count
    );
    println!("  {} tables.json", "├─".dimmed());
    println!("  {} tables.md", "├─".dimmed());
    println!("  {} tables.txt", "└─".dimmed());

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    assembly: &AssemblyArgs,
) -> CliResult {
    let (_, result) = load(input, assembly)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = untextract::render::to_json(&result, format)?;
    write_or_print(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    header: bool,
    captions: bool,
    assembly: &AssemblyArgs,
) -> CliResult {
    let (_, result) = load(input, assembly)?;

    let render_options = RenderOptions::new()
        .with_header_row(header)
        .with_captions(captions);
    let markdown = untextract::render::to_markdown(&result.tables, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    captions: bool,
    assembly: &AssemblyArgs,
) -> CliResult {
    let (_, result) = load(input, assembly)?;

    let render_options = RenderOptions::new().with_captions(captions);
    let text = untextract::render::to_text(&result.tables, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_info(input: &Path, json: bool, assembly: &AssemblyArgs) -> CliResult {
    let (blocks, result) = load(input, assembly)?;
    let stats = ExtractionStats::from_result(&result);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Response Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), blocks.len());
    for (block_type, count) in blocks.count_by_type() {
        println!("  {} {}: {}", "·".dimmed(), block_type, count);
    }

    println!();
    println!("{}", "Table Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Rows".bold(), stats.row_count);
    println!(
        "{}: {} ({} filled)",
        "Cells".bold(),
        stats.cell_count,
        stats.filled_cell_count
    );
    println!("{}: {}", "Ragged tables".bold(), stats.ragged_table_count);

    if !result.diagnostics.is_empty() {
        println!();
        println!("{}", "Diagnostics".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        for diagnostic in &result.diagnostics {
            println!("  {} {}", diagnostic.block_id.dimmed(), diagnostic.fault);
        }
    }

    Ok(())
}

fn megabytes(mb: u64) -> u64 {
    mb.saturating_mul(1024 * 1024)
}

fn cmd_check(file: &Path, max_size_mb: u64) -> CliResult {
    let policy = UploadPolicy::new().with_max_size(megabytes(max_size_mb));
    let kind = untextract::validate_path(file, &policy)?;

    let data = fs::read(file)?;
    println!(
        "{} {} ({}, {} bytes)",
        "Accepted".green(),
        file.display(),
        kind.mime_type(),
        data.len()
    );

    match untextract::detect_kind_from_bytes(&data) {
        Some(detected) if detected != kind => println!(
            "{} content looks like {}, extension says {}",
            "Warning:".yellow(),
            detected,
            kind
        ),
        None => println!("{} content signature not recognized", "Warning:".yellow()),
        _ => {}
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untextract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Table reconstruction from document-analysis responses");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/untextract".dimmed()
    );
    println!("License: MIT");
}
