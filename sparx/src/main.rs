//! `sparx` - inspect a compressed sparse matrix stored as a raw array directory

use clap::{Parser, Subcommand};
use sparx::{
    parse_range, AccessConfig, DataType, IndexElement, IndexType, LineCursor, MatrixElement,
    RawArrayDirectory, SparseAccessor,
};
use std::{fmt::Display, path::PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Random access over compressed sparse (CSR/CSC) matrices stored as raw arrays")]
struct Cli {
    /// Directory holding descriptor.json, data.bin, indices.bin and indptr.bin
    dir: PathBuf,

    /// JSON access configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the storage descriptor
    Info,
    /// Read one value
    Get {
        row: i64,
        col: i64,
    },
    /// Print every value on one row (axis 0) or column (axis 1)
    Line {
        #[arg(long, default_value_t = 0)]
        axis: usize,

        #[arg(long)]
        index: i64,

        /// Positions along the line (format: start:end)
        #[arg(long)]
        range: Option<String>,
    },
    /// Run full structural validation
    Validate,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AccessConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => AccessConfig::default(),
    };

    let dir = RawArrayDirectory::open(&cli.dir)?;

    match dir.descriptor().data_type {
        DataType::F32 => with_index::<f32>(&dir, &config, &cli.command),
        DataType::F64 => with_index::<f64>(&dir, &config, &cli.command),
        DataType::I32 => with_index::<i32>(&dir, &config, &cli.command),
        DataType::I64 => with_index::<i64>(&dir, &config, &cli.command),
        DataType::U32 => with_index::<u32>(&dir, &config, &cli.command),
        DataType::U64 => with_index::<u64>(&dir, &config, &cli.command),
    }
}

fn print_info(dir: &RawArrayDirectory) -> CliResult<()> {
    let d = dir.descriptor();
    println!("Matrix: {}", dir.root().display());
    println!("   Orientation: {}", d.orientation);
    println!("   Dimensions: {} x {}", d.nrows(), d.ncols());
    println!("   Stored entries: {}", d.nnz);
    println!("   Data type: {}", d.data_type);
    println!("   Index type: {}", d.index_type);
    println!("   Density: {:.6}%", d.density() * 100.0);
    Ok(())
}

fn with_index<T>(dir: &RawArrayDirectory, config: &AccessConfig, command: &Commands) -> CliResult<()>
where
    T: MatrixElement + Display,
{
    match dir.descriptor().index_type {
        IndexType::I32 => run::<T, i32>(dir, config, command),
        IndexType::I64 => run::<T, i64>(dir, config, command),
        IndexType::U32 => run::<T, u32>(dir, config, command),
        IndexType::U64 => run::<T, u64>(dir, config, command),
    }
}

fn run<T, I>(dir: &RawArrayDirectory, config: &AccessConfig, command: &Commands) -> CliResult<()>
where
    T: MatrixElement + Display,
    I: IndexElement,
{
    let mut storage = dir.storage::<T, I>()?;

    match command {
        Commands::Info => {
            print_info(dir)?;
            println!("   Mapped entries: {}", storage.nnz());
            Ok(())
        }
        Commands::Validate => {
            let start = std::time::Instant::now();
            storage.validate()?;
            println!("ok: {} stored entries checked in {:.2?}", storage.nnz(), start.elapsed());
            Ok(())
        }
        Commands::Get { row, col } => {
            let mut accessor = SparseAccessor::open(storage, config)?;
            println!("{}", accessor.get_at(&[*row, *col])?);
            Ok(())
        }
        Commands::Line { axis, index, range } => {
            let accessor = SparseAccessor::open(storage, config)?;
            let mut cursor = LineCursor::new(accessor, *axis, *index)?;
            if let Some(range) = range {
                cursor = cursor.with_range(parse_range(range)?)?;
            }
            for item in cursor {
                let (pos, value) = item?;
                println!("{pos}\t{value}");
            }
            Ok(())
        }
    }
}
