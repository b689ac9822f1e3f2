//! ACFA CLI - Command-line tool for Armored Core: For Answer save files.
//!
//! This is the main entry point for the `acfa` command-line application.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use acfa::prelude::*;
use acfa::schematic::parts::{
    extract_paint, generate_full_random_decal_data, randomize_colors, randomize_decal_bytes,
    randomize_parts, replace_decal_bytes, replace_decals, replace_paint,
};

/// ACFA - Armored Core: For Answer schematic and emblem tool
#[derive(Parser)]
#[command(name = "acfa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the schematics stored in DESDOC.DAT
    List {
        /// Path to DESDOC.DAT
        #[arg(short, long, env = "ACFA_DESDOC")]
        desdoc: PathBuf,
    },

    /// Show the parts and tuning of one schematic
    Show {
        #[command(flatten)]
        source: SchematicSource,

        /// Path to the part catalog text file
        #[arg(short, long, env = "ACFA_PART_CATALOG")]
        catalog: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export one schematic from DESDOC.DAT as a standalone .ac4a file
    Export {
        /// Path to DESDOC.DAT
        #[arg(short, long, env = "ACFA_DESDOC")]
        desdoc: PathBuf,

        /// Schematic index
        #[arg(short, long)]
        index: usize,

        /// Output file (defaults to "{name}_{designer}.ac4a")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Insert a standalone .ac4a file into DESDOC.DAT
    Insert {
        /// Standalone schematic file
        #[arg(short, long)]
        input: PathBuf,

        /// Path to DESDOC.DAT
        #[arg(short, long, env = "ACFA_DESDOC")]
        desdoc: PathBuf,
    },

    /// Randomize a schematic and write it as a standalone .ac4a file
    Randomize {
        #[command(flatten)]
        source: SchematicSource,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Path to the part catalog text file
        #[arg(short, long, env = "ACFA_PART_CATALOG")]
        catalog: PathBuf,

        /// Random seed (defaults to OS entropy)
        #[arg(long)]
        seed: Option<u64>,

        /// Randomize parts
        #[arg(long)]
        parts: bool,

        /// Randomize colors
        #[arg(long)]
        colors: bool,

        /// Randomize decals
        #[arg(long)]
        decals: bool,

        /// Fill the decal region with raw random bytes instead of placed layers
        #[arg(long, requires = "decals")]
        raw_decals: bool,

        /// New schematic name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List the emblems stored in PAINT.DAT
    Emblems {
        /// Path to PAINT.DAT
        #[arg(short, long, env = "ACFA_PAINT")]
        paint: PathBuf,
    },

    /// Add an emblem to the first free slot of PAINT.DAT
    EmblemAdd {
        /// Path to PAINT.DAT
        #[arg(short, long, env = "ACFA_PAINT")]
        paint: PathBuf,

        /// 132-byte emblem file (a random emblem is generated if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Layer count for a random emblem (1-16, random if omitted)
        #[arg(short, long, conflicts_with = "input")]
        layers: Option<usize>,

        /// Random seed (defaults to OS entropy)
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Where to read a single schematic from.
#[derive(Args)]
struct SchematicSource {
    /// DESDOC.DAT or a standalone .ac4a file
    #[arg(short, long, env = "ACFA_DESDOC")]
    input: PathBuf,

    /// Schematic index when reading DESDOC.DAT
    #[arg(long, default_value_t = 0)]
    index: usize,
}

impl SchematicSource {
    fn load(&self) -> Result<SchematicBlock> {
        if self.input.extension().and_then(|e| e.to_str()) == Some("ac4a") {
            acfa::schematic::load_standalone_block(&self.input)
                .with_context(|| format!("Failed to read {}", self.input.display()))
        } else {
            let desdoc = Desdoc::open(&self.input).context("Failed to open DESDOC.DAT")?;
            desdoc
                .block(self.index)
                .with_context(|| format!("Failed to read schematic {}", self.index))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::List { desdoc } => {
            cmd_list(&desdoc)?;
        }
        Commands::Show {
            source,
            catalog,
            json,
        } => {
            cmd_show(&source, &catalog, json)?;
        }
        Commands::Export {
            desdoc,
            index,
            output,
        } => {
            cmd_export(&desdoc, index, output)?;
        }
        Commands::Insert { input, desdoc } => {
            cmd_insert(&input, &desdoc)?;
        }
        Commands::Randomize {
            source,
            output,
            catalog,
            seed,
            parts,
            colors,
            decals,
            raw_decals,
            name,
        } => {
            // No selection means randomize everything.
            let all = !(parts || colors || decals);
            let options = RandomizeOptions {
                parts: parts || all,
                colors: colors || all,
                decals: decals || all,
                raw_decals,
                name,
            };
            cmd_randomize(&source, &output, &catalog, seed, &options)?;
        }
        Commands::Emblems { paint } => {
            cmd_emblems(&paint)?;
        }
        Commands::EmblemAdd {
            paint,
            input,
            layers,
            seed,
        } => {
            cmd_emblem_add(&paint, input.as_deref(), layers, seed)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        })
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::debug!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

fn cmd_list(desdoc_path: &Path) -> Result<()> {
    let desdoc = Desdoc::open(desdoc_path).context("Failed to open DESDOC.DAT")?;
    let blocks = desdoc
        .active_blocks()
        .context("Failed to read schematics")?;

    for (index, block) in blocks.iter().enumerate() {
        println!(
            "{:>3}  {:<47}  {:<47}  cat {:>3}{}",
            index,
            block.name(),
            block.designer(),
            block.category(),
            if block.is_protected() { "  [protected]" } else { "" }
        );
    }

    println!("\nTotal: {} schematics", blocks.len());

    Ok(())
}

fn cmd_show(source: &SchematicSource, catalog_path: &Path, json: bool) -> Result<()> {
    let catalog = PartCatalog::from_file(catalog_path).context("Failed to load part catalog")?;
    let block = source.load()?;
    let info = SchematicInfo::decode(&block, &catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info.title());
    println!(
        "Category: {}{}",
        info.category,
        if info.protected { " (protected)" } else { "" }
    );
    println!("Timestamp: {:#018x}", info.timestamp);

    println!("\nParts:");
    for part in &info.parts {
        println!("  {:<16} {:>4}  {}", part.category, part.part_id, part.part_name);
    }

    println!("\nTuning:");
    for (label, value) in &info.tuning {
        println!("  {:<24} {:>3}", label, value);
    }

    Ok(())
}

fn cmd_export(desdoc_path: &Path, index: usize, output: Option<PathBuf>) -> Result<()> {
    let desdoc = Desdoc::open(desdoc_path).context("Failed to open DESDOC.DAT")?;
    let block = desdoc
        .block(index)
        .with_context(|| format!("Failed to read schematic {index}"))?;

    let output = output.unwrap_or_else(|| PathBuf::from(block.export_file_name()));
    export_standalone(&block, &output).context("Failed to write schematic")?;

    println!("Exported \"{}\" to {}", block.name(), output.display());

    Ok(())
}

fn cmd_insert(input: &Path, desdoc_path: &Path) -> Result<()> {
    let report = insert_schematic_file(input, desdoc_path).context("Failed to insert schematic")?;

    println!("Inserted into slot {}", report.slot);
    println!("Backup written to {}", report.backup_path.display());

    Ok(())
}

struct RandomizeOptions {
    parts: bool,
    colors: bool,
    decals: bool,
    raw_decals: bool,
    name: Option<String>,
}

fn cmd_randomize(
    source: &SchematicSource,
    output: &Path,
    catalog_path: &Path,
    seed: Option<u64>,
    options: &RandomizeOptions,
) -> Result<()> {
    let catalog = PartCatalog::from_file(catalog_path).context("Failed to load part catalog")?;
    let mut block = source.load()?;
    let mut rng = make_rng(seed);

    if options.parts {
        block = randomize_parts(&block, &catalog, &mut rng);
    }

    if options.colors {
        let paint = extract_paint(&block);
        let colors = randomize_colors(&paint.colors, &mut rng)?;
        block = replace_paint(&block, Some(&colors), None, None)?;
    }

    if options.decals {
        block = if options.raw_decals {
            replace_decal_bytes(&block, &randomize_decal_bytes(&mut rng))?
        } else {
            let decals = generate_full_random_decal_data(&mut rng)?;
            replace_decals(&block, &decals)
        };
    }

    if let Some(name) = &options.name {
        block = block.renamed(name);
    }

    export_standalone(&block, output).context("Failed to write schematic")?;
    println!("Wrote \"{}\" to {}", block.name(), output.display());

    Ok(())
}

fn cmd_emblems(paint_path: &Path) -> Result<()> {
    let paint = PaintDat::open(paint_path).context("Failed to open PAINT.DAT")?;
    let emblems = paint.emblems().context("Failed to decode emblems")?;

    for (slot, emblem) in emblems.iter().enumerate() {
        println!(
            "{:>2}  type {}  header {}  {} layers",
            slot,
            emblem.kind,
            emblem.header_hex(),
            emblem.active_layer_count()
        );
    }

    println!("\nTotal: {} emblems", emblems.len());

    Ok(())
}

fn cmd_emblem_add(
    paint_path: &Path,
    input: Option<&Path>,
    layers: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let emblem = match input {
        Some(path) => {
            let data = fs::read(path).context("Failed to read emblem file")?;
            Emblem::parse(&data).context("Invalid emblem file")?
        }
        None => Emblem::generate_random(layers, &mut make_rng(seed))?,
    };

    let report = append_emblem_file(paint_path, &emblem.to_bytes()).context("Failed to add emblem")?;

    println!(
        "Added emblem with {} layers to slot {}",
        emblem.active_layer_count(),
        report.slot
    );
    println!("Backup written to {}", report.backup_path.display());

    Ok(())
}
