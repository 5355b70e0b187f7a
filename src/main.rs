//! Iguana - Entry Point
//!
//! IKEMEN GO Utility for Annotating Nonspecified Attacks. Reads a
//! character's command file and writes a movelist.dat next to it, or does the
//! same for every command file under a directory.

use clap::Parser;
use iguana::batch::{convert_directory, convert_single, OutputSettings};
use iguana::core::config::{ButtonScheme, ConvertOptions};
use iguana::core::error::Result;
use std::io::{self, Write};
use std::path::PathBuf;

/// Generate Ikemen movelists from command files
#[derive(Parser, Debug)]
#[command(name = "iguana", version)]
#[command(about = "IKEMEN GO Utility for Annotating Nonspecified Attacks")]
struct Args {
    /// Command file to parse, or a directory for batch mode
    #[arg(short, long)]
    input: PathBuf,

    /// Output filename, excluding path
    #[arg(short, long, default_value = "movelist.dat")]
    output: String,

    /// Enable debug logging and print the movelist instead of saving it
    #[arg(short, long)]
    debug: bool,

    /// Preserve one-button, non-hyper moves
    #[arg(long)]
    keep1: bool,

    /// Preserve move commands detected as AI-only
    #[arg(long)]
    keepai: bool,

    /// Don't collapse motions like quarter circles into one glyph
    #[arg(long)]
    nocompress: bool,

    /// Use LP/MP/HP and LK/MK/HK button labels
    #[arg(long)]
    kp: bool,

    /// Header color (3 or 6 lowercase hex digits)
    #[arg(long)]
    color: Option<String>,

    /// Power-cost color (3 or 6 lowercase hex digits)
    #[arg(long)]
    powercolor: Option<String>,

    /// TOML file with conversion options; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Add the movelist to the character's .def file
    #[arg(long)]
    patch: bool,

    /// Skip the batch-mode confirmation
    #[arg(short, long)]
    yes: bool,
}

impl Args {
    fn options(&self) -> Result<ConvertOptions> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::load(path)?,
            None => ConvertOptions::default(),
        };

        options.keep_single_button |= self.keep1;
        options.keep_ai |= self.keepai;
        if self.nocompress {
            options.compress_motions = false;
        }
        if self.kp {
            options.buttons = ButtonScheme::Strike;
        }
        if let Some(color) = &self.color {
            options.header_color = color.clone();
        }
        if let Some(color) = &self.powercolor {
            options.power_color = color.clone();
        }

        Ok(options)
    }

    fn output(&self) -> OutputSettings {
        OutputSettings {
            file_name: self.output.clone(),
            dry_run: self.debug,
            patch_definition: self.patch,
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "iguana=debug" } else { "iguana=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Ask a yes/no question; anything but Y counts as no
fn confirm(question: &str) -> Result<bool> {
    print!("{} [Y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    if args.debug {
        tracing::debug!("Debug logging enabled.");
    }

    let options = args.options()?;
    let output = args.output();

    if args.input.is_dir() {
        println!(
            "Iguana has been given a directory as input and is in batch mode.\n\
             It will attempt to process every command file in every sub-folder in this directory.\n\
             Making a backup of this folder is recommended before continuing."
        );

        if !args.yes && !confirm("Are you sure you want to continue?")? {
            tracing::info!("Batch conversion cancelled");
            return Ok(());
        }

        let converted = convert_directory(&args.input, &options, &output)?;
        tracing::info!("Converted {} command files", converted);
    } else {
        convert_single(&args.input, &options, &output)?;
    }

    Ok(())
}
