//! bitblend - combine two images channel by channel
//!
//! Decodes two equally sized images, combines every R, G, B and A sample
//! pair with `xor`, `or` or `and`, and encodes the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "bitblend")]
#[command(author, version, about = "Bitwise blending of two images")]
#[command(long_about = "
Combines two images of identical size channel by channel with a bitwise
operator. Each channel result keeps only the low 8 bits, so the output is
lossy by design.

Examples:
  bitblend blend a.jpg b.jpg xor               # Writes result.jpeg
  bitblend blend a.png b.png and -o out.png    # Lossless output
  bitblend blend a.jpg b.jpg or -q 85 -o o.jpg
  bitblend info a.jpg b.png                    # Show image info
  RUST_LOG=bitblend_ops=trace bitblend blend a.jpg b.jpg xor
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Write logs to FILE instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine two images with xor, or, and
    #[command(visible_alias = "b")]
    Blend(BlendArgs),

    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
pub struct BlendArgs {
    /// First input image; its color model selects the output layout
    pub image_a: PathBuf,

    /// Second input image, same size as the first
    pub image_b: PathBuf,

    /// Operator: xor, or, and
    pub op: String,

    /// Output file; format follows the extension
    #[arg(short, long, default_value = "result.jpeg")]
    pub output: PathBuf,

    /// JPEG quality (1-100)
    #[arg(short = 'q', long, default_value_t = 100, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Process rows on a single thread
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Input files
    #[arg(required = true)]
    pub input: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flushes the file writer on exit.
    let _guard = logging::init(cli.verbose, cli.log.as_deref())?;

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Blend(args) => commands::blend::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn blend_defaults() {
        let cli = Cli::try_parse_from(["bitblend", "blend", "a.jpg", "b.jpg", "xor"]).unwrap();
        let Commands::Blend(args) = cli.command else {
            panic!("expected blend");
        };
        assert_eq!(args.output, PathBuf::from("result.jpeg"));
        assert_eq!(args.quality, 100);
        assert!(!args.sequential);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags() {
        let cli = Cli::try_parse_from([
            "bitblend", "-vv", "blend", "a.png", "b.png", "or", "-o", "x.png", "-j", "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, 2);
    }

    #[test]
    fn quality_range() {
        assert!(Cli::try_parse_from(["bitblend", "blend", "a", "b", "xor", "-q", "0"]).is_err());
        assert!(Cli::try_parse_from(["bitblend", "blend", "a", "b", "xor", "-q", "101"]).is_err());
    }

    #[test]
    fn info_requires_input() {
        assert!(Cli::try_parse_from(["bitblend", "info"]).is_err());
    }
}
