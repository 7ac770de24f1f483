//! CLI entry point for rendering tinted tile mosaics

use clap::Parser;
use tintmosaic::io::cli::{Cli, FileProcessor};

fn main() -> tintmosaic::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
