//! Archive inspector
//!
//! Loads a generated split archive, re-checks the parallel-array
//! invariants, and renders the first few world pairs for eyeballing.

use anyhow::Context;
use clap::Parser;
use karel::dataset::SplitArchive;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "karel-inspect")]
#[command(about = "Inspect a generated Karel dataset archive")]
struct Args {
    /// Split archive to inspect
    #[arg(long, default_value = "data/train.json")]
    data_file: PathBuf,

    /// Number of world pairs to render
    #[arg(long, default_value = "3")]
    show: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let archive = SplitArchive::load(&args.data_file)
        .with_context(|| format!("failed to load {}", args.data_file.display()))?;
    archive.check().context("archive invariants violated")?;

    println!("num_examples_per_code: {}", archive.num_examples_per_code);
    println!("pairs: {}", archive.len());
    println!(
        "programs: {}",
        archive.len() / archive.num_examples_per_code
    );

    for i in 0..args.show.min(archive.len()) {
        println!();
        println!(
            "pair {} (code length {}{})",
            i,
            archive.code_lengths[i],
            if archive.inputs[i] == archive.outputs[i] {
                ", unchanged"
            } else {
                ""
            }
        );
        println!("input:");
        for row in archive.inputs[i].render() {
            println!("  {}", row);
        }
        println!("output:");
        for row in archive.outputs[i].render() {
            println!("  {}", row);
        }
    }

    Ok(())
}
