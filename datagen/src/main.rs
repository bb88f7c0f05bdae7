//! Training data generator for the Karel grid world
//!
//! Produces (program, input world, output world) triples for program
//! synthesis models. Each randomly generated program contributes a
//! fixed-size batch of examples sampled under a no-change quota and a
//! per-example attempt cutoff; splits are written as parallel-array
//! archives plus plain-text code listings.

use clap::Parser;
use karel::config::KarelConfig;
use karel::dataset::{generate_split, write_listing, write_split, CodeSource};
use karel::dataset::{GrammarSource, KarelOracle};
use karel::dsl;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "karel-datagen")]
#[command(about = "Generate Karel program-synthesis training data")]
struct Args {
    /// Load all generation settings from a karel.toml instead of the flags
    /// below (mode, beautify and debug still apply)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Training split size
    #[arg(long, default_value = "1000000")]
    num_train: usize,

    /// Test split size
    #[arg(long, default_value = "5000")]
    num_test: usize,

    /// Validation split size
    #[arg(long, default_value = "5000")]
    num_val: usize,

    /// Number of examples per generated program
    #[arg(long, default_value = "10")]
    num_examples: usize,

    /// Target fraction of examples per program whose execution changes
    /// nothing
    #[arg(long, default_value = "0.2")]
    no_change_fraction: f64,

    /// World-initialization attempts per example before a program is
    /// abandoned
    #[arg(long, default_value = "10000")]
    cutoff: usize,

    /// Candidate programs per batch before generation fails
    #[arg(long, default_value = "1000")]
    max_batch_attempts: usize,

    /// Output directory
    #[arg(long, default_value = "data")]
    data_dir: String,

    /// Maximum statement nesting depth of generated programs
    #[arg(long, default_value = "5")]
    max_depth: usize,

    /// Surface grammar (curly, synthesis)
    #[arg(long, default_value = "curly")]
    grammar: String,

    /// What to save - only the generated programs or also example worlds
    /// (code-only, examples-and-code)
    #[arg(long, default_value = "examples-and-code")]
    mode: String,

    /// Width of the grid world
    #[arg(long, default_value = "8")]
    world_width: usize,

    /// Height of the grid world
    #[arg(long, default_value = "8")]
    world_height: usize,

    /// Interpreter statement budget per execution
    #[arg(long, default_value = "10000")]
    max_steps: u64,

    /// Random seed for reproducibility
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Pretty-print programs in the code listings
    #[arg(long, default_value = "false")]
    beautify: bool,

    /// Print generated worlds and programs
    #[arg(long, default_value = "false")]
    debug: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<KarelConfig> {
        if let Some(path) = &self.config {
            return Ok(KarelConfig::load(path)?);
        }
        let mut config = KarelConfig::default();
        config.dataset.num_train = self.num_train;
        config.dataset.num_test = self.num_test;
        config.dataset.num_val = self.num_val;
        config.dataset.num_examples = self.num_examples;
        config.dataset.no_change_fraction = self.no_change_fraction;
        config.dataset.cutoff = self.cutoff;
        config.dataset.max_batch_attempts = self.max_batch_attempts;
        config.dataset.data_dir = self.data_dir.clone();
        config.dataset.seed = self.seed;
        config.world.width = self.world_width;
        config.world.height = self.world_height;
        config.world.max_steps = self.max_steps;
        config.grammar.max_depth = self.max_depth;
        config.grammar.variant = self
            .grammar
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let code_only = match args.mode.as_str() {
        "code-only" => true,
        "examples-and-code" => false,
        other => anyhow::bail!(
            "unknown mode `{}` (expected `code-only` or `examples-and-code`)",
            other
        ),
    };

    // Configuration errors abort before any generation work.
    let config = args.resolve_config()?;
    config.validate()?;

    println!("Karel Training Data Generator");
    println!("=============================");
    println!("Output: {}", config.dataset.data_dir);
    println!(
        "Splits: train={} test={} val={}",
        config.dataset.num_train, config.dataset.num_test, config.dataset.num_val
    );
    println!("Examples per program: {}", config.dataset.num_examples);
    println!(
        "World: {}x{}",
        config.world.width, config.world.height
    );
    println!("Grammar: {}", config.grammar.variant);
    println!("No-change fraction: {}", config.dataset.no_change_fraction);
    println!("Seed: {}", config.dataset.seed);
    println!(
        "Mode: {}",
        if code_only { "code only" } else { "examples and code" }
    );
    println!();

    let params = config.params();
    let variant = config.grammar.variant;
    let data_dir = PathBuf::from(&config.dataset.data_dir);

    let mut codes = GrammarSource::new(config.dataset.seed);
    let mut oracle =
        KarelOracle::new(config.dataset.seed.wrapping_add(1)).with_max_steps(config.world.max_steps);

    for (name, data_num) in config.splits() {
        if data_num == 0 {
            println!("{}: empty split, skipped", name);
            continue;
        }

        if code_only {
            let programs: Vec<_> = (0..data_num)
                .map(|_| codes.random_code(params.max_depth))
                .collect();
            write_listing(&data_dir, name, &programs, variant, args.beautify)?;
            println!("{}: wrote {} programs", name, programs.len());
            continue;
        }

        let mut produced = 0usize;
        let split = generate_split(
            name,
            data_num,
            &mut codes,
            &mut oracle,
            &params,
            variant,
            |batch| {
                produced += batch.pairs.len();
                if args.debug {
                    println!("{}", dsl::pretty(&batch.program));
                    for pair in &batch.pairs {
                        println!("input:");
                        for row in pair.input.render() {
                            println!("  {}", row);
                        }
                        println!("output:");
                        for row in pair.output.render() {
                            println!("  {}", row);
                        }
                    }
                    println!("------------------\n");
                }
                if produced % 10_000 == 0 {
                    println!("  {}: {}/{} examples...", name, produced, data_num);
                }
            },
        )?;

        println!("{}: wrote {} pairs", name, split.len());
        write_split(
            &data_dir,
            name,
            split,
            params.num_examples,
            variant,
            args.beautify,
        )?;
    }

    println!("\nGeneration complete!");
    Ok(())
}
