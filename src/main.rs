//! Analog Entropy Generation CLI
//!
//! Command-line harness for testing and demonstrating the entropy
//! accumulation pipeline against the built-in timing-jitter source.

use analog_entropy::{
    accumulator::{EntropyAccumulator, EntropyContext},
    conditioning::HashAlgorithm,
    config::FileConfig,
    generator::{fill_with_config, seed_rng},
    source::JitterNoiseSource,
};
use clap::Parser;
use rand_chacha::ChaCha20Rng;
use rand_core::RngCore;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Generate true random bytes from timing-jitter noise.
#[derive(Debug, Parser)]
#[command(name = "analog-entropy", version)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bytes to generate per batch (overrides the config file).
    #[arg(long)]
    bytes: Option<usize>,

    /// Accumulation steps required per digest (overrides the config file).
    #[arg(long)]
    min_iterations: Option<u32>,

    /// Conditioning hash algorithm (overrides the config file).
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Keep generating batches until interrupted.
    #[arg(long)]
    continuous: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum AlgorithmArg {
    Sha256,
    Blake3,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sha256 => HashAlgorithm::Sha256,
            AlgorithmArg::Blake3 => HashAlgorithm::Blake3,
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Analog Entropy Generator v{}", analog_entropy::VERSION);
    info!("This is a demonstration using host timing jitter as the noise source");

    // Load configuration, then apply command-line overrides
    let mut config = match args.config {
        Some(ref path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(bytes) = args.bytes {
        config.output.bytes = bytes;
    }
    if let Some(min_iterations) = args.min_iterations {
        config.entropy.min_iterations = min_iterations;
    }
    if let Some(algorithm) = args.algorithm {
        config.entropy.algorithm = algorithm.into();
    }
    config.output.continuous |= args.continuous;
    if let Err(e) = config.output.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let mut ctx = EntropyContext::new();
    let mut source = JitterNoiseSource::new();
    let mut batch = vec![0u8; config.output.bytes];

    if config.output.continuous {
        let running = Arc::new(AtomicBool::new(true));
        let handler_flag = Arc::clone(&running);
        if let Err(e) = ctrlc::set_handler(move || handler_flag.store(false, Ordering::SeqCst)) {
            warn!("Ctrl-C handler unavailable: {}", e);
        }

        info!(
            "Generating {}-byte batches until interrupted...",
            config.output.bytes
        );
        while running.load(Ordering::SeqCst) {
            if let Err(e) = fill_with_config(
                &mut ctx,
                &mut source,
                &mut batch,
                config.entropy.accumulator_config(),
            ) {
                warn!("Fill failed: {}", e);
                break;
            }
            println!("{}", hex(&batch));
        }

        info!("Interrupted. Cycle seeds consumed: {}", ctx.seed_counter());
        return;
    }

    // Drive one accumulation cycle by hand to show the non-blocking
    // lifecycle, then fill a whole batch through the driver.
    info!(
        "Accumulating {} steps for one digest...",
        config.entropy.min_iterations
    );
    let mut accumulator = EntropyAccumulator::new(config.entropy.accumulator_config());
    accumulator.init(&mut ctx);
    while !accumulator.is_ready(&mut ctx, None) {
        if let Err(e) = accumulator.step(&mut ctx, &mut source) {
            eprintln!("Noise source failed: {}", e);
            std::process::exit(1);
        }
    }
    if let Some(digest) = accumulator.extract(&mut ctx, None) {
        println!("Digest:       {}", hex(digest.as_ref()));
    }

    info!("Filling a {}-byte batch...", config.output.bytes);
    if let Err(e) = fill_with_config(
        &mut ctx,
        &mut source,
        &mut batch,
        config.entropy.accumulator_config(),
    ) {
        eprintln!("Noise source failed: {}", e);
        std::process::exit(1);
    }
    println!("Random bytes: {}", hex(&batch));

    // Seed a fast CSPRNG from harvested entropy, the recommended pattern
    // for callers that need throughput.
    match seed_rng::<ChaCha20Rng, _>(&mut ctx, &mut source, Some(config.entropy.min_iterations)) {
        Ok(mut rng) => {
            let mut sample = [0u8; 16];
            rng.fill_bytes(&mut sample);
            println!("ChaCha20:     {}", hex(&sample));
        }
        Err(e) => {
            warn!("CSPRNG seeding failed: {}", e);
        }
    }

    info!("Done. Cycle seeds consumed: {}", ctx.seed_counter());
}
