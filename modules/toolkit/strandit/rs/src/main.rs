use clap::Parser;
use eyre::{eyre, Result};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use strandit_rs::aligner::{Resolver, Star};
use strandit_rs::{genomes, logging, Genome, PipelineBuilder, Reads, DEFAULT_SUBSET};

#[derive(Parser, Debug)]
#[command(name = "fastq_strand", version)]
#[command(about = "Generate strandedness statistics for FASTQ or FASTQ pair, by running STAR \
                   using one or more genome indices")]
struct Cli {
    /// R1 FASTQ file (optionally compressed)
    r1: PathBuf,

    /// R2 FASTQ file of a read pair
    r2: Option<PathBuf>,

    /// Path to the directory with the STAR index for a genome; can be given multiple times
    #[arg(short, long = "genome", value_name = "GENOMEDIR")]
    genomes: Vec<PathBuf>,

    /// Tab-delimited file with NAME<TAB>GENOMEDIR lines; takes precedence over --genome
    #[arg(short, long, value_name = "FILE")]
    conf: Option<PathBuf>,

    /// Use a random subset of N reads, 0 to use all reads
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SUBSET)]
    subset: u64,

    /// Directory for the output files (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    outdir: Option<PathBuf>,

    /// Number of threads to run STAR with
    #[arg(short = 'n', value_name = "N", default_value_t = NonZeroUsize::MIN)]
    threads: NonZeroUsize,

    /// Include the sums of the STAR count columns in the output
    #[arg(long)]
    counts: bool,

    /// Keep the output files from STAR under the output directory
    #[arg(long = "keep-star-output")]
    keep_star_output: bool,

    /// Seed for the random subset, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Path to the STAR executable (default: STAR found on PATH)
    #[arg(long, value_name = "PATH")]
    star: Option<PathBuf>,

    /// Report debugging details
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<PathBuf> {
    log::info!("fastq_strand version {}", strandit_rs::VERSION);

    let resolver = Resolver::from_env();
    let star = match &cli.star {
        Some(path) => resolver
            .resolve(path)
            .map(|exe| Star::new(exe, cli.threads))
            .ok_or_else(|| eyre!("STAR not found: {}", path.display()))?,
        None => Star::locate(&resolver, cli.threads)?,
    };
    log::info!("STAR: {}", star.exe().display());

    let genomes: Vec<Genome> = match &cli.conf {
        Some(conf) => {
            if !cli.genomes.is_empty() {
                log::warn!("--conf overrides genome indices given with --genome");
            }
            genomes::from_conf(conf)?
        }
        None => cli.genomes.iter().map(Genome::from_index).collect(),
    };

    let mut builder = PipelineBuilder::new()
        .set_reads(Reads::new(cli.r1, cli.r2))
        .add_genomes(genomes)
        .set_subset(cli.subset)
        .set_include_counts(cli.counts)
        .set_keep_outputs(cli.keep_star_output);
    if let Some(outdir) = cli.outdir {
        builder = builder.set_outdir(outdir);
    }
    if let Some(seed) = cli.seed {
        builder = builder.set_seed(seed);
    }

    builder.build()?.run(&star)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run(cli) {
        Ok(report) => {
            log::info!("Finished: {}", report.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
