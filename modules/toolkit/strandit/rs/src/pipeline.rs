use crate::aligner::Aligner;
use crate::archive;
use crate::counts::Counts;
use crate::genomes::Genome;
use crate::reads::Reads;
use crate::report::{self, Report};
use crate::subsample::{self, Subset};
use derive_getters::Getters;
use derive_more::Constructor;
use eyre::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use strandit_io_rs::fastq;

/// Suffix of the temporary working directory.
pub const WORKDIR_SUFFIX: &str = ".fastq_strand";

/// Subdirectory of the working directory holding the subsampled FASTQ files, out of reach of the
/// aligner's output prefix.
pub const READS_DIR: &str = "reads";

/// A configured strandedness run, see [crate::PipelineBuilder].
#[derive(Debug, Clone, PartialEq, Eq, Constructor, Getters)]
pub struct Pipeline {
    reads: Reads,
    genomes: Vec<Genome>,
    subset: u64,
    outdir: PathBuf,
    workdir: PathBuf,
    include_counts: bool,
    keep_outputs: bool,
    seed: Option<u64>,
}

impl Pipeline {
    /// Location of the report produced by [Pipeline::run].
    pub fn report_path(&self) -> Result<PathBuf> {
        report::report_path(&self.outdir, self.reads.primary())
    }

    /// Subsample the reads, align them to every genome, and write the report.
    ///
    /// Any existing report is removed before the first alignment. The new report is written only
    /// after all genomes were processed, a failed run leaves no report behind.
    pub fn run(&self, aligner: &dyn Aligner) -> Result<PathBuf> {
        let path = self.report_path()?;
        if path.try_exists()? {
            log::warn!("Removing existing output file {}", path.display());
            std::fs::remove_file(&path)
                .wrap_err_with(|| format!("Failed to remove {}", path.display()))?;
        }

        log::info!("Reads: {}", self.reads);
        for genome in &self.genomes {
            log::info!("Genome index {}: {}", genome.name(), genome.index().display());
        }

        let workdir = tempfile::Builder::new()
            .suffix(WORKDIR_SUFFIX)
            .tempdir_in(&self.workdir)
            .wrap_err_with(|| {
                format!("Failed to create a working directory in {}", self.workdir.display())
            })?;
        log::debug!("Working directory: {}", workdir.path().display());

        let report = self.process(aligner, workdir.path())?;
        report.write(&path)?;

        workdir
            .close()
            .wrap_err("Failed to remove the working directory")?;
        Ok(path)
    }

    fn process(&self, aligner: &dyn Aligner, workdir: &Path) -> Result<Report> {
        let primary = self.reads.primary();
        let total = subsample::count_reads(primary)?;
        log::info!("Number of reads in {}: {total}", primary.display());

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let subset = Subset::select(self.subset, total, &mut rng)?;
        let readsdir = workdir.join(READS_DIR);
        std::fs::create_dir(&readsdir)
            .wrap_err_with(|| format!("Failed to create {}", readsdir.display()))?;
        let fastqs = subsample::subsample(&self.reads, &subset, &readsdir)?;

        let archive = if self.keep_outputs {
            let dir = archive::archive_dir(&self.outdir, aligner.name(), &fastq::stem(primary)?);
            archive::backup(&dir)?;
            std::fs::create_dir(&dir)
                .wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
            Some(dir)
        } else {
            None
        };

        let mut report = Report::new(
            crate::VERSION,
            aligner.name(),
            subset.size(),
            self.include_counts,
        );
        for genome in &self.genomes {
            log::info!("Aligning reads to {}", genome.name());
            let aligned = aligner.align(genome, &fastqs, workdir);

            // Logs of a failed run are archived too
            if let Some(dir) = &archive {
                archive::copy_outputs(workdir, aligner.prefix(), dir.join(genome.dirname()))?;
            }
            let table =
                aligned.wrap_err_with(|| format!("Failed to align reads to {}", genome.name()))?;

            let counts = Counts::from_path(&table)?;
            log::info!(
                "Sums for {}: unstranded {}, 1st read strand {}, 2nd read strand {}",
                genome.name(),
                counts.unstranded(),
                counts.forward(),
                counts.reverse()
            );
            let pct = report.push(genome.name().as_str(), counts).percentages();
            log::info!(
                "Strandedness for {}: {:.2}% 1st forward, {:.2}% 2nd reverse",
                genome.name(),
                pct.forward(),
                pct.reverse()
            );
        }
        Ok(report)
    }
}
