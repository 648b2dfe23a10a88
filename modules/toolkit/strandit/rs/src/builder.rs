use crate::genomes::Genome;
use crate::pipeline::Pipeline;
use crate::reads::Reads;
use eyre::{ensure, OptionExt, Result};
use itertools::Itertools;
use std::path::PathBuf;

/// Number of reads used when no subset size is given.
pub const DEFAULT_SUBSET: u64 = 10_000;

#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    reads: Option<Reads>,
    genomes: Vec<Genome>,
    subset: Option<u64>,
    outdir: Option<PathBuf>,
    workdir: Option<PathBuf>,
    include_counts: bool,
    keep_outputs: bool,
    seed: Option<u64>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reads(mut self, reads: Reads) -> Self {
        self.reads = Some(reads);
        self
    }

    /// Genomes are processed and reported in the order they were added.
    pub fn add_genomes(mut self, genomes: impl IntoIterator<Item = Genome>) -> Self {
        self.genomes.extend(genomes);
        self
    }

    /// Number of randomly selected reads, 0 to use all of them.
    pub fn set_subset(mut self, subset: u64) -> Self {
        self.subset = Some(subset);
        self
    }

    pub fn set_outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(outdir.into());
        self
    }

    /// Directory where the temporary working directory is created (the output directory by default).
    pub fn set_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    pub fn set_include_counts(mut self, include_counts: bool) -> Self {
        self.include_counts = include_counts;
        self
    }

    pub fn set_keep_outputs(mut self, keep_outputs: bool) -> Self {
        self.keep_outputs = keep_outputs;
        self
    }

    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        let reads = self.reads.ok_or_eyre("Input FASTQ files are not specified")?;
        for file in reads.files() {
            ensure!(file.is_file(), "Input FASTQ file doesn't exist: {}", file.display());
        }

        ensure!(!self.genomes.is_empty(), "No genome indices specified");
        if self.keep_outputs {
            let duplicates: Vec<_> = self.genomes.iter().map(|x| x.dirname()).duplicates().collect();
            ensure!(
                duplicates.is_empty(),
                "Genome names must be unique to archive aligner outputs, duplicated: {}",
                duplicates.join(", ")
            );
        }

        let outdir = match self.outdir {
            Some(outdir) => outdir,
            None => std::env::current_dir()?,
        };
        ensure!(
            outdir.is_dir(),
            "Output directory doesn't exist: {}",
            outdir.display()
        );
        let outdir = std::path::absolute(outdir)?;

        let workdir = match self.workdir {
            Some(workdir) => {
                ensure!(
                    workdir.is_dir(),
                    "Working directory doesn't exist: {}",
                    workdir.display()
                );
                std::path::absolute(workdir)?
            }
            None => outdir.clone(),
        };

        Ok(Pipeline::new(
            reads,
            self.genomes,
            self.subset.unwrap_or(DEFAULT_SUBSET),
            outdir,
            workdir,
            self.include_counts,
            self.keep_outputs,
            self.seed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reads(dir: &std::path::Path) -> Result<Reads> {
        let r1 = dir.join("mock_R1.fq");
        std::fs::write(&r1, "@r0\nACGT\n+\nIIII\n")?;
        Ok(Reads::new(r1, None::<PathBuf>))
    }

    #[test]
    fn test_build() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pipeline = PipelineBuilder::new()
            .set_reads(reads(dir.path())?)
            .add_genomes([Genome::from_index("/data/g1")])
            .add_genomes([Genome::new("Genome2", "/data/g2")?])
            .set_outdir(dir.path())
            .build()?;

        assert_eq!(*pipeline.subset(), DEFAULT_SUBSET);
        assert_eq!(pipeline.outdir(), dir.path());
        assert_eq!(pipeline.workdir(), dir.path());
        assert_eq!(
            pipeline.genomes().iter().map(|x| x.name().as_str()).collect::<Vec<_>>(),
            ["/data/g1", "Genome2"]
        );
        assert!(!pipeline.include_counts() && !pipeline.keep_outputs());
        assert_eq!(*pipeline.seed(), None);
        Ok(())
    }

    #[test]
    fn test_build_errors() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let genome = Genome::new("Genome1", "/data/g1")?;

        // No reads
        assert!(PipelineBuilder::new().add_genomes([genome.clone()]).build().is_err());

        // Missing reads
        let missing = Reads::new(dir.path().join("missing.fq"), None::<PathBuf>);
        let err = PipelineBuilder::new()
            .set_reads(missing)
            .add_genomes([genome.clone()])
            .set_outdir(dir.path())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("missing.fq"));

        // No genomes
        let err = PipelineBuilder::new()
            .set_reads(reads(dir.path())?)
            .set_outdir(dir.path())
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "No genome indices specified");

        // Missing output directory
        let err = PipelineBuilder::new()
            .set_reads(reads(dir.path())?)
            .add_genomes([genome.clone()])
            .set_outdir(dir.path().join("missing"))
            .build()
            .unwrap_err();
        assert!(err.to_string().starts_with("Output directory doesn't exist"));

        // Duplicated genome names are fine unless outputs are archived
        let builder = PipelineBuilder::new()
            .set_reads(reads(dir.path())?)
            .add_genomes([genome.clone(), genome])
            .set_outdir(dir.path());
        assert!(builder.clone().build().is_ok());
        assert!(builder.set_keep_outputs(true).build().is_err());
        Ok(())
    }
}
