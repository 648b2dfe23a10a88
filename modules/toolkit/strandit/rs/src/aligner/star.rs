use super::{outputs, Aligner, Resolver};
use crate::genomes::Genome;
use derive_getters::Getters;
use eyre::{bail, ensure, eyre, Context, Result};
use itertools::Itertools;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const EXECUTABLE: &str = "STAR";
pub const PREFIX: &str = "fastq_strand_";
pub const COUNTS_TABLE: &str = "ReadsPerGene.out.tab";

/// The STAR aligner in `--quantMode GeneCounts` mode.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Star {
    exe: PathBuf,
    threads: NonZeroUsize,
}

impl Star {
    pub fn new(exe: impl Into<PathBuf>, threads: NonZeroUsize) -> Self {
        Self {
            exe: exe.into(),
            threads,
        }
    }

    /// Find the STAR executable with the given resolver.
    pub fn locate(resolver: &Resolver, threads: NonZeroUsize) -> Result<Self> {
        let exe = resolver
            .find(EXECUTABLE)
            .ok_or_else(|| eyre!("{EXECUTABLE} not found"))?;
        Ok(Self::new(exe, threads))
    }

    pub fn command(&self, genome: &Genome, fastqs: &[PathBuf], workdir: &Path) -> Result<Command> {
        ensure!(
            matches!(fastqs.len(), 1 | 2),
            "{EXECUTABLE} expects one or two FASTQ files, got {}",
            fastqs.len()
        );
        let index = std::path::absolute(genome.index())?;

        let mut command = Command::new(&self.exe);
        command
            .args(["--runMode", "alignReads"])
            .args(["--genomeLoad", "NoSharedMemory"])
            .arg("--genomeDir")
            .arg(index)
            .arg("--readFilesIn")
            .args(fastqs)
            .args(["--quantMode", "GeneCounts"])
            .args(["--outSAMtype", "BAM", "Unsorted"])
            .args(["--outSAMstrandField", "intronMotif"])
            .args(["--outFileNamePrefix", PREFIX])
            .arg("--runThreadN")
            .arg(self.threads.to_string())
            .current_dir(workdir);
        Ok(command)
    }
}

fn render(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|x| x.to_string_lossy())
        .join(" ")
}

impl Aligner for Star {
    fn name(&self) -> &str {
        EXECUTABLE
    }

    fn prefix(&self) -> &str {
        PREFIX
    }

    fn align(&self, genome: &Genome, fastqs: &[PathBuf], workdir: &Path) -> Result<PathBuf> {
        // Outputs of the previous genome must not be mistaken for the new ones
        for stale in outputs(workdir, PREFIX)? {
            std::fs::remove_file(&stale)?;
        }

        let mut command = self.command(genome, fastqs, workdir)?;
        log::info!("Running {}", render(&command));
        let output = command
            .output()
            .wrap_err_with(|| format!("Failed to start {}", self.exe.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                log::error!("{EXECUTABLE} stderr:\n{}", stderr.trim_end());
            }
            match output.status.code() {
                Some(code) => bail!("{EXECUTABLE} returned non-zero exit code: {code}"),
                None => bail!("{EXECUTABLE} was terminated by a signal"),
            }
        }

        let table = workdir.join(format!("{PREFIX}{COUNTS_TABLE}"));
        ensure!(
            table.is_file(),
            "Failed to find .out file: {}",
            table.display()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_command() -> Result<()> {
        let star = Star::new("/opt/star/STAR", NonZeroUsize::new(4).unwrap());
        let genome = Genome::new("Genome1", "/data/Genome1")?;
        let fastqs = [PathBuf::from("/work/R1.subset.fq"), PathBuf::from("/work/R2.subset.fq")];

        let command = star.command(&genome, &fastqs, Path::new("/work"))?;
        assert_eq!(command.get_current_dir(), Some(Path::new("/work")));
        assert_eq!(
            render(&command),
            "/opt/star/STAR --runMode alignReads --genomeLoad NoSharedMemory \
             --genomeDir /data/Genome1 --readFilesIn /work/R1.subset.fq /work/R2.subset.fq \
             --quantMode GeneCounts --outSAMtype BAM Unsorted --outSAMstrandField intronMotif \
             --outFileNamePrefix fastq_strand_ --runThreadN 4"
        );

        let command = star.command(&genome, &fastqs[..1], Path::new("/work"))?;
        assert!(render(&command).contains("--readFilesIn /work/R1.subset.fq --quantMode"));

        assert!(star.command(&genome, &[], Path::new("/work")).is_err());
        Ok(())
    }

    #[test]
    fn test_locate() {
        assert!(Star::locate(&Resolver::default(), NonZeroUsize::MIN).is_err());
    }
}
