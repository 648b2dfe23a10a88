mod resolver;
mod star;

pub use resolver::Resolver;
pub use star::Star;

use crate::genomes::Genome;
use eyre::Result;
use std::path::{Path, PathBuf};

/// An external aligner that can quantify reads per gene.
///
/// Given a genome index and one or two FASTQ files, the aligner writes its outputs into the
/// working directory (every file name starts with [Aligner::prefix]) and returns the path to the
/// per-gene count table. Any failure is fatal for the whole run.
pub trait Aligner {
    /// Name reported in the output header and used to name archived outputs.
    fn name(&self) -> &str;

    /// Prefix of every file the aligner writes into the working directory.
    fn prefix(&self) -> &str;

    fn align(&self, genome: &Genome, fastqs: &[PathBuf], workdir: &Path) -> Result<PathBuf>;
}

/// Files in `workdir` that were written by an aligner using the given prefix, sorted by name.
pub fn outputs(workdir: impl AsRef<Path>, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(workdir)? {
        let entry = entry?;
        let matches = entry
            .file_name()
            .to_str()
            .map(|x| x.starts_with(prefix))
            .unwrap_or(false);
        if matches && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["run_Log.out", "run_ReadsPerGene.out.tab", "reads.subset.fq", "run"] {
            std::fs::write(dir.path().join(name), "")?;
        }
        std::fs::create_dir(dir.path().join("run_STARtmp"))?;

        let found = outputs(dir.path(), "run_")?;
        assert_eq!(
            found,
            vec![
                dir.path().join("run_Log.out"),
                dir.path().join("run_ReadsPerGene.out.tab")
            ]
        );
        assert!(outputs(dir.path(), "other_")?.is_empty());
        Ok(())
    }
}
