use crate::reads::Reads;
use eyre::{ensure, Context, OptionExt, Result};
use rand::Rng;
use std::path::{Path, PathBuf};
use strandit_io_rs::compression;
use strandit_io_rs::fastq;
use strandit_io_rs::{ReadRecord, WriteRecord};

/// Suffix of the subsampled FASTQ files placed in the working directory.
pub const SUFFIX: &str = ".subset.fq";

/// Reads selected for the alignment, identified by their position in the FASTQ file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subset {
    /// Every read in the file.
    All { total: u64 },
    /// A random sample without replacement, indices are sorted and unique.
    Sampled { total: u64, indices: Vec<u64> },
}

impl Subset {
    /// Select `requested` random reads out of `total`. Requests that are zero or not smaller
    /// than the total select all reads.
    ///
    /// Fails if the read counts do not fit into the address space of the platform.
    pub fn select(requested: u64, total: u64, rng: &mut impl Rng) -> Result<Self> {
        if requested == 0 {
            log::info!("Using all {total} reads");
            return Ok(Subset::All { total });
        }
        if requested >= total {
            log::info!(
                "Actual number of reads ({total}) is not larger than the requested subset ({requested})"
            );
            return Ok(Subset::All { total });
        }

        log::info!("Using a random subset of {requested} reads");
        let length = usize::try_from(total)
            .wrap_err_with(|| format!("Too many reads to subsample on this platform: {total}"))?;
        let amount = usize::try_from(requested)
            .wrap_err_with(|| format!("Subset is too large for this platform: {requested}"))?;
        let mut indices: Vec<u64> = rand::seq::index::sample(rng, length, amount)
            .into_iter()
            .map(|x| x as u64)
            .collect();
        indices.sort_unstable();
        Ok(Subset::Sampled { total, indices })
    }

    /// Total number of reads in the primary FASTQ.
    pub fn total(&self) -> u64 {
        match self {
            Subset::All { total } | Subset::Sampled { total, .. } => *total,
        }
    }

    /// Number of reads in the subset.
    pub fn size(&self) -> u64 {
        match self {
            Subset::All { total } => *total,
            Subset::Sampled { indices, .. } => indices.len() as u64,
        }
    }
}

/// Number of records in the FASTQ file. Fails for malformed files.
pub fn count_reads(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    fastq::Reader::infer_from_path(path)?
        .count_to_end()
        .wrap_err_with(|| format!("Failed to count reads in {}", path.display()))
}

/// Location of the subsampled copy of `input`: `<workdir>/<name>.subset.fq`, where the name is
/// the file name without the compression suffix and the last extension.
pub fn subset_path(workdir: impl AsRef<Path>, input: impl AsRef<Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    let name = input
        .file_name()
        .and_then(|x| x.to_str())
        .ok_or_eyre("FASTQ path must end with a valid UTF-8 file name")?;
    let name = compression::strip_suffix(name);
    let name = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name);
    Ok(workdir.as_ref().join(format!("{name}{SUFFIX}")))
}

/// Copy the selected records from `input` to a new uncompressed FASTQ `output`.
/// Returns the number of written records.
pub fn write_subset(
    input: impl AsRef<Path>,
    subset: &Subset,
    output: impl AsRef<Path>,
) -> Result<u64> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let mut reader = fastq::Reader::infer_from_path(input)?;
    let mut writer = fastq::Writer::from_path(output)?;
    let mut record = fastq::Record::default();

    let mut written = 0;
    match subset {
        Subset::All { total } => {
            while written < *total && reader.read_record(&mut record)? {
                writer.write_record(&record)?;
                written += 1;
            }
        }
        Subset::Sampled { indices, .. } => {
            let mut position = 0;
            for &target in indices {
                // Skip (and validate) records until the next selected one
                while position <= target {
                    ensure!(
                        reader.read_record(&mut record)?,
                        "{} contains fewer reads than the primary FASTQ ({} < {})",
                        input.display(),
                        position,
                        target + 1
                    );
                    position += 1;
                }
                writer.write_record(&record)?;
                written += 1;
            }
        }
    }
    ensure!(
        written == subset.size(),
        "{} contains fewer reads than the primary FASTQ ({} < {})",
        input.display(),
        written,
        subset.size()
    );
    writer.flush()?;

    log::debug!("{written} reads written to {}", output.display());
    Ok(written)
}

/// Write the subset of each input file into the working directory, returning the new paths in
/// mate order.
pub fn subsample(reads: &Reads, subset: &Subset, workdir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let workdir = workdir.as_ref();
    let mut outputs: Vec<PathBuf> = Vec::new();
    for input in reads.files() {
        let output = subset_path(workdir, input)?;
        ensure!(
            !outputs.contains(&output),
            "Input FASTQ files must have distinct names, got {reads}"
        );
        write_subset(input, subset, &output)
            .wrap_err_with(|| format!("Failed to subsample {}", input.display()))?;
        outputs.push(output);
    }
    Ok(outputs)
}
