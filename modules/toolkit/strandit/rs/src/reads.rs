use std::fmt;
use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

/// Input FASTQ files of a sequencing run.
///
/// The first file is always the primary one: it defines the number of reads, the subset and
/// the names of all outputs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reads {
    /// Single-end reads.
    Single { file: PathBuf },

    /// Paired-end reads, mates are matched by their position in the files.
    Paired { file1: PathBuf, file2: PathBuf },
}

impl Debug for Reads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self, f)
    }
}

impl Display for Reads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reads::Single { file } => write!(f, "Single({})", file.display()),
            Reads::Paired { file1, file2 } => {
                write!(f, "Paired({}, {})", file1.display(), file2.display())
            }
        }
    }
}

impl Reads {
    pub fn new(read1: impl Into<PathBuf>, read2: Option<impl Into<PathBuf>>) -> Self {
        match read2 {
            None => Reads::Single { file: read1.into() },
            Some(read2) => Reads::Paired {
                file1: read1.into(),
                file2: read2.into(),
            },
        }
    }

    pub fn primary(&self) -> &Path {
        match self {
            Reads::Single { file } => file,
            Reads::Paired { file1, .. } => file1,
        }
    }

    /// All files in mate order.
    pub fn files(&self) -> Vec<&Path> {
        match self {
            Reads::Single { file } => vec![file.as_path()],
            Reads::Paired { file1, file2 } => vec![file1.as_path(), file2.as_path()],
        }
    }
}
