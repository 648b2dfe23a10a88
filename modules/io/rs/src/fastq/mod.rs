mod reader;
mod record;
pub mod validate;
mod writer;

pub use reader::Reader;
pub use record::Record;
pub use writer::Writer;

use crate::compression;
use eyre::{OptionExt, Result};
use std::path::Path;

/// Conventional extensions of FASTQ files, longest first.
pub const EXTENSIONS: &[&str] = &[".fastq", ".fq"];

/// File name of the FASTQ without the directory, the compression suffix, and the FASTQ extension:
/// `/data/sample_R1.fastq.gz` -> `sample_R1`.
pub fn stem(path: impl AsRef<Path>) -> Result<String> {
    let name = path
        .as_ref()
        .file_name()
        .and_then(|x| x.to_str())
        .ok_or_eyre("FASTQ path must end with a valid UTF-8 file name")?;
    let name = compression::strip_suffix(name);
    let name = EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .unwrap_or(name);
    Ok(name.to_owned())
}
