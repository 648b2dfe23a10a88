use derive_getters::{Dissolve, Getters};
use derive_more::{Add, AddAssign, Constructor};
use eyre::{ensure, eyre, Context, Result};
use std::io::BufRead;
use std::path::Path;

/// Summary rows at the top of a gene count table (unmapped, multimapping, no feature, ambiguous).
pub const HEADER_LINES: usize = 4;

/// Per-strand read counts summed over all genes of a count table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Add, AddAssign, Constructor, Dissolve, Getters,
)]
pub struct Counts {
    unstranded: u64,
    forward: u64,
    reverse: u64,
}

/// Share of the 1st read aligned to the forward strand and of the 2nd read aligned to the
/// reverse strand, in percent of the unstranded counts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Constructor, Dissolve, Getters)]
pub struct Percentages {
    forward: f64,
    reverse: f64,
}

impl Counts {
    /// Sum the strand columns of a `ReadsPerGene.out.tab`-like table.
    ///
    /// The first [HEADER_LINES] lines are skipped, every other line must contain exactly four
    /// tab-separated fields with non-negative integer counts in the last three.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut counts = Counts::default();
        for (ind, line) in reader.lines().enumerate().skip(HEADER_LINES) {
            let line = line?;
            counts += parse_row(&line).wrap_err_with(|| format!("Line {}: {line:?}", ind + 1))?;
        }
        Ok(counts)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("Failed to open count table {}", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
            .wrap_err_with(|| format!("Malformed count table {}", path.display()))
    }

    pub fn percentages(&self) -> Percentages {
        if self.unstranded == 0 {
            log::warn!("Sum of mapped reads is zero!");
            return Percentages::default();
        }
        let total = self.unstranded as f64;
        Percentages::new(
            self.forward as f64 / total * 100.0,
            self.reverse as f64 / total * 100.0,
        )
    }
}

fn parse_row(line: &str) -> Result<Counts> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split('\t').collect();
    ensure!(
        fields.len() == 4,
        "Expected 4 tab-separated fields, got {}",
        fields.len()
    );

    let mut values = [0u64; 3];
    for (value, field) in values.iter_mut().zip(&fields[1..]) {
        *value = field
            .parse()
            .map_err(|_| eyre!("Not a non-negative integer count: {field:?}"))?;
    }
    Ok(Counts::new(values[0], values[1], values[2]))
}
