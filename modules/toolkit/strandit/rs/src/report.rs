use crate::counts::{Counts, Percentages};
use derive_getters::{Dissolve, Getters};
use eyre::{Context, Result};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use strandit_io_rs::fastq;

pub const TOOL: &str = "fastq_strand";
pub const SUFFIX: &str = "_fastq_strand.txt";

const COLUMNS: &[&str] = &["#Genome", "1st forward", "2nd reverse"];
const COUNT_COLUMNS: &[&str] = &[
    "Unstranded",
    "1st read strand aligned",
    "2nd read strand aligned",
];

/// `<outdir>/<stem of the primary FASTQ>_fastq_strand.txt`
pub fn report_path(outdir: impl AsRef<Path>, primary: impl AsRef<Path>) -> Result<PathBuf> {
    let stem = fastq::stem(primary)?;
    Ok(outdir.as_ref().join(format!("{stem}{SUFFIX}")))
}

#[derive(Debug, Clone, PartialEq, Dissolve, Getters)]
pub struct Row {
    genome: String,
    counts: Counts,
    percentages: Percentages,
}

impl Row {
    pub fn new(genome: impl Into<String>, counts: Counts) -> Self {
        Self {
            genome: genome.into(),
            percentages: counts.percentages(),
            counts,
        }
    }
}

/// Strandedness statistics of all genomes, rendered as a tab-delimited table.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Report {
    version: String,
    aligner: String,
    subset: u64,
    include_counts: bool,
    rows: Vec<Row>,
}

impl Report {
    pub fn new(
        version: impl Into<String>,
        aligner: impl Into<String>,
        subset: u64,
        include_counts: bool,
    ) -> Self {
        Self {
            version: version.into(),
            aligner: aligner.into(),
            subset,
            include_counts,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, genome: impl Into<String>, counts: Counts) -> &Row {
        self.rows.push(Row::new(genome, counts));
        &self.rows[self.rows.len() - 1]
    }

    pub fn render(&self) -> String {
        let mut columns = COLUMNS.to_vec();
        if self.include_counts {
            columns.extend_from_slice(COUNT_COLUMNS);
        }

        let mut text = format!(
            "#{TOOL} version: {}\t#Aligner: {}\t#Reads in subset: {}\n{}\n",
            self.version,
            self.aligner,
            self.subset,
            columns.iter().join("\t")
        );
        for row in &self.rows {
            let pct = &row.percentages;
            text.push_str(&format!(
                "{}\t{:.2}\t{:.2}",
                row.genome,
                pct.forward(),
                pct.reverse()
            ));
            if self.include_counts {
                let (unstranded, forward, reverse) = row.counts.dissolve();
                text.push_str(&format!("\t{unstranded}\t{forward}\t{reverse}"));
            }
            text.push('\n');
        }
        text
    }

    /// Write the rendered report in one go. A partially written file is removed.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Err(err) = std::fs::write(path, self.render()) {
            if path.exists() {
                let _ = std::fs::remove_file(path);
            }
            return Err(err).wrap_err_with(|| format!("Failed to write report {}", path.display()));
        }
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}
