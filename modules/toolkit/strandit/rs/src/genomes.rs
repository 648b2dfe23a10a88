use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Context, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// A prebuilt aligner index together with the name used to report it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Dissolve, Getters)]
pub struct Genome {
    name: String,
    index: PathBuf,
}

impl Genome {
    pub fn new(name: impl Into<String>, index: impl Into<PathBuf>) -> Result<Self> {
        let name = name.into();
        ensure!(!name.is_empty(), "Genome name must not be an empty string");
        Ok(Self {
            name,
            index: index.into(),
        })
    }

    /// Genome named after its index directory.
    pub fn from_index(index: impl Into<PathBuf>) -> Self {
        let index = index.into();
        Self {
            name: index.display().to_string(),
            index,
        }
    }

    /// Name that is safe to use as a single path component.
    pub fn dirname(&self) -> String {
        self.name.replace(std::path::MAIN_SEPARATOR, "_")
    }
}

/// Parse `NAME<TAB>INDEX` lines. Lines starting with '#' and blank lines are ignored.
pub fn from_conf_reader(reader: impl BufRead) -> Result<Vec<Genome>> {
    let mut genomes = Vec::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        ensure!(
            fields.len() == 2,
            "Line {} must contain a name and an index directory separated by a tab, got: {line}",
            ind + 1
        );
        genomes.push(Genome::new(fields[0], fields[1]).wrap_err_with(|| format!("Line {}", ind + 1))?);
    }
    Ok(genomes)
}

/// Read the list of genomes from a conf file, preserving the file order.
pub fn from_conf(path: impl AsRef<Path>) -> Result<Vec<Genome>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .wrap_err_with(|| format!("Failed to open conf file {}", path.display()))?;
    from_conf_reader(std::io::BufReader::new(file))
        .wrap_err_with(|| format!("Malformed conf file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_names() -> Result<()> {
        let genome = Genome::from_index("/data/indices/hg38");
        assert_eq!(genome.name(), "/data/indices/hg38");
        assert_eq!(genome.index(), Path::new("/data/indices/hg38"));

        let genome = Genome::new("Human", "/data/indices/hg38")?;
        assert_eq!(genome.name(), "Human");
        assert_eq!(genome.dirname(), "Human");

        assert!(Genome::new("", "/data/indices/hg38").is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_dirname() {
        assert_eq!(Genome::from_index("/data/hg38").dirname(), "_data_hg38");
        assert_eq!(Genome::from_index("Genome1").dirname(), "Genome1");
    }

    #[test]
    fn test_conf() -> Result<()> {
        let content = "# name\tindex\nGenome1\t/data/g1\n\nGenome2\t/data/g2  \r\n";
        let genomes = from_conf_reader(content.as_bytes())?;
        assert_eq!(
            genomes,
            vec![
                Genome::new("Genome1", "/data/g1")?,
                Genome::new("Genome2", "/data/g2")?
            ]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_conf() {
        for content in [
            "Genome1\n",
            "Genome1 /data/g1\n",
            "Genome1\t/data/g1\textra\n",
            "\t/data/g1\n",
        ] {
            assert!(from_conf_reader(content.as_bytes()).is_err(), "Content: {content:?}");
        }
    }
}
