pub mod decode;

/// File name suffixes that mark a compressed container.
pub const SUFFIXES: &[&str] = &[".gz", ".gzip", ".bgz", ".bgzf", ".bz2"];

/// Remove a single trailing compression suffix from the file name, if there is one.
pub fn strip_suffix(name: &str) -> &str {
    SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_suffix() {
        for (name, expected) in [
            ("reads.fq.gz", "reads.fq"),
            ("reads.fastq.bgz", "reads.fastq"),
            ("reads.fq.bz2", "reads.fq"),
            ("reads.fq", "reads.fq"),
            ("reads.gz.fq", "reads.gz.fq"),
            ("gz", "gz"),
            ("", ""),
        ] {
            assert_eq!(strip_suffix(name), expected, "Name: {name}");
        }
    }
}
