use super::record::Record;
use crate::traits::WriteRecord;
use derive_getters::Dissolve;
use eyre::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records as plain 4-line FASTQ, keeping the separator comment as-is.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Writer<W> {
    writer: W,
}

impl<W> Writer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl Writer<()> {
    /// Create (or truncate) an uncompressed FASTQ file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Writer<BufWriter<File>>> {
        let path = path.as_ref();
        let file = File::create(path)
            .wrap_err_with(|| format!("Failed to create FASTQ file {}", path.display()))?;
        Ok(Writer::new(BufWriter::new(file)))
    }
}

impl<W: Write> WriteRecord for Writer<W> {
    type Record = Record;

    fn write_record(&mut self, record: &Self::Record) -> Result<()> {
        self.writer.write_all(b"@")?;
        self.writer.write_all(record.id().as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.write_all(record.seq())?;
        self.writer.write_all(b"\n+")?;
        self.writer.write_all(record.comment().as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.write_all(record.qual())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fastq::Reader;
    use crate::ReadRecord;
    use std::io::Cursor;

    #[test]
    fn test_fastq_writer_preserves_content() -> Result<()> {
        let expected = "@K00311:43:HL3LWBBXX:8:1101:21440:1121 1:N:0:CNATGT\nGCCNGACAGC\n+\nAAF#FJJJJJ\n\
                        @K00311:43:HL3LWBBXX:8:1101:21460:1121 1:N:0:CNATGT\nGGGNGTC\n+K00311\nAAF#FJJ\n";

        let mut records = Vec::new();
        Reader::new(Cursor::new(expected))?.read_to_end(&mut records)?;
        assert_eq!(records.len(), 2);

        let mut produced = Vec::new();
        let mut writer = Writer::new(Cursor::new(&mut produced));
        assert_eq!(writer.write_records(&records)?, 2);
        writer.flush()?;

        assert_eq!(String::from_utf8(produced)?, expected);
        Ok(())
    }
}
