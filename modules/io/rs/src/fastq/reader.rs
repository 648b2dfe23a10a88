use super::record::Record;
use crate::compression::decode;
use crate::traits::ReadRecord;
use derive_getters::Dissolve;
use eyre::{ensure, Context, Result};
use std::io::BufRead;
use std::path::Path;

/// A strict FASTQ reader that parses one 4-line record at a time. Ignores:
/// - Carriage return characters at the end of all lines (to support Windows line endings)
/// - Empty lines between records and at the end of the file
///
/// Returns an error if there are:
/// - Errors while reading from the underlying reader
/// - Extra characters before the first record
/// - Records that are truncated, e.g. the total number of lines is not divisible by 4
/// - Header lines not starting with '@' or separator lines not starting with '+'
/// - Records violating the [Record] guarantees
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Dissolve)]
pub struct Reader<R> {
    reader: R,
    line: Vec<u8>,
}

impl Reader<()> {
    /// Create a new FASTQ reader from the given file path using the given decoder.
    pub fn from_path(
        path: impl AsRef<Path>,
        decode: &decode::Config,
    ) -> Result<Box<dyn ReadRecord<Record = Record> + Send + Sync + 'static>> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("Failed to open FASTQ file {}", path.display()))?;
        let boxed: Box<dyn ReadRecord<Record = Record> + Send + Sync + 'static> =
            match decode::Stream::new(file, decode)? {
                decode::Stream::Raw(x) => Box::new(Reader::new(std::io::BufReader::new(x))?),
                decode::Stream::Gzip(x) => Box::new(Reader::new(std::io::BufReader::new(x))?),
                decode::Stream::Bgzf(x) => Box::new(Reader::new(std::io::BufReader::new(x))?),
            };
        Ok(boxed)
    }

    /// Same as [Reader::from_path], but the compression is inferred from the path.
    pub fn infer_from_path(
        path: impl AsRef<Path>,
    ) -> Result<Box<dyn ReadRecord<Record = Record> + Send + Sync + 'static>> {
        let path = path.as_ref();
        let config = decode::Config::infer_from_path(path);
        log::debug!("Reading {} as {config} FASTQ", path.display());
        Reader::from_path(path, &config)
            .wrap_err_with(|| format!("Not a valid FASTQ file: {}", path.display()))
    }
}

/// Replace the content of `into` with the next line, without the line terminator.
/// Returns `false` if the reader is already at EOF.
fn read_line(reader: &mut impl BufRead, into: &mut Vec<u8>) -> Result<bool> {
    into.clear();
    let mut consumed = false;
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        consumed = true;

        match memchr::memchr(b'\n', buffer) {
            Some(pos) => {
                into.extend_from_slice(&buffer[..pos]);
                reader.consume(pos + 1);
                break;
            }
            None => {
                let len = buffer.len();
                into.extend_from_slice(buffer);
                reader.consume(len);
            }
        }
    }
    if into.last() == Some(&b'\r') {
        into.pop();
    }
    Ok(consumed)
}

impl<R: BufRead> Reader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        // Check that there are no extra characters before the first record
        let buffer = reader.fill_buf()?;
        ensure!(
            buffer.first().map(|x| *x == b'@').unwrap_or(true),
            "Expected '@' at the start of the FASTQ file"
        );
        Ok(Self {
            reader,
            line: Vec::new(),
        })
    }

    fn read_parts(&mut self, record: &mut Record) -> Result<bool> {
        let Self { reader, line } = self;

        // Header line, skipping blank lines between records
        loop {
            if !read_line(reader, line)? {
                return Ok(false);
            }
            if !line.is_empty() {
                break;
            }
        }
        ensure!(
            line.first() == Some(&b'@'),
            "Expected '@' at the start of the FASTQ record, got: {}",
            String::from_utf8_lossy(line)
        );

        // SAFETY: The record is validated before reporting a successful read
        let (id, seq, comment, qual) = unsafe { record.fields() };
        id.clear();
        id.push_str(std::str::from_utf8(&line[1..]).wrap_err("FASTQ ID is not valid UTF-8")?);

        ensure!(
            read_line(reader, seq)?,
            "Truncated FASTQ record '{id}': missing the sequence line"
        );

        ensure!(
            read_line(reader, line)?,
            "Truncated FASTQ record '{id}': missing the separator line"
        );
        ensure!(
            line.first() == Some(&b'+'),
            "Expected '+' at the start of the separator line of the FASTQ record '{id}'"
        );
        comment.clear();
        comment.push_str(
            std::str::from_utf8(&line[1..]).wrap_err("FASTQ separator line is not valid UTF-8")?,
        );

        ensure!(
            read_line(reader, qual)?,
            "Truncated FASTQ record '{id}': missing the quality line"
        );

        Record::validate(id, seq, comment, qual)
            .wrap_err_with(|| format!("Invalid FASTQ record '{id}'"))?;
        Ok(true)
    }
}

impl<R: BufRead> ReadRecord for Reader<R> {
    type Record = Record;

    /// Parse the next FASTQ record into the given [Record] buffer.
    ///
    /// The read is successful only if the function returns `Ok(true)`. Otherwise, the buffer is
    /// left in an unspecified state, but can be reused for the next read.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool> {
        self.read_parts(into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::Report;
    use std::io::Read;

    type Expected<'a> = [(&'a str, &'a str, &'a str, &'a str)];

    fn test_read_record(content: impl Read, expected: &Expected) -> Result<()> {
        let mut reader = Reader::new(std::io::BufReader::new(content))?;
        let mut record = Record::default();
        for (id, seq, comment, qual) in expected {
            assert!(reader.read_record(&mut record)?);
            assert_eq!(record, (*id, *seq, *comment, *qual).try_into()?);
        }
        assert!(!reader.read_record(&mut record)?);
        Ok(())
    }

    fn test_read_to_end(content: impl Read, expected: &Expected) -> Result<()> {
        let mut reader = Reader::new(std::io::BufReader::new(content))?;
        let mut records = vec![Record::default(); 1];
        let total = reader.read_to_end(&mut records)?;
        assert_eq!(total, expected.len());
        assert_eq!(records.len(), expected.len());
        for (record, (id, seq, comment, qual)) in records.iter().zip(expected.iter()) {
            assert_eq!(*record, (*id, *seq, *comment, *qual).try_into()?);
        }
        Ok(())
    }

    #[test]
    fn test_empty_fastq_reader() -> Result<()> {
        test_read_record(&[0u8; 0][..], &[])?;
        test_read_to_end(&[0u8; 0][..], &[])?;
        Ok(())
    }

    #[test]
    fn test_invalid_fastq() {
        for content in [
            "NOT A FASTQ FILE",
            " @id\nACGT\n+\nIIII\n",
            "@",
            "@id",
            "@id\nACGT",
            "@id\nACGT\n+",
            "@id\nACGT\nIIII\n",
            "@id\nACGT\n-\nIIII\n",
            "@id\nACGT\n+\nIII\n",
            "@id\nAC GT\n+\nIIIII\n",
            "@\nACGT\n+\nIIII\n",
            "@id\nACGT\n+\nIIII\n@id2\nACGT\n+\n",
            "@id\nACGT\n+\nIIII\nACGT\n+\nIIII\n",
        ] {
            // Per record
            let result = Reader::new(std::io::Cursor::new(content)).and_then(|mut x| {
                let mut record = Record::default();
                while x.read_record(&mut record)? {}
                Ok::<(), Report>(())
            });
            assert!(result.is_err(), "Content: {:?}", content);

            // Counting only
            let result = Reader::new(std::io::Cursor::new(content)).and_then(|mut x| {
                x.count_to_end()?;
                Ok::<(), Report>(())
            });
            assert!(result.is_err(), "Content: {:?}", content);
        }
    }

    #[test]
    fn test_valid_fastq() -> Result<()> {
        for (content, records) in [
            ("@id\nACGT\n+\nIIII\n", vec![("id", "ACGT", "", "IIII")]),
            ("@id\nACGT\n+\nIIII", vec![("id", "ACGT", "", "IIII")]),
            ("@id\nACGT\n+id\nIIII\n\n", vec![("id", "ACGT", "id", "IIII")]),
            (
                "@id\r\nACGT\r\n+\r\n@III\r\n@id2\nNNN\n+\n###\n",
                vec![("id", "ACGT", "", "@III"), ("id2", "NNN", "", "###")],
            ),
            (
                "@a b c\n\n+\n\n@d\nA\n+\n!\n",
                vec![("a b c", "", "", ""), ("d", "A", "", "!")],
            ),
        ] {
            test_read_record(content.as_bytes(), &records)?;
            test_read_to_end(content.as_bytes(), &records)?;

            let total = Reader::new(content.as_bytes())?.count_to_end()?;
            assert_eq!(total, records.len() as u64);
        }
        Ok(())
    }
}
