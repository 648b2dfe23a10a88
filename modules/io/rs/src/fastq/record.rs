use super::validate;
use derive_getters::{Dissolve, Getters};
use eyre::Result;
use std::error::Error;

/// A single FASTQ record with the following guarantees:
/// - The ID (text after '@') is a non-empty UTF-8 string without newline characters.
/// - The comment (text after '+') is an arbitrary UTF-8 string without newline characters.
///   Usually it is empty, but some instruments repeat the ID here.
/// - The sequence contains only ASCII letters and the gap symbols '.', '-', '*'.
/// - The quality string is printable ASCII ('!'..='~') and as long as the sequence.
///
/// Empty reads are allowed: trimming tools routinely emit them.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Dissolve, Getters)]
pub struct Record {
    id: String,
    seq: Vec<u8>,
    comment: String,
    qual: Vec<u8>,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            id: "Default ID".to_string(),
            seq: b"ACGT".to_vec(),
            comment: String::new(),
            qual: b"IIII".to_vec(),
        }
    }
}

impl<ID, SEQ, CMT, QUAL> TryFrom<(ID, SEQ, CMT, QUAL)> for Record
where
    ID: TryInto<String, Error: Error + Send + Sync + 'static>,
    SEQ: TryInto<Vec<u8>, Error: Error + Send + Sync + 'static>,
    CMT: TryInto<String, Error: Error + Send + Sync + 'static>,
    QUAL: TryInto<Vec<u8>, Error: Error + Send + Sync + 'static>,
{
    type Error = eyre::Report;

    fn try_from(value: (ID, SEQ, CMT, QUAL)) -> Result<Self> {
        Self::new(
            value.0.try_into()?,
            value.1.try_into()?,
            value.2.try_into()?,
            value.3.try_into()?,
        )
    }
}

impl Record {
    pub fn new(id: String, seq: Vec<u8>, comment: String, qual: Vec<u8>) -> Result<Self> {
        Self::validate(&id, &seq, &comment, &qual)?;
        Ok(Self {
            id,
            seq,
            comment,
            qual,
        })
    }

    pub fn validate(id: &str, seq: &[u8], comment: &str, qual: &[u8]) -> Result<()> {
        validate::id(id)?;
        validate::seq(seq)?;
        validate::comment(comment)?;
        validate::qual(qual)?;
        validate::lengths(seq, qual)
    }

    /// # Safety
    /// The caller must ensure that the record is valid once all modifications are done.
    pub unsafe fn fields(&mut self) -> (&mut String, &mut Vec<u8>, &mut String, &mut Vec<u8>) {
        (
            &mut self.id,
            &mut self.seq,
            &mut self.comment,
            &mut self.qual,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() -> Result<()> {
        for (id, seq, comment, qual) in [
            ("K00311:43:HL3LWBBXX:8:1101:21440:1121 1:N:0:CNATGT", "GCCNGA", "", "AAF#FJ"),
            ("read", "acgt", "read", "!!~~"),
            ("read", "AC.-*", "", "IIIII"),
            ("empty read", "", "", ""),
        ] {
            let record: Record = (id, seq, comment, qual).try_into()?;
            assert_eq!(record.id(), id);
            assert_eq!(record.seq(), seq.as_bytes());
            assert_eq!(record.comment(), comment);
            assert_eq!(record.qual(), qual.as_bytes());
        }
        Ok(())
    }

    #[test]
    fn test_invalid_records() {
        for (id, seq, comment, qual) in [
            // Invalid ID
            ("", "ACGT", "", "IIII"),
            ("id\n", "ACGT", "", "IIII"),
            ("id\r", "ACGT", "", "IIII"),
            // Invalid sequence
            ("id", "AC GT", "", "IIIII"),
            ("id", "ACG1", "", "IIII"),
            // Invalid comment
            ("id", "ACGT", "x\n", "IIII"),
            // Invalid quality
            ("id", "ACGT", "", "II I"),
            ("id", "ACGT", "", "III"),
            ("id", "ACG", "", "IIII"),
        ] {
            let record: Result<Record> = (id, seq, comment, qual).try_into();
            assert!(record.is_err(), "Record: {:?}", record);
        }
    }
}
