use eyre::Result;

/// Pull-based reading of structured records, in the spirit of [`std::io::Read`].
///
/// Readers parse into caller-owned buffers so that a single allocation can be reused across the
/// whole file.
pub trait ReadRecord {
    type Record: Default;

    /// Parse the next record into `into`. Returns `false` once the input is exhausted.
    fn read_record(&mut self, into: &mut Self::Record) -> Result<bool>;

    /// Fill as much of `into` as possible. Returns the number of parsed records, 0 at the end of
    /// the input.
    fn read_records(&mut self, into: &mut [Self::Record]) -> Result<usize> {
        let mut n = 0;
        for record in into.iter_mut() {
            if !self.read_record(record)? {
                break;
            }
            n += 1;
        }
        Ok(n)
    }

    /// Parse every remaining record, reusing the existing elements of `into` first.
    fn read_to_end(&mut self, into: &mut Vec<Self::Record>) -> Result<usize> {
        let mut total = 0;
        for record in into.iter_mut() {
            if !self.read_record(record)? {
                into.truncate(total);
                return Ok(total);
            }
            total += 1;
        }
        loop {
            let mut record = Self::Record::default();
            if !self.read_record(&mut record)? {
                return Ok(total);
            }
            into.push(record);
            total += 1;
        }
    }

    /// Validate and count the remaining records without keeping them.
    fn count_to_end(&mut self) -> Result<u64> {
        let mut record = Self::Record::default();
        let mut total = 0;
        while self.read_record(&mut record)? {
            total += 1;
        }
        Ok(total)
    }
}

/// Push-based writing of structured records, in the spirit of [`std::io::Write`].
pub trait WriteRecord {
    type Record;

    fn write_record(&mut self, record: &Self::Record) -> Result<()>;

    fn write_records(&mut self, records: &[Self::Record]) -> Result<usize> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(records.len())
    }

    fn flush(&mut self) -> Result<()>;
}
