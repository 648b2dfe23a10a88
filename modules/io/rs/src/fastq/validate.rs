use eyre::{ensure, Result};

pub fn id(id: &str) -> Result<()> {
    ensure!(!id.is_empty(), "FASTQ ID cannot be empty");
    ensure!(
        !id.contains(&['\n', '\r'] as &[char]),
        "Newline characters are not allowed in the FASTQ ID: {id}"
    );
    Ok(())
}

pub fn comment(comment: &str) -> Result<()> {
    ensure!(
        !comment.contains(&['\n', '\r'] as &[char]),
        "Newline characters are not allowed in the FASTQ separator line: {comment}"
    );
    Ok(())
}

pub fn seq(seq: &[u8]) -> Result<()> {
    for (i, &x) in seq.iter().enumerate() {
        ensure!(
            x.is_ascii_alphabetic() || matches!(x, b'.' | b'-' | b'*'),
            "Invalid sequence character at index {i} = {:?}",
            x as char
        );
    }
    Ok(())
}

pub fn qual(qual: &[u8]) -> Result<()> {
    for (i, &x) in qual.iter().enumerate() {
        ensure!(
            (b'!'..=b'~').contains(&x),
            "Invalid quality character at index {i} = {:?}",
            x as char
        );
    }
    Ok(())
}

pub fn lengths(seq: &[u8], qual: &[u8]) -> Result<()> {
    ensure!(
        seq.len() == qual.len(),
        "Sequence and quality lengths differ: {} != {}",
        seq.len(),
        qual.len()
    );
    Ok(())
}
