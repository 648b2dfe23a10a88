use super::config::Config;
use eyre::Result;
use noodles::bgzf;
use std::io::Read;

/// A reader that transparently decodes its input.
pub enum Stream<R: Read> {
    Raw(R),
    Gzip(flate2::read::MultiGzDecoder<R>),
    Bgzf(bgzf::io::Reader<R>),
}

impl<R: Read> Stream<R> {
    pub fn new(inner: R, config: &Config) -> Result<Self> {
        match config {
            Config::Uncompressed => Ok(Stream::Raw(inner)),
            Config::Gzip => Ok(Stream::Gzip(flate2::read::MultiGzDecoder::new(inner))),
            Config::Bgzf => Ok(Stream::Bgzf(bgzf::io::Reader::new(inner))),
        }
    }
}

impl<R: Read> Read for Stream<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Stream::Raw(r) => r.read(buf),
            Stream::Gzip(r) => r.read(buf),
            Stream::Bgzf(r) => r.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_decode_streams() -> Result<()> {
        let content = b"@read\nACGTN\n+\nIIII#\n";

        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(content)?;
        let gzipped = encoder.finish()?;

        let mut bgzipped = Vec::new();
        {
            // The EOF block is appended when the writer is dropped
            let mut writer = bgzf::io::Writer::new(&mut bgzipped);
            writer.write_all(content)?;
        }

        for (config, bytes) in [
            (Config::Uncompressed, content.to_vec()),
            (Config::Gzip, gzipped),
            (Config::Bgzf, bgzipped),
        ] {
            let mut decoded = Vec::new();
            Stream::new(std::io::Cursor::new(bytes), &config)?.read_to_end(&mut decoded)?;
            assert_eq!(decoded, content, "Config: {config}");
        }
        Ok(())
    }
}
