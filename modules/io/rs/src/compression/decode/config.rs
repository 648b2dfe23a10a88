use derive_more::Display;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
pub enum Config {
    #[default]
    #[display("uncompressed")]
    Uncompressed,
    #[display("gzip")]
    Gzip,
    #[display("bgzf")]
    Bgzf,
}

impl Config {
    /// Decide the container from the file extension alone.
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext {
                "gz" | "gzip" => Some(Config::Gzip),
                "bgz" | "bgzf" => Some(Config::Bgzf),
                _ => None,
            })
    }

    /// Decide the container from the file extension, falling back to the file signature for
    /// unknown extensions. Unreadable or unrecognized files are treated as uncompressed.
    pub fn infer_from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let Some(config) = Self::from_extension(path) {
            return config;
        }

        match infer::get_from_path(path) {
            Ok(Some(kind)) => match (kind.extension(), kind.mime_type()) {
                ("gz", "application/gzip") => Config::Gzip,
                _ => Config::Uncompressed,
            },
            _ => Config::Uncompressed,
        }
    }
}
