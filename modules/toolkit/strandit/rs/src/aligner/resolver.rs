use derive_getters::Getters;
use std::path::{Path, PathBuf};

/// Locates executables in an explicit list of directories.
///
/// The search path is captured once (usually from `PATH` at startup) and never read from the
/// process environment afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Resolver {
    dirs: Vec<PathBuf>,
}

impl Resolver {
    pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_env() -> Self {
        let dirs = std::env::var_os("PATH")
            .map(|paths| std::env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    /// First executable named `name` in the search path.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| is_executable(path))
    }

    /// Programs given with a directory are checked as-is, bare names are searched for.
    pub fn resolve(&self, program: impl AsRef<Path>) -> Option<PathBuf> {
        let program = program.as_ref();
        if program.components().count() > 1 {
            return is_executable(program).then(|| program.to_path_buf());
        }
        program.to_str().and_then(|name| self.find(name))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|x| x.is_file() && x.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
