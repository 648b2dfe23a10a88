use crate::aligner;
use eyre::{ensure, Context, OptionExt, Result};
use std::path::{Path, PathBuf};

/// `<outdir>/<aligner>.<stem>.outputs`
pub fn archive_dir(outdir: impl AsRef<Path>, aligner: &str, stem: &str) -> PathBuf {
    outdir.as_ref().join(format!("{aligner}.{stem}.outputs"))
}

/// Move an existing `dir` out of the way, to `<dir>.bak` or the first free `<dir>.bakN`.
/// Returns the new location, or `None` if there was nothing to move.
pub fn backup(dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.try_exists()? {
        return Ok(None);
    }

    let name = dir
        .file_name()
        .and_then(|x| x.to_str())
        .ok_or_eyre("Archive path must end with a valid UTF-8 name")?;
    let mut target = dir.with_file_name(format!("{name}.bak"));
    let mut ind = 0;
    while target.try_exists()? {
        ind += 1;
        target = dir.with_file_name(format!("{name}.bak{ind}"));
    }

    std::fs::rename(dir, &target).wrap_err_with(|| {
        format!("Failed to move {} to {}", dir.display(), target.display())
    })?;
    log::warn!("Moved existing {} to {}", dir.display(), target.display());
    Ok(Some(target))
}

/// Copy every file in `workdir` starting with `prefix` into the new directory `dest`.
/// Returns the number of copied files.
pub fn copy_outputs(workdir: impl AsRef<Path>, prefix: &str, dest: impl AsRef<Path>) -> Result<usize> {
    let dest = dest.as_ref();
    ensure!(
        !dest.try_exists()?,
        "Archive directory already exists: {}",
        dest.display()
    );
    std::fs::create_dir(dest)
        .wrap_err_with(|| format!("Failed to create {}", dest.display()))?;

    let files = aligner::outputs(workdir, prefix)?;
    for file in &files {
        // Entries returned by `outputs` always have a file name
        let Some(name) = file.file_name() else { continue };
        std::fs::copy(file, dest.join(name))
            .wrap_err_with(|| format!("Failed to copy {}", file.display()))?;
    }
    log::debug!("Copied {} files to {}", files.len(), dest.display());
    Ok(files.len())
}
