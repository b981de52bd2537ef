use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

const FALLBACK_NAME: &str = "Portfolio";
const FILENAME_SUFFIX: &str = "_CV.html";

/// Where a downloaded document is materialized.
///
/// `create` stages the bytes and hands back a handle, `save_as` exposes the
/// staged document under its final name, and `release` frees the staged
/// resource. Every handle returned by `create` is released exactly once.
pub trait DocumentSink {
    type Handle;

    fn create(&mut self, bytes: &[u8]) -> std::io::Result<Self::Handle>;

    fn save_as(&mut self, handle: &Self::Handle, filename: &str) -> std::io::Result<PathBuf>;

    fn release(&mut self, handle: Self::Handle);
}

/// Derives the download filename from the profile name: every run of
/// whitespace or path separators becomes `_`, and a blank name falls back
/// to `Portfolio`.
pub fn cv_filename(name: &str) -> String {
    if name.trim().is_empty() {
        return format!("{FALLBACK_NAME}{FILENAME_SUFFIX}");
    }

    let mut out = String::with_capacity(name.len() + FILENAME_SUFFIX.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.push_str(FILENAME_SUFFIX);
    out
}

/// Stages `bytes` in `sink`, saves them as `filename`, and releases the
/// staged resource whether or not the save succeeded.
pub fn materialize<S: DocumentSink>(sink: &mut S, bytes: &[u8], filename: &str) -> std::io::Result<PathBuf> {
    let handle = sink.create(bytes)?;
    let saved = sink.save_as(&handle, filename);
    sink.release(handle);
    saved
}

/// Writes documents into a directory. Staging happens in a temp file in the
/// same directory, which is removed on release.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSink for FileSink {
    type Handle = NamedTempFile;

    fn create(&mut self, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
        std::fs::create_dir_all(&self.dir)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.flush()?;
        debug!(path = %staged.path().display(), "Document staged");
        Ok(staged)
    }

    fn save_as(&mut self, handle: &NamedTempFile, filename: &str) -> std::io::Result<PathBuf> {
        if !is_plain_file_name(filename) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("'{filename}' is not a plain file name"),
            ));
        }
        let target = self.dir.join(filename);
        std::fs::copy(handle.path(), &target)?;
        info!(path = %target.display(), "Document saved");
        Ok(target)
    }

    fn release(&mut self, handle: NamedTempFile) {
        if let Err(e) = handle.close() {
            debug!("Failed to remove staged document: {e}");
        }
    }
}

/// A single normal path component, so joining it onto the download
/// directory cannot leave that directory.
fn is_plain_file_name(filename: &str) -> bool {
    filename != ".."
        && !filename.contains('\\')
        && Path::new(filename).file_name().and_then(|n| n.to_str()) == Some(filename)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call so tests can check create/release pairing.
    #[derive(Default)]
    pub(crate) struct CountingSink {
        pub created: usize,
        pub released: usize,
        pub saved: Vec<String>,
        pub fail_save: bool,
    }

    impl DocumentSink for CountingSink {
        type Handle = usize;

        fn create(&mut self, _bytes: &[u8]) -> std::io::Result<usize> {
            self.created += 1;
            Ok(self.created)
        }

        fn save_as(&mut self, _handle: &usize, filename: &str) -> std::io::Result<PathBuf> {
            if self.fail_save {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            self.saved.push(filename.to_string());
            Ok(PathBuf::from(filename))
        }

        fn release(&mut self, _handle: usize) {
            self.released += 1;
        }
    }

    #[test]
    fn test_filename_replaces_whitespace_runs() {
        assert_eq!(cv_filename("Jane Doe"), "Jane_Doe_CV.html");
        assert_eq!(cv_filename("Jane \t  Q\nDoe"), "Jane_Q_Doe_CV.html");
    }

    #[test]
    fn test_filename_falls_back_on_blank_name() {
        assert_eq!(cv_filename(""), "Portfolio_CV.html");
        assert_eq!(cv_filename("   "), "Portfolio_CV.html");
    }

    #[test]
    fn test_filename_flattens_path_separators() {
        assert_eq!(cv_filename("../Jane"), ".._Jane_CV.html");
        assert_eq!(cv_filename("Jane/Doe"), "Jane_Doe_CV.html");
        assert_eq!(cv_filename("Jane / Doe"), "Jane_Doe_CV.html");
        assert_eq!(cv_filename(r"C:\Jane"), "C:_Jane_CV.html");
    }

    #[test]
    fn test_materialize_releases_after_failed_save() {
        let mut sink = CountingSink {
            fail_save: true,
            ..Default::default()
        };
        assert!(materialize(&mut sink, b"doc", "a.html").is_err());
        assert_eq!(sink.created, 1);
        assert_eq!(sink.released, 1);
    }

    #[test]
    fn test_file_sink_writes_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());

        let path = materialize(&mut sink, b"<html></html>", "Jane_CV.html").unwrap();

        assert_eq!(path, dir.path().join("Jane_CV.html"));
        assert_eq!(std::fs::read(&path).unwrap(), b"<html></html>");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "staged temp file should be removed");
    }

    #[test]
    fn test_file_sink_stays_inside_download_dir() {
        let root = tempfile::tempdir().unwrap();
        let downloads = root.path().join("downloads");
        let mut sink = FileSink::new(&downloads);

        let path = materialize(&mut sink, b"x", &cv_filename("../Jane")).unwrap();
        assert_eq!(path, downloads.join(".._Jane_CV.html"));
        let path = materialize(&mut sink, b"x", &cv_filename("Jane/Doe")).unwrap();
        assert_eq!(path, downloads.join("Jane_Doe_CV.html"));

        let escaped = materialize(&mut sink, b"x", "../Jane_CV.html").unwrap_err();
        assert_eq!(escaped.kind(), std::io::ErrorKind::InvalidInput);
        assert!(!root.path().join("Jane_CV.html").exists());
        assert!(materialize(&mut sink, b"x", "..").is_err());
        assert!(materialize(&mut sink, b"x", "").is_err());

        let entries = std::fs::read_dir(&downloads).unwrap().count();
        assert_eq!(entries, 2, "refused saves leave no staged files behind");
    }
}
