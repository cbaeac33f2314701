//! Uploaded file handles.

use std::path::{Path, PathBuf};

/// The only media type the analysis pipeline accepts.
pub const PDF_MIME: &str = "application/pdf";

/// A file the user picked for analysis.
///
/// The MIME type is whatever the picker declared; it is compared verbatim,
/// nothing inspects the file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub path: Option<PathBuf>,
    pub size: Option<u64>,
}

impl UploadedFile {
    /// Build a handle without touching the filesystem.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            path: None,
            size: None,
        }
    }

    /// Build a handle for a local file, declaring its type from the extension.
    ///
    /// Fails if the path does not point at a readable regular file.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime_type: mime_from_name(&name),
            name,
            path: Some(path.to_path_buf()),
            size: Some(meta.len()),
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }
}

/// Declared media type for a filename, by extension.
pub fn mime_from_name(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_name() {
        assert_eq!(mime_from_name("CP23_notice.pdf"), PDF_MIME);
        assert_eq!(mime_from_name("scan.PDF"), PDF_MIME);
        assert_eq!(mime_from_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_from_name("notes"), "application/octet-stream");
        assert_eq!(mime_from_name("archive.pdf.zip"), "application/zip");
        assert_eq!(mime_from_name("notice.tiff"), "image/tiff");
    }

    #[test]
    fn test_is_pdf_exact() {
        assert!(UploadedFile::new("a.pdf", "application/pdf").is_pdf());
        assert!(!UploadedFile::new("a.pdf", "application/PDF").is_pdf());
        assert!(!UploadedFile::new("a.pdf", "application/pdf; charset=binary").is_pdf());
        assert!(!UploadedFile::new("a.png", "image/png").is_pdf());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CP23_notice_2024.pdf");
        std::fs::write(&path, b"%PDF-1.7\n").unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "CP23_notice_2024.pdf");
        assert_eq!(file.mime_type, PDF_MIME);
        assert_eq!(file.size, Some(9));
        assert_eq!(file.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_from_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(UploadedFile::from_path(&dir.path().join("nope.pdf")).is_err());
    }

    #[test]
    fn test_from_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = UploadedFile::from_path(dir.path()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
