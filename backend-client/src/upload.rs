use std::path::Path;

use crate::error::BackendError;
use crate::error::Result;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// A PDF report ready to be sent to `/classify`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl PdfUpload {
    /// Wrap in-memory bytes, rejecting anything that is not a PDF.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let has_pdf_extension = Path::new(&file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !has_pdf_extension || !bytes.starts_with(PDF_MAGIC) {
            return Err(BackendError::InvalidUpload(format!(
                "Only PDF files are allowed: {file_name}"
            )));
        }
        Ok(Self { file_name, bytes })
    }

    /// Read a report from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| BackendError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part> {
        reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str("application/pdf")
            .map_err(|e| BackendError::InvalidUpload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn accepts_pdf_bytes_with_pdf_name() {
        let upload = PdfUpload::new("week1.PDF", b"%PDF-1.7\n...".to_vec()).unwrap();
        assert_eq!(upload.file_name(), "week1.PDF");
        assert_eq!(upload.len(), 12);
    }

    #[test]
    fn rejects_wrong_extension_or_content() {
        let err = PdfUpload::new("notes.txt", b"%PDF-1.7".to_vec()).unwrap_err();
        assert!(err.to_string().contains("Only PDF files are allowed"));
        assert!(PdfUpload::new("report.pdf", b"hello".to_vec()).is_err());
        assert!(PdfUpload::new("report.pdf", Vec::new()).is_err());
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("week2.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4 body").unwrap();

        let upload = PdfUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name(), "week2.pdf");
        assert!(!upload.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PdfUpload::from_path(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, BackendError::Io { .. }));
    }
}
