//! Where uploads land on disk and how their names are derived.
//!
//! Layout: `{root}/{YYYY}/{MM}/{DD}/{type}_{uuid}.{ext}`, dated in UTC.

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

/// Destination of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    /// Dated directory the file is written into.
    pub directory: String,
    /// Generated file name.
    pub filename: String,
}

impl StoragePath {
    /// Compute a fresh destination under `root` for a document of
    /// `doc_type` with `extension`, dated at `now`.
    pub fn generate(root: &str, doc_type: &str, extension: &str, now: DateTime<Utc>) -> Self {
        let root = root.trim_end_matches(['/', '\\']);
        let directory = format!(
            "{root}/{:04}/{:02}/{:02}",
            now.year(),
            now.month(),
            now.day()
        );
        let filename = format!("{doc_type}_{}.{extension}", Uuid::new_v4());
        Self {
            directory,
            filename,
        }
    }

    /// Full `/`-separated path of the file.
    pub fn full_path(&self) -> String {
        format!("{}/{}", self.directory, self.filename)
    }
}

/// Lower-cased substring after the last `.`, if there is a non-empty one.
pub fn file_extension(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Path separators become spaces, runs of whitespace become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped, and leading or trailing `.`/`_` are
/// stripped. The result may be empty.
pub fn secure_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(['.', '_']).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_generate_layout() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap();
        let path = StoragePath::generate("/srv/docs/", "invoice", "pdf", now);
        assert_eq!(path.directory, "/srv/docs/2024/03/07");
        assert!(path.filename.starts_with("invoice_"));
        assert!(path.filename.ends_with(".pdf"));
        // "invoice_" + 36-char uuid + ".pdf"
        assert_eq!(path.filename.len(), 8 + 36 + 4);
        assert_eq!(
            path.full_path(),
            format!("/srv/docs/2024/03/07/{}", path.filename)
        );
    }

    #[test]
    fn test_generated_names_differ() {
        let now = Utc::now();
        let a = StoragePath::generate("root", "t", "pdf", now);
        let b = StoragePath::generate("root", "t", "pdf", now);
        assert_ne!(a.filename, b.filename);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("scan.final.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Invoice.pdf"), "My_Invoice.pdf");
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename(r"C:\Users\a\résumé.doc"), "C_Users_a_rsum.doc");
        assert_eq!(secure_filename("..."), "");
    }
}
