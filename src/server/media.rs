//! Attachment naming and MIME type detection.

use crate::messenger::DocumentRef;
use std::path::{Path, PathBuf};

/// Used when the extension is missing or unknown.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Name shown to recipients: the caller's `filename` if non-empty, else the
/// path's base name.
pub fn display_name(path: &Path, filename: Option<&str>) -> String {
    match filename {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string()),
    }
}

/// Top-level types a guess may carry. Niche registrations such as
/// `chemical/x-xyz` fall back to [`FALLBACK_MIME`].
const DOCUMENT_TOP_LEVELS: &[&str] = &["application", "text", "image", "audio", "video"];

/// MIME type guessed from the extension of `name`.
pub fn mime_type_for(name: &str) -> String {
    mime_guess::from_path(name)
        .iter_raw()
        .find(|mime| {
            mime.split_once('/')
                .is_some_and(|(top, _)| DOCUMENT_TOP_LEVELS.contains(&top))
        })
        .unwrap_or(FALLBACK_MIME)
        .to_string()
}

pub fn document_ref(path: PathBuf, filename: Option<&str>) -> DocumentRef {
    let file_name = display_name(&path, filename);
    let mime_type = mime_type_for(&file_name);
    DocumentRef {
        path,
        mime_type,
        file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("report.pdf", "application/pdf")]
    #[case("jobs.csv", "text/csv")]
    #[case("photo.PNG", "image/png")]
    #[case("notes.txt", "text/plain")]
    #[case("blob.zzqq", FALLBACK_MIME)]
    #[case("molecule.xyz", FALLBACK_MIME)]
    #[case("Makefile", FALLBACK_MIME)]
    fn test_mime_type_for(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(mime_type_for(name), expected);
    }

    #[test]
    fn test_display_name_defaults_to_base_name() {
        let path = Path::new("/var/spool/downloads/shortlist.xlsx");
        assert_eq!(display_name(path, None), "shortlist.xlsx");
        assert_eq!(display_name(path, Some("")), "shortlist.xlsx");
        assert_eq!(display_name(path, Some("Final list.xlsx")), "Final list.xlsx");
    }

    #[test]
    fn test_mime_follows_display_name_not_path() {
        let doc = document_ref(PathBuf::from("/tmp/upload.bin"), Some("invoice.pdf"));
        assert_eq!(doc.file_name, "invoice.pdf");
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(doc.path, PathBuf::from("/tmp/upload.bin"));
    }
}
