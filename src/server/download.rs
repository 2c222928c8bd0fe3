//! Download helpers

/// Filename served when sanitization leaves nothing usable
const FALLBACK_FILENAME: &str = "download";

/// Reduces a stored filename to a safe attachment name
///
/// Drops any directory component (either separator style), keeps only ASCII
/// alphanumerics, `.`, `_` and `-`, and strips leading dots so the result can
/// never name a parent or hidden path.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    let kept: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    let trimmed = kept.trim_start_matches('.');
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `Content-Disposition` value for an attachment download
pub fn attachment_header(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", sanitize_filename(filename))
}
