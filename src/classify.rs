//! Heuristics deciding which links look like logs

/// Substrings that mark a URL as a probable log. Permissive on purpose: this
/// only gates which links are remembered, not which uploads are attempted.
const LOG_MARKERS: &[&str] = &[".log", ".txt", ".out", ".crash", "log", "crash", "latest"];

const GZIP_LOG_SUFFIX: &str = ".log.gz";

/// Check if a URL appears to reference a log file
pub fn is_likely_log_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    let lower = url.to_lowercase();
    LOG_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// True iff the URL, with any query string removed, ends in `.log.gz`
pub fn is_gzip_log(url: &str) -> bool {
    let path = url.split_once('?').map_or(url, |(path, _)| path);
    path.to_lowercase().ends_with(GZIP_LOG_SUFFIX)
}

/// True if the value carries an `http://` or `https://` scheme. Leading
/// whitespace is ignored.
pub fn is_http_url(value: &str) -> bool {
    let head: String = value
        .trim_start()
        .chars()
        .take(8)
        .collect::<String>()
        .to_lowercase();
    head.starts_with("http://") || head.starts_with("https://")
}
