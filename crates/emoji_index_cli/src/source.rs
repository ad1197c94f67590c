//! Chart document acquisition.
//!
//! # Responsibility
//! - Read a chart from a local path or fetch it over HTTP(S).
//! - Acquire both charts concurrently before parsing begins.

use anyhow::{anyhow, Context};
use std::time::Duration;

pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_text(url: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}

/// Loads one document.
pub fn load_document(source: &str, timeout_ms: u64) -> anyhow::Result<String> {
    if is_remote(source) {
        log::info!("event=fetch_start module=cli source={source}");
        return fetch_text(source, timeout_ms).with_context(|| format!("failed to fetch `{source}`"));
    }
    std::fs::read_to_string(source).with_context(|| format!("failed to read `{source}`"))
}

/// Loads the chart and modifier documents on two threads.
pub fn load_documents(
    chart: &str,
    modifiers: &str,
    timeout_ms: u64,
) -> anyhow::Result<(String, String)> {
    std::thread::scope(|scope| {
        let chart_job = scope.spawn(|| load_document(chart, timeout_ms));
        let modifiers_job = scope.spawn(|| load_document(modifiers, timeout_ms));
        let chart_html = chart_job
            .join()
            .map_err(|_| anyhow!("chart loader panicked"))??;
        let modifiers_html = modifiers_job
            .join()
            .map_err(|_| anyhow!("modifier chart loader panicked"))??;
        Ok((chart_html, modifiers_html))
    })
}

#[cfg(test)]
mod tests {
    use super::{is_remote, load_document, load_documents};

    #[test]
    fn remote_detection_requires_http_scheme() {
        assert!(is_remote("https://www.unicode.org/emoji/charts/emoji-list.html"));
        assert!(is_remote("http://localhost/list.html"));
        assert!(!is_remote("charts/emoji-list.html"));
    }

    #[test]
    fn missing_local_file_names_the_source() {
        let err = load_document("/nonexistent/emoji-list.html", 1000).expect_err("missing file must fail");
        assert!(err.to_string().contains("/nonexistent/emoji-list.html"));
    }

    #[test]
    fn loads_both_local_documents() {
        let dir = std::env::temp_dir().join(format!("emoji-index-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir should be created");
        let chart = dir.join("chart.html");
        let modifiers = dir.join("modifiers.html");
        std::fs::write(&chart, "<table></table>").expect("fixture should be written");
        std::fs::write(&modifiers, "<p></p>").expect("fixture should be written");

        let (chart_html, modifiers_html) = load_documents(
            chart.to_str().expect("temp path should be UTF-8"),
            modifiers.to_str().expect("temp path should be UTF-8"),
            1000,
        )
        .expect("both documents should load");
        assert_eq!(chart_html, "<table></table>");
        assert_eq!(modifiers_html, "<p></p>");
        std::fs::remove_dir_all(&dir).expect("temp dir should be removed");
    }
}
