use crate::core::Quality;
use regex::Regex;
use std::sync::LazyLock;

static QUALITY_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{3,4})\s*p?\b").ok());

/// Completes protocol-relative and root-relative links against `base`.
pub fn fix_url(url: &str, base: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else if url.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), url)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), url)
    }
}

/// Reads a quality out of labels like `"720P - mp4"`, `"HD 1080p"` or `"480"`.
pub fn quality_from_label(label: &str) -> Quality {
    QUALITY_REGEX
        .as_ref()
        .and_then(|re| re.captures(label))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(Quality::from_height)
        .unwrap_or(Quality::Unknown)
}

/// `scheme://host` of a URL, falling back to the input when unparsable.
pub fn origin(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_url() {
        assert_eq!(fix_url("//cdn.example/v.mp4", "https://a.example"), "https://cdn.example/v.mp4");
        assert_eq!(fix_url("/e/abc", "https://a.example/"), "https://a.example/e/abc");
        assert_eq!(fix_url("https://b.example/x", "https://a.example"), "https://b.example/x");
    }

    #[test]
    fn test_quality_from_label() {
        assert_eq!(quality_from_label("Download\n(720P - mp4)"), Quality::P720);
        assert_eq!(quality_from_label("HD 1080p"), Quality::P1080);
        assert_eq!(quality_from_label("Auto"), Quality::Unknown);
    }

    #[test]
    fn test_origin() {
        assert_eq!(origin("https://dood.la/e/xyz?x=1"), "https://dood.la");
    }
}
