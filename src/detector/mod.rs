use once_cell::sync::Lazy;
use regex::Regex;

/// Substring that must appear somewhere in a message before it is scanned.
pub const HOST_MARKER: &str = "douyin.com";

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("Failed to compile url regex"));

/// Return the first URL-shaped token of `text`, provided the text mentions
/// the platform host anywhere.
///
/// The host check and the URL match are independent: a message that names
/// the host in prose and carries some other link yields that other link.
pub fn detect(text: &str) -> Option<&str> {
    if !text.contains(HOST_MARKER) {
        return None;
    }
    URL_REGEX.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_share_text() {
        let text = "2.89 复制打开抖音，看看【海报新闻的作品】对话一夜涨粉8万的00后...\n\
                    https://v.douyin.com/i5cseJ9a/ 10/23 r@E.uF nQX:/";
        assert_eq!(detect(text), Some("https://v.douyin.com/i5cseJ9a/"));
    }

    #[test]
    fn test_requires_host_marker() {
        assert_eq!(detect("look https://example.com/video/1"), None);
        assert_eq!(detect("douyin.com without any link"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_first_url_wins_even_if_unrelated() {
        let text = "see https://example.com/a then https://www.douyin.com/video/1";
        assert_eq!(detect(text), Some("https://example.com/a"));
    }

    #[test]
    fn test_url_stops_at_whitespace() {
        assert_eq!(
            detect("http://v.douyin.com/abc\tmore"),
            Some("http://v.douyin.com/abc")
        );
    }
}
