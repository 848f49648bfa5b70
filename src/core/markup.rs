use std::sync::OnceLock;

use regex::Regex;

fn img_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<img[^>]*>").unwrap())
}

fn audio_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)https?://[^\s"']+\.mp3"#).unwrap())
}

/// Front markup with any `<img>` tags removed, so the prompt text can be
/// rendered at display size and the image placed separately.
pub fn strip_image_tags(markup: &str) -> String {
    img_tag_re().replace_all(markup, "").to_string()
}

/// The first `<img>` tag in the markup, if any.
pub fn extract_image_tag(markup: &str) -> Option<String> {
    img_tag_re().find(markup).map(|m| m.as_str().to_string())
}

/// Back markup with embedded audio file URLs removed. Seeded decks store the
/// pronunciation URL inline in the back text.
pub fn strip_audio_urls(markup: &str) -> String {
    audio_url_re().replace_all(markup, "").to_string()
}

/// First line of the text, or the whole text when the first line is empty or
/// there is no line break.
pub fn first_line(text: &str) -> &str {
    match text.split('\n').next() {
        Some(line) if !line.is_empty() => line,
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_image_tags() {
        let front = "ア<img src=\"/media/a.png\" class=\"glyph\">";
        assert_eq!(strip_image_tags(front), "ア");
        assert_eq!(
            extract_image_tag(front).as_deref(),
            Some("<img src=\"/media/a.png\" class=\"glyph\">")
        );
        assert_eq!(extract_image_tag("ア"), None);
    }

    #[test]
    fn strips_audio_urls() {
        let back = "a\nListen: https://cdn.example/audio/a.mp3 and repeat";
        assert_eq!(strip_audio_urls(back), "a\nListen:  and repeat");
    }

    #[test]
    fn first_line_fallbacks() {
        assert_eq!(first_line("a\nExample"), "a");
        assert_eq!(first_line("ka"), "ka");
        assert_eq!(first_line("\nka"), "\nka");
    }
}
