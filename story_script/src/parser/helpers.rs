use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `SampleLine: Code=S1` / `DynamicSampleLine: Code=Z1[Slug]`
    pub(super) static ref SAMPLE_LINE: Regex =
        Regex::new(r"(?:^|\s)(SampleLine|DynamicSampleLine):\s*Code\s*=\s*([^\s,\[]+)(\[[^\]]*\])?")
            .expect("sample line regex");
    /// `S1: text`
    pub(super) static ref COMPACT_LINE: Regex = Regex::new(r"^([SZ]\d+):\s*(.*)$").expect("compact line regex");
    /// `Narrator (S1): text` / `Narrator (Z1[Slug]): text`. Codes stop where `SAMPLE_LINE` stops.
    pub(super) static ref ROLE_CODE_LINE: Regex =
        Regex::new(r"^([^():]+?)\s*\(([^\s,\[()]+)(\[[^\]()]*\])?[^()]*\):\s*(.*)$").expect("role line regex");
    /// `Narrator: text`
    pub(super) static ref ROLE_LINE: Regex = Regex::new(r"^([^():]+?):\s*(.*)$").expect("role regex");
    static ref BG_CODE: Regex = Regex::new(r"Code\s*=\s*([^,]*)").expect("background code regex");
    static ref BG_FADE_IN: Regex = Regex::new(r"FadeIn\s*=\s*([^,\s]+)").expect("fade in regex");
    static ref BG_FADE_OUT: Regex = Regex::new(r"FadeOut\s*=\s*([^,\s]+)").expect("fade out regex");
}

/// Case-insensitive `strip_prefix`.
pub(super) fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

pub(super) fn background_code(line: &str) -> Option<String> {
    capture(&BG_CODE, line)
}

pub(super) fn background_fade_in(line: &str) -> Option<String> {
    capture(&BG_FADE_IN, line)
}

pub(super) fn background_fade_out(line: &str) -> Option<String> {
    capture(&BG_FADE_OUT, line)
}

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_ignores_case() {
        assert_eq!(strip_prefix_ignore_case("EPISODE: x", "episode:"), Some(" x"));
        assert_eq!(strip_prefix_ignore_case("Epi", "episode:"), None);
        assert_eq!(strip_prefix_ignore_case("żółw", "ep"), None);
    }

    #[test]
    fn background_fields() {
        let line = "BackgroundSampleLine: Code=Forest Birds, FadeIn=00:00:03, FadeOut=00:00:04";
        assert_eq!(background_code(line).as_deref(), Some("Forest Birds"));
        assert_eq!(background_fade_in(line).as_deref(), Some("00:00:03"));
        assert_eq!(background_fade_out(line).as_deref(), Some("00:00:04"));
        assert_eq!(background_fade_in("BackgroundSampleLine: Code=x"), None);
    }
}
