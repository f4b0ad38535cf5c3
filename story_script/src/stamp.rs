//! `hh:mm:ss` time stamps used by pause and fade cues.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref STAMP: Regex = Regex::new(r"(\d{1,2}):(\d{2}):(\d{2})").expect("stamp regex");
}

/// Find the first `hh:mm:ss` stamp in `text` and return its length in seconds.
pub fn parse_stamp(text: &str) -> Option<u32> {
    let caps = STAMP.captures(text)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    Some(field(1)? * 3600 + field(2)? * 60 + field(3)?)
}

/// Format seconds as a zero-padded `hh:mm:ss` stamp.
pub fn format_stamp(seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds / 60) % 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps() {
        assert_eq!(parse_stamp("PauseLine: 00:00:05"), Some(5));
        assert_eq!(parse_stamp("01:02:03"), Some(3723));
        assert_eq!(parse_stamp("PauseLine: soon"), None);
        assert_eq!(format_stamp(3), "00:00:03");
        assert_eq!(format_stamp(75), "00:01:15");
    }
}
