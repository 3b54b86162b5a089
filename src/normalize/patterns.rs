// file: src/normalize/patterns.rs
// description: compiled regex patterns for html stripping and actor extraction
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any tag, shortest match, across line breaks
    pub static ref HTML_TAG: Regex = Regex::new(r"(?s)<.*?>").expect("HTML_TAG regex is valid");

    // Ransomfeed embeds the group name as: group called <b> NAME </b>
    pub static ref GROUP_CALLED: Regex = Regex::new(
        r"(?i)group called\s*<b>\s*([^<]+?)\s*</b>"
    ).expect("GROUP_CALLED regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_tag_pattern() {
        assert!(HTML_TAG.is_match("<p>text</p>"));
        assert!(HTML_TAG.is_match("<a\nhref='x'>"));
        assert!(!HTML_TAG.is_match("plain text"));
    }

    #[test]
    fn test_group_called_pattern() {
        let caps = GROUP_CALLED
            .captures("attacked by a group called <b> LockBit </b> today")
            .unwrap();
        assert_eq!(&caps[1], "LockBit");
    }

    #[test]
    fn test_group_called_case_insensitive() {
        assert!(GROUP_CALLED.is_match("Group Called <B>Akira</B>"));
    }
}
