//! Heading tag recognition.

use serde::{Deserialize, Serialize};

/// Which heading tags participate in anchoring and navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingTags {
    /// `h1` through `h6`.
    #[default]
    Standard,
    /// `h1` through `h5`; `h6` is left untouched, as older deployments of
    /// this site behaved.
    Legacy,
}

impl HeadingTags {
    fn deepest(self) -> u8 {
        match self {
            HeadingTags::Standard => 6,
            HeadingTags::Legacy => 5,
        }
    }

    /// Heading level (1–6) for a recognised tag name, `None` otherwise.
    pub fn level_of(self, tag: &str) -> Option<u8> {
        let digit = tag
            .strip_prefix('h')
            .or_else(|| tag.strip_prefix('H'))?;
        let level = match digit {
            "1" => 1,
            "2" => 2,
            "3" => 3,
            "4" => 4,
            "5" => 5,
            "6" => 6,
            _ => return None,
        };

        (level <= self.deepest()).then_some(level)
    }
}

/// Heading configuration applied while post-processing rendered HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorPolicy {
    pub tags: HeadingTags,
    /// Suffix repeated slugs with `-2`, `-3`, … instead of reusing them.
    pub unique: bool,
}

impl AnchorPolicy {
    pub fn new(tags: HeadingTags, unique: bool) -> Self {
        Self { tags, unique }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tags_cover_all_six_levels() {
        let tags = HeadingTags::Standard;
        assert_eq!(tags.level_of("h1"), Some(1));
        assert_eq!(tags.level_of("h4"), Some(4));
        assert_eq!(tags.level_of("h6"), Some(6));
    }

    #[test]
    fn legacy_tags_skip_h6() {
        let tags = HeadingTags::Legacy;
        assert_eq!(tags.level_of("h5"), Some(5));
        assert_eq!(tags.level_of("h6"), None);
    }

    #[test]
    fn non_heading_tags_are_rejected() {
        let tags = HeadingTags::Standard;
        for tag in ["p", "h7", "h0", "hr", "head", "header", "g6", ""] {
            assert_eq!(tags.level_of(tag), None, "tag `{tag}`");
        }
    }
}
