//! Anchor slugs derived from heading text.
//!
//! Words are split on every space, hyphen or underscore; punctuation is
//! dropped and uppercase letters open a new hyphenated segment (`CamelCase`
//! becomes `camel-case`). Empty words are kept as empty segments, so `"a  b"`
//! yields `a--b`.

use std::collections::HashMap;

fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_')
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Convert arbitrary heading text into a kebab-case anchor slug.
///
/// Total over every input; `slug("")` is the empty string.
pub fn slug(text: &str) -> String {
    text.split(is_separator)
        .map(kebab_case_word)
        .collect::<Vec<_>>()
        .join("-")
}

fn kebab_case_word(word: &str) -> String {
    let mut output = String::with_capacity(word.len());

    for ch in word.chars().filter(|ch| is_word_char(*ch)) {
        if ch.is_uppercase() {
            output.push('-');
            output.extend(ch.to_lowercase());
        } else {
            output.push(ch);
        }
    }

    match output.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => output,
    }
}

/// Deterministically generate unique anchor slugs within a single document.
///
/// Headings processed in order receive monotonic suffixes when duplicates
/// occur (`section`, `section-2`, `section-3`). Without uniqueness the slugger
/// returns the plain slug every time.
#[derive(Default, Debug)]
pub struct AnchorSlugger {
    unique: bool,
    occurrences: HashMap<String, usize>,
}

impl AnchorSlugger {
    pub fn new(unique: bool) -> Self {
        Self {
            unique,
            occurrences: HashMap::new(),
        }
    }

    /// Slug for the provided heading text, suffixed when uniqueness is enabled
    /// and the base slug was already handed out.
    pub fn anchor_for(&mut self, heading: &str) -> String {
        let base = slug(heading);
        if !self.unique {
            return base;
        }

        let count = self.occurrences.entry(base.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_words_are_split() {
        assert_eq!(slug("CamelCase"), "camel-case");
    }

    #[test]
    fn snake_case_becomes_kebab_case() {
        assert_eq!(slug("snake_case"), "snake-case");
    }

    #[test]
    fn punctuation_is_removed() {
        assert_eq!(slug("Greetings, Programs!"), "greetings-programs");
        assert_eq!(slug("Greetings, Starfighter!"), "greetings-starfighter");
    }

    #[test]
    fn empty_input_yields_empty_slug() {
        assert_eq!(slug(""), "");
    }

    #[test]
    fn empty_words_keep_their_segment() {
        assert_eq!(slug("a  b"), "a--b");
        assert_eq!(slug("- leading"), "--leading");
        assert_eq!(slug("!!! bang"), "-bang");
    }

    #[test]
    fn digits_and_non_ascii_letters_survive() {
        assert_eq!(slug("Python 3.12"), "python-312");
        assert_eq!(slug("Über Straße"), "über-straße");
    }

    #[test]
    fn already_slugged_input_is_stable() {
        for input in ["camel-case", "greetings-programs", "a--b", "python-312"] {
            assert_eq!(slug(input), input);
            assert_eq!(slug(&slug(input)), slug(input));
        }
    }

    #[test]
    fn anchor_slugger_keeps_collisions_by_default() {
        let mut slugger = AnchorSlugger::new(false);

        assert_eq!(slugger.anchor_for("Overview"), "overview");
        assert_eq!(slugger.anchor_for("Overview"), "overview");
    }

    #[test]
    fn anchor_slugger_produces_unique_slugs() {
        let mut slugger = AnchorSlugger::new(true);

        let first = slugger.anchor_for("Overview");
        let second = slugger.anchor_for("Overview");
        let third = slugger.anchor_for("Overview");
        let other = slugger.anchor_for("Details");

        assert_eq!(first, "overview");
        assert_eq!(second, "overview-2");
        assert_eq!(third, "overview-3");
        assert_eq!(other, "details");
    }
}
