//! Text repair for model-generated itineraries
//!
//! Each rule is a pure `&str -> String` function. A normalizer variant is an
//! ordered list of rules; later rules rely on earlier ones having run, so the
//! order of the pass tables is part of the behavior.

use regex::Regex;
use std::sync::LazyLock;

use crate::{Result, TripweaveError};

/// A single named rewrite rule
#[derive(Clone, Copy)]
pub struct NormalizationPass {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for NormalizationPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Passes feeding the segmenter: keeps single newlines, canonical emphasis
pub const STRUCTURED_PASSES: [NormalizationPass; 6] = [
    NormalizationPass { name: "split_fused_words", apply: split_fused_words },
    NormalizationPass { name: "canonicalize_emphasis", apply: canonicalize_emphasis },
    NormalizationPass { name: "space_hyphens", apply: space_hyphens },
    NormalizationPass { name: "collapse_blank_lines", apply: collapse_blank_lines },
    NormalizationPass { name: "collapse_whitespace", apply: collapse_whitespace },
    NormalizationPass { name: "trim", apply: trim },
];

/// Passes for HTML embedding: emphasis stripped, newlines become `<br/>`
pub const HTML_PASSES: [NormalizationPass; 10] = [
    NormalizationPass { name: "strip_bold_markers", apply: strip_bold_markers },
    NormalizationPass { name: "strip_long_markers", apply: strip_long_markers },
    NormalizationPass { name: "split_fused_words", apply: split_fused_words },
    NormalizationPass { name: "split_before_capitals", apply: split_before_capitals },
    NormalizationPass { name: "newlines_to_breaks", apply: newlines_to_breaks },
    NormalizationPass { name: "strip_bullet_emphasis", apply: strip_bullet_emphasis },
    NormalizationPass { name: "tighten_punctuation", apply: tighten_punctuation },
    NormalizationPass { name: "split_digit_capitals", apply: split_digit_capitals },
    NormalizationPass { name: "squash_whitespace", apply: squash_whitespace },
    NormalizationPass { name: "trim", apply: trim },
];

/// Which rendering the normalized text is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizerVariant {
    /// Plain text with single newlines, consumed by the segmenter
    Structured,
    /// Single-line text with `<br/>` markers for HTML embedding
    Html,
}

/// Applies one variant's passes to raw model output
#[derive(Debug, Clone, Copy)]
pub struct ItineraryTextNormalizer {
    variant: NormalizerVariant,
}

impl ItineraryTextNormalizer {
    #[must_use]
    pub fn new(variant: NormalizerVariant) -> Self {
        Self { variant }
    }

    #[must_use]
    pub fn structured() -> Self {
        Self::new(NormalizerVariant::Structured)
    }

    #[must_use]
    pub fn html() -> Self {
        Self::new(NormalizerVariant::Html)
    }

    #[must_use]
    pub fn passes(&self) -> &'static [NormalizationPass] {
        match self.variant {
            NormalizerVariant::Structured => &STRUCTURED_PASSES,
            NormalizerVariant::Html => &HTML_PASSES,
        }
    }

    /// Normalize extracted model text; absent or blank text is an
    /// [`TripweaveError::EmptyGeneration`].
    pub fn normalize(&self, raw: Option<&str>) -> Result<String> {
        match raw {
            Some(text) if !text.trim().is_empty() => Ok(self.apply_passes(text)),
            _ => Err(TripweaveError::EmptyGeneration),
        }
    }

    /// Run every pass in order, without the emptiness check
    #[must_use]
    pub fn apply_passes(&self, text: &str) -> String {
        self.passes()
            .iter()
            .fold(text.to_string(), |acc, pass| (pass.apply)(&acc))
    }
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid normalization pattern {pattern}: {e}"))
}

static FUSED_WORDS: LazyLock<Regex> = LazyLock::new(|| regex(r"([a-z])([A-Z])"));
static EMPHASIS_BEFORE_SPACE: LazyLock<Regex> = LazyLock::new(|| regex(r"\*+\s+"));
static SPACE_BEFORE_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| regex(r"\s+\*"));
static JOINED_HYPHEN: LazyLock<Regex> = LazyLock::new(|| regex(r"([0-9A-Za-z_])-([0-9A-Za-z_])"));
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| regex(r"\n{2,}"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| regex(r"\s{2,}"));
static BOLD_MARKERS: LazyLock<Regex> = LazyLock::new(|| regex(r"\*{2,}"));
static LONG_MARKERS: LazyLock<Regex> = LazyLock::new(|| regex(r"\*{3,}"));
static BEFORE_CAPITAL: LazyLock<Regex> = LazyLock::new(|| regex(r"([0-9A-Za-z_])([A-Z])"));
static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| regex(r"\s?([,.])"));
static DIGIT_CAPITAL: LazyLock<Regex> = LazyLock::new(|| regex(r"([0-9])([A-Z])"));
static ANY_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| regex(r"\s+"));

/// `travelerExperience` -> `traveler Experience`
pub fn split_fused_words(text: &str) -> String {
    FUSED_WORDS.replace_all(text, "$1 $2").into_owned()
}

/// `*` runs before whitespace become `** `; whitespace before `*` becomes one space
pub fn canonicalize_emphasis(text: &str) -> String {
    let text = EMPHASIS_BEFORE_SPACE.replace_all(text, "** ");
    SPACE_BEFORE_EMPHASIS.replace_all(&text, " *").into_owned()
}

/// `well-known` -> `well - known`, including legitimate compounds
pub fn space_hyphens(text: &str) -> String {
    JOINED_HYPHEN.replace_all(text, "$1 - $2").into_owned()
}

pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

pub fn strip_bold_markers(text: &str) -> String {
    BOLD_MARKERS.replace_all(text, " ").into_owned()
}

pub fn strip_long_markers(text: &str) -> String {
    LONG_MARKERS.replace_all(text, " ").into_owned()
}

/// Any word character directly followed by a capital: `3PM` -> `3 PM`, `NYC` -> `N YC`.
/// Matches do not overlap, so `atNYC` -> `at NY C`.
pub fn split_before_capitals(text: &str) -> String {
    BEFORE_CAPITAL.replace_all(text, "$1 $2").into_owned()
}

pub fn newlines_to_breaks(text: &str) -> String {
    text.replace('\n', "<br/>")
}

/// `- *Item` -> `- Item`
pub fn strip_bullet_emphasis(text: &str) -> String {
    text.replace("- *", "- ")
}

pub fn tighten_punctuation(text: &str) -> String {
    SPACE_BEFORE_PUNCTUATION.replace_all(text, "$1").into_owned()
}

pub fn split_digit_capitals(text: &str) -> String {
    DIGIT_CAPITAL.replace_all(text, "$1 $2").into_owned()
}

pub fn squash_whitespace(text: &str) -> String {
    ANY_WHITESPACE.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DayOneBreakfast", "Day One Breakfast")]
    #[case("travelerExperience", "traveler Experience")]
    #[case("NYC trip", "NYC trip")]
    #[case("aBcD", "a Bc D")]
    fn test_split_fused_words(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(split_fused_words(input), expected);
    }

    #[rstest]
    #[case("thisIsCamelCase andMore")]
    #[case("aBcDeFgH")]
    #[case("plain text")]
    fn test_split_fused_words_is_idempotent(#[case] input: &str) {
        let once = split_fused_words(input);
        assert_eq!(split_fused_words(&once), once);
    }

    #[test]
    fn test_canonicalize_emphasis() {
        assert_eq!(canonicalize_emphasis("**Day 1**   Arrival"), "**Day 1** Arrival");
        assert_eq!(canonicalize_emphasis("*  note"), "** note");
        assert_eq!(canonicalize_emphasis("see   *Cafe*"), "see *Cafe*");
        assert_eq!(canonicalize_emphasis("line\n* item"), "line ** item");
    }

    #[test]
    fn test_space_hyphens() {
        assert_eq!(space_hyphens("well-known"), "well - known");
        assert_eq!(space_hyphens("a - b"), "a - b");
        assert_eq!(space_hyphens("x-y-z"), "x - y-z");
    }

    #[test]
    fn test_collapse_rules() {
        assert_eq!(collapse_blank_lines("a\n\n\nb\nc"), "a\nb\nc");
        assert_eq!(collapse_whitespace("a  \t b\nc"), "a b\nc");
        assert_eq!(trim("  x \n"), "x");
    }

    #[test]
    fn test_structured_normalize() {
        let raw = "**Day 1: Arrival**\n\n\nMorning:  Visit the well-known fortAnd palace.\n\nEvening: dinner  ";
        let cleaned = ItineraryTextNormalizer::structured().normalize(Some(raw)).unwrap();
        // emphasis canonicalization swallows the newline after a closing marker
        assert_eq!(
            cleaned,
            "**Day 1: Arrival** Morning: Visit the well - known fort And palace.\nEvening: dinner"
        );
    }

    #[test]
    fn test_structured_repairs_camel_fusion() {
        let cleaned = ItineraryTextNormalizer::structured()
            .normalize(Some("DayOneBreakfast"))
            .unwrap();
        assert!(cleaned.contains("Day One Breakfast"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("  \n "))]
    fn test_empty_text_is_empty_generation(#[case] raw: Option<&str>) {
        for normalizer in [
            ItineraryTextNormalizer::structured(),
            ItineraryTextNormalizer::html(),
        ] {
            assert!(matches!(
                normalizer.normalize(raw),
                Err(TripweaveError::EmptyGeneration)
            ));
        }
    }

    #[test]
    fn test_html_rules() {
        assert_eq!(strip_bold_markers("**Bold**"), " Bold ");
        assert_eq!(split_before_capitals("3PM atNYC"), "3 PM at NY C");
        assert_eq!(split_before_capitals("NYC"), "N YC");
        assert_eq!(newlines_to_breaks("a\nb"), "a<br/>b");
        assert_eq!(strip_bullet_emphasis("- *Cafe*"), "- Cafe*");
        assert_eq!(tighten_punctuation("food , views ."), "food, views.");
        assert_eq!(split_digit_capitals("Day1Morning"), "Day1 Morning");
        assert_eq!(squash_whitespace("a \t\n b"), "a b");
    }

    #[test]
    fn test_html_normalize() {
        let raw = "**Day 1:** Arrival\n- *Cafe Uno* , lovely .\nMorning: walk";
        let html = ItineraryTextNormalizer::html().normalize(Some(raw)).unwrap();
        assert_eq!(
            html,
            "Day 1: Arrival<br/>- Cafe Uno*, lovely.<br/>Morning: walk"
        );
    }

    #[test]
    fn test_variants_differ() {
        let raw = "**Day 1** Arrival\nMorning: tea";
        let structured = ItineraryTextNormalizer::structured().apply_passes(raw);
        let html = ItineraryTextNormalizer::html().apply_passes(raw);
        assert!(structured.contains('\n'));
        assert!(html.contains("<br/>"));
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_pass_order() {
        let names: Vec<&str> = ItineraryTextNormalizer::structured()
            .passes()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            [
                "split_fused_words",
                "canonicalize_emphasis",
                "space_hyphens",
                "collapse_blank_lines",
                "collapse_whitespace",
                "trim"
            ]
        );
    }
}
