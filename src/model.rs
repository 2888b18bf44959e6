//! Typed translation result
//!
//! The endpoint answers with a positionally-encoded nested array; these
//! structures are its typed counterpart. Every list preserves the order of
//! appearance in the raw response, and every field may legitimately be
//! empty or zero when the corresponding response position was absent.

use icu_locale::Locale;
use serde::{Serialize, Serializer};

/// One translated sentence-level segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sentence {
    /// Original content of the segment.
    pub content: String,
    /// Translated content of the segment.
    pub translation: String,
    /// Pronunciation of the segment in the target language.
    pub pronunciation: String,
    /// Frequency of the segment in the corpus.
    pub frequency: f64,
}

/// An equivalent word in the target language.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Equivalent {
    pub content: String,
    pub equivalents: Vec<String>,
    pub frequency: f64,
}

/// Per-word translation with its equivalents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordTranslation {
    pub part_of_speech: String,
    pub frequency: f64,
    pub translations: Vec<String>,
    pub equivalents: Vec<Equivalent>,
}

/// One alternate rendering of a translated fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlternateForm {
    pub text: String,
    pub is_common: bool,
    pub is_informal: bool,
}

/// Alternate translations for a fragment of the original content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlternateTranslation {
    pub content: String,
    pub translations: Vec<AlternateForm>,
}

/// A group of synonyms under one category label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SynonymGroup {
    pub category: String,
    pub synonyms: Vec<String>,
}

/// Synonyms for a word, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordSynonym {
    pub part_of_speech: String,
    pub contents: String,
    pub frequency: f64,
    pub synonyms: Vec<SynonymGroup>,
}

/// A single definition with an optional usage example.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Definition {
    pub text: String,
    pub example: String,
}

/// Definitions for a word, grouped by part of speech.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordDefinition {
    pub part_of_speech: String,
    pub definitions: Vec<Definition>,
}

/// Full result of a single translation request.
///
/// `content`, `translation` and `pronunciation` are aggregates over the
/// sentence segments: the first two are concatenations in segment order,
/// the pronunciation is the last segment's (an upstream asymmetry that is
/// kept as-is). The per-segment values live in `translated_sentences`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    pub content: String,
    pub translation: String,
    pub pronunciation: String,
    pub translated_sentences: Vec<Sentence>,
    pub word_translations: Vec<WordTranslation>,
    /// Detected source language; the root locale (`und`) when the response
    /// carried none or an unparsable one.
    #[serde(serialize_with = "serialize_locale")]
    pub source_language: Locale,
    pub alternate_translations: Vec<AlternateTranslation>,
    pub word_synonyms: Vec<WordSynonym>,
    pub word_definitions: Vec<WordDefinition>,
    pub word_examples: Vec<String>,
}

impl Default for TranslationResult {
    fn default() -> Self {
        TranslationResult {
            content: String::new(),
            translation: String::new(),
            pronunciation: String::new(),
            translated_sentences: Vec::new(),
            word_translations: Vec::new(),
            source_language: Locale::UNKNOWN,
            alternate_translations: Vec::new(),
            word_synonyms: Vec::new(),
            word_definitions: Vec::new(),
            word_examples: Vec::new(),
        }
    }
}

/// Serialize a locale as its BCP-47 string.
fn serialize_locale<S: Serializer>(locale: &Locale, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(locale)
}
