//! Positional response decoding
//!
//! The translation endpoint answers with a deeply nested, loosely-typed
//! JSON array whose meaning depends entirely on element position. This
//! module walks that array and assembles a [`TranslationResult`].
//!
//! The wire format is undocumented and drifts, so extraction is defensive
//! throughout: a missing index, a short array, or a value of the wrong
//! runtime type degrades that single field to a zero value (empty string,
//! `0.0`, `false`, empty list) and decoding continues. The only failure
//! that aborts the decode is a payload that is not a JSON array at the top
//! level.
//!
//! Top-level positions and their sections:
//!
//! | position | section |
//! |----------|---------------------------------|
//! | 0 | sentence-level translation rows |
//! | 1 | per-word translations |
//! | 2 | detected source language (string, not a row array) |
//! | 5 | alternate translations |
//! | 11 | synonyms |
//! | 12 | definitions |
//! | 13 | usage examples |

use crate::error::{TranslateError, TranslateResult};
use crate::model::{
    AlternateForm, AlternateTranslation, Definition, Equivalent, Sentence, SynonymGroup,
    TranslationResult, WordDefinition, WordSynonym, WordTranslation,
};
use icu_locale::Locale;
use serde_json::Value;

/// Safely read a string at `index`, empty string on miss or type mismatch.
fn get_str(row: &[Value], index: usize) -> String {
    row.get(index)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Safely read a float at `index`, 0.0 on miss or type mismatch.
fn get_f64(row: &[Value], index: usize) -> f64 {
    row.get(index).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Safely read a bool at `index`, false on miss or type mismatch.
fn get_bool(row: &[Value], index: usize) -> bool {
    row.get(index).and_then(Value::as_bool).unwrap_or(false)
}

/// Safely read a nested array at `index`, empty slice on miss or mismatch.
fn get_array(row: &[Value], index: usize) -> &[Value] {
    row.get(index)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Position 0: sentence-level rows `[translation, content, ?, pronunciation,
/// frequency]`.
///
/// The aggregate `translation` and `content` are concatenated across rows in
/// order. The aggregate `pronunciation` is overwritten each row, so the last
/// row wins; the per-row value is still recorded on its sentence. The
/// sentence list always has one entry per input row, with defaults standing
/// in for rows that are not arrays.
fn extract_sentences(rows: &[Value], result: &mut TranslationResult) {
    result.translated_sentences = vec![Sentence::default(); rows.len()];
    for (i, row) in rows.iter().enumerate() {
        let Some(row) = row.as_array() else { continue };
        let translation = get_str(row, 0);
        let content = get_str(row, 1);
        let pronunciation = get_str(row, 3);

        result.translation.push_str(&translation);
        result.content.push_str(&content);
        result.pronunciation = pronunciation.clone();

        let sentence = &mut result.translated_sentences[i];
        sentence.translation = translation;
        sentence.content = content;
        sentence.pronunciation = pronunciation;
        sentence.frequency = get_f64(row, 4);
    }
}

/// Position 1: per-word rows `[partOfSpeech, translations, equivalents, ?,
/// frequency]`; each equivalent entry is `[content, words, ?, frequency]`.
fn extract_word_translations(rows: &[Value], result: &mut TranslationResult) {
    result.word_translations = vec![WordTranslation::default(); rows.len()];
    for (i, row) in rows.iter().enumerate() {
        let Some(row) = row.as_array() else { continue };
        let word = &mut result.word_translations[i];
        word.part_of_speech = get_str(row, 0);
        word.frequency = get_f64(row, 4);

        for translation in get_array(row, 1) {
            if let Some(text) = translation.as_str() {
                word.translations.push(text.to_string());
            }
        }

        for entry in get_array(row, 2) {
            let Some(entry) = entry.as_array() else { continue };
            let mut equivalent = Equivalent {
                content: get_str(entry, 0),
                ..Default::default()
            };
            for equivalent_word in get_array(entry, 1) {
                if let Some(text) = equivalent_word.as_str() {
                    equivalent.equivalents.push(text.to_string());
                }
            }
            equivalent.frequency = get_f64(entry, 3);
            word.equivalents.push(equivalent);
        }
    }
}

/// Position 5: rows `[content, ?, alternates]`; each alternate is
/// `[text, ?, isCommon, isInformal]`.
fn extract_alternate_translations(rows: &[Value], result: &mut TranslationResult) {
    for row in rows {
        let Some(row) = row.as_array() else { continue };
        let mut alternate = AlternateTranslation {
            content: get_str(row, 0),
            ..Default::default()
        };
        for form in get_array(row, 2) {
            let Some(form) = form.as_array() else { continue };
            alternate.translations.push(AlternateForm {
                text: get_str(form, 0),
                is_common: get_bool(form, 2),
                is_informal: get_bool(form, 3),
            });
        }
        result.alternate_translations.push(alternate);
    }
}

/// Position 11: rows `[partOfSpeech, entries, content, frequency]`; each
/// entry is `[words, ?, categoryWrapper]` with the category string buried
/// at `categoryWrapper[0][0]`.
fn extract_word_synonyms(rows: &[Value], result: &mut TranslationResult) {
    for row in rows {
        let Some(row) = row.as_array() else { continue };
        let mut word = WordSynonym {
            part_of_speech: get_str(row, 0),
            contents: get_str(row, 2),
            frequency: get_f64(row, 3),
            ..Default::default()
        };
        for entry in get_array(row, 1) {
            let Some(entry) = entry.as_array() else { continue };
            let mut group = SynonymGroup::default();
            for synonym in get_array(entry, 0) {
                if let Some(text) = synonym.as_str() {
                    group.synonyms.push(text.to_string());
                }
            }
            let wrapper = get_array(entry, 2);
            group.category = get_str(get_array(wrapper, 0), 0);
            word.synonyms.push(group);
        }
        result.word_synonyms.push(word);
    }
}

/// Position 12: rows `[partOfSpeech, entries]`; each entry is
/// `[definition, ?, example]`.
fn extract_word_definitions(rows: &[Value], result: &mut TranslationResult) {
    for row in rows {
        let Some(row) = row.as_array() else { continue };
        let mut word = WordDefinition {
            part_of_speech: get_str(row, 0),
            ..Default::default()
        };
        for entry in get_array(row, 1) {
            let Some(entry) = entry.as_array() else { continue };
            word.definitions.push(Definition {
                text: get_str(entry, 0),
                example: get_str(entry, 2),
            });
        }
        result.word_definitions.push(word);
    }
}

/// Position 13: each row is itself a list of entries whose first element is
/// the example text.
fn extract_word_examples(rows: &[Value], result: &mut TranslationResult) {
    for row in rows {
        let Some(row) = row.as_array() else { continue };
        for entry in row {
            if let Some(entry) = entry.as_array() {
                result.word_examples.push(get_str(entry, 0));
            }
        }
    }
}

/// Assemble a result from the parsed top-level array.
fn extract_translation(rows: &[Value]) -> TranslationResult {
    let mut result = TranslationResult::default();
    for (index, row) in rows.iter().enumerate() {
        let Some(section) = row.as_array() else { continue };
        match index {
            0 => extract_sentences(section, &mut result),
            1 => extract_word_translations(section, &mut result),
            5 => extract_alternate_translations(section, &mut result),
            11 => extract_word_synonyms(section, &mut result),
            12 => extract_word_definitions(section, &mut result),
            13 => extract_word_examples(section, &mut result),
            // All other positions carry data this client does not expose.
            _ => {}
        }
    }
    // Position 2 is the detected source language, a plain string rather
    // than a row array. Best effort: anything unparsable stays `und`.
    result.source_language = get_str(rows, 2).parse().unwrap_or(Locale::UNKNOWN);
    result
}

/// Decode a raw response body into a [`TranslationResult`].
///
/// Fails only when the body is not valid JSON or its top level is not an
/// array; every narrower defect degrades the affected field instead.
pub fn decode_response(body: &[u8]) -> TranslateResult<TranslationResult> {
    let raw: Value = serde_json::from_slice(body).map_err(|e| {
        TranslateError::MalformedPayload(format!("response is not valid JSON: {}", e))
    })?;
    let rows = raw.as_array().ok_or_else(|| {
        TranslateError::MalformedPayload("top-level response value is not an array".to_string())
    })?;
    Ok(extract_translation(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> TranslationResult {
        decode_response(value.to_string().as_bytes()).unwrap()
    }

    // ========== Top-Level Shape Tests ==========

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = decode_response(b"{not json").unwrap_err();
        assert!(matches!(err, TranslateError::MalformedPayload(_)));
    }

    #[test]
    fn test_non_array_top_level_is_rejected() {
        for body in [r#""not an array""#, "42", r#"{"a": 1}"#, "null"] {
            let err = decode_response(body.as_bytes()).unwrap_err();
            assert!(
                matches!(err, TranslateError::MalformedPayload(_)),
                "body: {}",
                body
            );
        }
    }

    #[test]
    fn test_empty_array_decodes_to_empty_result() {
        let result = decode(json!([]));
        assert_eq!(result, TranslationResult::default());
    }

    // ========== Sentence Section Tests ==========

    #[test]
    fn test_sentences_concatenate_in_order() {
        let result = decode(json!([[
            ["Bonjour. ", "Hello. ", null, "bon-zhoor", 0.5],
            ["Au revoir. ", "Goodbye. ", null, "o-ruh-vwar", 0.25],
            ["Merci.", "Thanks.", null, "mehr-see", 1.0]
        ]]));

        assert_eq!(result.translation, "Bonjour. Au revoir. Merci.");
        assert_eq!(result.content, "Hello. Goodbye. Thanks.");
        assert_eq!(result.translated_sentences.len(), 3);
        assert_eq!(result.translated_sentences[0].translation, "Bonjour. ");
        assert_eq!(result.translated_sentences[0].content, "Hello. ");
        assert_eq!(result.translated_sentences[0].pronunciation, "bon-zhoor");
        assert_eq!(result.translated_sentences[0].frequency, 0.5);
        assert_eq!(result.translated_sentences[2].translation, "Merci.");
    }

    #[test]
    fn test_aggregate_pronunciation_is_last_row() {
        // Per-row pronunciations are kept on the sentences; the aggregate
        // field takes the last row's value.
        let result = decode(json!([[
            ["a", "b", null, "first", 0.1],
            ["c", "d", null, "last", 0.2]
        ]]));
        assert_eq!(result.pronunciation, "last");
        assert_eq!(result.translated_sentences[0].pronunciation, "first");
        assert_eq!(result.translated_sentences[1].pronunciation, "last");
    }

    #[test]
    fn test_non_array_sentence_row_keeps_slot() {
        let result = decode(json!([[
            ["Bonjour", "Hello", null, "p", 1.0],
            "garbage",
            ["Merci", "Thanks", null, "q", 2.0]
        ]]));
        assert_eq!(result.translated_sentences.len(), 3);
        assert_eq!(result.translated_sentences[1], Sentence::default());
        assert_eq!(result.translation, "BonjourMerci");
    }

    #[test]
    fn test_short_sentence_row_degrades_missing_fields() {
        let result = decode(json!([[["Bonjour"]]]));
        let sentence = &result.translated_sentences[0];
        assert_eq!(sentence.translation, "Bonjour");
        assert_eq!(sentence.content, "");
        assert_eq!(sentence.pronunciation, "");
        assert_eq!(sentence.frequency, 0.0);
    }

    #[test]
    fn test_mistyped_sentence_fields_degrade() {
        let result = decode(json!([[[42, ["x"], null, false, "not a number"]]]));
        let sentence = &result.translated_sentences[0];
        assert_eq!(*sentence, Sentence::default());
    }

    // ========== Word Translation Section Tests ==========

    #[test]
    fn test_word_translations() {
        let result = decode(json!([
            null,
            [[
                "noun",
                ["maison", "domicile"],
                [
                    ["house", ["maison", "habitation"], null, 0.8],
                    ["home", ["domicile"], null, 0.3]
                ],
                null,
                0.9
            ]]
        ]));

        assert_eq!(result.word_translations.len(), 1);
        let word = &result.word_translations[0];
        assert_eq!(word.part_of_speech, "noun");
        assert_eq!(word.frequency, 0.9);
        assert_eq!(word.translations, vec!["maison", "domicile"]);
        assert_eq!(word.equivalents.len(), 2);
        assert_eq!(word.equivalents[0].content, "house");
        assert_eq!(word.equivalents[0].equivalents, vec!["maison", "habitation"]);
        assert_eq!(word.equivalents[0].frequency, 0.8);
        assert_eq!(word.equivalents[1].content, "home");
    }

    #[test]
    fn test_word_translation_skips_non_string_translations() {
        let result = decode(json!([null, [["verb", ["aller", 7, null, "venir"]]]]));
        assert_eq!(result.word_translations[0].translations, vec!["aller", "venir"]);
    }

    #[test]
    fn test_word_translation_short_equivalent_entry() {
        // An equivalent entry with no word list still yields an entry with
        // its content and zero values elsewhere.
        let result = decode(json!([null, [["noun", [], [["house"]]]]]));
        let equivalent = &result.word_translations[0].equivalents[0];
        assert_eq!(equivalent.content, "house");
        assert!(equivalent.equivalents.is_empty());
        assert_eq!(equivalent.frequency, 0.0);
    }

    // ========== Alternate Translation Section Tests ==========

    #[test]
    fn test_alternate_translations() {
        let result = decode(json!([
            null, null, null, null, null,
            [
                ["Hello world", null, [
                    ["Bonjour le monde", null, true, false],
                    ["Salut le monde", null, false, true]
                ]],
                ["Goodbye", null, [["Au revoir", null, true, false]]]
            ]
        ]));

        assert_eq!(result.alternate_translations.len(), 2);
        let first = &result.alternate_translations[0];
        assert_eq!(first.content, "Hello world");
        assert_eq!(first.translations.len(), 2);
        assert_eq!(first.translations[0].text, "Bonjour le monde");
        assert!(first.translations[0].is_common);
        assert!(!first.translations[0].is_informal);
        assert!(first.translations[1].is_informal);
        assert_eq!(result.alternate_translations[1].content, "Goodbye");
    }

    // ========== Synonym Section Tests ==========

    #[test]
    fn test_word_synonyms() {
        let result = decode(json!([
            null, null, null, null, null, null, null, null, null, null, null,
            [[
                "adjective",
                [
                    [["happy", "joyful"], null, [["positive emotions"]]],
                    [["content"], null, [["calm states"]]]
                ],
                "glad",
                0.7
            ]]
        ]));

        assert_eq!(result.word_synonyms.len(), 1);
        let word = &result.word_synonyms[0];
        assert_eq!(word.part_of_speech, "adjective");
        assert_eq!(word.contents, "glad");
        assert_eq!(word.frequency, 0.7);
        assert_eq!(word.synonyms.len(), 2);
        assert_eq!(word.synonyms[0].synonyms, vec!["happy", "joyful"]);
        assert_eq!(word.synonyms[0].category, "positive emotions");
        assert_eq!(word.synonyms[1].category, "calm states");
    }

    #[test]
    fn test_synonym_missing_category_wrapper() {
        let result = decode(json!([
            null, null, null, null, null, null, null, null, null, null, null,
            [["noun", [[["word"]]], "w", 0.0]]
        ]));
        let group = &result.word_synonyms[0].synonyms[0];
        assert_eq!(group.synonyms, vec!["word"]);
        assert_eq!(group.category, "");
    }

    // ========== Definition Section Tests ==========

    #[test]
    fn test_word_definitions() {
        let result = decode(json!([
            null, null, null, null, null, null, null, null, null, null, null, null,
            [[
                "noun",
                [
                    ["a building for living in", null, "a house by the sea"],
                    ["a family line", null, "the house of Windsor"]
                ]
            ]]
        ]));

        assert_eq!(result.word_definitions.len(), 1);
        let word = &result.word_definitions[0];
        assert_eq!(word.part_of_speech, "noun");
        assert_eq!(word.definitions.len(), 2);
        assert_eq!(word.definitions[0].text, "a building for living in");
        assert_eq!(word.definitions[0].example, "a house by the sea");
        assert_eq!(word.definitions[1].example, "the house of Windsor");
    }

    // ========== Example Section Tests ==========

    #[test]
    fn test_word_examples() {
        let result = decode(json!([
            null, null, null, null, null, null, null, null, null, null, null, null, null,
            [
                [["the <b>house</b> was empty"], ["a full <b>house</b>"]],
                [["bring the <b>house</b> down"]]
            ]
        ]));
        assert_eq!(
            result.word_examples,
            vec![
                "the <b>house</b> was empty",
                "a full <b>house</b>",
                "bring the <b>house</b> down"
            ]
        );
    }

    // ========== Source Language Tests ==========

    #[test]
    fn test_source_language_parsed_from_position_two() {
        let result = decode(json!([null, null, "en"]));
        assert_eq!(result.source_language, "en".parse::<Locale>().unwrap());
    }

    #[test]
    fn test_source_language_absent_or_invalid_is_root() {
        assert_eq!(decode(json!([])).source_language, Locale::UNKNOWN);
        assert_eq!(decode(json!([null, null, 42])).source_language, Locale::UNKNOWN);
        assert_eq!(
            decode(json!([null, null, "!!not a tag!!"])).source_language,
            Locale::UNKNOWN
        );
    }

    // ========== Robustness Tests ==========

    #[test]
    fn test_mistyped_section_does_not_abort_others() {
        // Position 1 is a string instead of an array; every other section
        // still decodes.
        let result = decode(json!([
            [["Bonjour", "Hello", null, "p", 1.0]],
            "this should be an array",
            "en",
            null, null,
            [["Hello", null, [["Bonjour", null, true, false]]]],
            null, null, null, null, null,
            [["noun", [[["word"], null, [["cat"]]]], "w", 0.1]],
            [["noun", [["def", null, "ex"]]]],
            [[["example one"]]]
        ]));

        assert_eq!(result.translation, "Bonjour");
        assert!(result.word_translations.is_empty());
        assert_eq!(result.source_language, "en".parse::<Locale>().unwrap());
        assert_eq!(result.alternate_translations.len(), 1);
        assert_eq!(result.word_synonyms.len(), 1);
        assert_eq!(result.word_definitions.len(), 1);
        assert_eq!(result.word_examples, vec!["example one"]);
    }

    #[test]
    fn test_unknown_positions_are_ignored() {
        // Positions 3, 4, 6..10 and anything past 13 carry data this client
        // does not expose; their presence must not disturb the decode.
        let mut rows = vec![json!(null); 20];
        rows[0] = json!([["Hola", "Hello", null, "oh-la", 1.0]]);
        rows[3] = json!(["stray"]);
        rows[7] = json!([[1, 2, 3]]);
        rows[19] = json!([["future section"]]);
        let result = decode(Value::Array(rows));
        assert_eq!(result.translation, "Hola");
        assert!(result.word_examples.is_empty());
    }

    #[test]
    fn test_integer_frequencies_are_accepted() {
        let result = decode(json!([[["a", "b", null, "p", 1]]]));
        assert_eq!(result.translated_sentences[0].frequency, 1.0);
    }

    #[test]
    fn test_realistic_minimal_response() {
        // Shape of a real single-word response, heavily truncated.
        let body = r#"[[["bonjour","hello",null,null,1]],[["interjection",["bonjour","salut"],[["hello",["bonjour","salut"],null,0.35]],"hello",9]],"en",null,null,null,0.92]"#;
        let result = decode_response(body.as_bytes()).unwrap();
        assert_eq!(result.translation, "bonjour");
        assert_eq!(result.content, "hello");
        assert_eq!(result.word_translations[0].part_of_speech, "interjection");
        assert_eq!(result.source_language, "en".parse::<Locale>().unwrap());
    }
}
