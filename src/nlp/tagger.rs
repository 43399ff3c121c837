//! Penn Treebank part-of-speech tagging.
//!
//! A left-to-right tagger: closed-class lookup first, then capitalization,
//! irregular verbs and suffix rules, each able to look at the tags already
//! assigned to its left.

use super::gazetteer;
use super::lexicon::{self, VerbForm};

/// Tag each word. `sentence_starts[i]` marks the first token of a sentence;
/// when the slice is short, only position 0 counts as a start.
pub fn tag(words: &[&str], sentence_starts: &[bool]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(words.len());
    let mut open_quote = false;

    for i in 0..words.len() {
        let initial = sentence_starts.get(i).copied().unwrap_or(i == 0);
        let tag = if words[i] == "\"" {
            open_quote = !open_quote;
            if open_quote { "``" } else { "''" }
        } else {
            tag_word(words, i, initial, &tags)
        };
        tags.push(tag.to_string());
    }

    tags
}

fn tag_word(words: &[&str], i: usize, initial: bool, tags: &[String]) -> &'static str {
    let word = words[i];
    let lower = word.to_lowercase();

    if let Some(tag) = punctuation_tag(word) {
        return tag;
    }
    if word.contains("://") || word.starts_with("www.") || word.contains('@') {
        return "ADD";
    }
    if let Some(tag) = number_tag(&lower) {
        return tag;
    }
    if let Some(tag) = clitic_tag(&lower, words, i, tags) {
        return tag;
    }

    let capitalized = word.chars().next().is_some_and(char::is_uppercase);

    // Names that collide with function words: "US", "WHO", "May 5".
    if is_all_caps(word) && gazetteer::match_phrase(&words[i..i + 1], true).is_some() {
        return "NNP";
    }
    if capitalized
        && !initial
        && gazetteer::is_month(word)
        && words.get(i + 1).is_some_and(|w| w.starts_with(|c: char| c.is_ascii_digit()))
    {
        return "NNP";
    }

    match lower.as_str() {
        "her" => {
            let next_is_content = words
                .get(i + 1)
                .is_some_and(|w| w.chars().any(char::is_alphabetic) && !lexicon::is_closed_class(&w.to_lowercase()));
            return if next_is_content { "PRP$" } else { "PRP" };
        }
        "there" => {
            let next = words.get(i + 1).map(|w| w.to_lowercase()).unwrap_or_default();
            return if lexicon::is_be_form(&next) || lexicon::closed_class_tag(&next) == Some("MD") {
                "EX"
            } else {
                "RB"
            };
        }
        _ => {}
    }

    if let Some(tag) = lexicon::closed_class_tag(&lower) {
        if !capitalized || initial || lower == "i" {
            return tag;
        }
    }

    if is_all_caps(word) {
        return "NNP";
    }

    if !capitalized || initial {
        if let Some((_, form)) = lexicon::irregular_verb(&lower) {
            return match form {
                VerbForm::Past => "VBD",
                VerbForm::Participle => "VBN",
                VerbForm::PastOrParticiple if after_auxiliary(words, i, tags) => "VBN",
                VerbForm::PastOrParticiple => "VBD",
            };
        }
    }

    if capitalized && !initial {
        return "NNP";
    }
    if capitalized && initial {
        let next_capitalized = words
            .get(i + 1)
            .is_some_and(|w| w.chars().next().is_some_and(char::is_uppercase) && *w != "I");
        if gazetteer::is_first_name(word)
            || gazetteer::is_person_title(word)
            || gazetteer::match_phrase(&words[i..], true).is_some()
            || (next_capitalized && !lexicon::is_closed_class(&lower))
        {
            return "NNP";
        }
        return match lowercase_tag(&lower, words, i, tags) {
            Some(tag) => tag,
            // Unknown capitalized word opening a clause: most likely a name.
            None if next_is_verb(words, i) => "NNP",
            None => "NN",
        };
    }

    lowercase_tag(&lower, words, i, tags).unwrap_or("NN")
}

fn punctuation_tag(word: &str) -> Option<&'static str> {
    if word.chars().any(char::is_alphanumeric) {
        return None;
    }
    let tag = match word {
        "." | "!" | "?" | "…" | "..." => ".",
        "," => ",",
        ":" | ";" | "--" | "—" | "–" => ":",
        "(" | "[" | "{" => "-LRB-",
        ")" | "]" | "}" => "-RRB-",
        "“" | "‘" | "`" | "``" | "«" => "``",
        "”" | "’" | "'" | "''" | "»" => "''",
        "$" | "£" | "€" | "¥" => "$",
        "#" => "#",
        "%" => "NN",
        "&" => "CC",
        "-" => "HYPH",
        "/" => "SYM",
        w if w.chars().all(|c| matches!(c, '.' | '!' | '?')) => ".",
        _ => "NFP",
    };
    Some(tag)
}

fn number_tag(lower: &str) -> Option<&'static str> {
    if lower.starts_with(|c: char| c.is_ascii_digit()) {
        let ordinal = ["st", "nd", "rd", "th"].iter().any(|suffix| {
            lower
                .strip_suffix(suffix)
                .is_some_and(|stem| !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()))
        });
        return Some(if ordinal { "JJ" } else { "CD" });
    }
    if lexicon::is_number_word(lower) {
        return Some("CD");
    }
    if lexicon::is_ordinal_word(lower) {
        return Some("JJ");
    }
    None
}

fn clitic_tag(lower: &str, words: &[&str], i: usize, tags: &[String]) -> Option<&'static str> {
    let lower = lower.replace('’', "'");
    let tag = match lower.as_str() {
        "'s" => {
            let prev_lower = i.checked_sub(1).map(|p| words[p].to_lowercase()).unwrap_or_default();
            let after_pronoun = tags.last().is_some_and(|t| t == "PRP")
                || matches!(
                    prev_lower.as_str(),
                    "it" | "that" | "there" | "what" | "who" | "where" | "here" | "how" | "he" | "she"
                );
            if after_pronoun { "VBZ" } else { "POS" }
        }
        "n't" => "RB",
        "'re" | "'ve" | "'m" => "VBP",
        "'ll" | "'d" => "MD",
        _ => return None,
    };
    Some(tag)
}

/// Tag for a word whose capitalization carries no information. `None`
/// means no rule matched.
fn lowercase_tag(lower: &str, words: &[&str], i: usize, tags: &[String]) -> Option<&'static str> {
    if let Some(tag) = lexicon::closed_class_tag(lower) {
        return Some(tag);
    }
    if let Some((_, form)) = lexicon::irregular_verb(lower) {
        return Some(match form {
            VerbForm::Past => "VBD",
            VerbForm::Participle => "VBN",
            VerbForm::PastOrParticiple if after_auxiliary(words, i, tags) => "VBN",
            VerbForm::PastOrParticiple => "VBD",
        });
    }

    match lower {
        "better" | "worse" => return Some("JJR"),
        "best" | "worst" => return Some("JJS"),
        _ => {}
    }
    if lexicon::is_common_adjective(lower) {
        return Some("JJ");
    }

    let governor = governing_tag(tags);
    if lexicon::is_base_verb(lower) {
        return Some(match governor {
            Some("MD") | Some("TO") => "VB",
            Some("PRP") | Some("NNS") => "VBP",
            Some("DT") | Some("PRP$") | Some("JJ") | Some("IN") | Some("POS") | Some("CD") => "NN",
            None => "VB",
            _ => "NN",
        });
    }

    let chars = lower.chars().count();
    if chars > 4 && lower.ends_with("ly") {
        return Some("RB");
    }
    if chars > 4 && lower.ends_with("ing") {
        return Some(match governor {
            Some("DT") | Some("PRP$") | Some("JJ") | Some("POS") => "NN",
            _ => "VBG",
        });
    }
    if chars > 3 && lower.ends_with("ed") {
        if after_auxiliary(words, i, tags) {
            return Some("VBN");
        }
        return Some(match governor {
            Some("DT") | Some("PRP$") | Some("POS") => "JJ",
            _ => "VBD",
        });
    }
    if let Some(stem) = lower.strip_suffix("est") {
        if is_graded_stem(stem) {
            return Some("JJS");
        }
    }
    if let Some(stem) = lower.strip_suffix("er") {
        if is_graded_stem(stem) {
            return Some("JJR");
        }
    }
    const ADJECTIVE_SUFFIXES: &[&str] = &[
        "ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ary", "ant", "ent", "ic",
    ];
    if chars > 5 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return Some("JJ");
    }
    if chars > 6 && lower.ends_with("al") {
        return Some("JJ");
    }
    if chars > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") {
        let stem = &lower[..lower.len() - 1];
        let es_stem = lower.strip_suffix("es").unwrap_or(stem);
        let verb_like = lexicon::is_base_verb(stem) || lexicon::is_base_verb(es_stem);
        let third_person_subject = matches!(governor, Some("NN") | Some("NNP") | Some("PRP"));
        return Some(if verb_like && third_person_subject { "VBZ" } else { "NNS" });
    }

    None
}

/// Whether `stem` is an adjective once a comparative or superlative ending
/// is removed: "larg" (large), "bigg" (big), "earli" (early).
fn is_graded_stem(stem: &str) -> bool {
    if stem.chars().count() < 2 {
        return false;
    }
    if lexicon::is_common_adjective(stem) || lexicon::is_common_adjective(&format!("{stem}e")) {
        return true;
    }
    if let Some(base) = stem.strip_suffix('i') {
        if lexicon::is_common_adjective(&format!("{base}y")) {
            return true;
        }
    }
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b => lexicon::is_common_adjective(&stem[..stem.len() - a.len_utf8()]),
        _ => false,
    }
}

/// Tag of the nearest word to the left, skipping adverbs.
fn governing_tag(tags: &[String]) -> Option<&str> {
    tags.iter()
        .rev()
        .map(String::as_str)
        .find(|t| !t.starts_with("RB"))
}

/// Whether a form of "be" or "have" precedes position `i`, allowing
/// adverbs in between ("has not been", "was quickly taken").
fn after_auxiliary(words: &[&str], i: usize, tags: &[String]) -> bool {
    let mut j = i;
    while j > 0 {
        j -= 1;
        if lexicon::is_perfect_or_passive_aux(&words[j].to_lowercase().replace('’', "'")) {
            return true;
        }
        if !tags.get(j).is_some_and(|t| t.starts_with("RB")) {
            return false;
        }
    }
    false
}

fn next_is_verb(words: &[&str], i: usize) -> bool {
    words.get(i + 1).is_some_and(|w| {
        let lower = w.to_lowercase();
        matches!(
            lexicon::closed_class_tag(&lower),
            Some("VBZ") | Some("VBD") | Some("VBP") | Some("MD")
        ) || lexicon::irregular_verb(&lower).is_some()
            || (lower.ends_with("ed") && lower.len() > 3)
    })
}

fn is_all_caps(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_for(words: &[&str]) -> Vec<String> {
        tag(words, &[])
    }

    #[test]
    fn test_simple_sentence() {
        let words = ["Barack", "Obama", "was", "born", "in", "Hawaii", "."];
        assert_eq!(
            tags_for(&words),
            vec!["NNP", "NNP", "VBD", "VBN", "IN", "NNP", "."]
        );
    }

    #[test]
    fn test_suffix_rules() {
        let words = ["The", "dogs", "barked", "loudly", "."];
        assert_eq!(tags_for(&words), vec!["DT", "NNS", "VBD", "RB", "."]);
    }

    #[test]
    fn test_modal_and_negation() {
        let words = ["She", "ca", "n't", "go", "."];
        assert_eq!(tags_for(&words), vec!["PRP", "MD", "RB", "VB", "."]);
    }

    #[test]
    fn test_verb_or_noun_by_context() {
        let words = ["They", "work", "at", "the", "building", "."];
        assert_eq!(tags_for(&words), vec!["PRP", "VBP", "IN", "DT", "NN", "."]);
    }

    #[test]
    fn test_possessive_and_contraction() {
        let words = ["It", "'s", "John", "'s", "car", "."];
        assert_eq!(tags_for(&words), vec!["PRP", "VBZ", "NNP", "POS", "NN", "."]);
    }

    #[test]
    fn test_her_as_determiner_or_pronoun() {
        assert_eq!(tags_for(&["I", "saw", "her", "dog"])[2], "PRP$");
        assert_eq!(tags_for(&["I", "saw", "her", "."])[2], "PRP");
    }

    #[test]
    fn test_numbers_and_symbols() {
        let words = ["Prices", "rose", "5", "%", "in", "1990", "and", "the", "3rd", "quarter"];
        let tags = tags_for(&words);
        assert_eq!(tags[2], "CD");
        assert_eq!(tags[3], "NN");
        assert_eq!(tags[5], "CD");
        assert_eq!(tags[8], "JJ");
    }

    #[test]
    fn test_participle_after_auxiliary() {
        let words = ["The", "report", "was", "quickly", "made", "public"];
        assert_eq!(tags_for(&words)[4], "VBN");
        assert_eq!(tags_for(&["He", "made", "it"])[1], "VBD");
    }

    #[test]
    fn test_acronym_names() {
        let words = ["He", "moved", "to", "the", "US", "."];
        assert_eq!(tags_for(&words)[4], "NNP");
        assert_eq!(tags_for(&["Tell", "us", "."])[1], "PRP");
    }

    #[test]
    fn test_quotes_alternate() {
        let words = ["\"", "Hi", "\"", "."];
        let tags = tags_for(&words);
        assert_eq!(tags[0], "``");
        assert_eq!(tags[2], "''");
    }

    #[test]
    fn test_sentence_initial_unknown_name() {
        let words = ["Obama", "was", "born", "."];
        assert_eq!(tags_for(&words)[0], "NNP");
        let words = ["Yesterday", "it", "rained"];
        assert_eq!(tags_for(&words)[0], "NN");
    }
}
