//! Tag-driven English lemmatization.

use super::lexicon;

/// Lemma of `word` given its Penn tag.
///
/// Proper nouns keep their spelling. Everything else is lower-cased, with
/// irregular forms looked up first and inflectional suffixes removed
/// according to the tag.
pub fn lemmatize(word: &str, tag: &str) -> String {
    if tag.starts_with("NNP") {
        return word.to_string();
    }

    let lower = word.to_lowercase().replace('’', "'");
    if lower == "i" {
        return "I".to_string();
    }
    if lower == "'s" {
        return if tag == "POS" { lower } else { "be".to_string() };
    }
    if let Some(lemma) = lexicon::irregular_lemma(&lower) {
        return lemma.to_string();
    }

    if tag.starts_with("VB") || tag == "MD" {
        if lexicon::is_be_form(&lower) {
            return "be".to_string();
        }
        match lower.as_str() {
            "has" | "have" | "had" | "having" => return "have".to_string(),
            "does" | "did" | "doing" | "done" => return "do".to_string(),
            _ => {}
        }
        if let Some((lemma, _)) = lexicon::irregular_verb(&lower) {
            return lemma.to_string();
        }
    }

    match tag {
        "NNS" => singular(&lower),
        "VBZ" => singular(&lower),
        "VBG" => match lower.strip_suffix("ing") {
            Some(stem) if stem.chars().count() >= 2 => verb_stem(stem),
            _ => lower,
        },
        "VBD" | "VBN" => {
            if let Some(stem) = lower.strip_suffix("ied") {
                return format!("{stem}y");
            }
            match lower.strip_suffix("ed") {
                Some(stem) if stem.chars().count() >= 2 => verb_stem(stem),
                _ => lower,
            }
        }
        "JJR" => graded(&lower, "er"),
        "JJS" => graded(&lower, "est"),
        _ => lower,
    }
}

fn singular(lower: &str) -> String {
    if lower.chars().count() <= 3 || lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return lower.to_string();
    }
    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.chars().count() >= 2 {
            return format!("{stem}y");
        }
    }
    for sibilant in ["ches", "shes", "sses", "xes", "zes", "oes"] {
        if lower.ends_with(sibilant) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    lower.strip_suffix('s').unwrap_or(lower).to_string()
}

/// Recover a verb's base form from the part left after removing
/// "-ing" or "-ed".
fn verb_stem(stem: &str) -> String {
    let with_e = format!("{stem}e");
    let undoubled = undouble(stem);

    if lexicon::is_base_verb(stem) {
        return stem.to_string();
    }
    if lexicon::is_base_verb(&with_e) {
        return with_e;
    }
    if let Some(base) = undoubled {
        if lexicon::is_base_verb(base) || !matches!(base.chars().last(), Some('l' | 's' | 'z')) {
            return base.to_string();
        }
    }
    // "mov", "danc", "argu": a dropped silent e.
    if matches!(stem.chars().last(), Some('v' | 'c' | 'u' | 'z' | 'g'))
        && !stem.ends_with("ng")
        && !stem.ends_with("gg")
    {
        return with_e;
    }
    stem.to_string()
}

/// `stem` without a doubled final consonant ("stopp" -> "stop").
fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b && !"aeiou".contains(a) && stem.chars().count() > 2 => {
            Some(&stem[..stem.len() - a.len_utf8()])
        }
        _ => None,
    }
}

fn graded(lower: &str, suffix: &str) -> String {
    let Some(stem) = lower.strip_suffix(suffix) else {
        return lower.to_string();
    };
    if lexicon::is_common_adjective(stem) {
        return stem.to_string();
    }
    let with_e = format!("{stem}e");
    if lexicon::is_common_adjective(&with_e) {
        return with_e;
    }
    if let Some(base) = stem.strip_suffix('i') {
        return format!("{base}y");
    }
    if let Some(base) = undouble(stem) {
        return base.to_string();
    }
    stem.to_string()
}
