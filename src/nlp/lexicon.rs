//! English word lists shared by the tagger, lemmatizer and NER stages.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// ============================================================================
// Closed-class words
// ============================================================================

static CLOSED_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let groups: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "that", "these", "those", "every", "each", "some",
                "any", "no", "another", "either", "neither", "all", "both", "half",
            ],
        ),
        (
            "PRP",
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves",
                "yourselves", "themselves", "mine", "yours", "hers", "ours", "theirs",
            ],
        ),
        ("PRP$", &["my", "your", "his", "its", "our", "their"]),
        ("WDT", &["which", "whatever", "whichever"]),
        ("WP", &["who", "whom", "what", "whoever"]),
        ("WP$", &["whose"]),
        ("WRB", &["when", "where", "why", "how", "whenever", "wherever"]),
        (
            "IN",
            &[
                "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
                "through", "during", "before", "after", "above", "below", "from", "up",
                "down", "of", "off", "over", "under", "than", "as", "since", "until",
                "while", "because", "if", "though", "although", "unless", "whether", "upon",
                "within", "without", "among", "across", "along", "around", "behind",
                "beyond", "near", "toward", "towards", "via", "per", "despite", "except",
                "like", "throughout", "onto", "inside", "outside", "beside", "besides",
            ],
        ),
        ("TO", &["to"]),
        ("CC", &["and", "or", "but", "nor", "yet", "&", "plus"]),
        (
            "MD",
            &[
                "can", "could", "may", "might", "must", "shall", "should", "will", "would",
                "ca", "wo",
            ],
        ),
        (
            "RB",
            &[
                "not", "never", "very", "also", "just", "only", "too", "quite", "rather",
                "often", "always", "sometimes", "already", "still", "even", "here", "now",
                "then", "soon", "again", "ever", "once", "perhaps", "almost", "really",
                "usually", "away", "back", "so", "however", "instead", "thus", "therefore",
                "indeed", "increasingly", "later", "together", "else", "ago", "maybe",
            ],
        ),
        ("RBR", &["more", "less"]),
        ("RBS", &["most", "least"]),
        (
            "UH",
            &["hello", "hi", "hey", "oh", "yes", "yeah", "ok", "okay", "please", "wow", "uh", "um"],
        ),
        ("EX", &["there"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBP", &["are", "am"]),
        ("VBD", &["was", "were", "had", "did"]),
        ("VB", &["be"]),
        ("VBN", &["been", "done"]),
        ("VBG", &["being", "doing", "having"]),
    ];

    let mut map = HashMap::new();
    for (tag, words) in groups {
        for word in words.iter() {
            map.insert(*word, *tag);
        }
    }
    map
});

/// Tag of a closed-class word, keyed by its lower-cased form.
pub fn closed_class_tag(lower: &str) -> Option<&'static str> {
    CLOSED_CLASS.get(lower).copied()
}

pub fn is_closed_class(lower: &str) -> bool {
    CLOSED_CLASS.contains_key(lower)
}

/// Forms of "be" and "have" that make a following past form a participle.
pub fn is_perfect_or_passive_aux(lower: &str) -> bool {
    matches!(
        lower,
        "is" | "are" | "am" | "was" | "were" | "be" | "been" | "being" | "'s" | "'re" | "'m"
            | "has" | "have" | "had" | "having" | "'ve" | "get" | "got"
    )
}

/// Forms of "be" (for lemmatization and EX detection).
pub fn is_be_form(lower: &str) -> bool {
    matches!(
        lower,
        "is" | "are" | "am" | "was" | "were" | "be" | "been" | "being" | "'s" | "'re" | "'m"
    )
}

// ============================================================================
// Verbs
// ============================================================================

/// Past-tense shape of an irregular verb form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbForm {
    Past,
    Participle,
    /// Same spelling for simple past and past participle ("made").
    PastOrParticiple,
}

static IRREGULAR_VERBS: LazyLock<HashMap<&'static str, (&'static str, VerbForm)>> =
    LazyLock::new(|| {
        use VerbForm::*;
        let entries: &[(&str, &str, VerbForm)] = &[
            ("born", "bear", Participle),
            ("bore", "bear", Past),
            ("went", "go", Past),
            ("gone", "go", Participle),
            ("made", "make", PastOrParticiple),
            ("said", "say", PastOrParticiple),
            ("took", "take", Past),
            ("taken", "take", Participle),
            ("came", "come", Past),
            ("saw", "see", Past),
            ("seen", "see", Participle),
            ("knew", "know", Past),
            ("known", "know", Participle),
            ("got", "get", PastOrParticiple),
            ("gotten", "get", Participle),
            ("gave", "give", Past),
            ("given", "give", Participle),
            ("found", "find", PastOrParticiple),
            ("thought", "think", PastOrParticiple),
            ("told", "tell", PastOrParticiple),
            ("became", "become", Past),
            ("left", "leave", PastOrParticiple),
            ("felt", "feel", PastOrParticiple),
            ("brought", "bring", PastOrParticiple),
            ("began", "begin", Past),
            ("begun", "begin", Participle),
            ("kept", "keep", PastOrParticiple),
            ("held", "hold", PastOrParticiple),
            ("wrote", "write", Past),
            ("written", "write", Participle),
            ("stood", "stand", PastOrParticiple),
            ("heard", "hear", PastOrParticiple),
            ("meant", "mean", PastOrParticiple),
            ("met", "meet", PastOrParticiple),
            ("ran", "run", Past),
            ("paid", "pay", PastOrParticiple),
            ("sat", "sit", PastOrParticiple),
            ("spoke", "speak", Past),
            ("spoken", "speak", Participle),
            ("led", "lead", PastOrParticiple),
            ("grew", "grow", Past),
            ("grown", "grow", Participle),
            ("lost", "lose", PastOrParticiple),
            ("fell", "fall", Past),
            ("fallen", "fall", Participle),
            ("sent", "send", PastOrParticiple),
            ("built", "build", PastOrParticiple),
            ("understood", "understand", PastOrParticiple),
            ("drew", "draw", Past),
            ("drawn", "draw", Participle),
            ("broke", "break", Past),
            ("broken", "break", Participle),
            ("spent", "spend", PastOrParticiple),
            ("rose", "rise", Past),
            ("risen", "rise", Participle),
            ("drove", "drive", Past),
            ("driven", "drive", Participle),
            ("bought", "buy", PastOrParticiple),
            ("wore", "wear", Past),
            ("worn", "wear", Participle),
            ("chose", "choose", Past),
            ("chosen", "choose", Participle),
            ("won", "win", PastOrParticiple),
            ("sold", "sell", PastOrParticiple),
            ("fought", "fight", PastOrParticiple),
            ("caught", "catch", PastOrParticiple),
            ("taught", "teach", PastOrParticiple),
            ("ate", "eat", Past),
            ("eaten", "eat", Participle),
            ("flew", "fly", Past),
            ("flown", "fly", Participle),
            ("threw", "throw", Past),
            ("thrown", "throw", Participle),
            ("forgot", "forget", Past),
            ("forgotten", "forget", Participle),
            ("hid", "hide", Past),
            ("hidden", "hide", Participle),
            ("shot", "shoot", PastOrParticiple),
            ("struck", "strike", PastOrParticiple),
            ("sang", "sing", Past),
            ("sung", "sing", Participle),
            ("slept", "sleep", PastOrParticiple),
            ("woke", "wake", Past),
            ("woken", "wake", Participle),
            ("did", "do", Past),
            ("done", "do", Participle),
            ("had", "have", PastOrParticiple),
            ("was", "be", Past),
            ("were", "be", Past),
            ("been", "be", Participle),
            ("died", "die", PastOrParticiple),
        ];
        entries
            .iter()
            .map(|(form, lemma, kind)| (*form, (*lemma, *kind)))
            .collect()
    });

/// Lemma and past shape of an irregular verb form.
pub fn irregular_verb(lower: &str) -> Option<(&'static str, VerbForm)> {
    IRREGULAR_VERBS.get(lower).copied()
}

static BASE_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "go", "make", "take", "see", "come", "know", "get", "give", "find", "think", "tell",
        "become", "leave", "feel", "bring", "begin", "keep", "hold", "write", "stand", "hear",
        "let", "mean", "set", "meet", "run", "pay", "sit", "speak", "lie", "lead", "read",
        "grow", "lose", "fall", "send", "build", "understand", "draw", "break", "spend", "cut",
        "rise", "drive", "buy", "wear", "choose", "want", "use", "work", "call", "try", "ask",
        "need", "seem", "help", "show", "play", "move", "live", "believe", "happen", "include",
        "continue", "change", "watch", "follow", "stop", "create", "open", "walk", "offer",
        "remember", "love", "consider", "appear", "wait", "serve", "die", "expect", "stay",
        "reach", "kill", "remain", "suggest", "raise", "pass", "report", "decide", "pull",
        "bark", "look", "like", "say", "do", "have", "increase", "produce", "receive",
        "provide", "allow", "add", "learn", "agree", "start", "turn", "talk", "visit",
        "sell", "win", "eat", "fly", "throw", "forget", "hide", "shoot", "sing", "sleep",
        "wake", "teach", "catch", "fight", "bear", "describe", "announce", "join", "plan",
        "return", "carry", "explain", "hope", "develop", "lose", "close", "move", "travel",
        "arrive", "study", "marry", "accept", "enjoy", "discuss", "release", "launch",
    ]
    .into_iter()
    .collect()
});

pub fn is_base_verb(lower: &str) -> bool {
    BASE_VERBS.contains(lower)
}

// ============================================================================
// Adjectives, nouns
// ============================================================================

static COMMON_ADJECTIVES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "good", "new", "last", "long", "great", "little", "own", "other", "old", "right",
        "big", "high", "different", "small", "large", "next", "early", "young", "important",
        "few", "public", "bad", "same", "able", "urban", "happy", "sad", "real", "best",
        "better", "sure", "free", "full", "hard", "easy", "clear", "recent", "late", "whole",
        "major", "strong", "possible", "many", "much", "several", "such", "certain", "local",
        "low", "true", "false", "black", "white", "red", "blue", "green", "dark", "short",
        "hot", "cold", "main", "common", "poor", "rich", "open", "quick", "slow", "fast",
        "nice", "fine", "deep", "wide", "huge", "tiny", "worse", "worst", "former",
    ]
    .into_iter()
    .collect()
});

pub fn is_common_adjective(lower: &str) -> bool {
    COMMON_ADJECTIVES.contains(lower)
}

/// Lemmas for irregular plural nouns and graded adjectives.
pub fn irregular_lemma(lower: &str) -> Option<&'static str> {
    let lemma = match lower {
        "children" => "child",
        "men" => "man",
        "women" => "woman",
        "feet" => "foot",
        "teeth" => "tooth",
        "mice" => "mouse",
        "geese" => "goose",
        "lives" => "life",
        "wives" => "wife",
        "knives" => "knife",
        "wolves" => "wolf",
        "leaves" => "leaf",
        "halves" => "half",
        "better" => "good",
        "best" => "good",
        "worse" => "bad",
        "worst" => "bad",
        "n't" => "not",
        "'ll" => "will",
        "'d" => "would",
        "'ve" => "have",
        "'re" | "'m" => "be",
        "ca" => "can",
        "wo" => "will",
        "an" => "a",
        "me" => "I",
        _ => return None,
    };
    Some(lemma)
}

// ============================================================================
// Numbers
// ============================================================================

static NUMBER_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
        "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy",
        "eighty", "ninety", "hundred", "thousand", "million", "billion", "trillion", "dozen",
    ]
    .into_iter()
    .collect()
});

pub fn is_number_word(lower: &str) -> bool {
    NUMBER_WORDS.contains(lower)
}

static ORDINAL_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth",
        "tenth", "eleventh", "twelfth", "twentieth", "hundredth",
    ]
    .into_iter()
    .collect()
});

pub fn is_ordinal_word(lower: &str) -> bool {
    ORDINAL_WORDS.contains(lower)
}

/// Decades spelled out ("eighties") as used in date expressions.
pub fn is_decade_word(lower: &str) -> bool {
    matches!(
        lower,
        "twenties" | "thirties" | "forties" | "fifties" | "sixties" | "seventies" | "eighties"
            | "nineties"
    )
}

// ============================================================================
// Abbreviations
// ============================================================================

static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "gen.", "col.",
        "capt.", "lt.", "sgt.", "gov.", "sen.", "rep.", "rev.", "hon.", "inc.", "ltd.", "co.",
        "corp.", "vs.", "etc.", "e.g.", "i.e.", "a.m.", "p.m.", "no.", "vol.", "fig.", "dept.",
        "est.", "approx.", "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.",
        "sept.", "oct.", "nov.", "dec.", "u.s.", "u.k.", "u.n.", "d.c.", "ave.", "blvd.",
    ]
    .into_iter()
    .collect()
});

/// Titles that precede a person name and never end a sentence.
pub fn is_title_abbreviation(lower: &str) -> bool {
    matches!(
        lower,
        "mr." | "mrs." | "ms." | "dr." | "prof." | "gen." | "col." | "capt." | "lt." | "sgt."
            | "gov." | "sen." | "rep." | "rev." | "hon." | "st." | "mt."
    )
}

/// Whether a token ending in "." is an abbreviation or an initial rather
/// than a word followed by a full stop.
pub fn is_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(lower.as_str()) {
        return true;
    }
    // Initials and dotted acronyms: "J.", "U.S.A."
    let mut chars = word.chars().peekable();
    let mut saw_letter = false;
    while let Some(c) = chars.next() {
        if !c.is_alphabetic() {
            return false;
        }
        match chars.next() {
            Some('.') => saw_letter = true,
            _ => return false,
        }
        if chars.peek().is_none() {
            break;
        }
    }
    saw_letter && word.chars().next().is_some_and(|c| c.is_uppercase() || word.len() > 2)
}
