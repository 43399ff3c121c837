//! Named entity recognition over tagged tokens.
//!
//! Each recognizer proposes a span starting at the current token; the
//! longest proposal wins, earlier recognizers break ties, and scanning
//! resumes after it. Entities never cross sentence boundaries. Labels
//! follow the OntoNotes scheme (PERSON, ORG, GPE, DATE, ...).

use super::{gazetteer, lexicon, NerModel, Span};

/// Recognize entities in one tagged text.
pub fn recognize(words: &[&str], tags: &[&str], sentences: &[Span], model: NerModel) -> Vec<Span> {
    let scanner = Scanner { words, tags, model };
    let mut entities = Vec::new();

    for sentence in sentences {
        let end = sentence.end.min(words.len()).min(tags.len());
        let mut i = sentence.start;
        while i < end {
            match scanner.best_at(i, end) {
                Some((stop, label)) => {
                    entities.push(Span::labeled(i, stop, label));
                    i = stop;
                }
                None => i += 1,
            }
        }
    }

    entities
}

struct Scanner<'a> {
    words: &'a [&'a str],
    tags: &'a [&'a str],
    model: NerModel,
}

type Proposal = Option<(usize, &'static str)>;

impl Scanner<'_> {
    fn best_at(&self, i: usize, end: usize) -> Proposal {
        let proposals = [
            self.money(i, end),
            self.percent(i, end),
            self.time(i, end),
            self.date(i, end),
            self.gazetteer(i, end),
            self.organization(i, end),
            self.person(i, end),
            self.quantity(i, end),
            self.ordinal(i),
            self.cardinal(i, end),
        ];

        let mut best: Proposal = None;
        for (stop, label) in proposals.into_iter().flatten() {
            if stop > i && best.map_or(true, |(b, _)| stop > b) {
                best = Some((stop, label));
            }
        }
        best
    }

    fn lower(&self, i: usize) -> String {
        self.words[i].to_lowercase()
    }

    fn cased(&self) -> bool {
        self.model == NerModel::Cased
    }

    /// End of a run of number tokens starting at `i`.
    fn number_run(&self, i: usize, end: usize) -> Option<usize> {
        let mut j = i;
        while j < end && self.tags[j] == "CD" {
            j += 1;
        }
        (j > i).then_some(j)
    }

    fn money(&self, i: usize, end: usize) -> Proposal {
        if self.tags[i] == "$" {
            let stop = self.number_run(i + 1, end)?;
            return Some((stop, "MONEY"));
        }
        let stop = self.number_run(i, end)?;
        let unit = self.words.get(stop).map(|w| w.to_lowercase())?;
        matches!(
            unit.as_str(),
            "dollars" | "dollar" | "cents" | "cent" | "euros" | "euro" | "yen" | "bucks"
        )
        .then_some((stop + 1, "MONEY"))
        .filter(|(s, _)| *s <= end)
    }

    fn percent(&self, i: usize, end: usize) -> Proposal {
        let stop = self.number_run(i, end)?;
        if stop >= end {
            return None;
        }
        match self.lower(stop).as_str() {
            "%" | "percent" => Some((stop + 1, "PERCENT")),
            "per" if self.words.get(stop + 1).is_some_and(|w| w.eq_ignore_ascii_case("cent")) && stop + 2 <= end => {
                Some((stop + 2, "PERCENT"))
            }
            _ => None,
        }
    }

    fn time(&self, i: usize, end: usize) -> Proposal {
        let word = self.words[i];
        let lower = self.lower(i);
        if matches!(lower.as_str(), "noon" | "midnight" | "tonight") {
            return Some((i + 1, "TIME"));
        }

        let clock = word.split_once(':').is_some_and(|(h, m)| {
            !h.is_empty()
                && h.len() <= 2
                && m.len() == 2
                && h.chars().all(|c| c.is_ascii_digit())
                && m.chars().all(|c| c.is_ascii_digit())
        });
        let is_number = self.tags[i] == "CD";
        if !clock && !is_number {
            return None;
        }

        let next = if i + 1 < end { self.lower(i + 1) } else { String::new() };
        if matches!(next.as_str(), "a.m." | "p.m." | "am" | "pm" | "o'clock") {
            return Some((i + 2, "TIME"));
        }
        clock.then_some((i + 1, "TIME"))
    }

    fn date(&self, i: usize, end: usize) -> Proposal {
        let word = self.words[i];
        let lower = self.lower(i);

        if matches!(lower.as_str(), "today" | "yesterday" | "tomorrow") || gazetteer::is_weekday(word) {
            return Some((i + 1, "DATE"));
        }
        if is_year(word) || is_decade(word) || lexicon::is_decade_word(&lower) {
            return Some((i + 1, "DATE"));
        }

        if gazetteer::is_month(word) && (!self.cased() || starts_upper(word)) {
            let mut j = i + 1;
            if j < end && is_day_number(self.words[j]) {
                j += 1;
                if j + 1 < end && self.words[j] == "," && is_year(self.words[j + 1]) {
                    j += 2;
                } else if j < end && is_year(self.words[j]) {
                    j += 1;
                }
            } else if j < end && is_year(self.words[j]) {
                j += 1;
            }
            // A bare "May" or "march" is too ambiguous to be a date.
            let full_name = word.chars().count() > 3 && !matches!(lower.as_str(), "may" | "march");
            if j > i + 1 || (full_name && starts_upper(word)) {
                return Some((j, "DATE"));
            }
            return None;
        }

        // "5 May 2001", "five years ago"
        let stop = self.number_run(i, end)?;
        if stop < end && gazetteer::is_month(self.words[stop]) {
            let mut j = stop + 1;
            if j < end && is_year(self.words[j]) {
                j += 1;
            }
            return Some((j, "DATE"));
        }
        if stop < end {
            let unit = self.lower(stop);
            if matches!(
                unit.as_str(),
                "year" | "years" | "month" | "months" | "week" | "weeks" | "day" | "days"
                    | "decade" | "decades" | "century" | "centuries"
            ) {
                let mut j = stop + 1;
                if j < end && matches!(self.lower(j).as_str(), "ago" | "old" | "later" | "earlier") {
                    j += 1;
                }
                return Some((j, "DATE"));
            }
        }
        None
    }

    fn gazetteer(&self, i: usize, end: usize) -> Proposal {
        if self.cased() && !starts_upper(self.words[i]) {
            return None;
        }
        let (len, label) = gazetteer::match_phrase(&self.words[i..end], self.cased())?;
        Some((i + len, label))
    }

    /// A run of capitalized words containing an organization head word:
    /// "Acme Corporation", "University of Michigan".
    fn organization(&self, i: usize, end: usize) -> Proposal {
        if !self.cased() || !self.is_name_token(i) {
            return None;
        }
        let mut j = i;
        let mut stop = i;
        let mut has_keyword = false;
        while j < end {
            if self.is_name_token(j) {
                has_keyword |= gazetteer::is_org_keyword(self.words[j]);
                j += 1;
                stop = j;
            } else if matches!(self.words[j], "of" | "for" | "and" | "&") && j + 1 < end && self.is_name_token(j + 1) {
                j += 1;
            } else {
                break;
            }
        }

        if has_keyword && stop > i {
            return Some((stop, "ORG"));
        }
        // Unknown acronyms are usually organizations.
        let word = self.words[i];
        if stop == i + 1 && word.len() >= 2 && word.chars().all(|c| c.is_ascii_uppercase()) {
            return Some((stop, "ORG"));
        }
        None
    }

    fn person(&self, i: usize, end: usize) -> Proposal {
        if !self.cased() {
            // Lower-cased text: a known first name followed by a content word.
            if gazetteer::is_first_name(self.words[i])
                && i + 1 < end
                && self.words[i + 1].chars().all(char::is_alphabetic)
                && !lexicon::is_closed_class(&self.lower(i + 1))
                && matches!(self.tags[i + 1], "NN" | "NNP" | "NNS" | "NNPS")
            {
                return Some((i + 2, "PERSON"));
            }
            return None;
        }

        if !self.is_name_token(i) || gazetteer::is_person_title(self.words[i]) {
            return None;
        }
        let mut j = i;
        while j < end
            && self.is_name_token(j)
            && !gazetteer::is_person_title(self.words[j])
            && !gazetteer::is_month(self.words[j])
            && !gazetteer::is_weekday(self.words[j])
        {
            j += 1;
        }
        if j == i {
            return None;
        }

        let after_title = i > 0 && gazetteer::is_person_title(self.words[i - 1]);
        if j - i >= 2 || after_title || gazetteer::is_first_name(self.words[i]) {
            return Some((j, "PERSON"));
        }
        None
    }

    fn quantity(&self, i: usize, end: usize) -> Proposal {
        let stop = self.number_run(i, end)?;
        if stop >= end {
            return None;
        }
        matches!(
            self.lower(stop).as_str(),
            "miles" | "mile" | "kilometers" | "kilometres" | "km" | "feet" | "foot" | "inches"
                | "meters" | "metres" | "tons" | "pounds" | "gallons" | "acres" | "kilograms"
                | "kg" | "degrees"
        )
        .then_some((stop + 1, "QUANTITY"))
    }

    fn ordinal(&self, i: usize) -> Proposal {
        let lower = self.lower(i);
        let numeric = ["st", "nd", "rd", "th"].iter().any(|s| {
            lower
                .strip_suffix(s)
                .is_some_and(|stem| !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()))
        });
        (numeric || lexicon::is_ordinal_word(&lower)).then_some((i + 1, "ORDINAL"))
    }

    fn cardinal(&self, i: usize, end: usize) -> Proposal {
        let stop = self.number_run(i, end)?;
        Some((stop, "CARDINAL"))
    }

    /// A capitalized proper-noun token.
    fn is_name_token(&self, i: usize) -> bool {
        matches!(self.tags[i], "NNP" | "NNPS") && starts_upper(self.words[i])
    }
}

fn starts_upper(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_year(word: &str) -> bool {
    word.len() == 4
        && word.chars().all(|c| c.is_ascii_digit())
        && matches!(word.parse::<u32>(), Ok(1000..=2099))
}

fn is_decade(word: &str) -> bool {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix('s'))
        .is_some_and(|stem| stem.len() == 4 && is_year(stem) && stem.ends_with('0'))
}

fn is_day_number(word: &str) -> bool {
    let digits = word.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(digits.parse::<u32>(), Ok(1..=31))
}
