//! Entity name lists for the rule-based NER stage.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::lexicon;

// ============================================================================
// Places
// ============================================================================

const COUNTRIES: &[&str] = &[
    "Afghanistan", "Argentina", "Australia", "Austria", "Belgium", "Brazil", "Canada",
    "Chile", "China", "Colombia", "Cuba", "Denmark", "Egypt", "England", "Ethiopia",
    "Finland", "France", "Germany", "Greece", "India", "Indonesia", "Iran", "Iraq", "Ireland",
    "Israel", "Italy", "Japan", "Kenya", "Korea", "North Korea", "South Korea", "Lebanon",
    "Mexico", "Morocco", "Netherlands", "New Zealand", "Nigeria", "Norway", "Pakistan",
    "Peru", "Philippines", "Poland", "Portugal", "Russia", "Saudi Arabia", "Scotland",
    "South Africa", "Soviet Union", "Spain", "Sweden", "Switzerland", "Syria", "Taiwan",
    "Thailand", "Turkey", "Ukraine", "United Kingdom", "United States",
    "United States of America", "Venezuela", "Vietnam", "Wales", "America", "Britain",
    "Great Britain", "USA", "U.S.", "U.S.A.", "US", "UK", "U.K.", "USSR",
];

const US_STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan",
    "Minnesota", "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire",
    "New Jersey", "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota",
    "Tennessee", "Texas", "Utah", "Vermont", "Virginia", "Washington", "West Virginia",
    "Wisconsin", "Wyoming",
];

const CITIES: &[&str] = &[
    "Washington D.C.", "Boston", "Chicago", "Los Angeles", "San Francisco", "Seattle",
    "Houston", "Dallas", "Atlanta", "Miami", "Philadelphia", "Detroit", "Denver", "Honolulu",
    "New Orleans", "Baltimore", "Pittsburgh", "Phoenix", "Las Vegas", "London", "Paris",
    "Berlin", "Moscow", "Tokyo", "Beijing", "Shanghai", "Hong Kong", "Rome", "Madrid",
    "Toronto", "Montreal", "Vancouver", "Sydney", "Melbourne", "Mumbai", "Delhi", "Cairo",
    "Baghdad", "Kabul", "Tehran", "Jerusalem", "Istanbul", "Havana", "Saigon", "Seoul",
    "Pyongyang", "Islamabad", "Dublin", "Amsterdam", "Vienna", "Geneva", "Brussels",
    "Nairobi", "Lagos", "Mexico City", "Rio de Janeiro", "Buenos Aires",
];

const LOCATIONS: &[&str] = &[
    "Africa", "Asia", "Europe", "North America", "South America", "Latin America",
    "Antarctica", "Middle East", "Pacific", "Pacific Ocean", "Atlantic", "Atlantic Ocean",
    "Indian Ocean", "Mediterranean", "Mississippi River", "Amazon River", "Nile",
    "Mount Everest", "Sahara", "Alps", "Rocky Mountains", "Gulf of Mexico", "Caribbean",
    "Silicon Valley", "Midwest", "West Coast", "East Coast",
];

// ============================================================================
// Organizations
// ============================================================================

const ORGANIZATIONS: &[&str] = &[
    "CIA", "FBI", "NSA", "NASA", "FEMA", "EPA", "IRS", "FDA", "CDC", "NATO", "UN",
    "United Nations", "European Union", "EU", "World Bank", "IMF", "WHO", "UNESCO",
    "PBS", "NBC", "CBS", "ABC", "CNN", "BBC", "NPR", "Fox News", "NewsHour", "Reuters",
    "Associated Press", "New York Times", "Washington Post", "Wall Street Journal",
    "Congress", "Senate", "House of Representatives", "Supreme Court", "White House",
    "Pentagon", "State Department", "Department of Defense", "Department of Justice",
    "Department of State", "Federal Reserve", "Google", "Microsoft", "Amazon", "IBM",
    "Facebook", "Twitter", "Harvard", "Harvard University", "Yale", "Stanford",
    "Stanford University", "MIT", "Oxford", "Cambridge", "Red Cross",
    "Central Intelligence Agency", "Federal Bureau of Investigation",
    "National Security Agency", "Democratic Party", "Republican Party",
];

/// Head words that turn a proper-noun run into an organization name.
const ORG_KEYWORDS: &[&str] = &[
    "Inc.", "Inc", "Corp.", "Corp", "Corporation", "Company", "Co.", "Ltd.", "LLC",
    "University", "College", "Institute", "Association", "Agency", "Department", "Committee",
    "Council", "Bank", "Party", "Foundation", "Group", "News", "Times", "Post", "Journal",
    "Press", "Ministry", "Commission", "Bureau", "Office", "Society", "Museum", "Library",
    "School", "Hospital", "Church", "Airlines", "Motors", "Technologies", "Systems", "Club",
    "Court", "Senate", "Army", "Navy", "Network", "Union", "Board",
];

// ============================================================================
// Groups (NORP)
// ============================================================================

const NORP: &[&str] = &[
    "American", "Americans", "British", "English", "French", "German", "Germans", "Chinese",
    "Japanese", "Russian", "Russians", "Soviet", "Soviets", "Italian", "Italians", "Spanish",
    "Mexican", "Mexicans", "Canadian", "Canadians", "Indian", "Indians", "Israeli",
    "Israelis", "Palestinian", "Palestinians", "Iranian", "Iraqi", "Korean", "Koreans",
    "African", "Africans", "Asian", "Asians", "European", "Europeans", "Arab", "Arabs",
    "Democrat", "Democrats", "Democratic", "Republican", "Republicans", "Christian",
    "Christians", "Muslim", "Muslims", "Jewish", "Jews", "Catholic", "Catholics",
    "Protestant", "Buddhist", "Hindu", "Irish", "Scottish", "Dutch", "Greek", "Turkish",
    "Brazilian", "Australian", "Vietnamese", "Cuban", "Hawaiian", "Texan",
];

// ============================================================================
// People
// ============================================================================

static FIRST_NAMES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aaron", "adam", "alan", "albert", "alice", "allen", "amanda", "amy", "andrew",
        "angela", "ann", "anna", "anne", "anthony", "barack", "barbara", "ben", "benjamin",
        "bernie", "betty", "bill", "bob", "brian", "bruce", "carl", "carol", "catherine",
        "charles", "chris", "christopher", "daniel", "david", "deborah", "dennis", "donald",
        "donna", "dorothy", "edward", "elizabeth", "emily", "emma", "eric", "frank", "gary",
        "george", "gerald", "gregory", "gwen", "harold", "harry", "helen", "henry", "hillary",
        "jack", "james", "jane", "janet", "jason", "jeff", "jeffrey", "jennifer", "jessica",
        "jim", "jimmy", "joe", "john", "jonathan", "joseph", "joshua", "judy", "julia", "karen",
        "kate", "kathleen", "kenneth", "kevin", "kim", "larry", "laura", "linda", "lisa",
        "margaret", "maria", "mark", "martha", "martin", "mary", "matthew", "melissa",
        "michael", "michelle", "mike", "nancy", "nicholas", "nick", "pamela", "patricia",
        "patrick", "paul", "peter", "rachel", "ralph", "raymond", "rebecca", "richard",
        "robert", "robin", "ronald", "rose", "ruth", "ryan", "sam", "samuel", "sandra",
        "sarah", "scott", "sharon", "stephen", "steve", "steven", "susan", "thomas", "tim",
        "timothy", "tom", "victoria", "walter", "william", "abraham", "franklin", "theodore",
        "dwight", "lyndon", "woodrow", "ulysses", "vladimir", "angela", "boris", "emmanuel",
        "jacques", "winston", "nelson", "kamala", "joe", "mitt", "ted", "newt", "condoleezza",
        "colin", "madeleine", "henry", "neil", "buzz", "oprah", "elon",
    ]
    .into_iter()
    .collect()
});

/// Whether a word is a common given name (case-insensitive).
pub fn is_first_name(word: &str) -> bool {
    FIRST_NAMES.contains(word.to_lowercase().as_str())
}

/// Non-abbreviated titles that precede a person name.
pub fn is_person_title(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "president" | "senator" | "governor" | "mayor" | "judge" | "justice" | "director"
            | "general" | "admiral" | "colonel" | "captain" | "lieutenant" | "sergeant"
            | "ambassador" | "congressman" | "congresswoman" | "secretary" | "professor"
            | "prince" | "princess" | "king" | "queen" | "pope" | "sir" | "dame" | "chancellor"
            | "minister" | "agent" | "detective" | "officer"
    ) || lexicon::is_title_abbreviation(&word.to_lowercase())
}

pub fn is_org_keyword(word: &str) -> bool {
    ORG_KEYWORDS.contains(&word)
}

// ============================================================================
// Calendar
// ============================================================================

pub fn is_month(word: &str) -> bool {
    matches!(
        word.to_lowercase().trim_end_matches('.'),
        "january" | "february" | "march" | "april" | "may" | "june" | "july" | "august"
            | "september" | "october" | "november" | "december" | "jan" | "feb" | "mar"
            | "apr" | "jun" | "jul" | "aug" | "sep" | "sept" | "oct" | "nov" | "dec"
    )
}

pub fn is_weekday(word: &str) -> bool {
    matches!(
        word.to_lowercase().as_str(),
        "monday" | "tuesday" | "wednesday" | "thursday" | "friday" | "saturday" | "sunday"
    )
}

// ============================================================================
// Phrase lookup
// ============================================================================

struct PhraseTable {
    cased: HashMap<String, &'static str>,
    lowered: HashMap<String, &'static str>,
    max_len: usize,
}

static PHRASES: LazyLock<PhraseTable> = LazyLock::new(|| {
    let groups: &[(&'static str, &[&'static str])] = &[
        ("GPE", COUNTRIES),
        ("GPE", US_STATES),
        ("GPE", CITIES),
        ("LOC", LOCATIONS),
        ("ORG", ORGANIZATIONS),
        ("NORP", NORP),
    ];

    let mut cased = HashMap::new();
    let mut lowered = HashMap::new();
    let mut max_len = 1;
    for (label, names) in groups {
        for name in names.iter() {
            max_len = max_len.max(name.split(' ').count());
            cased.entry(name.to_string()).or_insert(*label);
            // Short all-caps names that spell a common word ("US", "WHO") are
            // only trusted when the casing says so.
            let lower = name.to_lowercase();
            let ambiguous = name.len() <= 4
                && name.chars().all(|c| !c.is_lowercase())
                && lexicon::is_closed_class(&lower);
            if !ambiguous {
                lowered.entry(lower).or_insert(*label);
            }
        }
    }

    PhraseTable {
        cased,
        lowered,
        max_len,
    }
});

/// Longest gazetteer phrase starting at `words[0]`: its length in tokens
/// and its label.
pub fn match_phrase(words: &[&str], case_sensitive: bool) -> Option<(usize, &'static str)> {
    let longest = PHRASES.max_len.min(words.len());
    for n in (1..=longest).rev() {
        let key = words[..n].join(" ");
        let hit = if case_sensitive {
            PHRASES.cased.get(&key)
        } else {
            PHRASES.lowered.get(&key.to_lowercase())
        };
        if let Some(label) = hit {
            return Some((n, label));
        }
    }
    None
}
