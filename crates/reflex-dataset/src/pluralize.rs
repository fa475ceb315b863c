//! English pluralization for attribute names
//!
//! Only the last segment of a compound name is pluralized, so
//! `data-post-id` becomes `data-post-ids`. Lookup is table-driven:
//! uncountables first, then irregulars, then suffix rules.

/// Words whose plural is the word itself
const UNCOUNTABLE: &[&str] = &[
    "aircraft",
    "bison",
    "cod",
    "deer",
    "equipment",
    "fish",
    "information",
    "jeans",
    "moose",
    "money",
    "news",
    "police",
    "rice",
    "salmon",
    "series",
    "sheep",
    "species",
    "swine",
    "trout",
];

/// Singular to plural overrides
const IRREGULAR: &[(&str, &str)] = &[
    ("alumnus", "alumni"),
    ("analysis", "analyses"),
    ("appendix", "appendices"),
    ("blitz", "blitzs"),
    ("bus", "buses"),
    ("cactus", "cacti"),
    ("chief", "chiefs"),
    ("child", "children"),
    ("crisis", "crises"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("echo", "echoes"),
    ("ellipsis", "ellipses"),
    ("fez", "fezs"),
    ("foot", "feet"),
    ("fungus", "fungi"),
    ("goose", "geese"),
    ("half", "halves"),
    ("hero", "heroes"),
    ("index", "indices"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("louse", "lice"),
    ("lunch", "lunches"),
    ("man", "men"),
    ("marsh", "marshes"),
    ("matrix", "matrices"),
    ("medium", "media"),
    ("mouse", "mice"),
    ("nucleus", "nuclei"),
    ("ox", "oxen"),
    ("person", "people"),
    ("phenomenon", "phenomena"),
    ("potato", "potatoes"),
    ("quiz", "quizzes"),
    ("radius", "radii"),
    ("thesis", "theses"),
    ("tomato", "tomatoes"),
    ("tooth", "teeth"),
    ("truss", "trusses"),
    ("vertex", "vertices"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

const SEGMENT_SEPARATORS: &[char] = &['-', '_', ' '];

/// Stateless pluralizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Pluralizer;

impl Pluralizer {
    /// Plural of `word`; compound names pluralize their last segment.
    pub fn pluralize(word: &str) -> String {
        let (prefix, segment) = split_last_segment(word);
        if segment.is_empty() {
            return word.to_string();
        }
        let mut out = String::with_capacity(word.len() + 3);
        out.push_str(prefix);
        out.push_str(&pluralize_segment(segment));
        out
    }

    /// Whether `candidate` is the plural spelling of `singular`
    pub fn is_plural_of(singular: &str, candidate: &str) -> bool {
        Self::pluralize(singular) == candidate
    }

    /// Whether the last segment of `word` has no distinct plural
    pub fn is_uncountable(word: &str) -> bool {
        let (_, segment) = split_last_segment(word);
        let lower = segment.to_ascii_lowercase();
        UNCOUNTABLE.contains(&lower.as_str())
    }
}

/// Shorthand for [`Pluralizer::pluralize`]
pub fn pluralize(word: &str) -> String {
    Pluralizer::pluralize(word)
}

fn split_last_segment(word: &str) -> (&str, &str) {
    match word.rfind(SEGMENT_SEPARATORS) {
        Some(idx) => word.split_at(idx + 1),
        None => ("", word),
    }
}

fn pluralize_segment(segment: &str) -> String {
    let lower = segment.to_ascii_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return segment.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return restore_case(segment, plural);
    }

    restore_case(segment, &apply_suffix_rules(&lower))
}

fn apply_suffix_rules(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("sis") {
        return format!("{stem}ses");
    }

    if let Some(stem) = word.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }

    if ["lf", "eaf", "oaf", "arf"].iter().any(|s| word.ends_with(s)) {
        return format!("{}ves", &word[..word.len() - 1]);
    }

    if let Some(stem) = word.strip_suffix("ife") {
        return format!("{stem}ives");
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Carry the casing of `original` over to the lowercase `plural`
fn restore_case(original: &str, plural: &str) -> String {
    let mut letters = original.chars().filter(|c| c.is_alphabetic());
    let all_upper = original.chars().filter(|c| c.is_alphabetic()).count() > 1
        && letters.all(char::is_uppercase);

    if all_upper {
        return plural.to_uppercase();
    }

    match original.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = plural.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => plural.to_string(),
    }
}
