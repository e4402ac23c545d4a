//! Street-name normalization
//!
//! Canonicalizes raw street text (case, punctuation, suffix and directional
//! abbreviations) before phonetic encoding and comparison.
//!
//! # Operations
//! - [`normalize`]: uppercase, tokenize, canonicalize suffixes/directionals
//! - [`core_name`]: the phonetically meaningful residue of a street name
//! - [`dominant_suffix`]: canonical suffix of the last token, used for pre-filtering
//! - [`expand_for_speech`]: display form for voice prompts

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Suffix spellings and their canonical abbreviation.
const SUFFIX_FORMS: &[(&str, &str)] = &[
    ("STREET", "ST"),
    ("STR", "ST"),
    ("ST", "ST"),
    ("AVENUE", "AVE"),
    ("AVEN", "AVE"),
    ("AVN", "AVE"),
    ("AV", "AVE"),
    ("AVE", "AVE"),
    ("ROAD", "RD"),
    ("RD", "RD"),
    ("LANE", "LN"),
    ("LN", "LN"),
    ("DRIVE", "DR"),
    ("DRV", "DR"),
    ("DR", "DR"),
    ("COURT", "CT"),
    ("CRT", "CT"),
    ("CT", "CT"),
    ("CIRCLE", "CIR"),
    ("CIRC", "CIR"),
    ("CIR", "CIR"),
    ("BOULEVARD", "BLVD"),
    ("BOUL", "BLVD"),
    ("BLVD", "BLVD"),
    ("PLACE", "PL"),
    ("PL", "PL"),
    ("TERRACE", "TER"),
    ("TERR", "TER"),
    ("TER", "TER"),
    ("WAY", "WAY"),
    ("WY", "WAY"),
    ("PARKWAY", "PKWY"),
    ("PKY", "PKWY"),
    ("PKWY", "PKWY"),
    ("HIGHWAY", "HWY"),
    ("HWY", "HWY"),
    ("TRAIL", "TRL"),
    ("TRL", "TRL"),
    ("SQUARE", "SQ"),
    ("SQ", "SQ"),
    ("LOOP", "LOOP"),
    ("PATH", "PATH"),
    ("CROSSING", "XING"),
    ("XING", "XING"),
    ("ALLEY", "ALY"),
    ("ALY", "ALY"),
    ("PIKE", "PIKE"),
    ("COVE", "CV"),
    ("CV", "CV"),
];

/// Directional spellings and their canonical abbreviation.
const DIRECTIONAL_FORMS: &[(&str, &str)] = &[
    ("NORTH", "N"),
    ("N", "N"),
    ("SOUTH", "S"),
    ("S", "S"),
    ("EAST", "E"),
    ("E", "E"),
    ("WEST", "W"),
    ("W", "W"),
    ("NORTHEAST", "NE"),
    ("NE", "NE"),
    ("NORTHWEST", "NW"),
    ("NW", "NW"),
    ("SOUTHEAST", "SE"),
    ("SE", "SE"),
    ("SOUTHWEST", "SW"),
    ("SW", "SW"),
];

/// Canonical abbreviation to the word spoken back to the caller.
const SPEECH_FORMS: &[(&str, &str)] = &[
    ("ST", "Street"),
    ("AVE", "Avenue"),
    ("RD", "Road"),
    ("LN", "Lane"),
    ("DR", "Drive"),
    ("CT", "Court"),
    ("CIR", "Circle"),
    ("BLVD", "Boulevard"),
    ("PL", "Place"),
    ("TER", "Terrace"),
    ("WAY", "Way"),
    ("PKWY", "Parkway"),
    ("HWY", "Highway"),
    ("TRL", "Trail"),
    ("SQ", "Square"),
    ("LOOP", "Loop"),
    ("PATH", "Path"),
    ("XING", "Crossing"),
    ("ALY", "Alley"),
    ("PIKE", "Pike"),
    ("CV", "Cove"),
    ("N", "North"),
    ("S", "South"),
    ("E", "East"),
    ("W", "West"),
    ("NE", "Northeast"),
    ("NW", "Northwest"),
    ("SE", "Southeast"),
    ("SW", "Southwest"),
];

fn lookup(table: &'static [(&'static str, &'static str)], token: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(form, _)| *form == token)
        .map(|(_, canonical)| *canonical)
}

/// Canonical suffix for a token, if the token is a recognized suffix form.
#[must_use]
pub fn canonical_suffix(token: &str) -> Option<&'static str> {
    lookup(SUFFIX_FORMS, token)
}

/// Canonical directional for a token, if the token is a recognized directional form.
#[must_use]
pub fn canonical_directional(token: &str) -> Option<&'static str> {
    lookup(DIRECTIONAL_FORMS, token)
}

/// Fold diacritics away and uppercase: "Peña" -> "PENA".
pub(crate) fn fold_upper(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Uppercased tokens with transcript punctuation ("Lane,", "Rd.") trimmed off.
fn tokens(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split_whitespace()
        .map(|tok| fold_upper(tok.trim_matches(|c: char| !c.is_alphanumeric())))
        .filter(|tok| !tok.is_empty())
}

fn canonical_token(token: String) -> String {
    match canonical_suffix(&token).or_else(|| canonical_directional(&token)) {
        Some(canonical) => canonical.to_string(),
        None => token,
    }
}

/// Normalize raw street text.
///
/// # Examples
/// ```
/// use streetmatch::algorithms::normalize::normalize;
/// assert_eq!(normalize("  north grouse Lane, "), "N GROUSE LN");
/// assert_eq!(normalize("!!!"), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    tokens(text).map(canonical_token).collect::<Vec<_>>().join(" ")
}

/// Street name with suffixes, directionals and house numbers removed.
///
/// # Examples
/// ```
/// use streetmatch::algorithms::normalize::core_name;
/// assert_eq!(core_name("North Grouse Lane 2"), "GROUSE");
/// ```
#[must_use]
pub fn core_name(text: &str) -> String {
    normalize(text)
        .split(' ')
        .filter(|tok| !tok.is_empty())
        .filter(|tok| canonical_suffix(tok).is_none() && canonical_directional(tok).is_none())
        .filter(|tok| !tok.chars().all(|c| c.is_ascii_digit()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical suffix of the last token, if it is a recognized suffix.
#[must_use]
pub fn dominant_suffix(text: &str) -> Option<&'static str> {
    tokens(text).last().and_then(|tok| canonical_suffix(&tok))
}

fn title_case(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a stored street name the way it should be spoken.
///
/// Suffix and directional abbreviations expand to full words; everything else
/// is title-cased. Presentation only, never used for matching.
///
/// # Examples
/// ```
/// use streetmatch::algorithms::normalize::expand_for_speech;
/// assert_eq!(expand_for_speech("GROUSE LN"), "Grouse Lane");
/// assert_eq!(expand_for_speech("n 1st st."), "North 1st Street");
/// ```
#[must_use]
pub fn expand_for_speech(text: &str) -> String {
    tokens(text)
        .map(|tok| {
            let canonical = canonical_token(tok);
            match lookup(SPEECH_FORMS, &canonical) {
                Some(word) => word.to_string(),
                None => title_case(&canonical),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
