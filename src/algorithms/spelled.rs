//! Spelled-out word decoding
//!
//! Callers who are asked to spell a street name answer in a few styles:
//! - bare letters: "G O L F"
//! - letters with exemplars: "G as in George, O, L, F"
//! - phonetic alphabet words: "Golf Oscar Lima Foxtrot"
//!
//! [`decode`] turns all of them into the literal letters ("GOLF").

/// Phonetic-alphabet words and the letter each stands for. Covers the NATO
/// alphabet plus the older Able/Baker and police-radio variants callers still use.
const ALPHABET_WORDS: &[(&str, char)] = &[
    ("ALPHA", 'A'),
    ("ALFA", 'A'),
    ("ABLE", 'A'),
    ("ADAM", 'A'),
    ("BRAVO", 'B'),
    ("BAKER", 'B'),
    ("BOY", 'B'),
    ("CHARLIE", 'C'),
    ("CHARLES", 'C'),
    ("DELTA", 'D'),
    ("DOG", 'D'),
    ("DAVID", 'D'),
    ("ECHO", 'E'),
    ("EASY", 'E'),
    ("EDWARD", 'E'),
    ("FOXTROT", 'F'),
    ("FOX", 'F'),
    ("FRANK", 'F'),
    ("GOLF", 'G'),
    ("GEORGE", 'G'),
    ("HOTEL", 'H'),
    ("HOW", 'H'),
    ("HENRY", 'H'),
    ("INDIA", 'I'),
    ("ITEM", 'I'),
    ("IDA", 'I'),
    ("JULIET", 'J'),
    ("JULIETT", 'J'),
    ("JIG", 'J'),
    ("JOHN", 'J'),
    ("KILO", 'K'),
    ("KING", 'K'),
    ("LIMA", 'L'),
    ("LOVE", 'L'),
    ("LINCOLN", 'L'),
    ("MIKE", 'M'),
    ("MARY", 'M'),
    ("NOVEMBER", 'N'),
    ("NAN", 'N'),
    ("NORA", 'N'),
    ("OSCAR", 'O'),
    ("OBOE", 'O'),
    ("OCEAN", 'O'),
    ("PAPA", 'P'),
    ("PETER", 'P'),
    ("PAUL", 'P'),
    ("QUEBEC", 'Q'),
    ("QUEEN", 'Q'),
    ("ROMEO", 'R'),
    ("ROGER", 'R'),
    ("ROBERT", 'R'),
    ("SIERRA", 'S'),
    ("SUGAR", 'S'),
    ("SAM", 'S'),
    ("TANGO", 'T'),
    ("TARE", 'T'),
    ("TOM", 'T'),
    ("UNIFORM", 'U'),
    ("UNCLE", 'U'),
    ("UNION", 'U'),
    ("VICTOR", 'V'),
    ("WHISKEY", 'W'),
    ("WHISKY", 'W'),
    ("WILLIAM", 'W'),
    ("XRAY", 'X'),
    ("YANKEE", 'Y'),
    ("YOKE", 'Y'),
    ("YOUNG", 'Y'),
    ("ZULU", 'Z'),
    ("ZEBRA", 'Z'),
];

/// Letter for a single token: a bare A–Z letter or a phonetic-alphabet word.
fn letter_for(token: &str) -> Option<char> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii_alphabetic().then_some(c);
    }
    ALPHABET_WORDS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, letter)| *letter)
}

/// Decode a spelled-out word into its letters.
///
/// Unrecognized tokens are skipped. Returns an empty string when nothing
/// decodes; callers then treat the raw text as a literal street name.
///
/// # Examples
/// ```
/// use streetmatch::algorithms::spelled::decode;
///
/// assert_eq!(decode("G as in George, O, L, F"), "GOLF");
/// assert_eq!(decode("Golf Oscar Lima Foxtrot"), "GOLF");
/// assert_eq!(decode("Grouse"), "");
/// ```
#[must_use]
pub fn decode(text: &str) -> String {
    let cleaned: String = text
        .to_uppercase()
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '-'))
        .collect();
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut out = String::with_capacity(tokens.len());
    let mut prev_was_letter = false;
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i] == "AS" && tokens.get(i + 1) == Some(&"IN") {
            // "G as in George": the exemplar repeats the letter already taken.
            // A bare letter after "as in" is the next letter, not an exemplar.
            let has_exemplar = prev_was_letter && tokens.get(i + 2).is_some_and(|t| t.chars().count() > 1);
            i += if has_exemplar { 3 } else { 2 };
            prev_was_letter = false;
            continue;
        }
        match letter_for(tokens[i]) {
            Some(letter) => {
                out.push(letter);
                prev_was_letter = true;
            }
            None => prev_was_letter = false,
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_with_exemplars() {
        assert_eq!(decode("G as in George, O, L, F"), "GOLF");
        assert_eq!(decode("G as in Golf, O as in Oscar, L, F"), "GOLF");
    }

    #[test]
    fn test_dangling_as_in_keeps_next_letter() {
        assert_eq!(decode("G as in, O, L, F"), "GOLF");
        assert_eq!(decode("G as in"), "G");
    }

    #[test]
    fn test_bare_letters() {
        assert_eq!(decode("G O L F"), "GOLF");
        assert_eq!(decode("g. r. o. u. s. e."), "GROUSE");
        assert_eq!(decode("G-R-O-U-S-E"), "");
    }

    #[test]
    fn test_alphabet_words() {
        assert_eq!(decode("Golf Oscar Lima Foxtrot"), "GOLF");
        assert_eq!(decode("able baker"), "AB");
        assert_eq!(decode("X-ray Yankee Zulu"), "XYZ");
    }

    #[test]
    fn test_unrecognized_tokens_skipped() {
        assert_eq!(decode("um G O uh L F"), "GOLF");
    }

    #[test]
    fn test_empty_and_whole_words() {
        assert_eq!(decode(""), "");
        assert_eq!(decode("   "), "");
        assert_eq!(decode("Grouse"), "");
    }
}
