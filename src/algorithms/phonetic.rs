//! Double Metaphone phonetic encoding
//!
//! Encodes a word by how it sounds as two codes: a primary code for the most
//! likely pronunciation and an alternate code for common variants. Street
//! names that are misheard ("Gulf" for "Golf", "Lynn" for "Lane") usually
//! share at least one code with the stored name.
//!
//! The scan runs over the uppercased, letters-only form of the input. Because
//! spaces never survive that filter, the multi-word branches of the classic
//! table ("VAN ", "SAN ", ...) can never fire and are omitted.
//!
//! The same encoder produces the codes stored alongside each
//! [`StreetRecord`](crate::records::StreetRecord) and the codes computed for a
//! caller's utterance, so the two can never drift apart.

use serde::{Deserialize, Serialize};

use super::normalize::fold_upper;

/// Default maximum code length.
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Marker for the TH sound (theta) in primary codes.
pub const THETA: &str = "0";

/// Primary and alternate phonetic codes for one word sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneticCodes {
    pub primary: String,
    pub alternate: String,
}

impl PhoneticCodes {
    #[must_use]
    pub fn new(primary: impl Into<String>, alternate: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            alternate: alternate.into(),
        }
    }

    /// True when the input carried no letters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.alternate.is_empty()
    }
}

/// Double Metaphone phonetic encoder
///
/// # Parameters
/// - `max_length`: Maximum code length for both codes (default: 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleMetaphone {
    /// Maximum code length
    pub max_length: usize,
}

impl Default for DoubleMetaphone {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl DoubleMetaphone {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Encode a string to its Double Metaphone codes
    #[must_use]
    pub fn encode(&self, s: &str) -> PhoneticCodes {
        double_metaphone(s, self.max_length)
    }
}

/// Encode with the default 4-character code length.
///
/// # Examples
/// ```
/// use streetmatch::algorithms::phonetic::encode;
///
/// assert_eq!(encode("Golf").primary, encode("Gulf").primary);
/// assert_eq!(encode("Smith").primary, "SM0"); // 0 = theta (TH)
/// assert_eq!(encode("Smith").alternate, "XMT");
/// ```
#[must_use]
pub fn encode(s: &str) -> PhoneticCodes {
    double_metaphone(s, DEFAULT_CODE_LENGTH)
}

/// Encode a string using the Double Metaphone algorithm.
///
/// Both codes are always populated for input containing letters; the
/// alternate equals the primary when no variant pronunciation applies.
#[must_use]
pub fn double_metaphone(s: &str, max_length: usize) -> PhoneticCodes {
    let chars: Vec<char> = fold_upper(s)
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();

    if chars.is_empty() || max_length == 0 {
        return PhoneticCodes::default();
    }

    let mut scan = Scan::new(&chars, max_length);
    scan.run();
    PhoneticCodes {
        primary: scan.primary,
        alternate: scan.alternate,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U' | 'Y')
}

/// Left-to-right scan state. `pos` is the index of the letter being encoded;
/// every lookup goes through [`Scan::ch`] or [`Scan::at`], which treat
/// positions outside the word as non-matching.
struct Scan<'a> {
    chars: &'a [char],
    pos: usize,
    max_length: usize,
    slavo_germanic: bool,
    primary: String,
    alternate: String,
}

impl<'a> Scan<'a> {
    fn new(chars: &'a [char], max_length: usize) -> Self {
        let slavo_germanic = chars.iter().any(|&c| c == 'W' || c == 'K')
            || chars.windows(2).any(|w| w == ['C', 'Z']);
        Self {
            chars,
            pos: 0,
            max_length,
            slavo_germanic,
            primary: String::with_capacity(max_length),
            alternate: String::with_capacity(max_length),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn is_last(&self) -> bool {
        self.pos + 1 == self.len()
    }

    /// Letter at `pos + offset`, or `'\0'` outside the word.
    fn ch(&self, offset: isize) -> char {
        let idx = self.pos as isize + offset;
        if idx < 0 {
            return '\0';
        }
        self.chars.get(idx as usize).copied().unwrap_or('\0')
    }

    /// Does any pattern occur starting at absolute position `start`?
    fn at_abs(&self, start: isize, patterns: &[&str]) -> bool {
        if start < 0 {
            return false;
        }
        let start = start as usize;
        patterns.iter().any(|p| {
            let end = start + p.len();
            end <= self.len() && p.chars().eq(self.chars[start..end].iter().copied())
        })
    }

    /// Does any pattern occur starting at `pos + offset`?
    fn at(&self, offset: isize, patterns: &[&str]) -> bool {
        self.at_abs(self.pos as isize + offset, patterns)
    }

    fn complete(&self) -> bool {
        self.primary.len() >= self.max_length && self.alternate.len() >= self.max_length
    }

    fn add_primary(&mut self, p: &str) {
        for ch in p.chars() {
            if self.primary.len() < self.max_length {
                self.primary.push(ch);
            }
        }
    }

    fn add_alternate(&mut self, a: &str) {
        for ch in a.chars() {
            if self.alternate.len() < self.max_length {
                self.alternate.push(ch);
            }
        }
    }

    fn add(&mut self, p: &str, a: &str) {
        self.add_primary(p);
        self.add_alternate(a);
    }

    fn both(&mut self, code: &str) {
        self.add(code, code);
    }

    /// Advance past the current letter and a doubled copy of it.
    fn skip_double(&mut self, letter: char) {
        self.pos += if self.ch(1) == letter { 2 } else { 1 };
    }

    fn run(&mut self) {
        // Silent initial clusters
        if self.at_abs(0, &["GN", "KN", "PN", "WR", "PS"]) {
            self.pos = 1;
        }

        while !self.complete() && self.pos < self.len() {
            match self.ch(0) {
                'A' | 'E' | 'I' | 'O' | 'U' | 'Y' => {
                    if self.pos == 0 {
                        self.both("A");
                    }
                    self.pos += 1;
                }
                'B' => {
                    self.both("P");
                    self.skip_double('B');
                }
                'C' => self.c(),
                'D' => self.d(),
                'F' => {
                    self.both("F");
                    self.skip_double('F');
                }
                'G' => self.g(),
                'H' => self.h(),
                'J' => self.j(),
                'K' => {
                    self.both("K");
                    self.skip_double('K');
                }
                'L' => self.l(),
                'M' => {
                    self.both("M");
                    let swallow_next = self.ch(1) == 'M'
                        || (self.at(-1, &["UMB"]) && (self.pos + 2 == self.len() || self.at(2, &["ER"])));
                    self.pos += if swallow_next { 2 } else { 1 };
                }
                'N' => {
                    self.both("N");
                    self.skip_double('N');
                }
                'P' => {
                    if self.ch(1) == 'H' {
                        self.both("F");
                        self.pos += 2;
                    } else {
                        self.both("P");
                        self.pos += if self.at(1, &["P", "B"]) { 2 } else { 1 };
                    }
                }
                'Q' => {
                    self.both("K");
                    self.skip_double('Q');
                }
                'R' => self.r(),
                'S' => self.s(),
                'T' => self.t(),
                'V' => {
                    self.both("F");
                    self.skip_double('V');
                }
                'W' => self.w(),
                'X' => self.x(),
                'Z' => self.z(),
                _ => self.pos += 1,
            }
        }
    }

    fn c(&mut self) {
        if self.c_is_hard_ach() {
            self.both("K");
            self.pos += 2;
        } else if self.pos == 0 && self.at(0, &["CAESAR"]) {
            self.both("S");
            self.pos += 2;
        } else if self.at(0, &["CH"]) {
            self.ch_digraph();
        } else if self.at(0, &["CZ"]) && !self.at(-2, &["WICZ"]) {
            self.add("S", "X");
            self.pos += 2;
        } else if self.at(1, &["CIA"]) {
            self.both("X");
            self.pos += 3;
        } else if self.at(0, &["CC"]) && !(self.pos == 1 && self.chars[0] == 'M') {
            self.cc();
        } else if self.at(0, &["CK", "CG", "CQ"]) {
            self.both("K");
            self.pos += 2;
        } else if self.at(0, &["CI", "CE", "CY"]) {
            if self.at(0, &["CIO", "CIE", "CIA"]) {
                self.add("S", "X");
            } else {
                self.both("S");
            }
            self.pos += 2;
        } else {
            self.both("K");
            self.pos += if self.at(1, &["C", "K", "Q"]) && !self.at(1, &["CE", "CI"]) {
                2
            } else {
                1
            };
        }
    }

    /// "CHIA", or "ACH" not followed by I/E (except BACHER/MACHER).
    fn c_is_hard_ach(&self) -> bool {
        if self.at(0, &["CHIA"]) {
            return true;
        }
        if self.pos <= 1 || is_vowel(self.ch(-2)) || !self.at(-1, &["ACH"]) {
            return false;
        }
        let c = self.ch(2);
        (c != 'I' && c != 'E') || self.at(-2, &["BACHER", "MACHER"])
    }

    fn ch_digraph(&mut self) {
        if self.pos > 0 && self.at(0, &["CHAE"]) {
            self.add("K", "X");
        } else if self.ch_is_greek() || self.ch_is_germanic() {
            self.both("K");
        } else if self.pos > 0 {
            if self.at_abs(0, &["MC"]) {
                self.both("K");
            } else {
                self.add("X", "K");
            }
        } else {
            self.both("X");
        }
        self.pos += 2;
    }

    fn ch_is_greek(&self) -> bool {
        self.pos == 0
            && (self.at(1, &["HARAC", "HARIS"]) || self.at(1, &["HOR", "HYM", "HIA", "HEM"]))
            && !self.at_abs(0, &["CHORE"])
    }

    fn ch_is_germanic(&self) -> bool {
        self.at_abs(0, &["SCH"])
            || self.at(-2, &["ORCHES", "ARCHIT", "ORCHID"])
            || self.at(2, &["T", "S"])
            || ((self.at(-1, &["A", "O", "U", "E"]) || self.pos == 0)
                && (self.at(2, &["L", "R", "N", "M", "B", "H", "F", "V", "W"])
                    || self.pos + 2 == self.len()))
    }

    fn cc(&mut self) {
        if self.at(2, &["I", "E", "H"]) && !self.at(2, &["HU"]) {
            if (self.pos == 1 && self.ch(-1) == 'A') || self.at(-1, &["UCCEE", "UCCES"]) {
                self.both("KS");
            } else {
                self.both("X");
            }
            self.pos += 3;
        } else {
            self.both("K");
            self.pos += 2;
        }
    }

    fn d(&mut self) {
        if self.at(0, &["DG"]) {
            if self.at(2, &["I", "E", "Y"]) {
                self.both("J");
                self.pos += 3;
            } else {
                self.both("TK");
                self.pos += 2;
            }
        } else if self.at(0, &["DT", "DD"]) {
            self.both("T");
            self.pos += 2;
        } else {
            self.both("T");
            self.pos += 1;
        }
    }

    fn g(&mut self) {
        let next = self.ch(1);
        if next == 'H' {
            self.gh();
        } else if next == 'N' {
            if self.pos == 1 && is_vowel(self.chars[0]) && !self.slavo_germanic {
                self.add("KN", "N");
            } else if !self.at(2, &["EY"]) && !self.slavo_germanic {
                self.add("N", "KN");
            } else {
                self.both("KN");
            }
            self.pos += 2;
        } else if self.at(1, &["LI"]) && !self.slavo_germanic {
            self.add("KL", "L");
            self.pos += 2;
        } else if self.pos == 0
            && (next == 'Y'
                || self.at(1, &["ES", "EP", "EB", "EL", "EY", "IB", "IL", "IN", "IE", "EI", "ER"]))
        {
            self.add("K", "J");
            self.pos += 2;
        } else if (self.at(1, &["ER"]) || next == 'Y')
            && !self.at_abs(0, &["DANGER", "RANGER", "MANGER"])
            && !self.at(-1, &["E", "I"])
            && !self.at(-1, &["RGY", "OGY"])
        {
            self.add("K", "J");
            self.pos += 2;
        } else if self.at(1, &["E", "I", "Y"]) || self.at(-1, &["AGGI", "OGGI"]) {
            if self.at_abs(0, &["SCH"]) || self.at(1, &["ET"]) {
                self.both("K");
            } else if self.at(1, &["IER"]) {
                self.both("J");
            } else {
                self.add("J", "K");
            }
            self.pos += 2;
        } else {
            self.both("K");
            self.skip_double('G');
        }
    }

    fn gh(&mut self) {
        if self.pos > 0 && !is_vowel(self.ch(-1)) {
            self.both("K");
        } else if self.pos == 0 {
            if self.ch(2) == 'I' {
                self.both("J");
            } else {
                self.both("K");
            }
        } else if (self.pos > 1 && self.at(-2, &["B", "H", "D"]))
            || (self.pos > 2 && self.at(-3, &["B", "H", "D"]))
            || (self.pos > 3 && self.at(-4, &["B", "H"]))
        {
            // silent: "hugh", "bough", "broughton"
        } else if self.pos > 2 && self.ch(-1) == 'U' && self.at(-3, &["C", "G", "L", "R", "T"]) {
            self.both("F");
        } else if self.ch(-1) != 'I' {
            self.both("K");
        }
        self.pos += 2;
    }

    fn h(&mut self) {
        if (self.pos == 0 || is_vowel(self.ch(-1))) && is_vowel(self.ch(1)) {
            self.both("H");
            self.pos += 2;
        } else {
            self.pos += 1;
        }
    }

    fn j(&mut self) {
        if self.at(0, &["JOSE"]) {
            if self.len() == 4 {
                self.both("H");
            } else {
                self.add("J", "H");
            }
            self.pos += 1;
            return;
        }

        if self.pos == 0 {
            self.add("J", "A");
        } else if is_vowel(self.ch(-1)) && !self.slavo_germanic && matches!(self.ch(1), 'A' | 'O') {
            self.add("J", "H");
        } else if self.is_last() {
            self.add_primary("J");
        } else if !self.at(1, &["L", "T", "K", "S", "N", "M", "B", "Z"]) && !self.at(-1, &["S", "K", "L"]) {
            self.both("J");
        }
        self.skip_double('J');
    }

    fn l(&mut self) {
        if self.ch(1) == 'L' {
            if self.spanish_ll() {
                self.add_primary("L");
            } else {
                self.both("L");
            }
            self.pos += 2;
        } else {
            self.both("L");
            self.pos += 1;
        }
    }

    fn spanish_ll(&self) -> bool {
        let len = self.len() as isize;
        if self.pos + 3 == self.len() && self.at(-1, &["ILLO", "ILLA", "ALLE"]) {
            return true;
        }
        (self.at_abs(len - 2, &["AS", "OS"]) || self.at_abs(len - 1, &["A", "O"]))
            && self.at(-1, &["ALLE"])
    }

    fn r(&mut self) {
        if self.is_last() && !self.slavo_germanic && self.at(-2, &["IE"]) && !self.at(-4, &["ME", "MA"]) {
            // French final R: "Rogier"
            self.add_alternate("R");
        } else {
            self.both("R");
        }
        self.skip_double('R');
    }

    fn s(&mut self) {
        if self.at(-1, &["ISL", "YSL"]) {
            // silent: "island", "carlisle"
            self.pos += 1;
        } else if self.pos == 0 && self.at(0, &["SUGAR"]) {
            self.add("X", "S");
            self.pos += 1;
        } else if self.at(0, &["SH"]) {
            if self.at(1, &["HEIM", "HOEK", "HOLM", "HOLZ"]) {
                self.both("S");
            } else {
                self.both("X");
            }
            self.pos += 2;
        } else if self.at(0, &["SIO", "SIA"]) {
            if self.slavo_germanic {
                self.both("S");
            } else {
                self.add("S", "X");
            }
            self.pos += 3;
        } else if (self.pos == 0 && self.at(1, &["M", "N", "L", "W"])) || self.at(1, &["Z"]) {
            self.add("S", "X");
            self.pos += if self.at(1, &["Z"]) { 2 } else { 1 };
        } else if self.at(0, &["SC"]) {
            self.sc();
        } else {
            if self.is_last() && self.at(-2, &["AI", "OI"]) {
                // French final S: "Artois"
                self.add_alternate("S");
            } else {
                self.both("S");
            }
            self.pos += if self.at(1, &["S", "Z"]) { 2 } else { 1 };
        }
    }

    fn sc(&mut self) {
        if self.ch(2) == 'H' {
            if self.at(3, &["OO", "ER", "EN", "UY", "ED", "EM"]) {
                if self.at(3, &["ER", "EN"]) {
                    self.add("X", "SK");
                } else {
                    self.both("SK");
                }
            } else if self.pos == 0 && !is_vowel(self.ch(3)) && self.ch(3) != 'W' {
                self.add("X", "S");
            } else {
                self.both("X");
            }
        } else if self.at(2, &["I", "E", "Y"]) {
            self.both("S");
        } else {
            self.both("SK");
        }
        self.pos += 3;
    }

    fn t(&mut self) {
        if self.at(0, &["TION"]) || self.at(0, &["TIA", "TCH"]) {
            self.both("X");
            self.pos += 3;
        } else if self.at(0, &["TH"]) || self.at(0, &["TTH"]) {
            if self.at(2, &["OM", "AM"]) || self.at_abs(0, &["SCH"]) {
                self.both("T");
            } else {
                self.add(THETA, "T");
            }
            self.pos += 2;
        } else {
            self.both("T");
            self.pos += if self.at(1, &["T", "D"]) { 2 } else { 1 };
        }
    }

    fn w(&mut self) {
        if self.at(0, &["WR"]) {
            self.both("R");
            self.pos += 2;
            return;
        }

        if self.pos == 0 && (is_vowel(self.ch(1)) || self.at(0, &["WH"])) {
            if is_vowel(self.ch(1)) {
                self.add("A", "F");
            } else {
                self.both("A");
            }
            self.pos += 1;
        } else if (self.is_last() && is_vowel(self.ch(-1)))
            || self.at(-1, &["EWSKI", "EWSKY", "OWSKI", "OWSKY"])
            || self.at_abs(0, &["SCH"])
        {
            self.add_alternate("F");
            self.pos += 1;
        } else if self.at(0, &["WICZ", "WITZ"]) {
            self.add("TS", "FX");
            self.pos += 4;
        } else {
            self.pos += 1;
        }
    }

    fn x(&mut self) {
        if self.pos == 0 {
            self.both("S");
            self.pos += 1;
            return;
        }
        let silent_french = self.is_last() && (self.at(-3, &["IAU", "EAU"]) || self.at(-2, &["AU", "OU"]));
        if !silent_french {
            self.both("KS");
        }
        self.pos += if self.at(1, &["C", "X"]) { 2 } else { 1 };
    }

    fn z(&mut self) {
        if self.ch(1) == 'H' {
            // Chinese ZH: "Zhao"
            self.both("J");
            self.pos += 2;
            return;
        }
        if self.at(1, &["ZO", "ZI", "ZA"]) || (self.slavo_germanic && self.pos > 0 && self.ch(-1) != 'T') {
            self.add("S", "TS");
        } else {
            self.both("S");
        }
        self.skip_double('Z');
    }
}
