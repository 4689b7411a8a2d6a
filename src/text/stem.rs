//! Suffix stripping for vocabulary folding.
//!
//! Inflected forms ("feeling", "feels", "feel") collapse to a shared
//! root so the vectorizer counts them as one term. The rules follow the
//! classic Porter sequence: plural removal, past/progressive removal,
//! y-to-i, then three rounds of measure-gated suffix tables and a final
//! e/l cleanup.

use crate::error::Result;

/// Reduces tokens to a canonical root form.
pub trait Stemmer {
    /// Stem a single token.
    fn stem(&self, token: &str) -> Result<String>;

    /// Stem every token in a slice, preserving order.
    fn stem_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<String>> {
        tokens.iter().map(|t| self.stem(t.as_ref())).collect()
    }
}

/// Rule-based suffix stripper in the Porter family.
///
/// Input is lowercased before any rule runs, and words of one or two
/// characters are returned unchanged. The stemmer is a pure function of
/// its input: equal tokens give equal stems across runs and platforms.
///
/// # Examples
///
/// ```
/// use sentir::text::stem::{PorterStemmer, Stemmer};
///
/// let stemmer = PorterStemmer::new();
/// assert_eq!(stemmer.stem("running").unwrap(), "run");
/// assert_eq!(stemmer.stem("depressed").unwrap(), "depress");
/// assert_eq!(stemmer.stem("feelings").unwrap(), "feel");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, token: &str) -> Result<String> {
        let word = token.to_lowercase();
        if word.chars().count() <= 2 {
            return Ok(word);
        }
        let word = step_1a(word);
        let word = step_1b(word);
        let word = step_1c(word);
        let word = apply_first_rule(word, STEP2_RULES);
        let word = apply_first_rule(word, STEP3_RULES);
        let word = step_4(word);
        let word = step_5a(word);
        Ok(step_5b(word))
    }
}

/// Step 2 rewrites, longest suffix first so the most specific rule wins.
const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("ization", "ize"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("tional", "tion"),
    ("biliti", "ble"),
    ("entli", "ent"),
    ("ousli", "ous"),
    ("ation", "ate"),
    ("alism", "al"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("ator", "ate"),
    ("eli", "e"),
];

/// Step 3 rewrites, same ordering convention as step 2.
const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 deletions for words of measure greater than one. The `ion`
/// suffix is handled separately because it only drops after `s` or `t`.
const STEP4_SUFFIXES: &[&str] = &[
    "ement", "ance", "ence", "able", "ible", "ment", "ent", "ant", "ism", "ate", "iti", "ous",
    "ive", "ize", "al", "er", "ic", "ou",
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Number of vowel-run to consonant transitions, the Porter "measure".
///
/// `tr` and `ee` measure 0, `trouble` measures 1, `private` measures 2.
fn measure(word: &str) -> usize {
    let mut m = 0;
    let mut in_vowel_run = false;
    for c in word.chars() {
        if is_vowel(c) {
            in_vowel_run = true;
        } else if in_vowel_run {
            m += 1;
            in_vowel_run = false;
        }
    }
    m
}

fn has_vowel(word: &str) -> bool {
    word.chars().any(is_vowel)
}

/// True when the word ends in a doubled consonant ("tt", "ss", "pp").
fn ends_double_consonant(word: &str) -> bool {
    let mut rev = word.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), Some(prev)) => last == prev && !is_vowel(last),
        _ => false,
    }
}

/// True when the word ends consonant-vowel-consonant and the final
/// consonant is not `w`, `x`, or `y`.
fn ends_cvc(word: &str) -> bool {
    let mut rev = word.chars().rev();
    match (rev.next(), rev.next(), rev.next()) {
        (Some(last), Some(mid), Some(first)) => {
            !is_vowel(last) && is_vowel(mid) && !is_vowel(first) && !matches!(last, 'w' | 'x' | 'y')
        }
        _ => false,
    }
}

/// Plural removal: `sses` -> `ss`, `ies` -> `i`, bare `s` dropped.
fn step_1a(word: String) -> String {
    if word.ends_with("sses") || word.ends_with("ies") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") {
        let mut w = word;
        w.pop();
        w
    } else {
        word
    }
}

/// Past and progressive removal: `eed`, `ed`, `ing`.
fn step_1b(word: String) -> String {
    if let Some(stem) = word.strip_suffix("eed") {
        if measure(stem) > 0 {
            let mut w = word;
            w.pop();
            return w;
        }
        return word;
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if has_vowel(stem) {
            return fix_stripped_stem(stem.to_string());
        }
        return word;
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if has_vowel(stem) {
            return fix_stripped_stem(stem.to_string());
        }
    }
    word
}

/// After `ed`/`ing` removal the stem may need repair: restore a final
/// `e` ("skat" -> "skate"), or undo a doubled consonant ("hopp" ->
/// "hop") unless it ends in `l`, `s`, or `z`.
fn fix_stripped_stem(stem: String) -> String {
    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        let mut w = stem;
        w.push('e');
        w
    } else if ends_double_consonant(&stem) && !matches!(stem.chars().last(), Some('l' | 's' | 'z'))
    {
        let mut w = stem;
        w.pop();
        w
    } else if measure(&stem) == 1 && ends_cvc(&stem) {
        let mut w = stem;
        w.push('e');
        w
    } else {
        stem
    }
}

/// Terminal `y` becomes `i` when the stem still contains a vowel.
fn step_1c(word: String) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        if has_vowel(stem) {
            let mut w = stem.to_string();
            w.push('i');
            return w;
        }
    }
    word
}

/// Apply the first rule whose suffix matches, gated on the remaining
/// stem having measure greater than zero. A matched suffix ends the
/// step whether or not the gate passes.
fn apply_first_rule(word: String, rules: &[(&str, &str)]) -> String {
    for (suffix, replacement) in rules {
        if let Some(stem) = word.strip_suffix(suffix) {
            if measure(stem) > 0 {
                let mut w = stem.to_string();
                w.push_str(replacement);
                return w;
            }
            return word;
        }
    }
    word
}

/// Drop residual derivational suffixes from words of measure > 1.
fn step_4(word: String) -> String {
    if measure(&word) <= 1 {
        return word;
    }
    if let Some(stem) = word.strip_suffix("ion") {
        if stem.ends_with('s') || stem.ends_with('t') {
            return stem.to_string();
        }
        return word;
    }
    for suffix in STEP4_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            return stem.to_string();
        }
    }
    word
}

/// Drop a final `e` unless the stem is too short or ends in CVC.
fn step_5a(word: String) -> String {
    if !word.ends_with('e') {
        return word;
    }
    let stem = &word[..word.len() - 1];
    let m = measure(stem);
    if m > 1 || (m == 1 && !ends_cvc(stem)) {
        let mut w = word;
        w.pop();
        return w;
    }
    word
}

/// Collapse a final doubled `l` in longer words ("controll" -> "control").
fn step_5b(word: String) -> String {
    if measure(&word) > 1 && ends_double_consonant(&word) && word.ends_with('l') {
        let mut w = word;
        w.pop();
        return w;
    }
    word
}
