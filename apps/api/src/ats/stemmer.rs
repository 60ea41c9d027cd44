//! Stemmer — rule-ordered suffix stripping that groups morphological variants.
//!
//! This is deliberately lighter than Porter: one pass over `SUFFIX_RULES`, first
//! match wins. Longer suffix classes must stay above the shorter ones they contain
//! (`-ization` above `-tion`, `-sses` above `-s`).

/// Words at or below this length are returned unchanged (acronyms like "css", "aws").
const MAX_UNSTEMMED_LEN: usize = 3;

/// A single suffix rule: strip `suffix`, append `replacement`, but only when at
/// least `min_stem` characters remain before the suffix.
struct SuffixRule {
    suffix: &'static str,
    replacement: &'static str,
    min_stem: usize,
}

const fn rule(suffix: &'static str, replacement: &'static str, min_stem: usize) -> SuffixRule {
    SuffixRule {
        suffix,
        replacement,
        min_stem,
    }
}

/// Priority-ordered. Evaluated top to bottom; the first applicable rule wins.
const SUFFIX_RULES: &[SuffixRule] = &[
    rule("izations", "ize", 3),
    rule("ization", "ize", 3),
    rule("isation", "ise", 3),
    rule("ational", "ate", 3),
    rule("fulness", "ful", 3),
    rule("iveness", "ive", 3),
    rule("ousness", "ous", 3),
    rule("ations", "ate", 3),
    rule("ation", "ate", 3),
    rule("ments", "", 3),
    rule("ment", "", 3),
    rule("nesses", "", 3),
    rule("ness", "", 3),
    rule("tions", "t", 3),
    rule("tion", "t", 3),
    rule("ities", "", 3),
    rule("ity", "", 3),
    rule("ings", "", 3),
    rule("ing", "", 3),
    rule("ies", "y", 3),
    rule("ied", "y", 3),
    rule("ed", "", 3),
    rule("ly", "", 4),
    rule("sses", "ss", 2),
    rule("xes", "x", 2),
    rule("ches", "ch", 2),
    rule("shes", "sh", 2),
    rule("s", "", 3),
];

/// Reduces a word to an approximate root form.
///
/// Lowercases the input. Short words and tokens carrying non-letters
/// ("c++", "node.js", "ci/cd") come back lowercased but otherwise untouched.
pub fn stem(word: &str) -> String {
    let lower = word.trim().to_lowercase();
    if lower.chars().count() <= MAX_UNSTEMMED_LEN
        || !lower.chars().all(|c| c.is_ascii_alphabetic())
    {
        return lower;
    }

    for rule in SUFFIX_RULES {
        let Some(base) = lower.strip_suffix(rule.suffix) else {
            continue;
        };
        if base.len() < rule.min_stem {
            continue;
        }
        // Plural "-s" never applies to "-ss", "-us", "-is" endings (process, status, analysis).
        if rule.suffix == "s" && (base.ends_with('s') || base.ends_with('u') || base.ends_with('i'))
        {
            continue;
        }

        let mut stemmed = format!("{base}{}", rule.replacement);
        if matches!(rule.suffix, "ing" | "ings" | "ed") {
            undouble_final_consonant(&mut stemmed);
        }
        return drop_trailing_e(stemmed);
    }

    drop_trailing_e(lower)
}

/// "plann" → "plan", "runn" → "run". Leaves l/s/z doubles alone (install, process, buzz).
fn undouble_final_consonant(stem: &mut String) {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n < 3 {
        return;
    }
    let (a, b) = (bytes[n - 2], bytes[n - 1]);
    if a == b && !b"aeiouylsz".contains(&b) {
        stem.pop();
    }
}

/// "manage" and "managed" must land on the same root, so a final silent `e` is dropped.
fn drop_trailing_e(mut stem: String) -> String {
    if stem.len() > 4 && stem.ends_with('e') {
        stem.pop();
    }
    stem
}
