//! Lightweight text utilities shared by the model backends.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}][\p{L}\p{N}'\-]*").expect("valid regex"));

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid regex"));

/// English stop words, the same closed-class list used for keyphrase candidates.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "almost", "also", "am", "an",
        "and", "any", "are", "around", "as", "at", "be", "because", "been", "before", "being",
        "below", "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does",
        "doing", "done", "down", "during", "each", "either", "else", "enough", "etc", "even",
        "ever", "every", "few", "for", "from", "further", "get", "got", "had", "has", "have",
        "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
        "however", "i", "i'm", "if", "in", "into", "is", "it", "it's", "its", "itself", "just",
        "last", "least", "less", "may", "me", "might", "mine", "more", "most", "much", "must",
        "my", "myself", "neither", "never", "no", "nor", "not", "now", "of", "off", "often", "on",
        "once", "only", "or", "other", "otherwise", "our", "ours", "ourselves", "out", "over",
        "own", "per", "perhaps", "please", "quite", "rather", "really", "same", "see", "seem",
        "seemed", "seems", "she", "should", "since", "so", "some", "still", "such", "than", "that",
        "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "though", "through", "thus", "to", "too", "under", "until", "up", "upon", "us",
        "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "where",
        "whether", "which", "while", "who", "whom", "whose", "why", "will", "with", "within",
        "without", "would", "yes", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Split free text into coarse sentences, keeping terminal punctuation.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    for line in text.lines() {
        let mut start = 0;
        for boundary in SENTENCE_END.find_iter(line) {
            push_trimmed(&mut sentences, &line[start..boundary.end()]);
            start = boundary.end();
        }
        push_trimmed(&mut sentences, &line[start..]);
    }
    sentences
}

fn push_trimmed(out: &mut Vec<String>, segment: &str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment.to_string());
    }
}

/// Lowercased word tokens in reading order.
pub fn words(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}
