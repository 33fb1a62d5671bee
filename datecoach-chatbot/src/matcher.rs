use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::intent::{keyword_intent, Intent};
use crate::knowledge_base::{entries, find_entry, KnowledgeBaseEntry};

const MIN_SIGNIFICANT_WORD_LEN: usize = 3;
const MIN_SHARED_WORDS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Quick-reply payload or a message equal to an entry id.
    Payload,
    /// A keyword intent fired and an entry of its family matched.
    Keyword,
    Tag,
    WordOverlap,
    /// A keyword intent fired and nothing in its family matched.
    KeywordDefault,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntentMatch {
    pub intent: Intent,
    pub entry: &'static KnowledgeBaseEntry,
    pub source: MatchSource,
}

impl IntentMatch {
    fn new(entry: &'static KnowledgeBaseEntry, source: MatchSource) -> Self {
        Self {
            intent: entry.intent,
            entry,
            source,
        }
    }
}

/// Whole-word, case-insensitive tag patterns, one list per entry in
/// knowledge-base order.
fn tag_patterns() -> &'static [Vec<Regex>] {
    static PATTERNS: OnceLock<Vec<Vec<Regex>>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        entries()
            .iter()
            .map(|entry| {
                entry
                    .tags
                    .iter()
                    .filter_map(|tag| {
                        Regex::new(&format!(r"(?i)\b{}\b", regex::escape(tag))).ok()
                    })
                    .collect()
            })
            .collect()
    })
}

fn significant_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_SIGNIFICANT_WORD_LEN)
        .map(str::to_string)
        .collect()
}

enum EntryHit {
    Tag,
    WordOverlap,
}

fn entry_hit(
    index: usize,
    entry: &KnowledgeBaseEntry,
    message: &str,
    words: &HashSet<String>,
) -> Option<EntryHit> {
    let tag_hit = tag_patterns()
        .get(index)
        .is_some_and(|patterns| patterns.iter().any(|pattern| pattern.is_match(message)));
    if tag_hit {
        return Some(EntryHit::Tag);
    }

    let shared = significant_words(entry.question).intersection(words).count();
    (shared >= MIN_SHARED_WORDS).then_some(EntryHit::WordOverlap)
}

fn lookup(
    message: &str,
    family: Option<Intent>,
) -> Option<(&'static KnowledgeBaseEntry, EntryHit)> {
    let words = significant_words(message);
    entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| family.map_or(true, |intent| intent.same_family(entry.intent)))
        .find_map(|(index, entry)| entry_hit(index, entry, message, &words).map(|hit| (entry, hit)))
}

/// Classifies a message. `None` means no knowledge-base answer applies and
/// the caller should fall back to the language model.
pub fn match_intent(message: &str, payload: Option<&str>) -> Option<IntentMatch> {
    if let Some(entry) = payload.and_then(find_entry).or_else(|| find_entry(message)) {
        return Some(IntentMatch::new(entry, MatchSource::Payload));
    }

    let lowered = message.to_lowercase();
    if let Some(intent) = keyword_intent(&lowered) {
        if let Some((entry, _)) = lookup(&lowered, Some(intent)) {
            return Some(IntentMatch::new(entry, MatchSource::Keyword));
        }
        return intent
            .default_entry_id()
            .and_then(find_entry)
            .map(|entry| IntentMatch::new(entry, MatchSource::KeywordDefault));
    }

    lookup(&lowered, None).map(|(entry, hit)| {
        let source = match hit {
            EntryHit::Tag => MatchSource::Tag,
            EntryHit::WordOverlap => MatchSource::WordOverlap,
        };
        IntentMatch::new(entry, source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_words_drop_short_tokens_and_punctuation() {
        let words = significant_words("Is het LVB-vriendelijk?");
        assert!(words.contains("het"));
        assert!(words.contains("lvb"));
        assert!(words.contains("vriendelijk"));
        assert!(!words.contains("is"));
    }

    #[test]
    fn every_tag_compiles() {
        let total_tags: usize = entries().iter().map(|entry| entry.tags.len()).sum();
        let compiled: usize = tag_patterns().iter().map(Vec::len).sum();
        assert_eq!(compiled, total_tags);
    }
}
