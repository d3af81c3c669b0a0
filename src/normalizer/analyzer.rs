//! Keyword heuristics over article text.
//!
//! Nothing here is NLP: tags and sentiment are plain case-insensitive
//! substring checks against fixed word lists.

use crate::domain::Sentiment;

pub const WORDS_PER_MINUTE: usize = 200;
pub const MAX_TAGS: usize = 5;

pub const TAG_VOCABULARY: [&str; 31] = [
    "trending",
    "viral",
    "popular",
    "news",
    "technology",
    "AI",
    "artificial intelligence",
    "social media",
    "entertainment",
    "politics",
    "science",
    "health",
    "business",
    "sports",
    "gaming",
    "music",
    "movies",
    "television",
    "fashion",
    "food",
    "travel",
    "education",
    "environment",
    "climate",
    "space",
    "robotics",
    "blockchain",
    "cryptocurrency",
    "startup",
    "innovation",
    "research",
];

pub const POSITIVE_WORDS: [&str; 15] = [
    "good",
    "great",
    "amazing",
    "awesome",
    "excellent",
    "wonderful",
    "fantastic",
    "brilliant",
    "innovative",
    "breakthrough",
    "success",
    "win",
    "love",
    "happy",
    "excited",
];

pub const NEGATIVE_WORDS: [&str; 14] = [
    "bad",
    "terrible",
    "awful",
    "horrible",
    "disaster",
    "fail",
    "problem",
    "issue",
    "concern",
    "worry",
    "hate",
    "angry",
    "sad",
    "disappointed",
];

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn reading_time_minutes(word_count: usize) -> u32 {
    let minutes = word_count.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Vocabulary entries found in `text`, in vocabulary order, at most [`MAX_TAGS`].
pub fn extract_tags(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    TAG_VOCABULARY
        .iter()
        .filter(|tag| haystack.contains(&tag.to_lowercase()))
        .take(MAX_TAGS)
        .map(|tag| tag.to_string())
        .collect()
}

/// Compares how many positive and negative keywords appear; ties are neutral.
pub fn sentiment(text: &str) -> Sentiment {
    let haystack = text.to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| haystack.contains(*w)).count();

    let positive = count(&POSITIVE_WORDS);
    let negative = count(&NEGATIVE_WORDS);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
