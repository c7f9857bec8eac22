use std::iter::Peekable;

use unicode_segmentation::{USentenceBounds, UnicodeSegmentation};

use crate::error::{DocqaError, Result};

/// Default word budget per chunk
pub const DEFAULT_MAX_WORDS: usize = 200;

/// Count words as runs of non-whitespace characters
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits text into sentence-bounded chunks under a word budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceChunker {
    /// Maximum words per chunk
    max_words: usize,
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self { max_words: DEFAULT_MAX_WORDS }
    }
}

impl SentenceChunker {
    pub fn new(max_words: usize) -> Result<Self> {
        if max_words == 0 {
            return Err(DocqaError::ConfigInvalid {
                key: "chunking.max_words".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Self { max_words })
    }

    /// Iterate the trimmed, non-empty sentences of `text` in order
    pub fn sentences<'a>(&self, text: &'a str) -> Sentences<'a> {
        Sentences::new(text)
    }

    /// Iterate the chunks of `text` in order.
    ///
    /// Sentences are never split. A sentence longer than the budget is
    /// emitted as a chunk of its own.
    pub fn chunks<'a>(&self, text: &'a str) -> TextChunks<'a> {
        TextChunks {
            sentences: Sentences::new(text).peekable(),
            max_words: self.max_words,
        }
    }
}

/// Sentence iterator over UAX #29 sentence boundaries
pub struct Sentences<'a> {
    bounds: USentenceBounds<'a>,
}

impl<'a> Sentences<'a> {
    fn new(text: &'a str) -> Self {
        Self { bounds: text.split_sentence_bounds() }
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.bounds.by_ref().map(str::trim).find(|s| !s.is_empty())
    }
}

/// Chunk iterator produced by [`SentenceChunker::chunks`]
pub struct TextChunks<'a> {
    sentences: Peekable<Sentences<'a>>,
    max_words: usize,
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = String::new();
        let mut words = 0;

        while let Some(sentence) = self.sentences.peek() {
            let sentence_words = word_count(sentence);

            if !chunk.is_empty() && words + sentence_words > self.max_words {
                break;
            }

            if !chunk.is_empty() {
                chunk.push(' ');
            }
            chunk.push_str(sentence);
            words += sentence_words;
            self.sentences.next();
        }

        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunker_default() {
        let chunker = SentenceChunker::default();
        assert_eq!(chunker, SentenceChunker::new(200).unwrap());
    }

    #[test]
    fn test_chunker_rejects_zero_budget() {
        assert!(SentenceChunker::new(0).is_err());
    }

    #[test]
    fn test_sentences_are_trimmed() {
        let chunker = SentenceChunker::default();
        let sentences: Vec<&str> =
            chunker.sentences("  First one here.   Second one!  Third?").collect();

        assert_eq!(sentences, vec!["First one here.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_two_short_sentences_make_one_chunk() {
        let chunker = SentenceChunker::default();
        let text = "The cat sat on the mat. It was very happy.";
        assert_eq!(word_count(text), 10);

        let chunks: Vec<String> = chunker.chunks(text).collect();

        assert_eq!(chunks, vec![text.to_string()]);
    }

    #[test]
    fn test_chunk_text_empty() {
        let chunker = SentenceChunker::default();
        assert_eq!(chunker.chunks("").count(), 0);
        assert_eq!(chunker.chunks("   \n\t ").count(), 0);
    }

    #[test]
    fn test_budget_splits_between_sentences() {
        let chunker = SentenceChunker::new(5).unwrap();
        let text = "One two three. Four five six. Seven eight.";

        let chunks: Vec<String> = chunker.chunks(text).collect();

        assert_eq!(
            chunks,
            vec!["One two three.".to_string(), "Four five six. Seven eight.".to_string()]
        );
    }

    #[test]
    fn test_oversized_sentence_is_kept_whole() {
        let chunker = SentenceChunker::new(3).unwrap();
        let text = "Short. This sentence has far more than three words. Tail end.";

        let chunks: Vec<String> = chunker.chunks(text).collect();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "Short.");
        assert_eq!(chunks[1], "This sentence has far more than three words.");
        assert_eq!(chunks[2], "Tail end.");
    }

    #[test]
    fn test_oversized_first_sentence_has_no_empty_chunk_before_it() {
        let chunker = SentenceChunker::new(2).unwrap();
        let chunks: Vec<String> = chunker.chunks("Four words right here.").collect();

        assert_eq!(chunks, vec!["Four words right here.".to_string()]);
    }

    #[test]
    fn test_newlines_end_sentences() {
        let chunker = SentenceChunker::new(3).unwrap();
        let chunks: Vec<String> = chunker.chunks("Heading line\nBody text follows here.").collect();

        assert_eq!(chunks, vec!["Heading line".to_string(), "Body text follows here.".to_string()]);
    }

    #[test]
    fn test_chunks_iterator_is_consumed() {
        let chunker = SentenceChunker::new(2).unwrap();
        let mut chunks = chunker.chunks("A b. C d.");

        assert_eq!(chunks.next().as_deref(), Some("A b."));
        assert_eq!(chunks.next().as_deref(), Some("C d."));
        assert_eq!(chunks.next(), None);
        assert_eq!(chunks.next(), None);
    }
}
