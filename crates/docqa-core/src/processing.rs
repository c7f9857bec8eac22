pub mod chunk;

pub use chunk::{word_count, SentenceChunker, Sentences, TextChunks, DEFAULT_MAX_WORDS};
