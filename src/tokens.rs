//! Token estimation for the finished bundle.
//!
//! The `cl100k_base` encoding is loaded once per process and shared read-only.
//! If it cannot be loaded, counting degrades to zero instead of failing the run.

use once_cell::sync::Lazy;
use std::sync::Arc;
use tiktoken_rs::{cl100k_base, CoreBPE};
use tracing::{debug, trace, warn};

/// Inputs longer than this many bytes are tokenized chunk by chunk.
pub const TOKEN_CHUNK_SIZE: usize = 500_000;

pub enum Tokenizer {
    Ready(CoreBPE),
    Unavailable(String),
}

impl Tokenizer {
    pub fn load() -> Self {
        match cl100k_base() {
            Ok(bpe) => {
                debug!("Loaded cl100k_base tokenizer");
                Tokenizer::Ready(bpe)
            }
            Err(e) => {
                warn!("Failed to load tokenizer, token counts will be 0: {}", e);
                Tokenizer::Unavailable(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Tokenizer::Ready(_))
    }

    /// Number of tokens in `text`, or 0 when the tokenizer is unavailable.
    pub fn encode_count(&self, text: &str) -> usize {
        match self {
            Tokenizer::Ready(bpe) => bpe.encode_ordinary(text).len(),
            Tokenizer::Unavailable(_) => 0,
        }
    }
}

static TOKENIZER: Lazy<Arc<Tokenizer>> = Lazy::new(|| Arc::new(Tokenizer::load()));

pub fn shared_tokenizer() -> Arc<Tokenizer> {
    Arc::clone(&TOKENIZER)
}

/// Counts tokens in `text`, yielding to the runtime between chunks.
///
/// Chunk boundaries may split a token, so large inputs are an estimate.
pub async fn count_tokens(text: &str) -> usize {
    count_tokens_with(&shared_tokenizer(), text).await
}

pub async fn count_tokens_with(tokenizer: &Tokenizer, text: &str) -> usize {
    if text.is_empty() || !tokenizer.is_ready() {
        return 0;
    }
    if text.len() < TOKEN_CHUNK_SIZE {
        return tokenizer.encode_count(text);
    }

    let mut total = 0;
    for chunk in split_chunks(text, TOKEN_CHUNK_SIZE) {
        total += tokenizer.encode_count(chunk);
        trace!("Token chunk of {} bytes, running total {}", chunk.len(), total);
        tokio::task::yield_now().await;
    }
    total
}

/// Splits `text` into pieces of at most `chunk_size` bytes, never cutting a
/// UTF-8 character.
pub fn split_chunks(text: &str, chunk_size: usize) -> Vec<&str> {
    let chunk_size = chunk_size.max(4);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + chunk_size).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        chunks.push(&text[start..end]);
        start = end;
    }
    chunks
}
