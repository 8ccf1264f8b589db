//! # copydeck-ai
//!
//! Chat-completion provider for CopyDeck. Speaks the OpenAI Chat
//! Completions API and implements [`copydeck_core::traits::CompletionProvider`].

pub mod openai;

pub use openai::OpenAiProvider;
