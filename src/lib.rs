//! Client for the public Google Translate web endpoint
//!
//! The endpoint is unofficial: every request must carry a signed token
//! derived from the request text and a rotating secret pair, and the
//! response is a deeply nested, loosely-typed JSON array whose meaning
//! depends entirely on element position. This crate covers both ends:
//!
//! 1. **Token generation** ([`token`]) - the bit-manipulation hash that
//!    signs outgoing text so the endpoint accepts the request.
//! 2. **Positional response decoding** ([`decode`]) - a defensive walk of
//!    the untyped response array into a typed [`TranslationResult`], where
//!    any single missing or mistyped position degrades to a zero value
//!    instead of failing the whole parse.
//!
//! [`client::GoogleTranslateClient`] ties them together over reqwest.
//!
//! # Example
//!
//! ```ignore
//! use gtranslate::GoogleTranslateClient;
//! use icu_locale::Locale;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GoogleTranslateClient::new()?;
//!     let target: Locale = "fa".parse()?;
//!
//!     // None means: let the endpoint detect the source language.
//!     let result = client.translate("Hello, world!", None, &target).await?;
//!
//!     println!("{} ({})", result.translation, result.source_language);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod decode;
pub mod error;
pub mod model;
pub mod token;

pub use client::GoogleTranslateClient;
pub use decode::decode_response;
pub use error::{TranslateError, TranslateResult};
pub use model::{
    AlternateForm, AlternateTranslation, Definition, Equivalent, Sentence, SynonymGroup,
    TranslationResult, WordDefinition, WordSynonym, WordTranslation,
};
pub use token::{SIGNING_SECRET, calculate_token, generate_token};
