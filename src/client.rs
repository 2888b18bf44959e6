//! HTTP client for the translation endpoint
//!
//! Wraps request signing, query construction and transport for the two
//! endpoint variants: single-text translation (decoded into a
//! [`TranslationResult`]) and batch translation (fetch-only, the raw body
//! is returned as-is).
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
//!     let target: Locale = "fr".parse()?;
//!     let result = client.translate("Hello, world!", None, &target).await?;
//!     println!("{}", result.translation);
//!     Ok(())
//! }
//! ```

use crate::decode::decode_response;
use crate::error::{TranslateError, TranslateResult};
use crate::model::TranslationResult;
use crate::token::generate_token;
use icu_locale::Locale;
use reqwest::Url;
use std::time::Duration;

const TRANSLATE_URL: &str = "https://translate.google.com/translate_a/single";
const BATCH_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/t";

/// The endpoint only answers web-browser user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.5 Safari/605.1.15";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Optional response sections requested via the repeated `dt` parameter.
const RESPONSE_SECTIONS: [&str; 10] = ["at", "bd", "ex", "ld", "md", "qca", "rw", "rm", "ss", "t"];

/// Client for the public translation endpoint.
///
/// Holds one pooled `reqwest::Client` with the fixed user agent and a
/// 10-second timeout. Cheap to clone; safe to share across tasks. All
/// request futures are cancellable by dropping them, so a caller-side
/// deadline (`tokio::time::timeout`) composes naturally.
#[derive(Debug, Clone)]
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    translate_url: String,
    batch_url: String,
}

impl GoogleTranslateClient {
    /// Create a client against the production endpoints.
    pub fn new() -> TranslateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TranslateError::Request(format!("failed to create HTTP client: {}", e)))?;

        Ok(GoogleTranslateClient {
            client,
            translate_url: TRANSLATE_URL.to_string(),
            batch_url: BATCH_TRANSLATE_URL.to_string(),
        })
    }

    /// Create a client against explicit endpoint URLs.
    ///
    /// Intended for tests pointing at a local stub server.
    pub fn with_endpoints(translate_url: &str, batch_url: &str) -> TranslateResult<Self> {
        let mut client = Self::new()?;
        client.translate_url = translate_url.to_string();
        client.batch_url = batch_url.to_string();
        Ok(client)
    }

    /// Translate a single piece of content.
    ///
    /// `source_language = None` asks the endpoint to auto-detect; the
    /// detected language comes back in
    /// [`TranslationResult::source_language`]. The request is signed with
    /// the process-wide secret.
    pub async fn translate(
        &self,
        content: &str,
        source_language: Option<&Locale>,
        target_language: &Locale,
    ) -> TranslateResult<TranslationResult> {
        let source = source_language
            .map(ToString::to_string)
            .unwrap_or_else(|| "auto".to_string());
        let target = target_language.to_string();
        let token = generate_token(content);

        let url = build_url(
            &self.translate_url,
            &[
                ("client", "gtx"),
                ("sl", &source),
                ("tl", &target),
                ("hl", &target),
                ("ie", "UTF-8"),
                ("oe", "UTF-8"),
                ("otf", "1"),
                ("ssel", "0"),
                ("tsel", "0"),
                ("kc", "7"),
                ("q", content),
                ("tk", &token),
            ],
        )?;

        let body = self.fetch(self.client.get(url)).await?;
        decode_response(&body)
    }

    /// Translate a batch of contents through the batch endpoint variant.
    ///
    /// Each segment is wrapped as `<pre><a i="N">text</a></pre>` and the
    /// token signs the concatenation of the wrapped segments. The response
    /// body is returned raw; the batch variant has no positional decoder.
    pub async fn translate_batch(
        &self,
        contents: &[String],
        source_language: &Locale,
        target_language: &Locale,
    ) -> TranslateResult<String> {
        let segments = encode_batch_segments(contents);
        let token = generate_token(&segments.concat());

        let url = build_url(
            &self.batch_url,
            &[
                ("anno", "3"),
                ("client", "te"),
                ("v", "1.0"),
                ("format", "html"),
                ("sl", &source_language.to_string()),
                ("tl", &target_language.to_string()),
                ("tk", &token),
            ],
        )?;

        let body = segments
            .iter()
            .map(|segment| format!("q={}", segment))
            .collect::<Vec<_>>()
            .join("&");

        let bytes = self.fetch(self.client.post(url).body(body)).await?;
        String::from_utf8(bytes).map_err(|e| {
            TranslateError::MalformedPayload(format!("batch response is not UTF-8: {}", e))
        })
    }

    /// Send a request and return the body, surfacing non-200 as an error.
    async fn fetch(&self, request: reqwest::RequestBuilder) -> TranslateResult<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TranslateError::Transport(format!(
                "translate endpoint returned {}: {}",
                status, body
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Build an endpoint URL from fixed parameters plus the repeated `dt`
/// section selectors.
fn build_url(base: &str, params: &[(&str, &str)]) -> TranslateResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| TranslateError::Request(format!("invalid endpoint URL {}: {}", base, e)))?;
    {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
        for section in RESPONSE_SECTIONS {
            query.append_pair("dt", section);
        }
    }
    Ok(url)
}

/// Wrap batch segments in the HTML envelope the batch endpoint expects.
fn encode_batch_segments(contents: &[String]) -> Vec<String> {
    contents
        .iter()
        .enumerate()
        .map(|(i, text)| format!("<pre><a i=\"{}\">{}</a></pre>", i, text))
        .collect()
}
