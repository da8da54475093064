//! Google Translate web speech backend.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://translate.google.com/_/TranslateWebserverUi/data/batchexecute`
//! - Body: form field `f.req` holding the `jQ1olc` RPC envelope
//! - Response: `)]}'`-prefixed JSON lines; the line carrying `jQ1olc` holds
//!   base64 MP3 (24 kHz mono)
//! - Limit: 100 characters per request, so text is chunked and the MP3
//!   streams are concatenated

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::{Bytes, BytesMut};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;

use super::base::{
    SpeechSynthesizer, SynthesisError, SynthesisResult, SynthesizedAudio, SynthesizerConfig,
};

/// Default host for the web speech RPC.
pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.google.com";

/// Path of the batch RPC endpoint below the host.
pub const BATCHEXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Maximum characters per RPC.
pub const GOOGLE_TTS_MAX_CHARS: usize = 100;

const RPC_ID: &str = "jQ1olc";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static AUDIO_PAYLOAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"jQ1olc","\[\\"(.*)\\"]"#).expect("audio payload pattern is valid"));

/// Characters a chunk may be split after.
const BREAK_PUNCTUATION: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\n', '¡', '¿', '…', '。', '！', '？', '，', '、', '；', '：',
];

/// Speech backend that drives Google Translate's read-aloud RPC.
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    url: String,
}

impl GoogleTranslateTts {
    pub fn new(config: &SynthesizerConfig) -> SynthesisResult<Self> {
        let base = config
            .endpoint
            .as_deref()
            .unwrap_or(GOOGLE_TRANSLATE_URL)
            .trim_end_matches('/');
        let url = format!("{base}{BATCHEXECUTE_PATH}");
        url::Url::parse(&url).map_err(|e| {
            SynthesisError::InvalidConfiguration(format!("Invalid Google TTS URL '{url}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                SynthesisError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn synthesize_chunk(&self, chunk: &str, language: &str, slow: bool) -> SynthesisResult<Bytes> {
        let response = self
            .client
            .post(&self.url)
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=utf-8",
            )
            .body(build_request_body(chunk, language, slow))
            .send()
            .await
            .map_err(|e| SynthesisError::Unavailable(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Unavailable(format!(
                "HTTP {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SynthesisError::Unavailable(format!("Failed to read response: {e}")))?;
        extract_audio(&body)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        slow: bool,
    ) -> SynthesisResult<SynthesizedAudio> {
        let chunks = split_text(text, GOOGLE_TTS_MAX_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyAudio(
                "text has nothing to speak".to_string(),
            ));
        }

        let mut audio = BytesMut::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let bytes = self.synthesize_chunk(chunk, language, slow).await?;
            debug!(index, chars = chunk.chars().count(), bytes = bytes.len(), "Google TTS chunk");
            audio.extend_from_slice(&bytes);
        }

        Ok(SynthesizedAudio::mp3(audio.freeze()))
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// Builds the urlencoded `f.req` form body for one chunk.
pub fn build_request_body(text: &str, language: &str, slow: bool) -> String {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = json!([text, language, speed, "null"]).to_string();
    let rpc = json!([[[RPC_ID, parameter, Value::Null, "generic"]]]).to_string();
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("f.req", &rpc)
        .finish()
}

/// Pulls the MP3 bytes out of a batch RPC response.
pub fn extract_audio(body: &str) -> SynthesisResult<Bytes> {
    let line = body
        .lines()
        .find(|line| line.contains(RPC_ID))
        .ok_or_else(|| SynthesisError::Unavailable("Response has no audio RPC line".to_string()))?;

    let encoded = AUDIO_PAYLOAD
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            SynthesisError::EmptyAudio("Audio RPC line carries no payload".to_string())
        })?;

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|e| SynthesisError::Unavailable(format!("Audio payload is not base64: {e}")))?;
    Ok(Bytes::from(decoded))
}

/// Splits text into speakable chunks of at most `max_chars` characters.
///
/// Splits happen after punctuation, then at whitespace, and as a last resort
/// inside a word. Adjacent short pieces are merged. Pieces with no
/// alphanumeric content are dropped.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pieces: Vec<String> = Vec::new();

    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if BREAK_PUNCTUATION.contains(&ch) {
            push_piece(&mut pieces, &current, max_chars);
            current.clear();
        }
    }
    push_piece(&mut pieces, &current, max_chars);

    merge_pieces(pieces, max_chars)
}

fn push_piece(pieces: &mut Vec<String>, raw: &str, max_chars: usize) {
    let piece = raw.trim();
    if !piece.chars().any(char::is_alphanumeric) {
        return;
    }
    if piece.chars().count() <= max_chars {
        pieces.push(piece.to_string());
        return;
    }

    let mut line = String::new();
    for word in piece.split_whitespace() {
        let word_len = word.chars().count();
        let line_len = line.chars().count();

        if word_len > max_chars {
            if !line.is_empty() {
                pieces.push(std::mem::take(&mut line));
            }
            let chars: Vec<char> = word.chars().collect();
            for part in chars.chunks(max_chars) {
                pieces.push(part.iter().collect());
            }
            continue;
        }

        if line.is_empty() {
            line.push_str(word);
        } else if line_len + 1 + word_len <= max_chars {
            line.push(' ');
            line.push_str(word);
        } else {
            pieces.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        pieces.push(line);
    }
}

fn merge_pieces(pieces: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match merged.last_mut() {
            Some(last) if last.chars().count() + 1 + piece.chars().count() <= max_chars => {
                last.push(' ');
                last.push_str(&piece);
            }
            _ => merged.push(piece),
        }
    }
    merged
}
