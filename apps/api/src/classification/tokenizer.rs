//! Word-index tokenizer compatible with Keras `Tokenizer.to_json()` output.
//!
//! Keras stores `word_index` as a JSON-encoded string inside `config`; a plain
//! object is accepted as well.

use std::collections::HashMap;

use serde::Deserialize;

use crate::classification::model::ModelError;

const KERAS_DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

#[derive(Debug, Deserialize)]
struct TokenizerJson {
    config: TokenizerJsonConfig,
}

#[derive(Debug, Deserialize)]
struct TokenizerJsonConfig {
    num_words: Option<usize>,
    #[serde(default = "default_filters")]
    filters: String,
    #[serde(default = "default_lower")]
    lower: bool,
    #[serde(default = "default_split")]
    split: String,
    oov_token: Option<String>,
    word_index: WordIndexField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordIndexField {
    Encoded(String),
    Map(HashMap<String, u32>),
}

fn default_filters() -> String {
    KERAS_DEFAULT_FILTERS.to_string()
}

fn default_lower() -> bool {
    true
}

fn default_split() -> String {
    " ".to_string()
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_index: HashMap<String, u32>,
    num_words: Option<usize>,
    filters: String,
    lower: bool,
    split: String,
    oov_index: Option<u32>,
}

impl Tokenizer {
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let parsed: TokenizerJson = serde_json::from_str(raw)?;
        let config = parsed.config;

        let word_index = match config.word_index {
            WordIndexField::Encoded(encoded) => serde_json::from_str(&encoded)?,
            WordIndexField::Map(map) => map,
        };
        if word_index.is_empty() {
            return Err(ModelError::Shape("tokenizer word_index is empty".to_string()));
        }

        let oov_index = config
            .oov_token
            .as_ref()
            .and_then(|token| word_index.get(token).copied());

        Ok(Self {
            word_index,
            num_words: config.num_words,
            filters: config.filters,
            lower: config.lower,
            split: if config.split.is_empty() {
                default_split()
            } else {
                config.split
            },
            oov_index,
        })
    }

    /// Splits text into words the way the tokenizer was fitted.
    fn words(&self, text: &str) -> Vec<String> {
        let text = if self.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let translated: String = text
            .chars()
            .map(|c| if self.filters.contains(c) { ' ' } else { c })
            .collect();
        translated
            .split(self.split.as_str())
            .flat_map(str::split_whitespace)
            .map(String::from)
            .collect()
    }

    /// Maps text to word indices. Unknown words, and words outside the
    /// `num_words` vocabulary, become the OOV index or are dropped.
    pub fn texts_to_sequence(&self, text: &str) -> Vec<u32> {
        self.words(text)
            .iter()
            .filter_map(|word| match self.word_index.get(word) {
                Some(&index) if self.num_words.map_or(true, |n| (index as usize) < n) => {
                    Some(index)
                }
                _ => self.oov_index,
            })
            .collect()
    }

    /// Fixed-shape model input: post-truncated and post-padded with zeros to `max_len`.
    pub fn encode(&self, text: &str, max_len: usize) -> Vec<f32> {
        let mut sequence: Vec<f32> = self
            .texts_to_sequence(text)
            .into_iter()
            .take(max_len)
            .map(|i| i as f32)
            .collect();
        sequence.resize(max_len, 0.0);
        sequence
    }
}
