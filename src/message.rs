// src/message.rs
use serde::{Deserialize, Serialize};

/// Body of `POST /api/tutor`. `session_id` is sent as `null` until the
/// backend has assigned one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorRequest {
    pub question: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorResponse {
    pub answer: String,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub text: String,
    pub translation: String,
}

impl TranscriptLine {
    /// Clickable tokens of the line: the word as displayed and the key used
    /// for dictionary lookup.
    pub fn words(&self) -> impl Iterator<Item = (&str, String)> {
        self.text
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(|w| (w, lookup_key(w)))
    }
}

/// Strips the punctuation a transcript token may carry before lookup.
pub fn lookup_key(token: &str) -> String {
    token.chars().filter(|c| !matches!(c, '.' | ',' | '!' | '?')).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub video_url: String,
    pub transcript: Vec<TranscriptLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenesResponse {
    pub scenes: Vec<Scene>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub meaning: String,
    pub pronunciation: String,
    pub example: String,
}

impl WordEntry {
    /// Placeholder shown when a lookup fails for any reason.
    pub fn not_found(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: "Word not found in dictionary".to_string(),
            pronunciation: "N/A".to_string(),
            example: "N/A".to_string(),
        }
    }
}
