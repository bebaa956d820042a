// src/services/catalog.rs
//! Built-in scenes and dictionary served by the stub backend.

use std::collections::HashMap;

use crate::message::{Scene, TranscriptLine, WordEntry};

#[derive(Debug, Clone)]
pub struct Catalog {
    scenes: Vec<Scene>,
    words: HashMap<String, WordEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(scenes: Vec<Scene>, words: Vec<WordEntry>) -> Self {
        let words = words
            .into_iter()
            .map(|w| (normalize(&w.word), w))
            .collect();
        Self { scenes, words }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_scenes(), builtin_words())
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Case-insensitive, Turkish-aware lookup.
    pub fn word(&self, word: &str) -> Option<&WordEntry> {
        self.words.get(&normalize(word))
    }
}

// Turkish dotted capital İ lowercases to i; std would give "i̇".
fn normalize(word: &str) -> String {
    word.trim()
        .chars()
        .flat_map(|c| match c {
            'İ' => vec!['i'],
            'I' => vec!['ı'],
            other => other.to_lowercase().collect(),
        })
        .collect()
}

fn line(text: &str, translation: &str) -> TranscriptLine {
    TranscriptLine {
        text: text.to_string(),
        translation: translation.to_string(),
    }
}

fn entry(word: &str, meaning: &str, pronunciation: &str, example: &str) -> WordEntry {
    WordEntry {
        word: word.to_string(),
        meaning: meaning.to_string(),
        pronunciation: pronunciation.to_string(),
        example: example.to_string(),
    }
}

fn builtin_scenes() -> Vec<Scene> {
    vec![
        Scene {
            id: "1".to_string(),
            title: "Family Dinner".to_string(),
            video_url: "/videos/family-dinner.mp4".to_string(),
            transcript: vec![
                line("Abla, yemek hazır mı?", "Sister, is dinner ready?"),
                line("Evet, hemen geliyorum.", "Yes, I'm coming right away."),
                line("Teşekkürler, çok güzel olmuş!", "Thanks, it turned out great!"),
            ],
        },
        Scene {
            id: "2".to_string(),
            title: "At the Market".to_string(),
            video_url: "/videos/market.mp4".to_string(),
            transcript: vec![
                line("Merhaba, domates var mı?", "Hello, are there tomatoes?"),
                line("Maalesef bugün yok.", "Unfortunately there are none today."),
            ],
        },
        Scene {
            id: "3".to_string(),
            title: "Meeting a Friend".to_string(),
            video_url: "/videos/friend.mp4".to_string(),
            transcript: vec![
                line("Selam! Nasılsın?", "Hi! How are you?"),
                line("İyiyim, sen nasılsın?", "I'm good, how are you?"),
            ],
        },
    ]
}

fn builtin_words() -> Vec<WordEntry> {
    vec![
        entry("abla", "older sister", "ahb-LAH", "Ablam İstanbul'da yaşıyor."),
        entry("merhaba", "hello", "mehr-hah-BAH", "Merhaba, nasılsın?"),
        entry("selam", "hi", "seh-LAHM", "Selam! Ne haber?"),
        entry("nasılsın", "how are you", "nah-SUHL-suhn", "Bugün nasılsın?"),
        entry("teşekkürler", "thank you", "teh-shek-kyur-LEHR", "Yardımın için teşekkürler."),
        entry("evet", "yes", "eh-VET", "Evet, geliyorum."),
        entry("hayır", "no", "hah-YUHR", "Hayır, istemiyorum."),
        entry("var", "there is / exists", "vahr", "Evde ekmek var."),
        entry("yok", "there is not / absent", "yohk", "Bugün domates yok."),
        entry("yemek", "food; to eat", "yeh-MEK", "Yemek hazır."),
        entry("iyiyim", "I'm fine", "ee-YEE-yeem", "Teşekkürler, iyiyim."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.word("Abla").unwrap().meaning, "older sister");
        assert_eq!(catalog.word("İYİYİM").unwrap().word, "iyiyim");
        assert!(catalog.word("bilgisayar").is_none());
    }

    #[test]
    fn builtin_scenes_have_transcripts() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.scenes().len(), 3);
        assert!(catalog.scenes().iter().all(|s| !s.transcript.is_empty()));
    }
}
