// src/services/responder.rs
//! Rule-based tutor replies for the stub backend.

use super::{catalog::Catalog, session_manager::Turn};
use crate::session::Role;

#[derive(Debug, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Meaning(String),
    Translate(String),
    Grammar,
    Unknown,
}

pub fn detect_intent(question: &str) -> Intent {
    let lower = question.to_lowercase();

    if let Some(word) = quoted(question).filter(|_| lower.contains("mean")) {
        Intent::Meaning(word)
    } else if let Some(phrase) = quoted(question).filter(|_| lower.contains("how do you say")) {
        Intent::Translate(phrase)
    } else if ["merhaba", "selam", "hello", "hi"]
        .iter()
        .any(|g| lower.split(|c: char| !c.is_alphanumeric()).any(|w| w == *g))
    {
        Intent::Greeting
    } else if ["grammar", "sentence", "structure", "suffix", "difference"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Intent::Grammar
    } else {
        Intent::Unknown
    }
}

// Text between the first pair of single or double quotes.
fn quoted(text: &str) -> Option<String> {
    let start = text.find(['\'', '"'])?;
    let quote = text[start..].chars().next()?;
    let rest = &text[start + 1..];
    let end = rest.find(quote)?;
    let inner = rest[..end].trim();
    (!inner.is_empty()).then(|| inner.to_string())
}

pub fn generate_answer(history: &[Turn], question: &str, catalog: &Catalog) -> String {
    let earlier_questions = history
        .iter()
        .filter(|t| t.role == Role::User)
        .count()
        .saturating_sub(1);

    match detect_intent(question) {
        Intent::Greeting if earlier_questions == 0 => {
            "Merhaba! What would you like to learn today?".to_string()
        }
        Intent::Greeting => "Merhaba again! Ask me about a word or a grammar point.".to_string(),

        Intent::Meaning(word) => match catalog.word(&word) {
            Some(entry) => format!(
                "'{}' means \"{}\" (pronounced {}). Example: {}",
                entry.word, entry.meaning, entry.pronunciation, entry.example
            ),
            None => format!("I don't know '{word}' yet. Try another word from the scenes."),
        },

        Intent::Translate(phrase) => match translate(&phrase) {
            Some(turkish) => format!("You can say \"{turkish}\"."),
            None => format!("I'm not sure how to say '{phrase}' yet."),
        },

        Intent::Grammar => "Turkish is usually subject-object-verb, and meaning is built by \
             adding suffixes to a root. 'Var' says something exists, 'yok' says it does not."
            .to_string(),

        Intent::Unknown => format!(
            "Good question! I can explain Turkish words, grammar, and pronunciation. You asked: {question}"
        ),
    }
}

fn translate(phrase: &str) -> Option<&'static str> {
    match phrase.to_lowercase().as_str() {
        "thank you" | "thanks" => Some("Teşekkürler"),
        "hello" | "hi" => Some("Merhaba"),
        "how are you" => Some("Nasılsın?"),
        "yes" => Some("Evet"),
        "no" => Some("Hayır"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_text() {
        assert_eq!(quoted("What does 'abla' mean?").as_deref(), Some("abla"));
        assert_eq!(quoted("say \"thank you\"").as_deref(), Some("thank you"));
        assert_eq!(quoted("no quotes"), None);
        assert_eq!(quoted("empty '' quotes"), None);
    }
}
