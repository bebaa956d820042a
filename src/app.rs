// src/app.rs
//! Composition root: the state the front end used to keep in globals.

use std::sync::Arc;

use tracing::{error, warn};

use crate::{
    client::Backend,
    message::{Scene, WordEntry, lookup_key},
    session::Session,
    tutor::{GREETING, TutorConversation},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Tutor,
    Store,
    VisitTurkey,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Tutor, Tab::Store, Tab::VisitTurkey];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Tutor => "Tulu Tutor",
            Self::Store => "Tulu Store",
            Self::VisitTurkey => "Visit Turkey",
        }
    }

    /// Store and travel are "coming soon" screens with no behavior.
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Store | Self::VisitTurkey)
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.title() == title)
    }
}

/// Scene browser and word popup.
#[derive(Debug, Default)]
pub struct HomeState {
    scenes: Vec<Scene>,
    selected_scene: Option<String>,
    selected_word: Option<WordEntry>,
    loading: bool,
}

impl HomeState {
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn selected_scene(&self) -> Option<&Scene> {
        let id = self.selected_scene.as_deref()?;
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn selected_word(&self) -> Option<&WordEntry> {
        self.selected_word.as_ref()
    }

    /// Returns false when no scene has that id.
    pub fn select_scene(&mut self, id: &str) -> bool {
        if self.scenes.iter().any(|s| s.id == id) {
            self.selected_scene = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn close_word(&mut self) {
        self.selected_word = None;
    }
}

pub struct App {
    backend: Arc<dyn Backend>,
    tab: Tab,
    home: HomeState,
    tutor: TutorConversation,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let tutor = TutorConversation::with_session(backend.clone(), Session::with_greeting(GREETING));
        Self {
            backend,
            tab: Tab::default(),
            home: HomeState {
                loading: true,
                ..HomeState::default()
            },
            tutor,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut HomeState {
        &mut self.home
    }

    pub fn tutor(&self) -> &TutorConversation {
        &self.tutor
    }

    /// Fetch the catalog and select its first scene. A failed fetch leaves
    /// the list empty.
    pub async fn load_scenes(&mut self) {
        match self.backend.fetch_scenes().await {
            Ok(scenes) => {
                self.home.selected_scene = scenes.first().map(|s| s.id.clone());
                self.home.scenes = scenes;
            }
            Err(err) => error!(kind = %err.kind(), error = %err, "failed to fetch scenes"),
        }
        self.home.loading = false;
    }

    /// Look up a clicked transcript token. Any failure yields the
    /// not-found placeholder.
    pub async fn open_word(&mut self, token: &str) -> &WordEntry {
        let word = lookup_key(token);
        let entry = match self.backend.lookup_word(&word).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%word, kind = %err.kind(), "word lookup failed");
                WordEntry::not_found(word)
            }
        };
        self.home.selected_word.insert(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::BackendError,
        message::{TranscriptLine, TutorRequest, TutorResponse},
    };
    use async_trait::async_trait;

    struct Catalog {
        scenes: Option<Vec<Scene>>,
    }

    #[async_trait]
    impl Backend for Catalog {
        async fn ask_tutor(&self, _: &TutorRequest) -> Result<TutorResponse, BackendError> {
            Err(BackendError::Timeout)
        }

        async fn fetch_scenes(&self) -> Result<Vec<Scene>, BackendError> {
            self.scenes
                .clone()
                .ok_or(BackendError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
        }

        async fn lookup_word(&self, word: &str) -> Result<WordEntry, BackendError> {
            if word == "abla" {
                Ok(WordEntry {
                    word: "abla".into(),
                    meaning: "older sister".into(),
                    pronunciation: "ahb-lah".into(),
                    example: "Ablam İstanbul'da yaşıyor.".into(),
                })
            } else {
                Err(BackendError::Status(reqwest::StatusCode::NOT_FOUND))
            }
        }
    }

    fn scene(id: &str) -> Scene {
        Scene {
            id: id.into(),
            title: format!("Scene {id}"),
            video_url: format!("https://videos.example/{id}.mp4"),
            transcript: vec![TranscriptLine {
                text: "Abla, geldin mi?".into(),
                translation: "Sister, did you come?".into(),
            }],
        }
    }

    #[test]
    fn tabs_round_trip_titles() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_title(tab.title()), Some(tab));
        }
        assert!(Tab::Store.is_placeholder());
        assert!(!Tab::Tutor.is_placeholder());
    }

    #[tokio::test]
    async fn first_scene_selected_by_default() {
        let mut app = App::new(Arc::new(Catalog {
            scenes: Some(vec![scene("1"), scene("2")]),
        }));
        assert!(app.home().is_loading());
        app.load_scenes().await;

        assert!(!app.home().is_loading());
        assert_eq!(app.home().selected_scene().map(|s| s.id.as_str()), Some("1"));
        assert!(app.home_mut().select_scene("2"));
        assert!(!app.home_mut().select_scene("9"));
        assert_eq!(app.home().selected_scene().map(|s| s.id.as_str()), Some("2"));
    }

    #[tokio::test]
    async fn failed_scene_fetch_leaves_empty_list() {
        let mut app = App::new(Arc::new(Catalog { scenes: None }));
        app.load_scenes().await;

        assert!(!app.home().is_loading());
        assert!(app.home().scenes().is_empty());
        assert!(app.home().selected_scene().is_none());
    }

    #[tokio::test]
    async fn word_lookup_substitutes_placeholder() {
        let mut app = App::new(Arc::new(Catalog { scenes: None }));

        let entry = app.open_word("abla,").await;
        assert_eq!(entry.meaning, "older sister");

        let entry = app.open_word("geldin?").await.clone();
        assert_eq!(entry, WordEntry::not_found("geldin"));
        assert_eq!(app.home().selected_word(), Some(&entry));

        app.home_mut().close_word();
        assert!(app.home().selected_word().is_none());
    }

    #[test]
    fn tutor_opens_with_greeting() {
        let app = App::new(Arc::new(Catalog { scenes: None }));
        assert_eq!(app.tutor().messages()[0].content(), GREETING);
        assert_eq!(app.tab(), Tab::Home);
    }
}
