//! Client for the Tulu Turkish tutor, plus a stub backend for local use.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod tutor;

pub use app::{App, Tab};
pub use client::{Backend, HttpBackend};
pub use config::Config;
pub use error::{BackendError, FailureKind, SubmitError};
pub use session::{Message, Role, Session};
pub use tutor::{ConversationStatus, Exchange, FALLBACK_ANSWER, TutorConversation};
