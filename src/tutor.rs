// src/tutor.rs
//! The tutor conversation protocol: one question, one exchange, one answer.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    client::Backend,
    error::{FailureKind, SubmitError},
    message::TutorRequest,
    session::{Message, Role, Session},
};

/// Shown in place of an answer whenever the backend cannot be reached or
/// replies with something unusable.
pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't process your question. Please try again.";

pub const GREETING: &str = "Merhaba! 👋 I'm Tulu, your Turkish language tutor. Ask me anything about Turkish words, grammar, pronunciation, or culture!";

pub const QUICK_QUESTIONS: [&str; 4] = [
    "What does 'abla' mean?",
    "How do you say 'thank you' in Turkish?",
    "Explain Turkish sentence structure",
    "What's the difference between 'var' and 'yok'?",
];

/// How a submitted question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Answered,
    Fallback(FailureKind),
}

/// Published after every change to the log or the pending flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversationStatus {
    pub messages: usize,
    pub pending: bool,
}

pub struct TutorConversation {
    backend: Arc<dyn Backend>,
    session: Mutex<Session>,
    busy: AtomicBool,
    status: watch::Sender<ConversationStatus>,
}

impl TutorConversation {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_session(backend, Session::new())
    }

    pub fn with_session(backend: Arc<dyn Backend>, session: Session) -> Self {
        let (status, _) = watch::channel(ConversationStatus {
            messages: session.len(),
            pending: false,
        });
        Self {
            backend,
            session: Mutex::new(session),
            busy: AtomicBool::new(false),
            status,
        }
    }

    /// Ask one question. Precondition failures are the only errors; every
    /// backend failure is absorbed into a fallback assistant message.
    pub async fn submit(&self, question: &str) -> Result<Exchange, SubmitError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SubmitError::EmptyQuestion);
        }

        let turn = InFlight::begin(self)?;
        let session_id = {
            let mut session = self.lock();
            session.push(Role::User, question);
            session.session_id().map(str::to_owned)
        };
        self.publish(true);

        let request = TutorRequest {
            question: question.to_owned(),
            session_id,
        };
        debug!(
            question = %request.question,
            session_id = request.session_id.as_deref().unwrap_or("-"),
            "submitting tutor question"
        );

        let exchange = match self.backend.ask_tutor(&request).await {
            Ok(response) => {
                let mut session = self.lock();
                session.push(Role::Assistant, response.answer);
                session.set_session_id(response.session_id);
                Exchange::Answered
            }
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "tutor request failed");
                self.lock().push(Role::Assistant, FALLBACK_ANSWER);
                Exchange::Fallback(err.kind())
            }
        };
        turn.finish();
        Ok(exchange)
    }

    pub fn session_id(&self) -> Option<String> {
        self.lock().session_id().map(str::to_owned)
    }

    /// Copy of the log in conversation order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages().to_vec()
    }

    pub fn is_pending(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn subscribe(&self) -> watch::Receiver<ConversationStatus> {
        self.status.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, pending: bool) {
        let messages = self.lock().len();
        self.status.send_replace(ConversationStatus { messages, pending });
    }
}

impl std::fmt::Debug for TutorConversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TutorConversation")
            .field("session", &*self.lock())
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Holds the busy flag for one submit. If the submit future is dropped
/// before the exchange resolves, the fallback answer is appended on drop so
/// the user message still gets its counterpart.
struct InFlight<'a> {
    conversation: &'a TutorConversation,
    resolved: bool,
}

impl<'a> InFlight<'a> {
    fn begin(conversation: &'a TutorConversation) -> Result<Self, SubmitError> {
        conversation
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| SubmitError::Busy)?;
        Ok(Self {
            conversation,
            resolved: false,
        })
    }

    fn finish(mut self) {
        self.resolved = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            warn!(kind = %FailureKind::Cancelled, "tutor request dropped before resolving");
            self.conversation.lock().push(Role::Assistant, FALLBACK_ANSWER);
        }
        self.conversation.busy.store(false, Ordering::Release);
        self.conversation.publish(false);
    }
}
