//! Session ownership and lifecycle.
//!
//! Each candidate gets one `Session`: one `CandidateInfo`, one stage
//! pointer, one transcript. Sessions are owned explicitly and handed into
//! the state machine by reference; nothing session-scoped lives in globals.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::interview::models::{CandidateInfo, Field, Message, Role};
use crate::interview::stages::Stage;

const GREETING_ASK_NAME: &str = "Hello! I'm an intelligent Hiring Assistant from TalentScout. \
    I'm here to ask you a few questions to get started. What is your full name?";

const GREETING_ASK_LANGUAGE: &str = "Hello! I'm an intelligent Hiring Assistant from TalentScout. \
    Before we begin: which language would you like to conduct this interview in? (e.g., English, Spanish)";

/// One candidate's interview in progress. Mutated exclusively by the state
/// machine; immutable once the stage reaches `End`.
#[derive(Debug)]
pub struct Session {
    pub candidate: CandidateInfo,
    pub stage: Stage,
    /// Role-tagged exchanged messages, oldest first.
    pub transcript: Vec<Message>,
}

impl Session {
    /// Creates a session and returns it with the opening greeting.
    ///
    /// When a language is supplied up front the language-selection stage is
    /// skipped and the sequence begins at name collection.
    pub fn start(language: Option<String>) -> (Session, String) {
        let mut candidate = CandidateInfo::default();
        let (stage, greeting) = match language {
            Some(lang) => {
                candidate.set(Field::Language, lang);
                (Stage::GetName, GREETING_ASK_NAME)
            }
            None => (Stage::GetLanguage, GREETING_ASK_LANGUAGE),
        };

        let mut session = Session {
            candidate,
            stage,
            transcript: Vec::new(),
        };
        session.push(Role::Assistant, greeting);
        (session, greeting.to_string())
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::End
    }

    pub fn push(&mut self, role: Role, content: &str) {
        self.transcript.push(Message {
            role,
            content: content.to_string(),
        });
    }

    /// Renders the full role-tagged transcript for the sentiment pass.
    pub fn transcript_text(&self) -> String {
        self.transcript
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// In-memory registry of live sessions. Each session sits behind its own
/// mutex, held across a whole turn, so turns within one session never
/// overlap while independent sessions proceed concurrently.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<Uuid, Arc<Mutex<Session>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a session, returning its id and greeting.
    pub async fn create(&self, language: Option<String>) -> (Uuid, String) {
        let (session, greeting) = Session::start(language);
        let id = Uuid::new_v4();
        self.inner
            .lock()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        (id, greeting)
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.inner.lock().await.get(&id).cloned()
    }
}
