use crate::config::Config;
use crate::interview::machine::Interviewer;
use crate::interview::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The stateless orchestrator shared by all sessions.
    pub interviewer: Interviewer,
    /// Live interview sessions, one mutex per session.
    pub sessions: SessionRegistry,
    /// Kept for handlers that need runtime settings (none yet beyond startup).
    #[allow(dead_code)]
    pub config: Config,
}
