//! The conversation state machine — the orchestrator that consumes each
//! user turn, mutates the candidate record, drives the gateway calls, and
//! produces the next assistant message.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::interview::models::{
    Evaluation, Field, Role, ScoreOutcome, SentimentOutcome, SentimentResult,
};
use crate::interview::prompts;
use crate::interview::session::Session;
use crate::interview::stages::{Stage, StageEntry, StageKind};
use crate::interview::validation::is_valid_email;
use crate::llm_client::{extract_json, CompletionGateway, FAST_MODEL, SCORING_MODEL};
use crate::store::CandidateStore;

/// Exit utterances, matched case-insensitively against the whole trimmed
/// input, from any stage, before all stage-specific logic.
const EXIT_PHRASES: &[&str] = &["exit", "quit", "stop", "bye", "goodbye", "see you"];

/// Replies shorter than this are never accepted as technical answers, even
/// when the classifier says `ANSWERING_QUESTION` — short replies are
/// overwhelmingly evasions or confusion in practice.
const MIN_ANSWER_WORDS: usize = 15;

const FAREWELL: &str = "Thank you for your time. Have a great day!";

const CLOSING: &str = "Thank you. A recruiter will be in touch shortly.";

const EMPTY_REPROMPT: &str = "I didn't catch that. Could you please type a response?";

const EMAIL_REPROMPT: &str =
    "That doesn't look like a valid email address. Could you please try again?";

const ANSWER_REFUSAL: &str = "My purpose is to collect your answers to the questions provided. \
    Please provide a detailed response for each question to proceed.";

const QUESTIONS_FAILED: &str =
    "I'm having trouble generating questions right now. A recruiter will be in touch.";

const SCORING_SUCCESS: &str = "Thank you for your responses. That's all the information I need \
    for now. A recruiter from TalentScout will review your details and get in touch with you \
    soon. Have a great day!";

const SCORING_PARSE_FAILED: &str = "Your answers have been saved, but there was an issue with \
    the automated evaluation. A recruiter will review them manually. Thank you for your time.";

const SCORING_GENERATION_FAILED: &str = "I'm having trouble evaluating the answers right now, \
    but they have been saved. A recruiter will review them manually. Thank you for your time.";

/// Classifier verdict for input during the answer-collection stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    AnsweringQuestion,
    EvadingQuestion,
    Irrelevant,
}

impl Intent {
    /// Parses the classifier's reply, tolerating surrounding whitespace,
    /// quotes, and punctuation. Anything unrecognized is `None` and is
    /// treated as not-an-answer.
    fn parse(raw: &str) -> Option<Intent> {
        let token = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.');
        match token {
            "ANSWERING_QUESTION" => Some(Intent::AnsweringQuestion),
            "EVADING_QUESTION" => Some(Intent::EvadingQuestion),
            "IRRELEVANT" => Some(Intent::Irrelevant),
            _ => None,
        }
    }
}

/// The interview orchestrator. Stateless across sessions: all per-candidate
/// state lives in the `Session` handed into each call, so one `Interviewer`
/// serves any number of concurrent sessions.
#[derive(Clone)]
pub struct Interviewer {
    gateway: Arc<dyn CompletionGateway>,
    store: Arc<CandidateStore>,
}

impl Interviewer {
    pub fn new(gateway: Arc<dyn CompletionGateway>, store: Arc<CandidateStore>) -> Self {
        Self { gateway, store }
    }

    /// Processes one user turn to completion and returns the assistant
    /// reply. Both sides of the exchange are appended to the transcript.
    pub async fn handle(&self, session: &mut Session, user_text: &str) -> String {
        session.push(Role::User, user_text);
        let reply = self.dispatch(session, user_text).await;
        session.push(Role::Assistant, &reply);
        reply
    }

    async fn dispatch(&self, session: &mut Session, user_text: &str) -> String {
        // The exit check has priority over all stage-specific logic and is
        // evaluated first, every turn.
        if is_exit_phrase(user_text) {
            info!(stage = session.stage.name(), "Candidate ended the interview");
            session.stage = Stage::End;
            return FAREWELL.to_string();
        }

        match session.stage.kind() {
            StageKind::FieldCollection(field) => self.collect_field(session, field, user_text).await,
            StageKind::AnswerCollection => self.collect_answers(session, user_text).await,
            StageKind::Terminal => {
                session.stage = Stage::End;
                CLOSING.to_string()
            }
        }
    }

    /// Field-collection turn: validate, store verbatim, advance, and emit
    /// the next stage's entry message. On validation failure the stage does
    /// not advance and the input is discarded.
    async fn collect_field(
        &self,
        session: &mut Session,
        field: Field,
        user_text: &str,
    ) -> String {
        if user_text.trim().is_empty() {
            return EMPTY_REPROMPT.to_string();
        }
        if field == Field::Email && !is_valid_email(user_text) {
            return EMAIL_REPROMPT.to_string();
        }

        session.candidate.set(field, user_text.to_string());
        session.stage = session.stage.next();

        match session.stage.entry() {
            StageEntry::Literal(text) => text.to_string(),
            StageEntry::Generated => self.generate_tech_questions(session).await,
            // Unreachable: every field stage's successor has an entry.
            StageEntry::None => CLOSING.to_string(),
        }
    }

    /// Builds and presents the technical questions on entry into the
    /// answer-collection stage. A gateway failure skips forward to
    /// `scoring_done` so the interview terminates gracefully.
    async fn generate_tech_questions(&self, session: &mut Session) -> String {
        let tech_stack = session
            .candidate
            .tech_stack
            .clone()
            .unwrap_or_else(|| "general software development".to_string());
        let experience = session
            .candidate
            .experience
            .clone()
            .unwrap_or_else(|| "0".to_string());

        let system = prompts::system_prompt(session.candidate.language_or_default());
        let prompt = prompts::technical_questions_prompt(&tech_stack, &experience);

        match self.gateway.complete(&system, &prompt, FAST_MODEL, 0.5).await {
            Ok(questions) => {
                session.candidate.tech_questions_asked = Some(questions.clone());
                format!(
                    "Great, thank you. Here are a few technical questions for you:\n\n---\n\n\
                     {questions}\n\n---\n\n\
                     Please answer each question clearly. You can number your answers \
                     (e.g., 1., 2., etc.) to correspond with the questions."
                )
            }
            Err(e) => {
                warn!("Technical question generation failed: {e}");
                session.stage = Stage::ScoringDone;
                QUESTIONS_FAILED.to_string()
            }
        }
    }

    /// Answer-collection turn: the input counts as a genuine answer only if
    /// the classifier says `ANSWERING_QUESTION` AND the word-count guard
    /// passes. Anything else gets a firm refusal and the stage stays put —
    /// the questions are never regenerated or skipped.
    async fn collect_answers(&self, session: &mut Session, user_text: &str) -> String {
        let system = prompts::system_prompt(session.candidate.language_or_default());
        let prompt = prompts::intent_classification_prompt(user_text, session.stage.name());

        let intent = match self.gateway.complete(&system, &prompt, FAST_MODEL, 0.0).await {
            Ok(raw) => Intent::parse(&raw),
            Err(e) => {
                warn!("Intent classification failed: {e}");
                None
            }
        };

        let word_count = user_text.split_whitespace().count();

        if intent == Some(Intent::AnsweringQuestion) && word_count >= MIN_ANSWER_WORDS {
            session
                .candidate
                .tech_question_answers
                .get_or_insert_with(|| user_text.to_string());
            session.stage = Stage::TechAnswersProvided;
            // Deliberate same-turn compression: accepting the answers runs
            // scoring, sentiment, and persistence immediately, so this
            // turn's reply is already the final evaluation outcome. Do not
            // split this into a two-turn flow.
            self.score_answers(session).await
        } else {
            info!(?intent, word_count, "Rejected input in answer stage");
            ANSWER_REFUSAL.to_string()
        }
    }

    /// Scores the stored answers. All three outcomes (parsed evaluation,
    /// unparseable text, gateway failure) end the interview, attach a
    /// sentiment outcome, and reach the persistence step — collected data
    /// is never silently dropped.
    async fn score_answers(&self, session: &mut Session) -> String {
        let questions = session.candidate.tech_questions_asked.clone();
        let answers = session.candidate.tech_question_answers.clone();

        let (outcome, reply) = match (questions, answers) {
            (Some(questions), Some(answers)) => {
                let system = prompts::system_prompt(session.candidate.language_or_default());
                let prompt = prompts::scoring_prompt(&questions, &answers);
                match self
                    .gateway
                    .complete(&system, &prompt, SCORING_MODEL, 0.1)
                    .await
                {
                    Ok(raw) => {
                        let parsed: Result<Evaluation, String> = extract_json(&raw)
                            .map_err(|e| e.to_string())
                            .and_then(|json| {
                                serde_json::from_str::<Evaluation>(json).map_err(|e| e.to_string())
                            });
                        match parsed {
                            Ok(mut evaluation) => {
                                evaluation.recompute_overall();
                                info!(
                                    overall_score = evaluation.overall_score,
                                    "Answers scored"
                                );
                                (ScoreOutcome::Evaluated(evaluation), SCORING_SUCCESS)
                            }
                            Err(parse_error) => {
                                warn!("Score response failed to parse: {parse_error}");
                                (
                                    ScoreOutcome::ParseFailed {
                                        error: "Failed to parse score JSON.".to_string(),
                                        raw_response: raw,
                                    },
                                    SCORING_PARSE_FAILED,
                                )
                            }
                        }
                    }
                    Err(e) => {
                        warn!("Score generation failed: {e}");
                        (
                            ScoreOutcome::GenerationFailed {
                                error: "Failed to generate score.".to_string(),
                            },
                            SCORING_GENERATION_FAILED,
                        )
                    }
                }
            }
            _ => {
                error!("Scoring invoked without stored questions or answers");
                (
                    ScoreOutcome::GenerationFailed {
                        error: "Missing questions or answers.".to_string(),
                    },
                    SCORING_GENERATION_FAILED,
                )
            }
        };

        session.candidate.score_feedback = Some(outcome);
        // Attempted unconditionally; its failure never blocks persistence.
        session.candidate.sentiment_analysis = Some(self.analyze_sentiment(session).await);
        session.candidate.interview_timestamp = Some(Utc::now());
        session.stage = Stage::End;

        if let Err(e) = self.store.append(&session.candidate).await {
            // The conversation outcome must not depend on disk health.
            error!("Failed to persist candidate record: {e:?}");
        }

        reply.to_string()
    }

    /// Classifies the sentiment of the full role-tagged transcript.
    async fn analyze_sentiment(&self, session: &Session) -> SentimentOutcome {
        let system = prompts::system_prompt(session.candidate.language_or_default());
        let prompt = prompts::sentiment_prompt(&session.transcript_text());

        match self
            .gateway
            .complete_json(&system, &prompt, FAST_MODEL, 0.0)
            .await
        {
            Ok(json) => match serde_json::from_str::<SentimentResult>(&json) {
                Ok(result) => SentimentOutcome::Analyzed(result),
                Err(e) => {
                    warn!("Sentiment response failed to parse: {e}");
                    SentimentOutcome::Failed {
                        error: "Failed to parse sentiment JSON.".to_string(),
                    }
                }
            },
            Err(e) => {
                warn!("Sentiment analysis failed: {e}");
                SentimentOutcome::Failed {
                    error: "Failed to analyze sentiment.".to_string(),
                }
            }
        }
    }
}

fn is_exit_phrase(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    EXIT_PHRASES.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::models::CandidateInfo;
    use crate::llm_client::LlmError;
    use std::collections::VecDeque;

    /// Gateway that replays a fixed script of completions, one per call.
    /// Runs out → `EmptyContent`.
    struct ScriptedGateway {
        responses: tokio::sync::Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: tokio::sync::Mutex::new(responses.into_iter().collect()),
            })
        }
    }

    #[async_trait::async_trait]
    impl CompletionGateway for ScriptedGateway {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _model: &str,
            _temperature: f32,
        ) -> Result<String, LlmError> {
            self.responses
                .lock()
                .await
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    fn interviewer(
        responses: Vec<Result<String, LlmError>>,
    ) -> (Interviewer, Arc<CandidateStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(CandidateStore::new(dir.path().join("candidates.json")));
        let interviewer = Interviewer::new(ScriptedGateway::new(responses), store.clone());
        (interviewer, store, dir)
    }

    fn session_at(stage: Stage, candidate: CandidateInfo) -> Session {
        Session {
            candidate,
            stage,
            transcript: Vec::new(),
        }
    }

    fn answer_stage_session() -> Session {
        let mut candidate = CandidateInfo::default();
        candidate.tech_stack = Some("Python, AWS".to_string());
        candidate.experience = Some("4".to_string());
        candidate.tech_questions_asked = Some("1. Q1\n2. Q2\n3. Q3\n4. Q4".to_string());
        session_at(Stage::TechQuestionsGenerated, candidate)
    }

    const LONG_ANSWER: &str = "For question one I would use a load balancer and for question \
        two I would cache aggressively using Redis with sensible TTL values everywhere";

    const EVALUATION_JSON: &str = r#"```json
{
  "evaluation": [
    {"question_number": 1, "score": 8, "justification": "Accurate."},
    {"question_number": 2, "score": 6, "justification": "Partially correct."}
  ],
  "overall_score": 1.0,
  "summary": "Decent fundamentals."
}
```"#;

    const SENTIMENT_JSON: &str =
        r#"{"sentiment": "Positive", "justification": "Cooperative throughout."}"#;

    #[tokio::test]
    async fn test_field_stage_stores_verbatim_and_advances() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let (mut session, _) = Session::start(Some("English".to_string()));

        let reply = interviewer.handle(&mut session, "Ada Lovelace").await;

        assert_eq!(session.stage, Stage::GetEmail);
        assert_eq!(session.candidate.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(reply, "Great, thank you. What is your email address?");
    }

    #[tokio::test]
    async fn test_language_stage_collects_language() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let (mut session, _) = Session::start(None);

        interviewer.handle(&mut session, "Spanish").await;

        assert_eq!(session.stage, Stage::GetName);
        assert_eq!(session.candidate.language.as_deref(), Some("Spanish"));
    }

    #[tokio::test]
    async fn test_invalid_email_reprompts_without_advancing() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let mut session = session_at(Stage::GetEmail, CandidateInfo::default());

        let reply = interviewer.handle(&mut session, "not-an-email").await;

        assert_eq!(session.stage, Stage::GetEmail);
        assert!(session.candidate.email.is_none());
        assert_eq!(reply, EMAIL_REPROMPT);
    }

    #[tokio::test]
    async fn test_valid_email_advances() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let mut session = session_at(Stage::GetEmail, CandidateInfo::default());

        interviewer.handle(&mut session, "a@b.co").await;

        assert_eq!(session.stage, Stage::GetPhone);
        assert_eq!(session.candidate.email.as_deref(), Some("a@b.co"));
    }

    #[tokio::test]
    async fn test_empty_input_reprompts() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let mut session = session_at(Stage::GetPhone, CandidateInfo::default());

        let reply = interviewer.handle(&mut session, "   ").await;

        assert_eq!(session.stage, Stage::GetPhone);
        assert_eq!(reply, EMPTY_REPROMPT);
    }

    #[tokio::test]
    async fn test_exit_phrases_end_from_any_stage() {
        for (input, stage) in [
            ("bye", Stage::GetName),
            ("Exit", Stage::GetLocation),
            ("QUIT", Stage::TechQuestionsGenerated),
            ("see you", Stage::GetExperience),
        ] {
            let (interviewer, _store, _dir) = interviewer(vec![]);
            let mut session = session_at(stage, CandidateInfo::default());

            let reply = interviewer.handle(&mut session, input).await;

            assert_eq!(session.stage, Stage::End, "input {input:?}");
            assert_eq!(reply, FAREWELL);
        }
    }

    #[tokio::test]
    async fn test_tech_stack_triggers_question_generation() {
        let (interviewer, _store, _dir) = interviewer(vec![Ok(
            "1. Q1\n2. Q2\n3. Q3\n4. Q4".to_string()
        )]);
        let mut candidate = CandidateInfo::default();
        candidate.experience = Some("4".to_string());
        let mut session = session_at(Stage::GetTechStack, candidate);

        let reply = interviewer.handle(&mut session, "Python, AWS").await;

        assert_eq!(session.stage, Stage::TechQuestionsGenerated);
        assert_eq!(
            session.candidate.tech_questions_asked.as_deref(),
            Some("1. Q1\n2. Q2\n3. Q3\n4. Q4")
        );
        assert!(reply.contains("1. Q1"));
        assert!(reply.contains("number your answers"));
    }

    #[tokio::test]
    async fn test_question_generation_failure_skips_to_scoring_done() {
        let (interviewer, _store, _dir) = interviewer(vec![Err(LlmError::Api {
            status: 500,
            message: "boom".to_string(),
        })]);
        let mut session = session_at(Stage::GetTechStack, CandidateInfo::default());

        let reply = interviewer.handle(&mut session, "Python").await;

        assert_eq!(session.stage, Stage::ScoringDone);
        assert_eq!(reply, QUESTIONS_FAILED);
    }

    #[tokio::test]
    async fn test_short_answer_rejected_despite_classifier_verdict() {
        let (interviewer, store, _dir) =
            interviewer(vec![Ok("ANSWERING_QUESTION".to_string())]);
        let mut session = answer_stage_session();

        // 8 words, classified as an answer — the word-count guard dominates.
        let reply = interviewer
            .handle(&mut session, "I would just use a load balancer maybe")
            .await;

        assert_eq!(session.stage, Stage::TechQuestionsGenerated);
        assert!(session.candidate.tech_question_answers.is_none());
        assert_eq!(reply, ANSWER_REFUSAL);
        assert!(store.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_evading_intent_rejected_even_when_long() {
        let (interviewer, _store, _dir) = interviewer(vec![Ok("EVADING_QUESTION".to_string())]);
        let mut session = answer_stage_session();

        let reply = interviewer.handle(&mut session, LONG_ANSWER).await;

        assert_eq!(session.stage, Stage::TechQuestionsGenerated);
        assert_eq!(reply, ANSWER_REFUSAL);
    }

    #[tokio::test]
    async fn test_classifier_failure_rejects_input() {
        let (interviewer, _store, _dir) = interviewer(vec![Err(LlmError::EmptyContent)]);
        let mut session = answer_stage_session();

        let reply = interviewer.handle(&mut session, LONG_ANSWER).await;

        assert_eq!(session.stage, Stage::TechQuestionsGenerated);
        assert_eq!(reply, ANSWER_REFUSAL);
    }

    #[tokio::test]
    async fn test_accepted_answer_cascades_to_persisted_record() {
        let (interviewer, store, _dir) = interviewer(vec![
            Ok("ANSWERING_QUESTION".to_string()),
            Ok(EVALUATION_JSON.to_string()),
            Ok(SENTIMENT_JSON.to_string()),
        ]);
        let mut session = answer_stage_session();

        let reply = interviewer.handle(&mut session, LONG_ANSWER).await;

        assert_eq!(session.stage, Stage::End);
        assert!(session.is_complete());
        assert_eq!(reply, SCORING_SUCCESS);

        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["tech_question_answers"], LONG_ANSWER);
        assert_eq!(record["score_feedback"]["evaluation"][0]["score"], 8);
        assert_eq!(record["sentiment_analysis"]["sentiment"], "Positive");
        assert!(record["interview_timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_overall_score_is_recomputed_from_question_scores() {
        let (interviewer, store, _dir) = interviewer(vec![
            Ok("ANSWERING_QUESTION".to_string()),
            Ok(EVALUATION_JSON.to_string()),
            Ok(SENTIMENT_JSON.to_string()),
        ]);
        let mut session = answer_stage_session();

        interviewer.handle(&mut session, LONG_ANSWER).await;

        let records = store.all().await.unwrap();
        // The model claimed 1.0; the mean of 8 and 6 is 7.0.
        assert_eq!(records[0]["score_feedback"]["overall_score"], 7.0);
    }

    #[tokio::test]
    async fn test_unparseable_score_persists_raw_response() {
        let (interviewer, store, _dir) = interviewer(vec![
            Ok("ANSWERING_QUESTION".to_string()),
            Ok("no json here, sorry".to_string()),
            Ok(SENTIMENT_JSON.to_string()),
        ]);
        let mut session = answer_stage_session();

        let reply = interviewer.handle(&mut session, LONG_ANSWER).await;

        assert_eq!(session.stage, Stage::End);
        assert_eq!(reply, SCORING_PARSE_FAILED);

        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0]["score_feedback"]["error"],
            "Failed to parse score JSON."
        );
        assert_eq!(records[0]["score_feedback"]["raw_response"], "no json here, sorry");
    }

    #[tokio::test]
    async fn test_score_gateway_failure_still_persists() {
        let (interviewer, store, _dir) = interviewer(vec![
            Ok("ANSWERING_QUESTION".to_string()),
            Err(LlmError::Api {
                status: 503,
                message: "unavailable".to_string(),
            }),
            Ok(SENTIMENT_JSON.to_string()),
        ]);
        let mut session = answer_stage_session();

        let reply = interviewer.handle(&mut session, LONG_ANSWER).await;

        assert_eq!(session.stage, Stage::End);
        assert_eq!(reply, SCORING_GENERATION_FAILED);

        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0]["score_feedback"]["error"],
            "Failed to generate score."
        );
        // Sentiment was still attempted and attached.
        assert_eq!(records[0]["sentiment_analysis"]["sentiment"], "Positive");
    }

    #[tokio::test]
    async fn test_sentiment_failure_never_blocks_persistence() {
        let (interviewer, store, _dir) = interviewer(vec![
            Ok("ANSWERING_QUESTION".to_string()),
            Ok(EVALUATION_JSON.to_string()),
            Err(LlmError::EmptyContent),
        ]);
        let mut session = answer_stage_session();

        let reply = interviewer.handle(&mut session, LONG_ANSWER).await;

        assert_eq!(reply, SCORING_SUCCESS);
        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0]["sentiment_analysis"]["error"],
            "Failed to analyze sentiment."
        );
    }

    #[tokio::test]
    async fn test_full_interview_round_trip() {
        let (interviewer, store, _dir) = interviewer(vec![
            Ok("1. Q1\n2. Q2\n3. Q3\n4. Q4".to_string()),
            Ok("ANSWERING_QUESTION".to_string()),
            Ok(EVALUATION_JSON.to_string()),
            Ok(SENTIMENT_JSON.to_string()),
        ]);
        let (mut session, _) = Session::start(Some("English".to_string()));

        for input in [
            "Ada Lovelace",
            "ada@example.com",
            "+44 20 7946 0958",
            "6",
            "Staff Engineer",
            "London, UK",
            "Python, AWS",
        ] {
            interviewer.handle(&mut session, input).await;
        }
        interviewer.handle(&mut session, LONG_ANSWER).await;

        assert!(session.is_complete());
        let records = store.all().await.unwrap();
        assert_eq!(records.len(), 1, "exactly one record per session");

        let record = records[0].as_object().unwrap();
        for key in [
            "language",
            "name",
            "email",
            "phone",
            "experience",
            "position",
            "location",
            "tech_stack",
            "tech_questions_asked",
            "tech_question_answers",
            "score_feedback",
            "sentiment_analysis",
            "interview_timestamp",
        ] {
            assert!(record.contains_key(key), "record missing {key}");
        }
    }

    #[tokio::test]
    async fn test_scoring_done_stage_closes_out() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let mut session = session_at(Stage::ScoringDone, CandidateInfo::default());

        let reply = interviewer.handle(&mut session, "hello?").await;

        assert_eq!(session.stage, Stage::End);
        assert_eq!(reply, CLOSING);
    }

    #[tokio::test]
    async fn test_transcript_records_both_sides() {
        let (interviewer, _store, _dir) = interviewer(vec![]);
        let (mut session, _) = Session::start(Some("English".to_string()));

        interviewer.handle(&mut session, "Ada Lovelace").await;

        // greeting + user turn + assistant reply
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[1].role, Role::User);
        assert_eq!(session.transcript[2].role, Role::Assistant);
    }

    #[test]
    fn test_intent_parse_tolerates_decoration() {
        assert_eq!(
            Intent::parse("\"ANSWERING_QUESTION\""),
            Some(Intent::AnsweringQuestion)
        );
        assert_eq!(
            Intent::parse("  EVADING_QUESTION.\n"),
            Some(Intent::EvadingQuestion)
        );
        assert_eq!(Intent::parse("IRRELEVANT"), Some(Intent::Irrelevant));
        assert_eq!(Intent::parse("The intent is ANSWERING_QUESTION"), None);
    }

    #[test]
    fn test_exit_phrase_matching_is_exact_and_case_insensitive() {
        assert!(is_exit_phrase("bye"));
        assert!(is_exit_phrase(" GOODBYE "));
        assert!(is_exit_phrase("See You"));
        assert!(!is_exit_phrase("bye for now"));
        assert!(!is_exit_phrase("stopwatch"));
    }
}
