//! Data models for one screening interview: the accumulating candidate
//! record, the LLM scoring/sentiment output shapes, and the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything learned about one candidate during one session.
///
/// Grown monotonically: each stage owns exactly one field, and a field,
/// once set, is never overwritten by a later stage. Unset fields are
/// omitted from the persisted record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
    /// Raw numbered-list text returned by question generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_questions_asked: Option<String>,
    /// Raw candidate free text accepted by the answer gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_question_answers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_feedback: Option<ScoreOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_analysis: Option<SentimentOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_timestamp: Option<DateTime<Utc>>,
}

/// A candidate field collected by one of the linear stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Language,
    Name,
    Email,
    Phone,
    Experience,
    Position,
    Location,
    TechStack,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Language => "language",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Experience => "experience",
            Field::Position => "position",
            Field::Location => "location",
            Field::TechStack => "tech_stack",
        }
    }
}

impl CandidateInfo {
    /// Stores `value` under `field`. A present value is never replaced.
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Language => &mut self.language,
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Experience => &mut self.experience,
            Field::Position => &mut self.position,
            Field::Location => &mut self.location,
            Field::TechStack => &mut self.tech_stack,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    /// The language the interview is conducted in, "English" if unspecified.
    pub fn language_or_default(&self) -> &str {
        self.language.as_deref().unwrap_or("English")
    }
}

/// The structured evaluation produced by the scoring LLM call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub evaluation: Vec<QuestionScore>,
    pub overall_score: f64,
    pub summary: String,
}

/// One per-question record inside an `Evaluation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionScore {
    pub question_number: u32,
    /// 0–10.
    pub score: u8,
    pub justification: String,
}

impl Evaluation {
    /// Replaces `overall_score` with the mean of the per-question scores.
    /// The model's self-reported average is not trusted.
    pub fn recompute_overall(&mut self) {
        if self.evaluation.is_empty() {
            return;
        }
        let sum: f64 = self.evaluation.iter().map(|q| q.score as f64).sum();
        self.overall_score = sum / self.evaluation.len() as f64;
    }
}

/// Scoring outcome attached to the persisted record. The failure variants
/// keep the candidate's effort (raw text) alongside an explicit marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreOutcome {
    Evaluated(Evaluation),
    ParseFailed { error: String, raw_response: String },
    GenerationFailed { error: String },
}

/// The sentiment classification produced over the full transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentResult {
    pub sentiment: SentimentLabel,
    pub justification: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

/// Sentiment outcome attached to the persisted record; a failed pass is
/// recorded, never dropped, and never blocks persistence of the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SentimentOutcome {
    Analyzed(SentimentResult),
    Failed { error: String },
}

/// One role-tagged transcript entry, oldest first in `Session::transcript`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_stores_value() {
        let mut info = CandidateInfo::default();
        info.set(Field::Name, "Ada Lovelace".to_string());
        assert_eq!(info.name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_set_never_overwrites() {
        let mut info = CandidateInfo::default();
        info.set(Field::Email, "a@b.co".to_string());
        info.set(Field::Email, "later@b.co".to_string());
        assert_eq!(info.email.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn test_language_defaults_to_english() {
        let info = CandidateInfo::default();
        assert_eq!(info.language_or_default(), "English");
    }

    #[test]
    fn test_unset_fields_omitted_from_record() {
        let mut info = CandidateInfo::default();
        info.set(Field::Name, "Ada".to_string());
        let json = serde_json::to_value(&info).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("name"));
    }

    #[test]
    fn test_evaluation_deserializes_from_llm_shape() {
        let json = r#"{
            "evaluation": [
                {"question_number": 1, "score": 8, "justification": "Solid explanation."},
                {"question_number": 2, "score": 6, "justification": "Partially correct."}
            ],
            "overall_score": 7.0,
            "summary": "Good grasp of fundamentals."
        }"#;
        let eval: Evaluation = serde_json::from_str(json).unwrap();
        assert_eq!(eval.evaluation.len(), 2);
        assert_eq!(eval.evaluation[0].score, 8);
    }

    #[test]
    fn test_recompute_overall_ignores_model_arithmetic() {
        let mut eval: Evaluation = serde_json::from_str(
            r#"{
                "evaluation": [
                    {"question_number": 1, "score": 10, "justification": "x"},
                    {"question_number": 2, "score": 5, "justification": "y"}
                ],
                "overall_score": 9.9,
                "summary": "s"
            }"#,
        )
        .unwrap();
        eval.recompute_overall();
        assert!((eval.overall_score - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recompute_overall_empty_is_noop() {
        let mut eval = Evaluation {
            evaluation: vec![],
            overall_score: 3.0,
            summary: String::new(),
        };
        eval.recompute_overall();
        assert_eq!(eval.overall_score, 3.0);
    }

    #[test]
    fn test_score_outcome_parse_failure_shape() {
        let outcome = ScoreOutcome::ParseFailed {
            error: "Failed to parse score JSON.".to_string(),
            raw_response: "not json".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "Failed to parse score JSON.");
        assert_eq!(json["raw_response"], "not json");
    }

    #[test]
    fn test_score_outcome_untagged_roundtrip_prefers_evaluation() {
        let json = r#"{
            "evaluation": [{"question_number": 1, "score": 8, "justification": "ok"}],
            "overall_score": 8.0,
            "summary": "fine"
        }"#;
        let outcome: ScoreOutcome = serde_json::from_str(json).unwrap();
        assert!(matches!(outcome, ScoreOutcome::Evaluated(_)));
    }

    #[test]
    fn test_sentiment_result_deserializes() {
        let json = r#"{"sentiment": "Positive", "justification": "Polite and cooperative."}"#;
        let result: SentimentResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.sentiment, SentimentLabel::Positive);
    }
}
