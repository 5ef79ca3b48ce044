//! The fixed interview stage sequence.
//!
//! Each stage carries an explicit kind (what input it expects) and an
//! explicit entry action (what the assistant says on arrival), both decided
//! here at construction time — stage behavior is never inferred from
//! naming conventions at runtime.

use crate::interview::models::Field;

/// A named point in the fixed interview sequence. The current-stage pointer
/// only ever advances forward or jumps to `End`; it never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    GetLanguage,
    GetName,
    GetEmail,
    GetPhone,
    GetExperience,
    GetPosition,
    GetLocation,
    GetTechStack,
    TechQuestionsGenerated,
    TechAnswersProvided,
    ScoringDone,
    End,
}

/// What kind of input a stage consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Collects one candidate field; non-empty text (plus any
    /// field-specific validation) advances the sequence.
    FieldCollection(Field),
    /// Collects the technical answers, gated by intent classification.
    AnswerCollection,
    /// Accepts no further field mutation.
    Terminal,
}

/// What the assistant says when the sequence advances into a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEntry {
    /// A fixed next-assistant-message template.
    Literal(&'static str),
    /// The message is computed by an LLM-backed generator
    /// (currently only technical-question generation).
    Generated,
    /// Never entered through the normal advance path.
    None,
}

impl Stage {
    /// Stable snake_case stage name, used in prompts and status payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::GetLanguage => "get_language",
            Stage::GetName => "get_name",
            Stage::GetEmail => "get_email",
            Stage::GetPhone => "get_phone",
            Stage::GetExperience => "get_experience",
            Stage::GetPosition => "get_position",
            Stage::GetLocation => "get_location",
            Stage::GetTechStack => "get_tech_stack",
            Stage::TechQuestionsGenerated => "tech_questions_generated",
            Stage::TechAnswersProvided => "tech_answers_provided",
            Stage::ScoringDone => "scoring_done",
            Stage::End => "end",
        }
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Stage::GetLanguage => StageKind::FieldCollection(Field::Language),
            Stage::GetName => StageKind::FieldCollection(Field::Name),
            Stage::GetEmail => StageKind::FieldCollection(Field::Email),
            Stage::GetPhone => StageKind::FieldCollection(Field::Phone),
            Stage::GetExperience => StageKind::FieldCollection(Field::Experience),
            Stage::GetPosition => StageKind::FieldCollection(Field::Position),
            Stage::GetLocation => StageKind::FieldCollection(Field::Location),
            Stage::GetTechStack => StageKind::FieldCollection(Field::TechStack),
            Stage::TechQuestionsGenerated => StageKind::AnswerCollection,
            Stage::TechAnswersProvided | Stage::ScoringDone | Stage::End => StageKind::Terminal,
        }
    }

    pub fn entry(&self) -> StageEntry {
        match self {
            Stage::GetLanguage => StageEntry::None,
            Stage::GetName => StageEntry::Literal("Thank you! Let's get started. What is your full name?"),
            Stage::GetEmail => StageEntry::Literal("Great, thank you. What is your email address?"),
            Stage::GetPhone => StageEntry::Literal("Thanks. What is your phone number?"),
            Stage::GetExperience => StageEntry::Literal(
                "Perfect. How many years of professional experience do you have?",
            ),
            Stage::GetPosition => StageEntry::Literal(
                "Understood. What position or positions are you interested in?",
            ),
            Stage::GetLocation => StageEntry::Literal(
                "Noted. What is your current location? (e.g., City, Country)",
            ),
            Stage::GetTechStack => StageEntry::Literal(
                "Excellent. Could you please list your primary tech stack? (e.g., Python, React, AWS)",
            ),
            Stage::TechQuestionsGenerated => StageEntry::Generated,
            Stage::TechAnswersProvided | Stage::ScoringDone | Stage::End => StageEntry::None,
        }
    }

    /// The next stage in the fixed sequence. There is no backward path.
    pub fn next(&self) -> Stage {
        match self {
            Stage::GetLanguage => Stage::GetName,
            Stage::GetName => Stage::GetEmail,
            Stage::GetEmail => Stage::GetPhone,
            Stage::GetPhone => Stage::GetExperience,
            Stage::GetExperience => Stage::GetPosition,
            Stage::GetPosition => Stage::GetLocation,
            Stage::GetLocation => Stage::GetTechStack,
            Stage::GetTechStack => Stage::TechQuestionsGenerated,
            Stage::TechQuestionsGenerated => Stage::TechAnswersProvided,
            Stage::TechAnswersProvided => Stage::ScoringDone,
            Stage::ScoringDone | Stage::End => Stage::End,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind(), StageKind::Terminal)
    }
}
