use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Archetype, Chapter, Confidence, Question, QuizResult};
use crate::session::{QuizSession, QuizStep};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetArchetypeParams {
    /// Archetype slug such as "gzhel" or "az-esm-svet".
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListArchetypesParams {
    /// Optional chapter filter: "I", "II" or "III".
    pub chapter: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DetermineArchetypeParams {
    /// Category picked on question 1: "warm", "cool" or "earth".
    pub question1: Option<String>,
    /// Category picked on question 2.
    pub question2: Option<String>,
    /// Category picked on question 3.
    pub question3: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RelatedArchetypesParams {
    /// Slug of the archetype currently shown.
    pub slug: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QuizStepParams {
    /// Session returned by the previous call. Omit to start a new one.
    pub session: Option<QuizSession>,
    /// One of "start", "answer", "back", "reset".
    pub action: String,
    /// Category for the "answer" action.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArchetypeSummary {
    pub slug: String,
    pub name: String,
    pub chapter: Chapter,
    pub price: u32,
}

impl From<&Archetype> for ArchetypeSummary {
    fn from(archetype: &Archetype) -> Self {
        Self {
            slug: archetype.slug.clone(),
            name: archetype.name.clone(),
            chapter: archetype.chapter,
            price: archetype.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArchetypeDetailResponse {
    pub archetype: Archetype,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArchetypeListResponse {
    pub chapter: Option<Chapter>,
    pub archetypes: Vec<ArchetypeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetermineArchetypeResponse {
    pub archetype: Archetype,
    pub confidence: Confidence,
    pub reasoning: String,
    /// False when some answers were missing and the default was returned
    pub complete: bool,
}

impl DetermineArchetypeResponse {
    pub fn from_result(result: QuizResult<'_>, complete: bool) -> Self {
        Self {
            archetype: result.archetype.clone(),
            confidence: result.confidence,
            reasoning: result.reasoning,
            complete,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RelatedArchetypesResponse {
    pub slug: String,
    pub related: Vec<ArchetypeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuizStepResponse {
    pub session: QuizSession,
    pub step: QuizStep,
    /// Question to show next, while the quiz is in progress
    pub question: Option<Question>,
    /// Recommendation, once the quiz is finished
    pub result: Option<ArchetypeSummary>,
}
