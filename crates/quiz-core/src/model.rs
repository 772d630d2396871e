use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// Semantic tag shared by answer options and archetypes.
///
/// Declaration order is the tie-break order used by the resolver; see [`Category::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Warm,
    Cool,
    Earth,
}

impl Category {
    /// Fixed enumeration order. Ties resolve to the earliest entry.
    pub const ALL: [Category; 3] = [Category::Warm, Category::Cool, Category::Earth];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Warm => "warm",
            Category::Cool => "cool",
            Category::Earth => "earth",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        match self {
            Category::Warm => 0,
            Category::Cool => 1,
            Category::Earth => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CommonError::UnknownCategory(trimmed.to_string()))
    }
}

/// Catalog grouping ("Глава I", "Глава II", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Chapter {
    I,
    II,
    III,
}

impl Chapter {
    pub fn as_str(self) -> &'static str {
        match self {
            Chapter::I => "I",
            Chapter::II => "II",
            Chapter::III => "III",
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chapter {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Chapter::I, Chapter::II, Chapter::III]
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CommonError::UnknownChapter(trimmed.to_string()))
    }
}

/// One selectable answer on a quiz question.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuizOption {
    /// Category this option votes for
    pub category: Category,
    /// Short label shown on the answer card, e.g. "Тепло"
    pub label: String,
    pub description: String,
    /// Illustrative emoji, presentation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// A quiz question with one option per [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    /// Stable identifier, 1..=3
    pub id: u8,
    /// Prompt text, e.g. "Что просит душа?"
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub options: Vec<QuizOption>,
}

/// A recommendable product identity (one lightbox design).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    /// Unique kebab-case key, e.g. "khokhloma"
    pub slug: String,
    /// Display name, e.g. "Хохлома: Очаг"
    pub name: String,
    pub category: Category,
    pub chapter: Chapter,
    pub emotion: String,
    pub description: String,
    pub style: String,
    /// Sound/QR companion experience
    pub phygital: String,
    /// Price in roubles
    pub price: u32,
    pub seo_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub for_whom: String,
    pub for_space: String,
    pub mood: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A user's (possibly partial) quiz answers. Owned by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Answers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question1: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question2: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question3: Option<Category>,
}

impl Answers {
    pub fn new(question1: Category, question2: Category, question3: Category) -> Self {
        Self {
            question1: Some(question1),
            question2: Some(question2),
            question3: Some(question3),
        }
    }

    pub fn slots(&self) -> [Option<Category>; 3] {
        [self.question1, self.question2, self.question3]
    }

    pub fn answered(&self) -> usize {
        self.slots().iter().filter(|s| s.is_some()).count()
    }

    /// True once every question has an answer.
    pub fn is_complete(&self) -> bool {
        self.slots().iter().all(Option::is_some)
    }

    /// Copy of `self` with the slot for `question_id` set to `category`.
    pub fn with(mut self, question_id: u8, category: Category) -> Result<Self, CommonError> {
        let slot = match question_id {
            1 => &mut self.question1,
            2 => &mut self.question2,
            3 => &mut self.question3,
            other => return Err(CommonError::UnknownQuestion(other)),
        };
        *slot = Some(category);
        Ok(self)
    }
}

/// How decisively the resolver picked its archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// Answers were incomplete; the default archetype was returned.
    Fallback,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
            Confidence::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolver output, borrowed from the catalog it was computed against.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResult<'a> {
    pub archetype: &'a Archetype,
    pub confidence: Confidence,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(" Warm ".parse::<Category>().unwrap(), Category::Warm);
        assert_eq!("EARTH".parse::<Category>().unwrap(), Category::Earth);
        assert!(matches!(
            "warmth".parse::<Category>(),
            Err(CommonError::UnknownCategory(s)) if s == "warmth"
        ));
    }

    #[test]
    fn category_order_is_pinned() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(serde_json::to_string(&Category::Cool).unwrap(), "\"cool\"");
    }

    #[test]
    fn chapter_round_trips_roman_numerals() {
        assert_eq!("ii".parse::<Chapter>().unwrap(), Chapter::II);
        assert_eq!(serde_json::to_string(&Chapter::III).unwrap(), "\"III\"");
        assert!("IV".parse::<Chapter>().is_err());
    }

    #[test]
    fn answers_completeness() {
        let partial = Answers {
            question1: Some(Category::Warm),
            ..Answers::default()
        };
        assert_eq!(partial.answered(), 1);
        assert!(!partial.is_complete());

        let full = partial
            .with(2, Category::Cool)
            .and_then(|a| a.with(3, Category::Earth))
            .unwrap();
        assert!(full.is_complete());
        assert_eq!(full, Answers::new(Category::Warm, Category::Cool, Category::Earth));
    }

    #[test]
    fn answers_reject_unknown_question() {
        let err = Answers::default().with(4, Category::Warm).unwrap_err();
        assert!(matches!(err, CommonError::UnknownQuestion(4)));
    }

    #[test]
    fn answers_deserialize_from_partial_json() {
        let answers: Answers = serde_json::from_str(r#"{"question2":"cool"}"#).unwrap();
        assert_eq!(answers.slots(), [None, Some(Category::Cool), None]);
    }
}
