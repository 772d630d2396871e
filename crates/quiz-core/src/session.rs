//! Step-by-step quiz flow: intro, three questions, result.
//!
//! The session is a plain value owned by the caller. Each user action produces the
//! next session; the resolver runs once, when the third answer arrives.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{Answers, Category, Question};
use crate::resolver::Resolver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QuizStep {
    #[default]
    Intro,
    Q1,
    Q2,
    Q3,
    Result,
}

impl QuizStep {
    /// Question id shown at this step, if any.
    pub fn question_id(self) -> Option<u8> {
        match self {
            QuizStep::Q1 => Some(1),
            QuizStep::Q2 => Some(2),
            QuizStep::Q3 => Some(3),
            QuizStep::Intro | QuizStep::Result => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuizAction {
    Start,
    Answer { category: Category },
    Back,
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizSession {
    pub step: QuizStep,
    pub answers: Answers,
    /// Slug picked by the resolver once the quiz reaches [`QuizStep::Result`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_slug: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next session after `action`. Actions that do not apply to the current
    /// step return the session unchanged.
    pub fn apply(self, action: QuizAction, resolver: &Resolver<'_>) -> Self {
        match (self.step, action) {
            (_, QuizAction::Reset) => Self::new(),

            (QuizStep::Intro, QuizAction::Start) => Self {
                step: QuizStep::Q1,
                ..self
            },

            (QuizStep::Q1, QuizAction::Answer { category }) => Self {
                step: QuizStep::Q2,
                answers: Answers {
                    question1: Some(category),
                    ..self.answers
                },
                ..self
            },

            (QuizStep::Q2, QuizAction::Answer { category }) => Self {
                step: QuizStep::Q3,
                answers: Answers {
                    question2: Some(category),
                    ..self.answers
                },
                ..self
            },

            (QuizStep::Q3, QuizAction::Answer { category }) => {
                let answers = Answers {
                    question3: Some(category),
                    ..self.answers
                };
                let result = resolver.determine(&answers);
                Self {
                    step: QuizStep::Result,
                    answers,
                    result_slug: Some(result.archetype.slug.clone()),
                }
            }

            (QuizStep::Q2, QuizAction::Back) => Self {
                step: QuizStep::Q1,
                ..self
            },

            (QuizStep::Q3, QuizAction::Back) => Self {
                step: QuizStep::Q2,
                ..self
            },

            _ => self,
        }
    }

    pub fn current_question<'c>(&self, catalog: &'c Catalog) -> Option<&'c Question> {
        self.step.question_id().and_then(|id| catalog.question(id))
    }

    pub fn is_finished(&self) -> bool {
        self.step == QuizStep::Result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category::{Cool, Earth, Warm};

    fn answer(category: Category) -> QuizAction {
        QuizAction::Answer { category }
    }

    #[test]
    fn full_walkthrough_reaches_result() {
        let catalog = Catalog::builtin().unwrap();
        let resolver = Resolver::new(&catalog);

        let session = QuizSession::new()
            .apply(QuizAction::Start, &resolver)
            .apply(answer(Cool), &resolver)
            .apply(answer(Cool), &resolver);
        assert_eq!(session.step, QuizStep::Q3);
        assert_eq!(session.current_question(&catalog).unwrap().id, 3);
        assert!(session.result_slug.is_none());

        let done = session.apply(answer(Warm), &resolver);
        assert!(done.is_finished());
        assert_eq!(done.answers, Answers::new(Cool, Cool, Warm));
        assert_eq!(done.result_slug.as_deref(), Some("gzhel"));
        assert!(done.current_question(&catalog).is_none());
    }

    #[test]
    fn back_keeps_answers() {
        let catalog = Catalog::builtin().unwrap();
        let resolver = Resolver::new(&catalog);

        let session = QuizSession::new()
            .apply(QuizAction::Start, &resolver)
            .apply(answer(Earth), &resolver)
            .apply(answer(Warm), &resolver)
            .apply(QuizAction::Back, &resolver);
        assert_eq!(session.step, QuizStep::Q2);
        assert_eq!(session.answers.question2, Some(Warm));

        let session = session.apply(QuizAction::Back, &resolver);
        assert_eq!(session.step, QuizStep::Q1);
        assert_eq!(session.answers.question1, Some(Earth));

        let unchanged = session.clone().apply(QuizAction::Back, &resolver);
        assert_eq!(unchanged, session);
    }

    #[test]
    fn reset_from_result_starts_over() {
        let catalog = Catalog::builtin().unwrap();
        let resolver = Resolver::new(&catalog);

        let mut session = QuizSession::new().apply(QuizAction::Start, &resolver);
        for category in [Warm, Warm, Warm] {
            session = session.apply(answer(category), &resolver);
        }
        assert_eq!(session.result_slug.as_deref(), Some("khokhloma"));

        let fresh = session.apply(QuizAction::Reset, &resolver);
        assert_eq!(fresh, QuizSession::new());
    }

    #[test]
    fn out_of_step_actions_are_ignored() {
        let catalog = Catalog::builtin().unwrap();
        let resolver = Resolver::new(&catalog);

        let intro = QuizSession::new();
        assert_eq!(intro.clone().apply(answer(Warm), &resolver), intro);

        let q1 = intro.apply(QuizAction::Start, &resolver);
        assert_eq!(q1.clone().apply(QuizAction::Start, &resolver), q1);
    }

    #[test]
    fn action_json_shape() {
        let action: QuizAction =
            serde_json::from_str(r#"{"type":"answer","category":"earth"}"#).unwrap();
        assert_eq!(action, answer(Earth));
        let start: QuizAction = serde_json::from_str(r#"{"type":"start"}"#).unwrap();
        assert_eq!(start, QuizAction::Start);
    }
}
