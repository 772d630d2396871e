use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::model::{Answers, Archetype, Category, Confidence, QuizResult};

const RELATED_LIMIT: usize = 3;
const UNKNOWN_SLUG_RELATED: usize = 2;

/// Maps quiz answers onto archetypes by majority vote over [`Category`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Recommend an archetype for `answers`.
    ///
    /// Incomplete answers yield the catalog's default archetype with
    /// [`Confidence::Fallback`]. Otherwise the category with the most votes wins;
    /// ties go to the earliest entry of [`Category::ALL`].
    pub fn determine(&self, answers: &Answers) -> QuizResult<'a> {
        if !answers.is_complete() {
            return QuizResult {
                archetype: self.catalog.default_archetype(),
                confidence: Confidence::Fallback,
                reasoning: format!("incomplete answers: {}/3 answered", answers.answered()),
            };
        }

        let (winner, count) = majority(answers);
        let confidence = match count {
            3 => Confidence::High,
            2 => Confidence::Medium,
            _ => Confidence::Low,
        };

        let Some(archetype) = self.catalog.primary(winner) else {
            warn!(category = %winner, "no primary archetype in catalog, using default");
            return QuizResult {
                archetype: self.catalog.default_archetype(),
                confidence: Confidence::Low,
                reasoning: format!("no primary archetype for {winner}"),
            };
        };

        debug!(category = %winner, count, slug = %archetype.slug, "archetype determined");
        QuizResult {
            archetype,
            confidence,
            reasoning: format!("majority answer: {winner} ({count}/3)"),
        }
    }

    /// Up to three alternatives to `slug`: same chapter first, then the rest,
    /// each group in catalog order. Unknown slugs get the first two entries.
    pub fn related(&self, slug: &str) -> Vec<&'a Archetype> {
        let archetypes = self.catalog.archetypes();
        let Some(current) = self.catalog.archetype(slug) else {
            return archetypes.iter().take(UNKNOWN_SLUG_RELATED).collect();
        };

        let (same_chapter, cross_chapter): (Vec<&'a Archetype>, Vec<&'a Archetype>) = archetypes
            .iter()
            .filter(|a| a.slug != current.slug)
            .partition(|a| a.chapter == current.chapter);

        same_chapter
            .into_iter()
            .chain(cross_chapter)
            .take(RELATED_LIMIT)
            .collect()
    }

    pub fn is_complete(&self, answers: &Answers) -> bool {
        answers.is_complete()
    }
}

/// Winning category and its vote count. Only strictly greater counts replace
/// the leader, so the scan order of `Category::ALL` breaks ties.
fn majority(answers: &Answers) -> (Category, usize) {
    let mut tally = [0usize; 3];
    for category in answers.slots().into_iter().flatten() {
        tally[category.index()] += 1;
    }

    let mut best = (Category::ALL[0], tally[0]);
    for category in Category::ALL.into_iter().skip(1) {
        let count = tally[category.index()];
        if count > best.1 {
            best = (category, count);
        }
    }
    best
}
