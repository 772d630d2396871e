use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CommonError;
use crate::model::{Archetype, Category, Chapter, Question};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");
const QUESTION_COUNT: usize = 3;
const MIN_ARCHETYPES: usize = 3;

/// On-disk catalog layout (`data/catalog.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    pub questions: Vec<Question>,
    pub archetypes: Vec<Archetype>,
    /// Category -> slug of its primary archetype
    pub primaries: BTreeMap<Category, String>,
}

/// Immutable question and archetype catalog, validated on construction.
///
/// Built once at startup and shared by reference; nothing here mutates after `new`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) questions: Vec<Question>,
    pub(crate) archetypes: Vec<Archetype>,
    pub(crate) primaries: BTreeMap<Category, String>,
}

impl Catalog {
    pub fn new(
        questions: Vec<Question>,
        archetypes: Vec<Archetype>,
        primaries: BTreeMap<Category, String>,
    ) -> Result<Self, CommonError> {
        validate_questions(&questions)?;
        validate_archetypes(&archetypes)?;
        validate_primaries(&archetypes, &primaries)?;

        Ok(Self {
            questions,
            archetypes,
            primaries,
        })
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, CommonError> {
        Self::new(file.questions, file.archetypes, file.primaries)
    }

    pub fn from_json(content: &str) -> Result<Self, CommonError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    /// The catalog shipped with the site.
    pub fn builtin() -> Result<Self, CommonError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: u8) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub fn archetype(&self, slug: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.slug == slug)
    }

    /// Primary archetype for `category` via the fixed slug mapping.
    pub fn primary(&self, category: Category) -> Option<&Archetype> {
        self.primaries
            .get(&category)
            .and_then(|slug| self.archetype(slug))
    }

    /// First catalog entry; returned for incomplete answers.
    pub fn default_archetype(&self) -> &Archetype {
        // Non-empty is checked in `new`.
        &self.archetypes[0]
    }

    pub fn by_chapter(&self, chapter: Chapter) -> Vec<&Archetype> {
        self.archetypes
            .iter()
            .filter(|a| a.chapter == chapter)
            .collect()
    }
}

fn validate_questions(questions: &[Question]) -> Result<(), CommonError> {
    if questions.len() != QUESTION_COUNT {
        return Err(CommonError::InvalidCatalog(format!(
            "expected {QUESTION_COUNT} questions, found {}",
            questions.len()
        )));
    }

    for (expected_id, question) in (1u8..).zip(questions) {
        if question.id != expected_id {
            return Err(CommonError::InvalidCatalog(format!(
                "question at position {expected_id} has id {}",
                question.id
            )));
        }

        if question.options.len() != Category::ALL.len() {
            return Err(CommonError::InvalidCatalog(format!(
                "question {} must offer {} options, found {}",
                question.id,
                Category::ALL.len(),
                question.options.len()
            )));
        }

        for category in Category::ALL {
            let count = question
                .options
                .iter()
                .filter(|o| o.category == category)
                .count();
            if count != 1 {
                return Err(CommonError::InvalidCatalog(format!(
                    "question {} must offer exactly one '{category}' option, found {count}",
                    question.id
                )));
            }
        }
    }

    Ok(())
}

fn validate_archetypes(archetypes: &[Archetype]) -> Result<(), CommonError> {
    if archetypes.len() < MIN_ARCHETYPES {
        return Err(CommonError::InvalidCatalog(format!(
            "expected at least {MIN_ARCHETYPES} archetypes, found {}",
            archetypes.len()
        )));
    }

    let slug_re = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex");
    let mut seen = HashSet::new();
    for archetype in archetypes {
        if !slug_re.is_match(&archetype.slug) {
            return Err(CommonError::InvalidCatalog(format!(
                "malformed archetype slug: '{}'",
                archetype.slug
            )));
        }
        if !seen.insert(archetype.slug.as_str()) {
            return Err(CommonError::InvalidCatalog(format!(
                "duplicate archetype slug: '{}'",
                archetype.slug
            )));
        }
    }

    Ok(())
}

fn validate_primaries(
    archetypes: &[Archetype],
    primaries: &BTreeMap<Category, String>,
) -> Result<(), CommonError> {
    for category in Category::ALL {
        let slug = primaries.get(&category).ok_or_else(|| {
            CommonError::InvalidCatalog(format!("no primary archetype mapped for '{category}'"))
        })?;

        let archetype = archetypes.iter().find(|a| &a.slug == slug).ok_or_else(|| {
            CommonError::InvalidCatalog(format!(
                "primary archetype '{slug}' for '{category}' is not in the catalog"
            ))
        })?;

        if archetype.category != category {
            return Err(CommonError::InvalidCatalog(format!(
                "primary archetype '{slug}' belongs to '{}', not '{category}'",
                archetype.category
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn builtin_file() -> CatalogFile {
        serde_json::from_str(BUILTIN_CATALOG).expect("builtin catalog parses")
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("builtin catalog is valid");
        assert_eq!(catalog.questions().len(), 3);
        assert_eq!(catalog.archetypes().len(), 5);
        assert_eq!(catalog.default_archetype().slug, "firebird");
        assert_eq!(catalog.primary(Category::Warm).unwrap().slug, "khokhloma");
        assert_eq!(catalog.primary(Category::Cool).unwrap().slug, "gzhel");
        assert_eq!(catalog.primary(Category::Earth).unwrap().slug, "az-esm-svet");
    }

    #[test]
    fn every_question_offers_each_category_once() {
        let catalog = Catalog::builtin().unwrap();
        for question in catalog.questions() {
            for category in Category::ALL {
                assert!(question.options.iter().any(|o| o.category == category));
            }
        }
        assert_eq!(catalog.question(2).unwrap().id, 2);
        assert!(catalog.question(4).is_none());
    }

    #[test]
    fn lookup_unknown_slug_is_none() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.archetype("nonexistent").is_none());
        assert_eq!(catalog.archetype("gzhel").unwrap().name, "Гжель: Лунная Соната");
    }

    #[test]
    fn by_chapter_preserves_catalog_order() {
        let catalog = Catalog::builtin().unwrap();
        let slugs: Vec<&str> = catalog
            .by_chapter(Chapter::I)
            .iter()
            .map(|a| a.slug.as_str())
            .collect();
        assert_eq!(slugs, ["az-esm-svet", "ya-est-svet"]);
        assert_eq!(catalog.by_chapter(Chapter::III).len(), 1);
    }

    #[test]
    fn rejects_duplicate_slug() {
        let mut file = builtin_file();
        let dup = file.archetypes[1].clone();
        file.archetypes.push(dup);
        let err = Catalog::from_file(file).unwrap_err();
        assert!(err.to_string().contains("duplicate archetype slug"));
    }

    #[test]
    fn rejects_malformed_slug() {
        let mut file = builtin_file();
        file.archetypes[0].slug = "Fire Bird".to_string();
        let err = Catalog::from_file(file).unwrap_err();
        assert!(err.to_string().contains("malformed archetype slug"));
    }

    #[test]
    fn rejects_missing_primary() {
        let mut file = builtin_file();
        file.primaries.remove(&Category::Earth);
        let err = Catalog::from_file(file).unwrap_err();
        assert!(err.to_string().contains("no primary archetype mapped for 'earth'"));
    }

    #[test]
    fn rejects_primary_outside_catalog() {
        let mut file = builtin_file();
        file.primaries.insert(Category::Cool, "ghost".to_string());
        let err = Catalog::from_file(file).unwrap_err();
        assert!(err.to_string().contains("'ghost'"));
    }

    #[test]
    fn rejects_primary_of_wrong_category() {
        let mut file = builtin_file();
        file.primaries.insert(Category::Cool, "khokhloma".to_string());
        let err = Catalog::from_file(file).unwrap_err();
        assert!(err.to_string().contains("belongs to 'warm'"));
    }

    #[test]
    fn rejects_question_with_repeated_category() {
        let mut file = builtin_file();
        file.questions[1].options[2].category = Category::Warm;
        let err = Catalog::from_file(file).unwrap_err();
        assert!(err.to_string().contains("question 2"));
    }

    #[test]
    fn rejects_wrong_question_count() {
        let mut file = builtin_file();
        file.questions.pop();
        assert!(matches!(
            Catalog::from_file(file),
            Err(CommonError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn malformed_json_reports_line() {
        let err = Catalog::from_json("{\n  \"questions\": [,\n}").unwrap_err();
        assert!(matches!(err, CommonError::Parse { line: 2, .. }));
    }
}
