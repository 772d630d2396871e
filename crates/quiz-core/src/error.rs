/// Error types shared by the quiz core and the crates built on it.
///
/// These cover catalog integrity and caller input that cannot be mapped onto the
/// data model. Scoring itself never fails: incomplete answers and unknown slugs
/// are normal values, not errors. Application crates wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("catalog parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("unknown category: '{0}' (expected warm, cool or earth)")]
    UnknownCategory(String),

    #[error("unknown chapter: '{0}' (expected I, II or III)")]
    UnknownChapter(String),

    #[error("unknown question: {0} (expected 1, 2 or 3)")]
    UnknownQuestion(u8),
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        CommonError::Parse {
            line: err.line(),
            message: err.to_string(),
        }
    }
}
