pub mod catalog;
pub mod error;
pub mod mcp_api;
pub mod model;
pub mod resolver;
pub mod session;

pub use catalog::Catalog;
pub use error::CommonError;
pub use model::{Answers, Archetype, Category, Chapter, Confidence, Question, QuizResult};
pub use resolver::Resolver;
pub use session::{QuizAction, QuizSession, QuizStep};
