//! Rule-based agents
//!
//! - `CareerAgent`: résumé/cover letter templates, document and vacancy reviews
//! - `LearningAgent`: study roadmaps and job search steps

pub mod career;
pub mod learning;

pub use career::{CareerAgent, DocumentFindings, DocumentKind, TemplateResult, VacancyReport};
pub use learning::{Direction, LearningAgent, Roadmap, RoadmapRequest};
