//! Self-assessment engine for a mental-health companion.
//!
//! PHQ-9 / GAD-7 style questionnaires and wellbeing check-ins are scored,
//! classified into severity bands, and mapped to recommendations:
//!
//! ```
//! use mindcheck::{run, AnswerSet, AssessmentType, SeverityLevel};
//!
//! let answers = AnswerSet::from_iter(vec![1u8; 9]);
//! let result = run(AssessmentType::Phq9, &answers).unwrap();
//! assert_eq!(result.total_score(), 9);
//! assert_eq!(result.severity_level(), SeverityLevel::Mild);
//! assert!(!result.requires_urgent_notice());
//! ```

pub mod answer;
pub mod assessment;
pub mod bulk;
pub mod config;
pub mod conversation;
pub mod error;
pub mod mood;
pub mod profile;
pub mod question;
pub mod recommendation;
pub mod runner;
pub mod scoring;
pub mod session;
pub mod severity;
pub mod telemetry;

pub use answer::AnswerSet;
pub use assessment::{AssessmentSpec, AssessmentType, Cadence};
pub use bulk::read_bulk;
pub use error::{Error, Result};
pub use question::{AnswerOption, Question, QuestionBank, QUESTION_BANK};
pub use recommendation::{crisis_resources, get_recommendations, summary, CrisisResource};
pub use runner::{run, run_at, AssessmentResult};
pub use scoring::{compute_score, score_answers};
pub use session::{AssessmentSession, SessionState};
pub use severity::{classify, SeverityLevel};
