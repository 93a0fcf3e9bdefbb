use thiserror::Error;

use crate::assessment::AssessmentType;

/// 採点処理と周辺機能のエラー
///
/// 入出力系以外はすべて呼び出し側の入力誤り。再試行はせず、途中結果も返さない。
#[derive(Error, Debug)]
pub enum Error {
    /// 回答欠落
    #[error("incomplete answers: question {missing} is unanswered ({answered} of {expected} answered)")]
    IncompleteAnswers {
        missing: usize,
        answered: usize,
        expected: usize,
    },

    /// 回答選択肢が違反
    #[error("invalid answer value {value} for question {index}")]
    InvalidAnswerValue { index: usize, value: i64 },

    #[error("score {score} is outside 0..={max} for {assessment}")]
    ScoreOutOfRange {
        score: u32,
        max: u32,
        assessment: AssessmentType,
    },

    #[error("unknown severity `{severity}` for {assessment}")]
    UnknownSeverity {
        severity: String,
        assessment: String,
    },

    /// 設問範囲外
    #[error("question {index} does not exist (assessment has {count} questions)")]
    UnknownQuestion { index: usize, count: usize },

    #[error("line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("unknown assessment type `{0}`")]
    UnknownAssessmentType(String),

    #[error("cannot {action} while session is {state}")]
    InvalidTransition { action: &'static str, state: String },

    #[error("{field} must be between 1 and 10, got {value}")]
    InvalidMoodValue { field: &'static str, value: i64 },

    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
