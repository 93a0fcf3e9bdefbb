use std::fmt;

use tracing::debug;

use crate::answer::AnswerSet;
use crate::assessment::AssessmentType;
use crate::error::{Error, Result};
use crate::question::{Question, QUESTION_BANK};
use crate::runner::{self, AssessmentResult};

/// 設問進行の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    /// 表示中の設問位置
    InProgress(usize),
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => f.write_str("not started"),
            SessionState::InProgress(index) => write!(f, "on question {}", index + 1),
            SessionState::Completed => f.write_str("completed"),
        }
    }
}

/// 1問ずつ回答を集める評価セッション
///
/// 前の設問に戻っても回答は消えない。
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    assessment: AssessmentType,
    state: SessionState,
    answers: AnswerSet,
}

impl AssessmentSession {
    pub fn new(assessment: AssessmentType) -> Self {
        Self {
            assessment,
            state: SessionState::NotStarted,
            answers: AnswerSet::new(),
        }
    }

    pub fn assessment(&self) -> AssessmentType {
        self.assessment
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            action,
            state: self.state.to_string(),
        }
    }

    fn current_index(&self, action: &'static str) -> Result<usize> {
        match self.state {
            SessionState::InProgress(index) => Ok(index),
            _ => Err(self.invalid(action)),
        }
    }

    pub fn start(&mut self) -> Result<()> {
        if self.state != SessionState::NotStarted {
            return Err(self.invalid("start"));
        }
        self.state = SessionState::InProgress(0);
        Ok(())
    }

    /// 表示中の設問
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.state {
            SessionState::InProgress(index) => QUESTION_BANK.get(self.assessment, index),
            _ => None,
        }
    }

    /// 表示中の設問に回答し、次の設問へ進む
    ///
    /// 最後の設問では位置を動かさない。選択肢にない値は受け付けない。
    pub fn answer(&mut self, value: u8) -> Result<()> {
        let index = self.current_index("answer")?;
        let question = QUESTION_BANK
            .get(self.assessment, index)
            .ok_or(Error::UnknownQuestion {
                index,
                count: self.assessment.question_count(),
            })?;
        if !question.accepts(value) {
            return Err(Error::InvalidAnswerValue {
                index,
                value: value.into(),
            });
        }
        self.answers.insert(index, value);
        let last = self.assessment.question_count() - 1;
        self.state = SessionState::InProgress((index + 1).min(last));
        debug!(assessment = %self.assessment, index, "answer recorded");
        Ok(())
    }

    pub fn previous(&mut self) -> Result<()> {
        let index = self.current_index("go back")?;
        if index == 0 {
            return Err(self.invalid("go back"));
        }
        self.state = SessionState::InProgress(index - 1);
        Ok(())
    }

    /// 回答済みの設問、または最初の未回答の設問へ移動する
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        self.current_index("jump")?;
        let count = self.assessment.question_count();
        if index >= count {
            return Err(Error::UnknownQuestion { index, count });
        }
        if self.answers.get(index).is_none() && index != self.answers.next_unanswered() {
            return Err(self.invalid("jump past unanswered questions"));
        }
        self.state = SessionState::InProgress(index);
        Ok(())
    }

    /// 全問回答済みか
    pub fn is_ready(&self) -> bool {
        self.answers.is_complete(self.assessment.question_count())
    }

    /// 採点して完了する。失敗した場合は状態を変えない。
    pub fn complete(&mut self) -> Result<AssessmentResult> {
        self.current_index("complete")?;
        let result = runner::run(self.assessment, &self.answers)?;
        self.state = SessionState::Completed;
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::severity::SeverityLevel;

    #[test]
    fn test_walk_through() {
        let mut session = AssessmentSession::new(AssessmentType::Gad7);
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.answer(1).is_err());

        session.start().unwrap();
        assert_eq!(session.state(), SessionState::InProgress(0));
        assert_eq!(session.current_question().map(|q| q.id.as_str()), Some("gad7-1"));

        for _ in 0..7 {
            session.answer(2).unwrap();
        }
        assert_eq!(session.state(), SessionState::InProgress(6));
        assert!(session.is_ready());

        let result = session.complete().unwrap();
        assert_eq!(result.total_score(), 14);
        assert_eq!(result.severity_level(), SeverityLevel::Moderate);
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.start().is_err());
    }

    #[test]
    fn test_back_keeps_answers() {
        let mut session = AssessmentSession::new(AssessmentType::Phq9);
        session.start().unwrap();
        session.answer(1).unwrap();
        session.answer(2).unwrap();
        session.answer(3).unwrap();
        session.previous().unwrap();
        session.previous().unwrap();
        assert_eq!(session.state(), SessionState::InProgress(1));
        assert_eq!(session.answers().get(1), Some(2));
        assert_eq!(session.answers().get(2), Some(3));

        session.answer(0).unwrap();
        assert_eq!(session.answers().get(1), Some(0));
        assert_eq!(session.answers().get(2), Some(3));
        assert_eq!(session.state(), SessionState::InProgress(2));
    }

    #[test]
    fn test_go_to() {
        let mut session = AssessmentSession::new(AssessmentType::Phq9);
        session.start().unwrap();
        session.answer(1).unwrap();
        session.answer(1).unwrap();
        assert!(session.go_to(0).is_ok());
        assert!(session.go_to(2).is_ok());
        assert!(session.go_to(5).is_err());
        assert!(session.go_to(9).is_err());
        assert_eq!(session.state(), SessionState::InProgress(2));
    }

    #[test]
    fn test_previous_at_first_question() {
        let mut session = AssessmentSession::new(AssessmentType::Generic);
        session.start().unwrap();
        assert!(matches!(
            session.previous(),
            Err(Error::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_illegal_answer_does_not_advance() {
        let mut session = AssessmentSession::new(AssessmentType::Phq9);
        session.start().unwrap();
        assert!(matches!(
            session.answer(4),
            Err(Error::InvalidAnswerValue { index: 0, value: 4 })
        ));
        assert_eq!(session.state(), SessionState::InProgress(0));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_complete_requires_all_answers() {
        let mut session = AssessmentSession::new(AssessmentType::Phq9);
        session.start().unwrap();
        for _ in 0..8 {
            session.answer(0).unwrap();
        }
        assert!(matches!(
            session.complete(),
            Err(Error::IncompleteAnswers { missing: 8, .. })
        ));
        assert_eq!(session.state(), SessionState::InProgress(8));
    }
}
