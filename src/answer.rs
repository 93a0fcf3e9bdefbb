use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assessment::AssessmentType;
use crate::error::{Error, Result};
use crate::question::QUESTION_BANK;

/// 回答の集合。設問位置（0始まり）から選択肢の値への対応。
///
/// 値の妥当性はここでは検査しない。採点時に設問の選択肢と照合する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<usize, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設問位置を指定して回答を格納する。既存の回答は上書きする。
    pub fn insert(&mut self, index: usize, value: u8) -> Option<u8> {
        self.values.insert(index, value)
    }

    /// 次の未回答の位置に回答を格納し、その位置を返す
    pub fn push(&mut self, value: u8) -> usize {
        let index = self.next_unanswered();
        self.values.insert(index, value);
        index
    }

    /// 設問IDを指定して回答を格納する
    pub fn insert_by_id(
        &mut self,
        assessment: AssessmentType,
        question_id: &str,
        value: u8,
    ) -> Result<usize> {
        let questions = QUESTION_BANK.questions(assessment);
        let index = questions
            .iter()
            .position(|question| question.id == question_id)
            .ok_or_else(|| Error::NotFound {
                kind: "question",
                id: question_id.to_string(),
            })?;
        self.values.insert(index, value);
        Ok(index)
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.values.get(&index).copied()
    }

    pub fn remove(&mut self, index: usize) -> Option<u8> {
        self.values.remove(&index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 先頭から見て最初の未回答位置
    pub fn next_unanswered(&self) -> usize {
        (0..)
            .find(|index| !self.values.contains_key(index))
            .unwrap_or(self.values.len())
    }

    /// `0..question_count` が全て回答済みで、範囲外の回答がないか
    pub fn is_complete(&self, question_count: usize) -> bool {
        self.values.len() == question_count
            && (0..question_count).all(|index| self.values.contains_key(&index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.values.iter().map(|(&index, &value)| (index, value))
    }
}

impl FromIterator<u8> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().enumerate().collect(),
        }
    }
}

impl FromIterator<(usize, u8)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (usize, u8)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_push_fills_gaps_in_order() {
        let mut answers = AnswerSet::new();
        answers.insert(1, 2);
        assert_eq!(answers.push(3), 0);
        assert_eq!(answers.push(1), 2);
        assert_eq!(answers.get(0), Some(3));
        assert_eq!(answers.get(1), Some(2));
        assert_eq!(answers.get(2), Some(1));
    }

    #[test]
    fn test_is_complete() {
        let answers = AnswerSet::from_iter(vec![0u8; 9]);
        assert!(answers.is_complete(9));
        assert!(!answers.is_complete(10));

        let mut answers = AnswerSet::from_iter(vec![0u8; 8]);
        assert!(!answers.is_complete(9));
        answers.insert(9, 0);
        assert!(!answers.is_complete(9));
    }

    #[test]
    fn test_insert_by_id() {
        let mut answers = AnswerSet::new();
        assert_eq!(
            answers.insert_by_id(AssessmentType::Gad7, "gad7-3", 2).ok(),
            Some(2)
        );
        assert_eq!(answers.get(2), Some(2));
        assert!(answers
            .insert_by_id(AssessmentType::Gad7, "phq9-1", 2)
            .is_err());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut answers = AnswerSet::new();
        assert_eq!(answers.insert(0, 1), None);
        assert_eq!(answers.insert(0, 3), Some(1));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_serialize_as_map() {
        let answers = AnswerSet::from_iter(vec![(0usize, 1u8), (2, 3)]);
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"0":1,"2":3}"#);
        let back: AnswerSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, answers);
    }
}
