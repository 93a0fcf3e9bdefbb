use crate::answer::AnswerSet;
use crate::assessment::AssessmentType;
use crate::error::{Error, Result};
use crate::question::{Question, QUESTION_BANK};

/// 合計点数方式
///
/// 全設問の回答値を単純に足し合わせる。逆転項目はない。
///
/// 次の場合は採点しない。
/// - `questions` のいずれかの位置が未回答 ([`Error::IncompleteAnswers`])
/// - 設問数を超える位置に回答がある ([`Error::UnknownQuestion`])
/// - 回答値がその設問の選択肢にない ([`Error::InvalidAnswerValue`])
pub fn compute_score(answers: &AnswerSet, questions: &[Question]) -> Result<u32> {
    let question_count = questions.len();
    if let Some((index, _)) = answers.iter().find(|&(index, _)| index >= question_count) {
        return Err(Error::UnknownQuestion {
            index,
            count: question_count,
        });
    }

    questions
        .iter()
        .enumerate()
        .try_fold(0u32, |total, (index, question)| {
            let value = answers.get(index).ok_or(Error::IncompleteAnswers {
                missing: index,
                answered: answers.len(),
                expected: question_count,
            })?;
            if !question.accepts(value) {
                return Err(Error::InvalidAnswerValue {
                    index,
                    value: value.into(),
                });
            }
            Ok(total + u32::from(value))
        })
}

/// 評価票の種類を指定して採点する
pub fn score_answers(assessment: AssessmentType, answers: &AnswerSet) -> Result<u32> {
    compute_score(answers, QUESTION_BANK.questions(assessment))
}

#[cfg(test)]
mod test {
    use super::*;

    fn phq9() -> &'static [Question] {
        QUESTION_BANK.questions(AssessmentType::Phq9)
    }

    #[test]
    fn test_sum() {
        let answers = AnswerSet::from_iter(vec![0u8, 1, 2, 3, 0, 1, 2, 3, 1]);
        assert_eq!(compute_score(&answers, phq9()).unwrap(), 13);
    }

    #[test]
    fn test_all_zero_and_all_max() {
        for assessment in AssessmentType::ALL {
            let count = assessment.question_count();
            let max = assessment.spec().max_option_value;

            let low = AnswerSet::from_iter(vec![0u8; count]);
            assert_eq!(score_answers(assessment, &low).unwrap(), 0);

            let high = AnswerSet::from_iter(vec![max; count]);
            assert_eq!(score_answers(assessment, &high).unwrap(), assessment.max_score());
        }
    }

    #[test]
    fn test_not_fullfilled() {
        let answers = AnswerSet::from_iter(vec![1u8; 8]);
        match compute_score(&answers, phq9()) {
            Err(Error::IncompleteAnswers {
                missing,
                answered,
                expected,
            }) => {
                assert_eq!(missing, 8);
                assert_eq!(answered, 8);
                assert_eq!(expected, 9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_gap_reports_first_missing() {
        let mut answers = AnswerSet::from_iter(vec![1u8; 9]);
        answers.remove(3);
        answers.remove(6);
        assert!(matches!(
            compute_score(&answers, phq9()),
            Err(Error::IncompleteAnswers { missing: 3, .. })
        ));
    }

    #[test]
    fn test_illegal_answer() {
        let mut answers = AnswerSet::from_iter(vec![1u8; 9]);
        answers.insert(4, 4);
        assert!(matches!(
            compute_score(&answers, phq9()),
            Err(Error::InvalidAnswerValue { index: 4, value: 4 })
        ));
    }

    #[test]
    fn test_wellbeing_accepts_four() {
        let answers = AnswerSet::from_iter(vec![4u8, 4, 4, 4, 4]);
        assert_eq!(score_answers(AssessmentType::Wellbeing, &answers).unwrap(), 20);
        assert!(score_answers(AssessmentType::Gad7, &AnswerSet::from_iter(vec![4u8; 7])).is_err());
    }

    #[test]
    fn test_exceeded() {
        let answers = AnswerSet::from_iter(vec![0u8; 10]);
        assert!(matches!(
            compute_score(&answers, phq9()),
            Err(Error::UnknownQuestion { index: 9, count: 9 })
        ));
    }
}
