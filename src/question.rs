use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::assessment::AssessmentType;

/// 評価票の設問マスタ。クレートに埋め込んだJSONから一度だけ読み込む。
pub static QUESTION_BANK: Lazy<QuestionBank> = Lazy::new(|| {
    serde_json::from_str(include_str!("../resources/question_bank.json"))
        .expect("embedded question bank is valid JSON")
});

/// 回答選択肢
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: String,
}

/// 設問
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// 値の昇順に並ぶ
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// 選択肢として存在する値か
    pub fn accepts(&self, value: u8) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn option(&self, value: u8) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

/// 評価票ひとつ分の設問群
#[derive(Debug, Deserialize)]
pub struct AssessmentQuestions {
    pub assessment: AssessmentType,
    /// 教示文
    pub instruction: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionBank {
    pub assessments: Vec<AssessmentQuestions>,
}

impl QuestionBank {
    fn entry(&self, assessment: AssessmentType) -> Option<&AssessmentQuestions> {
        self.assessments
            .iter()
            .find(|entry| entry.assessment == assessment)
    }

    /// 評価票の全設問を順番に取得する
    pub fn questions(&self, assessment: AssessmentType) -> &[Question] {
        self.entry(assessment)
            .map(|entry| entry.questions.as_slice())
            .unwrap_or(&[])
    }

    pub fn instruction(&self, assessment: AssessmentType) -> Option<&str> {
        self.entry(assessment).map(|entry| entry.instruction.as_str())
    }

    /// 0始まりの位置で設問を取得する
    pub fn get(&self, assessment: AssessmentType, index: usize) -> Option<&Question> {
        self.questions(assessment).get(index)
    }

    /// 設問IDを指定して設問を取得する
    pub fn question(&self, id: &str) -> Option<(AssessmentType, &Question)> {
        self.assessments.iter().find_map(|entry| {
            entry
                .questions
                .iter()
                .find(|question| question.id == id)
                .map(|question| (entry.assessment, question))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_question_counts() {
        for assessment in AssessmentType::ALL {
            assert_eq!(
                QUESTION_BANK.questions(assessment).len(),
                assessment.question_count(),
                "{assessment}"
            );
        }
    }

    #[test]
    fn test_options_match_scale() {
        for assessment in AssessmentType::ALL {
            let max = assessment.spec().max_option_value;
            for question in QUESTION_BANK.questions(assessment) {
                let values = question
                    .options
                    .iter()
                    .map(|option| option.value)
                    .collect::<Vec<u8>>();
                assert_eq!(values, (0..=max).collect::<Vec<u8>>(), "{}", question.id);
            }
        }
    }

    #[test]
    fn test_get() {
        assert_eq!(
            Some("phq9-1"),
            QUESTION_BANK.get(AssessmentType::Phq9, 0).map(|q| q.id.as_str())
        );
        assert_eq!(
            Some("phq9-9"),
            QUESTION_BANK.get(AssessmentType::Phq9, 8).map(|q| q.id.as_str())
        );
        assert_eq!(None, QUESTION_BANK.get(AssessmentType::Phq9, 9));
    }

    #[test]
    fn test_question() {
        let (assessment, question) = QUESTION_BANK.question("gad7-4").unwrap();
        assert_eq!(assessment, AssessmentType::Gad7);
        assert_eq!(question.text, "Trouble relaxing");
        assert!(QUESTION_BANK.question("gad7-8").is_none());
    }

    #[test]
    fn test_accepts() {
        let question = QUESTION_BANK.get(AssessmentType::Wellbeing, 0).unwrap();
        assert!(question.accepts(0));
        assert!(question.accepts(4));
        assert!(!question.accepts(5));
        assert_eq!(question.option(4).map(|o| o.label.as_str()), Some("Excellent"));
    }
}
