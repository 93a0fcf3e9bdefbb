use mindcheck::{
    classify, compute_score, get_recommendations, run, score_answers, AnswerSet,
    AssessmentSession, AssessmentType, Error, SeverityLevel, QUESTION_BANK,
};
use pretty_assertions::assert_eq;

/// Every answer set where each question takes the same value, for every value on the scale.
fn uniform_answer_sets(assessment: AssessmentType) -> Vec<(u8, AnswerSet)> {
    (0..=assessment.spec().max_option_value)
        .map(|value| {
            (
                value,
                AnswerSet::from_iter(vec![value; assessment.question_count()]),
            )
        })
        .collect()
}

#[test]
fn test_score_is_exact_sum_within_range() {
    for assessment in AssessmentType::ALL {
        for (value, answers) in uniform_answer_sets(assessment) {
            let score = score_answers(assessment, &answers).unwrap();
            assert_eq!(score, u32::from(value) * assessment.question_count() as u32);
            assert!(score <= assessment.max_score());
        }
    }

    // 階段状の回答
    let questions = QUESTION_BANK.questions(AssessmentType::Phq9);
    let answers = AnswerSet::from_iter((0..9).map(|index| (index % 4) as u8));
    assert_eq!(compute_score(&answers, questions).unwrap(), 12);
}

#[test]
fn test_adjacent_boundaries_fall_in_different_bands() {
    let boundaries = [
        (AssessmentType::Phq9, 4, 5),
        (AssessmentType::Phq9, 9, 10),
        (AssessmentType::Phq9, 14, 15),
        (AssessmentType::Phq9, 19, 20),
        (AssessmentType::Gad7, 4, 5),
        (AssessmentType::Gad7, 9, 10),
        (AssessmentType::Gad7, 14, 15),
        (AssessmentType::Wellbeing, 9, 10),
        (AssessmentType::Wellbeing, 15, 16),
        (AssessmentType::Generic, 7, 8),
        (AssessmentType::Generic, 12, 13),
    ];
    for (assessment, lower, upper) in boundaries {
        assert_ne!(
            classify(lower, assessment).unwrap(),
            classify(upper, assessment).unwrap(),
            "{assessment} {lower}/{upper}"
        );
    }
}

#[test]
fn test_recommendations_exist_for_every_reachable_band() {
    for assessment in AssessmentType::ALL {
        for score in 0..=assessment.max_score() {
            let severity = classify(score, assessment).unwrap();
            assert!(!get_recommendations(severity, assessment).unwrap().is_empty());
        }
    }
}

#[test]
fn test_phq9_all_zero() {
    let result = run(AssessmentType::Phq9, &AnswerSet::from_iter(vec![0u8; 9])).unwrap();
    assert_eq!(result.total_score(), 0);
    assert_eq!(result.severity_level(), SeverityLevel::Minimal);
    assert!(!result.requires_urgent_notice());
    assert_eq!(
        result.recommendations()[0],
        "Continue your current self-care practices"
    );
}

#[test]
fn test_phq9_all_three() {
    let result = run(AssessmentType::Phq9, &AnswerSet::from_iter(vec![3u8; 9])).unwrap();
    assert_eq!(result.total_score(), 27);
    assert_eq!(result.severity_level(), SeverityLevel::Severe);
    assert!(result.requires_urgent_notice());
}

#[test]
fn test_phq9_moderately_severe_is_urgent() {
    // 15点
    let answers = AnswerSet::from_iter(vec![2u8, 2, 2, 2, 2, 2, 1, 1, 1]);
    let result = run(AssessmentType::Phq9, &answers).unwrap();
    assert_eq!(result.total_score(), 15);
    assert_eq!(result.severity_level(), SeverityLevel::ModeratelySevere);
    assert!(result.requires_urgent_notice());
}

#[test]
fn test_phq9_missing_answer() {
    let answers = AnswerSet::from_iter(vec![2u8; 8]);
    assert!(matches!(
        run(AssessmentType::Phq9, &answers),
        Err(Error::IncompleteAnswers {
            missing: 8,
            answered: 8,
            expected: 9
        })
    ));
}

#[test]
fn test_gad7_boundary() {
    // 14点と15点
    let moderate = AnswerSet::from_iter(vec![2u8; 7]);
    let severe = AnswerSet::from_iter(vec![3u8, 2, 2, 2, 2, 2, 2]);

    let result = run(AssessmentType::Gad7, &moderate).unwrap();
    assert_eq!(result.total_score(), 14);
    assert_eq!(result.severity_level(), SeverityLevel::Moderate);
    assert!(!result.requires_urgent_notice());

    let result = run(AssessmentType::Gad7, &severe).unwrap();
    assert_eq!(result.total_score(), 15);
    assert_eq!(result.severity_level(), SeverityLevel::Severe);
    assert!(result.requires_urgent_notice());
}

#[test]
fn test_run_is_idempotent() {
    let answers = AnswerSet::from_iter(vec![3u8, 2, 4, 1, 0]);
    let first = run(AssessmentType::Wellbeing, &answers).unwrap();
    let second = run(AssessmentType::Wellbeing, &answers).unwrap();
    assert_eq!(first.total_score(), second.total_score());
    assert_eq!(first.severity_level(), second.severity_level());
    assert_eq!(first.recommendations(), second.recommendations());
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn test_invalid_value_is_not_clamped() {
    let mut answers = AnswerSet::from_iter(vec![0u8; 7]);
    answers.insert(3, 9);
    assert!(matches!(
        run(AssessmentType::Gad7, &answers),
        Err(Error::InvalidAnswerValue { index: 3, value: 9 })
    ));
}

#[test]
fn test_session_matches_direct_run() {
    let values = [1u8, 3, 0, 2, 2, 1, 0, 3, 1];
    let mut session = AssessmentSession::new(AssessmentType::Phq9);
    session.start().unwrap();
    for value in values {
        session.answer(value).unwrap();
    }
    let from_session = session.complete().unwrap();
    let direct = run(AssessmentType::Phq9, &AnswerSet::from_iter(values)).unwrap();
    assert_eq!(from_session.total_score(), direct.total_score());
    assert_eq!(from_session.severity_level(), direct.severity_level());
    assert_eq!(from_session.recommendations(), direct.recommendations());
}
