use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::answer::AnswerSet;
use crate::assessment::AssessmentType;
use crate::error::Result;
use crate::recommendation::{get_recommendations, summary};
use crate::scoring::score_answers;
use crate::severity::{classify, SeverityLevel};

/// 評価結果。実施1回につき1つ作られ、作成後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentResult {
    assessment_type: AssessmentType,
    total_score: u32,
    max_score: u32,
    severity_level: SeverityLevel,
    recommendations: Vec<String>,
    summary: String,
    requires_urgent_notice: bool,
    completion_timestamp: DateTime<Utc>,
}

impl AssessmentResult {
    pub fn assessment_type(&self) -> AssessmentType {
        self.assessment_type
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn severity_level(&self) -> SeverityLevel {
        self.severity_level
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn requires_urgent_notice(&self) -> bool {
        self.requires_urgent_notice
    }

    pub fn completion_timestamp(&self) -> DateTime<Utc> {
        self.completion_timestamp
    }
}

/// 採点、区分判定、推奨事項の取得を順に行う
///
/// いずれかの段階で失敗した場合はそのエラーをそのまま返す。
pub fn run(assessment: AssessmentType, answers: &AnswerSet) -> Result<AssessmentResult> {
    run_at(assessment, answers, Utc::now())
}

/// 完了時刻を指定して実行する
pub fn run_at(
    assessment: AssessmentType,
    answers: &AnswerSet,
    completed_at: DateTime<Utc>,
) -> Result<AssessmentResult> {
    let total_score = score_answers(assessment, answers)?;
    let severity_level = classify(total_score, assessment)?;
    let recommendations = get_recommendations(severity_level, assessment)?;
    let summary = summary(severity_level, assessment)?;
    let requires_urgent_notice = severity_level.requires_urgent_notice();

    debug!(%assessment, total_score, severity = %severity_level, "assessment scored");
    if requires_urgent_notice {
        info!(%assessment, severity = %severity_level, "urgent notice required");
    }

    Ok(AssessmentResult {
        assessment_type: assessment,
        total_score,
        max_score: assessment.max_score(),
        severity_level,
        recommendations: recommendations.iter().map(|text| text.to_string()).collect(),
        summary: summary.to_string(),
        requires_urgent_notice,
        completion_timestamp: completed_at,
    })
}
