use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessment::AssessmentType;
use crate::error::{Error, Result};

/// 重症度区分
///
/// 症状尺度 (PHQ-9, GAD-7) は `Minimal`..`Severe` の区分を、
/// ウェルビーイング系は `Excellent`, `Fair`, `NeedsAttention` の3区分を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
    Excellent,
    Fair,
    NeedsAttention,
}

/// (上限値（含む）, 区分) を昇順に並べた表
const PHQ9_BANDS: &[(u32, SeverityLevel)] = &[
    (4, SeverityLevel::Minimal),
    (9, SeverityLevel::Mild),
    (14, SeverityLevel::Moderate),
    (19, SeverityLevel::ModeratelySevere),
    (27, SeverityLevel::Severe),
];

const GAD7_BANDS: &[(u32, SeverityLevel)] = &[
    (4, SeverityLevel::Minimal),
    (9, SeverityLevel::Mild),
    (14, SeverityLevel::Moderate),
    (21, SeverityLevel::Severe),
];

/// (下限パーセント（含む）, 区分) を降順に並べた表
const WELLBEING_BANDS: &[(u32, SeverityLevel)] = &[
    (80, SeverityLevel::Excellent),
    (50, SeverityLevel::Fair),
    (0, SeverityLevel::NeedsAttention),
];

impl SeverityLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Minimal => "minimal",
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::ModeratelySevere => "moderately_severe",
            SeverityLevel::Severe => "severe",
            SeverityLevel::Excellent => "excellent",
            SeverityLevel::Fair => "fair",
            SeverityLevel::NeedsAttention => "needs_attention",
        }
    }

    /// 評価票が出しうる区分を軽い順に返す
    pub fn levels_for(assessment: AssessmentType) -> Vec<SeverityLevel> {
        match assessment {
            AssessmentType::Phq9 => PHQ9_BANDS.iter().map(|&(_, level)| level).collect(),
            AssessmentType::Gad7 => GAD7_BANDS.iter().map(|&(_, level)| level).collect(),
            AssessmentType::Wellbeing | AssessmentType::Generic => {
                WELLBEING_BANDS.iter().map(|&(_, level)| level).collect()
            }
        }
    }

    pub fn applies_to(self, assessment: AssessmentType) -> bool {
        Self::levels_for(assessment).contains(&self)
    }

    /// 緊急の案内を表示すべき区分か
    pub const fn requires_urgent_notice(self) -> bool {
        matches!(self, SeverityLevel::ModeratelySevere | SeverityLevel::Severe)
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "minimal" => Ok(SeverityLevel::Minimal),
            "mild" => Ok(SeverityLevel::Mild),
            "moderate" => Ok(SeverityLevel::Moderate),
            "moderately_severe" => Ok(SeverityLevel::ModeratelySevere),
            "severe" => Ok(SeverityLevel::Severe),
            "excellent" => Ok(SeverityLevel::Excellent),
            "fair" => Ok(SeverityLevel::Fair),
            "needs_attention" => Ok(SeverityLevel::NeedsAttention),
            other => Err(Error::UnknownSeverity {
                severity: other.to_string(),
                assessment: "any assessment".to_string(),
            }),
        }
    }
}

/// 合計点から重症度区分を判定する
///
/// 境界値は軽い側の区分に入る（PHQ-9で4点は `Minimal`）。
/// ウェルビーイング系は満点に対する割合で判定し、整数演算で比較する。
pub fn classify(total_score: u32, assessment: AssessmentType) -> Result<SeverityLevel> {
    let max = assessment.max_score();
    if total_score > max {
        return Err(Error::ScoreOutOfRange {
            score: total_score,
            max,
            assessment,
        });
    }

    let level = match assessment {
        AssessmentType::Phq9 => first_band(PHQ9_BANDS, total_score),
        AssessmentType::Gad7 => first_band(GAD7_BANDS, total_score),
        AssessmentType::Wellbeing | AssessmentType::Generic => WELLBEING_BANDS
            .iter()
            .find(|&&(percent, _)| total_score * 100 >= percent * max)
            .map(|&(_, level)| level),
    };

    level.ok_or(Error::ScoreOutOfRange {
        score: total_score,
        max,
        assessment,
    })
}

fn first_band(bands: &[(u32, SeverityLevel)], score: u32) -> Option<SeverityLevel> {
    bands
        .iter()
        .find(|&&(upper, _)| score <= upper)
        .map(|&(_, level)| level)
}
