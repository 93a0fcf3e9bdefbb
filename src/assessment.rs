use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 評価票の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    /// うつ病スクリーニング (PHQ-9)
    Phq9,
    /// 不安スクリーニング (GAD-7)
    Gad7,
    /// 月次のウェルビーイング確認
    Wellbeing,
    /// 日次の簡易チェックイン
    Generic,
}

/// 実施頻度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
}

impl Cadence {
    /// 次の実施までの間隔
    pub fn interval(self) -> TimeDelta {
        match self {
            Cadence::Daily => TimeDelta::days(1),
            Cadence::Weekly => TimeDelta::weeks(1),
            Cadence::Monthly => TimeDelta::days(30),
        }
    }
}

/// 評価票ごとの固定設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentSpec {
    pub title: &'static str,
    pub description: &'static str,
    pub question_count: usize,
    /// 選択肢の最大値（最小値は常に0）
    pub max_option_value: u8,
    pub estimated_minutes: u8,
    pub cadence: Cadence,
}

impl AssessmentSpec {
    /// 合計点の上限
    pub const fn max_score(&self) -> u32 {
        self.question_count as u32 * self.max_option_value as u32
    }

    /// 前回の実施日時から実施頻度の間隔が過ぎているか
    ///
    /// 未実施なら常に対象。前回が `now` より未来の場合は対象外とする。
    pub fn is_due(&self, last_completed: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last_completed {
            None => true,
            Some(last) => now.signed_duration_since(last) >= self.cadence.interval(),
        }
    }
}

const PHQ9: AssessmentSpec = AssessmentSpec {
    title: "Depression Screening (PHQ-9)",
    description: "Standard screening tool for depression symptoms",
    question_count: 9,
    max_option_value: 3,
    estimated_minutes: 5,
    cadence: Cadence::Weekly,
};

const GAD7: AssessmentSpec = AssessmentSpec {
    title: "Anxiety Screening (GAD-7)",
    description: "Standard screening tool for anxiety symptoms",
    question_count: 7,
    max_option_value: 3,
    estimated_minutes: 3,
    cadence: Cadence::Weekly,
};

const WELLBEING: AssessmentSpec = AssessmentSpec {
    title: "General Wellbeing Check",
    description: "Quick assessment of your overall mental wellbeing",
    question_count: 5,
    max_option_value: 4,
    estimated_minutes: 2,
    cadence: Cadence::Monthly,
};

const GENERIC: AssessmentSpec = AssessmentSpec {
    title: "Daily Check-in",
    description: "A short check-in on mood, energy, sleep and stress",
    question_count: 4,
    max_option_value: 4,
    estimated_minutes: 1,
    cadence: Cadence::Daily,
};

impl AssessmentType {
    pub const ALL: [AssessmentType; 4] = [
        AssessmentType::Phq9,
        AssessmentType::Gad7,
        AssessmentType::Wellbeing,
        AssessmentType::Generic,
    ];

    pub const fn spec(self) -> &'static AssessmentSpec {
        match self {
            AssessmentType::Phq9 => &PHQ9,
            AssessmentType::Gad7 => &GAD7,
            AssessmentType::Wellbeing => &WELLBEING,
            AssessmentType::Generic => &GENERIC,
        }
    }

    pub const fn question_count(self) -> usize {
        self.spec().question_count
    }

    pub const fn max_score(self) -> u32 {
        self.spec().max_score()
    }

    pub const fn id(self) -> &'static str {
        match self {
            AssessmentType::Phq9 => "phq9",
            AssessmentType::Gad7 => "gad7",
            AssessmentType::Wellbeing => "wellbeing",
            AssessmentType::Generic => "generic",
        }
    }
}

impl fmt::Display for AssessmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AssessmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "phq9" => Ok(AssessmentType::Phq9),
            "gad7" => Ok(AssessmentType::Gad7),
            "wellbeing" => Ok(AssessmentType::Wellbeing),
            "generic" => Ok(AssessmentType::Generic),
            _ => Err(Error::UnknownAssessmentType(s.to_string())),
        }
    }
}
