use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};

const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// 集計期間の上限（日数）。およそ10年。
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// 気分の種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodType {
    Happy,
    #[default]
    Content,
    Calm,
    Excited,
    Sad,
    Anxious,
    Frustrated,
    Overwhelmed,
}

impl MoodType {
    pub const ALL: [MoodType; 8] = [
        MoodType::Happy,
        MoodType::Content,
        MoodType::Calm,
        MoodType::Excited,
        MoodType::Sad,
        MoodType::Anxious,
        MoodType::Frustrated,
        MoodType::Overwhelmed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MoodType::Happy => "Happy",
            MoodType::Content => "Content",
            MoodType::Calm => "Calm",
            MoodType::Excited => "Excited",
            MoodType::Sad => "Sad",
            MoodType::Anxious => "Anxious",
            MoodType::Frustrated => "Frustrated",
            MoodType::Overwhelmed => "Overwhelmed",
        }
    }
}

/// 気分点数の区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodBand {
    Bright,
    Good,
    Low,
    VeryLow,
}

/// (下限点（含む）, 区分) を降順に並べた表
const MOOD_BANDS: &[(u8, MoodBand)] = &[
    (8, MoodBand::Bright),
    (6, MoodBand::Good),
    (4, MoodBand::Low),
    (0, MoodBand::VeryLow),
];

impl MoodBand {
    /// 気分点数 (1..=10) を区分に振り分ける
    pub fn classify(mood_score: u8) -> MoodBand {
        MOOD_BANDS
            .iter()
            .find(|&&(lower, _)| mood_score >= lower)
            .map(|&(_, band)| band)
            .unwrap_or(MoodBand::VeryLow)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MoodBand::Bright => "bright",
            MoodBand::Good => "good",
            MoodBand::Low => "low",
            MoodBand::VeryLow => "very_low",
        }
    }
}

/// 気分日誌の1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub mood_score: u8,
    pub mood_type: MoodType,
    pub energy_level: u8,
    pub notes: String,
    pub triggers: Vec<String>,
    pub activities: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn band(&self) -> MoodBand {
        MoodBand::classify(self.mood_score)
    }
}

/// 採番前の気分日誌
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDraft {
    pub mood_score: u8,
    #[serde(default)]
    pub mood_type: MoodType,
    pub energy_level: u8,
    #[serde(default)]
    pub notes: String,
    /// 気分に影響したきっかけ（仕事、睡眠など）
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodDraft {
    pub fn new(
        mood_score: u8,
        energy_level: u8,
        notes: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let draft = Self {
            mood_score,
            mood_type: MoodType::default(),
            energy_level,
            notes: notes.into(),
            triggers: Vec::new(),
            activities: Vec::new(),
            timestamp,
        };
        draft.validate()?;
        Ok(draft)
    }

    pub fn with_mood_type(mut self, mood_type: MoodType) -> Self {
        self.mood_type = mood_type;
        self
    }

    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self) -> Result<()> {
        if !SCORE_RANGE.contains(&self.mood_score) {
            return Err(Error::InvalidMoodValue {
                field: "mood_score",
                value: self.mood_score.into(),
            });
        }
        if !SCORE_RANGE.contains(&self.energy_level) {
            return Err(Error::InvalidMoodValue {
                field: "energy_level",
                value: self.energy_level.into(),
            });
        }
        Ok(())
    }
}

pub trait MoodStore: Send + Sync {
    /// 新しい順に最大 `limit` 件
    fn list(&self, limit: usize) -> Vec<MoodEntry>;
    fn get(&self, id: &str) -> Result<MoodEntry>;
    fn create(&self, draft: MoodDraft) -> Result<MoodEntry>;
    fn update(&self, id: &str, draft: MoodDraft) -> Result<MoodEntry>;
    fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryMoodStore {
    entries: RwLock<Vec<MoodEntry>>,
}

impl InMemoryMoodStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound {
        kind: "mood entry",
        id: id.to_string(),
    }
}

impl MoodStore for InMemoryMoodStore {
    fn list(&self, limit: usize) -> Vec<MoodEntry> {
        let mut entries = self.entries.read().clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }

    fn get(&self, id: &str) -> Result<MoodEntry> {
        self.entries
            .read()
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn create(&self, draft: MoodDraft) -> Result<MoodEntry> {
        draft.validate()?;
        let entry = MoodEntry {
            id: format!("mood-{}", Uuid::new_v4()),
            mood_score: draft.mood_score,
            mood_type: draft.mood_type,
            energy_level: draft.energy_level,
            notes: draft.notes,
            triggers: draft.triggers,
            activities: draft.activities,
            timestamp: draft.timestamp,
        };
        debug!(id = %entry.id, "mood entry created");
        self.entries.write().push(entry.clone());
        Ok(entry)
    }

    fn update(&self, id: &str, draft: MoodDraft) -> Result<MoodEntry> {
        draft.validate()?;
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| not_found(id))?;
        entry.mood_score = draft.mood_score;
        entry.mood_type = draft.mood_type;
        entry.energy_level = draft.energy_level;
        entry.notes = draft.notes;
        entry.triggers = draft.triggers;
        entry.activities = draft.activities;
        entry.timestamp = draft.timestamp;
        Ok(entry.clone())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrend {
    pub entries: usize,
    pub average_mood: Option<f64>,
    pub average_energy: Option<f64>,
    /// 期間内で最も多く記録された気分の種類
    pub dominant_mood_type: Option<MoodType>,
}

/// `now` までの `window_days` 日間に記録された日誌の平均
///
/// 期間の起点が表現できる日時より前になる場合は、最古の日時から数える。
pub fn mood_trend(entries: &[MoodEntry], now: DateTime<Utc>, window_days: u32) -> MoodTrend {
    let since = TimeDelta::try_days(i64::from(window_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent = entries
        .iter()
        .filter(|entry| entry.timestamp > since && entry.timestamp <= now)
        .collect::<Vec<&MoodEntry>>();

    let mean = |pick: fn(&MoodEntry) -> u8| {
        if recent.is_empty() {
            return None;
        }
        let sum: u32 = recent.iter().map(|&entry| u32::from(pick(entry))).sum();
        Some(f64::from(sum) / recent.len() as f64)
    };

    // 同数なら MoodType::ALL で先に並ぶ種類
    let dominant_mood_type = MoodType::ALL
        .iter()
        .map(|&mood_type| {
            let count = recent
                .iter()
                .filter(|entry| entry.mood_type == mood_type)
                .count();
            (mood_type, count)
        })
        .filter(|&(_, count)| count > 0)
        .fold(None, |best: Option<(MoodType, usize)>, candidate| match best {
            Some((_, count)) if count >= candidate.1 => best,
            _ => Some(candidate),
        })
        .map(|(mood_type, _)| mood_type);

    MoodTrend {
        entries: recent.len(),
        average_mood: mean(|entry| entry.mood_score),
        average_energy: mean(|entry| entry.energy_level),
        dominant_mood_type,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    pub mood: Option<u8>,
    pub band: Option<MoodBand>,
    pub energy: Option<u8>,
}

/// `today` で終わる日ごとの系列（古い順）
///
/// 記録のない日は `None`。同じ日に複数あれば最後の記録を使う。
/// 日数は [`MAX_WINDOW_DAYS`] で頭打ちにする。
pub fn daily_series(entries: &[MoodEntry], today: NaiveDate, days: u32) -> Vec<DailyMood> {
    (0..days.min(MAX_WINDOW_DAYS))
        .rev()
        .filter_map(|offset| {
            TimeDelta::try_days(i64::from(offset)).and_then(|delta| today.checked_sub_signed(delta))
        })
        .map(|date| {
            let entry = entries
                .iter()
                .filter(|entry| entry.timestamp.date_naive() == date)
                .max_by_key(|entry| entry.timestamp);
            DailyMood {
                date,
                mood: entry.map(|entry| entry.mood_score),
                band: entry.map(MoodEntry::band),
                energy: entry.map(|entry| entry.energy_level),
            }
        })
        .collect()
}
