use serde::Serialize;

use crate::assessment::AssessmentType;
use crate::error::{Error, Result};
use crate::severity::SeverityLevel;

const DEPRESSION_MINIMAL: &[&str] = &[
    "Continue your current self-care practices",
    "Maintain regular physical activity",
    "Practice gratitude journaling",
    "Stay connected with your support network",
];

const DEPRESSION_MILD: &[&str] = &[
    "Monitor your mood with daily check-ins",
    "Practice mindfulness meditation",
    "Maintain regular physical activity",
    "Ensure you're getting adequate sleep",
    "Consider speaking with a supportive friend",
];

const DEPRESSION_MODERATE: &[&str] = &[
    "Consider speaking with a mental health professional",
    "Practice daily self-care activities",
    "Maintain a regular sleep schedule",
    "Try to engage in light physical activity",
    "Connect with supportive friends or family",
];

const DEPRESSION_MODERATELY_SEVERE: &[&str] = &[
    "Seek professional mental health treatment",
    "Contact your healthcare provider soon",
    "Consider therapy and possibly medication",
    "Ensure you have crisis support contacts",
];

const DEPRESSION_SEVERE: &[&str] = &[
    "Seek immediate professional help",
    "Contact your healthcare provider or therapist immediately",
    "Consider crisis intervention resources",
    "Ensure you have someone to support you",
];

const ANXIETY_MINIMAL: &[&str] = &[
    "Continue your current self-care practices",
    "Practice regular relaxation techniques",
    "Maintain physical activity",
    "Stay connected with your support network",
];

const ANXIETY_MILD: &[&str] = &[
    "Practice mindfulness meditation",
    "Try grounding techniques when feeling anxious",
    "Maintain regular physical activity",
    "Consider limiting news and social media consumption",
    "Ensure you're getting adequate sleep",
];

const ANXIETY_MODERATE: &[&str] = &[
    "Consider speaking with a mental health professional",
    "Practice deep breathing exercises daily",
    "Try progressive muscle relaxation",
    "Limit caffeine and alcohol",
    "Maintain a regular sleep schedule",
];

const ANXIETY_SEVERE: &[&str] = &[
    "Seek immediate professional help",
    "Contact your healthcare provider or therapist immediately",
    "Use grounding or breathing exercises while you wait for support",
    "Ensure you have someone to support you",
];

const WELLBEING_EXCELLENT: &[&str] = &[
    "Continue your current wellness practices",
    "Share your positive strategies with others",
    "Consider setting new personal growth goals",
    "Maintain your supportive relationships",
];

const WELLBEING_FAIR: &[&str] = &[
    "Focus on areas where you scored lower",
    "Practice mindfulness meditation",
    "Ensure regular physical activity",
    "Maintain social connections",
    "Consider speaking with a supportive friend about any concerns",
];

const WELLBEING_NEEDS_ATTENTION: &[&str] = &[
    "Consider speaking with a mental health professional",
    "Focus on basic self-care: sleep, nutrition, and exercise",
    "Practice daily mindfulness or relaxation",
    "Reach out to supportive friends or family",
    "Set small, achievable goals for improvement",
];

fn unknown(severity: SeverityLevel, assessment: AssessmentType) -> Error {
    Error::UnknownSeverity {
        severity: severity.to_string(),
        assessment: assessment.to_string(),
    }
}

/// 重症度区分と評価票に応じた推奨事項を返す
///
/// うつ (PHQ-9) と不安 (GAD-7) は別々の文面を持つ。ウェルビーイング系は区分のみで決まる。
/// 評価票が出さない区分（PHQ-9に `Excellent` など）は [`Error::UnknownSeverity`]。
pub fn get_recommendations(
    severity: SeverityLevel,
    assessment: AssessmentType,
) -> Result<&'static [&'static str]> {
    use AssessmentType::*;
    use SeverityLevel::*;

    if !severity.applies_to(assessment) {
        return Err(unknown(severity, assessment));
    }
    match (assessment, severity) {
        (Phq9, Minimal) => Ok(DEPRESSION_MINIMAL),
        (Phq9, Mild) => Ok(DEPRESSION_MILD),
        (Phq9, Moderate) => Ok(DEPRESSION_MODERATE),
        (Phq9, ModeratelySevere) => Ok(DEPRESSION_MODERATELY_SEVERE),
        (Phq9, Severe) => Ok(DEPRESSION_SEVERE),
        (Gad7, Minimal) => Ok(ANXIETY_MINIMAL),
        (Gad7, Mild) => Ok(ANXIETY_MILD),
        (Gad7, Moderate) => Ok(ANXIETY_MODERATE),
        (Gad7, Severe) => Ok(ANXIETY_SEVERE),
        (Wellbeing | Generic, Excellent) => Ok(WELLBEING_EXCELLENT),
        (Wellbeing | Generic, Fair) => Ok(WELLBEING_FAIR),
        (Wellbeing | Generic, NeedsAttention) => Ok(WELLBEING_NEEDS_ATTENTION),
        _ => Err(unknown(severity, assessment)),
    }
}

/// 結果の一文要約
pub fn summary(severity: SeverityLevel, assessment: AssessmentType) -> Result<&'static str> {
    use AssessmentType::*;
    use SeverityLevel::*;

    if !severity.applies_to(assessment) {
        return Err(unknown(severity, assessment));
    }
    let text = match (assessment, severity) {
        (Phq9, Minimal) => "Your responses indicate minimal depressive symptoms. Continue practicing good self-care.",
        (Phq9, Mild) => "Your responses indicate mild depressive symptoms. Monitoring these feelings and practicing self-care is recommended.",
        (Phq9, Moderate) => "Your responses indicate moderate depressive symptoms. Consider reaching out to a mental health professional for support.",
        (Phq9, ModeratelySevere) => "Your responses indicate moderately severe depressive symptoms. Please speak with a healthcare provider soon.",
        (Phq9, Severe) => "Your responses indicate severe depressive symptoms. It's important to speak with a healthcare provider about these feelings.",
        (Gad7, Minimal) => "Your responses indicate minimal anxiety symptoms. Continue practicing good self-care.",
        (Gad7, Mild) => "Your responses indicate mild anxiety symptoms. Monitoring these feelings and practicing self-care is recommended.",
        (Gad7, Moderate) => "Your responses indicate moderate anxiety symptoms. Consider reaching out to a mental health professional for support.",
        (Gad7, Severe) => "Your responses indicate severe anxiety symptoms. It's important to speak with a healthcare provider about these feelings.",
        (Wellbeing | Generic, Excellent) => "Your overall wellbeing appears excellent. Continue your positive practices.",
        (Wellbeing | Generic, Fair) => "Your overall wellbeing appears fair. Consider focusing on self-care in the areas where you scored lower.",
        (Wellbeing | Generic, NeedsAttention) => "Your overall wellbeing appears to need attention. Consider speaking with someone about how you're feeling.",
        _ => return Err(unknown(severity, assessment)),
    };
    Ok(text)
}

/// 相談窓口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
    pub url: Option<&'static str>,
}

const CRISIS_RESOURCES: &[CrisisResource] = &[
    CrisisResource {
        name: "Emergency Services",
        contact: "Call 911",
        description: "If you are in immediate danger, call emergency services",
        url: None,
    },
    CrisisResource {
        name: "988 Suicide & Crisis Lifeline",
        contact: "Call or text 988",
        description: "24/7, free and confidential support for people in distress",
        url: Some("https://988lifeline.org/chat/"),
    },
    CrisisResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
        description: "Free 24/7 support with a trained crisis counselor",
        url: Some("https://www.crisistextline.org/"),
    },
    CrisisResource {
        name: "SAMHSA's National Helpline",
        contact: "1-800-662-4357",
        description: "Treatment referral and information service (24/7)",
        url: Some("https://www.samhsa.gov/find-help/national-helpline"),
    },
];

/// 緊急の案内と一緒に表示する相談窓口
pub fn crisis_resources() -> &'static [CrisisResource] {
    CRISIS_RESOURCES
}
