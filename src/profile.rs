use std::str::FromStr;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// 初回設定で選ぶ相談相手
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    #[default]
    Aria,
    DrAegis,
    Aiden,
}

impl Persona {
    pub fn display_name(self) -> &'static str {
        match self {
            Persona::Aria => "Aria",
            Persona::DrAegis => "Dr. Aegis",
            Persona::Aiden => "Aiden",
        }
    }
}

impl FromStr for Persona {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "aria" => Ok(Persona::Aria),
            "dr_aegis" | "aegis" => Ok(Persona::DrAegis),
            "aiden" => Ok(Persona::Aiden),
            other => Err(Error::NotFound {
                kind: "persona",
                id: other.to_string(),
            }),
        }
    }
}

/// 緊急連絡先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub selected_persona: Persona,
    pub onboarding_completed: bool,
    pub emergency_contact: Option<EmergencyContact>,
}

pub trait UserProfileStore: Send + Sync {
    fn current(&self) -> UserProfile;
    fn update(&self, profile: UserProfile) -> UserProfile;
    fn complete_onboarding(&self, persona: Persona) -> UserProfile;
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profile: RwLock<UserProfile>,
}

impl InMemoryProfileStore {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile: RwLock::new(profile),
        }
    }
}

impl UserProfileStore for InMemoryProfileStore {
    fn current(&self) -> UserProfile {
        self.profile.read().clone()
    }

    fn update(&self, profile: UserProfile) -> UserProfile {
        *self.profile.write() = profile.clone();
        profile
    }

    fn complete_onboarding(&self, persona: Persona) -> UserProfile {
        let mut profile = self.profile.write();
        profile.selected_persona = persona;
        profile.onboarding_completed = true;
        profile.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_onboarding_sets_persona() {
        let store = InMemoryProfileStore::new(UserProfile {
            name: "Alex".to_string(),
            ..UserProfile::default()
        });
        assert!(!store.current().onboarding_completed);

        let profile = store.complete_onboarding(Persona::DrAegis);
        assert!(profile.onboarding_completed);
        assert_eq!(profile.selected_persona, Persona::DrAegis);
        assert_eq!(store.current(), profile);
    }

    #[test]
    fn test_persona_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Persona::DrAegis).unwrap(),
            r#""dr_aegis""#
        );
        assert_eq!(Persona::DrAegis.display_name(), "Dr. Aegis");
        assert_eq!("Dr_Aegis".parse::<Persona>().ok(), Some(Persona::DrAegis));
        assert!("hal".parse::<Persona>().is_err());
    }
}
