//! Companion roster loader.

use std::path::Path;

use emberveil_core::{Companion, CompanionAbilities, CompanionId};
use serde::{Deserialize, Serialize};

use crate::loaders::{read_file, LoadResult};

/// Ability tags as they appear in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilitySpec {
    HelpLift,
    Scout,
    Dig,
    Swim,
    Climb,
    Translate,
    Heal,
    Light,
}

impl AbilitySpec {
    pub fn to_flag(self) -> CompanionAbilities {
        match self {
            AbilitySpec::HelpLift => CompanionAbilities::HELP_LIFT,
            AbilitySpec::Scout => CompanionAbilities::SCOUT,
            AbilitySpec::Dig => CompanionAbilities::DIG,
            AbilitySpec::Swim => CompanionAbilities::SWIM,
            AbilitySpec::Climb => CompanionAbilities::CLIMB,
            AbilitySpec::Translate => CompanionAbilities::TRANSLATE,
            AbilitySpec::Heal => CompanionAbilities::HEAL,
            AbilitySpec::Light => CompanionAbilities::LIGHT,
        }
    }
}

/// Collects a list of ability tags into one flag set.
pub fn abilities_from_specs(specs: &[AbilitySpec]) -> CompanionAbilities {
    specs
        .iter()
        .fold(CompanionAbilities::empty(), |acc, spec| acc | spec.to_flag())
}

/// One companion entry in the roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionSpec {
    pub id: String,
    pub name: String,
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
}

fn default_move_speed() -> f32 {
    emberveil_core::GameConfig::DEFAULT_FOLLOW_SPEED
}

impl CompanionSpec {
    /// Builds the core companion this spec describes.
    pub fn to_companion(&self) -> Companion {
        let mut companion = Companion::new(CompanionId::new(self.id.clone()), self.name.clone())
            .with_abilities(abilities_from_specs(&self.abilities));
        companion.move_speed = self.move_speed;
        companion
    }
}

/// Roster file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionRoster {
    pub companions: Vec<CompanionSpec>,
}

/// Loader for the companion roster from RON files.
pub struct CompanionLoader;

impl CompanionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CompanionSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CompanionSpec>> {
        let roster: CompanionRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse companion roster RON: {}", e))?;
        Ok(roster.companions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roster_and_maps_abilities() {
        let specs = CompanionLoader::parse(
            r#"(
                companions: [
                    (id: "bear", name: "Bear", abilities: [help_lift, swim]),
                    (id: "hawk", name: "Hawk", move_speed: 6.0, abilities: [scout]),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 2);
        let bear = specs[0].to_companion();
        assert!(bear.abilities.contains(CompanionAbilities::HELP_LIFT));
        assert!(bear.abilities.contains(CompanionAbilities::SWIM));
        assert!(!bear.abilities.contains(CompanionAbilities::SCOUT));

        let hawk = specs[1].to_companion();
        assert_eq!(hawk.move_speed, 6.0);
        assert_eq!(hawk.id, CompanionId::new("hawk"));
    }
}
