//! Raw DnD Beyond character payload and its conversion into [`Character`].

use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{Ability, Character, Skill};

/// Response envelope shared by every character-service endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[allow(dead_code)]
    pub id: i64,
    pub success: bool,
    pub message: String,
    pub data: serde_json::Value,
}

/// `data` of an envelope with `success == false`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorData {
    pub server_message: String,
    #[allow(dead_code)]
    pub error_code: String,
}

#[derive(Debug, Deserialize)]
struct StatValue {
    id: u8,
    value: i32,
}

#[derive(Debug, Deserialize)]
struct OptionalStatValue {
    id: u8,
    value: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ClassLevel {
    level: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Modifier {
    #[serde(rename = "type")]
    kind: String,
    sub_type: String,
    value: Option<i32>,
    #[serde(default)]
    friendly_type_name: Option<String>,
    #[serde(default)]
    friendly_subtype_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Modifiers {
    race: Vec<Modifier>,
    class: Vec<Modifier>,
    background: Vec<Modifier>,
    item: Vec<Modifier>,
    feat: Vec<Modifier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModifierKind {
    Bonus,
    Proficiency,
    Expertise,
}

impl ModifierKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "bonus" => Some(ModifierKind::Bonus),
            "proficiency" => Some(ModifierKind::Proficiency),
            "expertise" => Some(ModifierKind::Expertise),
            _ => None,
        }
    }
}

/// What a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Score(Ability),
    SavingThrow(Ability),
    Skill(Skill),
    Initiative,
    DeathSavingThrows,
}

impl Target {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "initiative" => return Some(Target::Initiative),
            "death-saving-throws" => return Some(Target::DeathSavingThrows),
            _ => {}
        }
        for ability in Ability::ALL {
            let name = ability.name().to_lowercase();
            if s.strip_suffix("-score") == Some(name.as_str()) {
                return Some(Target::Score(ability));
            }
            if s.strip_suffix("-saving-throws") == Some(name.as_str()) {
                return Some(Target::SavingThrow(ability));
            }
        }
        Skill::ALL
            .into_iter()
            .find(|skill| skill.slug() == s)
            .map(Target::Skill)
    }
}

/// Modifier with a recognised type and target.
#[derive(Debug)]
struct KnownModifier {
    kind: ModifierKind,
    target: Target,
    value: Option<i32>,
}

/// The `data` object of a successful character response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CharacterSheet {
    id: i64,
    name: String,
    stats: Vec<StatValue>,
    bonus_stats: Vec<OptionalStatValue>,
    override_stats: Vec<OptionalStatValue>,
    classes: Vec<ClassLevel>,
    modifiers: Modifiers,
}

/// DnD Beyond stat id (1 = STR ... 6 = CHA).
fn stat_id(ability: Ability) -> u8 {
    match ability {
        Ability::Strength => 1,
        Ability::Dexterity => 2,
        Ability::Constitution => 3,
        Ability::Intelligence => 4,
        Ability::Wisdom => 5,
        Ability::Charisma => 6,
    }
}

/// Proficiency bonus for a total character level.
pub(crate) fn proficiency_bonus(total_level: i32) -> i32 {
    match total_level {
        l if l < 5 => 2,
        l if l < 9 => 3,
        l if l < 13 => 4,
        l if l < 17 => 5,
        _ => 6,
    }
}

impl CharacterSheet {
    /// Converts the sheet, failing when a stat id is missing from one of the stat arrays.
    pub(crate) fn into_character(self) -> Result<Character, String> {
        let known = self.known_modifiers();
        let total_level = checked_total(self.classes.iter().map(|c| c.level))
            .ok_or("total class level overflows")?;
        let pb = proficiency_bonus(total_level);

        let mut abilities = std::collections::BTreeMap::new();
        let mut saving_throw_modifiers = std::collections::BTreeMap::new();
        for ability in Ability::ALL {
            abilities.insert(ability, self.ability_score(ability, &known)?);
            saving_throw_modifiers.insert(
                ability,
                proficiency_modifier(&known, Target::SavingThrow(ability), pb),
            );
        }

        let skill_modifiers = Skill::ALL
            .into_iter()
            .map(|skill| (skill, proficiency_modifier(&known, Target::Skill(skill), pb)))
            .collect();

        Ok(Character {
            id: self.id,
            name: self.name,
            abilities,
            saving_throw_modifiers,
            skill_modifiers,
            initiative_modifier: bonus_sum(&known, Target::Initiative)?,
            death_saving_throw_modifier: bonus_sum(&known, Target::DeathSavingThrows)?,
        })
    }

    fn known_modifiers(&self) -> Vec<KnownModifier> {
        let m = &self.modifiers;
        m.race
            .iter()
            .chain(&m.class)
            .chain(&m.background)
            .chain(&m.item)
            .chain(&m.feat)
            .filter_map(|modifier| {
                let Some(kind) = ModifierKind::parse(&modifier.kind) else {
                    debug!(
                        kind = %modifier.kind,
                        name = ?modifier.friendly_type_name,
                        "Unknown modifier type"
                    );
                    return None;
                };
                let Some(target) = Target::parse(&modifier.sub_type) else {
                    debug!(
                        sub_type = %modifier.sub_type,
                        name = ?modifier.friendly_subtype_name,
                        "Unknown modifier sub type"
                    );
                    return None;
                };
                Some(KnownModifier {
                    kind,
                    target,
                    value: modifier.value,
                })
            })
            .collect()
    }

    fn ability_score(&self, ability: Ability, known: &[KnownModifier]) -> Result<i32, String> {
        let id = stat_id(ability);

        let override_value = self
            .override_stats
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| format!("override stat {id} not found"))?
            .value;
        if let Some(value) = override_value {
            return Ok(value);
        }

        let base = self
            .stats
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| format!("stat {id} not found"))?
            .value;
        let bonus = self
            .bonus_stats
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| format!("bonus stat {id} not found"))?
            .value
            .unwrap_or(0);

        checked_total([base, bonus, bonus_sum(known, Target::Score(ability))?])
            .ok_or_else(|| format!("score for stat {id} overflows"))
    }
}

/// Sum of untrusted sheet numbers; `None` on overflow.
fn checked_total(values: impl IntoIterator<Item = i32>) -> Option<i32> {
    values
        .into_iter()
        .try_fold(0i32, |acc, value| acc.checked_add(value))
}

fn bonus_sum(known: &[KnownModifier], target: Target) -> Result<i32, String> {
    let values = known
        .iter()
        .filter(|m| m.kind == ModifierKind::Bonus && m.target == target)
        .filter_map(|m| {
            if m.value.is_none() {
                warn!(target = ?m.target, "Bonus modifier has no value");
            }
            m.value
        });
    checked_total(values).ok_or_else(|| format!("bonus total for {target:?} overflows"))
}

fn proficiency_modifier(known: &[KnownModifier], target: Target, pb: i32) -> i32 {
    let has = |kind| known.iter().any(|m| m.kind == kind && m.target == target);
    if has(ModifierKind::Expertise) {
        2 * pb
    } else if has(ModifierKind::Proficiency) {
        pb
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sheet(modifiers: serde_json::Value, levels: &[i32]) -> CharacterSheet {
        let classes: Vec<_> = levels.iter().map(|l| json!({ "level": l })).collect();
        let stats: Vec<_> = (1..=6).map(|id| json!({ "id": id, "value": 10 })).collect();
        let empty: Vec<_> = (1..=6).map(|id| json!({ "id": id, "value": null })).collect();
        serde_json::from_value(json!({
            "id": 7,
            "name": "Ilse",
            "stats": stats,
            "bonusStats": empty,
            "overrideStats": empty,
            "classes": classes,
            "modifiers": modifiers,
        }))
        .unwrap()
    }

    fn modifiers(race: serde_json::Value) -> serde_json::Value {
        json!({ "race": race, "class": [], "background": [], "item": [], "feat": [] })
    }

    #[test]
    fn test_proficiency_bonus_by_level() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(16), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(
            Target::parse("dexterity-score"),
            Some(Target::Score(Ability::Dexterity))
        );
        assert_eq!(
            Target::parse("wisdom-saving-throws"),
            Some(Target::SavingThrow(Ability::Wisdom))
        );
        assert_eq!(
            Target::parse("sleight-of-hand"),
            Some(Target::Skill(Skill::SleightOfHand))
        );
        assert_eq!(Target::parse("death-saving-throws"), Some(Target::DeathSavingThrows));
        assert_eq!(Target::parse("speed"), None);
    }

    #[test]
    fn test_unknown_modifiers_are_ignored() {
        let character = sheet(
            modifiers(json!([
                { "type": "resistance", "subType": "strength-score", "value": 5 },
                { "type": "bonus", "subType": "speed", "value": 10 },
                { "type": "bonus", "subType": "strength-score", "value": 2 },
            ])),
            &[1],
        )
        .into_character()
        .unwrap();

        assert_eq!(character.ability_score(Ability::Strength), 12);
    }

    #[test]
    fn test_expertise_wins_over_proficiency() {
        let character = sheet(
            modifiers(json!([
                { "type": "proficiency", "subType": "stealth", "value": null },
                { "type": "expertise", "subType": "stealth", "value": null },
                { "type": "proficiency", "subType": "arcana", "value": null },
            ])),
            &[3, 2],
        )
        .into_character()
        .unwrap();

        assert_eq!(character.skill_modifier(Skill::Stealth), 6);
        assert_eq!(character.skill_modifier(Skill::Arcana), 3);
        assert_eq!(character.skill_modifier(Skill::Nature), 0);
    }

    #[test]
    fn test_initiative_and_death_save_bonuses() {
        let character = sheet(
            modifiers(json!([
                { "type": "bonus", "subType": "initiative", "value": 5 },
                { "type": "bonus", "subType": "initiative", "value": null },
                { "type": "bonus", "subType": "death-saving-throws", "value": 1 },
            ])),
            &[1],
        )
        .into_character()
        .unwrap();

        assert_eq!(character.initiative_modifier, 5);
        assert_eq!(character.death_saving_throw_modifier, 1);
    }

    #[test]
    fn test_overflowing_numbers_are_errors() {
        let err = sheet(modifiers(json!([])), &[i32::MAX, 1])
            .into_character()
            .unwrap_err();
        assert!(err.contains("class level"));

        let err = sheet(
            modifiers(json!([
                { "type": "bonus", "subType": "strength-score", "value": i32::MAX },
            ])),
            &[1],
        )
        .into_character()
        .unwrap_err();
        assert!(err.contains("stat 1"));

        let err = sheet(
            modifiers(json!([
                { "type": "bonus", "subType": "initiative", "value": i32::MAX },
                { "type": "bonus", "subType": "initiative", "value": 1 },
            ])),
            &[1],
        )
        .into_character()
        .unwrap_err();
        assert!(err.contains("Initiative"));
    }

    #[test]
    fn test_missing_stat_is_an_error() {
        let mut s = sheet(modifiers(json!([])), &[1]);
        s.bonus_stats.retain(|stat| stat.id != 4);

        let err = s.into_character().unwrap_err();
        assert!(err.contains("bonus stat 4"));
    }
}
