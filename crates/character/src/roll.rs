use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::models::{Ability, Character, RollResult, Skill};

/// Source of d20 results.
pub trait DiceRoller: Send + Sync {
    /// A value in `1..=20`.
    fn d20(&self) -> i32;
}

/// Uniform d20 from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDice;

impl DiceRoller for RandomDice {
    fn d20(&self) -> i32 {
        rand::thread_rng().gen_range(1..=20)
    }
}

/// Kind of roll a command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollKind {
    AbilityCheck(Ability),
    SavingThrow(Ability),
    SkillCheck(Skill),
    Initiative,
    DeathSave,
}

/// `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Rolls checks and saves for a [`Character`].
#[derive(Clone)]
pub struct RollService {
    dice: Arc<dyn DiceRoller>,
}

impl Default for RollService {
    fn default() -> Self {
        Self::new(Arc::new(RandomDice))
    }
}

impl RollService {
    pub fn new(dice: Arc<dyn DiceRoller>) -> Self {
        Self { dice }
    }

    pub fn roll(&self, character: &Character, kind: RollKind) -> RollResult {
        match kind {
            RollKind::AbilityCheck(ability) => self.ability_check(character, ability),
            RollKind::SavingThrow(ability) => self.saving_throw(character, ability),
            RollKind::SkillCheck(skill) => self.skill_check(character, skill),
            RollKind::Initiative => self.initiative(character),
            RollKind::DeathSave => self.death_save(character),
        }
    }

    pub fn ability_check(&self, character: &Character, ability: Ability) -> RollResult {
        debug!(character_id = character.id, %ability, "Rolling ability check");
        self.roll_with(ability_modifier(character.ability_score(ability)))
    }

    pub fn saving_throw(&self, character: &Character, ability: Ability) -> RollResult {
        debug!(character_id = character.id, %ability, "Rolling saving throw");
        self.roll_with(
            ability_modifier(character.ability_score(ability))
                + character.saving_throw_modifier(ability),
        )
    }

    /// Uses the skill's governing ability.
    pub fn skill_check(&self, character: &Character, skill: Skill) -> RollResult {
        debug!(character_id = character.id, %skill, "Rolling skill check");
        self.roll_with(
            ability_modifier(character.ability_score(skill.ability()))
                + character.skill_modifier(skill),
        )
    }

    pub fn initiative(&self, character: &Character) -> RollResult {
        debug!(character_id = character.id, "Rolling initiative");
        self.roll_with(
            ability_modifier(character.ability_score(Ability::Dexterity))
                + character.initiative_modifier,
        )
    }

    /// Death saves add no ability modifier.
    pub fn death_save(&self, character: &Character) -> RollResult {
        debug!(character_id = character.id, "Rolling death saving throw");
        self.roll_with(character.death_saving_throw_modifier)
    }

    fn roll_with(&self, modifier: i32) -> RollResult {
        RollResult::new(self.dice.d20(), modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ability_modifier_rounds_down() {
        assert_eq!(ability_modifier(1), -5);
        assert_eq!(ability_modifier(9), -1);
        assert_eq!(ability_modifier(10), 0);
        assert_eq!(ability_modifier(11), 0);
        assert_eq!(ability_modifier(15), 2);
        assert_eq!(ability_modifier(20), 5);
    }

    #[test]
    fn test_random_dice_stays_in_range() {
        let dice = RandomDice;
        for _ in 0..500 {
            let roll = dice.d20();
            assert!((1..=20).contains(&roll), "rolled {roll}");
        }
    }
}
