//! Command tables: what the bot registers with Telegram and lists in /help.

use character::{Ability, RollKind, Skill};
use ddbot_core::BotCommand;

pub const CHARACTER_SET: &str = "character_set";
pub const CHARACTER_CACHE_CLEAR: &str = "character_cache_clear";
pub const HELP: &str = "help";
pub const START: &str = "start";

/// A roll command and the roll it performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollCommand {
    pub command: BotCommand,
    pub kind: RollKind,
}

impl RollCommand {
    fn new(command: impl Into<String>, description: impl Into<String>, kind: RollKind) -> Self {
        Self {
            command: BotCommand::new(command, description),
            kind,
        }
    }
}

/// `str_check` … `cha_check`.
pub fn ability_check_commands() -> Vec<RollCommand> {
    Ability::ALL
        .into_iter()
        .map(|ability| {
            RollCommand::new(
                format!("{}_check", ability.abbreviation()),
                format!("{} check", ability.name()),
                RollKind::AbilityCheck(ability),
            )
        })
        .collect()
}

/// `str_save` … `cha_save`.
pub fn saving_throw_commands() -> Vec<RollCommand> {
    Ability::ALL
        .into_iter()
        .map(|ability| {
            RollCommand::new(
                format!("{}_save", ability.abbreviation()),
                format!("{} saving throw", ability.name()),
                RollKind::SavingThrow(ability),
            )
        })
        .collect()
}

/// One per skill, named after it (`animal_handling`, `sleight_of_hand`, ...).
pub fn skill_check_commands() -> Vec<RollCommand> {
    Skill::ALL
        .into_iter()
        .map(|skill| {
            RollCommand::new(
                skill.slug().replace('-', "_"),
                format!("{} check", skill.name()),
                RollKind::SkillCheck(skill),
            )
        })
        .collect()
}

pub fn miscellaneous_commands() -> Vec<RollCommand> {
    vec![
        RollCommand::new("initiative", "Initiative check", RollKind::Initiative),
        RollCommand::new("death_save", "Death saving throw", RollKind::DeathSave),
    ]
}

pub fn character_set_command() -> BotCommand {
    BotCommand::new(CHARACTER_SET, "Set your character")
}

pub fn character_cache_clear_command() -> BotCommand {
    BotCommand::new(CHARACTER_CACHE_CLEAR, "Clear your character cache")
}

pub fn help_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new(HELP, "Show help message"),
        BotCommand::new(START, "Start the bot"),
    ]
}

/// Every command, grouped the way /help lists them.
#[derive(Debug, Clone, Default)]
pub struct CommandGroups {
    pub general: Vec<BotCommand>,
    pub ability_checks: Vec<BotCommand>,
    pub saving_throws: Vec<BotCommand>,
    pub skill_checks: Vec<BotCommand>,
    pub miscellaneous: Vec<BotCommand>,
}

impl CommandGroups {
    pub fn new() -> Self {
        let commands = |rolls: Vec<RollCommand>| -> Vec<BotCommand> {
            rolls.into_iter().map(|r| r.command).collect()
        };
        let mut general = vec![character_set_command(), character_cache_clear_command()];
        general.extend(help_commands());

        Self {
            general,
            ability_checks: commands(ability_check_commands()),
            saving_throws: commands(saving_throw_commands()),
            skill_checks: commands(skill_check_commands()),
            miscellaneous: commands(miscellaneous_commands()),
        }
    }

    /// Flat list in registration order: general, ability, saves, skills, other.
    pub fn all(&self) -> Vec<BotCommand> {
        self.general
            .iter()
            .chain(&self.ability_checks)
            .chain(&self.saving_throws)
            .chain(&self.skill_checks)
            .chain(&self.miscellaneous)
            .cloned()
            .collect()
    }
}

/// Every roll command in registration order.
pub fn roll_commands() -> Vec<RollCommand> {
    let mut all = ability_check_commands();
    all.extend(saving_throw_commands());
    all.extend(skill_check_commands());
    all.extend(miscellaneous_commands());
    all
}
