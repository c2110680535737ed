use std::collections::BTreeMap;
use std::fmt;

/// The six ability scores of a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    /// Three-letter abbreviation, lowercase (`str`, `dex`, ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Strength => "str",
            Ability::Dexterity => "dex",
            Ability::Constitution => "con",
            Ability::Intelligence => "int",
            Ability::Wisdom => "wis",
            Ability::Charisma => "cha",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    /// Ability whose modifier is added to checks of this skill.
    pub fn ability(self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }

    /// Lowercase, hyphen-separated name (`animal-handling`), as used by DnD Beyond modifiers.
    pub fn slug(self) -> &'static str {
        match self {
            Skill::Acrobatics => "acrobatics",
            Skill::AnimalHandling => "animal-handling",
            Skill::Arcana => "arcana",
            Skill::Athletics => "athletics",
            Skill::Deception => "deception",
            Skill::History => "history",
            Skill::Insight => "insight",
            Skill::Intimidation => "intimidation",
            Skill::Investigation => "investigation",
            Skill::Medicine => "medicine",
            Skill::Nature => "nature",
            Skill::Perception => "perception",
            Skill::Performance => "performance",
            Skill::Persuasion => "persuasion",
            Skill::Religion => "religion",
            Skill::SleightOfHand => "sleight-of-hand",
            Skill::Stealth => "stealth",
            Skill::Survival => "survival",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A character reduced to the numbers needed for rolling.
///
/// Scores and modifiers are keyed by ability/skill. Sheets built by the DnD Beyond client always
/// carry every key; the accessors fall back to a neutral value (score 10, modifier 0) for
/// hand-built characters that leave some out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub abilities: BTreeMap<Ability, i32>,
    pub saving_throw_modifiers: BTreeMap<Ability, i32>,
    pub skill_modifiers: BTreeMap<Skill, i32>,
    pub initiative_modifier: i32,
    pub death_saving_throw_modifier: i32,
}

impl Character {
    /// Character with every score at 10 and no modifiers.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            abilities: Ability::ALL.iter().map(|a| (*a, 10)).collect(),
            saving_throw_modifiers: Ability::ALL.iter().map(|a| (*a, 0)).collect(),
            skill_modifiers: Skill::ALL.iter().map(|s| (*s, 0)).collect(),
            initiative_modifier: 0,
            death_saving_throw_modifier: 0,
        }
    }

    pub fn ability_score(&self, ability: Ability) -> i32 {
        self.abilities.get(&ability).copied().unwrap_or(10)
    }

    pub fn saving_throw_modifier(&self, ability: Ability) -> i32 {
        self.saving_throw_modifiers
            .get(&ability)
            .copied()
            .unwrap_or(0)
    }

    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        self.skill_modifiers.get(&skill).copied().unwrap_or(0)
    }
}

/// Outcome of a single d20 roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    pub value: i32,
    /// Die face and signed modifier, e.g. `"4+2"` or `"4-5"`.
    pub details: String,
}

impl RollResult {
    pub fn new(roll: i32, modifier: i32) -> Self {
        let sign = if modifier >= 0 { "+" } else { "" };
        Self {
            value: roll + modifier,
            details: format!("{roll}{sign}{modifier}"),
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.details, self.value)
    }
}
