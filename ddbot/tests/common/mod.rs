//! Shared fixtures for handler tests: a recording [`Bot`], a scripted character service, fixed dice
//! and message builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use character::{Ability, Character, CharacterError, CharacterService, DiceRoller, RollService};
use chrono::Utc;
use context_store::{ContextService, InMemoryContextRepository};
use ddbot::handlers::{render_help_message, BotUsername};
use ddbot::commands::CommandGroups;
use ddbot::config::DEFAULT_HELP_MESSAGE_TEMPLATE;
use ddbot::{build_handler_chain, HandlerDeps};
use ddbot_core::{Bot, Chat, Message, Result, User};
use handler_chain::HandlerChain;
use tokio::sync::RwLock;

pub const BOT_USERNAME: &str = "dnd_roller_bot";
pub const CHAT_ID: i64 = -100500;
pub const USER_ID: i64 = 42;

/// How a message left the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentKind {
    Message,
    MarkdownMessage,
    Reply,
    MarkdownReply,
}

#[derive(Debug, Clone)]
pub struct SentRecord {
    pub kind: SentKind,
    pub chat_id: i64,
    pub text: String,
}

/// Bot that records every outgoing message instead of sending it.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentRecord {
        self.sent().pop().expect("bot sent nothing")
    }

    fn record(&self, kind: SentKind, chat_id: i64, text: &str) {
        self.sent.lock().unwrap().push(SentRecord {
            kind,
            chat_id,
            text: text.to_string(),
        });
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(SentKind::Message, chat.id, text);
        Ok(())
    }

    async fn send_markdown_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(SentKind::MarkdownMessage, chat.id, text);
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(SentKind::Reply, message.chat.id, text);
        Ok(())
    }

    async fn reply_markdown_to(&self, message: &Message, text: &str) -> Result<()> {
        self.record(SentKind::MarkdownReply, message.chat.id, text);
        Ok(())
    }
}

/// What the scripted service answers for a character id.
#[derive(Clone)]
pub enum Lookup {
    Found(Character),
    NotFound,
    AccessDenied,
    Broken,
}

/// Character service answering from a fixed table; ids not in the table are NotFound.
#[derive(Default)]
pub struct ScriptedCharacterService {
    lookups: HashMap<i64, Lookup>,
    forgotten: Mutex<Vec<i64>>,
}

impl ScriptedCharacterService {
    pub fn with(mut self, id: i64, lookup: Lookup) -> Self {
        self.lookups.insert(id, lookup);
        self
    }

    pub fn forgotten(&self) -> Vec<i64> {
        self.forgotten.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterService for ScriptedCharacterService {
    async fn get(&self, id: i64) -> std::result::Result<Character, CharacterError> {
        match self.lookups.get(&id) {
            Some(Lookup::Found(character)) => Ok(character.clone()),
            Some(Lookup::AccessDenied) => Err(CharacterError::AccessDenied(id)),
            Some(Lookup::Broken) => Err(CharacterError::Repository("boom".to_string())),
            Some(Lookup::NotFound) | None => Err(CharacterError::NotFound(id)),
        }
    }

    async fn forget(&self, id: i64) {
        self.forgotten.lock().unwrap().push(id);
    }
}

/// Always rolls the same d20 value.
pub struct FixedDice(pub i32);

impl DiceRoller for FixedDice {
    fn d20(&self) -> i32 {
        self.0
    }
}

/// Vex: STR 16, DEX 14, Stealth +4, Initiative +2, death save +1.
pub fn vex() -> Character {
    let mut character = Character::new(133869351, "Vex");
    character.abilities.insert(Ability::Strength, 16);
    character.abilities.insert(Ability::Dexterity, 14);
    character
        .skill_modifiers
        .insert(character::Skill::Stealth, 4);
    character.initiative_modifier = 2;
    character.death_saving_throw_modifier = 1;
    character
}

pub fn user(id: i64, is_bot: bool) -> User {
    User {
        id,
        username: Some("player".to_string()),
        first_name: Some("Player".to_string()),
        last_name: None,
        is_bot,
    }
}

pub fn message_from(user: Option<User>, text: &str) -> Message {
    Message {
        id: "7".to_string(),
        user,
        chat: Chat {
            id: CHAT_ID,
            chat_type: "group".to_string(),
        },
        content: text.to_string(),
        created_at: Utc::now(),
    }
}

pub fn message(text: &str) -> Message {
    message_from(Some(user(USER_ID, false)), text)
}

pub struct Harness {
    pub bot: Arc<MockBot>,
    pub characters: Arc<ScriptedCharacterService>,
    pub contexts: ContextService,
    pub chain: HandlerChain,
    pub help_text: String,
}

/// Handler chain over a mock bot, an in-memory context store and `characters`, rolling 4s.
pub async fn harness(characters: ScriptedCharacterService) -> Harness {
    let bot = MockBot::new();
    let characters = Arc::new(characters);
    let contexts = ContextService::new(Arc::new(InMemoryContextRepository::new()));
    let bot_username: BotUsername = Arc::new(RwLock::new(Some(BOT_USERNAME.to_string())));
    let help_text = render_help_message(DEFAULT_HELP_MESSAGE_TEMPLATE, &CommandGroups::new(), "_-.");

    let chain = build_handler_chain(HandlerDeps {
        bot: bot.clone(),
        bot_username,
        contexts: contexts.clone(),
        characters: characters.clone(),
        rolls: RollService::new(Arc::new(FixedDice(4))),
        help_text: help_text.clone(),
    });

    Harness {
        bot,
        characters,
        contexts,
        chain,
        help_text,
    }
}
