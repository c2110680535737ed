use serde::{Deserialize, Serialize};

/// Per-(user, chat) state: which character the user rolls for in that chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub character_id: i64,
}

impl Context {
    pub fn new(character_id: i64) -> Self {
        Self { character_id }
    }
}
