//! Reply texts.

pub const CHARACTER_FETCH_NO_ACCESS: &str = "Character access error: {character_id}. Please check Character Privacy settings, it should be set to Public.";
/// Sent as MarkdownV2 by roll commands, as plain text elsewhere.
pub const CHARACTER_FETCH_NOT_SET: &str = "Character is not set, use `/character_set <character_id>`";
pub const CHARACTER_FETCH_NOT_FOUND: &str =
    "Character not found: {character_id}. Please check that character_id is correct.";
pub const CHARACTER_FETCH_UNKNOWN_ERROR: &str =
    "Unknown error while fetching character: {character_id}";

pub const CHARACTER_SET_NO_ARGS: &str = "Usage: /character_set <character_id>";
pub const CHARACTER_SET_INVALID_ARGS: &str =
    "Invalid character_id '{character_id}', expected integer";
pub const CHARACTER_SET_SUCCESS: &str = "Current character updated: {character_name}";

pub const CHARACTER_CACHE_CLEAR_SUCCESS: &str = "Character cache cleared";

/// Fills `{character_id}` in one of the fetch/set templates.
pub fn with_character_id(template: &str, character_id: impl std::fmt::Display) -> String {
    template.replace("{character_id}", &character_id.to_string())
}

pub fn character_set_success(character_name: &str) -> String {
    CHARACTER_SET_SUCCESS.replace("{character_name}", character_name)
}
