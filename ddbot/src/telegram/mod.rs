//! Telegram transport: teloxide type adapters, the [`ddbot_core::Bot`] implementation, profile sync
//! steps and the update dispatcher.

mod adapters;
mod bot_adapter;
mod dispatcher;
mod profile;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use dispatcher::{dispatch, handle_update};
pub use profile::{
    resolve_username_step, sync_commands_step, sync_description_step, sync_name_step,
    sync_short_description_step,
};

use tracing::error;

/// Creates the teloxide bot, pointing it at a custom Bot API server when `api_url` is set.
pub fn build_bot(token: &str, api_url: Option<&str>) -> teloxide::Bot {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}
