//! Chat command front end.
//!
//! [`ChatBot`] turns one incoming chat message into at most one reply. It has
//! no knowledge of the chat network: [`discord`] connects it to a Discord
//! gateway, [`console`] drives it from stdin for local testing, and the REST
//! API exposes it for webhook bridges.

pub mod console;
pub mod discord;
pub mod tokenizer;

use crate::constants::bot::{GET_ANIME, HOW_TO_USE, PRINT_HELLO};
use crate::services::projector::requestable_fields;
use crate::services::{LookupError, LookupRequest, LookupService};
use tracing::{debug, info};

pub const NOT_FOUND_REPLY: &str = "Anime not found";
pub const STORAGE_ERROR_REPLY: &str = "Database query error";
pub const HELLO_REPLY: &str = "Hello, I've printed something for you!";

#[derive(Clone)]
pub struct ChatBot {
    prefix: String,
    lookup: LookupService,
}

impl ChatBot {
    #[must_use]
    pub fn new(prefix: impl Into<String>, lookup: LookupService) -> Self {
        Self {
            prefix: prefix.into(),
            lookup,
        }
    }

    /// Handles a raw chat message. Only messages that start with the command
    /// prefix are answered; anything else, including leading whitespace,
    /// produces no reply.
    pub async fn handle_message(&self, message: &str) -> Option<String> {
        let rest = message.strip_prefix(self.prefix.as_str())?;

        let (command, args) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));

        if command.is_empty() {
            return None;
        }

        debug!(command, "Received chat command");

        let reply = match command {
            GET_ANIME => self.get_anime(args).await,
            HOW_TO_USE => self.help_text(),
            PRINT_HELLO => {
                info!("Bot received the {}{} command", self.prefix, PRINT_HELLO);
                HELLO_REPLY.to_string()
            }
            other => format!("Unknown command: {other}"),
        };

        Some(reply)
    }

    async fn get_anime(&self, args: &str) -> String {
        let mut tokens = match tokenizer::tokenize(args) {
            Ok(tokens) => tokens,
            Err(e) => return format!("Could not parse arguments: {e}"),
        };

        if tokens.is_empty() {
            return self.usage_line();
        }

        let identifier = tokens.remove(0);
        let request = LookupRequest::new(identifier, tokens);

        match self.lookup.lookup(&request).await {
            Ok(text) => text,
            Err(err @ LookupError::InvalidField(_)) => err.to_string(),
            Err(LookupError::NotFound(_)) => NOT_FOUND_REPLY.to_string(),
            Err(LookupError::StorageUnavailable(_)) => STORAGE_ERROR_REPLY.to_string(),
        }
    }

    fn usage_line(&self) -> String {
        format!(
            "{}{} <anime_identifier> [<field1> <field2> ...]",
            self.prefix, GET_ANIME
        )
    }

    fn help_text(&self) -> String {
        let mut help = String::from("To get information about an anime, use the following command:\n");
        help.push_str(&self.usage_line());
        help.push_str("\n\nExample:\n");
        help.push_str(&format!(
            "{}{} \"Attack on Titan\" tags duration finish_year\n",
            self.prefix, GET_ANIME
        ));
        help.push_str(
            "Put the title between \" \" (quotation marks) if it is more than one word!\n\n",
        );
        help.push_str("Available fields you can request:\n");
        for field in requestable_fields() {
            help.push_str("- ");
            help.push_str(field);
            help.push('\n');
        }
        help
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::anime::{AnimeRecord, NewAnime};
    use std::sync::Arc;

    fn bot() -> (Arc<InMemoryStore>, ChatBot) {
        let store = Arc::new(InMemoryStore::with_records(vec![
            AnimeRecord::from_new(
                1,
                NewAnime {
                    episodes: 25,
                    duration: "24 min".to_string(),
                    tags: "Action".to_string(),
                    ..NewAnime::titled("Attack on Titan")
                },
            ),
            AnimeRecord::from_new(
                2,
                NewAnime {
                    episodes: 220,
                    ..NewAnime::titled("Naruto")
                },
            ),
        ]));
        let lookup = LookupService::new(store.clone(), 40);
        (store, ChatBot::new("!", lookup))
    }

    #[tokio::test]
    async fn ignores_messages_without_prefix() {
        let (_, bot) = bot();
        assert_eq!(bot.handle_message("get_anime Naruto").await, None);
        assert_eq!(bot.handle_message("!").await, None);
        assert_eq!(bot.handle_message(" !print_hello").await, None);
    }

    #[tokio::test]
    async fn get_anime_with_quoted_title_and_fields() {
        let (_, bot) = bot();
        let reply = bot
            .handle_message("!get_anime \"Attack on Titan\" tags duration")
            .await
            .unwrap();
        assert_eq!(
            reply,
            "Title: Attack on Titan\ntags: Action\nduration: 24 min\nepisodes: 25\n"
        );
    }

    #[tokio::test]
    async fn get_anime_by_id() {
        let (_, bot) = bot();
        let reply = bot.handle_message("!get_anime 2").await.unwrap();
        assert_eq!(reply, "Title: Naruto\nepisodes: 220\n");
    }

    #[tokio::test]
    async fn get_anime_reports_invalid_field() {
        let (_, bot) = bot();
        let reply = bot
            .handle_message("!get_anime Naruto tags bogus_field")
            .await
            .unwrap();
        assert_eq!(reply, "Field 'bogus_field' not found");
    }

    #[tokio::test]
    async fn get_anime_reports_not_found() {
        let (_, bot) = bot();
        let reply = bot.handle_message("!get_anime zzz_no_match").await.unwrap();
        assert_eq!(reply, NOT_FOUND_REPLY);
    }

    #[tokio::test]
    async fn get_anime_hides_storage_details() {
        let (store, bot) = bot();
        store.set_offline(true);
        let reply = bot.handle_message("!get_anime Naruto").await.unwrap();
        assert_eq!(reply, STORAGE_ERROR_REPLY);
    }

    #[tokio::test]
    async fn get_anime_without_arguments_prints_usage() {
        let (_, bot) = bot();
        let reply = bot.handle_message("!get_anime").await.unwrap();
        assert!(reply.starts_with("!get_anime <anime_identifier>"));
    }

    #[tokio::test]
    async fn get_anime_with_unbalanced_quotes() {
        let (_, bot) = bot();
        let reply = bot
            .handle_message("!get_anime \"Attack on Titan")
            .await
            .unwrap();
        assert_eq!(reply, "Could not parse arguments: No closing quotation");
    }

    #[tokio::test]
    async fn get_anime_with_trailing_backslash() {
        let (_, bot) = bot();
        let reply = bot.handle_message(r"!get_anime Naruto\").await.unwrap();
        assert_eq!(reply, "Could not parse arguments: No escaped character");
    }

    #[tokio::test]
    async fn how_to_use_lists_fields() {
        let (_, bot) = bot();
        let reply = bot.handle_message("!how_to_use").await.unwrap();
        assert!(reply.contains("- Season_of_Release\n"));
        assert!(reply.contains("- all\n"));
    }

    #[tokio::test]
    async fn print_hello_and_unknown_commands() {
        let (_, bot) = bot();
        assert_eq!(
            bot.handle_message("!print_hello").await.as_deref(),
            Some(HELLO_REPLY)
        );
        assert_eq!(
            bot.handle_message("!dance").await.as_deref(),
            Some("Unknown command: dance")
        );
    }

    #[tokio::test]
    async fn custom_prefix() {
        let (store, _) = bot();
        let bot = ChatBot::new("?", LookupService::new(store, 40));
        assert_eq!(bot.handle_message("!get_anime Naruto").await, None);
        assert!(bot.handle_message("?get_anime Naruto").await.is_some());
    }
}
