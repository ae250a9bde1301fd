use std::sync::Arc;

use crate::bot::ChatBot;
use crate::config::Config;
use crate::db::{AnimeStore, Store};
use crate::services::LookupService;

/// Long-lived services shared by the REST API and the chat front end.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Arc<dyn AnimeStore>,

    pub lookup: LookupService,

    pub bot: ChatBot,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Wires the services around an already constructed store.
    #[must_use]
    pub fn with_store(config: Config, store: Arc<dyn AnimeStore>) -> Self {
        let lookup = LookupService::new(store.clone(), config.matching.similarity_threshold);
        let bot = ChatBot::new(config.bot.command_prefix.clone(), lookup.clone());

        Self {
            config: Arc::new(config),
            store,
            lookup,
            bot,
        }
    }
}
