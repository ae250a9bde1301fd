use crate::config::Config;
use crate::services::{LookupError, LookupRequest};
use crate::state::SharedState;

pub async fn cmd_get_anime(
    config: &Config,
    identifier: &str,
    fields: Vec<String>,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let request = LookupRequest::new(identifier, fields);

    match state.lookup.lookup(&request).await {
        Ok(text) => print!("{text}"),
        Err(LookupError::NotFound(_)) => println!("Anime not found"),
        Err(err @ LookupError::InvalidField(_)) => println!("{err}"),
        Err(err @ LookupError::StorageUnavailable(_)) => return Err(err.into()),
    }

    Ok(())
}
