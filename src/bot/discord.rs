//! Discord gateway transport for [`ChatBot`].

use super::ChatBot;
use anyhow::Context as _;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info, warn};

/// Discord rejects messages longer than this many characters.
pub const MESSAGE_LIMIT: usize = 2000;

struct Handler {
    bot: ChatBot,
}

#[async_trait::async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let Some(reply) = self.bot.handle_message(&msg.content).await else {
            return;
        };

        for chunk in split_reply(&reply, MESSAGE_LIMIT) {
            if let Err(e) = msg.channel_id.say(&ctx.http, chunk).await {
                error!("Failed to send reply to channel {}: {}", msg.channel_id, e);
                break;
            }
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Connected to Discord as {}", ready.user.name);
    }
}

/// Connects to the gateway and answers commands until Ctrl+C.
pub async fn run(bot: ChatBot, token: &str) -> anyhow::Result<()> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(Handler { bot })
        .await
        .context("Failed to build Discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, closing Discord shards");
                shard_manager.shutdown_all().await;
            }
            Err(e) => warn!("Error listening for shutdown: {}", e),
        }
    });

    client
        .start()
        .await
        .context("Discord gateway connection failed")?;

    info!("Discord bot stopped");
    Ok(())
}

/// Splits `reply` into chunks of at most `limit` characters, preferring line
/// breaks. Lines longer than `limit` are cut at character boundaries.
#[must_use]
pub fn split_reply(reply: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in reply.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
