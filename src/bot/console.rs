//! Line-oriented transport: one message per input line, replies written back
//! as they are produced.

use super::ChatBot;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

pub async fn run<R, W>(bot: &ChatBot, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = bot.handle_message(&line).await else {
            continue;
        };

        writer.write_all(reply.as_bytes()).await?;
        if !reply.ends_with('\n') {
            writer.write_all(b"\n").await?;
        }
        writer.flush().await?;
        handled += 1;
    }

    info!("Input closed after {} command(s)", handled);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::anime::{AnimeRecord, NewAnime};
    use crate::services::LookupService;
    use std::sync::Arc;

    #[tokio::test]
    async fn replies_to_each_command_line() {
        let store = Arc::new(InMemoryStore::with_records(vec![AnimeRecord::from_new(
            1,
            NewAnime {
                episodes: 12,
                ..NewAnime::titled("Mob Psycho 100")
            },
        )]));
        let bot = ChatBot::new("!", LookupService::new(store, 40));

        let input = b"hello there\n!get_anime 1\n!print_hello\n".as_slice();
        let mut output = Vec::new();
        run(&bot, input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "Title: Mob Psycho 100\nepisodes: 12\nHello, I've printed something for you!\n"
        );
    }
}
