use anyhow::Context;

use crate::cli::AddArgs;
use crate::config::Config;
use crate::models::anime::NewAnime;
use crate::state::SharedState;

impl From<AddArgs> for NewAnime {
    fn from(args: AddArgs) -> Self {
        let mut anime = Self::titled(args.title);

        if let Some(media_type) = args.media_type {
            anime.media_type = media_type;
        }
        if let Some(episodes) = args.episodes {
            anime.episodes = episodes;
        }
        if let Some(duration) = args.duration {
            anime.duration = duration;
        }
        if let Some(ongoing) = args.ongoing {
            anime.ongoing = ongoing;
        }
        if let Some(season) = args.season {
            anime.season_of_release = season;
        }
        if let Some(description) = args.description {
            anime.description = description;
        }
        if let Some(studios) = args.studios {
            anime.studios = studios;
        }
        if let Some(tags) = args.tags {
            anime.tags = tags;
        }
        if let Some(content_warning) = args.content_warning {
            anime.content_warning = content_warning;
        }
        if let Some(watched) = args.watched {
            anime.watched = watched;
        }
        if let Some(watching) = args.watching {
            anime.watching = watching;
        }
        if let Some(want_to_watch) = args.want_to_watch {
            anime.want_to_watch = want_to_watch;
        }
        if let Some(dropped) = args.dropped {
            anime.dropped = dropped;
        }
        if let Some(rating) = args.rating {
            anime.rating = rating;
        }
        if let Some(votes) = args.votes {
            anime.votes = votes;
        }
        anime.start_year = args.start_year;
        anime.finish_year = args.finish_year;

        anime
    }
}

pub async fn cmd_add_anime(config: &Config, args: AddArgs) -> anyhow::Result<()> {
    if args.title.trim().is_empty() {
        anyhow::bail!("Title must not be empty");
    }

    let state = SharedState::new(config.clone()).await?;
    let record = state
        .lookup
        .create(NewAnime::from(args))
        .await
        .context("Failed to insert anime")?;

    println!("✓ Added {} (ID: {})", record.title, record.id);
    Ok(())
}
