//! Identifier resolution: numeric id, then exact title, then fuzzy title.

use crate::db::AnimeStore;
use crate::models::anime::AnimeRecord;
use crate::services::lookup::LookupError;
use crate::services::similarity;
use tracing::debug;

/// Which lookup tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Id,
    ExactTitle,
    Fuzzy { score: u8 },
}

impl MatchTier {
    const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::ExactTitle => "exact_title",
            Self::Fuzzy { .. } => "fuzzy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub record: AnimeRecord,
    pub tier: MatchTier,
}

/// Best fuzzy candidate found in a title scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyCandidate<'a> {
    pub id: i32,
    pub title: &'a str,
    pub score: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    threshold: u8,
}

impl Resolver {
    #[must_use]
    pub const fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Resolves `identifier` to a single record, short-circuiting on the
    /// first tier that hits.
    ///
    /// An all-digit identifier that matches an id never falls through to
    /// title matching. Storage failures in any tier abort the lookup.
    pub async fn resolve(
        &self,
        store: &dyn AnimeStore,
        identifier: &str,
    ) -> Result<Resolution, LookupError> {
        let resolution = self.resolve_inner(store, identifier).await;

        let outcome = match &resolution {
            Ok(r) => r.tier.label(),
            Err(LookupError::NotFound(_)) => "not_found",
            Err(_) => "error",
        };
        metrics::counter!("anime_lookups_total", "outcome" => outcome).increment(1);

        resolution
    }

    async fn resolve_inner(
        &self,
        store: &dyn AnimeStore,
        identifier: &str,
    ) -> Result<Resolution, LookupError> {
        if identifier.is_empty() {
            return Err(LookupError::NotFound(String::new()));
        }

        if let Some(id) = parse_id(identifier)
            && let Some(record) = store.get_by_id(id).await?
        {
            debug!(id, "Resolved anime by id");
            return Ok(Resolution {
                record,
                tier: MatchTier::Id,
            });
        }

        if let Some(record) = store.get_by_title(identifier).await? {
            debug!(id = record.id, "Resolved anime by exact title");
            return Ok(Resolution {
                record,
                tier: MatchTier::ExactTitle,
            });
        }

        let titles = store.list_all_titles().await?;
        let Some(candidate) = best_fuzzy_match(identifier, &titles) else {
            return Err(LookupError::NotFound(identifier.to_string()));
        };

        if candidate.score < self.threshold {
            debug!(
                best = candidate.title,
                score = candidate.score,
                threshold = self.threshold,
                "Best fuzzy candidate below threshold"
            );
            return Err(LookupError::NotFound(identifier.to_string()));
        }

        debug!(
            id = candidate.id,
            title = candidate.title,
            score = candidate.score,
            "Resolved anime by fuzzy title"
        );

        // The row may have vanished between the scan and this fetch.
        let record = store
            .get_by_id(candidate.id)
            .await?
            .ok_or_else(|| LookupError::NotFound(identifier.to_string()))?;

        Ok(Resolution {
            record,
            tier: MatchTier::Fuzzy {
                score: candidate.score,
            },
        })
    }
}

/// One-shot resolution with an explicit threshold.
pub async fn resolve(
    store: &dyn AnimeStore,
    identifier: &str,
    threshold: u8,
) -> Result<AnimeRecord, LookupError> {
    Ok(Resolver::new(threshold)
        .resolve(store, identifier)
        .await?
        .record)
}

/// Parses identifiers made only of ASCII digits. Values outside the id range
/// are treated as titles.
fn parse_id(identifier: &str) -> Option<i32> {
    if identifier.is_empty() || !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    identifier.parse().ok()
}

/// Scores every title against `identifier` and keeps the highest. Ties go to
/// the title seen first, so the result depends on the order of `titles`.
#[must_use]
pub fn best_fuzzy_match<'a>(
    identifier: &str,
    titles: &'a [(i32, String)],
) -> Option<FuzzyCandidate<'a>> {
    let mut best: Option<FuzzyCandidate<'a>> = None;

    for (id, title) in titles {
        let score = similarity::ratio(identifier, title);
        if best.is_none_or(|b| score > b.score) {
            best = Some(FuzzyCandidate {
                id: *id,
                title,
                score,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::anime::NewAnime;

    fn record(id: i32, title: &str, episodes: i32) -> AnimeRecord {
        AnimeRecord::from_new(
            id,
            NewAnime {
                episodes,
                ..NewAnime::titled(title)
            },
        )
    }

    fn sample_store() -> InMemoryStore {
        InMemoryStore::with_records(vec![
            record(1, "Attack on Titan", 25),
            record(2, "Naruto", 220),
        ])
    }

    #[tokio::test]
    async fn resolves_numeric_identifier_by_id() {
        let store = sample_store();
        let resolution = Resolver::new(40).resolve(&store, "1").await.unwrap();
        assert_eq!(resolution.record.title, "Attack on Titan");
        assert_eq!(resolution.tier, MatchTier::Id);
    }

    #[tokio::test]
    async fn id_hit_wins_over_all_digit_title() {
        let store = InMemoryStore::with_records(vec![
            record(1, "Attack on Titan", 25),
            record(2, "1", 12),
        ]);

        let resolution = Resolver::new(40).resolve(&store, "1").await.unwrap();
        assert_eq!(resolution.record.id, 1);
        assert_eq!(resolution.tier, MatchTier::Id);
    }

    #[tokio::test]
    async fn numeric_miss_falls_back_to_title() {
        let store = InMemoryStore::with_records(vec![
            record(1, "Attack on Titan", 25),
            record(2, "86", 11),
        ]);

        let resolution = Resolver::new(40).resolve(&store, "86").await.unwrap();
        assert_eq!(resolution.record.id, 2);
        assert_eq!(resolution.tier, MatchTier::ExactTitle);
    }

    #[tokio::test]
    async fn resolves_exact_title() {
        let store = sample_store();
        let resolution = Resolver::new(40).resolve(&store, "Naruto").await.unwrap();
        assert_eq!(resolution.record.id, 2);
        assert_eq!(resolution.tier, MatchTier::ExactTitle);
    }

    #[tokio::test]
    async fn exact_title_beats_better_looking_fuzzy_candidate() {
        let store = InMemoryStore::with_records(vec![
            record(1, "Naruto Shippuden", 500),
            record(2, "naruto", 220),
            record(3, "Naruto", 220),
        ]);

        let resolution = Resolver::new(40).resolve(&store, "Naruto").await.unwrap();
        assert_eq!(resolution.record.id, 3);
        assert_eq!(resolution.tier, MatchTier::ExactTitle);
    }

    #[tokio::test]
    async fn exact_title_match_is_case_sensitive() {
        let store = sample_store();
        let resolution = Resolver::new(40).resolve(&store, "naruto").await.unwrap();
        assert_eq!(resolution.record.id, 2);
        assert_eq!(resolution.tier, MatchTier::Fuzzy { score: 100 });
    }

    #[tokio::test]
    async fn resolves_misspelled_title_by_fuzzy_match() {
        let store = sample_store();
        let resolution = Resolver::new(40)
            .resolve(&store, "attak on titan")
            .await
            .unwrap();
        assert_eq!(resolution.record.id, 1);
        assert!(matches!(resolution.tier, MatchTier::Fuzzy { score } if score >= 40));
    }

    #[tokio::test]
    async fn short_query_resolves_against_longer_title() {
        let store = InMemoryStore::with_records(vec![
            record(1, "Attack on Titan", 25),
            record(2, "Naruto Shippuden", 500),
        ]);
        let resolver = Resolver::new(40);

        let naruto = resolver.resolve(&store, "naruto").await.unwrap();
        assert_eq!(naruto.record.id, 2);
        assert_eq!(naruto.tier, MatchTier::Fuzzy { score: 55 });

        let titan = resolver.resolve(&store, "titan").await.unwrap();
        assert_eq!(titan.record.id, 1);
        assert_eq!(titan.tier, MatchTier::Fuzzy { score: 50 });
    }

    #[tokio::test]
    async fn below_threshold_is_not_found() {
        let store = sample_store();
        let err = Resolver::new(40)
            .resolve(&store, "zzz_no_match")
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[tokio::test]
    async fn threshold_is_configurable() {
        let store = sample_store();
        // "attak on titan" scores 97 against "Attack on Titan".
        assert!(
            Resolver::new(97)
                .resolve(&store, "attak on titan")
                .await
                .is_ok()
        );
        assert!(matches!(
            Resolver::new(98).resolve(&store, "attak on titan").await,
            Err(LookupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn empty_identifier_is_not_found() {
        let store = InMemoryStore::with_records(vec![record(1, "", 1)]);
        let err = Resolver::new(0).resolve(&store, "").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_store_is_not_found() {
        let store = InMemoryStore::new();
        let err = Resolver::new(40).resolve(&store, "Naruto").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound(_)));
    }

    #[tokio::test]
    async fn storage_failure_is_not_conflated_with_not_found() {
        let store = sample_store();
        store.set_offline(true);

        let err = Resolver::new(40).resolve(&store, "1").await.unwrap_err();
        assert!(matches!(err, LookupError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn fuzzy_resolution_is_deterministic() {
        let store = sample_store();
        let resolver = Resolver::new(40);
        let first = resolver.resolve(&store, "narutoo").await.unwrap();
        for _ in 0..5 {
            assert_eq!(resolver.resolve(&store, "narutoo").await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn free_function_returns_record() {
        let store = sample_store();
        let record = resolve(&store, "Naruto", 40).await.unwrap();
        assert_eq!(record.id, 2);
    }

    #[test]
    fn ties_go_to_first_seen_title() {
        let titles = vec![(7, "Bleach".to_string()), (3, "bleach".to_string())];
        let best = best_fuzzy_match("BLEACH", &titles).unwrap();
        assert_eq!(best.id, 7);
        assert_eq!(best.score, 100);
    }

    #[test]
    fn no_titles_no_candidate() {
        assert_eq!(best_fuzzy_match("Naruto", &[]), None);
    }

    #[test]
    fn parse_id_accepts_only_plain_digits() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id("99999999999"), None);
        assert_eq!(parse_id(""), None);
    }
}
