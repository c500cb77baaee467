//! Resolving track candidates against the catalog search.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::models::{ResolvedTrack, TrackCandidate};
use crate::ports::catalog::{MusicCatalog, TrackQuery};

/// Looks up each candidate in the catalog, keeping the first hit.
pub struct TrackResolver<'a> {
    catalog: &'a dyn MusicCatalog,
    concurrency: usize,
}

impl<'a> TrackResolver<'a> {
    /// Creates a resolver running at most `concurrency` searches at once.
    #[must_use]
    pub fn new(catalog: &'a dyn MusicCatalog, concurrency: usize) -> Self {
        Self { catalog, concurrency: concurrency.max(1) }
    }

    /// Resolves every candidate.
    ///
    /// The output has one entry per candidate, in input order. A candidate
    /// with no hit, or whose search failed, gets `catalog_id: None`.
    pub async fn resolve(&self, candidates: &[TrackCandidate]) -> Vec<ResolvedTrack> {
        let resolved: Vec<ResolvedTrack> = stream::iter(candidates)
            .map(|candidate| self.resolve_one(candidate))
            .buffered(self.concurrency)
            .collect()
            .await;

        let matched = resolved.iter().filter(|r| r.is_resolved()).count();
        info!(candidates = candidates.len(), matched, "resolved track candidates");
        resolved
    }

    async fn resolve_one(&self, candidate: &TrackCandidate) -> ResolvedTrack {
        let query = TrackQuery::top_hit(&candidate.artist, &candidate.title);
        debug!(ordinal = candidate.ordinal, query = %query.query_string(), "searching catalog");

        let catalog_id = match self.catalog.search_tracks(&query).await {
            Ok(hits) => hits.into_iter().next().map(|hit| hit.id),
            Err(e) => {
                warn!(ordinal = candidate.ordinal, error = %e, "catalog search failed");
                None
            }
        };

        if catalog_id.is_none() {
            debug!(
                ordinal = candidate.ordinal,
                title = %candidate.title,
                artist = %candidate.artist,
                "no catalog match"
            );
        }

        ResolvedTrack { candidate: candidate.clone(), catalog_id }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::PlaylistSpec;
    use crate::ports::catalog::{CatalogFuture, CatalogTrack, CreatedPlaylist};

    /// Catalog answering searches from a title → id table.
    ///
    /// Earlier searches yield more often, so concurrent searches finish out of order.
    struct TableCatalog {
        ids: HashMap<String, String>,
        failing: Option<String>,
        searches: AtomicUsize,
    }

    impl TableCatalog {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                ids: entries.iter().map(|(t, id)| ((*t).to_string(), (*id).to_string())).collect(),
                failing: None,
                searches: AtomicUsize::new(0),
            }
        }
    }

    impl MusicCatalog for TableCatalog {
        fn current_user(&self) -> CatalogFuture<'_, String> {
            unreachable!("resolver never looks up the user")
        }

        fn search_tracks(&self, query: &TrackQuery) -> CatalogFuture<'_, Vec<CatalogTrack>> {
            let n = self.searches.fetch_add(1, Ordering::SeqCst);
            let query = query.clone();
            Box::pin(async move {
                assert_eq!(query.limit, 1);
                for _ in 0..5usize.saturating_sub(n) {
                    tokio::task::yield_now().await;
                }
                if self.failing.as_deref() == Some(query.track.as_str()) {
                    return Err("search unavailable".into());
                }
                Ok(self
                    .ids
                    .get(&query.track)
                    .map(|id| vec![CatalogTrack { id: id.clone(), name: query.track.clone() }])
                    .unwrap_or_default())
            })
        }

        fn create_playlist(&self, _: &str, _: &PlaylistSpec) -> CatalogFuture<'_, CreatedPlaylist> {
            unreachable!("resolver never creates playlists")
        }

        fn add_tracks(&self, _: &str, _: &[String]) -> CatalogFuture<'_, ()> {
            unreachable!("resolver never adds tracks")
        }
    }

    fn candidates(titles: &[&str]) -> Vec<TrackCandidate> {
        titles
            .iter()
            .zip(1..)
            .map(|(title, ordinal)| TrackCandidate {
                title: (*title).to_string(),
                artist: "Artist".into(),
                ordinal,
            })
            .collect()
    }

    #[tokio::test]
    async fn keeps_one_entry_per_candidate_in_order() {
        let catalog = TableCatalog::new(&[("Weightless", "t1"), ("Divenire", "t3")]);
        let input = candidates(&["Weightless", "Not A Real Song", "Divenire"]);

        let resolved = TrackResolver::new(&catalog, 1).resolve(&input).await;

        assert_eq!(resolved.len(), 3);
        let ids: Vec<Option<&str>> = resolved.iter().map(|r| r.catalog_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("t1"), None, Some("t3")]);
        let ordinals: Vec<u32> = resolved.iter().map(|r| r.candidate.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn concurrent_resolution_preserves_ordinal_order() {
        let titles = ["a", "b", "c", "d", "e"];
        let table: Vec<(&str, &str)> = titles.iter().map(|t| (*t, *t)).collect();
        let catalog = TableCatalog::new(&table);

        let resolved = TrackResolver::new(&catalog, 4).resolve(&candidates(&titles)).await;

        let ids: Vec<&str> = resolved.iter().filter_map(|r| r.catalog_id.as_deref()).collect();
        assert_eq!(ids, titles);
        assert_eq!(catalog.searches.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn failed_search_is_unresolved() {
        let mut catalog = TableCatalog::new(&[("a", "t1"), ("b", "t2")]);
        catalog.failing = Some("b".into());

        let resolved = TrackResolver::new(&catalog, 2).resolve(&candidates(&["a", "b"])).await;

        assert_eq!(resolved[0].catalog_id.as_deref(), Some("t1"));
        assert_eq!(resolved[1].catalog_id, None);
    }

    #[tokio::test]
    async fn empty_input_makes_no_searches() {
        let catalog = TableCatalog::new(&[]);
        assert!(TrackResolver::new(&catalog, 4).resolve(&[]).await.is_empty());
        assert_eq!(catalog.searches.load(Ordering::SeqCst), 0);
    }
}
