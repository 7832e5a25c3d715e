//! Search counter operations on top of the documents API.
//!
//! Appwrite has no atomic increment, so [`AppwriteClient::record_search`] is
//! a read followed by a create or update. Two concurrent searches for the
//! same new term can both create a document, and two concurrent searches for
//! an existing term can both write `count + 1`. Use the Postgres backend when
//! exact counts matter.

use marquee_core::{normalize_search_term, MovieSnapshot, SearchCount};

use crate::client::AppwriteClient;
use crate::error::AppwriteError;
use crate::query::Query;
use crate::types::{CountUpdate, CounterDocument, DocumentList, NewCounter};

const SEARCH_TERM_ATTR: &str = "searchTerm";
const COUNT_ATTR: &str = "count";

impl AppwriteClient {
    /// Looks up the counter document for an already-normalized term.
    ///
    /// # Errors
    ///
    /// Propagates any [`AppwriteError`] from the list call.
    pub async fn find_counter(
        &self,
        search_term: &str,
    ) -> Result<Option<CounterDocument>, AppwriteError> {
        let list: DocumentList<CounterDocument> = self
            .list_documents(&[Query::equal(SEARCH_TERM_ATTR, search_term)])
            .await?;
        Ok(list.documents.into_iter().next())
    }

    /// Increments the counter for `term`, creating it with `count = 1` and
    /// the given snapshot when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppwriteError::EmptySearchTerm`] if `term` normalizes to
    /// nothing, or any error from the underlying document calls.
    pub async fn record_search(
        &self,
        term: &str,
        snapshot: MovieSnapshot<'_>,
    ) -> Result<SearchCount, AppwriteError> {
        let search_term = normalize_search_term(term).ok_or(AppwriteError::EmptySearchTerm)?;

        let document: CounterDocument = match self.find_counter(&search_term).await? {
            Some(existing) => {
                self.update_document(
                    &existing.id,
                    CountUpdate {
                        count: existing.count + 1,
                    },
                )
                .await?
            }
            None => {
                let document_id = uuid::Uuid::new_v4().simple().to_string();
                self.create_document(
                    &document_id,
                    NewCounter {
                        search_term: &search_term,
                        count: 1,
                        movie_id: snapshot.movie_id,
                        title: snapshot.title,
                        poster_url: snapshot.poster_url,
                    },
                )
                .await?
            }
        };

        tracing::debug!(
            search_term = %document.search_term,
            count = document.count,
            "recorded search"
        );
        Ok(document.into())
    }

    /// Returns up to `limit` counters ordered by count descending.
    ///
    /// Ties are broken by most recent update, then by term. `limit == 0`
    /// returns an empty list without calling Appwrite.
    ///
    /// # Errors
    ///
    /// Propagates any [`AppwriteError`] from the list call.
    pub async fn list_trending(&self, limit: usize) -> Result<Vec<SearchCount>, AppwriteError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let list: DocumentList<CounterDocument> = self
            .list_documents(&[
                Query::order_desc(COUNT_ATTR),
                Query::order_desc("$updatedAt"),
                Query::limit(limit),
            ])
            .await?;

        let mut counts: Vec<SearchCount> = list.documents.into_iter().map(Into::into).collect();
        // Appwrite already orders; re-sort so the term tie-break matches the
        // other backends.
        counts.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
                .then_with(|| a.search_term.cmp(&b.search_term))
        });
        counts.truncate(limit);
        Ok(counts)
    }
}
