//! The scoped and global book lists, their remote-backed mutations, and the
//! cascade-delete saga.

use serde_json::json;
use tracing::{debug, warn};

use shelf_remote::{collections, Document, DocumentStore};
use shelf_types::{Book, DocId};

use crate::error::{SessionError, SessionResult};
use crate::filter::filter_books;
use crate::view::{FetchScope, ViewMode};

/// Aggregate result of a cascade delete: one entry per affected book.
///
/// Per-book deletions are independent; successes are never rolled back.
#[derive(Clone, Debug, Default)]
pub struct CascadeReport {
    /// Books whose remote record was deleted.
    pub deleted: Vec<DocId>,
    /// Books whose deletion failed, with the failure rendered as text.
    pub failed: Vec<(DocId, String)>,
}

impl CascadeReport {
    /// Total deletions attempted.
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    /// `true` when every attempted deletion succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Owns the two book lists (one scoped to the selected genre, one global)
/// plus the active search query and the derived filtered list.
///
/// Which list a mutation touches is decided by the [`FetchScope`] passed in
/// from the view coordinator; the filtered list is recomputed through the
/// search predicate after every change, never patched directly.
#[derive(Debug, Default)]
pub struct BookStore {
    scoped: Vec<Book>,
    global: Vec<Book>,
    query: String,
    filtered: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Books of the currently selected genre, as last fetched.
    pub fn scoped(&self) -> &[Book] {
        &self.scoped
    }

    /// Books across all genres, as last fetched.
    pub fn global(&self) -> &[Book] {
        &self.global
    }

    /// The list the UI shows: the authoritative list filtered by the active
    /// query.
    pub fn visible(&self) -> &[Book] {
        &self.filtered
    }

    /// The active search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    fn authoritative(&self, scope: &FetchScope) -> &[Book] {
        match scope {
            FetchScope::Global => &self.global,
            FetchScope::Genre(_) => &self.scoped,
        }
    }

    fn refilter(&mut self, scope: &FetchScope) {
        self.filtered = filter_books(&self.query, self.authoritative(scope)).into_owned();
    }

    /// Fetch the list for the given scope and reset the filter to it.
    ///
    /// Navigating always clears the query: the fresh list is shown unfiltered.
    pub async fn fetch_for_scope<S>(&mut self, remote: &S, scope: &FetchScope) -> SessionResult<()>
    where
        S: DocumentStore + ?Sized,
    {
        let docs = match scope {
            FetchScope::Global => {
                remote
                    .query_all_ordered_by(collections::BOOKS, collections::CREATED_AT)
                    .await?
            }
            FetchScope::Genre(id) => {
                remote
                    .query_equals(collections::BOOKS, collections::SHELF_ID, &json!(id.as_str()))
                    .await?
            }
        };
        let books: Vec<Book> = docs.iter().map(Document::decode).collect::<Result<_, _>>()?;

        match scope {
            FetchScope::Global => self.global = books.clone(),
            FetchScope::Genre(_) => self.scoped = books.clone(),
        }
        self.query.clear();
        self.filtered = books;
        Ok(())
    }

    /// Add a book to the selected genre.
    ///
    /// Fails with [`SessionError::NoGenreSelected`], before any remote call
    /// is issued, when the view is browsing all genres. A title that trims
    /// to empty is a silent no-op. On success the book lands in the authoritative
    /// list for the current scope and the filter is re-applied, so a book
    /// that does not match the active query stays hidden.
    pub async fn add<S>(
        &mut self,
        remote: &S,
        title: &str,
        mode: &ViewMode,
        scope: &FetchScope,
    ) -> SessionResult<Option<Book>>
    where
        S: DocumentStore + ?Sized,
    {
        let ViewMode::PerGenre(shelf_id) = mode else {
            return Err(SessionError::NoGenreSelected);
        };
        if title.trim().is_empty() {
            return Ok(None);
        }

        let receipt = remote
            .insert(
                collections::BOOKS,
                json!({ "title": title, "shelfId": shelf_id.as_str() }),
            )
            .await?;
        debug!(id = %receipt.id, title, shelf = %shelf_id, "book created");

        let book = Book::new(receipt.id, title, shelf_id.clone(), receipt.created_at);
        match scope {
            FetchScope::Global => self.global.push(book.clone()),
            FetchScope::Genre(_) => self.scoped.push(book.clone()),
        }
        self.refilter(scope);
        Ok(Some(book))
    }

    /// Rename a book wherever it appears.
    ///
    /// Unknown ids are a silent no-op (`Ok(false)`) with no remote call.
    pub async fn rename<S>(
        &mut self,
        remote: &S,
        id: &DocId,
        new_title: &str,
        scope: &FetchScope,
    ) -> SessionResult<bool>
    where
        S: DocumentStore + ?Sized,
    {
        if !self.contains(id) {
            return Ok(false);
        }

        remote
            .update_by_id(collections::BOOKS, id, json!({ "title": new_title }))
            .await?;

        for book in self.scoped.iter_mut().chain(self.global.iter_mut()) {
            if &book.id == id {
                book.title = new_title.to_string();
            }
        }
        self.refilter(scope);
        Ok(true)
    }

    /// Delete a book remotely and drop it from every list that holds it.
    ///
    /// Unknown ids are a silent no-op (`Ok(false)`) with no remote call.
    pub async fn remove<S>(
        &mut self,
        remote: &S,
        id: &DocId,
        scope: &FetchScope,
    ) -> SessionResult<bool>
    where
        S: DocumentStore + ?Sized,
    {
        if !self.contains(id) {
            return Ok(false);
        }

        remote.delete_by_id(collections::BOOKS, id).await?;
        self.scoped.retain(|b| &b.id != id);
        self.global.retain(|b| &b.id != id);
        self.refilter(scope);
        debug!(id = %id, "book removed");
        Ok(true)
    }

    /// Delete every book on the given shelf: the cascade half of a genre
    /// removal.
    ///
    /// Queries the remote store for the shelf's books and issues one
    /// independent deletion per book, with no transaction and no rollback. Books
    /// whose deletion succeeded are pruned from all lists; failed ones stay,
    /// locally and remotely, and are listed in the report. The caller
    /// decides what a partial result means (the session facade aborts the
    /// genre deletion).
    pub async fn cascade_remove_genre<S>(
        &mut self,
        remote: &S,
        shelf_id: &DocId,
        scope: &FetchScope,
    ) -> SessionResult<CascadeReport>
    where
        S: DocumentStore + ?Sized,
    {
        let docs = remote
            .query_equals(
                collections::BOOKS,
                collections::SHELF_ID,
                &json!(shelf_id.as_str()),
            )
            .await?;

        let mut report = CascadeReport::default();
        for doc in docs {
            match remote.delete_by_id(collections::BOOKS, &doc.id).await {
                Ok(_) => report.deleted.push(doc.id),
                Err(e) => {
                    warn!(book = %doc.id, shelf = %shelf_id, error = %e, "cascade deletion failed");
                    report.failed.push((doc.id, e.to_string()));
                }
            }
        }

        let gone: std::collections::HashSet<DocId> = report.deleted.iter().cloned().collect();
        self.scoped.retain(|b| !gone.contains(&b.id));
        self.global.retain(|b| !gone.contains(&b.id));
        self.refilter(scope);

        debug!(
            shelf = %shelf_id,
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "cascade complete"
        );
        Ok(report)
    }

    /// Set the search query and recompute the filtered list.
    pub fn set_query(&mut self, query: &str, scope: &FetchScope) {
        self.query = query.to_string();
        self.refilter(scope);
    }

    fn contains(&self, id: &DocId) -> bool {
        self.scoped.iter().chain(self.global.iter()).any(|b| &b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlakyStore;
    use shelf_remote::InMemoryDocumentStore;

    fn gid(s: &str) -> DocId {
        DocId::from_store(s)
    }

    fn per_genre(s: &str) -> (ViewMode, FetchScope) {
        (ViewMode::PerGenre(gid(s)), FetchScope::Genre(gid(s)))
    }

    async fn seed_book(remote: &InMemoryDocumentStore, title: &str, shelf: &str) -> DocId {
        remote
            .insert(
                collections::BOOKS,
                json!({ "title": title, "shelfId": shelf }),
            )
            .await
            .unwrap()
            .id
    }

    // -----------------------------------------------------------------------
    // Fetch
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn global_fetch_sees_every_shelf() {
        let remote = InMemoryDocumentStore::new();
        seed_book(&remote, "Dune", "g1").await;
        seed_book(&remote, "Emma", "g2").await;

        let mut store = BookStore::new();
        store.fetch_for_scope(&remote, &FetchScope::Global).await.unwrap();
        assert_eq!(store.global().len(), 2);
        assert_eq!(store.visible().len(), 2);
    }

    #[tokio::test]
    async fn scoped_fetch_sees_one_shelf() {
        let remote = InMemoryDocumentStore::new();
        seed_book(&remote, "Dune", "g1").await;
        seed_book(&remote, "Emma", "g2").await;

        let mut store = BookStore::new();
        store
            .fetch_for_scope(&remote, &FetchScope::Genre(gid("g1")))
            .await
            .unwrap();
        assert_eq!(store.scoped().len(), 1);
        assert_eq!(store.scoped()[0].title, "Dune");
        assert!(store.scoped()[0].is_on_shelf(&gid("g1")));
    }

    #[tokio::test]
    async fn fetch_resets_the_active_filter() {
        let remote = InMemoryDocumentStore::new();
        seed_book(&remote, "Dune", "g1").await;
        seed_book(&remote, "Emma", "g1").await;

        let mut store = BookStore::new();
        let scope = FetchScope::Genre(gid("g1"));
        store.fetch_for_scope(&remote, &scope).await.unwrap();
        store.set_query("dune", &scope);
        assert_eq!(store.visible().len(), 1);

        // Navigation clears the query and shows the fresh list whole.
        store.fetch_for_scope(&remote, &scope).await.unwrap();
        assert_eq!(store.query(), "");
        assert_eq!(store.visible().len(), 2);
    }

    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn add_requires_a_selected_genre() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();

        let err = store
            .add(&remote, "Dune", &ViewMode::AllGenres, &FetchScope::Global)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NoGenreSelected));
        // No remote call was issued.
        assert!(remote.is_empty(collections::BOOKS));
    }

    #[tokio::test]
    async fn add_blank_title_is_silent_noop() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let (mode, scope) = per_genre("g1");

        assert!(store.add(&remote, "  ", &mode, &scope).await.unwrap().is_none());
        assert!(remote.is_empty(collections::BOOKS));
    }

    #[tokio::test]
    async fn add_lands_in_scoped_list_and_remote() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let (mode, scope) = per_genre("g1");
        store.fetch_for_scope(&remote, &scope).await.unwrap();

        let book = store.add(&remote, "Dune", &mode, &scope).await.unwrap().unwrap();
        assert!(book.is_on_shelf(&gid("g1")));
        assert_eq!(store.scoped().len(), 1);
        assert_eq!(store.visible().len(), 1);

        // The global fetch also contains it.
        store.fetch_for_scope(&remote, &FetchScope::Global).await.unwrap();
        assert_eq!(store.global().len(), 1);
        assert_eq!(store.global()[0].title, "Dune");
    }

    #[tokio::test]
    async fn add_under_search_all_lands_in_global_list() {
        // A genre is selected but search-all widens the scope: the global
        // list is authoritative and receives the book.
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let mode = ViewMode::PerGenre(gid("g1"));
        let scope = FetchScope::Global;
        store.fetch_for_scope(&remote, &scope).await.unwrap();

        store.add(&remote, "Dune", &mode, &scope).await.unwrap();
        assert_eq!(store.global().len(), 1);
        assert!(store.scoped().is_empty());
    }

    #[tokio::test]
    async fn add_reapplies_filter_instead_of_patching() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let (mode, scope) = per_genre("g1");
        store.fetch_for_scope(&remote, &scope).await.unwrap();
        store.add(&remote, "Dune", &mode, &scope).await.unwrap();

        store.set_query("dune", &scope);
        assert_eq!(store.visible().len(), 1);

        // A non-matching book is stored but stays hidden behind the query.
        store.add(&remote, "Emma", &mode, &scope).await.unwrap();
        assert_eq!(store.scoped().len(), 2);
        let titles: Vec<&str> = store.visible().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune"]);
    }

    // -----------------------------------------------------------------------
    // Rename / remove
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn rename_updates_lists_and_remote() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let (mode, scope) = per_genre("g1");
        store.fetch_for_scope(&remote, &scope).await.unwrap();
        let book = store.add(&remote, "Dune", &mode, &scope).await.unwrap().unwrap();

        assert!(store.rename(&remote, &book.id, "Dune Messiah", &scope).await.unwrap());
        assert_eq!(store.scoped()[0].title, "Dune Messiah");
        assert_eq!(store.visible()[0].title, "Dune Messiah");

        store.fetch_for_scope(&remote, &scope).await.unwrap();
        assert_eq!(store.scoped()[0].title, "Dune Messiah");
    }

    #[tokio::test]
    async fn rename_unknown_id_is_silent_noop() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let scope = FetchScope::Global;

        let renamed = store
            .rename(&remote, &gid("ghost"), "X", &scope)
            .await
            .unwrap();
        assert!(!renamed);
    }

    #[tokio::test]
    async fn remove_drops_from_every_list() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let (mode, scope) = per_genre("g1");
        store.fetch_for_scope(&remote, &scope).await.unwrap();
        let book = store.add(&remote, "Dune", &mode, &scope).await.unwrap().unwrap();

        assert!(store.remove(&remote, &book.id, &scope).await.unwrap());
        assert!(store.scoped().is_empty());
        assert!(store.visible().is_empty());
        assert!(remote.is_empty(collections::BOOKS));
    }

    // -----------------------------------------------------------------------
    // Cascade
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn cascade_deletes_only_the_shelf() {
        let remote = InMemoryDocumentStore::new();
        seed_book(&remote, "Dune", "g1").await;
        seed_book(&remote, "Emma", "g2").await;
        seed_book(&remote, "Ubik", "g1").await;

        let mut store = BookStore::new();
        let scope = FetchScope::Global;
        store.fetch_for_scope(&remote, &scope).await.unwrap();

        let report = store
            .cascade_remove_genre(&remote, &gid("g1"), &scope)
            .await
            .unwrap();
        assert!(report.is_complete());
        assert_eq!(report.deleted.len(), 2);

        let titles: Vec<&str> = store.global().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Emma"]);
        assert_eq!(remote.len(collections::BOOKS), 1);
    }

    #[tokio::test]
    async fn cascade_on_empty_shelf_reports_nothing() {
        let remote = InMemoryDocumentStore::new();
        let mut store = BookStore::new();
        let scope = FetchScope::Global;

        let report = store
            .cascade_remove_genre(&remote, &gid("g1"), &scope)
            .await
            .unwrap();
        assert!(report.is_complete());
        assert_eq!(report.attempted(), 0);
    }

    #[tokio::test]
    async fn partial_cascade_keeps_failed_books() {
        let remote = FlakyStore::new();
        let doomed = seed_flaky(&remote, "Dune", "g1").await;
        let survivor = seed_flaky(&remote, "Ubik", "g1").await;
        remote.fail_delete(&survivor);

        let mut store = BookStore::new();
        let scope = FetchScope::Global;
        store.fetch_for_scope(&remote, &scope).await.unwrap();

        let report = store
            .cascade_remove_genre(&remote, &gid("g1"), &scope)
            .await
            .unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.deleted, vec![doomed]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, survivor);

        // The failed book is still present, locally and remotely.
        assert_eq!(store.global().len(), 1);
        assert_eq!(store.global()[0].title, "Ubik");
        assert_eq!(remote.len(collections::BOOKS), 1);
    }

    async fn seed_flaky(remote: &FlakyStore, title: &str, shelf: &str) -> DocId {
        remote
            .insert(
                collections::BOOKS,
                json!({ "title": title, "shelfId": shelf }),
            )
            .await
            .unwrap()
            .id
    }
}
