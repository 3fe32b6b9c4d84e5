use serde::{Deserialize, Serialize};

use crate::id::DocId;
use crate::temporal::Timestamp;

/// A named grouping of books, also called a bookshelf.
///
/// Genres are identified by their store-assigned [`DocId`] and ordered by
/// creation time in the canonical list. Only the name is mutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: DocId,
    pub name: String,
    pub created_at: Timestamp,
}

impl Genre {
    pub fn new(id: DocId, name: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
        }
    }
}

/// A titled entry on exactly one shelf.
///
/// `shelf_id` references a live [`Genre`], except transiently while a
/// cascade delete is in flight. Only the title is mutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: DocId,
    pub title: String,
    pub shelf_id: DocId,
    pub created_at: Timestamp,
}

impl Book {
    pub fn new(
        id: DocId,
        title: impl Into<String>,
        shelf_id: DocId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            shelf_id,
            created_at,
        }
    }

    /// Returns `true` if this book sits on the given shelf.
    pub fn is_on_shelf(&self, shelf_id: &DocId) -> bool {
        &self.shelf_id == shelf_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(ms: u64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    #[test]
    fn genre_wire_field_names() {
        let genre = Genre::new(DocId::from_store("g1"), "Fiction", ts(1000));
        let json = serde_json::to_value(&genre).unwrap();
        assert_eq!(json["id"], "g1");
        assert_eq!(json["name"], "Fiction");
        assert_eq!(json["createdAt"], 1000);
    }

    #[test]
    fn book_wire_field_names() {
        let book = Book::new(
            DocId::from_store("b1"),
            "Dune",
            DocId::from_store("g1"),
            ts(2000),
        );
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], "b1");
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["shelfId"], "g1");
        assert_eq!(json["createdAt"], 2000);
    }

    #[test]
    fn book_decodes_from_merged_document_shape() {
        // The remote layer merges the envelope id into the field object
        // before decoding; this is the shape entities must accept.
        let json = serde_json::json!({
            "id": "b7",
            "title": "Emma",
            "shelfId": "g2",
            "createdAt": 1234,
        });
        let book: Book = serde_json::from_value(json).unwrap();
        assert_eq!(book.id.as_str(), "b7");
        assert!(book.is_on_shelf(&DocId::from_store("g2")));
    }

    #[test]
    fn is_on_shelf() {
        let book = Book::new(
            DocId::from_store("b1"),
            "Dune",
            DocId::from_store("g1"),
            ts(0),
        );
        assert!(book.is_on_shelf(&DocId::from_store("g1")));
        assert!(!book.is_on_shelf(&DocId::from_store("g2")));
    }
}
