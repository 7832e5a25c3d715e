//! Appwrite document payloads for the search counter collection.

use chrono::{DateTime, Utc};
use marquee_core::SearchCount;
use serde::{Deserialize, Serialize};

/// Envelope returned by the list-documents endpoint.
#[derive(Debug, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// A search counter document as stored in Appwrite.
#[derive(Debug, Clone, Deserialize)]
pub struct CounterDocument {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CounterDocument> for SearchCount {
    fn from(doc: CounterDocument) -> Self {
        SearchCount {
            search_term: doc.search_term,
            count: doc.count,
            movie_id: doc.movie_id,
            title: doc.title,
            poster_url: doc.poster_url,
            updated_at: doc.updated_at,
        }
    }
}

/// Attribute payload for creating a counter.
#[derive(Debug, Serialize)]
pub(crate) struct NewCounter<'a> {
    #[serde(rename = "searchTerm")]
    pub search_term: &'a str,
    pub count: i64,
    pub movie_id: i64,
    pub title: &'a str,
    pub poster_url: Option<&'a str>,
}

/// Attribute payload for bumping an existing counter.
#[derive(Debug, Serialize)]
pub(crate) struct CountUpdate {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDocumentRequest<'a, T: Serialize> {
    #[serde(rename = "documentId")]
    pub document_id: &'a str,
    pub data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateDocumentRequest<T: Serialize> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_document_parses_system_fields() {
        let doc: CounterDocument = serde_json::from_value(serde_json::json!({
            "$id": "65f0c2",
            "$createdAt": "2025-01-10T10:00:00.000+00:00",
            "$updatedAt": "2025-01-11T12:30:00.000+00:00",
            "$collectionId": "metrics",
            "searchTerm": "batman",
            "count": 3,
            "movie_id": 268,
            "title": "Batman",
            "poster_url": null
        }))
        .expect("document should parse");

        assert_eq!(doc.id, "65f0c2");
        assert_eq!(doc.count, 3);
        assert!(doc.updated_at.is_some());

        let count: SearchCount = doc.into();
        assert_eq!(count.search_term, "batman");
        assert!(count.poster_url.is_none());
    }

    #[test]
    fn new_counter_uses_appwrite_attribute_names() {
        let body = CreateDocumentRequest {
            document_id: "abc",
            data: NewCounter {
                search_term: "dune",
                count: 1,
                movie_id: 438_631,
                title: "Dune",
                poster_url: Some("https://image.tmdb.org/t/p/w500/d.jpg"),
            },
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["documentId"], "abc");
        assert_eq!(json["data"]["searchTerm"], "dune");
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["movie_id"], 438_631);
    }
}
