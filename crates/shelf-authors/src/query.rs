use std::fmt;

/// A typed query expression over the content API.
///
/// Renders to the API's own query language: a document-type filter plus a
/// field projection, e.g. `*[_type == "author"]{_id, name, slug}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorQuery {
    doc_type: String,
    fields: Vec<String>,
}

impl AuthorQuery {
    /// The standard author projection: identity, display fields, resolved
    /// image URL, and biography.
    pub fn authors() -> Self {
        Self {
            doc_type: "author".to_string(),
            fields: vec![
                "_id".to_string(),
                "name".to_string(),
                "slug".to_string(),
                "image{asset->{url}}".to_string(),
                "bio".to_string(),
            ],
        }
    }

    /// The document type this query filters on.
    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    /// Render the query expression.
    pub fn render(&self) -> String {
        format!(
            "*[_type == \"{}\"]{{{}}}",
            self.doc_type,
            self.fields.join(", ")
        )
    }
}

impl fmt::Display for AuthorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
