use crate::collection::Record;

/// A search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// The query that produced this result
    pub query: String,
    pub title: String,
    /// Absolute product page URL
    pub url: String,
}

impl Record for Product {
    const FIELDS: &'static [&'static str] = &["query", "title", "url"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "query" => Some(self.query.as_str()),
            "title" => Some(self.title.as_str()),
            "url" => Some(self.url.as_str()),
            _ => None,
        }
    }
}

/// A customer review, also used for entries on product question pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub author: String,
    pub title: String,
    pub content: String,
    pub date: String,
    /// Leading three characters of the star text, e.g. `"4.0"`
    pub rating: String,
    /// The review container's `id` attribute
    pub review_id: String,
}

impl Record for Review {
    const FIELDS: &'static [&'static str] =
        &["author", "title", "content", "date", "rating", "review_id"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "author" => Some(self.author.as_str()),
            "title" => Some(self.title.as_str()),
            "content" => Some(self.content.as_str()),
            "date" => Some(self.date.as_str()),
            "rating" => Some(self.rating.as_str()),
            "review_id" => Some(self.review_id.as_str()),
            _ => None,
        }
    }
}
