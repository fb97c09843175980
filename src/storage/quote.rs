//! Quote record

use serde::{Deserialize, Serialize};

/// A stored quote
///
/// `id` is assigned once by the service layer and never changes. The phrase
/// travels as `quote` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub author: String,
    #[serde(rename = "quote")]
    pub phrase: String,
}

impl Quote {
    pub fn new(id: impl Into<String>, author: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            phrase: phrase.into(),
        }
    }
}

/// Quote payload before an id has been assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub author: String,
    #[serde(rename = "quote")]
    pub phrase: String,
}

impl NewQuote {
    pub fn new(author: impl Into<String>, phrase: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            phrase: phrase.into(),
        }
    }

    /// Attach an id, producing the stored record
    pub fn with_id(self, id: String) -> Quote {
        Quote {
            id,
            author: self.author,
            phrase: self.phrase,
        }
    }
}
