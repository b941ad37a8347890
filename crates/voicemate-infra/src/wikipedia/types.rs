//! MediaWiki action API response shapes (`formatversion=2`).
//!
//! Only the fields the client reads are modeled; everything else in the
//! response is ignored.

use serde::Deserialize;

/// Top-level envelope shared by every `action=query` response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<Q> {
    pub query: Option<Q>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

/// `list=search` result.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub searchinfo: Option<SearchInfo>,
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchInfo {
    pub suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// `prop=...` result over a `titles=` request.
#[derive(Debug, Default, Deserialize)]
pub struct PagesQuery {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    pub extract: Option<String>,
    pub pageprops: Option<PageProps>,
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

impl Page {
    pub fn is_disambiguation(&self) -> bool {
        self.pageprops
            .as_ref()
            .is_some_and(|props| props.disambiguation.is_some())
    }

    /// Wikitext of the latest revision, when `prop=revisions` was requested.
    pub fn wikitext(&self) -> Option<&str> {
        self.revisions
            .first()
            .map(|revision| revision.slots.main.content.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct PageProps {
    pub disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Revision {
    pub slots: Slots,
}

#[derive(Debug, Deserialize)]
pub struct Slots {
    pub main: SlotContent,
}

#[derive(Debug, Deserialize)]
pub struct SlotContent {
    #[serde(default)]
    pub content: String,
}
