//! Wikipedia-backed [`SummaryProvider`].
//!
//! Talks to the MediaWiki action API in up to three requests:
//!
//! 1. `list=search` resolves the spoken topic to a page title. The search
//!    suggestion wins over the first hit, which matches how people misspell
//!    topics out loud.
//! 2. `prop=extracts|pageprops` fetches the plain-text intro and tells us
//!    whether the page is a disambiguation page.
//! 3. For disambiguation pages only, `prop=revisions` fetches the page
//!    wikitext. The first link of each list item is a candidate article, in
//!    page order.

pub mod types;
pub mod wikitext;

use serde::de::DeserializeOwned;
use tracing::debug;

use voicemate_core::lookup::SummaryProvider;
use voicemate_types::error::LookupError;

use self::types::{ApiResponse, Page, PagesQuery, SearchQuery};

const USER_AGENT: &str = concat!("voicemate/", env!("CARGO_PKG_VERSION"));

/// Client for one Wikipedia language edition.
pub struct WikipediaClient {
    api_url: String,
    http: reqwest::Client,
}

impl WikipediaClient {
    /// `api_url` is the full `.../w/api.php` endpoint.
    ///
    /// Fails only when the HTTP client itself cannot be built (TLS backend).
    pub fn new(api_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(network_error)?;

        Ok(Self {
            api_url: api_url.into(),
            http,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run one `action=query` request and decode its `query` object.
    async fn query<Q: DeserializeOwned + Default>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<Q, LookupError> {
        let response: ApiResponse<Q> = self
            .http
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params)
            .send()
            .await
            .map_err(network_error)?
            .error_for_status()
            .map_err(network_error)?
            .json()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    LookupError::Malformed(e.to_string())
                } else {
                    network_error(e)
                }
            })?;

        if let Some(err) = response.error {
            return Err(LookupError::Malformed(format!("{}: {}", err.code, err.info)));
        }
        Ok(response.query.unwrap_or_default())
    }

    /// Resolve a free-form topic to the best matching page title.
    async fn resolve_title(&self, topic: &str) -> Result<String, LookupError> {
        let result: SearchQuery = self
            .query(&[
                ("list", "search"),
                ("srsearch", topic),
                ("srlimit", "1"),
                ("srinfo", "suggestion"),
                ("srprop", ""),
            ])
            .await?;

        let suggestion = result
            .searchinfo
            .and_then(|info| info.suggestion)
            .filter(|s| !s.trim().is_empty());

        suggestion
            .or_else(|| result.search.into_iter().next().map(|hit| hit.title))
            .ok_or(LookupError::NotFound)
    }

    async fn fetch_page(&self, title: &str, sentences: u32) -> Result<Page, LookupError> {
        let sentences = sentences.max(1).to_string();
        let result: PagesQuery = self
            .query(&[
                ("prop", "extracts|pageprops"),
                ("ppprop", "disambiguation"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exsentences", &sentences),
                ("redirects", "1"),
                ("titles", title),
            ])
            .await?;

        result
            .pages
            .into_iter()
            .next()
            .filter(|page| !page.missing && !page.invalid)
            .ok_or(LookupError::NotFound)
    }

    /// Candidate articles of a disambiguation page, in page order.
    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>, LookupError> {
        let result: PagesQuery = self
            .query(&[
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("rvslots", "main"),
                ("titles", title),
            ])
            .await?;

        Ok(result
            .pages
            .first()
            .and_then(|page| page.wikitext())
            .map(wikitext::list_item_links)
            .unwrap_or_default())
    }
}

fn network_error(e: reqwest::Error) -> LookupError {
    LookupError::Network(e.to_string())
}

impl SummaryProvider for WikipediaClient {
    async fn summarize(&self, topic: &str, sentences: u32) -> Result<String, LookupError> {
        let title = self.resolve_title(topic).await?;
        debug!(%topic, %title, "Resolved lookup topic");

        let page = self.fetch_page(&title, sentences).await?;
        if page.is_disambiguation() {
            let options = self.disambiguation_options(&page.title).await?;
            return Err(LookupError::Ambiguous { options });
        }

        page.extract
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(LookupError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const API_PATH: &str = "/w/api.php";

    fn client_for(server: &mockito::ServerGuard) -> WikipediaClient {
        WikipediaClient::new(format!("{}{API_PATH}", server.url())).unwrap()
    }

    async fn mock_search(
        server: &mut mockito::ServerGuard,
        topic: &str,
        body: &str,
    ) -> mockito::Mock {
        server
            .mock("GET", API_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("list".into(), "search".into()),
                Matcher::UrlEncoded("srsearch".into(), topic.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    async fn mock_page(
        server: &mut mockito::ServerGuard,
        title: &str,
        body: &str,
    ) -> mockito::Mock {
        server
            .mock("GET", API_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("prop".into(), "extracts|pageprops".into()),
                Matcher::UrlEncoded("titles".into(), title.into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_summary_for_first_hit() {
        let mut server = mockito::Server::new_async().await;
        mock_search(
            &mut server,
            "rust programming",
            r#"{"query":{"search":[{"ns":0,"title":"Rust (programming language)"}]}}"#,
        )
        .await;
        let page = mock_page(
            &mut server,
            "Rust (programming language)",
            r#"{"query":{"pages":[{"pageid":1,"ns":0,"title":"Rust (programming language)","extract":"Rust is a general-purpose programming language. It emphasizes performance.\n"}]}}"#,
        )
        .await;

        let client = client_for(&server);
        let summary = client.summarize("rust programming", 2).await.unwrap();

        page.assert_async().await;
        assert_eq!(
            summary,
            "Rust is a general-purpose programming language. It emphasizes performance."
        );
    }

    #[tokio::test]
    async fn test_requests_identify_the_client() {
        let mut server = mockito::Server::new_async().await;
        let search = server
            .mock("GET", API_PATH)
            .match_header("user-agent", USER_AGENT)
            .match_query(Matcher::UrlEncoded("list".into(), "search".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"query":{"search":[]}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.summarize("anything", 2).await.unwrap_err();

        search.assert_async().await;
        assert!(matches!(err, LookupError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn test_suggestion_preferred_over_first_hit() {
        let mut server = mockito::Server::new_async().await;
        mock_search(
            &mut server,
            "albert einstien",
            r#"{"query":{"searchinfo":{"suggestion":"albert einstein"},"search":[{"ns":0,"title":"Einstein family"}]}}"#,
        )
        .await;
        mock_page(
            &mut server,
            "albert einstein",
            r#"{"query":{"pages":[{"pageid":736,"ns":0,"title":"Albert Einstein","extract":"Albert Einstein was a theoretical physicist."}]}}"#,
        )
        .await;

        let client = client_for(&server);
        let summary = client.summarize("albert einstien", 2).await.unwrap();
        assert_eq!(summary, "Albert Einstein was a theoretical physicist.");
    }

    #[tokio::test]
    async fn test_no_search_results_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        mock_search(&mut server, "qwzxv", r#"{"query":{"search":[]}}"#).await;

        let client = client_for(&server);
        let err = client.summarize("qwzxv", 2).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        mock_search(
            &mut server,
            "ghost",
            r#"{"query":{"search":[{"ns":0,"title":"Ghost page"}]}}"#,
        )
        .await;
        mock_page(
            &mut server,
            "Ghost page",
            r#"{"query":{"pages":[{"ns":0,"title":"Ghost page","missing":true}]}}"#,
        )
        .await;

        let client = client_for(&server);
        let err = client.summarize("ghost", 2).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound), "got {err:?}");
    }

    #[tokio::test]
    async fn test_disambiguation_options_follow_page_order() {
        let mut server = mockito::Server::new_async().await;
        mock_search(
            &mut server,
            "mercury",
            r#"{"query":{"search":[{"ns":0,"title":"Mercury"}]}}"#,
        )
        .await;
        mock_page(
            &mut server,
            "Mercury",
            r#"{"query":{"pages":[{"pageid":9,"ns":0,"title":"Mercury","extract":"Mercury may refer to:","pageprops":{"disambiguation":""}}]}}"#,
        )
        .await;
        let wikitext = "'''Mercury''' may refer to:\n\
            == Astronomy ==\n\
            * [[Mercury (planet)]], the closest planet to the [[Sun]]\n\
            == Science ==\n\
            * [[Mercury (element)]]\n\
            == Other uses ==\n\
            * [[Mercury (mythology)|Mercury]], a Roman god\n\
            == See also ==\n\
            * [[Mercury Records]]";
        let body = serde_json::json!({"query": {"pages": [{
            "pageid": 9,
            "ns": 0,
            "title": "Mercury",
            "revisions": [{"slots": {"main": {"contentmodel": "wikitext", "content": wikitext}}}]
        }]}});
        server
            .mock("GET", API_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("prop".into(), "revisions".into()),
                Matcher::UrlEncoded("rvslots".into(), "main".into()),
                Matcher::UrlEncoded("titles".into(), "Mercury".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        match client.summarize("mercury", 2).await {
            // Page order, not the alphabetical order of the page's links.
            Err(LookupError::Ambiguous { options }) => assert_eq!(
                options,
                vec![
                    "Mercury (planet)".to_string(),
                    "Mercury (element)".to_string(),
                    "Mercury (mythology)".to_string(),
                    "Mercury Records".to_string(),
                ]
            ),
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", API_PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.summarize("anything", 2).await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_garbage_body_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", API_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.summarize("anything", 2).await.unwrap_err();
        assert!(matches!(err, LookupError::Malformed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = WikipediaClient::new("http://127.0.0.1:1/w/api.php").unwrap();
        let err = client.summarize("anything", 2).await.unwrap_err();
        assert!(matches!(err, LookupError::Network(_)), "got {err:?}");
    }
}
