//! Record count label
//!
//! Fetches the number of records matching the current list filters from
//! `ajax/count/<query>` and reflects it into a label. The body is shown as the
//! server sent it, minus surrounding whitespace. Every failure (transport
//! error, non-2xx status, timeout) ends up as the same error text; nothing is
//! returned to the caller.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinHandle;
use url::Url;

use crate::constants::{COUNT_ENDPOINT, COUNT_TIMEOUT, ERROR_TEXT, LOADING_TEXT};
use crate::display::DisplayLabel;
use crate::{Error, Result};

/// Outcome of one count request: the count as the server wrote it
pub type CountResult = Result<String>;

/// Label text for a settled count request
pub fn label_text(result: &CountResult) -> String {
    match result {
        Ok(count) => format!("Refresh ( {} )", count),
        Err(_) => ERROR_TEXT.to_string(),
    }
}

/// Count text carried by a response body
fn count_text(body: &str) -> String {
    body.trim().to_string()
}

/// Count fetcher bound to the page its label lives on
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct CountFetcher {
    client: Client,
    page_url: Url,
    timeout: Duration,
}

impl CountFetcher {
    pub fn new(page_url: Url) -> Self {
        Self {
            client: Client::new(),
            page_url,
            timeout: COUNT_TIMEOUT,
        }
    }

    /// Parse the page URL and bind a fetcher to it
    pub fn parse(page_url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(page_url)?))
    }

    #[cfg(test)]
    fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Count endpoint for `query`, resolved against the page URL.
    /// The query string is appended verbatim, leading `?` included.
    pub fn endpoint(&self, query: &str) -> Result<Url> {
        Ok(self.page_url.join(&format!("{}{}", COUNT_ENDPOINT, query))?)
    }

    /// Issue the count request and return its outcome
    pub async fn fetch(&self, query: &str) -> CountResult {
        let url = self
            .endpoint(query)
            .map_err(|e| Error::CountFetch(e.to_string()))?;

        tracing::debug!("fetching count from {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::CountFetch(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::CountFetch(e.to_string()))?;

        Ok(count_text(&body))
    }

    /// Show the loading text, fetch the count and show the result
    pub async fn fetch_count<L>(&self, target: &L, query: &str)
    where
        L: DisplayLabel + ?Sized,
    {
        target.set_text(LOADING_TEXT);
        self.settle(target, query).await;
    }

    /// Like [`fetch_count`](Self::fetch_count), without waiting for the request.
    ///
    /// The loading text is written before this returns. No cancellation: if
    /// several fetches target the same label, the one settling last wins.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn_fetch_count<L>(&self, target: Arc<L>, query: impl Into<String>) -> JoinHandle<()>
    where
        L: DisplayLabel + ?Sized + 'static,
    {
        target.set_text(LOADING_TEXT);

        let fetcher = self.clone();
        let query = query.into();
        tokio::spawn(async move {
            fetcher.settle(&*target, &query).await;
        })
    }

    async fn settle<L>(&self, target: &L, query: &str)
    where
        L: DisplayLabel + ?Sized,
    {
        let result = self.fetch(query).await;
        match &result {
            Ok(count) => tracing::debug!("count for {:?} settled: {}", query, count),
            Err(e) => tracing::debug!("count for {:?} failed: {}", query, e),
        }
        target.set_text(&label_text(&result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Label;
    use httpmock::prelude::*;
    use std::sync::Mutex;

    /// Label that keeps every text it was given, in order
    #[derive(Default)]
    struct RecordingLabel {
        writes: Mutex<Vec<String>>,
    }

    impl RecordingLabel {
        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl DisplayLabel for RecordingLabel {
        fn set_text(&self, text: &str) {
            self.writes.lock().unwrap().push(text.to_string());
        }
    }

    async fn server_answering(status: u16, body: &str) -> MockServer {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin/client/ajax/count/");
                then.status(status).body(body);
            })
            .await;
        server
    }

    fn page_on(server: &MockServer) -> CountFetcher {
        CountFetcher::parse(&server.url("/admin/client/")).unwrap()
    }

    #[test]
    fn test_endpoint_appends_query_verbatim() {
        let fetcher = CountFetcher::parse("http://shop.local/admin/client/").unwrap();

        let url = fetcher.endpoint("?flt1_0=abc&page=2").unwrap();
        assert_eq!(
            url.as_str(),
            "http://shop.local/admin/client/ajax/count/?flt1_0=abc&page=2"
        );

        let url = fetcher.endpoint("").unwrap();
        assert_eq!(url.as_str(), "http://shop.local/admin/client/ajax/count/");
    }

    #[test]
    fn test_label_text() {
        assert_eq!(label_text(&Ok("42".to_string())), "Refresh ( 42 )");
        assert_eq!(
            label_text(&Err(Error::CountFetch("boom".to_string()))),
            "Refresh ( ERROR )"
        );
    }

    #[test]
    fn test_count_text_trims_whitespace_only() {
        assert_eq!(count_text(" 17\n"), "17");
        assert_eq!(count_text("0042"), "0042");
        assert_eq!(count_text("1e3"), "1e3");
        assert_eq!(count_text(""), "");
    }

    #[tokio::test]
    async fn test_fetch_count_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/admin/client/ajax/count/")
                    .query_param("page", "2");
                then.status(200).body("42");
            })
            .await;

        let label = Label::with_text("Refresh");
        page_on(&server).fetch_count(&label, "?page=2").await;

        mock.assert_async().await;
        assert_eq!(label.text(), "Refresh ( 42 )");
    }

    #[tokio::test]
    async fn test_server_error_shows_error_text() {
        let server = server_answering(500, "Internal Server Error").await;

        let label = Label::new();
        page_on(&server).fetch_count(&label, "").await;

        assert_eq!(label.text(), ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_body_is_shown_as_sent() {
        for (body, expected) in [
            ("0042", "Refresh ( 0042 )"),
            ("42.0", "Refresh ( 42.0 )"),
            ("-1", "Refresh ( -1 )"),
            ("1e3\n", "Refresh ( 1e3 )"),
        ] {
            let server = server_answering(200, body).await;

            let label = Label::new();
            page_on(&server).fetch_count(&label, "").await;

            assert_eq!(label.text(), expected, "body {:?}", body);
        }
    }

    #[tokio::test]
    async fn test_fetch_count_writes_loading_then_count() {
        let server = server_answering(200, "42").await;

        let label = RecordingLabel::default();
        page_on(&server).fetch_count(&label, "").await;

        assert_eq!(label.writes(), vec![LOADING_TEXT, "Refresh ( 42 )"]);
    }

    #[tokio::test]
    async fn test_spawn_fetch_count_writes_loading_then_count() {
        let server = server_answering(200, "42").await;

        let label = Arc::new(RecordingLabel::default());
        let handle = page_on(&server).spawn_fetch_count(label.clone(), "");
        assert_eq!(label.writes(), vec![LOADING_TEXT]);

        handle.await.unwrap();
        assert_eq!(label.writes(), vec![LOADING_TEXT, "Refresh ( 42 )"]);
    }

    #[tokio::test]
    async fn test_failure_writes_loading_then_error() {
        let server = server_answering(503, "unavailable").await;

        let label = RecordingLabel::default();
        page_on(&server).fetch_count(&label, "").await;
        assert_eq!(label.writes(), vec![LOADING_TEXT, ERROR_TEXT]);

        let label = Arc::new(RecordingLabel::default());
        page_on(&server)
            .spawn_fetch_count(label.clone(), "")
            .await
            .unwrap();
        assert_eq!(label.writes(), vec![LOADING_TEXT, ERROR_TEXT]);
    }

    #[tokio::test]
    async fn test_unreachable_shows_error_text() {
        let fetcher = CountFetcher::parse("http://127.0.0.1:1/admin/").unwrap();

        let label = Label::new();
        fetcher.fetch_count(&label, "?page=1").await;

        assert_eq!(label.text(), ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_timeout_shows_error_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin/client/ajax/count/");
                then.status(200).body("5").delay(Duration::from_secs(2));
            })
            .await;

        let fetcher = page_on(&server)
            .with_timeout(Duration::from_millis(200));

        let label = Label::new();
        fetcher.fetch_count(&label, "").await;

        assert_eq!(label.text(), ERROR_TEXT);
    }

    #[test]
    fn test_default_timeout_is_thirty_seconds() {
        let fetcher = CountFetcher::parse("http://shop.local/").unwrap();
        assert_eq!(fetcher.timeout, Duration::from_millis(30_000));
    }

    #[test]
    #[should_panic]
    fn test_spawn_outside_runtime_panics() {
        let fetcher = CountFetcher::parse("http://shop.local/admin/").unwrap();
        let _ = fetcher.spawn_fetch_count(Arc::new(Label::new()), "");
    }

    #[tokio::test]
    async fn test_loading_text_is_set_before_settling() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/admin/client/ajax/count/");
                then.status(200).body("7").delay(Duration::from_millis(300));
            })
            .await;

        let label = Arc::new(Label::with_text("Refresh"));
        let handle = page_on(&server)
            .spawn_fetch_count(label.clone(), "?page=1");

        assert_eq!(label.text(), LOADING_TEXT);

        handle.await.unwrap();
        assert_eq!(label.text(), "Refresh ( 7 )");
    }

    #[tokio::test]
    async fn test_last_settled_wins() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/admin/client/ajax/count/")
                    .query_param("page", "1");
                then.status(200).body("1").delay(Duration::from_millis(500));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/admin/client/ajax/count/")
                    .query_param("page", "2");
                then.status(200).body("2");
            })
            .await;

        let fetcher = page_on(&server);
        let label = Arc::new(Label::new());

        let slow = fetcher.spawn_fetch_count(label.clone(), "?page=1");
        let fast = fetcher.spawn_fetch_count(label.clone(), "?page=2");

        fast.await.unwrap();
        assert_eq!(label.text(), "Refresh ( 2 )");

        slow.await.unwrap();
        assert_eq!(label.text(), "Refresh ( 1 )");
    }
}
