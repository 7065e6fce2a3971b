use crate::quote::error::FetchError;
use crate::quote::response::TickerSnapshot;
use reqwest::header;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use tracing::error;
use tracing::instrument;
use tracing::warn;

pub const DEFAULT_API_BASE_URL: &str = "https://api.blockchain.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues one ticker request per call. Holds no state between requests apart
/// from the pooled HTTP client.
#[derive(Clone, Debug)]
pub struct TickerClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl TickerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn ticker_url(&self, symbol_pair: &str) -> Result<reqwest::Url, FetchError> {
        let url = format!("{}/v3/exchange/tickers/{}", self.base_url, symbol_pair);
        reqwest::Url::parse(&url).map_err(|_| FetchError::InvalidUrl(url))
    }

    /// Fetches the ticker for `symbol_pair`, folding every failure into `None`.
    /// The cause is only logged.
    #[instrument(skip(self))]
    pub async fn fetch(&self, symbol_pair: &str) -> Option<TickerSnapshot> {
        match self.try_fetch(symbol_pair).await {
            Ok(snapshot) => {
                debug!(
                    "Ticker for {}: price_24h = {}, last_trade_price = {}, volume_24h = {}",
                    symbol_pair, snapshot.price_24h, snapshot.last_trade_price, snapshot.volume_24h
                );
                Some(snapshot)
            }
            Err(err) => {
                match err {
                    FetchError::InvalidUrl(_) | FetchError::Decode(_) => {
                        error!("Cannot get ticker for {}: {}", symbol_pair, err)
                    }
                    FetchError::Network(_) | FetchError::BadStatus(_) => {
                        warn!("Cannot get ticker for {}: {}", symbol_pair, err)
                    }
                };
                None
            }
        }
    }

    /// Single attempt, no retry.
    pub async fn try_fetch(&self, symbol_pair: &str) -> Result<TickerSnapshot, FetchError> {
        let url = self.ticker_url(symbol_pair)?;

        debug!("Sending ticker request to {}", url);

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(status.into());
        }

        // example response
        // {"symbol":"BTC-USD","price_24h":59183.11,"volume_24h":377.83100325,"last_trade_price":57708.33}
        let body = response.text().await?;
        let snapshot: TickerSnapshot = serde_json::from_str(&body)?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BTC_BODY: &str = r#"{"symbol":"BTC-USD","price_24h":59183.11,"volume_24h":377.83100325,"last_trade_price":57708.33}"#;

    async fn serve(symbol_pair: &str, response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/v3/exchange/tickers/{}", symbol_pair)))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    fn client_for(server: &MockServer) -> TickerClient {
        TickerClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_ticker_url() {
        let client = TickerClient::new("https://api.blockchain.com/", DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(
            "https://api.blockchain.com/v3/exchange/tickers/ETH-USD",
            client.ticker_url("ETH-USD").unwrap().as_str()
        );
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = serve(
            "BTC-USD",
            ResponseTemplate::new(200).set_body_raw(BTC_BODY, "application/json"),
        )
        .await;

        let snapshot = client_for(&server).fetch("BTC-USD").await.unwrap();
        assert_eq!(BigDecimal::from_str("59183.11").unwrap(), snapshot.price_24h);
        assert_eq!(BigDecimal::from_str("377.83100325").unwrap(), snapshot.volume_24h);
        assert_eq!(BigDecimal::from_str("57708.33").unwrap(), snapshot.last_trade_price);
    }

    #[tokio::test]
    async fn test_fetch_sends_accept_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_matcher("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(BTC_BODY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client_for(&server).fetch("BTC-USD").await.is_some());
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_absent() {
        let server = serve("BTC-USD", ResponseTemplate::new(500)).await;
        let client = client_for(&server);

        match client.try_fetch("BTC-USD").await {
            Err(FetchError::BadStatus(status)) => assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status),
            other => panic!("expected bad status, got {:?}", other),
        }
        assert!(client.fetch("BTC-USD").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_requires_exactly_200() {
        let server = serve(
            "ETH-USD",
            ResponseTemplate::new(203).set_body_raw(BTC_BODY, "application/json"),
        )
        .await;

        assert!(client_for(&server).fetch("ETH-USD").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_missing_field_is_absent() {
        let server = serve(
            "BTC-USD",
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"price_24h":1.5,"volume_24h":2.5}"#, "application/json"),
        )
        .await;

        match client_for(&server).try_fetch("BTC-USD").await {
            Err(FetchError::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_out_of_range_number_is_absent() {
        let server = serve(
            "BTC-USD",
            ResponseTemplate::new(200).set_body_raw(
                r#"{"price_24h":1e400,"volume_24h":377.83100325,"last_trade_price":57708.33}"#,
                "application/json",
            ),
        )
        .await;
        let client = client_for(&server);

        match client.try_fetch("BTC-USD").await {
            Err(FetchError::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other),
        }
        assert!(client.fetch("BTC-USD").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_non_json_is_absent() {
        let server = serve(
            "BTC-USD",
            ResponseTemplate::new(200).set_body_raw("<html>maintenance</html>", "text/html"),
        )
        .await;

        assert!(client_for(&server).fetch("BTC-USD").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_absent() {
        let server = serve(
            "BTC-USD",
            ResponseTemplate::new(200)
                .set_body_raw(BTC_BODY, "application/json")
                .set_delay(Duration::from_millis(500)),
        )
        .await;
        let client = TickerClient::new(&server.uri(), Duration::from_millis(50)).unwrap();

        match client.try_fetch("BTC-USD").await {
            Err(FetchError::Network(err)) => assert!(err.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_is_absent() {
        let client = TickerClient::new("not a url", DEFAULT_REQUEST_TIMEOUT).unwrap();

        match client.try_fetch("BTC-USD").await {
            Err(FetchError::InvalidUrl(url)) => assert_eq!("not a url/v3/exchange/tickers/BTC-USD", url),
            other => panic!("expected invalid url, got {:?}", other),
        }
        assert!(client.fetch("BTC-USD").await.is_none());
    }
}
