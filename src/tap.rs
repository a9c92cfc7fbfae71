//! Named TAP service locator and blocking ADQL query client.

use std::io::Cursor;
use std::time::Duration;

use log::debug;

use crate::error::{SourceError, SourceResult};
use crate::table::DetectionTable;

/// Locator name of the solar-system object TAP service.
pub const SSOTAP: &str = "ssotap";

/// Known TAP services, by locator name.
const SERVICES: &[(&str, &str)] = &[(SSOTAP, "https://data.lsst.cloud/api/ssotap")];

/// Handle to one TAP service endpoint.
///
/// Obtained from [`TapService::locate`] for a named service, or
/// [`TapService::with_base_url`] for an explicit endpoint. One blocking
/// HTTP round trip per [`TapService::search`]; no retries, no caching.
#[derive(Debug)]
pub struct TapService {
    base_url: String,
    user_agent: String,
    client: reqwest::blocking::Client,
}

impl TapService {
    /// Looks up a named service and initializes its HTTP client.
    ///
    /// The environment variable `{NAME}_URL` (e.g. `SSOTAP_URL`) overrides
    /// the registry endpoint for that name. An unknown name, or a client
    /// that fails to initialize, is a [`SourceError::Connection`].
    pub fn locate(name: &str) -> SourceResult<Self> {
        let env_key = format!("{}_URL", name.to_uppercase());
        let base_url = match std::env::var(&env_key) {
            Ok(url) => url,
            Err(_) => SERVICES
                .iter()
                .find(|(service, _)| *service == name)
                .map(|(_, url)| url.to_string())
                .ok_or_else(|| SourceError::Connection {
                    service: name.to_string(),
                })?,
        };
        Self::build(name, base_url)
    }

    /// Builds a handle for an explicit endpoint URL.
    pub fn with_base_url(url: impl Into<String>) -> SourceResult<Self> {
        let url = url.into();
        let service = url.clone();
        Self::build(&service, url)
    }

    fn build(service: &str, base_url: String) -> SourceResult<Self> {
        let user_agent = format!("solsys-catalog/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::blocking::Client::builder()
            .user_agent(&user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|_| SourceError::Connection {
                service: service.to_string(),
            })?;

        Ok(Self {
            base_url,
            user_agent,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Submits an ADQL query to the service's synchronous endpoint.
    ///
    /// Transport failures and HTTP error statuses propagate as
    /// [`SourceError::Remote`]; a malformed response body is a
    /// [`SourceError::Decode`].
    pub fn search(&self, query: &str) -> SourceResult<DetectionTable> {
        let url = format!("{}/sync", self.base_url.trim_end_matches('/'));
        debug!("TAP query to {}: {}", url, query);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("REQUEST", "doQuery"),
                ("LANG", "ADQL"),
                ("RESPONSEFORMAT", "csv"),
                ("QUERY", query),
            ])
            .send()?
            .error_for_status()?;

        let body = response.bytes()?;
        debug!("TAP response: {} bytes", body.len());
        DetectionTable::from_csv(Cursor::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SAMPLE_CSV: &str = "ssObjectId,heliocentricDist,phaseAngle\n\
                              84,2.5,11.25\n\
                              84,2.6,12.5\n";

    #[test]
    fn test_locate_known_service() {
        let service = TapService::locate(SSOTAP).unwrap();
        assert_eq!(service.base_url(), "https://data.lsst.cloud/api/ssotap");
        assert!(service.user_agent().starts_with("solsys-catalog/"));
    }

    #[test]
    fn test_locate_unknown_service() {
        let err = TapService::locate("nosuch").unwrap_err();
        match err {
            SourceError::Connection { ref service } => assert_eq!(service, "nosuch"),
            other => panic!("Expected Connection error, got {:?}", other),
        }
    }

    #[test]
    fn test_locate_env_override() {
        std::env::set_var("FAKETAP_URL", "http://localhost:9999/tap");
        let service = TapService::locate("faketap").unwrap();
        assert_eq!(service.base_url(), "http://localhost:9999/tap");
        std::env::remove_var("FAKETAP_URL");
    }

    #[test]
    fn test_user_agent_format() {
        let service = TapService::with_base_url("http://example.com/tap").unwrap();
        assert!(service.user_agent().starts_with("solsys-catalog/"));
        assert!(service.user_agent().chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_search_decodes_csv() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/sync")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("REQUEST".into(), "doQuery".into()),
                Matcher::UrlEncoded("LANG".into(), "ADQL".into()),
                Matcher::UrlEncoded("RESPONSEFORMAT".into(), "csv".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body(SAMPLE_CSV)
            .create();

        let service = TapService::with_base_url(server.url()).unwrap();
        let table = service.search("SELECT 1").unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.f64_column("heliocentricDist").unwrap(), vec![2.5, 2.6]);

        mock.assert();
    }

    #[test]
    fn test_search_trailing_slash() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/sync")
            .with_status(200)
            .with_body(SAMPLE_CSV)
            .create();

        let service = TapService::with_base_url(format!("{}/", server.url())).unwrap();
        let table = service.search("SELECT 1").unwrap();
        assert_eq!(table.num_rows(), 2);

        mock.assert();
    }

    #[test]
    fn test_search_http_error_is_remote() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/sync")
            .with_status(500)
            .with_body("query execution failed")
            .create();

        let service = TapService::with_base_url(server.url()).unwrap();
        let err = service.search("SELECT 1").unwrap_err();

        assert!(matches!(err, SourceError::Remote(_)));
        mock.assert();
    }

    #[test]
    fn test_search_garbage_body_is_decode_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/sync")
            .with_status(200)
            .with_body("a,b\n1,2,3,4\n")
            .create();

        let service = TapService::with_base_url(server.url()).unwrap();
        let result = service.search("SELECT 1");

        assert!(matches!(result, Err(SourceError::Decode(_))));
        mock.assert();
    }
}
