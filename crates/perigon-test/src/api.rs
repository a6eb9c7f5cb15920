use perigon_api_base::{Configuration, ConfigurationParameters};

/// Helper for testing the Perigon API using wiremock.
///
/// The returned configuration points at the mock server and carries no access token.
///
/// Warning: when using `Mock::expect` ensure `server` is not dropped before the test completes,
pub async fn start_api_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, Configuration) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let config = Configuration::new(ConfigurationParameters {
        base_path: Some(server.uri()),
        ..Default::default()
    });

    (server, config)
}

/// Like [`start_api_mock`], for a server that nothing listens on.
///
/// Requests against the returned configuration fail in the transport, which is what
/// error recovery hooks react to.
pub fn unreachable_api() -> Configuration {
    Configuration::new(ConfigurationParameters {
        // Port 1 is reserved and nothing listens on it.
        base_path: Some("http://127.0.0.1:1".to_owned()),
        ..Default::default()
    })
}
