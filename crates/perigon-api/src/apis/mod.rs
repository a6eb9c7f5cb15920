// Reexport base types from perigon-api-base so endpoint users need a single dependency
pub use perigon_api_base::*;

pub mod v1_api;

use std::sync::Arc;

#[allow(clippy::large_enum_variant, private_interfaces)]
pub enum ApiClient {
    Real(ApiClientReal),
    #[cfg(any(test, feature = "mockall"))]
    Mock(ApiClientMock),
}

struct ApiClientReal {
    v1_api: v1_api::V1ApiClient,
}

#[cfg(any(test, feature = "mockall"))]
pub struct ApiClientMock {
    pub v1_api: v1_api::MockV1Api,
}

impl ApiClient {
    pub fn new(configuration: &Arc<perigon_api_base::Configuration>) -> Self {
        Self::Real(ApiClientReal {
            v1_api: v1_api::V1ApiClient::new(configuration.clone()),
        })
    }

    #[cfg(any(test, feature = "mockall"))]
    pub fn new_mocked(func: impl FnOnce(&mut ApiClientMock)) -> Self {
        let mut mock = ApiClientMock {
            v1_api: v1_api::MockV1Api::new(),
        };
        func(&mut mock);
        Self::Mock(mock)
    }
}

impl ApiClient {
    pub fn v1_api(&self) -> &dyn v1_api::V1Api {
        match self {
            ApiClient::Real(real) => &real.v1_api,
            #[cfg(any(test, feature = "mockall"))]
            ApiClient::Mock(mock) => &mock.v1_api,
        }
    }
}
