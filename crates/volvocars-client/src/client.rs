//! Main client implementation: authenticated requests with response
//! classification and redacted logging.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode, header};
use serde_json::{Value, json};

use volvocars_auth::{AccessTokenManager, Error, Result, redact_data, redact_url};

use crate::api::{ConnectedVehicleApi, EnergyApi, LocationApi, StatusApi};
use crate::types::{VolvoCarsErrorResult, VolvoCarsValueField};

/// Production API host.
pub const API_URL: &str = "https://api.volvocars.com";

/// Public backend-status endpoint; unauthenticated, different host.
pub const API_STATUS_URL: &str =
    "https://public-developer-portal-bff.weu-prod.ecpaz.volvocars.biz/api/v1/backend-status";

pub(crate) const CONNECTED_ENDPOINT: &str = "/connected-vehicle/v2/vehicles";
pub(crate) const ENERGY_ENDPOINT: &str = "/energy/v1/vehicles";
pub(crate) const ENERGY_V2_ENDPOINT: &str = "/energy/v2/vehicles";
pub(crate) const LOCATION_ENDPOINT: &str = "/location/v1/vehicles";

/// Total timeout for a single request.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Vendor API-key header sent with every resource request.
const API_KEY_HEADER: &str = "vcc-api-key";

/// Response fields masked before logging.
const DATA_TO_REDACT: &[&str] = &["coordinates", "heading", "href", "vin"];

/// Volvo Cars API client.
///
/// Cheap to clone; all state is behind an [`Arc`]. Obtain tokens through
/// any [`AccessTokenManager`], usually `volvocars_auth::VolvoCarsAuth`.
#[derive(Clone)]
pub struct VolvoCarsApi {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) token_manager: Arc<dyn AccessTokenManager>,
    pub(crate) api_key: String,
    pub(crate) vin: String,
    pub(crate) base_url: String,
    pub(crate) status_url: String,
}

impl VolvoCarsApi {
    /// Create a new client builder.
    pub fn builder() -> VolvoCarsApiBuilder {
        VolvoCarsApiBuilder::new()
    }

    pub(crate) fn inner(&self) -> &ClientInner {
        &self.inner
    }

    /// The VIN this client is scoped to.
    pub fn vin(&self) -> &str {
        &self.inner.vin
    }

    /// A clone of this client scoped to another VIN.
    pub fn for_vin(&self, vin: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                token_manager: Arc::clone(&self.inner.token_manager),
                api_key: self.inner.api_key.clone(),
                vin: vin.into(),
                base_url: self.inner.base_url.clone(),
                status_url: self.inner.status_url.clone(),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the connected-vehicle API (reads and commands).
    pub fn vehicles(&self) -> ConnectedVehicleApi {
        ConnectedVehicleApi::new(self.clone())
    }

    /// Access the energy API.
    pub fn energy(&self) -> EnergyApi {
        EnergyApi::new(self.clone())
    }

    /// Access the location API.
    pub fn location(&self) -> LocationApi {
        LocationApi::new(self.clone())
    }

    /// Access the API status probe.
    pub fn status(&self) -> StatusApi {
        StatusApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL below an API area without a VIN segment.
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.inner.base_url, endpoint)
    }

    /// Build `{base}{endpoint}/{vin}[/{operation}]`.
    pub(crate) fn vin_url(&self, endpoint: &str, operation: &str) -> String {
        if operation.is_empty() {
            format!("{}{}/{}", self.inner.base_url, endpoint, self.inner.vin)
        } else {
            format!(
                "{}{}/{}/{}",
                self.inner.base_url, endpoint, self.inner.vin, operation
            )
        }
    }

    /// GET a VIN-scoped resource.
    pub(crate) async fn get(&self, endpoint: &str, operation: &str) -> Result<Value> {
        let url = self.vin_url(endpoint, operation);
        self.request(Method::GET, &url, operation, None).await
    }

    /// POST to a VIN-scoped resource.
    pub(crate) async fn post(
        &self,
        endpoint: &str,
        operation: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.vin_url(endpoint, operation);
        self.request(Method::POST, &url, operation, body).await
    }

    /// GET a resource and parse its `data` object into sensor fields.
    ///
    /// Entries that do not match the field shape are dropped.
    pub(crate) async fn get_field(
        &self,
        endpoint: &str,
        operation: &str,
    ) -> Result<HashMap<String, VolvoCarsValueField>> {
        let body = self.get(endpoint, operation).await?;
        Ok(parse_field_map(body.get("data")))
    }

    /// GET a resource and return the object under `data_key`.
    pub(crate) async fn get_data_dict(
        &self,
        endpoint: &str,
        operation: &str,
        data_key: &str,
    ) -> Result<Value> {
        let body = self.get(endpoint, operation).await?;
        Ok(body.get(data_key).cloned().unwrap_or_else(|| json!({})))
    }

    /// Perform one HTTP call and classify the outcome.
    ///
    /// Classification order:
    /// 1. 404 is "no data", not an error: some features simply do not
    ///    exist on a given vehicle.
    /// 2. 422 on a command URL becomes a synthetic `UNKNOWN` invoke
    ///    status, so command results stay uniformly typed.
    /// 3. 401/403 is an authentication failure.
    /// 4. Any other non-2xx is an API failure, preferring the structured
    ///    `error.message`/`error.description` body over the status line.
    /// 5. Transport failures surface as API failures naming only the
    ///    failure class.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        operation: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let access_token = self.inner.token_manager.get_access_token().await?;
        let vin = self.inner.vin.as_str();

        tracing::debug!(
            operation,
            %method,
            url = %redact_url(url, vin),
            "request"
        );

        let mut builder = self
            .inner
            .http
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
            .header(API_KEY_HEADER, &self.inner.api_key)
            .timeout(REQUEST_TIMEOUT);

        if let Some(body) = body {
            builder = builder.json(body);
        } else if method == Method::POST {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(&e, operation))?;

        let status = response.status();
        tracing::debug!(operation, status = status.as_u16(), "response status");

        if status == StatusCode::NOT_FOUND {
            tracing::debug!(operation, "no data for resource");
            return Ok(json!({}));
        }

        let data: Value = match response.json().await {
            Ok(data) => data,
            Err(e) if status.is_success() => return Err(Error::transport(&e, operation)),
            Err(_) => Value::Null,
        };

        tracing::debug!(
            operation,
            response = %redact_data(&data, DATA_TO_REDACT),
            "response body"
        );

        if status == StatusCode::UNPROCESSABLE_ENTITY && url.contains("/commands") {
            // The vehicle rejected the command outright; keep the result
            // shape instead of erroring.
            return Ok(json!({
                "data": {
                    "vin": vin,
                    "invokeStatus": "UNKNOWN",
                    "message": "",
                }
            }));
        }

        if status.is_success() {
            return Ok(data);
        }

        let message = error_message(&data, status);
        tracing::debug!(operation, %message, "request failed");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::auth(message, operation));
        }

        Err(Error::api(message, operation))
    }
}

/// Parse a `data` object into a map of sensor fields.
pub(crate) fn parse_field_map(data: Option<&Value>) -> HashMap<String, VolvoCarsValueField> {
    let Some(Value::Object(map)) = data else {
        return HashMap::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            serde_json::from_value(value.clone())
                .ok()
                .map(|field| (key.clone(), field))
        })
        .collect()
}

/// Build the surfaced error text for a failed response.
///
/// Never includes the URL, so no VIN can leak into error messages.
fn error_message(data: &Value, status: StatusCode) -> String {
    if let Some(error) = data.get("error") {
        if let Ok(error) = serde_json::from_value::<VolvoCarsErrorResult>(error.clone()) {
            let combined = format!("{} {}", error.message, error.description);
            let combined = combined.trim();
            if !combined.is_empty() {
                return combined.to_string();
            }
        }
    }

    format!("HTTP {status}")
}

/// Builder for a [`VolvoCarsApi`].
pub struct VolvoCarsApiBuilder {
    http: Option<reqwest::Client>,
    token_manager: Option<Arc<dyn AccessTokenManager>>,
    api_key: Option<String>,
    vin: String,
    base_url: String,
    status_url: String,
}

impl VolvoCarsApiBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            http: None,
            token_manager: None,
            api_key: None,
            vin: String::new(),
            base_url: API_URL.to_string(),
            status_url: API_STATUS_URL.to_string(),
        }
    }

    /// Use a shared HTTP client instead of a fresh one.
    pub fn http(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Set the token source (required).
    pub fn token_manager(mut self, token_manager: Arc<dyn AccessTokenManager>) -> Self {
        self.token_manager = Some(token_manager);
        self
    }

    /// Set the vendor API key (required).
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the default VIN the client is scoped to.
    pub fn vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    /// Override the API host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the backend-status URL.
    pub fn status_url(mut self, status_url: impl Into<String>) -> Self {
        self.status_url = status_url.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<VolvoCarsApi> {
        let token_manager = self
            .token_manager
            .ok_or_else(|| Error::InvalidParameter("token_manager is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| Error::InvalidParameter("api_key is required".to_string()))?;

        Ok(VolvoCarsApi {
            inner: Arc::new(ClientInner {
                http: self.http.unwrap_or_default(),
                token_manager,
                api_key,
                vin: self.vin,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                status_url: self.status_url,
            }),
        })
    }
}

impl Default for VolvoCarsApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const VIN: &str = "YV1ABCDEFG1234567";

    struct StaticTokenManager(&'static str);

    #[async_trait]
    impl AccessTokenManager for StaticTokenManager {
        async fn get_access_token(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTokenManager;

    #[async_trait]
    impl AccessTokenManager for FailingTokenManager {
        async fn get_access_token(&self) -> Result<String> {
            Err(Error::auth("invalid_grant", "token refresh"))
        }
    }

    fn api_against(server: &MockServer) -> VolvoCarsApi {
        VolvoCarsApi::builder()
            .token_manager(Arc::new(StaticTokenManager("valid_token_123")))
            .api_key("secretapikey")
            .vin(VIN)
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[test]
    fn builder_requires_token_manager_and_api_key() {
        assert!(VolvoCarsApi::builder().build().is_err());
        assert!(
            VolvoCarsApi::builder()
                .token_manager(Arc::new(StaticTokenManager("t")))
                .build()
                .is_err()
        );
    }

    #[test]
    fn vin_url_building() {
        let api = VolvoCarsApi::builder()
            .token_manager(Arc::new(StaticTokenManager("t")))
            .api_key("k")
            .vin(VIN)
            .build()
            .unwrap();

        assert_eq!(
            api.vin_url(CONNECTED_ENDPOINT, "odometer"),
            format!("https://api.volvocars.com/connected-vehicle/v2/vehicles/{VIN}/odometer")
        );
        assert_eq!(
            api.vin_url(CONNECTED_ENDPOINT, ""),
            format!("https://api.volvocars.com/connected-vehicle/v2/vehicles/{VIN}")
        );
    }

    #[test]
    fn for_vin_rescopes_the_client() {
        let api = VolvoCarsApi::builder()
            .token_manager(Arc::new(StaticTokenManager("t")))
            .api_key("k")
            .vin(VIN)
            .build()
            .unwrap();

        let other = api.for_vin("YV1OTHER0000000001");
        assert_eq!(other.vin(), "YV1OTHER0000000001");
        assert_eq!(api.vin(), VIN);
    }

    #[tokio::test]
    async fn sends_bearer_and_api_key_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!(
                "/connected-vehicle/v2/vehicles/{VIN}/odometer"
            )))
            .and(header("authorization", "Bearer valid_token_123"))
            .and(header("vcc-api-key", "secretapikey"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "odometer": {
                        "value": 30000,
                        "unit": "km",
                        "timestamp": "2024-12-30T14:18:56Z",
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_against(&server);
        let result = api.vehicles().odometer().await.unwrap();

        let odometer = &result["odometer"];
        assert_eq!(odometer.value, 30000);
        assert_eq!(odometer.unit.as_deref(), Some("km"));
        assert_eq!(
            odometer.timestamp.unwrap().to_rfc3339(),
            "2024-12-30T14:18:56+00:00"
        );
    }

    #[tokio::test]
    async fn not_found_yields_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let api = api_against(&server);
        let result = api.vehicles().odometer().await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn unprocessable_command_yields_unknown_invoke_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!(
                "/connected-vehicle/v2/vehicles/{VIN}/commands/lock"
            )))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "error": {"message": "rejected", "description": ""}
            })))
            .mount(&server)
            .await;

        let api = api_against(&server);
        let result = api.vehicles().execute("lock", None).await.unwrap().unwrap();

        assert_eq!(result.invoke_status, "UNKNOWN");
        assert!(result.message.is_empty());
    }

    #[tokio::test]
    async fn unprocessable_non_command_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let api = api_against(&server);
        let err = api.vehicles().odometer().await.unwrap_err();
        assert!(err.is_api_error());
    }

    #[tokio::test]
    async fn unauthorized_is_an_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let api = api_against(&server);
        let err = api.vehicles().odometer().await.unwrap_err();
        assert!(err.is_auth_error());
    }

    #[tokio::test]
    async fn server_error_uses_structured_error_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {
                    "message": "Something failed.",
                    "description": "Try again later.",
                }
            })))
            .mount(&server)
            .await;

        let api = api_against(&server);
        let err = api.vehicles().odometer().await.unwrap_err();

        assert!(err.is_api_error());
        let text = err.to_string();
        assert!(text.contains("Something failed. Try again later."));
        assert!(!text.contains(VIN));
    }

    #[tokio::test]
    async fn server_error_without_body_uses_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let api = api_against(&server);
        let err = api.vehicles().odometer().await.unwrap_err();

        let text = err.to_string();
        assert!(text.contains("HTTP 500"));
        assert!(!text.contains(VIN));
    }

    #[tokio::test]
    async fn connection_failure_names_only_the_failure_class() {
        let api = VolvoCarsApi::builder()
            .token_manager(Arc::new(StaticTokenManager("t")))
            .api_key("k")
            .vin(VIN)
            // Reserved port; nothing listens there.
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();

        let err = api.vehicles().odometer().await.unwrap_err();

        assert!(err.is_api_error());
        let text = err.to_string();
        assert!(!text.contains(VIN));
        assert!(!text.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn token_manager_failure_propagates_unchanged() {
        let server = MockServer::start().await;

        let api = VolvoCarsApi::builder()
            .token_manager(Arc::new(FailingTokenManager))
            .api_key("k")
            .vin(VIN)
            .base_url(server.uri())
            .build()
            .unwrap();

        let err = api.vehicles().odometer().await.unwrap_err();
        assert!(err.is_auth_error());
        // The resource endpoint was never reached.
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn error_message_prefers_structured_body() {
        let data = json!({"error": {"message": "A", "description": "B"}});
        assert_eq!(
            error_message(&data, StatusCode::INTERNAL_SERVER_ERROR),
            "A B"
        );

        let data = json!({"error": {"message": "A", "description": ""}});
        assert_eq!(error_message(&data, StatusCode::INTERNAL_SERVER_ERROR), "A");

        assert_eq!(
            error_message(&Value::Null, StatusCode::INTERNAL_SERVER_ERROR),
            "HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn parse_field_map_drops_malformed_entries() {
        let data = json!({
            "odometer": {"value": 30000, "unit": "km"},
            "bogus": "not-a-field",
        });
        let fields = parse_field_map(Some(&data));

        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("odometer"));
    }
}
