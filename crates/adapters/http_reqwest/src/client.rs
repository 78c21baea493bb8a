//! reqwest-backed implementation of the backend ports.

use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use homedash_app::ports::{DeviceControl, RuleApi, StateSource};
use homedash_domain::control::{Device, DeviceCommand, Setting};
use homedash_domain::error::HomeDashError;
use homedash_domain::id::RuleId;
use homedash_domain::rule::Rule;
use homedash_domain::rule::wire::parse_rule;
use homedash_domain::snapshot::{StateSnapshot, StateUpdate};

use crate::config::HttpConfig;
use crate::error::HttpError;

/// JSON error body returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Answer to `POST /api/rules`.
#[derive(Deserialize)]
struct Created {
    id: RuleId,
}

/// Answer to `POST /api/control/...`; failures arrive as 2xx with
/// `success: false`.
#[derive(Deserialize)]
struct ControlAck {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, HttpError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", status.as_u16()),
    };
    Err(HttpError::Status { status, message })
}

/// Client for the backend's `/api` endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidUrl`] if the base URL cannot carry a
    /// path, or [`HttpError::Build`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &HttpConfig) -> Result<Self, HttpError> {
        let base_url = Url::parse(&config.base_url).map_err(HttpError::InvalidUrl)?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(HttpError::Build)?;
        Ok(Self { client, base_url })
    }

    /// `{base}/api/{segments...}`, each segment percent-encoded.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    fn rule_url(&self, id: &RuleId, suffix: Option<&str>) -> Url {
        self.url(["rules", id.as_str()].into_iter().chain(suffix))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, HttpError> {
        let resp = request.send().await.map_err(HttpError::Request)?;
        tracing::debug!(status = %resp.status(), url = %resp.url(), "backend answered");
        check_response(resp).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, HttpError> {
        let body = self
            .send(request)
            .await?
            .bytes()
            .await
            .map_err(HttpError::Request)?;
        serde_json::from_slice(&body).map_err(HttpError::Body)
    }

    /// Send a request whose success body is only `{"success": true}`.
    async fn send_ack(&self, request: RequestBuilder) -> Result<(), HttpError> {
        self.send(request).await.map(drop)
    }

    /// Send a control request and check its `success` flag.
    async fn send_control(&self, request: RequestBuilder) -> Result<(), HttpError> {
        let ack: ControlAck = self.send_json(request).await?;
        if ack.success {
            return Ok(());
        }
        Err(HttpError::Rejected {
            message: ack.error.unwrap_or_else(|| "no reason given".to_string()),
        })
    }
}

/// Endpoint segments and JSON body for a control command.
fn control_request(command: &DeviceCommand) -> (Vec<&str>, Value) {
    let mut segments = vec!["control"];
    let mut body = json!({});
    match &command.device {
        Device::Fans => segments.push("fan"),
        Device::Light(room) => {
            segments.push("light");
            body["room"] = json!(room.as_str());
        }
        Device::Door => segments.push("door"),
        Device::Garage => segments.push("garage"),
    }
    match command.setting {
        Setting::Manual(state) => body["state"] = json!(state),
        Setting::Auto => segments.push("auto"),
    }
    (segments, body)
}

impl RuleApi for HttpBackend {
    async fn list_rules(&self) -> Result<Vec<Rule>, HomeDashError> {
        let values: Vec<Value> = self.send_json(self.client.get(self.url(["rules"]))).await?;
        let rules = values
            .into_iter()
            .map(|value| parse_rule(value).map_err(HttpError::InvalidRule))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = rules.len(), "rules listed");
        Ok(rules)
    }

    async fn get_rule(&self, id: &RuleId) -> Result<Option<Rule>, HomeDashError> {
        let request = self.client.get(self.rule_url(id, None));
        match self.send_json::<Value>(request).await {
            Ok(value) => Ok(Some(parse_rule(value).map_err(HttpError::InvalidRule)?)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn create_rule(&self, rule: Rule) -> Result<RuleId, HomeDashError> {
        let request = self.client.post(self.url(["rules"])).json(&rule);
        let created: Created = self.send_json(request).await?;
        Ok(created.id)
    }

    async fn update_rule(&self, id: &RuleId, rule: Rule) -> Result<(), HomeDashError> {
        let request = self.client.put(self.rule_url(id, None)).json(&rule);
        self.send_ack(request)
            .await
            .map_err(|err| err.rule_not_found(id).into())
    }

    async fn delete_rule(&self, id: &RuleId) -> Result<(), HomeDashError> {
        let request = self.client.delete(self.rule_url(id, None));
        self.send_ack(request)
            .await
            .map_err(|err| err.rule_not_found(id).into())
    }

    async fn toggle_rule(&self, id: &RuleId, active: Option<bool>) -> Result<(), HomeDashError> {
        let body = match active {
            Some(active) => json!({ "active": active }),
            None => json!({}),
        };
        let request = self.client.post(self.rule_url(id, Some("toggle"))).json(&body);
        self.send_ack(request)
            .await
            .map_err(|err| err.rule_not_found(id).into())
    }

    async fn reset_rules(&self) -> Result<(), HomeDashError> {
        let request = self.client.post(self.url(["rules", "reset"]));
        Ok(self.send_ack(request).await?)
    }
}

impl StateSource for HttpBackend {
    async fn fetch_state(&self) -> Result<StateUpdate, HomeDashError> {
        let snapshot: StateSnapshot = self.send_json(self.client.get(self.url(["state"]))).await?;
        Ok(StateUpdate::fetched(snapshot))
    }
}

impl DeviceControl for HttpBackend {
    async fn send_command(&self, command: &DeviceCommand) -> Result<(), HomeDashError> {
        let (segments, body) = control_request(command);
        let request = self.client.post(self.url(segments)).json(&body);
        self.send_control(request).await?;
        tracing::debug!(%command, "control command accepted");
        Ok(())
    }
}
