//! Connected Vehicle API: vehicle reads and command invocation.

use std::collections::HashMap;

use reqwest::Method;
use serde_json::Value;

use volvocars_auth::Result;

use crate::client::{CONNECTED_ENDPOINT, VolvoCarsApi};
use crate::types::{
    VolvoCarsAvailableCommand, VolvoCarsCommandResult, VolvoCarsValueField, VolvoCarsVehicle,
};

/// Connected Vehicle API client.
pub struct ConnectedVehicleApi {
    client: VolvoCarsApi,
}

impl ConnectedVehicleApi {
    pub(crate) fn new(client: VolvoCarsApi) -> Self {
        Self { client }
    }

    /// List the VINs associated with the account.
    ///
    /// Required scopes: `openid conve:vehicle_relation`
    pub async fn list(&self) -> Result<Vec<String>> {
        let url = self.client.endpoint_url(CONNECTED_ENDPOINT);
        let body = self
            .client
            .request(Method::GET, &url, "vehicles", None)
            .await?;

        let vins = data_list(&body)
            .iter()
            .filter_map(|item| item.get("vin").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        Ok(vins)
    }

    /// Get static vehicle details; `None` when the API has no data.
    ///
    /// Required scopes: `openid conve:vehicle_relation`
    pub async fn details(&self) -> Result<Option<VolvoCarsVehicle>> {
        let data = self
            .client
            .get_data_dict(CONNECTED_ENDPOINT, "", "data")
            .await?;
        Ok(serde_json::from_value(data).ok())
    }

    /// Get brakes status.
    ///
    /// Required scopes: `openid conve:brake_status`
    pub async fn brakes(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "brakes").await
    }

    /// Get command accessibility.
    ///
    /// Required scopes: `openid conve:command_accessibility`
    pub async fn command_accessibility(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client
            .get_field(CONNECTED_ENDPOINT, "command-accessibility")
            .await
    }

    /// Get diagnostics.
    ///
    /// Required scopes: `openid conve:diagnostics_workshop`
    pub async fn diagnostics(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client
            .get_field(CONNECTED_ENDPOINT, "diagnostics")
            .await
    }

    /// Get doors status.
    ///
    /// Required scopes: `openid conve:doors_status conve:lock_status`
    pub async fn doors(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "doors").await
    }

    /// Get engine status.
    ///
    /// Required scopes: `openid conve:engine_status`
    pub async fn engine_status(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client
            .get_field(CONNECTED_ENDPOINT, "engine-status")
            .await
    }

    /// Get engine warnings.
    ///
    /// Required scopes: `openid conve:diagnostics_engine_status`
    pub async fn engine_warnings(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "engine").await
    }

    /// Get fuel status.
    ///
    /// Required scopes: `openid conve:fuel_status conve:battery_charge_level`
    pub async fn fuel(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "fuel").await
    }

    /// Get odometer.
    ///
    /// Required scopes: `openid conve:odometer_status`
    pub async fn odometer(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "odometer").await
    }

    /// Get trip statistics.
    ///
    /// Required scopes: `openid conve:trip_statistics`
    pub async fn statistics(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client
            .get_field(CONNECTED_ENDPOINT, "statistics")
            .await
    }

    /// Get tyre states.
    ///
    /// Required scopes: `openid conve:tyre_status`
    pub async fn tyres(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "tyres").await
    }

    /// Get warnings.
    ///
    /// Required scopes: `openid conve:warnings`
    pub async fn warnings(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "warnings").await
    }

    /// Get window states.
    ///
    /// Required scopes: `openid conve:windows_status`
    pub async fn windows(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client.get_field(CONNECTED_ENDPOINT, "windows").await
    }

    /// List the commands available for the vehicle.
    ///
    /// Required scopes: `openid conve:commands`
    pub async fn commands(&self) -> Result<Vec<VolvoCarsAvailableCommand>> {
        let body = self.client.get(CONNECTED_ENDPOINT, "commands").await?;
        let commands = data_list(&body)
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect();
        Ok(commands)
    }

    /// Execute a command, e.g. `lock`, `unlock` or `engine-start`.
    ///
    /// Required scopes: `openid` plus the per-command scope
    /// (`conve:lock`, `conve:unlock`, `conve:engine_start_stop`,
    /// `conve:honk_flash`).
    pub async fn execute(
        &self,
        command: &str,
        body: Option<Value>,
    ) -> Result<Option<VolvoCarsCommandResult>> {
        let operation = format!("commands/{command}");
        let response = self
            .client
            .post(CONNECTED_ENDPOINT, &operation, body.as_ref())
            .await?;

        let data = response.get("data").cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(data).ok())
    }
}

fn data_list(body: &Value) -> Vec<Value> {
    body.get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
