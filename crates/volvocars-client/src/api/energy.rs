//! Energy API: battery and charging state.

use std::collections::HashMap;

use serde_json::Value;

use volvocars_auth::Result;

use crate::client::{ENERGY_ENDPOINT, ENERGY_V2_ENDPOINT, VolvoCarsApi};
use crate::types::{VolvoCarsValueField, VolvoCarsValueStatusField};

/// Energy API client.
pub struct EnergyApi {
    client: VolvoCarsApi,
}

impl EnergyApi {
    pub(crate) fn new(client: VolvoCarsApi) -> Self {
        Self { client }
    }

    /// Get energy capabilities.
    ///
    /// Required scopes: `openid energy:capability:read`
    pub async fn capabilities(&self) -> Result<Value> {
        // The capabilities payload nests under `getEnergyState` rather
        // than the usual `data` key.
        self.client
            .get_data_dict(ENERGY_V2_ENDPOINT, "capabilities", "getEnergyState")
            .await
    }

    /// Get the current energy state.
    ///
    /// Required scopes: `openid energy:state:read`
    pub async fn state(&self) -> Result<HashMap<String, VolvoCarsValueStatusField>> {
        let body = self.client.get(ENERGY_V2_ENDPOINT, "state").await?;

        let Value::Object(map) = body else {
            return Ok(HashMap::new());
        };

        Ok(map
            .into_iter()
            .filter_map(|(key, value)| {
                serde_json::from_value(value).ok().map(|field| (key, field))
            })
            .collect())
    }

    /// Get recharge status from the legacy energy v1 endpoint.
    ///
    /// Required scopes: `openid` and at least one of the deprecated
    /// `energy:*` scopes (see [`crate::scopes::DEPRECATED_SCOPES`]).
    pub async fn recharge_status(&self) -> Result<HashMap<String, VolvoCarsValueField>> {
        self.client
            .get_field(ENERGY_ENDPOINT, "recharge-status")
            .await
    }
}
