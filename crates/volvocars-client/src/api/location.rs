//! Location API.

use volvocars_auth::Result;

use crate::client::{LOCATION_ENDPOINT, VolvoCarsApi};
use crate::types::VolvoCarsLocation;

/// Location API client.
pub struct LocationApi {
    client: VolvoCarsApi,
}

impl LocationApi {
    pub(crate) fn new(client: VolvoCarsApi) -> Self {
        Self { client }
    }

    /// Get the current vehicle location; `None` when the API has no data.
    ///
    /// Required scopes: `openid location:read`
    pub async fn current(&self) -> Result<Option<VolvoCarsLocation>> {
        let data = self
            .client
            .get_data_dict(LOCATION_ENDPOINT, "location", "data")
            .await?;
        Ok(serde_json::from_value(data).ok())
    }
}
