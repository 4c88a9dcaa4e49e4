//! Response types for the Volvo Cars API.
//!
//! These mirror the wire shapes of the connected-vehicle, energy and
//! location endpoints; field names follow the camelCase JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bare value without metadata, used for synthetic entries such as
/// the API status probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolvoCarsValue {
    /// The raw value.
    pub value: Value,
}

impl VolvoCarsValue {
    /// Wrap a value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A sensor field: value plus optional unit and sample timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolvoCarsValueField {
    /// The raw value.
    pub value: Value,
    /// Unit of measurement, when the API provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// When the vehicle reported this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// An energy-state field carrying a per-field delivery status
/// (energy v2 `state` endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolvoCarsValueStatusField {
    /// The raw value; absent when the field errored.
    #[serde(default)]
    pub value: Value,
    /// Unit of measurement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Per-field delivery status, e.g. `OK` or `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Error code when `status` is not `OK`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error message when `status` is not `OK`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the vehicle reported this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Vehicle location as a GeoJSON feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolvoCarsLocation {
    /// GeoJSON object type, `Feature`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Point geometry with `[longitude, latitude, altitude]` coordinates.
    pub geometry: LocationGeometry,
    /// Heading and sample timestamp.
    #[serde(default)]
    pub properties: LocationProperties,
}

/// GeoJSON geometry of a location feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationGeometry {
    /// GeoJSON geometry type, `Point`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude, altitude]`.
    pub coordinates: Vec<f64>,
}

/// Non-geometry properties of a location feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationProperties {
    /// Compass heading in degrees, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// When the vehicle reported the position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Static details of a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolvoCarsVehicle {
    /// Vehicle identification number.
    pub vin: String,
    /// Model year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_year: Option<u16>,
    /// Gearbox type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gearbox: Option<String>,
    /// Fuel type, e.g. `ELECTRIC` or `PETROL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    /// Exterior colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_colour: Option<String>,
    /// Battery capacity in kWh, for electrified vehicles.
    #[serde(
        default,
        rename = "batteryCapacityKWH",
        skip_serializing_if = "Option::is_none"
    )]
    pub battery_capacity_kwh: Option<f64>,
    /// Vehicle imagery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<VehicleImages>,
    /// Human-readable descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<VehicleDescriptions>,
}

/// Rendered image URLs for a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleImages {
    /// Exterior render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_image_url: Option<String>,
    /// Interior render.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_image_url: Option<String>,
}

/// Descriptive strings for a vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDescriptions {
    /// Model name, e.g. `XC40`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Upholstery description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upholstery: Option<String>,
    /// Steering side, `LEFT` or `RIGHT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steering: Option<String>,
}

/// An invokable command advertised by the vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolvoCarsAvailableCommand {
    /// Command identifier, e.g. `LOCK`.
    pub command: String,
    /// Invocation URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Result of a command invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolvoCarsCommandResult {
    /// Vehicle the command was sent to.
    #[serde(default)]
    pub vin: String,
    /// Delivery status reported by the vehicle, e.g. `COMPLETED`,
    /// `DELIVERED` or `UNKNOWN`.
    pub invoke_status: String,
    /// Additional detail, usually empty.
    #[serde(default)]
    pub message: String,
}

/// Structured error payload carried by non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct VolvoCarsErrorResult {
    /// Short error message.
    #[serde(default)]
    pub message: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_field_parses_unit_and_timestamp() {
        let field: VolvoCarsValueField = serde_json::from_value(json!({
            "value": 30000,
            "unit": "km",
            "timestamp": "2024-12-30T14:18:56Z",
        }))
        .unwrap();

        assert_eq!(field.value, 30000);
        assert_eq!(field.unit.as_deref(), Some("km"));
        assert_eq!(
            field.timestamp.unwrap().to_rfc3339(),
            "2024-12-30T14:18:56+00:00"
        );
    }

    #[test]
    fn command_result_maps_invoke_status() {
        let result: VolvoCarsCommandResult = serde_json::from_value(json!({
            "vin": "YV1ABCDEFG1234567",
            "invokeStatus": "COMPLETED",
            "message": "",
        }))
        .unwrap();

        assert_eq!(result.invoke_status, "COMPLETED");
        assert!(result.message.is_empty());
    }

    #[test]
    fn location_parses_geojson_feature() {
        let location: VolvoCarsLocation = serde_json::from_value(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [12.0113, 57.7087, 0.0],
            },
            "properties": {
                "heading": "90",
                "timestamp": "2024-12-30T14:18:56Z",
            },
        }))
        .unwrap();

        assert_eq!(location.geometry.coordinates.len(), 3);
        assert_eq!(location.properties.heading.as_deref(), Some("90"));
    }

    #[test]
    fn vehicle_parses_battery_capacity_field() {
        let vehicle: VolvoCarsVehicle = serde_json::from_value(json!({
            "vin": "YV1ABCDEFG1234567",
            "modelYear": 2023,
            "fuelType": "ELECTRIC",
            "batteryCapacityKWH": 78.0,
            "descriptions": {"model": "XC40"},
        }))
        .unwrap();

        assert_eq!(vehicle.model_year, Some(2023));
        assert_eq!(vehicle.battery_capacity_kwh, Some(78.0));
        assert_eq!(
            vehicle.descriptions.unwrap().model.as_deref(),
            Some("XC40")
        );
    }
}
