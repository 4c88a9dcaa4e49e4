//! OAuth scope identifiers recognized by the Volvo Cars API.
//!
//! The client does not validate requested scopes against these lists;
//! they exist so callers can build sensible scope sets.

use std::fmt;

/// Privacy and security related scopes, granted separately from the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictedScope {
    /// Lock the vehicle.
    Lock,
    /// Unlock the vehicle.
    Unlock,
    /// Start and stop the engine remotely.
    EngineStartStop,
    /// Honk the horn and flash the lights.
    HonkFlash,
    /// Read the vehicle location.
    Location,
}

impl RestrictedScope {
    /// All restricted scopes.
    pub const ALL: [RestrictedScope; 5] = [
        RestrictedScope::Lock,
        RestrictedScope::Unlock,
        RestrictedScope::EngineStartStop,
        RestrictedScope::HonkFlash,
        RestrictedScope::Location,
    ];

    /// The scope identifier as sent to the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            RestrictedScope::Lock => "conve:lock",
            RestrictedScope::Unlock => "conve:unlock",
            RestrictedScope::EngineStartStop => "conve:engine_start_stop",
            RestrictedScope::HonkFlash => "conve:honk_flash",
            RestrictedScope::Location => "location:read",
        }
    }
}

impl fmt::Display for RestrictedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scopes available to every application.
pub const DEFAULT_SCOPES: &[&str] = &[
    "openid",
    "conve:battery_charge_level",
    "conve:brake_status",
    "conve:climatization_start_stop",
    "conve:command_accessibility",
    "conve:commands",
    "conve:diagnostics_engine_status",
    "conve:diagnostics_workshop",
    "conve:doors_status",
    "conve:engine_status",
    "conve:fuel_status",
    "conve:lock_status",
    "conve:odometer_status",
    "conve:trip_statistics",
    "conve:tyre_status",
    "conve:vehicle_relation",
    "conve:warnings",
    "conve:windows_status",
    "energy:capability:read",
    "energy:state:read",
];

/// Scopes kept for the legacy energy v1 endpoint.
pub const DEPRECATED_SCOPES: &[&str] = &[
    "energy:battery_charge_level",
    "energy:charging_connection_status",
    "energy:charging_current_limit",
    "energy:charging_system_status",
    "energy:electric_range",
    "energy:estimated_charging_time",
    "energy:recharge_status",
    "energy:target_battery_level",
];

/// Every scope: defaults plus restricted.
pub fn all_scopes() -> Vec<String> {
    DEFAULT_SCOPES
        .iter()
        .map(|s| (*s).to_string())
        .chain(RestrictedScope::ALL.iter().map(|s| s.as_str().to_string()))
        .collect()
}
