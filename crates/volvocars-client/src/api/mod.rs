//! API endpoint implementations.

mod energy;
mod location;
mod status;
mod vehicles;

pub use energy::EnergyApi;
pub use location::LocationApi;
pub use status::StatusApi;
pub use vehicles::ConnectedVehicleApi;
