//! Deterministic external-conditions simulator.
//!
//! Stand-ins for the weather, quick-commerce vendor and traffic feeds a real
//! deployment would call. Every lookup is a pure function over constant
//! tables: the same input gives the same output on every call and across
//! restarts. Unrecognised names resolve to documented defaults rather than
//! errors.
//!
//! The only non-deterministic value anywhere in this crate is
//! [`SimulationSnapshot::timestamp`], which is for display and never feeds a
//! decision.

pub mod city;
pub mod snapshot;
pub mod traffic;
pub mod vendor;
pub mod weather;

pub use city::City;
pub use snapshot::{SimulationSnapshot, generate_snapshot, generate_snapshot_at};
pub use traffic::{TrafficSnapshot, delivery_lead_time, traffic};
pub use vendor::{Vendor, VendorSnapshot, VendorStatus, best_vendor, vendor_status};
pub use weather::{WeatherSnapshot, weather};
