#![deny(missing_docs)]

//! # DATEX II Energy Infrastructure
//!
//! The *EnergyInfrastructure* and *Facilities* subsets of the DATEX II v3
//! data model: static descriptions of charging sites, stations and refill
//! points, their rates, and the dynamic status feed publishing
//! availability and price updates.
//!
//! Static data flows out: build a table publication with the fluent
//! constructors and serialize it. Dynamic data flows both ways:
//! [`EnergyInfrastructureStatusPublication::from_document`] is the parse
//! entry point for a status feed.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`vocabulary`] | Energy and facility enumerations (`ConnectorType`, ...) |
//! | [`facility`] | `Facility` base fields, operators, parking spaces |
//! | [`infrastructure`] | Static model: sites, stations, refill points, tables |
//! | [`rates`] | `EnergyRate`, `EnergyPrice` and the dynamic rate update |
//! | [`reference`] | Versioned references with `targetClass` validation |
//! | [`status`] | Dynamic model: site, station and refill-point status |
//! | [`publication`] | The two publication roots |

pub mod facility;
pub mod infrastructure;
pub mod publication;
pub mod rates;
pub mod reference;
pub mod status;
pub mod vocabulary;

// Re-export all public types at crate root for convenience.
// Downstream code can use `datex2_energy::EnergyInfrastructureSite` directly.
pub use facility::*;
pub use infrastructure::*;
pub use publication::*;
pub use rates::*;
pub use reference::*;
pub use status::*;
pub use vocabulary::*;
