#![deny(missing_docs)]

//! # DATEX II Common
//!
//! Shared mechanisms and the *Common*/*LocationReferencing* subset of the
//! DATEX II v3 data model: the interned-token enumeration machinery, the
//! namespace-aware XML element tree, and the scalar, calendar, location
//! and publication-envelope types every DATEX II publication builds on.
//!
//! ## Value patterns
//!
//! ```text
//! Day::parse("Monday") == Day::MONDAY            open-world token enums
//! XmlElement::parse_document / to_xml_string     namespace-aware wire form
//! Entity::new(mandatory).with_optional(..)       immutable schema entities
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`error`] | `DatexError` and the crate-wide `Result` |
//! | [`token`] | `TokenRegistry` and the `token_type!` declaration macro |
//! | [`vocabulary`] | Common-schema enumerations (`Day`, `FuelType`, ...) |
//! | [`types`] | Multilingual strings, money, physical quantities, URLs |
//! | [`calendar`] | Validity periods and opening hours |
//! | [`location`] | Point locations and the `xsi:type` location dispatch |
//! | [`payload`] | `HeaderInformation` and the publication base fields |
//! | [`xml`] | Element tree, namespace table, reader/writer, `ElementReader` |

pub mod calendar;
pub mod error;
pub mod location;
pub mod payload;
pub mod token;
pub mod types;
pub mod vocabulary;
pub mod xml;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `datex2_common::Day` directly.
pub use calendar::*;
pub use error::*;
pub use location::*;
pub use payload::*;
pub use token::*;
pub use types::*;
pub use vocabulary::*;
pub use xml::*;
