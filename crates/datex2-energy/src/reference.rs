//! Versioned references from dynamic status data to the static entities
//! it describes.
//!
//! A reference carries the target's `id`, optionally its `version`, and a
//! `targetClass` attribute naming the referenced type. Unlike the open
//! token vocabularies, the set of referenceable classes is closed by the
//! schema, so [`TargetClass`] is a plain Rust enum. Decoding validates the
//! discriminator: a reference pointing at the wrong class is rejected.

use datex2_common::{DatexError, ElementReader, Result, XmlElement};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TargetClass
// ---------------------------------------------------------------------------

/// The classes a versioned reference may point at.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum TargetClass {
    /// An energy rate.
    #[strum(serialize = "egi:EnergyRate")]
    EnergyRate,
    /// An energy infrastructure table.
    #[strum(serialize = "egi:EnergyInfrastructureTable")]
    EnergyInfrastructureTable,
    /// An energy infrastructure site.
    #[strum(serialize = "egi:EnergyInfrastructureSite")]
    EnergyInfrastructureSite,
    /// An energy infrastructure station.
    #[strum(serialize = "egi:EnergyInfrastructureStation")]
    EnergyInfrastructureStation,
    /// A refill point.
    #[strum(serialize = "egi:RefillPoint")]
    RefillPoint,
    /// A facility.
    #[strum(serialize = "fac:Facility")]
    Facility,
}

impl TargetClass {
    /// The namespace-qualified discriminator written to `targetClass`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

// ---------------------------------------------------------------------------
// Reference types
// ---------------------------------------------------------------------------

macro_rules! versioned_reference {
    (
        $(#[$type_doc:meta])*
        $name:ident => $target:ident
    ) => {
        $(#[$type_doc])*
        #[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            /// Identifier of the referenced entity.
            pub id: String,
            /// Version of the referenced entity.
            pub version: Option<String>,
        }

        impl $name {
            /// Discriminator this reference type requires.
            pub const TARGET_CLASS: TargetClass = TargetClass::$target;

            /// Create a reference to the entity with identifier `id`.
            pub fn new(id: &str) -> Self {
                Self {
                    id: id.to_string(),
                    version: None,
                }
            }

            /// Set the referenced version.
            pub fn with_version(mut self, version: &str) -> Self {
                self.version = Some(version.to_string());
                self
            }

            /// Decode from a reference element.
            ///
            /// A present `targetClass` attribute must match this type's
            /// discriminator exactly; an absent one is accepted.
            ///
            /// # Errors
            ///
            /// Fails when `targetClass` names a different class or when
            /// the `id` attribute is missing.
            pub fn from_xml(element: &XmlElement) -> Result<Self> {
                let reader = ElementReader::new(element, stringify!($name));
                if let Some(found) = reader.attribute("targetClass") {
                    if found != Self::TARGET_CLASS.as_str() {
                        return Err(DatexError::InvalidTargetClass {
                            expected: Self::TARGET_CLASS.as_str(),
                            found,
                        });
                    }
                }
                let id = reader.mandatory_attribute("id")?;
                let version = reader.attribute("version");
                Ok(Self { id, version })
            }

            /// Encode as a field element named `local` in `namespace`.
            pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
                let mut element = XmlElement::new(namespace, local)
                    .with_attribute("id", &self.id);
                if let Some(version) = &self.version {
                    element = element.with_attribute("version", version);
                }
                element.with_attribute("targetClass", Self::TARGET_CLASS.as_str())
            }
        }
    };
}

versioned_reference! {
    /// Reference to an energy rate.
    EnergyRateReference => EnergyRate
}

versioned_reference! {
    /// Reference to an energy infrastructure table.
    EnergyInfrastructureTableVersionedReference => EnergyInfrastructureTable
}

versioned_reference! {
    /// Reference to an energy infrastructure site.
    EnergyInfrastructureSiteVersionedReference => EnergyInfrastructureSite
}

versioned_reference! {
    /// Reference to an energy infrastructure station.
    EnergyInfrastructureStationVersionedReference => EnergyInfrastructureStation
}

versioned_reference! {
    /// Reference to a refill point.
    RefillPointVersionedReference => RefillPoint
}

versioned_reference! {
    /// Reference to a facility.
    FacilityVersionedReference => Facility
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use datex2_common::NS_ENERGY;

    use super::*;

    #[test]
    fn target_class_display_and_from_str() {
        use std::str::FromStr;
        assert_eq!(TargetClass::EnergyRate.to_string(), "egi:EnergyRate");
        assert_eq!(TargetClass::Facility.as_str(), "fac:Facility");
        assert_eq!(
            TargetClass::from_str("egi:RefillPoint").unwrap(),
            TargetClass::RefillPoint
        );
        assert!(TargetClass::from_str("egi:ChargingPark").is_err());
    }

    #[test]
    fn target_class_enum_iter_covers_the_catalog() {
        use strum::IntoEnumIterator;
        let qualified: Vec<&'static str> = TargetClass::iter().map(TargetClass::as_str).collect();
        assert_eq!(
            qualified,
            vec![
                "egi:EnergyRate",
                "egi:EnergyInfrastructureTable",
                "egi:EnergyInfrastructureSite",
                "egi:EnergyInfrastructureStation",
                "egi:RefillPoint",
                "fac:Facility",
            ]
        );
    }

    #[test]
    fn reference_xml_roundtrip() {
        let reference = EnergyRateReference::new("74034E3E-9D2F-4410-BE6F-CAA3176D69B4");
        let element = reference.to_xml(NS_ENERGY, "energyRateReference");
        assert_eq!(element.attribute("targetClass"), Some("egi:EnergyRate"));
        let back = EnergyRateReference::from_xml(&element).unwrap();
        assert_eq!(reference, back);
    }

    #[test]
    fn mismatched_target_class_is_rejected() {
        let element = XmlElement::new(NS_ENERGY, "energyRateReference")
            .with_attribute("id", "74034E3E-9D2F-4410-BE6F-CAA3176D69B4")
            .with_attribute("targetClass", "wrong:Type");
        let err = EnergyRateReference::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::InvalidTargetClass {
                expected: "egi:EnergyRate",
                found: "wrong:Type".to_string(),
            }
        );
        assert!(err.to_string().contains("Invalid target class"));
    }

    #[test]
    fn absent_target_class_is_accepted() {
        let element = XmlElement::new(NS_ENERGY, "facilityReference").with_attribute("id", "F-1");
        let reference = FacilityVersionedReference::from_xml(&element).unwrap();
        assert_eq!(reference.id, "F-1");
        assert!(reference.version.is_none());
    }

    #[test]
    fn missing_id_is_reported_with_the_class_name() {
        let element = XmlElement::new(NS_ENERGY, "energyRateReference")
            .with_attribute("targetClass", "egi:EnergyRate");
        let err = EnergyRateReference::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "EnergyRateReference",
                field: "id",
            }
        );
    }

    #[test]
    fn version_survives_the_roundtrip() {
        let reference =
            EnergyInfrastructureSiteVersionedReference::new("SITE-1").with_version("12");
        let element = reference.to_xml(NS_ENERGY, "energyInfrastructureSiteReference");
        let back = EnergyInfrastructureSiteVersionedReference::from_xml(&element).unwrap();
        assert_eq!(back.version.as_deref(), Some("12"));
    }
}
