//! Minimal subset of the DATEX II `locationReferencing` schema.
//!
//! Enough to place a site on the map: a point by WGS84 coordinates. The
//! abstract `locationReference` element is discriminated by `xsi:type`,
//! the same dispatch mechanism the dynamic status types use.

use serde::{Deserialize, Serialize};

use crate::error::{DatexError, Result};
use crate::xml::{local_name, ElementReader, XmlElement, NS_LOCATION, NS_XSI};

// ---------------------------------------------------------------------------
// PointCoordinates
// ---------------------------------------------------------------------------

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PointCoordinates {
    /// Latitude, positive north of the equator.
    pub latitude: f64,
    /// Longitude, positive east of Greenwich.
    pub longitude: f64,
}

impl PointCoordinates {
    /// Create a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Decode from a `pointCoordinates` element.
    ///
    /// # Errors
    ///
    /// Fails when either coordinate is absent or not a number.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "PointCoordinates");
        let latitude = reader.mandatory_parsed(NS_LOCATION, "latitude")?;
        let longitude = reader.mandatory_parsed(NS_LOCATION, "longitude")?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        XmlElement::new(namespace, local)
            .with_child(XmlElement::text_element(
                NS_LOCATION,
                "latitude",
                &self.latitude.to_string(),
            ))
            .with_child(XmlElement::text_element(
                NS_LOCATION,
                "longitude",
                &self.longitude.to_string(),
            ))
    }
}

// ---------------------------------------------------------------------------
// PointLocation
// ---------------------------------------------------------------------------

/// A location given as a single point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PointLocation {
    /// The point's coordinates.
    pub point_by_coordinates: PointCoordinates,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl PointLocation {
    /// Create a point location from its coordinates.
    pub fn new(point_by_coordinates: PointCoordinates) -> Self {
        Self {
            point_by_coordinates,
            extension: None,
        }
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a location-reference element carrying point children.
    ///
    /// # Errors
    ///
    /// Fails when the `pointByCoordinates`/`pointCoordinates` nesting or
    /// the coordinates themselves are missing or malformed.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "PointLocation");
        let point_by_coordinates = reader.mandatory_child(NS_LOCATION, "pointByCoordinates")?;
        let coordinates = ElementReader::new(point_by_coordinates, "PointLocation")
            .mandatory_child(NS_LOCATION, "pointCoordinates")?;
        let point_by_coordinates = PointCoordinates::from_xml(coordinates)?;
        let extension = reader.extension("_pointLocationExtension");
        Ok(Self {
            point_by_coordinates,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`, carrying
    /// its `xsi:type` discriminator.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_attribute_ns(NS_XSI, "type", "loc:PointLocation")
            .with_child(
                XmlElement::new(NS_LOCATION, "pointByCoordinates").with_child(
                    self.point_by_coordinates
                        .to_xml(NS_LOCATION, "pointCoordinates"),
                ),
            );
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// LocationReference
// ---------------------------------------------------------------------------

/// The abstract location reference, discriminated by `xsi:type`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LocationReference {
    /// A single point.
    Point(PointLocation),
}

impl LocationReference {
    /// Decode from a location-reference element, dispatching on the
    /// `xsi:type` discriminator's local name.
    ///
    /// # Errors
    ///
    /// Fails with a missing-field error when `xsi:type` is absent and with
    /// an unknown-subtype error naming the discriminator when it matches
    /// no supported location type.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "LocationReference");
        let discriminator = reader.mandatory_xsi_type()?;
        match local_name(discriminator) {
            "PointLocation" => Ok(Self::Point(PointLocation::from_xml(element)?)),
            _ => {
                tracing::warn!(
                    class = "LocationReference",
                    discriminator,
                    "rejected unknown xsi:type"
                );
                Err(DatexError::UnknownSubtype {
                    class: "LocationReference",
                    found: discriminator.to_string(),
                })
            }
        }
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        match self {
            Self::Point(point) => point.to_xml(namespace, local),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::xml::NS_FACILITIES;

    use super::*;

    #[test]
    fn point_location_xml_roundtrip() {
        let location = LocationReference::Point(PointLocation::new(PointCoordinates::new(
            48.1374, 11.5755,
        )));
        let element = location.to_xml(NS_FACILITIES, "locationReference");
        assert_eq!(
            element.attribute_ns(NS_XSI, "type"),
            Some("loc:PointLocation")
        );
        let back = LocationReference::from_xml(&element).unwrap();
        assert_eq!(location, back);
    }

    #[test]
    fn dispatch_requires_the_discriminator() {
        let element = XmlElement::new(NS_FACILITIES, "locationReference");
        let err = LocationReference::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "LocationReference",
                field: "xsi:type",
            }
        );
    }

    #[test]
    fn dispatch_rejects_unknown_subtypes_by_name() {
        let element = XmlElement::new(NS_FACILITIES, "locationReference")
            .with_attribute_ns(NS_XSI, "type", "loc:LinearLocation");
        let err = LocationReference::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::UnknownSubtype {
                class: "LocationReference",
                found: "loc:LinearLocation".to_string(),
            }
        );
        assert!(err.to_string().contains("loc:LinearLocation"));
    }

    #[test]
    fn coordinates_must_be_numbers() {
        let element = XmlElement::new(NS_FACILITIES, "locationReference")
            .with_attribute_ns(NS_XSI, "type", "loc:PointLocation")
            .with_child(
                XmlElement::new(NS_LOCATION, "pointByCoordinates").with_child(
                    XmlElement::new(NS_LOCATION, "pointCoordinates")
                        .with_child(XmlElement::text_element(NS_LOCATION, "latitude", "north"))
                        .with_child(XmlElement::text_element(NS_LOCATION, "longitude", "11.5")),
                ),
            );
        let err = LocationReference::from_xml(&element).unwrap_err();
        assert!(matches!(
            err,
            DatexError::InvalidField {
                class: "PointCoordinates",
                field: "latitude",
                ..
            }
        ));
    }
}
