//! Publication envelope fields from the DATEX II `common` schema.
//!
//! Every publication element carries the [`PayloadPublication`] base
//! fields (publication time, language, creator) and usually a
//! [`HeaderInformation`] block. Concrete publication roots embed these by
//! value and delegate to the helpers here.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::InternationalIdentifier;
use crate::vocabulary::{Confidentiality, InformationStatus};
use crate::xml::{ElementReader, XmlAttribute, XmlElement, XmlName, NS_COMMON};

// ---------------------------------------------------------------------------
// HeaderInformation
// ---------------------------------------------------------------------------

/// Classification of a publication's content.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HeaderInformation {
    /// Who the content may be shared with.
    pub confidentiality: Option<Confidentiality>,
    /// Whether the content is real, test or exercise data.
    pub information_status: InformationStatus,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl HeaderInformation {
    /// Create a header with the given information status.
    pub fn new(information_status: InformationStatus) -> Self {
        Self {
            confidentiality: None,
            information_status,
            extension: None,
        }
    }

    /// Set the confidentiality classification.
    pub fn with_confidentiality(mut self, confidentiality: Confidentiality) -> Self {
        self.confidentiality = Some(confidentiality);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a `headerInformation` element.
    ///
    /// # Errors
    ///
    /// Fails when `informationStatus` is absent or empty.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "HeaderInformation");
        let confidentiality = reader.optional_parsed(NS_COMMON, "confidentiality")?;
        let information_status = reader.mandatory_parsed(NS_COMMON, "informationStatus")?;
        let extension = reader.extension("_headerInformationExtension");
        Ok(Self {
            confidentiality,
            information_status,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local);
        if let Some(confidentiality) = &self.confidentiality {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "confidentiality",
                confidentiality.as_str(),
            ));
        }
        element.push_child(XmlElement::text_element(
            NS_COMMON,
            "informationStatus",
            self.information_status.as_str(),
        ));
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// PayloadPublication
// ---------------------------------------------------------------------------

/// Base fields every publication element carries.
///
/// Concrete publication roots embed this by value; their decoders call
/// [`from_xml`](Self::from_xml) with their own reader and their encoders
/// call [`write_into`](Self::write_into) on the root element under
/// construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PayloadPublication {
    /// When the publication was created.
    pub publication_time: DateTime<FixedOffset>,
    /// Default language of the publication, an RFC 5646 code.
    pub lang: String,
    /// Organisation that created the publication.
    pub publication_creator: InternationalIdentifier,
}

impl PayloadPublication {
    /// Create the base fields from their mandatory parts.
    pub fn new(
        publication_time: DateTime<FixedOffset>,
        lang: &str,
        publication_creator: InternationalIdentifier,
    ) -> Self {
        Self {
            publication_time,
            lang: lang.to_string(),
            publication_creator,
        }
    }

    /// Decode the base fields through a publication root's reader.
    ///
    /// # Errors
    ///
    /// Fails when the `lang` attribute, `publicationTime` element or
    /// `publicationCreator` element is absent or malformed.
    pub fn from_xml(reader: &ElementReader<'_>) -> Result<Self> {
        let lang = reader.mandatory_attribute("lang")?;
        let publication_time = reader.mandatory_parsed(NS_COMMON, "publicationTime")?;
        let publication_creator = InternationalIdentifier::from_xml(
            reader.mandatory_child(NS_COMMON, "publicationCreator")?,
        )?;
        Ok(Self {
            publication_time,
            lang,
            publication_creator,
        })
    }

    /// Write the base fields onto a publication root element.
    pub fn write_into(&self, element: &mut XmlElement) {
        element.attributes.push(XmlAttribute {
            name: XmlName::unqualified("lang"),
            value: self.lang.clone(),
        });
        element.push_child(XmlElement::text_element(
            NS_COMMON,
            "publicationTime",
            &self
                .publication_time
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        element.push_child(
            self.publication_creator
                .to_xml(NS_COMMON, "publicationCreator"),
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::error::DatexError;
    use crate::xml::NS_ENERGY;

    use super::*;

    fn publication() -> PayloadPublication {
        PayloadPublication::new(
            DateTime::parse_from_rfc3339("2025-02-02T12:50:00+01:00").unwrap(),
            "de",
            InternationalIdentifier::new("DE", "NAP-DE-0042"),
        )
    }

    #[test]
    fn header_information_xml_roundtrip() {
        let header = HeaderInformation::new(InformationStatus::REAL)
            .with_confidentiality(Confidentiality::NO_RESTRICTION);
        let element = header.to_xml(NS_ENERGY, "headerInformation");
        let back = HeaderInformation::from_xml(&element).unwrap();
        assert_eq!(header, back);
    }

    #[test]
    fn header_information_requires_status() {
        let element = XmlElement::new(NS_ENERGY, "headerInformation").with_child(
            XmlElement::text_element(NS_COMMON, "confidentiality", "noRestriction"),
        );
        let err = HeaderInformation::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "HeaderInformation",
                field: "informationStatus",
            }
        );
    }

    #[test]
    fn payload_fields_roundtrip_through_a_root() {
        let payload = publication();
        let mut root = XmlElement::new(NS_ENERGY, "energyInfrastructureStatusPublication");
        payload.write_into(&mut root);

        let reader = ElementReader::new(&root, "EnergyInfrastructureStatusPublication");
        let back = PayloadPublication::from_xml(&reader).unwrap();
        assert_eq!(payload, back);
    }

    #[test]
    fn missing_lang_attribute_is_reported() {
        let mut root = XmlElement::new(NS_ENERGY, "energyInfrastructureStatusPublication");
        publication().write_into(&mut root);
        root.attributes.clear();

        let reader = ElementReader::new(&root, "EnergyInfrastructureStatusPublication");
        let err = PayloadPublication::from_xml(&reader).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "EnergyInfrastructureStatusPublication",
                field: "lang",
            }
        );
    }
}
