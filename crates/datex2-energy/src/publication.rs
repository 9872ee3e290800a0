//! Publication roots: the document-level elements a feed exchanges.
//!
//! Two publications exist. The table publication carries the static
//! infrastructure description and is built and serialized by data
//! providers. The status publication carries the dynamic feed and is the
//! document entry point for consumers, so it parses as well.

use datex2_common::{
    ElementReader, HeaderInformation, PayloadPublication, Result, XmlElement, NS_ENERGY,
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::EnergyInfrastructureTable;
use crate::reference::EnergyInfrastructureTableVersionedReference;
use crate::status::EnergyInfrastructureSiteStatus;

// ---------------------------------------------------------------------------
// EnergyInfrastructureTablePublication
// ---------------------------------------------------------------------------

/// Publication of the static infrastructure tables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureTablePublication {
    /// Publication base fields.
    pub payload: PayloadPublication,
    /// Content classification.
    pub header_information: Option<HeaderInformation>,
    /// The published tables.
    pub energy_infrastructure_table: Vec<EnergyInfrastructureTable>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureTablePublication {
    /// Create a publication around its base fields.
    pub fn new(payload: PayloadPublication) -> Self {
        Self {
            payload,
            header_information: None,
            energy_infrastructure_table: Vec::new(),
            extension: None,
        }
    }

    /// Set the header information.
    pub fn with_header_information(mut self, header: HeaderInformation) -> Self {
        self.header_information = Some(header);
        self
    }

    /// Add a table.
    pub fn with_energy_infrastructure_table(mut self, table: EnergyInfrastructureTable) -> Self {
        self.energy_infrastructure_table.push(table);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Encode as the document root element.
    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new(NS_ENERGY, "energyInfrastructureTablePublication");
        self.payload.write_into(&mut element);
        if let Some(header) = &self.header_information {
            element.push_child(header.to_xml(NS_ENERGY, "headerInformation"));
        }
        for table in &self.energy_infrastructure_table {
            element.push_child(table.to_xml(NS_ENERGY, "energyInfrastructureTable"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }

    /// Serialize to a complete XML document.
    ///
    /// # Errors
    ///
    /// Fails when the document cannot be written.
    pub fn to_document(&self) -> Result<String> {
        self.to_xml().to_xml_string()
    }
}

// ---------------------------------------------------------------------------
// EnergyInfrastructureStatusPublication
// ---------------------------------------------------------------------------

/// Publication of the dynamic status feed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureStatusPublication {
    /// Publication base fields.
    pub payload: PayloadPublication,
    /// Content classification.
    pub header_information: Option<HeaderInformation>,
    /// The static tables this feed refers to.
    pub table_reference: Vec<EnergyInfrastructureTableVersionedReference>,
    /// Status of each published site.
    pub site_status: Vec<EnergyInfrastructureSiteStatus>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureStatusPublication {
    /// Create a publication around its base fields.
    pub fn new(payload: PayloadPublication) -> Self {
        Self {
            payload,
            header_information: None,
            table_reference: Vec::new(),
            site_status: Vec::new(),
            extension: None,
        }
    }

    /// Set the header information.
    pub fn with_header_information(mut self, header: HeaderInformation) -> Self {
        self.header_information = Some(header);
        self
    }

    /// Add a table reference.
    pub fn with_table_reference(
        mut self,
        reference: EnergyInfrastructureTableVersionedReference,
    ) -> Self {
        self.table_reference.push(reference);
        self
    }

    /// Add a site status.
    pub fn with_site_status(mut self, status: EnergyInfrastructureSiteStatus) -> Self {
        self.site_status.push(status);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Parse a complete status-publication document.
    ///
    /// # Errors
    ///
    /// Fails when the document is not well-formed XML or when any field
    /// of the publication fails to decode.
    pub fn from_document(xml: &str) -> Result<Self> {
        let root = XmlElement::parse_document(xml)?;
        Self::from_xml(&root)
    }

    /// Decode from the document root element.
    ///
    /// # Errors
    ///
    /// Fails when the publication base fields are absent or malformed or
    /// when any contained reference or site status fails.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "EnergyInfrastructureStatusPublication");
        let payload = PayloadPublication::from_xml(&reader)?;
        let header_information = match reader.optional_child(NS_ENERGY, "headerInformation") {
            Some(child) => Some(HeaderInformation::from_xml(child)?),
            None => None,
        };
        let mut table_reference = Vec::new();
        for child in reader.children(NS_ENERGY, "tableReference") {
            table_reference.push(EnergyInfrastructureTableVersionedReference::from_xml(child)?);
        }
        let mut site_status = Vec::new();
        for child in reader.children(NS_ENERGY, "energyInfrastructureSiteStatus") {
            site_status.push(EnergyInfrastructureSiteStatus::from_xml(child)?);
        }
        let extension = reader.extension("_energyInfrastructureStatusPublicationExtension");
        Ok(Self {
            payload,
            header_information,
            table_reference,
            site_status,
            extension,
        })
    }

    /// Encode as the document root element.
    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new(NS_ENERGY, "energyInfrastructureStatusPublication");
        self.payload.write_into(&mut element);
        if let Some(header) = &self.header_information {
            element.push_child(header.to_xml(NS_ENERGY, "headerInformation"));
        }
        for reference in &self.table_reference {
            element.push_child(reference.to_xml(NS_ENERGY, "tableReference"));
        }
        for status in &self.site_status {
            element.push_child(status.to_xml(NS_ENERGY, "energyInfrastructureSiteStatus"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }

    /// Serialize to a complete XML document.
    ///
    /// # Errors
    ///
    /// Fails when the document cannot be written.
    pub fn to_document(&self) -> Result<String> {
        self.to_xml().to_xml_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use datex2_common::{
        DatexError, InformationStatus, InternationalIdentifier, MultilingualString,
    };

    use crate::facility::Facility;
    use crate::infrastructure::EnergyInfrastructureSite;
    use crate::reference::EnergyInfrastructureSiteVersionedReference;

    use super::*;

    fn payload() -> PayloadPublication {
        PayloadPublication::new(
            DateTime::parse_from_rfc3339("2025-02-02T12:50:00+01:00").unwrap(),
            "de",
            InternationalIdentifier::new("DE", "NAP-DE-0042"),
        )
    }

    #[test]
    fn table_publication_serializes_with_namespace_declarations() {
        let publication = EnergyInfrastructureTablePublication::new(payload())
            .with_header_information(HeaderInformation::new(InformationStatus::REAL))
            .with_energy_infrastructure_table(
                EnergyInfrastructureTable::new("TBL-1")
                    .with_table_name(MultilingualString::new("Charging sites"))
                    .with_energy_infrastructure_site(EnergyInfrastructureSite::new(
                        Facility::new("SITE-1"),
                    )),
            );

        let document = publication.to_document().unwrap();
        assert!(document.contains("<egi:energyInfrastructureTablePublication"));
        assert!(document.contains("xmlns:egi=\"http://datex2.eu/schema/3/energyInfrastructure\""));
        assert!(document.contains("<com:publicationTime>2025-02-02T12:50:00+01:00</com:publicationTime>"));
        assert!(document.contains("<egi:energyInfrastructureTable id=\"TBL-1\""));
    }

    #[test]
    fn status_publication_document_roundtrip() {
        let publication = EnergyInfrastructureStatusPublication::new(payload())
            .with_header_information(HeaderInformation::new(InformationStatus::TEST))
            .with_table_reference(
                EnergyInfrastructureTableVersionedReference::new("TBL-1").with_version("7"),
            )
            .with_site_status(EnergyInfrastructureSiteStatus::new(
                EnergyInfrastructureSiteVersionedReference::new("SITE-1"),
            ));

        let document = publication.to_document().unwrap();
        let back = EnergyInfrastructureStatusPublication::from_document(&document).unwrap();
        assert_eq!(publication, back);
    }

    #[test]
    fn from_document_rejects_malformed_xml() {
        let err =
            EnergyInfrastructureStatusPublication::from_document("<egi:statusPublication")
                .unwrap_err();
        assert!(matches!(err, DatexError::Xml { .. }));
    }
}
