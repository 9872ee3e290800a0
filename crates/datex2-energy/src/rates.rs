//! Energy pricing: static rate descriptions and dynamic rate updates.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use datex2_common::{
    AmountOfMoney, ElementReader, MultilingualString, OverallPeriod, Result, XmlAttribute,
    XmlElement, XmlName, NS_ENERGY,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reference::EnergyRateReference;
use crate::vocabulary::PriceType;

// ---------------------------------------------------------------------------
// EnergyPrice
// ---------------------------------------------------------------------------

/// One price component of an energy rate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyPrice {
    /// What the price is charged per.
    pub price_type: PriceType,
    /// The amount charged.
    pub value: AmountOfMoney,
    /// Whether tax is included in the amount.
    pub tax_included: Option<bool>,
    /// Applicable tax rate in percent.
    pub tax_rate: Option<Decimal>,
    /// Human-readable qualification of the price.
    pub additional_information: Option<MultilingualString>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyPrice {
    /// Create a price from its mandatory type and amount.
    pub fn new(price_type: PriceType, value: AmountOfMoney) -> Self {
        Self {
            price_type,
            value,
            tax_included: None,
            tax_rate: None,
            additional_information: None,
            extension: None,
        }
    }

    /// State whether tax is included.
    pub fn with_tax_included(mut self, tax_included: bool) -> Self {
        self.tax_included = Some(tax_included);
        self
    }

    /// Set the tax rate in percent.
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    /// Set the additional information text.
    pub fn with_additional_information(mut self, information: MultilingualString) -> Self {
        self.additional_information = Some(information);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from an `energyPrice` element.
    ///
    /// # Errors
    ///
    /// Fails when `priceType` or `value` is absent or malformed, or when
    /// a present optional field does not decode.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "EnergyPrice");
        let price_type = reader.mandatory_parsed(NS_ENERGY, "priceType")?;
        let value = reader.mandatory_parsed(NS_ENERGY, "value")?;
        let tax_included = reader.optional_boolean(NS_ENERGY, "taxIncluded")?;
        let tax_rate = reader.optional_parsed(NS_ENERGY, "taxRate")?;
        let additional_information = match reader.optional_child(NS_ENERGY, "additionalInformation")
        {
            Some(child) => Some(MultilingualString::from_xml(child)?),
            None => None,
        };
        let extension = reader.extension("_energyPriceExtension");
        Ok(Self {
            price_type,
            value,
            tax_included,
            tax_rate,
            additional_information,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_child(XmlElement::text_element(
                NS_ENERGY,
                "priceType",
                self.price_type.as_str(),
            ))
            .with_child(XmlElement::text_element(
                NS_ENERGY,
                "value",
                &self.value.to_string(),
            ));
        if let Some(tax_included) = &self.tax_included {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "taxIncluded",
                if *tax_included { "true" } else { "false" },
            ));
        }
        if let Some(tax_rate) = &self.tax_rate {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "taxRate",
                &tax_rate.to_string(),
            ));
        }
        if let Some(information) = &self.additional_information {
            element.push_child(information.to_xml(NS_ENERGY, "additionalInformation"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// EnergyRate
// ---------------------------------------------------------------------------

/// A static, versioned rate description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyRate {
    /// Identifier of the rate, opaque to this library.
    pub id: String,
    /// Version of the rate record.
    pub version: Option<String>,
    /// When the rate was last changed.
    pub last_updated: Option<DateTime<FixedOffset>>,
    /// Human-readable rate name.
    pub rate_name: Option<MultilingualString>,
    /// ISO 4217 currency of all prices in this rate.
    pub applicable_currency: Option<String>,
    /// Price components of the rate.
    pub energy_price: Vec<EnergyPrice>,
    /// When the rate applies.
    pub validity: Option<OverallPeriod>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyRate {
    /// Create a rate with the given identifier.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version: None,
            last_updated: None,
            rate_name: None,
            applicable_currency: None,
            energy_price: Vec::new(),
            validity: None,
            extension: None,
        }
    }

    /// Set the record version.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Set the last-updated instant.
    pub fn with_last_updated(mut self, last_updated: DateTime<FixedOffset>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Set the rate name.
    pub fn with_rate_name(mut self, rate_name: MultilingualString) -> Self {
        self.rate_name = Some(rate_name);
        self
    }

    /// Set the currency.
    pub fn with_applicable_currency(mut self, currency: &str) -> Self {
        self.applicable_currency = Some(currency.to_string());
        self
    }

    /// Add a price component.
    pub fn with_energy_price(mut self, price: EnergyPrice) -> Self {
        self.energy_price.push(price);
        self
    }

    /// Set the validity window.
    pub fn with_validity(mut self, validity: OverallPeriod) -> Self {
        self.validity = Some(validity);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local);
        element.attributes.push(XmlAttribute {
            name: XmlName::unqualified("id"),
            value: self.id.clone(),
        });
        if let Some(version) = &self.version {
            element.attributes.push(XmlAttribute {
                name: XmlName::unqualified("version"),
                value: version.clone(),
            });
        }
        if let Some(last_updated) = &self.last_updated {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "lastUpdated",
                &last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(rate_name) = &self.rate_name {
            element.push_child(rate_name.to_xml(NS_ENERGY, "rateName"));
        }
        if let Some(currency) = &self.applicable_currency {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "applicableCurrency",
                currency,
            ));
        }
        for price in &self.energy_price {
            element.push_child(price.to_xml(NS_ENERGY, "energyPrice"));
        }
        if let Some(validity) = &self.validity {
            element.push_child(validity.to_xml(NS_ENERGY, "validity"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// EnergyRateUpdate
// ---------------------------------------------------------------------------

/// A dynamic update of the prices of a referenced rate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyRateUpdate {
    /// When the referenced rate last changed.
    pub last_updated: DateTime<FixedOffset>,
    /// The rate being updated.
    pub energy_rate_reference: EnergyRateReference,
    /// Current price components.
    pub energy_price: Vec<EnergyPrice>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyRateUpdate {
    /// Create an update of the referenced rate.
    pub fn new(
        last_updated: DateTime<FixedOffset>,
        energy_rate_reference: EnergyRateReference,
    ) -> Self {
        Self {
            last_updated,
            energy_rate_reference,
            energy_price: Vec::new(),
            extension: None,
        }
    }

    /// Add a price component.
    pub fn with_energy_price(mut self, price: EnergyPrice) -> Self {
        self.energy_price.push(price);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from an `energyRateUpdate` element.
    ///
    /// # Errors
    ///
    /// Fails when `lastUpdated` or `energyRateReference` is absent or
    /// malformed, when the reference carries a wrong `targetClass`, or
    /// when any price fails to decode.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "EnergyRateUpdate");
        let last_updated = reader.mandatory_parsed(NS_ENERGY, "lastUpdated")?;
        let energy_rate_reference = EnergyRateReference::from_xml(
            reader.mandatory_child(NS_ENERGY, "energyRateReference")?,
        )?;
        let mut energy_price = Vec::new();
        for child in reader.children(NS_ENERGY, "energyPrice") {
            energy_price.push(EnergyPrice::from_xml(child)?);
        }
        let extension = reader.extension("_energyRateUpdateExtension");
        Ok(Self {
            last_updated,
            energy_rate_reference,
            energy_price,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_child(XmlElement::text_element(
                NS_ENERGY,
                "lastUpdated",
                &self.last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            ))
            .with_child(
                self.energy_rate_reference
                    .to_xml(NS_ENERGY, "energyRateReference"),
            );
        for price in &self.energy_price {
            element.push_child(price.to_xml(NS_ENERGY, "energyPrice"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use datex2_common::DatexError;
    use rust_decimal_macros::dec;

    use super::*;

    const RATE_UPDATE: &str = "<energyRateUpdate>\
<lastUpdated>2025-02-02T12:50:00+01:00</lastUpdated>\
<energyRateReference id=\"74034E3E-9D2F-4410-BE6F-CAA3176D69B4\" targetClass=\"egi:EnergyRate\"/>\
<energyPrice><priceType>pricePerKWh</priceType><value>0.37</value></energyPrice>\
</energyRateUpdate>";

    #[test]
    fn rate_update_fragment_parses() {
        let element = XmlElement::parse_document(RATE_UPDATE).unwrap();
        let update = EnergyRateUpdate::from_xml(&element).unwrap();
        assert_eq!(
            update.energy_rate_reference.id,
            "74034E3E-9D2F-4410-BE6F-CAA3176D69B4"
        );
        assert_eq!(update.energy_price.len(), 1);
        assert_eq!(update.energy_price[0].value, AmountOfMoney::new(dec!(0.37)));
        assert_eq!(update.energy_price[0].price_type, PriceType::PRICE_PER_KWH);
        assert_eq!(
            update.last_updated,
            DateTime::parse_from_rfc3339("2025-02-02T12:50:00+01:00").unwrap()
        );
    }

    #[test]
    fn rate_update_rejects_wrong_target_class() {
        let corrupted = RATE_UPDATE.replace("egi:EnergyRate", "wrong:Type");
        let element = XmlElement::parse_document(&corrupted).unwrap();
        let err = EnergyRateUpdate::from_xml(&element).unwrap_err();
        assert!(err.to_string().contains("Invalid target class"));
    }

    #[test]
    fn rate_update_requires_last_updated() {
        let corrupted = RATE_UPDATE
            .replace("<lastUpdated>2025-02-02T12:50:00+01:00</lastUpdated>", "");
        let element = XmlElement::parse_document(&corrupted).unwrap();
        let err = EnergyRateUpdate::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "EnergyRateUpdate",
                field: "lastUpdated",
            }
        );
    }

    #[test]
    fn energy_price_requires_its_mandatory_fields() {
        let element = XmlElement::parse_document("<energyPrice><value>0.37</value></energyPrice>")
            .unwrap();
        let err = EnergyPrice::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "EnergyPrice",
                field: "priceType",
            }
        );

        let element = XmlElement::parse_document(
            "<energyPrice><priceType>pricePerKWh</priceType></energyPrice>",
        )
        .unwrap();
        let err = EnergyPrice::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "EnergyPrice",
                field: "value",
            }
        );
    }

    #[test]
    fn energy_price_value_must_be_decimal() {
        let element = XmlElement::parse_document(
            "<energyPrice><priceType>pricePerKWh</priceType><value>cheap</value></energyPrice>",
        )
        .unwrap();
        let err = EnergyPrice::from_xml(&element).unwrap_err();
        assert!(matches!(
            err,
            DatexError::InvalidField {
                class: "EnergyPrice",
                field: "value",
                ..
            }
        ));
    }

    #[test]
    fn rate_update_xml_roundtrip() {
        let update = EnergyRateUpdate::new(
            DateTime::parse_from_rfc3339("2025-02-02T12:50:00+01:00").unwrap(),
            EnergyRateReference::new("74034E3E-9D2F-4410-BE6F-CAA3176D69B4").with_version("4"),
        )
        .with_energy_price(
            EnergyPrice::new(PriceType::PRICE_PER_KWH, AmountOfMoney::new(dec!(0.37)))
                .with_tax_included(true)
                .with_tax_rate(dec!(19)),
        );

        let element = update.to_xml(NS_ENERGY, "energyRateUpdate");
        let back = EnergyRateUpdate::from_xml(&element).unwrap();
        assert_eq!(update, back);
    }

    #[test]
    fn parsing_the_same_fragment_twice_is_idempotent() {
        let element = XmlElement::parse_document(RATE_UPDATE).unwrap();
        let first = EnergyRateUpdate::from_xml(&element).unwrap();
        let second = EnergyRateUpdate::from_xml(&element).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn static_rate_serializes_prices_and_validity() {
        let rate = EnergyRate::new("RATE-1")
            .with_version("2")
            .with_rate_name(MultilingualString::new("Standard AC"))
            .with_applicable_currency("EUR")
            .with_energy_price(EnergyPrice::new(
                PriceType::PRICE_PER_KWH,
                AmountOfMoney::new(dec!(0.49)),
            ));
        let element = rate.to_xml(NS_ENERGY, "energyRate");
        assert_eq!(element.attribute("id"), Some("RATE-1"));
        assert_eq!(
            element.child(NS_ENERGY, "applicableCurrency").unwrap().text(),
            "EUR"
        );
        assert_eq!(element.children(NS_ENERGY, "energyPrice").len(), 1);
    }
}
