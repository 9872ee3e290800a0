//! Common scalar and value types shared by the DATEX II schemas.
//!
//! These are the field types entities are built from: multilingual text,
//! money amounts, physical quantities and URLs. All of them are plain
//! immutable values with string-shaped wire forms.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::xml::{ElementReader, XmlElement, NS_COMMON};

// ---------------------------------------------------------------------------
// MultilingualString
// ---------------------------------------------------------------------------

/// One language variant of a [`MultilingualString`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MultilingualStringValue {
    /// Language code of this variant, absent when unspecified.
    pub lang: Option<String>,
    /// The text in that language.
    pub value: String,
}

/// Text carried in one or more language variants.
///
/// DATEX II wraps every human-readable string in this structure so feeds
/// can carry parallel translations. The wire form is a `values` child
/// holding one `value` element per language:
///
/// ```text
/// <fac:name>
///   <com:values>
///     <com:value lang="de">Ladepark Mitte</com:value>
///     <com:value lang="en">Central charging park</com:value>
///   </com:values>
/// </fac:name>
/// ```
///
/// # Examples
///
/// ```
/// use datex2_common::MultilingualString;
///
/// let name = MultilingualString::new("Central charging park")
///     .with_value(Some("de"), "Ladepark Mitte");
/// assert_eq!(name.values.len(), 2);
/// assert_eq!(name.to_string(), "Central charging park");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MultilingualString {
    /// The language variants, in document order.
    pub values: Vec<MultilingualStringValue>,
}

impl MultilingualString {
    /// Create a string with a single variant and no language code.
    pub fn new(text: &str) -> Self {
        Self {
            values: vec![MultilingualStringValue {
                lang: None,
                value: text.to_string(),
            }],
        }
    }

    /// Add a further language variant.
    pub fn with_value(mut self, lang: Option<&str>, text: &str) -> Self {
        self.values.push(MultilingualStringValue {
            lang: lang.map(str::to_string),
            value: text.to_string(),
        });
        self
    }

    /// Decode from a field element wrapping the `values` list.
    ///
    /// # Errors
    ///
    /// Fails when the `values` child is absent or contains no `value`
    /// element.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "MultilingualString");
        let values_element = reader.mandatory_child(NS_COMMON, "values")?;
        let mut values = Vec::new();
        for value in values_element.children(NS_COMMON, "value") {
            values.push(MultilingualStringValue {
                lang: value.attribute("lang").map(str::to_string),
                value: value.text(),
            });
        }
        if values.is_empty() {
            return Err(crate::error::DatexError::InvalidField {
                class: "MultilingualString",
                field: "values",
                reason: "must contain at least one value".to_string(),
            });
        }
        Ok(Self { values })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut values = XmlElement::new(NS_COMMON, "values");
        for variant in &self.values {
            let mut value = XmlElement::text_element(NS_COMMON, "value", &variant.value);
            if let Some(lang) = &variant.lang {
                value = value.with_attribute("lang", lang);
            }
            values.push_child(value);
        }
        XmlElement::new(namespace, local).with_child(values)
    }
}

impl fmt::Display for MultilingualString {
    /// The first variant's text; empty when there are no variants.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values.first() {
            Some(variant) => f.write_str(&variant.value),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// AmountOfMoney
// ---------------------------------------------------------------------------

/// A monetary amount, carried as an exact decimal.
///
/// # Examples
///
/// ```
/// use datex2_common::AmountOfMoney;
///
/// let price: AmountOfMoney = "0.37".parse().unwrap();
/// assert_eq!(price.to_string(), "0.37");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AmountOfMoney(Decimal);

impl AmountOfMoney {
    /// Wrap a decimal amount.
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for AmountOfMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Decimal> for AmountOfMoney {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl FromStr for AmountOfMoney {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Physical quantities
// ---------------------------------------------------------------------------

/// Electric power in kilowatts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Kilowatts(pub Decimal);

/// Electric energy in kilowatt-hours.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KilowattHours(pub Decimal);

/// Electric potential in volts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Volts(pub u32);

/// Electric current in amperes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amperes(pub u32);

/// A duration in whole seconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seconds(pub u32);

macro_rules! quantity {
    ($($name:ident($inner:ty)),* $(,)?) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            impl FromStr for $name {
                type Err = <$inner as FromStr>::Err;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    Ok(Self(<$inner>::from_str(s)?))
                }
            }
        )*
    };
}

quantity!(
    Kilowatts(Decimal),
    KilowattHours(Decimal),
    Volts(u32),
    Amperes(u32),
    Seconds(u32),
);

// ---------------------------------------------------------------------------
// Url
// ---------------------------------------------------------------------------

/// An opaque URL field. No validation is performed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url(String);

impl Url {
    /// Wrap a URL string.
    pub fn new(url: &str) -> Self {
        Self(url.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Url {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Url {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Url {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// InternationalIdentifier
// ---------------------------------------------------------------------------

/// Country plus national identifier, naming the creator of a publication.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InternationalIdentifier {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// Identifier unique within that country.
    pub national_identifier: String,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl InternationalIdentifier {
    /// Create an identifier from its two mandatory parts.
    pub fn new(country: &str, national_identifier: &str) -> Self {
        Self {
            country: country.to_string(),
            national_identifier: national_identifier.to_string(),
            extension: None,
        }
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from its field element.
    ///
    /// # Errors
    ///
    /// Fails when `country` or `nationalIdentifier` is absent or empty.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "InternationalIdentifier");
        let country = reader.mandatory_text(NS_COMMON, "country")?;
        let national_identifier = reader.mandatory_text(NS_COMMON, "nationalIdentifier")?;
        let extension = reader.extension("_internationalIdentifierExtension");
        Ok(Self {
            country,
            national_identifier,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_child(XmlElement::text_element(NS_COMMON, "country", &self.country))
            .with_child(XmlElement::text_element(
                NS_COMMON,
                "nationalIdentifier",
                &self.national_identifier,
            ));
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
    use rust_decimal_macros::dec;

    use crate::error::DatexError;
    use crate::xml::NS_FACILITIES;

    use super::*;

    #[test]
    fn multilingual_string_display_and_values() {
        let name = MultilingualString::new("Charging park").with_value(Some("de"), "Ladepark");
        assert_eq!(name.to_string(), "Charging park");
        assert_eq!(name.values[1].lang.as_deref(), Some("de"));
    }

    #[test]
    fn multilingual_string_xml_roundtrip() {
        let name = MultilingualString::new("Charging park").with_value(Some("de"), "Ladepark");
        let element = name.to_xml(NS_FACILITIES, "name");
        assert_eq!(element.name.local, "name");
        let back = MultilingualString::from_xml(&element).unwrap();
        assert_eq!(name, back);
    }

    #[test]
    fn multilingual_string_requires_values() {
        let element = XmlElement::new(NS_FACILITIES, "name");
        let err = MultilingualString::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "MultilingualString",
                field: "values",
            }
        );

        let element =
            XmlElement::new(NS_FACILITIES, "name").with_child(XmlElement::new(NS_COMMON, "values"));
        let err = MultilingualString::from_xml(&element).unwrap_err();
        assert!(matches!(err, DatexError::InvalidField { field: "values", .. }));
    }

    #[test]
    fn amount_of_money_is_exact() {
        let price: AmountOfMoney = "0.37".parse().unwrap();
        assert_eq!(price.value(), dec!(0.37));
        assert_eq!(price, AmountOfMoney::new(dec!(0.37)));
        assert_eq!(price.to_string(), "0.37");
    }

    #[test]
    fn amount_of_money_rejects_garbage() {
        assert!("price".parse::<AmountOfMoney>().is_err());
    }

    #[test]
    fn quantity_newtypes_display_bare_numbers() {
        assert_eq!(Kilowatts(dec!(22)).to_string(), "22");
        assert_eq!(KilowattHours(dec!(80.5)).to_string(), "80.5");
        assert_eq!(Volts(400).to_string(), "400");
        assert_eq!(Amperes(32).to_string(), "32");
        assert_eq!(Seconds(900).to_string(), "900");
    }

    #[test]
    fn quantity_newtypes_parse_their_wire_form() {
        assert_eq!("22.08".parse::<Kilowatts>().unwrap(), Kilowatts(dec!(22.08)));
        assert_eq!("400".parse::<Volts>().unwrap(), Volts(400));
        assert_eq!("900".parse::<Seconds>().unwrap(), Seconds(900));
        assert!("soon".parse::<Seconds>().is_err());
    }

    #[test]
    fn url_display_and_from() {
        let url = Url::new("https://example.com/stations");
        let url2: Url = "https://example.com/stations".into();
        assert_eq!(url, url2);
        assert_eq!(url.as_str(), "https://example.com/stations");
    }

    #[test]
    fn international_identifier_xml_roundtrip() {
        let creator = InternationalIdentifier::new("DE", "NAP-DE-0042");
        let element = creator.to_xml(NS_COMMON, "publicationCreator");
        let back = InternationalIdentifier::from_xml(&element).unwrap();
        assert_eq!(creator, back);
    }

    #[test]
    fn international_identifier_missing_country_fails() {
        let element = XmlElement::new(NS_COMMON, "publicationCreator").with_child(
            XmlElement::text_element(NS_COMMON, "nationalIdentifier", "NAP-DE-0042"),
        );
        let err = InternationalIdentifier::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "InternationalIdentifier",
                field: "country",
            }
        );
    }

    #[test]
    fn serde_roundtrips() {
        let name = MultilingualString::new("Dépôt").with_value(Some("fr"), "Dépôt");
        let json = serde_json::to_string(&name).unwrap();
        let back: MultilingualString = serde_json::from_str(&json).unwrap();
        assert_eq!(name, back);

        let amount = AmountOfMoney::new(dec!(12.50));
        let json = serde_json::to_string(&amount).unwrap();
        let back: AmountOfMoney = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, back);
    }
}
