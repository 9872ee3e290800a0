//! Facility model from the DATEX II `facilities` schema.
//!
//! [`Facility`] carries the base fields shared by everything that has an
//! address, opening hours and an operator. The energy infrastructure
//! types embed it by value and serialize its fields inline, mirroring the
//! schema's type derivation.

use datex2_common::{
    EmissionClassificationEuro, FuelType, LocationReference, MultilingualString, OverallPeriod,
    Url, VehicleType, XmlAttribute, XmlElement, XmlName, NS_COMMON, NS_FACILITIES,
};
use serde::{Deserialize, Serialize};

use crate::vocabulary::{Accessibility, MeansOfPayment, PaymentTiming, UserType};

// ---------------------------------------------------------------------------
// Organisation
// ---------------------------------------------------------------------------

/// Contact card of an operator or energy provider.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Organisation {
    /// Name of the organisation.
    pub name: Option<MultilingualString>,
    /// Telephone number.
    pub telephone_number: Option<String>,
    /// Contact e-mail address.
    pub email: Option<String>,
    /// Website.
    pub web: Option<Url>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl Organisation {
    /// Create an empty organisation card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the organisation name.
    pub fn with_name(mut self, name: MultilingualString) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the telephone number.
    pub fn with_telephone_number(mut self, telephone_number: &str) -> Self {
        self.telephone_number = Some(telephone_number.to_string());
        self
    }

    /// Set the contact e-mail address.
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Set the website.
    pub fn with_web(mut self, web: Url) -> Self {
        self.web = Some(web);
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
        if let Some(name) = &self.name {
            element.push_child(name.to_xml(NS_FACILITIES, "name"));
        }
        if let Some(telephone_number) = &self.telephone_number {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "telephoneNumber",
                telephone_number,
            ));
        }
        if let Some(email) = &self.email {
            element.push_child(XmlElement::text_element(NS_FACILITIES, "email", email));
        }
        if let Some(web) = &self.web {
            element.push_child(XmlElement::text_element(NS_FACILITIES, "web", web.as_str()));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// VehicleCharacteristics
// ---------------------------------------------------------------------------

/// The kinds of vehicle a statement applies to.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VehicleCharacteristics {
    /// Accepted fuel types.
    pub fuel_type: Vec<FuelType>,
    /// Accepted vehicle types.
    pub vehicle_type: Vec<VehicleType>,
    /// Required emission classifications.
    pub emission_classification: Vec<EmissionClassificationEuro>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl VehicleCharacteristics {
    /// Create characteristics matching any vehicle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an accepted fuel type.
    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type.push(fuel_type);
        self
    }

    /// Add an accepted vehicle type.
    pub fn with_vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type.push(vehicle_type);
        self
    }

    /// Add a required emission classification.
    pub fn with_emission_classification(
        mut self,
        classification: EmissionClassificationEuro,
    ) -> Self {
        self.emission_classification.push(classification);
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
        for fuel_type in &self.fuel_type {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "fuelType",
                fuel_type.as_str(),
            ));
        }
        for vehicle_type in &self.vehicle_type {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "vehicleType",
                vehicle_type.as_str(),
            ));
        }
        for classification in &self.emission_classification {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "emissionClassificationEuro",
                classification.as_str(),
            ));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// DedicatedParkingSpaces
// ---------------------------------------------------------------------------

/// Parking spaces dedicated to a user group.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DedicatedParkingSpaces {
    /// User groups the spaces are reserved for.
    pub applicable_for_user: Vec<UserType>,
    /// Number of dedicated spaces.
    pub number_of_spaces: Option<u32>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl DedicatedParkingSpaces {
    /// Create an unrestricted dedication.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user group.
    pub fn with_applicable_for_user(mut self, user: UserType) -> Self {
        self.applicable_for_user.push(user);
        self
    }

    /// Set the number of spaces.
    pub fn with_number_of_spaces(mut self, number_of_spaces: u32) -> Self {
        self.number_of_spaces = Some(number_of_spaces);
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
        for user in &self.applicable_for_user {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "applicableForUser",
                user.as_str(),
            ));
        }
        if let Some(number_of_spaces) = &self.number_of_spaces {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "numberOfSpaces",
                &number_of_spaces.to_string(),
            ));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// Facility
// ---------------------------------------------------------------------------

/// Base fields of every facility-derived entity.
///
/// The energy infrastructure types embed a `Facility` by value; its `id`
/// and `version` become attributes of the embedding element and its
/// fields are serialized inline before the embedder's own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Facility {
    /// Identifier of the facility, opaque to this library.
    pub id: String,
    /// Version of the facility record.
    pub version: Option<String>,
    /// Name of the facility.
    pub name: Option<MultilingualString>,
    /// Free-text description.
    pub description: Option<MultilingualString>,
    /// Accessibility easements.
    pub accessibility: Vec<Accessibility>,
    /// Further human-readable information.
    pub additional_information: Option<MultilingualString>,
    /// Website with further information.
    pub information_website: Option<Url>,
    /// Photographs of the facility.
    pub photo_url: Vec<Url>,
    /// Opening hours.
    pub operating_hours: Option<OverallPeriod>,
    /// Where the facility is.
    pub location_reference: Option<LocationReference>,
    /// Operator of the facility.
    pub operator: Option<Organisation>,
    /// Vehicles the facility caters for.
    pub applicable_for_vehicles: Vec<VehicleCharacteristics>,
    /// Accepted payment instruments.
    pub means_of_payment: Vec<MeansOfPayment>,
    /// When payment is due.
    pub payment_timing: Vec<PaymentTiming>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl Facility {
    /// Create a facility with the given identifier.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version: None,
            name: None,
            description: None,
            accessibility: Vec::new(),
            additional_information: None,
            information_website: None,
            photo_url: Vec::new(),
            operating_hours: None,
            location_reference: None,
            operator: None,
            applicable_for_vehicles: Vec::new(),
            means_of_payment: Vec::new(),
            payment_timing: Vec::new(),
            extension: None,
        }
    }

    /// Set the record version.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Set the facility name.
    pub fn with_name(mut self, name: MultilingualString) -> Self {
        self.name = Some(name);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: MultilingualString) -> Self {
        self.description = Some(description);
        self
    }

    /// Add an accessibility easement.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility.push(accessibility);
        self
    }

    /// Set the additional information text.
    pub fn with_additional_information(mut self, information: MultilingualString) -> Self {
        self.additional_information = Some(information);
        self
    }

    /// Set the information website.
    pub fn with_information_website(mut self, website: Url) -> Self {
        self.information_website = Some(website);
        self
    }

    /// Add a photograph URL.
    pub fn with_photo_url(mut self, photo_url: Url) -> Self {
        self.photo_url.push(photo_url);
        self
    }

    /// Set the opening hours.
    pub fn with_operating_hours(mut self, operating_hours: OverallPeriod) -> Self {
        self.operating_hours = Some(operating_hours);
        self
    }

    /// Set the location.
    pub fn with_location_reference(mut self, location_reference: LocationReference) -> Self {
        self.location_reference = Some(location_reference);
        self
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: Organisation) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Add a vehicle characteristics set.
    pub fn with_applicable_for_vehicles(mut self, vehicles: VehicleCharacteristics) -> Self {
        self.applicable_for_vehicles.push(vehicles);
        self
    }

    /// Add an accepted means of payment.
    pub fn with_means_of_payment(mut self, means: MeansOfPayment) -> Self {
        self.means_of_payment.push(means);
        self
    }

    /// Add a payment timing.
    pub fn with_payment_timing(mut self, timing: PaymentTiming) -> Self {
        self.payment_timing.push(timing);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Write the facility fields onto an embedding element.
    ///
    /// `id` and `version` become attributes; everything else becomes
    /// children in the `facilities` namespace, in schema order.
    pub fn write_into(&self, element: &mut XmlElement) {
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
        if let Some(name) = &self.name {
            element.push_child(name.to_xml(NS_FACILITIES, "name"));
        }
        if let Some(description) = &self.description {
            element.push_child(description.to_xml(NS_FACILITIES, "description"));
        }
        for accessibility in &self.accessibility {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "accessibility",
                accessibility.as_str(),
            ));
        }
        if let Some(information) = &self.additional_information {
            element.push_child(information.to_xml(NS_FACILITIES, "additionalInformation"));
        }
        if let Some(website) = &self.information_website {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "informationWebsite",
                website.as_str(),
            ));
        }
        for photo_url in &self.photo_url {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "photoUrl",
                photo_url.as_str(),
            ));
        }
        if let Some(operating_hours) = &self.operating_hours {
            element.push_child(operating_hours.to_xml(NS_FACILITIES, "operatingHours"));
        }
        if let Some(location_reference) = &self.location_reference {
            element.push_child(location_reference.to_xml(NS_FACILITIES, "locationReference"));
        }
        if let Some(operator) = &self.operator {
            element.push_child(operator.to_xml(NS_FACILITIES, "operator"));
        }
        for vehicles in &self.applicable_for_vehicles {
            element.push_child(vehicles.to_xml(NS_FACILITIES, "applicableForVehicles"));
        }
        for means in &self.means_of_payment {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "meansOfPayment",
                means.as_str(),
            ));
        }
        for timing in &self.payment_timing {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "paymentTiming",
                timing.as_str(),
            ));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
    }

    /// Encode as a standalone element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local);
        self.write_into(&mut element);
        element
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use datex2_common::{PointCoordinates, PointLocation};

    use super::*;

    #[test]
    fn construction_defaults_are_empty_collections() {
        let facility = Facility::new("F-1");
        assert_eq!(facility.id, "F-1");
        assert!(facility.version.is_none());
        assert!(facility.accessibility.is_empty());
        assert!(facility.photo_url.is_empty());
        assert!(facility.means_of_payment.is_empty());
    }

    #[test]
    fn facility_fields_serialize_inline() {
        let facility = Facility::new("F-1")
            .with_version("3")
            .with_name(MultilingualString::new("Ladepark Mitte"))
            .with_accessibility(Accessibility::BARRIER_FREE_ACCESSIBLE)
            .with_location_reference(LocationReference::Point(PointLocation::new(
                PointCoordinates::new(48.1374, 11.5755),
            )))
            .with_means_of_payment(MeansOfPayment::PAYMENT_CREDIT_CARD);

        let mut element = XmlElement::new(NS_FACILITIES, "facility");
        facility.write_into(&mut element);

        assert_eq!(element.attribute("id"), Some("F-1"));
        assert_eq!(element.attribute("version"), Some("3"));
        assert!(element.child(NS_FACILITIES, "name").is_some());
        assert_eq!(
            element.child(NS_FACILITIES, "accessibility").unwrap().text(),
            "barrierFreeAccessible"
        );
        assert!(element.child(NS_FACILITIES, "locationReference").is_some());
        assert_eq!(
            element.child(NS_FACILITIES, "meansOfPayment").unwrap().text(),
            "paymentCreditCard"
        );
    }

    #[test]
    fn organisation_card_serializes_contact_fields() {
        let operator = Organisation::new()
            .with_name(MultilingualString::new("Stadtwerke"))
            .with_email("kontakt@stadtwerke.example")
            .with_web(Url::new("https://stadtwerke.example"));
        let element = operator.to_xml(NS_FACILITIES, "operator");
        assert_eq!(
            element.child(NS_FACILITIES, "email").unwrap().text(),
            "kontakt@stadtwerke.example"
        );
        assert_eq!(
            element.child(NS_FACILITIES, "web").unwrap().text(),
            "https://stadtwerke.example"
        );
    }

    #[test]
    fn vehicle_characteristics_use_common_namespace_children() {
        let vehicles = VehicleCharacteristics::new()
            .with_fuel_type(FuelType::BATTERY)
            .with_vehicle_type(VehicleType::CAR);
        let element = vehicles.to_xml(NS_FACILITIES, "applicableForVehicles");
        assert_eq!(element.child(NS_COMMON, "fuelType").unwrap().text(), "battery");
        assert_eq!(element.child(NS_COMMON, "vehicleType").unwrap().text(), "car");
    }

    #[test]
    fn dedicated_parking_spaces_serialize_counts() {
        let spaces = DedicatedParkingSpaces::new()
            .with_applicable_for_user(UserType::DISABLED)
            .with_number_of_spaces(4);
        let element = spaces.to_xml(NS_FACILITIES, "dedicatedParkingSpaces");
        assert_eq!(
            element.child(NS_FACILITIES, "numberOfSpaces").unwrap().text(),
            "4"
        );
    }

    #[test]
    fn facility_serde_roundtrip() {
        let facility = Facility::new("F-1").with_name(MultilingualString::new("Ladepark"));
        let json = serde_json::to_string(&facility).unwrap();
        let back: Facility = serde_json::from_str(&json).unwrap();
        assert_eq!(facility, back);
    }
}
