//! Static energy infrastructure from the DATEX II `energyInfrastructure`
//! schema: tables of sites, their stations, refill points and connectors.
//!
//! The static model is construct-and-serialize. Entities derived from
//! `Facility` (and from `RefillPoint` below it) embed their base struct by
//! value and serialize the inherited fields inline, with the subtype named
//! by `xsi:type` where the schema uses the abstract element.

use datex2_common::{
    Amperes, KilowattHours, Kilowatts, MultilingualString, Volts, XmlAttribute, XmlElement,
    XmlName, NS_ENERGY, NS_XSI,
};
use serde::{Deserialize, Serialize};

use crate::facility::{DedicatedParkingSpaces, Facility, Organisation};
use crate::vocabulary::{
    AuthenticationAndIdentification, ChargingMode, ConnectorFormat, ConnectorType,
};

// ---------------------------------------------------------------------------
// Connector
// ---------------------------------------------------------------------------

/// One physical connector of a charging point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Connector {
    /// Connector standard.
    pub connector_type: ConnectorType,
    /// Maximum power deliverable at this connector.
    pub max_power_at_socket: Kilowatts,
    /// Cable or socket.
    pub connector_format: Option<ConnectorFormat>,
    /// IEC 61851-1 charging mode.
    pub charging_mode: Option<ChargingMode>,
    /// Rated current.
    pub rated_current: Option<Amperes>,
    /// Nominal voltage.
    pub voltage: Option<Volts>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl Connector {
    /// Create a connector from its mandatory type and maximum power.
    pub fn new(connector_type: ConnectorType, max_power_at_socket: Kilowatts) -> Self {
        Self {
            connector_type,
            max_power_at_socket,
            connector_format: None,
            charging_mode: None,
            rated_current: None,
            voltage: None,
            extension: None,
        }
    }

    /// Set the connector format.
    pub fn with_connector_format(mut self, connector_format: ConnectorFormat) -> Self {
        self.connector_format = Some(connector_format);
        self
    }

    /// Set the charging mode.
    pub fn with_charging_mode(mut self, charging_mode: ChargingMode) -> Self {
        self.charging_mode = Some(charging_mode);
        self
    }

    /// Set the rated current.
    pub fn with_rated_current(mut self, rated_current: Amperes) -> Self {
        self.rated_current = Some(rated_current);
        self
    }

    /// Set the nominal voltage.
    pub fn with_voltage(mut self, voltage: Volts) -> Self {
        self.voltage = Some(voltage);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local).with_child(
            XmlElement::text_element(NS_ENERGY, "connectorType", self.connector_type.as_str()),
        );
        if let Some(connector_format) = &self.connector_format {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "connectorFormat",
                connector_format.as_str(),
            ));
        }
        if let Some(charging_mode) = &self.charging_mode {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "chargingMode",
                charging_mode.as_str(),
            ));
        }
        if let Some(rated_current) = &self.rated_current {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "ratedCurrent",
                &rated_current.to_string(),
            ));
        }
        if let Some(voltage) = &self.voltage {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "voltage",
                &voltage.to_string(),
            ));
        }
        element.push_child(XmlElement::text_element(
            NS_ENERGY,
            "maxPowerAtSocket",
            &self.max_power_at_socket.to_string(),
        ));
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// RefillPoint
// ---------------------------------------------------------------------------

/// Base fields of a single-vehicle energy delivery point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefillPoint {
    /// Embedded facility base fields.
    pub facility: Facility,
    /// Smallest amount deliverable in one session.
    pub minimum_delivery_amount: Option<KilowattHours>,
    /// Largest amount deliverable in one session.
    pub maximum_delivery_amount: Option<KilowattHours>,
    /// Manufacturer model designation.
    pub model_type: Option<MultilingualString>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl RefillPoint {
    /// Create refill point base fields around a facility.
    pub fn new(facility: Facility) -> Self {
        Self {
            facility,
            minimum_delivery_amount: None,
            maximum_delivery_amount: None,
            model_type: None,
            extension: None,
        }
    }

    /// Set the minimum delivery amount.
    pub fn with_minimum_delivery_amount(mut self, amount: KilowattHours) -> Self {
        self.minimum_delivery_amount = Some(amount);
        self
    }

    /// Set the maximum delivery amount.
    pub fn with_maximum_delivery_amount(mut self, amount: KilowattHours) -> Self {
        self.maximum_delivery_amount = Some(amount);
        self
    }

    /// Set the model designation.
    pub fn with_model_type(mut self, model_type: MultilingualString) -> Self {
        self.model_type = Some(model_type);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Write the refill point fields onto an embedding element.
    pub fn write_into(&self, element: &mut XmlElement) {
        self.facility.write_into(element);
        if let Some(amount) = &self.minimum_delivery_amount {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "minimumDeliveryAmount",
                &amount.to_string(),
            ));
        }
        if let Some(amount) = &self.maximum_delivery_amount {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "maximumDeliveryAmount",
                &amount.to_string(),
            ));
        }
        if let Some(model_type) = &self.model_type {
            element.push_child(model_type.to_xml(NS_ENERGY, "modelType"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// ElectricChargingPoint
// ---------------------------------------------------------------------------

/// A refill point delivering electric energy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElectricChargingPoint {
    /// Embedded refill point base fields.
    pub refill_point: RefillPoint,
    /// EVSE identifier per ISO 15118.
    pub evse_id: Option<String>,
    /// Voltage available at the charging point.
    pub available_voltage: Option<Volts>,
    /// Charging power available at the charging point.
    pub available_charging_power: Option<Kilowatts>,
    /// Connectors of the charging point.
    pub connector: Vec<Connector>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl ElectricChargingPoint {
    /// Create a charging point around refill point base fields.
    pub fn new(refill_point: RefillPoint) -> Self {
        Self {
            refill_point,
            evse_id: None,
            available_voltage: None,
            available_charging_power: None,
            connector: Vec::new(),
            extension: None,
        }
    }

    /// Set the EVSE identifier.
    pub fn with_evse_id(mut self, evse_id: &str) -> Self {
        self.evse_id = Some(evse_id.to_string());
        self
    }

    /// Set the available voltage.
    pub fn with_available_voltage(mut self, voltage: Volts) -> Self {
        self.available_voltage = Some(voltage);
        self
    }

    /// Set the available charging power.
    pub fn with_available_charging_power(mut self, power: Kilowatts) -> Self {
        self.available_charging_power = Some(power);
        self
    }

    /// Add a connector.
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector.push(connector);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Encode as a field element named `local` in `namespace`, carrying
    /// its `xsi:type` discriminator.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_attribute_ns(NS_XSI, "type", "egi:ElectricChargingPoint");
        self.refill_point.write_into(&mut element);
        if let Some(evse_id) = &self.evse_id {
            element.push_child(XmlElement::text_element(NS_ENERGY, "evseId", evse_id));
        }
        if let Some(voltage) = &self.available_voltage {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "availableVoltage",
                &voltage.to_string(),
            ));
        }
        if let Some(power) = &self.available_charging_power {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "availableChargingPower",
                &power.to_string(),
            ));
        }
        for connector in &self.connector {
            element.push_child(connector.to_xml(NS_ENERGY, "connector"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// AnyRefillPoint
// ---------------------------------------------------------------------------

/// A concrete refill point subtype, named by `xsi:type` on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnyRefillPoint {
    /// An electric charging point.
    ElectricChargingPoint(ElectricChargingPoint),
}

impl AnyRefillPoint {
    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        match self {
            Self::ElectricChargingPoint(point) => point.to_xml(namespace, local),
        }
    }
}

// ---------------------------------------------------------------------------
// EnergyInfrastructureStation
// ---------------------------------------------------------------------------

/// A piece of equipment offering one or more refill points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureStation {
    /// Embedded facility base fields.
    pub facility: Facility,
    /// Supported authentication and identification methods.
    pub authentication_and_identification_methods: Vec<AuthenticationAndIdentification>,
    /// Provider of the delivered energy.
    pub energy_provider: Option<Organisation>,
    /// Refill points of the station.
    pub refill_point: Vec<AnyRefillPoint>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureStation {
    /// Create a station around a facility.
    pub fn new(facility: Facility) -> Self {
        Self {
            facility,
            authentication_and_identification_methods: Vec::new(),
            energy_provider: None,
            refill_point: Vec::new(),
            extension: None,
        }
    }

    /// Add an authentication method.
    pub fn with_authentication_and_identification(
        mut self,
        method: AuthenticationAndIdentification,
    ) -> Self {
        self.authentication_and_identification_methods.push(method);
        self
    }

    /// Set the energy provider.
    pub fn with_energy_provider(mut self, energy_provider: Organisation) -> Self {
        self.energy_provider = Some(energy_provider);
        self
    }

    /// Add a refill point.
    pub fn with_refill_point(mut self, refill_point: AnyRefillPoint) -> Self {
        self.refill_point.push(refill_point);
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
        self.facility.write_into(&mut element);
        for method in &self.authentication_and_identification_methods {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "authenticationAndIdentificationMethods",
                method.as_str(),
            ));
        }
        if let Some(energy_provider) = &self.energy_provider {
            element.push_child(energy_provider.to_xml(NS_ENERGY, "energyProvider"));
        }
        for refill_point in &self.refill_point {
            element.push_child(refill_point.to_xml(NS_ENERGY, "refillPoint"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// EnergyInfrastructureSite
// ---------------------------------------------------------------------------

/// A physical site hosting one or more stations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureSite {
    /// Embedded facility base fields.
    pub facility: Facility,
    /// Brand the site is operated under.
    pub brand: Option<MultilingualString>,
    /// Parking spaces dedicated to user groups.
    pub dedicated_parking_spaces: Vec<DedicatedParkingSpaces>,
    /// Stations on the site.
    pub energy_infrastructure_station: Vec<EnergyInfrastructureStation>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureSite {
    /// Create a site around a facility.
    pub fn new(facility: Facility) -> Self {
        Self {
            facility,
            brand: None,
            dedicated_parking_spaces: Vec::new(),
            energy_infrastructure_station: Vec::new(),
            extension: None,
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: MultilingualString) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Add dedicated parking spaces.
    pub fn with_dedicated_parking_spaces(mut self, spaces: DedicatedParkingSpaces) -> Self {
        self.dedicated_parking_spaces.push(spaces);
        self
    }

    /// Add a station.
    pub fn with_energy_infrastructure_station(
        mut self,
        station: EnergyInfrastructureStation,
    ) -> Self {
        self.energy_infrastructure_station.push(station);
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
        self.facility.write_into(&mut element);
        if let Some(brand) = &self.brand {
            element.push_child(brand.to_xml(NS_ENERGY, "brand"));
        }
        for spaces in &self.dedicated_parking_spaces {
            element.push_child(spaces.to_xml(NS_ENERGY, "dedicatedParkingSpaces"));
        }
        for station in &self.energy_infrastructure_station {
            element.push_child(station.to_xml(NS_ENERGY, "energyInfrastructureStation"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// EnergyInfrastructureTable
// ---------------------------------------------------------------------------

/// A versioned collection of energy infrastructure sites.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureTable {
    /// Identifier of the table, opaque to this library.
    pub id: String,
    /// Version of the table.
    pub version: Option<String>,
    /// Human-readable table name.
    pub table_name: Option<MultilingualString>,
    /// Sites listed in the table.
    pub energy_infrastructure_site: Vec<EnergyInfrastructureSite>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureTable {
    /// Create a table with the given identifier.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version: None,
            table_name: None,
            energy_infrastructure_site: Vec::new(),
            extension: None,
        }
    }

    /// Set the table version.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Set the table name.
    pub fn with_table_name(mut self, table_name: MultilingualString) -> Self {
        self.table_name = Some(table_name);
        self
    }

    /// Add a site.
    pub fn with_energy_infrastructure_site(mut self, site: EnergyInfrastructureSite) -> Self {
        self.energy_infrastructure_site.push(site);
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
        if let Some(table_name) = &self.table_name {
            element.push_child(table_name.to_xml(NS_ENERGY, "tableName"));
        }
        for site in &self.energy_infrastructure_site {
            element.push_child(site.to_xml(NS_ENERGY, "energyInfrastructureSite"));
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
