//! Dynamic status model: the live state of sites, stations and refill
//! points, published alongside rate updates.
//!
//! Status types mirror the static model but are parsed far more often
//! than they are built, so every type here decodes as well as encodes.
//! The refill-point hierarchy is flattened the same way as the static
//! one: [`FacilityStatus`] carries the base fields, [`RefillPointStatus`]
//! embeds it, [`ElectricChargingPointStatus`] embeds that and is selected
//! on the wire by its `xsi:type` discriminator.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use datex2_common::{
    local_name, DatexError, ElementReader, Kilowatts, OverallPeriod, Result, Seconds, Volts,
    XmlElement, NS_ENERGY, NS_FACILITIES, NS_XSI,
};
use serde::{Deserialize, Serialize};

use crate::rates::EnergyRateUpdate;
use crate::reference::{
    EnergyInfrastructureSiteVersionedReference, EnergyInfrastructureStationVersionedReference,
    FacilityVersionedReference,
};
use crate::vocabulary::{AvailabilityStatus, OpeningStatus, RefillPointStatusEnum};

// ---------------------------------------------------------------------------
// FacilityStatus
// ---------------------------------------------------------------------------

/// Base fields of every facility-level status record.
///
/// Concrete status types embed this by value; their decoders call
/// [`from_xml`](Self::from_xml) with their own reader and their encoders
/// call [`write_into`](Self::write_into) on the element under
/// construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FacilityStatus {
    /// The static facility this status describes.
    pub facility_reference: FacilityVersionedReference,
    /// When the status last changed.
    pub last_updated: Option<DateTime<FixedOffset>>,
    /// Whether the facility is currently open.
    pub opening_status: Option<OpeningStatus>,
    /// Whether the facility is currently usable.
    pub availability_status: Option<AvailabilityStatus>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl FacilityStatus {
    /// Create a status for the referenced facility.
    pub fn new(facility_reference: FacilityVersionedReference) -> Self {
        Self {
            facility_reference,
            last_updated: None,
            opening_status: None,
            availability_status: None,
            extension: None,
        }
    }

    /// Set the last-updated instant.
    pub fn with_last_updated(mut self, last_updated: DateTime<FixedOffset>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Set the opening status.
    pub fn with_opening_status(mut self, opening_status: OpeningStatus) -> Self {
        self.opening_status = Some(opening_status);
        self
    }

    /// Set the availability status.
    pub fn with_availability_status(mut self, availability_status: AvailabilityStatus) -> Self {
        self.availability_status = Some(availability_status);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode the base fields through a concrete status element's reader.
    ///
    /// # Errors
    ///
    /// Fails when the `reference` child is absent, carries a wrong
    /// `targetClass` or has no `id`, or when a present optional field
    /// does not decode.
    pub fn from_xml(reader: &ElementReader<'_>) -> Result<Self> {
        let facility_reference =
            FacilityVersionedReference::from_xml(reader.mandatory_child(NS_FACILITIES, "reference")?)?;
        let last_updated = reader.optional_parsed(NS_FACILITIES, "lastUpdated")?;
        let opening_status = reader.optional_parsed(NS_FACILITIES, "openingStatus")?;
        let availability_status = reader.optional_parsed(NS_FACILITIES, "availabilityStatus")?;
        let extension = reader.extension("_facilityStatusExtension");
        Ok(Self {
            facility_reference,
            last_updated,
            opening_status,
            availability_status,
            extension,
        })
    }

    /// Write the base fields onto a concrete status element.
    pub fn write_into(&self, element: &mut XmlElement) {
        element.push_child(
            self.facility_reference
                .to_xml(NS_FACILITIES, "reference"),
        );
        if let Some(last_updated) = &self.last_updated {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "lastUpdated",
                &last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(opening_status) = &self.opening_status {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "openingStatus",
                opening_status.as_str(),
            ));
        }
        if let Some(availability_status) = &self.availability_status {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "availabilityStatus",
                availability_status.as_str(),
            ));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// PlannedRefillPointStatus
// ---------------------------------------------------------------------------

/// An announced future state of a refill point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlannedRefillPointStatus {
    /// The state the refill point will enter.
    pub status: RefillPointStatusEnum,
    /// When that state will apply.
    pub period: OverallPeriod,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl PlannedRefillPointStatus {
    /// Create a planned status from its two mandatory parts.
    pub fn new(status: RefillPointStatusEnum, period: OverallPeriod) -> Self {
        Self {
            status,
            period,
            extension: None,
        }
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a `plannedRefillPointStatus` element.
    ///
    /// # Errors
    ///
    /// Fails when `status` or `period` is absent or malformed.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "PlannedRefillPointStatus");
        let status = reader.mandatory_parsed(NS_ENERGY, "status")?;
        let period = OverallPeriod::from_xml(reader.mandatory_child(NS_ENERGY, "period")?)?;
        let extension = reader.extension("_plannedRefillPointStatusExtension");
        Ok(Self {
            status,
            period,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_child(XmlElement::text_element(
                NS_ENERGY,
                "status",
                self.status.as_str(),
            ))
            .with_child(self.period.to_xml(NS_ENERGY, "period"));
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// RefillPointStatus
// ---------------------------------------------------------------------------

/// Status fields shared by every kind of refill point.
///
/// Embedded by the concrete subtypes; see [`AnyRefillPointStatus`] for
/// the wire-level dispatch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RefillPointStatus {
    /// Facility-level base fields.
    pub facility_status: FacilityStatus,
    /// Current state of the refill point.
    pub status: RefillPointStatusEnum,
    /// Announced future states.
    pub planned_refill_point_status: Vec<PlannedRefillPointStatus>,
    /// Current prices of the rates applying at this refill point.
    pub energy_rate_update: Vec<EnergyRateUpdate>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl RefillPointStatus {
    /// Create a status from the base fields and the current state.
    pub fn new(facility_status: FacilityStatus, status: RefillPointStatusEnum) -> Self {
        Self {
            facility_status,
            status,
            planned_refill_point_status: Vec::new(),
            energy_rate_update: Vec::new(),
            extension: None,
        }
    }

    /// Add an announced future state.
    pub fn with_planned_status(mut self, planned: PlannedRefillPointStatus) -> Self {
        self.planned_refill_point_status.push(planned);
        self
    }

    /// Add a rate update.
    pub fn with_energy_rate_update(mut self, update: EnergyRateUpdate) -> Self {
        self.energy_rate_update.push(update);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode the shared fields through a concrete subtype's reader.
    ///
    /// # Errors
    ///
    /// Fails when the base fields fail, when `status` is absent or not a
    /// usable token, or when any planned status or rate update fails.
    pub fn from_xml(reader: &ElementReader<'_>) -> Result<Self> {
        let facility_status = FacilityStatus::from_xml(reader)?;
        let status = reader.mandatory_parsed(NS_ENERGY, "status")?;
        let mut planned_refill_point_status = Vec::new();
        for child in reader.children(NS_ENERGY, "plannedRefillPointStatus") {
            planned_refill_point_status.push(PlannedRefillPointStatus::from_xml(child)?);
        }
        let mut energy_rate_update = Vec::new();
        for child in reader.children(NS_ENERGY, "energyRateUpdate") {
            energy_rate_update.push(EnergyRateUpdate::from_xml(child)?);
        }
        let extension = reader.extension("_refillPointStatusExtension");
        Ok(Self {
            facility_status,
            status,
            planned_refill_point_status,
            energy_rate_update,
            extension,
        })
    }

    /// Write the shared fields onto a concrete subtype element.
    pub fn write_into(&self, element: &mut XmlElement) {
        self.facility_status.write_into(element);
        element.push_child(XmlElement::text_element(
            NS_ENERGY,
            "status",
            self.status.as_str(),
        ));
        for planned in &self.planned_refill_point_status {
            element.push_child(planned.to_xml(NS_ENERGY, "plannedRefillPointStatus"));
        }
        for update in &self.energy_rate_update {
            element.push_child(update.to_xml(NS_ENERGY, "energyRateUpdate"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// ElectricChargingPointStatus
// ---------------------------------------------------------------------------

/// Live state of one electric charging point.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElectricChargingPointStatus {
    /// Refill-point base fields.
    pub refill_point_status: RefillPointStatus,
    /// Remaining time of the charging process in progress.
    pub remaining_charging_time: Option<Seconds>,
    /// Voltage currently delivered.
    pub current_voltage: Option<Volts>,
    /// Power currently delivered.
    pub current_charging_power: Option<Kilowatts>,
    /// Next instant the point is expected to be free.
    pub next_available_charging_slot: Option<DateTime<FixedOffset>>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl ElectricChargingPointStatus {
    /// Create a charging-point status around the shared fields.
    pub fn new(refill_point_status: RefillPointStatus) -> Self {
        Self {
            refill_point_status,
            remaining_charging_time: None,
            current_voltage: None,
            current_charging_power: None,
            next_available_charging_slot: None,
            extension: None,
        }
    }

    /// Set the remaining charging time.
    pub fn with_remaining_charging_time(mut self, remaining: Seconds) -> Self {
        self.remaining_charging_time = Some(remaining);
        self
    }

    /// Set the voltage currently delivered.
    pub fn with_current_voltage(mut self, voltage: Volts) -> Self {
        self.current_voltage = Some(voltage);
        self
    }

    /// Set the power currently delivered.
    pub fn with_current_charging_power(mut self, power: Kilowatts) -> Self {
        self.current_charging_power = Some(power);
        self
    }

    /// Set the next expected free slot.
    pub fn with_next_available_charging_slot(mut self, slot: DateTime<FixedOffset>) -> Self {
        self.next_available_charging_slot = Some(slot);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a `refillPointStatus` element already identified as
    /// this subtype.
    ///
    /// # Errors
    ///
    /// Fails when the embedded refill-point fields fail or when a present
    /// optional field does not decode.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "ElectricChargingPointStatus");
        let refill_point_status = RefillPointStatus::from_xml(&reader)?;
        let remaining_charging_time = reader.optional_parsed(NS_ENERGY, "remainingChargingTime")?;
        let current_voltage = reader.optional_parsed(NS_ENERGY, "currentVoltage")?;
        let current_charging_power = reader.optional_parsed(NS_ENERGY, "currentChargingPower")?;
        let next_available_charging_slot =
            reader.optional_parsed(NS_ENERGY, "nextAvailableChargingSlot")?;
        let extension = reader.extension("_electricChargingPointStatusExtension");
        Ok(Self {
            refill_point_status,
            remaining_charging_time,
            current_voltage,
            current_charging_power,
            next_available_charging_slot,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`, carrying
    /// the subtype discriminator.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local).with_attribute_ns(
            NS_XSI,
            "type",
            "egi:ElectricChargingPointStatus",
        );
        self.refill_point_status.write_into(&mut element);
        if let Some(remaining) = &self.remaining_charging_time {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "remainingChargingTime",
                &remaining.to_string(),
            ));
        }
        if let Some(voltage) = &self.current_voltage {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "currentVoltage",
                &voltage.to_string(),
            ));
        }
        if let Some(power) = &self.current_charging_power {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "currentChargingPower",
                &power.to_string(),
            ));
        }
        if let Some(slot) = &self.next_available_charging_slot {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "nextAvailableChargingSlot",
                &slot.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// AnyRefillPointStatus
// ---------------------------------------------------------------------------

/// A refill-point status of any concrete kind, discriminated by
/// `xsi:type`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnyRefillPointStatus {
    /// An electric charging point.
    ElectricChargingPoint(ElectricChargingPointStatus),
}

impl AnyRefillPointStatus {
    /// Decode from a `refillPointStatus` element, dispatching on the
    /// `xsi:type` discriminator's local name.
    ///
    /// # Errors
    ///
    /// Fails with a missing-field error when `xsi:type` is absent and
    /// with an unknown-subtype error naming the discriminator when it
    /// matches no supported refill-point kind.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "RefillPointStatus");
        let discriminator = reader.mandatory_xsi_type()?;
        match local_name(discriminator) {
            "ElectricChargingPointStatus" => Ok(Self::ElectricChargingPoint(
                ElectricChargingPointStatus::from_xml(element)?,
            )),
            _ => {
                tracing::warn!(
                    class = "RefillPointStatus",
                    discriminator,
                    "rejected unknown xsi:type"
                );
                Err(DatexError::UnknownSubtype {
                    class: "RefillPointStatus",
                    found: discriminator.to_string(),
                })
            }
        }
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        match self {
            Self::ElectricChargingPoint(status) => status.to_xml(namespace, local),
        }
    }
}

// ---------------------------------------------------------------------------
// EnergyInfrastructureStationStatus
// ---------------------------------------------------------------------------

/// Live state of one charging station and its refill points.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureStationStatus {
    /// The static station this status describes.
    pub station_reference: EnergyInfrastructureStationVersionedReference,
    /// When the status last changed.
    pub last_updated: Option<DateTime<FixedOffset>>,
    /// Whether the station as a whole is usable.
    pub is_available: Option<bool>,
    /// Status of each refill point at the station.
    pub refill_point_status: Vec<AnyRefillPointStatus>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureStationStatus {
    /// Create a status for the referenced station.
    pub fn new(station_reference: EnergyInfrastructureStationVersionedReference) -> Self {
        Self {
            station_reference,
            last_updated: None,
            is_available: None,
            refill_point_status: Vec::new(),
            extension: None,
        }
    }

    /// Set the last-updated instant.
    pub fn with_last_updated(mut self, last_updated: DateTime<FixedOffset>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// State whether the station is usable.
    pub fn with_is_available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }

    /// Add a refill-point status.
    pub fn with_refill_point_status(mut self, status: AnyRefillPointStatus) -> Self {
        self.refill_point_status.push(status);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from an `energyInfrastructureStationStatus` element.
    ///
    /// # Errors
    ///
    /// Fails when the `reference` child is absent or invalid or when any
    /// contained refill-point status fails.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "EnergyInfrastructureStationStatus");
        let station_reference = EnergyInfrastructureStationVersionedReference::from_xml(
            reader.mandatory_child(NS_FACILITIES, "reference")?,
        )?;
        let last_updated = reader.optional_parsed(NS_FACILITIES, "lastUpdated")?;
        let is_available = reader.optional_boolean(NS_ENERGY, "isAvailable")?;
        let mut refill_point_status = Vec::new();
        for child in reader.children(NS_ENERGY, "refillPointStatus") {
            refill_point_status.push(AnyRefillPointStatus::from_xml(child)?);
        }
        let extension = reader.extension("_energyInfrastructureStationStatusExtension");
        Ok(Self {
            station_reference,
            last_updated,
            is_available,
            refill_point_status,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local).with_child(
            self.station_reference.to_xml(NS_FACILITIES, "reference"),
        );
        if let Some(last_updated) = &self.last_updated {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "lastUpdated",
                &last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(is_available) = &self.is_available {
            element.push_child(XmlElement::text_element(
                NS_ENERGY,
                "isAvailable",
                if *is_available { "true" } else { "false" },
            ));
        }
        for status in &self.refill_point_status {
            element.push_child(status.to_xml(NS_ENERGY, "refillPointStatus"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// EnergyInfrastructureSiteStatus
// ---------------------------------------------------------------------------

/// Live state of one charging site and its stations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnergyInfrastructureSiteStatus {
    /// The static site this status describes.
    pub site_reference: EnergyInfrastructureSiteVersionedReference,
    /// When the status last changed.
    pub last_updated: Option<DateTime<FixedOffset>>,
    /// Whether the site is currently open.
    pub opening_status: Option<OpeningStatus>,
    /// Status of each station on the site.
    pub station_status: Vec<EnergyInfrastructureStationStatus>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl EnergyInfrastructureSiteStatus {
    /// Create a status for the referenced site.
    pub fn new(site_reference: EnergyInfrastructureSiteVersionedReference) -> Self {
        Self {
            site_reference,
            last_updated: None,
            opening_status: None,
            station_status: Vec::new(),
            extension: None,
        }
    }

    /// Set the last-updated instant.
    pub fn with_last_updated(mut self, last_updated: DateTime<FixedOffset>) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Set the opening status.
    pub fn with_opening_status(mut self, opening_status: OpeningStatus) -> Self {
        self.opening_status = Some(opening_status);
        self
    }

    /// Add a station status.
    pub fn with_station_status(mut self, status: EnergyInfrastructureStationStatus) -> Self {
        self.station_status.push(status);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from an `energyInfrastructureSiteStatus` element.
    ///
    /// # Errors
    ///
    /// Fails when the `reference` child is absent or invalid or when any
    /// contained station status fails.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "EnergyInfrastructureSiteStatus");
        let site_reference = EnergyInfrastructureSiteVersionedReference::from_xml(
            reader.mandatory_child(NS_FACILITIES, "reference")?,
        )?;
        let last_updated = reader.optional_parsed(NS_FACILITIES, "lastUpdated")?;
        let opening_status = reader.optional_parsed(NS_FACILITIES, "openingStatus")?;
        let mut station_status = Vec::new();
        for child in reader.children(NS_ENERGY, "energyInfrastructureStationStatus") {
            station_status.push(EnergyInfrastructureStationStatus::from_xml(child)?);
        }
        let extension = reader.extension("_energyInfrastructureSiteStatusExtension");
        Ok(Self {
            site_reference,
            last_updated,
            opening_status,
            station_status,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_child(self.site_reference.to_xml(NS_FACILITIES, "reference"));
        if let Some(last_updated) = &self.last_updated {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "lastUpdated",
                &last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(opening_status) = &self.opening_status {
            element.push_child(XmlElement::text_element(
                NS_FACILITIES,
                "openingStatus",
                opening_status.as_str(),
            ));
        }
        for status in &self.station_status {
            element.push_child(status.to_xml(NS_ENERGY, "energyInfrastructureStationStatus"));
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
