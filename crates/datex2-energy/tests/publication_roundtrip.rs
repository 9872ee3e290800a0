//! Building publications programmatically, serializing them to documents
//! and parsing the status feed back.

use chrono::DateTime;
use datex2_common::{
    AmountOfMoney, Confidentiality, HeaderInformation, InformationStatus,
    InternationalIdentifier, Kilowatts, LocationReference, MultilingualString, OverallPeriod,
    PayloadPublication, PointCoordinates, PointLocation, Seconds, XmlElement, NS_COMMON,
};
use datex2_energy::{
    AnyRefillPoint, AnyRefillPointStatus, Connector, ConnectorType, ElectricChargingPoint,
    ElectricChargingPointStatus, EnergyInfrastructureSite, EnergyInfrastructureSiteStatus,
    EnergyInfrastructureSiteVersionedReference, EnergyInfrastructureStation,
    EnergyInfrastructureStationStatus, EnergyInfrastructureStationVersionedReference,
    EnergyInfrastructureStatusPublication, EnergyInfrastructureTable,
    EnergyInfrastructureTablePublication, EnergyInfrastructureTableVersionedReference,
    EnergyPrice, EnergyRateReference, EnergyRateUpdate, Facility, FacilityStatus,
    FacilityVersionedReference, PlannedRefillPointStatus, PriceType, RefillPoint,
    RefillPointStatus, RefillPointStatusEnum,
};
use rust_decimal_macros::dec;

fn payload() -> PayloadPublication {
    PayloadPublication::new(
        DateTime::parse_from_rfc3339("2025-02-02T12:50:00+01:00").unwrap(),
        "de",
        InternationalIdentifier::new("DE", "NAP-DE-0042"),
    )
}

#[test]
fn table_publication_serializes_structural_landmarks() {
    let publication = EnergyInfrastructureTablePublication::new(payload())
        .with_header_information(
            HeaderInformation::new(InformationStatus::REAL)
                .with_confidentiality(Confidentiality::NO_RESTRICTION),
        )
        .with_energy_infrastructure_table(
            EnergyInfrastructureTable::new("TBL-1")
                .with_version("7")
                .with_table_name(MultilingualString::new("Municipal charging sites"))
                .with_energy_infrastructure_site(
                    EnergyInfrastructureSite::new(
                        Facility::new("SITE-1")
                            .with_name(MultilingualString::new("Ladepark Mitte"))
                            .with_location_reference(LocationReference::Point(
                                PointLocation::new(PointCoordinates::new(48.1374, 11.5755)),
                            )),
                    )
                    .with_energy_infrastructure_station(
                        EnergyInfrastructureStation::new(Facility::new("ST-1")).with_refill_point(
                            AnyRefillPoint::ElectricChargingPoint(
                                ElectricChargingPoint::new(RefillPoint::new(Facility::new("CP-1")))
                                    .with_evse_id("DE*STW*E000001")
                                    .with_connector(Connector::new(
                                        ConnectorType::IEC62196_T2,
                                        Kilowatts(dec!(22)),
                                    )),
                            ),
                        ),
                    ),
                ),
        );

    let document = publication.to_document().unwrap();

    assert!(document.contains("<egi:energyInfrastructureTablePublication"));
    assert!(document.contains("xmlns:egi=\"http://datex2.eu/schema/3/energyInfrastructure\""));
    assert!(document.contains("xmlns:com=\"http://datex2.eu/schema/3/common\""));
    assert!(document.contains("xmlns:fac=\"http://datex2.eu/schema/3/facilities\""));
    assert!(document.contains("xmlns:loc=\"http://datex2.eu/schema/3/locationReferencing\""));
    assert!(document.contains("lang=\"de\""));
    assert!(document.contains("<com:publicationTime>2025-02-02T12:50:00+01:00</com:publicationTime>"));
    assert!(document.contains("<egi:energyInfrastructureTable id=\"TBL-1\" version=\"7\">"));
    assert!(document.contains("<egi:energyInfrastructureSite id=\"SITE-1\">"));
    assert!(document.contains("<com:value>Ladepark Mitte</com:value>"));
    assert!(document.contains("<loc:latitude>48.1374</loc:latitude>"));
    assert!(document.contains("<egi:refillPoint xsi:type=\"egi:ElectricChargingPoint\" id=\"CP-1\">"));
    assert!(document.contains("<egi:evseId>DE*STW*E000001</egi:evseId>"));
    assert!(document.contains("<egi:connectorType>iec62196T2</egi:connectorType>"));
    assert!(document.contains("<egi:maxPowerAtSocket>22</egi:maxPowerAtSocket>"));
}

#[test]
fn namespace_declarations_appear_once_on_the_root() {
    let publication = EnergyInfrastructureTablePublication::new(payload())
        .with_energy_infrastructure_table(
            EnergyInfrastructureTable::new("TBL-1").with_energy_infrastructure_site(
                EnergyInfrastructureSite::new(
                    Facility::new("SITE-1").with_name(MultilingualString::new("Ladepark")),
                ),
            ),
        );

    let document = publication.to_document().unwrap();
    assert_eq!(document.matches("xmlns:egi=").count(), 1);
    assert_eq!(document.matches("xmlns:com=").count(), 1);
    assert_eq!(document.matches("xmlns:fac=").count(), 1);
}

#[test]
fn status_publication_reparses_field_wise_equal() {
    let last_updated = DateTime::parse_from_rfc3339("2025-02-02T12:45:00+01:00").unwrap();
    let charging_point = ElectricChargingPointStatus::new(
        RefillPointStatus::new(
            FacilityStatus::new(FacilityVersionedReference::new("CP-1").with_version("3"))
                .with_last_updated(last_updated),
            RefillPointStatusEnum::CHARGING,
        )
        .with_planned_status(PlannedRefillPointStatus::new(
            RefillPointStatusEnum::UNAVAILABLE,
            OverallPeriod::new(
                DateTime::parse_from_rfc3339("2025-03-01T00:00:00+01:00").unwrap(),
            )
            .with_overall_ending(
                DateTime::parse_from_rfc3339("2025-03-07T23:59:00+01:00").unwrap(),
            ),
        ))
        .with_energy_rate_update(
            EnergyRateUpdate::new(
                DateTime::parse_from_rfc3339("2025-02-02T12:50:00+01:00").unwrap(),
                EnergyRateReference::new("74034E3E-9D2F-4410-BE6F-CAA3176D69B4"),
            )
            .with_energy_price(
                EnergyPrice::new(PriceType::PRICE_PER_KWH, AmountOfMoney::new(dec!(0.37)))
                    .with_tax_included(true),
            ),
        ),
    )
    .with_remaining_charging_time(Seconds(900))
    .with_next_available_charging_slot(
        DateTime::parse_from_rfc3339("2025-02-02T13:05:00+01:00").unwrap(),
    );

    let publication = EnergyInfrastructureStatusPublication::new(payload())
        .with_header_information(HeaderInformation::new(InformationStatus::TEST))
        .with_table_reference(
            EnergyInfrastructureTableVersionedReference::new("TBL-1").with_version("7"),
        )
        .with_site_status(
            EnergyInfrastructureSiteStatus::new(EnergyInfrastructureSiteVersionedReference::new(
                "SITE-1",
            ))
            .with_station_status(
                EnergyInfrastructureStationStatus::new(
                    EnergyInfrastructureStationVersionedReference::new("ST-1"),
                )
                .with_is_available(true)
                .with_refill_point_status(AnyRefillPointStatus::ElectricChargingPoint(
                    charging_point,
                )),
            ),
        )
        .with_extension(
            XmlElement::new(NS_COMMON, "_energyInfrastructureStatusPublicationExtension")
                .with_child(XmlElement::text_element(
                    "urn:example:chargepark",
                    "feedRevision",
                    "42",
                )),
        );

    let document = publication.to_document().unwrap();
    let reparsed = EnergyInfrastructureStatusPublication::from_document(&document).unwrap();
    assert_eq!(publication, reparsed);

    let again = EnergyInfrastructureStatusPublication::from_document(&document).unwrap();
    assert_eq!(reparsed, again);
}

#[test]
fn status_document_declares_extension_namespaces_on_the_root() {
    let publication = EnergyInfrastructureStatusPublication::new(payload()).with_extension(
        XmlElement::new(NS_COMMON, "_energyInfrastructureStatusPublicationExtension").with_child(
            XmlElement::text_element("urn:example:chargepark", "feedRevision", "42"),
        ),
    );

    let document = publication.to_document().unwrap();
    assert!(document.contains("xmlns:ext0=\"urn:example:chargepark\""));
    assert!(document.contains("<ext0:feedRevision>42</ext0:feedRevision>"));
}
