//! Parsing a complete status-publication document, and the error
//! reporting for corrupted variants of it.

use datex2_common::{AmountOfMoney, DatexError, Day, Seconds, XmlElement};
use datex2_energy::{
    AnyRefillPointStatus, EnergyInfrastructureStatusPublication, EnergyRateUpdate, OpeningStatus,
    RefillPointStatusEnum,
};
use rust_decimal_macros::dec;

const MINIMAL_VALID_XML: &str = r#"<egi:energyInfrastructureStatusPublication
    xmlns:egi="http://datex2.eu/schema/3/energyInfrastructure"
    xmlns:com="http://datex2.eu/schema/3/common"
    xmlns:fac="http://datex2.eu/schema/3/facilities"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    lang="de">
  <com:publicationTime>2025-02-02T12:50:00+01:00</com:publicationTime>
  <com:publicationCreator>
    <com:country>DE</com:country>
    <com:nationalIdentifier>NAP-DE-0042</com:nationalIdentifier>
  </com:publicationCreator>
  <egi:headerInformation>
    <com:confidentiality>noRestriction</com:confidentiality>
    <com:informationStatus>real</com:informationStatus>
  </egi:headerInformation>
  <egi:tableReference id="TBL-1" version="7" targetClass="egi:EnergyInfrastructureTable"/>
  <egi:energyInfrastructureSiteStatus>
    <fac:reference id="SITE-1" version="2" targetClass="egi:EnergyInfrastructureSite"/>
    <fac:openingStatus>open</fac:openingStatus>
    <egi:energyInfrastructureStationStatus>
      <fac:reference id="ST-1" targetClass="egi:EnergyInfrastructureStation"/>
      <egi:isAvailable>true</egi:isAvailable>
      <egi:refillPointStatus xsi:type="egi:ElectricChargingPointStatus">
        <fac:reference id="CP-1" version="3" targetClass="fac:Facility"/>
        <fac:lastUpdated>2025-02-02T12:45:00+01:00</fac:lastUpdated>
        <egi:status>charging</egi:status>
        <egi:energyRateUpdate>
          <egi:lastUpdated>2025-02-02T12:50:00+01:00</egi:lastUpdated>
          <egi:energyRateReference id="74034E3E-9D2F-4410-BE6F-CAA3176D69B4" targetClass="egi:EnergyRate"/>
          <egi:energyPrice>
            <egi:priceType>pricePerKWh</egi:priceType>
            <egi:value>0.37</egi:value>
          </egi:energyPrice>
        </egi:energyRateUpdate>
        <egi:remainingChargingTime>900</egi:remainingChargingTime>
      </egi:refillPointStatus>
    </egi:energyInfrastructureStationStatus>
  </egi:energyInfrastructureSiteStatus>
</egi:energyInfrastructureStatusPublication>"#;

fn parse_failure(document: &str) -> DatexError {
    EnergyInfrastructureStatusPublication::from_document(document).unwrap_err()
}

#[test]
fn minimal_document_parses_completely() {
    let publication =
        EnergyInfrastructureStatusPublication::from_document(MINIMAL_VALID_XML).unwrap();

    assert_eq!(publication.payload.lang, "de");
    assert_eq!(publication.payload.publication_creator.country, "DE");
    assert_eq!(publication.table_reference.len(), 1);
    assert_eq!(publication.table_reference[0].id, "TBL-1");
    assert_eq!(publication.table_reference[0].version.as_deref(), Some("7"));

    let site = &publication.site_status[0];
    assert_eq!(site.site_reference.id, "SITE-1");
    assert_eq!(site.opening_status, Some(OpeningStatus::OPEN));

    let station = &site.station_status[0];
    assert_eq!(station.station_reference.id, "ST-1");
    assert_eq!(station.is_available, Some(true));

    let point = match &station.refill_point_status[0] {
        AnyRefillPointStatus::ElectricChargingPoint(point) => point,
        other => panic!("unexpected refill point kind: {other:?}"),
    };
    assert_eq!(
        point.refill_point_status.status,
        RefillPointStatusEnum::CHARGING
    );
    assert_eq!(
        point.refill_point_status.facility_status.facility_reference.id,
        "CP-1"
    );
    assert_eq!(point.remaining_charging_time, Some(Seconds(900)));

    let update = &point.refill_point_status.energy_rate_update[0];
    assert_eq!(
        update.energy_rate_reference.id,
        "74034E3E-9D2F-4410-BE6F-CAA3176D69B4"
    );
    assert_eq!(update.energy_price[0].value, AmountOfMoney::new(dec!(0.37)));
}

#[test]
fn parsing_the_same_document_twice_is_field_wise_equal() {
    let first = EnergyInfrastructureStatusPublication::from_document(MINIMAL_VALID_XML).unwrap();
    let second = EnergyInfrastructureStatusPublication::from_document(MINIMAL_VALID_XML).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_publication_time_names_the_field() {
    let document = MINIMAL_VALID_XML.replace(
        "<com:publicationTime>2025-02-02T12:50:00+01:00</com:publicationTime>",
        "",
    );
    assert_eq!(
        parse_failure(&document),
        DatexError::MissingField {
            class: "EnergyInfrastructureStatusPublication",
            field: "publicationTime",
        }
    );
}

#[test]
fn missing_refill_point_state_names_the_field() {
    let document = MINIMAL_VALID_XML.replace("<egi:status>charging</egi:status>", "");
    assert_eq!(
        parse_failure(&document),
        DatexError::MissingField {
            class: "ElectricChargingPointStatus",
            field: "status",
        }
    );
}

#[test]
fn wrong_target_class_is_rejected_with_a_message() {
    let document =
        MINIMAL_VALID_XML.replace("targetClass=\"egi:EnergyRate\"", "targetClass=\"wrong:Type\"");
    let err = parse_failure(&document);
    assert!(err.to_string().contains("Invalid target class"));
}

#[test]
fn unknown_refill_point_subtype_names_the_discriminator() {
    let document = MINIMAL_VALID_XML.replace(
        "xsi:type=\"egi:ElectricChargingPointStatus\"",
        "xsi:type=\"egi:HydrogenRefillPointStatus\"",
    );
    assert_eq!(
        parse_failure(&document),
        DatexError::UnknownSubtype {
            class: "RefillPointStatus",
            found: "egi:HydrogenRefillPointStatus".to_string(),
        }
    );
}

#[test]
fn missing_subtype_discriminator_is_reported() {
    let document =
        MINIMAL_VALID_XML.replace(" xsi:type=\"egi:ElectricChargingPointStatus\"", "");
    assert_eq!(
        parse_failure(&document),
        DatexError::MissingField {
            class: "RefillPointStatus",
            field: "xsi:type",
        }
    );
}

#[test]
fn malformed_optional_field_fails_hard() {
    let document = MINIMAL_VALID_XML.replace(
        "<egi:isAvailable>true</egi:isAvailable>",
        "<egi:isAvailable>maybe</egi:isAvailable>",
    );
    assert!(matches!(
        parse_failure(&document),
        DatexError::InvalidField {
            class: "EnergyInfrastructureStationStatus",
            field: "isAvailable",
            ..
        }
    ));
}

#[test]
fn empty_optional_field_fails_hard() {
    let document = MINIMAL_VALID_XML.replace(
        "<fac:openingStatus>open</fac:openingStatus>",
        "<fac:openingStatus></fac:openingStatus>",
    );
    assert!(matches!(
        parse_failure(&document),
        DatexError::InvalidField {
            class: "EnergyInfrastructureSiteStatus",
            field: "openingStatus",
            ..
        }
    ));
}

#[test]
fn rate_update_fragment_parses_without_namespace_declarations() {
    // Rate updates are also exchanged as bare fragments without xmlns
    // declarations; unqualified elements match any sub-schema namespace.
    let fragment = "<energyRateUpdate>\
<lastUpdated>2025-02-02T12:50:00+01:00</lastUpdated>\
<energyRateReference id=\"74034E3E-9D2F-4410-BE6F-CAA3176D69B4\" targetClass=\"egi:EnergyRate\"/>\
<energyPrice><priceType>pricePerKWh</priceType><value>0.37</value></energyPrice>\
</energyRateUpdate>";
    let element = XmlElement::parse_document(fragment).unwrap();
    let update = EnergyRateUpdate::from_xml(&element).unwrap();
    assert_eq!(
        update.energy_rate_reference.id,
        "74034E3E-9D2F-4410-BE6F-CAA3176D69B4"
    );
    assert_eq!(update.energy_price[0].value, AmountOfMoney::new(dec!(0.37)));
}

#[test]
fn day_tokens_parse_case_insensitively() {
    assert_eq!(Day::parse("Monday").unwrap(), Day::parse("monday").unwrap());
    assert_eq!(Day::parse("Monday").unwrap(), Day::MONDAY);
}
