//! Enumerated string vocabularies of the DATEX II `common` schema.
//!
//! Each type below is declared with [`token_type!`](crate::token_type) and
//! carries the well-known literals of the corresponding schema enumeration
//! as named constants. The enumerations are open-world: parsing an
//! unlisted value registers it as an extension token instead of failing.

use crate::token_type;

// ---------------------------------------------------------------------------
// Confidentiality
// ---------------------------------------------------------------------------

token_type! {
    /// Who a piece of published information may be shared with.
    pub struct Confidentiality, "ConfidentialityValueEnum" {
        /// For internal use of the recipient organisation only.
        INTERNAL_USE => "internalUse",
        /// May be published freely.
        NO_RESTRICTION => "noRestriction",
        /// Restricted to authorities.
        RESTRICTED_TO_AUTHORITIES => "restrictedToAuthorities",
        /// Restricted to authorities and traffic operators.
        RESTRICTED_TO_AUTHORITIES_AND_TRAFFIC_OPERATORS =>
            "restrictedToAuthoritiesAndTrafficOperators",
        /// Restricted to authorities, traffic operators and publishers.
        RESTRICTED_TO_AUTHORITIES_TRAFFIC_OPERATORS_AND_PUBLISHERS =>
            "restrictedToAuthoritiesTrafficOperatorsAndPublishers",
    }
}

// ---------------------------------------------------------------------------
// InformationStatus
// ---------------------------------------------------------------------------

token_type! {
    /// Whether published information is real or part of an exercise.
    pub struct InformationStatus, "InformationStatusEnum" {
        /// Real live information.
        REAL => "real",
        /// Part of a security-related exercise.
        SECURITY_EXERCISE => "securityExercise",
        /// Part of a technical exercise.
        TECHNICAL_EXERCISE => "technicalExercise",
        /// Test data, not to be acted upon.
        TEST => "test",
    }
}

// ---------------------------------------------------------------------------
// Day
// ---------------------------------------------------------------------------

token_type! {
    /// A day of the week.
    pub struct Day, "DayEnum" {
        /// Monday.
        MONDAY => "monday",
        /// Tuesday.
        TUESDAY => "tuesday",
        /// Wednesday.
        WEDNESDAY => "wednesday",
        /// Thursday.
        THURSDAY => "thursday",
        /// Friday.
        FRIDAY => "friday",
        /// Saturday.
        SATURDAY => "saturday",
        /// Sunday.
        SUNDAY => "sunday",
    }
}

// ---------------------------------------------------------------------------
// MonthOfYear
// ---------------------------------------------------------------------------

token_type! {
    /// A month of the year.
    pub struct MonthOfYear, "MonthOfYearEnum" {
        /// January.
        JANUARY => "january",
        /// February.
        FEBRUARY => "february",
        /// March.
        MARCH => "march",
        /// April.
        APRIL => "april",
        /// May.
        MAY => "may",
        /// June.
        JUNE => "june",
        /// July.
        JULY => "july",
        /// August.
        AUGUST => "august",
        /// September.
        SEPTEMBER => "september",
        /// October.
        OCTOBER => "october",
        /// November.
        NOVEMBER => "november",
        /// December.
        DECEMBER => "december",
    }
}

// ---------------------------------------------------------------------------
// FuelType
// ---------------------------------------------------------------------------

token_type! {
    /// The fuel a vehicle runs on.
    pub struct FuelType, "FuelTypeEnum" {
        /// Battery electric.
        BATTERY => "battery",
        /// Biodiesel.
        BIODIESEL => "biodiesel",
        /// Diesel.
        DIESEL => "diesel",
        /// Diesel plug-in or full hybrid.
        DIESEL_BATTERY_HYBRID => "dieselBatteryHybrid",
        /// Ethanol.
        ETHANOL => "ethanol",
        /// Hydrogen.
        HYDROGEN => "hydrogen",
        /// Liquid gas of any kind.
        LIQUID_GAS => "liquidGas",
        /// Liquid petroleum gas.
        LPG => "lpg",
        /// Methane gas.
        METHANE => "methane",
        /// Petrol.
        PETROL => "petrol",
        /// Petrol, 95 octane.
        PETROL_95_OCTANE => "petrol95Octane",
        /// Petrol, 98 octane.
        PETROL_98_OCTANE => "petrol98Octane",
        /// Petrol plug-in or full hybrid.
        PETROL_BATTERY_HYBRID => "petrolBatteryHybrid",
        /// Unleaded petrol.
        UNLEADED => "unleaded",
        /// Some other fuel type.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// VehicleType
// ---------------------------------------------------------------------------

token_type! {
    /// The kind of vehicle a statement applies to.
    pub struct VehicleType, "VehicleTypeEnum" {
        /// Any vehicle.
        ANY_VEHICLE => "anyVehicle",
        /// Bicycle.
        BICYCLE => "bicycle",
        /// Bus.
        BUS => "bus",
        /// Passenger car.
        CAR => "car",
        /// Caravan.
        CARAVAN => "caravan",
        /// Car towing a caravan.
        CAR_WITH_CARAVAN => "carWithCaravan",
        /// Car towing a trailer.
        CAR_WITH_TRAILER => "carWithTrailer",
        /// Heavy goods vehicle.
        HEAVY_GOODS_VEHICLE => "heavyGoodsVehicle",
        /// Light commercial vehicle.
        LIGHT_COMMERCIAL_VEHICLE => "lightCommercialVehicle",
        /// Lorry of any kind.
        LORRY => "lorry",
        /// Moped.
        MOPED => "moped",
        /// Motorcycle.
        MOTORCYCLE => "motorcycle",
        /// Motorhome.
        MOTORHOME => "motorhome",
        /// Taxi.
        TAXI => "taxi",
        /// Trailer.
        TRAILER => "trailer",
        /// Van.
        VAN => "van",
        /// Some other kind of vehicle.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// EmissionClassificationEuro
// ---------------------------------------------------------------------------

token_type! {
    /// European emission standard classification of a vehicle.
    pub struct EmissionClassificationEuro, "EmissionClassificationEuroEnum" {
        /// Euro 5.
        EURO_5 => "euro5",
        /// Euro 5a.
        EURO_5A => "euro5a",
        /// Euro 5b.
        EURO_5B => "euro5b",
        /// Euro 6.
        EURO_6 => "euro6",
        /// Euro 6b.
        EURO_6B => "euro6b",
        /// Euro 6c.
        EURO_6C => "euro6c",
        /// Euro 6d-TEMP.
        EURO_6D_TEMP => "euro6dTemp",
        /// Euro 6d.
        EURO_6D => "euro6d",
        /// Some other classification.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// UrlLinkType
// ---------------------------------------------------------------------------

token_type! {
    /// What kind of resource a URL points at.
    pub struct UrlLinkType, "UrlLinkTypeEnum" {
        /// A PDF document.
        DOCUMENT_PDF => "documentPdf",
        /// An HTML page.
        HTML => "html",
        /// An image.
        IMAGE => "image",
        /// An RSS feed.
        RSS => "rss",
        /// A video stream.
        VIDEO_STREAM => "videoStream",
        /// A voice stream.
        VOICE_STREAM => "voiceStream",
        /// Some other resource.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parse_is_case_insensitive() {
        assert_eq!(Day::parse("Monday").unwrap(), Day::parse("monday").unwrap());
        assert_eq!(Day::parse("Monday").unwrap(), Day::MONDAY);
        assert_eq!(Day::MONDAY.as_str(), "monday");
    }

    #[test]
    fn week_is_seeded_in_schema_order() {
        let days = Day::values();
        assert_eq!(days[0], Day::MONDAY);
        assert_eq!(days[6], Day::SUNDAY);
    }

    #[test]
    fn confidentiality_literals_are_canonical() {
        let token = Confidentiality::parse("NORESTRICTION").unwrap();
        assert_eq!(token, Confidentiality::NO_RESTRICTION);
        assert_eq!(token.to_string(), "noRestriction");
    }

    #[test]
    fn fuel_type_accepts_extension_values() {
        let token = FuelType::parse("eFuel").unwrap();
        assert_eq!(token.as_str(), "eFuel");
        assert!(FuelType::values().contains(&token));
    }

    #[test]
    fn schema_names_match_the_standard() {
        assert_eq!(Day::schema_name(), "DayEnum");
        assert_eq!(MonthOfYear::schema_name(), "MonthOfYearEnum");
        assert_eq!(VehicleType::schema_name(), "VehicleTypeEnum");
        assert_eq!(InformationStatus::schema_name(), "InformationStatusEnum");
    }
}
