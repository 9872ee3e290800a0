//! Enumerated string vocabularies of the DATEX II `facilities` and
//! `energyInfrastructure` schemas.
//!
//! Declared with [`token_type!`]; open-world like the common catalogs,
//! so vendor extension values parse into new tokens instead of failing.

use datex2_common::token_type;

// ---------------------------------------------------------------------------
// Accessibility
// ---------------------------------------------------------------------------

token_type! {
    /// Accessibility of a facility for people with disabilities.
    pub struct Accessibility, "AccessibilityEnum" {
        /// Accessible without steps or other barriers.
        BARRIER_FREE_ACCESSIBLE => "barrierFreeAccessible",
        /// Accessible for handicapped people.
        HANDICAPPED_ACCESSIBLE => "handicappedAccessible",
        /// Easements for handicapped people.
        HANDICAPPED_EASEMENTS => "handicappedEasements",
        /// Marked as reserved for handicapped people.
        HANDICAPPED_MARKED => "handicappedMarked",
        /// Orientation system for blind people.
        ORIENTATION_SYSTEM_FOR_BLIND_PEOPLE => "orientationSystemForBlindPeople",
        /// Accessible by wheelchair.
        WHEELCHAIR_ACCESSIBLE => "wheelChairAccessible",
        /// No accessibility easements.
        NONE => "none",
        /// Accessibility unknown.
        UNKNOWN => "unknown",
        /// Some other accessibility easement.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// AvailabilityStatus
// ---------------------------------------------------------------------------

token_type! {
    /// Whether a facility is currently available for use.
    pub struct AvailabilityStatus, "AvailabilityStatusEnum" {
        /// Available.
        AVAILABLE => "available",
        /// Not available.
        NOT_AVAILABLE => "notAvailable",
        /// Availability not known.
        AVAILABILITY_UNKNOWN => "availabilityUnknown",
    }
}

// ---------------------------------------------------------------------------
// OpeningStatus
// ---------------------------------------------------------------------------

token_type! {
    /// Opening status of a facility.
    pub struct OpeningStatus, "OpeningStatusEnum" {
        /// Open.
        OPEN => "open",
        /// Closed.
        CLOSED => "closed",
        /// Closed contrary to the published opening times.
        CLOSED_ABNORMAL => "closedAbnormal",
        /// The published opening times are in force.
        OPENING_TIMES_IN_FORCE => "openingTimesInForce",
        /// Opening times not known.
        OPENING_TIMES_UNKNOWN => "openingTimesUnknown",
        /// Temporarily closed.
        TEMPORARILY_CLOSED => "temporarilyClosed",
        /// Status not known.
        STATUS_UNKNOWN => "statusUnknown",
        /// Some other status.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// MeansOfPayment
// ---------------------------------------------------------------------------

token_type! {
    /// Payment instruments accepted at a facility.
    pub struct MeansOfPayment, "MeansOfPaymentEnum" {
        /// Cash, bills only.
        CASH_BILLS_ONLY => "cashBillsOnly",
        /// Cash, coins only.
        CASH_COINS_ONLY => "cashCoinsOnly",
        /// Cash, coins and bills.
        CASH_COINS_AND_BILLS => "cashCoinsAndBills",
        /// Credit card.
        PAYMENT_CREDIT_CARD => "paymentCreditCard",
        /// Debit card.
        PAYMENT_DEBIT_CARD => "paymentDebitCard",
        /// Prepaid value card.
        PAYMENT_VALUE_CARD => "paymentValueCard",
        /// Mobile account charged by the operator.
        MOBILE_ACCOUNT => "mobileAccount",
        /// Near-field communication.
        NFC => "nfc",
        /// EMV chip payment.
        EMV => "emv",
        /// QR code.
        QR_CODE => "qrCode",
        /// Payment via a website.
        WEBSITE => "website",
        /// Electronic toll tag.
        TOLL_TAG => "tollTag",
        /// Prepayment.
        PREPAY => "prepay",
        /// Means of payment not known.
        UNKNOWN => "unknown",
        /// Some other means of payment.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// PaymentTiming
// ---------------------------------------------------------------------------

token_type! {
    /// When payment is due relative to the service.
    pub struct PaymentTiming, "PaymentTimingEnum" {
        /// Payment in advance.
        PREPAY => "prepay",
        /// Payment on entry.
        PAY_ON_ENTRY => "payOnEntry",
        /// Payment immediately before leaving.
        PAY_PRIOR_TO_EXIT => "payPriorToExit",
        /// Payment after leaving.
        PAY_AFTER_EXIT => "payAfterExit",
        /// Payment, then exit within an allowed time.
        PAY_AND_EXIT_WITHIN_ALLOWED_TIME => "payAndExitWithinAllowedTime",
        /// Some other timing.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// UserType
// ---------------------------------------------------------------------------

token_type! {
    /// The group of users a facility or space is dedicated to.
    pub struct UserType, "UserTypeEnum" {
        /// All users.
        ALL => "all",
        /// Commuters.
        COMMUTERS => "commuters",
        /// Customers.
        CUSTOMERS => "customers",
        /// Disabled people.
        DISABLED => "disabled",
        /// Elderly users.
        ELDERLY_USERS => "elderlyUsers",
        /// Employees.
        EMPLOYEES => "employees",
        /// Families.
        FAMILIES => "families",
        /// Hotel guests.
        HOTEL_GUESTS => "hotelGuests",
        /// Members of some scheme.
        MEMBERS => "members",
        /// Residents.
        RESIDENTS => "residents",
        /// Shoppers.
        SHOPPERS => "shoppers",
        /// Students.
        STUDENTS => "students",
        /// Subscribers.
        SUBSCRIBERS => "subscribers",
        /// Visitors.
        VISITORS => "visitors",
        /// User group not known.
        UNKNOWN => "unknown",
        /// Some other user group.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// ConnectorType
// ---------------------------------------------------------------------------

token_type! {
    /// Physical connector standard of a charging point socket or cable.
    pub struct ConnectorType, "ConnectorTypeEnum" {
        /// CHAdeMO DC connector.
        CHADEMO => "chademo",
        /// CEE3 industrial connector.
        CEE3 => "cee3",
        /// CEE5 industrial connector.
        CEE5 => "cee5",
        /// Yazaki connector.
        YAZAKI => "yazaki",
        /// Domestic plug, country-specific.
        DOMESTIC => "domestic",
        /// IEC 60309-2 single phase 16 A.
        IEC60309_X2_SINGLE_16 => "iec60309x2single16",
        /// IEC 62196 Type 1.
        IEC62196_T1 => "iec62196T1",
        /// IEC 62196 Type 1 Combo (CCS1).
        IEC62196_T1_COMBO => "iec62196T1COMBO",
        /// IEC 62196 Type 2.
        IEC62196_T2 => "iec62196T2",
        /// IEC 62196 Type 2 Combo (CCS2).
        IEC62196_T2_COMBO => "iec62196T2COMBO",
        /// IEC 62196 Type 3A.
        IEC62196_T3A => "iec62196T3A",
        /// IEC 62196 Type 3C.
        IEC62196_T3C => "iec62196T3C",
        /// Pantograph connecting from below.
        PANTOGRAPH_BOTTOM_UP => "pantographBottomUp",
        /// Pantograph connecting from above.
        PANTOGRAPH_TOP_DOWN => "pantographTopDown",
        /// Tesla connector, European variant.
        TESLA_CONNECTOR_EUROPE => "teslaConnectorEurope",
        /// Tesla connector, American variant.
        TESLA_CONNECTOR_AMERICA => "teslaConnectorAmerica",
        /// Some other connector.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// ConnectorFormat
// ---------------------------------------------------------------------------

token_type! {
    /// Whether the connector is an attached cable or a socket.
    pub struct ConnectorFormat, "ConnectorFormatTypeEnum" {
        /// Fixed cable with a vehicle-side plug.
        CABLE => "cable",
        /// Socket the user plugs a cable into.
        SOCKET => "socket",
    }
}

// ---------------------------------------------------------------------------
// ChargingMode
// ---------------------------------------------------------------------------

token_type! {
    /// IEC 61851-1 charging mode.
    pub struct ChargingMode, "ChargingModeEnum" {
        /// Mode 1, AC single phase.
        MODE_1_AC_1P => "mode1AC1p",
        /// Mode 1, AC three phase.
        MODE_1_AC_3P => "mode1AC3p",
        /// Mode 2, AC single phase.
        MODE_2_AC_1P => "mode2AC1p",
        /// Mode 2, AC three phase.
        MODE_2_AC_3P => "mode2AC3p",
        /// Mode 3, AC three phase.
        MODE_3_AC_3P => "mode3AC3p",
        /// Mode 4, DC fast charging.
        MODE_4_DC => "mode4DC",
        /// Legacy inductive charging.
        LEGACY_INDUCTIVE => "legacyInductive",
        /// Combined charging system.
        CCS => "ccs",
        /// Charging mode not known.
        UNKNOWN => "unknown",
        /// Some other mode.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// RefillPointStatusEnum
// ---------------------------------------------------------------------------

token_type! {
    /// Operational state of a refill point.
    ///
    /// Keeps the schema's `Enum` suffix because `RefillPointStatus` names
    /// the status entity carrying this value.
    pub struct RefillPointStatusEnum, "RefillPointStatusEnum" {
        /// Available for a new vehicle.
        AVAILABLE => "available",
        /// Currently delivering energy.
        CHARGING => "charging",
        /// Not operational.
        INOPERATIVE => "inoperative",
        /// Occupied but not delivering.
        OCCUPIED => "occupied",
        /// Out of order.
        OUT_OF_ORDER => "outOfOrder",
        /// Planned but not yet in service.
        PLANNED => "planned",
        /// Removed from service.
        REMOVED => "removed",
        /// Reserved for an announced vehicle.
        RESERVED => "reserved",
        /// Unavailable for some other reason.
        UNAVAILABLE => "unavailable",
        /// State not known.
        UNKNOWN => "unknown",
    }
}

// ---------------------------------------------------------------------------
// PriceType
// ---------------------------------------------------------------------------

token_type! {
    /// What an energy price is charged per.
    pub struct PriceType, "PriceTypeEnum" {
        /// Flat rate per charging session.
        FLAT_RATE => "flatRate",
        /// Free of charge.
        FREE => "free",
        /// Price per minute.
        PRICE_PER_MINUTE => "pricePerMinute",
        /// Price per kilowatt-hour.
        PRICE_PER_KWH => "pricePerKWh",
        /// Some other price basis.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// ElectricEnergySourceType
// ---------------------------------------------------------------------------

token_type! {
    /// Primary source of delivered electric energy.
    pub struct ElectricEnergySourceType, "ElectricEnergySourceTypeEnum" {
        /// Biomass.
        BIOMASS => "biomass",
        /// Coal.
        COAL => "coal",
        /// Gas.
        GAS => "gas",
        /// Hydropower.
        HYDRO => "hydro",
        /// Nuclear power.
        NUCLEAR => "nuclear",
        /// Oil.
        OIL => "oil",
        /// Solar power.
        SOLAR => "solar",
        /// Wind power.
        WIND => "wind",
        /// Source not known.
        UNKNOWN => "unknown",
        /// Some other source.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// AuthenticationAndIdentification
// ---------------------------------------------------------------------------

token_type! {
    /// How a user authenticates at an energy infrastructure station.
    pub struct AuthenticationAndIdentification, "AuthenticationAndIdentificationEnum" {
        /// Active RFID chip.
        ACTIVE_RFID_CHIP => "activeRFIDChip",
        /// Mobile apps.
        APPS => "apps",
        /// Calypso card.
        CALYPSO => "calypso",
        /// Cash payment, no identification.
        CASH_PAYMENT => "cashPayment",
        /// Credit card.
        CREDIT_CARD => "creditCard",
        /// Debit card.
        DEBIT_CARD => "debitCard",
        /// Mifare Classic card.
        MIFARE_CLASSIC => "mifareClassic",
        /// Mifare DESFire card.
        MIFARE_DESFIRE => "mifareDesfire",
        /// Near-field communication.
        NFC => "nfc",
        /// Telephone dialog.
        PHONE_DIALOG => "phoneDialog",
        /// Text message.
        PHONE_SMS => "phoneSMS",
        /// PIN pad.
        PINPAD => "pinpad",
        /// Power-line communication per ISO 15118.
        PLC => "plc",
        /// Prepaid card.
        PREPAID_CARD => "prepaidCard",
        /// Passive RFID.
        RFID => "rfid",
        /// Website.
        WEBSITE => "website",
        /// No authentication required.
        UNLIMITED_ACCESS => "unlimitedAccess",
        /// Some other method.
        OTHER => "other",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
