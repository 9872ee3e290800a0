//! Validity periods and opening hours from the DATEX II `common` schema.
//!
//! An [`OverallPeriod`] frames a validity window and refines it with
//! recurring [`Period`]s, which in turn recur by time of day
//! ([`TimePeriodOfDay`]) or by day, week and month ([`DayWeekMonth`]).
//! Facilities use these for opening hours, planned status changes for the
//! window they apply to.

use chrono::{DateTime, FixedOffset, NaiveTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::MultilingualString;
use crate::vocabulary::{Day, MonthOfYear};
use crate::xml::{ElementReader, XmlElement, NS_COMMON};

// ---------------------------------------------------------------------------
// OverallPeriod
// ---------------------------------------------------------------------------

/// A continuous time frame, optionally refined by recurring periods.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OverallPeriod {
    /// Start of the overall period.
    pub overall_starting: DateTime<FixedOffset>,
    /// End of the overall period, open-ended when absent.
    pub overall_ending: Option<DateTime<FixedOffset>>,
    /// Periods within the frame during which the statement holds.
    pub valid_period: Vec<Period>,
    /// Periods within the frame during which the statement does not hold.
    pub exception_period: Vec<Period>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl OverallPeriod {
    /// Create a period starting at `overall_starting` with no refinements.
    pub fn new(overall_starting: DateTime<FixedOffset>) -> Self {
        Self {
            overall_starting,
            overall_ending: None,
            valid_period: Vec::new(),
            exception_period: Vec::new(),
            extension: None,
        }
    }

    /// Set the end of the overall period.
    pub fn with_overall_ending(mut self, overall_ending: DateTime<FixedOffset>) -> Self {
        self.overall_ending = Some(overall_ending);
        self
    }

    /// Add a period during which the statement holds.
    pub fn with_valid_period(mut self, period: Period) -> Self {
        self.valid_period.push(period);
        self
    }

    /// Add a period during which the statement does not hold.
    pub fn with_exception_period(mut self, period: Period) -> Self {
        self.exception_period.push(period);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a field element carrying the period children.
    ///
    /// # Errors
    ///
    /// Fails when `overallStartTime` is absent or not an `xs:dateTime`, or
    /// when any nested period fails to decode.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "OverallPeriod");
        let overall_starting = reader.mandatory_parsed(NS_COMMON, "overallStartTime")?;
        let overall_ending = reader.optional_parsed(NS_COMMON, "overallEndTime")?;
        let mut valid_period = Vec::new();
        for child in reader.children(NS_COMMON, "validPeriod") {
            valid_period.push(Period::from_xml(child)?);
        }
        let mut exception_period = Vec::new();
        for child in reader.children(NS_COMMON, "exceptionPeriod") {
            exception_period.push(Period::from_xml(child)?);
        }
        let extension = reader.extension("_overallPeriodExtension");
        Ok(Self {
            overall_starting,
            overall_ending,
            valid_period,
            exception_period,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local).with_child(XmlElement::text_element(
            NS_COMMON,
            "overallStartTime",
            &self
                .overall_starting
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        if let Some(overall_ending) = &self.overall_ending {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "overallEndTime",
                &overall_ending.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        for period in &self.valid_period {
            element.push_child(period.to_xml(NS_COMMON, "validPeriod"));
        }
        for period in &self.exception_period {
            element.push_child(period.to_xml(NS_COMMON, "exceptionPeriod"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// A recurring or bounded slice of an [`OverallPeriod`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Period {
    /// Start of this period.
    pub start_of_period: Option<DateTime<FixedOffset>>,
    /// End of this period.
    pub end_of_period: Option<DateTime<FixedOffset>>,
    /// Human-readable name of the period.
    pub period_name: Option<MultilingualString>,
    /// Recurring time-of-day windows within the period.
    pub recurring_time_period_of_day: Vec<TimePeriodOfDay>,
    /// Recurring day, week and month patterns within the period.
    pub recurring_day_week_month_period: Vec<DayWeekMonth>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl Period {
    /// Create an empty period.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start of the period.
    pub fn with_start_of_period(mut self, start: DateTime<FixedOffset>) -> Self {
        self.start_of_period = Some(start);
        self
    }

    /// Set the end of the period.
    pub fn with_end_of_period(mut self, end: DateTime<FixedOffset>) -> Self {
        self.end_of_period = Some(end);
        self
    }

    /// Set the period name.
    pub fn with_period_name(mut self, name: MultilingualString) -> Self {
        self.period_name = Some(name);
        self
    }

    /// Add a recurring time-of-day window.
    pub fn with_recurring_time_period_of_day(mut self, window: TimePeriodOfDay) -> Self {
        self.recurring_time_period_of_day.push(window);
        self
    }

    /// Add a recurring day/week/month pattern.
    pub fn with_recurring_day_week_month_period(mut self, pattern: DayWeekMonth) -> Self {
        self.recurring_day_week_month_period.push(pattern);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a field element carrying the period children.
    ///
    /// # Errors
    ///
    /// Fails when a present field does not decode.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "Period");
        let start_of_period = reader.optional_parsed(NS_COMMON, "startOfPeriod")?;
        let end_of_period = reader.optional_parsed(NS_COMMON, "endOfPeriod")?;
        let period_name = match reader.optional_child(NS_COMMON, "periodName") {
            Some(child) => Some(MultilingualString::from_xml(child)?),
            None => None,
        };
        let mut recurring_time_period_of_day = Vec::new();
        for child in reader.children(NS_COMMON, "recurringTimePeriodOfDay") {
            recurring_time_period_of_day.push(TimePeriodOfDay::from_xml(child)?);
        }
        let mut recurring_day_week_month_period = Vec::new();
        for child in reader.children(NS_COMMON, "recurringDayWeekMonthPeriod") {
            recurring_day_week_month_period.push(DayWeekMonth::from_xml(child)?);
        }
        let extension = reader.extension("_periodExtension");
        Ok(Self {
            start_of_period,
            end_of_period,
            period_name,
            recurring_time_period_of_day,
            recurring_day_week_month_period,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local);
        if let Some(start) = &self.start_of_period {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "startOfPeriod",
                &start.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(end) = &self.end_of_period {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "endOfPeriod",
                &end.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(name) = &self.period_name {
            element.push_child(name.to_xml(NS_COMMON, "periodName"));
        }
        for window in &self.recurring_time_period_of_day {
            element.push_child(window.to_xml(NS_COMMON, "recurringTimePeriodOfDay"));
        }
        for pattern in &self.recurring_day_week_month_period {
            element.push_child(pattern.to_xml(NS_COMMON, "recurringDayWeekMonthPeriod"));
        }
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// TimePeriodOfDay
// ---------------------------------------------------------------------------

/// A daily time window, both bounds mandatory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimePeriodOfDay {
    /// Start of the window.
    pub start_time_of_period: NaiveTime,
    /// End of the window.
    pub end_time_of_period: NaiveTime,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl TimePeriodOfDay {
    /// Create a window from its two bounds.
    pub fn new(start_time_of_period: NaiveTime, end_time_of_period: NaiveTime) -> Self {
        Self {
            start_time_of_period,
            end_time_of_period,
            extension: None,
        }
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a field element carrying the two time bounds.
    ///
    /// # Errors
    ///
    /// Fails when either bound is absent or not an `xs:time`.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "TimePeriodOfDay");
        let start_time_of_period = reader.mandatory_parsed(NS_COMMON, "startTimeOfPeriod")?;
        let end_time_of_period = reader.mandatory_parsed(NS_COMMON, "endTimeOfPeriod")?;
        let extension = reader.extension("_timePeriodOfDayExtension");
        Ok(Self {
            start_time_of_period,
            end_time_of_period,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local)
            .with_child(XmlElement::text_element(
                NS_COMMON,
                "startTimeOfPeriod",
                &self.start_time_of_period.to_string(),
            ))
            .with_child(XmlElement::text_element(
                NS_COMMON,
                "endTimeOfPeriod",
                &self.end_time_of_period.to_string(),
            ));
        if let Some(extension) = &self.extension {
            element.push_child(extension.clone());
        }
        element
    }
}

// ---------------------------------------------------------------------------
// DayWeekMonth
// ---------------------------------------------------------------------------

/// Days of the week and months of the year a period recurs on.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DayWeekMonth {
    /// Days of the week the period applies to, all days when empty.
    pub applicable_day: Vec<Day>,
    /// Months the period applies to, all months when empty.
    pub applicable_month: Vec<MonthOfYear>,
    /// Opaque extension content, preserved verbatim.
    pub extension: Option<XmlElement>,
}

impl DayWeekMonth {
    /// Create a pattern applying to every day and month.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a day of the week.
    pub fn with_applicable_day(mut self, day: Day) -> Self {
        self.applicable_day.push(day);
        self
    }

    /// Add a month of the year.
    pub fn with_applicable_month(mut self, month: MonthOfYear) -> Self {
        self.applicable_month.push(month);
        self
    }

    /// Attach extension content.
    pub fn with_extension(mut self, extension: XmlElement) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Decode from a field element carrying the day and month lists.
    ///
    /// # Errors
    ///
    /// Fails when a listed day or month is empty text.
    pub fn from_xml(element: &XmlElement) -> Result<Self> {
        let reader = ElementReader::new(element, "DayWeekMonth");
        let mut applicable_day = Vec::new();
        for child in reader.children(NS_COMMON, "applicableDay") {
            applicable_day.push(Day::parse(&child.text())?);
        }
        let mut applicable_month = Vec::new();
        for child in reader.children(NS_COMMON, "applicableMonth") {
            applicable_month.push(MonthOfYear::parse(&child.text())?);
        }
        let extension = reader.extension("_dayWeekMonthExtension");
        Ok(Self {
            applicable_day,
            applicable_month,
            extension,
        })
    }

    /// Encode as a field element named `local` in `namespace`.
    pub fn to_xml(&self, namespace: &str, local: &str) -> XmlElement {
        let mut element = XmlElement::new(namespace, local);
        for day in &self.applicable_day {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "applicableDay",
                day.as_str(),
            ));
        }
        for month in &self.applicable_month {
            element.push_child(XmlElement::text_element(
                NS_COMMON,
                "applicableMonth",
                month.as_str(),
            ));
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
    use crate::error::DatexError;
    use crate::xml::NS_ENERGY;

    use super::*;

    fn instant(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).unwrap()
    }

    fn time(text: &str) -> NaiveTime {
        text.parse().unwrap()
    }

    #[test]
    fn overall_period_xml_roundtrip() {
        let period = OverallPeriod::new(instant("2025-01-01T00:00:00+01:00"))
            .with_overall_ending(instant("2025-12-31T23:59:59+01:00"))
            .with_valid_period(
                Period::new()
                    .with_period_name(MultilingualString::new("weekdays"))
                    .with_recurring_time_period_of_day(TimePeriodOfDay::new(
                        time("08:00:00"),
                        time("18:00:00"),
                    ))
                    .with_recurring_day_week_month_period(
                        DayWeekMonth::new()
                            .with_applicable_day(Day::MONDAY)
                            .with_applicable_day(Day::FRIDAY),
                    ),
            )
            .with_exception_period(
                Period::new().with_start_of_period(instant("2025-05-01T00:00:00+02:00")),
            );

        let element = period.to_xml(NS_ENERGY, "overallPeriod");
        let back = OverallPeriod::from_xml(&element).unwrap();
        assert_eq!(period, back);
    }

    #[test]
    fn overall_period_requires_start() {
        let element = XmlElement::new(NS_ENERGY, "overallPeriod");
        let err = OverallPeriod::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "OverallPeriod",
                field: "overallStartTime",
            }
        );
    }

    #[test]
    fn overall_period_rejects_bad_datetime() {
        let element = XmlElement::new(NS_ENERGY, "overallPeriod").with_child(
            XmlElement::text_element(NS_COMMON, "overallStartTime", "next tuesday"),
        );
        let err = OverallPeriod::from_xml(&element).unwrap_err();
        assert!(matches!(
            err,
            DatexError::InvalidField {
                class: "OverallPeriod",
                field: "overallStartTime",
                ..
            }
        ));
    }

    #[test]
    fn time_period_of_day_requires_both_bounds() {
        let element = XmlElement::new(NS_COMMON, "recurringTimePeriodOfDay").with_child(
            XmlElement::text_element(NS_COMMON, "startTimeOfPeriod", "08:00:00"),
        );
        let err = TimePeriodOfDay::from_xml(&element).unwrap_err();
        assert_eq!(
            err,
            DatexError::MissingField {
                class: "TimePeriodOfDay",
                field: "endTimeOfPeriod",
            }
        );
    }

    #[test]
    fn day_week_month_parses_tokens_case_insensitively() {
        let element = XmlElement::new(NS_COMMON, "recurringDayWeekMonthPeriod")
            .with_child(XmlElement::text_element(NS_COMMON, "applicableDay", "Monday"))
            .with_child(XmlElement::text_element(NS_COMMON, "applicableMonth", "JULY"));
        let pattern = DayWeekMonth::from_xml(&element).unwrap();
        assert_eq!(pattern.applicable_day, vec![Day::MONDAY]);
        assert_eq!(pattern.applicable_month, vec![MonthOfYear::JULY]);
    }

    #[test]
    fn datetime_offsets_survive_the_roundtrip() {
        let period = OverallPeriod::new(instant("2025-02-02T12:50:00+01:00"));
        let element = period.to_xml(NS_ENERGY, "overallPeriod");
        let text = element.child(NS_COMMON, "overallStartTime").unwrap().text();
        assert_eq!(text, "2025-02-02T12:50:00+01:00");
    }
}
