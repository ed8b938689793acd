//! The fixed user settings schema.
//!
//! Every settings record shares the same set of fields. The set is closed, so a
//! field identifier outside the schema cannot be represented at all.

use std::fmt;
use std::str::FromStr;

use crate::errors::SettingsError;
use crate::models::{FieldValue, SettingValue};

/// Code/label pairs of an option set control.
pub type OptionSet = &'static [(i64, &'static str)];

/// The control kind of a field, which also fixes the value type it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    /// Option set; only the listed codes can be picked.
    Choice(OptionSet),
    /// Foreign key into another entity set. Written with a reference binding.
    Reference { entity_set: &'static str },
}

impl FieldKind {
    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            Self::Text => "a text",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::Choice(_) => "an option set code",
            Self::Reference { .. } => "a reference id",
        }
    }
}

const PAGING_LIMIT: OptionSet = &[(25, "25"), (50, "50"), (75, "75"), (100, "100"), (250, "250")];

const ADVANCED_FIND_STARTUP_MODE: OptionSet = &[(1, "Simple"), (2, "Advanced")];

const DEFAULT_CALENDAR_VIEW: OptionSet = &[(0, "Day"), (1, "Week"), (2, "Month")];

const CALENDAR_TYPE: OptionSet = &[
    (0, "Gregorian"),
    (1, "Gregorian US"),
    (2, "Japanese Emperor Era"),
    (3, "Taiwan Calendar"),
    (4, "Korean Tangun Era"),
    (5, "Hijri"),
    (6, "Thai Buddhist"),
    (7, "Hebrew Lunar"),
    (8, "Gregorian Middle East French"),
    (9, "Gregorian Arabic"),
    (10, "Gregorian Transliterated English"),
    (11, "Gregorian Transliterated French"),
    (12, "Japanese Lunar"),
    (14, "Chinese Lunar"),
    (15, "Saka Era"),
    (16, "Lunar ETO Chinese"),
    (17, "Lunar ETO Korean"),
    (18, "Lunar ETO Rokuyou"),
    (23, "UmAlQura"),
];

const AUTO_CAPTURE_USER_STATUS: OptionSet =
    &[(0, "No Preference"), (1, "Opted In"), (2, "Opted Out")];

const RELEASE_CHANNEL: OptionSet = &[
    (0, "Semi-Annual Channel"),
    (1, "Monthly Channel"),
    (2, "Microsoft Inner Channel"),
];

const DEFAULT_SEARCH_EXPERIENCE: OptionSet = &[
    (0, "Relevance Search"),
    (1, "Categorized Search"),
    (2, "Custom Search"),
    (3, "Single Entity Search"),
];

const INCOMING_EMAIL_FILTERING_METHOD: OptionSet = &[
    (0, "All email messages"),
    (1, "Email messages in response to Dynamics 365 email"),
    (2, "Email messages from Dynamics 365 Leads, Contacts and Accounts"),
    (3, "Email messages from Dynamics 365 records that are email enabled"),
    (4, "No email messages"),
];

const AUTO_CREATE_CONTACT_ON_PROMOTE: OptionSet = &[(0, "No"), (1, "Yes"), (2, "Ask")];

const DATA_VALIDATION_MODE: OptionSet = &[(0, "Block"), (1, "Warn")];

const REPORT_SCRIPT_ERRORS: OptionSet = &[
    (1, "Ask me for permission to send an error report to Microsoft"),
    (
        2,
        "Automatically send an error report to Microsoft without asking me for permission",
    ),
    (
        3,
        "Never send an error report to Microsoft about Microsoft Dynamics 365",
    ),
];

macro_rules! settings_fields {
    ($( $variant:ident => $name:literal, $kind:expr; )+) => {
        /// A user settings column that the panel can display and edit.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum SettingsField {
            $( $variant, )+
        }

        impl SettingsField {
            /// Every field of the schema, in display order.
            pub const ALL: &'static [SettingsField] = &[ $( SettingsField::$variant, )+ ];

            /// Column name in the remote store.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( SettingsField::$variant => $name, )+
                }
            }

            #[must_use]
            pub const fn kind(self) -> FieldKind {
                match self {
                    $( SettingsField::$variant => $kind, )+
                }
            }
        }

        impl FromStr for SettingsField {
            type Err = SettingsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(SettingsField::$variant), )+
                    other => Err(SettingsError::unknown_field(other)),
                }
            }
        }
    };
}

settings_fields! {
    PagingLimit => "paginglimit", FieldKind::Choice(PAGING_LIMIT);
    TimeZoneCode => "timezonecode", FieldKind::Number;
    UiLanguageId => "uilanguageid", FieldKind::Number;
    LocaleId => "localeid", FieldKind::Number;
    HelpLanguageId => "helplanguageid", FieldKind::Number;
    TransactionCurrencyId => "transactioncurrencyid", FieldKind::Reference { entity_set: "transactioncurrencies" };
    CalendarType => "calendartype", FieldKind::Choice(CALENDAR_TYPE);
    HomepageArea => "homepagearea", FieldKind::Text;
    HomepageSubarea => "homepagesubarea", FieldKind::Text;
    DefaultDashboardId => "defaultdashboardid", FieldKind::Text;
    AdvancedFindStartupMode => "advancedfindstartupmode", FieldKind::Choice(ADVANCED_FIND_STARTUP_MODE);
    DefaultCalendarView => "defaultcalendarview", FieldKind::Choice(DEFAULT_CALENDAR_VIEW);
    WorkdayStartTime => "workdaystarttime", FieldKind::Text;
    WorkdayStopTime => "workdaystoptime", FieldKind::Text;
    ShowWeekNumber => "showweeknumber", FieldKind::Boolean;
    UseCrmFormForAppointment => "usecrmformforappointment", FieldKind::Boolean;
    UseCrmFormForContact => "usecrmformforcontact", FieldKind::Boolean;
    UseCrmFormForEmail => "usecrmformforemail", FieldKind::Boolean;
    UseCrmFormForTask => "usecrmformfortask", FieldKind::Boolean;
    AutoCaptureUserStatus => "autocaptureuserstatus", FieldKind::Choice(AUTO_CAPTURE_USER_STATUS);
    ReleaseChannel => "releasechannel", FieldKind::Choice(RELEASE_CHANNEL);
    DefaultSearchExperience => "defaultsearchexperience", FieldKind::Choice(DEFAULT_SEARCH_EXPERIENCE);
    IncomingEmailFilteringMethod => "incomingemailfilteringmethod", FieldKind::Choice(INCOMING_EMAIL_FILTERING_METHOD);
    AutoCreateContactOnPromote => "autocreatecontactonpromote", FieldKind::Choice(AUTO_CREATE_CONTACT_ON_PROMOTE);
    DataValidationModeForExportToExcel => "datavalidationmodeforexporttoexcel", FieldKind::Choice(DATA_VALIDATION_MODE);
    ReportScriptErrors => "reportscripterrors", FieldKind::Choice(REPORT_SCRIPT_ERRORS);
    IsSendAsAllowed => "issendasallowed", FieldKind::Boolean;
}

impl SettingsField {
    /// Whether a concrete value has the type this field's control produces.
    #[must_use]
    pub fn accepts(self, value: &FieldValue) -> bool {
        match (self.kind(), value) {
            (FieldKind::Text | FieldKind::Reference { .. }, FieldValue::Text(_))
            | (FieldKind::Number, FieldValue::Number(_))
            | (FieldKind::Boolean, FieldValue::Bool(_)) => true,
            (FieldKind::Choice(options), FieldValue::Number(code)) => {
                options.iter().any(|(c, _)| c == code)
            }
            _ => false,
        }
    }

    /// Label of an option set code, if this field is a choice and knows the code.
    #[must_use]
    pub fn option_label(self, code: i64) -> Option<&'static str> {
        match self.kind() {
            FieldKind::Choice(options) => options
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, label)| *label),
            _ => None,
        }
    }

    /// Fields whose pending edit becomes meaningless once this field is edited.
    ///
    /// The home page sub-area is picked from the sub-areas of the selected area.
    #[must_use]
    pub fn dependents(self) -> &'static [SettingsField] {
        match self {
            Self::HomepageArea => &[Self::HomepageSubarea],
            _ => &[],
        }
    }

    /// Coerce operator input into a value for this field.
    ///
    /// Empty input means "no change", `null` means "clear the field".
    ///
    /// # Errors
    /// Returns `SettingsError::InvalidValue` when the input cannot be coerced
    /// to the field's control type.
    pub fn parse_value(self, input: &str) -> Result<SettingValue, SettingsError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(SettingValue::Unset);
        }
        if input.eq_ignore_ascii_case("null") {
            return Ok(SettingValue::Null);
        }

        let value = match self.kind() {
            FieldKind::Text | FieldKind::Reference { .. } => FieldValue::Text(input.to_owned()),
            FieldKind::Number => FieldValue::Number(self.parse_number(input)?),
            FieldKind::Boolean => FieldValue::Bool(self.parse_bool(input)?),
            FieldKind::Choice(options) => {
                let code = self.parse_number(input)?;
                if !options.iter().any(|(c, _)| *c == code) {
                    return Err(SettingsError::invalid_value(
                        self.as_str(),
                        format!("{code} is not one of the option set codes"),
                    ));
                }
                FieldValue::Number(code)
            }
        };
        Ok(SettingValue::Set(value))
    }

    fn parse_number(self, input: &str) -> Result<i64, SettingsError> {
        input.parse::<i64>().map_err(|e| {
            SettingsError::invalid_value(self.as_str(), format!("'{input}' is not a number: {e}"))
        })
    }

    fn parse_bool(self, input: &str) -> Result<bool, SettingsError> {
        match input.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(SettingsError::invalid_value(
                self.as_str(),
                format!("'{input}' is not a boolean"),
            )),
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
