//! Profile extraction: turns the raw form field map into a typed clinic
//! profile and the tag buckets the case-study matcher works on.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::form::FormData;

/// Form field ids read by profile extraction.
pub mod fields {
    pub const FACILITY_TYPE: &str = "facilityType";
    pub const STAFF_COUNT: &str = "staffCount";
    pub const SOFTWARE: &str = "software";
    pub const BOOKING_CHANNEL: &str = "bookingChannel";
    pub const CRITICAL_AREA: &str = "criticalArea";
    pub const OBJECTIVE: &str = "objective";
}

/// Staff headcount assumed when the field is blank, unparseable, or below 1.
pub const DEFAULT_STAFF_COUNT: u32 = 5;

/// Normalized snapshot of the clinic under discovery. Text fields are
/// trimmed and lowercased, with "altro" selects already resolved to their
/// free-text companions. Built fresh on every computation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicProfile {
    pub facility_type: String,
    pub staff_count: u32,
    pub software: String,
    pub booking_channel: String,
    pub critical_area: String,
    pub objective: String,
}

/// Derives the clinic profile from the raw field map. Missing fields become
/// empty strings; nothing here can fail.
pub fn extract_profile(fields_map: &FormData) -> ClinicProfile {
    ClinicProfile {
        facility_type: fields_map.selection(fields::FACILITY_TYPE).resolved(),
        staff_count: parse_staff_count(fields_map.value(fields::STAFF_COUNT)),
        software: fields_map.selection(fields::SOFTWARE).resolved(),
        booking_channel: fields_map.selection(fields::BOOKING_CHANNEL).resolved(),
        critical_area: fields_map.selection(fields::CRITICAL_AREA).resolved(),
        objective: fields_map.selection(fields::OBJECTIVE).resolved(),
    }
}

/// Parses the staff headcount field, failing closed to the default.
pub fn parse_staff_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            if !trimmed.is_empty() {
                debug!(raw = trimmed, "unusable staff count, using default");
            }
            DEFAULT_STAFF_COUNT
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tag buckets
// ────────────────────────────────────────────────────────────────────────────

/// Clinic size bucket derived from staff headcount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    S,
    M,
    L,
}

impl SizeBucket {
    /// Boundaries: under 7 is small, under 20 is medium, 20 and up is large.
    pub fn from_staff_count(staff: u32) -> Self {
        if staff < 7 {
            SizeBucket::S
        } else if staff < 20 {
            SizeBucket::M
        } else {
            SizeBucket::L
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeBucket::S => "s",
            SizeBucket::M => "m",
            SizeBucket::L => "l",
        }
    }
}

/// Booking channel bucket. Any channel text that names neither the phone
/// nor the MioDottore portal buckets as a website funnel; a blank channel
/// does not bucket at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelBucket {
    Telefono,
    MioDottore,
    SitoWeb,
}

impl ChannelBucket {
    pub fn from_raw(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        if lower.is_empty() {
            None
        } else if lower.contains("telefono") {
            Some(ChannelBucket::Telefono)
        } else if lower.contains("miodottore") {
            Some(ChannelBucket::MioDottore)
        } else {
            Some(ChannelBucket::SitoWeb)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelBucket::Telefono => "telefono",
            ChannelBucket::MioDottore => "miodottore",
            ChannelBucket::SitoWeb => "sito web",
        }
    }
}

/// Management software bucket. Anything named that is neither Gipo nor an
/// explicit "nessuno" buckets as a generic third-party tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftwareBucket {
    Gipo,
    Nessuno,
    Altro,
}

impl SoftwareBucket {
    pub fn from_raw(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_lowercase();
        if lower.is_empty() {
            None
        } else if lower.contains("gipo") {
            Some(SoftwareBucket::Gipo)
        } else if lower.contains("nessuno") {
            Some(SoftwareBucket::Nessuno)
        } else {
            Some(SoftwareBucket::Altro)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoftwareBucket::Gipo => "gipo",
            SoftwareBucket::Nessuno => "nessuno",
            SoftwareBucket::Altro => "altro",
        }
    }
}

/// Six-month objective bucket. Defaults to bookings when the objective text
/// names neither internal processes nor patient visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusBucket {
    Prenotazioni,
    Processi,
    Visibilita,
}

impl FocusBucket {
    pub fn from_objective(objective: &str) -> Self {
        let lower = objective.trim().to_lowercase();
        if lower.contains("process") {
            FocusBucket::Processi
        } else if lower.contains("pazient") || lower.contains("visib") {
            FocusBucket::Visibilita
        } else {
            FocusBucket::Prenotazioni
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusBucket::Prenotazioni => "prenotazioni",
            FocusBucket::Processi => "processi",
            FocusBucket::Visibilita => "visibilità",
        }
    }
}

/// The profile reduced to the four tag dimensions the catalog is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchProfile {
    pub size: SizeBucket,
    pub channel: Option<ChannelBucket>,
    pub software: Option<SoftwareBucket>,
    pub focus: FocusBucket,
}

impl MatchProfile {
    pub fn from_profile(profile: &ClinicProfile) -> Self {
        MatchProfile {
            size: SizeBucket::from_staff_count(profile.staff_count),
            channel: ChannelBucket::from_raw(&profile.booking_channel),
            software: SoftwareBucket::from_raw(&profile.software),
            focus: FocusBucket::from_objective(&profile.objective),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
