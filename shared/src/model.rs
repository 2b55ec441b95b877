use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::capabilities::TimerId;
use crate::catalog;
use crate::config::{AppConfig, ConfigError};
use crate::event::SignupErrors;
use crate::{REPORT_ID_YEAR, UNKNOWN_SCREEN};

// --- Report identity ---

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot carries an invalid config: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportIdError {
    #[error("malformed report id: {0:?}")]
    Malformed(String),
}

/// `R-YYYY-NNN`, where `NNN` is the report count at creation time plus one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportId(String);

impl ReportId {
    #[must_use]
    pub fn from_sequence(year: u16, sequence: usize) -> Self {
        Self(format!("R-{year}-{sequence:03}"))
    }

    pub fn parse(s: impl Into<String>) -> Result<Self, ReportIdError> {
        let s = s.into();
        Self::split(&s).ok_or_else(|| ReportIdError::Malformed(s.clone()))?;
        Ok(Self(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn year(&self) -> u16 {
        Self::split(&self.0).map_or(0, |(year, _)| year)
    }

    #[must_use]
    pub fn sequence(&self) -> usize {
        Self::split(&self.0).map_or(0, |(_, seq)| seq)
    }

    fn split(s: &str) -> Option<(u16, usize)> {
        let mut parts = s.strip_prefix("R-")?.splitn(2, '-');
        let year = parts.next()?;
        let seq = parts.next()?;
        if year.len() != 4 || seq.len() < 3 {
            return None;
        }
        if !year.bytes().all(|b| b.is_ascii_digit()) || !seq.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((year.parse().ok()?, seq.parse().ok()?))
    }
}

impl TryFrom<String> for ReportId {
    type Error = ReportIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ReportId> for String {
    fn from(id: ReportId) -> Self {
        id.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Domain enums replacing stringly-typed fields ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "عالي",
            Self::Medium => "متوسط",
            Self::Low => "منخفض",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "orange",
            Self::Low => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Received,
    InProgress,
    Confirmed,
    Closed,
}

impl ReportStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::InProgress => "in-progress",
            Self::Confirmed => "confirmed",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "مستلم",
            Self::InProgress => "قيد المتابعة",
            Self::Confirmed => "مؤكد",
            Self::Closed => "مغلق",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Crime,
    Theft,
    Medical,
    Extreme,
}

impl ReportKind {
    pub const ALL: [Self; 4] = [Self::Crime, Self::Theft, Self::Medical, Self::Extreme];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Crime => "crime",
            Self::Theft => "theft",
            Self::Medical => "medical",
            Self::Extreme => "extreme",
        }
    }

    #[must_use]
    pub const fn is_extreme(self) -> bool {
        matches!(self, Self::Extreme)
    }
}

// --- Records ---

/// An incident record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    #[serde(rename = "type")]
    pub report_type: String,
    pub severity: Severity,
    pub status: ReportStatus,
    pub location: String,
    pub time: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
}

impl UserProfile {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// --- Screens ---

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Splash,
    Onboarding,
    Signup,
    Login,
    Home,
    ReportDetail,
    Success,
    Map,
    ReportStatus,
    History,
    Profile,
    /// Menu targets and unknown names that have no view of their own.
    NotImplemented { requested: String },
}

impl Screen {
    /// Never fails: names without a view resolve to `NotImplemented`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "" => Self::NotImplemented {
                requested: UNKNOWN_SCREEN.to_string(),
            },
            "splash" => Self::Splash,
            "onboarding" => Self::Onboarding,
            "signup" => Self::Signup,
            "login" => Self::Login,
            "home" => Self::Home,
            "report-detail" => Self::ReportDetail,
            "success" => Self::Success,
            "map" => Self::Map,
            "report-status" => Self::ReportStatus,
            "history" => Self::History,
            "profile" => Self::Profile,
            other => Self::NotImplemented {
                requested: other.to_string(),
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Splash => "splash",
            Self::Onboarding => "onboarding",
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Home => "home",
            Self::ReportDetail => "report-detail",
            Self::Success => "success",
            Self::Map => "map",
            Self::ReportStatus => "report-status",
            Self::History => "history",
            Self::Profile => "profile",
            Self::NotImplemented { requested } => requested,
        }
    }

    #[must_use]
    pub const fn has_bottom_nav(&self) -> bool {
        matches!(self, Self::Home | Self::Map | Self::History | Self::Profile)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapFilter {
    #[default]
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "all")]
    All,
}

impl MapFilter {
    pub const ALL: [Self; 4] = [Self::Last24Hours, Self::Last7Days, Self::Last30Days, Self::All];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Last24Hours => "24 ساعة",
            Self::Last7Days => "7 أيام",
            Self::Last30Days => "30 يوم",
            Self::All => "الكل",
        }
    }
}

// --- Transient UI state ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Confirmation prompt for the zero-detail extreme report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExtremePrompt {
    #[default]
    Closed,
    Confirming,
    CountingDown { remaining: u8, timer: TimerId },
}

impl ExtremePrompt {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn countdown(&self) -> Option<u8> {
        match self {
            Self::CountingDown { remaining, .. } => Some(*remaining),
            Self::Closed | Self::Confirming => None,
        }
    }

    #[must_use]
    pub const fn timer(&self) -> Option<TimerId> {
        match self {
            Self::CountingDown { timer, .. } => Some(*timer),
            Self::Closed | Self::Confirming => None,
        }
    }
}

// --- Model ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub config: AppConfig,
    pub screen: Screen,
    pub user: Option<UserProfile>,
    /// Most recent first.
    pub reports: Vec<Report>,
    pub selected_report: Option<ReportId>,
    pub selected_report_type: Option<ReportKind>,
    pub extreme: ExtremePrompt,
    pub alert: Option<Alert>,
    pub signup_errors: SignupErrors,
    pub map_filter: MapFilter,
    pub splash_timer: Option<TimerId>,
    pub next_timer_id: TimerId,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            screen: Screen::Splash,
            user: None,
            reports: catalog::seed_reports(REPORT_ID_YEAR),
            selected_report: None,
            selected_report_type: None,
            extreme: ExtremePrompt::Closed,
            alert: None,
            signup_errors: SignupErrors::default(),
            map_filter: MapFilter::default(),
            splash_timer: None,
            next_timer_id: TimerId(0),
        }
    }
}

impl Model {
    pub fn with_config(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            reports: catalog::seed_reports(config.report_year),
            config,
            ..Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restores a snapshot. The embedded config is validated the same way
    /// `with_config` validates it.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let model: Self = serde_json::from_str(json)?;
        model.config.validate()?;
        Ok(model)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Derived from the current count, so ids only grow while reports are
    /// never removed.
    #[must_use]
    pub fn next_report_id(&self) -> ReportId {
        ReportId::from_sequence(self.config.report_year, self.reports.len() + 1)
    }

    pub fn prepend_report(&mut self, report: Report) {
        self.reports.insert(0, report);
    }

    #[must_use]
    pub fn find_report(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| &r.id == id)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Report> {
        self.selected_report.as_ref().and_then(|id| self.find_report(id))
    }

    pub fn allocate_timer_id(&mut self) -> TimerId {
        let id = self.next_timer_id;
        self.next_timer_id = id.next();
        id
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(Alert::new(message));
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
    }
}
