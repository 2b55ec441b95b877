// lib.rs - SafeCity shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod event;
pub mod model;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect, TimerId, TimerOperation, TimerOutput};
pub use config::{AppConfig, ConfigError};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::{
    Attachment, AttachmentKind, Event, LoginForm, ReportForm, Secret, SignupError, SignupErrors,
    SignupField, SignupForm, SubmitError,
};
pub use model::{
    Alert, ExtremePrompt, MapFilter, Model, Report, ReportId, ReportIdError, ReportKind,
    ReportStatus, Screen, Severity, SnapshotError, UserProfile,
};
pub use view::{ViewModel, ViewState};

pub const SPLASH_DELAY_MS: u64 = 3_000;
pub const COUNTDOWN_START: u8 = 3;
pub const COUNTDOWN_TICK_MS: u64 = 1_000;
pub const REPORT_ID_YEAR: u16 = 2025;
pub const RECENT_REPORTS_ON_HOME: usize = 3;
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const DEFAULT_LOCATION: &str = "الخرطوم، شارع النيل";
pub const DEFAULT_LAT: f64 = 15.5007;
pub const DEFAULT_LNG: f64 = 32.5599;
pub const DEFAULT_USER_NAME: &str = "محي الدين";
pub const HOME_LOCATION_LABEL: &str = "الخرطوم";
pub const NOW_LABEL: &str = "الآن";
pub const RESPONSE_ETA_LABEL: &str = "5-10 دقائق";
/// Fallback screen name for blank navigation requests.
pub const UNKNOWN_SCREEN: &str = "unknown";

pub const EXTREME_REPORT_DESCRIPTION: &str = "بلاغ طوارئ شديد";
