use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroize;

use crate::capabilities::{TimerId, TimerOutput};
use crate::model::{MapFilter, ReportId, ReportKind, Severity};
use crate::{DEFAULT_LOCATION, MIN_PASSWORD_CHARS};

// --- Secret wrapper: redacts Debug, zeroizes on Drop ---

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// --- Auth forms ---

/// Credentials are collected but never checked; the prototype has no backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginForm {
    pub national_id: String,
    pub password: Secret,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupForm {
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    pub password: Secret,
    pub confirm_password: Secret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupField {
    FullName,
    NationalId,
    Phone,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SignupError {
    #[error("الاسم مطلوب")]
    FullNameRequired,
    #[error("الرقم الوطني مطلوب")]
    NationalIdRequired,
    #[error("رقم الهاتف مطلوب")]
    PhoneRequired,
    #[error("كلمة المرور مطلوبة")]
    PasswordRequired,
    #[error("كلمة المرور يجب أن تكون {min} أحرف على الأقل")]
    PasswordTooShort { min: usize },
    #[error("كلمات المرور غير متطابقة")]
    PasswordMismatch,
}

impl SignupError {
    #[must_use]
    pub const fn field(&self) -> SignupField {
        match self {
            Self::FullNameRequired => SignupField::FullName,
            Self::NationalIdRequired => SignupField::NationalId,
            Self::PhoneRequired => SignupField::Phone,
            Self::PasswordRequired | Self::PasswordTooShort { .. } => SignupField::Password,
            Self::PasswordMismatch => SignupField::ConfirmPassword,
        }
    }
}

/// At most one error per field.
pub type SignupErrors = BTreeMap<SignupField, SignupError>;

impl SignupForm {
    /// Returns the trimmed display name when every field rule passes.
    pub fn validate(&self) -> Result<String, SignupErrors> {
        let mut errors = SignupErrors::new();
        let mut reject = |e: SignupError| {
            errors.entry(e.field()).or_insert(e);
        };

        let name = self.full_name.trim();
        if name.is_empty() {
            reject(SignupError::FullNameRequired);
        }
        if self.national_id.trim().is_empty() {
            reject(SignupError::NationalIdRequired);
        }
        if self.phone.trim().is_empty() {
            reject(SignupError::PhoneRequired);
        }

        let password = self.password.expose();
        if password.is_empty() {
            reject(SignupError::PasswordRequired);
        } else if password.chars().count() < MIN_PASSWORD_CHARS {
            reject(SignupError::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }
        if password != self.confirm_password.expose() {
            reject(SignupError::PasswordMismatch);
        }

        if errors.is_empty() {
            Ok(name.to_string())
        } else {
            Err(errors)
        }
    }
}

// --- Report submission ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    Video,
}

/// Picked in the form, never stored or uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SubmitError {
    #[error("الرجاء إدخال وصف للبلاغ")]
    EmptyDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportForm {
    /// Falls back to the selected report type's label when blank.
    #[serde(default)]
    pub report_type: Option<String>,
    pub description: String,
    #[serde(default)]
    pub severity: Severity,
    pub location: String,
    pub auto_location: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            report_type: None,
            description: String::new(),
            severity: Severity::Medium,
            location: DEFAULT_LOCATION.into(),
            auto_location: true,
            attachments: Vec::new(),
        }
    }
}

impl ReportForm {
    #[must_use]
    pub fn default_for(kind: Option<ReportKind>) -> Self {
        Self {
            report_type: kind.map(|k| k.label().to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the trimmed description.
    pub fn validate(&self) -> Result<&str, SubmitError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(SubmitError::EmptyDescription);
        }
        Ok(description)
    }

    #[must_use]
    pub fn resolved_type(&self, selected: Option<ReportKind>) -> String {
        self.report_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| selected.map(|k| k.label().to_string()))
            .unwrap_or_default()
    }
}

// --- Event enum ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    Noop,

    // Lifecycle
    AppStarted,
    Teardown,

    // Routing
    Navigate { screen: String },

    // Auth
    Login(LoginForm),
    Signup(Box<SignupForm>),
    Logout,

    // Reports
    SelectReportType { kind: ReportKind },
    SubmitReport(Box<ReportForm>),
    SelectReport { id: ReportId },
    SetMapFilter { filter: MapFilter },
    DismissAlert,

    // Extreme report
    ConfirmExtreme,
    CancelExtreme,

    // Timer callbacks
    SplashElapsed { timer: TimerId },
    CountdownTick { timer: TimerId },
    TimerCancelled { timer: TimerId },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::AppStarted => "app_started",
            Self::Teardown => "teardown",
            Self::Navigate { .. } => "navigate",
            Self::Login(_) => "login",
            Self::Signup(_) => "signup",
            Self::Logout => "logout",
            Self::SelectReportType { .. } => "select_report_type",
            Self::SubmitReport(_) => "submit_report",
            Self::SelectReport { .. } => "select_report",
            Self::SetMapFilter { .. } => "set_map_filter",
            Self::DismissAlert => "dismiss_alert",
            Self::ConfirmExtreme => "confirm_extreme",
            Self::CancelExtreme => "cancel_extreme",
            Self::SplashElapsed { .. } => "splash_elapsed",
            Self::CountdownTick { .. } => "countdown_tick",
            Self::TimerCancelled { .. } => "timer_cancelled",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Noop
                | Self::AppStarted
                | Self::Teardown
                | Self::SplashElapsed { .. }
                | Self::CountdownTick { .. }
                | Self::TimerCancelled { .. }
        )
    }

    pub fn navigate(screen: impl Into<String>) -> Self {
        Self::Navigate {
            screen: screen.into(),
        }
    }

    /// Maps a splash timer answer; a cancelled timer carries no work.
    #[must_use]
    pub const fn from_splash_timer(output: TimerOutput) -> Self {
        match output {
            TimerOutput::Fired { id } => Self::SplashElapsed { timer: id },
            TimerOutput::Cancelled { id } => Self::TimerCancelled { timer: id },
        }
    }

    #[must_use]
    pub const fn from_countdown_timer(output: TimerOutput) -> Self {
        match output {
            TimerOutput::Fired { id } => Self::CountdownTick { timer: id },
            TimerOutput::Cancelled { id } => Self::TimerCancelled { timer: id },
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::Noop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> SignupForm {
        SignupForm {
            full_name: "  Amna Osman ".into(),
            national_id: "1234567890".into(),
            phone: "0912345678".into(),
            password: Secret::new("hunter22"),
            confirm_password: Secret::new("hunter22"),
        }
    }

    #[test]
    fn secret_debug_is_redacted() {
        let s = Secret::new("super_secret");
        assert_eq!(format!("{s:?}"), "[REDACTED]");
        let form = LoginForm {
            national_id: "1".into(),
            password: Secret::new("pw123456"),
        };
        assert!(!format!("{form:?}").contains("pw123456"));
    }

    #[test]
    fn signup_accepts_valid_form_and_trims_name() {
        assert_eq!(valid_signup().validate(), Ok("Amna Osman".to_string()));
    }

    #[test]
    fn signup_reports_every_missing_field() {
        let errors = SignupForm::default().validate().unwrap_err();
        assert_eq!(errors.get(&SignupField::FullName), Some(&SignupError::FullNameRequired));
        assert_eq!(errors.get(&SignupField::NationalId), Some(&SignupError::NationalIdRequired));
        assert_eq!(errors.get(&SignupField::Phone), Some(&SignupError::PhoneRequired));
        assert_eq!(errors.get(&SignupField::Password), Some(&SignupError::PasswordRequired));
        assert!(!errors.contains_key(&SignupField::ConfirmPassword));
    }

    #[test]
    fn signup_rejects_short_and_mismatched_passwords() {
        let form = SignupForm {
            password: Secret::new("abc"),
            confirm_password: Secret::new("abd"),
            ..valid_signup()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(&SignupField::Password),
            Some(&SignupError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            errors.get(&SignupField::ConfirmPassword),
            Some(&SignupError::PasswordMismatch)
        );
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        let form = SignupForm {
            password: Secret::new("كلمةسر"),
            confirm_password: Secret::new("كلمةسر"),
            ..valid_signup()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn whitespace_fields_count_as_missing() {
        let form = SignupForm {
            phone: "   ".into(),
            ..valid_signup()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&SignupField::Phone));
    }

    #[test]
    fn report_form_defaults_match_detail_screen() {
        let form = ReportForm::default_for(Some(ReportKind::Medical));
        assert_eq!(form.severity, Severity::Medium);
        assert_eq!(form.location, DEFAULT_LOCATION);
        assert!(form.auto_location);
        assert_eq!(form.report_type.as_deref(), Some("حالة صحية"));
    }

    #[test]
    fn report_form_requires_description() {
        assert_eq!(
            ReportForm::default().validate(),
            Err(SubmitError::EmptyDescription)
        );
        assert_eq!(
            ReportForm::default().with_description(" \n\t ").validate(),
            Err(SubmitError::EmptyDescription)
        );
        assert_eq!(
            ReportForm::default().with_description("  smoke  ").validate(),
            Ok("smoke")
        );
    }

    #[test]
    fn report_type_falls_back_to_selection_then_empty() {
        let form = ReportForm {
            report_type: Some("  ".into()),
            ..ReportForm::default()
        };
        assert_eq!(form.resolved_type(Some(ReportKind::Theft)), "سرقة");
        assert_eq!(form.resolved_type(None), "");

        let form = ReportForm {
            report_type: Some("custom".into()),
            ..ReportForm::default()
        };
        assert_eq!(form.resolved_type(Some(ReportKind::Theft)), "custom");
    }

    #[test]
    fn timer_outputs_map_to_owning_events() {
        assert_eq!(
            Event::from_splash_timer(TimerOutput::Fired { id: TimerId(1) }),
            Event::SplashElapsed { timer: TimerId(1) }
        );
        assert_eq!(
            Event::from_countdown_timer(TimerOutput::Cancelled { id: TimerId(2) }),
            Event::TimerCancelled { timer: TimerId(2) }
        );
    }

    #[test]
    fn event_size_is_reasonable() {
        let size = std::mem::size_of::<Event>();
        assert!(
            size <= 128,
            "Event enum is {size} bytes; box the larger variants"
        );
    }
}
