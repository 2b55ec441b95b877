use serde::{Deserialize, Serialize};

use crate::catalog::{self, MenuItem, ReportTypeInfo, TimelineStep};
use crate::event::{ReportForm, SignupField};
use crate::model::{
    ExtremePrompt, MapFilter, Model, Report, ReportKind, Screen, Severity, UserProfile,
};
use crate::{DEFAULT_USER_NAME, HOME_LOCATION_LABEL, RESPONSE_ETA_LABEL};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: SignupField,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MapPin {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub severity: Severity,
    pub color: String,
}

impl From<&Report> for MapPin {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id.to_string(),
            lat: r.lat,
            lng: r.lng,
            severity: r.severity,
            color: r.severity.color().into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub severity: Severity,
    pub label: String,
    pub color: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOption {
    pub filter: MapFilter,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavItem {
    pub screen: String,
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtremePromptView {
    /// `None` while waiting for confirmation.
    pub countdown: Option<u8>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewState {
    Splash,
    Onboarding,
    Login,
    Signup {
        errors: Vec<FieldError>,
    },
    Home {
        greeting_name: String,
        location_label: String,
        report_types: Vec<ReportTypeInfo>,
        recent_reports: Vec<Report>,
    },
    ReportDetail {
        report_type: Option<ReportTypeInfo>,
        form: ReportForm,
        severity_options: Vec<LegendEntry>,
    },
    Success {
        report: Option<Report>,
        eta_label: String,
    },
    Map {
        filters: Vec<FilterOption>,
        pins: Vec<MapPin>,
        reports: Vec<Report>,
        legend: Vec<LegendEntry>,
    },
    ReportStatus {
        report: Option<Report>,
        timeline: Vec<TimelineStep>,
    },
    History {
        total: usize,
        reports: Vec<Report>,
    },
    Profile {
        name: String,
        menu: Vec<MenuItem>,
    },
    NotImplemented {
        requested: String,
        back_to: String,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub screen: String,
    pub state: ViewState,
    pub is_authenticated: bool,
    pub user_name: String,
    pub user: Option<UserProfile>,
    pub reports: Vec<Report>,
    pub selected_report: Option<Report>,
    pub selected_report_type: Option<ReportKind>,
    pub extreme_countdown: Option<u8>,
    pub extreme_prompt: Option<ExtremePromptView>,
    pub alert: Option<String>,
    pub bottom_nav: Option<Vec<NavItem>>,
}

fn legend() -> Vec<LegendEntry> {
    Severity::ALL
        .iter()
        .map(|s| LegendEntry {
            severity: *s,
            label: s.label().into(),
            color: s.color().into(),
        })
        .collect()
}

fn display_name(model: &Model) -> String {
    model
        .user
        .as_ref()
        .map(|u| u.name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_USER_NAME)
        .to_string()
}

fn bottom_nav(screen: &Screen) -> Option<Vec<NavItem>> {
    if !screen.has_bottom_nav() {
        return None;
    }
    Some(
        catalog::NAV_TABS
            .iter()
            .map(|(tab, label)| NavItem {
                screen: tab.name().into(),
                label: (*label).into(),
                active: tab == screen,
            })
            .collect(),
    )
}

fn build_state(model: &Model) -> ViewState {
    match &model.screen {
        Screen::Splash => ViewState::Splash,
        Screen::Onboarding => ViewState::Onboarding,
        Screen::Login => ViewState::Login,
        Screen::Signup => ViewState::Signup {
            errors: model
                .signup_errors
                .iter()
                .map(|(field, e)| FieldError {
                    field: *field,
                    message: e.to_string(),
                })
                .collect(),
        },
        Screen::Home => ViewState::Home {
            greeting_name: display_name(model),
            location_label: HOME_LOCATION_LABEL.into(),
            report_types: catalog::report_types(),
            recent_reports: model
                .reports
                .iter()
                .take(model.config.recent_reports_on_home)
                .cloned()
                .collect(),
        },
        Screen::ReportDetail => ViewState::ReportDetail {
            report_type: model.selected_report_type.map(ReportKind::info),
            form: ReportForm {
                location: model.config.default_location.clone(),
                ..ReportForm::default_for(model.selected_report_type)
            },
            severity_options: legend(),
        },
        Screen::Success => ViewState::Success {
            report: model.selected().cloned(),
            eta_label: RESPONSE_ETA_LABEL.into(),
        },
        // The filter is presentational only; every report stays listed.
        Screen::Map => ViewState::Map {
            filters: MapFilter::ALL
                .iter()
                .map(|f| FilterOption {
                    filter: *f,
                    label: f.label().into(),
                    selected: *f == model.map_filter,
                })
                .collect(),
            pins: model.reports.iter().map(MapPin::from).collect(),
            reports: model.reports.clone(),
            legend: legend(),
        },
        Screen::ReportStatus => ViewState::ReportStatus {
            report: model.selected().cloned(),
            timeline: catalog::status_timeline(),
        },
        Screen::History => ViewState::History {
            total: model.reports.len(),
            reports: model.reports.clone(),
        },
        Screen::Profile => ViewState::Profile {
            name: display_name(model),
            menu: catalog::profile_menu(),
        },
        Screen::NotImplemented { requested } => ViewState::NotImplemented {
            requested: requested.clone(),
            back_to: Screen::Home.name().into(),
        },
    }
}

#[must_use]
pub fn build(model: &Model) -> ViewModel {
    let extreme_prompt = match &model.extreme {
        ExtremePrompt::Closed => None,
        prompt => Some(ExtremePromptView {
            countdown: prompt.countdown(),
        }),
    };

    ViewModel {
        screen: model.screen.name().into(),
        state: build_state(model),
        is_authenticated: model.is_authenticated(),
        user_name: display_name(model),
        user: model.user.clone(),
        reports: model.reports.clone(),
        selected_report: model.selected().cloned(),
        selected_report_type: model.selected_report_type,
        extreme_countdown: model.extreme.countdown(),
        extreme_prompt,
        alert: model.alert.as_ref().map(|a| a.message.clone()),
        bottom_nav: bottom_nav(&model.screen),
    }
}
