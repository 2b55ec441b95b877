//! Fixed content the prototype ships with: the report-type catalog, the
//! sample reports, and the static menus and timeline shown by the views.

use serde::{Deserialize, Serialize};

use crate::model::{Report, ReportId, ReportKind, ReportStatus, Screen, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTypeInfo {
    pub kind: ReportKind,
    pub label: String,
    pub description: String,
}

impl ReportKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crime => "الإبلاغ الجنائي",
            Self::Theft => "سرقة",
            Self::Medical => "حالة صحية",
            Self::Extreme => "بلاغ شديد الخطورة",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Crime => "حالات نهب/قتل/خطر شديد",
            Self::Theft => "سرقة ممتلكات",
            Self::Medical => "طلب طوارئ صحية",
            Self::Extreme => "إرسال فوري جداً",
        }
    }

    #[must_use]
    pub fn info(self) -> ReportTypeInfo {
        ReportTypeInfo {
            kind: self,
            label: self.label().into(),
            description: self.description().into(),
        }
    }
}

#[must_use]
pub fn report_types() -> Vec<ReportTypeInfo> {
    ReportKind::ALL.iter().map(|k| k.info()).collect()
}

struct Seed {
    sequence: usize,
    report_type: &'static str,
    severity: Severity,
    status: ReportStatus,
    location: &'static str,
    time: &'static str,
    lat: f64,
    lng: f64,
    description: &'static str,
}

const SEED: [Seed; 5] = [
    Seed {
        sequence: 1,
        report_type: "سرقة",
        severity: Severity::High,
        status: ReportStatus::InProgress,
        location: "الخرطوم، السوق الكبير",
        time: "منذ ساعتين",
        lat: 15.5007,
        lng: 32.5599,
        description: "تم رصد محاولة سرقة في المنطقة",
    },
    Seed {
        sequence: 2,
        report_type: "حالة صحية",
        severity: Severity::Medium,
        status: ReportStatus::Confirmed,
        location: "أم درمان، شارع الأربعين",
        time: "منذ 4 ساعات",
        lat: 15.6447,
        lng: 32.4777,
        description: "حالة طبية طارئة",
    },
    Seed {
        sequence: 3,
        report_type: "إبلاغ جنائي",
        severity: Severity::High,
        status: ReportStatus::Received,
        location: "الخرطوم بحري، الشهداء",
        time: "منذ 6 ساعات",
        lat: 15.5877,
        lng: 32.5341,
        description: "حادث جنائي",
    },
    Seed {
        sequence: 4,
        report_type: "سرقة",
        severity: Severity::Low,
        status: ReportStatus::Closed,
        location: "الخرطوم، الرياض",
        time: "منذ يوم",
        lat: 15.5447,
        lng: 32.5299,
        description: "تم حل الحالة",
    },
    Seed {
        sequence: 5,
        report_type: "بلاغ شديد الخطورة",
        severity: Severity::High,
        status: ReportStatus::InProgress,
        location: "الخرطوم، المطار",
        time: "منذ 30 دقيقة",
        lat: 15.5897,
        lng: 32.5531,
        description: "حالة طارئة جداً",
    },
];

/// The sample records every session starts with, in display order. Ids use
/// `year` so they share a format with reports created later.
#[must_use]
pub fn seed_reports(year: u16) -> Vec<Report> {
    SEED.iter()
        .map(|s| Report {
            id: ReportId::from_sequence(year, s.sequence),
            report_type: s.report_type.into(),
            severity: s.severity,
            status: s.status,
            location: s.location.into(),
            time: s.time.into(),
            lat: s.lat,
            lng: s.lng,
            description: s.description.into(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub label: String,
    pub time: String,
    pub active: bool,
    pub complete: bool,
}

/// Placeholder progress shown on the status screen for every report.
#[must_use]
pub fn status_timeline() -> Vec<TimelineStep> {
    [
        ("تم الاستلام", "منذ ساعتين", true, true),
        ("قيد المراجعة", "منذ ساعة", true, true),
        ("تم التعيين للفريق", "منذ 30 دقيقة", true, false),
        ("في الطريق", "قريباً", false, false),
    ]
    .into_iter()
    .map(|(label, time, active, complete)| TimelineStep {
        label: label.into(),
        time: time.into(),
        active,
        complete,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub target: String,
}

#[must_use]
pub fn profile_menu() -> Vec<MenuItem> {
    [
        ("تعديل الملف الشخصي", "edit-profile"),
        ("الإشعارات", "notifications"),
        ("الإعدادات", "settings"),
        ("سياسة الخصوصية", "privacy"),
        ("الشروط والأحكام", "terms"),
    ]
    .into_iter()
    .map(|(label, target)| MenuItem {
        label: label.into(),
        target: target.into(),
    })
    .collect()
}

pub const NAV_TABS: [(Screen, &str); 4] = [
    (Screen::Home, "الرئيسية"),
    (Screen::Map, "الخريطة"),
    (Screen::History, "سجلاتي"),
    (Screen::Profile, "حسابي"),
];
