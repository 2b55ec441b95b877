use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, TimerId};
use crate::event::{Event, ReportForm};
use crate::model::{ExtremePrompt, Model, Report, ReportKind, ReportStatus, Screen, Severity, UserProfile};
use crate::view::{self, ViewModel};
use crate::{DEFAULT_USER_NAME, EXTREME_REPORT_DESCRIPTION, NOW_LABEL};

#[derive(Default)]
pub struct App;

impl App {
    /// Sets the active screen unconditionally, tearing down the splash timer
    /// when leaving splash and arming it when entering. Leaving signup drops
    /// its field errors so the form comes back clean.
    fn enter_screen(next: Screen, model: &mut Model, caps: &Capabilities) {
        let from = model.screen.name().to_string();

        if model.screen == Screen::Splash && next != Screen::Splash {
            Self::cancel_splash_timer(model, caps);
        }
        if model.screen == Screen::Signup && next != Screen::Signup {
            model.signup_errors.clear();
        }

        model.screen = next;
        info!(from = %from, to = %model.screen, "screen changed");

        if model.screen == Screen::Splash {
            Self::arm_splash_timer(model, caps);
        }
    }

    fn arm_splash_timer(model: &mut Model, caps: &Capabilities) {
        Self::cancel_splash_timer(model, caps);
        let id = model.allocate_timer_id();
        model.splash_timer = Some(id);
        caps.timer
            .start(id, model.config.splash_delay_ms, Event::from_splash_timer);
        debug!(timer = %id, delay_ms = model.config.splash_delay_ms, "splash timer armed");
    }

    fn cancel_splash_timer(model: &mut Model, caps: &Capabilities) {
        if let Some(id) = model.splash_timer.take() {
            caps.timer.cancel(id);
            debug!(timer = %id, "splash timer cancelled");
        }
    }

    fn arm_countdown_tick(model: &mut Model, caps: &Capabilities) -> TimerId {
        let id = model.allocate_timer_id();
        caps.timer
            .start(id, model.config.countdown_tick_ms, Event::from_countdown_timer);
        id
    }

    /// Closes the prompt; a running countdown is cancelled and no report is
    /// created.
    fn close_extreme_prompt(model: &mut Model, caps: &Capabilities) {
        if let Some(id) = model.extreme.timer() {
            caps.timer.cancel(id);
            debug!(timer = %id, "countdown cancelled");
        }
        model.extreme = ExtremePrompt::Closed;
    }

    fn record_report(report: Report, model: &mut Model, caps: &Capabilities) {
        info!(
            report_id = %report.id,
            severity = report.severity.as_str(),
            total = model.reports.len() + 1,
            "report created"
        );
        model.selected_report = Some(report.id.clone());
        model.prepend_report(report);
        Self::enter_screen(Screen::Success, model, caps);
    }

    fn submit_extreme(model: &mut Model, caps: &Capabilities) {
        let report = Report {
            id: model.next_report_id(),
            report_type: ReportKind::Extreme.label().into(),
            severity: Severity::High,
            status: ReportStatus::Received,
            location: model.config.default_location.clone(),
            time: NOW_LABEL.into(),
            lat: model.config.default_lat,
            lng: model.config.default_lng,
            description: EXTREME_REPORT_DESCRIPTION.into(),
        };

        model.extreme = ExtremePrompt::Closed;
        Self::record_report(report, model, caps);
    }

    fn submit_form(form: &ReportForm, model: &mut Model, caps: &Capabilities) {
        let description = match form.validate() {
            Ok(d) => d.to_string(),
            Err(e) => {
                warn!(error = ?e, "report submission rejected");
                model.show_alert(e.to_string());
                return;
            }
        };

        if !form.attachments.is_empty() {
            debug!(count = form.attachments.len(), "attachments dropped");
        }

        let report = Report {
            id: model.next_report_id(),
            report_type: form.resolved_type(model.selected_report_type),
            severity: form.severity,
            status: ReportStatus::Received,
            location: form.location.clone(),
            time: NOW_LABEL.into(),
            lat: model.config.default_lat,
            lng: model.config.default_lng,
            description,
        };

        debug!(
            description_len = report.description.chars().count(),
            auto_location = form.auto_location,
            "report form accepted"
        );
        Self::record_report(report, model, caps);
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let _span = tracing::debug_span!("update", event = event.name()).entered();

        if event.is_user_initiated() {
            debug!(screen = %model.screen, "user action");
        }

        match event {
            Event::Noop => {}

            Event::AppStarted => {
                Self::enter_screen(Screen::Splash, model, caps);
                caps.render.render();
            }

            Event::Teardown => {
                Self::cancel_splash_timer(model, caps);
                Self::close_extreme_prompt(model, caps);
            }

            Event::Navigate { screen } => {
                let next = Screen::from_name(&screen);
                if let Screen::NotImplemented { requested } = &next {
                    warn!(requested = %requested, "screen has no view");
                }
                Self::enter_screen(next, model, caps);
                caps.render.render();
            }

            Event::Login(form) => {
                debug!(has_national_id = !form.national_id.trim().is_empty(), "login");
                model.user = Some(UserProfile::new(DEFAULT_USER_NAME));
                Self::enter_screen(Screen::Home, model, caps);
                caps.render.render();
            }

            Event::Signup(form) => {
                match form.validate() {
                    Ok(name) => {
                        model.signup_errors.clear();
                        model.user = Some(UserProfile::new(name));
                        Self::enter_screen(Screen::Home, model, caps);
                    }
                    Err(errors) => {
                        warn!(fields = errors.len(), "signup rejected");
                        model.signup_errors = errors;
                    }
                }
                caps.render.render();
            }

            Event::Logout => {
                model.user = None;
                model.signup_errors.clear();
                Self::close_extreme_prompt(model, caps);
                Self::enter_screen(Screen::Onboarding, model, caps);
                caps.render.render();
            }

            Event::SelectReportType { kind } => {
                if kind.is_extreme() {
                    if model.extreme.is_open() {
                        debug!("extreme prompt already open");
                    } else {
                        model.extreme = ExtremePrompt::Confirming;
                    }
                } else {
                    model.selected_report_type = Some(kind);
                    Self::enter_screen(Screen::ReportDetail, model, caps);
                }
                caps.render.render();
            }

            Event::SubmitReport(form) => {
                // The alert is blocking; nothing is submitted until it is dismissed.
                if model.alert.is_some() {
                    debug!("submission ignored while alert is showing");
                    return;
                }
                Self::submit_form(&form, model, caps);
                caps.render.render();
            }

            Event::SelectReport { id } => {
                if model.find_report(&id).is_none() {
                    warn!(report_id = %id, "selected report not found");
                    return;
                }
                model.selected_report = Some(id);
                Self::enter_screen(Screen::ReportStatus, model, caps);
                caps.render.render();
            }

            Event::SetMapFilter { filter } => {
                model.map_filter = filter;
                caps.render.render();
            }

            Event::DismissAlert => {
                model.clear_alert();
                caps.render.render();
            }

            Event::ConfirmExtreme => {
                if model.extreme != ExtremePrompt::Confirming {
                    debug!(prompt = ?model.extreme, "confirm ignored");
                    return;
                }
                let timer = Self::arm_countdown_tick(model, caps);
                model.extreme = ExtremePrompt::CountingDown {
                    remaining: model.config.countdown_start,
                    timer,
                };
                info!(from = model.config.countdown_start, "extreme countdown started");
                caps.render.render();
            }

            Event::CancelExtreme => {
                if !model.extreme.is_open() {
                    return;
                }
                info!(remaining = ?model.extreme.countdown(), "extreme report cancelled");
                Self::close_extreme_prompt(model, caps);
                caps.render.render();
            }

            Event::SplashElapsed { timer } => {
                if model.splash_timer != Some(timer) {
                    debug!(timer = %timer, "stale splash timer");
                    return;
                }
                model.splash_timer = None;
                Self::enter_screen(Screen::Onboarding, model, caps);
                caps.render.render();
            }

            Event::CountdownTick { timer } => {
                let ExtremePrompt::CountingDown {
                    remaining,
                    timer: armed,
                } = model.extreme
                else {
                    debug!(timer = %timer, "countdown tick without countdown");
                    return;
                };
                if armed != timer {
                    debug!(timer = %timer, armed = %armed, "stale countdown tick");
                    return;
                }

                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    Self::submit_extreme(model, caps);
                } else {
                    let next = Self::arm_countdown_tick(model, caps);
                    model.extreme = ExtremePrompt::CountingDown {
                        remaining,
                        timer: next,
                    };
                }
                caps.render.render();
            }

            Event::TimerCancelled { timer } => {
                debug!(timer = %timer, "timer cancelled by shell");
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        view::build(model)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use crux_core::testing::AppTester;
    use crux_core::Request;

    use super::*;
    use crate::capabilities::{Effect, TimerOperation, TimerOutput};
    use crate::event::{LoginForm, Secret, SignupForm};

    type Tester = AppTester<App, Effect>;

    fn timers(effects: Vec<Effect>) -> Vec<Request<TimerOperation>> {
        effects
            .into_iter()
            .filter_map(|e| match e {
                Effect::Timer(request) => Some(request),
                Effect::Render(_) => None,
            })
            .collect()
    }

    fn home() -> Model {
        Model {
            screen: Screen::Home,
            user: Some(UserProfile::new(DEFAULT_USER_NAME)),
            ..Model::default()
        }
    }

    #[test]
    fn app_started_arms_splash_timer() {
        let app = Tester::default();
        let mut model = Model::default();

        let update = app.update(Event::AppStarted, &mut model);

        assert_eq!(model.screen, Screen::Splash);
        let id = model.splash_timer.expect("splash timer armed");
        let requests = timers(update.effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].operation,
            TimerOperation::Start {
                id,
                millis: model.config.splash_delay_ms
            }
        );
    }

    #[test]
    fn splash_elapses_into_onboarding() {
        let app = Tester::default();
        let mut model = Model::default();

        let update = app.update(Event::AppStarted, &mut model);
        let mut request = timers(update.effects).remove(0);
        let id = model.splash_timer.expect("armed");

        let resolved = app
            .resolve(&mut request, TimerOutput::Fired { id })
            .expect("resolves");
        assert_eq!(resolved.events, vec![Event::SplashElapsed { timer: id }]);

        for event in resolved.events {
            app.update(event, &mut model);
        }
        assert_eq!(model.screen, Screen::Onboarding);
        assert_eq!(model.splash_timer, None);
    }

    #[test]
    fn stale_splash_callback_is_ignored() {
        let app = Tester::default();
        let mut model = Model::default();
        app.update(Event::AppStarted, &mut model);
        let id = model.splash_timer.expect("armed");

        app.update(Event::navigate("login"), &mut model);
        let update = app.update(Event::SplashElapsed { timer: id }, &mut model);

        assert_eq!(model.screen, Screen::Login);
        assert!(update.effects.is_empty());
    }

    #[test]
    fn leaving_splash_cancels_its_timer() {
        let app = Tester::default();
        let mut model = Model::default();
        app.update(Event::AppStarted, &mut model);
        let id = model.splash_timer.expect("armed");

        let update = app.update(Event::navigate("onboarding"), &mut model);

        let ops: Vec<_> = timers(update.effects).into_iter().map(|r| r.operation.clone()).collect();
        assert_eq!(ops, vec![TimerOperation::Cancel { id }]);
    }

    #[test]
    fn login_accepts_any_credentials() {
        let app = Tester::default();
        let mut model = Model {
            screen: Screen::Login,
            ..Model::default()
        };

        let update = app.update(Event::Login(LoginForm::default()), &mut model);

        assert_eq!(model.screen, Screen::Home);
        assert_eq!(model.user, Some(UserProfile::new(DEFAULT_USER_NAME)));
        assert_matches!(update.effects.as_slice(), [Effect::Render(_)]);
    }

    #[test]
    fn signup_errors_keep_user_on_form() {
        let app = Tester::default();
        let mut model = Model {
            screen: Screen::Signup,
            ..Model::default()
        };

        app.update(Event::Signup(Box::default()), &mut model);
        assert_eq!(model.screen, Screen::Signup);
        assert_eq!(model.signup_errors.len(), 4);

        let form = SignupForm {
            full_name: "Amna".into(),
            national_id: "1".into(),
            phone: "2".into(),
            password: Secret::new("secret1"),
            confirm_password: Secret::new("secret1"),
        };
        app.update(Event::Signup(Box::new(form)), &mut model);
        assert_eq!(model.screen, Screen::Home);
        assert!(model.signup_errors.is_empty());
        assert_eq!(model.user, Some(UserProfile::new("Amna")));
    }

    #[test]
    fn blank_description_raises_alert_only() {
        let app = Tester::default();
        let mut model = home();
        model.screen = Screen::ReportDetail;

        let form = ReportForm::default().with_description("   ");
        app.update(Event::SubmitReport(Box::new(form)), &mut model);

        assert_eq!(model.screen, Screen::ReportDetail);
        assert_eq!(model.reports.len(), 5);
        assert_eq!(
            model.alert.as_ref().map(|a| a.message.as_str()),
            Some("الرجاء إدخال وصف للبلاغ")
        );

        app.update(Event::DismissAlert, &mut model);
        assert_eq!(model.alert, None);
    }

    #[test]
    fn submission_waits_for_alert_dismissal() {
        let app = Tester::default();
        let mut model = home();
        model.screen = Screen::ReportDetail;

        app.update(Event::SubmitReport(Box::default()), &mut model);
        assert!(model.alert.is_some());

        let form = ReportForm::default().with_description("ok");
        let update = app.update(Event::SubmitReport(Box::new(form.clone())), &mut model);
        assert!(update.effects.is_empty());
        assert_eq!(model.screen, Screen::ReportDetail);
        assert_eq!(model.reports.len(), 5);

        app.update(Event::DismissAlert, &mut model);
        app.update(Event::SubmitReport(Box::new(form)), &mut model);
        assert_eq!(model.screen, Screen::Success);
        assert_eq!(model.reports.len(), 6);
        assert_eq!(model.alert, None);
        assert_eq!(app.view(&model).alert, None);
    }

    #[test]
    fn leaving_signup_clears_field_errors() {
        let app = Tester::default();
        let mut model = Model {
            screen: Screen::Signup,
            ..Model::default()
        };
        app.update(Event::Signup(Box::default()), &mut model);
        assert_eq!(model.signup_errors.len(), 4);

        app.update(Event::navigate("onboarding"), &mut model);
        app.update(Event::navigate("signup"), &mut model);

        assert!(model.signup_errors.is_empty());
        assert_matches!(
            app.view(&model).state,
            crate::view::ViewState::Signup { errors } if errors.is_empty()
        );
    }

    #[test]
    fn blank_navigation_lands_on_named_fallback() {
        let app = Tester::default();
        let mut model = home();

        app.update(Event::navigate("  "), &mut model);

        let vm = app.view(&model);
        assert_eq!(vm.screen, crate::UNKNOWN_SCREEN);
        assert_matches!(
            vm.state,
            crate::view::ViewState::NotImplemented { requested, back_to }
                if requested == "unknown" && back_to == "home"
        );
    }

    #[test]
    fn unknown_report_selection_is_ignored() {
        let app = Tester::default();
        let mut model = home();
        let missing = crate::model::ReportId::from_sequence(2025, 99);

        let update = app.update(Event::SelectReport { id: missing }, &mut model);

        assert_eq!(model.screen, Screen::Home);
        assert_eq!(model.selected_report, None);
        assert!(update.effects.is_empty());
    }

    #[test]
    fn confirm_without_prompt_does_nothing() {
        let app = Tester::default();
        let mut model = home();

        let update = app.update(Event::ConfirmExtreme, &mut model);

        assert_eq!(model.extreme, ExtremePrompt::Closed);
        assert!(update.effects.is_empty());
    }

    #[test]
    fn reopening_prompt_keeps_running_countdown() {
        let app = Tester::default();
        let mut model = home();
        app.update(Event::SelectReportType { kind: ReportKind::Extreme }, &mut model);
        app.update(Event::ConfirmExtreme, &mut model);
        let running = model.extreme.clone();

        app.update(Event::SelectReportType { kind: ReportKind::Extreme }, &mut model);

        assert_eq!(model.extreme, running);
    }

    #[test]
    fn teardown_cancels_pending_timers() {
        let app = Tester::default();
        let mut model = home();
        app.update(Event::SelectReportType { kind: ReportKind::Extreme }, &mut model);
        app.update(Event::ConfirmExtreme, &mut model);
        let id = model.extreme.timer().expect("counting");

        let update = app.update(Event::Teardown, &mut model);

        let ops: Vec<_> = timers(update.effects).into_iter().map(|r| r.operation.clone()).collect();
        assert_eq!(ops, vec![TimerOperation::Cancel { id }]);
        assert_eq!(model.extreme, ExtremePrompt::Closed);
    }

    #[test]
    fn teardown_on_splash_cancels_splash_timer() {
        let app = Tester::default();
        let mut model = Model::default();
        app.update(Event::AppStarted, &mut model);
        let id = model.splash_timer.expect("armed");

        let update = app.update(Event::Teardown, &mut model);

        let ops: Vec<_> = timers(update.effects)
            .into_iter()
            .map(|r| r.operation.clone())
            .collect();
        assert_eq!(ops, vec![TimerOperation::Cancel { id }]);
        assert_eq!(model.splash_timer, None);

        // A fire that raced the teardown does nothing.
        app.update(Event::SplashElapsed { timer: id }, &mut model);
        assert_eq!(model.screen, Screen::Splash);
    }

    #[test]
    fn view_reflects_model() {
        let app = Tester::default();
        let model = home();
        let vm = app.view(&model);
        assert_eq!(vm.screen, "home");
        assert_eq!(vm.reports.len(), 5);
        assert!(vm.bottom_nav.is_some());
    }
}
