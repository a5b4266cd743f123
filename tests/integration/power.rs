//! Power transitions against the mock BMC, driven by virtual time

use redfish_validate::config::PowerConfig;
use redfish_validate::error::RedfishError;
use redfish_validate::poll::ManualClock;
use redfish_validate::power::{PowerController, Transition};
use redfish_validate::redfish::{PowerState, ResetType, Session};
use reqwest::StatusCode;
use std::time::Duration;

use super::helpers::{BmcState, MockBmc};

const SYSTEM_PATH: &str = "/redfish/v1/Systems/system";

fn bmc_in(state: Option<&str>, after_on: Option<&str>) -> MockBmc {
    MockBmc::with_state(BmcState {
        power_state: state.map(str::to_string),
        power_state_after_on: after_on.map(str::to_string),
        ..BmcState::default()
    })
}

#[test]
fn test_power_on_from_off_observes_transition() {
    let bmc = bmc_in(Some("Off"), Some("On"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect("Power-on should succeed");

    assert_eq!(report.initial, Some(PowerState::Off));
    assert!(!report.forced_off);
    assert_eq!(report.status, StatusCode::NO_CONTENT);
    assert_eq!(
        report.transition,
        Transition::Observed {
            state: Some(PowerState::On),
            attempts: 1
        }
    );
    assert_eq!(bmc.resets(), vec!["On"]);
    assert_eq!(clock.elapsed(), Duration::from_secs(3));
}

#[test]
fn test_power_on_when_already_on_skips_force_off() {
    let bmc = bmc_in(Some("On"), Some("On"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect("Power-on should succeed");

    assert!(!report.forced_off);
    assert_eq!(bmc.resets(), vec!["On"]);
    // On is already a target state, so the first poll accepts
    assert!(report.transition.is_observed());
    assert_eq!(clock.sleep_count(), 1);
}

#[test]
fn test_power_on_from_on_can_force_off_first() {
    let bmc = bmc_in(Some("On"), Some("On"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig {
        force_off_before_on: true,
        ..PowerConfig::default()
    };
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect("Power-on should succeed");

    assert!(report.forced_off);
    assert_eq!(bmc.resets(), vec!["ForceOff", "On"]);
    assert_eq!(clock.elapsed(), Duration::from_secs(5 + 3));
}

#[test]
fn test_power_on_from_intermediate_state_forces_off() {
    let bmc = bmc_in(Some("PoweringOff"), Some("TransitioningToOn"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect("Power-on should succeed");

    assert_eq!(report.initial, Some(PowerState::PoweringOff));
    assert!(report.forced_off);
    assert_eq!(bmc.resets(), vec!["ForceOff", "On"]);
    assert_eq!(
        report.transition,
        Transition::Observed {
            state: Some(PowerState::TransitioningToOn),
            attempts: 1
        }
    );
}

#[test]
fn test_power_on_with_missing_power_state_forces_off() {
    let bmc = bmc_in(None, Some("On"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect("Power-on should succeed");

    assert_eq!(report.initial, None);
    assert!(report.forced_off);
    assert!(report.transition.is_observed());
}

#[test]
fn test_power_on_without_transition_polls_full_window() {
    let bmc = bmc_in(Some("Off"), None);
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect("Accepted request without transition is not an error");

    assert_eq!(
        report.transition,
        Transition::NotObserved {
            last: Some(PowerState::Off),
            attempts: 10
        }
    );
    assert_eq!(clock.elapsed(), Duration::from_secs(30));
    assert_eq!(clock.sleep_count(), 10);
    // initial read plus one read per poll
    assert_eq!(bmc.count("GET", SYSTEM_PATH), 11);
}

#[test]
fn test_rejected_reset_is_an_error() {
    let bmc = MockBmc::with_state(BmcState {
        reset_status: 500,
        ..BmcState::default()
    });
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let err = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_on()
        .expect_err("Power-on should fail");

    assert!(matches!(
        err,
        RedfishError::ResetRejected {
            reset: ResetType::On,
            status: 500,
            ..
        }
    ));
    assert_eq!(clock.sleep_count(), 0);
}

#[test]
fn test_power_cycle_sends_force_off_then_on() {
    let bmc = bmc_in(Some("On"), Some("On"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_cycle()
        .expect("Power cycle should succeed");

    assert_eq!(bmc.resets(), vec!["ForceOff", "On"]);
    assert_eq!(report.off_status, StatusCode::NO_CONTENT);
    assert_eq!(report.on_status, StatusCode::NO_CONTENT);
    assert_eq!(report.final_state, Some(PowerState::On));
    assert_eq!(clock.elapsed(), Duration::from_secs(5 + 10));
    assert_eq!(bmc.count("GET", SYSTEM_PATH), 1);
}

#[test]
fn test_power_cycle_reports_unchanged_state() {
    let bmc = bmc_in(Some("On"), None);
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig::default();
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_cycle()
        .expect("Power cycle should succeed");

    // ForceOff took effect, the On request did not
    assert_eq!(report.final_state, Some(PowerState::Off));
}

#[test]
fn test_power_cycle_without_wait_still_reads_state() {
    let bmc = bmc_in(Some("On"), Some("On"));
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");
    let config = PowerConfig {
        cycle_wait_secs: 0,
        ..PowerConfig::default()
    };
    let clock = ManualClock::new();

    let report = PowerController::new(session.client(), SYSTEM_PATH, &config, &clock)
        .power_cycle()
        .expect("Power cycle should succeed");

    assert_eq!(report.final_state, Some(PowerState::On));
    assert_eq!(bmc.count("GET", SYSTEM_PATH), 1);
    assert_eq!(clock.elapsed(), Duration::from_secs(5));
}
