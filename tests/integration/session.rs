//! Session login, token propagation and teardown

use redfish_validate::error::RedfishError;
use redfish_validate::redfish::Session;

use super::helpers::{BmcState, MockBmc, SESSION_URI, TEST_TOKEN};

#[test]
fn test_login_attaches_token_to_every_request() {
    let bmc = MockBmc::start();
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");

    assert_eq!(session.token(), TEST_TOKEN);
    assert_eq!(session.resource(), Some(SESSION_URI));

    session.client().get("/redfish/v1/").expect("Should GET root");
    session
        .client()
        .get("/redfish/v1/Systems/system")
        .expect("Should GET system");
    assert!(session.logout());

    let requests = bmc.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].token, None);
    for request in &requests[1..] {
        assert_eq!(request.token.as_deref(), Some(TEST_TOKEN), "{}", request.path);
    }
}

#[test]
fn test_login_posts_configured_credentials() {
    let bmc = MockBmc::start();
    let _session = Session::login(&bmc.redfish_config()).expect("Should log in");

    let login = &bmc.requests()[0];
    let body: serde_json::Value = serde_json::from_str(&login.body).expect("Should be JSON");
    assert_eq!(body["UserName"], "root");
    assert_eq!(body["Password"], "0penBmc");
}

#[test]
fn test_logout_deletes_session_exactly_once() {
    let bmc = MockBmc::start();
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");

    assert!(session.logout());
    assert_eq!(bmc.count("DELETE", SESSION_URI), 1);
}

#[test]
fn test_drop_deletes_session() {
    let bmc = MockBmc::start();
    {
        let _session = Session::login(&bmc.redfish_config()).expect("Should log in");
        assert_eq!(bmc.count("DELETE", SESSION_URI), 0);
    }
    assert_eq!(bmc.count("DELETE", SESSION_URI), 1);
}

#[test]
fn test_session_uri_falls_back_to_id() {
    let bmc = MockBmc::with_state(BmcState {
        location_header: false,
        ..BmcState::default()
    });
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");

    assert_eq!(session.resource(), Some(SESSION_URI));
    assert!(session.logout());
    assert_eq!(bmc.count("DELETE", SESSION_URI), 1);
}

#[test]
fn test_wrong_password_is_rejected() {
    let bmc = MockBmc::start();
    let mut config = bmc.redfish_config();
    config.password = "wrong".to_string();

    let err = Session::login(&config).expect_err("Login should fail");
    assert!(matches!(err, RedfishError::LoginRejected { status: 401, .. }));
}

#[test]
fn test_login_without_created_status_is_rejected() {
    let bmc = MockBmc::with_state(BmcState {
        login_status: 200,
        ..BmcState::default()
    });

    let err = Session::login(&bmc.redfish_config()).expect_err("Login should fail");
    assert!(matches!(err, RedfishError::LoginRejected { status: 200, .. }));
    assert_eq!(bmc.count("DELETE", SESSION_URI), 0);
}

#[test]
fn test_login_without_token_is_rejected() {
    let bmc = MockBmc::with_state(BmcState {
        issue_token: false,
        ..BmcState::default()
    });

    let err = Session::login(&bmc.redfish_config()).expect_err("Login should fail");
    assert!(matches!(err, RedfishError::MissingAuthToken));
}

#[test]
fn test_failed_delete_is_reported_not_raised() {
    let bmc = MockBmc::with_state(BmcState {
        delete_status: 500,
        ..BmcState::default()
    });
    let session = Session::login(&bmc.redfish_config()).expect("Should log in");

    assert!(!session.logout());
    assert_eq!(bmc.count("DELETE", SESSION_URI), 1);
}

#[test]
fn test_unreachable_bmc_is_a_transport_error() {
    let mut config = redfish_validate::config::RedfishConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    };
    config.request_timeout_secs = 2;

    let err = Session::login(&config).expect_err("Login should fail");
    assert!(matches!(err, RedfishError::Transport { .. }));
}
