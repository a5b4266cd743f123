//! `ipmitool` invocation through stand-in shell scripts

#![cfg(unix)]

use redfish_validate::config::IpmiConfig;
use redfish_validate::error::IpmiError;
use redfish_validate::ipmi::{IpmiSensorSource, IpmiTool};
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const SENSOR_TABLE: &str = "\
Inlet Temp       | na         | degrees C  | na    | na        | na        | na        | na        | na        | na
CPU Temp         | 47.000     | degrees C  | ok    | na        | na        | na        | 90.000    | 95.000    | na
Fan0             | 4200.000   | RPM        | ok    | na        | 500.000   | na        | na        | na        | na
";

/// Write an executable script named `ipmitool` into `dir`
fn fake_ipmitool(dir: &Path, body: &str) -> String {
    let path = dir.join("ipmitool");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Should write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("Should chmod script");
    path.to_string_lossy().into_owned()
}

fn tool(command: String, timeout_secs: u64) -> IpmiTool {
    IpmiTool::new(IpmiConfig {
        command,
        timeout_secs,
        ..IpmiConfig::default()
    })
}

#[test]
#[serial]
fn test_reads_cpu_temperature_from_sensor_table() {
    let temp_dir = TempDir::new().unwrap();
    let args_file = temp_dir.path().join("args.txt");
    let command = fake_ipmitool(
        temp_dir.path(),
        &format!(
            "echo \"$@\" > '{}'\ncat <<'OUT'\n{SENSOR_TABLE}OUT",
            args_file.display()
        ),
    );

    let ipmi = tool(command, 5);
    assert_eq!(ipmi.cpu_temperature(), Some(47.0));

    let args = fs::read_to_string(&args_file).expect("Script should record its arguments");
    assert_eq!(
        args.trim(),
        "-I lanplus -H 127.0.0.1 -p 2623 -U root -P 0penBmc sensor"
    );
}

#[test]
#[serial]
fn test_non_zero_exit_yields_no_reading() {
    let temp_dir = TempDir::new().unwrap();
    let command = fake_ipmitool(
        temp_dir.path(),
        "echo 'Error: Unable to establish IPMI v2 / RMCP+ session' >&2\nexit 1",
    );

    let ipmi = tool(command, 5);
    match ipmi.read_sensors() {
        Err(IpmiError::ExitStatus { code, stderr }) => {
            assert_eq!(code, Some(1));
            assert!(stderr.contains("Unable to establish"));
        }
        other => panic!("Expected exit status error, got {other:?}"),
    }
    assert_eq!(ipmi.cpu_temperature(), None);
}

#[test]
#[serial]
fn test_slow_tool_times_out() {
    let temp_dir = TempDir::new().unwrap();
    let command = fake_ipmitool(temp_dir.path(), "sleep 10");

    let ipmi = tool(command, 1);
    let start = Instant::now();
    let result = ipmi.read_sensors();

    assert!(matches!(result, Err(IpmiError::Timeout(1))), "{result:?}");
    assert!(start.elapsed() < Duration::from_secs(8));
}

#[test]
#[serial]
fn test_output_without_cpu_reading() {
    let temp_dir = TempDir::new().unwrap();
    let command = fake_ipmitool(
        temp_dir.path(),
        "echo 'Fan0             | 4200.000   | RPM        | ok'",
    );

    assert_eq!(tool(command, 5).cpu_temperature(), None);
}
