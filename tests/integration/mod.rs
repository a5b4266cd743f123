//! Integration tests for redfish-validate
//!
//! These tests drive the library against an in-process mock BMC that speaks
//! enough Redfish to exercise sessions, power transitions and thermal
//! discovery, with virtual time for every poll.

pub mod ipmi_tool;
pub mod power;
pub mod session;
