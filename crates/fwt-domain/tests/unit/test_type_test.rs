//! Tests for test type selection

use fwt_domain::TestType;

#[test]
fn test_prefixes() {
    assert_eq!(TestType::Server.prefix(), "test_");
    assert_eq!(TestType::Control.prefix(), "control_test_");
}

#[test]
fn test_dir_matching_depends_on_type() {
    assert!(TestType::Server.is_test_dir("test_sql_injection"));
    assert!(!TestType::Server.is_test_dir("control_test_restart"));
    assert!(TestType::Control.is_test_dir("control_test_restart"));
    assert!(!TestType::Control.is_test_dir("test_sql_injection"));
    assert!(!TestType::Server.is_test_dir("testlib.py"));
}

#[test]
fn test_parse_from_str() {
    assert_eq!("server".parse::<TestType>(), Ok(TestType::Server));
    assert_eq!(" Control ".parse::<TestType>(), Ok(TestType::Control));
    assert!("both".parse::<TestType>().is_err());
}

#[test]
fn test_only_control_uses_control_server() {
    assert!(TestType::Control.uses_control_server());
    assert!(!TestType::Server.uses_control_server());
}
