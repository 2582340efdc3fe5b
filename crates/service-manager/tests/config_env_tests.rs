//! Environment override tests
//!
//! Kept in their own test binary: the variables set here are process-wide.
use std::env;
use std::fs;

use service_manager::*;
use tempfile::TempDir;

#[test]
fn test_environment_overrides_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("services.toml");
    fs::write(
        &path,
        r#"
shared_by_default = true

[aliases]
mail = "Mailer"

[shared]
Mailer = true
"#,
    )
    .unwrap();

    env::set_var("SERVICE_MANAGER_SHARED_BY_DEFAULT", "false");
    env::set_var("SERVICE_MANAGER_ALIASES__MAIL", "Sendmail");
    env::set_var("SERVICE_MANAGER_SHARED__REQUEST", "false");

    let loaded = ServiceManagerConfig::load(&path);
    let from_env = ServiceManagerConfig::from_env();

    env::remove_var("SERVICE_MANAGER_SHARED_BY_DEFAULT");
    env::remove_var("SERVICE_MANAGER_ALIASES__MAIL");
    env::remove_var("SERVICE_MANAGER_SHARED__REQUEST");

    let config = loaded.unwrap();
    assert_eq!(config.shared_by_default, Some(false));
    assert_eq!(config.aliases.get("mail").map(String::as_str), Some("Sendmail"));
    assert_eq!(config.shared.get("request"), Some(&false));
    // File keys untouched by the environment keep their case
    assert_eq!(config.shared.get("Mailer"), Some(&true));

    let from_env = from_env.unwrap();
    assert_eq!(from_env.shared_by_default, Some(false));
    assert!(from_env.factories.is_empty());

    let cleared = ServiceManagerConfig::from_env().unwrap();
    assert!(cleared.is_empty());
}
