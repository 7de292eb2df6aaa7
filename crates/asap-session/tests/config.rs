use asap_session::{ConfigError, Session, SessionConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("asap.toml");
    fs::write(
        &path,
        r#"
effect_inference = true
report_non_minimal = false
constraint_prefix = "esi"
"#,
    )
    .unwrap();

    let config = SessionConfig::from_file(&path).unwrap();
    assert_eq!(
        config,
        SessionConfig {
            effect_inference: true,
            simplify_constraints: true,
            report_non_minimal: false,
            constraint_prefix: "esi".to_string(),
        }
    );

    let mut session = Session::new(config);
    session.declare_function("f", None).unwrap();
    assert_eq!(session.summary("f").unwrap().to_string(), "?f_sig");
}

#[test]
fn test_missing_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    let err = SessionConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_wrong_type_is_a_parse_error() {
    let err = SessionConfig::from_toml_str("effect_inference = \"yes\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
