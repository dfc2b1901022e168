use super::*;

fn env_with(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |var| {
        pairs
            .iter()
            .find(|(k, _)| *k == var)
            .map(|(_, v)| v.to_string())
    }
}

fn file_config() -> IgdbConfig {
    IgdbConfig {
        client_id: Some("file-id".to_string()),
        client_secret: Some("file-secret".to_string()),
    }
}

#[test]
fn env_overrides_config_file() {
    let env = env_with(&[(CLIENT_ID_VAR, "env-id")]);
    let creds = resolve(env, Some(&file_config())).unwrap();
    assert_eq!(creds, Credentials::new("env-id", "file-secret"));
}

#[test]
fn missing_secret_is_config_error() {
    let env = env_with(&[(CLIENT_ID_VAR, "env-id")]);
    let err = resolve(env, None).unwrap_err();
    assert!(matches!(err, IgdbError::Config(ref m) if m.contains(CLIENT_SECRET_VAR)));
}

#[test]
fn empty_values_count_as_missing() {
    let env = env_with(&[(CLIENT_ID_VAR, ""), (CLIENT_SECRET_VAR, "s")]);
    assert!(resolve(env, None).is_err());
}

#[test]
fn sources_report_provenance() {
    let env = env_with(&[(CLIENT_SECRET_VAR, "env-secret")]);
    let found = sources(env, Some(&file_config()));
    assert_eq!(found.client_id, CredentialSource::ConfigFile);
    assert_eq!(found.client_secret, CredentialSource::EnvVar(CLIENT_SECRET_VAR));

    let none = sources(env_with(&[]), None);
    assert_eq!(none.client_id, CredentialSource::Missing);
    assert_eq!(none.client_id.to_string(), "not set");
}

#[test]
fn save_load_remove() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.toml");

    save_to(&path, &Credentials::new("abc", "def")).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[igdb]"));

    let config = load_config_file(&path).unwrap();
    assert_eq!(config.client_id.as_deref(), Some("abc"));
    assert_eq!(config.client_secret.as_deref(), Some("def"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    assert!(remove_from(&path).unwrap());
    assert!(!remove_from(&path).unwrap());
    assert!(load_config_file(&path).is_none());
}

#[cfg(unix)]
#[test]
fn save_narrows_existing_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    std::fs::write(&path, "[igdb]\nclient_id = \"old-id-that-is-much-longer\"\n").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    save_to(&path, &Credentials::new("new", "secret")).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    let config = load_config_file(&path).unwrap();
    assert_eq!(config.client_id.as_deref(), Some("new"));
    assert_eq!(config.client_secret.as_deref(), Some("secret"));
}

#[test]
fn unreadable_config_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.toml");
    std::fs::write(&path, "not = [valid").unwrap();
    assert!(load_config_file(&path).is_none());
}
