//! Session and config persistence tests

use coursehunt::config::{Config, Context};
use coursehunt::session::{Session, SessionError};

#[test]
fn test_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = Session::path_in(&dir.path().join("nested"));

    let session = Session::new("a.b.c", "u-42", "en");
    session.save_to(&path).unwrap();

    let loaded = Session::load_from(&path).unwrap();
    assert_eq!(loaded, session);
}

#[test]
fn test_missing_session() {
    let dir = tempfile::tempdir().unwrap();
    let err = Session::load_from(&Session::path_in(dir.path())).unwrap_err();
    assert!(matches!(err, SessionError::Missing(_)));
    assert!(err.to_string().contains("coursehunt login"));
}

#[test]
fn test_corrupt_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = Session::path_in(dir.path());
    std::fs::write(&path, "access_token = [not toml").unwrap();

    let err = Session::load_from(&path).unwrap_err();
    assert!(matches!(err, SessionError::Corrupt { .. }));
}

#[test]
fn test_remove_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = Session::path_in(dir.path());
    Session::new("a.b.c", "u", "en").save_to(&path).unwrap();

    assert!(Session::remove_at(&path).unwrap());
    assert!(!Session::remove_at(&path).unwrap());
}

#[test]
fn test_context_loads_config_and_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        base_url: Some("http://localhost:8080/".into()),
        player: Some("/usr/local/bin/mpv".into()),
        player_args: Some(vec!["--fs".into()]),
    };
    config.save_to(dir.path()).unwrap();
    Session::new("a.b.c", "u-42", "en")
        .save_to(&Session::path_in(dir.path()))
        .unwrap();

    let ctx = Context::load(dir.path().to_path_buf()).unwrap();
    assert_eq!(ctx.config, config);
    assert_eq!(ctx.session.user_ident, "u-42");
    assert_eq!(ctx.config.base_url.as_deref(), Some("http://localhost:8080/"));
}

#[test]
fn test_context_without_session_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Context::load(dir.path().to_path_buf()).unwrap_err();
    assert!(err.downcast_ref::<SessionError>().is_some());
}
