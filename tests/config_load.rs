use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use modwatch::config::{load_and_validate, load_from_path, validate_config};

type TestResult = Result<(), Box<dyn Error>>;

fn write_temp_config(contents: &str) -> Result<tempfile::NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn demo_config_loads_and_validates() -> TestResult {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cfg = load_and_validate(manifest.join("demos/Modwatch.toml"))?;

    assert_eq!(cfg.domain, "example.com");
    assert_eq!(cfg.live_posts.reconnect_delay_secs, 5);
    assert_eq!(cfg.reports.poll_interval_secs, 60);
    assert_eq!(cfg.auth.cookie.as_deref(), Some("connect.sid=s%3Aexample"));
    assert_eq!(cfg.alerts.watchwords.len(), 2);
    assert_eq!(cfg.alerts.notify_command.as_deref(), Some("notify-send"));

    Ok(())
}

#[test]
fn minimal_config_gets_defaults() -> TestResult {
    let file = write_temp_config("domain = \"board.example\"\n")?;
    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.domain, "board.example");
    assert_eq!(cfg.live_posts.reconnect_delay_secs, 5);
    assert_eq!(cfg.reports.poll_interval_secs, 60);
    assert!(cfg.auth.cookie.is_none());
    assert!(cfg.alerts.watchwords.is_empty());
    assert!(cfg.alerts.notify_command.is_none());

    Ok(())
}

#[test]
fn empty_domain_is_rejected() -> TestResult {
    let file = write_temp_config("domain = \"\"\n")?;
    let cfg = load_from_path(file.path())?;

    let err = validate_config(&cfg).unwrap_err();
    assert!(err.to_string().contains("domain"));

    Ok(())
}

#[test]
fn domain_with_scheme_is_rejected() -> TestResult {
    let file = write_temp_config("domain = \"https://board.example\"\n")?;
    let cfg = load_from_path(file.path())?;

    assert!(validate_config(&cfg).is_err());

    Ok(())
}

#[test]
fn zero_poll_interval_is_rejected() -> TestResult {
    let file = write_temp_config(
        "domain = \"board.example\"\n\n[reports]\npoll_interval_secs = 0\n",
    )?;
    let cfg = load_from_path(file.path())?;

    let err = validate_config(&cfg).unwrap_err();
    assert!(err.to_string().contains("poll_interval_secs"));

    Ok(())
}

#[test]
fn zero_reconnect_delay_is_rejected() -> TestResult {
    let file = write_temp_config(
        "domain = \"board.example\"\n\n[live_posts]\nreconnect_delay_secs = 0\n",
    )?;
    let cfg = load_from_path(file.path())?;

    assert!(validate_config(&cfg).is_err());

    Ok(())
}

#[test]
fn broken_watchword_regex_is_rejected() -> TestResult {
    let file = write_temp_config(
        "domain = \"board.example\"\n\n[alerts]\nwatchwords = [\"(unclosed\"]\n",
    )?;
    let cfg = load_from_path(file.path())?;

    let err = validate_config(&cfg).unwrap_err();
    assert!(err.to_string().contains("watchwords"));

    Ok(())
}
