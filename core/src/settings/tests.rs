use super::*;
use tempfile::TempDir;

#[test]
fn missing_file_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let settings = AppSettings::load(&AppSettings::path(temp.path())).unwrap();
    assert_eq!(settings, AppSettings::default());
}

#[test]
fn defaults_match_panel_layout() {
    let settings = AppSettings::default();
    assert!(settings.general.always_on_top);
    assert_eq!(settings.general.status_timeout(), Duration::from_secs(2));
    assert!(settings.paste.enabled);
    assert_eq!(settings.paste.delay(), Duration::from_millis(100));
    assert_eq!(settings.shortcuts.toggle_panel, "Ctrl+Alt+Q");
    assert_eq!(
        settings.window,
        WindowSettings {
            x: 100,
            y: 70,
            width: 280,
            height: 750
        }
    );
    assert!(settings.validate().is_empty());
}

#[test]
fn partial_file_fills_missing_fields() {
    let temp = TempDir::new().unwrap();
    let path = AppSettings::path(temp.path());
    std::fs::write(
        &path,
        "[general]\nalways_on_top = false\n\n[window]\nx = 5\n",
    )
    .unwrap();

    let settings = AppSettings::load(&path).unwrap();

    assert!(!settings.general.always_on_top);
    assert_eq!(settings.general.status_timeout_ms, 2000);
    assert_eq!(settings.window.x, 5);
    assert_eq!(settings.window.y, 70);
    assert_eq!(settings.paste, PasteSettings::default());
}

#[test]
fn save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = AppSettings::path(temp.path());
    let mut settings = AppSettings::default();
    settings.window.x = 640;
    settings.paste.enabled = false;
    settings.shortcuts.toggle_panel = String::new();

    settings.save(&path).unwrap();

    assert_eq!(AppSettings::load(&path).unwrap(), settings);
}

#[test]
fn malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = AppSettings::path(temp.path());
    std::fs::write(&path, "[general\nalways_on_top = ").unwrap();

    assert!(matches!(
        AppSettings::load(&path),
        Err(SettingsError::Parse(_))
    ));
}

#[test]
fn invalid_values_are_replaced() {
    let mut settings = AppSettings::default();
    settings.general.status_timeout_ms = 0;
    settings.paste.delay_ms = 60_000;
    settings.window.width = 10;
    settings.window.x = 33;

    assert_eq!(settings.validate().len(), 3);

    let fixed = settings.with_defaults_for_invalid();
    assert_eq!(fixed.general.status_timeout_ms, 2000);
    assert_eq!(fixed.paste.delay_ms, 100);
    assert_eq!(fixed.window.width, 280);
    assert_eq!(fixed.window.x, 33);
    assert!(fixed.validate().is_empty());
}
