use std::path::PathBuf;

use scroll_showcase::config::{Config, ConfigError};
use scroll_showcase::core::Viewport;
use scroll_showcase::timeline::TimelineError;
use scroll_showcase::AppState;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}.json", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_load_from_file_and_bootstrap() {
        let path = write_temp(
            "showcase-tall",
            r#"{
                "window": {"title": "Tall", "antialias": false},
                "page": {"blocks": [
                    {"id": "intro", "height_vh": 1.0},
                    {"id": "section1", "height_vh": 2.0},
                    {"id": "section2", "height_vh": 2.0},
                    {"id": "section3", "height_vh": 2.0},
                    {"id": "outro", "height_vh": 1.0}
                ]}
            }"#,
        );
        let config = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.window.title, "Tall");
        assert!(!config.window.antialias);

        let state =
            AppState::bootstrap(Viewport::new(800.0, 600.0, 1.0), config.page.layout()).unwrap();
        assert_eq!(state.scroll.max(), 7.0 * 600.0);
        let span = state
            .timeline
            .span("cube-rotation", &state.page, 600.0)
            .unwrap();
        assert_eq!((span.start, span.end), (300.0, 1500.0));
    }

    #[test]
    fn test_layout_missing_a_section_fails_bootstrap() {
        let config = Config::from_json(
            r#"{"page": {"blocks": [{"id": "intro", "height_vh": 1.0}, {"id": "section1", "height_vh": 1.0}]}}"#,
        )
        .unwrap();
        let result = AppState::bootstrap(Viewport::new(800.0, 600.0, 1.0), config.page.layout());
        assert!(matches!(result, Err(TimelineError::UnknownAnchor(id)) if id == "section2"));
    }

    #[test]
    fn test_invalid_file_reports_serde_error() {
        let path = write_temp("showcase-bad", r#"{"input": {"zoom_speed": "fast"}}"#);
        let result = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Serde(_))));
    }
}
