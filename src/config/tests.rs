use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_are_applied() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.content.directory, PathBuf::from("content"));
    assert!(settings.render.highlight_code);
    assert!(!settings.render.legacy_heading_tags);
    assert!(!settings.render.unique_anchors);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let err = Settings::from_raw(raw).expect_err("invalid port");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn invalid_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn empty_content_directory_is_rejected() {
    let mut raw = RawSettings::default();
    raw.content.directory = Some(PathBuf::new());

    let err = Settings::from_raw(raw).expect_err("empty directory");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "content.directory",
            ..
        }
    ));
}

#[test]
fn render_overrides_flow_into_settings() {
    let mut raw = RawSettings::default();
    let overrides = RenderOverrides {
        content_directory: Some(PathBuf::from("docs")),
        highlight_code: Some(false),
        legacy_heading_tags: Some(true),
        unique_anchors: Some(true),
    };

    raw.apply_render_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.content.directory, PathBuf::from("docs"));
    assert!(!settings.render.highlight_code);
    assert!(settings.render.legacy_heading_tags);
    assert!(settings.render.unique_anchors);
}

#[test]
fn config_file_values_are_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("site.toml");
    std::fs::write(
        &path,
        "[server]\nport = 8080\n\n[render]\nunique_anchors = true\n",
    )
    .expect("write config");

    let cli = CliArgs::parse_from([
        "anaconda",
        "--config-file",
        path.to_str().expect("utf-8 path"),
        "serve",
    ]);
    let settings = load(&cli).expect("settings");

    assert_eq!(settings.server.addr.port(), 8080);
    assert!(settings.render.unique_anchors);
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["anaconda"]);
    assert!(args.command.is_none());
}

#[test]
fn parse_render_command_arguments() {
    let args = CliArgs::parse_from([
        "anaconda",
        "render",
        "mocks/markdown_template.md",
        "--var",
        "name=Starfighter",
        "--navigation",
        "--render-unique-anchors=true",
    ]);

    match args.command.expect("render command") {
        Command::Render(render) => {
            assert_eq!(render.document, "mocks/markdown_template.md");
            assert_eq!(
                render.vars,
                vec![("name".to_string(), "Starfighter".to_string())]
            );
            assert!(render.navigation);
            assert_eq!(render.overrides.unique_anchors, Some(true));
        }
        _ => panic!("wrong command parsed"),
    }
}
