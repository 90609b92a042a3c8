#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::*;

    #[test]
    fn full_config_parses() {
        let ron = r#"(
            scenario: (id: Some(7), smart: true),
            actions: [
                (name: "Buy button", logic_key: "/buy1"),
                (logic_key: "/sell1"),
            ],
            routes: [
                (key: "/scan", category: CurrencySearch, label: "Scan Currencies"),
            ],
        )"#;
        let cfg = load_from_str(ron, None).unwrap();
        assert_eq!(cfg.scenario, ScenarioSpec { id: Some(7), smart: true });
        let keys: Vec<&str> = cfg.action_keys().map(LogicKey::as_str).collect();
        assert_eq!(keys, vec!["/buy1", "/sell1"]);
        assert_eq!(cfg.actions[1].name, "");
        assert_eq!(cfg.routes[0].category, WorkflowCategory::CurrencySearch);
        assert_eq!(cfg.routes[0].label, "Scan Currencies");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = load_from_str("()", None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.scenario.id, None);
        assert!(!cfg.scenario.smart);
    }

    #[test]
    fn blank_logic_key_fails_validation() {
        let ron = r#"(actions: [(logic_key: "   ")])"#;
        let err = load_from_str(ron, Some(Path::new("cfg.ron"))).unwrap_err();
        match &err {
            Error::Validation { message, .. } => assert!(message.contains(LOGIC_KEY_REQUIRED)),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(err.path(), Some(Path::new("cfg.ron")));
    }

    #[test]
    fn unknown_field_fails() {
        let ron = r#"(actions: [(logic_key: "/free", delay: 3)])"#;
        assert!(load_from_str(ron, None).is_err());
    }

    #[test]
    fn syntax_error_reports_location() {
        let ron = "(\n  actions: [\n    (logic_key: \"/free\"\n  ],\n)";
        match load_from_str(ron, None).unwrap_err() {
            Error::Parse { line, excerpt, .. } => {
                assert!(line >= 3);
                assert!(excerpt.contains('^'));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_ron_extension_is_rejected() {
        let err = load_from_path(Path::new("settings.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.pretty().contains("expected a .ron file"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_from_path(Path::new("/nonexistent/logickey.ron")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(Path::new("/nonexistent/logickey.ron")));
    }
}
