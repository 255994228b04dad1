// basefilter-core/tests/filter_session.rs

use basefilter_core::config::{load_settings_from, parse_settings};
use basefilter_core::{extract_filter_value, splice, ConfigError, Settings};
use insta::assert_snapshot;
use std::fs;
use tempfile::TempDir;

mod helpers;
use helpers::*;

const CRM_PEOPLE: &str = "\
filters:
  and:
    - file.inFolder(\"People\")
    - file.name != \"People\"
views:
  - type: table
    name: Table
    order:
      - file.name
      - City
";

const TAB_TEMPLATE: &str = "\nfilters:\n\tand:\n\t\t- file.inFolder(\"People\")\n\nviews:\n\t- type: cards\n";

#[test]
fn test_typing_then_clearing_restores_template() {
    let typed = type_values(CRM_PEOPLE, &["A", "Ad", "Ada", "Adam"]);

    assert_snapshot!(typed, @r#"
    filters:
      and:
        - file.inFolder("People")
        - file.name != "People"
        - file.name.contains("Adam")
    views:
      - type: table
        name: Table
        order:
          - file.name
          - City
    "#);
    assert_eq!(splice(&typed, ""), CRM_PEOPLE);
}

#[test]
fn test_backspacing_to_empty_restores_template() {
    let cleared = type_values(CRM_PEOPLE, &["B", "Bo", "B", ""]);
    assert_eq!(cleared, CRM_PEOPLE);
}

#[test]
fn test_tab_template_session() {
    let typed = type_values(TAB_TEMPLATE, &["Jo", "Joe"]);

    assert!(typed.contains("\t\t- file.inFolder(\"People\")\n\t\t- file.name.contains(\"Joe\")\n"));
    assert_eq!(type_values(&typed, &[""]), TAB_TEMPLATE);
}

#[test]
fn test_views_only_template_session() {
    let template = "views:\n  - type: table\n    name: Table\n";

    let typed = splice(template, "Adam");
    assert_eq!(typed.lines().count(), template.lines().count() + 3);
    assert!(typed.ends_with(template));
    assert_eq!(splice(&typed, ""), template);
}

#[test]
fn test_properties_hold_for_odd_values() {
    let templates = [CRM_PEOPLE, TAB_TEMPLATE, "", "\n\n", "views:\n", "filters:\n", "  and:\n"];
    let values = [
        "a", "Ann Lee", "ščř", "(paren)", "  padded  ", "a.b*c", "a\nb", "a\r\nb", "a\rb", "end\n",
    ];

    for template in templates {
        for value in values {
            assert_well_formed(template, value);
        }
        assert!(!splice(template, "").contains("file.name.contains"));
    }
}

#[test]
fn test_multiline_value_cleared_without_leftovers() {
    let typed = type_values(CRM_PEOPLE, &["Ada\nLovelace", "Ada\nLovelace"]);

    assert_eq!(extract_filter_value(&typed), "Ada Lovelace");
    assert_eq!(splice(&typed, ""), CRM_PEOPLE);
}

#[test]
fn test_single_quoted_clause_is_replaced() {
    let content = "filters:\n  and:\n    - file.name.contains('Old')\n";
    let spliced = splice(content, "New");

    assert_eq!(spliced, "filters:\n  and:\n    - file.name.contains(\"New\")\n");
    assert_eq!(extract_filter_value(&spliced), "New");
}

#[test]
fn test_settings_from_vault_file() {
    let temp = TempDir::new().unwrap();
    let notes = temp.path().join("notes/people");
    fs::create_dir_all(&notes).unwrap();
    fs::write(
        temp.path().join("basefilter.toml"),
        "[other]\nkey = 1\n\n[basefilter]\ncode-fence-language = \"bases\"\ninput-debounce-ms = 0\n",
    )
    .unwrap();

    let settings = load_settings_from(&notes).unwrap();

    assert_eq!(
        settings,
        Settings {
            code_fence_language: "bases".to_string(),
            input_debounce_ms: 0,
            ..Settings::default()
        }
    );
}

#[test]
fn test_settings_errors() {
    assert!(matches!(
        parse_settings("[other]\nkey = 1\n"),
        Err(ConfigError::MissingSection)
    ));
    assert!(matches!(
        parse_settings("[basefilter]\ntarget-embeds = maybe\n"),
        Err(ConfigError::Invalid(_))
    ));
}
