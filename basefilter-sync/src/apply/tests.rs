use super::*;
use insta::assert_snapshot;
use tempfile::TempDir;

fn settings() -> Settings {
    Settings::default()
}

#[test]
fn test_document_with_two_blocks() {
    let text = "\
# People

```base
views:
  - type: table
```

Between

```base
filters:
  and:
    - file.inFolder(\"People\")
```
";
    let update = apply_to_document(text, "Ann", "base").unwrap();

    assert_eq!(update.blocks_seen, 2);
    assert_eq!(update.blocks_updated, 2);
    assert_snapshot!(update.text, @r#"
    # People

    ```base
    filters:
      and:
        - file.name.contains("Ann")
    views:
      - type: table
    ```

    Between

    ```base
    filters:
      and:
        - file.inFolder("People")
        - file.name.contains("Ann")
    ```
    "#);
}

#[test]
fn test_document_clear_restores_original() {
    let text = "```base\nviews:\n  - type: table\n```\n\n```base\nfilters:\n  and:\n    - file.inFolder(\"People\")\n```\n";

    let set = apply_to_document(text, "Ann", "base").unwrap();
    let cleared = apply_to_document(&set.text, "", "base").unwrap();

    assert_eq!(cleared.text, text);
    assert_eq!(cleared.blocks_updated, 2);
}

#[test]
fn test_document_is_idempotent() {
    let text = "```base\nviews:\n```\n";
    let once = apply_to_document(text, "Bo", "base").unwrap();
    let twice = apply_to_document(&once.text, "Bo", "base").unwrap();

    assert!(once.changed());
    assert!(!twice.changed());
    assert_eq!(twice.text, once.text);
}

#[test]
fn test_document_ignores_other_languages() {
    let text = "```dataview\nTABLE file.name\n```\n";
    let update = apply_to_document(text, "Ann", "base").unwrap();

    assert_eq!(update.blocks_seen, 0);
    assert_eq!(update.text, text);
}

fn vault() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join(".obsidian")).unwrap();
    fs::create_dir_all(root.join("Bases")).unwrap();
    fs::write(root.join("Bases/People.base"), "views:\n  - type: table\n").unwrap();
    fs::write(
        root.join("Index.md"),
        "# Index\n\n```base\nviews:\n```\n\n![[Bases/People.base|People]]\n![[Missing.base]]\n",
    )
    .unwrap();
    temp
}

#[test]
fn test_note_rewrites_inline_and_collects_embeds() {
    let temp = vault();
    let note = temp.path().join("Index.md");

    let report = apply_to_note(&note, temp.path(), "Ann", &settings(), false).unwrap();

    assert_eq!(report.blocks_seen, 1);
    assert_eq!(report.blocks_updated, 1);
    assert!(report.rewritten);
    assert_eq!(report.referenced, vec![temp.path().join("Bases/People.base")]);
    assert_eq!(report.unresolved, vec!["Missing.base"]);
    assert!(fs::read_to_string(&note)
        .unwrap()
        .contains("file.name.contains(\"Ann\")"));
    assert_eq!(
        fs::read_to_string(temp.path().join("Bases/People.base")).unwrap(),
        "views:\n  - type: table\n"
    );
}

#[test]
fn test_note_dry_run_leaves_file() {
    let temp = vault();
    let note = temp.path().join("Index.md");
    let before = fs::read_to_string(&note).unwrap();

    let report = apply_to_note(&note, temp.path(), "Ann", &settings(), true).unwrap();

    assert_eq!(report.blocks_updated, 1);
    assert!(!report.rewritten);
    assert_eq!(fs::read_to_string(&note).unwrap(), before);
}

#[test]
fn test_note_without_embeds_when_disabled() {
    let temp = vault();
    let note = temp.path().join("Index.md");
    let settings = Settings {
        target_embeds: false,
        ..Settings::default()
    };

    let report = apply_to_note(&note, temp.path(), "Ann", &settings, true).unwrap();

    assert!(report.referenced.is_empty());
    assert!(report.unresolved.is_empty());
}

#[test]
fn test_base_file_round_trip() {
    let temp = vault();
    let path = temp.path().join("Bases/People.base");

    assert!(apply_to_base_file(&path, "Ann", true).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "views:\n  - type: table\n");

    assert!(apply_to_base_file(&path, "Ann", false).unwrap());
    assert!(!apply_to_base_file(&path, "Ann", false).unwrap());
    assert!(apply_to_base_file(&path, "", false).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "views:\n  - type: table\n");
}

#[test]
fn test_scan_and_register() {
    let temp = vault();
    let note = temp.path().join("Index.md");
    fs::write(
        temp.path().join("Bases/People.base"),
        "filters:\n  and:\n    - file.name.contains(\"Bo\")\n",
    )
    .unwrap();

    let scan = scan_note(&note, temp.path(), &settings()).unwrap();
    assert_eq!(scan.inline.len(), 1);
    assert_eq!(scan.referenced.len(), 1);
    assert_eq!(scan.unresolved, vec!["Missing.base"]);

    let mut registry = FilterRegistry::new();
    registry.register("Index.md-inline-7".to_string(), Block::inline(0, 1, String::new()));
    let removed = register_scan(&mut registry, "Index.md", &scan);

    assert_eq!(removed, vec!["Index.md-inline-7"]);
    let values: Vec<(&str, &str)> = registry
        .iter()
        .map(|(key, slot)| (key, slot.value.as_str()))
        .collect();
    assert_eq!(values, vec![("Index.md-embed-0", "Bo"), ("Index.md-inline-0", "")]);
}
