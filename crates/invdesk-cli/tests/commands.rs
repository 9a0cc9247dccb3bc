//! Command-level tests: keystroke replay, persisted selection and config.

use std::path::Path;

use invdesk_cli::cli::{
    DeleteArgs, FieldArgs, FieldKindArg, LocaleArg, SelectAction, SelectArgs, ViewArgs,
};
use invdesk_cli::commands::{client_config, run_delete, run_mask, run_select};
use invdesk_cli::summary::selection_table;
use invdesk_model::NoticeLevel;

fn view_args(state: &Path, q: &str) -> ViewArgs {
    ViewArgs {
        view: "entrada_nf".to_string(),
        state: state.to_path_buf(),
        q: q.to_string(),
        filters: vec!["fornecedor_id=3".to_string()],
    }
}

fn select(state: &Path, action: SelectAction, ids: &[&str]) -> SelectArgs {
    SelectArgs {
        action,
        ids: ids.iter().map(ToString::to_string).collect(),
        view: view_args(state, "parafuso"),
    }
}

fn delete_args(state: &Path) -> DeleteArgs {
    DeleteArgs {
        view: view_args(state, "parafuso"),
        page: 1,
        config: None,
        base_url: None,
        csrf_token: None,
        timeout_secs: None,
    }
}

#[test]
fn mask_replay_snapshot() {
    let report = run_mask(&FieldArgs {
        text: "1234".to_string(),
        kind: FieldKindArg::Number,
        decimals: Some(2),
        column: None,
        locale: LocaleArg::PtBr,
    })
    .unwrap();

    insta::assert_json_snapshot!(report, @r#"
    {
      "kind": "number",
      "decimal_places": 2,
      "steps": [
        {
          "key": "1",
          "display": "0,01",
          "caret": 1
        },
        {
          "key": "2",
          "display": "0,12",
          "caret": 4
        },
        {
          "key": "3",
          "display": "1,23",
          "caret": 4
        },
        {
          "key": "4",
          "display": "12,34",
          "caret": 5
        }
      ],
      "display": "12,34",
      "value": "12.34"
    }
    "#);
}

#[test]
fn document_replay_switches_layout() {
    let report = run_mask(&FieldArgs {
        text: "12345678000195".to_string(),
        kind: FieldKindArg::Document,
        decimals: None,
        column: None,
        locale: LocaleArg::PtBr,
    })
    .unwrap();

    assert_eq!(report.steps[10].display, "123.456.780-00");
    assert_eq!(report.display, "12.345.678/0001-95");
    assert_eq!(report.value.as_deref(), Some("CNPJ"));
}

#[test]
fn selection_survives_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("selection.json");

    let report = run_select(&select(&state, SelectAction::Page, &["5", "9"])).unwrap();
    assert_eq!(report.button.as_deref(), Some("Delete (2)"));
    assert_eq!(report.header, "checked");

    let report = run_select(&select(&state, SelectAction::Toggle, &["5"])).unwrap();
    assert_eq!(report.ids, ["9"]);
    assert_eq!(report.header, "unchecked");

    let report = run_select(&select(&state, SelectAction::Show, &["9", "12"])).unwrap();
    insta::assert_json_snapshot!(report, @r#"
    {
      "view": "entrada_nf",
      "mode": "explicit",
      "count": "1",
      "ids": [
        "9"
      ],
      "button": "Delete (1)",
      "header": "indeterminate"
    }
    "#);
}

#[test]
fn select_all_then_change_filter_discards() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("selection.json");

    let report = run_select(&select(&state, SelectAction::All, &[])).unwrap();
    assert_eq!(report.mode, "all matching");
    assert_eq!(report.button.as_deref(), Some("Delete (all pages)"));

    let other_filter = SelectArgs {
        view: view_args(&state, "porca"),
        ..select(&state, SelectAction::Show, &[])
    };
    let report = run_select(&other_filter).unwrap();
    assert_eq!(report.mode, "empty");
    assert_eq!(report.button, None);
}

#[test]
fn toggle_needs_one_id() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("selection.json");
    let err = run_select(&select(&state, SelectAction::Toggle, &["1", "2"])).unwrap_err();
    assert!(err.to_string().contains("exactly one id"));
}

#[test]
fn selection_table_lists_the_ids() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("selection.json");
    let report = run_select(&select(&state, SelectAction::Page, &["5", "9"])).unwrap();

    let mut table = selection_table(&report);
    let rendered = table.force_no_tty().to_string();
    assert!(rendered.contains("entrada_nf"));
    assert!(rendered.contains("5, 9"));
    assert!(rendered.contains("Delete (2)"));
}

#[test]
fn config_file_is_overridden_by_flags() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("client.json");
    std::fs::write(
        &config_path,
        r#"{"base_url": "https://estoque.example", "csrf_token": "from-file", "timeout_secs": 5}"#,
    )
    .unwrap();

    let args = DeleteArgs {
        config: Some(config_path),
        csrf_token: Some("from-flag".to_string()),
        ..delete_args(&dir.path().join("selection.json"))
    };
    let config = client_config(&args).unwrap();
    assert_eq!(config.base_url, "https://estoque.example");
    assert_eq!(config.csrf_token.as_deref(), Some("from-flag"));
    assert_eq!(config.timeout_secs, 5);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = DeleteArgs {
        config: Some(dir.path().join("absent.json")),
        ..delete_args(&dir.path().join("selection.json"))
    };
    assert!(client_config(&args).is_err());
}

#[tokio::test]
async fn delete_with_nothing_selected_stays_offline() {
    let dir = tempfile::tempdir().unwrap();
    let args = DeleteArgs {
        base_url: Some("http://127.0.0.1:9".to_string()),
        ..delete_args(&dir.path().join("selection.json"))
    };

    let outcome = run_delete(&args).await.unwrap();

    assert!(outcome.report.result.is_none());
    assert_eq!(outcome.report.notices[0].level, NoticeLevel::Info);
    assert_eq!(outcome.selection.mode, "empty");
}
