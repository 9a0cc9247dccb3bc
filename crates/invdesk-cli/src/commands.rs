use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use invdesk_bulk::{BulkError, BulkOperationCoordinator, BulkReport, ClientConfig, HttpEndpoint};
use invdesk_mask::{
    DocumentKind, FieldProfile, Keystroke, MaskedField, NumberLocale, display_to_iso,
    finalize_date, is_numeric_column, live_date, mask_document,
};
use invdesk_model::{FilterSnapshot, ListViewKey, RecordId};
use invdesk_selection::{
    BadgeState, HeaderCheckbox, JsonFileBackend, PersistenceScope, SelectionHandle,
    SelectionStore,
};

use crate::cli::{
    DeleteArgs, FieldArgs, FieldKindArg, LocaleArg, SelectAction, SelectArgs, ViewArgs,
};
use crate::logging::redact_value;

/// Display and caret after one replayed keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskStep {
    pub key: char,
    pub display: String,
    pub caret: usize,
}

/// Result of `invdesk mask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskReport {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    pub steps: Vec<MaskStep>,
    pub display: String,
    /// Wire form of the final value: plain decimal, ISO date or document
    /// type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Result of `invdesk blur`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlurReport {
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Result of `invdesk select`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionReport {
    pub view: String,
    pub mode: &'static str,
    pub count: String,
    pub ids: Vec<String>,
    pub button: Option<String>,
    pub header: &'static str,
}

impl SelectionReport {
    pub fn new(view: &ListViewKey, store: &SelectionStore, page_ids: &[RecordId]) -> Self {
        let badge = BadgeState::from_selection(store, page_ids, None);
        let mode = if store.is_all_matching() {
            "all matching"
        } else if store.is_empty() {
            "empty"
        } else {
            "explicit"
        };
        Self {
            view: view.to_string(),
            mode,
            count: badge.count.to_string(),
            ids: store.explicit_ids().iter().map(ToString::to_string).collect(),
            button: badge.visible.then_some(badge.label),
            header: match badge.header {
                HeaderCheckbox::Unchecked => "unchecked",
                HeaderCheckbox::Indeterminate => "indeterminate",
                HeaderCheckbox::Checked => "checked",
            },
        }
    }
}

/// Result of `invdesk delete`.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub report: BulkReport,
    pub selection: SelectionReport,
}

pub fn run_mask(args: &FieldArgs) -> Result<MaskReport> {
    debug!(text = redact_value(&args.text), kind = ?args.kind, "replaying keystrokes");
    match args.kind {
        FieldKindArg::Number => {
            let mut field = MaskedField::new(field_profile(args), locale(args.locale));
            let mut steps = Vec::with_capacity(args.text.len());
            for key in args.text.chars() {
                field.set_caret(usize::MAX);
                let edit = field.key(&Keystroke::Insert(key));
                trace!(display = redact_value(&edit.display), caret = edit.caret, "keystroke");
                steps.push(MaskStep {
                    key,
                    display: edit.display,
                    caret: edit.caret,
                });
            }
            let value = field
                .value()
                .map_err(|e| anyhow!(e.user_message()))?
                .map(|v| v.to_plain_string());
            Ok(MaskReport {
                kind: "number",
                decimal_places: Some(field.profile().decimal_places),
                steps,
                display: field.display().to_string(),
                value,
            })
        }
        FieldKindArg::Date => {
            let steps = replay(&args.text, live_date);
            let display = steps.last().map(|s| s.display.clone()).unwrap_or_default();
            let iso = display_to_iso(&display);
            Ok(MaskReport {
                kind: "date",
                decimal_places: None,
                steps,
                display,
                value: (!iso.is_empty()).then_some(iso),
            })
        }
        FieldKindArg::Document => {
            let steps = replay(&args.text, mask_document);
            let display = steps.last().map(|s| s.display.clone()).unwrap_or_default();
            Ok(MaskReport {
                kind: "document",
                decimal_places: None,
                value: Some(DocumentKind::classify(&display).to_string()),
                steps,
                display,
            })
        }
    }
}

/// Append each character at the end and re-mask the whole text.
fn replay(text: &str, mask: fn(&str) -> String) -> Vec<MaskStep> {
    let mut buffer = String::new();
    text.chars()
        .map(|key| {
            buffer.push(key);
            buffer = mask(&buffer);
            MaskStep {
                key,
                display: buffer.clone(),
                caret: buffer.chars().count(),
            }
        })
        .collect()
}

pub fn run_blur(args: &FieldArgs) -> Result<BlurReport> {
    match args.kind {
        FieldKindArg::Number => {
            let field = MaskedField::new(field_profile(args), locale(args.locale))
                .with_value(&args.text)
                .map_err(|e| anyhow!(e.user_message()))?;
            let value = field
                .value()
                .map_err(|e| anyhow!(e.user_message()))?
                .map(|v| v.to_plain_string());
            Ok(BlurReport {
                display: field.display().to_string(),
                value,
            })
        }
        FieldKindArg::Date => {
            let display = finalize_date(&args.text);
            let iso = display_to_iso(&display);
            Ok(BlurReport {
                display,
                value: (!iso.is_empty()).then_some(iso),
            })
        }
        FieldKindArg::Document => {
            let display = mask_document(&args.text);
            Ok(BlurReport {
                value: Some(DocumentKind::classify(&display).to_string()),
                display,
            })
        }
    }
}

pub fn run_select(args: &SelectArgs) -> Result<SelectionReport> {
    let view = ListViewKey::new(args.view.view.as_str()).context("invalid --view")?;
    let filter = current_filter(&args.view)?;
    let ids = parse_ids(&args.ids)?;
    let scope = PersistenceScope::new(view.clone());
    let mut backend = open_state(&args.view.state)?;
    let mut store = SelectionStore::restore(&scope, &filter, &mut backend)
        .context("restore selection")?;

    let mut page_ids: Vec<RecordId> = Vec::new();
    match args.action {
        SelectAction::Toggle => {
            let [id] = ids.as_slice() else {
                bail!("toggle takes exactly one id");
            };
            let selected = store.toggle(id.clone());
            info!(%id, selected, "toggled record");
            page_ids.push(id.clone());
        }
        SelectAction::Page => {
            require_ids(&ids, "page")?;
            store.select_all_on_current_page(ids.iter().cloned());
            page_ids = ids;
        }
        SelectAction::Unpage => {
            require_ids(&ids, "unpage")?;
            store.deselect_page(&ids);
            page_ids = ids;
        }
        SelectAction::All => {
            ensure_no_ids(&ids, "all")?;
            store.select_all_matching(filter);
        }
        SelectAction::Clear => {
            ensure_no_ids(&ids, "clear")?;
            store.clear();
        }
        SelectAction::Show => {
            page_ids = ids;
        }
    }

    if args.action != SelectAction::Show {
        store.save(&scope, &mut backend).context("save selection")?;
    }
    Ok(SelectionReport::new(&view, &store, &page_ids))
}

pub async fn run_delete(args: &DeleteArgs) -> Result<DeleteOutcome> {
    let config = client_config(args)?;
    let view = ListViewKey::new(args.view.view.as_str()).context("invalid --view")?;
    let filter = current_filter(&args.view)?;
    let scope = PersistenceScope::new(view.clone());
    let mut backend = open_state(&args.view.state)?;
    let store = SelectionStore::restore(&scope, &filter, &mut backend)
        .context("restore selection")?;

    let endpoint = HttpEndpoint::new(&config, view.clone()).map_err(describe)?;
    let coordinator = BulkOperationCoordinator::new(endpoint.clone(), endpoint);
    let handle = SelectionHandle::new(store);

    let outcome = coordinator.run(&handle, args.page, &filter).await;

    // Reconciliation, or a stale all-matching flag, may have changed the
    // selection even when the run failed.
    let store = handle.snapshot();
    store.save(&scope, &mut backend).context("save selection")?;

    let report = outcome.map_err(describe)?;
    let page_ids = report
        .refreshed
        .as_ref()
        .map(|page| page.ids.clone())
        .unwrap_or_default();
    Ok(DeleteOutcome {
        selection: SelectionReport::new(&view, &store, &page_ids),
        report,
    })
}

/// Load the client configuration and apply command-line overrides.
pub fn client_config(args: &DeleteArgs) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => load_client_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(token) = &args.csrf_token {
        config.csrf_token = Some(token.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    Ok(config)
}

pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn describe(error: BulkError) -> anyhow::Error {
    let mut message = error.user_message();
    if let Some(hint) = error.suggestion() {
        message.push(' ');
        message.push_str(hint);
    }
    anyhow::Error::new(error).context(message)
}

fn current_filter(args: &ViewArgs) -> Result<FilterSnapshot> {
    let mut filter = FilterSnapshot::new(args.q.as_str());
    for entry in &args.filters {
        let (key, value) = FilterSnapshot::parse_entry(entry)?;
        filter = filter.with_filter(key, value);
    }
    Ok(filter)
}

fn open_state(path: &Path) -> Result<JsonFileBackend> {
    JsonFileBackend::open(path).with_context(|| format!("open selection state {}", path.display()))
}

fn parse_ids(values: &[String]) -> Result<Vec<RecordId>> {
    values
        .iter()
        .map(|v| RecordId::new(v.as_str()).with_context(|| format!("invalid record id {v:?}")))
        .collect()
}

fn require_ids(ids: &[RecordId], action: &str) -> Result<()> {
    if ids.is_empty() {
        bail!("{action} needs at least one id");
    }
    Ok(())
}

fn ensure_no_ids(ids: &[RecordId], action: &str) -> Result<()> {
    if !ids.is_empty() {
        bail!("{action} does not take ids");
    }
    Ok(())
}

fn field_profile(args: &FieldArgs) -> FieldProfile {
    if let Some(places) = args.decimals {
        return FieldProfile::new(places);
    }
    match &args.column {
        Some(column) => {
            if !is_numeric_column(column) {
                warn!(column = %column, "column is not a numeric column; masking anyway");
            }
            FieldProfile::for_column(column)
        }
        None => FieldProfile::default(),
    }
}

fn locale(arg: LocaleArg) -> NumberLocale {
    match arg {
        LocaleArg::PtBr => NumberLocale::pt_br(),
        LocaleArg::EnUs => NumberLocale::en_us(),
    }
}
