//! Browser entry point: binds the host table notifications and the map
//! library events to a `WidgetSession`.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use console_error_panic_hook::set_once;
use foundation::RowId;
use records::ReadyOptions;
use scene::WidgetSession;
use scene::control::POSITION;
use tracing::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod config;
pub mod console;
pub mod host;
pub mod map;

use bindings::{grist, maplibre::Map};
use config::WidgetConfig;
use host::{GristHost, from_json, read_record, read_table};
use map::{BrowserSurface, RecenterButton};

type Session = WidgetSession<BrowserSurface, GristHost>;

// Guard against a second `start_widget` on the same page.
static STARTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Option<Listeners>> = const { RefCell::new(None) };
}

/// JavaScript callbacks that must live as long as the page.
struct Listeners {
    _load: Closure<dyn FnMut()>,
    _on_records: Closure<dyn FnMut(JsValue, JsValue)>,
    _on_record: Closure<dyn FnMut(JsValue, JsValue)>,
    _recenter: RecenterButton,
}

/// Runs `f` on the session, or returns the default when there is none yet or
/// it is already borrowed further up the stack.
pub(crate) fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
    R: Default,
{
    SESSION
        .try_with(|cell| match cell.try_borrow_mut() {
            Ok(mut session) => session.as_mut().map(f).unwrap_or_default(),
            Err(_) => {
                warn!("widget busy, event dropped");
                R::default()
            }
        })
        .unwrap_or_default()
}

pub(crate) fn marker_clicked(id: RowId) {
    with_session(|s| s.marker_clicked(id));
}

pub(crate) fn recenter() {
    with_session(|s| s.recenter());
}

fn on_records(records: JsValue) {
    match read_table(&records) {
        Ok((rows, columns)) => with_session(|s| s.on_table_changed(&rows, &columns)),
        Err(err) => warn!(error = ?err, "table update could not be read"),
    }
}

fn on_record(record: JsValue) {
    let record = read_record(&record);
    with_session(|s| s.on_current_record_changed(record.as_ref()));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the map and registers with the host.
///
/// `config_json` is an optional JSON object of `WidgetConfig` fields.
#[wasm_bindgen]
pub fn start_widget(config_json: Option<String>) -> Result<(), JsValue> {
    let config = WidgetConfig::from_json(config_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    console::install(&config.log_filter);

    if STARTED.swap(true, Ordering::SeqCst) {
        warn!("widget already started");
        return Ok(());
    }

    let surface = BrowserSurface::create(&config)?;
    let map: Map = surface.map().clone();
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(WidgetSession::new(surface, GristHost, config.session.clone()));
    });

    // The session must exist before this: `onAdd` runs synchronously.
    let recenter = RecenterButton::new();
    map.add_control(recenter.control(), Some(POSITION));

    let load = Closure::wrap(Box::new(|| {
        with_session(|s| s.on_surface_ready());
    }) as Box<dyn FnMut()>);
    map.on("load", load.as_ref().unchecked_ref());

    grist::ready(&from_json(&ReadyOptions::default())?);

    let records_cb = Closure::wrap(Box::new(|records: JsValue, _mappings: JsValue| {
        on_records(records);
    }) as Box<dyn FnMut(JsValue, JsValue)>);
    grist::on_records(records_cb.as_ref().unchecked_ref());

    let record_cb = Closure::wrap(Box::new(|record: JsValue, _mappings: JsValue| {
        on_record(record);
    }) as Box<dyn FnMut(JsValue, JsValue)>);
    grist::on_record(record_cb.as_ref().unchecked_ref());

    LISTENERS.with(|cell| {
        *cell.borrow_mut() = Some(Listeners {
            _load: load,
            _on_records: records_cb,
            _on_record: record_cb,
            _recenter: recenter,
        });
    });

    info!(container = %config.container, "widget started");
    Ok(())
}
