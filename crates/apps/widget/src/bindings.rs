//! JavaScript surfaces the widget talks to: the host table API (`grist`) and
//! the map library (`maplibregl`), both loaded by script tags on the page.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod grist {
    use super::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = grist)]
        pub fn ready(options: &JsValue);

        #[wasm_bindgen(js_namespace = grist, js_name = onRecords)]
        pub fn on_records(handler: &Function);

        #[wasm_bindgen(js_namespace = grist, js_name = onRecord)]
        pub fn on_record(handler: &Function);

        #[wasm_bindgen(js_namespace = grist, js_name = setSelectedRows, catch)]
        pub fn set_selected_rows(row_ids: &JsValue) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(js_namespace = grist, js_name = mapColumnNames, catch)]
        pub fn map_column_names(record: &JsValue) -> Result<JsValue, JsValue>;
    }
}

pub mod maplibre {
    use super::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        #[derive(Debug, Clone)]
        pub type Map;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Map", catch)]
        pub fn new(options: &Object) -> Result<Map, JsValue>;

        #[wasm_bindgen(method, js_name = addControl)]
        pub fn add_control(this: &Map, control: &JsValue, position: Option<&str>);

        #[wasm_bindgen(method)]
        pub fn on(this: &Map, event: &str, handler: &Function);

        #[wasm_bindgen(method, js_name = fitBounds, catch)]
        pub fn fit_bounds(this: &Map, bounds: &JsValue, options: &Object) -> Result<(), JsValue>;

        #[wasm_bindgen(js_namespace = maplibregl)]
        #[derive(Debug, Clone)]
        pub type Marker;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Marker")]
        pub fn new(options: &Object) -> Marker;

        #[wasm_bindgen(method, js_name = setLngLat)]
        pub fn set_lng_lat(this: &Marker, lng_lat: &JsValue) -> Marker;

        #[wasm_bindgen(method, js_name = getLngLat)]
        pub fn get_lng_lat(this: &Marker) -> JsValue;

        #[wasm_bindgen(method, js_name = setPopup)]
        pub fn set_popup(this: &Marker, popup: &Popup) -> Marker;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Marker, map: &Map) -> Marker;

        #[wasm_bindgen(method, js_name = getElement)]
        pub fn get_element(this: &Marker) -> web_sys::HtmlElement;

        /// Also removes the popup bound with `setPopup`.
        #[wasm_bindgen(method)]
        pub fn remove(this: &Marker) -> Marker;

        #[wasm_bindgen(js_namespace = maplibregl)]
        #[derive(Debug, Clone)]
        pub type Popup;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Popup")]
        pub fn new(options: &Object) -> Popup;

        #[wasm_bindgen(method, js_name = setText)]
        pub fn set_text(this: &Popup, text: &str) -> Popup;

        #[wasm_bindgen(method, js_name = setLngLat)]
        pub fn set_lng_lat(this: &Popup, lng_lat: &JsValue) -> Popup;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Popup, map: &Map) -> Popup;

        #[wasm_bindgen(method)]
        pub fn remove(this: &Popup) -> Popup;

        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type NavigationControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "NavigationControl")]
        pub fn new() -> NavigationControl;

        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type ScaleControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "ScaleControl")]
        pub fn new() -> ScaleControl;
    }
}

/// Sets `key` on a plain options object.
pub fn set(obj: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

/// Walks a dotted path from the global object, e.g. `"CarteFacile.mapStyles.simple"`.
pub fn resolve_global(path: &str) -> Option<JsValue> {
    let mut current: JsValue = js_sys::global().into();
    for part in path.split('.') {
        current = Reflect::get(&current, &JsValue::from_str(part)).ok()?;
        if current.is_undefined() || current.is_null() {
            return None;
        }
    }
    Some(current)
}
