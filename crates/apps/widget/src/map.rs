use std::cell::RefCell;
use std::rc::Rc;

use foundation::{LngLatBounds, RowId};
use js_sys::{Array, Function, Object};
use scene::control::{BUTTON_CLASS, BUTTON_TITLE, CONTAINER_CLASS};
use scene::{FitOptions, MapSurface, MarkerSpec, MarkerVisual};
use tracing::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, HtmlElement};

use crate::bindings::maplibre::{Map, Marker, NavigationControl, Popup, ScaleControl};
use crate::bindings::{resolve_global, set};
use crate::config::WidgetConfig;

fn lng_lat(longitude: f64, latitude: f64) -> JsValue {
    Array::of2(&longitude.into(), &latitude.into()).into()
}

/// The one map surface of the widget.
pub struct BrowserSurface {
    map: Map,
}

impl BrowserSurface {
    /// Builds the map with its stock controls. The recenter control is added
    /// separately, once the session exists.
    pub fn create(config: &WidgetConfig) -> Result<Self, JsValue> {
        let style = resolve_global(&config.map_style).unwrap_or_else(|| {
            debug!(style = %config.map_style, "style not found on page, using it as a URL");
            JsValue::from_str(&config.map_style)
        });

        let options = Object::new();
        set(&options, "container", config.container.as_str());
        set(&options, "style", style);
        set(&options, "maxZoom", config.max_zoom);
        let map = Map::new(&options)?;

        map.add_control(&NavigationControl::new(), None);
        map.add_control(&ScaleControl::new(), None);
        if let Some(path) = &config.map_selector {
            add_constructed_control(&map, path);
        }
        Ok(Self { map })
    }

    pub fn map(&self) -> &Map {
        &self.map
    }
}

fn add_constructed_control(map: &Map, path: &str) {
    let Some(ctor) = resolve_global(path) else {
        warn!(control = path, "control not available on page");
        return;
    };
    match js_sys::Reflect::construct(ctor.unchecked_ref::<Function>(), &Array::new()) {
        Ok(control) => map.add_control(&control, None),
        Err(err) => warn!(control = path, error = ?err, "control construction failed"),
    }
}

impl MapSurface for BrowserSurface {
    type Marker = BrowserMarker;

    fn add_marker(&mut self, spec: &MarkerSpec<'_>) -> BrowserMarker {
        BrowserMarker::new(&self.map, spec)
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, opts: &FitOptions) {
        let options = Object::new();
        set(&options, "padding", opts.padding);
        set(&options, "duration", opts.duration_ms);
        if let Some(max_zoom) = opts.max_zoom {
            set(&options, "maxZoom", max_zoom);
        }
        let [west, south, east, north] = bounds.to_array();
        let array: Array = [west, south, east, north]
            .into_iter()
            .map(JsValue::from_f64)
            .collect();
        if let Err(err) = self.map.fit_bounds(&array, &options) {
            warn!(?bounds, error = ?err, "fitBounds failed");
        }
    }
}

type Listener = Closure<dyn FnMut()>;

/// A marker with its click popup, hover popup and element listeners.
pub struct BrowserMarker {
    id: RowId,
    marker: Marker,
    hover: Popup,
    element: HtmlElement,
    listeners: Vec<(&'static str, Listener)>,
}

impl BrowserMarker {
    fn new(map: &Map, spec: &MarkerSpec<'_>) -> Self {
        let click_options = Object::new();
        set(&click_options, "offset", spec.popup.offset);
        let click_popup = Popup::new(&click_options);
        click_popup.set_text(spec.title);

        let marker_options = Object::new();
        set(&marker_options, "color", spec.color);
        let marker = Marker::new(&marker_options);
        marker.set_lng_lat(&lng_lat(spec.longitude, spec.latitude));
        marker.set_popup(&click_popup);
        marker.add_to(map);

        let hover_options = Object::new();
        set(&hover_options, "closeButton", false);
        set(&hover_options, "closeOnClick", false);
        set(&hover_options, "offset", spec.popup.offset);
        set(&hover_options, "anchor", spec.popup.anchor.as_str());
        set(&hover_options, "maxWidth", spec.popup.max_width.as_str());
        set(&hover_options, "className", spec.popup.class_name.as_str());
        let hover = Popup::new(&hover_options);
        hover.set_text(spec.title);

        let element = marker.get_element();
        let mut this = Self {
            id: spec.id,
            marker: marker.clone(),
            hover: hover.clone(),
            element,
            listeners: Vec::with_capacity(3),
        };

        {
            let hover = hover.clone();
            let marker = marker.clone();
            let map = map.clone();
            this.listen(
                "mouseenter",
                Closure::wrap(Box::new(move || {
                    hover.set_lng_lat(&marker.get_lng_lat()).add_to(&map);
                }) as Box<dyn FnMut()>),
            );
        }
        this.listen(
            "mouseleave",
            Closure::wrap(Box::new(move || {
                hover.remove();
            }) as Box<dyn FnMut()>),
        );
        let id = spec.id;
        this.listen(
            "click",
            Closure::wrap(Box::new(move || crate::marker_clicked(id)) as Box<dyn FnMut()>),
        );
        this
    }

    fn listen(&mut self, event: &'static str, listener: Listener) {
        if let Err(err) = self
            .element
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        {
            warn!(row = %self.id, event, error = ?err, "listener not attached");
        }
        self.listeners.push((event, listener));
    }
}

impl MarkerVisual for BrowserMarker {
    fn set_color(&mut self, color: &str) {
        // The stock marker is an inline SVG; its fill lives on the first path.
        match self.element.query_selector("svg g path") {
            Ok(Some(path)) => {
                if let Err(err) = path.set_attribute("fill", color) {
                    warn!(row = %self.id, error = ?err, "marker fill not set");
                }
            }
            Ok(None) => debug!(row = %self.id, "marker has no svg path"),
            Err(err) => warn!(row = %self.id, error = ?err, "marker lookup failed"),
        }
    }

    fn dispose(self) {
        for (event, listener) in &self.listeners {
            let _ = self
                .element
                .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
        }
        self.hover.remove();
        self.marker.remove();
    }
}

/// JavaScript side of the recenter control: an `IControl` object whose
/// `onAdd`/`onRemove` build and tear down the button.
pub struct RecenterButton {
    control: Object,
    _on_add: Closure<dyn FnMut(JsValue) -> JsValue>,
    _on_remove: Closure<dyn FnMut()>,
    _on_click: Rc<Closure<dyn FnMut()>>,
}

impl RecenterButton {
    pub fn new() -> Self {
        let container: Rc<RefCell<Option<Element>>> = Rc::new(RefCell::new(None));
        let on_click = Rc::new(Closure::wrap(Box::new(|| {
            crate::recenter();
        }) as Box<dyn FnMut()>));

        let on_add = {
            let container = Rc::clone(&container);
            let on_click = Rc::clone(&on_click);
            Closure::wrap(Box::new(move |_map: JsValue| -> JsValue {
                match build_container(&on_click) {
                    Ok(el) => {
                        crate::with_session(|s| s.control_mut().on_add());
                        *container.borrow_mut() = Some(el.clone());
                        el.into()
                    }
                    Err(err) => {
                        error!(error = ?err, "recenter control could not be built");
                        JsValue::UNDEFINED
                    }
                }
            }) as Box<dyn FnMut(JsValue) -> JsValue>)
        };

        let on_remove = Closure::wrap(Box::new(move || {
            if let Some(el) = container.borrow_mut().take() {
                el.remove();
            }
            crate::with_session(|s| s.control_mut().on_remove());
        }) as Box<dyn FnMut()>);

        let control = Object::new();
        set(&control, "onAdd", on_add.as_ref().clone());
        set(&control, "onRemove", on_remove.as_ref().clone());

        Self {
            control,
            _on_add: on_add,
            _on_remove: on_remove,
            _on_click: on_click,
        }
    }

    pub fn control(&self) -> &JsValue {
        &self.control
    }
}

impl Default for RecenterButton {
    fn default() -> Self {
        Self::new()
    }
}

fn build_container(on_click: &Closure<dyn FnMut()>) -> Result<Element, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let container = document.create_element("div")?;
    container.set_class_name(CONTAINER_CLASS);

    let button: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
    button.set_class_name(BUTTON_CLASS);
    button.set_type("button");
    button.set_title(BUTTON_TITLE);
    button.set_onclick(Some(on_click.as_ref().unchecked_ref()));

    container.append_child(&button)?;
    Ok(container)
}
