//! WebAssembly bindings for the browser.
//!
//! `SearchWidget` is the JavaScript entry point. It binds the widget to the
//! page elements named in the config, fetches the index once and forwards
//! DOM events to the [`Controller`]. `DomHost` is the `web-sys` side of the
//! [`WidgetHost`] seam.
//!
//! ```js
//! import init, { SearchWidget } from './litesearch.js';
//! await init();
//! const widget = new SearchWidget({ dataPath: '/index.json', modalFullscreen: true });
//! await widget.mount();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Once;

use serde_wasm_bindgen::from_value;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{
    AddEventListenerOptions, Document as DomDocument, Element, Event,
    EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent, Node, Request, RequestCache,
    RequestInit, Response,
};

use crate::config::SearchConfig;
use crate::controller::{Controller, Key, KeyTarget, Propagation, WidgetEvent, WidgetHost};
use crate::loader::{check_status, parse_index, LoadError};
use crate::types::Document;

type SharedController = Rc<RefCell<Controller<DomHost>>>;
type WeakController = Weak<RefCell<Controller<DomHost>>>;

static TRACING: Once = Once::new();

#[derive(Error, Debug)]
pub enum MountError {
    #[error("no browser window")]
    NoWindow,

    #[error("no element matches selector '{0}'")]
    MissingElement(String),

    #[error("element '{0}' is not an <input>")]
    NotAnInput(String),

    #[error("widget is already mounted")]
    AlreadyMounted,

    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn dom_error(err: JsValue) -> MountError {
    MountError::Dom(format!("{:?}", err))
}

impl SearchConfig {
    /// Build a config from a JS options object; `undefined` means defaults.
    pub fn from_js(options: JsValue) -> Result<Self, JsValue> {
        let config: SearchConfig = if options.is_undefined() || options.is_null() {
            SearchConfig::default()
        } else {
            from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(config)
    }
}

fn init_tracing(debug: bool) {
    TRACING.call_once(|| {
        let level = if debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(level)
                .build(),
        );
    });
}

// =========================================================================
// LISTENERS
// =========================================================================

/// One attached event listener; dropping it detaches the callback.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Modal-scoped registration held by the controller while the panel is open.
pub struct DomListeners(Vec<Listener>);

/// Forward one DOM event to the controller.
///
/// A handler that fires while the controller is already borrowed (a
/// synchronous event raised from inside another handler) is dropped.
fn dispatch(controller: &WeakController, event: WidgetEvent, dom_event: &Event) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    let Ok(mut controller) = controller.try_borrow_mut() else {
        tracing::trace!(?event, "nested event skipped");
        return;
    };
    if controller.handle(event) == Propagation::PreventDefault {
        dom_event.prevent_default();
    }
}

fn key_of(event: &Event) -> Key {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|k| Key::parse(&k.key()))
        .unwrap_or(Key::Other)
}

fn is_node(event: &Event, node: &Node) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Node>().ok())
        .is_some_and(|target| node.is_same_node(Some(&target)))
}

/// Rank of the result a keydown came from, read back from the anchor's
/// `tabindex`.
fn result_rank(event: &Event) -> Option<usize> {
    let element = event.target()?.dyn_into::<Element>().ok()?;
    let anchor = element.closest("a").ok()??;
    anchor.get_attribute("tabindex")?.parse().ok()
}

fn key_target(event: &Event, input: &Node) -> KeyTarget {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return KeyTarget::Elsewhere;
    };
    if input.is_same_node(Some(element.unchecked_ref())) {
        KeyTarget::SearchInput
    } else if element.node_name() == "INPUT" {
        KeyTarget::OtherInput
    } else {
        KeyTarget::Elsewhere
    }
}

// =========================================================================
// DOM HOST
// =========================================================================

pub struct DomHost {
    document: DomDocument,
    form: Element,
    input: HtmlInputElement,
    modal: HtmlElement,
    /// `overflow` of `<body>` at mount time, restored on close.
    body_overflow: String,
    controller: WeakController,
}

impl DomHost {
    fn result_item(&self, index: usize) -> Option<Element> {
        self.modal
            .query_selector(&format!(":scope > li:nth-child({})", index + 1))
            .ok()
            .flatten()
    }

    fn result_anchor(&self, index: usize) -> Option<Element> {
        self.result_item(index)?.query_selector("a").ok().flatten()
    }

    fn set_body_overflow(&self, value: &str) {
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", value);
        }
    }

    fn modal_callback(
        &self,
        handler: impl Fn(&Event) -> WidgetEvent + 'static,
    ) -> Closure<dyn FnMut(Event)> {
        let controller = self.controller.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&controller, handler(&event), &event);
        })
    }
}

impl WidgetHost for DomHost {
    type Listeners = DomListeners;

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn focus_input(&mut self) {
        let _ = self.input.focus();
    }

    fn set_results(&mut self, html: &str) {
        self.modal.set_inner_html(html);
    }

    fn set_modal_visible(&mut self, visible: bool) {
        self.modal.set_hidden(!visible);
        let _ = self
            .modal
            .style()
            .set_property("visibility", if visible { "visible" } else { "hidden" });
        let _ = self
            .form
            .set_attribute("aria-expanded", if visible { "true" } else { "false" });
    }

    fn lock_scroll(&mut self) {
        self.set_body_overflow("hidden");
    }

    fn restore_scroll(&mut self) {
        let overflow = self.body_overflow.clone();
        self.set_body_overflow(&overflow);
    }

    fn focus_result(&mut self, index: usize) -> bool {
        self.result_anchor(index)
            .and_then(|a| a.dyn_into::<HtmlElement>().ok())
            .is_some_and(|a| a.focus().is_ok())
    }

    fn set_result_selected(&mut self, index: usize, selected: bool) {
        if let Some(item) = self.result_item(index) {
            let _ = item.set_attribute("aria-selected", if selected { "true" } else { "false" });
        }
    }

    fn result_url(&self, index: usize) -> Option<String> {
        self.result_anchor(index)?.get_attribute("href")
    }

    fn navigate(&mut self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_href(url) {
                tracing::warn!(url, ?err, "navigation failed");
            }
        }
    }

    fn attach_modal_listeners(&mut self) -> DomListeners {
        let keydown = self.modal_callback(|event| WidgetEvent::ModalKey {
            key: key_of(event),
            item: result_rank(event),
        });
        let input: Node = self.input.clone().into();
        let click = self.modal_callback(move |event| WidgetEvent::DocumentClick {
            on_input: is_node(event, &input),
        });

        let mut listeners = Vec::with_capacity(2);
        for (target, kind, callback) in [
            (self.modal.unchecked_ref::<EventTarget>(), "keydown", keydown),
            (self.document.unchecked_ref::<EventTarget>(), "click", click),
        ] {
            match Listener::attach(target, kind, callback) {
                Ok(listener) => listeners.push(listener),
                Err(err) => tracing::warn!(kind, ?err, "failed to attach modal listener"),
            }
        }
        DomListeners(listeners)
    }
}

// =========================================================================
// INDEX FETCH
// =========================================================================

/// Fetch and parse the index at `url` with the browser's default caching.
pub async fn fetch_index(url: &str) -> Result<Vec<Document>, LoadError> {
    let request_error = |err: JsValue| LoadError::Request {
        url: url.to_string(),
        message: format!("{:?}", err),
    };

    let window = web_sys::window().ok_or_else(|| LoadError::Request {
        url: url.to_string(),
        message: "no browser window".to_string(),
    })?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_cache(RequestCache::Default);
    let request = Request::new_with_str_and_init(url, &opts).map_err(request_error)?;

    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(request_error)?
        .dyn_into()
        .map_err(request_error)?;
    check_status(url, response.status())?;

    let body = JsFuture::from(response.text().map_err(request_error)?)
        .await
        .map_err(request_error)?;
    parse_index(body.as_string().unwrap_or_default().as_bytes())
}

// =========================================================================
// JAVASCRIPT API
// =========================================================================

/// Resolves on the document's `DOMContentLoaded` event.
fn dom_content_loaded(document: &DomDocument) -> js_sys::Promise {
    let target: EventTarget = document.clone().into();
    js_sys::Promise::new(&mut |resolve, reject| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            &resolve,
            &options,
        ) {
            let _ = reject.call1(&JsValue::UNDEFINED, &err);
        }
    })
}

/// Fetch the index and hand it to the controller. Resolves to whether the
/// index is ready.
async fn load_index(controller: SharedController, url: String) -> Result<JsValue, JsValue> {
    tracing::debug!(url = %url, "fetching search index");
    let loaded = fetch_index(&url).await;
    let ready = loaded.is_ok();
    controller.borrow_mut().index_loaded(loaded);
    Ok(JsValue::from_bool(ready))
}

struct Mounted {
    controller: SharedController,
    /// Listeners that live as long as the widget: input events and the
    /// global shortcut.
    _listeners: Vec<Listener>,
}

#[derive(Default)]
enum MountSlot {
    #[default]
    Unmounted,
    /// Waiting for `DOMContentLoaded`.
    Deferred,
    Bound(Mounted),
}

/// A search widget bound to one form on the page.
#[wasm_bindgen]
pub struct SearchWidget {
    config: SearchConfig,
    slot: Rc<RefCell<MountSlot>>,
}

#[wasm_bindgen]
impl SearchWidget {
    /// Create a widget from an options object (camelCase keys).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<SearchWidget, JsValue> {
        console_error_panic_hook::set_once();
        let config = SearchConfig::from_js(options)?;
        init_tracing(config.debug);
        tracing::debug!(?config, "search widget created");

        Ok(Self {
            config,
            slot: Rc::default(),
        })
    }

    /// Bind to the page and start loading the index.
    ///
    /// While the document is still loading, binding waits for
    /// `DOMContentLoaded` and binding errors reject the returned promise.
    /// Otherwise they are thrown. The promise resolves when the index load
    /// finishes, successfully or not; a failed load leaves the widget inert.
    pub fn mount(&mut self) -> Result<js_sys::Promise, JsValue> {
        if !matches!(*self.slot.borrow(), MountSlot::Unmounted) {
            return Err(MountError::AlreadyMounted.into());
        }

        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoWindow)?;
        let config = self.config.clone();
        let slot = Rc::clone(&self.slot);

        if document.ready_state() != "loading" {
            let controller = bind(&slot, &config, &document)?;
            return Ok(future_to_promise(load_index(controller, config.data_path)));
        }

        tracing::debug!("document still loading, mount deferred to DOMContentLoaded");
        *self.slot.borrow_mut() = MountSlot::Deferred;
        Ok(future_to_promise(async move {
            JsFuture::from(dom_content_loaded(&document)).await?;
            let controller = bind(&slot, &config, &document).inspect_err(|_| {
                *slot.borrow_mut() = MountSlot::Unmounted;
            })?;
            load_index(controller, config.data_path).await
        }))
    }

    /// Open the results panel, if there is a query and a loaded index.
    pub fn open(&self) {
        self.with_controller("open", |controller| controller.open("api"));
    }

    pub fn close(&self) {
        self.with_controller("close", |controller| controller.close("api"));
    }

    pub fn toggle(&self) {
        self.with_controller("toggle", |controller| controller.toggle("api"));
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.with_controller("isOpen", |controller| controller.is_open())
            .unwrap_or(false)
    }

    /// Index load state: `"unmounted"`, `"loading"`, `"ready"` or
    /// `"failed"`, or `"busy"` when asked from inside a widget callback.
    pub fn state(&self) -> String {
        let Ok(slot) = self.slot.try_borrow() else {
            return "busy".to_string();
        };
        match &*slot {
            MountSlot::Unmounted => "unmounted",
            MountSlot::Deferred => "loading",
            MountSlot::Bound(mounted) => match mounted.controller.try_borrow() {
                Ok(controller) => controller.index().label(),
                Err(_) => "busy",
            },
        }
        .to_string()
    }
}

impl SearchWidget {
    /// Run `action` against the mounted controller. Calls made while the
    /// controller is handling an event (a page handler reacting to a focus
    /// change, say) are skipped.
    fn with_controller<R>(
        &self,
        name: &str,
        action: impl FnOnce(&mut Controller<DomHost>) -> R,
    ) -> Option<R> {
        let slot = self.slot.try_borrow().ok()?;
        let MountSlot::Bound(mounted) = &*slot else {
            return None;
        };
        let Ok(mut controller) = mounted.controller.try_borrow_mut() else {
            tracing::trace!(call = name, "re-entrant widget call skipped");
            return None;
        };
        Some(action(&mut controller))
    }
}

/// Resolve the page elements, build the controller and attach the
/// persistent listeners.
fn bind(
    slot: &Rc<RefCell<MountSlot>>,
    config: &SearchConfig,
    document: &DomDocument,
) -> Result<SharedController, JsValue> {
    let query = |selector: &str| -> Result<Element, MountError> {
        document
            .query_selector(selector)
            .map_err(dom_error)?
            .ok_or_else(|| MountError::MissingElement(selector.to_string()))
    };

    let form = query(&config.form_selector)?;
    let input_selector = format!("{} input", config.form_selector);
    let input: HtmlInputElement = query(&input_selector)?
        .dyn_into()
        .map_err(|_| MountError::NotAnInput(input_selector.clone()))?;
    let modal: HtmlElement = query(&config.modal_selector)?
        .dyn_into()
        .map_err(|el: Element| dom_error(el.into()))?;
    let body_overflow = document
        .body()
        .and_then(|body| body.style().get_property_value("overflow").ok())
        .unwrap_or_default();

    let controller: SharedController = Rc::new_cyclic(|weak| {
        RefCell::new(Controller::new(
            DomHost {
                document: document.clone(),
                form,
                input: input.clone(),
                modal,
                body_overflow,
                controller: weak.clone(),
            },
            config.clone(),
        ))
    });

    let listeners = attach_persistent(&controller, document, &input)?;
    *slot.borrow_mut() = MountSlot::Bound(Mounted {
        controller: Rc::clone(&controller),
        _listeners: listeners,
    });
    Ok(controller)
}

fn attach_persistent(
    controller: &SharedController,
    document: &DomDocument,
    input: &HtmlInputElement,
) -> Result<Vec<Listener>, JsValue> {
    let weak = Rc::downgrade(controller);
    let forward = |make: fn(&Event, &Node) -> WidgetEvent| {
        let weak = weak.clone();
        let node: Node = input.clone().into();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&weak, make(&event, &node), &event);
        })
    };

    let input_target: &EventTarget = input.unchecked_ref();
    let document_target: &EventTarget = document.unchecked_ref();

    Ok(vec![
        Listener::attach(input_target, "input", forward(|_, _| WidgetEvent::Input))?,
        Listener::attach(
            input_target,
            "search",
            forward(|_, _| WidgetEvent::SearchCleared),
        )?,
        Listener::attach(input_target, "click", forward(|_, _| WidgetEvent::InputClick))?,
        Listener::attach(
            input_target,
            "keydown",
            forward(|event, _| WidgetEvent::InputKey(key_of(event))),
        )?,
        Listener::attach(
            document_target,
            "keydown",
            forward(|event, node| WidgetEvent::GlobalKey {
                key: key_of(event),
                target: key_target(event, node),
            }),
        )?,
    ])
}
