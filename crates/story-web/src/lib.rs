//! Browser binding for the story scroll controller
//!
//! Expects the page markup of the storytelling site: a `#scroll-container`
//! holding `.page` sections and an empty `#dots-container`. An optional
//! `#restartBtn` is wired to [`StoryScroller::restart`].

use std::rc::Rc;
use std::sync::Arc;
use story_core::{PageInfo, PageScrollController, PageSet, ScrollSettings, StoryError};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement, MouseEvent, WheelEvent};

mod dom;

pub use dom::{ContainerSurface, DomDots, PerformanceClock};

/// Pixels per line for `DOM_DELTA_LINE` wheel events
const LINE_HEIGHT_PX: f64 = 40.0;

#[wasm_bindgen]
pub struct StoryScroller {
    controller: Rc<PageScrollController>,
    _dots: Arc<DomDots>,
}

#[wasm_bindgen]
impl StoryScroller {
    /// Mount on the current document with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<StoryScroller, JsValue> {
        mount(ScrollSettings::default()).map_err(report)
    }

    /// Mount with settings given as the JSON `scroll` object of a story manifest
    pub fn with_settings(settings_json: &str) -> Result<StoryScroller, JsValue> {
        let settings: ScrollSettings =
            serde_json::from_str(settings_json).map_err(|err| report(StoryError::from(err)))?;
        settings.validate().map_err(report)?;
        mount(settings).map_err(report)
    }

    /// Back to the first page
    pub fn restart(&self) {
        self.controller.restart();
    }

    /// Jump to `page`, clamped into range. Returns the page landed on.
    pub fn jump_to_page(&self, page: usize) -> usize {
        self.controller.jump_to_page(page);
        self.controller.current_page()
    }

    pub fn current_page(&self) -> usize {
        self.controller.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.controller.page_count()
    }

    pub fn is_transitioning(&self) -> bool {
        self.controller.is_transitioning()
    }
}

fn report(err: StoryError) -> JsValue {
    let message = format!("story scroller: {}", err);
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn missing(what: &str) -> StoryError {
    StoryError::MissingElement(what.to_string())
}

fn mount(settings: ScrollSettings) -> Result<StoryScroller, StoryError> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;
    let container = document
        .get_element_by_id("scroll-container")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| missing("#scroll-container"))?;
    let dots_host = document
        .get_element_by_id("dots-container")
        .ok_or_else(|| missing("#dots-container"))?;

    let pages = discover_pages(&document)?;
    let dot_elements = create_dots(&document, &dots_host, pages.len())?;

    let surface = Arc::new(ContainerSurface::new(window.clone(), container.clone()));
    let clock = Arc::new(PerformanceClock::new(&window));
    let controller = Rc::new(PageScrollController::new(pages, settings, surface.clone(), clock)?);

    let dots = Arc::new(DomDots::new(dot_elements.clone()));
    controller.add_subscriber(dots.clone());

    attach_listeners(&window, &document, &container, &dot_elements, &controller, &surface)
        .map_err(|_| missing("event target"))?;

    debug!(pages = controller.page_count(), "story scroller mounted");

    Ok(StoryScroller {
        controller,
        _dots: dots,
    })
}

fn discover_pages(document: &Document) -> Result<PageSet, StoryError> {
    let nodes = document
        .query_selector_all(".page")
        .map_err(|_| missing(".page"))?;

    let pages = (0..nodes.length())
        .filter_map(|idx| nodes.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .enumerate()
        .map(|(idx, el)| {
            let id = el.id();
            let id = if id.is_empty() { format!("page-{}", idx) } else { id };
            PageInfo::new(id.clone(), id)
        })
        .collect();

    PageSet::new(pages)
}

fn create_dots(
    document: &Document,
    host: &Element,
    count: usize,
) -> Result<Vec<Element>, StoryError> {
    let mut dots = Vec::with_capacity(count);
    for idx in 0..count {
        let dot = document
            .create_element("div")
            .map_err(|_| missing("div.dot"))?;
        let classes = dot.class_list();
        let _ = classes.add_1("dot");
        if idx == 0 {
            let _ = classes.add_1("active");
        }
        let _ = dot.set_attribute("data-page-id", &idx.to_string());
        host.append_child(&dot).map_err(|_| missing("#dots-container"))?;
        dots.push(dot);
    }
    Ok(dots)
}

/// Normalise a wheel event to pixels
fn wheel_delta_px(event: &WheelEvent, viewport_height: f64) -> f64 {
    match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => event.delta_y() * LINE_HEIGHT_PX,
        WheelEvent::DOM_DELTA_PAGE => event.delta_y() * viewport_height,
        _ => event.delta_y(),
    }
}

fn attach_listeners(
    window: &web_sys::Window,
    document: &Document,
    container: &HtmlElement,
    dots: &[Element],
    controller: &Rc<PageScrollController>,
    surface: &Arc<ContainerSurface>,
) -> Result<(), JsValue> {
    use story_core::ScrollSurface;

    // wheel: never let the container free-scroll
    {
        let controller = controller.clone();
        let surface = surface.clone();
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        let closure = Closure::<dyn FnMut(WheelEvent)>::wrap(Box::new(move |event: WheelEvent| {
            event.prevent_default();
            controller.handle_wheel(wheel_delta_px(&event, surface.viewport_height()));
        }));
        container.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
    }

    // dot clicks
    for (idx, dot) in dots.iter().enumerate() {
        let controller = controller.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            controller.handle_dot_click(idx);
        }));
        dot.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // scrollbar, keyboard and touch scrolling
    {
        let controller = controller.clone();
        let surface = surface.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            controller.sync_to_offset(surface.scroll_top());
        }));
        container.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // completion of programmatic scrolls
    {
        let controller = controller.clone();
        let surface = surface.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(ticket) = surface.take_pending() {
                controller.transition_settled(ticket);
            }
        }));
        container.add_event_listener_with_callback("scrollend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // viewport height changes
    {
        let controller = controller.clone();
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            controller.handle_resize();
        }));
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // "Restart Story" button on the last page, when present
    if let Some(button) = document.get_element_by_id("restartBtn") {
        let controller = controller.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            controller.restart();
        }));
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
