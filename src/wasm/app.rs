//! Browser glue: element lookup, startup configuration, event listeners and
//! the animation-frame loop. All mutable state lives in one [`App`] value
//! shared across the callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

use crate::config::{Mode, MODE_PARAM, RESIZE_QUIET_MS};
use crate::constellation::{self, StarField};
use crate::helix::{self, DnaParticle};
use crate::nebula::NebulaField;
use crate::rng::GeometryRng;
use crate::scheduler::{AnimationScheduler, Debounce, FrameAction, StartPlan};
use crate::viewport::ViewportState;

use super::render;

/// Id of the drawing surface, fixed behind the page content.
const CANVAS_ID: &str = "bg-canvas";
/// Id of the content wrapper whose measured height sets the drawable height.
const WRAPPER_ID: &str = "page-wrapper";

/// Geometry of the active mode; replaced wholesale on every regeneration.
pub(super) enum Scene {
    Constellation(StarField),
    Dna(Vec<DnaParticle>),
}

pub(super) struct App {
    canvas: HtmlCanvasElement,
    pub(super) ctx: CanvasRenderingContext2d,
    wrapper: HtmlElement,
    mode: Mode,
    reduced_motion: bool,
    pub(super) viewport: ViewportState,
    pub(super) nebula: NebulaField,
    pub(super) scene: Scene,
    pub(super) rng: GeometryRng,
    scheduler: AnimationScheduler,
    debounce: Debounce,
    raf_id: Option<i32>,
}

/// `request_animation_frame` closure, stored in an `Option` so it can obtain
/// a reference to itself and keep re-arming the loop.
type RafHandle = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub(super) fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // A page without the surface or wrapper simply gets no backdrop; the
    // whole subsystem declines silently rather than surfacing an error.
    let Some(element) = document.get_element_by_id(CANVAS_ID) else {
        return Ok(());
    };
    let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
        return Ok(());
    };
    let Some(context) = canvas.get_context("2d")? else {
        return Ok(());
    };
    let Ok(ctx) = context.dyn_into::<CanvasRenderingContext2d>() else {
        return Ok(());
    };
    let Some(wrapper) = document
        .get_element_by_id(WRAPPER_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(());
    };

    let viewport = measure(&window, &wrapper);
    if viewport.is_constrained() {
        log::info!(
            "backdrop disabled: viewport {:.0}px wide is a constrained device",
            viewport.width
        );
        return Ok(());
    }

    let mode = Mode::from_query(query_param(&window, MODE_PARAM).as_deref());
    let reduced_motion = media_matches(&window, "(prefers-reduced-motion: reduce)");
    log::info!(
        "backdrop starting: mode={} reduced_motion={}",
        mode.as_str(),
        reduced_motion
    );

    size_canvas(&canvas, &ctx, &viewport);

    let constrained = viewport.is_constrained();
    let mut rng = GeometryRng::from_entropy();
    let nebula = NebulaField::new(&viewport, constrained, &mut rng);
    let scene = build_scene(mode, &viewport, constrained, &mut rng);

    let app = Rc::new(RefCell::new(App {
        canvas,
        ctx,
        wrapper,
        mode,
        reduced_motion,
        viewport,
        nebula,
        scene,
        rng,
        scheduler: AnimationScheduler::new(constrained),
        debounce: Debounce::new(RESIZE_QUIET_MS),
        raf_id: None,
    }));

    let plan = app.borrow_mut().scheduler.start(reduced_motion);
    match plan {
        StartPlan::StaticFrame => {
            render::draw_frame(&mut app.borrow_mut(), render::STATIC_FRAME_TIME_MS);
        }
        StartPlan::Animate => {
            let raf: RafHandle = Rc::new(RefCell::new(None));
            {
                let app = app.clone();
                let raf_inner = raf.clone();
                *raf.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
                    {
                        let mut a = app.borrow_mut();
                        if let FrameAction::Draw = a.scheduler.on_frame(time) {
                            render::draw_frame(&mut a, time);
                        }
                    }
                    let id = request_frame(&raf_inner);
                    app.borrow_mut().raf_id = id;
                }) as Box<dyn FnMut(f64)>));
            }
            let id = request_frame(&raf);
            app.borrow_mut().raf_id = id;

            attach_visibility(&document, &app, &raf)?;
        }
    }

    attach_resize(&window, &app)?;
    Ok(())
}

/// Issue one animation-frame request for the stored loop closure.
fn request_frame(raf: &RafHandle) -> Option<i32> {
    let window = web_sys::window()?;
    let cell = raf.borrow();
    let closure = cell.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

/// Pause when the tab goes hidden, resume when it comes back. The scheduler
/// guarantees one cancel per hide and one new request per show.
fn attach_visibility(
    document: &Document,
    app: &Rc<RefCell<App>>,
    raf: &RafHandle,
) -> Result<(), JsValue> {
    let doc = document.clone();
    let app = app.clone();
    let raf = raf.clone();
    let closure = Closure::wrap(Box::new(move || {
        let mut a = app.borrow_mut();
        if doc.hidden() {
            if a.scheduler.on_hidden() {
                if let (Some(id), Some(window)) = (a.raf_id.take(), web_sys::window()) {
                    window.cancel_animation_frame(id).ok();
                }
            }
        } else if a.scheduler.on_visible() {
            drop(a);
            let id = request_frame(&raf);
            app.borrow_mut().raf_id = id;
        }
    }) as Box<dyn FnMut()>);
    document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Debounced layout handling. Every event re-arms the deadline and schedules
/// a timer; timers belonging to superseded events no-op inside
/// `Debounce::fire`, so a burst of events regenerates geometry exactly once.
fn attach_resize(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let timeout: Rc<Closure<dyn FnMut()>> = {
        let app = app.clone();
        Rc::new(Closure::wrap(Box::new(move || {
            let mut a = app.borrow_mut();
            if a.debounce.fire(js_sys::Date::now()) {
                regenerate(&mut a);
                if a.reduced_motion {
                    // Keep the static frame in step with the new layout.
                    render::draw_frame(&mut a, render::STATIC_FRAME_TIME_MS);
                }
            }
        }) as Box<dyn FnMut()>))
    };

    let on_layout = {
        let app = app.clone();
        let window = window.clone();
        let timeout = timeout.clone();
        Closure::wrap(Box::new(move || {
            app.borrow_mut().debounce.note(js_sys::Date::now());
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    (*timeout).as_ref().unchecked_ref(),
                    RESIZE_QUIET_MS as i32,
                )
                .ok();
        }) as Box<dyn FnMut()>)
    };

    window.add_event_listener_with_callback("resize", on_layout.as_ref().unchecked_ref())?;

    // Content reflow (dynamic loading, collapsing sections) can change the
    // wrapper height without a viewport resize; observe the wrapper too.
    let observer = web_sys::ResizeObserver::new(on_layout.as_ref().unchecked_ref())?;
    observer.observe(&app.borrow().wrapper);

    on_layout.forget();
    std::mem::forget(observer);
    std::mem::forget(timeout);
    Ok(())
}

/// Remeasure the surface and rebuild the active mode's geometry from scratch.
/// The nebula pool deliberately survives; only mode geometry is layout-bound.
fn regenerate(a: &mut App) {
    let Some(window) = web_sys::window() else {
        return;
    };
    a.viewport = measure(&window, &a.wrapper);
    size_canvas(&a.canvas, &a.ctx, &a.viewport);

    let viewport = a.viewport;
    let constrained = viewport.is_constrained();
    a.scene = build_scene(a.mode, &viewport, constrained, &mut a.rng);
    log::debug!(
        "regenerated {} geometry at {:.0}x{:.0}",
        a.mode.as_str(),
        viewport.width,
        viewport.content_height
    );
}

fn build_scene(
    mode: Mode,
    viewport: &ViewportState,
    constrained: bool,
    rng: &mut GeometryRng,
) -> Scene {
    match mode {
        Mode::Constellation => Scene::Constellation(constellation::generate(viewport, constrained, rng)),
        Mode::Dna => Scene::Dna(helix::generate(viewport, constrained, rng)),
    }
}

fn measure(window: &Window, wrapper: &HtmlElement) -> ViewportState {
    ViewportState {
        width: window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        // The canvas sits outside the wrapper, so the wrapper's offset height
        // is pure content height.
        content_height: wrapper.offset_height() as f64,
        hero_height: window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        pixel_density: window.device_pixel_ratio(),
    }
}

/// DPR-aware sizing: backing store in device pixels, CSS size in logical
/// pixels, and the context scaled so drawing code works in logical units.
fn size_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d, vp: &ViewportState) {
    canvas.set_width((vp.width * vp.pixel_density) as u32);
    canvas.set_height((vp.content_height * vp.pixel_density) as u32);
    let style = canvas.style();
    style
        .set_property("width", &format!("{}px", vp.width))
        .ok();
    style
        .set_property("height", &format!("{}px", vp.content_height))
        .ok();
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.scale(vp.pixel_density, vp.pixel_density).ok();
}

fn query_param(window: &Window, key: &str) -> Option<String> {
    let search = window.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(key)
}

fn media_matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}
