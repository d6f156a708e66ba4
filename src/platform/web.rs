//! Browser wiring
//!
//! Finds the court canvas, loads the paddle sprites, hooks pointer/touch
//! events and drives `TennisGame` from `requestAnimationFrame`. A page
//! without the canvas simply gets no game.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, CustomEvent, CustomEventInit, Document, Element, EventTarget,
    HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent, Window,
};

use crate::clock::{FrameCallback, TickSource, run_loop};
use crate::game::{SceneHost, Sprites, TennisGame};
use crate::input::SurfaceRect;
use crate::renderer::{Rect, Surface};
use crate::settings::Tuning;
use crate::sim::{PcgRandom, Scoreboard};
use crate::sprite::SpriteImage;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no window or document")]
    NoDocument,
    #[error("#{0} is not a canvas")]
    NotACanvas(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Js(format!("{:?}", value))
    }
}

/// Element ids and asset paths the page provides
#[derive(Debug, Clone)]
pub struct MountConfig {
    pub canvas_id: String,
    /// Scene element whose `active` class marks the court as visible
    pub scene_id: String,
    pub player_sprite_url: Option<String>,
    pub opponent_sprite_url: Option<String>,
    pub points_id: String,
    pub player_term_id: String,
    pub opponent_term_id: String,
    pub rally_id: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            canvas_id: "tennis-canvas".to_string(),
            scene_id: "scene-8".to_string(),
            player_sprite_url: Some("assets/audio/pictures/tennis_her.png".to_string()),
            opponent_sprite_url: Some("assets/audio/pictures/tennis_him.png".to_string()),
            points_id: "tennis-score".to_string(),
            player_term_id: "tennis-player-score".to_string(),
            opponent_term_id: "tennis-opponent-score".to_string(),
            rally_id: "tennis-rally".to_string(),
        }
    }
}

/// Canvas 2D implementation of `Surface`
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface for Canvas2dSurface {
    type Sprite = HtmlImageElement;

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        if self
            .ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn draw_sprite(&mut self, sprite: &HtmlImageElement, rect: Rect) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            sprite,
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        ) {
            log::debug!("drawImage failed: {:?}", e);
        }
    }
}

impl SpriteImage for HtmlImageElement {
    fn natural_size(&self) -> Option<Vec2> {
        if self.complete() && self.natural_width() > 0 {
            Some(Vec2::new(
                self.natural_width() as f32,
                self.natural_height() as f32,
            ))
        } else {
            None
        }
    }
}

/// Scene visibility and completion through the DOM
pub struct DomSceneHost {
    scene: Option<Element>,
    scene_id: String,
    delay_ms: u32,
}

impl DomSceneHost {
    fn new(document: &Document, scene_id: &str, delay_ms: u32) -> Self {
        let scene = document.get_element_by_id(scene_id);
        if scene.is_none() {
            log::warn!("No #{} scene element, court treated as always visible", scene_id);
        }
        Self {
            scene,
            scene_id: scene_id.to_string(),
            delay_ms,
        }
    }
}

impl SceneHost for DomSceneHost {
    fn is_active(&self) -> bool {
        self.scene
            .as_ref()
            .is_none_or(|scene| scene.class_list().contains("active"))
    }

    fn notify_complete(&self) {
        let Some(scene) = &self.scene else {
            return;
        };
        if scene.get_attribute("data-complete").as_deref() == Some("true") {
            return;
        }
        let _ = scene.set_attribute("data-complete", "true");

        let detail = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&detail, &"sceneId".into(), &self.scene_id.as_str().into());
        let _ = js_sys::Reflect::set(&detail, &"delayMs".into(), &JsValue::from(self.delay_ms));

        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict("scene-complete", &init) {
            Ok(event) => {
                let _ = scene.dispatch_event(&event);
                log::info!("Dispatched scene-complete for #{}", self.scene_id);
            }
            Err(e) => log::warn!("Could not create scene-complete event: {:?}", e),
        }
    }
}

/// Scoreboard text nodes; any of them may be missing
struct ScoreboardView {
    points: Option<Element>,
    player_term: Option<Element>,
    opponent_term: Option<Element>,
    rally: Option<Element>,
}

impl ScoreboardView {
    fn new(document: &Document, config: &MountConfig) -> Self {
        Self {
            points: document.get_element_by_id(&config.points_id),
            player_term: document.get_element_by_id(&config.player_term_id),
            opponent_term: document.get_element_by_id(&config.opponent_term_id),
            rally: document.get_element_by_id(&config.rally_id),
        }
    }

    fn write(&self, board: &Scoreboard) {
        let fields = [
            (&self.points, board.points.as_str()),
            (&self.player_term, board.player_term),
            (&self.opponent_term, board.opponent_term),
            (&self.rally, board.rally.as_str()),
        ];
        for (el, text) in fields {
            if let Some(el) = el {
                el.set_text_content(Some(text));
            }
        }
    }
}

/// requestAnimationFrame as a tick source
struct RafTicks {
    window: Window,
}

impl TickSource for RafTicks {
    fn schedule(&self, callback: FrameCallback) {
        let closure = Closure::once(move |time: f64| callback(time));
        if let Err(e) = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }
}

/// Everything the frame loop and event handlers share
struct WebGame {
    game: TennisGame<PcgRandom>,
    surface: Canvas2dSurface,
    sprites: Sprites<HtmlImageElement>,
    host: DomSceneHost,
    canvas: HtmlCanvasElement,
    board_view: ScoreboardView,
    shown: Option<Scoreboard>,
}

impl WebGame {
    fn on_frame(&mut self) {
        let report = self
            .game
            .frame(&self.host, &mut self.surface, &self.sprites);
        if report.render || report.scoreboard_dirty() {
            self.refresh_scoreboard();
        }
    }

    fn refresh_scoreboard(&mut self) {
        let board = self.game.scoreboard();
        if self.shown.as_ref() != Some(&board) {
            self.board_view.write(&board);
            self.shown = Some(board);
        }
    }

    fn on_pointer_x(&mut self, client_x: f32) {
        let bounds = self.canvas.get_bounding_client_rect();
        let rect = SurfaceRect {
            left: bounds.left() as f32,
            width: bounds.width() as f32,
        };
        self.game.pointer_moved(client_x, rect);
    }
}

/// Logger + panic hook, then mount with the default page layout
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match mount(MountConfig::default()) {
        Ok(true) => log::info!("Tennis court running"),
        Ok(false) => {}
        Err(e) => log::error!("Tennis court setup failed: {}", e),
    }
}

/// JS entry point for pages that lay the court out differently
#[wasm_bindgen(js_name = mountTennisCourt)]
pub fn mount_tennis_court(canvas_id: String, scene_id: String) -> Result<bool, JsValue> {
    let config = MountConfig {
        canvas_id,
        scene_id,
        ..MountConfig::default()
    };
    mount(config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Wire the game into the page. `Ok(false)` when the canvas is absent.
pub fn mount(config: MountConfig) -> Result<bool, SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoDocument)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;

    let Some(element) = document.get_element_by_id(&config.canvas_id) else {
        log::warn!("No #{} on page, tennis court disabled", config.canvas_id);
        return Ok(false);
    };
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| SetupError::NotACanvas(config.canvas_id.clone()))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(SetupError::NoContext)?
        .dyn_into()
        .map_err(|_| SetupError::NoContext)?;

    let tuning = read_tuning(&canvas);
    let seed = js_sys::Date::now() as u64;
    log::info!(
        "Tennis court {}x{} (seed {})",
        tuning.width,
        tuning.height,
        seed
    );

    let sprites = Sprites {
        player: config.player_sprite_url.as_deref().and_then(load_sprite),
        opponent: config.opponent_sprite_url.as_deref().and_then(load_sprite),
    };
    let host = DomSceneHost::new(&document, &config.scene_id, tuning.complete_delay_ms);

    let game = Rc::new(RefCell::new(WebGame {
        game: TennisGame::new(tuning, PcgRandom::new(seed)),
        surface: Canvas2dSurface { ctx },
        sprites,
        host,
        canvas: canvas.clone(),
        board_view: ScoreboardView::new(&document, &config),
        shown: None,
    }));

    // Events land on the surrounding court when there is one
    let target: EventTarget = match canvas.closest(".tennis-court").ok().flatten() {
        Some(court) => court.into(),
        None => canvas.into(),
    };
    setup_input_handlers(&target, &game)?;

    run_loop(Rc::new(RafTicks { window }), move |_time| {
        game.borrow_mut().on_frame();
    });
    Ok(true)
}

/// Canvas size is authoritative; `data-tuning` JSON may override the rest
fn read_tuning(canvas: &HtmlCanvasElement) -> Tuning {
    let (width, height) = (canvas.width() as f32, canvas.height() as f32);
    let mut tuning = match canvas.get_attribute("data-tuning") {
        Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring data-tuning: {}", e);
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    tuning.width = width;
    tuning.height = height;
    if let Err(e) = tuning.validate() {
        log::warn!("Court tuning degraded for {}x{} canvas: {}", width, height, e);
    }
    tuning
}

/// Start loading a sprite; failures only log and leave the solid fallback
fn load_sprite(url: &str) -> Option<HtmlImageElement> {
    let img = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Could not create image for {}: {:?}", url, e);
            return None;
        }
    };
    {
        let url = url.to_string();
        let _ = listen(&img, "error", move |_| {
            log::warn!("Sprite {} failed to load, drawing solid paddles", url);
        });
    }
    img.set_src(url);
    Some(img)
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), SetupError> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn setup_input_handlers(
    target: &EventTarget,
    game: &Rc<RefCell<WebGame>>,
) -> Result<(), SetupError> {
    // Mouse and pointer movement (PointerEvent is a MouseEvent)
    for name in ["mousemove", "pointermove"] {
        let game = game.clone();
        listen(target, name, move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                game.borrow_mut().on_pointer_x(event.client_x() as f32);
            }
        })?;
    }

    // Touch movement
    {
        let game = game.clone();
        listen(target, "touchmove", move |event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0));
            if let Some(touch) = touch {
                game.borrow_mut().on_pointer_x(touch.client_x() as f32);
            }
        })?;
    }

    // Entering the court starts the match
    for name in ["mouseenter", "pointerenter", "touchstart"] {
        let game = game.clone();
        listen(target, name, move |_event| {
            game.borrow_mut().game.pointer_entered();
        })?;
    }

    Ok(())
}
