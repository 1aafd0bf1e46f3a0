//! Yule Card entry point
//!
//! The wasm driver owns the DOM render surface and the real clock: one
//! animation-frame loop reads the wall clock, advances the scene, and
//! reconciles the page. User gestures call scene actions; teardown cancels
//! the driving callback so nothing can mutate a dismounted card.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{Local, NaiveDateTime};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement};

    use yule_card::audio::MusicPlayer;
    use yule_card::scene::state::GREETING_TITLE;
    use yule_card::scene::{MusicCommand, Scene, SceneEvent};

    /// Shared slot for the animation-frame closure; emptied on teardown to
    /// break the reference cycle with the card.
    type RafSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Card instance owned by the page
    struct Card {
        scene: Scene,
        music: MusicPlayer,
        raf_id: Option<i32>,
        /// Once set, gesture handlers become no-ops
        stopped: bool,
    }

    fn now_stamp() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_millis() -> i64 {
        yule_card::epoch_ms(now_stamp())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Yule Card starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let scene = Scene::new(seed, now_stamp());
        log::info!("scene initialized with seed: {seed}");

        let music = MusicPlayer::from_document(&document, "music");
        let card = Rc::new(RefCell::new(Card {
            scene,
            music,
            raf_id: None,
            stopped: false,
        }));

        spawn_decor(&document, &card.borrow().scene);
        setup_actions(&document, &card);

        let raf_slot: RafSlot = Rc::new(RefCell::new(None));
        setup_teardown(&card, &raf_slot);
        start_loop(card, raf_slot);

        log::info!("Yule Card running!");
    }

    // === Animation-frame loop ===

    fn start_loop(card: Rc<RefCell<Card>>, raf_slot: RafSlot) {
        let slot = raf_slot.clone();
        let loop_card = card.clone();
        *raf_slot.borrow_mut() = Some(Closure::new(move |_time: f64| {
            let events = {
                let mut c = loop_card.borrow_mut();
                if c.stopped {
                    return;
                }
                yule_card::tick(&mut c.scene, now_stamp())
            };

            for event in events {
                match event {
                    SceneEvent::TryAutoplay => attempt_play(&loop_card),
                }
            }

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let c = loop_card.borrow();
                update_view(&document, &c.scene);
            }

            schedule_frame(&loop_card, &slot);
        }));

        schedule_frame(&card, &raf_slot);
    }

    fn schedule_frame(card: &Rc<RefCell<Card>>, raf_slot: &RafSlot) {
        let Some(window) = web_sys::window() else { return };
        if let Some(closure) = raf_slot.borrow().as_ref() {
            match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                Ok(id) => card.borrow_mut().raf_id = Some(id),
                Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
            }
        }
    }

    /// Cancel the driving callback. Every schedule in the scene is a
    /// deadline fired from this one callback, so this revokes them all.
    fn setup_teardown(card: &Rc<RefCell<Card>>, raf_slot: &RafSlot) {
        let Some(window) = web_sys::window() else { return };
        let card = card.clone();
        let raf_slot = raf_slot.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut c = card.borrow_mut();
            c.stopped = true;
            if let Some(id) = c.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            c.music.pause();
            drop(c);
            raf_slot.borrow_mut().take();
            log::info!("card torn down; scheduled callbacks cancelled");
        });
        let _ = window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // === Audio ===

    fn attempt_play(card: &Rc<RefCell<Card>>) {
        let on_refused = {
            let card = card.clone();
            move || card.borrow_mut().scene.music_refused()
        };
        card.borrow().music.play(on_refused);
    }

    // === Static decor ===

    fn make_span(document: &Document, class: &str) -> Option<Element> {
        let el = document.create_element("span").ok()?;
        let _ = el.set_attribute("class", class);
        Some(el)
    }

    fn set_style(el: &Element, property: &str, value: &str) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property(property, value);
        }
    }

    /// Build the immutable particle layers once
    fn spawn_decor(document: &Document, scene: &Scene) {
        if let Some(title) = document.get_element_by_id("title") {
            for (i, letter) in GREETING_TITLE.chars().enumerate() {
                let Some(el) = make_span(document, "title-letter") else { continue };
                el.set_text_content(Some(&letter.to_string()));
                set_style(&el, "animation-delay", &format!("{:.1}s", i as f32 * 0.1));
                let _ = title.append_child(&el);
            }
        }

        if let Some(field) = document.get_element_by_id("snow-field") {
            for flake in &scene.decor.snowflakes {
                let Some(el) = make_span(document, "snowflake") else { continue };
                el.set_text_content(Some(flake.symbol));
                set_style(&el, "left", &format!("{}%", flake.left));
                set_style(&el, "font-size", &format!("{}px", flake.size));
                set_style(&el, "animation-duration", &format!("{}s", flake.duration));
                set_style(&el, "animation-delay", &format!("{}s", flake.delay));
                let _ = field.append_child(&el);
            }
        }

        if let Some(sky) = document.get_element_by_id("sky") {
            for star in &scene.decor.stars {
                let Some(el) = make_span(document, "star") else { continue };
                set_style(&el, "left", &format!("{}%", star.left));
                set_style(&el, "top", &format!("{}%", star.top));
                set_style(&el, "animation-delay", &format!("{}s", star.delay));
                let _ = sky.append_child(&el);
            }
        }

        if let Some(tree) = document.get_element_by_id("tree-lights") {
            for light in &scene.decor.tree_lights {
                let Some(el) = make_span(document, "tree-light") else { continue };
                set_style(&el, "left", &format!("{}%", light.left));
                set_style(&el, "top", &format!("{}%", light.top));
                set_style(&el, "animation-delay", &format!("{}s", light.delay));
                set_style(&el, "background-color", light.color);
                let _ = tree.append_child(&el);
            }
        }

        if let Some(field) = document.get_element_by_id("emoji-field") {
            for emoji in &scene.decor.floating_emojis {
                let Some(el) = make_span(document, "floating-emoji") else { continue };
                el.set_text_content(Some(emoji.symbol));
                set_style(&el, "left", &format!("{}%", emoji.left));
                set_style(&el, "animation-duration", &format!("{}s", emoji.duration));
                set_style(&el, "animation-delay", &format!("{}s", emoji.delay));
                let _ = field.append_child(&el);
            }
        }
    }

    // === Per-frame view reconciliation ===

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_flag_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn update_view(document: &Document, scene: &Scene) {
        // Countdown
        if scene.countdown.arrived() {
            set_flag_class(document, "countdown", "hidden", true);
            set_flag_class(document, "christmas-message", "hidden", false);
        } else {
            set_text(document, "cd-days", &scene.countdown.days.to_string());
            set_text(document, "cd-hours", &scene.countdown.hours.to_string());
            set_text(document, "cd-minutes", &scene.countdown.minutes.to_string());
            set_text(document, "cd-seconds", &scene.countdown.seconds.to_string());
        }

        // Ambient flags
        set_flag_class(document, "tree", "lights-on", scene.lights_on);
        set_flag_class(document, "mascot", "visible", scene.mascot_visible);
        set_flag_class(document, "santa", "flying", scene.flyover_active);
        set_flag_class(document, "hohoho", "visible", scene.greeting_visible);
        set_flag_class(document, "card", "flipped", scene.card_flipped);

        // Reindeer glow
        set_flag_class(document, "rudolph", "glowing", scene.glow_active);
        set_flag_class(document, "rudolph-message", "visible", scene.glow_active);
        set_text(document, "rudolph-message", scene.glow_message);

        // Jokes
        set_text(document, "joke-setup", scene.jokes.current.setup);
        set_text(document, "joke-punchline", scene.jokes.current.punchline);
        set_flag_class(document, "joke-punchline", "revealed", scene.jokes.punchline_shown);

        // Game
        set_text(document, "game-score", &scene.game.score.to_string());
        set_flag_class(document, "game-field", "active", scene.game.active);
        render_cookies(document, scene);

        // Music + footer
        set_text(document, "music-btn", if scene.music_playing { "🔊" } else { "🔇" });
        set_text(document, "year", &scene.current_year.to_string());
    }

    fn render_cookies(document: &Document, scene: &Scene) {
        let Some(field) = document.get_element_by_id("cookie-field") else {
            return;
        };
        field.set_inner_html("");
        for cookie in &scene.game.cookies {
            let Some(el) = make_span(document, "cookie") else { continue };
            let _ = el.set_attribute("data-id", &cookie.id.to_string());
            el.set_text_content(Some("🍪"));
            set_style(&el, "left", &format!("{}%", cookie.left));
            set_style(&el, "top", &format!("{}%", cookie.top));
            let _ = field.append_child(&el);
        }
    }

    // === User actions ===

    fn on_click(
        document: &Document,
        id: &str,
        card: &Rc<RefCell<Card>>,
        mut action: impl FnMut(&mut Card) + 'static,
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("missing element #{id}; action not wired");
            return;
        };
        let card = card.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut c = card.borrow_mut();
            if c.stopped {
                return;
            }
            action(&mut c);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_actions(document: &Document, card: &Rc<RefCell<Card>>) {
        on_click(document, "tree", card, |c| {
            c.scene.tree_clicked(now_millis());
        });
        on_click(document, "card", card, |c| c.scene.flip_card());
        on_click(document, "joke-btn", card, |c| {
            c.scene.tell_joke(now_millis());
        });
        on_click(document, "rudolph", card, |c| c.scene.toggle_glow());
        on_click(document, "game-start-btn", card, |c| {
            c.scene.start_game(now_millis());
        });

        // Music toggle needs the card handle again for the refusal callback
        {
            let handle = card.clone();
            on_click(document, "music-btn", card, move |c| {
                match c.scene.toggle_music() {
                    MusicCommand::Play => {
                        let on_refused = {
                            let handle = handle.clone();
                            move || handle.borrow_mut().scene.music_refused()
                        };
                        c.music.play(on_refused);
                    }
                    MusicCommand::Pause => c.music.pause(),
                }
            });
        }

        // Cookie catches are delegated through the field container
        on_delegated_catch(document, card);
    }

    fn on_delegated_catch(document: &Document, card: &Rc<RefCell<Card>>) {
        let Some(field) = document.get_element_by_id("cookie-field") else {
            return;
        };
        let card = card.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(target) = event.target() else { return };
            let Ok(el) = target.dyn_into::<Element>() else {
                return;
            };
            let Ok(Some(cookie)) = el.closest(".cookie") else {
                return;
            };
            let Some(id) = cookie.get_attribute("data-id") else {
                return;
            };
            let Ok(id) = id.parse::<u32>() else { return };

            let mut c = card.borrow_mut();
            if c.stopped {
                return;
            }
            c.scene.catch_cookie(id);
        });
        let _ = field.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_card::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use chrono::Local;

    env_logger::init();
    log::info!("Yule Card (native) - the card itself renders in a browser; run with `trunk serve`");

    // Still useful on a terminal: how long until Christmas?
    let now = Local::now().naive_local();
    let countdown = yule_card::scene::Countdown::new(now);
    if countdown.arrived() {
        println!("Merry Christmas!");
    } else {
        println!(
            "{} days, {} hours, {} minutes, {} seconds until Christmas",
            countdown.days, countdown.hours, countdown.minutes, countdown.seconds
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
