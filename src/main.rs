//! Tilt Type entry point
//!
//! Handles platform-specific initialization and runs the demo loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceOrientationEvent, Document, Element};

    use tilt_type::consts::*;
    use tilt_type::platform::{self, MotionSupport};
    use tilt_type::sim::{LetterField, LetterSim, RigidLetters, TiltSample, gravity_from_tilt};
    use tilt_type::{DemoMode, Settings};

    /// Demo instance holding all state
    struct Demo {
        sim: LetterSim,
        /// Latest gravity vector (clamped tilt units)
        gravity: Vec2,
        accumulator: f32,
        last_time: f64,
        show_readout: bool,
        /// One absolutely-positioned span per glyph, in spawn order
        spans: Vec<Element>,
    }

    impl Demo {
        fn new(settings: &Settings, seed: u64) -> Self {
            let sim = match settings.mode {
                DemoMode::Points => {
                    LetterSim::Points(LetterField::new(DEMO_TEXT, seed, &settings.tuning))
                }
                DemoMode::Rigid => {
                    LetterSim::Rigid(RigidLetters::new(DEMO_TEXT, seed, &settings.tuning))
                }
            };
            Self {
                sim,
                // Straight down until the first sensor sample arrives
                gravity: Vec2::new(0.0, 1.0),
                accumulator: 0.0,
                last_time: 0.0,
                show_readout: settings.show_gravity_readout,
                spans: Vec::new(),
            }
        }

        /// Run fixed-timestep simulation steps
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.sim.step(self.gravity, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            // Drop backlog we couldn't catch up on (tab was hidden)
            if self.accumulator >= SIM_DT {
                self.accumulator = 0.0;
            }
        }

        /// Write current poses into the DOM spans
        fn render(&self, document: &Document) {
            for (span, pose) in self.spans.iter().zip(self.sim.poses()) {
                let style = format!(
                    "position:absolute;left:{:.1}px;top:{:.1}px;transform:rotate({:.3}rad);",
                    pose.x, pose.y, pose.angle
                );
                let _ = span.set_attribute("style", &style);
            }

            if self.show_readout {
                if let Some(el) = document.get_element_by_id("gravity-x") {
                    el.set_text_content(Some(&format!("x: {:.2}", self.gravity.x)));
                }
                if let Some(el) = document.get_element_by_id("gravity-y") {
                    el.set_text_content(Some(&format!("y: {:.2}", self.gravity.y)));
                }
            }
        }
    }

    /// Create one span per glyph inside the stage element
    fn spawn_glyph_spans(document: &Document, demo: &mut Demo) {
        let Some(stage) = document.get_element_by_id("stage") else {
            log::error!("No #stage element; nothing to render into");
            return;
        };

        for pose in demo.sim.poses() {
            if let Ok(span) = document.create_element("span") {
                let _ = span.set_attribute("class", "letter");
                span.set_text_content(Some(&pose.glyph.to_string()));
                let _ = stage.append_child(&span);
                demo.spans.push(span);
            }
        }
    }

    /// Subscribe to deviceorientation and feed samples into the demo
    fn attach_orientation_listener(demo: Rc<RefCell<Demo>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
            // Null angles (desktop browsers) become NaN and get rejected
            let sample = TiltSample::new(
                event.beta().unwrap_or(f64::NAN) as f32,
                event.gamma().unwrap_or(f64::NAN) as f32,
            );
            if let Some(gravity) = gravity_from_tilt(sample) {
                demo.borrow_mut().gravity = gravity;
            }
        });
        let _ = window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
        closure.forget();

        log::info!("Orientation listener attached");
    }

    /// Wire the enable-motion button (iOS permission gate)
    fn setup_permission_button(demo: Rc<RefCell<Demo>>) {
        let document = web_sys::window().and_then(|w| w.document());
        let Some(document) = document else { return };

        let Some(btn) = document.get_element_by_id("enable-motion") else {
            log::warn!("No #enable-motion button in page");
            return;
        };
        let _ = btn.class_list().remove_1("hidden");

        let btn_for_closure = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let demo = demo.clone();
            let btn = btn_for_closure.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match platform::request_permission().await {
                    Ok(MotionSupport::Granted) => {
                        log::info!("Motion permission granted");
                        let _ = btn.class_list().add_1("hidden");
                        attach_orientation_listener(demo);
                    }
                    Ok(state) => {
                        // Denied: leave the feature disabled, keep the button
                        // so the user can try again
                        log::warn!("Motion permission not granted: {state:?}");
                    }
                    Err(e) => {
                        log::error!("Motion permission request failed: {e}");
                    }
                }
            });
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tilt Type starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Settings, with the mode overridable from the location hash
        // (#rigid / #points)
        let mut settings = Settings::load();
        if let Ok(hash) = window.location().hash() {
            if let Some(mode) = DemoMode::from_str(hash.trim_start_matches('#')) {
                settings.mode = mode;
            }
        }
        settings.save();
        log::info!("Demo mode: {}", settings.mode.as_str());

        let seed = js_sys::Date::now() as u64;
        let demo = Rc::new(RefCell::new(Demo::new(&settings, seed)));
        spawn_glyph_spans(&document, &mut demo.borrow_mut());

        let support = platform::detect_support();
        log::info!("Orientation support: {support:?}");

        match support {
            MotionSupport::Granted => attach_orientation_listener(demo.clone()),
            MotionSupport::NeedsPermission => setup_permission_button(demo.clone()),
            MotionSupport::Unsupported | MotionSupport::Denied => {}
        }

        // Desktop browsers either lack the event entirely or define it and
        // never fire it; whenever there is no permission gate, keep the
        // default downward gravity and say so
        if !support.has_permission_gate() {
            if let Some(note) = document.get_element_by_id("desktop-note") {
                let _ = note.class_list().remove_1("hidden");
            }
        }

        if !settings.show_gravity_readout {
            if let Some(el) = document.get_element_by_id("gravity-readout") {
                let _ = el.class_list().add_1("hidden");
            }
        }

        // Start demo loop
        request_animation_frame(demo);

        log::info!("Tilt Type running!");
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            demo_loop(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn demo_loop(demo: Rc<RefCell<Demo>>, time: f64) {
        {
            let mut d = demo.borrow_mut();

            let dt = if d.last_time > 0.0 {
                ((time - d.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            d.last_time = time;

            d.update(dt);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                d.render(&document);
            }
        }

        request_animation_frame(demo);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_demo::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tilt_type::Settings;

    env_logger::init();
    log::info!("Tilt Type (native) starting...");
    log::info!("There is no native renderer - run with `trunk serve` for the web demo");

    let settings = Settings::load();
    smoke_run(&settings.tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless sanity run of both variants under constant downward gravity
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run(tuning: &tilt_type::Tuning) {
    use glam::Vec2;
    use tilt_type::consts::*;
    use tilt_type::sim::{LetterField, RigidLetters};

    let gravity = Vec2::new(0.0, 1.0);

    let mut points = LetterField::new(DEMO_TEXT, 42, tuning);
    for _ in 0..600 {
        points.step(gravity);
    }
    println!("points variant after 600 steps:");
    for pose in points.poses() {
        println!("  {} at ({:.1}, {:.1})", pose.glyph, pose.x, pose.y);
    }

    let mut rigid = RigidLetters::new(DEMO_TEXT, 42, tuning);
    for _ in 0..600 {
        rigid.step(gravity, SIM_DT);
    }
    println!("rigid variant after 600 steps:");
    for pose in rigid.poses() {
        println!(
            "  {} at ({:.1}, {:.1}) rot {:.2}rad",
            pose.glyph, pose.x, pose.y, pose.angle
        );
    }
}
