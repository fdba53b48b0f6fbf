#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use yishan_business::AdminConfig;
use yishan_ui::state::State;
use yishan_ui::utils::fonts::add_cjk_font;

#[cfg(not(target_arch = "wasm32"))]
mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn load_config() -> AdminConfig {
    AdminConfig::init().unwrap_or_else(|err| {
        log::warn!("Invalid console configuration, using defaults: {err:#}");
        AdminConfig::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use yishan_ui::utils::fonts::{CJK_FONT_PATH, read_cjk_font};

    // Log to stderr (if you run with `RUST_LOG=debug`).
    // egui_winit logs clipboard errors for every non-text clipboard content.
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_module("egui_winit::clipboard", log::LevelFilter::Off)
        .init();

    let native_options = eframe::NativeOptions {
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        viewport: egui::ViewportBuilder::default()
            .with_title("Yishan Admin")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let config = load_config();
    let font = read_cjk_font(CJK_FONT_PATH);

    eframe::run_native(
        "Yishan Admin",
        native_options,
        Box::new(move |cc| {
            if let Some(data) = font {
                add_cjk_font(&cc.egui_ctx, data);
            }

            let app = yishan_ui::AdminApp::new(State::new(config));
            Ok(Box::new(app))
        }),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;
    use yishan_ui::utils::fonts::{CJK_FONT_URL, fetch_cjk_font};

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("No document to mount the app into");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("egui_canvas")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("egui_canvas is missing or not a HtmlCanvasElement");
            return;
        };

        let font = fetch_cjk_font(CJK_FONT_URL).await;
        let config = load_config();

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| {
                    if let Some(data) = font {
                        add_cjk_font(&cc.egui_ctx, data);
                    }

                    let app = yishan_ui::AdminApp::new(State::new(config));
                    Ok(Box::new(app))
                }),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
