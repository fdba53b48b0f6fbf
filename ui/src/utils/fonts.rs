use egui::{
    FontData, FontFamily,
    epaint::text::{FontInsert, FontPriority, InsertFontFamily},
};

/// CJK font shipped next to the native binary.
pub const CJK_FONT_PATH: &str = "assets/fonts/SourceHanSerifCN-VF.ttf";

/// CJK font served next to the web bundle.
pub const CJK_FONT_URL: &str = "./SourceHanSerifCN-VF.ttf";

/// Registers a CJK font as the last proportional fallback, so Latin text
/// keeps the egui default font.
pub fn add_cjk_font(ctx: &egui::Context, font_data: Vec<u8>) {
    let data = FontData::from_owned(font_data);
    ctx.add_font(FontInsert::new(
        "source han serif",
        data,
        vec![
            InsertFontFamily {
                family: FontFamily::Proportional,
                priority: FontPriority::Lowest,
            },
            InsertFontFamily {
                family: FontFamily::Monospace,
                priority: FontPriority::Lowest,
            },
        ],
    ));
}

/// Reads the bundled CJK font. Chinese labels render as boxes without it.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_cjk_font(path: impl AsRef<std::path::Path>) -> Option<Vec<u8>> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(data) => {
            log::debug!("Loaded CJK font from {} ({} bytes)", path.display(), data.len());
            Some(data)
        }
        Err(err) => {
            log::warn!("CJK font {} unavailable: {err}", path.display());
            None
        }
    }
}

/// Fetches the CJK font from the web bundle.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_cjk_font(url: &str) -> Option<Vec<u8>> {
    use wasm_bindgen::{JsCast as _, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::js_sys::{ArrayBuffer, Uint8Array};
    use web_sys::{Request, RequestInit, RequestMode, Response};

    async fn fetch(url: &str) -> Result<Vec<u8>, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)?;
        request.headers().set("Accept", "font/ttf")?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
        }
        let buffer: ArrayBuffer = JsFuture::from(response.array_buffer()?).await?.dyn_into()?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }

    match fetch(url).await {
        Ok(data) => {
            log::debug!("Fetched CJK font from {url} ({} bytes)", data.len());
            Some(data)
        }
        Err(err) => {
            log::warn!("CJK font {url} unavailable: {err:?}");
            None
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file_is_not_fatal() {
        assert!(read_cjk_font("/non/existent/font.ttf").is_none());
    }
}
