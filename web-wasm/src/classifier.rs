//! 画像分類器（MobileNet）の JavaScript Bridge
//!
//! モデル本体は TensorFlow.js 側。Rust からはハンドルを保持して呼ぶだけ。

use sport_lens_common::{Classifier, Error, ModelConfig, Prediction, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

#[wasm_bindgen(module = "/js/classifier-bridge.js")]
extern "C" {
    /// mobilenet.load(options)
    #[wasm_bindgen(js_name = "loadModel", catch)]
    async fn load_model_js(options_json: &str) -> std::result::Result<JsValue, JsValue>;

    /// model.classify(image, topK) → [{ className, probability }]
    #[wasm_bindgen(js_name = "classifyImage", catch)]
    async fn classify_image_js(
        model: &JsValue,
        image: &HtmlImageElement,
        top_k: u32,
    ) -> std::result::Result<JsValue, JsValue>;
}

/// 読み込み済みモデルのハンドル
#[derive(Clone)]
pub struct MobileNet {
    handle: JsValue,
}

impl MobileNet {
    pub async fn load(config: &ModelConfig) -> Result<Self> {
        let options = serde_json::to_string(config)?;
        let handle = load_model_js(&options)
            .await
            .map_err(|e| Error::ModelLoad(format!("{:?}", e)))?;
        Ok(Self { handle })
    }
}

impl Classifier for MobileNet {
    type Image = HtmlImageElement;

    async fn classify(&self, image: &HtmlImageElement, top_k: usize) -> Result<Vec<Prediction>> {
        let value = classify_image_js(&self.handle, image, top_k as u32)
            .await
            .map_err(|e| Error::Classification(format!("{:?}", e)))?;
        serde_wasm_bindgen::from_value(value).map_err(|e| Error::Classification(e.to_string()))
    }
}

/// Data URL を画像要素に読み込み、デコード完了まで待つ
pub async fn load_image_element(data_url: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new().map_err(|e| Error::Decode(format!("{:?}", e)))?;
    image.set_src(data_url);
    JsFuture::from(image.decode())
        .await
        .map_err(|e| Error::Decode(format!("{:?}", e)))?;
    Ok(image)
}
