//! 背景パーティクルアニメーション
//!
//! canvas への描画と requestAnimationFrame ループ。
//! 座標計算は sport_lens_common::ParticleField。

use gloo::console;
use gloo::events::EventListener;
use leptos::html;
use leptos::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sport_lens_common::{ParticleConfig, ParticleField};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

#[component]
pub fn ParticleCanvas(config: ParticleConfig) -> impl IntoView {
    let canvas_ref: NodeRef<html::Canvas> = NodeRef::new();

    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(canvas) = canvas_ref.get() else {
            return false;
        };
        if let Err(e) = start_animation(canvas, config.clone()) {
            console::error!(format!("パーティクル描画を開始できません: {:?}", e));
        }
        true
    });

    view! { <canvas id="bgCanvas" class="bg-canvas" node_ref=canvas_ref /> }
}

/// canvas 1枚分の描画状態
pub struct ParticleScene {
    field: ParticleField,
    rng: SmallRng,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl ParticleScene {
    pub fn new(
        canvas: HtmlCanvasElement,
        config: ParticleConfig,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context がありません"))?
            .dyn_into()?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let field = ParticleField::new(config, width, height, &mut rng);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        Ok(Self {
            field,
            rng,
            canvas,
            ctx,
        })
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field.resize(width, height);
    }

    /// 全消去 → 更新 → 描画
    pub fn render(&mut self) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.field.width(), self.field.height());

        self.field.tick(&mut self.rng);

        let blur = self.field.config().glow_blur;
        for particle in self.field.particles() {
            let color = particle.color();
            ctx.begin_path();
            if ctx.arc(particle.x, particle.y, particle.size, 0.0, TAU).is_err() {
                continue;
            }
            ctx.set_fill_style_str(&color);
            ctx.set_shadow_color(&color);
            ctx.set_shadow_blur(blur);
            ctx.fill();
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

fn window_size(window: &Window) -> (f64, f64) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        console::error!(format!("requestAnimationFrame 失敗: {:?}", e));
    }
}

/// 画面サイズの canvas でアニメーションを開始（停止しない）
fn start_animation(canvas: HtmlCanvasElement, config: ParticleConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let (width, height) = window_size(&window);
    let seed = js_sys::Date::now() as u64;
    let scene = Rc::new(RefCell::new(ParticleScene::new(canvas, config, width, height, seed)?));

    {
        let scene = scene.clone();
        EventListener::new(&window, "resize", move |_| {
            if let Some(window) = web_sys::window() {
                let (width, height) = window_size(&window);
                scene.borrow_mut().resize(width, height);
            }
        })
        .forget();
    }

    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = frame.clone();
    let loop_window = window.clone();
    *frame.borrow_mut() = Some(Closure::new(move || {
        scene.borrow_mut().render();
        if let Some(callback) = next.borrow().as_ref() {
            request_frame(&loop_window, callback);
        }
    }));

    if let Some(callback) = frame.borrow().as_ref() {
        request_frame(&window, callback);
    }
    Ok(())
}
