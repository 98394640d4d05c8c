//! 背景パーティクルのシミュレーション
//!
//! 固定数のパーティクルを毎フレーム速度分だけ動かし、
//! 画面外に出たものはその場で（再確保せず）ランダムな状態に戻す。
//! 描画はWASM側の責務で、ここは座標計算のみ。

use rand::Rng;
use serde::{Deserialize, Serialize};

/// パーティクル設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// 速度の幅（各軸 -max_speed/2 〜 +max_speed/2）
    pub max_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub glow_blur: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 200,
            max_speed: 1.5,
            min_size: 1.0,
            max_size: 4.0,
            glow_blur: 10.0,
        }
    }
}

/// パーティクル1個
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    /// 色相（0〜360）
    pub hue: f64,
}

impl Particle {
    /// canvas の fillStyle 用
    pub fn color(&self) -> String {
        format!("hsl({:.0}, 100%, 50%)", self.hue)
    }

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ParticleConfig, width: f64, height: f64) {
        self.x = sample(rng, 0.0, width);
        self.y = sample(rng, 0.0, height);
        self.vx = (rng.gen::<f64>() - 0.5) * config.max_speed;
        self.vy = (rng.gen::<f64>() - 0.5) * config.max_speed;
        self.size = sample(rng, config.min_size, config.max_size);
        self.hue = sample(rng, 0.0, 360.0);
    }

    fn is_outside(&self, width: f64, height: f64) -> bool {
        self.x < 0.0 || self.x > width || self.y < 0.0 || self.y > height
    }
}

/// [low, high) から一様に取得（幅0以下なら low）
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// パーティクル群（固定長アリーナ）
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    config: ParticleConfig,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(config: ParticleConfig, width: f64, height: f64, rng: &mut R) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let mut particles = vec![Particle::default(); config.count];
        for particle in &mut particles {
            particle.reset(rng, &config, width, height);
        }

        Self {
            particles,
            config,
            width,
            height,
        }
    }

    /// 1フレーム分進める
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            if particle.is_outside(width, height) {
                particle.reset(rng, &self.config, width, height);
            }
        }
    }

    /// 画面サイズ変更（範囲外のものは次の tick でリセットされる）
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn assert_in_bounds(field: &ParticleField) {
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x <= field.width(), "x={} width={}", p.x, field.width());
            assert!(p.y >= 0.0 && p.y <= field.height(), "y={} height={}", p.y, field.height());
        }
    }

    #[test]
    fn test_initial_state() {
        let mut rng = SmallRng::seed_from_u64(1);
        let field = ParticleField::new(ParticleConfig::default(), 800.0, 600.0, &mut rng);

        assert_eq!(field.particles().len(), 200);
        assert_in_bounds(&field);
        for p in field.particles() {
            assert!(p.vx >= -0.75 && p.vx < 0.75);
            assert!(p.vy >= -0.75 && p.vy < 0.75);
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert!(p.hue >= 0.0 && p.hue < 360.0);
        }
    }

    #[test]
    fn test_stays_in_bounds_after_many_ticks() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut field = ParticleField::new(ParticleConfig::default(), 320.0, 240.0, &mut rng);

        for _ in 0..2000 {
            field.tick(&mut rng);
            assert_in_bounds(&field);
        }
    }

    #[test]
    fn test_fast_particles_stay_in_bounds() {
        let config = ParticleConfig {
            count: 50,
            max_speed: 200.0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(7);
        let mut field = ParticleField::new(config, 100.0, 50.0, &mut rng);

        for _ in 0..500 {
            field.tick(&mut rng);
            assert_in_bounds(&field);
        }
    }

    #[test]
    fn test_tick_advances_by_velocity() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut field = ParticleField::new(
            ParticleConfig { count: 1, ..Default::default() },
            10_000.0,
            10_000.0,
            &mut rng,
        );
        let before = field.particles()[0];
        field.tick(&mut rng);
        let after = field.particles()[0];

        // 十分広いので1フレームでは画面外に出ない
        assert!((after.x - (before.x + before.vx)).abs() < 1e-9);
        assert!((after.y - (before.y + before.vy)).abs() < 1e-9);
        assert_eq!(after.hue, before.hue);
    }

    #[test]
    fn test_count_is_fixed() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut field = ParticleField::new(ParticleConfig::default(), 50.0, 50.0, &mut rng);
        for _ in 0..100 {
            field.tick(&mut rng);
        }
        assert_eq!(field.particles().len(), 200);
    }

    #[test]
    fn test_resize_then_tick_resets_outside() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut field = ParticleField::new(ParticleConfig::default(), 1000.0, 1000.0, &mut rng);
        field.resize(100.0, 100.0);
        field.tick(&mut rng);
        assert_in_bounds(&field);
    }

    #[test]
    fn test_zero_sized_canvas() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut field = ParticleField::new(ParticleConfig::default(), 0.0, 0.0, &mut rng);
        field.tick(&mut rng);
        assert_in_bounds(&field);
    }

    #[test]
    fn test_color_format() {
        let p = Particle { hue: 120.4, ..Default::default() };
        assert_eq!(p.color(), "hsl(120, 100%, 50%)");
    }
}
