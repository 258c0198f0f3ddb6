use eframe::egui;
use rand::Rng;

use super::theme::to_color;
use crate::core::dashboard::{
    COOL,
    VIOLET,
    WHITE,
};

const PARTICLE_COUNT: usize = 200;
const SPREAD_DEGREES: f32 = 100.0;
const ORIGIN_Y: f32 = 0.6;
const GRAVITY: f32 = 900.0;
const DRAG: f32 = 0.9;
const LIFETIME_SECS: f32 = 3.0;

#[derive(Debug, Clone)]
struct Particle {
    pos: egui::Pos2,
    vel: egui::Vec2,
    size: f32,
    color: egui::Color32,
    age: f32,
}

/// One celebratory burst. Owns its particles until they fade out.
#[derive(Debug, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn burst(&mut self, screen: egui::Rect) {
        let mut rng = rand::rng();
        let origin = egui::pos2(screen.center().x, screen.top() + screen.height() * ORIGIN_Y);
        let palette = [to_color(COOL), to_color(VIOLET), to_color(WHITE)];
        let half_spread = SPREAD_DEGREES.to_radians() / 2.0;

        self.particles = (0..PARTICLE_COUNT)
            .map(|i| {
                // Straight up is -90 degrees in screen space.
                let angle = -std::f32::consts::FRAC_PI_2 + rng.random_range(-half_spread..half_spread);
                let speed = rng.random_range(450.0..900.0);
                Particle {
                    pos: origin,
                    vel: egui::vec2(angle.cos(), angle.sin()) * speed,
                    size: rng.random_range(3.0..7.0),
                    color: palette[i % palette.len()],
                    age: 0.0,
                }
            })
            .collect();
    }

    pub fn update(&mut self, dt: f32) {
        let damping = DRAG.powf(dt);
        for particle in &mut self.particles {
            particle.vel.y += GRAVITY * dt;
            particle.vel *= damping;
            particle.pos += particle.vel * dt;
            particle.age += dt;
        }
        self.particles.retain(|particle| particle.age < LIFETIME_SECS);
    }

    pub fn paint(&self, ctx: &egui::Context) {
        if !self.is_active() {
            return;
        }

        let painter =
            ctx.layer_painter(egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("confetti")));
        for particle in &self.particles {
            let fade = 1.0 - particle.age / LIFETIME_SECS;
            painter.rect_filled(
                egui::Rect::from_center_size(particle.pos, egui::Vec2::splat(particle.size)),
                1.0,
                particle.color.gamma_multiply(fade.clamp(0.0, 1.0)),
            );
        }
    }
}
