use crate::view::{EnvelopeView, HealthTint, ProjectileSprite, ReloadTint, TankView};
use crate::tank::TankKind;
use macroquad::prelude::{
    BLACK, Color, DARKGRAY, DrawRectangleParams, GRAY, WHITE, YELLOW, clear_background,
    draw_circle, draw_line, draw_rectangle, draw_rectangle_ex, draw_text, draw_triangle,
    screen_height, screen_width, vec2,
};

const TURRET_LENGTH: f32 = 35.0;
const TURRET_THICKNESS: f32 = 6.0;
const SECTOR_SEGMENTS: usize = 24;

fn health_color(tint: HealthTint) -> Option<Color> {
    match tint {
        HealthTint::Healthy => Some(Color::from_rgba(0, 255, 0, 255)),
        HealthTint::Wounded => Some(Color::from_rgba(255, 165, 0, 255)),
        HealthTint::Critical => Some(Color::from_rgba(255, 0, 0, 255)),
        HealthTint::Hidden => None,
    }
}

fn reload_color(tint: ReloadTint) -> Color {
    match tint {
        ReloadTint::Loading => Color::from_rgba(128, 128, 128, 255),
        ReloadTint::Ready => Color::from_rgba(255, 105, 180, 255),
    }
}

fn body_colors(kind: TankKind) -> (Color, Color) {
    match kind {
        TankKind::Player => (Color::from_rgba(70, 140, 70, 255), Color::from_rgba(40, 90, 40, 255)),
        TankKind::Computer => (Color::from_rgba(150, 100, 50, 255), Color::from_rgba(100, 65, 30, 255)),
    }
}

// Draws tank views with shape primitives
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Renderer
    }

    pub fn draw_frame(&self, views: &[TankView], hud: &[String], announcement: Option<&str>) {
        clear_background(Color::from_rgba(30, 34, 30, 255));

        // Cones first so bodies sit on top of them
        for view in views {
            if let Some(envelope) = &view.envelope {
                self.draw_envelope(view, envelope);
            }
        }
        for view in views {
            self.draw_tank(view);
            self.draw_bars(view);
        }
        for view in views {
            self.draw_projectiles(&view.projectiles);
        }

        self.draw_hud(hud);
        if let Some(text) = announcement {
            self.draw_announcement(text);
        }
    }

    fn draw_tank(&self, view: &TankView) {
        let (hull, turret) = body_colors(view.kind);
        let x = view.position.x as f32;
        let y = view.position.y as f32;

        draw_rectangle_ex(
            x,
            y,
            view.width as f32,
            view.height as f32,
            DrawRectangleParams {
                offset: vec2(0.5, 0.5),
                rotation: (view.heading as f32).to_radians(),
                color: hull,
            },
        );

        // Collision outline
        for i in 0..4 {
            let a = view.corners[i];
            let b = view.corners[(i + 1) % 4];
            draw_line(a.x as f32, a.y as f32, b.x as f32, b.y as f32, 1.0, DARKGRAY);
        }

        // Hull front marker; heading 0 faces up
        let facing = (view.heading as f32).to_radians();
        let half = view.height as f32 / 2.0;
        draw_circle(x + facing.sin() * half * 0.8, y - facing.cos() * half * 0.8, 3.0, BLACK);

        let aim = (view.turret_heading as f32).to_radians();
        draw_line(
            x,
            y,
            x + aim.cos() * TURRET_LENGTH,
            y + aim.sin() * TURRET_LENGTH,
            TURRET_THICKNESS,
            turret,
        );
        draw_circle(x, y, view.width as f32 * 0.25, turret);
    }

    fn draw_bars(&self, view: &TankView) {
        // Left-aligned with the hull, just below it
        let left = view.position.x as f32 - 25.5;
        let top = view.position.y as f32 + 30.0;
        let height = crate::config::BAR_HEIGHT as f32;

        if let Some(color) = health_color(view.health_tint) {
            draw_rectangle(left, top, view.health.fill_width as f32, height, color);
        }
        draw_rectangle(
            left,
            top + 5.0,
            view.reload.fill_width as f32,
            height,
            reload_color(view.reload_tint),
        );
    }

    fn draw_envelope(&self, view: &TankView, envelope: &EnvelopeView) {
        let color = if envelope.engaged {
            Color::from_rgba(255, 0, 0, 64)
        } else {
            Color::from_rgba(0, 255, 0, 64)
        };
        let center = vec2(view.position.x as f32, view.position.y as f32);
        let radius = envelope.radius as f32;
        let start = (envelope.heading - envelope.half_angle) as f32;
        let sweep = (envelope.half_angle * 2.0) as f32;

        for i in 0..SECTOR_SEGMENTS {
            let a0 = (start + sweep * i as f32 / SECTOR_SEGMENTS as f32).to_radians();
            let a1 = (start + sweep * (i + 1) as f32 / SECTOR_SEGMENTS as f32).to_radians();
            draw_triangle(
                center,
                center + vec2(a0.cos(), a0.sin()) * radius,
                center + vec2(a1.cos(), a1.sin()) * radius,
                color,
            );
        }
    }

    fn draw_projectiles(&self, sprites: &[ProjectileSprite]) {
        for sprite in sprites {
            match *sprite {
                ProjectileSprite::InFlight { position, heading } => {
                    let x = position.x as f32;
                    let y = position.y as f32;
                    let back = (heading as f32).to_radians();
                    draw_line(x, y, x - back.cos() * 10.0, y - back.sin() * 10.0, 2.0, GRAY);
                    draw_circle(x, y, 4.0, YELLOW);
                }
                ProjectileSprite::Exploding {
                    position,
                    frame: Some(frame),
                } => {
                    let progress = frame as f32 / crate::config::EXPLOSION_FRAMES as f32;
                    let alpha = ((1.0 - progress) * 255.0) as u8;
                    draw_circle(
                        position.x as f32,
                        position.y as f32,
                        6.0 + 20.0 * progress,
                        Color::from_rgba(255, 140, 0, alpha),
                    );
                }
                ProjectileSprite::Exploding { frame: None, .. } => {}
            }
        }
    }

    fn draw_hud(&self, lines: &[String]) {
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 10.0, 20.0 + i as f32 * 20.0, 20.0, WHITE);
        }
    }

    fn draw_announcement(&self, text: &str) {
        let width = screen_width();
        let height = screen_height();
        draw_rectangle(0.0, height / 2.0 - 50.0, width, 100.0, Color::from_rgba(0, 0, 0, 180));
        draw_text(text, width / 2.0 - text.len() as f32 * 12.0, height / 2.0, 48.0, WHITE);
        draw_text("Press Esc to exit", width / 2.0 - 80.0, height / 2.0 + 35.0, 20.0, GRAY);
    }
}
