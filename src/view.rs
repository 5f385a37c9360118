//! Render-facing snapshot of a tank.
//!
//! The renderer never reads `Tank` directly; it draws whatever `TankView`
//! describes, so everything here is plain data.

use crate::config;
use crate::geometry::Point;
use crate::projectile::Projectile;
use crate::tank::{Tank, TankId, TankKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTint {
    Healthy,
    Wounded,
    Critical,
    Hidden,
}

impl HealthTint {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= 0.6 {
            HealthTint::Healthy
        } else if ratio >= 0.4 {
            HealthTint::Wounded
        } else if ratio > 0.0 {
            HealthTint::Critical
        } else {
            HealthTint::Hidden
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTint {
    Loading,
    Ready,
}

/// A HUD bar under the tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub ratio: f64,
    pub fill_width: f64,
}

impl Bar {
    fn new(value: f64, max: f64) -> Self {
        let ratio = if max > 0.0 { value / max } else { 0.0 };
        Bar {
            ratio,
            // Always at least one pixel wide
            fill_width: 1.0 + (config::BAR_WIDTH * ratio).floor(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeView {
    pub half_angle: f64,
    pub radius: f64,
    pub heading: f64,
    pub engaged: bool, // An enemy is currently assigned
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileSprite {
    InFlight { position: Point, heading: f64 },
    /// `frame` is `None` once the counter runs past the sprite sheet.
    Exploding { position: Point, frame: Option<u32> },
}

impl From<&Projectile> for ProjectileSprite {
    fn from(projectile: &Projectile) -> Self {
        if projectile.exploded {
            let frame = projectile.explosion_frame;
            ProjectileSprite::Exploding {
                position: projectile.position,
                frame: (frame < config::EXPLOSION_FRAMES).then_some(frame),
            }
        } else {
            ProjectileSprite::InFlight {
                position: projectile.position,
                heading: projectile.heading,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TankView {
    pub id: TankId,
    pub kind: TankKind,
    pub position: Point,
    pub heading: f64,
    pub width: f64,
    pub height: f64,
    pub turret_heading: f64,
    pub corners: [Point; 4],
    pub health: Bar,
    pub health_tint: HealthTint,
    pub reload: Bar,
    pub reload_tint: ReloadTint,
    pub envelope: Option<EnvelopeView>, // Only computer tanks show their cone
    pub projectiles: Vec<ProjectileSprite>,
}

impl TankView {
    pub fn of(tank: &Tank) -> Self {
        let health = Bar::new(tank.health() as f64, tank.max_health() as f64);
        let reload = Bar::new(tank.reload_timer() as f64, tank.reload_max() as f64);

        let envelope = match tank.kind() {
            TankKind::Player => None,
            TankKind::Computer => Some(EnvelopeView {
                half_angle: tank.turret.envelope.half_angle,
                radius: tank.turret.envelope.radius,
                heading: tank.turret.angle,
                engaged: tank.enemy().is_some(),
            }),
        };

        TankView {
            id: tank.id(),
            kind: tank.kind(),
            position: tank.position(),
            heading: tank.heading(),
            width: tank.width,
            height: tank.height,
            turret_heading: tank.turret.angle,
            corners: tank.collision_box().corners(),
            health_tint: HealthTint::for_ratio(health.ratio),
            health,
            reload_tint: if tank.is_reloaded() {
                ReloadTint::Ready
            } else {
                ReloadTint::Loading
            },
            reload,
            envelope,
            projectiles: tank.projectiles().iter().map(ProjectileSprite::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::ProjectileId;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tank(kind: TankKind) -> Tank {
        Tank::new(TankId(4), Point::new(300.0, 200.0), kind, &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_health_tint_thresholds() {
        assert_eq!(HealthTint::for_ratio(1.0), HealthTint::Healthy);
        assert_eq!(HealthTint::for_ratio(0.6), HealthTint::Healthy);
        assert_eq!(HealthTint::for_ratio(0.59), HealthTint::Wounded);
        assert_eq!(HealthTint::for_ratio(0.4), HealthTint::Wounded);
        assert_eq!(HealthTint::for_ratio(0.39), HealthTint::Critical);
        assert_eq!(HealthTint::for_ratio(0.01), HealthTint::Critical);
        assert_eq!(HealthTint::for_ratio(0.0), HealthTint::Hidden);
    }

    #[test]
    fn test_bars() {
        let mut tank = tank(TankKind::Player);
        tank.take_damage(55);
        let view = TankView::of(&tank);

        assert_approx_eq!(view.health.ratio, 0.45);
        assert_approx_eq!(view.health.fill_width, 23.0);
        assert_eq!(view.health_tint, HealthTint::Wounded);

        assert_approx_eq!(view.reload.ratio, 0.0);
        assert_approx_eq!(view.reload.fill_width, 1.0);
        assert_eq!(view.reload_tint, ReloadTint::Loading);
    }

    #[test]
    fn test_envelope_only_for_computer() {
        let player = TankView::of(&tank(TankKind::Player));
        assert!(player.envelope.is_none());

        let mut computer = tank(TankKind::Computer);
        let idle = TankView::of(&computer).envelope.unwrap();
        assert!(!idle.engaged);
        assert_eq!(idle.half_angle, 45.0);
        assert_eq!(idle.heading, 90.0);

        computer.set_enemy(Some(TankId(1)));
        assert!(TankView::of(&computer).envelope.unwrap().engaged);
    }

    #[test]
    fn test_projectile_sprites() {
        let mut shell = Projectile::new(ProjectileId(0), Point::new(5.0, 6.0), 45.0, 30.0);
        assert_eq!(
            ProjectileSprite::from(&shell),
            ProjectileSprite::InFlight { position: Point::new(5.0, 6.0), heading: 45.0 }
        );

        shell.detonate();
        shell.explosion_frame = 15;
        assert_eq!(
            ProjectileSprite::from(&shell),
            ProjectileSprite::Exploding { position: Point::new(5.0, 6.0), frame: Some(15) }
        );

        shell.explosion_frame = 16;
        assert_eq!(
            ProjectileSprite::from(&shell),
            ProjectileSprite::Exploding { position: Point::new(5.0, 6.0), frame: None }
        );
    }
}
