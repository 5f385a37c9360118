use crate::audio::{SoundEffect, SoundSink};
use crate::config;
use crate::geometry::{CollisionBox, PlayField, Point, bearing_degrees};
use crate::input::{Control, InputSource};
use crate::projectile::{Projectile, ProjectileId};
use crate::turret::Turret;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Who drives a tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TankKind {
    Player,
    Computer,
}

impl TankKind {
    pub fn opposes(self, other: TankKind) -> bool {
        self != other
    }
}

/// Handle to a tank owned by the battlefield registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TankId(pub u32);

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Resolves enemy handles to positions.
pub trait TankLocator {
    fn locate(&self, id: TankId) -> Option<Point>;
}

impl TankLocator for HashMap<TankId, Point> {
    fn locate(&self, id: TankId) -> Option<Point> {
        self.get(&id).copied()
    }
}

/// Everything a tank reads or signals during one tick.
pub struct TickContext<'a> {
    pub input: &'a dyn InputSource,
    pub locator: &'a dyn TankLocator,
    pub field: PlayField,
    pub sound: &'a mut dyn SoundSink,
}

// Represents a tank on the battlefield
#[derive(Debug, Clone)]
pub struct Tank {
    id: TankId,
    kind: TankKind,
    position: Point,
    heading: f64, // Degrees, 0 faces up the screen
    pub width: f64,
    pub height: f64,
    health: i32,
    max_health: i32,
    reload_timer: u32,
    reload_max: u32,
    pub rotation_speed: f64,
    pub forward_speed: f64,
    pub backward_speed: f64,
    collision_box: CollisionBox,
    pub turret: Turret,
    enemy: Option<TankId>,
    projectiles: Vec<Projectile>,
    next_projectile: u32,
}

impl Tank {
    pub fn new<R: Rng + ?Sized>(id: TankId, position: Point, kind: TankKind, rng: &mut R) -> Self {
        let width = config::TANK_WIDTH;
        let height = config::TANK_HEIGHT;
        let heading = 0.0;

        let tank = Tank {
            id,
            kind,
            position,
            heading,
            width,
            height,
            health: config::MAX_HEALTH,
            max_health: config::MAX_HEALTH,
            reload_timer: 0,
            reload_max: config::RELOAD_TICKS,
            rotation_speed: config::TANK_ROTATION_SPEED,
            forward_speed: config::TANK_FORWARD_SPEED,
            backward_speed: config::TANK_BACKWARD_SPEED,
            collision_box: CollisionBox::from_pose(position, width, height, heading),
            turret: Turret::new(kind, rng),
            enemy: None,
            projectiles: Vec::new(),
            next_projectile: 0,
        };

        crate::debug_tank!(
            id => "Created {:?} tank at ({:.1}, {:.1}), attack radius {:.0}",
            kind,
            position.x,
            position.y,
            tank.turret.envelope.radius
        );
        tank
    }

    pub fn id(&self) -> TankId {
        self.id
    }

    pub fn kind(&self) -> TankKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.refresh_collision_box();
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
        self.refresh_collision_box();
    }

    pub fn collision_box(&self) -> &CollisionBox {
        &self.collision_box
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn reload_timer(&self) -> u32 {
        self.reload_timer
    }

    pub fn reload_max(&self) -> u32 {
        self.reload_max
    }

    pub fn is_reloaded(&self) -> bool {
        self.reload_timer == self.reload_max
    }

    pub fn enemy(&self) -> Option<TankId> {
        self.enemy
    }

    pub fn set_enemy(&mut self, enemy: Option<TankId>) {
        self.enemy = enemy;
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// Runs one fixed tick: reload, controls or auto-aim, then projectiles.
    pub fn update(&mut self, ctx: &mut TickContext) {
        if self.reload_timer < self.reload_max {
            self.reload_timer += 1;
        }

        match self.kind {
            TankKind::Player => self.apply_controls(ctx.input, &mut *ctx.sound),
            TankKind::Computer => self.auto_aim(ctx.locator),
        }

        self.advance_projectiles(&ctx.field);
    }

    /// Launches a shell along the turret if fully reloaded.
    pub fn try_fire(&mut self, sound: &mut dyn SoundSink) -> bool {
        if !self.is_reloaded() {
            return false;
        }

        let id = ProjectileId(self.next_projectile);
        self.next_projectile = self.next_projectile.wrapping_add(1);
        self.projectiles.push(Projectile::new(
            id,
            self.position,
            self.turret.angle,
            self.turret.projectile_speed,
        ));
        sound.play_effect(SoundEffect::Fire);
        self.reload_timer = 0;

        crate::debug_weapon!(
            self.id => "Fired shell {} heading {:.1} at speed {:.1} ({} in flight)",
            id.0,
            self.turret.angle,
            self.turret.projectile_speed,
            self.projectiles.len()
        );
        true
    }

    /// Starts the explosion of one of this tank's shells. Unknown or already
    /// exploding shells are left alone.
    pub fn detonate(&mut self, projectile: ProjectileId) -> bool {
        let detonated = self
            .projectiles
            .iter_mut()
            .find(|p| p.id == projectile)
            .is_some_and(|p| p.detonate());

        if detonated {
            crate::debug_projectile!(self.id => "Shell {} detonated", projectile.0);
        }
        detonated
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
        crate::debug_tank!(
            self.id => "Took {} damage, health {}/{}",
            amount,
            self.health,
            self.max_health
        );
    }

    /// Clamps the tank center into the rectangle, one axis at a time.
    pub fn limit_range(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        let mut position = self.position;
        if position.x < min_x {
            position.x = min_x;
        }
        if position.x > max_x {
            position.x = max_x;
        }
        if position.y < min_y {
            position.y = min_y;
        }
        if position.y > max_y {
            position.y = max_y;
        }

        if position != self.position {
            self.set_position(position);
        }
    }

    fn apply_controls(&mut self, input: &dyn InputSource, sound: &mut dyn SoundSink) {
        if input.is_held(Control::Fire) {
            self.try_fire(sound);
        }

        if input.is_held(Control::RotateLeft) {
            self.set_heading(self.heading - self.rotation_speed);
        } else if input.is_held(Control::RotateRight) {
            self.set_heading(self.heading + self.rotation_speed);
        }

        // Heading 0 faces up the screen, so the travel vector is (sin h, -cos h)
        let radians = (-self.heading).to_radians();
        if input.is_held(Control::MoveForward) {
            self.set_position(Point::new(
                self.position.x - self.forward_speed * radians.sin(),
                self.position.y - self.forward_speed * radians.cos(),
            ));
        } else if input.is_held(Control::MoveBackward) {
            self.set_position(Point::new(
                self.position.x + self.backward_speed * radians.sin(),
                self.position.y + self.backward_speed * radians.cos(),
            ));
        }

        if input.is_held(Control::TurretLeft) {
            self.turret.rotate_left();
        } else if input.is_held(Control::TurretRight) {
            self.turret.rotate_right();
        }
    }

    fn auto_aim(&mut self, locator: &dyn TankLocator) {
        let Some(target) = self.enemy.and_then(|id| locator.locate(id)) else {
            return;
        };

        let bearing = bearing_degrees(self.position, target);
        let before = self.turret.angle;
        self.turret.track(bearing);

        crate::debug_turret!(
            self.id => "Tracking bearing {:.0}: turret {:.1} -> {:.1}",
            bearing,
            before,
            self.turret.angle
        );
    }

    fn advance_projectiles(&mut self, field: &PlayField) {
        let id = self.id;
        self.projectiles.retain_mut(|projectile| {
            let outcome = projectile.advance(field);
            if !outcome.retains() {
                crate::debug_projectile!(id => "Shell {} removed: {:?}", projectile.id.0, outcome);
            }
            outcome.retains()
        });
    }

    fn refresh_collision_box(&mut self) {
        self.collision_box =
            CollisionBox::from_pose(self.position, self.width, self.height, self.heading);
    }
}
