use crate::config;
use crate::geometry::{PlayField, Point};

/// Identifies a projectile within the firing tank's magazine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileId(pub u32);

/// What happened to a projectile during one advance step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Exploding,
    Expired,
    LeftField,
}

impl Advance {
    pub fn retains(self) -> bool {
        matches!(self, Advance::Moved | Advance::Exploding)
    }
}

/// A shell fired by a tank. Heading and speed are fixed at launch.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Point,
    pub heading: f64, // Degrees
    pub speed: f64,   // Units per tick
    pub exploded: bool,
    pub explosion_frame: u32,
}

impl Projectile {
    pub fn new(id: ProjectileId, position: Point, heading: f64, speed: f64) -> Self {
        Projectile {
            id,
            position,
            heading,
            speed,
            exploded: false,
            explosion_frame: 0,
        }
    }

    /// Switches the projectile into its explosion animation.
    /// Returns false if it was already exploding.
    pub fn detonate(&mut self) -> bool {
        if self.exploded {
            return false;
        }
        self.exploded = true;
        self.explosion_frame = 0;
        true
    }

    pub fn in_flight(&self) -> bool {
        !self.exploded
    }

    /// Runs one tick of the lifecycle. `Expired` and `LeftField` mean the
    /// owner must drop the projectile.
    pub fn advance(&mut self, field: &PlayField) -> Advance {
        // Exploding shells stay put even if the blast sits past the edge
        if !self.exploded && !field.contains(self.position) {
            return Advance::LeftField;
        }

        if self.exploded {
            if self.explosion_frame > config::EXPLOSION_FRAMES {
                return Advance::Expired;
            }
            self.explosion_frame += 1;
            return Advance::Exploding;
        }

        let (sin, cos) = self.heading.to_radians().sin_cos();
        self.position.x += self.speed * cos;
        self.position.y += self.speed * sin;
        Advance::Moved
    }
}
