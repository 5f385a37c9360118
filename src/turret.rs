use crate::config;
use crate::geometry::{angle_between, normalize_once};
use crate::tank::TankKind;
use rand::Rng;

/// Cone in which a turret considers targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackEnvelope {
    pub half_angle: f64, // Degrees either side of the aim
    pub radius: f64,
}

impl AttackEnvelope {
    /// Whether a target at `bearing` and `distance` falls inside the cone
    /// centered on `aim`. A half angle of 180 or more covers every bearing.
    pub fn covers(&self, aim: f64, bearing: f64, distance: f64) -> bool {
        if distance > self.radius {
            return false;
        }
        self.half_angle >= 180.0 || angle_between(aim, bearing).abs() <= self.half_angle
    }
}

// Turret mounted on a tank body
#[derive(Debug, Clone, PartialEq)]
pub struct Turret {
    pub angle: f64,            // Aim in degrees, not kept normalized
    pub rotation_speed: f64,   // Degrees per tick under manual control
    pub envelope: AttackEnvelope,
    pub projectile_speed: f64, // Launch speed for fired shells
}

impl Turret {
    /// Builds the preset turret for a tank kind. Computer turrets draw a
    /// random extra attack radius from `rng`.
    pub fn new<R: Rng + ?Sized>(kind: TankKind, rng: &mut R) -> Self {
        let (angle, envelope) = match kind {
            TankKind::Player => (
                config::PLAYER_TURRET_ANGLE,
                AttackEnvelope {
                    half_angle: config::PLAYER_RANGE_ANGLE,
                    radius: config::PLAYER_RANGE_DISTANCE,
                },
            ),
            TankKind::Computer => (
                config::COMPUTER_TURRET_ANGLE,
                AttackEnvelope {
                    half_angle: config::COMPUTER_RANGE_ANGLE,
                    radius: config::COMPUTER_RANGE_BASE
                        + rng.gen_range(0..config::COMPUTER_RANGE_JITTER) as f64,
                },
            ),
        };

        Turret {
            angle,
            rotation_speed: config::TURRET_ROTATION_SPEED,
            envelope,
            projectile_speed: config::PROJECTILE_SPEED,
        }
    }

    pub fn rotate_left(&mut self) {
        self.angle -= self.rotation_speed;
    }

    pub fn rotate_right(&mut self) {
        self.angle += self.rotation_speed;
    }

    /// Turns one step toward `bearing` along the shorter arc.
    ///
    /// The step is fixed and does not use `rotation_speed`. The current angle
    /// gets a single wrap correction first, so it settles in [0, 360) unless
    /// it drifted by more than a full turn.
    pub fn track(&mut self, bearing: f64) {
        self.angle = normalize_once(self.angle);

        if self.angle > bearing {
            if self.angle - bearing > 180.0 {
                self.angle += config::AUTO_AIM_STEP;
            } else {
                self.angle -= config::AUTO_AIM_STEP;
            }
        } else if self.angle < bearing {
            if bearing - self.angle > 180.0 {
                self.angle -= config::AUTO_AIM_STEP;
            } else {
                self.angle += config::AUTO_AIM_STEP;
            }
        }
    }

    pub fn is_on_bearing(&self, bearing: f64) -> bool {
        normalize_once(self.angle) == bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn computer_turret(angle: f64) -> Turret {
        let mut turret = Turret::new(TankKind::Computer, &mut StdRng::seed_from_u64(7));
        turret.angle = angle;
        turret
    }

    #[test]
    fn test_presets() {
        let mut rng = StdRng::seed_from_u64(1);
        let player = Turret::new(TankKind::Player, &mut rng);
        assert_eq!(player.angle, 270.0);
        assert_eq!(player.envelope.half_angle, 360.0);
        assert_eq!(player.envelope.radius, 300.0);
        assert_eq!(player.projectile_speed, 30.0);

        let computer = Turret::new(TankKind::Computer, &mut rng);
        assert_eq!(computer.angle, 90.0);
        assert_eq!(computer.envelope.half_angle, 45.0);
        assert!(computer.envelope.radius >= 100.0 && computer.envelope.radius < 400.0);
        assert_eq!(computer.envelope.radius.fract(), 0.0);
    }

    #[test]
    fn test_same_seed_same_radius() {
        let a = Turret::new(TankKind::Computer, &mut StdRng::seed_from_u64(42));
        let b = Turret::new(TankKind::Computer, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.envelope.radius, b.envelope.radius);
    }

    #[test]
    fn test_track_shorter_arc() {
        let mut turret = computer_turret(85.0);
        turret.track(90.0);
        assert_approx_eq!(turret.angle, 86.0);

        let mut turret = computer_turret(95.0);
        turret.track(90.0);
        assert_approx_eq!(turret.angle, 94.0);
    }

    #[test]
    fn test_track_wraps_around_zero() {
        // 350 -> 10 is 20 degrees the short way, through 360
        let mut turret = computer_turret(350.0);
        turret.track(10.0);
        assert_approx_eq!(turret.angle, 351.0);

        let mut turret = computer_turret(10.0);
        turret.track(350.0);
        assert_approx_eq!(turret.angle, 9.0);
    }

    #[test]
    fn test_track_holds_on_target() {
        let mut turret = computer_turret(45.0);
        turret.track(45.0);
        assert_eq!(turret.angle, 45.0);
        assert!(turret.is_on_bearing(45.0));
    }

    #[test]
    fn test_track_normalizes_once_before_stepping() {
        let mut turret = computer_turret(-10.0);
        turret.track(340.0);
        // -10 -> 350, then one step toward 340
        assert_approx_eq!(turret.angle, 349.0);

        let mut turret = computer_turret(725.0);
        turret.track(0.0);
        // 725 -> 365 only; still above bearing by more than 180
        assert_approx_eq!(turret.angle, 366.0);
    }

    #[test]
    fn test_track_ignores_rotation_speed() {
        let mut turret = computer_turret(0.0);
        turret.rotation_speed = 25.0;
        turret.track(90.0);
        assert_approx_eq!(turret.angle, 1.0);
    }

    #[test]
    fn test_manual_rotation_not_normalized() {
        let mut turret = computer_turret(359.0);
        turret.rotate_right();
        assert_approx_eq!(turret.angle, 361.0);
        turret.angle = 1.0;
        turret.rotate_left();
        assert_approx_eq!(turret.angle, -1.0);
    }

    #[test]
    fn test_envelope_covers() {
        let cone = AttackEnvelope { half_angle: 45.0, radius: 200.0 };
        assert!(cone.covers(90.0, 120.0, 150.0));
        assert!(!cone.covers(90.0, 140.0, 150.0));
        assert!(!cone.covers(90.0, 90.0, 250.0));
        assert!(cone.covers(10.0, 340.0, 10.0));

        let circle = AttackEnvelope { half_angle: 360.0, radius: 300.0 };
        assert!(circle.covers(270.0, 90.0, 299.0));
    }
}
