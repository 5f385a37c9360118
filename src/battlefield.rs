use crate::audio::SoundSink;
use crate::config;
use crate::geometry::{PlayField, Point, bearing_degrees};
use crate::input::InputSource;
use crate::projectile::ProjectileId;
use crate::tank::{Tank, TankId, TankKind, TickContext};
use log::info;
use rand::Rng;
use std::collections::HashMap;

/// Outcome of one battlefield tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StepReport {
    pub hits: usize,
    pub destroyed: Vec<TankId>,
}

// A pending hit: shooter index, shell, target index
struct Hit {
    shooter: usize,
    shell: ProjectileId,
    target: usize,
}

/// Owns every tank and drives them one fixed tick at a time.
#[derive(Debug)]
pub struct Battlefield {
    field: PlayField,
    tanks: Vec<Tank>,
    next_id: u32,
}

impl Battlefield {
    pub fn new(field: PlayField) -> Self {
        Battlefield {
            field,
            tanks: Vec::new(),
            next_id: 1,
        }
    }

    pub fn field(&self) -> PlayField {
        self.field
    }

    pub fn set_field(&mut self, field: PlayField) {
        self.field = field;
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, position: Point, kind: TankKind, rng: &mut R) -> TankId {
        let id = TankId(self.next_id);
        self.next_id += 1;
        self.tanks.push(Tank::new(id, position, kind, rng));
        info!("Tank {} ({:?}) joined at ({:.0}, {:.0})", id, kind, position.x, position.y);
        id
    }

    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    pub fn get(&self, id: TankId) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.id() == id)
    }

    pub fn get_mut(&mut self, id: TankId) -> Option<&mut Tank> {
        self.tanks.iter_mut().find(|t| t.id() == id)
    }

    pub fn player(&self) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.kind() == TankKind::Player)
    }

    pub fn count(&self, kind: TankKind) -> usize {
        self.tanks.iter().filter(|t| t.kind() == kind).count()
    }

    /// Positions of every tank, taken before a tick so that no tank sees
    /// another's same-tick movement.
    pub fn snapshot(&self) -> HashMap<TankId, Point> {
        self.tanks.iter().map(|t| (t.id(), t.position())).collect()
    }

    /// Gives each tank the nearest opposing tank inside its attack envelope,
    /// or clears its enemy when there is none.
    pub fn acquire_targets(&mut self) {
        let candidates: Vec<(TankId, TankKind, Point)> = self
            .tanks
            .iter()
            .map(|t| (t.id(), t.kind(), t.position()))
            .collect();

        for tank in self.tanks.iter_mut() {
            let origin = tank.position();
            let enemy = candidates
                .iter()
                .filter(|(_, kind, _)| tank.kind().opposes(*kind))
                .filter_map(|(id, _, position)| {
                    let distance = origin.distance(position);
                    let bearing = bearing_degrees(origin, *position);
                    tank.turret
                        .envelope
                        .covers(tank.turret.angle, bearing, distance)
                        .then_some((*id, distance))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(id, _)| id);

            if enemy != tank.enemy() {
                crate::debug_turret!(tank.id() => "Enemy changed {:?} -> {:?}", tank.enemy(), enemy);
            }
            tank.set_enemy(enemy);
        }
    }

    /// Runs one tick for every tank and resolves what their shells hit.
    pub fn step(&mut self, input: &dyn InputSource, sound: &mut dyn SoundSink) -> StepReport {
        let positions = self.snapshot();
        self.acquire_targets();

        let field = self.field;
        for tank in self.tanks.iter_mut() {
            let mut ctx = TickContext {
                input,
                locator: &positions,
                field,
                sound: &mut *sound,
            };
            tank.update(&mut ctx);
            tank.limit_range(
                config::EDGE_MARGIN,
                config::EDGE_MARGIN,
                field.width - config::EDGE_MARGIN,
                field.height - config::EDGE_MARGIN,
            );
        }

        self.fire_computer_turrets(&positions, sound);

        let hits = self.resolve_hits();
        let destroyed = self.remove_destroyed();
        StepReport { hits, destroyed }
    }

    // Computer tanks shoot once their turret sits on the enemy's bearing
    fn fire_computer_turrets(&mut self, positions: &HashMap<TankId, Point>, sound: &mut dyn SoundSink) {
        for tank in self.tanks.iter_mut().filter(|t| t.kind() == TankKind::Computer) {
            let Some(target) = tank.enemy().and_then(|id| positions.get(&id)) else {
                continue;
            };
            let bearing = bearing_degrees(tank.position(), *target);
            if tank.turret.is_on_bearing(bearing) {
                tank.try_fire(sound);
            }
        }
    }

    fn resolve_hits(&mut self) -> usize {
        let mut hits = Vec::new();

        for (shooter, tank) in self.tanks.iter().enumerate() {
            for shell in tank.projectiles().iter().filter(|p| p.in_flight()) {
                let target = self.tanks.iter().position(|other| {
                    tank.kind().opposes(other.kind())
                        && !other.is_destroyed()
                        && other.collision_box().contains(shell.position)
                });
                if let Some(target) = target {
                    hits.push(Hit {
                        shooter,
                        shell: shell.id,
                        target,
                    });
                }
            }
        }

        let mut landed = 0;
        for hit in hits {
            if self.tanks[hit.shooter].detonate(hit.shell) {
                self.tanks[hit.target].take_damage(config::PROJECTILE_DAMAGE);
                landed += 1;
            }
        }
        landed
    }

    fn remove_destroyed(&mut self) -> Vec<TankId> {
        let destroyed: Vec<TankId> = self
            .tanks
            .iter()
            .filter(|t| t.is_destroyed())
            .map(|t| t.id())
            .collect();

        for id in &destroyed {
            info!("Tank {} destroyed!", id);
        }
        self.tanks.retain(|t| !t.is_destroyed());
        destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silence;
    use crate::input::{Control, ControlState};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn battlefield() -> (Battlefield, StdRng) {
        (
            Battlefield::new(PlayField::new(1024.0, 768.0)),
            StdRng::seed_from_u64(5),
        )
    }

    fn idle() -> ControlState {
        ControlState::none()
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let (mut bf, mut rng) = battlefield();
        let a = bf.spawn(Point::new(100.0, 100.0), TankKind::Player, &mut rng);
        let b = bf.spawn(Point::new(200.0, 100.0), TankKind::Computer, &mut rng);
        assert_ne!(a, b);
        assert_eq!(bf.get(b).unwrap().kind(), TankKind::Computer);
        assert_eq!(bf.player().unwrap().id(), a);
        assert_eq!(bf.count(TankKind::Computer), 1);
    }

    #[test]
    fn test_player_acquires_nearest_computer_in_range() {
        let (mut bf, mut rng) = battlefield();
        let player = bf.spawn(Point::new(500.0, 400.0), TankKind::Player, &mut rng);
        let far = bf.spawn(Point::new(500.0, 660.0), TankKind::Computer, &mut rng);
        let near = bf.spawn(Point::new(300.0, 400.0), TankKind::Computer, &mut rng);
        let _out_of_range = bf.spawn(Point::new(900.0, 400.0), TankKind::Computer, &mut rng);

        bf.acquire_targets();
        assert_eq!(bf.get(player).unwrap().enemy(), Some(near));

        bf.get_mut(near).unwrap().set_position(Point::new(100.0, 100.0));
        bf.acquire_targets();
        assert_eq!(bf.get(player).unwrap().enemy(), Some(far));
    }

    #[test]
    fn test_computer_acquires_only_inside_cone() {
        let (mut bf, mut rng) = battlefield();
        let player = bf.spawn(Point::new(500.0, 500.0), TankKind::Player, &mut rng);
        let computer = bf.spawn(Point::new(500.0, 300.0), TankKind::Computer, &mut rng);
        bf.get_mut(computer).unwrap().turret.envelope.radius = 350.0;

        // Default aim is straight down, at the player
        bf.acquire_targets();
        assert_eq!(bf.get(computer).unwrap().enemy(), Some(player));

        bf.get_mut(computer).unwrap().turret.angle = 270.0;
        bf.acquire_targets();
        assert_eq!(bf.get(computer).unwrap().enemy(), None);
    }

    #[test]
    fn test_tanks_read_pre_tick_positions() {
        let (mut bf, mut rng) = battlefield();
        // Player updates first and moves up by 3
        let player = bf.spawn(Point::new(110.0, 100.0), TankKind::Player, &mut rng);
        let computer = bf.spawn(Point::new(100.0, 100.0), TankKind::Computer, &mut rng);
        bf.get_mut(computer).unwrap().turret.angle = 0.0;

        bf.step(&idle().with(Control::MoveForward), &mut Silence);

        assert_eq!(bf.get(computer).unwrap().enemy(), Some(player));
        // The snapshot bearing is 0, so the turret holds instead of
        // turning toward the post-move bearing of 344
        assert_eq!(bf.get(computer).unwrap().turret.angle, 0.0);
        assert_eq!(bf.get(player).unwrap().position(), Point::new(110.0, 97.0));
    }

    #[test]
    fn test_step_clamps_to_field_margin() {
        let (mut bf, mut rng) = battlefield();
        let player = bf.spawn(Point::new(500.0, 31.0), TankKind::Player, &mut rng);

        bf.step(&idle().with(Control::MoveForward), &mut Silence);
        let tank = bf.get(player).unwrap();
        assert_eq!(tank.position().y, config::EDGE_MARGIN);
        assert_eq!(tank.collision_box().corners()[0].y, config::EDGE_MARGIN - 25.0);
    }

    #[test]
    fn test_shell_hit_detonates_and_damages() {
        let (mut bf, mut rng) = battlefield();
        let player = bf.spawn(Point::new(500.0, 500.0), TankKind::Player, &mut rng);
        let computer = bf.spawn(Point::new(560.0, 500.0), TankKind::Computer, &mut rng);
        bf.get_mut(player).unwrap().turret.angle = 0.0;

        // Let the player reload
        for _ in 0..100 {
            bf.step(&idle(), &mut Silence);
        }
        let report = bf.step(&idle().with(Control::Fire), &mut Silence);
        assert_eq!(report.hits, 0);
        assert_eq!(bf.get(player).unwrap().projectiles().len(), 1);

        // 530 -> 560, inside the computer's box
        let report = bf.step(&idle(), &mut Silence);
        assert_eq!(report.hits, 1);
        assert_eq!(bf.get(computer).unwrap().health(), 90);
        assert!(bf.get(player).unwrap().projectiles()[0].exploded);

        // An exploding shell does not hit twice
        let report = bf.step(&idle(), &mut Silence);
        assert_eq!(report.hits, 0);
        assert_eq!(bf.get(computer).unwrap().health(), 90);
    }

    #[test]
    fn test_destroyed_tank_is_removed_and_handle_goes_stale() {
        let (mut bf, mut rng) = battlefield();
        let player = bf.spawn(Point::new(500.0, 500.0), TankKind::Player, &mut rng);
        let computer = bf.spawn(Point::new(560.0, 500.0), TankKind::Computer, &mut rng);
        bf.get_mut(player).unwrap().turret.angle = 0.0;
        bf.get_mut(computer).unwrap().take_damage(95);

        for _ in 0..100 {
            bf.step(&idle(), &mut Silence);
        }
        bf.step(&idle().with(Control::Fire), &mut Silence);
        let report = bf.step(&idle(), &mut Silence);

        assert_eq!(report.destroyed, vec![computer]);
        assert!(bf.get(computer).is_none());
        assert_eq!(bf.count(TankKind::Computer), 0);

        // The player's stale handle is cleared on the next acquisition
        assert_eq!(bf.get(player).unwrap().enemy(), Some(computer));
        bf.step(&idle(), &mut Silence);
        assert_eq!(bf.get(player).unwrap().enemy(), None);
    }

    #[test]
    fn test_computer_fires_when_on_bearing() {
        let (mut bf, mut rng) = battlefield();
        bf.spawn(Point::new(500.0, 500.0), TankKind::Player, &mut rng);
        let computer = bf.spawn(Point::new(500.0, 300.0), TankKind::Computer, &mut rng);
        bf.get_mut(computer).unwrap().turret.envelope.radius = 350.0;

        for _ in 0..99 {
            bf.step(&idle(), &mut Silence);
        }
        assert!(bf.get(computer).unwrap().projectiles().is_empty());

        bf.step(&idle(), &mut Silence);
        let shells = bf.get(computer).unwrap().projectiles();
        assert_eq!(shells.len(), 1);
        assert_eq!(shells[0].heading, 90.0);
    }
}
