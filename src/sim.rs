use hashbrown::HashMap;

use vxl_config::SimConfig;
use vxl_geom::{Vec3, Vec3i};
use vxl_hit::{HitCheck, can_see, confirm_hit};
use vxl_map::{Block, VoxelMap};
use vxl_physics::{Bounce, Grenade, InputState, Landing, Player, Tool};
use vxl_trace::block_line;

use crate::event::{SimEvent, log_event};

pub type PlayerId = u8;

const MAX_PLAYERS: usize = 32;

/// A thrown grenade plus the host-side fuse the physics core does not track.
#[derive(Clone, Debug)]
pub struct LiveGrenade {
    pub owner: PlayerId,
    pub body: Grenade,
    pub fuse: f32,
}

/// Owns the world and every moving body; advances them one tick at a time.
pub struct Simulation {
    cfg: SimConfig,
    map: VoxelMap,
    players: HashMap<PlayerId, Player>,
    grenades: Vec<LiveGrenade>,
    tick: u64,
    time: f32,
}

impl Simulation {
    pub fn new(cfg: SimConfig, map: VoxelMap) -> Self {
        debug_assert_eq!(cfg.world, map.dims());
        Self {
            cfg,
            map,
            players: HashMap::new(),
            grenades: Vec::new(),
            tick: 0,
            time: 0.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }
    #[inline]
    pub fn map(&self) -> &VoxelMap {
        &self.map
    }
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn grenades(&self) -> &[LiveGrenade] {
        &self.grenades
    }

    /// Adds a body at `pos` under the lowest free id. `None` when the server
    /// is full or `pos` is not finite.
    pub fn spawn_player(&mut self, pos: Vec3) -> Option<PlayerId> {
        let Some(id) = (0..MAX_PLAYERS as PlayerId).find(|id| !self.players.contains_key(id)) else {
            log::warn!("server full, not spawning at {pos:?}");
            return None;
        };
        let mut p = Player::new(Vec3::ZERO);
        if let Err(e) = p.set_position(pos) {
            log::warn!("not spawning player {id}: {e}");
            return None;
        }
        self.players.insert(id, p);
        log::info!("spawned player {id} at {pos:?}");
        Some(id)
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let p = self.players.remove(&id);
        if p.is_some() {
            log::info!("removed player {id}");
        }
        p
    }

    pub fn set_input(&mut self, id: PlayerId, input: InputState) -> bool {
        let Some(p) = self.players.get_mut(&id) else {
            return false;
        };
        p.apply_input(&self.map, input);
        true
    }

    /// False for an unknown id or a non-finite aim.
    pub fn set_orientation(&mut self, id: PlayerId, aim: Vec3) -> bool {
        let Some(p) = self.players.get_mut(&id) else {
            return false;
        };
        match p.set_orientation(aim) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("player {id}: {e}");
                false
            }
        }
    }

    /// Held tool and fire buttons. False for an unknown id.
    pub fn set_weapon(
        &mut self,
        id: PlayerId,
        tool: Tool,
        primary: bool,
        secondary: bool,
    ) -> bool {
        let Some(p) = self.players.get_mut(&id) else {
            return false;
        };
        p.set_tool(tool);
        p.set_weapon_input(primary, secondary);
        true
    }

    pub fn throw_grenade(&mut self, owner: PlayerId, vel: Vec3, fuse: f32) -> bool {
        let Some(p) = self.players.get(&owner) else {
            return false;
        };
        if !vel.is_finite() || !(fuse >= 0.0) {
            log::debug!("dropping grenade from {owner} with vel {vel:?} fuse {fuse}");
            return false;
        }
        self.grenades.push(LiveGrenade {
            owner,
            body: Grenade::new(p.eye(), vel),
            fuse,
        });
        true
    }

    /// Line of sight between two players' eyes.
    pub fn sees(&self, from: PlayerId, to: PlayerId) -> Option<bool> {
        let a = self.players.get(&from)?;
        let b = self.players.get(&to)?;
        Some(can_see(&self.map, &self.cfg.trace, a.eye(), b.eye()))
    }

    /// Checks a hit `shooter` claims on `target` with the current aim.
    pub fn check_hit(&self, shooter: PlayerId, target: PlayerId, tolerance: f32) -> Option<HitCheck> {
        let s = self.players.get(&shooter)?;
        let t = self.players.get(&target)?;
        Some(confirm_hit(&self.map, s.pos(), s.eye(), s.forward(), t.pos(), tolerance))
    }

    /// Builds a line of blocks between two cells. Returns the cells written.
    pub fn place_line(&mut self, from: Vec3i, to: Vec3i, block: Block) -> usize {
        let cells = block_line(self.map.dims(), from, to, self.cfg.trace.block_line_max);
        for c in &cells {
            self.map.set(c.x, c.y, c.z, block);
        }
        cells.len()
    }

    /// Advances every player, then every grenade, by `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> Vec<SimEvent> {
        self.tick += 1;
        self.time += delta;
        let mut events = Vec::new();

        let mut ids: Vec<PlayerId> = self.players.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            let Some(p) = self.players.get_mut(&id) else {
                continue;
            };
            match p.move_player(&self.map, &self.cfg.player, delta, self.time) {
                Landing::None => {}
                Landing::Sound => events.push(SimEvent::LandingSound { player: id }),
                Landing::Damage(damage) => events.push(SimEvent::FallDamage { player: id, damage }),
            }
        }

        let map = &self.map;
        let params = &self.cfg.grenade;
        self.grenades.retain_mut(|g| {
            let bounce = g.body.step(map, params, delta);
            if bounce.bounced() {
                events.push(SimEvent::GrenadeBounce {
                    at: g.body.pos,
                    loud: bounce == Bounce::Loud,
                });
            }
            g.fuse -= delta;
            if g.fuse <= 0.0 {
                events.push(SimEvent::GrenadeDetonated {
                    owner: g.owner,
                    at: g.body.pos,
                });
                return false;
            }
            true
        });

        for ev in &events {
            log_event(self.tick, ev);
        }
        events
    }
}
