mod event;
mod scene;
mod script;
mod sim;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use hashbrown::HashMap;
use vxl_config::{SimConfig, load_config_from_path};
use vxl_geom::{Vec3, Vec3i};
use vxl_map::Block;
use vxl_physics::{InputState, Tool};

use crate::event::SimEvent;
use crate::script::Script;
use crate::sim::{PlayerId, Simulation};

const START_HEALTH: i32 = 100;

/// Headless voxel physics run: builds terrain, spawns walkers, throws grenades.
#[derive(Parser, Debug)]
#[command(name = "vxl-sim", version, about)]
struct Args {
    /// TOML file overriding world size and tuning
    #[arg(long)]
    config: Option<PathBuf>,
    /// TOML file describing walkers and throws
    #[arg(long)]
    script: Option<PathBuf>,
    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Ticks per simulated second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,
    /// Terrain noise seed
    #[arg(long, default_value_t = 1337)]
    seed: i32,
}

#[derive(Default, Debug)]
struct Summary {
    fall_damage: u32,
    landings: u32,
    bounces: u32,
    loud_bounces: u32,
    detonations: u32,
}

impl Summary {
    fn record(&mut self, ev: &SimEvent) {
        match ev {
            SimEvent::FallDamage { damage, .. } => self.fall_damage += damage,
            SimEvent::LandingSound { .. } => self.landings += 1,
            SimEvent::GrenadeBounce { loud, .. } => {
                self.bounces += 1;
                if *loud {
                    self.loud_bounces += 1;
                }
            }
            SimEvent::GrenadeDetonated { .. } => self.detonations += 1,
        }
    }
}

/// Subtracts fall damage. True once the player is dead.
fn take_damage(hp: &mut i32, damage: u32) -> bool {
    *hp = hp.saturating_sub(i32::try_from(damage).unwrap_or(i32::MAX));
    *hp <= 0
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => {
            let cfg = SimConfig::default();
            cfg.validate()?;
            cfg
        }
    };
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    if args.tick_rate == 0 {
        return Err("tick rate must be positive".into());
    }
    let delta = 1.0 / args.tick_rate as f32;

    let map = scene::build_terrain(cfg.world, args.seed);
    let mut sim = Simulation::new(cfg, map);

    let mut walkers: Vec<Option<PlayerId>> = Vec::with_capacity(script.walkers.len());
    for w in &script.walkers {
        let [x, y] = w.column;
        let id = scene::spawn_point(sim.map(), x, y).and_then(|pos| sim.spawn_player(pos));
        match id {
            Some(id) => {
                let [ax, ay, az] = w.aim;
                if !sim.set_orientation(id, Vec3::new(ax, ay, az)) {
                    log::warn!("walker {id} keeps its default aim");
                }
                let tool = Tool::from_id(w.tool).unwrap_or_default();
                sim.set_weapon(id, tool, false, w.aiming);
                sim.set_input(id, InputState(w.keys));
            }
            None => log::warn!("walker at column ({x}, {y}) could not spawn"),
        }
        walkers.push(id);
    }

    // one-block-high wall across the first walker's path, low enough to climb
    if let Some(&Some(first)) = walkers.first() {
        if let Some(p) = sim.player(first) {
            let c = p.pos().floor_cell();
            let from = Vec3i::new(c.x + 6, c.y - 3, c.z + 2);
            let to = Vec3i::new(c.x + 6, c.y + 3, c.z + 2);
            let n = sim.place_line(from, to, Block::solid(0x808080));
            log::info!("placed {n} wall blocks ahead of player {first}");
        }
    }

    let mut summary = Summary::default();
    let mut health: HashMap<PlayerId, i32> = HashMap::new();
    for _ in 0..args.ticks {
        let now = sim.tick_count();
        for t in script.throws.iter().filter(|t| t.at_tick == now) {
            let Some(Some(owner)) = walkers.get(t.by) else {
                continue;
            };
            let [vx, vy, vz] = t.vel;
            sim.throw_grenade(*owner, Vec3::new(vx, vy, vz), t.fuse_secs);
        }
        for ev in sim.tick(delta) {
            summary.record(&ev);
            if let SimEvent::FallDamage { player, damage } = ev {
                let hp = health.entry(player).or_insert(START_HEALTH);
                if take_damage(hp, damage) {
                    sim.remove_player(player);
                    log::info!("player {player} died from a fall");
                }
            }
        }
    }

    let ids: Vec<PlayerId> = walkers.iter().flatten().copied().collect();
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            if let (Some(sees), Some(hit)) = (sim.sees(*a, *b), sim.check_hit(*a, *b, 1.0)) {
                log::info!("player {a} -> {b}: visible={sees} hit={hit:?}");
            }
        }
        if let Some(p) = sim.player(*a) {
            log::info!(
                "player {a} ends at ({:.2}, {:.2}, {:.2}) airborne={} wading={}",
                p.pos().x,
                p.pos().y,
                p.pos().z,
                p.is_airborne(),
                p.is_wading()
            );
        }
    }
    log::info!(
        "ran {} ticks ({:.2}s) with {} players: {:?}, {} grenades live",
        sim.tick_count(),
        sim.time(),
        sim.player_count(),
        summary,
        sim.grenades().len()
    );
    log::debug!("config: {:?}", sim.config());
    Ok(())
}
