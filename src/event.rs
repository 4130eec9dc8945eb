use vxl_geom::Vec3;

use crate::sim::PlayerId;

/// Things the host reacts to after a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    FallDamage { player: PlayerId, damage: u32 },
    LandingSound { player: PlayerId },
    GrenadeBounce { at: Vec3, loud: bool },
    GrenadeDetonated { owner: PlayerId, at: Vec3 },
}

pub fn log_event(tick: u64, ev: &SimEvent) {
    match ev {
        SimEvent::FallDamage { player, damage } => {
            log::info!(target: "events", "[tick {}] FallDamage player={} damage={}", tick, player, damage);
        }
        SimEvent::LandingSound { player } => {
            log::debug!(target: "events", "[tick {}] LandingSound player={}", tick, player);
        }
        SimEvent::GrenadeBounce { at, loud } => {
            log::debug!(target: "events", "[tick {}] GrenadeBounce ({:.2}, {:.2}, {:.2}) loud={}",
                tick, at.x, at.y, at.z, loud);
        }
        SimEvent::GrenadeDetonated { owner, at } => {
            log::info!(target: "events", "[tick {}] GrenadeDetonated owner={} ({:.2}, {:.2}, {:.2})",
                tick, owner, at.x, at.y, at.z);
        }
    }
}
