//! Motion system: advances every active interpolation one tick.
//!
//! All movement — free flight, fly-away, death falls — goes through
//! here, once per tick, before the engine evaluates wave-end
//! conditions. Completions are reported to the engine, which owns the
//! continuations; a Motion component that was replaced before finishing
//! simply never reaches this point, so its continuation never fires.

use glam::DVec2;
use hecs::{Entity, World};

use duckhunt_core::components::{Duck, Motion, MotionIntent};
use duckhunt_core::enums::Facing;
use duckhunt_core::types::Position;

/// A motion that ran to completion this tick.
#[derive(Debug, Clone, Copy)]
pub struct Completion {
    pub entity: Entity,
    pub intent: MotionIntent,
}

/// Advance all motions; collect completions into the reusable buffer
/// and detach the finished Motion components.
pub fn run(world: &mut World, now: u64, completions: &mut Vec<Completion>) {
    completions.clear();

    for (entity, (pos, motion, duck)) in world.query_mut::<(&mut Position, &mut Motion, &mut Duck)>()
    {
        // A death fall leaving its delay drops the held shot pose.
        if motion.intent == MotionIntent::DeathFall
            && motion.elapsed(now) >= motion.delay_ticks
            && duck.facing == Facing::Shot
        {
            duck.facing = Facing::Dead;
        }

        let t = motion.progress(now);
        let p = DVec2::new(motion.from.x, motion.from.y)
            .lerp(DVec2::new(motion.to.x, motion.to.y), t);
        pos.x = p.x;
        pos.y = p.y;

        if motion.finished(now) {
            completions.push(Completion {
                entity,
                intent: motion.intent,
            });
        }
    }

    for completion in completions.iter() {
        let _ = world.remove_one::<Motion>(completion.entity);
    }
}

/// Whether any motion is still outstanding.
pub fn any_active(world: &World) -> bool {
    world.query::<&Motion>().iter().next().is_some()
}
