use crate::domain::state::{AimPosition, Target};

/// Target struck by a shot, by slot and the id it had at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHit {
    pub slot: usize,
    pub id: u64,
}

/// Outcome of resolving one shot. Describes the mutation; does not apply it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub hits: Vec<TargetHit>,
}

impl Resolution {
    pub fn is_hit(&self) -> bool {
        !self.hits.is_empty()
    }

    #[cfg(test)]
    pub fn hit_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.hits.iter().map(|h| h.id)
    }
}

/// Circular hit test of `aim` against every live target.
///
/// A target is hit when the aim point is strictly closer than its radius plus
/// `tolerance`. Every target that passes counts, so overlapping targets can all
/// be struck by the same shot.
pub fn resolve(aim: AimPosition, targets: &[Target], tolerance: f32) -> Resolution {
    let hits = targets
        .iter()
        .enumerate()
        .filter(|(_, t)| {
            let reach = t.radius() + tolerance;
            let dx = aim.x - t.x;
            let dy = aim.y - t.y;
            dx * dx + dy * dy < reach * reach
        })
        .map(|(slot, t)| TargetHit { slot, id: t.id })
        .collect();

    Resolution { hits }
}
