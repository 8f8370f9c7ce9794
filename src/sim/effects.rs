//! Timed power-up effects
//!
//! Each kind is single-instance: activating it again restarts its full
//! duration instead of stacking. Deadlines are in active time.

use serde::{Deserialize, Serialize};

/// Effects with a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Item score changes are doubled
    DoubleScore,
    /// Walls, obstacles and own body stop being fatal
    Ghost,
    /// Food drifts toward the head
    Magnetic,
}

impl EffectKind {
    pub const ALL: [EffectKind; 3] = [
        EffectKind::DoubleScore,
        EffectKind::Ghost,
        EffectKind::Magnetic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::DoubleScore => "Double Score",
            EffectKind::Ghost => "Ghost Mode",
            EffectKind::Magnetic => "Magnetic Mode",
        }
    }
}

/// Active power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub double_score_until: Option<u64>,
    pub ghost_until: Option<u64>,
    pub magnetic_until: Option<u64>,
}

impl ActiveEffects {
    fn slot(&mut self, kind: EffectKind) -> &mut Option<u64> {
        match kind {
            EffectKind::DoubleScore => &mut self.double_score_until,
            EffectKind::Ghost => &mut self.ghost_until,
            EffectKind::Magnetic => &mut self.magnetic_until,
        }
    }

    /// Deadline for `kind`, if running
    pub fn expires_at(&self, kind: EffectKind) -> Option<u64> {
        match kind {
            EffectKind::DoubleScore => self.double_score_until,
            EffectKind::Ghost => self.ghost_until,
            EffectKind::Magnetic => self.magnetic_until,
        }
    }

    /// Start `kind` (or restart it) for `duration_ms` from `now`
    pub fn activate(&mut self, kind: EffectKind, now: u64, duration_ms: u64) {
        *self.slot(kind) = Some(now + duration_ms);
        log::debug!("{} active until {}ms", kind.label(), now + duration_ms);
    }

    pub fn is_active(&self, kind: EffectKind, now: u64) -> bool {
        self.expires_at(kind).is_some_and(|until| now < until)
    }

    /// Time left on `kind` (0 when inactive)
    pub fn remaining(&self, kind: EffectKind, now: u64) -> u64 {
        self.expires_at(kind)
            .map(|until| until.saturating_sub(now))
            .unwrap_or(0)
    }

    /// Clear every deadline that has passed; returns the kinds that ended
    pub fn expire(&mut self, now: u64) -> Vec<EffectKind> {
        let mut ended = Vec::new();
        for kind in EffectKind::ALL {
            let slot = self.slot(kind);
            if slot.is_some_and(|until| now >= until) {
                *slot = None;
                ended.push(kind);
            }
        }
        ended
    }

    /// Cancel everything (round end, reset, death)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Multiplier applied to item score deltas
    pub fn score_multiplier(&self, now: u64) -> i64 {
        if self.is_active(EffectKind::DoubleScore, now) {
            2
        } else {
            1
        }
    }

    pub fn is_intangible(&self, now: u64) -> bool {
        self.is_active(EffectKind::Ghost, now)
    }

    pub fn is_magnetic(&self, now: u64) -> bool {
        self.is_active(EffectKind::Magnetic, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EFFECT_DURATION_MS;

    #[test]
    fn test_reactivation_resets_expiry() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::Ghost, 0, EFFECT_DURATION_MS);
        effects.activate(EffectKind::Ghost, 10_000, EFFECT_DURATION_MS);
        assert!(effects.is_active(EffectKind::Ghost, 20_000));
        assert!(effects.expire(20_000).is_empty());
        assert!(!effects.is_active(EffectKind::Ghost, 25_000));
    }

    #[test]
    fn test_effects_expire_independently() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::DoubleScore, 0, EFFECT_DURATION_MS);
        effects.activate(EffectKind::Magnetic, 5_000, EFFECT_DURATION_MS);

        assert_eq!(effects.score_multiplier(1_000), 2);
        assert!(effects.is_magnetic(6_000));

        assert_eq!(effects.expire(15_000), vec![EffectKind::DoubleScore]);
        assert_eq!(effects.score_multiplier(15_000), 1);
        assert!(effects.is_magnetic(15_000));

        assert_eq!(effects.expire(20_000), vec![EffectKind::Magnetic]);
        assert!(effects.expire(30_000).is_empty(), "expiry reported once");
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut effects = ActiveEffects::default();
        for kind in EffectKind::ALL {
            effects.activate(kind, 0, EFFECT_DURATION_MS);
        }
        effects.clear();
        for kind in EffectKind::ALL {
            assert!(!effects.is_active(kind, 1));
            assert_eq!(effects.remaining(kind, 1), 0);
        }
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut effects = ActiveEffects::default();
        effects.activate(EffectKind::Ghost, 1_000, EFFECT_DURATION_MS);
        assert_eq!(effects.remaining(EffectKind::Ghost, 1_000), EFFECT_DURATION_MS);
        assert_eq!(effects.remaining(EffectKind::Ghost, 11_000), 5_000);
        assert!(effects.is_intangible(15_999));
        assert!(!effects.is_intangible(16_000));
    }
}
