//! Click waves
//!
//! Each press may spawn a radius-expanding ring with a bounded lifetime. The
//! queue is capped: admitting a wave at capacity evicts the oldest first.

use crate::theme::CursorTheme;
use ghostui_core::Point;
use std::collections::VecDeque;

/// A transient expanding-ring effect
#[derive(Clone, Debug, PartialEq)]
pub struct WaveRecord {
    pub id: u64,
    pub origin: Point,
    pub spawned_at: u64,
    pub lifetime_ms: u64,
    pub max_radius: f32,
    pub theme: CursorTheme,
}

impl WaveRecord {
    /// Fraction of the lifetime elapsed, `0.0..=1.0`
    pub fn progress(&self, now: u64) -> f32 {
        let elapsed = now.saturating_sub(self.spawned_at) as f32;
        (elapsed / self.lifetime_ms.max(1) as f32).clamp(0.0, 1.0)
    }

    pub fn radius(&self, now: u64) -> f32 {
        self.max_radius * self.progress(now)
    }

    pub fn opacity(&self, now: u64) -> f32 {
        1.0 - self.progress(now)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now.saturating_sub(self.spawned_at) >= self.lifetime_ms
    }
}

/// Capped FIFO of active waves
#[derive(Clone, Debug)]
pub struct WaveQueue {
    waves: VecDeque<WaveRecord>,
    capacity: usize,
    next_id: u64,
}

impl WaveQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            waves: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Admit a new wave, returning the evicted oldest one if at capacity
    pub fn admit(
        &mut self,
        origin: Point,
        now: u64,
        lifetime_ms: u64,
        max_radius: f32,
        theme: CursorTheme,
    ) -> Option<WaveRecord> {
        let evicted = if self.waves.len() >= self.capacity {
            self.waves.pop_front()
        } else {
            None
        };

        let id = self.next_id;
        self.next_id += 1;
        self.waves.push_back(WaveRecord {
            id,
            origin,
            spawned_at: now,
            lifetime_ms,
            max_radius,
            theme,
        });
        evicted
    }

    /// Drop expired waves, returning how many were removed
    pub fn prune(&mut self, now: u64) -> usize {
        let before = self.waves.len();
        self.waves.retain(|wave| !wave.is_expired(now));
        before - self.waves.len()
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &WaveRecord> {
        self.waves.iter()
    }

    pub fn clear(&mut self) {
        self.waves.clear();
    }
}
