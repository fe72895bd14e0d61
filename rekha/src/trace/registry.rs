//! Fixed set of tracer slots, one per operator.

use std::sync::{Arc, Weak};

use log::debug;

use super::tracer::{Tracer, TracerConfig};
use crate::cloud::PointStore;
use crate::error::{Result, TraceError};

/// Default number of operator slots.
pub const DEFAULT_SLOTS: usize = 3;

/// Tracers addressed by slot number `1..=slots`, created on first use.
///
/// All tracers read the same cloud; each owns its own waypoints and trace.
pub struct TracerSlots<S: PointStore + ?Sized> {
    store: Weak<S>,
    config: TracerConfig,
    tracers: Vec<Option<Tracer<S>>>,
}

impl<S: PointStore + ?Sized> TracerSlots<S> {
    pub fn new(store: &Arc<S>, slots: usize, config: TracerConfig) -> Self {
        Self {
            store: Arc::downgrade(store),
            config,
            tracers: (0..slots).map(|_| None).collect(),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.tracers.len()
    }

    /// Tracer for `slot`, created if the slot is empty.
    ///
    /// # Errors
    /// `InvalidSlot` outside `1..=capacity`, `NoCloud` if a tracer has to be
    /// created after the cloud was dropped.
    pub fn tracer_mut(&mut self, slot: usize) -> Result<&mut Tracer<S>> {
        let index = self.index(slot)?;
        let entry = &mut self.tracers[index];
        if entry.is_none() {
            let store = self.store.upgrade().ok_or(TraceError::NoCloud)?;
            debug!("[TracerSlots] creating tracer for slot {}", slot);
            *entry = Some(Tracer::new(&store, self.config.clone()));
        }
        entry.as_mut().ok_or(TraceError::NoCloud)
    }

    /// Existing tracer for `slot`.
    pub fn get(&self, slot: usize) -> Option<&Tracer<S>> {
        let index = self.index(slot).ok()?;
        self.tracers[index].as_ref()
    }

    /// Clear a slot's waypoints and trace, keeping the tracer.
    pub fn reset(&mut self, slot: usize) -> Result<()> {
        let index = self.index(slot)?;
        if let Some(tracer) = self.tracers[index].as_mut() {
            tracer.reset();
        }
        Ok(())
    }

    /// Take the tracer out of `slot`.
    pub fn remove(&mut self, slot: usize) -> Option<Tracer<S>> {
        let index = self.index(slot).ok()?;
        self.tracers[index].take()
    }

    /// Run pending traces; returns `(slot, success)` for each one run.
    pub fn update_all(&mut self) -> Vec<(usize, bool)> {
        self.tracers
            .iter_mut()
            .enumerate()
            .filter_map(|(i, t)| {
                let ok = t.as_mut()?.update()?;
                Some((i + 1, ok))
            })
            .collect()
    }

    /// Slots that currently hold a tracer.
    pub fn active_slots(&self) -> Vec<usize> {
        self.tracers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_some())
            .map(|(i, _)| i + 1)
            .collect()
    }

    fn index(&self, slot: usize) -> Result<usize> {
        if slot == 0 || slot > self.tracers.len() {
            return Err(TraceError::InvalidSlot {
                slot,
                slots: self.tracers.len(),
            });
        }
        Ok(slot - 1)
    }
}
