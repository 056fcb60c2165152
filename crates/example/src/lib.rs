//! Example service graph.
//!
//! `App` reaches `Settings` three times and `Journal` twice; after a load
//! they are single instances, and their hooks ran in dependency order:
//! `Settings`, then `Journal`, then `Reporter`.

use std::collections::VecDeque;

use keystone_component::{Component, HookError, Loadable, Shared};

/// Service-wide settings.
#[derive(Debug, Default, Component)]
#[component(loadable)]
pub struct Settings {
    /// Name of the service, defaults to `"assemble"`.
    pub service: String,
    /// Maximum journal entries kept in memory.
    pub capacity: usize,
}

impl Loadable for Settings {
    fn load(&mut self) -> Result<(), HookError> {
        if self.service.is_empty() {
            self.service = "assemble".into();
        }
        if self.capacity == 0 {
            self.capacity = 64;
        }
        tracing::info!(service = %self.service, capacity = self.capacity, "settings ready");
        Ok(())
    }
}

/// In-memory event journal.
#[derive(Debug, Default, Component)]
#[component(loadable)]
pub struct Journal {
    /// Settings the journal is sized from.
    pub settings: Shared<Settings>,
    /// Recorded entries, oldest first.
    pub entries: VecDeque<String>,
    capacity: usize,
}

impl Journal {
    /// Appends an entry, dropping the oldest one when full.
    pub fn record(&mut self, entry: impl Into<String>) {
        if self.capacity > 0 && self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.into());
    }
}

impl Loadable for Journal {
    fn load(&mut self) -> Result<(), HookError> {
        let settings = self.settings.read().ok_or("journal requires settings")?;
        let service = settings.service.clone();
        self.capacity = settings.capacity;
        drop(settings);
        self.record(format!("{service}: journal opened"));
        Ok(())
    }
}

/// Periodic status reporter.
#[derive(Debug, Default, Component)]
#[component(loadable)]
pub struct Reporter {
    /// Shared settings.
    pub settings: Shared<Settings>,
    /// Journal the reporter writes to.
    pub journal: Shared<Journal>,
}

impl Loadable for Reporter {
    fn load(&mut self) -> Result<(), HookError> {
        let mut journal = self.journal.write().ok_or("reporter requires a journal")?;
        journal.record("reporter attached");
        Ok(())
    }
}

/// The application root.
#[derive(Debug, Default, Component)]
pub struct App {
    /// Shared settings.
    pub settings: Shared<Settings>,
    /// Shared journal.
    pub journal: Shared<Journal>,
    /// Status reporter.
    pub reporter: Shared<Reporter>,
}
