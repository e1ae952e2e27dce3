//! Test doubles for the board collaborators

#![allow(dead_code)]

use std::collections::HashMap;

use myrtio_ring_chaser::{Duration, EdgeSource, LineDriver, LineId, OneShotTimer, StatusSink};

/// Line driver that records every write and lets tests set input levels
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub levels: HashMap<LineId, bool>,
    pub writes: Vec<(LineId, bool)>,
    pub outputs: Vec<LineId>,
    pub inputs: Vec<LineId>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, id: LineId) -> bool {
        self.levels.get(&id).copied().unwrap_or(false)
    }

    /// Ring lines currently driven high
    pub fn lit(&self, lines: &[LineId]) -> Vec<LineId> {
        lines.iter().copied().filter(|id| self.level(*id)).collect()
    }

    pub fn press(&mut self, id: LineId) {
        self.levels.insert(id, false);
    }

    pub fn release(&mut self, id: LineId) {
        self.levels.insert(id, true);
    }
}

impl LineDriver for RecordingDriver {
    fn configure_lines(&mut self, ids: &[LineId]) {
        for id in ids {
            self.outputs.push(*id);
            self.levels.insert(*id, false);
        }
    }

    fn configure_input(&mut self, id: LineId) {
        self.inputs.push(id);
        // Pulled up
        self.levels.insert(id, true);
    }

    fn set_line(&mut self, id: LineId, level: bool) {
        self.writes.push((id, level));
        self.levels.insert(id, level);
    }

    fn read_line(&self, id: LineId) -> bool {
        self.level(id)
    }
}

/// Edge source that only tracks whether it is enabled
#[derive(Debug, Default)]
pub struct MockEdges {
    pub enabled: bool,
    pub enable_calls: usize,
    pub disable_calls: usize,
}

impl EdgeSource for MockEdges {
    fn enable(&mut self) {
        self.enabled = true;
        self.enable_calls += 1;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disable_calls += 1;
    }
}

/// Timer that records scheduled delays; tests fire it by hand
#[derive(Debug, Default)]
pub struct MockTimer {
    pub scheduled: Vec<Duration>,
}

impl OneShotTimer for MockTimer {
    fn schedule_once(&mut self, delay: Duration) {
        self.scheduled.push(delay);
    }
}

/// Status sink collecting every line
#[derive(Debug, Default)]
pub struct VecSink {
    pub lines: Vec<String>,
}

impl StatusSink for VecSink {
    fn write_status(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
