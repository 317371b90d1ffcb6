//! The what-if session — the heart of the digital twin.
//!
//! A session owns the selection a user makes in the simulator view
//! (scenario + capacity factor) and the projection derived from it.
//!
//! RULES:
//!   - The projection is recomputed after every accepted command.
//!   - A rejected command leaves scenario, capacity and projection untouched.
//!   - Every event, accepted or rejected, lands in the session log.
//!   - Nothing is persisted; dropping the session discards everything.

use crate::{
    capacity::CapacityFactor,
    command::TwinCommand,
    config::TwinConfig,
    error::{TwinError, TwinResult},
    event::{SessionLogEntry, TwinEvent},
    projection::{project_scenario, Projection},
    scenario::Scenario,
    snapshot::TwinSnapshot,
    types::SessionId,
};
use uuid::Uuid;

pub struct TwinSession {
    pub session_id: SessionId,
    config:         TwinConfig,
    scenario:       Scenario,
    capacity:       CapacityFactor,
    projection:     Projection,
    log:            Vec<SessionLogEntry>,
}

impl TwinSession {
    /// Start a session with a fresh random id.
    pub fn new(config: TwinConfig) -> TwinResult<Self> {
        Self::with_id(Uuid::new_v4().to_string(), config)
    }

    /// Start a session with a caller-chosen id. Used by tests and tooling.
    pub fn with_id(session_id: SessionId, config: TwinConfig) -> TwinResult<Self> {
        config.validate()?;
        let scenario = Scenario::default();
        let capacity = CapacityFactor::default();
        let projection = project_scenario(&config, scenario, capacity)?;

        let mut session = Self {
            session_id,
            config,
            scenario,
            capacity,
            projection,
            log: Vec::new(),
        };

        log::info!(
            "Session {} started: scenario={} capacity={}",
            session.session_id, scenario, capacity
        );
        let started = TwinEvent::SessionStarted {
            session_id: session.session_id.clone(),
            scenario,
            capacity,
        };
        session.record(&started)?;
        let computed = session.projection_event();
        session.record(&computed)?;
        Ok(session)
    }

    /// Apply one command. Returns the events it produced.
    ///
    /// Out-of-range capacity is logged as `command_rejected` and returned
    /// as an error; the session state is unchanged.
    pub fn apply(&mut self, command: TwinCommand) -> TwinResult<Vec<TwinEvent>> {
        let mut events = Vec::new();

        match command {
            TwinCommand::SelectScenario { scenario } => {
                if scenario != self.scenario {
                    events.push(TwinEvent::ScenarioSelected { from: self.scenario, to: scenario });
                    self.scenario = scenario;
                }
            }
            TwinCommand::SetCapacity { percent } => {
                let capacity = match CapacityFactor::new(percent) {
                    Ok(cf) => cf,
                    Err(e) => {
                        self.reject(&command, &e)?;
                        return Err(e);
                    }
                };
                if capacity != self.capacity {
                    events.push(TwinEvent::CapacityAdjusted { from: self.capacity, to: capacity });
                    self.capacity = capacity;
                }
            }
            TwinCommand::Reset => {
                log::info!("Session {} reset", self.session_id);
                events.push(TwinEvent::SessionReset);
                self.scenario = Scenario::default();
                self.capacity = CapacityFactor::default();
            }
        }

        self.projection = project_scenario(&self.config, self.scenario, self.capacity)?;
        log::debug!(
            "Session {} projection: scenario={} capacity={} backlog={:?}",
            self.session_id,
            self.scenario,
            self.capacity,
            self.projection.backlog_series()
        );
        events.push(self.projection_event());

        for event in &events {
            self.record(event)?;
        }
        Ok(events)
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn capacity(&self) -> CapacityFactor {
        self.capacity
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn log(&self) -> &[SessionLogEntry] {
        &self.log
    }

    /// Count log entries of one event type.
    pub fn event_count(&self, event_type: &str) -> usize {
        self.log.iter().filter(|e| e.event_type == event_type).count()
    }

    pub fn snapshot(&self) -> TwinSnapshot {
        let scenario_label = self
            .config
            .profile(self.scenario)
            .map(|p| p.label.clone())
            .unwrap_or_else(|_| self.scenario.to_string());
        TwinSnapshot {
            session_id:     self.session_id.clone(),
            scenario:       self.scenario,
            scenario_label,
            capacity:       self.capacity,
            projection:     self.projection.clone(),
            events_logged:  self.log.len() as u64,
        }
    }

    fn projection_event(&self) -> TwinEvent {
        TwinEvent::ProjectionComputed {
            scenario:      self.scenario,
            capacity:      self.capacity,
            final_backlog: self.projection.final_backlog(),
            peak_backlog:  self.projection.peak_backlog(),
        }
    }

    fn reject(&mut self, command: &TwinCommand, error: &TwinError) -> TwinResult<()> {
        log::warn!(
            "Session {} rejected {}: {error}",
            self.session_id,
            command.name()
        );
        self.record(&TwinEvent::CommandRejected {
            command: command.name().to_string(),
            reason:  error.to_string(),
        })
    }

    fn record(&mut self, event: &TwinEvent) -> TwinResult<()> {
        let entry = SessionLogEntry {
            seq:         self.log.len() as u64 + 1,
            session_id:  self.session_id.clone(),
            event_type:  event.type_name().to_string(),
            payload:     serde_json::to_string(event)?,
            recorded_at: chrono::Utc::now(),
        };
        self.log.push(entry);
        Ok(())
    }
}
