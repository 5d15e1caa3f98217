//! The `Sim` struct and its event loop.

use er_core::{Color, Patient, PatientId, SimTime, TriageConfig, TriageRotation};
use er_queue::{Event, EventKind, EventQueue, WaitingRoom};
use tracing::{debug, info, trace};

use crate::{Outcome, SimError, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns the world model: the roster of every generated patient (an
/// arena indexed by [`PatientId`]), the event queue, the waiting room, and
/// the room counter.  Events and the waiting room refer to patients by id
/// only; colors change exclusively inside the dispatch handlers below.
///
/// Create via [`SimBuilder`][crate::SimBuilder] or [`Sim::new`].  Both
/// leave the sim initialized and ready to [`run`](Self::run).
pub struct Sim {
    config: TriageConfig,

    queue: EventQueue,

    waiting: WaitingRoom,

    /// Every generated patient, indexed by `PatientId`.
    patients: Vec<Patient>,

    /// Unoccupied rooms, `0..=config.total_rooms`.
    free_rooms: u32,

    /// Shared round-robin color pointer, advanced by TRIAGE.
    rotation: TriageRotation,

    outcome: Outcome,

    /// Timestamp of the last dispatched event (`opening` before the first).
    now: SimTime,
}

impl Sim {
    /// Validate `config` and return an initialized sim.
    pub fn new(config: TriageConfig) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self {
            free_rooms: config.total_rooms,
            now:        config.opening,
            config,
            queue:      EventQueue::new(),
            waiting:    WaitingRoom::new(),
            patients:   Vec::new(),
            rotation:   TriageRotation::new(),
            outcome:    Outcome::default(),
        };
        sim.initialize();
        Ok(sim)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Replace the run parameters.  Takes effect at the next
    /// [`initialize`](Self::initialize).
    pub fn set_config(&mut self, config: TriageConfig) -> SimResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Reset all state and seed the queue with one TICK and every ARRIVAL.
    pub fn initialize(&mut self) {
        self.queue.clear();
        self.waiting.clear();
        self.patients.clear();
        self.free_rooms = self.config.total_rooms;
        self.rotation = TriageRotation::new();
        self.outcome = Outcome::default();
        self.now = self.config.opening;

        self.queue.push(Event::global(self.config.opening, EventKind::Tick));

        let mut arrival = self.config.opening;
        while arrival < self.config.closing
            && (self.patients.len() as u32) < self.config.total_patients
        {
            let id = PatientId(self.patients.len() as u32);
            self.patients.push(Patient::new(id, arrival));
            self.queue.push(Event::for_patient(arrival, EventKind::Arrival, id));
            arrival = arrival + self.config.arrival_interval_mins;
        }
        self.outcome.generated = self.patients.len() as u32;

        info!(
            rooms    = self.config.total_rooms,
            patients = self.outcome.generated,
            opening  = %self.config.opening,
            closing  = %self.config.closing,
            "simulation initialized"
        );
    }

    /// Drain the queue, reporting every dispatched event to `observer`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Outcome> {
        observer.on_sim_start(self.config.opening, self.patients.len());
        while let Some(event) = self.step()? {
            observer.on_event(&event, self.event_patient(&event));
        }
        info!(
            treated   = self.outcome.treated,
            abandoned = self.outcome.abandoned,
            dead      = self.outcome.dead,
            "simulation finished"
        );
        observer.on_sim_end(&self.outcome);
        Ok(self.outcome)
    }

    /// Dispatch every event due at or before `until`, then stop.
    ///
    /// Useful for tests and for inspecting the world mid-run.  A later
    /// [`run`](Self::run) picks up where this left off.
    pub fn run_until<O: SimObserver>(&mut self, until: SimTime, observer: &mut O) -> SimResult<()> {
        while self.queue.next_time().is_some_and(|t| t <= until) {
            if let Some(event) = self.step()? {
                observer.on_event(&event, self.event_patient(&event));
            }
        }
        Ok(())
    }

    /// Pop and dispatch one event.  Returns `None` when the queue is drained.
    pub fn step(&mut self) -> SimResult<Option<Event>> {
        let Some(event) = self.queue.pop() else {
            return Ok(None);
        };
        self.now = event.time;
        trace!(time = %event.time, kind = %event.kind, patient = ?event.patient, "event");
        self.dispatch(&event)?;
        Ok(Some(event))
    }

    /// Inject an event into the queue.
    ///
    /// An event dated before [`now`](Self::now) is moved up to `now`, so
    /// dispatch order never goes back in time.
    pub fn schedule(&mut self, mut event: Event) {
        if event.time < self.now {
            debug!(requested = %event.time, now = %self.now, kind = %event.kind, "past event moved up to now");
            event.time = self.now;
        }
        self.queue.push(event);
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(id.index())
    }

    pub fn waiting_room(&self) -> &WaitingRoom {
        &self.waiting
    }

    pub fn free_rooms(&self) -> u32 {
        self.free_rooms
    }

    pub fn total_rooms(&self) -> u32 {
        self.config.total_rooms
    }

    /// Pending events in the order they will fire.
    pub fn pending_events(&self) -> impl Iterator<Item = &Event> {
        self.queue.iter()
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch(&mut self, event: &Event) -> SimResult<()> {
        let now = event.time;
        match event.kind {
            EventKind::Arrival => {
                let id = self.require_patient(event)?;
                self.queue.push(Event::for_patient(
                    now + self.config.triage_mins,
                    EventKind::Triage,
                    id,
                ));
            }
            EventKind::Triage     => self.on_triage(now, self.require_patient(event)?),
            EventKind::FreeStudio => self.on_free_studio(now),
            EventKind::Timeout    => self.on_timeout(now, self.require_patient(event)?),
            EventKind::Treated    => self.on_treated(now, self.require_patient(event)?),
            EventKind::Tick       => self.on_tick(now),
        }
        Ok(())
    }

    fn on_triage(&mut self, now: SimTime, id: PatientId) {
        let patient = &mut self.patients[id.index()];
        if patient.color() != Color::New {
            trace!(patient = %id, color = %patient.color(), "triage of a triaged patient ignored");
            return;
        }
        let color = self.rotation.next_color();
        patient.set_color(color);
        self.waiting.push(patient);
        if let Some(mins) = self.config.timeout_mins(color) {
            self.queue.push(Event::for_patient(now + mins, EventKind::Timeout, id));
        }
        debug!(time = %now, patient = %id, %color, "triaged");
    }

    fn on_free_studio(&mut self, now: SimTime) {
        if self.free_rooms == 0 {
            return;
        }
        let Some(id) = self.waiting.pop() else {
            return;
        };
        let patient = &mut self.patients[id.index()];
        let color = patient.color();
        let mins = self.config.treatment_mins(color).unwrap_or_default();
        patient.set_color(Color::Treating);
        self.free_rooms -= 1;
        self.queue.push(Event::for_patient(now + mins, EventKind::Treated, id));
        debug!(time = %now, patient = %id, %color, free_rooms = self.free_rooms, "admitted");
    }

    fn on_timeout(&mut self, now: SimTime, id: PatientId) {
        let patient = &mut self.patients[id.index()];
        match patient.color() {
            Color::White => {
                self.waiting.remove(id);
                patient.set_color(Color::Out);
                self.outcome.abandoned += 1;
                debug!(time = %now, patient = %id, "abandoned");
            }
            Color::Yellow => {
                self.waiting.remove(id);
                patient.set_color(Color::Red);
                self.waiting.push(patient);
                self.queue.push(Event::for_patient(
                    now + self.config.timeout_red_mins,
                    EventKind::Timeout,
                    id,
                ));
                debug!(time = %now, patient = %id, "escalated to RED");
            }
            Color::Red => {
                self.waiting.remove(id);
                patient.set_color(Color::Black);
                self.outcome.dead += 1;
                debug!(time = %now, patient = %id, "died waiting");
            }
            color => {
                trace!(time = %now, patient = %id, %color, "stale timeout ignored");
            }
        }
    }

    fn on_treated(&mut self, now: SimTime, id: PatientId) {
        let patient = &mut self.patients[id.index()];
        if patient.color() != Color::Treating {
            trace!(patient = %id, color = %patient.color(), "treated event for a patient not in a room ignored");
            return;
        }
        patient.set_color(Color::Out);
        self.outcome.treated += 1;
        self.free_rooms += 1;
        self.queue.push(Event::global(now, EventKind::FreeStudio));
        debug!(time = %now, patient = %id, free_rooms = self.free_rooms, "treated");
    }

    fn on_tick(&mut self, now: SimTime) {
        if self.free_rooms > 0 && !self.waiting.is_empty() {
            self.queue.push(Event::global(now, EventKind::FreeStudio));
        }
        if now < self.config.closing {
            self.queue.push(Event::global(now + self.config.tick_interval_mins, EventKind::Tick));
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// The roster id of a patient-scoped event.
    fn require_patient(&self, event: &Event) -> SimResult<PatientId> {
        let id = event.patient.ok_or(SimError::MissingPatient { kind: event.kind })?;
        if id.index() >= self.patients.len() {
            return Err(SimError::PatientNotFound(id));
        }
        Ok(id)
    }

    fn event_patient(&self, event: &Event) -> Option<&Patient> {
        event.patient.and_then(|id| self.patients.get(id.index()))
    }
}
