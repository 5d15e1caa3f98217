//! Integration tests for er-sim.

use er_core::{Color, Patient, PatientId, SimTime};
use er_queue::{Event, EventKind};

use crate::{NoopObserver, Outcome, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn at(h: u32, m: u32) -> SimTime {
    SimTime::hm(h, m)
}

fn p(id: u32) -> PatientId {
    PatientId(id)
}

fn color_of(sim: &Sim, id: u32) -> Color {
    sim.patient(p(id)).unwrap().color()
}

fn counters(o: &Outcome) -> (u32, u32, u32) {
    (o.treated, o.abandoned, o.dead)
}

/// One row per dispatched event: time, kind, patient, patient color afterwards.
type Row = (SimTime, EventKind, Option<PatientId>, Option<Color>);

/// Observer that records the full event trace.
#[derive(Default)]
struct Recorder {
    rows:    Vec<Row>,
    starts:  usize,
    ends:    Vec<Outcome>,
}

impl Recorder {
    fn has(&self, time: SimTime, kind: EventKind, id: u32, color: Color) -> bool {
        self.rows.contains(&(time, kind, Some(p(id)), Some(color)))
    }

    fn kinds_at(&self, time: SimTime) -> Vec<EventKind> {
        self.rows.iter().filter(|r| r.0 == time).map(|r| r.1).collect()
    }
}

impl SimObserver for Recorder {
    fn on_sim_start(&mut self, _opening: SimTime, _generated: usize) {
        self.starts += 1;
    }

    fn on_event(&mut self, event: &Event, patient: Option<&Patient>) {
        self.rows.push((event.time, event.kind, event.patient, patient.map(Patient::color)));
    }

    fn on_sim_end(&mut self, outcome: &Outcome) {
        self.ends.push(*outcome);
    }
}

/// One room; white patients hold it for an hour, so the queue backs up.
fn congested() -> Sim {
    SimBuilder::new()
        .rooms(1)
        .patients(5)
        .arrival_interval(10)
        .treatment(Color::White, 60)
        .build()
        .unwrap()
}

// ── Initialization ────────────────────────────────────────────────────────────

#[cfg(test)]
mod init_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new().build().unwrap();
        assert_eq!(sim.patients().len(), 120);
        assert_eq!(sim.free_rooms(), 3);
        assert_eq!(sim.total_rooms(), 3);
        assert_eq!(sim.now(), at(8, 0));
        // one TICK plus one ARRIVAL per patient
        assert_eq!(sim.pending_events().count(), 121);
        assert_eq!(sim.outcome().generated, 120);
        assert!(sim.patients().iter().all(|p| p.color() == Color::New));
    }

    #[test]
    fn zero_tick_interval_errors() {
        let result = SimBuilder::new().tick_interval(0).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn clock_overflowing_timeout_errors() {
        let result = SimBuilder::new().patients(1).timeout(Color::White, u32::MAX).build();
        assert!(matches!(result, Err(SimError::Config(_))));

        let mut sim = SimBuilder::new().build().unwrap();
        let bad = sim.config().clone().with_timeout(Color::White, u32::MAX);
        assert!(matches!(sim.set_config(bad), Err(SimError::Config(_))));
    }

    #[test]
    fn generation_stops_at_closing() {
        let sim = SimBuilder::new()
            .patients(100)
            .window(at(8, 0), at(8, 20))
            .build()
            .unwrap();
        let arrivals: Vec<SimTime> = sim.patients().iter().map(Patient::arrival).collect();
        assert_eq!(arrivals, [at(8, 0), at(8, 5), at(8, 10), at(8, 15)]);
    }

    #[test]
    fn generation_stops_at_patient_count() {
        let sim = SimBuilder::new().patients(3).build().unwrap();
        assert_eq!(sim.patients().len(), 3);
        assert_eq!(sim.patients()[2].arrival(), at(8, 10));
        assert_eq!(sim.patients()[2].id(), p(2));
    }

    #[test]
    fn arrival_and_tick_share_the_opening_minute() {
        let sim = SimBuilder::new().patients(1).build().unwrap();
        let first: Vec<(SimTime, EventKind)> =
            sim.pending_events().map(|e| (e.time, e.kind)).collect();
        assert_eq!(first, [(at(8, 0), EventKind::Arrival), (at(8, 0), EventKind::Tick)]);
    }

    #[test]
    fn initialize_resets_everything() {
        let mut sim = SimBuilder::new().rooms(1).patients(10).build().unwrap();
        let first = sim.run(&mut NoopObserver).unwrap();

        sim.initialize();
        assert_eq!(sim.free_rooms(), 1);
        assert!(sim.waiting_room().is_empty());
        assert_eq!(counters(&sim.outcome()), (0, 0, 0));
        assert!(sim.patients().iter().all(|p| p.color() == Color::New));

        let second = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn set_config_applies_on_initialize() {
        let mut sim = SimBuilder::new().build().unwrap();
        sim.set_config(sim.config().clone().with_rooms(0)).unwrap();
        assert_eq!(sim.free_rooms(), 3, "not applied before initialize");
        sim.initialize();
        assert_eq!(sim.free_rooms(), 0);

        let bad = sim.config().clone().with_tick_interval(0);
        assert!(sim.set_config(bad).is_err());
        assert_eq!(sim.config().tick_interval_mins, 5);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn one_room_one_patient_is_treated_at_0815() {
        let mut sim = SimBuilder::new().rooms(1).patients(1).build().unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();

        assert_eq!(counters(&outcome), (1, 0, 0));
        assert!(rec.has(at(8, 0), EventKind::Arrival, 0, Color::New));
        assert!(rec.has(at(8, 5), EventKind::Triage, 0, Color::White));
        // triage, heartbeat, then the admission it triggered, all at 08:05
        assert_eq!(
            rec.kinds_at(at(8, 5)),
            [EventKind::Triage, EventKind::Tick, EventKind::FreeStudio]
        );
        assert!(rec.has(at(8, 15), EventKind::Treated, 0, Color::Out));
        // the 09:05 WHITE deadline still fires and is ignored
        assert!(rec.has(at(9, 5), EventKind::Timeout, 0, Color::Out));
        assert_eq!(color_of(&sim, 0), Color::Out);
        assert_eq!(sim.free_rooms(), 1);
    }

    #[test]
    fn no_rooms_small_population() {
        let mut sim = SimBuilder::new().rooms(0).patients(3).build().unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();

        assert_eq!(counters(&outcome), (0, 1, 2));
        // P0 WHITE, triaged 08:05, leaves after 60 minutes
        assert!(rec.has(at(9, 5), EventKind::Timeout, 0, Color::Out));
        // P1 YELLOW, triaged 08:10, escalates at 08:40, dies at 09:10
        assert!(rec.has(at(8, 40), EventKind::Timeout, 1, Color::Red));
        assert!(rec.has(at(9, 10), EventKind::Timeout, 1, Color::Black));
        // P2 RED, triaged 08:15, dies at 08:45
        assert!(rec.has(at(8, 45), EventKind::Timeout, 2, Color::Black));
        assert!(rec.rows.iter().all(|r| r.1 != EventKind::Treated));
    }

    #[test]
    fn no_rooms_default_population() {
        let mut sim = SimBuilder::new().rooms(0).build().unwrap();
        let outcome = sim.run(&mut NoopObserver).unwrap();
        // 120 triages split evenly over the three colors
        assert_eq!(counters(&outcome), (0, 40, 80));
        assert_eq!(outcome.unresolved(), 0);
    }

    #[test]
    fn escalated_patient_requeues_as_red_with_fresh_deadline() {
        let mut sim = congested();
        sim.run_until(at(8, 45), &mut NoopObserver).unwrap();

        // P1 was triaged YELLOW at 08:15; its deadline fired at 08:45.
        assert_eq!(color_of(&sim, 1), Color::Red);
        assert!(sim.waiting_room().contains(p(1)));
        assert!(sim.pending_events().any(|e| {
            e.kind == EventKind::Timeout && e.patient == Some(p(1)) && e.time == at(9, 15)
        }));
        // ahead of the RED P2 (later arrival), the WHITE P3 and the YELLOW P4
        let order: Vec<PatientId> = sim.waiting_room().iter().collect();
        assert_eq!(order, [p(1), p(2), p(4), p(3)]);
    }

    #[test]
    fn escalated_patient_takes_the_next_room() {
        let mut sim = congested();
        sim.run_until(at(9, 5), &mut NoopObserver).unwrap();

        // P0 left its room at 09:05; P2 (RED) died at 08:55.
        assert_eq!(color_of(&sim, 0), Color::Out);
        assert_eq!(color_of(&sim, 2), Color::Black);
        assert_eq!(color_of(&sim, 1), Color::Treating);
        assert_eq!(color_of(&sim, 3), Color::White);
        assert_eq!(color_of(&sim, 4), Color::Yellow);
        assert_eq!(sim.free_rooms(), 0);

        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();
        // P1's old RED deadline at 09:15 is stale; P4 escalates at the same minute.
        assert!(rec.has(at(9, 15), EventKind::Timeout, 1, Color::Treating));
        assert!(rec.has(at(9, 15), EventKind::Timeout, 4, Color::Red));
        // 09:35: P1 done, the freed room goes to P4 before P3's deadline fires.
        assert!(rec.has(at(9, 35), EventKind::Treated, 1, Color::Out));
        assert!(rec.has(at(9, 35), EventKind::Timeout, 3, Color::Out));
        assert!(rec.has(at(10, 5), EventKind::Treated, 4, Color::Out));
        assert_eq!(counters(&outcome), (3, 1, 1));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;

    fn allowed(from: Color, to: Color) -> bool {
        matches!(
            (from, to),
            (Color::New, Color::White | Color::Yellow | Color::Red)
                | (Color::White, Color::Treating | Color::Out)
                | (Color::Yellow, Color::Treating | Color::Red)
                | (Color::Red, Color::Treating | Color::Black)
                | (Color::Treating, Color::Out)
        )
    }

    /// Step through a whole run checking every invariant after every event.
    fn check_every_step(mut sim: Sim) {
        let total = sim.total_rooms();
        let mut prev: Vec<Color> = sim.patients().iter().map(Patient::color).collect();
        let mut escalations = vec![0u32; prev.len()];

        while sim.step().unwrap().is_some() {
            // room bound
            let free = sim.free_rooms();
            assert!(free <= total);
            let treating = sim.patients().iter().filter(|p| p.color() == Color::Treating).count();
            assert_eq!(treating as u32, total - free);

            // waiting-room exclusivity
            let waiting: Vec<PatientId> = sim
                .patients()
                .iter()
                .filter(|p| p.color().is_waiting())
                .map(Patient::id)
                .collect();
            assert_eq!(sim.waiting_room().len(), waiting.len());
            assert!(waiting.iter().all(|&id| sim.waiting_room().contains(id)));

            // transition graph: terminal colors never move, YELLOW→RED at most once
            for (i, patient) in sim.patients().iter().enumerate() {
                let (from, to) = (prev[i], patient.color());
                if from == to {
                    continue;
                }
                assert!(allowed(from, to), "{} moved {from} → {to}", patient.id());
                if (from, to) == (Color::Yellow, Color::Red) {
                    escalations[i] += 1;
                    assert_eq!(escalations[i], 1, "{} escalated twice", patient.id());
                }
                prev[i] = to;
            }
        }

        let outcome = sim.outcome();
        assert_eq!(outcome.unresolved(), 0);
        assert_eq!(outcome.treated + outcome.abandoned + outcome.dead, outcome.generated);
    }

    #[test]
    fn invariants_hold_with_default_config() {
        check_every_step(SimBuilder::new().build().unwrap());
    }

    #[test]
    fn invariants_hold_with_one_room() {
        check_every_step(SimBuilder::new().rooms(1).build().unwrap());
    }

    #[test]
    fn invariants_hold_with_no_rooms() {
        check_every_step(SimBuilder::new().rooms(0).build().unwrap());
    }

    #[test]
    fn invariants_hold_with_surplus_rooms() {
        check_every_step(SimBuilder::new().rooms(10).arrival_interval(1).patients(300).build().unwrap());
    }

    #[test]
    fn conservation_mid_run() {
        let mut sim = SimBuilder::new().rooms(2).build().unwrap();
        sim.run_until(at(12, 0), &mut NoopObserver).unwrap();
        let outcome = sim.outcome();
        let in_flight = sim.patients().iter().filter(|p| !p.color().is_terminal()).count() as u32;
        assert!(in_flight > 0);
        assert_eq!(outcome.unresolved(), in_flight);
        assert_eq!(outcome.treated + outcome.abandoned + outcome.dead + in_flight, 120);
    }

    #[test]
    fn heartbeat_stops_at_closing() {
        let mut sim = SimBuilder::new().patients(2).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ticks: Vec<SimTime> = rec
            .rows
            .iter()
            .filter(|r| r.1 == EventKind::Tick)
            .map(|r| r.0)
            .collect();
        // 08:00 through 20:00 inclusive, every 5 minutes
        assert_eq!(ticks.len(), 145);
        assert_eq!(ticks.last(), Some(&at(20, 0)));
    }

    #[test]
    fn triage_colors_rotate_across_patients() {
        let mut sim = SimBuilder::new().patients(7).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let colors: Vec<Color> = rec
            .rows
            .iter()
            .filter(|r| r.1 == EventKind::Triage)
            .filter_map(|r| r.3)
            .collect();
        assert_eq!(
            colors,
            [
                Color::White, Color::Yellow, Color::Red,
                Color::White, Color::Yellow, Color::Red,
                Color::White,
            ]
        );
    }

    #[test]
    fn runs_are_deterministic() {
        let trace = || {
            let mut sim = SimBuilder::new().rooms(2).build().unwrap();
            let mut rec = Recorder::default();
            sim.run(&mut rec).unwrap();
            rec.rows
        };
        assert_eq!(trace(), trace());
    }

    #[test]
    fn events_never_go_back_in_time() {
        let mut sim = SimBuilder::new().build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.rows.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn observer_hooks_fire_once() {
        let mut sim = SimBuilder::new().patients(4).build().unwrap();
        let mut rec = Recorder::default();
        let outcome = sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts, 1);
        assert_eq!(rec.ends, [outcome]);
    }

    #[test]
    fn paired_observers_both_see_the_run() {
        let mut sim = SimBuilder::new().patients(4).build().unwrap();
        let mut pair = (Recorder::default(), Recorder::default());
        let outcome = sim.run(&mut pair).unwrap();
        assert_eq!(pair.0.rows, pair.1.rows);
        assert!(!pair.0.rows.is_empty());
        assert_eq!((pair.0.starts, pair.1.starts), (1, 1));
        assert_eq!(pair.1.ends, [outcome]);
    }
}

// ── Guards ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod guard_tests {
    use super::*;

    #[test]
    fn late_timeout_for_out_patient_is_noop() {
        let mut sim = SimBuilder::new().rooms(1).patients(1).build().unwrap();
        let before = sim.run(&mut NoopObserver).unwrap();

        sim.schedule(Event::for_patient(at(21, 0), EventKind::Timeout, p(0)));
        let after = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(before, after);
        assert_eq!(color_of(&sim, 0), Color::Out);
    }

    #[test]
    fn late_timeout_for_dead_patient_is_noop() {
        let mut sim = SimBuilder::new().rooms(0).patients(3).build().unwrap();
        let before = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(color_of(&sim, 2), Color::Black);

        sim.schedule(Event::for_patient(at(21, 0), EventKind::Timeout, p(2)));
        assert!(sim.step().unwrap().is_some());
        assert_eq!(sim.outcome(), before);
        assert_eq!(color_of(&sim, 2), Color::Black);
    }

    #[test]
    fn free_studio_without_free_room_is_noop() {
        let mut sim = SimBuilder::new().rooms(0).patients(1).build().unwrap();
        sim.run_until(at(8, 5), &mut NoopObserver).unwrap();
        assert!(sim.waiting_room().contains(p(0)));

        sim.schedule(Event::global(sim.now(), EventKind::FreeStudio));
        sim.step().unwrap();
        assert!(sim.waiting_room().contains(p(0)));
        assert_eq!(color_of(&sim, 0), Color::White);
    }

    #[test]
    fn free_studio_with_empty_waiting_room_is_noop() {
        let mut sim = SimBuilder::new().rooms(2).patients(0).build().unwrap();
        sim.schedule(Event::global(sim.now(), EventKind::FreeStudio));
        assert_eq!(sim.step().unwrap().map(|e| e.kind), Some(EventKind::FreeStudio));
        assert_eq!(sim.free_rooms(), 2);
    }

    #[test]
    fn treated_for_waiting_patient_is_ignored() {
        let mut sim = SimBuilder::new().rooms(0).patients(1).build().unwrap();
        sim.run_until(at(8, 5), &mut NoopObserver).unwrap();
        sim.schedule(Event::for_patient(sim.now(), EventKind::Treated, p(0)));
        sim.step().unwrap();
        assert_eq!(color_of(&sim, 0), Color::White);
        assert_eq!(sim.free_rooms(), 0);
        assert_eq!(sim.outcome().treated, 0);
    }

    #[test]
    fn patient_event_without_patient_errors() {
        let mut sim = SimBuilder::new().patients(0).build().unwrap();
        sim.schedule(Event::global(sim.now(), EventKind::Timeout));
        assert_eq!(
            sim.step(),
            Err(SimError::MissingPatient { kind: EventKind::Timeout })
        );
    }

    #[test]
    fn unknown_patient_errors() {
        let mut sim = SimBuilder::new().patients(0).build().unwrap();
        sim.schedule(Event::for_patient(sim.now(), EventKind::Arrival, p(99)));
        assert_eq!(sim.step(), Err(SimError::PatientNotFound(p(99))));
    }

    #[test]
    fn past_event_is_moved_up_to_now() {
        let mut sim = SimBuilder::new().rooms(0).patients(1).build().unwrap();
        sim.run_until(at(8, 5), &mut NoopObserver).unwrap();
        assert_eq!(sim.now(), at(8, 5));

        sim.schedule(Event::global(at(7, 0), EventKind::FreeStudio));
        assert_eq!(
            sim.pending_events().next(),
            Some(&Event::global(at(8, 5), EventKind::FreeStudio))
        );
        assert_eq!(sim.step().unwrap(), Some(Event::global(at(8, 5), EventKind::FreeStudio)));
        assert_eq!(sim.now(), at(8, 5));

        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.rows.iter().all(|r| r.0 >= at(8, 5)));
    }
}
