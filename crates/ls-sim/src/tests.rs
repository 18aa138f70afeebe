//! Integration tests for ls-sim.

#[cfg(test)]
mod helpers {
    use ls_core::{LaneId, Placement, SimConfig, Tick, Vec3, VehicleId};
    use ls_network::{CubicBezier, LaneNetwork, LaneNetworkBuilder};
    use ls_signal::{LightColor, PhaseChange, SignalSystemBuilder};

    use crate::{Incident, SimObserver, StatsSnapshot, TickSummary, TrafficConfig};

    pub struct Cross {
        pub inbound:  [LaneId; 4],
        pub outbound: [LaneId; 4],
        /// Turn lanes leaving each inbound lane.
        pub turns:    [Vec<LaneId>; 4],
    }

    /// A four-arm intersection whose exits loop back to the next arm's
    /// entry, so every lane reaches every other.
    pub fn cross() -> (LaneNetwork, Cross) {
        let dirs = [Vec3::Z, Vec3::X, -Vec3::Z, -Vec3::X];
        let side = |d: Vec3| Vec3::new(d.z, 0.0, -d.x) * 2.0;
        let mut b = LaneNetworkBuilder::new();

        let inbound: Vec<LaneId> = dirs
            .iter()
            .enumerate()
            .map(|(i, &d)| b.add_lane(format!("in{i}"), CubicBezier::line(d * 40.0 + side(d), d * 8.0 + side(d)), Placement::IDENTITY))
            .collect();
        let outbound: Vec<LaneId> = dirs
            .iter()
            .enumerate()
            .map(|(i, &d)| b.add_lane(format!("out{i}"), CubicBezier::line(d * 8.0 - side(d), d * 40.0 - side(d)), Placement::IDENTITY))
            .collect();

        let mut turns: [Vec<LaneId>; 4] = Default::default();
        for (i, &di) in dirs.iter().enumerate() {
            for (j, &dj) in dirs.iter().enumerate() {
                if i == j {
                    continue;
                }
                let a = di * 8.0 + side(di);
                let c = dj * 8.0 - side(dj);
                let turn = b.add_turn_lane(
                    format!("turn{i}{j}"),
                    CubicBezier::new(a, a - di * 4.0, c - dj * 4.0, c),
                    Placement::IDENTITY,
                );
                b.connect(inbound[i], turn);
                b.connect(turn, outbound[j]);
                turns[i].push(turn);
            }
        }
        for i in 0..4 {
            let (di, dn) = (dirs[i], dirs[(i + 1) % 4]);
            let from = di * 40.0 - side(di);
            let to = dn * 40.0 + side(dn);
            let ret = b.add_lane(
                format!("ret{i}"),
                CubicBezier::new(from, from + di * 10.0, to + dn * 10.0, to),
                Placement::IDENTITY,
            );
            b.connect(outbound[i], ret);
            b.connect(ret, inbound[(i + 1) % 4]);
        }

        let net = b.build().unwrap();
        let cross = Cross {
            inbound:  [inbound[0], inbound[1], inbound[2], inbound[3]],
            outbound: [outbound[0], outbound[1], outbound[2], outbound[3]],
            turns,
        };
        (net, cross)
    }

    /// One controller, one group per approach.
    pub fn signals(config: &TrafficConfig, cross: &Cross) -> SignalSystemBuilder {
        let mut s = config.signal_builder();
        let c = s.add_controller("centre");
        for (i, turns) in cross.turns.iter().enumerate() {
            s.add_group(c, format!("approach{i}"), turns.iter().copied(), 1).unwrap();
        }
        s
    }

    pub fn config(vehicles: usize, ticks: u64) -> TrafficConfig {
        TrafficConfig {
            sim: SimConfig { total_ticks: ticks, num_threads: Some(1), ..SimConfig::default() },
            vehicle_count: vehicles,
            ..TrafficConfig::default()
        }
    }

    /// Records everything it is told.
    #[derive(Default)]
    pub struct Recorder {
        pub tick_starts: u64,
        pub tick_ends:   u64,
        pub snapshots:   u64,
        pub ends:        u64,
        pub completions: Vec<(Tick, VehicleId, f32)>,
        pub phases:      Vec<(Tick, PhaseChange)>,
        pub incidents:   Vec<(Tick, Incident)>,
        pub last:        Option<TickSummary>,
        pub final_stats: Option<StatsSnapshot>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.tick_starts += 1;
        }
        fn on_completion(&mut self, tick: Tick, vehicle: VehicleId, wait_secs: f32) {
            self.completions.push((tick, vehicle, wait_secs));
        }
        fn on_phase_change(&mut self, tick: Tick, change: &PhaseChange) {
            self.phases.push((tick, *change));
        }
        fn on_incident(&mut self, tick: Tick, incident: &Incident) {
            self.incidents.push((tick, *incident));
        }
        fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
            self.tick_ends += 1;
            self.last = Some(*summary);
        }
        fn on_snapshot(&mut self, _: Tick, _: &ls_vehicle::VehicleStore, _: &LaneNetwork) {
            self.snapshots += 1;
        }
        fn on_sim_end(&mut self, _tick: Tick, stats: &StatsSnapshot) {
            self.ends += 1;
            self.final_stats = Some(*stats);
        }
    }

    pub fn greens(rec: &Recorder) -> impl Iterator<Item = &(Tick, PhaseChange)> {
        rec.phases.iter().filter(|(_, c)| c.color == LightColor::Green)
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use ls_core::{LaneId, SimConfig};
    use ls_network::AStarRouter;
    use ls_signal::SignalError;
    use ls_vehicle::VehicleError;

    use super::helpers::*;
    use crate::{IncidentConfig, Parked, SimBuilder, SimError, TrafficConfig};

    #[test]
    fn builds_with_defaults() {
        let (net, _) = cross();
        let sim = SimBuilder::new(config(0, 10), net, AStarRouter, Parked).build().unwrap();
        assert!(sim.traffic.store.is_empty());
        assert!(sim.signals.is_empty());
    }

    #[test]
    fn initial_lane_count_mismatch_errors() {
        let (net, c) = cross();
        let result = SimBuilder::new(config(3, 10), net, AStarRouter, Parked)
            .initial_lanes(vec![Some((c.inbound[0], 0.0)); 2])
            .build();
        assert!(matches!(result, Err(SimError::VehicleCountMismatch { expected: 3, got: 2, .. })));
    }

    #[test]
    fn destination_count_mismatch_errors() {
        let (net, _) = cross();
        let result = SimBuilder::new(config(1, 10), net, AStarRouter, Parked)
            .destinations(vec![None, None])
            .build();
        assert!(matches!(result, Err(SimError::VehicleCountMismatch { what: "destinations", .. })));
    }

    #[test]
    fn bad_config_is_rejected() {
        let (net, _) = cross();
        let cfg = TrafficConfig { sim: SimConfig { tick_secs: 0.0, ..SimConfig::default() }, ..TrafficConfig::default() };
        assert!(matches!(SimBuilder::new(cfg, net, AStarRouter, Parked).build(), Err(SimError::Core(_))));

        let (net, _) = cross();
        let cfg = TrafficConfig {
            incidents: IncidentConfig { chance: 2.0, ..IncidentConfig::default() },
            ..TrafficConfig::default()
        };
        assert!(matches!(SimBuilder::new(cfg, net, AStarRouter, Parked).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn signal_errors_propagate() {
        let (net, c) = cross();
        let cfg = config(0, 10);
        let mut s = cfg.signal_builder();
        let id = s.add_controller("x");
        s.add_group(id, "a", c.turns[0].clone(), 1).unwrap();
        s.add_group(id, "b", c.turns[0].clone(), 1).unwrap();
        let result = SimBuilder::new(cfg, net, AStarRouter, Parked).signals(s).build();
        assert!(matches!(result, Err(SimError::Signal(SignalError::LaneInTwoGroups { .. }))));
    }

    #[test]
    fn placement_errors_propagate() {
        let (net, _) = cross();
        let result = SimBuilder::new(config(1, 10), net, AStarRouter, Parked)
            .initial_lanes(vec![Some((LaneId(999), 0.0))])
            .build();
        assert!(matches!(result, Err(SimError::Vehicle(VehicleError::Network(_)))));
    }

    #[test]
    fn explicit_placement_and_destination() {
        let (net, c) = cross();
        let sim = SimBuilder::new(config(2, 10), net, AStarRouter, Parked)
            .initial_lanes(vec![Some((c.inbound[0], 0.5)), None])
            .destinations(vec![Some(c.outbound[2]), Some(c.outbound[1])])
            .build()
            .unwrap();
        let v0 = &sim.traffic.store.vehicles[0];
        assert_eq!(v0.lane, c.inbound[0]);
        assert_eq!(v0.route.first(), Some(&c.inbound[0]));
        assert_eq!(v0.route.last(), Some(&c.outbound[2]));
        // Unplaced vehicles are skipped, not an error.
        assert!(sim.traffic.store.vehicles[1].is_inert());
    }

    #[test]
    fn random_fleet_places_every_vehicle() {
        let (net, _) = cross();
        let sim = SimBuilder::new(config(25, 10), net, AStarRouter, Parked)
            .random_fleet()
            .build()
            .unwrap();
        for v in sim.traffic.store.iter() {
            assert!(!v.is_inert());
            assert!((0.0..=1.0).contains(&v.t));
            let dest = v.destination.unwrap();
            assert_ne!(dest, v.lane);
            assert_eq!(v.route.last(), Some(&dest));
        }
        sim.network.check_occupancy().unwrap();
        let listed: usize = sim.network.lanes().iter().map(|l| l.occupant_count()).sum();
        assert_eq!(listed, 25);
    }
}

// ── Basic run ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use ls_core::{SimRng, Tick};
    use ls_network::AStarRouter;

    use super::helpers::*;
    use crate::{NoopObserver, Parked, RandomDispatcher, SimBuilder};

    #[test]
    fn runs_to_end_tick() {
        let (net, _) = cross();
        let mut cfg = config(5, 100);
        cfg.sim.output_interval_ticks = 20;
        let mut sim = SimBuilder::new(cfg, net, AStarRouter, Parked).random_fleet().build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.clock.current_tick, Tick(100));
        assert_eq!(rec.tick_starts, 100);
        assert_eq!(rec.tick_ends, 100);
        // Ticks 0, 20, 40, 60, 80.
        assert_eq!(rec.snapshots, 5);
        assert_eq!(rec.ends, 1);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let (net, _) = cross();
        let mut sim = SimBuilder::new(config(0, 5), net, AStarRouter, Parked).build().unwrap();
        sim.run_ticks(12, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(12));
    }

    #[test]
    fn occupancy_invariant_holds_every_tick() {
        let (net, c) = cross();
        let mut cfg = config(40, 0);
        cfg.incidents.enabled = true;
        cfg.incidents.interval_secs = 2.0;
        cfg.incidents.chance = 1.0;
        cfg.incidents.duration_secs = 5.0;
        let sig = signals(&cfg, &c);
        let mut sim = SimBuilder::new(cfg, net, AStarRouter, RandomDispatcher::new(SimRng::new(7)))
            .signals(sig)
            .random_fleet()
            .build()
            .unwrap();

        for _ in 0..3000 {
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            sim.network.check_occupancy().unwrap();
            for v in sim.traffic.store.iter() {
                let listed = sim.network.lane(v.lane).unwrap().occupants.contains(&v.id);
                assert_eq!(listed, v.is_occupying(), "vehicle {}", v.id);
            }
        }
    }

    #[test]
    fn random_dispatch_keeps_traffic_flowing() {
        let (net, c) = cross();
        let cfg = config(20, 4000);
        let sig = signals(&cfg, &c);
        let mut sim = SimBuilder::new(cfg, net, AStarRouter, RandomDispatcher::new(SimRng::new(3)))
            .signals(sig)
            .random_fleet()
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let stats = rec.final_stats.unwrap();
        assert!(stats.completions > 20, "only {} completions", stats.completions);
        assert_eq!(stats.completions as usize, rec.completions.len());
        assert!(stats.throughput_per_min > 0.0);
        assert!(stats.average_wait_secs >= 0.0);
        // Every vehicle is still routed or holding; none got lost.
        assert!(sim.traffic.store.iter().all(|v| v.is_occupying()));
    }

    #[test]
    fn parked_vehicles_leave_the_network_occupants() {
        let (net, c) = cross();
        let mut sim = SimBuilder::new(config(1, 400), net, AStarRouter, Parked)
            .initial_lanes(vec![Some((c.inbound[0], 0.0))])
            .destinations(vec![Some(c.inbound[0])])
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.completions.len(), 1);
        assert_eq!(sim.network.occupant_count(c.inbound[0]), 0);
        assert!(!sim.traffic.store.vehicles[0].is_occupying());
    }

    #[test]
    fn same_seed_same_result() {
        let run = || {
            let (net, c) = cross();
            let cfg = config(30, 1500);
            let sig = signals(&cfg, &c);
            let mut sim = SimBuilder::new(cfg, net, AStarRouter, RandomDispatcher::new(SimRng::new(11)))
                .signals(sig)
                .random_fleet()
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap();
            let positions: Vec<_> = sim.traffic.store.iter().map(|v| (v.lane, v.t)).collect();
            (sim.stats_snapshot(), positions)
        };
        assert_eq!(run(), run());
    }
}

// ── Signals inside the sim ────────────────────────────────────────────────────

#[cfg(test)]
mod signal_tests {
    use ls_core::SimRng;
    use ls_network::AStarRouter;
    use ls_signal::{LightColor, SignalPolicy};

    use super::helpers::*;
    use crate::{NoopObserver, RandomDispatcher, SimBuilder};

    #[test]
    fn at_most_one_green_per_controller() {
        let (net, c) = cross();
        let cfg = config(30, 3000);
        let sig = signals(&cfg, &c);
        let mut sim = SimBuilder::new(cfg, net, AStarRouter, RandomDispatcher::new(SimRng::new(5)))
            .signals(sig)
            .random_fleet()
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(greens(&rec).count() > 3);
        let mut active: Option<usize> = None;
        for (_, change) in &rec.phases {
            match change.color {
                LightColor::Green => {
                    assert!(active.is_none(), "second Green while group {active:?} active");
                    active = Some(change.group);
                }
                LightColor::Yellow => assert_eq!(active, Some(change.group)),
                LightColor::Red => {
                    assert_eq!(active, Some(change.group));
                    active = None;
                }
            }
        }
    }

    #[test]
    fn vehicles_never_enter_a_red_turn() {
        let (net, c) = cross();
        let cfg = config(30, 2000);
        let sig = signals(&cfg, &c);
        let mut sim = SimBuilder::new(cfg, net, AStarRouter, RandomDispatcher::new(SimRng::new(9)))
            .signals(sig)
            .random_fleet()
            .build()
            .unwrap();

        let mut prev: Vec<_> = sim.traffic.store.iter().map(|v| v.lane).collect();
        for _ in 0..2000 {
            // Signals update before motion, so the flag seen here is the one
            // the vehicle was checked against.
            sim.run_ticks(1, &mut NoopObserver).unwrap();
            for v in sim.traffic.store.iter() {
                let was = prev[v.id.index()];
                if v.lane != was && c.turns.iter().any(|t| t.contains(&v.lane)) {
                    assert!(!sim.network.lane(v.lane).unwrap().stop_signal, "{} entered a red turn", v.id);
                }
                prev[v.id.index()] = v.lane;
            }
        }
    }

    #[test]
    fn set_policy_resets_statistics() {
        let (net, c) = cross();
        let cfg = config(20, 0);
        let sig = signals(&cfg, &c);
        let mut sim = SimBuilder::new(cfg, net, AStarRouter, RandomDispatcher::new(SimRng::new(1)))
            .signals(sig)
            .random_fleet()
            .build()
            .unwrap();
        sim.run_ticks(2000, &mut NoopObserver).unwrap();
        assert!(sim.stats.completions() > 0);

        sim.set_policy(SignalPolicy::FixedCycle);
        let s = sim.stats_snapshot();
        assert_eq!(s.completions, 0);
        assert_eq!(s.max_wait_secs, 0.0);
        assert_eq!(s.wasted_green_secs, 0.0);
        assert!(sim.signals.controllers().iter().all(|c| c.policy() == SignalPolicy::FixedCycle));
        assert!(sim.signals.controllers().iter().all(|c| c.green_group().is_none()));
    }
}

// ── TrafficStats ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use ls_signal::SignalSystem;
    use ls_vehicle::VehicleStore;

    use crate::TrafficStats;

    #[test]
    fn throughput_and_average() {
        let mut s = TrafficStats::default();
        assert_eq!(s.throughput_per_min(0.0), 0.0);
        assert_eq!(s.average_wait_secs(), 0.0);

        s.record_completion(4.0);
        s.record_completion(2.0);
        s.record_completion(0.0);
        assert_eq!(s.completions(), 3);
        assert!((s.average_wait_secs() - 2.0).abs() < 1e-9);
        // Three cars in 30 s: 6 per minute.
        assert!((s.throughput_per_min(30.0) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restarts_the_clock() {
        let mut s = TrafficStats::default();
        s.record_completion(10.0);
        s.reset(60.0);
        assert_eq!(s.completions(), 0);
        assert_eq!(s.average_wait_secs(), 0.0);
        s.record_completion(1.0);
        assert!((s.throughput_per_min(90.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reads_live_state() {
        let mut store = VehicleStore::new(2);
        store.vehicles[0].wait.total = 3.0;
        store.vehicles[1].wait.total = 8.0;
        let mut s = TrafficStats::default();
        s.record_completion(5.0);
        let snap = s.snapshot(60.0, &store, &SignalSystem::empty());
        assert_eq!(snap.completions, 1);
        assert_eq!(snap.max_wait_secs, 8.0);
        assert_eq!(snap.wasted_green_secs, 0.0);
        assert!((snap.throughput_per_min - 1.0).abs() < 1e-9);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use ls_core::{Placement, SimRng, Vec3, VehicleId};
    use ls_network::{CubicBezier, LaneNetworkBuilder};

    use super::helpers::*;
    use crate::{Dispatcher, RandomDispatcher, random_destination};

    #[test]
    fn never_picks_the_current_lane() {
        let (net, c) = cross();
        let mut rng = SimRng::new(1);
        for _ in 0..200 {
            let d = random_destination(&mut rng, &net, c.inbound[0]).unwrap();
            assert_ne!(d, c.inbound[0]);
            assert!(net.is_open(d));
        }
    }

    #[test]
    fn skips_closed_lanes() {
        let (mut net, c) = cross();
        for lane in net.lane_ids().collect::<Vec<_>>() {
            if lane != c.outbound[1] && lane != c.inbound[0] {
                net.set_closed(lane, true).unwrap();
            }
        }
        let mut d = RandomDispatcher::new(SimRng::new(2));
        for _ in 0..20 {
            assert_eq!(d.next_destination(VehicleId(0), c.inbound[0], &net), Some(c.outbound[1]));
        }
    }

    #[test]
    fn single_lane_returns_itself() {
        let mut b = LaneNetworkBuilder::new();
        let only = b.add_lane("only", CubicBezier::line(Vec3::ZERO, Vec3::Z * 10.0), Placement::IDENTITY);
        let net = b.build().unwrap();
        let mut rng = SimRng::new(3);
        assert_eq!(random_destination(&mut rng, &net, only), Some(only));
    }
}

// ── Incidents ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod incident_tests {
    use ls_core::SimRng;

    use super::helpers::*;
    use crate::{Incident, IncidentConfig, IncidentScheduler};

    const DT: f32 = 0.05;

    fn run(s: &mut IncidentScheduler, net: &mut ls_network::LaneNetwork, ticks: usize) -> Vec<(usize, Incident)> {
        let mut events = Vec::new();
        for tick in 0..ticks {
            let mut out = Vec::new();
            s.update(DT, net, &mut out).unwrap();
            events.extend(out.into_iter().map(|i| (tick, i)));
        }
        events
    }

    #[test]
    fn disabled_scheduler_never_closes() {
        let (mut net, _) = cross();
        let mut s = IncidentScheduler::new(IncidentConfig::default(), SimRng::new(1));
        assert!(run(&mut s, &mut net, 2000).is_empty());
        assert!(net.lanes().iter().all(|l| !l.closed));
    }

    #[test]
    fn closes_then_reopens() {
        let (mut net, _) = cross();
        let cfg = IncidentConfig { enabled: true, interval_secs: 1.0, chance: 1.0, duration_secs: 2.0 };
        let mut s = IncidentScheduler::new(cfg, SimRng::new(4));

        let events = run(&mut s, &mut net, 25);
        assert_eq!(events.len(), 1);
        let (closed_at, first) = events[0];
        assert!(first.closed);
        assert!((18..=20).contains(&closed_at), "closed at tick {closed_at}");
        assert!(net.lane(first.lane).unwrap().closed);
        assert!(s.is_active(first.lane));

        let events = run(&mut s, &mut net, 60);
        let reopened = events.iter().find(|(_, i)| !i.closed && i.lane == first.lane);
        let (at, _) = reopened.expect("lane never reopened");
        // 2 s after closing, counted from the second run's start.
        let at = at + 25;
        assert!((closed_at + 39..=closed_at + 41).contains(&at), "reopened at tick {at}");
        assert!(!net.lane(first.lane).unwrap().closed);
    }

    #[test]
    fn zero_chance_never_closes() {
        let (mut net, _) = cross();
        let cfg = IncidentConfig { enabled: true, interval_secs: 0.5, chance: 0.0, duration_secs: 2.0 };
        let mut s = IncidentScheduler::new(cfg, SimRng::new(4));
        assert!(run(&mut s, &mut net, 500).is_empty());
        assert!(s.active_lanes().is_empty());
    }
}

// ── JSON config ───────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod config_json_tests {
    use ls_core::SimConfig;
    use ls_signal::SignalTiming;
    use ls_vehicle::VehicleParams;

    use crate::TrafficConfig;

    #[test]
    fn partial_sections_take_defaults() {
        let json = r#"{
            "vehicle_count": 7,
            "sim":     { "total_ticks": 100, "seed": 9 },
            "vehicle": { "max_speed": 12.0 },
            "timing":  { "yellow_secs": 2.5 }
        }"#;
        let cfg: TrafficConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.vehicle_count, 7);

        assert_eq!(cfg.sim.total_ticks, 100);
        assert_eq!(cfg.sim.seed, 9);
        assert_eq!(cfg.sim.tick_secs, SimConfig::default().tick_secs);
        assert_eq!(cfg.sim.output_interval_ticks, SimConfig::default().output_interval_ticks);

        assert_eq!(cfg.vehicle.max_speed, 12.0);
        assert_eq!(cfg.vehicle.override_secs, VehicleParams::default().override_secs);
        assert_eq!(cfg.timing.yellow_secs, 2.5);
        assert_eq!(cfg.timing.min_green_secs, SignalTiming::default().min_green_secs);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_object_is_the_default() {
        let cfg: TrafficConfig = serde_json::from_str("{}").unwrap();
        let def = TrafficConfig::default();
        assert_eq!(cfg.sim.total_ticks, def.sim.total_ticks);
        assert_eq!(cfg.incidents, def.incidents);
        assert_eq!(cfg.startup_offset_max_secs, def.startup_offset_max_secs);
    }
}
