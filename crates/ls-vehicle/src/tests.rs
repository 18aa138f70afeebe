//! Unit tests for ls-vehicle.
//!
//! Networks are straight lanes along +Z built by hand; the default tick is
//! 0.05 s.

#[cfg(test)]
mod helpers {
    use ls_core::{LaneId, Placement, Vec3};
    use ls_network::{AStarRouter, CubicBezier, LaneNetwork, LaneNetworkBuilder};

    use crate::{Step, TrafficEngine, VehicleParams};

    pub const DT: f32 = 0.05;

    pub fn straight(b: &mut LaneNetworkBuilder, name: &str, x: f32, z0: f32, z1: f32) -> LaneId {
        b.add_lane(
            name,
            CubicBezier::line(Vec3::new(x, 0.0, z0), Vec3::new(x, 0.0, z1)),
            Placement::IDENTITY,
        )
    }

    /// Three 20 m lanes end to end: 0 → 1 → 2.
    pub fn chain() -> (LaneNetwork, [LaneId; 3]) {
        let mut b = LaneNetworkBuilder::new();
        let l0 = straight(&mut b, "a", 0.0, 0.0, 20.0);
        let l1 = straight(&mut b, "b", 0.0, 20.0, 40.0);
        let l2 = straight(&mut b, "c", 0.0, 40.0, 60.0);
        b.connect(l0, l1);
        b.connect(l1, l2);
        (b.build().unwrap(), [l0, l1, l2])
    }

    /// Chain plus a bypass 4 m to the right reachable from lane 0 by a
    /// lane change: 0 → 1 → 2 and 0 ⇢ 3 → 4 → 2.
    pub fn with_bypass() -> (LaneNetwork, [LaneId; 5]) {
        let mut b = LaneNetworkBuilder::new();
        let l0 = straight(&mut b, "a", 0.0, 0.0, 20.0);
        let l1 = straight(&mut b, "b", 0.0, 20.0, 40.0);
        let l2 = straight(&mut b, "c", 0.0, 40.0, 60.0);
        let l3 = straight(&mut b, "a_r", 4.0, 0.0, 20.0);
        let l4 = straight(&mut b, "b_r", 4.0, 20.0, 40.0);
        b.connect(l0, l1);
        b.connect(l1, l2);
        b.connect(l3, l4);
        b.connect(l4, l2);
        b.set_neighbors(l0, None, Some(l3));
        (b.build().unwrap(), [l0, l1, l2, l3, l4])
    }

    /// Four 20 m lanes around a square, each feeding the next.
    pub fn ring() -> (LaneNetwork, [LaneId; 4]) {
        let c = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, 0.0),
        ];
        let mut b = LaneNetworkBuilder::new();
        let ids: Vec<LaneId> = (0..4)
            .map(|i| b.add_lane(format!("r{i}"), CubicBezier::line(c[i], c[(i + 1) % 4]), Placement::IDENTITY))
            .collect();
        for i in 0..4 {
            b.connect(ids[i], ids[(i + 1) % 4]);
        }
        (b.build().unwrap(), [ids[0], ids[1], ids[2], ids[3]])
    }

    pub fn engine(vehicles: usize) -> TrafficEngine<AStarRouter> {
        TrafficEngine::new(AStarRouter, VehicleParams::default(), vehicles).unwrap()
    }

    /// Run `ticks` ticks and collect every non-idle step.
    pub fn run(e: &mut TrafficEngine<AStarRouter>, net: &mut LaneNetwork, ticks: usize) -> Vec<Step> {
        let mut all = Vec::new();
        for _ in 0..ticks {
            all.extend(e.step(net, DT).unwrap());
        }
        all
    }
}

// ── WaitTracker ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tracker {
    use crate::WaitTracker;

    #[test]
    fn stopped_time_accrues_everywhere() {
        let mut w = WaitTracker::default();
        w.observe(1.0, 0.0, 15.0);
        w.observe(1.0, 0.0, 15.0);
        assert_eq!(w.current, 2.0);
        assert_eq!(w.total, 2.0);
        assert_eq!(w.accumulated, 2.0);
    }

    #[test]
    fn moving_resets_current_only() {
        let mut w = WaitTracker::default();
        w.observe(3.0, 0.0, 15.0);
        w.observe(1.0, 10.0, 15.0);
        assert_eq!(w.current, 0.0);
        assert_eq!(w.total, 3.0);
        assert_eq!(w.accumulated, 3.0);
    }

    #[test]
    fn crawling_counts_as_queued_but_not_waiting() {
        let mut w = WaitTracker::default();
        w.observe(1.0, 0.3, 15.0);
        assert_eq!(w.current, 1.0);
        assert_eq!(w.accumulated, 0.0);
    }

    #[test]
    fn parked_vehicle_accumulates_nothing() {
        let mut w = WaitTracker::default();
        w.observe(1.0, 0.0, 0.0);
        assert_eq!(w.accumulated, 0.0);
        assert_eq!(w.total, 1.0);
    }

    #[test]
    fn take_and_reset() {
        let mut w = WaitTracker::default();
        w.observe(2.0, 0.0, 15.0);
        assert_eq!(w.take_accumulated(), 2.0);
        assert_eq!(w.accumulated, 0.0);

        w.observe(1.0, 0.0, 15.0);
        w.reset();
        assert_eq!(w.current, 0.0);
        assert_eq!(w.total, 0.0);
        assert_eq!(w.accumulated, 1.0);
    }
}

// ── VehicleParams ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod params {
    use crate::{VehicleError, VehicleParams};

    #[test]
    fn defaults() {
        let p = VehicleParams::default();
        assert_eq!(p.max_speed, 15.0);
        assert_eq!(p.rotation_speed, 5.0);
        assert_eq!(p.detection_distance, 10.0);
        assert_eq!(p.stopping_distance, 3.0);
        assert_eq!(p.stuck_secs(true), 10.0);
        assert_eq!(p.stuck_secs(false), 50.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn damping_is_linear_between_distances() {
        let p = VehicleParams::default();
        assert_eq!(p.damped_speed(15.0, 10.0), 15.0);
        assert_eq!(p.damped_speed(15.0, 25.0), 15.0);
        assert_eq!(p.damped_speed(15.0, 3.0), 0.0);
        assert_eq!(p.damped_speed(15.0, 1.0), 0.0);
        assert!((p.damped_speed(15.0, 6.5) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let p = VehicleParams { max_speed: -1.0, ..VehicleParams::default() };
        assert!(matches!(p.validate(), Err(VehicleError::InvalidParams(_))));

        let p = VehicleParams { override_secs: f32::NAN, ..VehicleParams::default() };
        assert!(p.validate().is_err());

        let p = VehicleParams { stopping_distance: 12.0, ..VehicleParams::default() };
        assert!(p.validate().is_err());
    }
}

// ── AvoidanceIndex ────────────────────────────────────────────────────────────

#[cfg(test)]
mod avoidance {
    use ls_core::{LaneId, Vec3, VehicleId};

    use crate::{AvoidanceIndex, Vehicle};

    fn at(id: u32, pos: Vec3) -> Vehicle {
        let mut v = Vehicle::unplaced(VehicleId(id));
        v.lane = LaneId(0);
        v.position = pos;
        v
    }

    fn index() -> AvoidanceIndex {
        AvoidanceIndex::build(&[
            at(0, Vec3::ZERO),
            at(1, Vec3::new(0.0, 0.0, 6.0)),
            at(2, Vec3::new(0.0, 0.0, 4.0)),
            at(3, Vec3::new(3.0, 0.0, 2.0)),
            at(4, Vec3::new(0.0, 0.0, -2.0)),
        ])
    }

    #[test]
    fn nearest_vehicle_on_the_ray() {
        let d = index().nearest_ahead(VehicleId(0), Vec3::ZERO, Vec3::Z, 10.0, 1.25);
        assert_eq!(d, Some(4.0));
    }

    #[test]
    fn ignores_self_behind_and_off_axis() {
        let idx = index();
        // Facing -Z only vehicle 4 is ahead.
        assert_eq!(idx.nearest_ahead(VehicleId(0), Vec3::ZERO, -Vec3::Z, 10.0, 1.25), Some(2.0));
        // Facing +X nothing is within the half width.
        assert_eq!(idx.nearest_ahead(VehicleId(0), Vec3::ZERO, Vec3::X, 10.0, 1.25), None);
    }

    #[test]
    fn respects_range() {
        let d = index().nearest_ahead(VehicleId(0), Vec3::ZERO, Vec3::Z, 3.0, 1.25);
        assert_eq!(d, None);
    }

    #[test]
    fn unplaced_vehicles_are_not_indexed() {
        let idx = AvoidanceIndex::build(&[Vehicle::unplaced(VehicleId(0)), at(1, Vec3::ZERO)]);
        assert_eq!(idx.len(), 1);
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use ls_core::{Placement, Vec3, VehicleId};
    use ls_network::{CubicBezier, LaneNetworkBuilder};

    use super::helpers::*;
    use crate::MotionState;

    #[test]
    fn lone_vehicle_crosses_lane_at_max_speed() {
        let (mut net, [l0, ..]) = chain();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.0).unwrap();
        e.assign_destination(&mut net, v, l0).unwrap();

        let mut ticks = 0;
        let arrived = loop {
            ticks += 1;
            let steps = e.step(&mut net, DT).unwrap();
            if steps.iter().any(|s| s.arrived.is_some()) {
                break true;
            }
            if ticks > 1000 {
                break false;
            }
        };
        assert!(arrived);
        // 20 m at 15 m/s.
        let secs = ticks as f32 * DT;
        assert!((secs - 20.0 / 15.0).abs() <= DT, "took {secs} s");
        assert_eq!(e.store.vehicles[0].t, 1.0);
    }

    #[test]
    fn position_tracks_the_curve_and_faces_along_it() {
        let (mut net, [l0, ..]) = chain();
        let mut e = engine(1);
        e.place(&mut net, VehicleId(0), l0, 0.25).unwrap();
        let v = &e.store.vehicles[0];
        assert!((v.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert!((v.rotation * Vec3::Z - Vec3::Z).length() < 1e-4);

        run(&mut e, &mut net, 4);
        let v = &e.store.vehicles[0];
        assert_eq!(v.position, net.point(l0, v.t).unwrap());
    }

    #[test]
    fn traverses_chain_and_arrives_once() {
        let (mut net, [l0, l1, l2]) = chain();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.0).unwrap();
        assert!(e.assign_destination(&mut net, v, l2).unwrap());
        assert_eq!(e.store.vehicles[0].route, vec![l0, l1, l2]);

        let steps = run(&mut e, &mut net, 200);
        let entered: Vec<_> = steps.iter().filter_map(|s| s.enter).collect();
        assert_eq!(entered, vec![l1, l2]);
        let arrivals: Vec<_> = steps.iter().filter_map(|s| s.arrived).collect();
        assert_eq!(arrivals, vec![l2]);
        // Plain lanes flush nothing until the destination.
        assert_eq!(steps.iter().filter(|s| s.completion.is_some()).count(), 1);

        // Arrived vehicles leave the occupant lists and hold quietly.
        assert_eq!(net.occupant_count(l2), 0);
        assert!(!e.store.vehicles[0].is_occupying());
        assert!(run(&mut e, &mut net, 50).is_empty());
        // Parked, not queued.
        let veh = &e.store.vehicles[0];
        assert_eq!(veh.speed, 0.0);
        assert_eq!(veh.wait.accumulated, 0.0);
    }

    #[test]
    fn intersection_departure_flushes_wait() {
        let mut b = LaneNetworkBuilder::new();
        let a = straight(&mut b, "in", 0.0, 0.0, 20.0);
        let turn = b.add_turn_lane(
            "turn",
            CubicBezier::line(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, 30.0)),
            Placement::IDENTITY,
        );
        let c = straight(&mut b, "out", 0.0, 30.0, 50.0);
        b.connect(a, turn);
        b.connect(turn, c);
        let mut net = b.build().unwrap();

        let mut e = engine(1);
        e.place(&mut net, VehicleId(0), a, 0.0).unwrap();
        e.assign_destination(&mut net, VehicleId(0), c).unwrap();
        let steps = run(&mut e, &mut net, 200);

        let completions: Vec<_> = steps.iter().filter(|s| s.completion.is_some()).collect();
        assert_eq!(completions.len(), 2);
        assert_eq!(completions[0].leave, Some(turn));
        assert_eq!(completions[1].arrived, Some(c));
    }

    #[test]
    fn red_next_lane_stops_vehicle_near_the_end() {
        let (mut net, [l0, l1, l2]) = chain();
        net.set_stop_signal(l1, true).unwrap();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.0).unwrap();
        e.assign_destination(&mut net, v, l2).unwrap();

        let steps = run(&mut e, &mut net, 200);
        assert!(steps.is_empty());
        let veh = &e.store.vehicles[0];
        assert_eq!(veh.lane, l0);
        assert!(veh.t >= 0.8 && veh.t < 1.0, "t = {}", veh.t);
        assert_eq!(veh.state, MotionState::BlockedAtSignal);
        assert_eq!(veh.speed, 0.0);
        assert!(veh.wait.current > 5.0);

        net.set_stop_signal(l1, false).unwrap();
        let steps = run(&mut e, &mut net, 20);
        assert_eq!(steps.iter().filter_map(|s| s.enter).next(), Some(l1));
        assert_eq!(e.store.vehicles[0].wait.current, 0.0);
    }

    #[test]
    fn closed_next_lane_triggers_detour() {
        let (mut net, [l0, l1, l2, l3, l4]) = with_bypass();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.5).unwrap();
        e.assign_destination(&mut net, v, l2).unwrap();
        assert_eq!(e.store.vehicles[0].route, vec![l0, l1, l2]);

        net.set_closed(l1, true).unwrap();
        let steps = run(&mut e, &mut net, 300);

        let entered: Vec<_> = steps.iter().filter_map(|s| s.enter).collect();
        assert_eq!(entered, vec![l3, l4, l2]);
        assert_eq!(steps.iter().filter_map(|s| s.arrived).count(), 1);
    }

    #[test]
    fn unreachable_destination_holds_without_events() {
        let mut b = LaneNetworkBuilder::new();
        let a = straight(&mut b, "a", 0.0, 0.0, 20.0);
        let island = straight(&mut b, "island", 50.0, 0.0, 20.0);
        let mut net = b.build().unwrap();

        let mut e = engine(1);
        e.place(&mut net, VehicleId(0), a, 0.0).unwrap();
        assert!(!e.assign_destination(&mut net, VehicleId(0), island).unwrap());

        assert!(run(&mut e, &mut net, 100).is_empty());
        let v = &e.store.vehicles[0];
        assert_eq!(v.t, 1.0);
        assert_eq!(v.lane, a);
        assert!(v.route.is_empty());
        assert_eq!(net.occupant_count(a), 1);
        assert_eq!(v.speed, 0.0);
        assert!(v.wait.current > 3.0, "current = {}", v.wait.current);
    }

    #[test]
    fn held_at_closed_lane_without_detour_accrues_wait() {
        let (mut net, [l0, l1, l2]) = chain();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.0).unwrap();
        assert!(e.assign_destination(&mut net, v, l2).unwrap());
        net.set_closed(l1, true).unwrap();

        // 20 s; the lane end is reached after about 1.3 s.
        assert!(run(&mut e, &mut net, 400).is_empty());
        let veh = &e.store.vehicles[0];
        assert_eq!((veh.lane, veh.t), (l0, 1.0));
        assert_eq!(veh.speed, 0.0);
        assert!(veh.wait.current > 18.0, "current = {}", veh.wait.current);
        assert!(veh.wait.total > 18.0, "total = {}", veh.wait.total);
        assert!(veh.wait.accumulated > 18.0, "accumulated = {}", veh.wait.accumulated);
        assert_eq!(e.store.stopped_count(), 1);

        // Reopening lets it go and charges the hold to the arrival.
        net.set_closed(l1, false).unwrap();
        let steps = run(&mut e, &mut net, 200);
        let flushed: Vec<_> = steps.iter().filter_map(|s| s.completion).collect();
        assert_eq!(flushed.len(), 1);
        assert!(flushed[0] > 18.0, "flushed {}", flushed[0]);
    }

    #[test]
    fn long_red_never_triggers_override() {
        let (mut net, [l0, l1, l2]) = chain();
        net.set_stop_signal(l1, true).unwrap();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.0).unwrap();
        e.assign_destination(&mut net, v, l2).unwrap();

        // 70 s, well past the 50 s road threshold.
        let mut prev = 0.0;
        for _ in 0..1400 {
            e.step(&mut net, DT).unwrap();
            let veh = &e.store.vehicles[0];
            assert_ne!(veh.state, MotionState::StuckOverride);
            assert!(veh.wait.current >= prev, "queue time reset at {}", veh.wait.current);
            prev = veh.wait.current;
        }
        let veh = &e.store.vehicles[0];
        assert_eq!(veh.state, MotionState::BlockedAtSignal);
        assert_eq!(veh.lane, l0);
        assert!(veh.wait.current > 65.0, "current = {}", veh.wait.current);
        assert_eq!(veh.stuck_secs, 0.0);
    }

    #[test]
    fn follower_keeps_its_distance() {
        let (mut net, [l0, ..]) = chain();
        let mut e = engine(2);
        // Leader ahead at 10 m, follower at 4 m: 6 m apart.
        e.place(&mut net, VehicleId(0), l0, 0.5).unwrap();
        e.place(&mut net, VehicleId(1), l0, 0.2).unwrap();

        e.step(&mut net, DT).unwrap();
        let leader = &e.store.vehicles[0];
        let follower = &e.store.vehicles[1];
        assert_eq!(leader.speed, 15.0);
        assert!(follower.speed > 0.0 && follower.speed < 15.0, "speed = {}", follower.speed);
    }

    #[test]
    fn stuck_vehicle_overrides_within_one_tick() {
        let mut b = LaneNetworkBuilder::new();
        let turn = b.add_turn_lane(
            "turn",
            CubicBezier::line(Vec3::ZERO, Vec3::new(0.0, 0.0, 40.0)),
            Placement::IDENTITY,
        );
        let mut net = b.build().unwrap();

        let mut e = engine(2);
        // Blocker parked at the lane end, the other vehicle 2 m behind it.
        e.place(&mut net, VehicleId(0), turn, 1.0).unwrap();
        e.place(&mut net, VehicleId(1), turn, 0.95).unwrap();

        let mut first_override = None;
        let mut prev_speed = f32::NAN;
        for tick in 1..=400 {
            e.step(&mut net, DT).unwrap();
            let v = &e.store.vehicles[1];
            if v.state == MotionState::StuckOverride {
                first_override = Some((tick, v.speed, prev_speed));
                break;
            }
            prev_speed = v.speed;
        }
        let (tick, speed, before) = first_override.expect("never overrode");
        // 10 s on an intersection lane.
        assert!((199..=201).contains(&tick), "override at tick {tick}");
        assert_eq!(before, 0.0);
        assert_eq!(speed, 15.0);
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use ls_core::{LaneId, VehicleId, WaitSource};
    use ls_network::NetworkError;

    use super::helpers::*;
    use crate::{VehicleError, VehicleStore};

    #[test]
    fn place_rejects_unknown_and_closed_lanes() {
        let (mut net, [l0, l1, _]) = chain();
        let mut e = engine(1);
        let err = e.place(&mut net, VehicleId(0), LaneId(99), 0.0).unwrap_err();
        assert!(matches!(err, VehicleError::Network(NetworkError::LaneNotFound(_))));

        net.set_closed(l1, true).unwrap();
        assert!(matches!(e.place(&mut net, VehicleId(0), l1, 0.0), Err(VehicleError::LaneClosed(_))));

        let err = e.place(&mut net, VehicleId(5), l0, 0.0).unwrap_err();
        assert!(matches!(err, VehicleError::VehicleNotFound(_)));
    }

    #[test]
    fn replacing_moves_occupancy() {
        let (mut net, [l0, l1, _]) = chain();
        let mut e = engine(1);
        e.place(&mut net, VehicleId(0), l0, 0.0).unwrap();
        e.place(&mut net, VehicleId(0), l1, 0.0).unwrap();
        assert_eq!(net.occupant_count(l0), 0);
        assert_eq!(net.occupant_count(l1), 1);
    }

    #[test]
    fn unplaced_vehicle_is_inert() {
        let (mut net, [_, _, l2]) = chain();
        let mut e = engine(2);
        assert_eq!(e.report_unplaced(), 2);
        let err = e.assign_destination(&mut net, VehicleId(1), l2).unwrap_err();
        assert!(matches!(err, VehicleError::NotPlaced(_)));
        assert!(run(&mut e, &mut net, 10).is_empty());
    }

    #[test]
    fn retargeting_after_arrival_rejoins_lane() {
        let (mut net, [l0, l1, l2]) = chain();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, l0, 0.9).unwrap();
        e.assign_destination(&mut net, v, l0).unwrap();
        let steps = run(&mut e, &mut net, 10);
        assert_eq!(steps.iter().filter_map(|s| s.arrived).collect::<Vec<_>>(), vec![l0]);
        assert_eq!(net.occupant_count(l0), 0);

        assert!(e.assign_destination(&mut net, v, l2).unwrap());
        assert_eq!(net.occupant_count(l0), 1);
        let steps = run(&mut e, &mut net, 5);
        assert_eq!(steps.iter().filter_map(|s| s.enter).next(), Some(l1));
    }

    #[test]
    fn retargeting_mid_route_drops_the_old_route() {
        let (mut net, [r0, r1, r2, r3]) = ring();
        let mut e = engine(1);
        let v = VehicleId(0);
        e.place(&mut net, v, r0, 0.0).unwrap();
        e.assign_destination(&mut net, v, r2).unwrap();

        // 1.5 s at 15 m/s: a few metres into r1.
        let steps = run(&mut e, &mut net, 30);
        assert_eq!(steps.iter().filter_map(|s| s.enter).collect::<Vec<_>>(), vec![r1]);
        assert_eq!(e.store.vehicles[0].cursor, 1);

        assert!(e.assign_destination(&mut net, v, r0).unwrap());
        let veh = &e.store.vehicles[0];
        assert_eq!(veh.lane, r1);
        assert_eq!(veh.cursor, 0);
        assert_eq!(veh.route, vec![r1, r2, r3, r0]);
        assert_eq!(net.occupant_count(r1), 1);

        let mut steps = Vec::new();
        for _ in 0..200 {
            steps.extend(e.step(&mut net, DT).unwrap());
            net.check_occupancy().unwrap();
            let listed: usize = [r0, r1, r2, r3].iter().map(|&l| net.occupant_count(l)).sum();
            assert!(listed <= 1);
        }
        assert_eq!(steps.iter().filter_map(|s| s.enter).collect::<Vec<_>>(), vec![r2, r3, r0]);
        assert_eq!(steps.iter().filter_map(|s| s.arrived).collect::<Vec<_>>(), vec![r0]);
        assert_eq!(steps.iter().filter(|s| s.completion.is_some()).count(), 1);
    }

    #[test]
    fn occupancy_invariant_holds_on_busy_ring() {
        let (mut net, lanes) = ring();
        let n = 12;
        let mut e = engine(n);
        for i in 0..n {
            let lane = lanes[i % 4];
            e.place(&mut net, VehicleId(i as u32), lane, (i / 4) as f32 * 0.3).unwrap();
            e.assign_destination(&mut net, VehicleId(i as u32), lanes[(i + 2) % 4]).unwrap();
        }

        for _ in 0..600 {
            let steps = e.step(&mut net, DT).unwrap();
            net.check_occupancy().unwrap();
            for s in steps {
                if let Some(lane) = s.arrived {
                    let next = lanes[(lanes.iter().position(|&l| l == lane).unwrap() + 2) % 4];
                    e.assign_destination(&mut net, s.vehicle, next).unwrap();
                }
            }
            for v in e.store.iter() {
                let listed = net.lane(v.lane).unwrap().occupants.contains(&v.id);
                assert_eq!(listed, v.is_occupying());
            }
        }
    }

    #[test]
    fn store_reports_waits() {
        let mut store = VehicleStore::new(3);
        store.vehicles[1].wait.current = 4.0;
        store.vehicles[1].wait.total = 9.0;
        store.vehicles[2].wait.total = 2.0;
        assert_eq!(store.current_wait_secs(VehicleId(1)), 4.0);
        assert_eq!(store.current_wait_secs(VehicleId(7)), 0.0);
        assert_eq!(store.max_total_wait(), 9.0);

        store.reset_waits();
        assert_eq!(store.max_total_wait(), 0.0);
        assert_eq!(store.push(), VehicleId(3));
    }
}
