//! A single signalised four-way intersection.
//!
//! Each arm has one inbound and one outbound lane, 3.5 m apart.  Inside the
//! junction every inbound lane has a turn lane to each other arm's outbound
//! lane (left, straight, right; no U-turns).  Outside it, every outbound lane
//! loops round to the next arm's inbound lane, so the graph is strongly
//! connected and vehicles can circulate indefinitely.

use ls_core::{LaneId, Placement, Vec3};
use ls_network::{CubicBezier, LaneNetwork, LaneNetworkBuilder, NetworkResult};

/// Distance from the centre to each stop line.
const STOP_LINE_M: f32 = 10.0;
/// Distance from the centre to the far end of each arm.
const ARM_M: f32 = 80.0;
/// Half the spacing between the inbound and outbound lane of an arm.
const HALF_GAP_M: f32 = 1.75;
/// How far the loop-back curves bulge beyond the arm ends.
const LOOP_BULGE_M: f32 = 25.0;

const ARMS: [(&str, Vec3); 4] = [
    ("north", Vec3::Z),
    ("east", Vec3::X),
    ("south", Vec3::NEG_Z),
    ("west", Vec3::NEG_X),
];

/// The lanes a signal group governs: one per arm.
pub struct Approach {
    pub name:  &'static str,
    pub turns: Vec<LaneId>,
}

/// Right-hand side of travel towards the centre along `-dir`.
fn offset(dir: Vec3) -> Vec3 {
    Vec3::new(dir.z, 0.0, -dir.x) * HALF_GAP_M
}

/// Build the intersection and return it with one [`Approach`] per arm.
pub fn build_network() -> NetworkResult<(LaneNetwork, Vec<Approach>)> {
    let mut b = LaneNetworkBuilder::with_capacity(4 * 5, 4 * 8);

    let mut inbound = Vec::with_capacity(4);
    let mut outbound = Vec::with_capacity(4);
    for (name, d) in ARMS {
        let o = offset(d);
        inbound.push(b.add_lane(
            format!("{name}_in"),
            CubicBezier::line(d * ARM_M + o, d * STOP_LINE_M + o),
            Placement::IDENTITY,
        ));
        outbound.push(b.add_lane(
            format!("{name}_out"),
            CubicBezier::line(d * STOP_LINE_M - o, d * ARM_M - o),
            Placement::IDENTITY,
        ));
    }

    // ── Turns ─────────────────────────────────────────────────────────────
    let mut approaches = Vec::with_capacity(4);
    for (i, (from_name, di)) in ARMS.into_iter().enumerate() {
        let start = di * STOP_LINE_M + offset(di);
        let mut turns = Vec::with_capacity(3);
        for (j, (to_name, dj)) in ARMS.into_iter().enumerate() {
            if i == j {
                continue;
            }
            let end = dj * STOP_LINE_M - offset(dj);
            // Control points pull towards the centre along each arm's axis.
            let curve = CubicBezier::new(start, start - di * 5.0, end - dj * 5.0, end);
            let turn = b.add_turn_lane(format!("{from_name}_to_{to_name}"), curve, Placement::IDENTITY);
            b.connect(inbound[i], turn);
            b.connect(turn, outbound[j]);
            turns.push(turn);
        }
        approaches.push(Approach { name: from_name, turns });
    }

    // ── Loop-backs ────────────────────────────────────────────────────────
    for i in 0..4 {
        let (name, di) = ARMS[i];
        let (next_name, dn) = ARMS[(i + 1) % 4];
        let start = di * ARM_M - offset(di);
        let end = dn * ARM_M + offset(dn);
        let curve = CubicBezier::new(start, start + di * LOOP_BULGE_M, end + dn * LOOP_BULGE_M, end);
        let lane = b.add_lane(format!("{name}_loop_{next_name}"), curve, Placement::IDENTITY);
        b.connect(outbound[i], lane);
        b.connect(lane, inbound[(i + 1) % 4]);
    }

    Ok((b.build()?, approaches))
}
