// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locate rooms on a floor plan.
//!
//! Build a DCEL for three rooms, sweep it into a slab decomposition and ask which
//! room a few points fall into, checking every answer against a linear scan.
//!
//! Run:
//! - `cargo run -p strata_demos --example locate_rooms`

use kurbo::Point;
use strata_dcel::{Dcel, FaceId};
use strata_locate::{LocatesPoints, PointLocator, ScanLocator, SegmentKey};
use strata_tree::TreeKind;

fn main() {
    // A hall along the bottom, and two rooms above it separated by a slanted wall.
    let points = [
        Point::new(0.0, 0.0),
        Point::new(12.0, 0.0),
        Point::new(12.0, 3.0),
        Point::new(7.0, 3.0),
        Point::new(0.0, 3.0),
        Point::new(12.0, 8.0),
        Point::new(5.0, 8.0),
        Point::new(0.0, 8.0),
    ];
    let names = ["outside", "hall", "study", "kitchen"];
    let dcel = Dcel::from_points(
        &points,
        &[
            vec![0, 1, 2, 3, 4],
            vec![4, 3, 6, 7],
            vec![3, 2, 5, 6],
        ],
    )
    .unwrap();
    println!(
        "{} vertices, {} half-edges, {} faces",
        dcel.vertices().len(),
        dcel.half_edges().len(),
        dcel.faces().len()
    );

    let locator: PointLocator<SegmentKey> =
        PointLocator::build(&dcel, TreeKind::RedBlack).unwrap();
    let scan = ScanLocator::new(&dcel).unwrap();
    println!("{:?}", locator);
    println!("slab boundaries: {:?}", locator.slabs().collect::<Vec<_>>());

    let queries = [
        [6.0, 1.5],
        [2.0, 5.0],
        [10.0, 5.0],
        [6.5, 6.0],
        [6.0, 20.0],
        [-3.0, 1.0],
    ];
    for q in queries {
        let face = locator.locate(&q).unwrap();
        let name = face.map_or("off the plan", |f: FaceId| names[f.idx()]);
        println!("({:>5.1}, {:>5.1}) -> {name}", q[0], q[1]);
        // The scan has no notion of swept range and never reports `None`.
        if face.is_some() {
            assert_eq!(scan.locate(&q), Ok(face));
        }
    }
}
