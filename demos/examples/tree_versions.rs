// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistent tree versions.
//!
//! Track who is on which floor of a building over a day. Every hour is an instant;
//! any earlier hour can still be read after later ones are written.
//!
//! Run:
//! - `cargo run -p strata_demos --example tree_versions`

use strata_tree::{OrderedTree, PersistentTree, TreeKind};

fn main() {
    // Start of day: built as a plain ordered tree, then frozen as the base version.
    let mut start = OrderedTree::new(TreeKind::RedBlack);
    start.insert(0.0, "guard");
    start.insert(2.0, "cleaner");
    let mut floors: PersistentTree<f64, &str> = start.into_persistent();

    floors.set_instant(9.0).unwrap();
    floors.insert(3.0, "ada");
    floors.insert(3.0, "bo");
    floors.insert(5.0, "cy");
    floors.delete(&2.0, Some(&"cleaner")).unwrap();

    floors.set_instant(12.0).unwrap();
    floors.delete(&3.0, Some(&"ada")).unwrap();
    floors.insert(1.0, "ada");

    floors.set_instant(17.0).unwrap();
    floors.delete(&3.0, None).unwrap();
    floors.delete(&5.0, None).unwrap();
    floors.delete(&1.0, None).unwrap();

    for hour in [6.0, 9.0, 10.5, 12.0, 18.0] {
        let view = floors.at_instant(hour);
        print!("{hour:>5.1}h:");
        for (floor, people) in view.iter() {
            print!(" [{floor}: {}]", people.join(", "));
        }
        println!();
    }

    // Nearest occupied floor at or above floor 4, clamped to the top occupied floor.
    for hour in [10.0, 13.0] {
        let view = floors.at_instant(hour);
        println!("{hour}h, at or above 4: {:?}", view.search_up(4.0));
    }
    assert_eq!(floors.at_instant(13.0).search_up(4.0), Some((5.0, &"cy")));
    assert_eq!(floors.at_instant(20.0).len(), 1);

    println!(
        "{} versions share {} nodes",
        floors.version_count(),
        floors.node_count()
    );
}
