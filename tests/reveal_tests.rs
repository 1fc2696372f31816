// Host-side tests for one-shot reveal bookkeeping and the deep-link sweep.

#![allow(dead_code)]
mod reveal {
    include!("../src/core/reveal.rs");
}

use reveal::*;

#[test]
fn mark_fires_exactly_once_per_node() {
    let mut t = RevealTracker::new(3);
    assert!(t.mark(1));
    assert!(!t.mark(1));
    assert!(t.is_revealed(1));
    assert!(!t.is_revealed(0));
    assert!(!t.is_revealed(2));
}

#[test]
fn mark_out_of_range_is_a_noop() {
    let mut t = RevealTracker::new(2);
    assert!(!t.mark(5));
    assert!(!t.is_revealed(5));
}

#[test]
fn pending_indices_shrink_as_nodes_reveal() {
    let mut t = RevealTracker::new(4);
    assert_eq!(t.pending_indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    t.mark(0);
    t.mark(2);
    assert_eq!(t.pending_indices().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn empty_tracker_has_nothing_pending() {
    let t = RevealTracker::new(0);
    assert!(t.is_empty());
    assert_eq!(t.pending_indices().count(), 0);
}

#[test]
fn sweep_band_covers_the_upper_viewport() {
    let vh = 1000.0;
    // Node solidly in view at 20% off the top
    assert!(in_force_reveal_band(200.0, 500.0, vh));
    // Node straddling the top edge still counts
    assert!(in_force_reveal_band(-100.0, 50.0, vh));
    // Node starting at 85% of the viewport height is past the band
    assert!(!in_force_reveal_band(850.0, 1200.0, vh));
    // Node fully above the viewport does not count
    assert!(!in_force_reveal_band(-500.0, -100.0, vh));
}

#[test]
fn sweep_band_edge_is_a_strict_bound() {
    let vh = 1000.0;
    assert!(in_force_reveal_band(849.0, 1200.0, vh));
    assert!(!in_force_reveal_band(vh * FORCE_REVEAL_BAND, 1200.0, vh));
}
