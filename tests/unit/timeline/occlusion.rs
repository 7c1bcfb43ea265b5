use super::*;
use crate::document::dsl::element;
use crate::document::kind::ElementKind;
use crate::fixtures::{by_name, crumbs, first_of, project, snapshot};

fn t(n: i64) -> Rational {
    Rational::from_int(n)
}

fn range(a: i64, b: i64) -> TimeRange {
    TimeRange::new(t(a), t(b))
}

#[test]
fn classify_intervals() {
    let outer = range(10, 20);
    assert_eq!(classify(outer, t(12), Some(t(18))), Occlusion::NotOccluded);
    assert_eq!(classify(outer, t(10), Some(t(20))), Occlusion::NotOccluded);
    assert_eq!(classify(outer, t(5), Some(t(15))), Occlusion::PartiallyOccluded);
    assert_eq!(classify(outer, t(15), Some(t(25))), Occlusion::PartiallyOccluded);
    assert_eq!(classify(outer, t(5), Some(t(25))), Occlusion::PartiallyOccluded);
    assert_eq!(classify(outer, t(30), Some(t(40))), Occlusion::FullyOccluded);
}

#[test]
fn touching_edges_are_disjoint() {
    let outer = range(10, 20);
    assert_eq!(classify(outer, t(5), Some(t(10))), Occlusion::FullyOccluded);
    assert_eq!(classify(outer, t(20), Some(t(25))), Occlusion::FullyOccluded);
}

#[test]
fn points_are_inside_or_hidden() {
    let outer = range(10, 20);
    assert_eq!(classify(outer, t(10), None), Occlusion::NotOccluded);
    assert_eq!(classify(outer, t(19), None), Occlusion::NotOccluded);
    assert_eq!(classify(outer, t(20), None), Occlusion::FullyOccluded);
    assert_eq!(classify(outer, t(3), None), Occlusion::FullyOccluded);
}

#[test]
fn inverted_inner_range_is_clamped_to_a_point() {
    let outer = range(10, 20);
    assert_eq!(classify(outer, t(15), Some(t(12))), Occlusion::NotOccluded);
    assert_eq!(classify(outer, t(25), Some(t(12))), Occlusion::FullyOccluded);
}

#[test]
fn classify_is_shift_invariant() {
    let cases = [
        (range(10, 20), 12, Some(18)),
        (range(10, 20), 5, Some(15)),
        (range(10, 20), 20, Some(30)),
        (range(10, 20), 30, None),
        (range(0, 1), 0, None),
    ];
    let shifts = [
        Rational::ZERO,
        t(3600),
        t(-7),
        Rational::new(1001, 30000).unwrap(),
    ];
    for (outer, a, b) in cases {
        let expected = classify(outer, t(a), b.map(t));
        for d in shifts {
            assert_eq!(
                classify(outer.shift(d), t(a) + d, b.map(|b| t(b) + d)),
                expected,
                "outer {outer:?} inner {a}..{b:?} shifted by {d}"
            );
        }
    }
}

#[test]
fn occlusion_against_nearest_timed_ancestor() {
    let s = project();
    let broll = by_name(&s, "B-Roll");
    assert_eq!(
        occlusion(&s, broll, &crumbs(&s, broll)),
        Some(Occlusion::PartiallyOccluded)
    );

    let interview = by_name(&s, "Interview");
    // The spine has no duration, so the sequence is the container.
    assert_eq!(
        occlusion(&s, interview, &crumbs(&s, interview)),
        Some(Occlusion::NotOccluded)
    );

    let marker = first_of(&s, ElementKind::Marker);
    assert_eq!(
        occlusion(&s, marker, &crumbs(&s, marker)),
        Some(Occlusion::NotOccluded)
    );
}

#[test]
fn occlusion_is_absent_without_a_timed_container() {
    let s = project();
    let fmt = first_of(&s, ElementKind::Format);
    assert_eq!(occlusion(&s, fmt, &crumbs(&s, fmt)), None);
    assert_eq!(effective_occlusion(&s, fmt, &crumbs(&s, fmt)), None);
}

#[test]
fn fully_inside_is_never_occluded() {
    let s = project();
    for name in ["Interview", "Take 2", "Multi", "Lower Third", "Gap"] {
        let n = by_name(&s, name);
        assert_eq!(
            effective_occlusion(&s, n, &crumbs(&s, n)),
            Some(Occlusion::NotOccluded),
            "{name}"
        );
    }
}

#[test]
fn partial_overlap_is_reported_after_clamping() {
    let s = project();
    let broll = by_name(&s, "B-Roll");
    assert_eq!(
        effective_occlusion(&s, broll, &crumbs(&s, broll)),
        Some(Occlusion::PartiallyOccluded)
    );
}

#[test]
fn full_exclusion_by_the_parent_wins() {
    let s = project();
    let connected = by_name(&s, "Connected");
    assert_eq!(
        effective_occlusion(&s, connected, &crumbs(&s, connected)),
        Some(Occlusion::FullyOccluded)
    );
}

#[test]
fn clamped_interval_is_excluded_further_up() {
    // Clip 5..15 overlaps its parent 0..10; the clamped 5..10 then misses the sequence 20..40.
    let s = snapshot(
        element("fcpxml").child(
            element("sequence")
                .attr("tcStart", "20s")
                .attr("duration", "20s")
                .child(
                    element("spine").child(
                        element("clip")
                            .attr("name", "parent")
                            .attr("offset", "0s")
                            .attr("duration", "10s")
                            .child(
                                element("clip")
                                    .attr("name", "child")
                                    .attr("lane", "1")
                                    .attr("offset", "5s")
                                    .attr("duration", "10s"),
                            ),
                    ),
                ),
        ),
    );
    let child = by_name(&s, "child");
    let k = crumbs(&s, child);
    assert_eq!(
        absolute_range(&s, child, &k),
        Some(range(5, 15))
    );
    assert_eq!(occlusion(&s, child, &k), Some(Occlusion::PartiallyOccluded));
    assert_eq!(
        effective_occlusion(&s, child, &k),
        Some(Occlusion::FullyOccluded)
    );
}

#[test]
fn lane_change_ends_the_comparison_run() {
    // The inner clip sits on a clip connected on lane 1; "base" is on lane 0, so the walk stops
    // before comparing against it.
    let s = snapshot(
        element("fcpxml").child(
            element("sequence")
                .attr("tcStart", "0s")
                .attr("duration", "10s")
                .child(
                    element("spine").child(
                        element("clip")
                            .attr("name", "base")
                            .attr("offset", "0s")
                            .attr("duration", "10s")
                            .child(
                                element("clip")
                                    .attr("name", "connected")
                                    .attr("lane", "1")
                                    .attr("offset", "5s")
                                    .attr("duration", "10s")
                                    .child(
                                        element("clip")
                                            .attr("name", "inner")
                                            .attr("lane", "2")
                                            .attr("offset", "0s")
                                            .attr("duration", "4s"),
                                    ),
                            ),
                    ),
                ),
        ),
    );
    let inner = by_name(&s, "inner");
    let k = crumbs(&s, inner);
    assert_eq!(absolute_range(&s, inner, &k), Some(range(5, 9)));
    // Compared against "connected" (5..15) only.
    assert_eq!(
        effective_occlusion(&s, inner, &k),
        Some(Occlusion::NotOccluded)
    );

    let connected = by_name(&s, "connected");
    assert_eq!(
        effective_occlusion(&s, connected, &crumbs(&s, connected)),
        Some(Occlusion::PartiallyOccluded)
    );
}

#[test]
fn occlusion_serializes_as_snake_case() {
    assert_eq!(
        serde_json::to_string(&Occlusion::PartiallyOccluded).unwrap(),
        "\"partially_occluded\""
    );
}
