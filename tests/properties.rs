mod common;

use common::synthetic_stroke::{assorted, right_angle};
use stroke_segmenter::corners::{Detector, DetectorParams};
use stroke_segmenter::prelude::*;
use stroke_segmenter::stroke::is_line;

#[test]
fn detector_candidates_are_sorted_unique_and_closed() {
    let params = DetectorParams::default();
    for stroke in assorted() {
        let cleaned = stroke.cleaned();
        let last = cleaned.len() - 1;
        for detector in Detector::ALL {
            let idx = detector.detect(&cleaned.points, &params).indices;
            assert_eq!(idx.first(), Some(&0), "{}", detector.name());
            assert_eq!(idx.last(), Some(&last), "{}", detector.name());
            assert!(
                idx.windows(2).all(|w| w[0] < w[1]),
                "{}: {idx:?}",
                detector.name()
            );
        }
    }
}

#[test]
fn segments_reconstruct_the_stroke() {
    let params = SegmenterParams::default();
    for stroke in assorted() {
        for algorithm in Algorithm::ALL {
            let result = segment(&stroke, algorithm, &params).unwrap();
            let corners = result.corners();
            assert_eq!(corners.first(), Some(&0));
            assert_eq!(corners.last(), Some(&stroke.last_index()));

            let mut rebuilt: Vec<StrokePoint> = Vec::with_capacity(stroke.len());
            for (k, seg) in result.segments.iter().enumerate() {
                assert_eq!(seg.start, corners[k]);
                assert_eq!(seg.end, corners[k + 1]);
                assert_eq!(seg.points.len(), seg.end - seg.start + 1);
                let skip = usize::from(k > 0);
                rebuilt.extend(seg.points.iter().skip(skip).copied());
            }
            assert_eq!(rebuilt.as_slice(), stroke.points(), "{}", algorithm.name());
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let params = SegmenterParams::default();
    for stroke in assorted() {
        for algorithm in Algorithm::ALL {
            let first = segment(&stroke, algorithm, &params).unwrap();
            let second = segment(&stroke, algorithm, &params).unwrap();
            assert_eq!(first, second, "{}", algorithm.name());
        }
    }
}

#[test]
fn is_line_agrees_under_reversal() {
    for stroke in assorted() {
        let rev = stroke.reversed();
        let lengths = stroke.path_lengths();
        let rev_lengths = rev.path_lengths();
        let last = stroke.last_index();
        for a in (0..=last).step_by(3) {
            for b in (a..=last).step_by(5) {
                let forward = is_line(stroke.points(), a, b, &lengths, 0.95);
                let backward = is_line(rev.points(), last - b, last - a, &rev_lengths, 0.95);
                assert_eq!(forward, is_line(stroke.points(), b, a, &lengths, 0.95));
                assert_eq!(forward, backward, "range {a}..{b}");
            }
        }
    }
}

#[test]
fn reversed_right_angle_keeps_its_corner() {
    let stroke = right_angle();
    let rev = stroke.reversed();
    let params = SegmenterParams::default();
    for algorithm in Algorithm::ALL {
        let result = segment(&rev, algorithm, &params).unwrap();
        assert_eq!(result.corners(), vec![0, 10, 19], "{}", algorithm.name());
    }
}
