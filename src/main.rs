use stroke_segmenter::prelude::*;

fn main() {
    // Demo: an L-shaped stroke drawn at a constant 10 ms sampling interval.
    let mut xy: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 0.0]).collect();
    xy.extend((1..=10).map(|k| [9.0, k as f64]));
    let stroke = match Stroke::from_xy(&xy, 10.0) {
        Ok(stroke) => stroke,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let segmenter = match Segmenter::new(SegmenterParams::default()) {
        Ok(segmenter) => segmenter,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    for algorithm in Algorithm::ALL {
        let report = segmenter.segment_with_diagnostics(&stroke, algorithm);
        println!(
            "{:<18} corners={:?} confidence={:.3} latency_ms={:.3}",
            algorithm.name(),
            report.segmentation.corners(),
            report.segmentation.confidence,
            report.trace.timings.total_ms
        );
    }
}
