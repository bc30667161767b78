use std::env;
use std::path::Path;
use stroke_segmenter::config::segment_tool;
use stroke_segmenter::io::{load_stroke_json, write_json_file};
use stroke_segmenter::Segmenter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = segment_tool::load_config(Path::new(&config_path))?;

    let stroke = load_stroke_json(&config.input)?;
    let segmenter = Segmenter::new(config.params).map_err(|e| e.to_string())?;
    let report = segmenter.segment_with_diagnostics(&stroke, config.algorithm);

    if config.output.segmentation_only {
        write_json_file(&config.output.report_json, &report.segmentation)?;
    } else {
        write_json_file(&config.output.report_json, &report)?;
    }

    println!(
        "{}: {} samples -> {} segments, corners {:?}, confidence {:.3} ({:.2} ms)",
        config.algorithm.name(),
        stroke.len(),
        report.segmentation.segments.len(),
        report.segmentation.corners(),
        report.segmentation.confidence,
        report.trace.timings.total_ms
    );
    println!("Saved report to {}", config.output.report_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: segment_stroke <config.json>".to_string()
}
