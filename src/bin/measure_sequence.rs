use height_gauge::config::sequence::{self, InputConfig};
use height_gauge::image::io::write_json_file;
use height_gauge::stream::{ImageSequenceSource, JsonLinesSink, RenderSink};
use height_gauge::measure::fixed_interval_clock;
use height_gauge::{FrameReport, HeightGauge};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Prints the overlay text of every tick and forwards to an optional file sink.
struct ConsoleSink<S> {
    inner: Option<S>,
}

impl<S: RenderSink> RenderSink for ConsoleSink<S> {
    fn render(&mut self, report: &FrameReport) {
        if report.newly_established {
            if let Some(stable) = report.stable {
                println!("New stable height measurement: {:.1} {}", stable.value, report.unit_label);
            }
        }
        if let Some(inner) = self.inner.as_mut() {
            inner.render(report);
        }
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = sequence::load_config(Path::new(&config_path))?;

    let mut source = match &config.input {
        InputConfig::Dir(dir) => ImageSequenceSource::from_dir(dir).map_err(|e| e.to_string())?,
        InputConfig::Files(files) => ImageSequenceSource::from_paths(files.iter().cloned()),
    };
    let frame_count = source.remaining();
    let mut gauge = HeightGauge::new(config.gauge.clone()).map_err(|e| e.to_string())?;

    let file_sink = match &config.output.reports_jsonl {
        Some(path) => Some(JsonLinesSink::create(path)?),
        None => None,
    };
    let mut sink = ConsoleSink { inner: file_sink };

    let summary = match config.frame_interval_ms {
        Some(ms) => {
            let clock = fixed_interval_clock(ms, frame_count).map_err(|e| e.to_string())?;
            gauge.run_with_clock(&mut source, &mut sink, clock)
        }
        None => gauge.run(&mut source, &mut sink),
    };

    if let Some(jsonl) = sink.inner {
        let failures = jsonl.failures();
        jsonl
            .finish()
            .map_err(|e| format!("Failed to flush frame reports: {e}"))?;
        if failures > 0 {
            return Err(format!("{failures} frame reports could not be written"));
        }
    }
    if let Some(path) = &config.output.summary_json {
        write_json_file(path, &summary)?;
    }

    println!(
        "Processed {} of {} frames ({} skipped), {} measurements, {} stable publications",
        summary.frames_seen - summary.frames_skipped,
        frame_count,
        summary.frames_skipped,
        summary.measurements,
        summary.stable_publications
    );
    match summary.last_stable {
        Some(stable) => println!(
            "FINAL HEIGHT: {:.1} {}",
            stable.value,
            gauge.scale().unit_label
        ),
        None => println!("No stable height established"),
    }
    Ok(())
}

fn usage() -> String {
    "Usage: measure_sequence <config.json>".to_string()
}
