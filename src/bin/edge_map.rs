use height_gauge::config::edge_map;
use height_gauge::image::io::{load_color_frame, save_gray_u8, write_json_file};
use height_gauge::lines::{extract_reference_lines, Line, ReferenceLine};
use height_gauge::preprocess::preprocess_stages;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = edge_map::load_config(Path::new(&config_path))?;

    let frame = load_color_frame(&config.input)?;
    let stages = preprocess_stages(&frame.as_view(), &config.preprocess).map_err(|e| e.to_string())?;
    let extraction = extract_reference_lines(&stages.edges, &config.lines);

    save_gray_u8(&stages.edges, &config.output.edges_image)?;
    if let Some(path) = &config.output.binary_image {
        save_gray_u8(&stages.binary, path)?;
    }
    if let Some(path) = &config.output.opened_image {
        save_gray_u8(&stages.opened, path)?;
    }

    let summary = LineSummary {
        width: frame.w,
        height: frame.h,
        edge_pixels: stages.edges.count_set(),
        candidate_count: extraction.candidates.len(),
        reference_count: extraction.accepted.len(),
        candidates: extraction.candidates,
        reference_lines: extraction.accepted,
    };
    write_json_file(&config.output.lines_json, &summary)?;

    println!(
        "Saved edge map ({} edge pixels) to {}",
        summary.edge_pixels,
        config.output.edges_image.display()
    );
    println!(
        "Saved {} reference lines ({} candidates) to {}",
        summary.reference_count,
        summary.candidate_count,
        config.output.lines_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: edge_map <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineSummary {
    width: usize,
    height: usize,
    edge_pixels: usize,
    candidate_count: usize,
    reference_count: usize,
    candidates: Vec<Line>,
    reference_lines: Vec<ReferenceLine>,
}
