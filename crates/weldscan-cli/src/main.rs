//! weldscan command-line interface
//!
//! Three subcommands:
//!
//! - `plan` - print the tile schedule for an image width
//! - `enhance` - run the contrast-enhancement stack and save its channels
//! - `report` - run the full pipeline against recorded predictions

mod args;
mod replay;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weldscan_detect::{
    InferenceMode, Pipeline, PipelineConfig, config::default_stride, tile_offsets,
};
use weldscan_filter::{EnhanceParams, enhance_stack};

use args::{Args, Command};
use replay::ReplayBackend;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Plan {
            width,
            tile,
            stride,
        } => plan(width, tile, stride.unwrap_or_else(|| default_stride(tile))),
        Command::Enhance {
            input,
            output,
            clip_limit,
        } => enhance(&input, &output, clip_limit),
        Command::Report {
            input,
            predictions,
            output,
            regions,
            tile,
        } => report(&input, &predictions, &output, regions, tile),
    }
}

fn plan(width: u32, tile: u32, stride: u32) -> Result<()> {
    let offsets = tile_offsets(width, tile, stride);
    println!("width: {width}");
    println!("tile: {tile}");
    println!("stride: {stride}");
    println!("tiles: {}", offsets.len());
    for (k, x0) in offsets.iter().enumerate() {
        println!("  tile {k}: x = {x0} .. {}", x0 + tile);
    }
    if let Some(last) = offsets.last() {
        let covered = last + tile;
        if covered < width {
            println!("uncovered right margin: {} px", width - covered);
        }
    }
    Ok(())
}

fn enhance(input: &str, output: &str, clip_limit: f64) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {input}"))?;
    let image = weldscan_io::decode_rgb(&bytes)?;
    info!(width = image.width(), height = image.height(), "decoded");

    let params = EnhanceParams {
        clip_limit,
        ..EnhanceParams::default()
    };
    let enhanced = enhance_stack(&image, &params)?;

    fs::create_dir_all(output).with_context(|| format!("creating {output}"))?;
    for (idx, name) in ["gray", "homomorphic", "relief"].iter().enumerate() {
        let channel = enhanced.channel(idx)?;
        let path = Path::new(output).join(format!("{name}.png"));
        save_gray(&channel, &path)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn report(input: &str, predictions: &str, output: &str, regions: u32, tile: u32) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {input}"))?;
    let recorded =
        fs::read_to_string(predictions).with_context(|| format!("reading {predictions}"))?;
    let backend = ReplayBackend::from_text(&recorded)?;
    info!(recorded = backend.len(), "replaying recorded predictions");

    let config = PipelineConfig {
        tile,
        stride: default_stride(tile),
        regions,
        mode: InferenceMode::Boxes,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config, backend)?;
    let out = pipeline.run_bytes(&bytes)?;

    if out.raw_predictions.is_empty() {
        println!("no detections");
    } else {
        println!("{}", out.raw_predictions);
    }
    fs::write(output, &out.region_report).with_context(|| format!("writing {output}"))?;
    println!("region report written to {output}");
    Ok(())
}

fn save_gray(channel: &weldscan_core::GrayImage, path: &Path) -> Result<()> {
    let buf = image::GrayImage::from_raw(
        channel.width(),
        channel.height(),
        channel.data().to_vec(),
    )
    .context("channel buffer size mismatch")?;
    buf.save(path)
        .with_context(|| format!("writing {}", path.display()))
}
