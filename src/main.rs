//! Vigil - headless adaptive-quality simulation
//!
//! Drives the pipeline with a synthetic frame-rate schedule and an orbiting
//! camera, logging tier changes and per-level counts.

use std::env;
use std::path::PathBuf;

use vigil::core::logging;
use vigil::core::types::Vec3;
use vigil::lod::LodLevel;
use vigil::scene::{load_records, Category, EntityRecord};
use vigil::texture::TextureKind;
use vigil::{AdaptivePipeline, Camera, SceneConfig};

const DEFAULT_ENTITIES: usize = 500;
const DEFAULT_FRAMES: u32 = 1200;
const DEFAULT_FPS: [f32; 3] = [60.0, 30.0, 60.0];
const ORBIT_RADIUS: f32 = 45.0;

#[derive(Debug)]
struct Args {
    entities: usize,
    frames: u32,
    fps: Vec<f32>,
    config: Option<PathBuf>,
    records: Option<PathBuf>,
    toggle_every: Option<u32>,
    dump_textures: Option<PathBuf>,
}

fn print_help() {
    eprintln!("vigil - headless adaptive-quality simulation");
    eprintln!();
    eprintln!("Usage: vigil [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    --entities <N>          Synthetic entities when no records are given (default: 500)");
    eprintln!("    --frames <N>            Frames to simulate (default: 1200)");
    eprintln!("    --fps <A,B,...>         Frame-rate schedule, split evenly over the run (default: 60,30,60)");
    eprintln!("    --config <PATH>         Scene config JSON");
    eprintln!("    --records <PATH>        Entity records JSON array");
    eprintln!("    --toggle-every <N>      Toggle day/night every N frames");
    eprintln!("    --dump-textures <DIR>   Write the final frame's textures as PNG");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    vigil --entities 2000 --fps 60,25,12,60 --toggle-every 300");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut parsed = Args {
        entities: DEFAULT_ENTITIES,
        frames: DEFAULT_FRAMES,
        fps: DEFAULT_FPS.to_vec(),
        config: None,
        records: None,
        toggle_every: None,
        dump_textures: None,
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i).cloned().ok_or_else(|| format!("Missing value for {flag}"))
        };
        match flag {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--entities" => {
                let v = value()?;
                parsed.entities = v.parse().map_err(|_| format!("Invalid entity count: {v}"))?;
            }
            "--frames" => {
                let v = value()?;
                parsed.frames = v.parse().map_err(|_| format!("Invalid frame count: {v}"))?;
            }
            "--fps" => {
                let v = value()?;
                parsed.fps = v
                    .split(',')
                    .map(|s| s.trim().parse::<f32>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| format!("Invalid fps list: {v}"))?;
                if parsed.fps.is_empty() || parsed.fps.iter().any(|f| !(*f > 0.0)) {
                    return Err(format!("fps values must be positive: {v}"));
                }
            }
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--records" => parsed.records = Some(PathBuf::from(value()?)),
            "--toggle-every" => {
                let v = value()?;
                let n: u32 = v.parse().map_err(|_| format!("Invalid toggle interval: {v}"))?;
                parsed.toggle_every = (n > 0).then_some(n);
            }
            "--dump-textures" => parsed.dump_textures = Some(PathBuf::from(value()?)),
            other => return Err(format!("Unknown option: {other}")),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Entities scattered over a disc around the origin.
fn synthetic_records(count: usize) -> Vec<EntityRecord> {
    let golden = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    (0..count)
        .map(|i| {
            let r = 80.0 * ((i as f32 + 0.5) / count.max(1) as f32).sqrt();
            let a = i as f32 * golden;
            let category = Category::ALL[i % Category::ALL.len()];
            let shade = 0x60 + (i * 37 % 0x90) as u32;
            EntityRecord::new(
                format!("entity-{i:05}"),
                [r * a.cos(), 0.0, r * a.sin()],
                category,
                &format!("#{shade:02x}{shade:02x}{:02x}", shade.saturating_sub(0x10)),
            )
        })
        .collect()
}

fn orbit_camera(t: f32) -> Camera {
    let angle = t * 0.1;
    let eye = Vec3::new(angle.cos() * ORBIT_RADIUS, 6.0, angle.sin() * ORBIT_RADIUS);
    Camera::look_at(eye, Vec3::ZERO, Vec3::Y)
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => match SceneConfig::load_sync(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    let records = match &args.records {
        Some(path) => match load_records(path) {
            Ok(records) => records,
            Err(e) => {
                eprintln!("Error: failed to read {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => synthetic_records(args.entities),
    };

    let mut pipeline = AdaptivePipeline::new(config);
    let report = pipeline.sync_entities(records);
    log::info!(
        "Loaded {} entities ({} rejected, {} duplicates)",
        pipeline.entities().len(),
        report.rejected,
        report.duplicates
    );

    let segment = (args.frames as usize / args.fps.len()).max(1);
    let mut now_ms = 0.0_f64;
    let mut last = None;
    let mut tier_changes = 0;

    for frame in 0..args.frames {
        if let Some(n) = args.toggle_every {
            if frame > 0 && frame % n == 0 {
                pipeline.toggle_mode();
            }
        }

        let fps = args.fps[(frame as usize / segment).min(args.fps.len() - 1)];
        now_ms += 1000.0 / fps as f64;

        let camera = orbit_camera((now_ms / 1000.0) as f32);
        let out = pipeline.frame(now_ms, &camera);

        if let Some(change) = out.tier_change {
            tier_changes += 1;
            log::info!(
                "frame {frame}: {} -> {} ({:?}, avg {:.1} fps)",
                change.from,
                change.to,
                change.reason,
                out.fps_window.avg
            );
        }
        if frame % 300 == 0 {
            log::debug!(
                "frame {frame}: {} mode, {} draws, {} particles",
                out.context.mode,
                out.draw_list.len(),
                out.animation.particles.len()
            );
        }
        last = Some(out);
    }

    let Some(out) = last else {
        println!("No frames simulated");
        return;
    };

    println!();
    println!("Frames:        {}", pipeline.frame_count());
    println!("Final tier:    {}", pipeline.current_quality_tier());
    println!("Tier changes:  {tier_changes}");
    println!("Mode:          {}", pipeline.mode());
    for level in LodLevel::ALL {
        println!("  {:<8} {}", level.name(), out.stats.count(level));
    }
    println!("Placeholders:  {}", out.recipe_failures);
    let tex = pipeline.texture_stats();
    println!(
        "Textures:      {} cached, {} hits / {} misses / {} evictions",
        pipeline.textures().cache().len(),
        tex.hits,
        tex.misses,
        tex.evictions
    );

    if let Some(dir) = &args.dump_textures {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: cannot create {}: {e}", dir.display());
            std::process::exit(1);
        }
        for (kind, texture) in TextureKind::ALL.iter().zip(out.textures.iter()) {
            let path = dir.join(format!("{}_{}_{}.png", kind, out.context.mode, out.context.tier));
            match texture.to_png() {
                Ok(png) => {
                    if let Err(e) = std::fs::write(&path, png) {
                        log::warn!("Failed to write {}: {e}", path.display());
                    }
                }
                Err(e) => log::warn!("Failed to encode {kind}: {e}"),
            }
        }
        println!("Textures written to {}", dir.display());
    }
}
