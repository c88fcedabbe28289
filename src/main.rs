//! Music Visualizer entry point
//!
//! Runs the scene headless for a fixed number of frames, then captures the
//! last frame to a PNG.
//!
//! Usage: `music-visualizer [scene.json] [--settings file] [--frames n] [--out file.png]
//!         [--quality low|medium|high] [--camera x,y]`
//!
//! `--camera` places a virtual pointer; the view scrolls by its distance
//! from the viewport center.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use glam::Vec2;

use music_visualizer::consts::DEMO_FRAME_MS;
use music_visualizer::renderer::{Canvas, MeshBuilder};
use music_visualizer::{Camera, QualityPreset, Scene, SceneConfig, Settings};

/// Parsed command line
#[derive(Debug)]
struct DemoArgs {
    scene: Option<PathBuf>,
    settings: PathBuf,
    frames: u32,
    out: PathBuf,
    quality: Option<QualityPreset>,
    pointer: Option<Vec2>,
}

impl DemoArgs {
    fn parse() -> Result<Self> {
        let mut args = DemoArgs {
            scene: None,
            settings: PathBuf::from("settings.json"),
            frames: 300,
            out: PathBuf::from("frame.png"),
            quality: None,
            pointer: None,
        };

        let mut iter = env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--settings" => {
                    args.settings = iter.next().context("--settings needs a path")?.into();
                }
                "--frames" => {
                    let n = iter.next().context("--frames needs a count")?;
                    args.frames = n.parse().with_context(|| format!("bad frame count {n}"))?;
                }
                "--out" => {
                    args.out = iter.next().context("--out needs a path")?.into();
                }
                "--quality" => {
                    let q = iter.next().context("--quality needs a preset")?;
                    let preset = QualityPreset::parse(&q)
                        .with_context(|| format!("unknown quality preset {q}"))?;
                    args.quality = Some(preset);
                }
                "--camera" => {
                    let p = iter.next().context("--camera needs x,y")?;
                    args.pointer = Some(parse_point(&p)?);
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                path => args.scene = Some(path.into()),
            }
        }
        Ok(args)
    }
}

/// Parse `x,y` into a point
fn parse_point(s: &str) -> Result<Vec2> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("expected x,y but got {s}"))?;
    let x: f32 = x.trim().parse().with_context(|| format!("bad x in {s}"))?;
    let y: f32 = y.trim().parse().with_context(|| format!("bad y in {s}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Music Visualizer starting...");

    let args = DemoArgs::parse()?;
    let mut settings = Settings::load(&args.settings);
    if let Some(preset) = args.quality {
        settings.quality = preset;
    }
    log::info!("Quality: {}", settings.quality.as_str());
    let config = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => {
            log::info!("No scene file given, using the built-in scene");
            SceneConfig::default()
        }
    };

    let mut scene = Scene::from_config(&config);
    scene.apply_settings(&settings);
    if let Some(pointer) = args.pointer {
        *scene.camera_mut() = Camera::from_pointer(pointer, settings.viewport() / 2.0);
        log::info!("Camera offset {:?}", scene.camera().offset);
    }

    for _ in 0..args.frames {
        scene.step(DEMO_FRAME_MS);
        if scene.frame() % 60 == 0 {
            for (i, ball) in scene.balls().iter().enumerate() {
                log::info!(
                    "t={:.2}s ball {i} pos={:?} vel={:?}",
                    scene.elapsed_ms() / 1000.0,
                    ball.position(),
                    ball.speed()
                );
            }
        }
    }

    let mut mesh = MeshBuilder::from_preset(settings.quality);
    scene.render(&mut mesh);
    log::info!(
        "Frame {} mesh: {} vertices ({} bytes)",
        scene.frame(),
        mesh.vertices().len(),
        mesh.as_bytes().len()
    );

    let mut canvas = Canvas::new(
        settings.viewport_width,
        settings.viewport_height,
        settings.background,
    );
    scene.render(&mut canvas);
    canvas.save_png(&args.out)?;

    Ok(())
}
