// Copyright 2020 TwoCookingMice

use bvhpath::integrators::path::{IntegratorSettings, PathIntegrator, SamplingMode};
use bvhpath::io;
use bvhpath::math::constants::Float;
use bvhpath::math::spectrum::RGBSpectrum;
use bvhpath::renderers::simple::{RenderSettings, Renderer, SimpleRenderer};
use bvhpath::scenes::{self, SceneSetup};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SceneChoice {
    /// Cornell box with the bunny, loaded from OBJ models.
    CornellBox,
    /// Procedural glossy plates under four spherical lights.
    MisSpheres,
}

/// Render a built-in scene with a BVH-accelerated path tracer.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Output image; .exr keeps linear radiance, .ppm and .png are tone mapped.
    #[arg(default_value = "binary.ppm")]
    output: String,
    /// Shading estimator: bsdf, light or mis.
    #[arg(short, long, default_value = "light")]
    mode: SamplingMode,
    #[arg(long, value_enum, default_value = "mis-spheres")]
    scene: SceneChoice,
    /// Directory holding cornellbox/*.obj and bunny/bunny2.obj.
    #[arg(long, default_value = "models")]
    models: PathBuf,
    #[arg(long, default_value_t = 196)]
    width: usize,
    #[arg(long, default_value_t = 196)]
    height: usize,
    /// Samples per pixel added by each pass.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    spp: u32,
    #[arg(long, default_value_t = 4)]
    passes: u32,
    #[arg(long, default_value_t = 105)]
    max_depth: u32,
    #[arg(long, default_value_t = 0.8)]
    survival: Float,
    #[arg(long, default_value_t = 0.01)]
    background: Float,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Worker threads, 0 for one per core.
    #[arg(short = 't', long, default_value_t = 0)]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Sample mode: {}, output: {}.", cli.mode, cli.output);

    let SceneSetup { scene, camera } = match cli.scene {
        SceneChoice::CornellBox => scenes::cornell_box(&cli.models, cli.width, cli.height)
            .with_context(|| format!("loading the Cornell box from {}", cli.models.display()))?,
        SceneChoice::MisSpheres => scenes::mis_spheres(cli.width, cli.height),
    };

    let integrator = PathIntegrator::new(IntegratorSettings {
        mode: cli.mode,
        max_depth: cli.max_depth,
        survival_probability: cli.survival,
        background: RGBSpectrum::new(cli.background, cli.background, cli.background),
        ..IntegratorSettings::default()
    });
    let settings = RenderSettings {
        samples_per_pass: cli.spp,
        passes: cli.passes,
        threads: cli.threads,
        seed: cli.seed,
        ..RenderSettings::default()
    };
    let mut renderer = SimpleRenderer::new(integrator, Box::new(camera), settings);

    let start = Instant::now();
    let image = renderer.render(&scene);
    log::info!("Render complete in {:.2}s.", start.elapsed().as_secs_f32());

    io::write_image(&image, &cli.output)
        .with_context(|| format!("writing {}", cli.output))?;
    Ok(())
}
