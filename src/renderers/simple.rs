// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub samples_per_pass: u32,
    pub passes: u32,
    /// Worker count, `0` for one per available core.
    pub threads: usize,
    /// Rows claimed by a worker at a time.
    pub band_height: usize,
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pass: 4,
            passes: 4,
            threads: 0,
            band_height: 8,
            seed: 0,
        }
    }
}

/// Progressive renderer. Each pass adds `samples_per_pass` jittered samples
/// to every pixel; the image is the running mean over completed passes.
pub struct SimpleRenderer<I: Integrator> {
    integrator: I,
    sensor: Box<dyn Sensor>,
    settings: RenderSettings,
    accumulation: Bitmap,
    passes_done: u32,
    /// Samples per pixel accumulated so far.
    samples_done: u64,
    cancel: Arc<AtomicBool>,
}

/// Seed of the generator owning band `band` during pass `pass`.
fn band_seed(seed: u64, pass: u32, band: usize) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ ((pass as u64) << 32)
        ^ (band as u64)
}

impl<I: Integrator> SimpleRenderer<I> {
    pub fn new(integrator: I, sensor: Box<dyn Sensor>, settings: RenderSettings) -> Self {
        let accumulation = Bitmap::new(sensor.width(), sensor.height());
        Self {
            integrator,
            sensor,
            settings,
            accumulation,
            passes_done: 0,
            samples_done: 0,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    /// Settings changes made through this handle apply to the next pass.
    /// Call `reset` when they invalidate the accumulated samples.
    pub fn integrator_mut(&mut self) -> &mut I {
        &mut self.integrator
    }

    /// Setting the flag stops `render` before its next pass starts.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn passes_done(&self) -> u32 {
        self.passes_done
    }

    pub fn reset(&mut self) {
        self.accumulation.clear();
        self.passes_done = 0;
        self.samples_done = 0;
    }

    fn thread_count(&self) -> usize {
        match self.settings.threads {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        }
    }

    /// Mean of all completed passes.
    pub fn image(&self) -> Bitmap {
        if self.samples_done == 0 {
            return Bitmap::new(self.accumulation.width(), self.accumulation.height());
        }
        self.accumulation.scaled(1.0 / self.samples_done as Float)
    }

    /// Renders one full pass into the accumulation buffer.
    pub fn render_pass(&mut self, scene: &Scene) {
        let width = self.sensor.width();
        let height = self.sensor.height();
        let pass = self.passes_done;
        if width == 0 || height == 0 {
            self.passes_done += 1;
            return;
        }

        let spp = self.settings.samples_per_pass.max(1);
        let band_height = self.settings.band_height.max(1);
        let total_bands = (height + band_height - 1) / band_height;
        let seed = self.settings.seed;
        let thread_count = self.thread_count().min(total_bands);

        let progress = ProgressBar::new(total_bands as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} bands")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let start = Instant::now();
        let next_band = AtomicUsize::new(0);
        let accumulation = Mutex::new(&mut self.accumulation);
        let sensor_ref: &dyn Sensor = self.sensor.as_ref();
        let integrator_ref: &I = &self.integrator;

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_band = &next_band;
                let accumulation = &accumulation;
                let progress = &progress;
                scope.spawn(move || {
                    loop {
                        let band = next_band.fetch_add(1, Ordering::Relaxed);
                        if band >= total_bands {
                            break;
                        }

                        let y0 = band * band_height;
                        let y1 = (y0 + band_height).min(height);
                        let mut rng = StdRng::seed_from_u64(band_seed(seed, pass, band));
                        let mut partial = vec![Vector3f::zeros(); width * (y1 - y0)];

                        for y in y0..y1 {
                            for x in 0..width {
                                let mut color = Vector3f::zeros();
                                for _ in 0..spp {
                                    let film = Vector2f::new(
                                        (x as Float + rng.gen::<Float>()) / width as Float,
                                        (y as Float + rng.gen::<Float>()) / height as Float);
                                    let ray = sensor_ref.sample_ray(&film);
                                    color += integrator_ref.radiance(scene, &ray, &mut rng);
                                }
                                partial[x + width * (y - y0)] = color;
                            }
                        }

                        match accumulation.lock() {
                            Ok(mut bitmap) => bitmap.accumulate_rows(y0, &partial),
                            Err(poisoned) => poisoned.into_inner().accumulate_rows(y0, &partial),
                        }
                        progress.inc(1);
                    }
                });
            }
        });
        progress.finish_and_clear();

        self.passes_done += 1;
        self.samples_done += spp as u64;
        log::info!("Pass {} finished in {:.2}s ({} spp, {} threads).",
                   self.passes_done, start.elapsed().as_secs_f32(), spp, thread_count);
    }
}

impl<I: Integrator> Renderer for SimpleRenderer<I> {
    fn render(&mut self, scene: &Scene) -> Bitmap {
        if !scene.is_built() {
            log::warn!("Rendering a scene without a BVH; every ray will miss.");
        }
        log::info!("Rendering with {} and {}.", self.integrator.describe(), self.sensor.describe());
        while self.passes_done < self.settings.passes {
            if self.cancel.load(Ordering::Relaxed) {
                log::warn!("Render cancelled after {} of {} passes.", self.passes_done, self.settings.passes);
                break;
            }
            self.render_pass(scene);
        }
        self.image()
    }
}
