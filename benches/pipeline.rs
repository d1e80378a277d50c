use criterion::{criterion_group, criterion_main, Criterion, black_box};

use vigil::atmosphere::DayNight;
use vigil::lod::{LodEvaluator, LodThresholds};
use vigil::perf::QualityTier;
use vigil::scene::{Category, Entity, EntityRecord};
use vigil::texture::{TextureConfig, TextureKind, TextureSynthesizer};
use vigil::variation::{compute_variation, VariationGenerator};
use vigil::{AdaptivePipeline, Camera, SceneConfig};

use glam::Vec3;

fn records(count: usize) -> Vec<EntityRecord> {
    (0..count)
        .map(|i| {
            let x = (i % 50) as f32 * 2.0 - 50.0;
            let z = -((i / 50) as f32 * 2.0) - 2.0;
            EntityRecord::new(format!("e{i}"), [x, 0.0, z], Category::ALL[i % Category::ALL.len()], "#a0a0a0")
        })
        .collect()
}

fn camera() -> Camera {
    Camera::new(Vec3::new(0.0, 2.0, 5.0), 60.0, 16.0 / 9.0)
}

fn bench_lod_evaluate_5000(c: &mut Criterion) {
    let entities: Vec<Entity> = records(5000)
        .iter()
        .filter_map(|r| Entity::from_record(r).ok())
        .collect();
    let mut eval = LodEvaluator::new(LodThresholds::default(), QualityTier::High);
    let mut variations = VariationGenerator::new();
    let cam = camera();

    c.bench_function("lod_evaluate_5000", |b| {
        b.iter(|| {
            eval.evaluate(black_box(&cam), &entities, &mut variations, DayNight::Night, &[]);
            eval.stats().high
        });
    });
}

fn bench_compute_variation(c: &mut Criterion) {
    c.bench_function("compute_variation", |b| {
        b.iter(|| compute_variation(black_box("memorial-00421"), Category::Monument, [0.6, 0.6, 0.6], DayNight::Night));
    });
}

fn bench_texture_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture_synthesis");
    group.sample_size(10);
    for tier in QualityTier::ALL {
        group.bench_function(format!("ground_{tier}"), |b| {
            b.iter(|| {
                let mut synth = TextureSynthesizer::new(TextureConfig::default());
                synth.get_texture(TextureKind::Ground, DayNight::Day, black_box(tier))
            });
        });
    }
    group.finish();
}

fn bench_pipeline_frame_1000(c: &mut Criterion) {
    let mut pipeline = AdaptivePipeline::new(SceneConfig::default());
    pipeline.sync_entities(records(1000));
    let cam = camera();
    let mut now = 0.0;

    c.bench_function("pipeline_frame_1000", |b| {
        b.iter(|| {
            now += 16.6;
            pipeline.frame(black_box(now), &cam).draw_list.len()
        });
    });
}

criterion_group!(
    benches,
    bench_lod_evaluate_5000,
    bench_compute_variation,
    bench_texture_synthesis,
    bench_pipeline_frame_1000,
);
criterion_main!(benches);
