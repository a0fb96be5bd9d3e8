use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use racepace::models::{
    AthleteProfile, CalculatorInput, EnvironmentContext, Gender, PerformanceBaseline, TargetGoal,
};
use racepace::prediction::{predict_time, MARATHON_KM};
use racepace::training_plan::{PlanGoal, TrainingPlanGenerator};
use racepace::{solve_goal, PredictionEngine};

/// Benchmarks for the calculator pipelines
///
/// A calculator submit runs the forward pipeline once, so these mostly guard
/// against accidental allocation-heavy regressions.

fn create_benchmark_input(seconds_5k: f64) -> CalculatorInput {
    CalculatorInput {
        profile: AthleteProfile {
            birth_year: 1985,
            weight_kg: 70.0,
            gender: Gender::Man,
            resting_hr: Some(55),
            max_hr: None,
        },
        baseline: PerformanceBaseline::five_k(seconds_5k),
        environment: EnvironmentContext { temperature_c: 20.0 },
        reference_year: 2026,
    }
}

fn bench_forward_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward Pipeline");

    for &count in &[1usize, 100, 1000] {
        let inputs: Vec<CalculatorInput> = (0..count)
            .map(|i| create_benchmark_input(1200.0 + (i % 900) as f64))
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("forecast", count), &inputs, |b, inputs| {
            b.iter(|| {
                for input in inputs {
                    let _ = PredictionEngine::forecast(black_box(input));
                }
            });
        });
    }

    group.finish();
}

fn bench_riegel(c: &mut Criterion) {
    c.bench_function("predict_time", |b| {
        b.iter(|| predict_time(black_box(1500.0), black_box(5.0), black_box(MARATHON_KM)))
    });

    let goal = TargetGoal {
        distance_km: MARATHON_KM,
        seconds: 4.0 * 3600.0,
    };
    c.bench_function("solve_goal", |b| b.iter(|| solve_goal(black_box(&goal))));
}

fn bench_training_plan(c: &mut Criterion) {
    c.bench_function("personalize_10k_plan", |b| {
        b.iter(|| TrainingPlanGenerator::personalize(PlanGoal::TenK, black_box(1500.0)))
    });
}

criterion_group!(benches, bench_forward_pipeline, bench_riegel, bench_training_plan);
criterion_main!(benches);
