use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use eastwing::command;
use eastwing::facts::FALLBACK_FACTS;
use eastwing::prompt::{PromptCache, system_prompt};
use eastwing::stage::ProgressionSpeed;

fn bench_command_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_parse");

    for input in [
        " API ALL ",
        "speed fast",
        "help mood",
        "What did you see in 1942? Tell me about Roosevelt.",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(input.trim()), &input, |b, i| {
            b.iter(|| black_box(command::parse(black_box(i))));
        });
    }

    group.finish();
}

fn bench_system_prompt(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_prompt");

    group.bench_function("assemble", |b| {
        b.iter(|| {
            black_box(system_prompt(
                black_box(FALLBACK_FACTS),
                black_box(9),
                ProgressionSpeed::Slow,
                None,
            ))
        });
    });

    group.bench_function("cached", |b| {
        let mut cache = PromptCache::new();
        let mut turn = 0u32;
        b.iter(|| {
            turn = (turn + 1) % 20;
            black_box(cache.get(FALLBACK_FACTS, turn, ProgressionSpeed::Fast, None).len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_command_parse, bench_system_prompt);
criterion_main!(benches);
