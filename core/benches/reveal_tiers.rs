use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use minefield_core::Field;

fn cascade_on_empty_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_empty");
    for side in [16u8, 64, 255] {
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter_batched(
                || Field::new((side, side)).unwrap(),
                |mut field| black_box(field.reveal((side / 2, side / 2))),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn reveal_every_cell(c: &mut Criterion) {
    let size = (30, 16);
    c.bench_function("reveal_every_cell_30x16", |b| {
        b.iter_batched(
            || {
                let mut field = Field::new(size).unwrap();
                field.place_mines_randomly(99);
                field
            },
            |mut field| {
                for y in 0..size.1 {
                    for x in 0..size.0 {
                        black_box(field.reveal((x, y)));
                    }
                }
                field
            },
            BatchSize::SmallInput,
        );
    });
}

fn render(c: &mut Criterion) {
    let mut field = Field::new((255, 255)).unwrap();
    field.place_mines_randomly(5);
    field.reveal((0, 0));
    c.bench_function("render_255x255", |b| b.iter(|| black_box(field.render())));
}

criterion_group!(benches, cascade_on_empty_field, reveal_every_cell, render);
criterion_main!(benches);
