use criterion::{criterion_group, criterion_main, Criterion};
use perfect_maze::generators;
use perfect_maze::layout::{layout, LayoutOptions};
use perfect_maze::renderers;
use perfect_maze::units::{ColumnLength, PixelLength, RowLength};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_layout(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(200);
    let maze = generators::generate(RowLength(200), ColumnLength(200), &mut rng).unwrap();
    let path = perfect_maze::solve(&maze.grid, maze.start, maze.finish).unwrap().unwrap();
    let options = LayoutOptions::new(PixelLength(4), PixelLength(4));

    c.bench_function("layout_grid", move |b| {
        b.iter(|| layout(&maze.grid, &path, maze.start, maze.finish, &options))
    });
}

fn bench_render_geometry(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(200);
    let maze = generators::generate(RowLength(200), ColumnLength(200), &mut rng).unwrap();
    let path = perfect_maze::solve(&maze.grid, maze.start, maze.finish).unwrap().unwrap();
    let geometry = layout(&maze.grid,
                          &path,
                          maze.start,
                          maze.finish,
                          &LayoutOptions::new(PixelLength(4), PixelLength(4)));
    let render_options = renderers::RenderOptionsBuilder::new()
        .image_size(801, 801)
        .build();

    c.bench_function("render_geometry", move |b| {
        b.iter(|| renderers::render_geometry(&geometry, &render_options))
    });
}

criterion_group!(benches, bench_layout, bench_render_geometry);
criterion_main!(benches);
