use std::hint::black_box;
use std::time::Instant;

use glam::{UVec2, Vec2, Vec3};
use tilemap_common::{DenseTileGrid, MaterialHandle, Tile, TileSize, TilemapTransform, Tileset};
use tilemap_cull::{Camera, cull};
use tilemap_render::{CaptureSink, RenderParams, TileDepthMode, TilemapRenderer, TilemapView};

fn make_map(side: u32) -> (DenseTileGrid, Tileset) {
    let tile_size = TileSize::new(16.0, 16.0).expect("valid tile size");
    let tileset = Tileset::from_atlas(tile_size, MaterialHandle(1), 8, 8).expect("valid atlas");
    let tiles = (0..side * side).map(|i| Tile::new(i % 64)).collect();
    let grid = DenseTileGrid::from_tiles(UVec2::splat(side), tiles).expect("grid size matches");
    (grid, tileset)
}

fn camera(side: u32, angle: f32) -> Camera {
    let mut cam = Camera::orthographic(Vec2::new(1920.0, 1080.0));
    let center = side as f32 * 8.0;
    cam.position = Vec3::new(center, center, 0.0);
    cam.angle = angle;
    cam
}

fn bench_cull(side: u32, iterations: usize) {
    let (grid, tileset) = make_map(side);
    let view = TilemapView::new(&grid, &tileset, TilemapTransform::default());
    let input = view.culling_input(RenderParams::default().origin);
    let cam = camera(side, 0.3);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(cull(black_box(&cam), black_box(&input)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  cull ({side}x{side} map, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_render(side: u32, angle: f32, mode: TileDepthMode, iterations: usize) {
    let (grid, tileset) = make_map(side);
    let view = TilemapView::new(&grid, &tileset, TilemapTransform::default());
    let mut renderer = TilemapRenderer::new(RenderParams {
        tile_depth_mode: mode,
        ..RenderParams::default()
    });
    let mut sink = CaptureSink::new();
    let cam = camera(side, angle);

    let start = Instant::now();
    let mut quads = 0;
    for _ in 0..iterations {
        quads = black_box(renderer.render(black_box(&cam), black_box(&view), &mut sink)).emitted_quads;
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  render ({side}x{side} map, angle={angle:.2}, {mode:?}, {quads} quads, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Tilemap Render Benchmarks ===\n");

    println!("Culling:");
    bench_cull(64, 100_000);
    bench_cull(2048, 100_000);

    println!("\nRender (cull + generate + submit):");
    bench_render(64, 0.0, TileDepthMode::Flat, 1000);
    bench_render(1024, 0.0, TileDepthMode::Flat, 200);
    bench_render(1024, 0.785, TileDepthMode::Local, 200);
    bench_render(2048, 0.785, TileDepthMode::World, 200);

    println!("\n=== Done ===");
}
