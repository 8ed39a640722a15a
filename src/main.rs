use nannou::prelude::*;

use terrain::util::gaussian_blur;
use terrain::{generate_terrain, HeightGrid, Terrain, TerrainConfig};

const SIZE: u32 = 800;

/// Standard deviation of the display blur, in cells.
const BLUR: f32 = 1.0;

/// Erosion deltas beyond this many units saturate the difference colormap.
const DELTA_RANGE: f32 = 8.0;

struct Model {
    terrain: Terrain,
    /// Grids prepared for drawing, indexed by [DrawingMode].
    eroded: HeightGrid,
    initial: HeightGrid,
    delta: HeightGrid,
    mode: DrawingMode,
}

fn main() {
    env_logger::init();
    nannou::app(model).run();
}

fn model(app: &App) -> Model {
    app.new_window()
        .size(SIZE, SIZE)
        .view(view)
        .mouse_released(mouse_released)
        .build()
        .unwrap();

    regenerate(TerrainConfig::default(), DrawingMode::Eroded)
}

fn regenerate(config: TerrainConfig, mode: DrawingMode) -> Model {
    let terrain = match generate_terrain(config) {
        Ok(terrain) => terrain,
        Err(err) => {
            log::error!("invalid terrain config: {err}");
            std::process::exit(1);
        }
    };

    let eroded = gaussian_blur(&terrain.heights, BLUR);
    let initial = gaussian_blur(&terrain.initial, BLUR);
    let delta = terrain.erosion_delta();

    Model {
        terrain,
        eroded,
        initial,
        delta,
        mode,
    }
}

#[derive(Debug, Copy, Clone)]
enum DrawingMode {
    Eroded,
    Initial,
    Erosion,
}

fn cycle_drawing_mode(mode: DrawingMode) -> DrawingMode {
    match mode {
        DrawingMode::Eroded => DrawingMode::Initial,
        DrawingMode::Initial => DrawingMode::Erosion,
        DrawingMode::Erosion => DrawingMode::Eroded,
    }
}

fn mouse_released(_: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        let mut config = model.terrain.config;

        config.rain.seed = random();

        *model = regenerate(config, model.mode);
    }

    if button == MouseButton::Right {
        model.mode = cycle_drawing_mode(model.mode);
        log::info!("drawing {:?}", model.mode);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    draw.background().color(SNOW);

    match model.mode {
        DrawingMode::Eroded => draw_heights(&draw, &model.eroded),
        DrawingMode::Initial => draw_heights(&draw, &model.initial),
        DrawingMode::Erosion => draw_delta(&draw, &model.delta),
    }

    draw.to_frame(app, &frame).unwrap();
}

/// Elevation in the reversed yellow-green map, so high ground is pale and valleys are dark.
fn draw_heights(draw: &Draw, grid: &HeightGrid) {
    let Some((min, max)) = grid.minmax() else {
        return;
    };

    draw_grid(draw, grid, |h| {
        let t = map_clamp(h, min, max, 1.0, 0.0);
        colorous::YELLOW_GREEN.eval_continuous(t as f64).as_tuple()
    });
}

/// Erosion in red, deposition in blue.
fn draw_delta(draw: &Draw, grid: &HeightGrid) {
    draw_grid(draw, grid, |d| {
        let t = map_clamp(d, -DELTA_RANGE, DELTA_RANGE, 0.0, 1.0);
        colorous::RED_BLUE.eval_continuous(t as f64).as_tuple()
    });
}

fn draw_grid(draw: &Draw, grid: &HeightGrid, color: impl Fn(f32) -> (u8, u8, u8)) {
    let n = grid.size();
    let cell = SIZE as f32 / n as f32;
    let half = SIZE as f32 / 2.0;

    for row in 0..n {
        for col in 0..n {
            let x = -half + (col as f32 + 0.5) * cell;
            let y = half - (row as f32 + 0.5) * cell;

            draw.rect()
                .x_y(x, y)
                .w_h(cell, cell)
                .color(Rgb::from(color(grid[(row, col)])));
        }
    }
}

fn map_clamp(val: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max <= in_min {
        return out_min;
    }

    let lo = out_min.min(out_max);
    let hi = out_min.max(out_max);

    map_range(val, in_min, in_max, out_min, out_max).clamp(lo, hi)
}
