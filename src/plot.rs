use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};

use crate::font::{glyph, is_set, text_width, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::sine_table::SineTable;

const MARGIN_LEFT: u32 = 70;
const MARGIN_RIGHT: u32 = 24;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 56;
const GRID_DIVISIONS: u32 = 8;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const GRID: Rgba<u8> = Rgba([220, 220, 224, 255]);
const AXIS: Rgba<u8> = Rgba([0, 0, 0, 255]);
const STEM: Rgba<u8> = Rgba([214, 39, 40, 255]);
const TRACE: Rgba<u8> = Rgba([31, 119, 180, 255]);
const TITLE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const LABEL: Rgba<u8> = Rgba([40, 40, 48, 255]);

#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            title: "Sine Wave".to_string(),
            x_label: "Sample(s)".to_string(),
            y_label: "Sin(x) ->".to_string(),
            width: 1024,
            height: 640,
        }
    }
}

pub fn render_table<P: AsRef<Path>>(table: &SineTable, style: &PlotStyle, path: P) -> ImageResult<()> {
    render(table, style).save(path)
}

/// Amplitude against sample index over a fixed [-1, 1] range.
pub fn render(table: &SineTable, style: &PlotStyle) -> RgbaImage {
    let width = style.width.max(MARGIN_LEFT + MARGIN_RIGHT + GRID_DIVISIONS);
    let height = style.height.max(MARGIN_TOP + MARGIN_BOTTOM + GRID_DIVISIONS);
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    let area = Area {
        left: MARGIN_LEFT,
        top: MARGIN_TOP,
        width: width - MARGIN_LEFT - MARGIN_RIGHT,
        height: height - MARGIN_TOP - MARGIN_BOTTOM,
        last_index: table.len().saturating_sub(1).max(1),
    };

    for i in 0..=GRID_DIVISIONS {
        let x = area.left + area.width * i / GRID_DIVISIONS;
        let y = area.top + area.height * i / GRID_DIVISIONS;
        vline(&mut img, x, area.top, area.bottom(), GRID);
        hline(&mut img, area.left, area.right(), y, GRID);
    }

    for i in 0..=4u32 {
        let index = area.last_index * i as usize / 4;
        let label = index.to_string();
        let x = area.x(index) as i64 - text_width(&label, 1) as i64 / 2;
        draw_text(&mut img, x, area.bottom() as i64 + 6, &label, 1, LABEL);

        let amplitude = 1.0 - i as f64 * 0.5;
        let label = format!("{:.1}", amplitude);
        let x = area.left as i64 - 6 - text_width(&label, 1) as i64;
        let y = area.y(amplitude) as i64 - GLYPH_HEIGHT as i64 / 2;
        draw_text(&mut img, x, y, &label, 1, LABEL);
    }

    let zero = area.y(0.0);
    hline(&mut img, area.left, area.right(), zero, AXIS);
    vline(&mut img, area.left, area.top, area.bottom(), AXIS);

    for sample in table.samples() {
        let x = area.x(sample.index);
        let y = area.y(sample.amplitude);
        vline(&mut img, x, zero.min(y), zero.max(y), STEM);
        fill_rect(&mut img, x as i64 - 1, y as i64 - 1, 3, 3, STEM);
    }

    let mut prev: Option<(u32, u32)> = None;
    for sample in table.samples() {
        let point = (area.x(sample.index), area.y(sample.amplitude));
        if let Some(from) = prev {
            line(&mut img, from, point, TRACE);
        }
        prev = Some(point);
    }

    let title_x = (width as i64 - text_width(&style.title, 2) as i64) / 2;
    draw_text(&mut img, title_x, 12, &style.title, 2, TITLE);

    let x_label_x = area.left as i64 + (area.width as i64 - text_width(&style.x_label, 1) as i64) / 2;
    draw_text(&mut img, x_label_x, height as i64 - 20, &style.x_label, 1, LABEL);

    let y_label_y = area.top as i64 + (area.height as i64 + text_width(&style.y_label, 1) as i64) / 2;
    draw_text_vertical(&mut img, 10, y_label_y, &style.y_label, LABEL);

    img
}

struct Area {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
    last_index: usize,
}

impl Area {
    fn right(&self) -> u32 {
        self.left + self.width
    }

    fn bottom(&self) -> u32 {
        self.top + self.height
    }

    fn x(&self, index: usize) -> u32 {
        let unit = index.min(self.last_index) as f64 / self.last_index as f64;
        self.left + (unit * self.width as f64).round() as u32
    }

    fn y(&self, amplitude: f64) -> u32 {
        let unit = (amplitude.clamp(-1.0, 1.0) + 1.0) / 2.0;
        self.top + ((1.0 - unit) * self.height as f64).round() as u32
    }
}

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(img: &mut RgbaImage, x: i64, y: i64, w: u32, h: u32, color: Rgba<u8>) {
    for dy in 0..h as i64 {
        for dx in 0..w as i64 {
            put(img, x + dx, y + dy, color);
        }
    }
}

fn hline(img: &mut RgbaImage, x0: u32, x1: u32, y: u32, color: Rgba<u8>) {
    for x in x0..=x1 {
        put(img, x as i64, y as i64, color);
    }
}

fn vline(img: &mut RgbaImage, x: u32, y0: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..=y1 {
        put(img, x as i64, y as i64, color);
    }
}

fn line(img: &mut RgbaImage, from: (u32, u32), to: (u32, u32), color: Rgba<u8>) {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (x1, y1) = (to.0 as f64, to.1 as f64);
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0) as u32;
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        put(img, x.round() as i64, y.round() as i64, color);
    }
}

fn draw_text(img: &mut RgbaImage, x: i64, y: i64, text: &str, scale: u32, color: Rgba<u8>) {
    for (n, c) in text.chars().enumerate() {
        let rows = glyph(c);
        let origin = x + (n as u32 * ADVANCE * scale) as i64;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if is_set(&rows, col, row) {
                    let px = origin + (col * scale) as i64;
                    let py = y + (row * scale) as i64;
                    fill_rect(img, px, py, scale, scale, color);
                }
            }
        }
    }
}

/// Reads bottom to top, starting at (`x`, `y`).
fn draw_text_vertical(img: &mut RgbaImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
    for (n, c) in text.chars().enumerate() {
        let rows = glyph(c);
        let origin = y - (n as u32 * ADVANCE) as i64;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if is_set(&rows, col, row) {
                    put(img, x + row as i64, origin - col as i64, color);
                }
            }
        }
    }
}
