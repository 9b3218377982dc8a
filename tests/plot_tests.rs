use bram_rom_tools::font::glyph;
use bram_rom_tools::plot::{render, render_table, PlotStyle};
use bram_rom_tools::sine_table::{SineTable, SineTableConfig};

fn small_table() -> SineTable {
    SineTable::generate(&SineTableConfig {
        samples: 64,
        ..SineTableConfig::default()
    })
    .unwrap()
}

#[test]
fn test_default_labels_keep_arrow() {
    let style = PlotStyle::default();
    assert_eq!(style.y_label, "Sin(x) ->");
    assert!(style.y_label.chars().all(|c| glyph(c) != glyph('~')));
}

#[test]
fn test_render_size_follows_style() {
    let style = PlotStyle {
        width: 400,
        height: 300,
        ..PlotStyle::default()
    };
    let img = render(&small_table(), &style);
    assert_eq!(img.dimensions(), (400, 300));
}

#[test]
fn test_render_draws_something() {
    let img = render(&small_table(), &PlotStyle::default());
    let white = image::Rgba([255, 255, 255, 255]);
    let drawn = img.pixels().filter(|&&p| p != white).count();
    assert!(drawn > 1000);
}

#[test]
fn test_tiny_canvas_does_not_panic() {
    let style = PlotStyle {
        width: 1,
        height: 1,
        ..PlotStyle::default()
    };
    let single = SineTable::generate(&SineTableConfig {
        samples: 1,
        ..SineTableConfig::default()
    })
    .unwrap();
    let img = render(&single, &style);
    assert!(img.width() > 1 && img.height() > 1);
}

#[test]
fn test_png_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sine.png");
    render_table(&small_table(), &PlotStyle::default(), &path).unwrap();

    let loaded = image::open(&path).unwrap();
    assert_eq!(loaded.to_rgba8().width(), PlotStyle::default().width);
}
