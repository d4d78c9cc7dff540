// Example: sanitizing raw configuration and driving a controller with UI events.
use gridvirt::{Align, VirtualCell};
use gridvirt_adapter::{GridController, RawGridConfig};

fn main() {
    let raw = RawGridConfig {
        row_count: Some(50_000.0),
        column_count: Some(-4.0),
        row_size: Some(32.0.into()),
        column_size: Some(120.0.into()),
        viewport_height: Some(640.0),
        viewport_width: Some(f64::NAN),
        ..RawGridConfig::default()
    };

    let (c, warnings) = GridController::<String>::from_config(&raw);
    for w in &warnings {
        println!("warning: {w}");
    }
    let mut c = c.with_renderer(|cell: &VirtualCell| format!("{}:{}", cell.row, cell.column));

    // Fix the invalid fields and apply again.
    let update = c.apply_config(&RawGridConfig {
        column_count: Some(40.0),
        viewport_width: Some(960.0),
        ..raw
    });
    println!("apply_config: warnings={} scroll={:?}", update.warnings.len(), update.scroll);

    if let Some(write_back) = c.on_scroll(10_000_000.0, 0.0) {
        println!("scroll clamped, write back {write_back:?}");
    }
    c.scroll_to_cell(25_000, 20, Align::Center);

    let frame = c.frame();
    println!(
        "total={:?} origin={:?} range={:?} cells={}",
        frame.total,
        frame.origin,
        frame.range,
        frame.cells.len()
    );
}
