// Example: computed sizes, average vs exact range resolution.
use gridvirt::{GridOptions, GridVirtualizer, Overscan, RangeStrategy, ScrollOffset, SizeSpec};

fn main() {
    // Every tenth row is a tall section header.
    let rows = SizeSpec::computed(|i| if i % 10 == 0 { 120.0 } else { 24.0 });
    let columns = SizeSpec::computed(|i| 80.0 + (i % 4) as f64 * 20.0);

    let options = GridOptions::new(50_000, 200, rows, columns)
        .with_viewport_size(600.0, 800.0)
        .with_overscan(Overscan::new(2, 1));

    let mut average = GridVirtualizer::new(options.clone());
    let mut exact = GridVirtualizer::new(options.with_strategy(RangeStrategy::Exact));

    for top in [0.0, 10_000.0, 500_000.0] {
        let offset = ScrollOffset::new(top, 0.0);
        average.set_scroll(offset);
        exact.set_scroll(offset);
        println!(
            "top={top}: average rows={:?} exact rows={:?}",
            average.visible_range().rows,
            exact.visible_range().rows,
        );
    }
    println!("dimensions={:?}", exact.dimensions());
}
