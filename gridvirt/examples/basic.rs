// Example: a 100k x 100k fixed-size grid, scroll-to-cell, and relative layout.
use gridvirt::{Align, GridOptions, GridVirtualizer, ScrollOffset};

fn main() {
    let mut v = GridVirtualizer::new(
        GridOptions::new(100_000, 100_000, 50.0, 100.0).with_viewport_size(400.0, 500.0),
    );
    v.set_scroll(ScrollOffset::new(123_456.0, 654_321.0));

    let mut cells = Vec::new();
    v.collect_cells(&mut cells);
    println!("total_size={:?}", v.total_size());
    println!("visible_range={:?}", v.visible_range());
    println!("origin={:?}", v.origin());
    println!("first_cell={:?}", cells.first());

    let applied = v.scroll_to_cell(99_999, 99_999, Align::End);
    println!("after scroll_to_cell: offset={applied:?}");
    println!("last_cell={:?}", v.cell_layout(99_999, 99_999));
}
