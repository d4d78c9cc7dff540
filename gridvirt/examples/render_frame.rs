// Example: rendering a frame with a renderer that sometimes fails.
use gridvirt::{GridOptions, GridVirtualizer, SizeSpec, TryRender, VirtualCell};

fn main() {
    let v = GridVirtualizer::new(
        GridOptions::new(
            1_000,
            20,
            SizeSpec::computed(|i| if i == 3 { f64::NAN } else { 30.0 }),
            90.0,
        )
        .with_viewport_size(240.0, 400.0)
        .with_on_fault(Some(|fault: &gridvirt::Fault| eprintln!("fault: {fault}"))),
    );

    let mut renderer = TryRender(|cell: &VirtualCell| {
        if (cell.row + cell.column) % 7 == 6 {
            Err(format!("no data for ({}, {})", cell.row, cell.column))
        } else {
            Ok(format!("R{}C{}", cell.row, cell.column))
        }
    });
    let frame = v.render_frame(&mut renderer);

    println!(
        "total={:?} origin={:?} cells={} placeholders={} faults={}",
        frame.total,
        frame.origin,
        frame.cells.len(),
        frame.placeholder_count(),
        frame.faults.len(),
    );
    for rc in frame.cells.iter().take(8) {
        println!("{:?} -> {:?}", rc.cell.layout, rc.content);
    }
}
