use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use gridvirt::{
    Align, CallbackError, CellContent, GridOptions, GridVirtualizer, Overscan, ScrollOffset,
    SizeSpec, Viewport, VirtualCell,
};

fn scenario_config() -> RawGridConfig {
    RawGridConfig {
        row_count: Some(10.0),
        column_count: Some(5.0),
        row_size: Some(50.0.into()),
        column_size: Some(100.0.into()),
        viewport_height: Some(400.0),
        viewport_width: Some(500.0),
        overscan_row_count: Some(0.0),
        overscan_column_count: Some(0.0),
    }
}

fn fields(warnings: &[ConfigWarning]) -> Vec<ConfigField> {
    warnings.iter().map(|w| w.field).collect()
}

#[test]
fn missing_fields_take_defaults_silently() {
    let sanitized = RawGridConfig::default().sanitize();
    assert!(sanitized.is_clean());

    let o = &sanitized.options;
    assert_eq!(o.shape.row_count, 0);
    assert_eq!(o.shape.column_count, 0);
    assert_eq!(o.shape.row_size.fixed_value(), Some(0.0));
    assert_eq!(o.shape.column_size.fixed_value(), Some(0.0));
    assert_eq!(o.viewport, Viewport::new(0.0, 0.0));
    assert_eq!(o.overscan, Overscan::new(DEFAULT_OVERSCAN, DEFAULT_OVERSCAN));

    let v = GridVirtualizer::new(sanitized.options);
    assert!(v.is_empty());
}

#[test]
fn invalid_values_are_replaced_and_reported() {
    let raw = RawGridConfig {
        row_count: Some(-3.0),
        column_count: Some(2.5),
        row_size: Some(f64::NAN.into()),
        column_size: Some(100.0.into()),
        viewport_height: Some(f64::INFINITY),
        viewport_width: Some(500.0),
        overscan_row_count: Some(-1.0),
        overscan_column_count: Some(3.0),
    };
    let sanitized = raw.sanitize();

    assert_eq!(
        fields(&sanitized.warnings),
        [
            ConfigField::RowCount,
            ConfigField::ColumnCount,
            ConfigField::RowSize,
            ConfigField::ViewportHeight,
            ConfigField::OverscanRowCount,
        ]
    );
    assert_eq!(sanitized.warnings[0].value, -3.0);
    assert_eq!(sanitized.warnings[0].fallback, 0.0);
    assert!(sanitized.warnings[2].value.is_nan());
    assert_eq!(sanitized.warnings[4].fallback, 1.0);

    let o = &sanitized.options;
    assert_eq!(o.shape.row_count, 0);
    assert_eq!(o.shape.column_count, 0);
    assert_eq!(o.shape.row_size.fixed_value(), Some(0.0));
    assert_eq!(o.shape.column_size.fixed_value(), Some(100.0));
    assert_eq!(o.viewport, Viewport::new(0.0, 500.0));
    assert_eq!(o.overscan, Overscan::new(1, 3));
}

#[test]
fn warning_messages_name_the_field() {
    let raw = RawGridConfig {
        row_count: Some(-3.0),
        ..RawGridConfig::default()
    };
    let warnings = raw.sanitize().warnings;
    assert_eq!(
        alloc::format!("{}", warnings[0]),
        "rowCount: invalid value -3, using 0"
    );
}

#[test]
fn size_specs_pass_through_sanitization() {
    let spec = SizeSpec::computed(|i| if i == 3 { f64::NAN } else { 20.0 });
    let raw = RawGridConfig {
        row_size: Some(spec.into()),
        ..scenario_config()
    };
    let sanitized = raw.sanitize();
    assert!(sanitized.is_clean());
    assert!(!sanitized.options.shape.row_size.is_fixed());

    // The engine contains the faulty index itself.
    let v = GridVirtualizer::new(sanitized.options);
    assert_eq!(v.total_size().height, 9.0 * 20.0 + 50.0);
    assert_eq!(v.fault_count(), 1);
}

#[test]
fn sanitized_scenario_matches_the_engine() {
    let (c, warnings) = GridController::<String>::from_config(&scenario_config());
    assert!(warnings.is_empty());

    let r = c.virtualizer().visible_range();
    assert_eq!((r.rows.first, r.rows.last), (0, 8));
    assert_eq!((r.columns.first, r.columns.last), (0, 4));
    assert_eq!(c.virtualizer().total_size().height, 500.0);
}

#[test]
fn on_scroll_reports_write_backs() {
    let (mut c, _) = GridController::<String>::from_config(&scenario_config());

    assert_eq!(c.on_scroll(50.0, 0.0), None);
    assert_eq!(
        c.on_scroll(200_000.0, 0.0),
        Some(ScrollOffset::new(100.0, 0.0))
    );
    assert_eq!(c.virtualizer().scroll(), ScrollOffset::new(100.0, 0.0));
    assert_eq!(
        c.on_scroll(f64::NAN, -1.0),
        Some(ScrollOffset::new(0.0, 0.0))
    );
}

#[test]
fn on_resize_reports_corrected_scroll() {
    let (mut c, _) = GridController::<String>::from_config(&scenario_config());
    c.on_scroll(100.0, 0.0);

    assert_eq!(c.on_resize(450.0, 500.0), Some(ScrollOffset::new(50.0, 0.0)));
    assert_eq!(c.on_resize(400.0, 500.0), None);
    assert_eq!(c.virtualizer().scroll().top, 50.0);
}

#[test]
fn apply_config_recomputes_once_and_keeps_scroll() {
    let big = RawGridConfig {
        row_count: Some(1000.0),
        overscan_row_count: Some(1.0),
        ..scenario_config()
    };
    let (mut c, _) = GridController::<String>::from_config(&big);
    assert_eq!(c.on_scroll(10_000.0, 0.0), None);

    let before = c.virtualizer().recompute_count();
    let update = c.apply_config(&RawGridConfig {
        row_count: Some(100.0),
        ..big.clone()
    });
    assert!(update.warnings.is_empty());
    assert_eq!(update.scroll, Some(ScrollOffset::new(4600.0, 0.0)));
    assert_eq!(c.virtualizer().recompute_count(), before + 1);
    assert_eq!(c.virtualizer().visible_range().rows.first, 91);

    // Re-applying the same configuration changes nothing.
    let update = c.apply_config(&RawGridConfig {
        row_count: Some(100.0),
        ..big
    });
    assert_eq!(update.scroll, None);
    assert_eq!(c.virtualizer().recompute_count(), before + 1);
}

#[test]
fn apply_config_keeps_hooks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut c = GridController::<String>::new(
        GridOptions::new(10, 5, 50.0, 100.0)
            .with_viewport_size(400.0, 500.0)
            .with_on_change(Some(move |_: &GridVirtualizer| {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
    );

    let update = c.apply_config(&RawGridConfig {
        row_count: Some(20.0),
        viewport_height: Some(-1.0),
        ..scenario_config()
    });
    assert_eq!(fields(&update.warnings), [ConfigField::ViewportHeight]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(c.virtualizer().options().on_change.is_some());
    assert_eq!(c.virtualizer().row_count(), 20);
}

#[test]
fn missing_renderer_yields_defaults() {
    let (c, _) = GridController::<u32>::from_config(&scenario_config());
    assert!(!c.has_renderer());

    let frame = c.frame();
    assert_eq!(frame.cells.len(), 45);
    assert!(
        frame
            .cells
            .iter()
            .all(|rc| rc.content == CellContent::Rendered(0))
    );
}

#[test]
fn renderer_failures_become_placeholders() {
    let (c, _) = GridController::<usize>::from_config(&scenario_config());
    let c = c.with_try_renderer(|cell: &VirtualCell| {
        if cell.row == 0 {
            Err("empty row")
        } else {
            Ok(cell.row * 100 + cell.column)
        }
    });
    assert!(c.has_renderer());

    let frame = c.frame();
    assert_eq!(frame.placeholder_count(), 5);
    assert_eq!(frame.faults.len(), 5);
    assert_eq!(
        frame.cells[0].content,
        CellContent::Placeholder(CallbackError::Failed("empty row".into()))
    );
    assert_eq!(frame.cells[5].content, CellContent::Rendered(100));
}

#[test]
fn renderer_can_be_replaced_and_removed() {
    let (mut c, _) = GridController::<usize>::from_config(&scenario_config());
    let mut c2 = c.clone().with_renderer(|cell: &VirtualCell| cell.column + 1);
    assert_eq!(c2.frame().cells[1].content, CellContent::Rendered(2));

    c2.set_renderer(None);
    assert_eq!(c2.frame().cells[1].content, CellContent::Rendered(0));

    let shared: RenderFn<usize> = Arc::new(|cell: &VirtualCell| -> Result<usize, CallbackError> { Ok(cell.row) });
    c.set_renderer(Some(shared));
    assert_eq!(c.frame().cells[5].content, CellContent::Rendered(1));
}

#[test]
fn scroll_to_cell_is_clamped() {
    let (mut c, _) = GridController::<String>::from_config(&RawGridConfig {
        row_count: Some(1000.0),
        ..scenario_config()
    });
    assert_eq!(
        c.scroll_to_cell(999, 0, Align::Start),
        ScrollOffset::new(49_600.0, 0.0)
    );
    assert_eq!(c.into_virtualizer().scroll().top, 49_600.0);
}

#[cfg(feature = "serde")]
#[test]
fn deserializes_camel_case_config() {
    let raw: RawGridConfig = serde_json::from_str(
        r#"{
            "rowCount": 10,
            "columnCount": 5,
            "rowSize": 50,
            "columnSize": 100.5,
            "viewportHeight": 400,
            "viewportWidth": 500,
            "overscanRowCount": 0
        }"#,
    )
    .unwrap();
    assert_eq!(raw.row_count, Some(10.0));
    assert!(matches!(raw.column_size, Some(RawSize::Value(v)) if v == 100.5));
    assert_eq!(raw.overscan_column_count, None);

    let sanitized = raw.sanitize();
    assert!(sanitized.is_clean());
    assert_eq!(sanitized.options.overscan, Overscan::new(0, 1));
}

#[cfg(feature = "serde")]
#[test]
fn non_numbers_are_invalid_and_null_is_missing() {
    let raw: RawGridConfig = serde_json::from_str(
        r#"{
            "rowCount": "12",
            "columnCount": true,
            "rowSize": null,
            "columnSize": [1],
            "viewportHeight": {"h": 1},
            "viewportWidth": -5,
            "somethingElse": 3
        }"#,
    )
    .unwrap();
    assert!(raw.row_size.is_none());

    let sanitized = raw.sanitize();
    assert_eq!(
        fields(&sanitized.warnings),
        [
            ConfigField::RowCount,
            ConfigField::ColumnCount,
            ConfigField::ColumnSize,
            ConfigField::ViewportHeight,
            ConfigField::ViewportWidth,
        ]
    );
    assert!(sanitized.warnings[0].value.is_nan());
    assert_eq!(sanitized.warnings[4].value, -5.0);
}

#[cfg(feature = "serde")]
#[test]
fn config_warnings_serialize() {
    let warning = ConfigWarning {
        field: ConfigField::OverscanRowCount,
        value: -1.0,
        fallback: 1.0,
    };
    let json = serde_json::to_string(&warning).unwrap();
    assert_eq!(
        json,
        r#"{"field":"overscanRowCount","value":-1.0,"fallback":1.0}"#
    );
}
