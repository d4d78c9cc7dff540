use alloc::vec::Vec;
use core::fmt;

use gridvirt::{GridOptions, GridShape, Overscan, SizeSpec, Viewport};

/// A raw size value: a number from the config layer, or a size spec supplied in code.
#[derive(Clone, Debug)]
pub enum RawSize {
    Value(f64),
    Spec(SizeSpec),
}

impl From<f64> for RawSize {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<SizeSpec> for RawSize {
    fn from(spec: SizeSpec) -> Self {
        Self::Spec(spec)
    }
}

/// Unvalidated grid configuration as it arrives from a form, CLI or config file.
///
/// Every field is optional. Numbers are kept as `f64` so that invalid input (NaN, negative,
/// fractional counts) survives until [`RawGridConfig::sanitize`] can report it.
///
/// With `feature = "serde"`, this type implements `Deserialize` with camelCase field names.
/// Any non-number value (string, bool, array, object) deserializes as an invalid number and
/// `null` as a missing field.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct RawGridConfig {
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub row_count: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub column_count: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::size"))]
    pub row_size: Option<RawSize>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::size"))]
    pub column_size: Option<RawSize>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub viewport_height: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub viewport_width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub overscan_row_count: Option<f64>,
    #[cfg_attr(feature = "serde", serde(deserialize_with = "lenient::number"))]
    pub overscan_column_count: Option<f64>,
}

/// Default for missing or invalid overscan counts.
pub const DEFAULT_OVERSCAN: usize = 1;

/// A configuration field, named as in the camelCase input contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ConfigField {
    RowCount,
    ColumnCount,
    RowSize,
    ColumnSize,
    ViewportHeight,
    ViewportWidth,
    OverscanRowCount,
    OverscanColumnCount,
}

impl ConfigField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RowCount => "rowCount",
            Self::ColumnCount => "columnCount",
            Self::RowSize => "rowSize",
            Self::ColumnSize => "columnSize",
            Self::ViewportHeight => "viewportHeight",
            Self::ViewportWidth => "viewportWidth",
            Self::OverscanRowCount => "overscanRowCount",
            Self::OverscanColumnCount => "overscanColumnCount",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invalid configuration value that was replaced by its fallback.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{field}: invalid value {value}, using {fallback}")]
pub struct ConfigWarning {
    pub field: ConfigField,
    pub value: f64,
    pub fallback: f64,
}

/// Engine options derived from a [`RawGridConfig`], plus what had to be substituted.
#[derive(Clone, Debug)]
pub struct SanitizedConfig {
    pub options: GridOptions,
    pub warnings: Vec<ConfigWarning>,
}

impl SanitizedConfig {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl RawGridConfig {
    /// Validates every field and builds engine options.
    ///
    /// Missing fields take their default (0, or 1 for overscan counts). Invalid values are
    /// replaced by the same default, logged, and listed in [`SanitizedConfig::warnings`].
    /// Size specs supplied in code pass through unchanged; the engine contains their faults.
    pub fn sanitize(&self) -> SanitizedConfig {
        let mut warnings = Vec::new();
        let w = &mut warnings;

        let shape = GridShape::new(
            count(ConfigField::RowCount, self.row_count, 0, w),
            count(ConfigField::ColumnCount, self.column_count, 0, w),
            size(ConfigField::RowSize, self.row_size.as_ref(), w),
            size(ConfigField::ColumnSize, self.column_size.as_ref(), w),
        );
        let viewport = Viewport::new(
            extent(ConfigField::ViewportHeight, self.viewport_height, w),
            extent(ConfigField::ViewportWidth, self.viewport_width, w),
        );
        let overscan = Overscan::new(
            count(
                ConfigField::OverscanRowCount,
                self.overscan_row_count,
                DEFAULT_OVERSCAN,
                w,
            ),
            count(
                ConfigField::OverscanColumnCount,
                self.overscan_column_count,
                DEFAULT_OVERSCAN,
                w,
            ),
        );

        SanitizedConfig {
            options: GridOptions::from_shape(shape)
                .with_viewport(viewport)
                .with_overscan(overscan),
            warnings,
        }
    }
}

fn count(
    field: ConfigField,
    raw: Option<f64>,
    default: usize,
    warnings: &mut Vec<ConfigWarning>,
) -> usize {
    match raw {
        None => default,
        Some(v) if is_count(v) => v as usize,
        Some(v) => {
            substitute(field, v, default as f64, warnings);
            default
        }
    }
}

fn extent(field: ConfigField, raw: Option<f64>, warnings: &mut Vec<ConfigWarning>) -> f64 {
    match raw {
        None => 0.0,
        Some(v) if is_extent(v) => v,
        Some(v) => {
            substitute(field, v, 0.0, warnings);
            0.0
        }
    }
}

fn size(field: ConfigField, raw: Option<&RawSize>, warnings: &mut Vec<ConfigWarning>) -> SizeSpec {
    match raw {
        None => SizeSpec::Fixed(0.0),
        Some(RawSize::Spec(spec)) => spec.clone(),
        Some(RawSize::Value(v)) => SizeSpec::Fixed(extent(field, Some(*v), warnings)),
    }
}

fn is_extent(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn is_count(v: f64) -> bool {
    is_extent(v) && v % 1.0 == 0.0
}

fn substitute(field: ConfigField, value: f64, fallback: f64, warnings: &mut Vec<ConfigWarning>) {
    awarn!(
        field = field.as_str(),
        value,
        fallback,
        "invalid configuration value, substituting fallback"
    );
    warnings.push(ConfigWarning {
        field,
        value,
        fallback,
    });
}

#[cfg(feature = "serde")]
mod lenient {
    use core::fmt;

    use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

    use super::RawSize;

    pub(super) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(Number)
    }

    pub(super) fn size<'de, D>(deserializer: D) -> Result<Option<RawSize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(number(deserializer)?.map(RawSize::Value))
    }

    /// Accepts anything; non-numbers become NaN so sanitization reports them.
    struct Number;

    impl<'de> Visitor<'de> for Number {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(Some(f64::NAN))
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(Some(f64::NAN))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Some(f64::NAN))
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Some(f64::NAN))
        }
    }
}
