//! Contiguous numeric-array serialization (the `SERIALIZE_NUMPY` adapter).

use chrono::NaiveDateTime;
use ndarray::{ArrayD, ArrayViewD, Axis};

use crate::adapters::calendar;
use crate::error::{EncodeError, EncodeErrorKind};
use crate::number;
use crate::options::Options;
use crate::string;

/// The unit a [`NumericArray::DateTime64`] element's epoch tick count is
/// expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatetimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    /// Always rejected on encode; see [`write`].
    Picoseconds,
}

/// A contiguous, row-major (C order) n-dimensional numeric block.
///
/// Each element variant mirrors a numeric dtype this adapter supports.
/// `DateTime64` elements are ticks since the Unix epoch in the given unit;
/// `None` represents `NaT`.
#[derive(Debug, Clone)]
pub enum NumericArray {
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    Bool(ArrayD<bool>),
    F16(ArrayD<half::f16>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    DateTime64(ArrayD<Option<i64>>, DatetimeUnit),
}

fn not_contiguous() -> EncodeError {
    EncodeError::new(EncodeErrorKind::UnsupportedType(
        "numeric array is not C contiguous; use flat conversion in the fallback hook".to_string(),
    ))
}

fn zero_dim() -> EncodeError {
    EncodeError::new(EncodeErrorKind::UnsupportedType(
        "numeric array is a zero-dimensional scalar".to_string(),
    ))
}

/// Writes `arr` as nested JSON arrays.
pub(crate) fn write(out: &mut Vec<u8>, arr: &NumericArray, options: Options) -> Result<(), EncodeError> {
    if !options.contains(Options::SERIALIZE_NUMPY) {
        return Err(EncodeError::new(EncodeErrorKind::UnsupportedType(
            "NdArray".to_string(),
        )));
    }

    match arr {
        NumericArray::I8(a) => write_scalar_array(out, a, |out, v| number::write_int(out, i64::from(*v))),
        NumericArray::I16(a) => write_scalar_array(out, a, |out, v| number::write_int(out, i64::from(*v))),
        NumericArray::I32(a) => write_scalar_array(out, a, |out, v| number::write_int(out, i64::from(*v))),
        NumericArray::I64(a) => write_scalar_array(out, a, |out, v| number::write_int(out, *v)),
        NumericArray::U8(a) => write_scalar_array(out, a, |out, v| number::write_uint(out, u64::from(*v))),
        NumericArray::U16(a) => write_scalar_array(out, a, |out, v| number::write_uint(out, u64::from(*v))),
        NumericArray::U32(a) => write_scalar_array(out, a, |out, v| number::write_uint(out, u64::from(*v))),
        NumericArray::U64(a) => write_scalar_array(out, a, |out, v| number::write_uint(out, *v)),
        NumericArray::Bool(a) => write_scalar_array(out, a, |out, v| {
            out.extend_from_slice(if *v { b"true" } else { b"false" });
        }),
        NumericArray::F16(a) => write_scalar_array(out, a, |out, v| number::write_float(out, v.to_f64())),
        NumericArray::F32(a) => write_scalar_array(out, a, |out, v| number::write_float(out, f64::from(*v))),
        NumericArray::F64(a) => write_scalar_array(out, a, |out, v| number::write_float(out, *v)),
        NumericArray::DateTime64(a, unit) => write_datetime64(out, a, *unit, options),
    }
}

fn write_scalar_array<T>(
    out: &mut Vec<u8>,
    arr: &ArrayD<T>,
    mut write_elem: impl FnMut(&mut Vec<u8>, &T),
) -> Result<(), EncodeError> {
    if arr.ndim() == 0 {
        return Err(zero_dim());
    }
    if !arr.is_standard_layout() {
        return Err(not_contiguous());
    }
    write_dim(out, arr.view(), &mut |out, v| {
        write_elem(out, v);
        Ok(())
    })
}

fn write_dim<T>(
    out: &mut Vec<u8>,
    view: ArrayViewD<'_, T>,
    write_elem: &mut impl FnMut(&mut Vec<u8>, &T) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    out.push(b'[');
    if view.ndim() == 1 {
        for (i, v) in view.iter().enumerate() {
            if i > 0 {
                out.push(b',');
            }
            write_elem(out, v)?;
        }
    } else {
        for (i, sub) in view.axis_iter(Axis(0)).enumerate() {
            if i > 0 {
                out.push(b',');
            }
            write_dim(out, sub, write_elem)?;
        }
    }
    out.push(b']');
    Ok(())
}

/// Converts epoch ticks in `unit` to a naive UTC datetime, or `None` if the
/// tick count is out of the range `chrono` can represent.
fn ticks_to_naive(ticks: i64, unit: DatetimeUnit) -> Option<NaiveDateTime> {
    let (secs, nanos) = match unit {
        DatetimeUnit::Seconds => (ticks, 0),
        DatetimeUnit::Milliseconds => (ticks.div_euclid(1_000), ticks.rem_euclid(1_000) * 1_000_000),
        DatetimeUnit::Microseconds => (ticks.div_euclid(1_000_000), ticks.rem_euclid(1_000_000) * 1_000),
        DatetimeUnit::Nanoseconds => (ticks.div_euclid(1_000_000_000), ticks.rem_euclid(1_000_000_000)),
        DatetimeUnit::Picoseconds => unreachable!("picoseconds is rejected before this is called"),
    };
    #[expect(clippy::cast_sign_loss, reason = "rem_euclid guarantees a non-negative result")]
    let nanos = nanos as u32;
    chrono::DateTime::<chrono::Utc>::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

fn write_datetime64(
    out: &mut Vec<u8>,
    arr: &ArrayD<Option<i64>>,
    unit: DatetimeUnit,
    options: Options,
) -> Result<(), EncodeError> {
    if matches!(unit, DatetimeUnit::Picoseconds) {
        return Err(EncodeError::new(EncodeErrorKind::UnsupportedType(
            "unsupported datetime64 unit: picoseconds".to_string(),
        )));
    }
    if arr.ndim() == 0 {
        return Err(zero_dim());
    }
    if !arr.is_standard_layout() {
        return Err(not_contiguous());
    }
    if arr.iter().any(Option::is_none) {
        return Err(EncodeError::new(EncodeErrorKind::UnsupportedType(
            "NaT".to_string(),
        )));
    }
    let omit_micros = options.contains(Options::OMIT_MICROSECONDS);
    write_dim(out, arr.view(), &mut |out, v| {
        let ticks = v.expect("checked for None above");
        let naive = ticks_to_naive(ticks, unit).ok_or_else(|| {
            EncodeError::new(EncodeErrorKind::UnsupportedType(
                "datetime64 tick out of range".to_string(),
            ))
        })?;
        string::write_escaped(out, &calendar::format_datetime(naive, omit_micros));
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::{write, DatetimeUnit, NumericArray};
    use crate::options::Options;
    use ndarray::{array, ArrayD, IxDyn};

    fn encode(arr: &NumericArray, options: Options) -> Result<String, crate::error::EncodeError> {
        let mut out = Vec::new();
        write(&mut out, arr, options)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn writes_nested_i32_array() {
        let a: ArrayD<i32> = array![[1, 2], [3, 4]].into_dyn();
        let s = encode(&NumericArray::I32(a), Options::SERIALIZE_NUMPY).unwrap();
        assert_eq!(s, "[[1,2],[3,4]]");
    }

    #[test]
    fn writes_1d_f64_with_non_finite_as_null() {
        let a: ArrayD<f64> = array![1.0, f64::NAN, -0.0].into_dyn();
        let s = encode(&NumericArray::F64(a), Options::SERIALIZE_NUMPY).unwrap();
        assert_eq!(s, "[1.0,null,-0.0]");
    }

    #[test]
    fn empty_dimension_emits_empty_array() {
        let a: ArrayD<i32> = ArrayD::from_shape_vec(IxDyn(&[0, 3]), vec![]).unwrap();
        let s = encode(&NumericArray::I32(a), Options::SERIALIZE_NUMPY).unwrap();
        assert_eq!(s, "[]");
    }

    #[test]
    fn without_serialize_numpy_option_is_an_error() {
        let a: ArrayD<i32> = array![1, 2].into_dyn();
        assert!(encode(&NumericArray::I32(a), Options::default()).is_err());
    }

    #[test]
    fn non_contiguous_layout_is_rejected() {
        let a: ArrayD<i32> = array![[1, 2, 3], [4, 5, 6]].into_dyn();
        let transposed = a.reversed_axes();
        assert!(!transposed.is_standard_layout());
        let err = encode(&NumericArray::I32(transposed), Options::SERIALIZE_NUMPY).unwrap_err();
        assert!(err.to_string().contains("not C contiguous"));
    }

    #[test]
    fn picosecond_datetime64_is_rejected() {
        let a: ArrayD<Option<i64>> = array![Some(1_i64)].into_dyn();
        let err = encode(&NumericArray::DateTime64(a, DatetimeUnit::Picoseconds), Options::SERIALIZE_NUMPY)
            .unwrap_err();
        assert!(err.to_string().contains("picosecond"));
    }

    #[test]
    fn nat_datetime64_element_is_rejected() {
        let a: ArrayD<Option<i64>> = array![Some(1_i64), None].into_dyn();
        assert!(encode(&NumericArray::DateTime64(a, DatetimeUnit::Seconds), Options::SERIALIZE_NUMPY).is_err());
    }

    #[test]
    fn datetime64_seconds_writes_iso_string() {
        let a: ArrayD<Option<i64>> = array![Some(1_609_459_200_i64)].into_dyn();
        let s = encode(&NumericArray::DateTime64(a, DatetimeUnit::Seconds), Options::SERIALIZE_NUMPY).unwrap();
        assert_eq!(s, r#"["2021-01-01T00:00:00"]"#);
    }

    #[test]
    fn datetime64_microseconds_writes_fraction() {
        let a: ArrayD<Option<i64>> = array![Some(1_609_459_200_172_000_i64)].into_dyn();
        let s = encode(&NumericArray::DateTime64(a, DatetimeUnit::Microseconds), Options::SERIALIZE_NUMPY).unwrap();
        assert_eq!(s, r#"["2021-01-01T00:00:00.172000"]"#);
    }
}
