//! Option-gated value adapters: calendar values, UUIDs,
//! contiguous numeric arrays, and pre-validated JSON fragments.
//!
//! Everything in this module is encode-only except [`Fragment`] and
//! [`Calendar`], which double as object keys under `NON_STR_KEYS`.

pub mod calendar;
pub mod fragment;
pub mod ndarray;

pub use calendar::Calendar;
pub use fragment::Fragment;
pub use ndarray::NumericArray;
