//! Shared parsing utilities.
//!
//! Header recognition, timestamp normalization and message classification
//! live here so the parser itself stays a single left-to-right loop.

pub mod whatsapp;

pub use whatsapp::{
    HeaderLine, HeaderStyle, classify, detect_date_order, detect_header_style,
    resolve_two_digit_year, strip_marks,
};
