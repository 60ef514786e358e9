//! Payroll Engine for statutory net pay
//!
//! This crate computes net pay from gross pay by applying a progressive
//! social-security contribution, an income-tax withholding that takes the
//! cheaper of an itemized and a simplified deduction method, and optional
//! fixed and percentage discounts. The brackets and constants are loaded
//! from a YAML schedule directory so that a new tax year needs no code
//! change.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
