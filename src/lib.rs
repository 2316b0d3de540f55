//! Home Plan Engine
//!
//! This crate provides the financial calculation engine behind home-building
//! financing proposals: tiered plan budgets, fixed-rate monthly loan payments,
//! and the year-by-year mortgage tax-deduction projection, plus an HTTP API
//! that composes them into a proposal.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
