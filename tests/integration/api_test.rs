//! API endpoint integration tests
//!
//! Drives the composed application router end to end against an in-memory
//! database: sessions, admin approval, role gates, and the marketplace.

#![allow(dead_code)]

mod accounts;
mod admin;
mod auth;
mod common;
mod marketplace;
