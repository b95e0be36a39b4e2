//! # hubview-domain
//!
//! Pure domain model for the hubview entity view dispatcher.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **entity states** and the **registry snapshot** that holds them
//! - Classify entity ids into **domains**
//! - Resolve domains to **view types** through static membership tables
//! - Decide which **auxiliary panels** (history, logbook) accompany a view
//! - Define the **render tree** produced by instantiating views
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or runtime crates.
//! Loading and instantiation live in the `app` crate.

pub mod error;
pub mod id;
pub mod time;

pub mod classify;
pub mod entity;
pub mod gating;
pub mod registry;
pub mod render;
pub mod view;
