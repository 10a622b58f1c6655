//! Biowearth operations console core.
//!
//! The console is a set of list views over a realtime document store:
//! vendor/client directories, a product catalog with SKUs, purchase and
//! sales quotes, orders, and a task board. This crate holds everything
//! below the rendering layer — typed entity records, the store contract
//! with an in-memory implementation, the composition-root state that owns
//! the current snapshots, and the aggregation/filter/sort logic behind
//! each view.
//!
//! The centerpiece is [`directory`]: `compute_rows` joins the raw
//! snapshots into one enriched row per company and
//! `apply_filters_and_sort` produces the final ordered table. Both are
//! pure functions re-run wholesale whenever an input snapshot changes.

pub mod directory;
pub mod error;
pub mod helpers;
pub mod services;
pub mod settings;
pub mod state;
pub mod store;
pub mod types;
