//! Evtree Core Types and Definitions
//!
//! This crate provides the foundational data model shared by the Evtree
//! crates. It includes:
//!
//! - **Event trees**: The enumerated result of an event tree
//!   ([`event_tree::EventTree`]) with its functional-event header and
//!   sequence records
//! - **Grid**: Row/column coordinates produced by the layout projector
//!   ([`grid`] module)

pub mod event_tree;
pub mod grid;
