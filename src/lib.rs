//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the
//! individual workspace crates. Host applications can depend on
//! `cfstream-workspace` and enable the documented features without wiring
//! each crate individually:
//!
//! - `client`: the Cloudflare Stream client (`core-stream`).
//! - `desktop-shims` (default): the client plus the native transport
//!   implementations from `bridge-desktop`.
