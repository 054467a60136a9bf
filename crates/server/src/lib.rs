// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! AGMP Texas Hold'em server.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod game;
pub mod server;
pub use server::{Config, SessionRegistry, run, serve};
pub mod session;
