// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session data: configuration, phrases and the editing session.

pub mod config;
pub mod phrases;
pub mod session;
