// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for backgrounds, phrase files and reports.

pub mod media;
pub mod phrases;
pub mod serialization;
