// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Card rasterization and batch deck export.

pub mod card;
pub mod deck;
pub mod font;
