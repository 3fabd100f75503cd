// ABOUTME: Shared benchmark fixtures for the reptrack Criterion suites
// ABOUTME: Exposes synthetic frame and rating generators to the benchmark binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Common benchmark fixtures.

pub mod fixtures;
