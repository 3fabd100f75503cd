// ABOUTME: Re-exports command modules for reptrack-cli
// ABOUTME: Provides access to analysis, history, and training commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analyze;
pub mod history;
pub mod training;
