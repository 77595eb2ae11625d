// ABOUTME: Test helper module organization
// ABOUTME: Houses the axum request builder used by the route tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

#![allow(dead_code)]

pub mod axum_test;
