// ABOUTME: Security helper module organization
// ABOUTME: Currently auth cookie handling; session hardening lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 CalTrack

/// Auth cookie helpers
pub mod cookies;
