// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
#![cfg_attr(not(test), no_std)]

pub mod divmod;
pub mod malloc;
pub mod printf;
pub mod stdio;
pub mod util;
