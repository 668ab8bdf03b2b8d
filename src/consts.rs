// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Hard-coded constants used throughout the library for talking to the sound
//! subsystem.

use std::os::raw::c_int;

/// Shared object that provides the ALSA API.
#[allow(unused)] // Only loaded on Linux
pub(crate) const LIBRARY: &str = "libasound.so.2";

/// Cursor value meaning "before the first item" when passed to a `*_next`
/// query, and "no more items" when written back by one.
pub(crate) const SENTINEL: c_int = -1;

/// Prefix of the address used to open a control channel (`hw:0`, `hw:1`, …).
pub(crate) const CONTROL_PREFIX: &str = "hw:";

/// Query statuses meaning the device or control handle has gone away
/// (`-ENODEV`, `-EBADFD`), rather than a direction being unsupported.
pub(crate) const GONE: [c_int; 2] = [-19, -77];

/// Message used when the subsystem has no description for a status code.
pub(crate) const UNKNOWN_STATUS: &str = "Unknown error";
