// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

#![allow(unsafe_code)]

use std::{ffi::CStr, os::raw::c_int};

use crate::{consts::UNKNOWN_STATUS, Subsystem, SubsystemError};

/// Describe a status code using the subsystem's own error strings.
pub fn describe<S: Subsystem + ?Sized>(sys: &S, status: c_int) -> String {
    let text = sys.strerror(status);
    if text.is_null() {
        return UNKNOWN_STATUS.to_string();
    }
    // Library-owned and static: copy, never free.
    unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
}

/// Turn a negative status into a [`SubsystemError`], passing non-negative
/// statuses through.
pub(crate) fn check<S, F>(
    sys: &S,
    status: c_int,
    context: F,
) -> Result<c_int, SubsystemError>
where
    S: Subsystem + ?Sized,
    F: FnOnce() -> String,
{
    if status >= 0 {
        return Ok(status);
    }
    Err(error(sys, status, context()))
}

/// Build the error for a status already known to be negative.
pub(crate) fn error<S: Subsystem + ?Sized>(
    sys: &S,
    status: c_int,
    context: impl Into<String>,
) -> SubsystemError {
    SubsystemError::new(status, describe(sys, status), context)
}
