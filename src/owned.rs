// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Strings allocated by the subsystem on behalf of the caller.

#![allow(unsafe_code)]

use std::{
    ffi::CStr,
    os::raw::{c_char, c_int},
    ptr::{self, NonNull},
};

use crate::{status, Result, Subsystem};

/// A C string the caller must release with the host allocator.
///
/// Freed exactly once, when dropped.
struct Allocated<'s, S: Subsystem + ?Sized> {
    sys: &'s S,
    ptr: NonNull<c_char>,
}

impl<S: Subsystem + ?Sized> Allocated<'_, S> {
    fn to_string_lossy(&self) -> String {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }
}

impl<S: Subsystem + ?Sized> Drop for Allocated<'_, S> {
    fn drop(&mut self) {
        unsafe {
            self.sys.free(self.ptr.as_ptr().cast());
        }
    }
}

/// Call an allocating subsystem function and copy out the string it wrote.
///
/// Nothing is freed when `call` fails, since the subsystem only allocates on
/// success.
pub(crate) fn resolve<S, C, F>(sys: &S, call: C, context: F) -> Result<String>
where
    S: Subsystem + ?Sized,
    C: FnOnce(*mut *mut c_char) -> c_int,
    F: FnOnce() -> String,
{
    let mut raw = ptr::null_mut();
    let status = call(ptr::addr_of_mut!(raw));
    status::check(sys, status, context)?;

    Ok(match NonNull::new(raw) {
        Some(ptr) => Allocated { sys, ptr }.to_string_lossy(),
        None => String::new(),
    })
}
