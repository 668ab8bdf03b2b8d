// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! The native sound-control API, as seen by the rest of the crate.
//!
//! Every method maps one-to-one onto a libasound function and keeps its
//! calling convention: status codes are returned as `c_int`, negative on
//! failure, and results are written through out-pointers.  Nothing above this
//! module deals with raw status codes or sentinel values directly.

#![allow(unsafe_code)]

use std::os::raw::{c_char, c_int, c_uint, c_void};

use crate::Direction;

/// Control channel open mode
#[allow(unused)]
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CtlMode {
    /// Blocking mode
    Block = 0,
    /// Non blocking mode
    Nonblock = 1,
    /// Async notification
    Async = 2,
    /// Read only (blocking)
    ReadOnly = 4,
}

/// Raw MIDI stream (direction)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RawmidiStream {
    /// Output stream
    Output = 0,
    /// Input stream
    Input = 1,
}

impl From<Direction> for RawmidiStream {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Input => RawmidiStream::Input,
            Direction::Output => RawmidiStream::Output,
        }
    }
}

/// The sound subsystem API used for discovery.
///
/// [`Asound`](crate::Asound) implements this on top of libasound; tests
/// implement it with scripted fakes.
///
/// # Safety
/// Implementors must honor the libasound contracts for every method:
///  - `strerror()` returns null or a nul-terminated string that lives for the
///    rest of the program and is never freed by the caller.
///  - `card_get_name()` / `card_get_longname()` only write a pointer on
///    success, and that pointer must be released with `free()`.
///  - `rawmidi_info_get_name()` returns a string owned by the descriptor, valid
///    until the descriptor is next written or freed.
///  - A descriptor of `rawmidi_info_sizeof()` zeroed bytes, aligned to 8, is a
///    valid descriptor for every `rawmidi_info_*` method.
pub unsafe trait Subsystem {
    /// `snd_strerror()`
    fn strerror(&self, status: c_int) -> *const c_char;

    /// `snd_card_next()`
    fn card_next(&self, card: &mut c_int) -> c_int;

    /// `snd_card_get_name()`
    ///
    /// # Safety
    /// `name` must be valid for a pointer-sized write.
    unsafe fn card_get_name(&self, card: c_int, name: *mut *mut c_char) -> c_int;

    /// `snd_card_get_longname()`
    ///
    /// # Safety
    /// `name` must be valid for a pointer-sized write.
    unsafe fn card_get_longname(
        &self,
        card: c_int,
        name: *mut *mut c_char,
    ) -> c_int;

    /// Host allocator `free()`.
    ///
    /// # Safety
    /// `ptr` must come from an allocating call of this subsystem and must not
    /// be used afterwards.
    unsafe fn free(&self, ptr: *mut c_void);

    /// `snd_ctl_open()`
    ///
    /// # Safety
    /// `ctl` must be valid for a pointer-sized write, `name` must be a
    /// nul-terminated string.
    unsafe fn ctl_open(
        &self,
        ctl: *mut *mut c_void,
        name: *const c_char,
        mode: CtlMode,
    ) -> c_int;

    /// `snd_ctl_close()`
    ///
    /// # Safety
    /// `ctl` must be an open handle; it is invalid after this call.
    unsafe fn ctl_close(&self, ctl: *mut c_void) -> c_int;

    /// `snd_ctl_rawmidi_next_device()`
    ///
    /// # Safety
    /// `ctl` must be an open handle.
    unsafe fn ctl_rawmidi_next_device(
        &self,
        ctl: *mut c_void,
        device: &mut c_int,
    ) -> c_int;

    /// `snd_rawmidi_info_sizeof()`
    fn rawmidi_info_sizeof(&self) -> usize;

    /// `snd_rawmidi_info_set_device()`
    ///
    /// # Safety
    /// `info` must be a valid descriptor.
    unsafe fn rawmidi_info_set_device(&self, info: *mut c_void, val: c_uint);

    /// `snd_rawmidi_info_set_subdevice()`
    ///
    /// # Safety
    /// `info` must be a valid descriptor.
    unsafe fn rawmidi_info_set_subdevice(&self, info: *mut c_void, val: c_uint);

    /// `snd_rawmidi_info_set_stream()`
    ///
    /// # Safety
    /// `info` must be a valid descriptor.
    unsafe fn rawmidi_info_set_stream(
        &self,
        info: *mut c_void,
        val: RawmidiStream,
    );

    /// `snd_ctl_rawmidi_info()`
    ///
    /// # Safety
    /// `ctl` must be an open handle, `info` a valid descriptor.
    unsafe fn ctl_rawmidi_info(&self, ctl: *mut c_void, info: *mut c_void) -> c_int;

    /// `snd_rawmidi_info_get_name()`
    ///
    /// # Safety
    /// `info` must be a valid descriptor.
    unsafe fn rawmidi_info_get_name(&self, info: *const c_void) -> *const c_char;

    /// `snd_rawmidi_info_get_subdevices_count()`
    ///
    /// # Safety
    /// `info` must be a valid descriptor.
    unsafe fn rawmidi_info_get_subdevices_count(
        &self,
        info: *const c_void,
    ) -> c_uint;
}
