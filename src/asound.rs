// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

#![allow(unsafe_code)]

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    os::raw::{c_char, c_int, c_uint, c_void},
};

use crate::{
    consts::LIBRARY,
    subsystem::{CtlMode, RawmidiStream},
    Error, Result, Subsystem,
};

// Link to libasound
dl_api::linker!(extern "C" Alsa "libasound.so.2" {
    // Errors
    fn snd_strerror(errnum: c_int) -> *const c_char;

    // Cards
    fn snd_card_next(card: *mut c_int) -> c_int;
    fn snd_card_get_name(card: c_int, name: *mut *mut c_char) -> c_int;
    fn snd_card_get_longname(card: c_int, name: *mut *mut c_char) -> c_int;

    // Control
    fn snd_ctl_open(
        ctl: *mut *mut c_void,
        name: *const c_char,
        mode: c_int,
    ) -> c_int;
    fn snd_ctl_close(ctl: *mut c_void) -> c_int;
    fn snd_ctl_rawmidi_next_device(ctl: *mut c_void, device: *mut c_int) -> c_int;
    fn snd_ctl_rawmidi_info(ctl: *mut c_void, info: *mut c_void) -> c_int;

    // Raw MIDI info
    fn snd_rawmidi_info_sizeof() -> usize;
    fn snd_rawmidi_info_set_device(obj: *mut c_void, val: c_uint) -> ();
    fn snd_rawmidi_info_set_subdevice(obj: *mut c_void, val: c_uint) -> ();
    fn snd_rawmidi_info_set_stream(obj: *mut c_void, val: RawmidiStream)
        -> ();
    fn snd_rawmidi_info_get_name(obj: *const c_void) -> *const c_char;
    fn snd_rawmidi_info_get_subdevices_count(obj: *const c_void) -> c_uint;
});

// Names returned by `snd_card_get_*name()` are allocated with malloc().
extern "C" {
    fn free(ptr: *mut c_void);
}

/// The ALSA library, loaded at runtime.
pub struct Asound(Alsa);

impl Asound {
    /// Load `libasound.so.2`.
    pub fn load() -> Result<Self> {
        let alsa = Alsa::new().map_err(|_| Error::LibraryUnavailable(LIBRARY))?;
        tracing::debug!("Loaded {}", LIBRARY);
        Ok(Self(alsa))
    }
}

impl Debug for Asound {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Asound({:?})", LIBRARY)
    }
}

unsafe impl Subsystem for Asound {
    fn strerror(&self, status: c_int) -> *const c_char {
        unsafe { (self.0.snd_strerror)(status) }
    }

    fn card_next(&self, card: &mut c_int) -> c_int {
        unsafe { (self.0.snd_card_next)(card) }
    }

    unsafe fn card_get_name(&self, card: c_int, name: *mut *mut c_char) -> c_int {
        (self.0.snd_card_get_name)(card, name)
    }

    unsafe fn card_get_longname(
        &self,
        card: c_int,
        name: *mut *mut c_char,
    ) -> c_int {
        (self.0.snd_card_get_longname)(card, name)
    }

    unsafe fn free(&self, ptr: *mut c_void) {
        free(ptr)
    }

    unsafe fn ctl_open(
        &self,
        ctl: *mut *mut c_void,
        name: *const c_char,
        mode: CtlMode,
    ) -> c_int {
        (self.0.snd_ctl_open)(ctl, name, mode as c_int)
    }

    unsafe fn ctl_close(&self, ctl: *mut c_void) -> c_int {
        (self.0.snd_ctl_close)(ctl)
    }

    unsafe fn ctl_rawmidi_next_device(
        &self,
        ctl: *mut c_void,
        device: &mut c_int,
    ) -> c_int {
        (self.0.snd_ctl_rawmidi_next_device)(ctl, device)
    }

    fn rawmidi_info_sizeof(&self) -> usize {
        unsafe { (self.0.snd_rawmidi_info_sizeof)() }
    }

    unsafe fn rawmidi_info_set_device(&self, info: *mut c_void, val: c_uint) {
        (self.0.snd_rawmidi_info_set_device)(info, val)
    }

    unsafe fn rawmidi_info_set_subdevice(&self, info: *mut c_void, val: c_uint) {
        (self.0.snd_rawmidi_info_set_subdevice)(info, val)
    }

    unsafe fn rawmidi_info_set_stream(
        &self,
        info: *mut c_void,
        val: RawmidiStream,
    ) {
        (self.0.snd_rawmidi_info_set_stream)(info, val)
    }

    unsafe fn ctl_rawmidi_info(&self, ctl: *mut c_void, info: *mut c_void) -> c_int {
        (self.0.snd_ctl_rawmidi_info)(ctl, info)
    }

    unsafe fn rawmidi_info_get_name(&self, info: *const c_void) -> *const c_char {
        (self.0.snd_rawmidi_info_get_name)(info)
    }

    unsafe fn rawmidi_info_get_subdevices_count(
        &self,
        info: *const c_void,
    ) -> c_uint {
        (self.0.snd_rawmidi_info_get_subdevices_count)(info)
    }
}
