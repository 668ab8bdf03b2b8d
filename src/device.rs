// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Raw MIDI devices within an open control channel.

#![allow(unsafe_code)]

use std::{
    ffi::CStr,
    iter::FusedIterator,
    os::raw::c_void,
};

use crate::{
    consts::GONE,
    cursor::{Cursor, Step},
    status, Control, DeviceCapability, DeviceId, Direction, Result,
    SubdeviceId, Subsystem,
};

/// Iterator over the raw MIDI devices of one card, in increasing order.
///
/// Borrows the [`Control`] it walks, so it cannot outlive the control
/// channel.
#[derive(Debug)]
pub struct Devices<'c, 's, S: Subsystem + ?Sized> {
    control: &'c Control<'s, S>,
    cursor: Cursor,
}

impl<'c, 's, S: Subsystem + ?Sized> Devices<'c, 's, S> {
    pub(crate) fn new(control: &'c Control<'s, S>) -> Self {
        Self {
            control,
            cursor: Cursor::new(),
        }
    }
}

impl<S: Subsystem + ?Sized> Iterator for Devices<'_, '_, S> {
    type Item = Result<DeviceId>;

    fn next(&mut self) -> Option<Self::Item> {
        let sys = self.control.sys();
        let ctl = self.control.as_ptr();
        let step = self
            .cursor
            .step(|device| unsafe { sys.ctl_rawmidi_next_device(ctl, device) });

        match step {
            Step::Item(index) => {
                tracing::debug!(
                    "Found raw MIDI device {} on card {}",
                    index,
                    self.control.card()
                );
                Some(Ok(DeviceId(index)))
            }
            Step::End => None,
            Step::Error(code) => Some(Err(status::error(
                sys,
                code,
                "cannot determine device number",
            )
            .into())),
        }
    }
}

impl<S: Subsystem + ?Sized> FusedIterator for Devices<'_, '_, S> {}

/// Zeroed `snd_rawmidi_info_t`, sized by the subsystem.
struct Descriptor {
    // u64 words keep the buffer aligned for any field the struct holds.
    words: Vec<u64>,
}

impl Descriptor {
    fn new(size: usize) -> Self {
        let words = size.div_ceil(std::mem::size_of::<u64>()).max(1);
        Self {
            words: vec![0; words],
        }
    }

    fn as_mut_ptr(&mut self) -> *mut c_void {
        self.words.as_mut_ptr().cast()
    }

    fn as_ptr(&self) -> *const c_void {
        self.words.as_ptr().cast()
    }

    /// Name as left by the last query.  Owned by the descriptor: the borrow
    /// ends before the descriptor can be written again.
    fn name<'d, S: Subsystem + ?Sized>(&'d self, sys: &S) -> &'d CStr {
        let name = unsafe { sys.rawmidi_info_get_name(self.as_ptr()) };
        if name.is_null() {
            return Default::default();
        }
        unsafe { CStr::from_ptr(name) }
    }
}

/// Probe `subdevice` of `device` in both directions.
///
/// A failing query means the direction is unsupported, unless its status says
/// the device or the handle is gone; that is reported as an error.
pub(crate) fn probe<S: Subsystem + ?Sized>(
    control: &Control<'_, S>,
    device: DeviceId,
    subdevice: SubdeviceId,
) -> Result<DeviceCapability> {
    let sys = control.sys();
    let ctl = control.as_ptr();
    let mut info = Descriptor::new(sys.rawmidi_info_sizeof());

    unsafe {
        sys.rawmidi_info_set_device(info.as_mut_ptr(), device.index());
        sys.rawmidi_info_set_subdevice(info.as_mut_ptr(), subdevice.index());
    }

    let mut query = |direction: Direction| -> Result<bool> {
        let code = unsafe {
            sys.rawmidi_info_set_stream(info.as_mut_ptr(), direction.into());
            sys.ctl_rawmidi_info(ctl, info.as_mut_ptr())
        };
        tracing::trace!(
            "Probed card {} device {} subdevice {} {:?}: {}",
            control.card(),
            device,
            subdevice,
            direction,
            code,
        );
        if GONE.contains(&code) {
            let context = format!(
                "cannot probe device {} on card {}",
                device,
                control.card()
            );
            return Err(status::error(sys, code, context).into());
        }
        Ok(code >= 0)
    };
    let supports_input = query(Direction::Input)?;
    let supports_output = query(Direction::Output)?;

    let name = info.name(sys).to_string_lossy().into_owned();
    let subdevices = unsafe { sys.rawmidi_info_get_subdevices_count(info.as_ptr()) };

    Ok(DeviceCapability {
        name,
        supports_input,
        supports_output,
        subdevices,
    })
}
