// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Control channels, opened read-only on one card at a time.

#![allow(unsafe_code)]

use std::{
    ffi::CString,
    os::raw::{c_int, c_void},
    ptr::{self, NonNull},
};

use crate::{
    card,
    consts::CONTROL_PREFIX,
    device::{self, Devices},
    status,
    subsystem::CtlMode,
    CardId, DeviceCapability, DeviceId, Error, Result, SubdeviceId, Subsystem,
};

/// An open control channel to one card.
///
/// The handle is closed exactly once: by [`Control::close()`], or when the
/// `Control` is dropped.
#[derive(Debug)]
pub struct Control<'s, S: Subsystem + ?Sized> {
    sys: &'s S,
    card: CardId,
    handle: Option<NonNull<c_void>>,
}

impl<'s, S: Subsystem + ?Sized> Control<'s, S> {
    /// Open the control channel `hw:<card>` in read-only, blocking mode.
    pub fn open(sys: &'s S, card: CardId) -> Result<Self> {
        let index = card::index(card)?;
        // A decimal card number never contains NUL.
        let address = CString::new(format!("{}{}", CONTROL_PREFIX, index))
            .map_err(|_| Error::CardOutOfRange(card))?;
        let mut handle = ptr::null_mut();
        let code = unsafe {
            sys.ctl_open(
                ptr::addr_of_mut!(handle),
                address.as_ptr(),
                CtlMode::ReadOnly,
            )
        };
        status::check(sys, code, || {
            format!("cannot open control for card {}", card)
        })?;
        let handle = NonNull::new(handle).ok_or(Error::NullHandle(card))?;

        tracing::debug!("Opened control {:?}", address);
        Ok(Self {
            sys,
            card,
            handle: Some(handle),
        })
    }

    /// The card this control channel is bound to.
    pub fn card(&self) -> CardId {
        self.card
    }

    /// Enumerate the raw MIDI devices of this card.
    pub fn devices(&self) -> Devices<'_, 's, S> {
        Devices::new(self)
    }

    /// Probe one subdevice for input and output support.
    ///
    /// A direction the device does not offer reads as unsupported.  A device
    /// or handle that disappears while probing is an error.
    pub fn probe(
        &self,
        device: DeviceId,
        subdevice: SubdeviceId,
    ) -> Result<DeviceCapability> {
        device::probe(self, device, subdevice)
    }

    /// Close the control channel, reporting a failing close.
    pub fn close(mut self) -> Result<()> {
        let code = self.release();
        status::check(self.sys, code, || {
            format!("cannot close control for card {}", self.card)
        })?;
        Ok(())
    }

    pub(crate) fn sys(&self) -> &'s S {
        self.sys
    }

    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.handle.map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn release(&mut self) -> c_int {
        match self.handle.take() {
            Some(handle) => {
                tracing::debug!("Closing control for card {}", self.card);
                unsafe { self.sys.ctl_close(handle.as_ptr()) }
            }
            None => 0,
        }
    }
}

impl<S: Subsystem + ?Sized> Drop for Control<'_, S> {
    fn drop(&mut self) {
        let code = self.release();
        if code < 0 {
            tracing::warn!(
                "Failed to close control for card {}: {}",
                self.card,
                status::describe(self.sys, code),
            );
        }
    }
}

/// Run `f` with the control channel of `card`, closing it afterwards.
///
/// The channel is closed whether `f` succeeds or fails; an error from `f`
/// takes precedence over an error from closing.
pub fn with_card<S, T, F>(sys: &S, card: CardId, f: F) -> Result<T>
where
    S: Subsystem + ?Sized,
    F: FnOnce(&Control<'_, S>) -> Result<T>,
{
    let control = Control::open(sys, card)?;
    let result = f(&control);
    let closed = control.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close)) => {
            tracing::warn!("{}", close);
            Err(e)
        }
    }
}
