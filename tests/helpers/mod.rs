//! Scripted fake sound subsystem for integration tests.
//!
//! Cards, devices and per-direction query statuses are declared up front;
//! every call that acquires or releases something is counted so tests can
//! check that handles and strings are released exactly once.

#![allow(unsafe_code, dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    ffi::{CStr, CString},
    mem,
    os::raw::{c_char, c_int, c_uint, c_void},
};

use rawmidi_probe::{CtlMode, RawmidiStream, Subsystem};

pub const ENOENT: c_int = -2;
pub const ENXIO: c_int = -6;
pub const ENOMEM: c_int = -12;
pub const ENODEV: c_int = -19;
pub const EBADFD: c_int = -77;

/// A raw MIDI device as the fake reports it.
#[derive(Clone, Debug)]
pub struct FakeDevice {
    pub id: c_int,
    pub name: String,
    pub input_status: c_int,
    pub output_status: c_int,
    pub subdevices: c_uint,
}

impl FakeDevice {
    /// A device supporting neither direction.
    pub fn new(id: c_int, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            input_status: ENXIO,
            output_status: ENXIO,
            subdevices: 1,
        }
    }

    pub fn input(mut self) -> Self {
        self.input_status = 0;
        self
    }

    pub fn output(mut self) -> Self {
        self.output_status = 0;
        self
    }

    pub fn statuses(mut self, input: c_int, output: c_int) -> Self {
        self.input_status = input;
        self.output_status = output;
        self
    }

    pub fn subdevices(mut self, count: c_uint) -> Self {
        self.subdevices = count;
        self
    }
}

/// A sound card as the fake reports it.
#[derive(Clone, Debug)]
pub struct FakeCard {
    pub id: c_int,
    pub name: String,
    pub long_name: String,
    pub devices: Vec<FakeDevice>,
    pub open_status: c_int,
    pub close_status: c_int,
    pub name_status: c_int,
    /// Report success for name lookups without writing a string.
    pub null_names: bool,
    /// Fail the n-th (0-based) `ctl_rawmidi_next_device()` call of a session.
    pub next_device_failure: Option<(usize, c_int)>,
}

impl FakeCard {
    pub fn new(id: c_int, name: &str, long_name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            long_name: long_name.to_string(),
            devices: Vec::new(),
            open_status: 0,
            close_status: 0,
            name_status: 0,
            null_names: false,
            next_device_failure: None,
        }
    }

    pub fn device(mut self, device: FakeDevice) -> Self {
        self.devices.push(device);
        self
    }

    pub fn open_status(mut self, status: c_int) -> Self {
        self.open_status = status;
        self
    }

    pub fn close_status(mut self, status: c_int) -> Self {
        self.close_status = status;
        self
    }

    pub fn name_status(mut self, status: c_int) -> Self {
        self.name_status = status;
        self
    }

    pub fn null_names(mut self) -> Self {
        self.null_names = true;
        self
    }

    pub fn fail_next_device(mut self, call: usize, status: c_int) -> Self {
        self.next_device_failure = Some((call, status));
        self
    }
}

/// Layout of the fake `snd_rawmidi_info_t`; valid when zeroed.
#[repr(C)]
struct FakeInfo {
    device: c_uint,
    subdevice: c_uint,
    stream: c_int,
    card: c_int,
    subdevices: c_uint,
    name: [u8; 80],
}

/// State behind a fake control handle.
struct FakeCtl {
    card: c_int,
    next_device_calls: Cell<usize>,
}

/// One `ctl_rawmidi_info()` call: device, subdevice, stream.
pub type Query = (c_uint, c_uint, RawmidiStream);

#[derive(Debug, Default)]
pub struct FakeSubsystem {
    cards: Vec<FakeCard>,
    card_next_failure: Option<(usize, c_int)>,
    null_strerror: bool,

    pub card_next_calls: Cell<usize>,
    pub opens: Cell<usize>,
    pub closes: Cell<usize>,
    pub allocs: Cell<usize>,
    pub frees: Cell<usize>,
    pub bad_frees: Cell<usize>,
    pub bad_closes: Cell<usize>,
    pub next_device_calls: Cell<usize>,
    pub addresses: RefCell<Vec<String>>,
    pub modes: RefCell<Vec<CtlMode>>,
    pub queries: RefCell<Vec<Query>>,

    handles: RefCell<HashSet<usize>>,
    strings: RefCell<HashSet<usize>>,
}

impl FakeSubsystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(mut self, card: FakeCard) -> Self {
        self.cards.push(card);
        self.cards.sort_by_key(|c| c.id);
        self
    }

    /// Fail the n-th (0-based) `card_next()` call with `status`.
    pub fn fail_card_next(mut self, call: usize, status: c_int) -> Self {
        self.card_next_failure = Some((call, status));
        self
    }

    /// Make `strerror()` return null for every status.
    pub fn null_strerror(mut self) -> Self {
        self.null_strerror = true;
        self
    }

    /// Control handles currently open.
    pub fn open_handles(&self) -> usize {
        self.handles.borrow().len()
    }

    /// Strings allocated and not yet freed.
    pub fn live_strings(&self) -> usize {
        self.strings.borrow().len()
    }

    fn find(&self, card: c_int) -> Option<&FakeCard> {
        self.cards.iter().find(|c| c.id == card)
    }

    fn bump(counter: &Cell<usize>) -> usize {
        let n = counter.get();
        counter.set(n + 1);
        n
    }

    unsafe fn alloc_name(&self, text: &str, out: *mut *mut c_char) {
        let raw = CString::new(text).unwrap().into_raw();
        self.strings.borrow_mut().insert(raw as usize);
        Self::bump(&self.allocs);
        *out = raw;
    }

    unsafe fn name(
        &self,
        card: c_int,
        out: *mut *mut c_char,
        pick: fn(&FakeCard) -> &str,
    ) -> c_int {
        let Some(fake) = self.find(card) else {
            return ENODEV;
        };
        if fake.name_status < 0 {
            return fake.name_status;
        }
        if fake.null_names {
            return 0;
        }
        self.alloc_name(pick(fake), out);
        0
    }

    unsafe fn ctl<'a>(ctl: *mut c_void) -> &'a FakeCtl {
        &*ctl.cast::<FakeCtl>()
    }
}

unsafe impl Subsystem for FakeSubsystem {
    fn strerror(&self, status: c_int) -> *const c_char {
        if self.null_strerror {
            return std::ptr::null();
        }
        let text: &'static [u8] = match status {
            ENOENT => b"No such file or directory\0",
            ENXIO => b"No such device or address\0",
            ENOMEM => b"Cannot allocate memory\0",
            ENODEV => b"No such device\0",
            EBADFD => b"File descriptor in bad state\0",
            _ => b"Unknown error\0",
        };
        text.as_ptr().cast()
    }

    fn card_next(&self, card: &mut c_int) -> c_int {
        let call = Self::bump(&self.card_next_calls);
        if let Some((at, status)) = self.card_next_failure {
            if at == call {
                return status;
            }
        }
        let prev = *card;
        *card = self
            .cards
            .iter()
            .map(|c| c.id)
            .find(|id| *id > prev)
            .unwrap_or(-1);
        0
    }

    unsafe fn card_get_name(&self, card: c_int, name: *mut *mut c_char) -> c_int {
        self.name(card, name, |c| c.name.as_str())
    }

    unsafe fn card_get_longname(&self, card: c_int, name: *mut *mut c_char) -> c_int {
        self.name(card, name, |c| c.long_name.as_str())
    }

    unsafe fn free(&self, ptr: *mut c_void) {
        if self.strings.borrow_mut().remove(&(ptr as usize)) {
            drop(CString::from_raw(ptr.cast()));
            Self::bump(&self.frees);
        } else {
            Self::bump(&self.bad_frees);
        }
    }

    unsafe fn ctl_open(
        &self,
        ctl: *mut *mut c_void,
        name: *const c_char,
        mode: CtlMode,
    ) -> c_int {
        let address = CStr::from_ptr(name).to_string_lossy().into_owned();
        self.addresses.borrow_mut().push(address.clone());
        self.modes.borrow_mut().push(mode);

        let Some(card) = address
            .strip_prefix("hw:")
            .and_then(|n| n.parse::<c_int>().ok())
        else {
            return ENOENT;
        };
        let Some(fake) = self.find(card) else {
            return ENODEV;
        };
        if fake.open_status < 0 {
            return fake.open_status;
        }

        let handle = Box::into_raw(Box::new(FakeCtl {
            card,
            next_device_calls: Cell::new(0),
        }));
        self.handles.borrow_mut().insert(handle as usize);
        Self::bump(&self.opens);
        *ctl = handle.cast();
        0
    }

    unsafe fn ctl_close(&self, ctl: *mut c_void) -> c_int {
        if !self.handles.borrow_mut().remove(&(ctl as usize)) {
            Self::bump(&self.bad_closes);
            return EBADFD;
        }
        let handle = Box::from_raw(ctl.cast::<FakeCtl>());
        Self::bump(&self.closes);
        self.find(handle.card).map_or(0, |c| c.close_status)
    }

    unsafe fn ctl_rawmidi_next_device(
        &self,
        ctl: *mut c_void,
        device: &mut c_int,
    ) -> c_int {
        Self::bump(&self.next_device_calls);
        let handle = Self::ctl(ctl);
        let call = Self::bump(&handle.next_device_calls);
        let Some(fake) = self.find(handle.card) else {
            return ENODEV;
        };
        if let Some((at, status)) = fake.next_device_failure {
            if at == call {
                return status;
            }
        }
        let prev = *device;
        *device = fake
            .devices
            .iter()
            .map(|d| d.id)
            .filter(|id| *id > prev)
            .min()
            .unwrap_or(-1);
        0
    }

    fn rawmidi_info_sizeof(&self) -> usize {
        mem::size_of::<FakeInfo>()
    }

    unsafe fn rawmidi_info_set_device(&self, info: *mut c_void, val: c_uint) {
        (*info.cast::<FakeInfo>()).device = val;
    }

    unsafe fn rawmidi_info_set_subdevice(&self, info: *mut c_void, val: c_uint) {
        (*info.cast::<FakeInfo>()).subdevice = val;
    }

    unsafe fn rawmidi_info_set_stream(&self, info: *mut c_void, val: RawmidiStream) {
        (*info.cast::<FakeInfo>()).stream = val as c_int;
    }

    unsafe fn ctl_rawmidi_info(&self, ctl: *mut c_void, info: *mut c_void) -> c_int {
        let handle = Self::ctl(ctl);
        let info = &mut *info.cast::<FakeInfo>();
        let stream = if info.stream == RawmidiStream::Input as c_int {
            RawmidiStream::Input
        } else {
            RawmidiStream::Output
        };
        self.queries
            .borrow_mut()
            .push((info.device, info.subdevice, stream));

        let Some(card) = self.find(handle.card) else {
            return ENODEV;
        };
        let Some(device) = card
            .devices
            .iter()
            .find(|d| d.id >= 0 && d.id as c_uint == info.device)
        else {
            return ENXIO;
        };
        if info.subdevice >= device.subdevices {
            return ENXIO;
        }
        let status = match stream {
            RawmidiStream::Input => device.input_status,
            RawmidiStream::Output => device.output_status,
        };
        if status < 0 {
            return status;
        }

        info.card = card.id;
        info.subdevices = device.subdevices;
        info.name = [0; 80];
        let bytes = device.name.as_bytes();
        let len = bytes.len().min(info.name.len() - 1);
        info.name[..len].copy_from_slice(&bytes[..len]);
        status
    }

    unsafe fn rawmidi_info_get_name(&self, info: *const c_void) -> *const c_char {
        (*info.cast::<FakeInfo>()).name.as_ptr().cast()
    }

    unsafe fn rawmidi_info_get_subdevices_count(&self, info: *const c_void) -> c_uint {
        (*info.cast::<FakeInfo>()).subdevices
    }
}
