// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

use std::{convert::TryFrom, os::raw::c_int};

use crate::consts::SENTINEL;

/// Outcome of one `*_next` query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The next index.
    Item(u32),
    /// No more items.
    End,
    /// The query itself failed with this status.
    Error(c_int),
}

/// Iteration state for the sentinel protocol shared by `snd_card_next()` and
/// `snd_ctl_rawmidi_next_device()`.
#[derive(Debug)]
pub(crate) struct Cursor {
    prev: c_int,
    done: bool,
}

impl Cursor {
    /// A cursor positioned before the first item.
    pub(crate) fn new() -> Self {
        Self {
            prev: SENTINEL,
            done: false,
        }
    }

    /// Ask `next` for the item after the current one.  Once `End` or `Error`
    /// has been returned, `next` is never called again.
    pub(crate) fn step<F>(&mut self, next: F) -> Step
    where
        F: FnOnce(&mut c_int) -> c_int,
    {
        if self.done {
            return Step::End;
        }

        let mut index = self.prev;
        let status = next(&mut index);
        if status < 0 {
            self.done = true;
            return Step::Error(status);
        }

        match u32::try_from(index) {
            Ok(item) => {
                self.prev = index;
                Step::Item(item)
            }
            Err(_) => {
                self.done = true;
                Step::End
            }
        }
    }
}
