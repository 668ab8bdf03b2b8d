// Copyright © 2022 The Rawmidi Probe Contributors.
//
// Licensed under any of:
// - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
// - Boost Software License, Version 1.0 (https://www.boost.org/LICENSE_1_0.txt)
// - MIT License (https://mit-license.org/)
// At your choosing (See accompanying files LICENSE_APACHE_2_0.txt,
// LICENSE_MIT.txt and LICENSE_BOOST_1_0.txt).

//! Sound cards: enumeration and naming.

#![allow(unsafe_code)]

use std::{iter::FusedIterator, os::raw::c_int};

use crate::{
    cursor::{Cursor, Step},
    owned, status, CardId, Error, Result, Subsystem,
};

/// Iterator over the sound cards present on the host, in increasing order.
///
/// Each call to `next()` performs one `snd_card_next()` query.  A failing
/// query yields one `Err` and ends the iteration.
#[derive(Debug)]
pub struct Cards<'s, S: Subsystem + ?Sized> {
    sys: &'s S,
    cursor: Cursor,
}

/// Enumerate sound cards, starting before the first one.
pub fn cards<S: Subsystem + ?Sized>(sys: &S) -> Cards<'_, S> {
    Cards {
        sys,
        cursor: Cursor::new(),
    }
}

impl<S: Subsystem + ?Sized> Iterator for Cards<'_, S> {
    type Item = Result<CardId>;

    fn next(&mut self) -> Option<Self::Item> {
        let sys = self.sys;
        match self.cursor.step(|card| sys.card_next(card)) {
            Step::Item(index) => {
                tracing::debug!("Found sound card {}", index);
                Some(Ok(CardId(index)))
            }
            Step::End => None,
            Step::Error(code) => Some(Err(status::error(
                sys,
                code,
                "cannot enumerate sound cards",
            )
            .into())),
        }
    }
}

impl<S: Subsystem + ?Sized> FusedIterator for Cards<'_, S> {}

/// Short name of a card (for example `UM-1`).
pub fn short_name<S: Subsystem + ?Sized>(sys: &S, card: CardId) -> Result<String> {
    let index = index(card)?;
    owned::resolve(
        sys,
        |name| unsafe { sys.card_get_name(index, name) },
        || format!("cannot get name of card {}", card),
    )
}

/// Long name of a card, usually including its bus address.
pub fn long_name<S: Subsystem + ?Sized>(sys: &S, card: CardId) -> Result<String> {
    let index = index(card)?;
    owned::resolve(
        sys,
        |name| unsafe { sys.card_get_longname(index, name) },
        || format!("cannot get long name of card {}", card),
    )
}

/// Native card number; `snd_card_next()` never reports one above `c_int`.
pub(crate) fn index(card: CardId) -> Result<c_int> {
    c_int::try_from(card.index()).map_err(|_| Error::CardOutOfRange(card))
}
