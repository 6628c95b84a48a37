//! Finite cyclic symbol groups.
//!
//! A domain is an ordered list of symbols; index 0 is the identity symbol and
//! addition is addition of indices modulo the domain size. Lookup is a fixed
//! table for ASCII members plus a short scan over the non-ASCII tail.

use crate::error::AlgebraError;

const ABSENT: u8 = u8::MAX;

pub struct Domain {
    name: &'static str,
    ascii: &'static [u8],
    extended: &'static [char],
    index: [u8; 128],
    /// `\n`, `\r` and `\t` act as the identity without being members.
    layout_identity: bool,
}

impl Domain {
    const fn new(
        name: &'static str,
        ascii: &'static [u8],
        extended: &'static [char],
        layout_identity: bool,
    ) -> Self {
        assert!(ascii.len() + extended.len() < ABSENT as usize);
        let mut index = [ABSENT; 128];
        let mut i = 0;
        while i < ascii.len() {
            let b = ascii[i];
            assert!(b < 128 && index[b as usize] == ABSENT);
            index[b as usize] = i as u8;
            i += 1;
        }
        Self {
            name,
            ascii,
            extended,
            index,
            layout_identity,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.ascii.len() + self.extended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn identity(&self) -> char {
        self.symbol(0)
    }

    /// Panics if `index >= self.len()`.
    pub fn symbol(&self, index: usize) -> char {
        match self.ascii.get(index) {
            Some(&b) => b as char,
            None => self.extended[index - self.ascii.len()],
        }
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        if symbol.is_ascii() {
            let i = self.index[symbol as usize];
            return (i != ABSENT).then_some(i as usize);
        }
        self.extended
            .iter()
            .position(|&c| c == symbol)
            .map(|i| i + self.ascii.len())
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index_of(symbol).is_some()
    }

    pub fn is_layout(&self, symbol: char) -> bool {
        self.layout_identity && matches!(symbol, '\n' | '\r' | '\t')
    }

    /// Symbols that behave as the identity in sums.
    pub fn is_identity_like(&self, symbol: char) -> bool {
        symbol == self.identity() || self.is_layout(symbol)
    }

    pub(crate) fn lookup(&self, symbol: char) -> Result<usize, AlgebraError> {
        if self.is_layout(symbol) {
            return Ok(0);
        }
        self.index_of(symbol).ok_or(AlgebraError::UnknownSymbol {
            symbol,
            domain: self.name,
        })
    }
}

impl std::fmt::Debug for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

/// `_ a..z - 0..9 A..Z`
pub static TAG_DOMAIN: Domain = Domain::new(
    "tag",
    b"_abcdefghijklmnopqrstuvwxyz-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    &[],
    false,
);

/// The tag symbols reordered as `_ a..z A..Z - 0..9`, so that `'a' + '9'` is
/// the identity while `'1' + 'a' == '2'` still holds.
pub static VALUE_DOMAIN: Domain = Domain::new(
    "attribute value",
    b"_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-0123456789",
    &[],
    false,
);

const PRINTABLE_LEN: usize = 95;

const fn printable_ascii() -> [u8; PRINTABLE_LEN] {
    let mut out = [0u8; PRINTABLE_LEN];
    let mut i = 0;
    while i < PRINTABLE_LEN {
        out[i] = b' ' + i as u8;
        i += 1;
    }
    out
}

static PRINTABLE: [u8; PRINTABLE_LEN] = printable_ascii();

static TYPOGRAPHIC: [char; 7] = [
    '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2013}', '\u{2014}', '\u{2026}',
];

/// Space (identity), printable ASCII `!`..`~`, then curly quotes, dashes and
/// the ellipsis.
pub static TEXT_DOMAIN: Domain = Domain::new("text", &PRINTABLE, &TYPOGRAPHIC, true);

pub fn add_symbols(a: char, b: char, domain: &Domain) -> Result<char, AlgebraError> {
    let sum = (domain.lookup(a)? + domain.lookup(b)?) % domain.len();
    if sum == 0 {
        // Keep layout when it took part in an identity sum; the lower code
        // point wins so the result does not depend on operand order.
        let layout = [a, b]
            .into_iter()
            .filter(|&c| domain.is_layout(c))
            .min();
        if let Some(layout) = layout {
            return Ok(layout);
        }
    }
    Ok(domain.symbol(sum))
}

pub fn invert_symbol(a: char, domain: &Domain) -> Result<char, AlgebraError> {
    if domain.is_layout(a) {
        return Ok(a);
    }
    let index = domain.lookup(a)?;
    Ok(domain.symbol((domain.len() - index) % domain.len()))
}
