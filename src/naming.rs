//! Numeric-aware filename ordering.
//!
//! Page images are usually exported as `page1.jpg … page120.jpg` without zero
//! padding, so plain byte ordering would put `page10` before `page2`. This
//! module provides the single comparison used everywhere a page list is
//! sorted.
//!
//! ## Ordering Rules
//!
//! Names are walked character by character, the way a browser's
//! `localeCompare(a, b, undefined, { numeric: true })` orders them:
//!
//! - where both names are at an ASCII digit, the whole digit runs compare by
//!   numeric value (any length, no overflow)
//! - otherwise characters compare by class: punctuation and whitespace, then
//!   digits, then letters
//! - within a class, letters compare case-insensitively
//! - a name that runs out first sorts first
//!
//! ```text
//! page-2.jpg < page1.jpg < page2.jpg < page10.jpg
//! photo.jpg  < photo1.jpg
//! ```
//!
//! Names that are equal under those rules (`Page2.jpg` vs `page02.jpg`) are
//! tie-broken so the order stays total: fewer leading zeros first, then
//! lowercase before uppercase, then raw byte order.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Consume the digit run at the front of `chars`.
fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Compare two digit runs by numeric value without parsing into a fixed-width int.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
}

/// Primary sort key of a single non-numeric step: class, then folded case.
fn char_key(c: char) -> (u8, char) {
    let class = if c.is_ascii_digit() {
        1
    } else if c.is_alphanumeric() {
        2
    } else {
        0
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn digit_runs(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
}

/// Tie-break for names that compare equal under the primary rules.
fn tie_break(a: &str, b: &str) -> Ordering {
    // Fewer leading zeros first: page2 < page02
    for (da, db) in digit_runs(a).zip(digit_runs(b)) {
        let ord = da.len().cmp(&db.len());
        if ord != Ordering::Equal {
            return ord;
        }
    }
    // Lowercase before uppercase at the first differing letter
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            if ca.is_lowercase() && cb.is_uppercase() {
                return Ordering::Less;
            }
            if ca.is_uppercase() && cb.is_lowercase() {
                return Ordering::Greater;
            }
            break;
        }
    }
    a.cmp(b)
}

/// Compare two filenames in natural (numeric-aware) order.
///
/// ```
/// use flipbook::naming::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("page2.jpg", "page10.jpg"), Ordering::Less);
/// assert_eq!(natural_cmp("photo.jpg", "photo1.jpg"), Ordering::Less);
/// assert_eq!(natural_cmp("B.png", "a.jpg"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut xs = a.chars().peekable();
    let mut ys = b.chars().peekable();

    loop {
        let ord = match (xs.peek().copied(), ys.peek().copied()) {
            (None, None) => return tie_break(a, b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                cmp_digits(&take_digits(&mut xs), &take_digits(&mut ys))
            }
            (Some(x), Some(y)) => {
                xs.next();
                ys.next();
                char_key(x).cmp(&char_key(y))
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

/// Sort filenames in place using [`natural_cmp`].
pub fn sort_natural(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}
