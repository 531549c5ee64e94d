#![forbid(unsafe_code)]

//! Conversions between raw query values and cell values.
//!
//! A [`Codec`] pairs a decode function (`Option<&str> -> V`, where `None`
//! means the parameter is absent) with an encode function (`&V -> String`).
//! Both must be pure. They need not be exact inverses, but when they are not
//! the cell and the URL can settle on values that disagree; that divergence
//! belongs to the caller.
//!
//! The loop breaker compares decoded values with the cell's equality and
//! encoded strings with the URL's raw value, so converters should return the
//! same output for the same input on every call.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Raw query value (or absence) to cell value.
pub type Decode<V> = Rc<dyn Fn(Option<&str>) -> V>;

/// Cell value to raw query value.
pub type Encode<V> = Rc<dyn Fn(&V) -> String>;

/// Absent or empty parameters decode to `""`; anything else passes through.
pub fn default_decode<V: From<String>>(raw: Option<&str>) -> V {
    V::from(raw.unwrap_or_default().to_owned())
}

/// Display formatting of the value.
pub fn default_encode<V: ToString + ?Sized>(value: &V) -> String {
    value.to_string()
}

/// A decode/encode pair.
pub struct Codec<V> {
    pub decode: Decode<V>,
    pub encode: Encode<V>,
}

impl<V> Clone for Codec<V> {
    fn clone(&self) -> Self {
        Self {
            decode: Rc::clone(&self.decode),
            encode: Rc::clone(&self.encode),
        }
    }
}

impl<V> fmt::Debug for Codec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").finish_non_exhaustive()
    }
}

impl<V: From<String> + ToString + 'static> Default for Codec<V> {
    fn default() -> Self {
        Self::new(default_decode::<V>, default_encode::<V>)
    }
}

impl<V: 'static> Codec<V> {
    pub fn new(
        decode: impl Fn(Option<&str>) -> V + 'static,
        encode: impl Fn(&V) -> String + 'static,
    ) -> Self {
        Self {
            decode: Rc::new(decode),
            encode: Rc::new(encode),
        }
    }

    /// Swap in a different decode function.
    #[must_use]
    pub fn with_decode(mut self, decode: impl Fn(Option<&str>) -> V + 'static) -> Self {
        self.decode = Rc::new(decode);
        self
    }

    /// Swap in a different encode function.
    #[must_use]
    pub fn with_encode(mut self, encode: impl Fn(&V) -> String + 'static) -> Self {
        self.encode = Rc::new(encode);
        self
    }
}

impl<V: FromStr + ToString + Clone + 'static> Codec<V> {
    /// Parse with [`FromStr`], using `fallback` for absent or unparsable values.
    ///
    /// ```
    /// use paramsync::Codec;
    ///
    /// let page = Codec::parse_or(1u32);
    /// assert_eq!((page.decode)(Some("4")), 4);
    /// assert_eq!((page.decode)(Some("four")), 1);
    /// assert_eq!((page.encode)(&7), "7");
    /// ```
    pub fn parse_or(fallback: V) -> Self {
        Self::new(
            move |raw| {
                raw.and_then(|raw| raw.parse().ok())
                    .unwrap_or_else(|| fallback.clone())
            },
            default_encode::<V>,
        )
    }
}
