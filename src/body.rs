//! Read access to request and response bodies for logging.
//!
//! Formatting a record needs the full body, but the same body is sent by the
//! transport or read by the caller afterwards. [`BodyContent`] therefore only
//! borrows: implementations hand out the complete payload without consuming it
//! or moving any read cursor.

use bytes::Bytes;
use std::borrow::Cow;
use std::io::Cursor;

/// A body whose complete content can be inspected without consuming it.
///
/// # Examples
///
/// ```rust
/// use clientlog::BodyContent;
/// use std::io::{Cursor, Read};
///
/// let mut body = Cursor::new(b"hello world".to_vec());
/// let mut head = [0u8; 5];
/// body.read_exact(&mut head).unwrap();
///
/// // The whole payload is visible and the cursor stays where it was.
/// assert_eq!(body.content().as_ref(), b"hello world");
/// assert_eq!(body.position(), 5);
/// ```
pub trait BodyContent {
    /// The full payload, from the first byte regardless of any read position.
    fn content(&self) -> Cow<'_, [u8]>;
}

impl BodyContent for Bytes {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_ref())
    }
}

impl BodyContent for Vec<u8> {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl BodyContent for String {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl BodyContent for &str {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl BodyContent for () {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[][..])
    }
}

impl<T: AsRef<[u8]>> BodyContent for Cursor<T> {
    fn content(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.get_ref().as_ref())
    }
}

/// Body content rendered as text, replacing invalid UTF-8 sequences.
pub(crate) fn body_text<B: BodyContent + ?Sized>(body: &B) -> String {
    String::from_utf8_lossy(&body.content()).into_owned()
}
