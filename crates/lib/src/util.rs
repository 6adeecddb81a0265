//! Byte views of OS strings.
//!
//! Paths and file names are carried as [`OsStr`] end to end so names that are
//! not valid UTF-8 reach the shell and the compiler unchanged.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

#[cfg(unix)]
pub(crate) fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
  use std::os::unix::ffi::OsStrExt;
  Cow::Borrowed(s.as_bytes())
}

#[cfg(not(unix))]
pub(crate) fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
  match s.to_string_lossy() {
    Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
    Cow::Owned(text) => Cow::Owned(text.into_bytes()),
  }
}

#[cfg(unix)]
pub(crate) fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
  use std::os::unix::ffi::OsStringExt;
  OsString::from_vec(bytes)
}

#[cfg(not(unix))]
pub(crate) fn os_string_from_bytes(bytes: Vec<u8>) -> OsString {
  String::from_utf8_lossy(&bytes).into_owned().into()
}

/// Concatenate OS strings without separators.
pub(crate) fn concat_os<I, S>(parts: I) -> OsString
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let mut out = OsString::new();
  for part in parts {
    out.push(part.as_ref());
  }
  out
}
