//! POSIX shell quoting.
//!
//! Every user-controlled path or argument goes through [`quote`] (or
//! [`quote_os`] for paths and file names) before it is placed into a shell
//! statement or into Go's `-gcflags` value.

use std::ffi::{OsStr, OsString};

use crate::util::{os_bytes, os_string_from_bytes};

/// Characters that make a word unsafe to pass to the shell unquoted.
///
/// Besides whitespace, separators, redirections and expansions, this covers
/// quotes, pipes, globs, comments and `~`: any of them left bare would change
/// the word the shell sees, so quoted output always reads back as its input.
const SPECIAL_CHARS: &[char] = &[
  '\t', ' ', '\n', '\r', ';', '<', '>', '\\', '$', '{', '}', '(', ')', '&', '!', '\'', '"', '`', '|', '*', '?', '[',
  ']', '#', '~',
];

fn needs_quoting(bytes: &[u8]) -> bool {
  bytes.iter().any(|&b| b.is_ascii() && SPECIAL_CHARS.contains(&char::from(b)))
}

/// Single-quote `bytes`, writing each embedded `'` as `'\''`.
fn quote_bytes(bytes: &[u8]) -> Vec<u8> {
  if bytes.is_empty() {
    return b"''".to_vec();
  }
  if !needs_quoting(bytes) {
    return bytes.to_vec();
  }
  let mut out = Vec::with_capacity(bytes.len() + 2);
  out.push(b'\'');
  for &b in bytes {
    if b == b'\'' {
      out.extend_from_slice(br"'\''");
    } else {
      out.push(b);
    }
  }
  out.push(b'\'');
  out
}

/// Quote `s` for a POSIX shell.
///
/// Empty strings become `''`. Strings containing a special character are
/// wrapped in single quotes, with each embedded `'` written as `'\''`.
/// Anything else is returned unchanged.
pub fn quote(s: &str) -> String {
  // Only ASCII quote bytes are inserted, so the result stays valid UTF-8.
  String::from_utf8_lossy(&quote_bytes(s.as_bytes())).into_owned()
}

/// [`quote`] for OS strings. Bytes that are not valid UTF-8 are kept as is.
pub fn quote_os(s: &OsStr) -> OsString {
  os_string_from_bytes(quote_bytes(&os_bytes(s)))
}

/// Quote each argument and join them with single spaces.
pub fn quote_all<I, S>(args: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  args.into_iter().map(|arg| quote(arg.as_ref())).collect::<Vec<_>>().join(" ")
}
