//! Key segmentation.
//!
//! A [`Segmenter`] splits a key into the sequence of segments that address a path through the
//! trie. It is called repeatedly, threading the returned `next` position back in as the next
//! `start`:
//!
//! - an empty segment means there are no more segments;
//! - `next == None` means the segment just returned is the final one.
//!
//! Every returned segment is the borrowed slice `key[start..next.unwrap_or(key.len())]`, so
//! segmentation never allocates and concatenating all segments reproduces the key.

use std::str::FromStr;

use crate::error::Error;

pub trait Segmenter: Clone {
    fn segment<'k>(&self, key: &'k str, start: usize) -> (&'k str, Option<usize>);
}

impl<F> Segmenter for F
where
    F: for<'k> Fn(&'k str, usize) -> (&'k str, Option<usize>) + Clone,
{
    #[inline]
    fn segment<'k>(&self, key: &'k str, start: usize) -> (&'k str, Option<usize>) {
        self(key, start)
    }
}

// Splits `key` before each occurrence of `sep` that follows the first character at `start`.
fn split_before(key: &str, start: usize, sep: char) -> (&str, Option<usize>) {
    if start >= key.len() {
        return ("", None);
    }
    let rest = &key[start..];
    let first = rest.chars().next().map_or(0, char::len_utf8);
    match rest[first..].find(sep) {
        Some(offset) => {
            let end = start + first + offset;
            (&key[start..end], Some(end))
        }
        None => (rest, None),
    }
}

/// Segments keys by forward slash, keeping the slash at the front of each segment:
/// `"/a/b/c"` becomes `"/a"`, `"/b"`, `"/c"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathSegmenter;

impl Segmenter for PathSegmenter {
    #[inline]
    fn segment<'k>(&self, key: &'k str, start: usize) -> (&'k str, Option<usize>) {
        split_before(key, start, '/')
    }
}

/// One segment per `char`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuneSegmenter;

impl Segmenter for RuneSegmenter {
    #[inline]
    fn segment<'k>(&self, key: &'k str, start: usize) -> (&'k str, Option<usize>) {
        let Some(c) = key.get(start..).and_then(|rest| rest.chars().next()) else {
            return ("", None);
        };
        let end = start + c.len_utf8();
        let next = (end < key.len()).then_some(end);
        (&key[start..end], next)
    }
}

/// Like [`PathSegmenter`], for an arbitrary separator. `SeparatorSegmenter('.')` turns
/// `"net.http.port"` into `"net"`, `".http"`, `".port"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeparatorSegmenter(pub char);

impl Default for SeparatorSegmenter {
    fn default() -> Self {
        Self('/')
    }
}

impl Segmenter for SeparatorSegmenter {
    #[inline]
    fn segment<'k>(&self, key: &'k str, start: usize) -> (&'k str, Option<usize>) {
        split_before(key, start, self.0)
    }
}

/// Runtime choice between the built-in segmenters, for tries whose segmentation comes from
/// configuration rather than from the type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SegmenterKind {
    #[default]
    Path,
    Rune,
    Separator(char),
}

impl Segmenter for SegmenterKind {
    #[inline]
    fn segment<'k>(&self, key: &'k str, start: usize) -> (&'k str, Option<usize>) {
        match self {
            SegmenterKind::Path => PathSegmenter.segment(key, start),
            SegmenterKind::Rune => RuneSegmenter.segment(key, start),
            SegmenterKind::Separator(sep) => split_before(key, start, *sep),
        }
    }
}

/// Accepts `path`, `rune` and `sep:<c>`.
impl FromStr for SegmenterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(SegmenterKind::Path),
            "rune" => Ok(SegmenterKind::Rune),
            _ => {
                let Some(sep) = s.strip_prefix("sep:") else {
                    return Err(Error::UnknownSegmenter(s.to_string()));
                };
                let mut chars = sep.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(SegmenterKind::Separator(c)),
                    _ => Err(Error::InvalidSeparator(sep.to_string())),
                }
            }
        }
    }
}

/// Collects every segment of `key`.
pub fn segments<'k, S: Segmenter>(segmenter: &S, key: &'k str) -> Vec<&'k str> {
    let mut parts = Vec::new();
    let (mut part, mut next) = segmenter.segment(key, 0);
    while !part.is_empty() {
        parts.push(part);
        let Some(i) = next else {
            break;
        };
        (part, next) = segmenter.segment(key, i);
    }
    parts
}
