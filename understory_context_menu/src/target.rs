// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target resolution: turn an identifier or a handle into a live, identified element.

use alloc::format;
use alloc::string::{String, ToString};

use crate::dom::Document;
use crate::error::Error;
use crate::registry::TargetId;

/// A reference to a target element as supplied by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetRef<'a, E> {
    /// The element's `id` attribute. A leading `#` is ignored.
    Id(&'a str),
    /// An element handle.
    Element(E),
}

impl<'a, E> From<&'a str> for TargetRef<'a, E> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a, E> From<&'a String> for TargetRef<'a, E> {
    fn from(id: &'a String) -> Self {
        Self::Id(id.as_str())
    }
}

/// A resolved target: the live element and its identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTarget<E> {
    /// The element handle.
    pub element: E,
    /// The element's non-empty `id` attribute.
    pub id: TargetId,
}

/// Resolve `target` against `doc`.
///
/// Pure: nothing is cached and the document is not touched.
pub fn resolve<D: Document>(
    doc: &D,
    target: TargetRef<'_, D::Element>,
) -> Result<ResolvedTarget<D::Element>, Error> {
    let element = match target {
        TargetRef::Id(raw) => {
            let id = raw.strip_prefix('#').unwrap_or(raw);
            if id.is_empty() {
                return Err(Error::invalid_target("empty identifier"));
            }
            doc.element_by_id(id)
                .ok_or_else(|| Error::invalid_target(format!("no element with id `{id}`")))?
        }
        TargetRef::Element(el) => {
            if !doc.contains(el) {
                return Err(Error::invalid_target(format!("{el:?} is not a live element")));
            }
            el
        }
    };
    match doc.id_of(element) {
        Some(id) if !id.is_empty() => Ok(ResolvedTarget {
            element,
            id: id.to_string(),
        }),
        _ => Err(Error::invalid_target("targets must carry an id")),
    }
}
