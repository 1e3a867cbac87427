// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangulation shared by the center-plus-ring generators: rounded rect, ellipse and
//! regular polygon.
//!
//! Layout: one center vertex at `base`, followed by `groups` outline samples. Unstroked samples
//! are a single vertex. Stroked samples are three vertices: inner point in fill color, the same
//! inner point in line color, then the outer point in line color.

use crate::vertex::VertexHelper;

/// How the last ring sample connects back to the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RingClosure {
    /// Full loop: the last sample joins the first.
    Closed,
    /// Angular section: the ring stops at the last sample.
    Open,
}

pub(crate) fn add_ring_triangles(
    vh: &mut VertexHelper,
    base: usize,
    groups: usize,
    stroked: bool,
    closure: RingClosure,
) {
    if groups == 0 {
        return;
    }
    let c = base;
    if stroked {
        for k in 0..groups {
            let i = base + k * 3;
            let last = k + 1 == groups;
            if last && closure == RingClosure::Open {
                break;
            }
            let (ni, nl, no) = if last {
                (base + 1, base + 2, base + 3)
            } else {
                (i + 4, i + 5, i + 6)
            };
            vh.add_triangle(c, i + 1, ni);
            vh.add_triangle(nl, i + 2, i + 3);
            vh.add_triangle(i + 3, no, nl);
        }
    } else {
        for k in 0..groups {
            let i = base + 1 + k;
            let last = k + 1 == groups;
            if last && closure == RingClosure::Open {
                break;
            }
            let next = if last { base + 1 } else { i + 1 };
            vh.add_triangle(c, i, next);
        }
    }
}
