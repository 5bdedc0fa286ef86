// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::Figure;

/// Ordered collection of heterogeneous shapes.
///
/// Used for debug overlays such as a drawn navigation graph. Intersection
/// and containment treat it as the union of its members.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FigArray {
    figures: Vec<Figure>,
}

impl FigArray {
    /// Empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape.
    pub fn push(&mut self, figure: impl Into<Figure>) {
        self.figures.push(figure.into());
    }

    /// Members in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Figure> {
        self.figures.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, Figure> {
        self.figures.iter_mut()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// `true` when there are no members.
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

impl<F: Into<Figure>> FromIterator<F> for FigArray {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self {
            figures: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FigArray {
    type Item = &'a Figure;
    type IntoIter = core::slice::Iter<'a, Figure>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
