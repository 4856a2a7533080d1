//! Degree-of-freedom bookkeeping.
//!
//! Callers number degrees of freedom from 1, the way hand calculations and
//! textbook element freedom tables do. Everything past this module works with
//! 0-based indices, so the translation happens exactly once, here.

use crate::errors::DofError;

/// Number of degrees of freedom carried by one planar joint.
pub const DOFS_PER_JOINT: usize = 2;

/// Global degree-of-freedom indices of one bar element.
///
/// The slots follow the local order `(ix, iy, jx, jy)`. Entries are distinct
/// and stored 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementFreedomTable([usize; 4]);

impl ElementFreedomTable {
    /// Translate a 1-based table into its 0-based form.
    ///
    /// # Errors
    ///
    /// Returns [`DofError::OutOfRange`] when an entry lies outside `1..=ndof`
    /// and [`DofError::Duplicate`] when an entry is repeated.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::ElementFreedomTable;
    ///
    /// let eft = ElementFreedomTable::from_one_based([3, 4, 5, 6], 6).unwrap();
    /// assert_eq!(eft.indices(), [2, 3, 4, 5]);
    /// assert!(ElementFreedomTable::from_one_based([1, 2, 2, 3], 6).is_err());
    /// ```
    pub fn from_one_based(entries: [usize; 4], ndof: usize) -> Result<Self, DofError> {
        let mut indices = [0; 4];
        for (slot, &entry) in entries.iter().enumerate() {
            indices[slot] = to_zero_based(entry, ndof)?;
            if entries[..slot].contains(&entry) {
                return Err(DofError::Duplicate { index: entry });
            }
        }
        Ok(Self(indices))
    }

    /// Build the conventional table for a bar between two 0-based joints.
    ///
    /// Joint `k` owns degrees of freedom `2k` (x) and `2k + 1` (y).
    #[must_use]
    pub const fn for_joints(start: usize, end: usize) -> Self {
        Self([
            start * DOFS_PER_JOINT,
            start * DOFS_PER_JOINT + 1,
            end * DOFS_PER_JOINT,
            end * DOFS_PER_JOINT + 1,
        ])
    }

    /// The 0-based global indices in local slot order.
    #[must_use]
    pub const fn indices(&self) -> [usize; 4] {
        self.0
    }

    /// The table in the caller's 1-based numbering.
    #[must_use]
    pub fn one_based(&self) -> [usize; 4] {
        self.0.map(|index| index + 1)
    }

    /// Confirm every entry addresses a system with `ndof` degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns [`DofError::OutOfRange`] for the first entry that does not fit.
    pub fn check_within(&self, ndof: usize) -> Result<(), DofError> {
        match self.0.iter().find(|&&index| index >= ndof) {
            Some(&index) => Err(DofError::OutOfRange {
                index: index + 1,
                ndof,
            }),
            None => Ok(()),
        }
    }
}

/// Degrees of freedom held at zero displacement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrescribedDofs(Vec<usize>);

impl PrescribedDofs {
    /// Translate a 1-based list of fixed degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns [`DofError::OutOfRange`] when an entry lies outside `1..=ndof`
    /// and [`DofError::Duplicate`] when an entry is repeated.
    ///
    /// # Examples
    /// ```
    /// use trussdsm::PrescribedDofs;
    ///
    /// let pdof = PrescribedDofs::from_one_based(&[1, 2, 4], 6).unwrap();
    /// assert_eq!(pdof.indices(), &[0, 1, 3]);
    /// ```
    pub fn from_one_based(entries: &[usize], ndof: usize) -> Result<Self, DofError> {
        let mut indices = Vec::with_capacity(entries.len());
        for (position, &entry) in entries.iter().enumerate() {
            let index = to_zero_based(entry, ndof)?;
            if entries[..position].contains(&entry) {
                return Err(DofError::Duplicate { index: entry });
            }
            indices.push(index);
        }
        Ok(Self(indices))
    }

    /// The 0-based indices in the order they were supplied.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// The list in the caller's 1-based numbering.
    #[must_use]
    pub fn one_based(&self) -> Vec<usize> {
        self.0.iter().map(|index| index + 1).collect()
    }

    /// Whether the 0-based index is fixed.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Number of fixed degrees of freedom.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no degree of freedom is fixed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Confirm every entry addresses a system with `ndof` degrees of freedom.
    ///
    /// # Errors
    ///
    /// Returns [`DofError::OutOfRange`] for the first entry that does not fit.
    pub fn check_within(&self, ndof: usize) -> Result<(), DofError> {
        match self.0.iter().find(|&&index| index >= ndof) {
            Some(&index) => Err(DofError::OutOfRange {
                index: index + 1,
                ndof,
            }),
            None => Ok(()),
        }
    }
}

/// Convert one 1-based entry, rejecting zero and anything past `ndof`.
fn to_zero_based(entry: usize, ndof: usize) -> Result<usize, DofError> {
    if entry == 0 || entry > ndof {
        return Err(DofError::OutOfRange { index: entry, ndof });
    }
    Ok(entry - 1)
}
