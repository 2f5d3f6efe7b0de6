//! Qubit addressing

use std::fmt;

/// Index of a qubit within a circuit
///
/// Wraps the raw position so circuit APIs cannot be handed a basis index
/// or a count by mistake. Qubit `q` is bit `q` of a basis-state index.
///
/// ```
/// use chaosq_core::QubitId;
///
/// let q = QubitId::new(2);
/// assert_eq!(q.index(), 2);
/// assert_eq!(q.mask(), 0b100);
/// assert_eq!(q.to_string(), "q2");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct QubitId(usize);

impl QubitId {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Single-bit mask selecting this qubit in a basis index
    #[inline]
    pub const fn mask(self) -> usize {
        1usize << self.0
    }

    /// Value of this qubit in basis state `basis_index`
    #[inline]
    pub const fn bit_of(self, basis_index: usize) -> u8 {
        ((basis_index >> self.0) & 1) as u8
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for QubitId {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<QubitId> for usize {
    #[inline]
    fn from(qubit: QubitId) -> Self {
        qubit.0
    }
}

/// Raw indices of a qubit slice
pub(crate) fn indices(qubits: &[QubitId]) -> smallvec::SmallVec<[usize; 4]> {
    qubits.iter().map(|q| q.index()).collect()
}
