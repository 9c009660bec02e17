//! Canonical reference chromosomes and a fixed-size table keyed by them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of canonical chromosomes: 22 autosomes, X, Y and the mitochondrion
pub const CANONICAL_COUNT: usize = 25;

/// One of the canonical human reference contigs (chr1-chr22, chrX, chrY, chrM).
///
/// Ordering follows the canonical output order: autosomes numerically, then X, Y, M.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Chromosome(u8);

impl Chromosome {
    pub const X: Self = Self(22);
    pub const Y: Self = Self(23);
    pub const M: Self = Self(24);

    /// The autosome with the given number (1-22)
    #[must_use]
    pub fn autosome(number: u8) -> Option<Self> {
        (1..=22).contains(&number).then(|| Self(number - 1))
    }

    /// Position of this chromosome in the canonical order
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    #[must_use]
    pub fn is_mitochondrial(self) -> bool {
        self == Self::M
    }

    /// All canonical chromosomes in output order, chrM last
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CANONICAL_COUNT as u8).map(Self)
    }

    /// Parse a UCSC-style name (`chr1`, `chrX`, `chrM`)
    #[must_use]
    pub fn from_ucsc(name: &str) -> Option<Self> {
        name.strip_prefix("chr").and_then(|rest| match rest {
            "X" => Some(Self::X),
            "Y" => Some(Self::Y),
            "M" => Some(Self::M),
            digits => parse_autosome(digits),
        })
    }

    /// Parse an NCBI-style name (`1`, `X`, `MT`)
    #[must_use]
    pub fn from_ncbi(name: &str) -> Option<Self> {
        match name {
            "X" => Some(Self::X),
            "Y" => Some(Self::Y),
            "MT" => Some(Self::M),
            digits => parse_autosome(digits),
        }
    }
}

// Rejects "01", "+1" and friends that `str::parse` would accept
fn parse_autosome(digits: &str) -> Option<Chromosome> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok().and_then(Chromosome::autosome)
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::X => write!(f, "chrX"),
            Self::Y => write!(f, "chrY"),
            Self::M => write!(f, "chrM"),
            Self(n) => write!(f, "chr{}", n + 1),
        }
    }
}

/// The allow-list of chromosomes an annotation job keeps.
///
/// Autosomes, X and Y are always allowed; the mitochondrion is opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSet {
    #[serde(default)]
    pub include_mitochondrial: bool,
}

impl CanonicalSet {
    #[must_use]
    pub fn new(include_mitochondrial: bool) -> Self {
        Self {
            include_mitochondrial,
        }
    }

    #[must_use]
    pub fn contains(&self, chromosome: Chromosome) -> bool {
        self.include_mitochondrial || !chromosome.is_mitochondrial()
    }

    /// Resolve a UCSC contig name against the allow-list
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Chromosome> {
        Chromosome::from_ucsc(name).filter(|c| self.contains(*c))
    }
}

/// Fixed-size per-chromosome storage indexed by [`Chromosome`].
#[derive(Debug, Clone)]
pub struct ChromosomeTable<T> {
    slots: [T; CANONICAL_COUNT],
}

impl<T: Default> Default for ChromosomeTable<T> {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| T::default()),
        }
    }
}

impl<T> ChromosomeTable<T> {
    pub fn get_mut(&mut self, chromosome: Chromosome) -> &mut T {
        &mut self.slots[chromosome.index()]
    }

    /// Consume the table, yielding entries in canonical order
    pub fn into_entries(self) -> impl Iterator<Item = (Chromosome, T)> {
        Chromosome::all().zip(self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucsc_names_round_trip_in_canonical_order() {
        let names: Vec<String> = Chromosome::all().map(|c| c.to_string()).collect();
        assert_eq!(names.len(), CANONICAL_COUNT);
        assert_eq!(names[0], "chr1");
        assert_eq!(names[21], "chr22");
        assert_eq!(&names[22..], ["chrX", "chrY", "chrM"]);

        for name in &names {
            assert_eq!(Chromosome::from_ucsc(name).unwrap().to_string(), *name);
        }
    }

    #[test]
    fn test_rejects_non_canonical_names() {
        for name in ["chr0", "chr23", "chr01", "chr+1", "chrUn_gl000220", "chr1_random", "1", ""] {
            assert!(Chromosome::from_ucsc(name).is_none(), "{name} accepted");
        }
    }

    #[test]
    fn test_ncbi_names() {
        assert_eq!(Chromosome::from_ncbi("7"), Chromosome::autosome(7));
        assert_eq!(Chromosome::from_ncbi("X"), Some(Chromosome::X));
        assert_eq!(Chromosome::from_ncbi("MT"), Some(Chromosome::M));
        assert!(Chromosome::from_ncbi("chr7").is_none());
        assert!(Chromosome::from_ncbi("Un").is_none());
    }

    #[test]
    fn test_numeric_ordering() {
        let chr2 = Chromosome::autosome(2).unwrap();
        let chr10 = Chromosome::autosome(10).unwrap();
        assert!(chr2 < chr10);
        assert!(chr10 < Chromosome::X);
        assert!(Chromosome::Y < Chromosome::M);
    }

    #[test]
    fn test_canonical_set_mitochondrion_opt_in() {
        let nuclear = CanonicalSet::default();
        assert!(nuclear.resolve("chrM").is_none());
        assert!(!nuclear.contains(Chromosome::M));
        assert_eq!(Chromosome::all().filter(|c| nuclear.contains(*c)).count(), 24);

        let with_mito = CanonicalSet::new(true);
        assert_eq!(with_mito.resolve("chrM"), Some(Chromosome::M));
        assert!(with_mito.contains(Chromosome::M));
    }

    #[test]
    fn test_table_entries_follow_canonical_order() {
        let mut table: ChromosomeTable<Vec<u32>> = ChromosomeTable::default();
        table.get_mut(Chromosome::Y).push(3);
        table.get_mut(Chromosome::autosome(2).unwrap()).push(1);

        let filled: Vec<(String, Vec<u32>)> = table
            .into_entries()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, v)| (c.to_string(), v))
            .collect();
        assert_eq!(
            filled,
            vec![("chr2".to_string(), vec![1]), ("chrY".to_string(), vec![3])]
        );
    }
}
