//! Canonical state keys.
//!
//! A [`CanonicalKey`] is the identity of a search state: a flat, ordered
//! sequence of primitive atoms. The closed set compares keys, never the
//! states themselves, so a state type's container choice (tuple, grid,
//! vector) cannot leak into deduplication.

use crate::hash::{canonical_hash, ContentHash, HashDomain};

const TAG_INT: u8 = 0x01;
const TAG_TEXT: u8 = 0x02;

/// One primitive value inside a [`CanonicalKey`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyAtom {
    Int(i64),
    Text(String),
}

/// Immutable, ordered sequence of [`KeyAtom`]s.
///
/// Equality, ordering and hashing are all structural over the atoms, so two
/// keys built from the same values in the same order are interchangeable.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey {
    atoms: Vec<KeyAtom>,
}

impl CanonicalKey {
    /// Start building a key.
    #[must_use]
    pub fn builder() -> KeyBuilder {
        KeyBuilder::default()
    }

    /// Key made of integer atoms only.
    pub fn from_ints<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self {
            atoms: values.into_iter().map(KeyAtom::Int).collect(),
        }
    }

    #[must_use]
    pub fn atoms(&self) -> &[KeyAtom] {
        &self.atoms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Deterministic byte encoding.
    ///
    /// Each atom is a tag byte followed by either a little-endian `i64` or a
    /// little-endian `u32` length and the UTF-8 bytes. The encoding is
    /// prefix-free, so distinct keys never encode to the same bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.atoms.len() * 9);
        for atom in &self.atoms {
            match atom {
                KeyAtom::Int(v) => {
                    buf.push(TAG_INT);
                    buf.extend_from_slice(&v.to_le_bytes());
                }
                KeyAtom::Text(s) => {
                    buf.push(TAG_TEXT);
                    let len = u32::try_from(s.len()).unwrap_or(u32::MAX);
                    buf.extend_from_slice(&len.to_le_bytes());
                    buf.extend_from_slice(s.as_bytes());
                }
            }
        }
        buf
    }

    /// Content hash of [`Self::to_bytes`] under [`HashDomain::StateKey`].
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::StateKey, &self.to_bytes())
    }
}

/// Incremental builder for [`CanonicalKey`].
#[derive(Debug, Default)]
pub struct KeyBuilder {
    atoms: Vec<KeyAtom>,
}

impl KeyBuilder {
    #[must_use]
    pub fn int(mut self, value: i64) -> Self {
        self.atoms.push(KeyAtom::Int(value));
        self
    }

    #[must_use]
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.atoms.push(KeyAtom::Text(value.into()));
        self
    }

    #[must_use]
    pub fn ints<I: IntoIterator<Item = i64>>(mut self, values: I) -> Self {
        self.atoms.extend(values.into_iter().map(KeyAtom::Int));
        self
    }

    /// Append a two-dimensional grid.
    ///
    /// The row count and every row length precede the row's cells, so a
    /// 2×3 grid and a 3×2 grid holding the same cells get different keys.
    #[must_use]
    pub fn grid<R, I>(mut self, rows: R) -> Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = i64>,
    {
        let rows: Vec<Vec<i64>> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        self.atoms.push(KeyAtom::Int(len_atom(rows.len())));
        for row in rows {
            self.atoms.push(KeyAtom::Int(len_atom(row.len())));
            self.atoms.extend(row.into_iter().map(KeyAtom::Int));
        }
        self
    }

    /// Append every atom of another key.
    #[must_use]
    pub fn key(mut self, other: &CanonicalKey) -> Self {
        self.atoms.extend(other.atoms.iter().cloned());
        self
    }

    #[must_use]
    pub fn build(self) -> CanonicalKey {
        CanonicalKey { atoms: self.atoms }
    }
}

fn len_atom(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// A state type with an explicit canonical identity.
///
/// Implementations must map semantically equal states to equal keys.
pub trait CanonicalState {
    fn canonical_key(&self) -> CanonicalKey;
}

impl CanonicalState for CanonicalKey {
    fn canonical_key(&self) -> CanonicalKey {
        self.clone()
    }
}

impl CanonicalState for i64 {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_ints([*self])
    }
}

impl CanonicalState for u32 {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_ints([i64::from(*self)])
    }
}

impl CanonicalState for usize {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_ints([len_atom(*self)])
    }
}

impl CanonicalState for char {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::from_ints([i64::from(u32::from(*self))])
    }
}

impl CanonicalState for String {
    fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::builder().text(self.as_str()).build()
    }
}

impl<T: CanonicalState> CanonicalState for Vec<T> {
    fn canonical_key(&self) -> CanonicalKey {
        self.iter()
            .fold(
                CanonicalKey::builder().int(len_atom(self.len())),
                |b, item| {
                    let key = item.canonical_key();
                    b.int(len_atom(key.len())).key(&key)
                },
            )
            .build()
    }
}

impl<A: CanonicalState, B: CanonicalState> CanonicalState for (A, B) {
    fn canonical_key(&self) -> CanonicalKey {
        let (a, b) = (self.0.canonical_key(), self.1.canonical_key());
        CanonicalKey::builder()
            .int(len_atom(a.len()))
            .key(&a)
            .int(len_atom(b.len()))
            .key(&b)
            .build()
    }
}

impl<A: CanonicalState, B: CanonicalState, C: CanonicalState> CanonicalState for (A, B, C) {
    fn canonical_key(&self) -> CanonicalKey {
        let (a, b, c) = (
            self.0.canonical_key(),
            self.1.canonical_key(),
            self.2.canonical_key(),
        );
        CanonicalKey::builder()
            .int(len_atom(a.len()))
            .key(&a)
            .int(len_atom(b.len()))
            .key(&b)
            .int(len_atom(c.len()))
            .key(&c)
            .build()
    }
}
