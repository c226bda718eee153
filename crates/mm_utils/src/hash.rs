//! Hash containers, re-exporting *hashbrown* and *foldhash*.
//!
//! All containers default to [`FixedHashState`], which produces hash results
//! that depend only on the input. [`NoOpHashState`] passes `u64`-sized keys
//! through untouched and backs [`TypeIdMap`](crate::TypeIdMap).

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6A34_B8F0_91C7_55D3);

/// A hasher whose result depends only on the input.
///
/// A type alias for [`foldhash::fast::FoldHasher`], created through
/// [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use mm_utils::hash::FixedHashState;
///
/// let mut hasher = FixedHashState.build_hasher();
/// 3.hash(&mut hasher);
/// let result = hasher.finish(); // same result on every run
/// # let _ = result;
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that passes the value through `u64` unchanged.
///
/// Created through [`NoOpHashState::build_hasher`]. Intended for keys that
/// are already well-distributed, such as `TypeId`.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Rotate-add keeps `write_u32(n)` and `write_u64(n)` equivalent for a
        // single call.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Hash state for [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use mm_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 3.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 3_u64);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] with a fixed-seed hash state.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] with a fixed-seed hash state.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
