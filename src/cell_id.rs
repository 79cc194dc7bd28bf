//! Quadtree cell addresses.
//!
//! A [`CellId`] is a path of 2-bit quadrant selectors from the root of a
//! quadtree laid over a `2^DEPTH_LEVELS x 2^DEPTH_LEVELS` integer grid. The
//! selector at each level is `(y_bit << 1) | x_bit`, so the path bits are the
//! Z-order interleave of the cell's grid coordinates and truncating a path
//! yields the enclosing cell.
//!
//! ```rust
//! use quadcell::CellId;
//!
//! let cell: CellId<30> = "213".parse()?;
//! assert_eq!(cell.level(), 3);
//! assert_eq!(cell.parent().to_string(), "21");
//! assert!(cell.parent().is_ancestor_of(&cell));
//! # Ok::<(), quadcell::QuadcellError>(())
//! ```

use crate::bits::{bitwise_merge, bitwise_split};
use crate::error::{QuadcellError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Cell id used for bucketing and packed geometry.
pub type RectId = CellId<19>;

/// Address of one cell of a fixed-depth quadtree.
///
/// The finest level is `DEPTH_LEVELS - 1`, where a cell spans 2x2 grid
/// units; the root (level 0) spans the whole `MAX_COORD x MAX_COORD` grid.
/// `DEPTH_LEVELS` must be in `2..=31`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId<const DEPTH_LEVELS: usize = 30> {
    bits: u64,
    level: u8,
}

impl<const DEPTH_LEVELS: usize> CellId<DEPTH_LEVELS> {
    const VALID_DEPTH: () = assert!(
        DEPTH_LEVELS >= 2 && DEPTH_LEVELS <= 31,
        "DEPTH_LEVELS must be in 2..=31"
    );

    /// Deepest level a cell can have.
    pub const MAX_DEPTH: usize = DEPTH_LEVELS - 1;

    /// Grid side length in integer units.
    pub const MAX_COORD: u32 = 1u32 << DEPTH_LEVELS;

    /// The cell covering the whole grid.
    pub const fn root() -> Self {
        let () = Self::VALID_DEPTH;
        Self { bits: 0, level: 0 }
    }

    /// Build a cell from raw path bits (two per level, top level most significant).
    ///
    /// # Panics
    ///
    /// Panics if `level > MAX_DEPTH` or `bits` has bits above `2 * level`.
    pub fn from_bits_and_level(bits: u64, level: usize) -> Self {
        let () = Self::VALID_DEPTH;
        assert!(
            level <= Self::MAX_DEPTH,
            "level {} exceeds max depth {}",
            level,
            Self::MAX_DEPTH
        );
        assert!(
            bits >> (2 * level) == 0,
            "bits {:#x} do not fit level {}",
            bits,
            level
        );
        Self {
            bits,
            level: level as u8,
        }
    }

    /// The finest cell containing grid point `(x, y)`.
    ///
    /// The path is the interleave of `x` and `y` with their lowest bit
    /// dropped, since a finest cell spans two grid units per axis.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is `>= MAX_COORD`.
    pub fn from_xy(x: u32, y: u32) -> Self {
        let () = Self::VALID_DEPTH;
        assert!(
            x < Self::MAX_COORD && y < Self::MAX_COORD,
            "grid point ({}, {}) outside grid of side {}",
            x,
            y,
            Self::MAX_COORD
        );
        Self {
            bits: bitwise_merge(x >> 1, y >> 1),
            level: Self::MAX_DEPTH as u8,
        }
    }

    /// The cell at `level` containing grid point `(x, y)`.
    pub fn from_xy_at(x: u32, y: u32, level: usize) -> Self {
        Self::from_xy(x, y).ancestor_at(level)
    }

    /// Parse the digit-string form. Same as `str::parse`.
    pub fn from_string(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Raw path bits, two per level.
    pub const fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of quadrant selectors in the path.
    pub const fn level(&self) -> usize {
        self.level as usize
    }

    /// Same as [`CellId::level`].
    pub const fn depth(&self) -> usize {
        self.level()
    }

    pub const fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Lower-left grid corner of the cell's region.
    pub fn xy(&self) -> (u32, u32) {
        let shift = 2 * (Self::MAX_DEPTH - self.level());
        let (x, y) = bitwise_split(self.bits << shift);
        (x << 1, y << 1)
    }

    /// Grid point at the center of the cell's region.
    pub fn center(&self) -> (u32, u32) {
        let (x, y) = self.xy();
        let r = self.radius();
        (x + r, y + r)
    }

    /// Half the cell's side, in grid units.
    pub fn radius(&self) -> u32 {
        1 << (DEPTH_LEVELS - 1 - self.level())
    }

    /// The cell's side, in grid units.
    pub fn size(&self) -> u32 {
        1 << (DEPTH_LEVELS - self.level())
    }

    pub fn checked_parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            bits: self.bits >> 2,
            level: self.level - 1,
        })
    }

    /// The enclosing cell one level up.
    ///
    /// # Panics
    ///
    /// Panics when called on the root.
    pub fn parent(&self) -> Self {
        self.checked_parent()
            .unwrap_or_else(|| panic!("root cell has no parent"))
    }

    pub fn checked_child(&self, quadrant: u8) -> Option<Self> {
        if quadrant > 3 || self.level() >= Self::MAX_DEPTH {
            return None;
        }
        Some(Self {
            bits: (self.bits << 2) | u64::from(quadrant),
            level: self.level + 1,
        })
    }

    /// The child in `quadrant` (`0..=3`).
    ///
    /// # Panics
    ///
    /// Panics if `quadrant > 3` or the cell is already at `MAX_DEPTH`.
    pub fn child(&self, quadrant: u8) -> Self {
        self.checked_child(quadrant).unwrap_or_else(|| {
            panic!(
                "cannot take child {} of cell {} at level {}",
                quadrant,
                self,
                self.level()
            )
        })
    }

    /// All four children, in quadrant order.
    pub fn children(&self) -> [Self; 4] {
        [self.child(0), self.child(1), self.child(2), self.child(3)]
    }

    /// The ancestor at `level` (the cell itself when `level == self.level()`).
    ///
    /// # Panics
    ///
    /// Panics if `level > self.level()`.
    pub fn ancestor_at(&self, level: usize) -> Self {
        assert!(
            level <= self.level(),
            "level {} is deeper than cell level {}",
            level,
            self.level()
        );
        Self {
            bits: self.bits >> (2 * (self.level() - level)),
            level: level as u8,
        }
    }

    /// Quadrant selector at path position `index` (0 is the top level).
    pub fn quadrant(&self, index: usize) -> u8 {
        assert!(index < self.level(), "index {} out of path", index);
        ((self.bits >> (2 * (self.level() - 1 - index))) & 3) as u8
    }

    /// Quadrant selectors from the top level down.
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.level()).map(|i| self.quadrant(i))
    }

    /// Whether `self`'s path is a prefix of `other`'s. A cell is its own ancestor.
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.level <= other.level && other.ancestor_at(self.level()) == *self
    }

    /// Deepest cell that is an ancestor of both.
    pub fn common_ancestor(&self, other: &Self) -> Self {
        let mut a = *self;
        let mut b = *other;
        while a.level > b.level {
            a = a.parent();
        }
        while b.level > a.level {
            b = b.parent();
        }
        while a != b {
            a = a.parent();
            b = b.parent();
        }
        a
    }

    /// Packed form: the path bits, a terminator `1` bit, then zero padding
    /// to `2 * MAX_DEPTH + 1` bits.
    ///
    /// Sorting packed values orders cells along the Z-order curve with each
    /// cell placed between its first and last descendants; this differs from
    /// [`Ord`], which sorts ancestors first.
    pub fn to_u64(&self) -> u64 {
        ((self.bits << 1) | 1) << (2 * (Self::MAX_DEPTH - self.level()))
    }

    pub fn from_u64(value: u64) -> Result<Self> {
        let () = Self::VALID_DEPTH;
        if value == 0 {
            return Err(QuadcellError::InvalidCellId(
                "packed cell id must not be zero".to_string(),
            ));
        }
        let tz = value.trailing_zeros() as usize;
        if tz % 2 != 0 || tz / 2 > Self::MAX_DEPTH {
            return Err(QuadcellError::InvalidCellId(format!(
                "misplaced terminator in packed cell id {:#x}",
                value
            )));
        }
        let level = Self::MAX_DEPTH - tz / 2;
        let bits = value >> (tz + 1);
        if bits >> (2 * level) != 0 {
            return Err(QuadcellError::InvalidCellId(format!(
                "packed cell id {:#x} exceeds {} levels",
                value,
                Self::MAX_DEPTH
            )));
        }
        Ok(Self {
            bits,
            level: level as u8,
        })
    }

    fn aligned_bits(&self) -> u64 {
        self.bits << (2 * (Self::MAX_DEPTH - self.level()))
    }
}

impl<const DEPTH_LEVELS: usize> Default for CellId<DEPTH_LEVELS> {
    fn default() -> Self {
        Self::root()
    }
}

impl<const DEPTH_LEVELS: usize> Ord for CellId<DEPTH_LEVELS> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.aligned_bits()
            .cmp(&other.aligned_bits())
            .then(self.level.cmp(&other.level))
    }
}

impl<const DEPTH_LEVELS: usize> PartialOrd for CellId<DEPTH_LEVELS> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const DEPTH_LEVELS: usize> fmt::Display for CellId<DEPTH_LEVELS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.digits().map(|d| char::from(b'0' + d)).collect();
        f.write_str(&s)
    }
}

impl<const DEPTH_LEVELS: usize> fmt::Debug for CellId<DEPTH_LEVELS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId(\"{}\")", self)
    }
}

impl<const DEPTH_LEVELS: usize> FromStr for CellId<DEPTH_LEVELS> {
    type Err = QuadcellError;

    fn from_str(s: &str) -> Result<Self> {
        let () = Self::VALID_DEPTH;
        if s.len() > Self::MAX_DEPTH {
            return Err(QuadcellError::InvalidCellId(format!(
                "'{}' is longer than max depth {}",
                s,
                Self::MAX_DEPTH
            )));
        }
        let mut bits = 0u64;
        for (idx, c) in s.bytes().enumerate() {
            match c {
                b'0'..=b'3' => bits = (bits << 2) | u64::from(c - b'0'),
                _ => {
                    return Err(QuadcellError::InvalidCellId(format!(
                        "invalid digit at position {} in '{}'",
                        idx, s
                    )));
                }
            }
        }
        Ok(Self {
            bits,
            level: s.len() as u8,
        })
    }
}

impl<const DEPTH_LEVELS: usize> Serialize for CellId<DEPTH_LEVELS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, const DEPTH_LEVELS: usize> Deserialize<'de> for CellId<DEPTH_LEVELS> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
