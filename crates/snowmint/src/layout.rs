use crate::ConfigError;

/// Returns a mask with the low `bits` bits set.
#[inline]
pub(crate) const fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// A validated Snowflake bit layout.
///
/// Fields are packed from most to least significant, with any unused high bits
/// left at zero:
///
/// ```text
///  Bit Index:  63                                                     0
///              +--------+----------------+-----------+----------------+
///  Field:      | unused | timestamp (T)  | node (N)  | sequence (S)   |
///              +--------+----------------+-----------+----------------+
///              |<-- MSB ------------ 64 bits --------------- LSB ---->|
/// ```
///
/// All offsets and masks are derived once in [`Layout::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    timestamp_bits: u8,
    node_bits: u8,
    sequence_bits: u8,

    timestamp_offset: u32,
    node_offset: u32,

    max_timestamp: u64,
    max_node: u64,
    max_sequence: u64,
}

/// The three fields of a decoded ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parts {
    /// Ticks since the epoch.
    pub timestamp: u64,
    /// Node that minted the ID.
    pub node: u64,
    /// Per-tick sequence number.
    pub sequence: u64,
}

impl Layout {
    /// Validates the field widths and derives offsets and masks.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::LayoutOverflow`] if the widths add up to more than 64
    /// - [`ConfigError::ZeroSequenceBits`] if `sequence_bits` is zero
    ///
    /// # Example
    /// ```
    /// use snowmint::{ConfigError, Layout};
    ///
    /// let layout = Layout::new(41, 10, 12).unwrap();
    /// assert_eq!(layout.timestamp_offset(), 22);
    /// assert_eq!(layout.max_sequence(), 4095);
    ///
    /// assert_eq!(Layout::new(41, 10, 0), Err(ConfigError::ZeroSequenceBits));
    /// ```
    pub const fn new(
        timestamp_bits: u8,
        node_bits: u8,
        sequence_bits: u8,
    ) -> Result<Self, ConfigError> {
        let total = timestamp_bits as u32 + node_bits as u32 + sequence_bits as u32;
        if total > u64::BITS {
            return Err(ConfigError::LayoutOverflow { total });
        }
        if sequence_bits == 0 {
            return Err(ConfigError::ZeroSequenceBits);
        }

        Ok(Self {
            timestamp_bits,
            node_bits,
            sequence_bits,
            timestamp_offset: node_bits as u32 + sequence_bits as u32,
            node_offset: sequence_bits as u32,
            max_timestamp: mask(timestamp_bits),
            max_node: mask(node_bits),
            max_sequence: mask(sequence_bits),
        })
    }

    /// Width of the timestamp field.
    pub const fn timestamp_bits(&self) -> u8 {
        self.timestamp_bits
    }

    /// Width of the node field.
    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    /// Width of the sequence field.
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Bits reserved below the timestamp field (`node_bits + sequence_bits`).
    pub const fn timestamp_offset(&self) -> u32 {
        self.timestamp_offset
    }

    /// Bits reserved below the node field (`sequence_bits`).
    pub const fn node_offset(&self) -> u32 {
        self.node_offset
    }

    /// Largest tick count the timestamp field can hold.
    pub const fn max_timestamp(&self) -> u64 {
        self.max_timestamp
    }

    /// Largest node number the node field can hold.
    pub const fn max_node(&self) -> u64 {
        self.max_node
    }

    /// Largest sequence number, i.e. IDs per tick minus one.
    pub const fn max_sequence(&self) -> u64 {
        self.max_sequence
    }

    /// Packs the three fields into a raw ID.
    ///
    /// Each component is masked to its field width. A zero-width timestamp
    /// field always packs as zero.
    #[inline]
    pub const fn compose(&self, timestamp: u64, node: u64, sequence: u64) -> u64 {
        let timestamp = match (timestamp & self.max_timestamp).checked_shl(self.timestamp_offset) {
            Some(ts) => ts,
            None => 0,
        };
        let node = match (node & self.max_node).checked_shl(self.node_offset) {
            Some(n) => n,
            None => 0,
        };
        timestamp | node | (sequence & self.max_sequence)
    }

    /// Extracts the timestamp field from a raw ID.
    #[inline]
    pub const fn timestamp(&self, raw: u64) -> u64 {
        match raw.checked_shr(self.timestamp_offset) {
            Some(ts) => ts & self.max_timestamp,
            None => 0,
        }
    }

    /// Extracts the node field from a raw ID.
    #[inline]
    pub const fn node(&self, raw: u64) -> u64 {
        match raw.checked_shr(self.node_offset) {
            Some(n) => n & self.max_node,
            None => 0,
        }
    }

    /// Extracts the sequence field from a raw ID.
    #[inline]
    pub const fn sequence(&self, raw: u64) -> u64 {
        raw & self.max_sequence
    }

    /// Splits a raw ID into its fields.
    pub const fn decompose(&self, raw: u64) -> Parts {
        Parts {
            timestamp: self.timestamp(raw),
            node: self.node(raw),
            sequence: self.sequence(raw),
        }
    }
}
