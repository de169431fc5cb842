use modular_bitfield::prelude::*;
use std::fmt;

/// A 64-bit Snowflake ID.
///
/// Fields are packed from the least significant bit, so the `u64` value is
/// `timestamp << 12 | sequence` with bit 63 always clear. Comparing IDs as
/// integers therefore orders them by timestamp first, then sequence.
#[bitfield]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnowflakeId {
    /// 12 bits for sequence number (resets every millisecond).
    pub sequence: B12,
    /// 51 bits for timestamp (milliseconds since a custom epoch).
    pub timestamp: B51,
    #[skip]
    __: B1,
}

impl SnowflakeId {
    pub fn as_u64(self) -> u64 {
        u64::from_le_bytes(self.into_bytes())
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.as_u64()
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("timestamp", &self.timestamp())
            .field("sequence", &self.sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_timestamp_above_sequence() {
        let id = SnowflakeId::new().with_timestamp(5).with_sequence(3);
        assert_eq!(id.as_u64(), (5 << 12) | 3);
    }

    #[test]
    fn top_bit_stays_clear() {
        let id = SnowflakeId::new()
            .with_timestamp((1_u64 << 51) - 1)
            .with_sequence(0xFFF);
        assert_eq!(id.as_u64(), u64::MAX >> 1);
    }

    #[test]
    fn from_u64_restores_fields() {
        let id = SnowflakeId::from_u64((1234 << 12) | 77);
        assert_eq!(id.timestamp(), 1234);
        assert_eq!(id.sequence(), 77);
    }

    #[test]
    fn integer_order_follows_fields() {
        let a = SnowflakeId::new().with_timestamp(10).with_sequence(4095);
        let b = SnowflakeId::new().with_timestamp(11).with_sequence(0);
        assert!(a.as_u64() < b.as_u64());
    }
}
