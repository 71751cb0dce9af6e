//! Quantized block container

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

use flexprec_precision::{DataType, FloatFlex};

use crate::error::{QuantError, Result};

/// Serialized header length: dtype tag (1) + delta bits (4) + count (4)
pub const BLOCK_HEADER_LEN: usize = 9;

/// A reference value plus `count` quantized bytes.
///
/// The byte buffer is owned exclusively by the block and released when the
/// block is dropped or passed to [`QuantizedBlock::destroy`]. The buffer
/// length always equals [`QuantizedBlock::count`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedBlock {
    delta: FloatFlex,
    values: Vec<u8>,
}

impl QuantizedBlock {
    /// Allocate a zero-filled block of `count` values.
    ///
    /// Allocation failure is reported as [`QuantError::Allocation`]; no block
    /// is produced and nothing stays allocated.
    pub fn create(delta: FloatFlex, count: usize) -> Result<Self> {
        let mut values = Vec::new();
        if let Err(source) = values.try_reserve_exact(count) {
            tracing::warn!(count, dtype = %delta.dtype(), "Quantized block allocation failed");
            return Err(QuantError::Allocation { count, source });
        }
        values.resize(count, 0);

        tracing::debug!(count, dtype = %delta.dtype(), "Quantized block allocated");

        Ok(Self { delta, values })
    }

    /// Encode `value` as the delta in `dtype` and allocate `count` values
    pub fn encode(value: f32, dtype: DataType, count: usize) -> Result<Self> {
        Self::create(FloatFlex::encode(value, dtype), count)
    }

    /// Build a block from an existing buffer, which must hold `count` bytes
    pub fn from_parts(delta: FloatFlex, values: Vec<u8>, count: usize) -> Result<Self> {
        if values.len() != count {
            return Err(QuantError::CountMismatch {
                expected: count,
                got: values.len(),
            });
        }
        Ok(Self { delta, values })
    }

    /// Release the block and its buffer
    pub fn destroy(self) {
        tracing::trace!(count = self.count(), "Quantized block released");
        drop(self);
    }

    pub fn delta(&self) -> FloatFlex {
        self.delta
    }

    /// The delta decoded to float32
    pub fn delta_value(&self) -> f32 {
        self.delta.decode()
    }

    pub fn dtype(&self) -> DataType {
        self.delta.dtype()
    }

    pub fn count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Mutable access to the quantized values. The length is fixed.
    pub fn values_mut(&mut self) -> &mut [u8] {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<u8> {
        self.values
    }

    /// Encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        BLOCK_HEADER_LEN + self.values.len()
    }

    /// Encode the block to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Write the block to a writer (little-endian header, then the values)
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let count = u32::try_from(self.values.len())
            .map_err(|_| QuantError::CountTooLarge(self.values.len()))?;

        writer.write_u8(self.delta.dtype().to_u8())?;
        writer.write_u32::<LittleEndian>(self.delta.bits())?;
        writer.write_u32::<LittleEndian>(count)?;
        writer.write_all(&self.values)?;
        Ok(())
    }

    /// Decode a block from bytes. The buffer must hold exactly one block.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < BLOCK_HEADER_LEN {
            return Err(QuantError::BufferTooShort {
                need: BLOCK_HEADER_LEN,
                have: data.len(),
            });
        }

        let mut cursor = Cursor::new(data);

        let tag = cursor.read_u8()?;
        let dtype = DataType::from_u8(tag).ok_or(QuantError::UnknownDataType(tag))?;
        let delta = FloatFlex::from_raw(cursor.read_u32::<LittleEndian>()?, dtype)?;
        let count = cursor.read_u32::<LittleEndian>()? as usize;

        let payload = &data[BLOCK_HEADER_LEN..];
        if payload.len() < count {
            return Err(QuantError::BufferTooShort {
                need: BLOCK_HEADER_LEN + count,
                have: data.len(),
            });
        }
        if payload.len() > count {
            return Err(QuantError::CountMismatch {
                expected: count,
                got: payload.len(),
            });
        }

        let mut block = Self::create(delta, count)?;
        block.values.copy_from_slice(payload);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create() {
        let block = QuantizedBlock::encode(0.5, DataType::F16, 32).unwrap();
        assert_eq!(block.count(), 32);
        assert_eq!(block.values().len(), 32);
        assert!(block.values().iter().all(|&v| v == 0));
        assert_eq!(block.dtype(), DataType::F16);
        assert_eq!(block.delta().bits(), 0x3800);
        assert_eq!(block.delta_value(), 0.5);
    }

    #[test]
    fn test_create_empty() {
        let block = QuantizedBlock::encode(1.0, DataType::F8, 0).unwrap();
        assert!(block.is_empty());
        assert_eq!(block.count(), 0);
    }

    #[test]
    fn test_allocation_failure() {
        let delta = FloatFlex::encode(1.0, DataType::BF16);
        let result = QuantizedBlock::create(delta, usize::MAX);
        assert!(matches!(
            result,
            Err(QuantError::Allocation { count: usize::MAX, .. })
        ));
    }

    #[test]
    fn test_from_parts() {
        let delta = FloatFlex::encode(2.0, DataType::F32);
        let block = QuantizedBlock::from_parts(delta, vec![1, 2, 3], 3).unwrap();
        assert_eq!(block.values(), &[1, 2, 3]);

        assert!(matches!(
            QuantizedBlock::from_parts(delta, vec![1, 2, 3], 4),
            Err(QuantError::CountMismatch { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn test_values_mut() {
        let mut block = QuantizedBlock::encode(1.0, DataType::F32, 4).unwrap();
        block.values_mut().copy_from_slice(&[9, 8, 7, 6]);
        assert_eq!(block.count(), 4);
        assert_eq!(block.into_values(), vec![9, 8, 7, 6]);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let delta = FloatFlex::encode(-3.0, DataType::F16);
        let block = QuantizedBlock::from_parts(delta, vec![0, 127, 255], 3).unwrap();

        let bytes = block.to_bytes().unwrap();
        assert_eq!(bytes.len(), block.encoded_len());
        assert_eq!(&bytes[..BLOCK_HEADER_LEN], &[1, 0x00, 0xC2, 0, 0, 3, 0, 0, 0]);

        let decoded = QuantizedBlock::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(decoded.delta_value(), -3.0);
    }

    #[test]
    fn test_from_bytes_short_header() {
        assert!(matches!(
            QuantizedBlock::from_bytes(&[0, 0, 0]),
            Err(QuantError::BufferTooShort { need: 9, have: 3 })
        ));
    }

    #[test]
    fn test_from_bytes_short_payload() {
        let bytes = [3, 0x30, 0, 0, 0, 4, 0, 0, 0, 1, 2];
        assert!(matches!(
            QuantizedBlock::from_bytes(&bytes),
            Err(QuantError::BufferTooShort { need: 13, have: 11 })
        ));
    }

    #[test]
    fn test_from_bytes_trailing_data() {
        let bytes = [3, 0x30, 0, 0, 0, 1, 0, 0, 0, 1, 2];
        assert!(matches!(
            QuantizedBlock::from_bytes(&bytes),
            Err(QuantError::CountMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn test_from_bytes_bad_tag() {
        let bytes = [9, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            QuantizedBlock::from_bytes(&bytes),
            Err(QuantError::UnknownDataType(9))
        ));
    }

    #[test]
    fn test_from_bytes_delta_too_wide() {
        // 0x0100 does not fit an 8-bit float
        let bytes = [3, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            QuantizedBlock::from_bytes(&bytes),
            Err(QuantError::Precision(_))
        ));
    }
}
