//! Data type tags

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::descriptor::{PrecisionDescriptor, BFLOAT16, FLOAT32, FLOAT8, HALF16};
use crate::error::PrecisionError;

/// Supported floating-point encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DataType {
    /// IEEE-754 32-bit precision
    F32 = 0,
    /// IEEE-754 16-bit precision
    F16 = 1,
    /// Google Brain bfloat16 precision
    BF16 = 2,
    /// Extended 8-bit precision
    F8 = 3,
}

impl DataType {
    pub const ALL: [DataType; 4] = [DataType::F32, DataType::F16, DataType::BF16, DataType::F8];

    pub fn descriptor(self) -> PrecisionDescriptor {
        match self {
            DataType::F32 => FLOAT32,
            DataType::F16 => HALF16,
            DataType::BF16 => BFLOAT16,
            DataType::F8 => FLOAT8,
        }
    }

    /// Encoded width in bits
    pub fn bit_width(self) -> u32 {
        self.descriptor().total_width()
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DataType::F32),
            1 => Some(DataType::F16),
            2 => Some(DataType::BF16),
            3 => Some(DataType::F8),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::F32 => "f32",
            DataType::F16 => "f16",
            DataType::BF16 => "bf16",
            DataType::F8 => "f8",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f32" | "float32" => Ok(DataType::F32),
            "f16" | "float16" | "half" => Ok(DataType::F16),
            "bf16" | "bfloat16" => Ok(DataType::BF16),
            "f8" | "float8" => Ok(DataType::F8),
            _ => Err(PrecisionError::UnknownDataType(s.to_string())),
        }
    }
}
