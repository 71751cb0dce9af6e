//! Flexprec Quant
//!
//! Container for a block of quantized bytes sharing one reference value
//! (`delta`) stored in any of the flexprec precision encodings.

mod block;
mod error;

pub use block::{QuantizedBlock, BLOCK_HEADER_LEN};
pub use error::{QuantError, Result};
