//! Argument packing for command frames.
//!
//! Multi-byte fields are little-endian unless a method says otherwise.

use bytes::{BufMut, Bytes, BytesMut};

/// Builds the argument bytes of a command.
#[derive(Debug, Clone, Default)]
pub struct ArgBuilder {
    buf: BytesMut,
}

impl ArgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, value: u8) -> Self {
        self.buf.put_u8(value);
        self
    }

    pub fn u16_le(mut self, value: u16) -> Self {
        self.buf.put_u16_le(value);
        self
    }

    pub fn u32_le(mut self, value: u32) -> Self {
        self.buf.put_u32_le(value);
        self
    }

    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.buf.put_slice(value);
        self
    }

    /// Append the ASCII bytes of `value`, no terminator.
    pub fn ascii(self, value: &str) -> Self {
        self.bytes(value.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn build(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Si5351 PLL selector values.
pub const PLL_A: u8 = 0x00;
pub const PLL_B: u8 = 0x01;

/// Si5351 output R-divider codes (divide by 2^code).
pub const R_DIV_1: u8 = 0;
pub const R_DIV_16: u8 = 4;

/// One PLL: feedback multiplier `mult + num / denom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllConfig {
    pub mult: u8,
    pub num: u32,
    pub denom: u32,
}

impl Default for PllConfig {
    fn default() -> Self {
        Self {
            mult: 24,
            num: 0,
            denom: 1,
        }
    }
}

/// One clock output: PLL source, multisynth divider and R divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockOutput {
    pub source: u8,
    pub div: u16,
    pub num: u32,
    pub denom: u32,
    pub rdiv: u8,
}

impl Default for ClockOutput {
    fn default() -> Self {
        Self {
            source: PLL_A,
            div: 1326,
            num: 0,
            denom: 1,
            rdiv: R_DIV_16,
        }
    }
}

/// Reference clock synthesizer setup sent with `SET_REF_CLOCK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockConfig {
    pub pll_a: PllConfig,
    pub pll_b: PllConfig,
    pub outputs: [ClockOutput; 3],
}

impl ClockConfig {
    /// Encoded size: two 9-byte PLL blocks and three 12-byte output blocks.
    pub const ENCODED_LEN: usize = 54;

    pub fn encode(&self) -> Bytes {
        let mut args = ArgBuilder::new();
        for pll in [&self.pll_a, &self.pll_b] {
            args = args.u8(pll.mult).u32_le(pll.num).u32_le(pll.denom);
        }
        for out in &self.outputs {
            args = args
                .u8(out.source)
                .u16_le(out.div)
                .u32_le(out.num)
                .u32_le(out.denom)
                .u8(out.rdiv);
        }
        args.build()
    }
}
