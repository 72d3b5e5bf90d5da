//! Block-level framing: wraps [`crate::codec`], [`crate::packer`], and
//! [`crate::crc32`] into the fixed-size, checksummed block pipeline a
//! compressed file is made of.
//!
//! [`BlockFramer`] owns its scratch buffers (raw block, code sequence,
//! packed bytes, decoded block) for the lifetime of one file operation and
//! reuses them across blocks, mirroring the buffer-owning `compressor`
//! class in `examples/original_source/compressor.hpp`. Buffers grow via
//! `try_reserve` rather than plain `resize`/`reserve`, so a pathological
//! allocation request surfaces as [`Error::AllocationError`] instead of
//! aborting the process.

use std::io::{Read, Write};

use crate::crc32::crc32;
use crate::{codec, packer, Error};

/// Fixed block size: 4096 * 4 bytes.
pub const BLOCK_SIZE: usize = 16384;

#[derive(Default)]
pub struct BlockFramer {
    raw: Vec<u8>,
    codes: Vec<u16>,
    packed: Vec<u8>,
    decoded: Vec<u8>,
}

impl BlockFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compress `input`, whose total length is `file_size`, writing the
    /// `block_count` header followed by one block record per block.
    pub fn compress_file<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        file_size: u64,
    ) -> Result<(), Error> {
        let whole = file_size / BLOCK_SIZE as u64;
        let rem = file_size % BLOCK_SIZE as u64;
        let total_blocks = whole + if rem > 0 { 1 } else { 0 };
        write_u64_le(output, total_blocks)?;
        for _ in 0..whole {
            self.compress_block(input, output, BLOCK_SIZE)?;
        }
        if rem > 0 {
            self.compress_block(input, output, rem as usize)?;
        }
        Ok(())
    }

    /// Read `block_count` blocks from `input` and write their decoded
    /// bytes to `output`.
    pub fn decompress_file<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), Error> {
        let block_count = read_u64_le(input)?;
        for _ in 0..block_count {
            self.decompress_block(input, output)?;
        }
        Ok(())
    }

    fn compress_block<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
        n: usize,
    ) -> Result<(), Error> {
        ensure_capacity(&mut self.raw, n)?;
        self.raw.resize(n, 0);
        input.read_exact(&mut self.raw).map_err(Error::ReadError)?;

        codec::encode(&self.raw, &mut self.codes);
        packer::pack(&self.codes, &mut self.packed);
        let checksum = crc32(&self.packed);

        write_u64_le(output, self.codes.len() as u64)?;
        write_u64_le(output, self.packed.len() as u64)?;
        output.write_all(&self.packed).map_err(Error::WriteError)?;
        write_u32_le(output, checksum)?;
        Ok(())
    }

    fn decompress_block<R: Read, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<(), Error> {
        let code_count = read_u64_le(input)?;
        let packed_size = read_u64_le(input)? as usize;

        ensure_capacity(&mut self.packed, packed_size)?;
        self.packed.resize(packed_size, 0);
        input
            .read_exact(&mut self.packed)
            .map_err(Error::ReadError)?;
        let stored_checksum = read_u32_le(input)?;

        let computed = crc32(&self.packed);
        if computed != stored_checksum {
            log::error!(
                "checksum mismatch: stored {stored_checksum:#010x}, computed {computed:#010x}"
            );
            return Err(Error::ChecksumError);
        }

        packer::unpack(code_count, &self.packed, &mut self.codes);
        codec::decode(&self.codes, &mut self.decoded)?;
        output
            .write_all(&self.decoded)
            .map_err(Error::WriteError)?;
        Ok(())
    }
}

fn ensure_capacity(buf: &mut Vec<u8>, needed: usize) -> Result<(), Error> {
    if buf.capacity() < needed {
        buf.try_reserve(needed - buf.len())
            .map_err(|_| Error::AllocationError)?;
    }
    Ok(())
}

fn read_u64_le<R: Read>(input: &mut R) -> Result<u64, Error> {
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf).map_err(Error::ReadError)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_u32_le<R: Read>(input: &mut R) -> Result<u32, Error> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf).map_err(Error::ReadError)?;
    Ok(u32::from_le_bytes(buf))
}

fn write_u64_le<W: Write>(output: &mut W, value: u64) -> Result<(), Error> {
    output.write_all(&value.to_le_bytes()).map_err(Error::WriteError)
}

fn write_u32_le<W: Write>(output: &mut W, value: u32) -> Result<(), Error> {
    output.write_all(&value.to_le_bytes()).map_err(Error::WriteError)
}
