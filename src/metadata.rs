//! On-disk `FileMetadata` record.
//!
//! The reference C++ implementation stores this field as a raw
//! `fs::file_status`/`fs::file_time_type` pair, which is not a portable wire
//! format. This crate pins the fixed, portable layout spec.md §6
//! recommends: `permissions: u32` (POSIX mode bits), `size: u64`,
//! `modified_ns: i64` (nanoseconds since the Unix epoch, signed so a
//! pre-1970 timestamp is still representable), `name_size: u64` — written
//! in that order, all little-endian, matching the archive's pinned byte
//! order.

use std::io::{Read, Write};

use crate::Error;

/// Size in bytes of the fixed portion of a file record (name excluded).
pub const WIRE_SIZE: usize = 4 + 8 + 8 + 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMetadata {
    pub permissions: u32,
    pub modified_ns: i64,
    pub size: u64,
    pub name_size: u64,
}

impl FileMetadata {
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        out.write_all(&self.permissions.to_le_bytes())
            .map_err(Error::WriteError)?;
        out.write_all(&self.size.to_le_bytes())
            .map_err(Error::WriteError)?;
        out.write_all(&self.modified_ns.to_le_bytes())
            .map_err(Error::WriteError)?;
        out.write_all(&self.name_size.to_le_bytes())
            .map_err(Error::WriteError)
    }

    pub fn read_from<R: Read>(input: &mut R) -> Result<Self, Error> {
        let mut perm_buf = [0u8; 4];
        let mut size_buf = [0u8; 8];
        let mut mtime_buf = [0u8; 8];
        let mut name_size_buf = [0u8; 8];
        input.read_exact(&mut perm_buf).map_err(Error::ReadError)?;
        input.read_exact(&mut size_buf).map_err(Error::ReadError)?;
        input.read_exact(&mut mtime_buf).map_err(Error::ReadError)?;
        input
            .read_exact(&mut name_size_buf)
            .map_err(Error::ReadError)?;
        Ok(Self {
            permissions: u32::from_le_bytes(perm_buf),
            size: u64::from_le_bytes(size_buf),
            modified_ns: i64::from_le_bytes(mtime_buf),
            name_size: u64::from_le_bytes(name_size_buf),
        })
    }
}
