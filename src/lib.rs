//! # Archronis
//!
//! A blockwise file archiver built on a from-scratch 12-bit LZW codec.
//!
//! * [`codec`] — fixed-width LZW encode/decode over a byte buffer.
//! * [`packer`] — dense 12-bit-code ↔ byte packing.
//! * [`crc32`] — reflected IEEE CRC-32 checksum.
//! * [`metadata`] — the on-disk `FileMetadata` record.
//! * [`block`] — [`block::BlockFramer`], the fixed-size checksummed block
//!   pipeline a compressed file is made of.
//! * [`fsmeta`] — translates between filesystem metadata and the portable
//!   wire record.
//! * [`archive`] — the container format: signature, file count, file
//!   records.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! archronis::archive::pack(&["notes.txt"], Path::new("notes.arc")).expect("pack failed");
//! archronis::archive::unpack(Path::new("notes.arc")).expect("unpack failed");
//! ```

pub mod archive;
pub mod block;
pub mod codec;
pub mod crc32;
pub mod fsmeta;
pub mod metadata;
pub mod packer;

use std::path::PathBuf;

/// Every way an archive or pack/unpack operation can fail. Each variant
/// maps to a distinct process exit code in [`Error::exit_code`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no command given")]
    NoCommand,
    #[error("file '{}' does not exist", .0.display())]
    NoFile(PathBuf),
    #[error("could not open '{}': {1}", .0.display())]
    OpenFailure(PathBuf, #[source] std::io::Error),
    #[error("could not create '{}': {1}", .0.display())]
    CreateFailure(PathBuf, #[source] std::io::Error),
    #[error("'{}' is not a regular file", .0.display())]
    NotRegular(PathBuf),
    #[error("could not allocate memory for this operation")]
    AllocationError,
    #[error("i/o error: {0}")]
    IoError(#[source] std::io::Error),
    #[error("read error: {0}")]
    ReadError(#[source] std::io::Error),
    #[error("write error: {0}")]
    WriteError(#[source] std::io::Error),
    #[error("archive data appears to be corrupted")]
    DecodeError,
    #[error("not signed as an archive")]
    NotArchive,
    #[error("checksum mismatch, archive appears to be corrupted")]
    ChecksumError,
}

impl Error {
    /// Distinct non-zero exit code per variant, matching the taxonomy the
    /// command-line front end reports to the operator.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::NoCommand => 1,
            Error::NoFile(_) => 2,
            Error::OpenFailure(..) => 3,
            Error::NotRegular(_) => 4,
            Error::AllocationError => 5,
            Error::IoError(_) => 6,
            Error::ReadError(_) => 7,
            Error::WriteError(_) => 8,
            Error::DecodeError => 9,
            Error::NotArchive => 10,
            Error::ChecksumError => 11,
            Error::CreateFailure(..) => 12,
        }
    }
}
