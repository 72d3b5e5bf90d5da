//! Archive container: signature, file count, and one framed record per
//! input file. Ties [`crate::block::BlockFramer`], [`crate::metadata`], and
//! [`crate::fsmeta`] together into the `pack`/`unpack` operations the CLI
//! calls directly.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::block::BlockFramer;
use crate::metadata::FileMetadata;
use crate::Error;

/// 8-byte magic identifying this container format. The trailing NUL pads
/// the 7-character name out to a full signature width.
pub const SIGNATURE: [u8; 8] = *b"archr04\0";

/// Compress `inputs` into a new archive at `archive_path`.
pub fn pack<P: AsRef<Path>>(inputs: &[P], archive_path: &Path) -> Result<(), Error> {
    let input_paths: Vec<&Path> = inputs.iter().map(AsRef::as_ref).collect();

    let mut records = Vec::with_capacity(input_paths.len());
    for path in &input_paths {
        let name = path_name_bytes(path);
        records.push(crate::fsmeta::gather(path, name.len() as u64)?);
    }

    let out = File::create(archive_path)
        .map_err(|e| Error::CreateFailure(archive_path.to_path_buf(), e))?;
    let mut out = BufWriter::new(out);

    out.write_all(&SIGNATURE).map_err(Error::WriteError)?;
    out.write_all(&(input_paths.len() as i32).to_le_bytes())
        .map_err(Error::WriteError)?;

    let mut framer = BlockFramer::new();
    for (path, meta) in input_paths.iter().zip(records.iter()) {
        log::info!("packing '{}'", path.display());
        let input =
            File::open(path).map_err(|e| Error::OpenFailure(path.to_path_buf(), e))?;
        let mut input = BufReader::new(input);

        meta.write_to(&mut out)?;
        out.write_all(&path_name_bytes(path))
            .map_err(Error::WriteError)?;
        framer.compress_file(&mut input, &mut out, meta.size)?;
    }
    out.flush().map_err(Error::WriteError)?;
    Ok(())
}

/// Extract every file recorded in the archive at `archive_path` into the
/// current working directory.
pub fn unpack(archive_path: &Path) -> Result<(), Error> {
    if !archive_path.exists() {
        return Err(Error::NoFile(archive_path.to_path_buf()));
    }
    if !archive_path.is_file() {
        return Err(Error::NotRegular(archive_path.to_path_buf()));
    }
    let input = File::open(archive_path)
        .map_err(|e| Error::OpenFailure(archive_path.to_path_buf(), e))?;
    let mut input = BufReader::new(input);

    let mut signature = [0u8; 8];
    input.read_exact(&mut signature).map_err(Error::ReadError)?;
    if signature != SIGNATURE {
        log::error!("'{}' is not a recognized archive", archive_path.display());
        return Err(Error::NotArchive);
    }

    let mut count_buf = [0u8; 4];
    input.read_exact(&mut count_buf).map_err(Error::ReadError)?;
    let file_count = i32::from_le_bytes(count_buf);

    let mut framer = BlockFramer::new();
    for _ in 0..file_count {
        let meta = FileMetadata::read_from(&mut input)?;
        let mut name_buf: Vec<u8> = Vec::new();
        name_buf
            .try_reserve(meta.name_size as usize)
            .map_err(|_| Error::AllocationError)?;
        name_buf.resize(meta.name_size as usize, 0);
        input.read_exact(&mut name_buf).map_err(Error::ReadError)?;
        let name = String::from_utf8_lossy(&name_buf).into_owned();
        let out_path = PathBuf::from(&name);

        log::info!("unpacking '{name}'");
        let out = File::create(&out_path)
            .map_err(|e| Error::CreateFailure(out_path.clone(), e))?;
        let mut out = BufWriter::new(out);
        framer.decompress_file(&mut input, &mut out)?;
        out.flush().map_err(Error::WriteError)?;

        crate::fsmeta::restore(&out_path, &meta);
    }
    Ok(())
}

fn path_name_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trip_multiple_files() {
        // Archive names are recorded exactly as passed on the command line,
        // so this test runs entirely inside one working directory with
        // relative names, the way the CLI does it.
        let work_dir = TempDir::new().unwrap();
        let cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(work_dir.path()).unwrap();

        let result = (|| {
            std::fs::write("empty.txt", b"").map_err(Error::IoError)?;
            std::fs::write("one_byte.txt", b"x").map_err(Error::IoError)?;
            std::fs::write("larger.txt", b"archival content block ".repeat(500))
                .map_err(Error::IoError)?;

            pack(&["empty.txt", "one_byte.txt", "larger.txt"], Path::new("bundle.arc"))?;

            std::fs::remove_file("empty.txt").map_err(Error::IoError)?;
            std::fs::remove_file("one_byte.txt").map_err(Error::IoError)?;
            std::fs::remove_file("larger.txt").map_err(Error::IoError)?;

            unpack(Path::new("bundle.arc"))?;
            Ok::<(), Error>(())
        })();

        let readback = result.and_then(|_| {
            assert_eq!(std::fs::read("empty.txt").unwrap(), b"");
            assert_eq!(std::fs::read("one_byte.txt").unwrap(), b"x");
            assert_eq!(
                std::fs::read("larger.txt").unwrap(),
                b"archival content block ".repeat(500)
            );
            Ok(())
        });

        std::env::set_current_dir(cwd).unwrap();
        readback.unwrap();
    }

    #[test]
    fn unpack_rejects_bad_signature() {
        let work_dir = TempDir::new().unwrap();
        let path = work_dir.path().join("fake.arc");
        std::fs::write(&path, [0u8; 16]).unwrap();
        assert!(matches!(unpack(&path), Err(Error::NotArchive)));
    }

    #[test]
    fn unpack_rejects_missing_archive() {
        let work_dir = TempDir::new().unwrap();
        let path = work_dir.path().join("missing.arc");
        assert!(matches!(unpack(&path), Err(Error::NoFile(_))));
    }
}
