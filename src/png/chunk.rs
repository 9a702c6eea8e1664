//! Chunk framing: `length | type | payload | crc(type ++ payload)`.

use std::fmt;

use crate::checksum::Crc32;
use crate::error::{Error, Result};

/// The fixed 8-byte file signature.
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// A four-letter chunk type tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Build a tag from raw bytes. Anything other than exactly four ASCII
    /// letters is rejected; tags are never truncated or padded.
    pub fn new(tag: &[u8]) -> Result<Self> {
        let bytes: [u8; 4] = tag
            .try_into()
            .map_err(|_| Error::InvalidChunkType(tag.to_vec()))?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(Error::InvalidChunkType(tag.to_vec()));
        }
        Ok(ChunkType(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Critical chunks have an uppercase first letter.
    pub fn is_critical(&self) -> bool {
        self.0[0].is_ascii_uppercase()
    }
}

impl fmt::Debug for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkType({})", self)
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ASCII letters are guaranteed by the constructor
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// A typed block of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub kind: ChunkType,
    pub data: Vec<u8>,
}

impl Chunk {
    pub fn new(kind: ChunkType, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// CRC over the type tag followed by the payload.
    pub fn crc(&self) -> u32 {
        Crc32::new()
            .update(self.kind.as_bytes())
            .update(&self.data)
            .finish()
    }

    /// Append the framed form of this chunk to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let len = u32::try_from(self.data.len())
            .map_err(|_| Error::PayloadTooLarge(self.data.len()))?;
        out.reserve(12 + self.data.len());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(self.kind.as_bytes());
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc().to_be_bytes());
        Ok(())
    }

    /// The framed form of this chunk.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(12 + self.data.len());
        self.write_to(&mut out)?;
        Ok(out)
    }
}

/// Frame `payload` under the 4-byte `tag`.
pub fn make_chunk(tag: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let kind = ChunkType::new(tag)?;
    Chunk::new(kind, payload.to_vec()).to_bytes()
}

/// Walk a complete artifact, verifying the signature and every chunk's
/// CRC. Stops at `IEND`, which must be the final chunk.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        return Err(Error::DecodeError("missing PNG signature".into()));
    }

    let mut chunks = Vec::new();
    let mut pos = SIGNATURE.len();
    loop {
        let header = bytes
            .get(pos..pos + 8)
            .ok_or_else(|| Error::DecodeError(format!("truncated chunk header at offset {}", pos)))?;
        let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let kind = ChunkType::new(&header[4..8])
            .map_err(|e| Error::DecodeError(format!("offset {}: {}", pos, e)))?;

        let data_start = pos + 8;
        let data_end = data_start
            .checked_add(len)
            .filter(|end| end + 4 <= bytes.len())
            .ok_or_else(|| Error::DecodeError(format!("truncated {} chunk at offset {}", kind, pos)))?;

        let chunk = Chunk::new(kind, bytes[data_start..data_end].to_vec());
        let stored = u32::from_be_bytes([
            bytes[data_end],
            bytes[data_end + 1],
            bytes[data_end + 2],
            bytes[data_end + 3],
        ]);
        let computed = chunk.crc();
        if stored != computed {
            return Err(Error::DecodeError(format!(
                "{} chunk CRC mismatch: stored {:08x}, computed {:08x}",
                kind, stored, computed
            )));
        }

        pos = data_end + 4;
        let is_end = chunk.kind == ChunkType::IEND;
        chunks.push(chunk);
        if is_end {
            break;
        }
    }

    if pos != bytes.len() {
        return Err(Error::DecodeError(format!("{} trailing bytes after IEND", bytes.len() - pos)));
    }
    check_order(&chunks)?;
    Ok(chunks)
}

/// `IHDR` first, at least one `IDAT`, `IEND` last (already guaranteed by the
/// reader loop).
fn check_order(chunks: &[Chunk]) -> Result<()> {
    if chunks.first().map(|c| c.kind) != Some(ChunkType::IHDR) {
        return Err(Error::DecodeError("first chunk is not IHDR".into()));
    }
    if chunks[1..].iter().any(|c| c.kind == ChunkType::IHDR) {
        return Err(Error::DecodeError("duplicate IHDR".into()));
    }
    if !chunks.iter().any(|c| c.kind == ChunkType::IDAT) {
        return Err(Error::DecodeError("no IDAT chunk".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::crc32;

    #[test]
    fn rejects_wrong_length_tags() {
        assert!(matches!(ChunkType::new(b"IHD"), Err(Error::InvalidChunkType(_))));
        assert!(matches!(ChunkType::new(b"IHDRX"), Err(Error::InvalidChunkType(_))));
        assert!(matches!(make_chunk(b"", &[]), Err(Error::InvalidChunkType(_))));
    }

    #[test]
    fn rejects_non_letter_tags() {
        assert!(ChunkType::new(b"IH1R").is_err());
        assert!(ChunkType::new(&[0x49, 0x48, 0x44, 0xFF]).is_err());
    }

    #[test]
    fn iend_framing_is_exact() {
        let bytes = make_chunk(b"IEND", &[]).unwrap();
        assert_eq!(
            bytes,
            vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn stored_crc_covers_type_and_payload() {
        let bytes = make_chunk(b"tEXt", b"hello").unwrap();
        assert_eq!(&bytes[..4], &5u32.to_be_bytes());
        let stored = u32::from_be_bytes(bytes[bytes.len() - 4..].try_into().unwrap());
        assert_eq!(stored, crc32(&bytes[4..bytes.len() - 4]));
    }

    #[test]
    fn critical_bit() {
        assert!(ChunkType::IHDR.is_critical());
        assert!(!ChunkType::new(b"tEXt").unwrap().is_critical());
    }

    fn file_of(tags: &[&str]) -> Vec<u8> {
        let mut file = SIGNATURE.to_vec();
        for tag in tags {
            file.extend(make_chunk(tag.as_bytes(), b"abc").unwrap());
        }
        file
    }

    #[test]
    fn read_chunks_detects_corruption() {
        let file = file_of(&["IHDR", "tEXt", "IDAT", "IEND"]);
        assert_eq!(read_chunks(&file).unwrap().len(), 4);

        let mut flipped = file.clone();
        flipped[SIGNATURE.len() + 8] ^= 0x01;
        assert!(matches!(read_chunks(&flipped), Err(Error::DecodeError(_))));

        let mut trailing = file.clone();
        trailing.push(0);
        assert!(read_chunks(&trailing).is_err());

        assert!(read_chunks(&file[..file.len() - 2]).is_err());
        assert!(read_chunks(b"GIF89a").is_err());
    }

    #[test]
    fn read_chunks_enforces_order() {
        let misordered: [&[&str]; 5] = [
            &["IEND"],
            &["IDAT", "IHDR", "IEND"],
            &["tEXt", "IHDR", "IDAT", "IEND"],
            &["IHDR", "IEND"],
            &["IHDR", "IDAT", "IHDR", "IEND"],
        ];
        for tags in misordered {
            let res = read_chunks(&file_of(tags));
            assert!(matches!(res, Err(Error::DecodeError(_))), "accepted {:?}", tags);
        }
        assert!(read_chunks(&file_of(&["IHDR", "IDAT", "IDAT", "IEND"])).is_ok());
    }
}
