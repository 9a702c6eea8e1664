//! PNG container writer (and a validating chunk reader for inspection)

pub mod chunk;
pub mod encoder;

pub use chunk::{make_chunk, read_chunks, Chunk, ChunkType, SIGNATURE};
pub use encoder::{
    encode_artifact, header_payload, Compressor, EncoderConfig, Header, PngEncoder, ZlibCompressor,
};
