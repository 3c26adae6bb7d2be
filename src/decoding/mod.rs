//! Input side of the packed bitstream.
pub mod bit_reader;
