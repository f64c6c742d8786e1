//! The saved state of a universal role counter.
//!
//! The binary layout is big-endian and sequential:
//! ```text
//! i32   genome count
//! i32   role count
//! role count times:
//!   utf   role ID
//!   utf   role name
//!   i32   good count
//!   i32   bad count
//! ```
//! where `utf` is a 2-byte length followed by that many bytes of modified
//! UTF-8, the encoding of Java's `DataOutput::writeUTF`, so files written by
//! older tools can still be read.
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use seed_utils::Role;
use std::io::{Read, Write};

/// A role together with its counts.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCounts {
    pub role: Role,
    pub good: u32,
    pub bad: u32,
}

/// Everything needed to rebuild a counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub genome_count: u32,
    pub roles: Vec<RoleCounts>,
}

impl Snapshot {
    pub fn write_to<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        wtr.write_i32::<BigEndian>(to_i32(self.genome_count as usize, "genome count")?)?;
        wtr.write_i32::<BigEndian>(to_i32(self.roles.len(), "role count")?)?;
        for record in self.roles.iter() {
            write_utf(wtr, record.role.id())?;
            write_utf(wtr, record.role.name())?;
            wtr.write_i32::<BigEndian>(to_i32(record.good as usize, "good count")?)?;
            wtr.write_i32::<BigEndian>(to_i32(record.bad as usize, "bad count")?)?;
        }
        Ok(())
    }
    /// Read a snapshot. A truncated stream is an `UnexpectedEof` error,
    /// negative counts and malformed strings are `InvalidData`.
    pub fn read_from<R: Read>(rdr: &mut R) -> std::io::Result<Self> {
        let genome_count = read_count(rdr, "genome count")?;
        let role_count = read_count(rdr, "role count")?;
        // The role count is not trusted for preallocation.
        let mut roles = Vec::with_capacity((role_count as usize).min(4096));
        for _ in 0..role_count {
            let id = read_utf(rdr)?;
            let name = read_utf(rdr)?;
            let good = read_count(rdr, "good count")?;
            let bad = read_count(rdr, "bad count")?;
            roles.push(RoleCounts {
                role: Role::new(&id, &name),
                good,
                bad,
            });
        }
        Ok(Self {
            genome_count,
            roles,
        })
    }
}

fn to_i32(value: usize, what: &str) -> std::io::Result<i32> {
    if value <= i32::MAX as usize {
        Ok(value as i32)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} {} does not fit in a snapshot", what, value),
        ))
    }
}

fn read_count<R: Read>(rdr: &mut R, what: &str) -> std::io::Result<u32> {
    let value = rdr.read_i32::<BigEndian>()?;
    if value < 0 {
        Err(invalid_data(format!("negative {} {} in snapshot", what, value)))
    } else {
        Ok(value as u32)
    }
}

fn invalid_data(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, message)
}

fn write_utf<W: Write>(wtr: &mut W, text: &str) -> std::io::Result<()> {
    let bytes = encode_modified_utf8(text);
    if bytes.len() > u16::MAX as usize {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("string of {} bytes is too long for a snapshot", bytes.len()),
        ));
    }
    wtr.write_u16::<BigEndian>(bytes.len() as u16)?;
    wtr.write_all(&bytes)
}

fn read_utf<R: Read>(rdr: &mut R) -> std::io::Result<String> {
    let len = rdr.read_u16::<BigEndian>()? as usize;
    let mut bytes = vec![0; len];
    rdr.read_exact(&mut bytes)?;
    decode_modified_utf8(&bytes)
}

/// Modified UTF-8: UTF-16 code units, each written as one to three bytes,
/// with NUL written as two bytes so the output never contains a zero byte.
pub fn encode_modified_utf8(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007F => bytes.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                bytes.push(0xC0 | (unit >> 6) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                bytes.push(0xE0 | (unit >> 12) as u8);
                bytes.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                bytes.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    bytes
}

pub fn decode_modified_utf8(bytes: &[u8]) -> std::io::Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        let head = u16::from(bytes[idx]);
        match head >> 4 {
            0..=7 => {
                units.push(head);
                idx += 1;
            }
            12 | 13 => {
                let second = continuation(bytes, idx + 1)?;
                units.push(((head & 0x1F) << 6) | second);
                idx += 2;
            }
            14 => {
                let second = continuation(bytes, idx + 1)?;
                let third = continuation(bytes, idx + 2)?;
                units.push(((head & 0x0F) << 12) | (second << 6) | third);
                idx += 3;
            }
            _ => {
                return Err(invalid_data(format!(
                    "malformed string in snapshot: byte {:#04x} at {}",
                    head, idx
                )))
            }
        }
    }
    String::from_utf16(&units)
        .map_err(|_| invalid_data("unpaired surrogate in snapshot string".to_string()))
}

fn continuation(bytes: &[u8], idx: usize) -> std::io::Result<u16> {
    match bytes.get(idx) {
        Some(&byte) if byte & 0xC0 == 0x80 => Ok(u16::from(byte & 0x3F)),
        _ => Err(invalid_data(format!(
            "malformed string in snapshot: bad continuation at {}",
            idx
        ))),
    }
}
