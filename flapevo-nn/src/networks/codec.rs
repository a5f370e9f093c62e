//! Binary persistence format for trained networks.
//!
//! All integers and floats are little-endian:
//!
//! | Field              | Size                      |
//! |--------------------|---------------------------|
//! | Magic (`FEVO`)     | 4 bytes                   |
//! | Version            | `u16`                     |
//! | Activation id      | `u8`                      |
//! | Layer count `n`    | `u32`                     |
//! | Layer sizes        | `n × u32`                 |
//! | Parameters         | `f64` per weight and bias |
//!
//! Parameters are stored transition by transition: the
//! row-major weight matrix first, then the bias vector.
use super::{
    check_topology, parameter_count, ActivationType, FormatError, NetworkError, NeuralNetwork,
};

use std::fs;
use std::path::Path;

/// Magic bytes identifying a persisted network.
pub const MAGIC: &[u8; 4] = b"FEVO";

/// Current format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the fixed part of the header, in bytes.
/// Magic(4) + Version(2) + Activation(1) + LayerCount(4)
const HEADER_SIZE: usize = 11;

impl NeuralNetwork {
    /// Encodes the network in the binary persistence format.
    ///
    /// # Examples
    /// ```
    /// use flapevo::SimpleRng;
    /// use flapevo_nn::{NetworkConfig, NeuralNetwork};
    ///
    /// let mut rng = SimpleRng::seeded(1);
    /// let network = NeuralNetwork::random(&NetworkConfig::default(), &mut rng).unwrap();
    /// let bytes = network.serialize();
    /// assert_eq!(&bytes[..4], b"FEVO");
    /// assert_eq!(NeuralNetwork::deserialize(&bytes).unwrap(), network);
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        // Checked on construction.
        let parameters = parameter_count(self.layer_sizes()).unwrap_or(0);
        let mut bytes =
            Vec::with_capacity(HEADER_SIZE + 4 * self.layer_sizes().len() + 8 * parameters);
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.push(self.activation().id());
        // Sizes are checked to fit in a u32 on construction.
        bytes.extend_from_slice(&(self.layer_sizes().len() as u32).to_le_bytes());
        for &size in self.layer_sizes() {
            bytes.extend_from_slice(&(size as u32).to_le_bytes());
        }
        for parameter in self.parameters() {
            bytes.extend_from_slice(&parameter.to_le_bytes());
        }
        bytes
    }

    /// Decodes a network from the binary persistence format.
    /// Nothing is allocated for the parameters until the
    /// input is known to hold all of them.
    ///
    /// # Errors
    /// Returns [`NetworkError::Format`] if the data has bad
    /// magic bytes, an unsupported version, an unknown
    /// activation, an invalid topology, or is truncated or
    /// followed by trailing bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<NeuralNetwork, NetworkError> {
        let mut reader = Reader { bytes };

        let magic: [u8; 4] = reader.array()?;
        if &magic != MAGIC {
            return Err(FormatError::BadMagic(magic).into());
        }
        let version = u16::from_le_bytes(reader.array()?);
        if version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(version).into());
        }
        let [id] = reader.array::<1>()?;
        let activation = ActivationType::from_id(id).ok_or(FormatError::UnknownActivation(id))?;

        let layer_count = u32::from_le_bytes(reader.array()?) as usize;
        reader.ensure(layer_count.saturating_mul(4))?;
        let mut layer_sizes = Vec::with_capacity(layer_count);
        for _ in 0..layer_count {
            layer_sizes.push(u32::from_le_bytes(reader.array()?) as usize);
        }
        if check_topology(&layer_sizes).is_err() {
            return Err(FormatError::InvalidTopology(layer_sizes).into());
        }

        let parameter_bytes = parameter_count(&layer_sizes)
            .and_then(|count| count.checked_mul(8))
            .ok_or_else(|| FormatError::InvalidTopology(layer_sizes.clone()))?;
        let parameters = reader.take(parameter_bytes)?;
        if !reader.bytes.is_empty() {
            return Err(FormatError::TrailingData(reader.bytes.len()).into());
        }

        Ok(NeuralNetwork::from_parameters(
            layer_sizes,
            activation,
            parameters.chunks_exact(8).map(|chunk| {
                let mut buf = [0; 8];
                buf.copy_from_slice(chunk);
                f64::from_le_bytes(buf)
            }),
        ))
    }

    /// Writes the encoded network to a file, replacing
    /// any previous contents.
    ///
    /// # Errors
    /// Returns [`NetworkError::Io`] if the file can't be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), NetworkError> {
        let path = path.as_ref();
        fs::write(path, self.serialize())?;
        log::debug!("wrote {:?} network to {}", self.layer_sizes(), path.display());
        Ok(())
    }

    /// Reads an encoded network from a file.
    ///
    /// # Errors
    /// Returns [`NetworkError::Io`] if the file can't be read,
    /// or [`NetworkError::Format`] if its contents are malformed.
    pub fn read_from(path: impl AsRef<Path>) -> Result<NeuralNetwork, NetworkError> {
        let path = path.as_ref();
        let network = NeuralNetwork::deserialize(&fs::read(path)?)?;
        log::debug!("read {:?} network from {}", network.layer_sizes(), path.display());
        Ok(network)
    }
}

/// A cursor over the remaining input.
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn ensure(&self, needed: usize) -> Result<(), FormatError> {
        if needed > self.bytes.len() {
            return Err(FormatError::Truncated {
                needed,
                available: self.bytes.len(),
            });
        }
        Ok(())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], FormatError> {
        self.ensure(count)?;
        let (taken, rest) = self.bytes.split_at(count);
        self.bytes = rest;
        Ok(taken)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut array = [0; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }
}
