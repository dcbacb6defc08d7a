use crate::utils::error::Result;

/// Byte-level access to named files. Paths are interpreted by the implementation.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
