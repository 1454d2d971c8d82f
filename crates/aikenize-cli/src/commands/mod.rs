//! One-shot subcommands.

pub mod export;
pub mod history;
pub mod templates;
pub mod translate;

use anyhow::{Result, bail};

/// Converts a 1-based position from the command line into an index.
pub fn position_to_index(position: usize, len: usize) -> Result<usize> {
    if position == 0 || position > len {
        bail!("No history entry {} (there are {})", position, len);
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_index() {
        assert_eq!(position_to_index(1, 3).unwrap(), 0);
        assert_eq!(position_to_index(3, 3).unwrap(), 2);
        assert!(position_to_index(0, 3).is_err());
        assert!(position_to_index(4, 3).is_err());
        assert!(position_to_index(1, 0).is_err());
    }
}
