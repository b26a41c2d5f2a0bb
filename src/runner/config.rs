//! Engine configuration.

/// Configuration for an evaluation context.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum byte-buffer allocation in bytes. None means unlimited.
    pub max_buffer_bytes: Option<usize>,
}

impl EngineConfig {
    /// Create a configuration with no buffer limit.
    pub fn unlimited() -> Self {
        EngineConfig {
            max_buffer_bytes: None,
        }
    }

    /// Create a configuration with a buffer allocation limit.
    pub fn with_buffer_limit(max_buffer_bytes: usize) -> Self {
        EngineConfig {
            max_buffer_bytes: Some(max_buffer_bytes),
        }
    }

    /// Check whether an allocation of the given size is permitted.
    pub fn allows_buffer(&self, bytes: usize) -> bool {
        match self.max_buffer_bytes {
            Some(max) => bytes <= max,
            None => true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::unlimited()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_allows_everything() {
        let config = EngineConfig::unlimited();
        assert!(config.allows_buffer(0));
        assert!(config.allows_buffer(usize::MAX));
    }

    #[test]
    fn test_limit_is_inclusive() {
        let config = EngineConfig::with_buffer_limit(1000);
        assert!(config.allows_buffer(1000));
        assert!(!config.allows_buffer(1001));
    }
}
