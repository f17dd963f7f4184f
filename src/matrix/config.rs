//! Configuration for parallel multiplication

/// Number of worker threads used when none is configured
pub const DEFAULT_THREADS: usize = 8;

/// Configuration for [`spgemm_parallel`](crate::spgemm_parallel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplyConfig {
    /// Requested number of worker threads
    ///
    /// The pool actually started never exceeds the row count of the left operand.
    pub n_threads: usize,
}

impl Default for MultiplyConfig {
    fn default() -> Self {
        Self {
            n_threads: DEFAULT_THREADS,
        }
    }
}

impl MultiplyConfig {
    /// Create a config with an explicit worker count
    pub fn with_threads(n_threads: usize) -> Self {
        Self { n_threads }
    }

    /// Create a config using one worker per available core
    pub fn all_cores() -> Self {
        Self::with_threads(num_cpus::get())
    }

    /// Worker count for a left operand with `n_rows` rows
    pub fn effective_threads(&self, n_rows: usize) -> usize {
        self.n_threads.min(n_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threads() {
        assert_eq!(MultiplyConfig::default().n_threads, 8);
        assert!(MultiplyConfig::all_cores().n_threads >= 1);
    }

    #[test]
    fn test_effective_threads_capped_by_rows() {
        let config = MultiplyConfig::with_threads(5);
        assert_eq!(config.effective_threads(3), 3);
        assert_eq!(config.effective_threads(100), 5);
        assert_eq!(config.effective_threads(0), 0);
    }
}
