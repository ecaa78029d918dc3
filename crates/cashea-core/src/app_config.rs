use std::path::PathBuf;

/// Display-smoothing settings for the payments bank tally.
#[derive(Debug, Clone, PartialEq)]
pub struct BankSmoothingConfig {
    pub enabled: bool,
    /// Chance, in `[0, 1]`, that a tally of the dominant bank is redirected.
    pub probability: f64,
    /// Seed for the smoothing RNG. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BankSmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: 0.6,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub merchants_dir: PathBuf,
    pub stores_dir: PathBuf,
    pub clients_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
    pub bank_smoothing: BankSmoothingConfig,
}

impl AppConfig {
    /// Build a config rooted at `data_dir` using the conventional layout.
    #[must_use]
    pub fn rooted_at(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            merchants_dir: data_dir.join("SAMPLE_MERCHANTS"),
            stores_dir: data_dir.join("SAMPLE_STORE"),
            clients_dir: data_dir.join("SAMPLE_CLIENT"),
            output_dir: data_dir.clone(),
            data_dir,
            log_level: "info".to_string(),
            bank_smoothing: BankSmoothingConfig::default(),
        }
    }

    /// Re-root every directory that was derived from the old data dir.
    ///
    /// Directories that were set explicitly (i.e. not under the previous
    /// data dir) are left alone.
    pub fn set_data_dir(&mut self, data_dir: impl Into<PathBuf>) {
        let data_dir = data_dir.into();
        let rebase = |dir: &mut PathBuf, old: &PathBuf| {
            if let Ok(rest) = dir.strip_prefix(old) {
                *dir = data_dir.join(rest);
            }
        };
        let old = self.data_dir.clone();
        rebase(&mut self.merchants_dir, &old);
        rebase(&mut self.stores_dir, &old);
        rebase(&mut self.clients_dir, &old);
        rebase(&mut self.output_dir, &old);
        self.data_dir = data_dir;
    }
}
