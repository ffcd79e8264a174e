use once_cell::sync::Lazy;

/// Process wide settings, read from the environment once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Candidate names that are skipped at registration.
    pub disabled: Vec<String>,
    /// Log the full ranking on every dispatch.
    pub log_ranking: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Config { log_ranking: std::env::var("ICLBLAS_LOG_RANKING").is_ok(), ..Config::default() };
        apply_debug_impls(&mut config);
        config
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d == name)
    }
}

#[cfg_attr(not(feature = "debug_impls"), allow(dead_code))]
pub(crate) fn parse_name_list(s: &str) -> Vec<String> {
    s.split(',').map(str::trim).filter(|x| !x.is_empty()).map(String::from).collect()
}

#[cfg(feature = "debug_impls")]
fn apply_debug_impls(config: &mut Config) {
    if let Ok(list) = std::env::var("ICLBLAS_DISABLE") {
        config.disabled = parse_name_list(&list);
    }
}

#[cfg(not(feature = "debug_impls"))]
fn apply_debug_impls(_config: &mut Config) {}

pub static RUNTIME_CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
