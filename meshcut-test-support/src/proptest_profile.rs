//! Property-test run profile parsing for CI and local overrides.
//!
//! Suites share one environment-driven policy so CI can raise case counts
//! for nightly runs without touching test code.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROPTEST_CASES_ENV_KEY: &str = "MESHCUT_PROPTEST_CASES";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
}

impl ProptestRunProfile {
    /// Loads a profile from the environment, falling back to
    /// `default_cases` when the override is absent or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshcut_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32) -> Self {
        let cases = match env::var(PROPTEST_CASES_ENV_KEY) {
            Ok(raw) => parse_cases(&raw).unwrap_or_else(|reason| {
                tracing::warn!(
                    env = PROPTEST_CASES_ENV_KEY,
                    raw = %raw,
                    reason = %reason,
                    "invalid property-test profile override; using default",
                );
                default_cases
            }),
            Err(_) => default_cases,
        };
        Self { cases }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let original = env::var(PROPTEST_CASES_ENV_KEY).ok();
            match value {
                // SAFETY: tests serialize access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(PROPTEST_CASES_ENV_KEY, value) },
                // SAFETY: tests serialize access with ENV_LOCK.
                None => unsafe { env::remove_var(PROPTEST_CASES_ENV_KEY) },
            }
            Self { original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                // SAFETY: tests serialize access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(PROPTEST_CASES_ENV_KEY, value) },
                // SAFETY: tests serialize access with ENV_LOCK.
                None => unsafe { env::remove_var(PROPTEST_CASES_ENV_KEY) },
            }
        }
    }

    #[test]
    fn load_defaults_when_no_override_exists() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = EnvGuard::set(None);

        assert_eq!(ProptestRunProfile::load(64).cases(), 64);
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn load_accepts_valid_overrides(#[case] raw: &str, #[case] expected: u32) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = EnvGuard::set(Some(raw));

        assert_eq!(ProptestRunProfile::load(64).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("many")]
    fn load_ignores_invalid_overrides(#[case] raw: &str) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = EnvGuard::set(Some(raw));

        assert_eq!(ProptestRunProfile::load(64).cases(), 64);
    }
}
