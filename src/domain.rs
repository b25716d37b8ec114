//! Parameter domains: the finite sets of legal values for one synthesis
//! parameter axis (voice, model, language) of one provider, plus uniform
//! random selection over them.
//!
//! Selection takes the randomness source as an argument rather than reaching
//! for a global one, so callers can pass a seeded `StdRng` and get
//! reproducible picks.

use rand::Rng;

use crate::{Error, ErrorContext, Result};

/// An immutable, finite, enumerable set of legal values for one parameter axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDomain {
    name: &'static str,
    values: &'static [&'static str],
}

impl ParamDomain {
    pub const fn new(name: &'static str, values: &'static [&'static str]) -> Self {
        Self { name, values }
    }

    /// Axis name used in error messages, e.g. "openai voice".
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| *v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().copied()
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    /// Pick one member uniformly at random from the injected randomness source.
    ///
    /// Fails with [`Error::InvalidDomain`] on an empty domain.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&'static str> {
        if self.values.is_empty() {
            return Err(Error::invalid_domain(format!(
                "domain '{}' has no values to select from",
                self.name
            )));
        }
        let index = rng.random_range(0..self.values.len());
        Ok(self.values[index])
    }

    /// Validate a caller-supplied override, listing the legal values on failure.
    pub fn require(&self, value: &str) -> Result<()> {
        if self.contains(value) {
            return Ok(());
        }
        Err(Error::validation_with_context(
            format!("invalid value '{}' for {}", value, self.name),
            ErrorContext::new().with_details(format!("valid options are: {}", self.values.join(", "))),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    static COLORS: ParamDomain = ParamDomain::new("test color", &["red", "green", "blue"]);
    static EMPTY: ParamDomain = ParamDomain::new("empty axis", &[]);

    #[test]
    fn choose_returns_a_member() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let picked = COLORS.choose(&mut rng).unwrap();
            assert!(COLORS.contains(picked));
        }
    }

    #[test]
    fn choose_on_empty_domain_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = EMPTY.choose(&mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidDomain { .. }));
        assert!(err.to_string().contains("empty axis"));
    }

    #[test]
    fn choose_is_reproducible_with_a_seeded_source() {
        let picks = |seed: u64| -> Vec<&'static str> {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| COLORS.choose(&mut rng).unwrap()).collect()
        };
        assert_eq!(picks(7), picks(7));
    }

    #[test]
    fn choose_visits_every_member() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(COLORS.choose(&mut rng).unwrap());
        }
        assert_eq!(seen.len(), COLORS.len());
    }

    #[test]
    fn require_rejects_unknown_value_listing_options() {
        assert!(COLORS.require("green").is_ok());
        let err = COLORS.require("magenta").unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("invalid value 'magenta'"));
        assert!(rendered.contains("red, green, blue"));
    }

    #[test]
    fn membership_and_iteration() {
        assert_eq!(COLORS.len(), 3);
        assert!(!COLORS.is_empty());
        assert!(COLORS.contains("red"));
        assert!(!COLORS.contains("RED"));
        assert_eq!(COLORS.iter().collect::<Vec<_>>(), vec!["red", "green", "blue"]);
    }
}
