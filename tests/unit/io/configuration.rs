//! Tests for solver constants and `SolveConfig` validation

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use wordlinks::CoverError;
    use wordlinks::io::configuration::{
        ALPHABET, CANONICAL_KEY_SEPARATOR, DEFAULT_PULSE_INTERVAL_MS, DISPLAY_SEPARATOR,
        MAX_WORD_LISTS, SolveConfig, WORD_LENGTH, available_concurrency,
    };

    // Tests the alphabet is a..z in order
    #[test]
    fn test_alphabet_is_lowercase_ascii() {
        assert_eq!(ALPHABET.len(), 26);
        assert_eq!(ALPHABET.first(), Some(&'a'));
        assert_eq!(ALPHABET.last(), Some(&'z'));
        assert!(ALPHABET.windows(2).all(|pair| pair[0] < pair[1]));
    }

    // Tests word and list limits
    #[test]
    fn test_word_limits() {
        assert_eq!(WORD_LENGTH, 5);
        assert_eq!(MAX_WORD_LISTS, 2);
    }

    // Tests separators used for keys and display
    #[test]
    fn test_separators() {
        assert_eq!(CANONICAL_KEY_SEPARATOR, ",");
        assert_eq!(DISPLAY_SEPARATOR, ", ");
    }

    // Tests defaults use hardware parallelism and the standard pulse interval
    #[test]
    fn test_default_config() {
        let config = SolveConfig::default();

        assert_eq!(config.concurrency, available_concurrency());
        assert_eq!(
            config.pulse_interval,
            Duration::from_millis(DEFAULT_PULSE_INTERVAL_MS)
        );
        assert!(config.given_options.is_empty());
        assert!(config.validate().is_ok());
    }

    // Tests builder methods set each field
    #[test]
    fn test_builders() {
        let config = SolveConfig::default()
            .with_concurrency(3)
            .with_pulse_interval(Duration::from_millis(7))
            .with_given_options(["dorsw", "altwz"]);

        assert_eq!(config.concurrency, 3);
        assert_eq!(config.pulse_interval, Duration::from_millis(7));
        assert_eq!(config.given_options, ["dorsw", "altwz"]);
    }

    // Tests zero workers are rejected
    #[test]
    fn test_zero_concurrency_invalid() {
        let config = SolveConfig::default().with_concurrency(0);

        assert!(matches!(
            config.validate(),
            Err(CoverError::InvalidParameter { .. })
        ));
    }

    // Tests effective concurrency is capped by hardware and never zero
    #[test]
    fn test_effective_concurrency_bounds() {
        let huge = SolveConfig::default().with_concurrency(usize::MAX);
        assert_eq!(huge.effective_concurrency(), available_concurrency());

        let single = SolveConfig::default().with_concurrency(1);
        assert_eq!(single.effective_concurrency(), 1);

        let zero = SolveConfig::default().with_concurrency(0);
        assert_eq!(zero.effective_concurrency(), 1);
    }

    // Tests detected parallelism is positive
    #[test]
    fn test_available_concurrency_positive() {
        assert!(available_concurrency() >= 1);
    }
}
