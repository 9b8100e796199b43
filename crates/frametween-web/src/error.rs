use thiserror::Error;

/// Browser capabilities the bridge could not reach.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebError {
    #[error("no global `window` (not running on the main browser thread?)")]
    NoWindow,

    #[error("`window.performance` is unavailable")]
    NoPerformance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            WebError::NoPerformance.to_string(),
            "`window.performance` is unavailable"
        );
    }
}
