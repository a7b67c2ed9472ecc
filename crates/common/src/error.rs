/// Error types that can be built from a bare message.
///
/// Every library crate implements this for its own `Error` and then invokes
/// [`impl_context!`] inside its error module.
pub trait FromMessage: Sized {
    fn from_message(message: String) -> Self;
}

/// Prefix a displayable source with a context string: `"{context}: {source}"`.
#[must_use]
pub fn prefixed(context: &str, source: &dyn std::fmt::Display) -> String {
    format!("{context}: {source}")
}

/// Generate a crate-local `Context` trait with `.context()` and
/// `.with_context()` on `Result<T, E: Display>` and `Option<T>`.
///
/// The invoking module must define `Error: FromMessage` and
/// `type Result<T> = std::result::Result<T, Error>`.
///
/// ```ignore
/// // crates/skills/src/error.rs
/// augur_common::impl_context!();
/// ```
#[macro_export]
macro_rules! impl_context {
    () => {
        pub trait Context<T> {
            fn context(self, context: impl Into<String>) -> Result<T>;

            fn with_context<C, F>(self, f: F) -> Result<T>
            where
                C: Into<String>,
                F: FnOnce() -> C;
        }

        impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
            fn context(self, context: impl Into<String>) -> Result<T> {
                self.with_context(|| context)
            }

            fn with_context<C, F>(self, f: F) -> Result<T>
            where
                C: Into<String>,
                F: FnOnce() -> C,
            {
                self.map_err(|source| {
                    let message = $crate::error::prefixed(&f().into(), &source);
                    <Error as $crate::FromMessage>::from_message(message)
                })
            }
        }

        impl<T> Context<T> for Option<T> {
            fn context(self, context: impl Into<String>) -> Result<T> {
                self.with_context(|| context)
            }

            fn with_context<C, F>(self, f: F) -> Result<T>
            where
                C: Into<String>,
                F: FnOnce() -> C,
            {
                self.ok_or_else(|| <Error as $crate::FromMessage>::from_message(f().into()))
            }
        }
    };
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::FromMessage;

    #[derive(Debug, thiserror::Error)]
    enum Error {
        #[error("{0}")]
        Message(String),
    }

    impl FromMessage for Error {
        fn from_message(message: String) -> Self {
            Self::Message(message)
        }
    }

    type Result<T> = std::result::Result<T, Error>;

    crate::impl_context!();

    #[test]
    fn result_context_prefixes_source() {
        let failed: std::result::Result<(), &str> = Err("disk full");
        let err = failed.context("copy SKILL.md").unwrap_err();
        assert_eq!(err.to_string(), "copy SKILL.md: disk full");
    }

    #[test]
    fn option_context_uses_message_only() {
        let missing: Option<u8> = None;
        let err = missing
            .with_context(|| format!("no plugin named {}", "seo"))
            .unwrap_err();
        assert_eq!(err.to_string(), "no plugin named seo");
    }

    #[test]
    fn ok_values_pass_through() {
        let ok: std::result::Result<u8, &str> = Ok(7);
        assert_eq!(ok.context("unused").unwrap(), 7);
        assert_eq!(Some(3).context("unused").unwrap(), 3);
    }
}
