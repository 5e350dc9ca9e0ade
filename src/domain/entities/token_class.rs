use time::Duration;

/// The two kinds of token a session is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Access,
    Renewal,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Renewal => "renewal",
        }
    }

    /// Lifetime from issuance.
    pub fn ttl(&self) -> Duration {
        match self {
            TokenClass::Access => Duration::minutes(30),
            TokenClass::Renewal => Duration::hours(24),
        }
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
