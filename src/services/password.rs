use std::ops::RangeInclusive;

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Work factors bcrypt accepts.
pub const COST_RANGE: RangeInclusive<u32> = 4..=31;

/// bcrypt with a cost fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, BcryptError> {
        hash(password, self.cost)
    }

    /// Constant-time check against a stored hash. A malformed hash never
    /// verifies.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        verify(password, stored_hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher::new(DEFAULT_COST)
    }
}
