// sparkify-core/src/domain/identity.rs

use uuid::Uuid;

/// Source of synthetic row keys.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 rendered as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic `<prefix>-<n>` keys, for reproducible runs.
#[derive(Debug, Clone)]
pub struct SequenceIds {
    prefix: String,
    next: u64,
}

impl SequenceIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
