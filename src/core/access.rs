use crate::core::address::Address;
use crate::core::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Holds the owner fixed at creation. There is no way to change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        AccessControl { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn require_owner(&self, caller: Address) -> LedgerResult<()> {
        if caller != self.owner {
            return Err(LedgerError::Unauthorized { caller });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_owner() {
        let owner = Address::new([1u8; 20]);
        let stranger = Address::new([2u8; 20]);
        let access = AccessControl::new(owner);

        assert_eq!(access.owner(), owner);
        assert!(access.require_owner(owner).is_ok());
        match access.require_owner(stranger) {
            Err(LedgerError::Unauthorized { caller }) => assert_eq!(caller, stranger),
            other => panic!("Expected Unauthorized, got {other:?}"),
        }
    }
}
