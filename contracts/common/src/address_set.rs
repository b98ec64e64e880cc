//! Enumerable address set backed by persistent storage.
//!
//! Layout: a dense `Vec<Address>` of members plus a per-member 1-based slot
//! index, so membership tests, insertion and removal are all O(1) in storage
//! reads. Removal moves the last member into the vacated slot, which means
//! **enumeration order is not stable across removals**: callers must treat
//! the member list as an unordered snapshot.

use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SetKey {
    /// Dense member list of the set identified by the scope id.
    Members(BytesN<32>),
    /// 1-based position of an account inside `Members`.
    Slot(BytesN<32>, Address),
}

pub struct AddressSet {
    env: Env,
    scope: BytesN<32>,
}

impl AddressSet {
    pub fn new(env: &Env, scope: BytesN<32>) -> Self {
        Self {
            env: env.clone(),
            scope,
        }
    }

    fn members_key(&self) -> SetKey {
        SetKey::Members(self.scope.clone())
    }

    fn slot_key(&self, account: &Address) -> SetKey {
        SetKey::Slot(self.scope.clone(), account.clone())
    }

    fn write_members(&self, members: &Vec<Address>) {
        let key = self.members_key();
        self.env.storage().persistent().set(&key, members);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn write_slot(&self, account: &Address, slot: u32) {
        let key = self.slot_key(account);
        self.env.storage().persistent().set(&key, &slot);
        self.env
            .storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// Current members in storage order.
    pub fn members(&self) -> Vec<Address> {
        self.env
            .storage()
            .persistent()
            .get(&self.members_key())
            .unwrap_or(Vec::new(&self.env))
    }

    pub fn contains(&self, account: &Address) -> bool {
        self.env.storage().persistent().has(&self.slot_key(account))
    }

    pub fn len(&self) -> u32 {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn at(&self, index: u32) -> Option<Address> {
        self.members().get(index)
    }

    /// Appends `account`. Returns `false` without touching storage if it is
    /// already a member.
    pub fn add(&self, account: &Address) -> bool {
        if self.contains(account) {
            return false;
        }
        let mut members = self.members();
        members.push_back(account.clone());
        self.write_slot(account, members.len());
        self.write_members(&members);
        true
    }

    /// Removes `account` by swapping the last member into its slot.
    /// Returns `false` without touching storage if it is not a member.
    pub fn remove(&self, account: &Address) -> bool {
        let slot_key = self.slot_key(account);
        let slot: u32 = match self.env.storage().persistent().get(&slot_key) {
            Some(slot) => slot,
            None => return false,
        };

        let mut members = self.members();
        let index = slot.saturating_sub(1);
        let last_index = members.len().saturating_sub(1);
        if index != last_index {
            let last = members.get_unchecked(last_index);
            members.set(index, last.clone());
            self.write_slot(&last, slot);
        }
        members.pop_back();

        self.env.storage().persistent().remove(&slot_key);
        self.write_members(&members);
        true
    }

    /// Returns at most `limit` members starting at `offset`.
    ///
    /// Never fails: a zero `limit` or an `offset` past the end yields an
    /// empty page.
    pub fn page(&self, offset: u32, limit: u32) -> Vec<Address> {
        let members = self.members();
        let total = members.len();
        if limit == 0 || offset >= total {
            return Vec::new(&self.env);
        }
        let end = offset.saturating_add(limit).min(total);
        members.slice(offset..end)
    }
}
