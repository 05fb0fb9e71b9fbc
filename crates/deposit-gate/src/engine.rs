//! The deposit gate: owns the store, the delegate registry and the event log.
//!
//! Every public mutator runs inside [`GateEngine::transact`]: the operation
//! sees a [`StagedState`] overlay, and only a fully successful operation has
//! its writes applied to the store and its events appended to the log.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::balance;
use crate::classifier;
use crate::config::GenesisConfig;
use crate::delegate::{DelegateRegistry, DepositGater};
use crate::error::{GateError, GateResult};
use crate::events::GateEvent;
use crate::policy;
use crate::roles;
use crate::status::{AccountStatus, GateStatus, PolicyRow};
use crate::store::{StagedState, StateKey, StateRead, StateStore, StateValue, StateWrite};
use crate::types::{Address, DepositPolicy, DepositRequest, DepositType, RoleId, TokenMetadata};

/// Whether `store` already holds a gate created by [`GateEngine::genesis`].
pub fn is_initialized<S: StateStore + ?Sized>(store: &S) -> GateResult<bool> {
    Ok(store.read_metadata()?.is_some())
}

pub struct GateEngine<S: StateStore> {
    store: S,
    gaters: DelegateRegistry,
    events: Vec<GateEvent>,
}

impl<S: StateStore + fmt::Debug> fmt::Debug for GateEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateEngine")
            .field("store", &self.store)
            .field("gaters", &self.gaters)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl<S: StateStore> GateEngine<S> {
    /// Initialize a fresh store.
    ///
    /// Seeds every configured admin and the deposit contract as permanent
    /// grants, then writes token metadata, initial policies and the optional
    /// custom gater.
    pub fn genesis(store: S, config: &GenesisConfig) -> GateResult<Self> {
        config.validate()?;
        if is_initialized(&store)? {
            return Err(GateError::AlreadyInitialized);
        }

        let mut engine = Self::with_store(store);
        engine.transact("genesis", |state, _| {
            for admin in &config.admins {
                roles::seed_permanent(state, RoleId::DEFAULT_ADMIN, admin)?;
            }
            roles::seed_permanent(state, RoleId::DEPOSIT_CALLER, &config.deposit_contract)?;

            state.write(
                StateKey::Metadata,
                Some(StateValue::Metadata(config.token.clone())),
            );
            for entry in &config.policies {
                policy::store_policy(state, entry.deposit_type, entry.policy());
            }
            if let Some(gater) = config.custom_gater {
                store_custom_gater(state, Some(gater))?;
            }
            Ok(())
        })?;

        info!(
            backend = engine.store.backend_label(),
            admins = config.admins.len(),
            deposit_contract = %config.deposit_contract,
            "Deposit gate initialized"
        );
        Ok(engine)
    }

    /// Reopen a store created by [`GateEngine::genesis`].
    pub fn open(store: S) -> GateResult<Self> {
        if !is_initialized(&store)? {
            return Err(GateError::NotInitialized);
        }
        debug!(backend = store.backend_label(), "Deposit gate opened");
        Ok(Self::with_store(store))
    }

    fn with_store(store: S) -> Self {
        Self {
            store,
            gaters: DelegateRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Run `operation` against a staged overlay and commit it only on success.
    fn transact<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut StagedState<'_>, &DelegateRegistry) -> GateResult<T>,
    ) -> GateResult<T> {
        let mut staged = StagedState::new(&self.store);
        match f(&mut staged, &self.gaters) {
            Ok(value) => {
                let (batch, events) = staged.into_parts();
                if !batch.is_empty() {
                    self.store.apply(batch)?;
                }
                self.events.extend(events);
                Ok(value)
            }
            Err(err) => {
                warn!(operation, error = %err, "Operation rejected, no state changed");
                Err(err)
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // Role registry

    pub fn has_role(&self, role: RoleId, account: &Address) -> GateResult<bool> {
        roles::has_role(&self.store, role, account)
    }

    pub fn is_permanent(&self, role: RoleId, account: &Address) -> GateResult<bool> {
        roles::is_permanent(&self.store, role, account)
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        account: &Address,
    ) -> GateResult<bool> {
        self.transact("grant_role", |state, _| {
            roles::grant_role(state, caller, role, account)
        })
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        account: &Address,
    ) -> GateResult<bool> {
        self.transact("revoke_role", |state, _| {
            roles::revoke_role(state, caller, role, account)
        })
    }

    pub fn renounce_role(
        &mut self,
        caller: &Address,
        role: RoleId,
        account: &Address,
    ) -> GateResult<bool> {
        self.transact("renounce_role", |state, _| {
            roles::renounce_role(state, caller, role, account)
        })
    }

    // Policy store

    pub fn get_policy(&self, deposit_type: DepositType) -> GateResult<DepositPolicy> {
        policy::get_policy(&self.store, deposit_type)
    }

    pub fn set_policy(
        &mut self,
        caller: &Address,
        deposit_type: DepositType,
        policy: DepositPolicy,
    ) -> GateResult<()> {
        self.transact("set_policy", |state, _| {
            policy::set_policy(state, caller, deposit_type, policy)
        })
    }

    // Permission balance

    pub fn balance_of(&self, account: &Address) -> GateResult<u128> {
        balance::balance_of(&self.store, account)
    }

    pub fn total_supply(&self) -> GateResult<u128> {
        balance::total_supply(&self.store)
    }

    pub fn token_metadata(&self) -> GateResult<TokenMetadata> {
        balance::token_metadata(&self.store)
    }

    /// Mint permission units. Returns the recipient's new balance.
    pub fn mint(&mut self, caller: &Address, to: &Address, amount: u128) -> GateResult<u128> {
        self.transact("mint", |state, _| balance::mint(state, caller, to, amount))
    }

    // Custom delegate

    pub fn custom_gater(&self) -> GateResult<Option<Address>> {
        Ok(self.store.read_address(&StateKey::CustomGater)?)
    }

    /// Point the custom gater slot at `gater`, or clear it. Admin only.
    /// Returns the previous value. The zero address clears the slot.
    pub fn set_custom_gater(
        &mut self,
        caller: &Address,
        gater: Option<Address>,
    ) -> GateResult<Option<Address>> {
        self.transact("set_custom_gater", |state, _| {
            roles::require_role(&*state, RoleId::DEFAULT_ADMIN, caller)?;
            store_custom_gater(state, gater)
        })
    }

    /// Bind `address` to an in-process implementation. The slot itself is
    /// set separately through [`GateEngine::set_custom_gater`].
    pub fn register_gater(&mut self, address: Address, gater: Arc<dyn DepositGater>) {
        debug!(gater = %address, "Gater implementation registered");
        self.gaters.register(address, gater);
    }

    pub fn gaters(&self) -> &DelegateRegistry {
        &self.gaters
    }

    // Decision

    /// Decide whether `request` may proceed, charging one permission unit to
    /// its sender unless the delegate approves or the category is exempt.
    ///
    /// `caller` must hold [`RoleId::DEPOSIT_CALLER`]. Any error leaves every
    /// store untouched.
    pub fn check_deposit(&mut self, caller: &Address, request: &DepositRequest) -> GateResult<bool> {
        self.transact("check_deposit", |state, gaters| {
            decide(state, gaters, caller, request)
        })
    }

    // Status and events

    pub fn status(&self, account: Option<&Address>) -> GateResult<GateStatus> {
        let policies = DepositType::KNOWN
            .iter()
            .map(|ty| -> GateResult<PolicyRow> { Ok(PolicyRow::new(*ty, self.get_policy(*ty)?)) })
            .collect::<GateResult<Vec<_>>>()?;

        let account = match account {
            Some(address) => Some(AccountStatus {
                address: *address,
                is_admin: self.has_role(RoleId::DEFAULT_ADMIN, address)?,
                admin_permanent: self.is_permanent(RoleId::DEFAULT_ADMIN, address)?,
                is_deposit_caller: self.has_role(RoleId::DEPOSIT_CALLER, address)?,
                balance: self.balance_of(address)?,
            }),
            None => None,
        };

        Ok(GateStatus {
            backend: self.store.backend_label().to_string(),
            token: self.token_metadata()?,
            total_supply: self.total_supply()?,
            custom_gater: self.custom_gater()?,
            policies,
            account,
        })
    }

    /// Events of committed operations, oldest first.
    pub fn events(&self) -> &[GateEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GateEvent> {
        std::mem::take(&mut self.events)
    }
}

fn decide<W: StateWrite + ?Sized>(
    state: &mut W,
    gaters: &DelegateRegistry,
    caller: &Address,
    request: &DepositRequest,
) -> GateResult<bool> {
    roles::require_role(&*state, RoleId::DEPOSIT_CALLER, caller)?;

    if let Some(address) = state.read_address(&StateKey::CustomGater)? {
        if gaters.resolve(&address)?.check_deposit(request)? {
            debug!(gater = %address, sender = %request.sender, "Deposit approved by custom gater");
            return Ok(true);
        }
    }

    let deposit_type =
        classifier::classify(&request.withdrawal_credentials, &request.signature)?;
    let policy = state.read_policy(deposit_type)?;
    if policy.blocked {
        return Err(GateError::DepositTypeBlocked(deposit_type));
    }
    if !policy.no_token {
        balance::burn_one(state, &request.sender)?;
    }

    info!(
        sender = %request.sender,
        deposit_type = %deposit_type,
        charged = !policy.no_token,
        amount_gwei = request.amount,
        "Deposit allowed"
    );
    Ok(true)
}

fn store_custom_gater<W: StateWrite + ?Sized>(
    state: &mut W,
    gater: Option<Address>,
) -> GateResult<Option<Address>> {
    let current = gater.filter(|address| !address.is_zero());
    let previous = state.read_address(&StateKey::CustomGater)?;

    state.write(StateKey::CustomGater, current.map(StateValue::Address));
    state.emit(GateEvent::CustomGaterChanged { previous, current });

    match current {
        Some(address) => info!(gater = %address, "Custom gater set"),
        None => info!("Custom gater cleared"),
    }
    Ok(previous)
}
