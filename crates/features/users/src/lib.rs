//! User management module.
//!
//! Owns the user list and the current selection. Every mutation is announced
//! on the bus (`user.created`, `user.updated`, `user.deleted`,
//! `user.selected`); the module itself listens to nothing.

mod error;

pub use crate::error::{UsersError, UsersErrorExt};

use dash_kernel::prelude::*;
use dash_kernel::safe_nanoid;
use parking_lot::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<User>,
    selected: Option<UserId>,
}

impl DirectoryState {
    fn position(&self, id: &UserId) -> Result<usize, UsersError> {
        self.users.iter().position(|u| &u.id == id).ok_or_else(|| UsersError::not_found(id))
    }
}

#[dash_derive::dash_module]
pub struct UserDirectory {
    bus: AppBus,
    state: RwLock<DirectoryState>,
    subscriptions: Subscriptions,
}

impl UserDirectory {
    pub fn new(bus: AppBus, seed: impl IntoIterator<Item = User>) -> Self {
        let state = DirectoryState { users: seed.into_iter().collect(), selected: None };
        Self::from_inner(UserDirectoryInner {
            bus,
            state: RwLock::new(state),
            subscriptions: Subscriptions::new(),
        })
    }

    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.state.read().users.clone()
    }

    #[must_use]
    pub fn get(&self, id: &UserId) -> Option<User> {
        self.state.read().users.iter().find(|u| &u.id == id).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().users.is_empty()
    }

    #[must_use]
    pub fn selected(&self) -> Option<User> {
        let state = self.state.read();
        let id = state.selected.as_ref()?;
        state.users.iter().find(|u| &u.id == id).cloned()
    }

    /// Adds a user with a fresh id and emits `user.created`.
    ///
    /// # Errors
    /// [`UsersError::Validation`] when `name` is blank or `email` has no `@`.
    pub fn create(&self, name: &str, email: &str) -> Result<User, UsersError> {
        let user = User::new(safe_nanoid!(), name.trim(), email.trim());
        validate(&user)?;

        self.state.write().users.push(user.clone());
        info!(user = %user.id, "User created");
        self.bus.publish(&AppEvent::UserCreated { user: user.clone() });
        Ok(user)
    }

    /// Replaces the stored user with the same id and emits `user.updated`.
    ///
    /// # Errors
    /// [`UsersError::Validation`] for invalid fields, [`UsersError::NotFound`]
    /// when no user has that id.
    pub fn update(&self, user: User) -> Result<(), UsersError> {
        validate(&user)?;
        {
            let mut state = self.state.write();
            let index = state.position(&user.id).context("update")?;
            state.users[index] = user.clone();
        }
        info!(user = %user.id, "User updated");
        self.bus.publish(&AppEvent::UserUpdated { user });
        Ok(())
    }

    /// Removes a user, clearing the selection if it pointed at them, and
    /// emits `user.deleted`.
    ///
    /// # Errors
    /// [`UsersError::NotFound`] when no user has that id.
    pub fn delete(&self, id: &UserId) -> Result<User, UsersError> {
        let removed = {
            let mut state = self.state.write();
            let index = state.position(id).context("delete")?;
            if state.selected.as_ref() == Some(id) {
                state.selected = None;
            }
            state.users.remove(index)
        };
        info!(user = %id, "User deleted");
        self.bus.publish(&AppEvent::UserDeleted { user_id: id.clone() });
        Ok(removed)
    }

    /// Marks a user as selected and emits `user.selected`.
    ///
    /// # Errors
    /// [`UsersError::NotFound`] when no user has that id.
    pub fn select(&self, id: &UserId) -> Result<User, UsersError> {
        let user = {
            let mut state = self.state.write();
            let index = state.position(id).context("select")?;
            state.selected = Some(id.clone());
            state.users[index].clone()
        };
        self.bus.publish(&AppEvent::UserSelected { user: user.clone() });
        Ok(user)
    }

    /// Drops the selection without announcing it.
    pub fn clear_selection(&self) {
        self.state.write().selected = None;
    }
}

impl Module for UserDirectory {
    fn name(&self) -> &'static str {
        USERS
    }

    fn mount(&self, bus: &AppBus) -> Result<(), ModuleError> {
        // Emits only; mounting just records the module as attached.
        let bindings = std::iter::empty::<(&'static str, AppSubscriber)>();
        self.subscriptions.attach(USERS, bus, bindings).map(|_| ())
    }

    fn unmount(&self) {
        self.subscriptions.detach(USERS);
    }

    fn is_mounted(&self) -> bool {
        self.subscriptions.is_attached()
    }
}

fn validate(user: &User) -> Result<(), UsersError> {
    if user.name.trim().is_empty() {
        return Err(UsersError::invalid("name must not be empty"));
    }
    if !user.email.contains('@') {
        return Err(UsersError::invalid(format!("'{}' is not an email address", user.email)));
    }
    Ok(())
}
