//! In-memory fakes of the service ports for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::db::{StoreError, UserStore};
use crate::models::User;
use crate::nutrition::{NutritionError, NutritionFacts, NutritionSource};

/// User store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().unwrap().get(&id).cloned()
    }

    pub fn update(&self, id: Uuid, f: impl FnOnce(&mut User)) {
        let mut users = self.users.write().unwrap();
        f(users.get_mut(&id).expect("user exists"));
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.get(id))
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.users.write().unwrap().insert(user.id, user.clone());
        Ok(())
    }
}

type ErrorFactory = Box<dyn Fn() -> NutritionError + Send + Sync>;

/// Nutrition source that returns a fixed outcome and records every lookup.
pub struct StubNutrition {
    outcome: Result<NutritionFacts, ErrorFactory>,
    calls: Mutex<Vec<String>>,
}

impl StubNutrition {
    pub fn returning(facts: NutritionFacts) -> Self {
        Self {
            outcome: Ok(facts),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: impl Fn() -> NutritionError + Send + Sync + 'static) -> Self {
        Self {
            outcome: Err(Box::new(error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Items looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NutritionSource for StubNutrition {
    async fn lookup(&self, item: &str) -> Result<NutritionFacts, NutritionError> {
        self.calls.lock().unwrap().push(item.to_string());
        match &self.outcome {
            Ok(facts) => Ok(*facts),
            Err(make_error) => Err(make_error()),
        }
    }
}
