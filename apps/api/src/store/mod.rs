//! In-memory persistence. Every collection sits behind the `Repository` trait so
//! services receive their storage explicitly and tests start from a clean slate.

pub mod ids;
pub mod local_storage;
pub mod seed;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::job_analysis::JobAnalysis;
use crate::models::profile::Profile;
use crate::models::resume::Resume;
use crate::models::template::Template;
use crate::models::user::UserRow;
use crate::store::ids::{IdGenerator, SequentialIds};
use crate::store::local_storage::LocalStorage;

/// A stored record addressable by a numeric identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> u64;
}

macro_rules! entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> u64 {
                    self.id
                }
            }
        )+
    };
}

entity!(UserRow, Profile, JobAnalysis, Template, Resume);

/// Edit applied to a working copy of an entity. Returning `false` discards the copy.
pub type Edit<'a, T> = Box<dyn FnOnce(&mut T) -> bool + Send + 'a>;

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get(&self, id: u64) -> Option<T>;

    /// All entities in identifier order.
    async fn list(&self) -> Vec<T>;

    async fn filter(&self, predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync)) -> Vec<T>;

    /// Inserts or replaces the entity under its own identifier.
    async fn upsert(&self, entity: T);

    /// Inserts the entity unless a stored one matches `conflicts`; the check and the
    /// insert happen under one lock. Returns the conflicting entity on refusal.
    async fn insert_if_absent(
        &self,
        entity: T,
        conflicts: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync),
    ) -> Result<T, T>;

    /// Runs `edit` on a copy of the entity and stores the copy if `edit` returns true.
    /// Returns `None` when no entity has `id`, otherwise the stored entity and whether it changed.
    async fn update<'a>(&self, id: u64, edit: Edit<'a, T>) -> Option<(T, bool)>;

    async fn remove(&self, id: u64) -> Option<T>;
}

/// `Repository` backed by an ordered map guarded by an async lock.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    rows: RwLock<BTreeMap<u64, T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        Self {
            rows: RwLock::new(entities.into_iter().map(|e| (e.id(), e)).collect()),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: u64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn list(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }

    async fn filter(&self, predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync)) -> Vec<T> {
        self.rows
            .read()
            .await
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    async fn upsert(&self, entity: T) {
        self.rows.write().await.insert(entity.id(), entity);
    }

    async fn insert_if_absent(
        &self,
        entity: T,
        conflicts: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync),
    ) -> Result<T, T> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.values().find(|e| conflicts(*e)) {
            return Err(existing.clone());
        }
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update<'a>(&self, id: u64, edit: Edit<'a, T>) -> Option<(T, bool)> {
        let mut rows = self.rows.write().await;
        let stored = rows.get_mut(&id)?;
        let mut draft = stored.clone();
        if edit(&mut draft) {
            *stored = draft;
            Some((stored.clone(), true))
        } else {
            Some((stored.clone(), false))
        }
    }

    async fn remove(&self, id: u64) -> Option<T> {
        self.rows.write().await.remove(&id)
    }
}

/// Every collection the services need, plus browser-style key/value storage and the id source.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn Repository<UserRow>>,
    pub profiles: Arc<dyn Repository<Profile>>,
    pub job_analyses: Arc<dyn Repository<JobAnalysis>>,
    pub templates: Arc<dyn Repository<Template>>,
    pub resumes: Arc<dyn Repository<Resume>>,
    pub local_storage: Arc<LocalStorage>,
    pub ids: Arc<dyn IdGenerator>,
}

impl Store {
    /// A store with no records and ids starting at 1.
    pub fn empty() -> Self {
        Store {
            users: Arc::new(InMemoryRepository::<UserRow>::new()),
            profiles: Arc::new(InMemoryRepository::<Profile>::new()),
            job_analyses: Arc::new(InMemoryRepository::<JobAnalysis>::new()),
            templates: Arc::new(InMemoryRepository::<Template>::new()),
            resumes: Arc::new(InMemoryRepository::<Resume>::new()),
            local_storage: Arc::new(LocalStorage::new()),
            ids: Arc::new(SequentialIds::default()),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.ids.next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(id: u64, user_id: u64) -> Profile {
        Profile::empty(id, user_id, Utc::now())
    }

    #[tokio::test]
    async fn test_upsert_get_and_list_in_id_order() {
        let repo: InMemoryRepository<Profile> = InMemoryRepository::new();
        repo.upsert(profile(3, 30)).await;
        repo.upsert(profile(1, 10)).await;
        assert_eq!(repo.get(3).await.map(|p| p.user_id), Some(30));
        let ids: Vec<u64> = repo.list().await.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_filter_by_predicate() {
        let repo = InMemoryRepository::with_entities(vec![
            profile(1, 10),
            profile(2, 20),
            profile(3, 10),
        ]);
        let mine = repo.filter(&|p: &Profile| p.user_id == 10).await;
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn test_update_commits_only_when_edit_accepts() {
        let repo = InMemoryRepository::with_entities(vec![profile(1, 10)]);

        let (_, changed) = repo
            .update(
                1,
                Box::new(|p: &mut Profile| {
                    p.skills.push("Rust".to_string());
                    false
                }),
            )
            .await
            .unwrap();
        assert!(!changed);
        assert!(repo.get(1).await.unwrap().skills.is_empty());

        let (stored, changed) = repo
            .update(1, Box::new(|p: &mut Profile| p.add_skill("Rust")))
            .await
            .unwrap();
        assert!(changed);
        assert_eq!(stored.skills, vec!["Rust".to_string()]);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none() {
        let repo: InMemoryRepository<Profile> = InMemoryRepository::new();
        assert!(repo.update(9, Box::new(|_: &mut Profile| true)).await.is_none());
    }

    #[tokio::test]
    async fn test_insert_if_absent_refuses_conflicts() {
        let repo = InMemoryRepository::with_entities(vec![profile(1, 10)]);

        let refused = repo
            .insert_if_absent(profile(2, 10), &|p: &Profile| p.user_id == 10)
            .await;
        assert_eq!(refused.map_err(|p| p.id), Err(1));
        assert!(repo.get(2).await.is_none());

        let inserted = repo
            .insert_if_absent(profile(3, 30), &|p: &Profile| p.user_id == 30)
            .await;
        assert!(inserted.is_ok());
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_keep_one_per_key() {
        let repo = Arc::new(InMemoryRepository::<Profile>::new());
        let handles: Vec<_> = (1..=50)
            .map(|id| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_if_absent(profile(id, 7), &|p: &Profile| p.user_id == 7)
                        .await
                        .is_ok()
                })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_takes_exactly_one() {
        let repo = InMemoryRepository::with_entities(vec![profile(1, 10), profile(2, 10)]);
        assert!(repo.remove(1).await.is_some());
        assert!(repo.remove(1).await.is_none());
        assert_eq!(repo.list().await.len(), 1);
    }
}
