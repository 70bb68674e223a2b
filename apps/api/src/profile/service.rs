use chrono::Utc;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::latency::{Latency, Operation};
use crate::models::profile::{Profile, ProfileEntry, ProfileUpdate};
use crate::store::ids::IdGenerator;
use crate::store::{Repository, Store};

async fn find_profile(store: &Store, user_id: u64) -> Option<Profile> {
    store
        .profiles
        .filter(&|p: &Profile| p.user_id == user_id)
        .await
        .into_iter()
        .next()
}

/// Returns the stored profile, or an empty unsaved one for users who have none yet.
pub async fn get_profile(
    store: &Store,
    latency: &Latency,
    user_id: u64,
) -> Result<Profile, AppError> {
    latency.simulate(Operation::GetProfile).await;
    Ok(current_profile(store, user_id).await)
}

/// Profile lookup without simulated latency, for callers composing several reads.
pub async fn current_profile(store: &Store, user_id: u64) -> Profile {
    match find_profile(store, user_id).await {
        Some(profile) => profile,
        None => {
            debug!("No profile for user {user_id}; returning default");
            Profile::empty(store.next_id(), user_id, Utc::now())
        }
    }
}

/// Shallow-merges the supplied sections over the stored profile, creating it if needed.
pub async fn update_profile(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    update: ProfileUpdate,
) -> Result<Profile, AppError> {
    latency.simulate(Operation::UpdateProfile).await;

    let profile = ensure_profile(store, user_id).await;
    let ids = store.ids.clone();
    let (stored, _) = store
        .profiles
        .update(
            profile.id,
            Box::new(move |p: &mut Profile| {
                p.apply(update);
                p.normalize(&mut || ids.next_id());
                p.updated_at = Utc::now();
                true
            }),
        )
        .await
        .ok_or_else(|| profile_vanished(user_id))?;

    info!("Updated profile {} for user {user_id}", stored.id);
    Ok(stored)
}

/// Appends an entry to its section under a freshly generated id.
pub async fn add_entry<T: ProfileEntry>(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    entry: T,
) -> Result<T, AppError> {
    latency.simulate(Operation::UpdateProfile).await;

    let profile = ensure_profile(store, user_id).await;
    let ids = store.ids.clone();

    let (mut stored, _) = store
        .profiles
        .update(
            profile.id,
            Box::new(move |p: &mut Profile| {
                p.push_entry(entry, &mut || ids.next_id());
                p.updated_at = Utc::now();
                true
            }),
        )
        .await
        .ok_or_else(|| profile_vanished(user_id))?;
    let added = T::section(&mut stored)
        .last()
        .cloned()
        .ok_or_else(|| profile_vanished(user_id))?;

    info!("Added {} entry {} for user {user_id}", T::LABEL, added.entry_id());
    Ok(added)
}

/// Replaces the entry with `entry_id` in place. The stored id is kept whatever the payload says.
pub async fn update_entry<T: ProfileEntry>(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    entry_id: u64,
    mut entry: T,
) -> Result<T, AppError> {
    latency.simulate(Operation::UpdateProfile).await;

    let profile = find_profile(store, user_id)
        .await
        .ok_or_else(|| entry_not_found::<T>(entry_id))?;
    entry.set_entry_id(entry_id);
    let replacement = entry.clone();

    let (_, changed) = store
        .profiles
        .update(
            profile.id,
            Box::new(move |p: &mut Profile| {
                let Some(slot) = T::section(p).iter_mut().find(|e| e.entry_id() == entry_id)
                else {
                    return false;
                };
                *slot = replacement;
                p.updated_at = Utc::now();
                true
            }),
        )
        .await
        .ok_or_else(|| profile_vanished(user_id))?;

    if !changed {
        return Err(entry_not_found::<T>(entry_id));
    }
    info!("Updated {} entry {entry_id} for user {user_id}", T::LABEL);
    Ok(entry)
}

/// Removes exactly the entry with `entry_id` from its section.
pub async fn remove_entry<T: ProfileEntry>(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    entry_id: u64,
) -> Result<(), AppError> {
    latency.simulate(Operation::UpdateProfile).await;

    let profile = find_profile(store, user_id)
        .await
        .ok_or_else(|| entry_not_found::<T>(entry_id))?;

    let (_, changed) = store
        .profiles
        .update(
            profile.id,
            Box::new(move |p: &mut Profile| {
                let section = T::section(p);
                let Some(index) = section.iter().position(|e| e.entry_id() == entry_id) else {
                    return false;
                };
                section.remove(index);
                p.updated_at = Utc::now();
                true
            }),
        )
        .await
        .ok_or_else(|| profile_vanished(user_id))?;

    if !changed {
        return Err(entry_not_found::<T>(entry_id));
    }
    info!("Removed {} entry {entry_id} for user {user_id}", T::LABEL);
    Ok(())
}

/// Adds a skill; blank skills are rejected, duplicates leave the profile unchanged.
pub async fn add_skill(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    skill: &str,
) -> Result<Profile, AppError> {
    latency.simulate(Operation::UpdateProfile).await;

    if skill.trim().is_empty() {
        return Err(AppError::Validation("Skill cannot be empty".to_string()));
    }

    let profile = ensure_profile(store, user_id).await;
    let skill = skill.to_string();
    let (stored, changed) = store
        .profiles
        .update(
            profile.id,
            Box::new(move |p: &mut Profile| {
                let added = p.add_skill(&skill);
                if added {
                    p.updated_at = Utc::now();
                }
                added
            }),
        )
        .await
        .ok_or_else(|| profile_vanished(user_id))?;

    if changed {
        info!("Added skill for user {user_id}");
    }
    Ok(stored)
}

pub async fn remove_skill(
    store: &Store,
    latency: &Latency,
    user_id: u64,
    skill: &str,
) -> Result<Profile, AppError> {
    latency.simulate(Operation::UpdateProfile).await;

    let skill = skill.trim();
    let not_found = || AppError::NotFound(format!("Skill '{skill}' not found"));
    let profile = find_profile(store, user_id).await.ok_or_else(not_found)?;
    let target = skill.to_string();

    let (stored, changed) = store
        .profiles
        .update(
            profile.id,
            Box::new(move |p: &mut Profile| {
                let removed = p.remove_skill(&target);
                if removed {
                    p.updated_at = Utc::now();
                }
                removed
            }),
        )
        .await
        .ok_or_else(|| profile_vanished(user_id))?;

    if !changed {
        return Err(not_found());
    }
    info!("Removed skill for user {user_id}");
    Ok(stored)
}

/// Stored profile for the user, persisting an empty one first if none exists.
async fn ensure_profile(store: &Store, user_id: u64) -> Profile {
    if let Some(profile) = find_profile(store, user_id).await {
        return profile;
    }
    let profile = Profile::empty(store.next_id(), user_id, Utc::now());
    match store
        .profiles
        .insert_if_absent(profile, &|p: &Profile| p.user_id == user_id)
        .await
    {
        Ok(created) => {
            info!("Created profile {} for user {user_id}", created.id);
            created
        }
        Err(existing) => existing,
    }
}

fn entry_not_found<T: ProfileEntry>(entry_id: u64) -> AppError {
    AppError::NotFound(format!("{} entry {entry_id} not found", T::LABEL))
}

fn profile_vanished(user_id: u64) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "profile for user {user_id} disappeared during update"
    ))
}
